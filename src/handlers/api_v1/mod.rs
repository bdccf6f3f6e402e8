pub mod attendance;
pub mod company;
pub mod departments;
pub mod positions;
pub mod users;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::Next,
    web,
};

/// CSRF protection for REST API mutation endpoints.
///
/// Rejects POST/PUT/PATCH/DELETE requests that don't have Content-Type: application/json.
/// Browsers cannot send cross-origin JSON with cookies via a simple form POST,
/// so the Content-Type check stands in for a token.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == Method::POST || method == Method::PUT || method == Method::PATCH || method == Method::DELETE {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Attachment response for files relayed from the backend.
pub(crate) fn attachment(bytes: Vec<u8>, content_type: &str, file_name: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(content_type.to_string())
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(bytes)
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/departments")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(departments::list))
            .route("", web::post().to(departments::create))
            .route("/{id}", web::patch().to(departments::update))
            .route("/{id}", web::delete().to(departments::delete)),
    );
    cfg.service(
        web::scope("/positions")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(positions::list))
            .route("", web::post().to(positions::create))
            .route("/{id}", web::put().to(positions::update))
            .route("/{id}", web::delete().to(positions::delete)),
    );
    // Fixed paths BEFORE /users/{id}
    cfg.service(
        web::scope("/users")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::post().to(users::create))
            .route("/template", web::get().to(users::template))
            .route("/qrcodes", web::get().to(users::qr_code_list))
            .route("/{employee_id}/qrcode", web::get().to(users::qr_code))
            .route("/{id}", web::patch().to(users::update))
            .route("/{id}", web::delete().to(users::delete)),
    );
    cfg.service(
        web::scope("/attendance")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/qrcode", web::post().to(attendance::check_in)),
    );
    cfg.route("/company", web::get().to(company::read));
}
