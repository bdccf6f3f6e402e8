pub mod api_v1;
pub mod board_ws;
pub mod dashboard;

use actix_web::{HttpResponse, web};

/// Browser-facing board routes, shared by the binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async {
        HttpResponse::SeeOther()
            .insert_header(("Location", "/dashboard"))
            .finish()
    }))
    .route("/dashboard", web::get().to(dashboard::index))
    .route("/dashboard/grid", web::get().to(dashboard::grid))
    .route("/dashboard/ws", web::get().to(board_ws::ws_connect))
    .route("/dashboard/page", web::post().to(dashboard::change_page))
    .route("/dashboard/selection/toggle", web::post().to(dashboard::toggle_department))
    .route("/dashboard/selection/all", web::post().to(dashboard::select_all))
    .route("/dashboard/selection/reset", web::post().to(dashboard::reset_selection))
    .service(web::scope("/api/v1").configure(api_v1::configure));
}

/// Fallback for unknown paths (register last).
pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
