use actix_web::{HttpResponse, web};

use super::attachment;
use crate::api::{ApiClient, UserRequest};
use crate::auth::validate;
use crate::errors::AppError;
use crate::templates_structs::ApiErrorResponse;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// POST /api/v1/users
pub async fn create(
    api: web::Data<ApiClient>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    let errors = validate::user_errors(&body, true);
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiErrorResponse::validation(&errors)));
    }
    let created = api.create_user(&body).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PATCH /api/v1/users/{id}
pub async fn update(
    api: web::Data<ApiClient>,
    path: web::Path<i64>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    let errors = validate::user_errors(&body, false);
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiErrorResponse::validation(&errors)));
    }
    let updated = api.update_user(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    api: web::Data<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = api.delete_user(id).await?;
    log::info!("Deleted user {id}");
    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/v1/users/template - bulk import spreadsheet template
pub async fn template(api: web::Data<ApiClient>) -> Result<HttpResponse, AppError> {
    let bytes = api.download_user_template().await?;
    Ok(attachment(bytes, XLSX_CONTENT_TYPE, "sample.xlsx"))
}

/// GET /api/v1/users/{employee_id}/qrcode
pub async fn qr_code(
    api: web::Data<ApiClient>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    if let Some(err) = validate::validate_employee_id(&employee_id) {
        return Err(AppError::BadRequest(err));
    }
    let bytes = api.download_employee_qr_code(&employee_id).await?;
    Ok(attachment(bytes, "image/png", &format!("employee_{employee_id}_qrcode.png")))
}

/// GET /api/v1/users/qrcodes - every employee's QR code as one PDF
pub async fn qr_code_list(api: web::Data<ApiClient>) -> Result<HttpResponse, AppError> {
    let bytes = api.fetch_qr_code_list().await?;
    Ok(attachment(bytes, "application/pdf", "qrcodes.pdf"))
}
