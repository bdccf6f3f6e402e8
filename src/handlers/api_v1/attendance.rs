use actix_web::{HttpResponse, web};

use crate::api::{ApiClient, QrCheckIn};
use crate::auth::validate;
use crate::errors::AppError;

/// POST /api/v1/attendance/qrcode - record attendance from a scanned QR code
pub async fn check_in(
    api: web::Data<ApiClient>,
    body: web::Json<QrCheckIn>,
) -> Result<HttpResponse, AppError> {
    if let Some(err) = validate::validate_employee_id(&body.employee_id) {
        return Err(AppError::BadRequest(err));
    }
    if !(-90.0..=90.0).contains(&body.latitude) || !(-180.0..=180.0).contains(&body.longitude) {
        return Err(AppError::BadRequest("Coordinates out of range".to_string()));
    }
    let result = api.create_by_qr_code(&body).await?;
    Ok(HttpResponse::Created().json(result))
}
