use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::errors::AppError;

/// GET /api/v1/company
pub async fn read(api: web::Data<ApiClient>) -> Result<HttpResponse, AppError> {
    let settings = api.fetch_company_settings().await?;
    Ok(HttpResponse::Ok().json(settings))
}
