use actix_web::{HttpResponse, web};

use crate::api::{ApiClient, PositionRequest};
use crate::auth::validate;
use crate::errors::AppError;
use crate::templates_structs::ApiErrorResponse;

/// GET /api/v1/positions
pub async fn list(api: web::Data<ApiClient>) -> Result<HttpResponse, AppError> {
    let positions = api.fetch_positions().await?;
    Ok(HttpResponse::Ok().json(positions))
}

/// POST /api/v1/positions
pub async fn create(
    api: web::Data<ApiClient>,
    body: web::Json<PositionRequest>,
) -> Result<HttpResponse, AppError> {
    let errors = validate::position_errors(&body);
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiErrorResponse::validation(&errors)));
    }
    let created = api.create_position(&body).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/v1/positions/{id}
pub async fn update(
    api: web::Data<ApiClient>,
    path: web::Path<i64>,
    body: web::Json<PositionRequest>,
) -> Result<HttpResponse, AppError> {
    let errors = validate::position_errors(&body);
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiErrorResponse::validation(&errors)));
    }
    let updated = api.update_position(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/positions/{id}
pub async fn delete(
    api: web::Data<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let result = api.delete_position(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}
