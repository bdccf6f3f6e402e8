use actix_web::{HttpResponse, web};

use crate::api::{ApiClient, DepartmentRequest};
use crate::auth::validate;
use crate::errors::AppError;
use crate::templates_structs::ApiErrorResponse;

/// GET /api/v1/departments
pub async fn list(api: web::Data<ApiClient>) -> Result<HttpResponse, AppError> {
    let listing = api.fetch_departments().await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// POST /api/v1/departments
pub async fn create(
    api: web::Data<ApiClient>,
    body: web::Json<DepartmentRequest>,
) -> Result<HttpResponse, AppError> {
    let errors = validate::department_errors(&body);
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiErrorResponse::validation(&errors)));
    }
    let created = api.create_department(&body).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PATCH /api/v1/departments/{id}
pub async fn update(
    api: web::Data<ApiClient>,
    path: web::Path<i64>,
    body: web::Json<DepartmentRequest>,
) -> Result<HttpResponse, AppError> {
    let errors = validate::department_errors(&body);
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiErrorResponse::validation(&errors)));
    }
    let updated = api.update_department(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/departments/{id}
pub async fn delete(
    api: web::Data<ApiClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = api.delete_department(id).await?;
    log::info!("Deleted department {id}");
    Ok(HttpResponse::Ok().json(result))
}
