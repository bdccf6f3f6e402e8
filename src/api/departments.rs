use serde_json::Value;

use super::client::{read_envelope, read_json, read_json_or_null};
use super::types::{Department, DepartmentListing, DepartmentRequest, ResultList};
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn fetch_departments(&self) -> Result<DepartmentListing, ApiError> {
        let url = self.url("/department/list");
        let response = self.send(|http| http.get(&url)).await?;
        let list: ResultList<Department> = read_envelope(response, "departments").await?;
        Ok(DepartmentListing {
            departments: list.results,
            next_display_number: list.display_number,
        })
    }

    pub async fn create_department(&self, request: &DepartmentRequest) -> Result<Value, ApiError> {
        let url = self.url("/department/create");
        let response = self.send(|http| http.post(&url).json(request)).await?;
        let body: Value = read_json(response).await?;
        log::info!("Created department '{}'", request.name);
        Ok(body)
    }

    pub async fn update_department(&self, id: i64, request: &DepartmentRequest) -> Result<Value, ApiError> {
        let url = self.url(&format!("/department/{id}"));
        let response = self.send(|http| http.patch(&url).json(request)).await?;
        let body: Value = read_json(response).await?;
        log::info!("Updated department {id}");
        Ok(body)
    }

    pub async fn delete_department(&self, id: i64) -> Result<Value, ApiError> {
        let url = self.url(&format!("/department/{id}"));
        let response = self.send(|http| http.delete(&url)).await?;
        read_json_or_null(response).await
    }
}
