use serde_json::Value;

use super::client::{read_json, read_json_or_null};
use super::types::UserRequest;
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn create_user(&self, request: &UserRequest) -> Result<Value, ApiError> {
        let url = self.url("/user/create");
        let response = self.send(|http| http.post(&url).json(request)).await?;
        let body: Value = read_json(response).await?;
        log::info!("Created user {}", request.employee_id);
        Ok(body)
    }

    pub async fn update_user(&self, id: i64, request: &UserRequest) -> Result<Value, ApiError> {
        let url = self.url(&format!("/user/{id}"));
        let response = self.send(|http| http.patch(&url).json(request)).await?;
        read_json(response).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<Value, ApiError> {
        let url = self.url(&format!("/user/{id}"));
        let response = self.send(|http| http.delete(&url)).await?;
        read_json_or_null(response).await
    }
}
