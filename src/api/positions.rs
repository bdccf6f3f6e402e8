use serde_json::Value;

use super::client::{read_envelope, read_json, read_json_or_null};
use super::types::{Position, PositionRequest, ResultList};
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn fetch_positions(&self) -> Result<Vec<Position>, ApiError> {
        let url = self.url("/position/list");
        let response = self.send(|http| http.get(&url)).await?;
        let list: ResultList<Position> = read_envelope(response, "positions").await?;
        Ok(list.results)
    }

    pub async fn create_position(&self, request: &PositionRequest) -> Result<Value, ApiError> {
        let url = self.url("/position/create");
        let response = self.send(|http| http.post(&url).json(request)).await?;
        read_json(response).await
    }

    pub async fn update_position(&self, id: i64, request: &PositionRequest) -> Result<Value, ApiError> {
        let url = self.url(&format!("/position/{id}"));
        let response = self.send(|http| http.put(&url).json(request)).await?;
        read_json(response).await
    }

    pub async fn delete_position(&self, id: i64) -> Result<Value, ApiError> {
        let url = self.url(&format!("/position/{id}"));
        let response = self.send(|http| http.delete(&url)).await?;
        read_json_or_null(response).await
    }
}
