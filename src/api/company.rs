use serde_json::Value;

use super::client::{multipart_form, read_envelope, read_json};
use super::types::FileUpload;
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn fetch_company_settings(&self) -> Result<Value, ApiError> {
        let url = self.url("/company_info/list");
        let response = self.send(|http| http.get(&url)).await?;
        read_envelope(response, "company settings").await
    }

    /// Update company settings from form fields and optional files.
    ///
    /// The `id` field picks the record and must be present; nothing is sent
    /// without it.
    pub async fn update_company_settings(
        &self,
        fields: &[(String, String)],
        files: &[FileUpload],
    ) -> Result<Value, ApiError> {
        let id = fields
            .iter()
            .find(|(key, value)| key == "id" && !value.is_empty())
            .map(|(_, value)| value.clone())
            .ok_or(ApiError::MissingField("id"))?;

        let url = self.url(&format!("/company_info/{id}"));
        let response = self
            .send(|http| http.put(&url).multipart(multipart_form(fields, files)))
            .await?;
        read_json(response).await
    }
}
