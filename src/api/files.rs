use serde_json::Value;

use super::client::{multipart_form, read_bytes, read_json};
use super::types::FileUpload;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Bulk-import users from a spreadsheet. `mode` is forwarded as a form field.
    pub async fn upload_user_spreadsheet(
        &self,
        file: &FileUpload,
        mode: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = self.url("/user/create_excell");
        let fields: Vec<(String, String)> = mode
            .map(|m| vec![("mode".to_string(), m.to_string())])
            .unwrap_or_default();
        log::info!(
            "Uploading spreadsheet '{}' ({} bytes, mode {:?})",
            file.file_name,
            file.bytes.len(),
            mode
        );
        let files = std::slice::from_ref(file);
        let response = self
            .send(|http| http.post(&url).multipart(multipart_form(&fields, files)))
            .await?;
        read_json(response).await
    }

    /// The xlsx template used for bulk import.
    pub async fn download_user_template(&self) -> Result<Vec<u8>, ApiError> {
        let url = self.url("/user/export_template");
        let response = self.send(|http| http.get(&url)).await?;
        read_bytes(response).await
    }

    /// PNG QR code for a single employee.
    pub async fn download_employee_qr_code(&self, employee_id: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.url("/user/qrcode");
        let response = self
            .send(|http| http.get(&url).query(&[("employee_id", employee_id)]))
            .await?;
        let bytes = read_bytes(response).await?;
        if bytes.is_empty() {
            return Err(ApiError::Rejected(format!("Empty QR code for employee {employee_id}")));
        }
        Ok(bytes)
    }

    /// PDF with the QR codes of every employee.
    pub async fn fetch_qr_code_list(&self) -> Result<Vec<u8>, ApiError> {
        let url = self.url("/user/qrcodelist");
        let response = self.send(|http| http.get(&url)).await?;
        let bytes = read_bytes(response).await?;
        log::debug!("Received QR code list, {} bytes", bytes.len());
        Ok(bytes)
    }
}
