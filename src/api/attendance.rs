use serde_json::Value;

use super::client::read_json;
use super::types::QrCheckIn;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Record attendance from a scanned employee QR code.
    pub async fn create_by_qr_code(&self, check_in: &QrCheckIn) -> Result<Value, ApiError> {
        let url = self.url("/attendance/createbyqrcode");
        let response = self.send(|http| http.post(&url).json(check_in)).await?;
        read_json(response).await
    }
}
