use std::sync::{Arc, PoisonError, RwLock};

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::types::{ApiEnvelope, FileUpload};
use super::ApiError;

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Shared HTTP client for the backend.
///
/// Every request carries the current access token as a bearer credential.
/// A 403 answer is replayed once with the refresh token installed as the
/// new access token; any other failure is returned as-is.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<RwLock<Credentials>>,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient { http, base_url, credentials: Arc::new(RwLock::new(credentials)) }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn access_token(&self) -> Option<String> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .clone()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send the request built by `build`, replaying it once on 403.
    pub(crate) async fn send<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let response = self.dispatch(&build).await?;
        if response.status() != StatusCode::FORBIDDEN {
            return check_status(response).await;
        }

        let refresh = self
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token
            .clone();
        let Some(refresh) = refresh else {
            return check_status(response).await;
        };

        log::warn!("Backend answered 403, replaying once with refresh credential");
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token = Some(refresh);
        let replay = self.dispatch(&build).await?;
        check_status(replay).await
    }

    async fn dispatch<F>(&self, build: &F) -> Result<Response, ApiError>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let mut request = build(&self.http);
        if let Some(token) = self.access_token() {
            request = request.bearer_auth(token);
        }
        request.send().await.map_err(|e| {
            log::error!("Backend request failed: {e}");
            ApiError::Transport(e)
        })
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    log::error!("Backend call {url} failed with status {status}: {body}");
    Err(ApiError::Status { status: status.as_u16(), body })
}

/// Whole response body as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Unwrap `{status, data}`, treating `status: false` or missing data as a rejection.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<T, ApiError> {
    let envelope: ApiEnvelope<T> = read_json(response).await?;
    match envelope {
        ApiEnvelope { status: true, data: Some(data), .. } => Ok(data),
        ApiEnvelope { message, .. } => {
            let msg = message.unwrap_or_else(|| format!("Failed to fetch {what}"));
            log::error!("{msg}");
            Err(ApiError::Rejected(msg))
        }
    }
}

/// Like [`read_json`], but an empty body (e.g. 204 on delete) reads as `null`.
pub(crate) async fn read_json_or_null(response: Response) -> Result<serde_json::Value, ApiError> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

pub(crate) async fn read_bytes(response: Response) -> Result<Vec<u8>, ApiError> {
    Ok(response.bytes().await?.to_vec())
}

/// Multipart form from text fields and files. Rebuilt per attempt since
/// forms cannot be cloned for a replay.
pub(crate) fn multipart_form(fields: &[(String, String)], files: &[FileUpload]) -> Form {
    let form = fields
        .iter()
        .fold(Form::new(), |form, (key, value)| form.text(key.clone(), value.clone()));
    files.iter().fold(form, |form, file| {
        form.part(
            file.field.clone(),
            Part::bytes(file.bytes.clone()).file_name(file.file_name.clone()),
        )
    })
}
