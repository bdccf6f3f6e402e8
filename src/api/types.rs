use serde::{Deserialize, Serialize};

/// Standard backend response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `data.results` as returned by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct ResultList<T> {
    pub results: Vec<T>,
    #[serde(default, rename = "displayNumber")]
    pub display_number: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub display_number: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentListing {
    pub departments: Vec<Department>,
    /// Display number the backend suggests for the next department.
    pub next_display_number: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRequest {
    pub name: String,
    pub display_number: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: i64,
    pub name: String,
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRequest {
    pub name: String,
    pub department_id: i64,
}

/// Body of the user create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    pub employee_id: String,
    pub password: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub department_id: i64,
    pub position_id: i64,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCheckIn {
    pub employee_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}
