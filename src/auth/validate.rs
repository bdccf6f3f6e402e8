//! Checks on request bodies before they are forwarded to the backend.
//! Each returns `Some(message)` when the value is invalid.

use crate::api::{DepartmentRequest, PositionRequest, UserRequest};

/// Department and position names: 1-100 chars after trimming.
pub fn validate_name(label: &str, name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some(format!("{label} name is required"));
    }
    if trimmed.chars().count() > 100 {
        return Some(format!("{label} name must be at most 100 characters"));
    }
    None
}

pub fn validate_display_number(display_number: i64) -> Option<String> {
    if display_number < 0 {
        return Some("Display number must not be negative".to_string());
    }
    None
}

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

pub fn validate_employee_id(employee_id: &str) -> Option<String> {
    let trimmed = employee_id.trim();
    if trimmed.is_empty() {
        return Some("Employee ID is required".to_string());
    }
    if !trimmed.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Some("Employee ID may only contain letters, numbers, '-' and '_'".to_string());
    }
    None
}

pub fn department_errors(req: &DepartmentRequest) -> Vec<String> {
    [validate_name("Department", &req.name), validate_display_number(req.display_number)]
        .into_iter()
        .flatten()
        .collect()
}

pub fn position_errors(req: &PositionRequest) -> Vec<String> {
    validate_name("Position", &req.name).into_iter().collect()
}

/// Password is only required when creating a user.
pub fn user_errors(req: &UserRequest, creating: bool) -> Vec<String> {
    let mut errors = Vec::new();
    errors.extend(validate_employee_id(&req.employee_id));
    errors.extend(validate_email(&req.email));
    if req.last_name.trim().is_empty() && req.nick_name.as_deref().is_none_or(|n| n.trim().is_empty()) {
        errors.push("Last name or nickname is required".to_string());
    }
    if creating && req.password.is_empty() {
        errors.push("Password is required".to_string());
    }
    errors
}
