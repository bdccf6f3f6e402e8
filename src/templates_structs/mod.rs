// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;

mod api;
mod dashboard;

pub use self::api::ApiErrorResponse;
pub use self::dashboard::{BoardFragmentTemplate, BoardPanel, DashboardTemplate, DepartmentOption};

/// Common context shared by all pages.
pub struct PageContext {
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}
