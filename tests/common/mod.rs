//! Shared test infrastructure for the board integration tests.
//!
//! - Department and employee fixtures
//! - Feed payload builders in the backend's wire format
//! - `start_backend()` for a throwaway HTTP server standing in for the backend
//! - Session and feed helpers for handler tests

#![allow(dead_code)]

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::{App, HttpServer, web};
use serde_json::{Value, json};
use tokio::sync::watch;

use attendance_board::api::{ApiClient, Credentials};
use attendance_board::config::BoardSettings;
use attendance_board::feed::{FeedHandle, FeedState, Snapshot};
use attendance_board::models::attendance::{AttendanceStatus, DepartmentGroup, EmployeeRecord};
use attendance_board::models::grid::GridLimits;

// ============================================================================
// FIXTURES
// ============================================================================

pub fn employee(department: &str, n: usize, status: AttendanceStatus) -> EmployeeRecord {
    EmployeeRecord {
        id: n as i64,
        employee_id: format!("E{n:04}"),
        department_id: 1,
        department_name: department.to_string(),
        display_number: n as i64,
        last_name: Some(format!("Name{n}")),
        nick_name: None,
        status,
    }
}

/// A department with `size` employees, alternating present and absent.
pub fn department(name: &str, display_order: i64, size: usize) -> DepartmentGroup {
    DepartmentGroup {
        name: name.to_string(),
        display_order,
        roster: (0..size)
            .map(|n| {
                let status = if n % 2 == 0 { AttendanceStatus::Present } else { AttendanceStatus::Absent };
                employee(name, n, status)
            })
            .collect(),
    }
}

/// Departments named `D0`, `D1`, ... with the given roster sizes.
pub fn departments(sizes: &[usize]) -> Vec<DepartmentGroup> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| department(&format!("D{i}"), i as i64 + 1, size))
        .collect()
}

pub fn snapshot(departments: Vec<DepartmentGroup>) -> Snapshot {
    let total_employee_count = departments.iter().map(|d| d.roster.len()).sum();
    Snapshot {
        departments,
        colors: None,
        total_employee_count,
        received_at: chrono::Local::now(),
    }
}

// ============================================================================
// FEED PAYLOADS
// ============================================================================

/// One department in the feed's wire format.
pub fn wire_department(name: &str, display_number: i64, size: usize) -> Value {
    let result: Vec<Value> = (0..size)
        .map(|n| {
            json!({
                "id": n,
                "employee_id": format!("E{n:04}"),
                "department_id": display_number,
                "department_name": name,
                "display_number": n,
                "last_name": format!("Name{n}"),
                "nick_name": null,
                "status": n % 2 == 0,
            })
        })
        .collect();
    json!({ "department_name": name, "display_number": display_number, "result": result })
}

/// A paged feed message with colours, as one SSE event.
pub fn sse_event(departments: &[Value]) -> String {
    let count: usize = departments
        .iter()
        .map(|d| d["result"].as_array().map_or(0, Vec::len))
        .sum();
    let payload = json!({
        "data": { "results": departments, "count": count },
        "Colors": { "new_present_color": "#00ff00", "new_absent_color": "#ff0000" },
    });
    format!("data: {payload}\n\n")
}

// ============================================================================
// FAKE BACKEND
// ============================================================================

/// Start an HTTP server on a random local port and return its base URL.
///
/// Must be called from inside an actix runtime (`#[actix_rt::test]`).
pub fn start_backend<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Clone + Send + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind fake backend");
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    format!("http://{addr}")
}

/// Client for a fake backend with the given tokens.
pub fn api_client(base_url: &str, access: Option<&str>, refresh: Option<&str>) -> ApiClient {
    ApiClient::new(
        reqwest::Client::new(),
        base_url,
        Credentials {
            access_token: access.map(str::to_string),
            refresh_token: refresh.map(str::to_string),
        },
    )
}

// ============================================================================
// BOARD APP
// ============================================================================

pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    session_middleware_with_key(Key::generate())
}

/// Cookies signed with `key` stay readable by every app built with it.
pub fn session_middleware_with_key(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .build()
}

/// Small grid so a handful of employees spans several pages.
pub fn small_settings() -> BoardSettings {
    BoardSettings {
        app_name: "Test Board".to_string(),
        grid: GridLimits::new(2, 3).expect("valid limits"),
    }
}

/// A feed handle fixed at `state`. Keep the sender alive for the whole test.
pub fn fixed_feed(state: FeedState) -> (watch::Sender<FeedState>, FeedHandle) {
    let (tx, rx) = watch::channel(state);
    (tx, FeedHandle::from_receiver(rx))
}

/// Cookies set by a response, ready to send back.
pub fn response_cookies<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Vec<Cookie<'static>> {
    resp.response().cookies().map(|c| c.into_owned()).collect()
}

pub fn extract_csrf(html: &str) -> String {
    let re = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(html)
        .map(|c| c[1].to_string())
        .expect("page should carry a CSRF token")
}
