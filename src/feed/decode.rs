use chrono::Local;
use serde::Deserialize;
use serde_json::Value;

use super::{FeedError, Snapshot};
use crate::models::attendance::{AttendanceStatus, BoardColors, DepartmentGroup, EmployeeRecord};

#[derive(Debug, Deserialize)]
struct WireEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default, rename = "Colors")]
    colors: Option<WireColors>,
}

#[derive(Debug, Deserialize)]
struct WireColors {
    new_present_color: String,
    new_absent_color: String,
}

#[derive(Debug, Deserialize)]
struct WirePagedData {
    results: Vec<WireDepartment>,
    #[serde(default)]
    count: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct WireDepartment {
    department_name: String,
    display_number: i64,
    result: Vec<WireEmployee>,
}

#[derive(Debug, Deserialize)]
struct WireEmployee {
    id: i64,
    employee_id: String,
    department_id: i64,
    department_name: String,
    display_number: i64,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    nick_name: Option<String>,
    #[serde(default)]
    status: Option<bool>,
}

impl From<WireEmployee> for EmployeeRecord {
    fn from(e: WireEmployee) -> Self {
        EmployeeRecord {
            id: e.id,
            employee_id: e.employee_id,
            department_id: e.department_id,
            department_name: e.department_name,
            display_number: e.display_number,
            last_name: e.last_name,
            nick_name: e.nick_name,
            status: AttendanceStatus::from_flag(e.status),
        }
    }
}

impl From<WireDepartment> for DepartmentGroup {
    fn from(d: WireDepartment) -> Self {
        DepartmentGroup {
            name: d.department_name,
            display_order: d.display_number,
            roster: d.result.into_iter().map(EmployeeRecord::from).collect(),
        }
    }
}

/// Decode one feed message into a snapshot.
///
/// Accepts `{"data": [...]}` as well as the paged
/// `{"data": {"results": [...], "count": n}, "Colors": {...}}` shape.
/// Anything else is rejected as a whole; no partial snapshot is produced.
pub fn decode_snapshot(payload: &str) -> Result<Snapshot, FeedError> {
    let envelope: WireEnvelope = serde_json::from_str(payload)?;

    let (wire, count) = match envelope.data {
        Some(data @ Value::Array(_)) => (serde_json::from_value::<Vec<WireDepartment>>(data)?, None),
        Some(data @ Value::Object(_)) if data.get("results").is_some_and(Value::is_array) => {
            let paged: WirePagedData = serde_json::from_value(data)?;
            (paged.results, paged.count)
        }
        _ => return Err(FeedError::MissingData),
    };

    let departments: Vec<DepartmentGroup> = wire.into_iter().map(DepartmentGroup::from).collect();
    let total_employee_count =
        count.unwrap_or_else(|| departments.iter().map(|d| d.roster.len()).sum());

    Ok(Snapshot {
        departments,
        colors: envelope.colors.map(|c| BoardColors {
            present: c.new_present_color,
            absent: c.new_absent_color,
        }),
        total_employee_count,
        received_at: Local::now(),
    })
}
