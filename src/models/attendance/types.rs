use serde::Serialize;

/// Attendance state of one employee as reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Unknown,
}

impl AttendanceStatus {
    /// The feed models status as `true`, `false`, or missing.
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => AttendanceStatus::Present,
            Some(false) => AttendanceStatus::Absent,
            None => AttendanceStatus::Unknown,
        }
    }

    /// CSS class used by the grid templates.
    pub fn css_class(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Unknown => "unknown",
        }
    }
}

/// One row of the attendance grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRecord {
    pub id: i64,
    pub employee_id: String,
    pub department_id: i64,
    /// Name of the owning department (a back-reference, not ownership).
    pub department_name: String,
    pub display_number: i64,
    pub last_name: Option<String>,
    pub nick_name: Option<String>,
    pub status: AttendanceStatus,
}

impl EmployeeRecord {
    pub fn display_label(&self) -> String {
        super::display::format_name(self.last_name.as_deref(), self.nick_name.as_deref())
    }
}

/// A department and its roster as of the latest snapshot.
///
/// Groups are replaced wholesale whenever a new snapshot arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentGroup {
    pub name: String,
    pub display_order: i64,
    pub roster: Vec<EmployeeRecord>,
}

/// Colours the backend may push alongside the dashboard data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColors {
    pub present: String,
    pub absent: String,
}
