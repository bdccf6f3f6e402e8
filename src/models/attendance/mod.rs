pub mod display;
pub mod types;

pub use display::format_name;
pub use types::{AttendanceStatus, BoardColors, DepartmentGroup, EmployeeRecord};
