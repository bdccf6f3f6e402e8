//! Packing department rosters into fixed-size grid pages.
//!
//! A page holds up to `max_columns_per_page` columns and a column holds up
//! to `max_employees_per_column` employees of a single department. Rosters
//! longer than one column spill into consecutive columns, and a department
//! whose columns do not fit in what is left of the current page starts a
//! new page.

pub mod view;

use std::fmt;

use serde::Serialize;

use super::attendance::{DepartmentGroup, EmployeeRecord};
use super::selection::SelectionFilter;

pub const DEFAULT_MAX_COLUMNS_PER_PAGE: usize = 10;
pub const DEFAULT_MAX_EMPLOYEES_PER_COLUMN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    ZeroColumns,
    ZeroRows,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ZeroColumns => write!(f, "a page needs at least one column"),
            GridError::ZeroRows => write!(f, "a column needs at least one row"),
        }
    }
}

impl std::error::Error for GridError {}

/// Capacity of a page and of each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLimits {
    max_columns_per_page: usize,
    max_employees_per_column: usize,
}

impl Default for GridLimits {
    fn default() -> Self {
        GridLimits {
            max_columns_per_page: DEFAULT_MAX_COLUMNS_PER_PAGE,
            max_employees_per_column: DEFAULT_MAX_EMPLOYEES_PER_COLUMN,
        }
    }
}

impl GridLimits {
    pub fn new(max_columns_per_page: usize, max_employees_per_column: usize) -> Result<Self, GridError> {
        if max_columns_per_page == 0 {
            return Err(GridError::ZeroColumns);
        }
        if max_employees_per_column == 0 {
            return Err(GridError::ZeroRows);
        }
        Ok(GridLimits { max_columns_per_page, max_employees_per_column })
    }

    pub fn max_columns_per_page(&self) -> usize {
        self.max_columns_per_page
    }

    pub fn max_employees_per_column(&self) -> usize {
        self.max_employees_per_column
    }

    /// Columns a roster of `roster_len` employees occupies.
    pub fn columns_needed(&self, roster_len: usize) -> usize {
        roster_len.div_ceil(self.max_employees_per_column)
    }
}

/// A vertical slice of one department's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column<'a> {
    pub department: &'a str,
    pub employees: &'a [EmployeeRecord],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page<'a> {
    pub columns: Vec<Column<'a>>,
}

impl<'a> Page<'a> {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Lay out the selected departments across pages, preserving snapshot order.
///
/// A department is only moved to a fresh page when the current one already
/// has columns. A department needing more columns than a whole page holds
/// therefore still lands on a single page and overflows its column cap.
pub fn pack<'a>(
    departments: &'a [DepartmentGroup],
    filter: &SelectionFilter,
    limits: GridLimits,
) -> Vec<Page<'a>> {
    let mut pages = Vec::new();
    let mut current = Page::default();
    let mut used_columns = 0;

    for dept in departments.iter().filter(|d| filter.contains(&d.name)) {
        let needed = limits.columns_needed(dept.roster.len());

        if used_columns + needed > limits.max_columns_per_page {
            if !current.is_empty() {
                pages.push(std::mem::take(&mut current));
            }
            used_columns = 0;
        }

        for chunk in dept.roster.chunks(limits.max_employees_per_column) {
            current.columns.push(Column { department: &dept.name, employees: chunk });
        }
        used_columns += needed;
    }

    if !current.is_empty() {
        pages.push(current);
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus;

    fn dept(name: &str, size: usize) -> DepartmentGroup {
        let roster = (0..size)
            .map(|i| EmployeeRecord {
                id: i as i64,
                employee_id: format!("{name}-{i}"),
                department_id: 1,
                department_name: name.to_string(),
                display_number: 1,
                last_name: Some(format!("E{i}")),
                nick_name: None,
                status: AttendanceStatus::Present,
            })
            .collect();
        DepartmentGroup { name: name.to_string(), display_order: 1, roster }
    }

    fn shape(pages: &[Page<'_>]) -> Vec<Vec<(String, usize)>> {
        pages
            .iter()
            .map(|p| p.columns.iter().map(|c| (c.department.to_string(), c.employees.len())).collect())
            .collect()
    }

    #[test]
    fn limits_reject_zero() {
        assert_eq!(GridLimits::new(0, 20), Err(GridError::ZeroColumns));
        assert_eq!(GridLimits::new(10, 0), Err(GridError::ZeroRows));
    }

    #[test]
    fn long_roster_spills_into_next_column() {
        let depts = vec![dept("A", 25), dept("B", 5)];
        let pages = pack(&depts, &SelectionFilter::all(&depts), GridLimits::default());
        assert_eq!(
            shape(&pages),
            vec![vec![("A".into(), 20), ("A".into(), 5), ("B".into(), 5)]]
        );
    }

    #[test]
    fn eleventh_department_starts_second_page() {
        let depts: Vec<_> = (1..=11).map(|i| dept(&format!("D{i}"), 1)).collect();
        let pages = pack(&depts, &SelectionFilter::all(&depts), GridLimits::default());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 10);
        assert_eq!(pages[1].len(), 1);
        assert_eq!(pages[1].columns[0].department, "D11");
    }

    #[test]
    fn department_that_does_not_fit_moves_whole() {
        // 9 columns used, next department needs 2.
        let depts = vec![dept("A", 180), dept("B", 21)];
        let pages = pack(&depts, &SelectionFilter::all(&depts), GridLimits::default());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 9);
        assert_eq!(shape(&pages)[1], vec![("B".into(), 20), ("B".into(), 1)]);
    }

    #[test]
    fn oversized_department_overflows_an_empty_page() {
        let depts = vec![dept("Big", 230), dept("Small", 3)];
        let pages = pack(&depts, &SelectionFilter::all(&depts), GridLimits::default());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 12);
        assert_eq!(shape(&pages)[1], vec![("Small".into(), 3)]);
    }

    #[test]
    fn empty_roster_takes_no_columns() {
        let depts = vec![dept("Empty", 0), dept("A", 1)];
        let pages = pack(&depts, &SelectionFilter::all(&depts), GridLimits::default());
        assert_eq!(shape(&pages), vec![vec![("A".into(), 1)]]);
    }

    #[test]
    fn unselected_departments_are_skipped() {
        let depts = vec![dept("A", 1), dept("B", 1), dept("C", 1)];
        let filter: SelectionFilter = ["C".to_string(), "A".to_string()].into_iter().collect();
        let pages = pack(&depts, &filter, GridLimits::default());
        assert_eq!(shape(&pages), vec![vec![("A".into(), 1), ("C".into(), 1)]]);
    }

    #[test]
    fn nothing_selected_yields_no_pages() {
        let depts = vec![dept("A", 3)];
        assert!(pack(&depts, &SelectionFilter::empty(), GridLimits::default()).is_empty());
        assert!(pack(&[], &SelectionFilter::empty(), GridLimits::default()).is_empty());
    }
}
