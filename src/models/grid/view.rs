use serde::Serialize;

use super::{GridLimits, Page};

pub const PLACEHOLDER_LABEL: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub label: String,
    pub placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub label: String,
    /// `present`, `absent`, `unknown` or `placeholder`.
    pub status: &'static str,
}

impl CellView {
    fn placeholder() -> Self {
        CellView { label: PLACEHOLDER_LABEL.to_string(), status: "placeholder" }
    }
}

/// One page of the grid, laid out row by row for the table template.
///
/// Only the last page gets padded with placeholder columns so it keeps the
/// same width as the full pages before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<Vec<CellView>>,
    pub column_width: String,
    /// 1-based, 0 when there are no pages.
    pub current_page: usize,
    pub total_pages: usize,
}

impl GridView {
    /// `current_page` must already be clamped into `1..=pages.len()`.
    pub fn build(pages: &[Page<'_>], current_page: usize, limits: GridLimits) -> Self {
        let total_pages = pages.len();
        let Some(page) = current_page.checked_sub(1).and_then(|i| pages.get(i)) else {
            return GridView {
                headers: Vec::new(),
                rows: Vec::new(),
                column_width: "100%".to_string(),
                current_page: 0,
                total_pages,
            };
        };

        let is_last = current_page == total_pages;
        let padding = if is_last {
            limits.max_columns_per_page().saturating_sub(page.len())
        } else {
            0
        };
        let width_columns = page.len() + padding;

        let mut headers: Vec<HeaderView> = page
            .columns
            .iter()
            .map(|c| HeaderView { label: c.department.to_string(), placeholder: false })
            .collect();
        headers.extend((0..padding).map(|_| HeaderView {
            label: PLACEHOLDER_LABEL.to_string(),
            placeholder: true,
        }));

        let rows = (0..limits.max_employees_per_column())
            .map(|row| {
                let mut cells: Vec<CellView> = page
                    .columns
                    .iter()
                    .map(|c| match c.employees.get(row) {
                        Some(emp) => CellView { label: emp.display_label(), status: emp.status.css_class() },
                        None => CellView::placeholder(),
                    })
                    .collect();
                cells.extend((0..padding).map(|_| CellView::placeholder()));
                cells
            })
            .collect();

        GridView {
            headers,
            rows,
            column_width: format!("{:.2}%", 100.0 / width_columns as f64),
            current_page,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::{AttendanceStatus, DepartmentGroup, EmployeeRecord};
    use crate::models::grid::pack;
    use crate::models::selection::SelectionFilter;

    fn dept(name: &str, size: usize, status: Option<bool>) -> DepartmentGroup {
        let roster = (0..size)
            .map(|i| EmployeeRecord {
                id: i as i64,
                employee_id: format!("{i}"),
                department_id: 1,
                department_name: name.to_string(),
                display_number: 1,
                last_name: Some(format!("N{i}")),
                nick_name: None,
                status: AttendanceStatus::from_flag(status),
            })
            .collect();
        DepartmentGroup { name: name.to_string(), display_order: 1, roster }
    }

    #[test]
    fn last_page_is_padded_to_full_width() {
        let depts = vec![dept("A", 3, Some(true)), dept("B", 1, Some(false))];
        let pages = pack(&depts, &SelectionFilter::all(&depts), GridLimits::default());
        let view = GridView::build(&pages, 1, GridLimits::default());

        assert_eq!(view.headers.len(), 10);
        assert_eq!(view.headers.iter().filter(|h| h.placeholder).count(), 8);
        assert_eq!(view.rows.len(), 20);
        assert!(view.rows.iter().all(|r| r.len() == 10));
        assert_eq!(view.column_width, "10.00%");

        assert_eq!(view.rows[0][0], CellView { label: "N0".into(), status: "present" });
        assert_eq!(view.rows[0][1], CellView { label: "N0".into(), status: "absent" });
        assert_eq!(view.rows[3][0].status, "placeholder");
    }

    #[test]
    fn earlier_pages_are_not_padded() {
        let limits = GridLimits::new(2, 5).unwrap();
        let depts = vec![dept("A", 1, None), dept("B", 1, None), dept("C", 1, None)];
        let pages = pack(&depts, &SelectionFilter::all(&depts), limits);

        let first = GridView::build(&pages, 1, limits);
        assert_eq!(first.headers.len(), 2);
        assert!(first.has_next());
        assert!(!first.has_previous());
        assert_eq!(first.rows[0][0].status, "unknown");

        let last = GridView::build(&pages, 2, limits);
        assert_eq!(last.headers.len(), 2);
        assert!(last.headers[1].placeholder);
        assert_eq!(last.column_width, "50.00%");
    }

    #[test]
    fn no_pages_gives_empty_view() {
        let view = GridView::build(&[], 1, GridLimits::default());
        assert!(view.is_empty());
        assert_eq!(view.current_page, 0);
        assert!(!view.has_next());
    }
}
