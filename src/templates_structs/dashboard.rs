use askama::Template;

use super::PageContext;
use crate::feed::{FeedState, FeedStatus};
use crate::models::attendance::BoardColors;
use crate::models::grid::view::GridView;
use crate::models::grid::{GridLimits, pack};
use crate::models::selection::BoardState;

/// One entry of the department picker.
pub struct DepartmentOption {
    pub name: String,
    pub display_order: i64,
    pub selected: bool,
}

/// Everything the board templates need, either a grid or a status message.
pub struct BoardPanel {
    pub status: FeedStatus,
    pub grid: Option<GridView>,
    pub departments: Vec<DepartmentOption>,
    pub all_selected: bool,
    pub partially_selected: bool,
    pub colors: Option<BoardColors>,
    pub total_employees: usize,
    pub updated_at: String,
}

impl BoardPanel {
    /// Lay out the viewer's current page from the latest feed state.
    ///
    /// Seeds a fresh selection and clamps the page index, so `state` must be
    /// written back to the `BoardStore` afterwards.
    pub fn build(feed: &FeedState, state: &mut BoardState, limits: GridLimits) -> Self {
        let Some(snapshot) = feed.live_snapshot() else {
            return BoardPanel {
                status: feed.status,
                grid: None,
                departments: Vec::new(),
                all_selected: false,
                partially_selected: false,
                colors: None,
                total_employees: 0,
                updated_at: String::new(),
            };
        };

        let filter = state.seed(&snapshot.departments).clone();
        let pages = pack(&snapshot.departments, &filter, limits);
        state.clamp_page(pages.len());

        BoardPanel {
            status: feed.status,
            grid: Some(GridView::build(&pages, state.current_page, limits)),
            departments: snapshot
                .departments
                .iter()
                .map(|d| DepartmentOption {
                    name: d.name.clone(),
                    display_order: d.display_order,
                    selected: filter.contains(&d.name),
                })
                .collect(),
            all_selected: filter.is_all_selected(&snapshot.departments),
            partially_selected: filter.is_partial(&snapshot.departments),
            colors: snapshot.colors.clone(),
            total_employees: snapshot.total_employee_count,
            updated_at: snapshot.received_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn status_name(&self) -> &'static str {
        self.status.as_str()
    }

    pub fn message(&self) -> &'static str {
        self.status.message().unwrap_or_default()
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub board: BoardPanel,
}

/// Picker, meta line and grid without the page chrome, for live refreshes.
#[derive(Template)]
#[template(path = "dashboard/board.html")]
pub struct BoardFragmentTemplate {
    pub ctx: PageContext,
    pub board: BoardPanel,
}
