use std::collections::BTreeSet;

use super::attendance::DepartmentGroup;

/// Department names currently shown on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionFilter {
    names: BTreeSet<String>,
}

impl SelectionFilter {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every department in the snapshot.
    pub fn all(departments: &[DepartmentGroup]) -> Self {
        departments.iter().map(|d| d.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Flip membership of a single department.
    pub fn toggle(&mut self, name: &str) {
        if !self.names.remove(name) {
            self.names.insert(name.to_string());
        }
    }

    /// True when the snapshot is non-empty and every department in it is selected.
    pub fn is_all_selected(&self, departments: &[DepartmentGroup]) -> bool {
        !departments.is_empty() && departments.iter().all(|d| self.contains(&d.name))
    }

    /// Some but not all departments selected (the "indeterminate" checkbox).
    pub fn is_partial(&self, departments: &[DepartmentGroup]) -> bool {
        departments.iter().any(|d| self.contains(&d.name)) && !self.is_all_selected(departments)
    }
}

impl FromIterator<String> for SelectionFilter {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        SelectionFilter { names: iter.into_iter().collect() }
    }
}

/// Per-viewer board state: which departments are shown and which page is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// `None` until the viewer has seen a snapshot.
    pub selection: Option<SelectionFilter>,
    /// 1-based.
    pub current_page: usize,
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState { selection: None, current_page: 1 }
    }
}

impl BoardState {
    /// Select every department the first time a snapshot is seen.
    ///
    /// An explicitly emptied selection stays empty on later snapshots.
    pub fn seed(&mut self, departments: &[DepartmentGroup]) -> &SelectionFilter {
        self.selection.get_or_insert_with(|| SelectionFilter::all(departments))
    }

    pub fn filter(&self) -> SelectionFilter {
        self.selection.clone().unwrap_or_default()
    }

    /// Clear the selection if everything is selected, otherwise select everything.
    pub fn select_all(&mut self, departments: &[DepartmentGroup]) {
        let all_selected = self
            .selection
            .as_ref()
            .is_some_and(|s| s.is_all_selected(departments));
        self.selection = Some(if all_selected {
            SelectionFilter::empty()
        } else {
            SelectionFilter::all(departments)
        });
        self.current_page = 1;
    }

    /// Flip one department. Does nothing before the first snapshot, so the
    /// select-everything seed still happens.
    pub fn toggle(&mut self, name: &str) {
        if let Some(selection) = self.selection.as_mut() {
            selection.toggle(name);
            self.current_page = 1;
        }
    }

    pub fn reset(&mut self, departments: &[DepartmentGroup]) {
        self.selection = Some(SelectionFilter::all(departments));
        self.current_page = 1;
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.current_page = (self.current_page + 1).min(total_pages).max(1);
    }

    /// Keep the page index valid after the page count changed.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }
}
