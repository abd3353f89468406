//! Detail-table presentation state: sort column, direction, current page

use hospdash_core::types::{SortColumn, SortDirection};

/// Sort and pagination state owned by a detail table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableState {
    /// Column the table is sorted by
    pub sort_column: SortColumn,

    /// Sort direction
    pub sort_direction: SortDirection,

    /// Current page (1-based)
    pub page: u32,

    /// Rows per page
    pub per_page: u32,
}

impl TableState {
    /// Table state as a page opens: most recent rows first
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            sort_column: SortColumn::default(),
            sort_direction: SortDirection::default(),
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// React to a column-header click
    ///
    /// Clicking the active column flips the direction; picking a new column
    /// sorts it descending. Either way the table jumps back to page 1.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_column == column {
            self.sort_direction = match self.sort_direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.sort_column = column;
            self.sort_direction = SortDirection::Desc;
        }
        self.page = 1;
    }

    /// Jump to a page (1-based; zero clamps to 1)
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Back to the first page, keeping the sort
    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}
