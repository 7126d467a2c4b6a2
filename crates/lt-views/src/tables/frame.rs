//! Row and cell layout primitives produced by table views

use serde::{Serialize, Deserialize};

use lt_core::PaginationState;

use crate::Variant;

/// Horizontal alignment of a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub text: String,
    pub align: CellAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub align: CellAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// 1-based position in the whole dataset, when row numbers are shown
    pub number: Option<usize>,
    pub cells: Vec<Cell>,
    /// Alternate background
    pub striped: bool,
    pub variant: Variant,
}

/// "Page X of Y" and "a-b of n" labels for the table footer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub pagination: PaginationState,
    pub page_label: String,
    pub range_label: String,
}

impl PageSummary {
    pub fn from_state(pagination: PaginationState) -> Self {
        let page_label = format!(
            "Page {} of {}",
            pagination.current_page,
            pagination.total_pages.max(1)
        );

        let range_label = if pagination.visible_items() == 0 {
            format!("0 of {}", pagination.total_items)
        } else {
            format!(
                "{}-{} of {}",
                pagination.start_index() + 1,
                pagination.end_index(),
                pagination.total_items
            )
        };

        Self {
            pagination,
            page_label,
            range_label,
        }
    }
}

/// Which pagination controls are enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    pub can_first: bool,
    pub can_prev: bool,
    pub can_next: bool,
    pub can_last: bool,
    pub items_per_page: usize,
    pub page_size_options: Vec<usize>,
}

impl NavState {
    pub fn from_state(pagination: &PaginationState, page_size_options: &[usize]) -> Self {
        Self {
            can_first: !pagination.is_first_page(),
            can_prev: pagination.has_prev(),
            can_next: pagination.has_next(),
            can_last: !pagination.is_last_page(),
            items_per_page: pagination.items_per_page,
            page_size_options: page_size_options.to_vec(),
        }
    }
}

/// Everything a renderer needs to draw one page of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFrame {
    pub title: String,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Row>,
    pub summary: PageSummary,
    pub nav: NavState,
}

impl TableFrame {
    /// Whether the renderer should show its empty-state view
    pub fn is_empty(&self) -> bool {
        self.summary.pagination.is_empty()
    }

    /// Plain-text rendering, one line per row
    pub fn to_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 3);
        lines.push(format!("== {} ==", self.title));
        lines.push(
            self.headers
                .iter()
                .map(|header| header.text.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
        );

        if self.is_empty() {
            lines.push("No data to display".to_string());
        }

        for row in &self.rows {
            let mut cells: Vec<&str> = Vec::with_capacity(row.cells.len() + 1);
            let number = row.number.map(|n| n.to_string());
            if let Some(number) = &number {
                cells.push(number);
            }
            cells.extend(row.cells.iter().map(|cell| cell.text.as_str()));
            lines.push(cells.join(" | "));
        }

        lines.push(format!("{} ({})", self.summary.page_label, self.summary.range_label));
        lines.join("\n")
    }
}
