//! Table view implementation

use std::sync::Arc;

use serde_json::{json, Value};

use lt_core::events::events::{DatasetLoadFailed, DatasetLoaded, PageAutoCorrected, PageChanged, PageSizeChanged};
use lt_core::{DashboardSettings, EventBus, PaginationState, Paginator};
use lt_data::{DataError, TableName};

use crate::{DashboardView, ViewId, Variant};

mod frame;

pub use frame::{Cell, CellAlign, HeaderCell, NavState, PageSummary, Row, TableFrame};

/// Configuration for table views
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub show_row_numbers: bool,
    pub striped_rows: bool,
    /// Longer cell values are cut and suffixed with "..."
    pub max_cell_chars: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::from_settings(&DashboardSettings::default())
    }
}

impl TableConfig {
    pub fn from_settings(settings: &DashboardSettings) -> Self {
        Self {
            show_row_numbers: settings.show_row_numbers,
            striped_rows: settings.striped_rows,
            max_cell_chars: 50,
            page_size_options: settings.page_size_choices(),
        }
    }
}

type CellFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;
type VariantFn<T> = Box<dyn Fn(&T) -> Variant + Send + Sync>;

/// One column of a table: a header and how to read the cell out of a record
pub struct Column<T> {
    pub header: String,
    pub align: CellAlign,
    value: CellFn<T>,
}

impl<T> Column<T> {
    pub fn new(header: impl Into<String>, value: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            header: header.into(),
            align: CellAlign::Left,
            value: Box::new(value),
        }
    }

    pub fn align(mut self, align: CellAlign) -> Self {
        self.align = align;
        self
    }

    pub fn value(&self, record: &T) -> String {
        (self.value)(record)
    }
}

/// Paginated table over records of type `T`
///
/// The view does not own the dataset. Callers pass the current rows to
/// [`TableView::frame`] every time they want something to draw, and call the
/// controls in between.
pub struct TableView<T> {
    id: ViewId,
    title: String,
    pub config: TableConfig,
    columns: Vec<Column<T>>,
    row_variant: Option<VariantFn<T>>,
    paginator: Paginator,
    events: Option<Arc<EventBus>>,
}

impl<T> TableView<T> {
    /// Create a new table view with the default page size
    pub fn new(title: impl Into<String>, columns: Vec<Column<T>>) -> Self {
        Self::with_settings(title, columns, &DashboardSettings::default())
    }

    /// Create a table view configured from dashboard settings
    pub fn with_settings(
        title: impl Into<String>,
        columns: Vec<Column<T>>,
        settings: &DashboardSettings,
    ) -> Self {
        Self {
            id: ViewId::new_v4(),
            title: title.into(),
            config: TableConfig::from_settings(settings),
            columns,
            row_variant: None,
            paginator: Paginator::new(settings.default_page_size),
            events: None,
        }
    }

    /// Publish navigation events on `bus`
    pub fn with_events(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    /// Tag rows with a display variant
    pub fn with_row_variant(mut self, variant: impl Fn(&T) -> Variant + Send + Sync + 'static) -> Self {
        self.row_variant = Some(Box::new(variant));
        self
    }

    pub fn events(&self) -> Option<&EventBus> {
        self.events.as_deref()
    }

    /// Pagination state as of the last frame or control call
    pub fn pagination(&self) -> PaginationState {
        self.paginator.state()
    }

    /// Derive the frame for the current page of `data`
    pub fn frame(&mut self, data: &[T]) -> TableFrame {
        let stale_page = self.paginator.current_page();
        let page = self.paginator.paginate(data);
        let pagination = page.pagination;

        if page.corrected {
            tracing::info!(
                "{}: page {} gone after dataset change, showing page 1 of {}",
                self.title,
                stale_page,
                pagination.total_pages
            );
            self.publish(PageAutoCorrected {
                view_name: self.title.clone(),
                stale_page,
                total_pages: pagination.total_pages,
            });
        }

        let headers = self.headers();
        let first_number = pagination.start_index() + 1;
        let rows = page
            .items
            .iter()
            .enumerate()
            .map(|(row_index, record)| Row {
                number: self.config.show_row_numbers.then_some(first_number + row_index),
                cells: self
                    .columns
                    .iter()
                    .map(|column| Cell {
                        text: truncate(column.value(record), self.config.max_cell_chars),
                        align: column.align,
                    })
                    .collect(),
                striped: self.config.striped_rows && row_index % 2 == 1,
                variant: self
                    .row_variant
                    .as_ref()
                    .map(|variant| variant(record))
                    .unwrap_or_default(),
            })
            .collect();

        TableFrame {
            title: self.title.clone(),
            headers,
            rows,
            summary: PageSummary::from_state(pagination),
            nav: NavState::from_state(&pagination, &self.config.page_size_options),
        }
    }

    fn headers(&self) -> Vec<HeaderCell> {
        let number_header = self.config.show_row_numbers.then(|| HeaderCell {
            text: "#".to_string(),
            align: CellAlign::Right,
        });

        number_header
            .into_iter()
            .chain(self.columns.iter().map(|column| HeaderCell {
                text: column.header.clone(),
                align: column.align,
            }))
            .collect()
    }

    pub fn next_page(&mut self) -> bool {
        let from = self.paginator.current_page();
        let moved = self.paginator.next_page();
        self.page_moved(from, moved)
    }

    pub fn prev_page(&mut self) -> bool {
        let from = self.paginator.current_page();
        let moved = self.paginator.prev_page();
        self.page_moved(from, moved)
    }

    pub fn go_to_page(&mut self, page: i64) -> bool {
        let from = self.paginator.current_page();
        let moved = self.paginator.go_to_page(page);
        self.page_moved(from, moved)
    }

    pub fn go_to_first_page(&mut self) -> bool {
        let from = self.paginator.current_page();
        let moved = self.paginator.go_to_first_page();
        self.page_moved(from, moved)
    }

    pub fn go_to_last_page(&mut self) -> bool {
        let from = self.paginator.current_page();
        let moved = self.paginator.go_to_last_page();
        self.page_moved(from, moved)
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) -> bool {
        let changed = self.paginator.set_items_per_page(items_per_page);
        if changed {
            self.publish(PageSizeChanged {
                view_name: self.title.clone(),
                items_per_page: self.paginator.items_per_page(),
            });
        }
        changed
    }

    fn page_moved(&self, from_page: usize, moved: bool) -> bool {
        if moved {
            let to_page = self.paginator.current_page();
            tracing::debug!("{}: page {} -> {}", self.title, from_page, to_page);
            self.publish(PageChanged {
                view_name: self.title.clone(),
                from_page,
                to_page,
                total_pages: self.paginator.total_pages(),
            });
        }
        moved
    }

    fn publish<E: lt_core::Event>(&self, event: E) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

impl<T> DashboardView for TableView<T> {
    fn id(&self) -> ViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "TableView"
    }

    fn save_config(&self) -> Value {
        json!({
            "show_row_numbers": self.config.show_row_numbers,
            "striped_rows": self.config.striped_rows,
            "max_cell_chars": self.config.max_cell_chars,
            "page_size_options": self.config.page_size_options,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(show_row_numbers) = config.get("show_row_numbers").and_then(|v| v.as_bool()) {
            self.config.show_row_numbers = show_row_numbers;
        }
        if let Some(striped) = config.get("striped_rows").and_then(|v| v.as_bool()) {
            self.config.striped_rows = striped;
        }
        if let Some(max_chars) = config
            .get("max_cell_chars")
            .and_then(|v| v.as_u64())
            .filter(|&n| n > 0)
        {
            self.config.max_cell_chars = max_chars as usize;
        }
        if let Some(options) = config.get("page_size_options").and_then(|v| v.as_array()) {
            let options: Vec<usize> = options
                .iter()
                .filter_map(|v| v.as_u64())
                .filter(|&n| n > 0)
                .map(|n| n as usize)
                .collect();
            if !options.is_empty() {
                self.config.page_size_options = options;
            }
        }
    }
}

/// Log and announce the outcome of fetching a remote table
pub(crate) fn report_load<T>(
    table: TableName,
    result: Result<Vec<T>, DataError>,
    events: Option<&EventBus>,
) -> Result<Vec<T>, DataError> {
    match result {
        Ok(rows) => {
            tracing::info!("Fetched {} rows from {}", rows.len(), table);
            if let Some(bus) = events {
                bus.publish(DatasetLoaded {
                    table: table.to_string(),
                    row_count: rows.len(),
                });
            }
            Ok(rows)
        }
        Err(e) => {
            tracing::error!("Failed to fetch {}: {}", table, e);
            if let Some(bus) = events {
                bus.publish(DatasetLoadFailed {
                    table: table.to_string(),
                    error: e.to_string(),
                });
            }
            Err(e)
        }
    }
}

fn truncate(value: String, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value,
    }
}
