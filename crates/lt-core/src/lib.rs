//! Core functionality for the loan tracker dashboard
//! 
//! This crate provides the pagination engine that every list view is built on,
//! the event bus views use to announce navigation changes, and the
//! dashboard-wide settings.

pub mod events;
pub mod pagination;
pub mod settings;

// Re-export commonly used types
pub use events::{EventBus, Event, EventHandler, handler_from_fn};
pub use pagination::{
    derive, Derived, PageCursor, PaginationState, Paginator,
    DEFAULT_ITEMS_PER_PAGE,
};
pub use settings::{DashboardSettings, SettingsError};
