//! Base trait for dashboard views

use serde_json::Value;

/// Unique identifier for a dashboard view
pub type ViewId = uuid::Uuid;

/// Base trait for all dashboard views (tables, stat panels)
pub trait DashboardView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> ViewId;

    /// Get the display name
    fn display_name(&self) -> &str;

    /// Get the view type (for serialization)
    fn view_type(&self) -> &str;

    /// Save configuration
    fn save_config(&self) -> Value;

    /// Load configuration
    fn load_config(&mut self, config: Value);
}
