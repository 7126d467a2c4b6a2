use serde::{Serialize, Deserialize};

/// Display variant tag for cards and rows
///
/// The renderer maps each tag to its own colors and icons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Info,
    Success,
    Warning,
    Danger,
}
