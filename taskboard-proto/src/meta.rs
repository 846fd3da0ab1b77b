//! Metadata attached to every fetched document.

use serde::{Deserialize, Serialize};

use crate::de::display_text;

/// The `meta` object of a source document. Used for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentMeta {
    /// When the source was last written: ISO-8601 text, or epoch
    /// milliseconds when the source writes a number.
    #[serde(deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}
