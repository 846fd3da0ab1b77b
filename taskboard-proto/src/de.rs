//! Lenient deserialization helpers.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Deserializes a value, mapping an explicit `null` to `T::default()`.
///
/// Combined with `#[serde(default)]` on the container this makes a field
/// tolerate being absent, `null`, or present.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON value, keeping scalars and discarding everything else.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

impl Scalar {
    /// The scalar as display text; `None` for `null`, arrays and objects.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(n) => Some(n.to_string()),
            Self::UInt(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Other(_) => None,
        }
    }
}

/// Deserializes a display-only text field.
///
/// Strings pass through, numbers and booleans are rendered as text, and
/// `null`, arrays or objects become `None`. Never fails on well-formed JSON.
pub fn display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_text())
}
