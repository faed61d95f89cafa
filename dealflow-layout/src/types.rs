//! Field and width types for form layouts.
//!
//! A layout is an ordered sequence of [`LayoutField`]s. Sequence order is the
//! authoritative left-to-right, top-to-bottom placement; the packer only
//! assigns row numbers on top of it.

use serde::{Deserialize, Deserializer, Serialize};

/// How much horizontal row-space a field consumes.
///
/// Widths a deserializer does not recognize fall back to [`FieldWidth::Full`],
/// which isolates the field on its own row instead of overflowing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldWidth {
    #[default]
    Full,
    Half,
    Third,
}

impl FieldWidth {
    /// Fraction of a row this width consumes.
    pub fn space(&self) -> f64 {
        match self {
            Self::Full => 1.0,
            Self::Half => 0.5,
            Self::Third => 1.0 / 3.0,
        }
    }
}

impl<'de> Deserialize<'de> for FieldWidth {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "half" => Self::Half,
            "third" => Self::Third,
            // "full" and anything unrecognized
            _ => Self::Full,
        })
    }
}

/// One form field in a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutField {
    /// Opaque stable identifier, unique within the layout
    pub id: String,
    /// Declared row-space
    #[serde(default)]
    pub width: FieldWidth,
    /// Row number assigned by the packer. Equal values share a row; distinct
    /// values increase by exactly 1 per row, starting at 0.
    #[serde(default)]
    pub order_index: u32,
}

impl LayoutField {
    /// Create a field with an unassigned (zero) order index.
    pub fn new(id: impl Into<String>, width: FieldWidth) -> Self {
        Self {
            id: id.into(),
            width,
            order_index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_space_fractions() {
        assert_eq!(FieldWidth::Full.space(), 1.0);
        assert_eq!(FieldWidth::Half.space(), 0.5);
        assert!((FieldWidth::Third.space() - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn width_serializes_kebab_case() {
        let json = serde_json::to_string(&FieldWidth::Half).unwrap();
        assert_eq!(json, "\"half\"");
    }

    #[test]
    fn unknown_width_reads_as_full() {
        let width: FieldWidth = serde_json::from_str("\"two-thirds\"").unwrap();
        assert_eq!(width, FieldWidth::Full);
    }

    #[test]
    fn field_json_round_trip() {
        let field = LayoutField {
            id: "amount".into(),
            width: FieldWidth::Third,
            order_index: 2,
        };
        let json = serde_json::to_string(&field).unwrap();
        let parsed: LayoutField = serde_json::from_str(&json).unwrap();
        assert_eq!(field, parsed);
    }

    #[test]
    fn field_defaults_on_missing_keys() {
        let field: LayoutField = serde_json::from_str(r#"{"id": "title"}"#).unwrap();
        assert_eq!(field.width, FieldWidth::Full);
        assert_eq!(field.order_index, 0);
    }
}
