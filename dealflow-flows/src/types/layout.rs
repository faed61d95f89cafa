//! Persisted form layout for an entity type.

use dealflow_layout::{pack, LayoutField};
use serde::{Deserialize, Serialize};

/// The packed form layout for one entity type.
///
/// `fields` is stored in visual order with `order_index` values already
/// assigned; rearrangement goes through the layout commands, which repack
/// before persisting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormLayout {
    pub entity: String,
    pub fields: Vec<LayoutField>,
}

impl FormLayout {
    /// Create a layout for an entity type, packing the given fields.
    pub fn new(entity: impl Into<String>, fields: Vec<LayoutField>) -> Self {
        Self {
            entity: entity.into(),
            fields: pack(&fields),
        }
    }

    /// Number of rows in the layout.
    pub fn row_count(&self) -> usize {
        self.fields
            .last()
            .map(|f| f.order_index as usize + 1)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealflow_layout::FieldWidth;

    #[test]
    fn test_new_packs_fields() {
        let layout = FormLayout::new(
            "deal",
            vec![
                LayoutField::new("title", FieldWidth::Full),
                LayoutField::new("amount", FieldWidth::Half),
                LayoutField::new("close_date", FieldWidth::Half),
            ],
        );
        let rows: Vec<u32> = layout.fields.iter().map(|f| f.order_index).collect();
        assert_eq!(rows, vec![0, 1, 1]);
        assert_eq!(layout.row_count(), 2);
    }

    #[test]
    fn test_empty_layout_has_no_rows() {
        let layout = FormLayout::new("deal", Vec::new());
        assert_eq!(layout.row_count(), 0);
    }
}
