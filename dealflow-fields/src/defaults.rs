//! Built-in field definitions and the default deal entity template.
//!
//! IDs are fixed so reseeding recognizes built-ins even after a rename.

use crate::context::FieldDefaults;
use crate::types::{EntityDef, FieldDef, FieldKind, SelectOption};
use dealflow_layout::FieldWidth;
use ulid::Ulid;

fn option(value: &str, color: &str, order: i32) -> SelectOption {
    SelectOption {
        value: value.into(),
        label: None,
        color: Some(color.into()),
        order,
    }
}

/// Default field definitions and entity template for the deal form.
pub fn deal_defaults() -> FieldDefaults {
    FieldDefaults::new()
        .field(FieldDef {
            id: Ulid(1),
            name: "title".into(),
            description: Some("Deal name".into()),
            kind: FieldKind::Text { single_line: true },
            default: None,
            width: Some(FieldWidth::Full),
            required: true,
        })
        .field(FieldDef {
            id: Ulid(2),
            name: "amount".into(),
            description: Some("Deal value in minor currency units".into()),
            kind: FieldKind::Number {
                min: Some(0.0),
                max: None,
            },
            default: None,
            width: None,
            required: false,
        })
        .field(FieldDef {
            id: Ulid(3),
            name: "close_date".into(),
            description: Some("Expected close date".into()),
            kind: FieldKind::Date,
            default: None,
            width: None,
            required: false,
        })
        .field(FieldDef {
            id: Ulid(4),
            name: "priority".into(),
            description: None,
            kind: FieldKind::Select {
                options: vec![
                    option("low", "gray", 0),
                    option("medium", "yellow", 1),
                    option("high", "red", 2),
                ],
            },
            default: Some("medium".into()),
            width: Some(FieldWidth::Third),
            required: false,
        })
        .field(FieldDef {
            id: Ulid(5),
            name: "stage_notes".into(),
            description: Some("Free-form notes about the current stage".into()),
            kind: FieldKind::Text { single_line: false },
            default: None,
            width: None,
            required: false,
        })
        .entity(EntityDef {
            name: "deal".into(),
            title_field: Some("title".into()),
            fields: vec![
                "title".into(),
                "amount".into(),
                "close_date".into(),
                "priority".into(),
                "stage_notes".into(),
            ],
        })
}
