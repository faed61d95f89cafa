//! Core field and entity types for the fields registry.
//!
//! All types serialize to/from YAML via serde. Field definitions describe
//! named, typed attributes plus their placement on the entity's form.
//! Entity definitions are templates listing which fields belong to a given
//! entity type, in form order.

use dealflow_layout::{FieldWidth, LayoutField};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A single option in a select or multi-select field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub order: i32,
}

/// The type of a field — determines what shape the value takes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    Text {
        #[serde(default)]
        single_line: bool,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Date,
    Checkbox,
    Select {
        options: Vec<SelectOption>,
    },
    MultiSelect {
        options: Vec<SelectOption>,
    },
    /// Stores entity IDs (ULIDs) pointing to another entity type.
    Reference {
        entity: String,
        #[serde(default)]
        multiple: bool,
    },
}

/// A field definition — the complete schema for a single named attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    pub id: Ulid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Form placement. When absent, inferred from the field type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<FieldWidth>,
    #[serde(default)]
    pub required: bool,
}

impl FieldDef {
    /// Infer form width from field type if not explicitly set.
    pub fn effective_width(&self) -> FieldWidth {
        if let Some(w) = self.width {
            return w;
        }
        match &self.kind {
            FieldKind::Text { single_line: false } => FieldWidth::Full,
            FieldKind::Text { single_line: true } => FieldWidth::Half,
            FieldKind::Number { .. } => FieldWidth::Half,
            FieldKind::Date => FieldWidth::Half,
            FieldKind::Checkbox => FieldWidth::Third,
            FieldKind::Select { .. } => FieldWidth::Half,
            FieldKind::MultiSelect { .. } => FieldWidth::Full,
            FieldKind::Reference { .. } => FieldWidth::Half,
        }
    }

    /// The layout entry this field contributes to a form.
    pub fn layout_field(&self) -> LayoutField {
        LayoutField::new(self.name.clone(), self.effective_width())
    }
}

/// An entity definition — a template declaring which fields belong to an
/// entity type. Field order is the authoritative form order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}
