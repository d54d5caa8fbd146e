//! Item (trabajo) Model

use serde::{Deserialize, Serialize};

use crate::validation::MAX_NAME_LEN;

/// Kind of input a form field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Text,
    Select,
    Checkbox,
    Date,
}

/// Field descriptor attached to an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 1-based rank within the collection
    pub order: i32,
    #[serde(default)]
    pub form_fields: Vec<FormField>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create item payload
///
/// Carries no id and no order: the store assigns both, appending the new
/// item at `N + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub form_fields: Vec<FormField>,
}

/// Update item payload
///
/// `order` is deliberately absent; it only changes through a reorder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_fields: Option<Vec<FormField>>,
}

/// Response body of `GET /items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub items: Vec<Item>,
}

/// One `{id, order}` pair of a bulk reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub id: i64,
    pub order: i32,
}

/// Response body of `POST /items/reorder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderResponse {
    pub updated: usize,
}

/// Suffix appended to the name of a duplicated item
pub const DUPLICATE_SUFFIX: &str = " (Copia)";

impl Item {
    /// Build the create payload for a copy of this item
    ///
    /// Id and order are dropped so the store treats it as a fresh append.
    /// The base name is shortened when the suffix would exceed
    /// [`MAX_NAME_LEN`].
    pub fn duplicate_payload(&self) -> ItemCreate {
        let budget = MAX_NAME_LEN.saturating_sub(DUPLICATE_SUFFIX.len());
        let mut base = self.name.trim_end();
        if base.len() > budget {
            let mut cut = budget;
            while !base.is_char_boundary(cut) {
                cut -= 1;
            }
            base = base[..cut].trim_end();
        }
        ItemCreate {
            name: format!("{base}{DUPLICATE_SUFFIX}"),
            description: self.description.clone(),
            form_fields: self.form_fields.clone(),
        }
    }
}
