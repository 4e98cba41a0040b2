//! Engine Models
//!
//! Data structures shared by the search, creation, and mutation paths.
//! Wire names follow the backend (snake_case).

use serde::{Deserialize, Serialize};

/// Reserved id for synthetic "create new" entries. Never persisted.
pub const CREATE_NEW_ID: i64 = -1;

/// One entry of the suggestion panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    pub name: String,
    pub category_name: String,
    pub default_unit: String,
    #[serde(default)]
    pub is_create_new: bool,
}

impl Suggestion {
    /// Synthetic "create this name" suggestion. `name` carries the
    /// literal query text; display decoration is up to the UI.
    pub fn create_new(query: &str) -> Self {
        Self {
            id: CREATE_NEW_ID,
            name: query.to_string(),
            category_name: "New Item".to_string(),
            default_unit: String::new(),
            is_create_new: true,
        }
    }
}

/// Item category, append-only within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// One entry of a grocery list (matches the backend entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: i64,
    pub grocery_list: i64,
    /// Catalog item this entry refers to
    pub item: i64,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub custom_name: Option<String>,
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub is_checked: bool,
    #[serde(default)]
    pub checked_by: Option<i64>,
    #[serde(default)]
    pub checked_by_username: Option<String>,
}

impl ListItem {
    /// Custom name when set, else the catalog item name
    pub fn display_name(&self) -> &str {
        match self.custom_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.item_name.as_deref().unwrap_or(""),
        }
    }
}

/// Partial update for a list item; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
}
