//! Frontend Models
//!
//! Data structures matching backend entities not owned by the engine.

use serde::{Deserialize, Serialize};
use suggest_engine::models::Suggestion;

/// Backend user, as returned by the user search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// First name when present, else the username
    pub fn short_name(&self) -> &str {
        if self.first_name.is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }
}

/// Grocery list header (items are loaded separately)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    pub id: i64,
    pub name: String,
    pub owner: i64,
    #[serde(default)]
    pub owner_username: Option<String>,
    #[serde(default)]
    pub shared_with: Vec<User>,
    #[serde(default)]
    pub item_count: Option<u32>,
}

/// Catalog item as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub category: i64,
    pub category_name: String,
    #[serde(default)]
    pub default_unit: String,
}

impl CatalogItem {
    pub fn into_suggestion(self) -> Suggestion {
        Suggestion {
            id: self.id,
            name: self.name,
            category_name: self.category_name,
            default_unit: self.default_unit,
            is_create_new: false,
        }
    }
}

/// Paginated response wrapper used by all list endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paginated<T> {
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}
