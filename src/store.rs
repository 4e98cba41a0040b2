//! Global Application State Store
//!
//! Uses Leptos reactive_stores for field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use suggest_engine::models::Category;

use crate::models::GroceryList;

/// App-wide state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All grocery lists for the overview page
    pub lists: Vec<GroceryList>,
    /// Known categories (append-only within a session)
    pub categories: Vec<Category>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace all lists (overview load)
pub fn store_set_lists(store: &AppStore, lists: Vec<GroceryList>) {
    store.lists().set(lists);
}

/// Prepend a newly created list
pub fn store_add_list(store: &AppStore, list: GroceryList) {
    store.lists().write().insert(0, list);
}

/// Remove a list by id
pub fn store_remove_list(store: &AppStore, list_id: i64) {
    store.lists().write().retain(|list| list.id != list_id);
}

/// Replace all categories (load or refresh after creation)
pub fn store_set_categories(store: &AppStore, categories: Vec<Category>) {
    store.categories().set(categories);
}
