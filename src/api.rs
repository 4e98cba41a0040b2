//! REST API Bindings
//!
//! Thin async wrappers over the backend endpoints, plus the engine's
//! persistence collaborator implemented on top of them.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

use suggest_engine::create::CatalogBackend;
use suggest_engine::error::BackendError;
use suggest_engine::list_store::ListBackend;
use suggest_engine::models::{Category, ItemPatch, ListItem, Suggestion};

use crate::models::{CatalogItem, GroceryList, Paginated, User};

/// Backend base URL: local dev server when served from localhost,
/// same-origin otherwise.
fn api_url() -> String {
    let hostname = web_sys::window()
        .and_then(|win| win.location().hostname().ok())
        .unwrap_or_default();
    if hostname == "localhost" || hostname == "127.0.0.1" {
        "http://localhost:8000/api".to_string()
    } else {
        "/api".to_string()
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Deserialize a success response; anything else becomes a BackendError
async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    response.json::<T>().await.map_err(|_| BackendError::generic())
}

/// Success check for endpoints with an empty response body
async fn expect_success(response: reqwest::Response) -> Result<(), BackendError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

/// Flatten the backend's error body into displayable messages.
///
/// Bodies are either `{"field": ["msg", ...], ...}` or a bare
/// `{"error": "msg"}` / `{"detail": "msg"}`.
async fn error_from_response(response: reqwest::Response) -> BackendError {
    let body = match response.json::<Value>().await {
        Ok(body) => body,
        Err(_) => return BackendError::generic(),
    };
    let mut messages = Vec::new();
    if let Value::Object(fields) = body {
        for (_field, value) in fields {
            match value {
                Value::String(message) => messages.push(message),
                Value::Array(entries) => {
                    for entry in entries {
                        if let Value::String(message) = entry {
                            messages.push(message);
                        }
                    }
                }
                _ => {}
            }
        }
    }
    if messages.is_empty() {
        BackendError::generic()
    } else {
        BackendError::new(messages)
    }
}

fn transport_error(_error: reqwest::Error) -> BackendError {
    BackendError::generic()
}

// ========================
// Request Payloads
// ========================

#[derive(Serialize)]
struct NameArgs<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct CreateItemArgs<'a> {
    name: &'a str,
    category: i64,
    default_unit: &'a str,
}

#[derive(Serialize)]
struct AddItemArgs<'a> {
    item_id: i64,
    quantity: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
}

#[derive(Serialize)]
struct ShareArgs<'a> {
    username: &'a str,
}

// ========================
// Catalog
// ========================

pub async fn search_items(query: &str) -> Result<Vec<Suggestion>, BackendError> {
    let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
    let url = format!("{}/items/?search={}", api_url(), encoded);
    let response = client().get(&url).send().await.map_err(transport_error)?;
    let page: Paginated<CatalogItem> = parse(response).await?;
    Ok(page.results.into_iter().map(CatalogItem::into_suggestion).collect())
}

pub async fn create_item(name: &str, category: i64, default_unit: &str) -> Result<Suggestion, BackendError> {
    let url = format!("{}/items/", api_url());
    let args = CreateItemArgs { name, category, default_unit };
    let response = client().post(&url).json(&args).send().await.map_err(transport_error)?;
    let created: CatalogItem = parse(response).await?;
    Ok(created.into_suggestion())
}

pub async fn get_categories() -> Result<Vec<Category>, BackendError> {
    let url = format!("{}/categories/", api_url());
    let response = client().get(&url).send().await.map_err(transport_error)?;
    let page: Paginated<Category> = parse(response).await?;
    Ok(page.results)
}

pub async fn create_category(name: &str) -> Result<Category, BackendError> {
    let url = format!("{}/categories/", api_url());
    let response = client()
        .post(&url)
        .json(&NameArgs { name })
        .send()
        .await
        .map_err(transport_error)?;
    parse(response).await
}

// ========================
// Grocery Lists
// ========================

pub async fn get_grocery_lists() -> Result<Vec<GroceryList>, BackendError> {
    let url = format!("{}/grocery-lists/", api_url());
    let response = client().get(&url).send().await.map_err(transport_error)?;
    let page: Paginated<GroceryList> = parse(response).await?;
    Ok(page.results)
}

pub async fn get_grocery_list(id: i64) -> Result<GroceryList, BackendError> {
    let url = format!("{}/grocery-lists/{}/", api_url(), id);
    let response = client().get(&url).send().await.map_err(transport_error)?;
    parse(response).await
}

pub async fn create_grocery_list(name: &str) -> Result<GroceryList, BackendError> {
    let url = format!("{}/grocery-lists/", api_url());
    let response = client()
        .post(&url)
        .json(&NameArgs { name })
        .send()
        .await
        .map_err(transport_error)?;
    parse(response).await
}

pub async fn delete_grocery_list(id: i64) -> Result<(), BackendError> {
    let url = format!("{}/grocery-lists/{}/", api_url(), id);
    let response = client().delete(&url).send().await.map_err(transport_error)?;
    expect_success(response).await
}

pub async fn share_list(list_id: i64, username: &str) -> Result<(), BackendError> {
    let url = format!("{}/grocery-lists/{}/share_with/", api_url(), list_id);
    let response = client()
        .post(&url)
        .json(&ShareArgs { username })
        .send()
        .await
        .map_err(transport_error)?;
    expect_success(response).await
}

// ========================
// Grocery List Items
// ========================

pub async fn get_list_items(list_id: i64) -> Result<Vec<ListItem>, BackendError> {
    let url = format!("{}/grocery-list-items/?grocery_list={}", api_url(), list_id);
    let response = client().get(&url).send().await.map_err(transport_error)?;
    let page: Paginated<ListItem> = parse(response).await?;
    Ok(page.results)
}

pub async fn add_item_to_list(
    list_id: i64,
    item_id: i64,
    quantity: &str,
    unit: Option<&str>,
) -> Result<ListItem, BackendError> {
    let url = format!("{}/grocery-lists/{}/add_item/", api_url(), list_id);
    let args = AddItemArgs { item_id, quantity, unit };
    let response = client().post(&url).json(&args).send().await.map_err(transport_error)?;
    parse(response).await
}

pub async fn update_list_item(id: i64, patch: &ItemPatch) -> Result<ListItem, BackendError> {
    let url = format!("{}/grocery-list-items/{}/", api_url(), id);
    let response = client().patch(&url).json(patch).send().await.map_err(transport_error)?;
    parse(response).await
}

pub async fn delete_list_item(id: i64) -> Result<(), BackendError> {
    let url = format!("{}/grocery-list-items/{}/", api_url(), id);
    let response = client().delete(&url).send().await.map_err(transport_error)?;
    expect_success(response).await
}

pub async fn toggle_item_checked(id: i64) -> Result<ListItem, BackendError> {
    let url = format!("{}/grocery-list-items/{}/toggle_checked/", api_url(), id);
    let response = client()
        .post(&url)
        .json(&serde_json::json!({}))
        .send()
        .await
        .map_err(transport_error)?;
    parse(response).await
}

// ========================
// Users
// ========================

pub async fn search_users(query: &str) -> Result<Vec<User>, BackendError> {
    let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
    let url = format!("{}/users/?search={}", api_url(), encoded);
    let response = client().get(&url).send().await.map_err(transport_error)?;
    let page: Paginated<User> = parse(response).await?;
    Ok(page.results)
}

// ========================
// Engine Backend Impls
// ========================

/// Engine-facing persistence collaborator backed by the REST api
#[derive(Clone, Copy, Default)]
pub struct RestBackend;

#[async_trait(?Send)]
impl CatalogBackend for RestBackend {
    async fn create_category(&self, name: &str) -> Result<Category, BackendError> {
        create_category(name).await
    }

    async fn create_item(&self, name: &str, category_id: i64, unit: &str) -> Result<Suggestion, BackendError> {
        create_item(name, category_id, unit).await
    }
}

#[async_trait(?Send)]
impl ListBackend for RestBackend {
    async fn update_item(&self, id: i64, patch: &ItemPatch) -> Result<ListItem, BackendError> {
        update_list_item(id, patch).await
    }

    async fn toggle_checked(&self, id: i64) -> Result<ListItem, BackendError> {
        toggle_item_checked(id).await
    }

    async fn delete_item(&self, id: i64) -> Result<(), BackendError> {
        delete_list_item(id).await
    }
}
