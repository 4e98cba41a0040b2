//! Item Creation
//!
//! Resolves a typed name into a durable catalog item: optionally creates
//! the category first, then the item, as one sequential async task.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{Category, Suggestion, CREATE_NEW_ID};

/// Sentinel category id meaning "create the category named in
/// `custom_category_name` first"
pub const NEW_CATEGORY_ID: i64 = CREATE_NEW_ID;

/// Form state while the user is creating a catalog item.
/// Exists only between entering creation mode and submit/cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItemDraft {
    pub name: String,
    /// 0 = unset, -1 = create new category
    pub category_id: i64,
    pub custom_category_name: String,
    pub unit: String,
}

impl Default for NewItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category_id: 0,
            custom_category_name: String::new(),
            unit: "pcs".to_string(),
        }
    }
}

/// Catalog-side persistence operations used by the creation flow
#[async_trait(?Send)]
pub trait CatalogBackend {
    async fn create_category(&self, name: &str) -> Result<Category, BackendError>;
    async fn create_item(&self, name: &str, category_id: i64, unit: &str) -> Result<Suggestion, BackendError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateError {
    /// Local checks failed; nothing was sent to the backend
    Validation(Vec<String>),
    Backend(BackendError),
}

impl CreateError {
    pub fn message(&self) -> String {
        match self {
            CreateError::Validation(errors) => errors.join("\n"),
            CreateError::Backend(error) => error.message(),
        }
    }
}

impl std::fmt::Display for CreateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CreateError {}

/// Local pre-network checks for a draft
pub fn validate_draft(draft: &NewItemDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.name.trim().is_empty() {
        errors.push("Item name is required".to_string());
    }
    if draft.category_id == 0 {
        errors.push("Category is required".to_string());
    } else if draft.category_id == NEW_CATEGORY_ID && draft.custom_category_name.trim().is_empty() {
        errors.push("Category name is required".to_string());
    }
    if draft.unit.trim().is_empty() {
        errors.push("Default unit is required".to_string());
    }
    errors
}

/// Resolve the draft into a created catalog item.
///
/// When the category sentinel is selected the category is created first
/// and the item creation never runs if that fails. A category created
/// here is kept even if the item creation fails afterwards; it remains
/// valid and reusable.
pub async fn resolve_or_create(
    api: &impl CatalogBackend,
    draft: &NewItemDraft,
) -> Result<Suggestion, CreateError> {
    let errors = validate_draft(draft);
    if !errors.is_empty() {
        return Err(CreateError::Validation(errors));
    }

    let category_id = if draft.category_id == NEW_CATEGORY_ID {
        let category = api
            .create_category(draft.custom_category_name.trim())
            .await
            .map_err(CreateError::Backend)?;
        category.id
    } else {
        draft.category_id
    };

    api.create_item(draft.name.trim(), category_id, draft.unit.trim())
        .await
        .map_err(CreateError::Backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingCatalog {
        calls: RefCell<Vec<String>>,
        fail_category: bool,
        fail_item: bool,
    }

    #[async_trait(?Send)]
    impl CatalogBackend for RecordingCatalog {
        async fn create_category(&self, name: &str) -> Result<Category, BackendError> {
            self.calls.borrow_mut().push(format!("category:{}", name));
            if self.fail_category {
                return Err(BackendError::new(vec!["Category already exists".to_string()]));
            }
            Ok(Category { id: 42, name: name.to_string() })
        }

        async fn create_item(&self, name: &str, category_id: i64, unit: &str) -> Result<Suggestion, BackendError> {
            self.calls.borrow_mut().push(format!("item:{}:{}:{}", name, category_id, unit));
            if self.fail_item {
                return Err(BackendError::generic());
            }
            Ok(Suggestion {
                id: 7,
                name: name.to_string(),
                category_name: "Snacks".to_string(),
                default_unit: unit.to_string(),
                is_create_new: false,
            })
        }
    }

    fn draft(name: &str, category_id: i64, custom: &str) -> NewItemDraft {
        NewItemDraft {
            name: name.to_string(),
            category_id,
            custom_category_name: custom.to_string(),
            unit: "pcs".to_string(),
        }
    }

    #[tokio::test]
    async fn category_is_created_before_the_item() {
        let api = RecordingCatalog::default();

        let resolved = resolve_or_create(&api, &draft("Chips", NEW_CATEGORY_ID, "Snacks"))
            .await
            .unwrap();

        assert_eq!(resolved.id, 7);
        assert_eq!(
            *api.calls.borrow(),
            vec!["category:Snacks".to_string(), "item:Chips:42:pcs".to_string()]
        );
    }

    #[tokio::test]
    async fn item_creation_never_runs_when_the_category_fails() {
        let api = RecordingCatalog { fail_category: true, ..Default::default() };

        let result = resolve_or_create(&api, &draft("Chips", NEW_CATEGORY_ID, "Snacks")).await;

        assert!(matches!(result, Err(CreateError::Backend(_))));
        assert_eq!(*api.calls.borrow(), vec!["category:Snacks".to_string()]);
    }

    #[tokio::test]
    async fn existing_category_skips_the_category_call() {
        let api = RecordingCatalog::default();

        resolve_or_create(&api, &draft("Chips", 3, "")).await.unwrap();

        assert_eq!(*api.calls.borrow(), vec!["item:Chips:3:pcs".to_string()]);
    }

    #[tokio::test]
    async fn created_category_survives_an_item_failure() {
        let api = RecordingCatalog { fail_item: true, ..Default::default() };

        let result = resolve_or_create(&api, &draft("Chips", NEW_CATEGORY_ID, "Snacks")).await;

        assert!(matches!(result, Err(CreateError::Backend(_))));
        assert_eq!(
            *api.calls.borrow(),
            vec!["category:Snacks".to_string(), "item:Chips:42:pcs".to_string()]
        );
    }

    #[tokio::test]
    async fn validation_failure_issues_no_calls() {
        let api = RecordingCatalog::default();

        let result = resolve_or_create(&api, &draft("   ", 0, "")).await;

        let Err(CreateError::Validation(errors)) = result else {
            panic!("expected validation errors");
        };
        assert!(errors.contains(&"Item name is required".to_string()));
        assert!(errors.contains(&"Category is required".to_string()));
        assert!(api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn sentinel_without_custom_name_is_rejected() {
        let api = RecordingCatalog::default();

        let result = resolve_or_create(&api, &draft("Chips", NEW_CATEGORY_ID, "  ")).await;

        let Err(CreateError::Validation(errors)) = result else {
            panic!("expected validation errors");
        };
        assert_eq!(errors, vec!["Category name is required".to_string()]);
        assert!(api.calls.borrow().is_empty());
    }
}
