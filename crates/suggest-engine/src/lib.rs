//! Suggest Engine
//!
//! The framework-free core behind the grocery client's three
//! search-and-pick inputs (item autocomplete, category creation, user
//! search) and the list item collection they feed into:
//!
//! - [`debounce`]: explicit timer-reset debounce for keystroke streams
//! - [`search`]: sequence-numbered search resolution that discards
//!   stale responses and synthesizes the "create new" suggestion
//! - [`selection`]: keyboard navigation over the suggestion panel
//! - [`create`]: the create-category-then-create-item task
//! - [`list_store`]: the per-list item collection with per-item
//!   in-flight guards
//!
//! Timers, DOM events, and HTTP live in the consuming application; the
//! engine only makes the decisions, which keeps every invariant testable
//! on a plain native target.

pub mod create;
pub mod debounce;
pub mod error;
pub mod list_store;
pub mod models;
pub mod search;
pub mod selection;

pub use create::{resolve_or_create, validate_draft, CatalogBackend, CreateError, NewItemDraft, NEW_CATEGORY_ID};
pub use debounce::QueryDebouncer;
pub use error::BackendError;
pub use list_store::{ListBackend, ListStore, MutationError};
pub use models::{Category, ItemPatch, ListItem, Suggestion, CREATE_NEW_ID};
pub use search::{SearchPlan, SearchSequence, SuggestionResolver, MIN_QUERY_LEN};
pub use selection::KeyOutcome;
