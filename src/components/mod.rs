//! UI Components
//!
//! Reusable Leptos components.

mod category_select;
mod item_autocomplete;
mod item_form;
mod list_detail;
mod list_item_row;
mod lists_page;
mod share_modal;

pub use category_select::CategorySelect;
pub use item_autocomplete::ItemAutocomplete;
pub use item_form::{ItemForm, ItemFormData};
pub use list_detail::ListDetail;
pub use list_item_row::ListItemRow;
pub use lists_page::ListsPage;
pub use share_modal::ShareListModal;
