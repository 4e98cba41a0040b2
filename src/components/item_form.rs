//! Item Form Component
//!
//! Pick-or-create form feeding the list detail page: either an existing
//! catalog item is picked through the autocomplete, or the form drops
//! into creation mode and resolves the typed name into a new item
//! (creating its category first when asked to).

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use suggest_engine::create::{resolve_or_create, CreateError, NewItemDraft, NEW_CATEGORY_ID};
use suggest_engine::models::Suggestion;

use crate::api;
use crate::components::{CategorySelect, ItemAutocomplete};
use crate::dialog;
use crate::store::{store_set_categories, use_app_store, AppStateStoreFields};

/// What the form hands to its parent on submit: a resolved catalog item
/// (picked or freshly created) plus the entry fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFormData {
    pub item: Suggestion,
    pub quantity: String,
    pub unit: String,
}

#[component]
pub fn ItemForm(#[prop(into)] on_add: Callback<ItemFormData>) -> impl IntoView {
    let store = use_app_store();

    // Pick mode
    let (selected_item, set_selected_item) = signal(None::<Suggestion>);
    let (quantity, set_quantity) = signal(String::from("1"));
    let (unit, set_unit) = signal(String::new());

    // Creation mode
    let (is_creating, set_is_creating) = signal(false);
    let (new_item_name, set_new_item_name) = signal(String::new());
    let (category_id, set_category_id) = signal(0i64);
    let (custom_category_name, set_custom_category_name) = signal(String::new());
    let (new_item_unit, set_new_item_unit) = signal(String::from("pcs"));
    let (is_processing, set_is_processing) = signal(false);

    let reset_creation = move || {
        set_is_creating.set(false);
        set_new_item_name.set(String::new());
        set_category_id.set(0);
        set_custom_category_name.set(String::new());
        set_new_item_unit.set(String::from("pcs"));
    };

    let on_item_selected = move |item: Suggestion| {
        set_unit.set(item.default_unit.clone());
        set_selected_item.set(Some(item));
        set_is_creating.set(false);
    };

    let on_create_new = move |name: String| {
        set_is_creating.set(true);
        set_new_item_name.set(name);
        set_selected_item.set(None);
        // Auto-select the first category if any is known
        if let Some(first) = store.categories().get_untracked().first() {
            set_category_id.set(first.id);
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_processing.get_untracked() {
            return;
        }

        if is_creating.get_untracked() {
            let draft = NewItemDraft {
                name: new_item_name.get_untracked(),
                category_id: category_id.get_untracked(),
                custom_category_name: custom_category_name.get_untracked(),
                unit: new_item_unit.get_untracked(),
            };
            set_is_processing.set(true);
            spawn_local(async move {
                match resolve_or_create(&api::RestBackend, &draft).await {
                    Ok(item) => {
                        if draft.category_id == NEW_CATEGORY_ID {
                            // Pick up the server-assigned category
                            match api::get_categories().await {
                                Ok(categories) => store_set_categories(&store, categories),
                                Err(error) => web_sys::console::error_1(
                                    &format!("[ItemForm] Category refresh failed: {}", error.message()).into(),
                                ),
                            }
                        }
                        on_add.run(ItemFormData {
                            item,
                            quantity: String::from("1"),
                            unit: draft.unit.clone(),
                        });
                        reset_creation();
                    }
                    Err(CreateError::Validation(errors)) => {
                        dialog::alert(&errors.join("\n"));
                    }
                    Err(error) => {
                        dialog::alert(&format!("Failed to create item:\n{}", error.message()));
                    }
                }
                set_is_processing.set(false);
            });
        } else if let Some(item) = selected_item.get_untracked() {
            on_add.run(ItemFormData {
                item,
                quantity: quantity.get_untracked(),
                unit: unit.get_untracked(),
            });
            set_selected_item.set(None);
            set_quantity.set(String::from("1"));
            set_unit.set(String::new());
        }
    };

    let can_submit = move || {
        if is_creating.get() {
            !new_item_name.get().trim().is_empty() && category_id.get() != 0
        } else {
            selected_item.get().is_some()
        }
    };

    view! {
        <form class="item-form" on:submit=on_submit>
            <ItemAutocomplete
                on_item_selected=on_item_selected
                on_create_new=on_create_new
            />

            // Pick mode: entry fields for the chosen item
            {move || selected_item.get().map(|item| view! {
                <div class="selected-item-row">
                    <span class="selected-item-name">{item.name.clone()}</span>
                    <input
                        type="text"
                        class="quantity-input"
                        placeholder="Qty"
                        prop:value=move || quantity.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_quantity.set(input.value());
                        }
                    />
                    <input
                        type="text"
                        class="unit-input"
                        placeholder="Unit"
                        prop:value=move || unit.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_unit.set(input.value());
                        }
                    />
                </div>
            })}

            // Creation mode: the draft fields
            <Show when=move || is_creating.get()>
                <div class="new-item-fields">
                    <input
                        type="text"
                        placeholder="Item name"
                        prop:value=move || new_item_name.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_new_item_name.set(input.value());
                        }
                    />
                    <CategorySelect
                        selected_category_id=category_id
                        set_selected_category_id=set_category_id
                        custom_category_name=custom_category_name
                        set_custom_category_name=set_custom_category_name
                    />
                    <input
                        type="text"
                        class="unit-input"
                        placeholder="Default unit"
                        prop:value=move || new_item_unit.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_new_item_unit.set(input.value());
                        }
                    />
                    <button type="button" class="cancel-btn" on:click=move |_| reset_creation()>
                        "Cancel"
                    </button>
                </div>
            </Show>

            <button type="submit" disabled=move || is_processing.get() || !can_submit()>
                {move || if is_creating.get() { "Create & Add" } else { "Add to List" }}
            </button>
        </form>
    }
}
