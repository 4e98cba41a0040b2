//! List Item Row Component
//!
//! One entry of the list detail page: checkbox toggle, inline
//! quantity/unit editing, and delete with a confirm gate. All mutations
//! go through the shared ListStore so per-item guards apply.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use suggest_engine::list_store::{ListStore, MutationError};
use suggest_engine::models::{ItemPatch, ListItem};

use crate::api::RestBackend;
use crate::dialog;

fn report(action: &str, error: MutationError) {
    match error {
        // The in-flight guard rejected the attempt; nothing to undo
        MutationError::Busy => web_sys::console::warn_1(
            &format!("[ListItemRow] {} skipped: {}", action, error.message()).into(),
        ),
        MutationError::Backend(_) => {
            dialog::alert(&format!("{}:\n{}", action, error.message()));
        }
    }
}

#[component]
pub fn ListItemRow(
    item: ListItem,
    store: StoredValue<Rc<ListStore>, LocalStorage>,
    set_items: WriteSignal<Vec<ListItem>>,
) -> impl IntoView {
    let item_id = item.id;
    let display_name = item.display_name().to_string();
    let checked = item.is_checked;
    let checked_by = item.checked_by_username.clone();
    let notes = item.notes.clone().unwrap_or_default();
    let amount = format!("{} {}", item.quantity, item.unit);

    let (is_editing, set_is_editing) = signal(false);
    let (editing_quantity, set_editing_quantity) = signal(item.quantity.clone());
    let (editing_unit, set_editing_unit) = signal(item.unit.clone());
    let (is_saving, set_is_saving) = signal(false);

    let saved_quantity = StoredValue::new(item.quantity.clone());
    let saved_unit = StoredValue::new(item.unit.clone());

    let on_toggle = move |_ev: web_sys::Event| {
        spawn_local(async move {
            let store = store.get_value();
            match store.toggle_checked(&RestBackend, item_id).await {
                Ok(_) => set_items.set((*store.items()).clone()),
                Err(error) => report("Failed to update item", error),
            }
        });
    };

    let start_editing = move |_ev: web_sys::MouseEvent| {
        set_editing_quantity.set(saved_quantity.get_value());
        set_editing_unit.set(saved_unit.get_value());
        set_is_editing.set(true);
    };

    let cancel_editing = move |_ev: web_sys::MouseEvent| {
        set_editing_quantity.set(saved_quantity.get_value());
        set_editing_unit.set(saved_unit.get_value());
        set_is_editing.set(false);
    };

    let save_changes = move |_ev: web_sys::MouseEvent| {
        let quantity = editing_quantity.get_untracked().trim().to_string();
        let unit = editing_unit.get_untracked().trim().to_string();

        if quantity.is_empty() {
            dialog::alert("Quantity is required");
            return;
        }
        if quantity == saved_quantity.get_value() && unit == saved_unit.get_value() {
            set_is_editing.set(false);
            return;
        }

        set_is_saving.set(true);
        spawn_local(async move {
            let patch = ItemPatch {
                quantity: Some(quantity),
                unit: Some(unit),
                ..Default::default()
            };
            let store = store.get_value();
            match store.update_fields(&RestBackend, item_id, patch).await {
                Ok(()) => {
                    set_items.set((*store.items()).clone());
                    set_is_editing.set(false);
                }
                // Form stays open so the edit can be retried
                Err(error) => report("Failed to update item", error),
            }
            set_is_saving.set(false);
        });
    };

    let on_delete = move |_ev: web_sys::MouseEvent| {
        if !dialog::confirm("Remove this item from the list?") {
            return;
        }
        spawn_local(async move {
            let store = store.get_value();
            match store.remove(&RestBackend, item_id).await {
                Ok(()) => set_items.set((*store.items()).clone()),
                Err(error) => report("Failed to remove item", error),
            }
        });
    };

    view! {
        <li class=if checked { "list-item checked" } else { "list-item" }>
            <input type="checkbox" checked=checked on:change=on_toggle />

            <span class="item-name">{display_name}</span>

            <Show when=move || !is_editing.get()>
                <span class="item-amount">{amount.clone()}</span>
            </Show>

            {(!notes.is_empty()).then(|| view! {
                <span class="item-notes">{notes.clone()}</span>
            })}

            {checked_by.clone().map(|username| view! {
                <span class="checked-by">{format!("checked by {}", username)}</span>
            })}

            <Show when=move || is_editing.get()>
                <span class="item-edit">
                    <input
                        type="text"
                        class="quantity-input"
                        prop:value=move || editing_quantity.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_editing_quantity.set(input.value());
                        }
                    />
                    <input
                        type="text"
                        class="unit-input"
                        prop:value=move || editing_unit.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_editing_unit.set(input.value());
                        }
                    />
                    <button
                        type="button"
                        class="save-btn"
                        disabled=move || is_saving.get()
                        on:click=save_changes
                    >
                        {move || if is_saving.get() { "Saving..." } else { "Save" }}
                    </button>
                    <button type="button" class="cancel-btn" on:click=cancel_editing>
                        "Cancel"
                    </button>
                </span>
            </Show>

            <Show when=move || !is_editing.get()>
                <span class="item-actions">
                    <button type="button" class="edit-btn" on:click=start_editing>
                        "Edit"
                    </button>
                    <button type="button" class="delete-btn" on:click=on_delete>
                        "Remove"
                    </button>
                </span>
            </Show>
        </li>
    }
}
