//! List Detail Component
//!
//! One grocery list: loads the header, items, and categories, then
//! wires the item form and the per-row mutations through the shared
//! ListStore.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use suggest_engine::list_store::ListStore;
use suggest_engine::models::ListItem;

use crate::api;
use crate::components::{ItemForm, ItemFormData, ListItemRow, ShareListModal};
use crate::context::AppContext;
use crate::dialog;
use crate::models::GroceryList;
use crate::store::{store_set_categories, use_app_store};

#[component]
pub fn ListDetail(list_id: i64) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (list, set_list) = signal(None::<GroceryList>);
    let (items, set_items) = signal(Vec::<ListItem>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (show_share_modal, set_show_share_modal) = signal(false);

    // Owns the item collection for this list
    let list_store = StoredValue::new_local(Rc::new(ListStore::new()));

    // Initial loads
    Effect::new(move |_| {
        set_loading.set(true);
        spawn_local(async move {
            match api::get_grocery_list(list_id).await {
                Ok(loaded) => set_list.set(Some(loaded)),
                Err(error) => {
                    set_error.set(Some("Failed to load grocery list".to_string()));
                    web_sys::console::error_1(
                        &format!("[ListDetail] Load list failed: {}", error.message()).into(),
                    );
                }
            }
            match api::get_list_items(list_id).await {
                Ok(loaded) => {
                    let store = list_store.get_value();
                    store.replace_all(loaded);
                    set_items.set((*store.items()).clone());
                }
                Err(error) => {
                    set_error.set(Some("Failed to load items".to_string()));
                    web_sys::console::error_1(
                        &format!("[ListDetail] Load items failed: {}", error.message()).into(),
                    );
                }
            }
            set_loading.set(false);
        });
        spawn_local(async move {
            match api::get_categories().await {
                Ok(categories) => store_set_categories(&store, categories),
                Err(error) => web_sys::console::error_1(
                    &format!("[ListDetail] Load categories failed: {}", error.message()).into(),
                ),
            }
        });
    });

    // A resolved item (picked or freshly created) gets a new list entry;
    // the server always creates a fresh one, it never merges
    let on_add = move |data: ItemFormData| {
        spawn_local(async move {
            let unit = if data.unit.is_empty() { None } else { Some(data.unit.as_str()) };
            match api::add_item_to_list(list_id, data.item.id, &data.quantity, unit).await {
                Ok(new_item) => {
                    let store = list_store.get_value();
                    store.add(new_item);
                    set_items.set((*store.items()).clone());
                }
                Err(error) => {
                    dialog::alert("Failed to add item to list. Please try again.");
                    web_sys::console::error_1(
                        &format!("[ListDetail] Add item failed: {}", error.message()).into(),
                    );
                }
            }
        });
    };

    let on_share_close = move |_: ()| set_show_share_modal.set(false);
    let on_shared = move |_username: String| {
        // Refresh the header so the shared-with line is current
        spawn_local(async move {
            if let Ok(loaded) = api::get_grocery_list(list_id).await {
                set_list.set(Some(loaded));
            }
        });
    };

    view! {
        <div class="list-detail">
            <div class="list-detail-header">
                <button type="button" class="back-btn" on:click=move |_| ctx.show_lists()>
                    "Back to lists"
                </button>
                <h2>{move || list.get().map(|l| l.name).unwrap_or_default()}</h2>
                <button type="button" class="share-btn" on:click=move |_| set_show_share_modal.set(true)>
                    "Share"
                </button>
            </div>

            {move || error.get().map(|message| view! {
                <div class="error-banner">{message}</div>
            })}

            <ItemForm on_add=on_add />

            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>

            <ul class="list-items">
                {move || items.get().into_iter().map(|item| view! {
                    <ListItemRow item=item store=list_store set_items=set_items />
                }).collect_view()}
            </ul>

            {move || match (show_share_modal.get(), list.get()) {
                (true, Some(current)) => view! {
                    <ShareListModal
                        list=current
                        on_close=on_share_close
                        on_shared=on_shared
                    />
                }
                .into_any(),
                _ => view! { <div></div> }.into_any(),
            }}
        </div>
    }
}
