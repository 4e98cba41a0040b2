//! Category Select Component
//!
//! Dropdown over the known categories with a "create new" sentinel
//! option that reveals a custom name input.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use suggest_engine::create::NEW_CATEGORY_ID;

use crate::store::{use_app_store, AppStateStoreFields};

/// Category dropdown bound to the app store's category list
///
/// Selecting the "+ Create new category" option switches the bound id
/// to the sentinel and shows the custom name input.
#[component]
pub fn CategorySelect(
    selected_category_id: ReadSignal<i64>,
    set_selected_category_id: WriteSignal<i64>,
    custom_category_name: ReadSignal<String>,
    set_custom_category_name: WriteSignal<String>,
) -> impl IntoView {
    let store = use_app_store();

    let on_change = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
        let category_id = select.value().parse::<i64>().unwrap_or(0);
        set_selected_category_id.set(category_id);
        if category_id != NEW_CATEGORY_ID {
            set_custom_category_name.set(String::new());
        }
    };

    view! {
        <div class="category-select">
            <select
                prop:value=move || selected_category_id.get().to_string()
                on:change=on_change
            >
                <option value="0">"Select a category"</option>
                {move || {
                    store.categories().get().into_iter().map(|category| {
                        view! {
                            <option value=category.id.to_string()>{category.name}</option>
                        }
                    }).collect_view()
                }}
                <option value=NEW_CATEGORY_ID.to_string()>"+ Create new category"</option>
            </select>

            <Show when=move || selected_category_id.get() == NEW_CATEGORY_ID>
                <input
                    type="text"
                    class="custom-category-input"
                    placeholder="New category name"
                    prop:value=move || custom_category_name.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_custom_category_name.set(input.value());
                    }
                />
            </Show>
        </div>
    }
}
