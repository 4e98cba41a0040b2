//! Lists Overview Component
//!
//! All grocery lists: load, create, open, and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::context::AppContext;
use crate::dialog;
use crate::store::{store_add_list, store_remove_list, store_set_lists, use_app_store, AppStateStoreFields};

#[component]
pub fn ListsPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (show_new_list_form, set_show_new_list_form) = signal(false);
    let (new_list_name, set_new_list_name) = signal(String::new());

    Effect::new(move |_| {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::get_grocery_lists().await {
                Ok(lists) => store_set_lists(&store, lists),
                Err(error) => {
                    set_error.set(Some("Failed to load grocery lists".to_string()));
                    web_sys::console::error_1(
                        &format!("[ListsPage] Load failed: {}", error.message()).into(),
                    );
                }
            }
            set_loading.set(false);
        });
    });

    let create_list = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_list_name.get_untracked().trim().to_string();
        if name.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::create_grocery_list(&name).await {
                Ok(new_list) => {
                    store_add_list(&store, new_list);
                    set_show_new_list_form.set(false);
                    set_new_list_name.set(String::new());
                }
                Err(error) => {
                    dialog::alert("Failed to create list");
                    web_sys::console::error_1(
                        &format!("[ListsPage] Create failed: {}", error.message()).into(),
                    );
                }
            }
        });
    };

    let delete_list = move |list_id: i64| {
        if !dialog::confirm("Are you sure you want to delete this list?") {
            return;
        }
        spawn_local(async move {
            match api::delete_grocery_list(list_id).await {
                Ok(()) => store_remove_list(&store, list_id),
                Err(error) => {
                    dialog::alert("Failed to delete list");
                    web_sys::console::error_1(
                        &format!("[ListsPage] Delete failed: {}", error.message()).into(),
                    );
                }
            }
        });
    };

    view! {
        <div class="lists-page">
            <div class="lists-header">
                <h1>"My Grocery Lists"</h1>
                <button type="button" on:click=move |_| set_show_new_list_form.set(true)>
                    "New List"
                </button>
            </div>

            <Show when=move || show_new_list_form.get()>
                <form class="new-list-form" on:submit=create_list>
                    <input
                        type="text"
                        placeholder="List name"
                        prop:value=move || new_list_name.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_new_list_name.set(input.value());
                        }
                    />
                    <button type="submit">"Create"</button>
                    <button
                        type="button"
                        class="cancel-btn"
                        on:click=move |_| {
                            set_show_new_list_form.set(false);
                            set_new_list_name.set(String::new());
                        }
                    >
                        "Cancel"
                    </button>
                </form>
            </Show>

            {move || error.get().map(|message| view! {
                <div class="error-banner">{message}</div>
            })}

            <Show when=move || loading.get()>
                <p class="loading">"Loading..."</p>
            </Show>

            <ul class="list-cards">
                {move || store.lists().get().into_iter().map(|list| {
                    let list_id = list.id;
                    let shared_names = list
                        .shared_with
                        .iter()
                        .map(|user| user.short_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    view! {
                        <li class="list-card" on:click=move |_| ctx.open_list(list_id)>
                            <span class="list-name">{list.name.clone()}</span>
                            {list.item_count.map(|count| view! {
                                <span class="item-count">{format!("{} items", count)}</span>
                            })}
                            {(!shared_names.is_empty()).then(|| view! {
                                <span class="shared-with">{format!("Shared with {}", shared_names)}</span>
                            })}
                            <button
                                type="button"
                                class="delete-btn"
                                on:click=move |ev: web_sys::MouseEvent| {
                                    ev.stop_propagation();
                                    ev.prevent_default();
                                    delete_list(list_id);
                                }
                            >
                                "×"
                            </button>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}
