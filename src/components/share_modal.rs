//! Share List Modal Component
//!
//! Debounced user search (same engine primitives as the item
//! autocomplete, no create-new synthesis) plus share-by-username.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use suggest_engine::debounce::{QueryDebouncer, QUIET_MS};
use suggest_engine::search::{SearchSequence, MIN_QUERY_LEN};

use crate::api;
use crate::models::{GroceryList, User};

#[component]
pub fn ShareListModal(
    list: GroceryList,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_shared: Callback<String>,
) -> impl IntoView {
    let list_id = list.id;
    let list_name = list.name.clone();
    let shared_with = list.shared_with.clone();

    let (search_query, set_search_query) = signal(String::new());
    let (search_results, set_search_results) = signal(Vec::<User>::new());
    let (is_searching, set_is_searching) = signal(false);
    let (is_loading, set_is_loading) = signal(false);
    let (error_message, set_error_message) = signal(String::new());
    let (success_message, set_success_message) = signal(String::new());

    let debouncer = StoredValue::new_local(Rc::new(RefCell::new(QueryDebouncer::new())));
    let sequence = StoredValue::new_local(Rc::new(RefCell::new(SearchSequence::new())));

    let clear_messages = move || {
        set_error_message.set(String::new());
        set_success_message.set(String::new());
    };

    let run_user_search = move |query: String| {
        if query.chars().count() < MIN_QUERY_LEN {
            // Invalidate any search still in flight
            sequence.get_value().borrow_mut().next();
            set_search_results.set(Vec::new());
            set_is_searching.set(false);
            return;
        }
        let seq = sequence.get_value().borrow_mut().next();
        set_is_searching.set(true);
        spawn_local(async move {
            // Failures degrade to an empty result list
            let results = match api::search_users(&query).await {
                Ok(users) => users,
                Err(error) => {
                    web_sys::console::error_1(
                        &format!("[ShareListModal] Search failed: {}", error.message()).into(),
                    );
                    Vec::new()
                }
            };
            if sequence.get_value().borrow().is_current(seq) {
                set_search_results.set(results);
                set_is_searching.set(false);
            }
        });
    };

    let on_search_input = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
        let value = input.value();
        set_search_query.set(value.clone());
        clear_messages();

        let token = debouncer.get_value().borrow_mut().note_input();
        spawn_local(async move {
            TimeoutFuture::new(QUIET_MS).await;
            let settled = debouncer.get_value().borrow_mut().settle(token, &value);
            if let Some(query) = settled {
                run_user_search(query);
            }
        });
    };

    let share_with = move |username: String| {
        set_is_loading.set(true);
        clear_messages();
        spawn_local(async move {
            match api::share_list(list_id, &username).await {
                Ok(()) => {
                    set_success_message.set(format!("Successfully shared list with {}!", username));
                    on_shared.run(username);
                    set_search_query.set(String::new());
                    set_search_results.set(Vec::new());
                }
                Err(error) => {
                    set_error_message.set(error.message());
                }
            }
            set_is_loading.set(false);
        });
    };

    let close = move |_ev: web_sys::MouseEvent| {
        clear_messages();
        set_search_query.set(String::new());
        set_search_results.set(Vec::new());
        on_close.run(());
    };

    view! {
        <div class="modal-backdrop">
            <div class="share-modal">
                <div class="modal-header">
                    <h3>{format!("Share \"{}\"", list_name)}</h3>
                    <button type="button" class="close-btn" on:click=close>"×"</button>
                </div>

                {(!shared_with.is_empty()).then(|| view! {
                    <div class="shared-with-list">
                        <span class="shared-with-label">"Already shared with:"</span>
                        {shared_with.iter().map(|user| view! {
                            <span class="shared-user">{user.short_name().to_string()}</span>
                        }).collect_view()}
                    </div>
                })}

                <input
                    type="text"
                    placeholder="Search users by name..."
                    autocomplete="off"
                    prop:value=move || search_query.get()
                    on:input=on_search_input
                />

                <Show when=move || is_searching.get()>
                    <p class="searching">"Searching users..."</p>
                </Show>

                <ul class="user-results">
                    {move || search_results.get().into_iter().map(|user| {
                        let username = user.username.clone();
                        let label = format!("{} ({})", user.short_name(), user.username);
                        view! {
                            <li>
                                <button
                                    type="button"
                                    class="share-user-btn"
                                    disabled=move || is_loading.get()
                                    on:click=move |_| share_with(username.clone())
                                >
                                    {label}
                                </button>
                            </li>
                        }
                    }).collect_view()}
                </ul>

                <Show when=move || !error_message.get().is_empty()>
                    <p class="error-message">{move || error_message.get()}</p>
                </Show>
                <Show when=move || !success_message.get().is_empty()>
                    <p class="success-message">{move || success_message.get()}</p>
                </Show>
            </div>
        </div>
    }
}
