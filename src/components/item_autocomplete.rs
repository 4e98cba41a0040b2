//! Item Autocomplete Component
//!
//! Search input with a debounced suggestion dropdown. Keystrokes settle
//! through the engine's debouncer, searches carry sequence numbers so a
//! stale response can never overwrite a newer one, and a "create new"
//! entry is offered when nothing matches the query exactly.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use suggest_engine::debounce::{QueryDebouncer, QUIET_MS};
use suggest_engine::models::Suggestion;
use suggest_engine::search::{SearchPlan, SuggestionResolver, MIN_QUERY_LEN};
use suggest_engine::selection::{self, KeyOutcome, BLUR_CLOSE_DELAY_MS, NO_HIGHLIGHT};

use crate::api;

/// Autocomplete input over the item catalog
///
/// Props:
/// - on_item_selected: Callback when an existing item is picked
/// - on_create_new: Callback with the literal query text when the user
///   asks for an item that does not exist yet
#[component]
pub fn ItemAutocomplete(
    #[prop(into, default = String::from("Start typing to search items..."))] placeholder: String,
    #[prop(into)] on_item_selected: Callback<Suggestion>,
    #[prop(into)] on_create_new: Callback<String>,
) -> impl IntoView {
    let (input_value, set_input_value) = signal(String::new());
    let (suggestions, set_suggestions) = signal(Vec::<Suggestion>::new());
    let (is_loading, set_is_loading) = signal(false);
    let (show_dropdown, set_show_dropdown) = signal(false);
    let (selected_index, set_selected_index) = signal(NO_HIGHLIGHT);

    // Shared engine state behind Copy handles; the Rc keeps one
    // instance per component across all the handlers below
    let debouncer = StoredValue::new_local(Rc::new(RefCell::new(QueryDebouncer::new())));
    let resolver = StoredValue::new_local(Rc::new(RefCell::new(SuggestionResolver::default())));

    // Issue a search for a settled query (or clear for short ones)
    let run_search = move |query: String| {
        let plan = resolver.get_value().borrow_mut().begin(&query);
        match plan {
            SearchPlan::ShowNothing => {
                set_suggestions.set(Vec::new());
                set_is_loading.set(false);
                set_show_dropdown.set(false);
                set_selected_index.set(NO_HIGHLIGHT);
            }
            SearchPlan::Search(seq) => {
                set_is_loading.set(true);
                spawn_local(async move {
                    // Failures degrade to an empty result set; the user
                    // only ever sees the suggestion list
                    let results = match api::search_items(&query).await {
                        Ok(results) => results,
                        Err(error) => {
                            web_sys::console::error_1(
                                &format!("[ItemAutocomplete] Search failed: {}", error.message()).into(),
                            );
                            Vec::new()
                        }
                    };
                    let applied = resolver.get_value().borrow().apply(seq, &query, results);
                    if let Some(list) = applied {
                        let open = !list.is_empty();
                        set_suggestions.set(list);
                        set_is_loading.set(false);
                        set_show_dropdown.set(open);
                        set_selected_index.set(NO_HIGHLIGHT);
                    }
                });
            }
        }
    };

    let on_input = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
        let value = input.value();
        set_input_value.set(value.clone());

        let token = debouncer.get_value().borrow_mut().note_input();
        spawn_local(async move {
            TimeoutFuture::new(QUIET_MS).await;
            let settled = debouncer.get_value().borrow_mut().settle(token, &value);
            if let Some(query) = settled {
                run_search(query);
            }
        });
    };

    let select_suggestion = move |suggestion: Suggestion| {
        if suggestion.is_create_new {
            // Emit the literal typed text for inline creation; the
            // input keeps its value so the form can prefill the name
            on_create_new.run(input_value.get_untracked());
            set_show_dropdown.set(false);
        } else {
            on_item_selected.run(suggestion);
            set_input_value.set(String::new());
            set_show_dropdown.set(false);
            set_selected_index.set(NO_HIGHLIGHT);
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let list = suggestions.get_untracked();
        let highlighted = selected_index.get_untracked();
        let has_query = !input_value.get_untracked().is_empty();

        match selection::handle_key(&ev.key(), highlighted, list.len(), has_query) {
            KeyOutcome::Highlight(index) => {
                ev.prevent_default();
                set_selected_index.set(index);
            }
            KeyOutcome::Commit(index) => {
                ev.prevent_default();
                select_suggestion(list[index].clone());
            }
            KeyOutcome::SubmitQuery => {
                ev.prevent_default();
                on_create_new.run(input_value.get_untracked());
                set_show_dropdown.set(false);
            }
            KeyOutcome::Dismiss => {
                set_show_dropdown.set(false);
                set_selected_index.set(NO_HIGHLIGHT);
            }
            KeyOutcome::Ignored => {}
        }
    };

    let on_focus = move |_ev: web_sys::FocusEvent| {
        let query = input_value.get_untracked();
        if query.chars().count() >= MIN_QUERY_LEN {
            set_show_dropdown.set(!suggestions.get_untracked().is_empty());
        }
    };

    // Delay closing so a click on the panel can still commit
    let on_blur = move |_ev: web_sys::FocusEvent| {
        spawn_local(async move {
            TimeoutFuture::new(BLUR_CLOSE_DELAY_MS).await;
            set_show_dropdown.set(false);
            set_selected_index.set(NO_HIGHLIGHT);
        });
    };

    view! {
        <div class="item-autocomplete">
            <input
                type="text"
                placeholder=placeholder
                autocomplete="off"
                prop:value=move || input_value.get()
                on:input=on_input
                on:keydown=on_keydown
                on:focus=on_focus
                on:blur=on_blur
            />
            <Show when=move || is_loading.get()>
                <span class="autocomplete-loading">"Searching..."</span>
            </Show>
            {move || {
                if !show_dropdown.get() {
                    return view! { <div></div> }.into_any();
                }
                let selected = selected_index.get();
                let list = suggestions.get();
                view! {
                    <div class="autocomplete-list">
                        {list.into_iter().enumerate().map(|(i, suggestion)| {
                            let is_selected = i as i32 == selected;
                            let label = if suggestion.is_create_new {
                                format!("Create \"{}\"", suggestion.name)
                            } else {
                                format!("{} ({})", suggestion.name, suggestion.category_name)
                            };
                            let pick = suggestion.clone();
                            view! {
                                <button
                                    type="button"
                                    class=if is_selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        select_suggestion(pick.clone());
                                    }
                                >
                                    {label}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
