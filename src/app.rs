//! Grocery List Frontend App
//!
//! Root component: provides the app store and navigation context, and
//! switches between the overview and detail pages.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{ListDetail, ListsPage};
use crate::context::{AppContext, AppView};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let (current_view, set_current_view) = signal(AppView::Lists);

    // Provide store and context to all children
    provide_context(Store::new(AppState::default()));
    provide_context(AppContext::new((current_view, set_current_view)));

    view! {
        <div class="app-layout">
            {move || match current_view.get() {
                AppView::Lists => view! { <ListsPage /> }.into_any(),
                AppView::ListDetail(list_id) => view! { <ListDetail list_id=list_id /> }.into_any(),
            }}
        </div>
    }
}
