//! Application Context
//!
//! Shared navigation state provided via Leptos Context API.

use leptos::prelude::*;

/// Which page is visible (view switching happens through a signal,
/// there is no router)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Lists,
    ListDetail(i64),
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub view: ReadSignal<AppView>,
    /// Current page - write
    set_view: WriteSignal<AppView>,
}

impl AppContext {
    pub fn new(view: (ReadSignal<AppView>, WriteSignal<AppView>)) -> Self {
        Self { view: view.0, set_view: view.1 }
    }

    /// Open one list's detail page
    pub fn open_list(&self, list_id: i64) {
        self.set_view.set(AppView::ListDetail(list_id));
    }

    /// Back to the lists overview
    pub fn show_lists(&self) {
        self.set_view.set(AppView::Lists);
    }
}
