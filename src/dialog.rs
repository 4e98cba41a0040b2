//! Blocking Dialogs
//!
//! window.alert / window.confirm wrappers. Mutation and validation
//! failures are surfaced through these so the user has to acknowledge
//! them before continuing.

pub fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}
