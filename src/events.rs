use serde::Serialize;
use tauri::{AppHandle, Emitter, Runtime};

/// Event names the webview listens for.
pub mod event_names {
    pub const ENTRIES_REFRESHED: &str = "entries:refreshed";
    pub const SEARCH_COMPLETED: &str = "search:completed";
    pub const RECORDER_STATE: &str = "recorder:state";
    pub const VIEW_CHANGED: &str = "view:changed";
    pub const CLIENT_ERROR: &str = "client:error";
}

pub fn emit_event<R: Runtime, T: Serialize + Clone>(
    app: &AppHandle<R>,
    event: &str,
    payload: T,
) -> Result<(), String> {
    app.emit(event, payload).map_err(|e| e.to_string())
}

/// Surface a failure to the webview as a user-visible notification
/// payload, alongside the command's own error result.
pub fn emit_error<R: Runtime>(app: &AppHandle<R>, message: &str) {
    let _ = emit_event(app, event_names::CLIENT_ERROR, message.to_string());
}
