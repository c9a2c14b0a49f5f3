use tracing::{debug, error};

use crate::api::ApiClient;
use crate::events::{emit_error, emit_event, event_names};
use crate::search::{should_skip, SearchOutcome, SearchState, QUERY_LIMIT};
use crate::store::EntryStore;

/// Run a semantic query. Blank text is silently skipped with zero network
/// calls; a failed search surfaces an error and leaves the previous
/// result untouched; a superseded response is discarded.
#[tauri::command]
pub async fn query_search(
    app: tauri::AppHandle,
    api: tauri::State<'_, ApiClient>,
    store: tauri::State<'_, EntryStore>,
    search: tauri::State<'_, SearchState>,
    text: String,
) -> Result<Option<SearchOutcome>, String> {
    if should_skip(&text) {
        debug!("Skipping blank search query");
        return Ok(None);
    }

    let ticket = search.begin();
    let _busy = store.begin_busy();

    let response = api.query(&text, QUERY_LIMIT).await.map_err(|e| {
        error!("Search failed: {}", e);
        emit_error(&app, &e.to_string());
        e.to_string()
    })?;

    let outcome = SearchOutcome::from_response(&text, response);
    if search.complete(ticket, outcome.clone()) {
        let _ = emit_event(&app, event_names::SEARCH_COMPLETED, outcome.clone());
        Ok(Some(outcome))
    } else {
        // A newer search superseded this one while it was in flight.
        Ok(None)
    }
}

#[tauri::command]
pub fn query_current(search: tauri::State<'_, SearchState>) -> Option<SearchOutcome> {
    search.current()
}
