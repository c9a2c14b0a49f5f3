use tracing::{error, info};

use crate::api::ApiClient;
use crate::draft::Composer;
use crate::error::ClientError;
use crate::events::{emit_error, emit_event, event_names};
use crate::recorder::Recorder;
use crate::store::EntryStore;
use crate::types::entry::Entry;
use crate::view::{ViewMode, ViewState};

/// Fetch the collection and replace the cached list wholesale.
async fn refresh_list(api: &ApiClient, store: &EntryStore) -> Result<Vec<Entry>, ClientError> {
    let entries = api.list_entries(None, None).await?;
    store.replace(entries.clone());
    Ok(entries)
}

/// The destructive-action guard: deletion must arrive pre-confirmed.
fn require_confirmation(confirmed: bool) -> Result<(), ClientError> {
    if confirmed {
        Ok(())
    } else {
        Err(ClientError::NotConfirmed)
    }
}

/// Submission is blocked while a recording session is still open; the
/// user must stop it first so no audio is silently truncated.
fn require_not_recording(recorder: &Recorder) -> Result<(), ClientError> {
    if recorder.is_recording() {
        Err(ClientError::RecordingInProgress)
    } else {
        Ok(())
    }
}

#[tauri::command]
pub async fn entries_list(
    app: tauri::AppHandle,
    api: tauri::State<'_, ApiClient>,
    store: tauri::State<'_, EntryStore>,
) -> Result<Vec<Entry>, String> {
    let _busy = store.begin_busy();
    refresh_list(&api, &store).await.map_err(|e| {
        error!("Failed to load entries: {}", e);
        emit_error(&app, &e.to_string());
        e.to_string()
    })
}

/// The cached list as of the last refresh, for re-renders that should
/// not hit the backend.
#[tauri::command]
pub fn entries_cached(store: tauri::State<'_, EntryStore>) -> Vec<Entry> {
    store.entries()
}

#[tauri::command]
pub async fn entry_get(
    api: tauri::State<'_, ApiClient>,
    id: String,
) -> Result<Entry, String> {
    api.get_entry(&id).await.map_err(|e| e.to_string())
}

/// Submit the current draft. On success the draft is destroyed, the list
/// re-fetched (backend-assigned id/timestamp, never speculative values)
/// and the compose view closed. On failure the draft is left untouched.
#[tauri::command]
pub async fn entry_create(
    app: tauri::AppHandle,
    api: tauri::State<'_, ApiClient>,
    store: tauri::State<'_, EntryStore>,
    composer: tauri::State<'_, Composer>,
    recorder: tauri::State<'_, Recorder>,
    view: tauri::State<'_, ViewState>,
) -> Result<Vec<Entry>, String> {
    require_not_recording(&recorder).map_err(|e| e.to_string())?;

    let _busy = store.begin_busy();
    let payload = composer.to_payload();
    let title = payload.title.clone();

    api.create_entry(payload).await.map_err(|e| {
        error!("Failed to create entry: {}", e);
        emit_error(&app, &e.to_string());
        e.to_string()
    })?;
    info!(%title, "Entry created");

    composer.reset();
    recorder.reset();
    view.enter(ViewMode::List);
    let _ = emit_event(&app, event_names::VIEW_CHANGED, ViewMode::List);

    let entries = refresh_list(&api, &store).await.map_err(|e| e.to_string())?;
    let _ = emit_event(&app, event_names::ENTRIES_REFRESHED, entries.clone());
    Ok(entries)
}

/// Delete one entry, then re-list. `confirmed` must be true; the webview
/// asks the user first and an unconfirmed call issues no request at all.
#[tauri::command]
pub async fn entry_delete(
    app: tauri::AppHandle,
    api: tauri::State<'_, ApiClient>,
    store: tauri::State<'_, EntryStore>,
    id: String,
    confirmed: bool,
) -> Result<Vec<Entry>, String> {
    require_confirmation(confirmed).map_err(|e| e.to_string())?;

    let _busy = store.begin_busy();
    api.delete_entry(&id).await.map_err(|e| {
        error!(%id, "Failed to delete entry: {}", e);
        emit_error(&app, &e.to_string());
        e.to_string()
    })?;
    info!(%id, "Entry deleted");

    let entries = refresh_list(&api, &store).await.map_err(|e| e.to_string())?;
    let _ = emit_event(&app, event_names::ENTRIES_REFRESHED, entries.clone());
    Ok(entries)
}

/// Resolve an entry's media path against the backend origin for display.
#[tauri::command]
pub fn entry_media_url(api: tauri::State<'_, ApiClient>, path: String) -> String {
    api.media_url(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfirmed_delete_is_rejected() {
        let result = require_confirmation(false);
        assert!(matches!(result, Err(ClientError::NotConfirmed)));
    }

    #[test]
    fn confirmed_delete_passes_the_guard() {
        assert!(require_confirmation(true).is_ok());
    }

    #[test]
    fn submit_blocked_while_recording() {
        use crate::recorder::RecorderEvent;
        let recorder = Recorder::new();
        recorder.apply(RecorderEvent::StartRequested).unwrap();
        recorder.apply(RecorderEvent::PermissionGranted).unwrap();
        let result = require_not_recording(&recorder);
        assert!(matches!(result, Err(ClientError::RecordingInProgress)));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Stop the current recording before saving the entry"
        );
    }

    #[test]
    fn submit_allowed_when_idle_or_stopped() {
        use crate::recorder::RecorderEvent;
        let recorder = Recorder::new();
        assert!(require_not_recording(&recorder).is_ok());
        recorder.apply(RecorderEvent::StartRequested).unwrap();
        recorder.apply(RecorderEvent::PermissionGranted).unwrap();
        recorder.apply(RecorderEvent::StopRequested).unwrap();
        assert!(require_not_recording(&recorder).is_ok());
    }
}
