use serde::Serialize;
use tracing::warn;

use crate::draft::Composer;
use crate::events::{emit_error, emit_event, event_names};
use crate::recorder::{Recorder, RecorderEvent, RecorderState};

#[derive(Debug, Clone, Serialize)]
pub struct RecorderStatus {
    pub state: RecorderState,
    pub has_clip: bool,
}

fn status(recorder: &Recorder, has_clip: bool) -> RecorderStatus {
    RecorderStatus {
        state: recorder.state(),
        has_clip,
    }
}

fn emit_state(app: &tauri::AppHandle, recorder: &Recorder) {
    let _ = emit_event(app, event_names::RECORDER_STATE, recorder.state());
}

/// Begin a capture session. The webview requests the actual device and
/// reports the outcome via `recorder_permission` / `recorder_device_error`.
#[tauri::command]
pub fn recorder_start(
    app: tauri::AppHandle,
    recorder: tauri::State<'_, Recorder>,
) -> Result<RecorderStatus, String> {
    recorder
        .apply(RecorderEvent::StartRequested)
        .map_err(|e| e.to_string())?;
    emit_state(&app, &recorder);
    Ok(status(&recorder, false))
}

/// Resolution of the microphone permission request. Denial surfaces the
/// permission error and leaves the session idle; nothing is retried.
#[tauri::command]
pub fn recorder_permission(
    app: tauri::AppHandle,
    recorder: tauri::State<'_, Recorder>,
    granted: bool,
) -> Result<RecorderStatus, String> {
    let event = if granted {
        RecorderEvent::PermissionGranted
    } else {
        RecorderEvent::PermissionDenied
    };
    let result = recorder.apply(event);
    emit_state(&app, &recorder);
    result.map_err(|e| {
        warn!("Microphone permission denied");
        let message = e.to_string();
        emit_error(&app, &message);
        message
    })?;
    Ok(status(&recorder, false))
}

/// Recording hardware failed mid-session.
#[tauri::command]
pub fn recorder_device_error(
    app: tauri::AppHandle,
    recorder: tauri::State<'_, Recorder>,
    detail: String,
) -> Result<RecorderStatus, String> {
    let result = recorder.apply(RecorderEvent::DeviceFailed(detail));
    emit_state(&app, &recorder);
    result.map_err(|e| {
        let message = e.to_string();
        emit_error(&app, &message);
        message
    })?;
    Ok(status(&recorder, false))
}

/// One buffered audio chunk from the webview's MediaRecorder, in arrival
/// order. Chunks outside an open session are dropped.
#[tauri::command]
pub fn recorder_chunk(recorder: tauri::State<'_, Recorder>, data: Vec<u8>) -> Result<(), String> {
    recorder
        .apply(RecorderEvent::ChunkArrived(data))
        .map_err(|e| e.to_string())?;
    Ok(())
}

/// Stop the session and attach the finished clip to the draft. Calling
/// this with no open recording is a no-op.
#[tauri::command]
pub fn recorder_stop(
    app: tauri::AppHandle,
    recorder: tauri::State<'_, Recorder>,
    composer: tauri::State<'_, Composer>,
) -> Result<RecorderStatus, String> {
    let clip = recorder
        .apply(RecorderEvent::StopRequested)
        .map_err(|e| e.to_string())?;
    emit_state(&app, &recorder);
    let has_clip = clip.is_some();
    if let Some(clip) = clip {
        composer.attach_audio(clip);
    }
    Ok(status(&recorder, has_clip))
}

#[tauri::command]
pub fn recorder_state(recorder: tauri::State<'_, Recorder>) -> RecorderState {
    recorder.state()
}
