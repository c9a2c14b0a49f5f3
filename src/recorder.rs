use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::types::entry::MediaBlob;

pub const AUDIO_MIME: &str = "audio/webm";
pub const AUDIO_FILE_NAME: &str = "recording.webm";

/// Lifecycle of one microphone capture, from permission request to
/// finalized clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecorderState {
    Idle,
    AwaitingPermission,
    Recording,
    Stopped,
}

/// Everything that can happen to a recording session. The webview owns
/// the actual device (getUserMedia / MediaRecorder) and reports its
/// callbacks here as events, so transitions stay enumerable and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    StartRequested,
    PermissionGranted,
    PermissionDenied,
    DeviceFailed(String),
    ChunkArrived(Vec<u8>),
    StopRequested,
}

struct Session {
    state: RecorderState,
    chunks: Vec<Vec<u8>>,
}

/// State machine for the one exclusively-owned resource in the client:
/// the microphone session. At most one session is open at a time.
pub struct Recorder {
    session: Mutex<Session>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(Session {
                state: RecorderState::Idle,
                chunks: Vec::new(),
            }),
        }
    }

    pub fn state(&self) -> RecorderState {
        self.session.lock().unwrap_or_else(|e| e.into_inner()).state
    }

    pub fn is_recording(&self) -> bool {
        self.state() == RecorderState::Recording
    }

    /// Apply one event. Returns the finished clip when the event closes a
    /// recording; capture failures come back as errors for the caller to
    /// surface (never retried here).
    pub fn apply(&self, event: RecorderEvent) -> Result<Option<MediaBlob>, ClientError> {
        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        match event {
            RecorderEvent::StartRequested => match session.state {
                RecorderState::Idle | RecorderState::Stopped => {
                    session.state = RecorderState::AwaitingPermission;
                    session.chunks.clear();
                    debug!("Recording requested, awaiting microphone permission");
                    Ok(None)
                }
                // A session is already open; the UI must stop it first.
                _ => Err(ClientError::RecorderBusy),
            },
            RecorderEvent::PermissionGranted => {
                if session.state == RecorderState::AwaitingPermission {
                    session.state = RecorderState::Recording;
                    debug!("Microphone permission granted, recording");
                } else {
                    warn!(state = ?session.state, "Ignoring permission grant");
                }
                Ok(None)
            }
            RecorderEvent::PermissionDenied => {
                if session.state == RecorderState::AwaitingPermission {
                    session.state = RecorderState::Idle;
                    return Err(ClientError::PermissionDenied);
                }
                Ok(None)
            }
            RecorderEvent::DeviceFailed(detail) => match session.state {
                RecorderState::AwaitingPermission | RecorderState::Recording => {
                    // Device handle is released regardless of how far the
                    // session got.
                    session.state = RecorderState::Idle;
                    session.chunks.clear();
                    Err(ClientError::Device(detail))
                }
                _ => Ok(None),
            },
            RecorderEvent::ChunkArrived(data) => {
                if session.state == RecorderState::Recording {
                    session.chunks.push(data);
                } else {
                    // Late chunk after stop or device loss; drop it.
                    debug!(state = ?session.state, "Dropping out-of-session audio chunk");
                }
                Ok(None)
            }
            RecorderEvent::StopRequested => match session.state {
                RecorderState::Recording => {
                    // Release the session before finalizing so the device
                    // slot frees even if the caller drops the clip.
                    session.state = RecorderState::Stopped;
                    let chunks = std::mem::take(&mut session.chunks);
                    let data: Vec<u8> = chunks.into_iter().flatten().collect();
                    debug!(bytes = data.len(), "Recording finalized");
                    Ok(Some(MediaBlob::new(AUDIO_FILE_NAME, AUDIO_MIME, data)))
                }
                RecorderState::AwaitingPermission => {
                    // Cancel the pending request.
                    session.state = RecorderState::Idle;
                    Ok(None)
                }
                // Stop without an open recording is an idempotent no-op.
                _ => Ok(None),
            },
        }
    }

    /// Teardown implies stop: discard any open session and its buffer.
    pub fn reset(&self) {
        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        session.state = RecorderState::Idle;
        session.chunks.clear();
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        // Component teardown mid-recording must not leak the session.
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_recorder() -> Recorder {
        let rec = Recorder::new();
        rec.apply(RecorderEvent::StartRequested).unwrap();
        rec.apply(RecorderEvent::PermissionGranted).unwrap();
        rec
    }

    #[test]
    fn new_recorder_starts_idle() {
        assert_eq!(Recorder::new().state(), RecorderState::Idle);
    }

    #[test]
    fn start_moves_to_awaiting_permission() {
        let rec = Recorder::new();
        rec.apply(RecorderEvent::StartRequested).unwrap();
        assert_eq!(rec.state(), RecorderState::AwaitingPermission);
    }

    #[test]
    fn grant_moves_to_recording() {
        let rec = recording_recorder();
        assert_eq!(rec.state(), RecorderState::Recording);
        assert!(rec.is_recording());
    }

    #[test]
    fn denial_returns_to_idle_with_error() {
        let rec = Recorder::new();
        rec.apply(RecorderEvent::StartRequested).unwrap();
        let result = rec.apply(RecorderEvent::PermissionDenied);
        assert!(matches!(result, Err(ClientError::PermissionDenied)));
        assert_eq!(rec.state(), RecorderState::Idle);
    }

    #[test]
    fn start_while_open_is_rejected() {
        let rec = recording_recorder();
        let result = rec.apply(RecorderEvent::StartRequested);
        assert!(matches!(result, Err(ClientError::RecorderBusy)));
        // The open session is untouched.
        assert_eq!(rec.state(), RecorderState::Recording);
    }

    #[test]
    fn stop_without_start_is_a_noop() {
        let rec = Recorder::new();
        let clip = rec.apply(RecorderEvent::StopRequested).unwrap();
        assert!(clip.is_none());
        assert_eq!(rec.state(), RecorderState::Idle);
    }

    #[test]
    fn stop_concatenates_chunks_in_arrival_order() {
        let rec = recording_recorder();
        rec.apply(RecorderEvent::ChunkArrived(vec![1, 2])).unwrap();
        rec.apply(RecorderEvent::ChunkArrived(vec![3])).unwrap();
        rec.apply(RecorderEvent::ChunkArrived(vec![4, 5])).unwrap();
        let clip = rec.apply(RecorderEvent::StopRequested).unwrap().unwrap();
        assert_eq!(clip.data, vec![1, 2, 3, 4, 5]);
        assert_eq!(clip.mime_type, AUDIO_MIME);
        assert_eq!(rec.state(), RecorderState::Stopped);
    }

    #[test]
    fn chunks_outside_recording_are_dropped() {
        let rec = Recorder::new();
        rec.apply(RecorderEvent::ChunkArrived(vec![9])).unwrap();
        rec.apply(RecorderEvent::StartRequested).unwrap();
        rec.apply(RecorderEvent::ChunkArrived(vec![9])).unwrap();
        rec.apply(RecorderEvent::PermissionGranted).unwrap();
        rec.apply(RecorderEvent::ChunkArrived(vec![1])).unwrap();
        let clip = rec.apply(RecorderEvent::StopRequested).unwrap().unwrap();
        assert_eq!(clip.data, vec![1]);
    }

    #[test]
    fn device_failure_releases_session() {
        let rec = recording_recorder();
        rec.apply(RecorderEvent::ChunkArrived(vec![1])).unwrap();
        let result = rec.apply(RecorderEvent::DeviceFailed("input lost".into()));
        assert!(matches!(result, Err(ClientError::Device(_))));
        assert_eq!(rec.state(), RecorderState::Idle);
        // A new session can open afterwards.
        rec.apply(RecorderEvent::StartRequested).unwrap();
        assert_eq!(rec.state(), RecorderState::AwaitingPermission);
    }

    #[test]
    fn stop_while_awaiting_permission_cancels() {
        let rec = Recorder::new();
        rec.apply(RecorderEvent::StartRequested).unwrap();
        let clip = rec.apply(RecorderEvent::StopRequested).unwrap();
        assert!(clip.is_none());
        assert_eq!(rec.state(), RecorderState::Idle);
    }

    #[test]
    fn restart_after_stop_clears_previous_buffer() {
        let rec = recording_recorder();
        rec.apply(RecorderEvent::ChunkArrived(vec![1])).unwrap();
        rec.apply(RecorderEvent::StopRequested).unwrap();
        rec.apply(RecorderEvent::StartRequested).unwrap();
        rec.apply(RecorderEvent::PermissionGranted).unwrap();
        rec.apply(RecorderEvent::ChunkArrived(vec![7])).unwrap();
        let clip = rec.apply(RecorderEvent::StopRequested).unwrap().unwrap();
        assert_eq!(clip.data, vec![7]);
    }

    #[test]
    fn reset_discards_open_session() {
        let rec = recording_recorder();
        rec.apply(RecorderEvent::ChunkArrived(vec![1])).unwrap();
        rec.reset();
        assert_eq!(rec.state(), RecorderState::Idle);
        let clip = rec.apply(RecorderEvent::StopRequested).unwrap();
        assert!(clip.is_none());
    }
}
