use thiserror::Error;

/// Failure conditions surfaced to the webview. Every variant maps to a
/// user-visible notification; none are retried automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Microphone access denied")]
    PermissionDenied,

    #[error("Recording device error: {0}")]
    Device(String),

    #[error("A recording session is already open")]
    RecorderBusy,

    #[error("Stop the current recording before saving the entry")]
    RecordingInProgress,

    #[error("Deletion requires confirmation")]
    NotConfirmed,

    #[error("Backend request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned {status}: {detail}")]
    Backend { status: u16, detail: String },

    #[error("Could not read media file: {0}")]
    Io(#[from] std::io::Error),
}
