use serde::{Deserialize, Serialize};

/// A persisted diary entry as returned by the backend. Field names follow
/// the backend's snake_case JSON contract. Immutable client-side except
/// for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio_path: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub timestamp: String,
    /// Present only when the entry came back as a search result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

/// An in-memory media attachment (recorded audio or a selected image)
/// waiting to be uploaded with a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaBlob {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl MediaBlob {
    pub fn new(file_name: &str, mime_type: &str, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            data,
        }
    }
}

/// The multipart form sent to `POST /api/entries`. Only `title` is always
/// present; every other field is omitted entirely when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntryPayload {
    pub title: String,
    pub text: Option<String>,
    /// Raw comma-separated tag string; splitting is the backend's job.
    pub tags: Option<String>,
    pub audio: Option<MediaBlob>,
    pub image: Option<MediaBlob>,
}
