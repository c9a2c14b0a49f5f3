use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// Body of `POST /api/query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub text: String,
    pub limit: u32,
}

/// A media reference the backend attaches to the top-ranked results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(rename = "type")]
    pub media_type: String,
    pub path: String,
    pub entry_id: String,
}

/// Response of `POST /api/query`. Parsed permissively: the backend may
/// omit the summary, the entry list, or the media list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub relevant_entries: Vec<Entry>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    /// Trusted as reported; never recomputed from `relevant_entries`.
    #[serde(default)]
    pub count: u64,
}
