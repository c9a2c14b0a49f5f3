use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

use crate::types::entry::Entry;
use crate::types::query::{MediaRef, QueryResponse};

/// Result-count ceiling sent with every semantic query.
pub const QUERY_LIMIT: u32 = 20;

/// One resolved semantic query: the ranked entries exactly as received,
/// the backend's own count, and the optional synthesized summary.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub summary: Option<String>,
    pub entries: Vec<Entry>,
    pub media: Vec<MediaRef>,
    pub count: u64,
}

impl SearchOutcome {
    pub fn from_response(query: &str, response: QueryResponse) -> Self {
        Self {
            query: query.to_string(),
            summary: response.summary,
            entries: response.relevant_entries,
            media: response.media,
            count: response.count,
        }
    }
}

/// Holds the current search result and sequences overlapping searches.
/// Each search takes a monotonic ticket; a response is stored only while
/// its ticket is still the newest issued, so a slow early response can
/// never clobber a later one.
pub struct SearchState {
    next_ticket: AtomicU64,
    latest: AtomicU64,
    result: Mutex<Option<SearchOutcome>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            next_ticket: AtomicU64::new(1),
            latest: AtomicU64::new(0),
            result: Mutex::new(None),
        }
    }

    /// Register a new in-flight search and supersede all earlier ones.
    pub fn begin(&self) -> u64 {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst);
        self.latest.store(ticket, Ordering::SeqCst);
        ticket
    }

    /// Store the outcome if `ticket` has not been superseded. Returns
    /// whether the result was kept; stale outcomes are discarded and the
    /// existing result stands.
    pub fn complete(&self, ticket: u64, outcome: SearchOutcome) -> bool {
        if ticket != self.latest.load(Ordering::SeqCst) {
            debug!(ticket, "Discarding superseded search response");
            return false;
        }
        *self.result.lock().unwrap_or_else(|e| e.into_inner()) = Some(outcome);
        true
    }

    pub fn current(&self) -> Option<SearchOutcome> {
        self.result
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Clear the result set, e.g. when the search view closes.
    pub fn clear(&self) {
        *self.result.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Empty or whitespace-only query text is silently skipped, not an error.
pub fn should_skip(query_text: &str) -> bool {
    query_text.trim().is_empty()
}
