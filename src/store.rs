use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::types::entry::Entry;

/// Authoritative client-side entry list plus the shared busy flag that
/// gates rendering while any backend call is in flight.
pub struct EntryStore {
    entries: Mutex<Vec<Entry>>,
    busy: Arc<AtomicBool>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replace the cached list wholesale with what the backend returned.
    /// No diffing, no re-sorting: backend order is display order.
    pub fn replace(&self, entries: Vec<Entry>) {
        *self.entries.lock().unwrap_or_else(|e| e.into_inner()) = entries;
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Raise the busy flag for the duration of one backend round-trip.
    /// The returned guard clears it on drop, on success and failure alike.
    pub fn begin_busy(&self) -> BusyGuard {
        self.busy.store(true, Ordering::SeqCst);
        BusyGuard {
            busy: Arc::clone(&self.busy),
        }
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> Entry {
        Entry {
            id: id.to_string(),
            title: format!("Entry {}", id),
            text: None,
            audio_path: None,
            image_path: None,
            tags: Vec::new(),
            timestamp: "2024-01-01T00:00:00".to_string(),
            similarity_score: None,
        }
    }

    #[test]
    fn replace_is_wholesale() {
        let store = EntryStore::new();
        store.replace(vec![entry("1"), entry("2")]);
        assert_eq!(store.entries().len(), 2);
        store.replace(vec![entry("3")]);
        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "3");
        assert!(!entries.iter().any(|e| e.id == "1"));
    }

    #[test]
    fn backend_order_is_preserved() {
        let store = EntryStore::new();
        store.replace(vec![entry("b"), entry("a"), entry("c")]);
        let ids: Vec<_> = store.entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn busy_guard_clears_on_drop() {
        let store = EntryStore::new();
        assert!(!store.is_busy());
        {
            let _guard = store.begin_busy();
            assert!(store.is_busy());
        }
        assert!(!store.is_busy());
    }

    #[test]
    fn busy_guard_clears_on_early_return() {
        let store = EntryStore::new();
        let failing = || -> Result<(), String> {
            let _guard = store.begin_busy();
            Err("network down".to_string())
        };
        assert!(failing().is_err());
        assert!(!store.is_busy());
    }
}
