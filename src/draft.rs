use std::sync::Mutex;

use serde::Serialize;

use crate::types::entry::{MediaBlob, NewEntryPayload};

/// Title used when the user saves an entry without typing one.
pub const UNTITLED: &str = "Untitled";

/// The in-progress, unsaved entry. Exists only while the compose view is
/// open; every field is free-form until submission.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DraftEntry {
    pub title: String,
    pub text: String,
    /// Raw comma-separated string; the backend splits it.
    pub tags: String,
    pub image: Option<MediaBlob>,
    pub audio: Option<MediaBlob>,
}

impl DraftEntry {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.text.is_empty()
            && self.tags.is_empty()
            && self.image.is_none()
            && self.audio.is_none()
    }

    /// Assemble the submission payload. Empty fields are omitted rather
    /// than sent as empty values; a blank title falls back to "Untitled".
    pub fn to_payload(&self) -> NewEntryPayload {
        let title = if self.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            self.title.clone()
        };
        NewEntryPayload {
            title,
            text: non_empty(&self.text),
            tags: non_empty(&self.tags),
            audio: self.audio.clone(),
            image: self.image.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = DraftEntry::default();
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Webview-facing snapshot of the draft; media blobs are reported as
/// presence flags, not payloads.
#[derive(Debug, Clone, Serialize)]
pub struct DraftSnapshot {
    pub title: String,
    pub text: String,
    pub tags: String,
    pub has_image: bool,
    pub has_audio: bool,
}

/// Shared draft state managed by the Tauri runtime.
pub struct Composer {
    draft: Mutex<DraftEntry>,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            draft: Mutex::new(DraftEntry::default()),
        }
    }

    pub fn set_title(&self, title: String) {
        self.lock().title = title;
    }

    pub fn set_text(&self, text: String) {
        self.lock().text = text;
    }

    pub fn set_tags(&self, tags: String) {
        self.lock().tags = tags;
    }

    pub fn set_image(&self, image: Option<MediaBlob>) {
        self.lock().image = image;
    }

    pub fn attach_audio(&self, audio: MediaBlob) {
        self.lock().audio = Some(audio);
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        let draft = self.lock();
        DraftSnapshot {
            title: draft.title.clone(),
            text: draft.text.clone(),
            tags: draft.tags.clone(),
            has_image: draft.image.is_some(),
            has_audio: draft.audio.is_some(),
        }
    }

    pub fn to_payload(&self) -> NewEntryPayload {
        self.lock().to_payload()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Destroy the draft: after a successful submission or on cancel.
    pub fn reset(&self) {
        self.lock().reset();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DraftEntry> {
        self.draft.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}
