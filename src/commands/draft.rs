use tracing::debug;

use crate::draft::{Composer, DraftSnapshot};
use crate::error::ClientError;
use crate::recorder::Recorder;
use crate::types::entry::MediaBlob;

/// Guess the upload mime type from the selected file's extension. The
/// backend only uses it for serving the file back, so a coarse mapping
/// is enough.
pub fn mime_for_path(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

fn file_name_of(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

#[tauri::command]
pub fn draft_set_title(composer: tauri::State<'_, Composer>, title: String) {
    composer.set_title(title);
}

#[tauri::command]
pub fn draft_set_text(composer: tauri::State<'_, Composer>, text: String) {
    composer.set_text(text);
}

#[tauri::command]
pub fn draft_set_tags(composer: tauri::State<'_, Composer>, tags: String) {
    composer.set_tags(tags);
}

/// Attach the selected image file to the draft.
#[tauri::command]
pub fn draft_attach_image(
    composer: tauri::State<'_, Composer>,
    path: String,
) -> Result<DraftSnapshot, String> {
    let data = std::fs::read(&path).map_err(|e| ClientError::Io(e).to_string())?;
    debug!(%path, bytes = data.len(), "Image attached to draft");
    composer.set_image(Some(MediaBlob::new(
        &file_name_of(&path),
        mime_for_path(&path),
        data,
    )));
    Ok(composer.snapshot())
}

#[tauri::command]
pub fn draft_clear_image(composer: tauri::State<'_, Composer>) -> DraftSnapshot {
    composer.set_image(None);
    composer.snapshot()
}

#[tauri::command]
pub fn draft_snapshot(composer: tauri::State<'_, Composer>) -> DraftSnapshot {
    composer.snapshot()
}

/// Cancel composing: destroy the draft and any open recording session.
#[tauri::command]
pub fn draft_cancel(
    composer: tauri::State<'_, Composer>,
    recorder: tauri::State<'_, Recorder>,
) {
    composer.reset();
    recorder.reset();
}
