pub mod api;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod events;
pub mod recorder;
pub mod search;
pub mod store;
pub mod types;
pub mod view;

use tracing_subscriber::EnvFilter;

/// Initialize structured logging with tracing.
/// Respects RUST_LOG env var; defaults to `info` level for semdiary crate.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("semdiary=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    // Load .env from the project root for SEMDIARY_API_URL overrides.
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let env_path = manifest_dir.join(".env");
    dotenvy::from_path(&env_path).ok();

    let client_config = config::ClientConfig::from_env();
    tracing::info!(base_url = %client_config.base_url, "Using diary backend");
    let probe_client = api::ApiClient::new(&client_config);

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_notification::init())
        .manage(api::ApiClient::new(&client_config))
        .manage(store::EntryStore::new())
        .manage(draft::Composer::new())
        .manage(recorder::Recorder::new())
        .manage(search::SearchState::new())
        .manage(view::ViewState::new())
        .setup(move |_app| {
            // Best-effort reachability log; the UI handles real failures
            // per call.
            tauri::async_runtime::spawn(async move {
                probe_client.probe_health().await;
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::entries::entries_list,
            commands::entries::entries_cached,
            commands::entries::entry_get,
            commands::entries::entry_create,
            commands::entries::entry_delete,
            commands::entries::entry_media_url,
            commands::draft::draft_set_title,
            commands::draft::draft_set_text,
            commands::draft::draft_set_tags,
            commands::draft::draft_attach_image,
            commands::draft::draft_clear_image,
            commands::draft::draft_snapshot,
            commands::draft::draft_cancel,
            commands::recorder::recorder_start,
            commands::recorder::recorder_permission,
            commands::recorder::recorder_device_error,
            commands::recorder::recorder_chunk,
            commands::recorder::recorder_stop,
            commands::recorder::recorder_state,
            commands::query::query_search,
            commands::query::query_current,
            commands::view::view_enter,
            commands::view::view_toggle,
            commands::view::view_mode,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
