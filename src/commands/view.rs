use crate::draft::Composer;
use crate::events::{emit_event, event_names};
use crate::recorder::Recorder;
use crate::search::SearchState;
use crate::view::{ViewMode, ViewState};

/// Teardown owed when a mode is exited: leaving compose discards the
/// draft and any open recording; leaving search drops the result set.
pub fn teardown_on_exit(
    previous: ViewMode,
    current: ViewMode,
    composer: &Composer,
    recorder: &Recorder,
    search: &SearchState,
) {
    if previous == current {
        return;
    }
    match previous {
        ViewMode::Compose => {
            composer.reset();
            recorder.reset();
        }
        ViewMode::Search => search.clear(),
        ViewMode::List => {}
    }
}

#[tauri::command]
pub fn view_enter(
    app: tauri::AppHandle,
    view: tauri::State<'_, ViewState>,
    composer: tauri::State<'_, Composer>,
    recorder: tauri::State<'_, Recorder>,
    search: tauri::State<'_, SearchState>,
    mode: ViewMode,
) -> ViewMode {
    let (previous, current) = view.enter(mode);
    teardown_on_exit(previous, current, &composer, &recorder, &search);
    let _ = emit_event(&app, event_names::VIEW_CHANGED, current);
    current
}

/// Nav-button behavior: toggling the active mode returns to the list.
#[tauri::command]
pub fn view_toggle(
    app: tauri::AppHandle,
    view: tauri::State<'_, ViewState>,
    composer: tauri::State<'_, Composer>,
    recorder: tauri::State<'_, Recorder>,
    search: tauri::State<'_, SearchState>,
    mode: ViewMode,
) -> ViewMode {
    let (previous, current) = view.toggle(mode);
    teardown_on_exit(previous, current, &composer, &recorder, &search);
    let _ = emit_event(&app, event_names::VIEW_CHANGED, current);
    current
}

#[tauri::command]
pub fn view_mode(view: tauri::State<'_, ViewState>) -> ViewMode {
    view.mode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderEvent;
    use crate::search::SearchOutcome;

    fn states() -> (ViewState, Composer, Recorder, SearchState) {
        (
            ViewState::new(),
            Composer::new(),
            Recorder::new(),
            SearchState::new(),
        )
    }

    #[test]
    fn leaving_compose_discards_draft_and_recording() {
        let (view, composer, recorder, search) = states();
        view.enter(ViewMode::Compose);
        composer.set_title("half-written".to_string());
        recorder.apply(RecorderEvent::StartRequested).unwrap();
        recorder.apply(RecorderEvent::PermissionGranted).unwrap();

        let (previous, current) = view.enter(ViewMode::List);
        teardown_on_exit(previous, current, &composer, &recorder, &search);

        assert!(composer.is_empty());
        assert!(!recorder.is_recording());
    }

    #[test]
    fn opening_compose_clears_search_results() {
        let (view, composer, recorder, search) = states();
        view.enter(ViewMode::Search);
        let ticket = search.begin();
        search.complete(
            ticket,
            SearchOutcome {
                query: "q".to_string(),
                summary: None,
                entries: Vec::new(),
                media: Vec::new(),
                count: 0,
            },
        );

        let (previous, current) = view.enter(ViewMode::Compose);
        teardown_on_exit(previous, current, &composer, &recorder, &search);

        assert_eq!(view.mode(), ViewMode::Compose);
        assert!(search.current().is_none());
    }

    #[test]
    fn reentering_same_mode_keeps_state() {
        let (view, composer, recorder, search) = states();
        view.enter(ViewMode::Compose);
        composer.set_title("keep me".to_string());

        let (previous, current) = view.enter(ViewMode::Compose);
        teardown_on_exit(previous, current, &composer, &recorder, &search);

        assert!(!composer.is_empty());
    }
}
