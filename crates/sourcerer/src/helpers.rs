//! Derives per-scope patches from a raw data view selection.

use std::collections::BTreeMap;

use shared::domain::ScopeId;

use crate::{
    actions::SelectedDataViewPayload,
    model::{default_pattern_selection, ensure_pattern_format, ScopeEntry, SourcererState},
};

/// Computes the patches a `SetSelectedDataView` action applies. Never fails:
/// unknown data views fall back to the default one and invalid patterns are
/// dropped rather than rejected.
pub fn validate_selected_patterns(
    state: &SourcererState,
    payload: &SelectedDataViewPayload,
) -> BTreeMap<ScopeId, ScopeEntry> {
    let data_view = state
        .data_view(&payload.selected_data_view_id)
        .unwrap_or(&state.default_data_view);
    let is_default_view = data_view.id == state.default_data_view.id;
    let requested = ensure_pattern_format(&payload.selected_patterns);

    let (mut selected, missing) = if payload.should_validate_selected_patterns {
        let (valid, invalid): (Vec<String>, Vec<String>) = requested
            .into_iter()
            .partition(|pattern| data_view.contains_pattern(pattern));
        let missing = if is_default_view { invalid } else { Vec::new() };
        (valid, missing)
    } else {
        (requested, Vec::new())
    };

    if selected.is_empty() {
        selected = default_pattern_selection(
            &payload.id,
            data_view,
            state.signal_index_name.as_deref(),
        );
    }

    if !missing.is_empty() {
        tracing::debug!(
            scope = %payload.id,
            data_view = %data_view.id,
            missing = ?missing,
            "selected patterns are not part of the data view"
        );
    }

    let patch = ScopeEntry {
        id: Some(payload.id.clone()),
        loading: Some(false),
        selected_data_view_id: Some(data_view.id.clone()),
        selected_patterns: Some(selected),
        missing_patterns: Some(missing),
    };

    BTreeMap::from([(payload.id.clone(), patch)])
}
