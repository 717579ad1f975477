//! Pure state transitions for the scope store.

use shared::domain::ScopeId;

use crate::{
    actions::SourcererAction,
    helpers::validate_selected_patterns,
    model::{DataView, ScopeEntry, SourcererState},
};

/// Applies one action and returns the next state. `state` is never modified.
pub fn reduce(state: &SourcererState, action: SourcererAction) -> SourcererState {
    let mut next = state.clone();

    match action {
        SourcererAction::SetSignalIndexName { signal_index_name } => {
            next.signal_index_name = Some(signal_index_name);
        }
        SourcererAction::SetSourcererScopeLoading { id, loading } => {
            merge_scope(&mut next, id, ScopeEntry::loading(loading));
        }
        SourcererAction::SetSelectedDataView(payload) => {
            for (id, patch) in validate_selected_patterns(state, &payload) {
                merge_scope(&mut next, id, patch);
            }
        }
        SourcererAction::SetSource { id, payload } => {
            merge_scope(&mut next, id, payload);
        }
        SourcererAction::SetSourcererDataViews {
            default_data_view,
            kibana_data_views,
        } => {
            next.default_data_view = default_data_view;
            next.kibana_data_views = kibana_data_views;
        }
        SourcererAction::SetDataView(data_view) => {
            upsert_data_view(&mut next, data_view);
        }
    }

    next
}

// Absent ids get an entry holding only the patch fields.
fn merge_scope(state: &mut SourcererState, id: ScopeId, patch: ScopeEntry) {
    state.sourcerer_scopes.entry(id).or_default().merge(patch);
}

fn upsert_data_view(state: &mut SourcererState, data_view: DataView) {
    if state.default_data_view.id == data_view.id {
        state.default_data_view = data_view.clone();
    }
    match state
        .kibana_data_views
        .iter_mut()
        .find(|existing| existing.id == data_view.id)
    {
        Some(existing) => *existing = data_view,
        None => state.kibana_data_views.push(data_view),
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
