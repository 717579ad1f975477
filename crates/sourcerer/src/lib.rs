//! Scope ("sourcerer") state store: which data view and index patterns each
//! security view is looking at.

pub mod actions;
pub mod helpers;
pub mod model;
pub mod reducer;
pub mod store;

pub use actions::{parse_actions, SelectedDataViewPayload, SourcererAction};
pub use model::{DataView, ScopeEntry, SourcererState};
pub use reducer::reduce;
pub use store::SourcererStore;

/// Folds `actions` over `initial` in order.
pub fn replay(
    initial: SourcererState,
    actions: impl IntoIterator<Item = SourcererAction>,
) -> SourcererState {
    actions
        .into_iter()
        .fold(initial, |state, action| reduce(&state, action))
}
