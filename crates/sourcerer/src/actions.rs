use serde::{Deserialize, Serialize};
use shared::{
    domain::{DataViewId, ScopeId},
    error::ToolError,
};

use crate::model::{DataView, ScopeEntry};

fn default_should_validate() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDataViewPayload {
    pub id: ScopeId,
    pub selected_data_view_id: DataViewId,
    #[serde(default)]
    pub selected_patterns: Vec<String>,
    #[serde(default = "default_should_validate")]
    pub should_validate_selected_patterns: bool,
}

impl SelectedDataViewPayload {
    pub fn new(
        id: ScopeId,
        selected_data_view_id: impl Into<DataViewId>,
        selected_patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id,
            selected_data_view_id: selected_data_view_id.into(),
            selected_patterns: selected_patterns.into_iter().map(Into::into).collect(),
            should_validate_selected_patterns: true,
        }
    }

    pub fn without_validation(mut self) -> Self {
        self.should_validate_selected_patterns = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SourcererAction {
    SetSignalIndexName {
        signal_index_name: String,
    },
    SetSourcererScopeLoading {
        id: ScopeId,
        loading: bool,
    },
    SetSelectedDataView(SelectedDataViewPayload),
    SetSource {
        id: ScopeId,
        payload: ScopeEntry,
    },
    SetSourcererDataViews {
        default_data_view: DataView,
        kibana_data_views: Vec<DataView>,
    },
    SetDataView(DataView),
}

impl SourcererAction {
    pub fn name(&self) -> &'static str {
        match self {
            SourcererAction::SetSignalIndexName { .. } => "set_signal_index_name",
            SourcererAction::SetSourcererScopeLoading { .. } => "set_sourcerer_scope_loading",
            SourcererAction::SetSelectedDataView(_) => "set_selected_data_view",
            SourcererAction::SetSource { .. } => "set_source",
            SourcererAction::SetSourcererDataViews { .. } => "set_sourcerer_data_views",
            SourcererAction::SetDataView(_) => "set_data_view",
        }
    }
}

/// Parses a JSON array of actions, as written by `scope-tools sourcerer replay`.
pub fn parse_actions(raw: &str) -> Result<Vec<SourcererAction>, ToolError> {
    Ok(serde_json::from_str(raw)?)
}
