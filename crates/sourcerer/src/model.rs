//! Scope state shape: data view catalogue, per-scope selection entries and the
//! global signal index name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::domain::{DataViewId, ScopeId, ScopeKind};

/// Pattern lists are normalised on construction, including when a data view
/// is deserialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireDataView")]
pub struct DataView {
    pub id: DataViewId,
    pub title: String,
    pub pattern_list: Vec<String>,
}

#[derive(Deserialize)]
struct WireDataView {
    id: DataViewId,
    title: String,
    #[serde(default)]
    pattern_list: Option<Vec<String>>,
}

impl From<WireDataView> for DataView {
    fn from(wire: WireDataView) -> Self {
        let pattern_list = match wire.pattern_list {
            Some(patterns) => ensure_pattern_format(patterns),
            None => ensure_pattern_format(wire.title.split(',')),
        };
        Self {
            id: wire.id,
            title: wire.title,
            pattern_list,
        }
    }
}

impl DataView {
    /// Builds a data view from its comma-joined title, normalising the pattern list.
    pub fn from_title(id: impl Into<DataViewId>, title: impl Into<String>) -> Self {
        let title = title.into();
        let pattern_list = ensure_pattern_format(title.split(','));
        Self {
            id: id.into(),
            title,
            pattern_list,
        }
    }

    pub fn contains_pattern(&self, pattern: &str) -> bool {
        self.pattern_list.iter().any(|p| p == pattern)
    }
}

/// One scope's selection. Every field is optional so an entry touched before
/// initialisation holds exactly the fields written to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ScopeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_data_view_id: Option<DataViewId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_patterns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_patterns: Option<Vec<String>>,
}

impl ScopeEntry {
    pub fn is_loading(&self) -> bool {
        self.loading.unwrap_or(false)
    }

    pub fn selected_patterns(&self) -> &[String] {
        self.selected_patterns.as_deref().unwrap_or_default()
    }

    pub fn missing_patterns(&self) -> &[String] {
        self.missing_patterns.as_deref().unwrap_or_default()
    }

    /// Shallow merge: every field present in `patch` replaces the current value.
    pub fn merge(&mut self, patch: ScopeEntry) {
        let ScopeEntry {
            id,
            loading,
            selected_data_view_id,
            selected_patterns,
            missing_patterns,
        } = patch;

        if id.is_some() {
            self.id = id;
        }
        if loading.is_some() {
            self.loading = loading;
        }
        if selected_data_view_id.is_some() {
            self.selected_data_view_id = selected_data_view_id;
        }
        if selected_patterns.is_some() {
            self.selected_patterns = selected_patterns;
        }
        if missing_patterns.is_some() {
            self.missing_patterns = missing_patterns;
        }
    }

    pub fn loading(loading: bool) -> Self {
        Self {
            loading: Some(loading),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcererState {
    pub default_data_view: DataView,
    #[serde(default)]
    pub kibana_data_views: Vec<DataView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_index_name: Option<String>,
    #[serde(default)]
    pub sourcerer_scopes: BTreeMap<ScopeId, ScopeEntry>,
}

impl SourcererState {
    /// Fresh store value with every well-known scope pointing at the default data view.
    pub fn initial(default_data_view: DataView, signal_index_name: Option<String>) -> Self {
        let sourcerer_scopes = ScopeId::well_known()
            .into_iter()
            .map(|id| {
                let selected = default_pattern_selection(
                    &id,
                    &default_data_view,
                    signal_index_name.as_deref(),
                );
                let entry = ScopeEntry {
                    id: Some(id.clone()),
                    loading: Some(false),
                    selected_data_view_id: Some(default_data_view.id.clone()),
                    selected_patterns: Some(selected),
                    missing_patterns: Some(Vec::new()),
                };
                (id, entry)
            })
            .collect();

        Self {
            kibana_data_views: vec![default_data_view.clone()],
            default_data_view,
            signal_index_name,
            sourcerer_scopes,
        }
    }

    pub fn scope(&self, id: &ScopeId) -> Option<&ScopeEntry> {
        self.sourcerer_scopes.get(id)
    }

    /// Looks a data view up in the catalogue, then the default slot.
    pub fn data_view(&self, id: &DataViewId) -> Option<&DataView> {
        self.kibana_data_views
            .iter()
            .find(|dv| &dv.id == id)
            .or_else(|| (&self.default_data_view.id == id).then_some(&self.default_data_view))
    }
}

/// Trims, drops empties, dedupes and sorts index patterns.
pub fn ensure_pattern_format<I, S>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = patterns
        .into_iter()
        .map(|p| p.as_ref().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

/// The selection a scope falls back to when nothing valid was requested.
pub fn default_pattern_selection(
    id: &ScopeId,
    data_view: &DataView,
    signal_index_name: Option<&str>,
) -> Vec<String> {
    match id.kind() {
        ScopeKind::Default => data_view
            .pattern_list
            .iter()
            .filter(|p| Some(p.as_str()) != signal_index_name)
            .cloned()
            .collect(),
        ScopeKind::Detections => signal_index_name
            .filter(|signal| data_view.contains_pattern(signal))
            .map(|signal| vec![signal.to_string()])
            .unwrap_or_default(),
        ScopeKind::Timeline | ScopeKind::Other => data_view.pattern_list.clone(),
    }
}
