use shared::domain::{DataViewId, ScopeId};
use sourcerer::{parse_actions, replay, DataView, SourcererState};

fn initial() -> SourcererState {
    SourcererState::initial(
        DataView::from_title(
            "security-solution",
            "auditbeat-*,logs-*,.alerts-security.alerts-default",
        ),
        None,
    )
}

#[test]
fn replaying_a_recorded_session_yields_expected_state() {
    let actions = parse_actions(
        r#"[
            {"type": "set_signal_index_name", "payload": {"signal_index_name": ".alerts-security.alerts-default"}},
            {"type": "set_data_view", "payload": {"id": "winlogbeat", "title": "winlogbeat-*", "pattern_list": ["winlogbeat-*"]}},
            {"type": "set_sourcerer_scope_loading", "payload": {"id": "timeline", "loading": true}},
            {"type": "set_selected_data_view", "payload": {"id": "timeline", "selected_data_view_id": "winlogbeat", "selected_patterns": ["winlogbeat-*"]}},
            {"type": "set_source", "payload": {"id": "default", "payload": {"selected_patterns": ["logs-*"]}}}
        ]"#,
    )
    .expect("parse actions");

    let state = replay(initial(), actions);

    assert_eq!(
        state.signal_index_name.as_deref(),
        Some(".alerts-security.alerts-default")
    );
    let timeline = state.scope(&ScopeId::timeline()).expect("timeline");
    assert!(!timeline.is_loading());
    assert_eq!(
        timeline.selected_data_view_id,
        Some(DataViewId::from("winlogbeat"))
    );
    assert_eq!(timeline.selected_patterns(), ["winlogbeat-*"]);

    let default_scope = state.scope(&ScopeId::default_scope()).expect("default");
    assert_eq!(default_scope.selected_patterns(), ["logs-*"]);
    assert_eq!(state.kibana_data_views.len(), 2);
}

#[test]
fn replay_output_round_trips_through_json() {
    let state = replay(initial(), Vec::new());
    let json = serde_json::to_string(&state).expect("serialize");
    let back: SourcererState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, state);
}
