mod common;

use audience_core::{CommandPayload, SegmentCatalog, WizardStep};

#[test]
fn fresh_session_selects_whole_catalog() {
    let session = common::new_session(1);
    let catalog = SegmentCatalog::builtin();
    assert_eq!(session.state().selection.selected().len(), catalog.len());
    assert_eq!(session.estimate().step, WizardStep::Details);
    assert!(session.estimate().breakdown.len() >= 1);
}

#[test]
fn fixture_config_is_loaded() {
    let config = common::test_config();
    assert_eq!(config.battleground.discount_min, 0.8);
    assert_eq!(config.battleground.discount_max, 0.8);
}

#[test]
fn estimate_serializes_to_json() {
    let mut session = common::new_session(3);
    let estimate = session.apply(CommandPayload::NextStep);
    let value = serde_json::to_value(&estimate).expect("estimate serializes");
    assert_eq!(value["step"], "segments");
    assert_eq!(value["final_size"], 5_050_000);
}
