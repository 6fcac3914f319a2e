mod common;

use anyhow::{bail, Result};
use audience_core::{parse_command_line, AudienceEstimate, CommandParseError, SegmentKey};

const SCRIPT: &str = r#"
# details page
name Pet owning families
describe Households with children and at least one pet
reach 4M
dates 2026-11-01 2026-12-24
budget linear 12000
budget ctv 8000.50
budget ooh n/a
next

# segments page
mode extension
toggle Vodafone_lr_1
base ONS_yg_1
base Dentsu CCS_exp_2
next

# profile page
scale profile 100
scale primary 50
scale secondary 50
logic or
next

# map page
zone hex
stores 4
balance 70
client off
battleground apply
"#;

fn replay(script: &str) -> Result<(audience_core::AudienceSession, AudienceEstimate)> {
    let mut session = common::new_session(77);
    let mut last = session.estimate();
    for line in script.lines() {
        match parse_command_line(line) {
            Ok(command) => last = session.apply(command),
            Err(CommandParseError::Empty) => continue,
            Err(err) => bail!("line {line:?}: {err}"),
        }
    }
    Ok((session, last))
}

#[test]
fn full_wizard_walkthrough() -> Result<()> {
    let (session, estimate) = replay(SCRIPT)?;
    let state = session.state();

    assert_eq!(state.details.name, "Pet owning families");
    assert_eq!(state.details.start_date, "2026-11-01");
    assert_eq!(estimate.budget_total, 20_000.5);

    assert!(!state
        .selection
        .is_selected(&SegmentKey::from("Vodafone_lr_1")));
    assert_eq!(
        state.selection.base(),
        &[
            SegmentKey::from("ONS_yg_1"),
            SegmentKey::from("Dentsu CCS_exp_2")
        ]
    );

    assert_eq!(estimate.combined_size, 5_959_000);
    assert_eq!(estimate.final_size, 4_767_200);
    assert_eq!(estimate.profile_size, 10_000_000);
    assert!(estimate.competition_score.is_some());

    let ranked: Vec<&str> = estimate
        .breakdown
        .iter()
        .map(|entry| entry.unique_id.as_str())
        .collect();
    assert_eq!(
        ranked,
        vec![
            "ONS_yg_1",
            "Dentsu CCS_exp_2",
            "Circana_lr_1",
            "Experian_lr_1",
            "Dentsu CCS_exp_1"
        ]
    );

    let battleground = &state.battleground;
    assert_eq!(battleground.min_total_stores, 4);
    assert!(!battleground.filter_client_presence);
    assert_eq!(battleground.card.map(|card| card.score), Some(70));
    Ok(())
}

#[test]
fn oversized_slider_values_clamp() -> Result<()> {
    let script = "mode extension
scale primary 99999999999999999999
scale secondary -99999999999999999999";
    let (_, estimate) = replay(script)?;
    assert_eq!(estimate.primary_size, 10_000_000);
    assert_eq!(estimate.secondary_size, 60_000);
    Ok(())
}

#[test]
fn unknown_verbs_are_rejected() {
    assert!(matches!(
        parse_command_line("teleport home"),
        Err(CommandParseError::UnknownCommand(_))
    ));
}
