mod common;

use anyhow::{ensure, Context, Result};
use audience_core::{
    AudienceLogic, BattlegroundDirective, CommandPayload, ConstructionMode, ScaleTarget,
    WizardStep,
};

#[test]
fn midpoint_sizing_with_battleground() -> Result<()> {
    let mut session = common::new_session(1234);
    session.apply(CommandPayload::SetMode {
        mode: ConstructionMode::Extension,
    });
    session.apply(CommandPayload::SetScale {
        target: ScaleTarget::Primary,
        value: 50,
    });
    let estimate = session.apply(CommandPayload::SetScale {
        target: ScaleTarget::Secondary,
        value: 50,
    });
    ensure!(estimate.primary_size == 5_050_000, "primary {}", estimate.primary_size);
    ensure!(
        estimate.secondary_size == 3_030_000,
        "secondary {}",
        estimate.secondary_size
    );

    let estimate = session.apply(CommandPayload::SetLogic {
        logic: AudienceLogic::Or,
    });
    ensure!(
        estimate.combined_size == 5_959_000,
        "combined {}",
        estimate.combined_size
    );
    ensure!(estimate.final_size == estimate.combined_size);

    let estimate = session.apply(CommandPayload::Battleground {
        directive: BattlegroundDirective::Apply,
    });
    let discount = estimate.discount.context("discount after apply")?;
    ensure!((discount - 0.8).abs() < f64::EPSILON, "discount {discount}");
    ensure!(estimate.final_size == 4_767_200, "final {}", estimate.final_size);
    Ok(())
}

#[test]
fn wizard_boundaries_hold() -> Result<()> {
    let mut session = common::new_session(99);
    let estimate = session.apply(CommandPayload::PreviousStep);
    ensure!(estimate.step == WizardStep::Details);

    for _ in 0..4 {
        session.apply(CommandPayload::NextStep);
    }
    let estimate = session.apply(CommandPayload::NextStep);
    ensure!(estimate.step == WizardStep::Export, "step {:?}", estimate.step);
    Ok(())
}

#[test]
fn bounds_hold_across_the_slider() -> Result<()> {
    let mut session = common::new_session(5);
    session.apply(CommandPayload::SetMode {
        mode: ConstructionMode::Extension,
    });
    let mut previous = 0;
    for value in -10..=110 {
        let estimate = session.apply(CommandPayload::SetScale {
            target: ScaleTarget::Primary,
            value,
        });
        ensure!((100_000..=10_000_000).contains(&estimate.primary_size));
        ensure!(estimate.primary_size >= previous, "not monotonic at {value}");
        previous = estimate.primary_size;
    }
    Ok(())
}

#[test]
fn and_never_exceeds_primary_and_or_never_falls_below() -> Result<()> {
    let mut session = common::new_session(5);
    session.apply(CommandPayload::SetMode {
        mode: ConstructionMode::Extension,
    });
    for primary in (0..=100).step_by(10) {
        for secondary in (0..=100).step_by(25) {
            session.apply(CommandPayload::SetScale {
                target: ScaleTarget::Primary,
                value: primary,
            });
            session.apply(CommandPayload::SetScale {
                target: ScaleTarget::Secondary,
                value: secondary,
            });
            let and = session.apply(CommandPayload::SetLogic {
                logic: AudienceLogic::And,
            });
            ensure!(and.combined_size <= and.primary_size);
            let or = session.apply(CommandPayload::SetLogic {
                logic: AudienceLogic::Or,
            });
            ensure!(or.combined_size >= or.primary_size);
        }
    }
    Ok(())
}
