//! One editing session: mutable inputs plus a pure recompute of everything
//! derived from them.

use std::sync::Arc;

use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use audience_runtime::{
    AudienceBranch, AudienceLogic, BattlegroundDirective, CommandPayload, ConstructionMode,
    HexPoint, ScaleTarget, Segment, SegmentKey,
};

use crate::battleground::BattlegroundState;
use crate::breakdown::{rank_segments, truncate_by_scale};
use crate::budget::BudgetBreakdown;
use crate::catalog::SegmentCatalog;
use crate::combination::{AudienceSelection, CombinationResolver};
use crate::estimate::{AudienceEstimate, BreakdownEntry};
use crate::hex_grid::HexGridGenerator;
use crate::hex_scoring::{battleground_score, generate_cells, HexCell};
use crate::scale::{Scale, ScaleInterpolator};
use crate::selection::SelectionState;
use crate::shares::split_percentages;
use crate::sizing_config::SizingConfig;
use crate::wizard::WizardCursor;

/// Free-text fields from the details page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceDetails {
    pub name: String,
    pub description: String,
    pub target_reach: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleSettings {
    pub primary: Scale,
    pub secondary: Scale,
    pub profile: Scale,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            primary: Scale::MIDPOINT,
            secondary: Scale::MIDPOINT,
            profile: Scale::MIDPOINT,
        }
    }
}

impl ScaleSettings {
    pub fn set(&mut self, target: ScaleTarget, value: i64) {
        let scale = Scale::clamped(value);
        match target {
            ScaleTarget::Primary => self.primary = scale,
            ScaleTarget::Secondary => self.secondary = scale,
            ScaleTarget::Profile => self.profile = scale,
        }
    }
}

/// Serializable snapshot of every user input in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub details: AudienceDetails,
    pub budget: BudgetBreakdown,
    pub selection: SelectionState,
    pub scales: ScaleSettings,
    pub audiences: AudienceSelection,
    pub logic: AudienceLogic,
    pub battleground: BattlegroundState,
    pub hex_overlay: Vec<HexPoint>,
    pub competition_cells: Vec<HexCell>,
    pub contribution_shares: Vec<u32>,
    pub wizard: WizardCursor,
}

impl SessionState {
    pub fn new(catalog: &SegmentCatalog, config: &SizingConfig) -> Self {
        Self {
            details: AudienceDetails::default(),
            budget: BudgetBreakdown::default(),
            selection: SelectionState::select_all(catalog),
            scales: ScaleSettings::default(),
            audiences: AudienceSelection::default(),
            logic: AudienceLogic::default(),
            battleground: BattlegroundState::with_policy(&config.battleground),
            hex_overlay: Vec::new(),
            competition_cells: Vec::new(),
            contribution_shares: Vec::new(),
            wizard: WizardCursor::default(),
        }
    }
}

pub struct AudienceSession {
    state: SessionState,
    catalog: Arc<SegmentCatalog>,
    config: Arc<SizingConfig>,
    rng: SmallRng,
}

impl AudienceSession {
    /// A zero seed draws from OS entropy; any other seed is reproducible.
    pub fn new(catalog: Arc<SegmentCatalog>, config: Arc<SizingConfig>, seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        let state = SessionState::new(&catalog, &config);
        let mut session = Self {
            state,
            catalog,
            config,
            rng,
        };
        session.reshuffle_shares();
        info!(
            target: "audience_builder::session",
            seed,
            segments = session.catalog.len(),
            "session.started"
        );
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &SegmentCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// Swap in a new segment catalog (e.g. match results) and select all of
    /// it. Previous picks and base flags are dropped.
    pub fn replace_catalog(&mut self, catalog: Arc<SegmentCatalog>) -> AudienceEstimate {
        let mode = self.state.selection.mode;
        self.state.selection = SelectionState::select_all(&catalog);
        self.state.selection.mode = mode;
        self.catalog = catalog;
        self.reshuffle_shares();
        info!(
            target: "audience_builder::session",
            segments = self.catalog.len(),
            "session.catalog_replaced"
        );
        self.estimate()
    }

    /// Apply one mutation and recompute the estimate from the new snapshot.
    pub fn apply(&mut self, command: CommandPayload) -> AudienceEstimate {
        let verb = command.verb();
        match command {
            CommandPayload::NextStep => {
                self.state.wizard.next();
            }
            CommandPayload::PreviousStep => {
                self.state.wizard.back();
            }
            CommandPayload::SetMode { mode } => {
                self.state.selection.mode = mode;
            }
            CommandPayload::ToggleSegment { key } => {
                if self.known_segment(&key, verb) {
                    self.state.selection.toggle_segment(&key);
                    self.reshuffle_shares();
                }
            }
            CommandPayload::ToggleBase { key } => {
                if self.known_segment(&key, verb) {
                    self.state.selection.toggle_base(&key);
                }
            }
            CommandPayload::SetScale { target, value } => {
                self.state.scales.set(target, value);
            }
            CommandPayload::ToggleAudience { branch } => {
                self.state.audiences.toggle(branch);
            }
            CommandPayload::SetLogic { logic } => {
                self.state.logic = logic;
            }
            CommandPayload::SetZoneType { zone } => {
                self.state.battleground.set_zone_type(zone);
            }
            CommandPayload::SetMinTotalStores { value } => {
                self.state
                    .battleground
                    .set_min_total_stores(value, &self.config.battleground);
            }
            CommandPayload::SetBalance { value } => {
                self.state.battleground.set_balance(value);
            }
            CommandPayload::SetClientPresenceFilter { enabled } => {
                self.state.battleground.set_filter_client_presence(enabled);
            }
            CommandPayload::Battleground { directive } => match directive {
                BattlegroundDirective::Apply => self.apply_battleground(),
                BattlegroundDirective::Clear => {
                    self.state.battleground.clear();
                    self.state.hex_overlay.clear();
                    self.state.competition_cells.clear();
                }
            },
            CommandPayload::SetBudget { field, raw } => {
                self.state.budget.set(field, raw);
            }
            CommandPayload::SetName { name } => {
                self.state.details.name = name;
            }
            CommandPayload::SetDescription { description } => {
                self.state.details.description = description;
            }
            CommandPayload::SetTargetReach { raw } => {
                self.state.details.target_reach = raw;
            }
            CommandPayload::SetDates { start, end } => {
                self.state.details.start_date = start;
                self.state.details.end_date = end;
            }
        }

        let estimate = self.estimate();
        debug!(
            target: "audience_builder::session",
            command = verb,
            final_size = estimate.final_size,
            "command.applied"
        );
        estimate
    }

    pub fn estimate(&self) -> AudienceEstimate {
        derive_estimate(&self.state, &self.catalog, &self.config)
    }

    fn apply_battleground(&mut self) {
        self.state
            .battleground
            .activate(&self.config.battleground, &mut self.rng);
        let generator = HexGridGenerator::from_config(&self.config);
        self.state.hex_overlay = generator.generate(&mut self.rng);
        self.state.competition_cells = generate_cells(&self.config.hex_scoring, &mut self.rng);
    }

    fn known_segment(&self, key: &SegmentKey, verb: &'static str) -> bool {
        let known = self.catalog.contains(key);
        if !known {
            debug!(
                target: "audience_builder::session",
                command = verb,
                key = %key,
                "command.ignored=unknown_segment"
            );
        }
        known
    }

    fn reshuffle_shares(&mut self) {
        let count = self.state.selection.active_segments(&self.catalog).len();
        self.state.contribution_shares = split_percentages(&mut self.rng, count);
    }
}

/// Segments shown on the profile page: the selection, or the head of the
/// catalog when nothing is selected.
pub fn profile_segments<'a>(
    selection: &SelectionState,
    catalog: &'a SegmentCatalog,
    fallback_count: usize,
) -> Vec<&'a Segment> {
    let active = selection.active_segments(catalog);
    if active.is_empty() {
        catalog.segments().iter().take(fallback_count).collect()
    } else {
        active
    }
}

/// Recompute every displayed value from a session snapshot.
pub fn derive_estimate(
    state: &SessionState,
    catalog: &SegmentCatalog,
    config: &SizingConfig,
) -> AudienceEstimate {
    let interpolator = ScaleInterpolator::from_config(config);
    let resolver = CombinationResolver::from_config(config);

    let primary_size = interpolator.compute(state.scales.primary, AudienceBranch::Primary);
    let secondary_size = interpolator.compute(state.scales.secondary, AudienceBranch::Secondary);
    let audiences = state.audiences.effective(state.selection.mode);
    let combined_size = resolver.combine(audiences, primary_size, secondary_size, state.logic);
    let final_size = state.battleground.apply(combined_size);
    let discount = state.battleground.discount();

    let profile = profile_segments(
        &state.selection,
        catalog,
        config.profile.fallback_segment_count,
    );
    let base = state.selection.base();
    let breakdown = rank_segments(&profile, base, state.scales.profile)
        .into_iter()
        .map(|segment| BreakdownEntry::from_segment(segment, base.contains(&segment.unique_id)))
        .collect();

    let (primary_preview, secondary_preview) = match state.selection.mode {
        ConstructionMode::Validation => (Vec::new(), Vec::new()),
        ConstructionMode::Extension => {
            let active = state.selection.active_segments(catalog);
            (
                preview_keys(&active, state.scales.primary),
                preview_keys(&active, state.scales.secondary),
            )
        }
    };

    let competition_score = state.battleground.active.then(|| {
        battleground_score(
            &state.competition_cells,
            config.hex_scoring.presence_threshold,
        )
    });

    AudienceEstimate {
        step: state.wizard.step(),
        mode: state.selection.mode,
        logic: state.logic,
        primary_size,
        secondary_size: match state.selection.mode {
            ConstructionMode::Validation => 0,
            ConstructionMode::Extension => secondary_size,
        },
        combined_size,
        final_size,
        battleground_applied: discount.is_some(),
        discount,
        card: state.battleground.card,
        profile_size: interpolator.primary(state.scales.profile),
        breakdown,
        primary_preview,
        secondary_preview,
        competition_score,
        budget_total: state.budget.total(),
    }
}

fn preview_keys(active: &[&Segment], scale: Scale) -> Vec<SegmentKey> {
    truncate_by_scale(active, scale)
        .iter()
        .map(|segment| segment.unique_id.clone())
        .collect()
}
