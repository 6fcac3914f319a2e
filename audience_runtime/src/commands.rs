use serde::{Deserialize, Serialize};

use crate::{AudienceBranch, AudienceLogic, ConstructionMode, SegmentKey, ZoneType};

/// Which slider a scale command moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleTarget {
    Primary,
    Secondary,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetField {
    Linear,
    Ctv,
    Ooh,
    Overall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattlegroundDirective {
    Apply,
    Clear,
}

/// Supported session mutations.
///
/// Numeric payloads are carried as wide signed integers; the engine clamps
/// them into their declared ranges when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandPayload {
    NextStep,
    PreviousStep,
    SetMode {
        mode: ConstructionMode,
    },
    ToggleSegment {
        key: SegmentKey,
    },
    ToggleBase {
        key: SegmentKey,
    },
    SetScale {
        target: ScaleTarget,
        value: i64,
    },
    ToggleAudience {
        branch: AudienceBranch,
    },
    SetLogic {
        logic: AudienceLogic,
    },
    SetZoneType {
        zone: ZoneType,
    },
    SetMinTotalStores {
        value: i64,
    },
    SetBalance {
        value: i64,
    },
    SetClientPresenceFilter {
        enabled: bool,
    },
    Battleground {
        directive: BattlegroundDirective,
    },
    SetBudget {
        field: BudgetField,
        raw: String,
    },
    SetName {
        name: String,
    },
    SetDescription {
        description: String,
    },
    SetTargetReach {
        raw: String,
    },
    SetDates {
        start: String,
        end: String,
    },
}

impl CommandPayload {
    /// Short verb used in logs.
    pub fn verb(&self) -> &'static str {
        match self {
            CommandPayload::NextStep => "next",
            CommandPayload::PreviousStep => "back",
            CommandPayload::SetMode { .. } => "mode",
            CommandPayload::ToggleSegment { .. } => "toggle",
            CommandPayload::ToggleBase { .. } => "base",
            CommandPayload::SetScale { .. } => "scale",
            CommandPayload::ToggleAudience { .. } => "audience",
            CommandPayload::SetLogic { .. } => "logic",
            CommandPayload::SetZoneType { .. } => "zone",
            CommandPayload::SetMinTotalStores { .. } => "stores",
            CommandPayload::SetBalance { .. } => "balance",
            CommandPayload::SetClientPresenceFilter { .. } => "client",
            CommandPayload::Battleground { .. } => "battleground",
            CommandPayload::SetBudget { .. } => "budget",
            CommandPayload::SetName { .. } => "name",
            CommandPayload::SetDescription { .. } => "describe",
            CommandPayload::SetTargetReach { .. } => "reach",
            CommandPayload::SetDates { .. } => "dates",
        }
    }
}
