use audience_runtime::{AudienceBranch, AudienceLogic, ConstructionMode};
use serde::{Deserialize, Serialize};

use crate::scale::round_size;
use crate::sizing_config::{CombinationPolicy, SizingConfig};

/// Which of the two audiences are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceSelection {
    pub primary: bool,
    pub secondary: bool,
}

impl Default for AudienceSelection {
    fn default() -> Self {
        Self {
            primary: true,
            secondary: true,
        }
    }
}

impl AudienceSelection {
    pub const NONE: AudienceSelection = AudienceSelection {
        primary: false,
        secondary: false,
    };
    pub const PRIMARY_ONLY: AudienceSelection = AudienceSelection {
        primary: true,
        secondary: false,
    };
    pub const SECONDARY_ONLY: AudienceSelection = AudienceSelection {
        primary: false,
        secondary: true,
    };
    pub const BOTH: AudienceSelection = AudienceSelection {
        primary: true,
        secondary: true,
    };

    pub fn toggle(&mut self, branch: AudienceBranch) -> bool {
        let flag = match branch {
            AudienceBranch::Primary => &mut self.primary,
            AudienceBranch::Secondary => &mut self.secondary,
        };
        *flag = !*flag;
        *flag
    }

    /// Validation mode has no secondary audience, so only the primary counts.
    pub fn effective(self, mode: ConstructionMode) -> Self {
        match mode {
            ConstructionMode::Validation => Self::PRIMARY_ONLY,
            ConstructionMode::Extension => self,
        }
    }
}

/// Merges primary and secondary sizes under the AND/OR overlap policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinationResolver {
    policy: CombinationPolicy,
}

impl CombinationResolver {
    pub fn new(policy: CombinationPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &SizingConfig) -> Self {
        Self::new(config.combination)
    }

    /// Logic only matters when both audiences are selected.
    pub fn combine(
        &self,
        selection: AudienceSelection,
        primary_size: u64,
        secondary_size: u64,
        logic: AudienceLogic,
    ) -> u64 {
        match (selection.primary, selection.secondary) {
            (false, false) => 0,
            (true, false) => primary_size,
            (false, true) => secondary_size,
            (true, true) => match logic {
                AudienceLogic::And => round_size(primary_size as f64 * self.policy.and_retention),
                AudienceLogic::Or => round_size(
                    primary_size as f64 + secondary_size as f64 * self.policy.or_secondary_weight,
                ),
            },
        }
    }
}
