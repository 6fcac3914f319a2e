//! Competitor battleground filter.
//!
//! Applying the filter samples a discount once and freezes it until the
//! filter is cleared. Other inputs never resample it.

use audience_runtime::ZoneType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scale::round_size;
use crate::sizing_config::BattlegroundPolicy;

/// Display record of the last applied filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlegroundCard {
    pub score: u8,
    pub zone_type: ZoneType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlegroundState {
    pub active: bool,
    pub zone_type: ZoneType,
    pub min_total_stores: u8,
    pub balance: u8,
    pub filter_client_presence: bool,
    pub frozen_discount: Option<f64>,
    pub card: Option<BattlegroundCard>,
}

impl Default for BattlegroundState {
    fn default() -> Self {
        Self::with_policy(&BattlegroundPolicy::default())
    }
}

impl BattlegroundState {
    pub fn with_policy(policy: &BattlegroundPolicy) -> Self {
        Self {
            active: false,
            zone_type: ZoneType::default(),
            min_total_stores: policy
                .default_min_total_stores
                .clamp(policy.stores_floor, policy.stores_ceiling),
            balance: policy.default_balance.min(100),
            filter_client_presence: true,
            frozen_discount: None,
            card: None,
        }
    }

    pub fn set_zone_type(&mut self, zone_type: ZoneType) {
        self.zone_type = zone_type;
    }

    pub fn set_min_total_stores(&mut self, value: i64, policy: &BattlegroundPolicy) {
        let clamped = value.clamp(
            i64::from(policy.stores_floor),
            i64::from(policy.stores_ceiling),
        );
        self.min_total_stores = clamped as u8;
    }

    pub fn set_balance(&mut self, value: i64) {
        self.balance = value.clamp(0, 100) as u8;
    }

    pub fn set_filter_client_presence(&mut self, enabled: bool) {
        self.filter_client_presence = enabled;
    }

    /// Turn the filter on. The discount is sampled only on the first
    /// activation; re-applying while active keeps it and refreshes the card.
    pub fn activate<R: Rng>(&mut self, policy: &BattlegroundPolicy, rng: &mut R) -> f64 {
        let discount = match (self.active, self.frozen_discount) {
            (true, Some(discount)) => discount,
            _ => {
                let discount = sample_discount(policy, rng);
                info!(
                    target: "audience_builder::battleground",
                    discount,
                    zone = ?self.zone_type,
                    min_total_stores = self.min_total_stores,
                    balance = self.balance,
                    "battleground.activated"
                );
                discount
            }
        };
        self.active = true;
        self.frozen_discount = Some(discount);
        self.card = Some(BattlegroundCard {
            score: self.balance,
            zone_type: self.zone_type,
        });
        discount
    }

    /// Scale a combined size by the frozen discount when the filter is on.
    pub fn apply(&self, combined_size: u64) -> u64 {
        match (self.active, self.frozen_discount) {
            (true, Some(discount)) => round_size(combined_size as f64 * discount),
            _ => combined_size,
        }
    }

    pub fn clear(&mut self) {
        if self.active {
            info!(target: "audience_builder::battleground", "battleground.cleared");
        }
        self.active = false;
        self.frozen_discount = None;
        self.card = None;
    }

    pub fn discount(&self) -> Option<f64> {
        if self.active {
            self.frozen_discount
        } else {
            None
        }
    }
}

fn sample_discount<R: Rng>(policy: &BattlegroundPolicy, rng: &mut R) -> f64 {
    if policy.discount_min >= policy.discount_max {
        policy.discount_min
    } else {
        rng.gen_range(policy.discount_min..=policy.discount_max)
    }
}
