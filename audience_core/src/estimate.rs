use std::fmt;

use serde::{Deserialize, Serialize};

use audience_runtime::{AudienceLogic, ConstructionMode, Segment, SegmentKey, WizardStep};

use crate::battleground::BattlegroundCard;

/// One row of the justification list shown next to the size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub unique_id: SegmentKey,
    pub provider_name: String,
    pub name: Option<String>,
    pub weight: f64,
    pub is_base: bool,
}

impl BreakdownEntry {
    pub fn from_segment(segment: &Segment, is_base: bool) -> Self {
        Self {
            unique_id: segment.unique_id.clone(),
            provider_name: segment.provider_name.clone(),
            name: segment.name.clone(),
            weight: segment.effective_weight(),
            is_base,
        }
    }
}

/// Everything the UI displays, derived from one session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceEstimate {
    pub step: WizardStep,
    pub mode: ConstructionMode,
    pub logic: AudienceLogic,
    pub primary_size: u64,
    pub secondary_size: u64,
    pub combined_size: u64,
    pub final_size: u64,
    pub battleground_applied: bool,
    pub discount: Option<f64>,
    pub card: Option<BattlegroundCard>,
    pub profile_size: u64,
    pub breakdown: Vec<BreakdownEntry>,
    /// Extension mode only: selected segments cut to the primary slider.
    pub primary_preview: Vec<SegmentKey>,
    /// Extension mode only: selected segments cut to the secondary slider.
    pub secondary_preview: Vec<SegmentKey>,
    pub competition_score: Option<u8>,
    pub budget_total: f64,
}

impl fmt::Display for AudienceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step={} mode={} logic={} primary={} secondary={} combined={} final={}",
            self.step.label(),
            self.mode.as_str(),
            self.logic.as_str(),
            self.primary_size,
            self.secondary_size,
            self.combined_size,
            self.final_size
        )?;
        if let Some(discount) = self.discount {
            write!(f, " discount={discount:.2}")?;
        }
        if let Some(card) = self.card {
            write!(
                f,
                " zone={} score={}",
                card.zone_type.display_label(),
                card.score
            )?;
        }
        write!(
            f,
            " profile={} breakdown={}",
            self.profile_size,
            self.breakdown.len()
        )?;
        if !self.primary_preview.is_empty() || !self.secondary_preview.is_empty() {
            write!(
                f,
                " preview={}/{}",
                self.primary_preview.len(),
                self.secondary_preview.len()
            )?;
        }
        if let Some(score) = self.competition_score {
            write!(f, " competition={score}%")?;
        }
        if self.budget_total > 0.0 {
            write!(f, " budget={:.2}", self.budget_total)?;
        }
        Ok(())
    }
}
