//! Data contracts shared by the audience builder crates.
//!
//! Everything here is plain serde data: no sizing logic, no randomness. The
//! engine in `audience_core` and the HTTP client in `segment_match_client`
//! both speak these types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a provider segment (`providerId` + `_` + segment id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentKey(pub String);

impl SegmentKey {
    pub fn compose(provider_id: &str, segment_id: &str) -> Self {
        Self(format!("{}_{}", provider_id, segment_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SegmentKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An atomic targeting criterion supplied by one data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub provider_id: String,
    #[serde(alias = "provider")]
    pub provider_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, alias = "reach")]
    pub reach_label: String,
    #[serde(default, alias = "cpm")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub unique_id: SegmentKey,
}

impl Segment {
    pub fn new(provider_id: &str, provider_name: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            provider_id: provider_id.to_string(),
            provider_name: provider_name.to_string(),
            unique_id: SegmentKey::compose(provider_id, id),
            ..Self::default()
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Fill in `unique_id` when a feed omitted it.
    pub fn ensure_key(&mut self) {
        if self.unique_id.is_empty() {
            self.unique_id = SegmentKey::compose(&self.provider_id, &self.id);
        }
    }

    /// Ranking weight. Missing, zero and non-finite weights all count as 1.
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(weight) if weight.is_finite() && weight != 0.0 => weight,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructionMode {
    /// Segments cross-confirm a single audience.
    #[default]
    Validation,
    /// A primary and a derived secondary audience may both exist.
    Extension,
}

impl ConstructionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstructionMode::Validation => "validation",
            ConstructionMode::Extension => "extension",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceLogic {
    And,
    #[default]
    Or,
}

impl AudienceLogic {
    pub fn as_str(self) -> &'static str {
        match self {
            AudienceLogic::And => "and",
            AudienceLogic::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceBranch {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    #[default]
    Postcode,
    Hex,
}

impl ZoneType {
    pub fn display_label(self) -> &'static str {
        match self {
            ZoneType::Postcode => "Postcode District",
            ZoneType::Hex => "Hex Grid (H3)",
        }
    }
}

/// The five wizard pages, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Details,
    Segments,
    Profile,
    Map,
    Export,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Details,
        WizardStep::Segments,
        WizardStep::Profile,
        WizardStep::Map,
        WizardStep::Export,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Details => "Audience Details",
            WizardStep::Segments => "Segments",
            WizardStep::Profile => "Audience Profile",
            WizardStep::Map => "Map",
            WizardStep::Export => "Export",
        }
    }
}

/// Map overlay position in percentage space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexPoint {
    pub x: f64,
    pub y: f64,
}

impl HexPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &HexPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSegmentsRequest {
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSegmentsResponse {
    #[serde(rename = "MatchedSegments", default)]
    pub matched_segments: Vec<Segment>,
}
