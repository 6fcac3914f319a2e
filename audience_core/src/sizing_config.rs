//! Policy constants for audience sizing.
//!
//! Loaded from `sizing_config.json` with support for an environment variable
//! override.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BUILTIN_SIZING_CONFIG: &str = include_str!("data/sizing_config.json");
pub const SIZING_CONFIG_ENV: &str = "AUDIENCE_SIZING_CONFIG_PATH";

/// Root configuration for the sizing engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    pub bounds: SizeBounds,
    pub scale: ScalePolicy,
    pub combination: CombinationPolicy,
    pub battleground: BattlegroundPolicy,
    pub hex_grid: HexGridPolicy,
    pub hex_scoring: HexScoringPolicy,
    pub profile: ProfilePolicy,
}

impl SizingConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_SIZING_CONFIG)
                .expect("builtin sizing config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, SizingConfigError> {
        let config: SizingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, SizingConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| SizingConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<(), SizingConfigError> {
        if self.bounds.min_audience > self.bounds.max_audience {
            return Err(SizingConfigError::Invalid(format!(
                "bounds.min_audience {} exceeds bounds.max_audience {}",
                self.bounds.min_audience, self.bounds.max_audience
            )));
        }
        check_unit("scale.secondary_dampening", self.scale.secondary_dampening)?;
        check_unit("combination.and_retention", self.combination.and_retention)?;
        check_unit(
            "combination.or_secondary_weight",
            self.combination.or_secondary_weight,
        )?;

        let bg = &self.battleground;
        check_unit("battleground.discount_min", bg.discount_min)?;
        check_unit("battleground.discount_max", bg.discount_max)?;
        if bg.discount_min <= 0.0 || bg.discount_min > bg.discount_max {
            return Err(SizingConfigError::Invalid(format!(
                "battleground discount range [{}, {}] must be non-empty and above zero",
                bg.discount_min, bg.discount_max
            )));
        }
        if bg.stores_floor == 0 || bg.stores_floor > bg.stores_ceiling {
            return Err(SizingConfigError::Invalid(format!(
                "battleground store range [{}, {}] is invalid",
                bg.stores_floor, bg.stores_ceiling
            )));
        }

        let hex = &self.hex_grid;
        if !(hex.box_min.is_finite() && hex.box_max.is_finite()) || hex.box_min >= hex.box_max {
            return Err(SizingConfigError::Invalid(format!(
                "hex_grid box [{}, {}] is empty",
                hex.box_min, hex.box_max
            )));
        }
        if !hex.min_distance.is_finite() || hex.min_distance < 0.0 {
            return Err(SizingConfigError::Invalid(format!(
                "hex_grid.min_distance {} must be a non-negative number",
                hex.min_distance
            )));
        }
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), SizingConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SizingConfigError::Invalid(format!(
            "{field} must lie in [0, 1], got {value}"
        )))
    }
}

/// Person-count range for undampened interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeBounds {
    pub min_audience: u64,
    pub max_audience: u64,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min_audience: 100_000,
            max_audience: 10_000_000,
        }
    }
}

impl SizeBounds {
    pub fn span(&self) -> u64 {
        self.max_audience.saturating_sub(self.min_audience)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalePolicy {
    /// Secondary audiences are inferred rather than matched, so they are
    /// capped lower by this factor.
    pub secondary_dampening: f64,
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self {
            secondary_dampening: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinationPolicy {
    /// Share of the primary audience retained under AND.
    pub and_retention: f64,
    /// Share of the secondary audience added on top of the primary under OR.
    pub or_secondary_weight: f64,
}

impl Default for CombinationPolicy {
    fn default() -> Self {
        Self {
            and_retention: 0.7,
            or_secondary_weight: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattlegroundPolicy {
    pub discount_min: f64,
    pub discount_max: f64,
    pub stores_floor: u8,
    pub stores_ceiling: u8,
    pub default_min_total_stores: u8,
    pub default_balance: u8,
}

impl Default for BattlegroundPolicy {
    fn default() -> Self {
        Self {
            discount_min: 0.70,
            discount_max: 0.85,
            stores_floor: 1,
            stores_ceiling: 10,
            default_min_total_stores: 3,
            default_balance: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexGridPolicy {
    pub count: usize,
    pub box_min: f64,
    pub box_max: f64,
    pub min_distance: f64,
    pub max_attempts: u32,
}

impl Default for HexGridPolicy {
    fn default() -> Self {
        Self {
            count: 10,
            box_min: 35.0,
            box_max: 65.0,
            min_distance: 12.0,
            max_attempts: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexScoringPolicy {
    /// Store counts strictly above this mark count as a presence.
    pub presence_threshold: u8,
    pub rows: u32,
    pub cols: u32,
    pub max_store_count: u8,
}

impl Default for HexScoringPolicy {
    fn default() -> Self {
        Self {
            presence_threshold: 2,
            rows: 4,
            cols: 6,
            max_store_count: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilePolicy {
    /// Catalog segments shown in the profile when nothing is selected.
    pub fallback_segment_count: usize,
}

impl Default for ProfilePolicy {
    fn default() -> Self {
        Self {
            fallback_segment_count: 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum SizingConfigError {
    #[error("failed to parse sizing config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read sizing config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid sizing config: {0}")]
    Invalid(String),
}

/// Metadata about where the active sizing configuration came from.
#[derive(Debug, Clone, Default)]
pub struct SizingConfigMetadata {
    path: Option<PathBuf>,
}

impl SizingConfigMetadata {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

/// Load sizing configuration from the environment override or the default path.
///
/// Falls back to the compiled-in copy when no file can be read or validated.
pub fn load_sizing_config_from_env() -> (Arc<SizingConfig>, SizingConfigMetadata) {
    let override_path = env::var(SIZING_CONFIG_ENV).ok().map(PathBuf::from);
    let default_path =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/data/sizing_config.json");

    let candidates: Vec<PathBuf> = override_path.into_iter().chain([default_path]).collect();

    for path in candidates {
        match SizingConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!(
                    target: "audience_builder::config",
                    path = %path.display(),
                    "sizing_config.loaded=file"
                );
                return (Arc::new(config), SizingConfigMetadata::new(Some(path)));
            }
            Err(err) => {
                tracing::warn!(
                    target: "audience_builder::config",
                    path = %path.display(),
                    error = %err,
                    "sizing_config.load_failed"
                );
            }
        }
    }

    let config = SizingConfig::builtin();
    tracing::info!(
        target: "audience_builder::config",
        "sizing_config.loaded=builtin"
    );
    (config, SizingConfigMetadata::new(None))
}
