//! Audience sizing engine.
//!
//! Holds the state of one audience-builder session and recomputes the
//! estimated reach and segment breakdown whenever [`AudienceSession::apply`]
//! is invoked with a command.

pub mod battleground;
pub mod breakdown;
pub mod budget;
pub mod catalog;
pub mod combination;
pub mod estimate;
pub mod hex_grid;
pub mod hex_scoring;
pub mod scale;
pub mod selection;
pub mod session;
pub mod shares;
pub mod sizing_config;
pub mod wizard;

pub use audience_runtime::*;

pub use battleground::{BattlegroundCard, BattlegroundState};
pub use breakdown::{keep_count, rank_segments, truncate_by_scale};
pub use budget::{coerce_amount, BudgetBreakdown};
pub use catalog::{CatalogError, SegmentCatalog};
pub use combination::{AudienceSelection, CombinationResolver};
pub use estimate::{AudienceEstimate, BreakdownEntry};
pub use hex_grid::HexGridGenerator;
pub use hex_scoring::{battleground_score, generate_cells, HexCell, HexClass};
pub use scale::{Scale, ScaleInterpolator};
pub use selection::SelectionState;
pub use session::{
    derive_estimate, profile_segments, AudienceDetails, AudienceSession, ScaleSettings,
    SessionState,
};
pub use shares::split_percentages;
pub use sizing_config::{
    load_sizing_config_from_env, SizingConfig, SizingConfigError, SizingConfigMetadata,
    SIZING_CONFIG_ENV,
};
pub use wizard::WizardCursor;
