//! Client-versus-competitor store presence per map cell.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sizing_config::HexScoringPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexCell {
    pub client: u8,
    pub competitor: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexClass {
    HighCompetition,
    ClientOnly,
    CompetitorOnly,
    Empty,
    WeakClient,
}

impl HexClass {
    pub fn classify(cell: HexCell, presence_threshold: u8) -> Self {
        let client_present = cell.client > presence_threshold;
        let competitor_present = cell.competitor > presence_threshold;
        match (cell.client, cell.competitor) {
            _ if client_present && competitor_present => HexClass::HighCompetition,
            (_, 0) if client_present => HexClass::ClientOnly,
            (0, _) if competitor_present => HexClass::CompetitorOnly,
            (0, 0) => HexClass::Empty,
            _ => HexClass::WeakClient,
        }
    }
}

/// Percentage of cells under high competition, rounded. Zero for no cells.
pub fn battleground_score(cells: &[HexCell], presence_threshold: u8) -> u8 {
    if cells.is_empty() {
        return 0;
    }
    let high = cells
        .iter()
        .filter(|cell| HexClass::classify(**cell, presence_threshold) == HexClass::HighCompetition)
        .count();
    (high as f64 / cells.len() as f64 * 100.0).round() as u8
}

/// Mock `rows x cols` grid with uniform store counts in `[0, max_store_count]`.
pub fn generate_cells<R: Rng>(policy: &HexScoringPolicy, rng: &mut R) -> Vec<HexCell> {
    let total = (policy.rows as usize).saturating_mul(policy.cols as usize);
    (0..total)
        .map(|_| HexCell {
            client: rng.gen_range(0..=policy.max_store_count),
            competitor: rng.gen_range(0..=policy.max_store_count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn cell(client: u8, competitor: u8) -> HexCell {
        HexCell { client, competitor }
    }

    #[test]
    fn classification_table() {
        assert_eq!(HexClass::classify(cell(3, 3), 2), HexClass::HighCompetition);
        assert_eq!(HexClass::classify(cell(5, 0), 2), HexClass::ClientOnly);
        assert_eq!(HexClass::classify(cell(0, 4), 2), HexClass::CompetitorOnly);
        assert_eq!(HexClass::classify(cell(0, 0), 2), HexClass::Empty);
        assert_eq!(HexClass::classify(cell(2, 2), 2), HexClass::WeakClient);
        assert_eq!(HexClass::classify(cell(5, 1), 2), HexClass::WeakClient);
        assert_eq!(HexClass::classify(cell(0, 2), 2), HexClass::WeakClient);
    }

    #[test]
    fn score_is_high_competition_share() {
        let cells = vec![cell(3, 3), cell(0, 0), cell(4, 8), cell(1, 0)];
        assert_eq!(battleground_score(&cells, 2), 50);
        assert_eq!(battleground_score(&[cell(3, 3), cell(0, 0), cell(0, 0)], 2), 33);
        assert_eq!(battleground_score(&[], 2), 0);
    }

    #[test]
    fn generated_grid_respects_policy() {
        let policy = HexScoringPolicy::default();
        let cells = generate_cells(&policy, &mut SmallRng::seed_from_u64(11));
        assert_eq!(cells.len(), 24);
        assert!(cells
            .iter()
            .all(|cell| cell.client <= 8 && cell.competitor <= 8));
    }
}
