use audience_runtime::HexPoint;
use rand::Rng;
use tracing::debug;

use crate::sizing_config::{HexGridPolicy, SizingConfig};

/// Rejection sampler for the battleground map overlay.
///
/// The attempt budget is a hard cap: when it runs out the generator returns
/// whatever it has accepted so far instead of retrying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGridGenerator {
    policy: HexGridPolicy,
}

impl HexGridGenerator {
    pub fn new(policy: HexGridPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &SizingConfig) -> Self {
        Self::new(config.hex_grid)
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<HexPoint> {
        let HexGridPolicy {
            count,
            box_min,
            box_max,
            min_distance,
            max_attempts,
        } = self.policy;
        let span = (box_max - box_min).max(0.0);

        let mut points: Vec<HexPoint> = Vec::with_capacity(count);
        let mut attempts = 0u32;
        while points.len() < count && attempts < max_attempts {
            let candidate = HexPoint::new(
                box_min + rng.gen::<f64>() * span,
                box_min + rng.gen::<f64>() * span,
            );
            if points
                .iter()
                .all(|accepted| accepted.distance(&candidate) > min_distance)
            {
                points.push(candidate);
            }
            attempts += 1;
        }

        if points.len() < count {
            debug!(
                target: "audience_builder::battleground",
                accepted = points.len(),
                requested = count,
                attempts,
                "hex_grid.attempts_exhausted"
            );
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn generator() -> HexGridGenerator {
        HexGridGenerator::from_config(&SizingConfig::default())
    }

    #[test]
    fn points_stay_in_box_and_apart() {
        for seed in 0..50u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let points = generator().generate(&mut rng);
            assert!(!points.is_empty());
            assert!(points.len() <= 10);
            for point in &points {
                assert!((35.0..=65.0).contains(&point.x));
                assert!((35.0..=65.0).contains(&point.y));
            }
            for (idx, a) in points.iter().enumerate() {
                for b in &points[idx + 1..] {
                    assert!(a.distance(b) > 12.0, "seed {seed}: {a:?} too close to {b:?}");
                }
            }
        }
    }

    #[test]
    fn same_seed_same_points() {
        let a = generator().generate(&mut SmallRng::seed_from_u64(99));
        let b = generator().generate(&mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn impossible_spacing_returns_partial_set() {
        let generator = HexGridGenerator::new(HexGridPolicy {
            min_distance: 100.0,
            ..HexGridPolicy::default()
        });
        let points = generator.generate(&mut SmallRng::seed_from_u64(1));
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn attempt_budget_caps_output() {
        let generator = HexGridGenerator::new(HexGridPolicy {
            count: 50,
            min_distance: 0.0,
            max_attempts: 7,
            ..HexGridPolicy::default()
        });
        let points = generator.generate(&mut SmallRng::seed_from_u64(5));
        assert_eq!(points.len(), 7);

        let generator = HexGridGenerator::new(HexGridPolicy {
            max_attempts: 0,
            ..HexGridPolicy::default()
        });
        assert!(generator.generate(&mut SmallRng::seed_from_u64(5)).is_empty());
    }
}
