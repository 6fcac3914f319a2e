use std::cmp::Ordering;

use audience_runtime::{Segment, SegmentKey};

use crate::scale::Scale;

/// Number of items kept at a given scale: `max(1, round(n * scale / 100))`,
/// or zero for an empty list.
pub fn keep_count(n: usize, scale: Scale) -> usize {
    if n == 0 {
        return 0;
    }
    let scaled = (n as f64 * scale.fraction()).round() as usize;
    scaled.clamp(1, n)
}

/// Truncate an unranked list to its scale-proportional prefix.
pub fn truncate_by_scale<T>(items: &[T], scale: Scale) -> &[T] {
    &items[..keep_count(items.len(), scale)]
}

/// Order segments for display and keep the scale-proportional head.
///
/// Base segments come first; within each group heavier segments lead. The
/// sort is stable so equal-weight segments keep their selection order across
/// recomputes.
pub fn rank_segments<'a>(
    active: &[&'a Segment],
    base: &[SegmentKey],
    scale: Scale,
) -> Vec<&'a Segment> {
    let mut ranked: Vec<(bool, &'a Segment)> = active
        .iter()
        .map(|segment| (base.contains(&segment.unique_id), *segment))
        .collect();
    ranked.sort_by(|(a_base, a), (b_base, b)| {
        b_base
            .cmp(a_base)
            .then_with(|| compare_weight_desc(a, b))
    });
    ranked
        .into_iter()
        .take(keep_count(active.len(), scale))
        .map(|(_, segment)| segment)
        .collect()
}

fn compare_weight_desc(a: &Segment, b: &Segment) -> Ordering {
    b.effective_weight().total_cmp(&a.effective_weight())
}
