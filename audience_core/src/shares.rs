use rand::Rng;

/// Split 100 into `n` random non-negative integer shares.
///
/// Raw weights are normalised and then apportioned by largest remainder, so
/// the result always sums to exactly 100.
pub fn split_percentages<R: Rng>(rng: &mut R, n: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }
    // Offset keeps every weight strictly positive.
    let weights: Vec<f64> = (0..n).map(|_| rng.gen::<f64>() + f64::EPSILON).collect();
    let sum: f64 = weights.iter().sum();

    let exact: Vec<f64> = weights.iter().map(|w| w / sum * 100.0).collect();
    let mut shares: Vec<u32> = exact.iter().map(|value| value.floor() as u32).collect();
    let assigned: u32 = shares.iter().sum();
    let mut remaining = 100u32.saturating_sub(assigned) as usize;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });
    for idx in order.into_iter().cycle() {
        if remaining == 0 {
            break;
        }
        shares[idx] += 1;
        remaining -= 1;
    }
    shares
}
