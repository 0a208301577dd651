use common::models::AllocationVector;

/// Concentration heuristic in `[0, 100]`: an even split scores 100 and the score
/// drops by ten points for every 0.01 of standard deviation across fractions.
///
/// An empty vector scores 100.
// TODO: get the x10 calibration confirmed by product before tuning it.
pub fn stability_score(vector: &AllocationVector) -> u8 {
    let std_dev = std_dev(vector);
    let score = ((1.0 - std_dev * 10.0).clamp(0.0, 1.0) * 100.0).round();
    if score.is_finite() { score as u8 } else { 0 }
}

fn std_dev(vector: &AllocationVector) -> f64 {
    if vector.is_empty() {
        return 0.0;
    }
    let n = vector.len() as f64;
    let mean = vector.values().sum::<f64>() / n;
    let variance = vector.values().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
