//! Descriptive statistics over slices of observations.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn mean(&self) -> Option<f64>;
    fn max_share(&self) -> Option<f64>;
    fn gini(&self) -> Option<f64>;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.sum() / self.len() as f64)
        }
    }

    /// The largest element as a fraction of the total. A zero total yields an equal split.
    fn max_share(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum = self.sum();
        if sum <= 0.0 {
            return Some(1.0 / self.len() as f64);
        }
        let max = self.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(max / sum)
    }

    /// Gini coefficient of non-negative observations, using the sorted-rank formula
    /// `G = 2 Σ(i · x_i) / (n Σx_i) − (n + 1) / n` with 1-based ranks. All zeros count as perfect
    /// equality. The result is clamped to `[0, 1]`.
    fn gini(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum = self.sum();
        if sum <= 0.0 {
            return Some(0.0);
        }
        let mut sorted = self.to_vec();
        sorted.sort_by(f64::total_cmp);
        let weighted_sum: f64 = sorted
            .iter()
            .enumerate()
            .map(|(rank, value)| (rank + 1) as f64 * value)
            .sum();
        let n = self.len() as f64;
        let gini = 2.0 * weighted_sum / (n * sum) - (n + 1.0) / n;
        Some(gini.clamp(0.0, 1.0))
    }
}
