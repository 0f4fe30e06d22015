// Copyright @yucwang 2026

use super::constants::Float;

/// Piecewise-constant discrete distribution over non-negative weights,
/// stored as a running CDF. Built once (e.g. over triangle areas at
/// scene load), read-only afterwards.
pub struct Distribution1D {
    cdf: Vec<Float>,
    total: Float,
    normalized: bool,
}

impl Distribution1D {
    pub fn new() -> Self {
        Self { cdf: vec![0.0], total: 0.0, normalized: false }
    }

    pub fn add(&mut self, weight: Float) {
        debug_assert!(!self.normalized);
        let last = *self.cdf.last().unwrap_or(&0.0);
        self.cdf.push(last + weight.max(0.0));
    }

    pub fn count(&self) -> usize {
        self.cdf.len() - 1
    }

    /// Rescales the CDF to [0, 1] and returns the pre-normalization sum
    /// of weights.
    pub fn normalize(&mut self) -> Float {
        let total = *self.cdf.last().unwrap_or(&0.0);
        if total > 0.0 {
            for v in self.cdf.iter_mut() {
                *v /= total;
            }
        }
        self.total = total;
        self.normalized = true;
        total
    }

    pub fn total(&self) -> Float {
        self.total
    }

    /// Draws an entry index proportionally to its weight. Returns the
    /// index, its discrete probability, and `u` remapped to [0,1) within
    /// the chosen entry so the coordinate stays usable downstream.
    pub fn sample_discrete(&self, u: Float) -> Option<(usize, Float, Float)> {
        if self.count() == 0 || self.total <= 0.0 {
            return None;
        }

        let u = u.clamp(0.0, 1.0);
        let mut index = match self.cdf.binary_search_by(|v| {
            v.partial_cmp(&u).unwrap_or(std::cmp::Ordering::Less)
        }) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        if index >= self.count() {
            index = self.count() - 1;
        }

        let lo = self.cdf[index];
        let hi = self.cdf[index + 1];
        let pdf = hi - lo;
        if pdf <= 0.0 {
            // Zero-weight entry reached only at CDF boundaries.
            return Some((index, 0.0, 0.0));
        }
        let remapped = ((u - lo) / pdf).min(1.0 - Float::EPSILON);

        Some((index, pdf, remapped))
    }

    pub fn pdf(&self, index: usize) -> Float {
        if index >= self.count() {
            return 0.0;
        }
        self.cdf[index + 1] - self.cdf[index]
    }
}

/* Tests for Distribution1D */

#[cfg(test)]
mod tests {
    use super::Distribution1D;
    use crate::core::rng::LcgRng;

    #[test]
    fn test_distribution_normalize_returns_total() {
        let mut dist = Distribution1D::new();
        dist.add(1.0);
        dist.add(3.0);
        let total = dist.normalize();
        assert!((total - 4.0).abs() < 1e-6);
        assert_eq!(dist.count(), 2);
        assert!((dist.pdf(0) - 0.25).abs() < 1e-6);
        assert!((dist.pdf(1) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_distribution_sampling_frequency() {
        let mut dist = Distribution1D::new();
        dist.add(1.0);
        dist.add(2.0);
        dist.add(1.0);
        dist.normalize();

        let mut rng = LcgRng::new(31);
        let n = 100_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            let (idx, pdf, remapped) = dist.sample_discrete(rng.next_f32()).unwrap();
            counts[idx] += 1;
            assert!(pdf > 0.0);
            assert!((0.0..1.0).contains(&remapped));
        }

        let freq1 = counts[1] as f64 / n as f64;
        assert!((freq1 - 0.5).abs() < 0.01, "freq = {}", freq1);
    }

    #[test]
    fn test_distribution_empty_yields_none() {
        let mut dist = Distribution1D::new();
        dist.normalize();
        assert!(dist.sample_discrete(0.5).is_none());
    }
}
