// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};

/// Per-path uniform random stream. Each rendering task owns its own
/// instance; nothing is shared between paths.
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    pub fn next_f32(&mut self) -> Float {
        (self.next_u32() as Float) / (u32::MAX as Float)
    }

    pub fn next_2d(&mut self) -> Vector2f {
        Vector2f::new(self.next_f32(), self.next_f32())
    }
}

/* Tests for LcgRng */

#[cfg(test)]
mod tests {
    use super::LcgRng;

    #[test]
    fn test_rng_in_unit_interval() {
        let mut rng = LcgRng::new(42);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_rng_deterministic_for_seed() {
        let mut a = LcgRng::new(7);
        let mut b = LcgRng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_rng_mean_is_uniform() {
        let mut rng = LcgRng::new(1);
        let n = 100_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            sum += rng.next_f32() as f64;
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean = {}", mean);
    }
}
