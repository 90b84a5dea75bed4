//! Random top/bottom scale split with a conserved sum.

use mango_engine::Rng;

use crate::config::ScaleRange;

/// Vertical scales of one pair. `top + bottom` always equals the budget it was drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSplit {
    pub top: f32,
    pub bottom: f32,
}

impl ScaleSplit {
    pub fn total(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Draws scale splits from a seeded generator.
#[derive(Debug, Clone)]
pub struct ScaleRandomizer {
    seed: u64,
    rng: Rng,
}

impl ScaleRandomizer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Rng::new(seed),
        }
    }

    /// Rewind to the first draw of the seed.
    pub fn reseed(&mut self) {
        self.rng = Rng::new(self.seed);
    }

    /// Draw `top` uniformly from `range`; `bottom` takes the rest of `gap_budget`.
    ///
    /// `top` is snapped to a multiple of the budget's ulp, so `gap_budget - top`
    /// is computed without rounding and `top + bottom` adds back to exactly
    /// `gap_budget`. Keeping `bottom` positive is the caller's configuration contract.
    pub fn split(&mut self, range: ScaleRange, gap_budget: f32) -> ScaleSplit {
        let drawn = self.rng.range(range.min, range.max);
        let top = match exact_range(range, gap_budget) {
            Some(exact) => {
                let q = budget_quantum(gap_budget);
                ((drawn / q).round() * q).clamp(exact.min, exact.max)
            }
            None => drawn,
        };
        ScaleSplit {
            top,
            bottom: gap_budget - top,
        }
    }
}

/// One ulp of a positive normal `gap_budget`. Any multiple of it below the
/// budget can be subtracted from the budget exactly.
pub fn budget_quantum(gap_budget: f32) -> f32 {
    let exponent = ((gap_budget.to_bits() >> 23) & 0xff) as i32 - 127;
    2f32.powi(exponent - 23)
}

/// The part of `range` made of budget-quantum multiples, or `None` when the
/// range holds none of them (or the budget is not a positive normal float).
pub fn exact_range(range: ScaleRange, gap_budget: f32) -> Option<ScaleRange> {
    if !(gap_budget.is_normal() && gap_budget > 0.0) {
        return None;
    }
    let q = budget_quantum(gap_budget);
    let min = (range.min / q).ceil() * q;
    let max = (range.max / q).floor() * q;
    (min <= max).then(|| ScaleRange::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_conserves_budget_exactly() {
        let mut randomizer = ScaleRandomizer::new(1);
        let range = ScaleRange::new(4.0, 6.0);
        for _ in 0..10_000 {
            let s = randomizer.split(range, 9.0);
            assert!(range.contains(s.top), "top={}", s.top);
            assert_eq!(s.total(), 9.0, "top={} bottom={}", s.top, s.bottom);
            assert!(s.bottom > 0.0);
        }
    }

    #[test]
    fn split_conserves_budget_for_other_ranges() {
        let mut randomizer = ScaleRandomizer::new(77);
        let range = ScaleRange::new(4.5, 8.5);
        for _ in 0..10_000 {
            let s = randomizer.split(range, 9.0);
            assert!(range.contains(s.top));
            assert_eq!(s.top + s.bottom, 9.0);
        }
    }

    #[test]
    fn split_conserves_uneven_budgets() {
        for (budget, range) in [
            (9.7, ScaleRange::new(0.3, 1.7)),
            (9.3, ScaleRange::new(0.001, 0.01)),
            (4.1, ScaleRange::new(1.05, 3.3)),
        ] {
            let mut randomizer = ScaleRandomizer::new(0x5eed_b14d);
            for _ in 0..10_000 {
                let s = randomizer.split(range, budget);
                assert!(range.contains(s.top), "top={} not in {:?}", s.top, range);
                assert_eq!(s.top + s.bottom, budget, "top={} bottom={}", s.top, s.bottom);
            }
        }
    }

    #[test]
    fn quantum_is_one_ulp_of_the_budget() {
        assert_eq!(budget_quantum(9.0), 2f32.powi(-20));
        assert_eq!(budget_quantum(8.0), 2f32.powi(-20));
        assert_eq!(budget_quantum(1.0), f32::EPSILON);
    }

    #[test]
    fn range_without_quantum_multiples_is_not_exact() {
        // 0.1 is not a multiple of 2^-20.
        assert_eq!(exact_range(ScaleRange::new(0.1, 0.1), 9.7), None);
        assert_eq!(exact_range(ScaleRange::new(4.0, 6.0), 0.0), None);
        assert_eq!(
            exact_range(ScaleRange::new(4.0, 6.0), 9.0),
            Some(ScaleRange::new(4.0, 6.0))
        );
    }

    #[test]
    fn degenerate_range_always_draws_min() {
        let mut randomizer = ScaleRandomizer::new(3);
        let s = randomizer.split(ScaleRange::new(5.0, 5.0), 9.0);
        assert_eq!(s, ScaleSplit { top: 5.0, bottom: 4.0 });
    }

    #[test]
    fn reseed_replays_draws() {
        let range = ScaleRange::new(4.0, 6.0);
        let mut randomizer = ScaleRandomizer::new(42);
        let first: Vec<_> = (0..5).map(|_| randomizer.split(range, 9.0)).collect();
        randomizer.reseed();
        let again: Vec<_> = (0..5).map(|_| randomizer.split(range, 9.0)).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn draws_spread_across_the_range() {
        let mut randomizer = ScaleRandomizer::new(9);
        let range = ScaleRange::new(4.0, 6.0);
        let tops: Vec<f32> = (0..1000).map(|_| randomizer.split(range, 9.0).top).collect();
        assert!(tops.iter().any(|&t| t < 4.5));
        assert!(tops.iter().any(|&t| t > 5.5));
    }
}
