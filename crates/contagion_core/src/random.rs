//! The random stream behind every stochastic decision.
//!
//! Systems never call `rand` directly. They ask a [`RandomSource`] for the
//! exact kind of draw they need, which keeps the consumption order explicit
//! and lets tests substitute a scripted source. Any [`rand::Rng`] is a
//! `RandomSource`; the simulation uses a seeded `ChaCha8Rng`.

use rand::Rng;

pub trait RandomSource {
    /// Uniform step in `{-1, 0, 1}`.
    fn step(&mut self) -> i64;

    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform index in `[0, bound)`. `bound` must be positive.
    fn below(&mut self, bound: usize) -> usize;

    /// Uniform integer in `[low, high]`. `low` must not exceed `high`.
    fn between(&mut self, low: i32, high: i32) -> i32;

    /// Draws once and reports whether the draw fell below `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn step(&mut self) -> i64 {
        self.gen_range(-1..=1)
    }

    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn below(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }

    fn between(&mut self, low: i32, high: i32) -> i32 {
        self.gen_range(low..=high)
    }
}
