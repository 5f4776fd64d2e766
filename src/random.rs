//! The single source of randomness for the simulation.  Every spawn, shot
//! and drop gate draws from a `RandomSource`, so a scripted source makes a
//! frame fully predictable.

use std::collections::VecDeque;

use rand::Rng;

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform sample in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform index into a collection of `len` items (`len` must be > 0).
    fn pick(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Adapts any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R: Rng>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of samples, then repeats `fallback` forever.
///
/// The default fallback sits just under 1.0, so once the script runs out
/// every probability gate fails and `pick` returns the last index.
#[derive(Clone, Debug)]
pub struct ScriptedRolls {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> ScriptedRolls {
        ScriptedRolls { rolls: rolls.into_iter().collect(), fallback: 0.999_999 }
    }

    /// Source that never passes a probability gate.
    pub fn never() -> ScriptedRolls {
        ScriptedRolls::new([])
    }

    pub fn then_repeat(mut self, fallback: f64) -> ScriptedRolls {
        self.fallback = fallback.clamp(0.0, 0.999_999);
        self
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
