//! Minimum-bid threshold draws.
//!
//! A new threshold is drawn every time an auction round is settled.
//! Every rollup node replays the same inputs and must end up with the
//! same state, so draws come from a seeded generator rather than OS
//! entropy.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::account::Amount;

/// Source of minimum-bid thresholds.
///
/// `draw` is called exactly once per successful settlement.
pub trait ThresholdSource: Send {
    fn draw(&mut self) -> Amount;
}

impl<T: ThresholdSource + ?Sized> ThresholdSource for Box<T> {
    fn draw(&mut self) -> Amount {
        (**self).draw()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid threshold range: min {min} is greater than max {max}")]
pub struct InvalidThresholdRange {
    pub min: Amount,
    pub max: Amount,
}

/// Uniform draw from an inclusive range using a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededThreshold {
    rng: StdRng,
    range: RangeInclusive<Amount>,
}

impl SeededThreshold {
    pub fn new(min: Amount, max: Amount, seed: u64) -> Result<Self, InvalidThresholdRange> {
        if min > max {
            return Err(InvalidThresholdRange { min, max });
        }

        Ok(SeededThreshold {
            rng: StdRng::seed_from_u64(seed),
            range: min..=max,
        })
    }

    pub fn range(&self) -> &RangeInclusive<Amount> {
        &self.range
    }
}

impl ThresholdSource for SeededThreshold {
    fn draw(&mut self) -> Amount {
        self.rng.gen_range(self.range.clone())
    }
}

/// Always draws the same threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedThreshold(pub Amount);

impl ThresholdSource for FixedThreshold {
    fn draw(&mut self) -> Amount {
        self.0
    }
}
