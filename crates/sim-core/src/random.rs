//! The random-source capability the engine draws from.

use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// The two finite pre-generated pools a source exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pool {
    /// Normally distributed luck values.
    Luck,
    /// Uniform integer starting resistances.
    Resistance,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::Luck => f.write_str("luck"),
            Pool::Resistance => f.write_str("resistance"),
        }
    }
}

/// Errors raised while drawing from a finite pool.
#[derive(Debug, Error, PartialEq)]
pub enum PoolError {
    /// The pool ran dry: it was sized too small for the configured run.
    #[error("{pool} pool exhausted after {drawn} draws")]
    Exhausted { pool: Pool, drawn: usize },
}

/// Source of every random sample consumed by a tournament.
///
/// `live_uniform` is unbounded; the two pools are finite and popping past
/// their end is an error, never a silent wrap-around.
pub trait RandomSource {
    /// A fresh uniform sample in `[0, 1)`.
    fn live_uniform(&mut self) -> f64;
    /// Next luck value from the luck pool.
    fn take_luck(&mut self) -> Result<f64, PoolError>;
    /// Next starting resistance from the resistance pool.
    fn take_resistance(&mut self) -> Result<i32, PoolError>;
}

/// Deterministic source replaying fixed values.
///
/// Queued uniform samples are returned first, then `fallback` forever. Pools
/// are stacks: the last value given is the first one taken.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    uniforms: VecDeque<f64>,
    fallback: f64,
    luck: Vec<f64>,
    resistance: Vec<i32>,
    luck_drawn: usize,
    resistance_drawn: usize,
}

impl ScriptedSource {
    /// A source whose live draws always return `sample` and whose pools are empty.
    pub fn constant(sample: f64) -> Self {
        Self {
            uniforms: VecDeque::new(),
            fallback: sample,
            luck: Vec::new(),
            resistance: Vec::new(),
            luck_drawn: 0,
            resistance_drawn: 0,
        }
    }

    /// Queue live samples to be returned, in order, before the fallback.
    pub fn with_uniforms(mut self, samples: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms.extend(samples);
        self
    }

    /// Replace the luck pool. The last element is drawn first.
    pub fn with_luck(mut self, pool: Vec<f64>) -> Self {
        self.luck = pool;
        self
    }

    /// Replace the resistance pool. The last element is drawn first.
    pub fn with_resistance(mut self, pool: Vec<i32>) -> Self {
        self.resistance = pool;
        self
    }

    /// Live samples still queued ahead of the fallback.
    pub fn queued_uniforms(&self) -> usize {
        self.uniforms.len()
    }

    /// Values left in each pool as `(luck, resistance)`.
    pub fn remaining(&self) -> (usize, usize) {
        (self.luck.len(), self.resistance.len())
    }
}

impl RandomSource for ScriptedSource {
    fn live_uniform(&mut self) -> f64 {
        self.uniforms.pop_front().unwrap_or(self.fallback)
    }

    fn take_luck(&mut self) -> Result<f64, PoolError> {
        let value = self.luck.pop().ok_or(PoolError::Exhausted {
            pool: Pool::Luck,
            drawn: self.luck_drawn,
        })?;
        self.luck_drawn += 1;
        Ok(value)
    }

    fn take_resistance(&mut self) -> Result<i32, PoolError> {
        let value = self.resistance.pop().ok_or(PoolError::Exhausted {
            pool: Pool::Resistance,
            drawn: self.resistance_drawn,
        })?;
        self.resistance_drawn += 1;
        Ok(value)
    }
}
