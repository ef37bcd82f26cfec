#![deny(warnings)]

//! Seeded random source with pre-generated luck and resistance pools.
//!
//! Pools are sized up front from the run shape, generated from a single
//! `ChaCha8Rng`, and consumed from the back. Live uniform draws continue
//! from the same generator, so a seed fully determines a tournament.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use sim_core::{Pool, PoolError, RandomSource, TournamentConfig, ValidationError};
use tracing::debug;

/// Number of values to pre-generate for each pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolPlan {
    pub luck: usize,
    pub resistance: usize,
}

impl PoolPlan {
    /// Exactly the draws a full run consumes.
    ///
    /// Every archer draws luck once when built, once per round restore and once
    /// per game reset; resistance once when built and once per game reset.
    pub fn exact(config: &TournamentConfig) -> Self {
        let archers = config.archer_count();
        let games = u64::from(config.games);
        let rounds = u64::from(config.rounds_per_game);
        Self {
            luck: to_usize(archers * (1 + games * (rounds + 1))),
            resistance: to_usize(archers * (1 + games)),
        }
    }

    /// The exact plan grown by the configured safety margin.
    pub fn for_config(config: &TournamentConfig) -> Self {
        let exact = Self::exact(config);
        let grow = |n: usize| ((n as f64) * (1.0 + config.pool_margin)).ceil() as usize;
        Self {
            luck: grow(exact.luck),
            resistance: grow(exact.resistance),
        }
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Production random source.
#[derive(Clone, Debug)]
pub struct PooledSource {
    rng: ChaCha8Rng,
    luck: Vec<f64>,
    resistance: Vec<i32>,
    luck_drawn: usize,
    resistance_drawn: usize,
}

impl PooledSource {
    /// Build a source sized for `config` with its margin.
    pub fn from_config(config: &TournamentConfig) -> Result<Self, ValidationError> {
        Self::with_plan(config, PoolPlan::for_config(config))
    }

    /// Build a source with explicit pool sizes.
    pub fn with_plan(config: &TournamentConfig, plan: PoolPlan) -> Result<Self, ValidationError> {
        config.validate()?;
        let normal = Normal::new(config.luck_mean, config.luck_std_dev)
            .map_err(|e| ValidationError::InvalidLuckDistribution(e.to_string()))?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let resistance: Vec<i32> = (0..plan.resistance)
            .map(|_| rng.gen_range(config.resistance_min..=config.resistance_max))
            .collect();
        let luck: Vec<f64> = (0..plan.luck).map(|_| normal.sample(&mut rng)).collect();
        debug!(
            seed = config.seed,
            luck = plan.luck,
            resistance = plan.resistance,
            "generated random pools"
        );
        Ok(Self {
            rng,
            luck,
            resistance,
            luck_drawn: 0,
            resistance_drawn: 0,
        })
    }

    /// Values left in each pool as `(luck, resistance)`.
    pub fn remaining(&self) -> (usize, usize) {
        (self.luck.len(), self.resistance.len())
    }
}

impl RandomSource for PooledSource {
    fn live_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
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

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small() -> TournamentConfig {
        TournamentConfig {
            teams: 2,
            archers_per_team: 2,
            rounds_per_game: 3,
            games: 5,
            ..Default::default()
        }
    }

    #[test]
    fn plan_counts_every_draw() {
        let exact = PoolPlan::exact(&small());
        assert_eq!(exact.luck, 4 * (1 + 5 * 4));
        assert_eq!(exact.resistance, 4 * 6);
        let planned = PoolPlan::for_config(&small());
        assert_eq!(planned.luck, 101);
        assert_eq!(planned.resistance, 29);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PooledSource::from_config(&small()).unwrap();
        let mut b = PooledSource::from_config(&small()).unwrap();
        for _ in 0..10 {
            assert_eq!(a.take_luck(), b.take_luck());
            assert_eq!(a.take_resistance(), b.take_resistance());
            assert_eq!(a.live_uniform(), b.live_uniform());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PooledSource::from_config(&small()).unwrap();
        let mut b = PooledSource::from_config(&TournamentConfig {
            seed: 7,
            ..small()
        })
        .unwrap();
        let xs: Vec<f64> = (0..8).map(|_| a.live_uniform()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.live_uniform()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn exhausted_pool_is_an_error() {
        let plan = PoolPlan {
            luck: 1,
            resistance: 0,
        };
        let mut src = PooledSource::with_plan(&small(), plan).unwrap();
        assert!(src.take_luck().is_ok());
        assert_eq!(
            src.take_luck(),
            Err(PoolError::Exhausted {
                pool: Pool::Luck,
                drawn: 1
            })
        );
        assert_eq!(
            src.take_resistance(),
            Err(PoolError::Exhausted {
                pool: Pool::Resistance,
                drawn: 0
            })
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = TournamentConfig {
            luck_std_dev: -1.0,
            ..small()
        };
        assert!(PooledSource::from_config(&cfg).is_err());
    }

    proptest! {
        #[test]
        fn draws_stay_in_range(seed in any::<u64>()) {
            let cfg = TournamentConfig { seed, ..small() };
            let mut src = PooledSource::from_config(&cfg).unwrap();
            while let Ok(r) = src.take_resistance() {
                prop_assert!((cfg.resistance_min..=cfg.resistance_max).contains(&r));
            }
            for _ in 0..32 {
                let u = src.live_uniform();
                prop_assert!((0.0..1.0).contains(&u));
            }
            prop_assert_eq!(src.remaining().1, 0);
        }
    }
}
