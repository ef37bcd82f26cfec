#![deny(warnings)]

//! Core domain models and invariants for the archery tournament simulator.
//!
//! This crate defines the participants (archers and teams), the score tables
//! that turn uniform samples into points, the run configuration, and the
//! random-source capability the engine draws from. Everything here is
//! single-threaded and owned: teams own their archers, and cross references
//! between them are plain value records.

use thiserror::Error;

pub mod archer;
pub mod config;
pub mod random;
pub mod record;
pub mod scoring;
pub mod team;

pub use archer::Archer;
pub use config::TournamentConfig;
pub use random::{Pool, PoolError, RandomSource, ScriptedSource};
pub use record::{
    ArcherResult, ExperienceRecord, LuckRecord, RoundId, RoundsWon, ShotRecord, TeamResult,
    TeamRoundScore,
};
pub use scoring::{Gender, ScoreTable};
pub use team::Team;

/// Validation errors for configuration and population invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A count that drives the run shape must be at least one.
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    /// Resistance range is empty or negative.
    #[error("resistance range [{min}, {max}] is invalid")]
    InvalidResistanceRange { min: i32, max: i32 },
    /// Numeric field must be finite and within its documented range.
    #[error("{0} is not finite or out of range")]
    OutOfRange(&'static str),
    /// The luck distribution could not be built from the configured parameters.
    #[error("invalid luck distribution: {0}")]
    InvalidLuckDistribution(String),
    /// A team must field at least one archer.
    #[error("team {0} has no archers")]
    EmptyTeam(String),
}
