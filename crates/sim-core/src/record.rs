//! Immutable value records describing scores and resolved winners.
//!
//! Records are snapshots: they carry names and attributes, never references
//! to live archers or teams, so resetting a participant cannot alter them.

use crate::scoring::Gender;
use serde::{Deserialize, Serialize};

/// Position of a round within the tournament.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId {
    pub game: u32,
    pub round: u32,
}

/// A single personal shot (ordinary or additional).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub game: u32,
    pub round: u32,
    pub points: u32,
}

/// A team's standing at the end of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoundScore {
    pub game: u32,
    pub round: u32,
    pub points: u32,
    /// Experience gained by the whole team so far in the game.
    pub experience_gained: u32,
    /// Special shots taken by the team so far in the game.
    pub special_shots: u32,
}

/// Round-winning team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResult {
    pub name: String,
    pub points: u32,
}

/// Round-winning archer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcherResult {
    pub name: String,
    pub team: String,
    pub gender: Gender,
    pub points: u32,
}

/// Luckiest archer of a round or game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LuckRecord {
    pub name: String,
    pub luck: f64,
}

/// Rounds won within a game by a team or archer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundsWon {
    pub name: String,
    pub rounds_won: u32,
}

/// Experience gained within a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub name: String,
    pub experience: u32,
}
