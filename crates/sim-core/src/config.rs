//! Run configuration, read once at start and fixed for the whole tournament.

use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Rounds played in every game.
    pub rounds_per_game: u32,
    /// Games played in the tournament.
    pub games: u32,
    /// Number of teams.
    pub teams: u32,
    /// Archers fielded by each team.
    pub archers_per_team: u32,
    /// Lower bound of the starting resistance draw (inclusive).
    pub resistance_min: i32,
    /// Upper bound of the starting resistance draw (inclusive).
    pub resistance_max: i32,
    /// Resistance consumed by every ordinary shot.
    pub shot_cost: i32,
    /// Experience every archer starts a game with.
    pub initial_experience: u32,
    /// Experience granted to the resolved round winner.
    pub experience_grant: u32,
    /// Experience gained at or above which the fixed restoration penalty applies.
    pub veteran_threshold: u32,
    /// Fixed resistance withheld from veterans at round end.
    pub veteran_penalty: i32,
    /// Mean of the normal luck distribution.
    pub luck_mean: f64,
    /// Standard deviation of the normal luck distribution.
    pub luck_std_dev: f64,
    /// Gender draws at or below this value produce female archers.
    pub female_threshold: f64,
    /// Extra fraction added to the exact pool sizes.
    pub pool_margin: f64,
    /// Maximum shoot-off iterations before a round's archer tie is left unresolved.
    pub max_shoot_offs: u32,
    /// Seed for the deterministic random source.
    pub seed: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds_per_game: 10,
            games: 1000,
            teams: 2,
            archers_per_team: 5,
            resistance_min: 25,
            resistance_max: 45,
            shot_cost: 5,
            initial_experience: 10,
            experience_grant: 3,
            veteran_threshold: 9,
            veteran_penalty: 1,
            luck_mean: 1.5,
            luck_std_dev: 1.0,
            female_threshold: 0.5,
            pool_margin: 0.20,
            max_shoot_offs: 64,
            seed: 42,
        }
    }
}

impl TournamentConfig {
    /// Total archers across all teams.
    pub fn archer_count(&self) -> u64 {
        u64::from(self.teams) * u64::from(self.archers_per_team)
    }

    /// Total rounds across all games.
    pub fn total_rounds(&self) -> u64 {
        u64::from(self.games) * u64::from(self.rounds_per_game)
    }

    /// Validate counts, ranges and distribution parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let counts = [
            ("rounds_per_game", self.rounds_per_game),
            ("games", self.games),
            ("teams", self.teams),
            ("archers_per_team", self.archers_per_team),
            ("max_shoot_offs", self.max_shoot_offs),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, n)| *n == 0) {
            return Err(ValidationError::ZeroCount(*name));
        }
        if self.shot_cost < 1 {
            return Err(ValidationError::OutOfRange("shot_cost"));
        }
        if self.resistance_min < 0 || self.resistance_min > self.resistance_max {
            return Err(ValidationError::InvalidResistanceRange {
                min: self.resistance_min,
                max: self.resistance_max,
            });
        }
        if !self.luck_mean.is_finite() {
            return Err(ValidationError::OutOfRange("luck_mean"));
        }
        if !(self.luck_std_dev.is_finite() && self.luck_std_dev >= 0.0) {
            return Err(ValidationError::OutOfRange("luck_std_dev"));
        }
        if !(0.0..=1.0).contains(&self.female_threshold) {
            return Err(ValidationError::OutOfRange("female_threshold"));
        }
        if !(self.pool_margin.is_finite() && self.pool_margin >= 0.0) {
            return Err(ValidationError::OutOfRange("pool_margin"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        TournamentConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_counts_are_rejected() {
        let cfg = TournamentConfig {
            teams: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ValidationError::ZeroCount("teams")));
    }

    #[test]
    fn inverted_resistance_range_is_rejected() {
        let cfg = TournamentConfig {
            resistance_min: 50,
            resistance_max: 40,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ValidationError::InvalidResistanceRange { min: 50, max: 40 })
        );
    }

    #[test]
    fn non_finite_luck_is_rejected() {
        let cfg = TournamentConfig {
            luck_std_dev: f64::NAN,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ValidationError::OutOfRange("luck_std_dev")));
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg: TournamentConfig = serde_yaml::from_str("games: 7\nteams: 3\n").unwrap();
        assert_eq!(cfg.games, 7);
        assert_eq!(cfg.teams, 3);
        assert_eq!(cfg.rounds_per_game, 10);
        assert_eq!(cfg.archer_count(), 15);
        assert_eq!(cfg.total_rounds(), 70);
    }

    #[test]
    fn json_roundtrip() {
        let cfg = TournamentConfig::default();
        let s = serde_json::to_string(&cfg).unwrap();
        let back: TournamentConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(back.games, cfg.games);
        assert_eq!(back.seed, cfg.seed);
        assert_eq!(back.max_shoot_offs, cfg.max_shoot_offs);
    }
}
