#![deny(warnings)]

//! Tournament engine: rounds, games and the top-level tournament run.
//!
//! The engine is single-threaded and sequential. Teams are passed down as
//! `&mut [Team]` and every random draw goes through one
//! [`sim_core::RandomSource`], so a seeded run is fully reproducible.

pub mod error;
pub mod game;
pub mod report;
pub mod resolve;
pub mod round;
pub mod tournament;

pub use error::SimError;
pub use game::Game;
pub use report::{ArcherStanding, GameSummary, GenderTally, TeamStanding, TournamentReport};
pub use resolve::{count_wins, resolve_team, sole_leader, Leader};
pub use round::{ArcherResolution, Round};
pub use tournament::{ExperienceSeries, Tournament};

/// Build, run and summarize a seeded tournament.
pub fn run_tournament(config: sim_core::TournamentConfig) -> Result<TournamentReport, SimError> {
    let mut tournament = Tournament::seeded(config)?;
    tournament.run()?;
    Ok(TournamentReport::from_tournament(&tournament))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_games_is_rejected() {
        let config = sim_core::TournamentConfig {
            games: 0,
            ..Default::default()
        };
        assert_eq!(
            run_tournament(config),
            Err(SimError::Validation(sim_core::ValidationError::ZeroCount(
                "games"
            )))
        );
    }
}
