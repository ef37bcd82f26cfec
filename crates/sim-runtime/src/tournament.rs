//! Top-level aggregator: builds the population and runs every game.

use crate::error::SimError;
use crate::game::Game;
use crate::report::GenderTally;
use serde::Serialize;
use sim_core::{Archer, Gender, RandomSource, Team, TournamentConfig};
use sim_random::PooledSource;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A tournament run. Owns the teams, the played games and the random source.
pub struct Tournament<R: RandomSource> {
    config: TournamentConfig,
    source: R,
    teams: Vec<Team>,
    games: Vec<Game>,
    male_wins: u32,
    female_wins: u32,
    tied_rounds: u32,
    unresolved_rounds: u32,
    male_experience: Vec<u64>,
    female_experience: Vec<u64>,
}

/// Cumulative experience per game for each gender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExperienceSeries<'a> {
    pub male: &'a [u64],
    pub female: &'a [u64],
}

impl Tournament<PooledSource> {
    /// Build a tournament drawing from a seeded, pre-sized pooled source.
    pub fn seeded(config: TournamentConfig) -> Result<Self, SimError> {
        let source = PooledSource::from_config(&config)?;
        Self::new(config, source)
    }
}

impl<R: RandomSource> Tournament<R> {
    /// Validate `config` and build the teams. Each archer's gender comes from
    /// a live draw, then its starting resistance and luck from the pools.
    pub fn new(config: TournamentConfig, mut source: R) -> Result<Self, SimError> {
        config.validate()?;
        let mut teams = Vec::with_capacity(config.teams as usize);
        let mut number = 1;
        for t in 0..config.teams {
            let name = format!("Team {}", t + 1);
            let mut archers = Vec::with_capacity(config.archers_per_team as usize);
            for _ in 0..config.archers_per_team {
                let gender = Gender::from_sample(source.live_uniform(), config.female_threshold);
                let resistance = source.take_resistance()?;
                let luck = source.take_luck()?;
                archers.push(Archer::new(
                    format!("Archer {number}"),
                    name.as_str(),
                    gender,
                    resistance,
                    luck,
                    &config,
                ));
                number += 1;
            }
            teams.push(Team::new(name, archers)?);
        }
        info!(
            teams = config.teams,
            archers = config.archer_count(),
            games = config.games,
            rounds = config.rounds_per_game,
            "tournament built"
        );
        Ok(Self {
            config,
            source,
            teams,
            games: Vec::new(),
            male_wins: 0,
            female_wins: 0,
            tied_rounds: 0,
            unresolved_rounds: 0,
            male_experience: Vec::new(),
            female_experience: Vec::new(),
        })
    }

    /// Play every configured game in order.
    pub fn run(&mut self) -> Result<(), SimError> {
        let total = self.config.games;
        for id in 0..total {
            let game = Game::play(id, &mut self.teams, &mut self.source, &self.config)?;
            self.male_wins += game.male_wins();
            self.female_wins += game.female_wins();
            self.tied_rounds += game.tied_rounds();
            self.unresolved_rounds += game.unresolved_rounds();
            push_cumulative(&mut self.male_experience, game.male_experience());
            push_cumulative(&mut self.female_experience, game.female_experience());
            self.games.push(game);
            let progress = f64::from(id + 1) / f64::from(total) * 100.0;
            debug!(game = id + 1, total, progress, "game finished");
        }
        info!(
            male_wins = self.male_wins,
            female_wins = self.female_wins,
            tied_rounds = self.tied_rounds,
            unresolved_rounds = self.unresolved_rounds,
            "tournament finished"
        );
        Ok(())
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn archers(&self) -> impl Iterator<Item = &Archer> {
        self.teams.iter().flat_map(Team::archers)
    }

    /// Archer with the most luckiest-game titles; the first one wins on equal counts.
    pub fn luckiest_archer(&self) -> Option<&Archer> {
        first_max_by_key(self.archers(), Archer::luckiest_games)
    }

    /// Archer with the most most-experienced titles; the first one wins on equal counts.
    pub fn most_experienced_archer(&self) -> Option<&Archer> {
        first_max_by_key(self.archers(), Archer::experienced_games)
    }

    /// Team with the most games won; the first one wins on equal counts.
    pub fn best_team(&self) -> Option<&Team> {
        first_max_by_key(self.teams.iter(), Team::games_won)
    }

    /// Gender with more round wins. An even split goes to female.
    pub fn winning_gender(&self) -> Gender {
        if self.male_wins > self.female_wins {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    /// Round wins per gender.
    pub fn gender_wins(&self) -> GenderTally {
        GenderTally {
            male: self.male_wins,
            female: self.female_wins,
        }
    }

    pub fn tied_rounds(&self) -> u32 {
        self.tied_rounds
    }

    /// Rounds whose archer shoot-off hit the iteration bound.
    pub fn unresolved_rounds(&self) -> u32 {
        self.unresolved_rounds
    }

    /// Tied rounds as a percentage of all configured rounds.
    pub fn tied_round_frequency(&self) -> f64 {
        self.tied_rounds as f64 / self.config.total_rounds() as f64 * 100.0
    }

    /// Cumulative points per round for every archer.
    pub fn points_by_archer(&self) -> BTreeMap<&str, &[u64]> {
        self.archers()
            .map(|a| (a.name(), a.accumulated_points()))
            .collect()
    }

    /// Points per round for every team.
    pub fn points_by_team(&self) -> BTreeMap<&str, &[u32]> {
        self.teams
            .iter()
            .map(|t| (t.name(), t.points_by_round()))
            .collect()
    }

    pub fn experience_by_gender(&self) -> ExperienceSeries<'_> {
        ExperienceSeries {
            male: &self.male_experience,
            female: &self.female_experience,
        }
    }

    pub fn archers_by_gender(&self) -> GenderTally {
        let mut tally = GenderTally::default();
        for archer in self.archers() {
            match archer.gender() {
                Gender::Male => tally.male += 1,
                Gender::Female => tally.female += 1,
            }
        }
        tally
    }
}

fn push_cumulative(series: &mut Vec<u64>, value: u32) {
    let previous = series.last().copied().unwrap_or(0);
    series.push(previous + u64::from(value));
}

/// Strict `>` scan: later entries never displace an equal earlier one.
fn first_max_by_key<'a, T: 'a>(
    items: impl Iterator<Item = &'a T>,
    key: impl Fn(&T) -> u32,
) -> Option<&'a T> {
    let mut best: Option<&T> = None;
    for item in items {
        if best.map_or(true, |b| key(item) > key(b)) {
            best = Some(item);
        }
    }
    best
}
