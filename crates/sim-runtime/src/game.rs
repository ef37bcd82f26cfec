//! A fixed sequence of rounds and its game-level aggregation.

use crate::error::SimError;
use crate::resolve::{count_wins, sole_leader};
use crate::round::Round;
use sim_core::{
    Archer, ExperienceRecord, Gender, LuckRecord, RandomSource, RoundId, RoundsWon, Team,
    TournamentConfig,
};
use tracing::trace;

/// A played game.
#[derive(Clone, Debug)]
pub struct Game {
    id: u32,
    rounds: Vec<Round>,
    best_team: Option<RoundsWon>,
    best_archer: Option<RoundsWon>,
    luckiest_archer: Option<LuckRecord>,
    most_experienced: Vec<ExperienceRecord>,
    male_wins: u32,
    female_wins: u32,
    tied_rounds: u32,
    unresolved_rounds: u32,
    male_experience: u32,
    female_experience: u32,
}

impl Game {
    /// Play every round, aggregate the game, then reset teams and archers for
    /// the next one.
    pub fn play(
        id: u32,
        teams: &mut [Team],
        source: &mut dyn RandomSource,
        config: &TournamentConfig,
    ) -> Result<Self, SimError> {
        let mut rounds = Vec::with_capacity(config.rounds_per_game as usize);
        for round in 0..config.rounds_per_game {
            rounds.push(Round::play(RoundId { game: id, round }, teams, source, config)?);
        }

        let (male_experience, female_experience) = experience_by_gender(teams);

        let team_wins = count_wins(rounds.iter().filter_map(Round::best_team).map(|t| t.name.as_str()));
        let best_team = sole_leader(team_wins, |w| w.rounds_won).into_option();
        if let Some(won) = &best_team {
            if let Some(team) = teams.iter_mut().find(|t| t.name() == won.name) {
                team.record_game_won();
            }
        }

        let archer_wins =
            count_wins(rounds.iter().filter_map(Round::best_archer).map(|a| a.name.as_str()));
        let best_archer = sole_leader(archer_wins, |w| w.rounds_won).into_option();

        let luckiest_archer =
            sole_leader(rounds.iter().filter_map(Round::luckiest_archer), |l| l.luck)
                .into_option()
                .cloned();
        if let Some(lucky) = &luckiest_archer {
            if let Some(archer) = find_archer(teams, &lucky.name) {
                archer.record_luckiest_game();
            }
        }

        let most_experienced = most_experienced(teams);
        for record in &most_experienced {
            if let Some(archer) = find_archer(teams, &record.name) {
                archer.record_experienced_game();
            }
        }

        let (mut male_wins, mut female_wins) = (0, 0);
        for winner in rounds.iter().filter_map(Round::best_archer) {
            match winner.gender {
                Gender::Male => male_wins += 1,
                Gender::Female => female_wins += 1,
            }
        }
        let tied_rounds = rounds.iter().filter(|r| r.is_tied()).count() as u32;
        let unresolved_rounds = rounds.iter().filter(|r| r.is_unresolved()).count() as u32;

        for team in teams.iter_mut() {
            team.end_game(source)?;
        }

        trace!(
            game = id,
            team = best_team.as_ref().map(|w| w.name.as_str()),
            archer = best_archer.as_ref().map(|w| w.name.as_str()),
            tied_rounds,
            "game played"
        );
        Ok(Self {
            id,
            rounds,
            best_team,
            best_archer,
            luckiest_archer,
            most_experienced,
            male_wins,
            female_wins,
            tied_rounds,
            unresolved_rounds,
            male_experience,
            female_experience,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Team with the most round wins, absent on a tie at the top.
    pub fn best_team(&self) -> Option<&RoundsWon> {
        self.best_team.as_ref()
    }

    /// Archer with the most round wins, absent on a tie at the top.
    pub fn best_archer(&self) -> Option<&RoundsWon> {
        self.best_archer.as_ref()
    }

    /// Luckiest of the per-round luckiest archers, absent on a tie.
    pub fn luckiest_archer(&self) -> Option<&LuckRecord> {
        self.luckiest_archer.as_ref()
    }

    /// Every archer sharing the highest experience gained in the game.
    pub fn most_experienced(&self) -> &[ExperienceRecord] {
        &self.most_experienced
    }

    pub fn male_wins(&self) -> u32 {
        self.male_wins
    }

    pub fn female_wins(&self) -> u32 {
        self.female_wins
    }

    pub fn tied_rounds(&self) -> u32 {
        self.tied_rounds
    }

    pub fn unresolved_rounds(&self) -> u32 {
        self.unresolved_rounds
    }

    /// Experience gained in this game by male archers.
    pub fn male_experience(&self) -> u32 {
        self.male_experience
    }

    /// Experience gained in this game by female archers.
    pub fn female_experience(&self) -> u32 {
        self.female_experience
    }
}

fn experience_by_gender(teams: &[Team]) -> (u32, u32) {
    let mut male = 0;
    let mut female = 0;
    for archer in teams.iter().flat_map(Team::archers) {
        match archer.gender() {
            Gender::Male => male += archer.experience_gained(),
            Gender::Female => female += archer.experience_gained(),
        }
    }
    (male, female)
}

fn most_experienced(teams: &[Team]) -> Vec<ExperienceRecord> {
    let mut best: Vec<ExperienceRecord> = Vec::new();
    for archer in teams.iter().flat_map(Team::archers) {
        let experience = archer.experience_gained();
        let top = best.first().map(|r| r.experience);
        if top.map_or(true, |top| experience > top) {
            best.clear();
        } else if top != Some(experience) {
            continue;
        }
        best.push(ExperienceRecord {
            name: archer.name().to_string(),
            experience,
        });
    }
    best
}

fn find_archer<'a>(teams: &'a mut [Team], name: &str) -> Option<&'a mut Archer> {
    let (t, a) = teams.iter().enumerate().find_map(|(t, team)| {
        team.archers()
            .iter()
            .position(|a| a.name() == name)
            .map(|a| (t, a))
    })?;
    Some(teams[t].archer_mut(a))
}
