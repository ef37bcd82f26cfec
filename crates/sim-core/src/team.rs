//! Teams: archer ownership, shared score and special-shot bookkeeping.

use crate::archer::Archer;
use crate::random::{PoolError, RandomSource};
use crate::record::{RoundId, TeamResult, TeamRoundScore};
use crate::ValidationError;
use tracing::trace;

/// A fixed group of archers aggregating score and special-shot state.
#[derive(Clone, Debug)]
pub struct Team {
    name: String,
    archers: Vec<Archer>,
    total_points: u32,
    total_special_shots: u32,
    special_archer: Option<String>,
    repeated_special_archer: u32,
    scores: Vec<TeamRoundScore>,
    points_by_round: Vec<u32>,
    special_shots_by_game: Vec<u32>,
    experience_by_game: Vec<u32>,
    games_won: u32,
}

impl Team {
    /// Build a team. Membership is fixed from here on and must be non-empty.
    pub fn new(name: impl Into<String>, archers: Vec<Archer>) -> Result<Self, ValidationError> {
        let name = name.into();
        if archers.is_empty() {
            return Err(ValidationError::EmptyTeam(name));
        }
        Ok(Self {
            name,
            archers,
            total_points: 0,
            total_special_shots: 0,
            special_archer: None,
            repeated_special_archer: 0,
            scores: Vec::new(),
            points_by_round: Vec::new(),
            special_shots_by_game: Vec::new(),
            experience_by_game: Vec::new(),
            games_won: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archers(&self) -> &[Archer] {
        &self.archers
    }

    pub fn archer(&self, index: usize) -> &Archer {
        &self.archers[index]
    }

    pub fn archer_mut(&mut self, index: usize) -> &mut Archer {
        &mut self.archers[index]
    }

    /// Team points in the current round.
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Special shots taken in the current game.
    pub fn total_special_shots(&self) -> u32 {
        self.total_special_shots
    }

    /// Name of the last archer to take a special shot in the current game.
    pub fn special_archer(&self) -> Option<&str> {
        self.special_archer.as_deref()
    }

    /// Times the same archer took the special shot in consecutive rounds.
    pub fn repeated_special_archer(&self) -> u32 {
        self.repeated_special_archer
    }

    /// Round snapshots for the whole tournament.
    pub fn scores(&self) -> &[TeamRoundScore] {
        &self.scores
    }

    /// Team points per round, for every round played.
    pub fn points_by_round(&self) -> &[u32] {
        &self.points_by_round
    }

    /// Special shots per completed game.
    pub fn special_shots_by_game(&self) -> &[u32] {
        &self.special_shots_by_game
    }

    /// Experience gained by the team per completed game.
    pub fn experience_by_game(&self) -> &[u32] {
        &self.experience_by_game
    }

    pub fn games_won(&self) -> u32 {
        self.games_won
    }

    pub fn add_points(&mut self, points: u32) {
        self.total_points += points;
    }

    /// Experience gained by all archers in the current game.
    pub fn experience_gained(&self) -> u32 {
        self.archers.iter().map(Archer::experience_gained).sum()
    }

    /// Shoot ordinary shots with one archer until it tires, crediting the team.
    /// Returns the points scored.
    pub fn shoot_until_tired(
        &mut self,
        index: usize,
        source: &mut dyn RandomSource,
        at: RoundId,
    ) -> u32 {
        let archer = &mut self.archers[index];
        let mut scored = 0;
        while archer.can_continue() {
            scored += archer.take_ordinary_shot(source, at);
        }
        self.total_points += scored;
        scored
    }

    /// Additional shot by one archer, credited to both archer and team.
    pub fn take_additional_shot(
        &mut self,
        index: usize,
        source: &mut dyn RandomSource,
        at: RoundId,
    ) -> u32 {
        let points = self.archers[index].take_additional_shot(source, at);
        self.total_points += points;
        points
    }

    /// Index of the luckiest archer; the first one wins on equal luck.
    pub fn most_lucky_archer(&self) -> usize {
        first_max_by(&self.archers, |a, best| a.luck() > best.luck())
    }

    /// Index of the most experienced archer; the first one wins on equal experience.
    pub fn most_experienced_archer(&self) -> usize {
        first_max_by(&self.archers, |a, best| {
            a.current_experience() > best.current_experience()
        })
    }

    /// Indices of every archer sharing the highest round score, in roster order.
    pub fn best_archers_by_points(&self) -> Vec<usize> {
        let mut best: Vec<usize> = Vec::new();
        let mut top = 0;
        for (i, archer) in self.archers.iter().enumerate() {
            let points = archer.total_points();
            if best.is_empty() || points > top {
                best.clear();
                best.push(i);
                top = points;
            } else if points == top {
                best.push(i);
            }
        }
        best
    }

    /// Record that `index` earned this round's special shot. Returns whether
    /// the same archer also earned the previous one in this game.
    pub fn register_special_shot(&mut self, index: usize) -> bool {
        let name = self.archers[index].name();
        if self.special_archer.as_deref() == Some(name) {
            self.repeated_special_archer += 1;
            trace!(team = %self.name, archer = name, "repeated special archer");
            true
        } else {
            self.special_archer = Some(name.to_string());
            false
        }
    }

    pub fn add_special_shot(&mut self) {
        self.total_special_shots += 1;
    }

    /// Append every archer's round points to its cumulative series.
    pub fn accumulate_round_points(&mut self) {
        for archer in &mut self.archers {
            archer.accumulate_round_points();
        }
    }

    /// Snapshot the round score into the team's series.
    pub fn snapshot_round_score(&mut self, at: RoundId) {
        self.scores.push(TeamRoundScore {
            game: at.game,
            round: at.round,
            points: self.total_points,
            experience_gained: self.experience_gained(),
            special_shots: self.total_special_shots,
        });
        self.points_by_round.push(self.total_points);
    }

    pub fn result(&self) -> TeamResult {
        TeamResult {
            name: self.name.clone(),
            points: self.total_points,
        }
    }

    /// Round-scoped reset: only the round total. The special archer is kept
    /// so repeats can be seen in the next round.
    pub fn end_round(&mut self) {
        self.total_points = 0;
    }

    /// Close the game: append per-game series, give every archer a fresh luck
    /// and resistance draw, and clear game-scoped state.
    pub fn end_game(&mut self, source: &mut dyn RandomSource) -> Result<(), PoolError> {
        self.experience_by_game.push(self.experience_gained());
        self.special_shots_by_game.push(self.total_special_shots);
        for archer in &mut self.archers {
            let luck = source.take_luck()?;
            let resistance = source.take_resistance()?;
            archer.end_game(luck, resistance);
        }
        self.total_points = 0;
        self.total_special_shots = 0;
        self.special_archer = None;
        Ok(())
    }

    pub fn record_game_won(&mut self) {
        self.games_won += 1;
    }
}

/// Scan left to right, replacing the best only when `beats` holds strictly.
fn first_max_by<T>(items: &[T], beats: impl Fn(&T, &T) -> bool) -> usize {
    let mut best = 0;
    for (i, item) in items.iter().enumerate().skip(1) {
        if beats(item, &items[best]) {
            best = i;
        }
    }
    best
}
