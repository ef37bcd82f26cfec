//! Archers: shot economy, personal score ledger and experience.

use crate::config::TournamentConfig;
use crate::random::RandomSource;
use crate::record::{ArcherResult, RoundId, ShotRecord};
use crate::scoring::{Gender, ScoreTable};
use std::collections::BTreeMap;

/// An individual participant, owned by exactly one team.
#[derive(Clone, Debug)]
pub struct Archer {
    name: String,
    team: String,
    gender: Gender,
    table: ScoreTable,
    shot_cost: i32,
    initial_experience: u32,
    current_experience: u32,
    current_resistance: i32,
    used_resistance: i32,
    luck: f64,
    total_points: u32,
    round_points: BTreeMap<u32, u32>,
    shots: Vec<ShotRecord>,
    accumulated_points: Vec<u64>,
    luckiest_games: u32,
    experienced_games: u32,
}

impl Archer {
    /// Create an archer with its starting resistance and luck. The score table
    /// is fixed here from `gender` and never reassigned.
    pub fn new(
        name: impl Into<String>,
        team: impl Into<String>,
        gender: Gender,
        resistance: i32,
        luck: f64,
        config: &TournamentConfig,
    ) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            gender,
            table: gender.score_table(),
            shot_cost: config.shot_cost,
            initial_experience: config.initial_experience,
            current_experience: config.initial_experience,
            current_resistance: resistance,
            used_resistance: 0,
            luck,
            total_points: 0,
            round_points: BTreeMap::new(),
            shots: Vec::new(),
            accumulated_points: Vec::new(),
            luckiest_games: 0,
            experienced_games: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn luck(&self) -> f64 {
        self.luck
    }

    pub fn current_resistance(&self) -> i32 {
        self.current_resistance
    }

    pub fn used_resistance(&self) -> i32 {
        self.used_resistance
    }

    pub fn current_experience(&self) -> u32 {
        self.current_experience
    }

    /// Personal points in the current round.
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Personal points per round id for the current game.
    pub fn round_points(&self) -> &BTreeMap<u32, u32> {
        &self.round_points
    }

    /// Every personal shot taken in the current game.
    pub fn shots(&self) -> &[ShotRecord] {
        &self.shots
    }

    /// Running cumulative points, one entry per round played. Never reset.
    pub fn accumulated_points(&self) -> &[u64] {
        &self.accumulated_points
    }

    /// Games in which this archer was the luckiest.
    pub fn luckiest_games(&self) -> u32 {
        self.luckiest_games
    }

    /// Games in which this archer gained the most experience.
    pub fn experienced_games(&self) -> u32 {
        self.experienced_games
    }

    /// Experience gained since the start of the current game.
    pub fn experience_gained(&self) -> u32 {
        self.current_experience.saturating_sub(self.initial_experience)
    }

    /// Whether enough resistance is left for another ordinary shot.
    pub fn can_continue(&self) -> bool {
        self.current_resistance >= self.shot_cost
    }

    /// Shoot, score personally and spend one shot's worth of resistance.
    pub fn take_ordinary_shot(&mut self, source: &mut dyn RandomSource, at: RoundId) -> u32 {
        let points = self.score_shot(source, at);
        self.current_resistance -= self.shot_cost;
        self.used_resistance += self.shot_cost;
        points
    }

    /// Shoot and score personally without spending resistance.
    pub fn take_additional_shot(&mut self, source: &mut dyn RandomSource, at: RoundId) -> u32 {
        self.score_shot(source, at)
    }

    /// Shoot for the team only: nothing is recorded against the archer.
    pub fn take_special_shot(&self, source: &mut dyn RandomSource) -> u32 {
        self.table.convert(source.live_uniform())
    }

    fn score_shot(&mut self, source: &mut dyn RandomSource, at: RoundId) -> u32 {
        let points = self.table.convert(source.live_uniform());
        *self.round_points.entry(at.round).or_insert(0) += points;
        self.shots.push(ShotRecord {
            game: at.game,
            round: at.round,
            points,
        });
        self.total_points += points;
        points
    }

    /// Append this round's points to the cumulative series.
    pub fn accumulate_round_points(&mut self) {
        let previous = self.accumulated_points.last().copied().unwrap_or(0);
        self.accumulated_points
            .push(previous + u64::from(self.total_points));
    }

    pub fn grant_experience(&mut self, amount: u32) {
        self.current_experience += amount;
    }

    /// Restore spent resistance minus `withheld`, take a new luck value and
    /// clear the round score. Restoration is uncapped.
    pub fn end_round(&mut self, luck: f64, withheld: i32) {
        self.current_resistance += self.used_resistance - withheld;
        self.used_resistance = 0;
        self.luck = luck;
        self.total_points = 0;
    }

    /// Return to fresh per-game state. Cross-game counters and the cumulative
    /// series are kept.
    pub fn end_game(&mut self, luck: f64, resistance: i32) {
        self.luck = luck;
        self.current_resistance = resistance;
        self.used_resistance = 0;
        self.current_experience = self.initial_experience;
        self.total_points = 0;
        self.round_points.clear();
        self.shots.clear();
    }

    pub fn record_luckiest_game(&mut self) {
        self.luckiest_games += 1;
    }

    pub fn record_experienced_game(&mut self) {
        self.experienced_games += 1;
    }

    /// Snapshot of the archer as a round winner.
    pub fn result(&self) -> ArcherResult {
        ArcherResult {
            name: self.name.clone(),
            team: self.team.clone(),
            gender: self.gender,
            points: self.total_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use proptest::prelude::*;

    const AT: RoundId = RoundId { game: 0, round: 0 };

    fn archer(gender: Gender, resistance: i32) -> Archer {
        Archer::new("A", "T", gender, resistance, 1.0, &TournamentConfig::default())
    }

    fn shoot_until_tired(a: &mut Archer, src: &mut ScriptedSource) -> u32 {
        let mut shots = 0;
        while a.can_continue() {
            a.take_ordinary_shot(src, AT);
            shots += 1;
        }
        shots
    }

    #[test]
    fn ordinary_shots_spend_resistance_and_score() {
        let mut src = ScriptedSource::constant(0.1);
        let mut a = archer(Gender::Male, 27);
        assert_eq!(shoot_until_tired(&mut a, &mut src), 5);
        assert_eq!(a.current_resistance(), 2);
        assert_eq!(a.used_resistance(), 25);
        assert_eq!(a.total_points(), 50);
        assert_eq!(a.shots().len(), 5);
        assert_eq!(a.round_points().get(&0), Some(&50));
    }

    #[test]
    fn special_shot_leaves_archer_untouched() {
        let mut src = ScriptedSource::constant(0.3);
        let a = archer(Gender::Female, 30);
        assert_eq!(a.take_special_shot(&mut src), 9);
        assert_eq!(a.total_points(), 0);
        assert!(a.shots().is_empty());
        assert_eq!(a.current_resistance(), 30);
    }

    #[test]
    fn additional_shot_scores_without_resistance() {
        let mut src = ScriptedSource::constant(0.5);
        let mut a = archer(Gender::Female, 30);
        assert_eq!(a.take_additional_shot(&mut src, AT), 9);
        assert_eq!(a.total_points(), 9);
        assert_eq!(a.current_resistance(), 30);
        assert_eq!(a.used_resistance(), 0);
    }

    #[test]
    fn end_round_restores_spent_resistance_minus_withheld() {
        let mut src = ScriptedSource::constant(0.1);
        let mut a = archer(Gender::Male, 12);
        shoot_until_tired(&mut a, &mut src);
        assert_eq!(a.current_resistance(), 2);
        a.end_round(2.5, 3);
        assert_eq!(a.current_resistance(), 9);
        assert_eq!(a.used_resistance(), 0);
        assert_eq!(a.total_points(), 0);
        assert_eq!(a.luck(), 2.5);
    }

    #[test]
    fn accumulated_points_are_running_sums() {
        let mut src = ScriptedSource::constant(0.1);
        let mut a = archer(Gender::Male, 10);
        shoot_until_tired(&mut a, &mut src);
        a.accumulate_round_points();
        a.end_round(1.0, 0);
        a.accumulate_round_points();
        a.end_round(1.0, 0);
        shoot_until_tired(&mut a, &mut src);
        a.accumulate_round_points();
        assert_eq!(a.accumulated_points(), &[20, 20, 40]);
    }

    #[test]
    fn experience_and_game_reset() {
        let mut src = ScriptedSource::constant(0.1);
        let mut a = archer(Gender::Male, 10);
        a.grant_experience(3);
        a.grant_experience(3);
        assert_eq!(a.experience_gained(), 6);
        shoot_until_tired(&mut a, &mut src);
        a.accumulate_round_points();
        a.record_luckiest_game();
        a.end_game(0.7, 40);
        assert_eq!(a.experience_gained(), 0);
        assert_eq!(a.current_resistance(), 40);
        assert!(a.shots().is_empty());
        assert!(a.round_points().is_empty());
        assert_eq!(a.accumulated_points(), &[20]);
        assert_eq!(a.luckiest_games(), 1);
    }

    proptest! {
        #[test]
        fn shots_per_round_is_resistance_over_cost(resistance in 0i32..200, cost in 1i32..20) {
            let cfg = TournamentConfig { shot_cost: cost, ..Default::default() };
            let mut a = Archer::new("A", "T", Gender::Female, resistance, 1.0, &cfg);
            let mut src = ScriptedSource::constant(0.99);
            let shots = shoot_until_tired(&mut a, &mut src);
            prop_assert_eq!(shots as i32, resistance / cost);
            prop_assert!(a.current_resistance() >= 0);
            prop_assert!(a.current_resistance() < cost);
            prop_assert_eq!(a.used_resistance(), shots as i32 * cost);
        }

        #[test]
        fn later_rounds_shoot_from_restored_resistance(
            resistance in 0i32..200,
            cost in 1i32..20,
            withheld in 0i32..4,
        ) {
            let cfg = TournamentConfig { shot_cost: cost, ..Default::default() };
            let mut a = Archer::new("A", "T", Gender::Male, resistance, 1.0, &cfg);
            let mut src = ScriptedSource::constant(0.5);
            shoot_until_tired(&mut a, &mut src);
            a.end_round(1.0, withheld);
            let start = a.current_resistance();
            prop_assert_eq!(start, resistance - withheld);
            let shots = shoot_until_tired(&mut a, &mut src);
            prop_assert_eq!(shots as i32, start.max(0) / cost);
        }

        #[test]
        fn experience_gained_only_grows_with_grants(grants in proptest::collection::vec(0u32..10, 0..20)) {
            let mut a = archer(Gender::Male, 30);
            let mut last = a.experience_gained();
            for g in grants {
                a.grant_experience(g);
                prop_assert!(a.experience_gained() >= last);
                last = a.experience_gained();
            }
        }
    }
}
