//! Tournament summary report, rendered as text or JSON.

use crate::game::Game;
use crate::tournament::Tournament;
use serde::Serialize;
use sim_core::{Archer, ExperienceRecord, Gender, LuckRecord, RandomSource, RoundsWon, Team};
use std::fmt::Write;

/// Counts split by gender.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenderTally {
    pub male: u32,
    pub female: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArcherStanding {
    pub name: String,
    pub team: String,
    pub gender: Gender,
    pub points: u64,
    pub luckiest_games: u32,
    pub experienced_games: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamStanding {
    pub name: String,
    pub points: u64,
    pub games_won: u32,
    pub special_shots: u32,
    pub repeated_special_archer: u32,
}

/// One row per played game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSummary {
    pub game: u32,
    pub best_team: Option<RoundsWon>,
    pub best_archer: Option<RoundsWon>,
    pub luckiest_archer: Option<LuckRecord>,
    pub most_experienced: Vec<ExperienceRecord>,
    pub tied_rounds: u32,
    pub unresolved_rounds: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TournamentReport {
    pub seed: u64,
    pub games: u32,
    pub rounds_per_game: u32,
    pub archers: GenderTally,
    pub round_wins: GenderTally,
    pub winning_gender: Gender,
    pub tied_rounds: u32,
    pub tied_round_frequency: f64,
    pub unresolved_rounds: u32,
    pub luckiest_archer: Option<String>,
    pub most_experienced_archer: Option<String>,
    pub best_team: Option<String>,
    pub male_experience: Vec<u64>,
    pub female_experience: Vec<u64>,
    pub archer_standings: Vec<ArcherStanding>,
    pub team_standings: Vec<TeamStanding>,
    pub game_summaries: Vec<GameSummary>,
}

impl ArcherStanding {
    fn of(archer: &Archer) -> Self {
        Self {
            name: archer.name().to_string(),
            team: archer.team().to_string(),
            gender: archer.gender(),
            points: archer.accumulated_points().last().copied().unwrap_or(0),
            luckiest_games: archer.luckiest_games(),
            experienced_games: archer.experienced_games(),
        }
    }
}

impl TeamStanding {
    fn of(team: &Team) -> Self {
        Self {
            name: team.name().to_string(),
            points: team.points_by_round().iter().map(|&p| u64::from(p)).sum(),
            games_won: team.games_won(),
            special_shots: team.special_shots_by_game().iter().sum(),
            repeated_special_archer: team.repeated_special_archer(),
        }
    }
}

impl GameSummary {
    fn of(game: &Game) -> Self {
        Self {
            game: game.id(),
            best_team: game.best_team().cloned(),
            best_archer: game.best_archer().cloned(),
            luckiest_archer: game.luckiest_archer().cloned(),
            most_experienced: game.most_experienced().to_vec(),
            tied_rounds: game.tied_rounds(),
            unresolved_rounds: game.unresolved_rounds(),
        }
    }
}

impl TournamentReport {
    /// Snapshot every tournament accessor plus one row per game.
    pub fn from_tournament<R: RandomSource>(tournament: &Tournament<R>) -> Self {
        let config = tournament.config();
        let experience = tournament.experience_by_gender();
        Self {
            seed: config.seed,
            games: config.games,
            rounds_per_game: config.rounds_per_game,
            archers: tournament.archers_by_gender(),
            round_wins: tournament.gender_wins(),
            winning_gender: tournament.winning_gender(),
            tied_rounds: tournament.tied_rounds(),
            tied_round_frequency: tournament.tied_round_frequency(),
            unresolved_rounds: tournament.unresolved_rounds(),
            luckiest_archer: tournament.luckiest_archer().map(|a| a.name().to_string()),
            most_experienced_archer: tournament
                .most_experienced_archer()
                .map(|a| a.name().to_string()),
            best_team: tournament.best_team().map(|t| t.name().to_string()),
            male_experience: experience.male.to_vec(),
            female_experience: experience.female.to_vec(),
            archer_standings: tournament.archers().map(ArcherStanding::of).collect(),
            team_standings: tournament.teams().iter().map(TeamStanding::of).collect(),
            game_summaries: tournament.games().iter().map(GameSummary::of).collect(),
        }
    }

    /// Human-readable summary. `show_games` limits the per-game rows.
    pub fn to_text(&self, show_games: usize) -> String {
        let mut out = String::new();
        let rule = "═══════════════════════════════════════════════════════════════";
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "                    ARCHERY TOURNAMENT");
        let _ = writeln!(out, "{rule}\n");
        let _ = writeln!(
            out,
            "Games: {}  Rounds per game: {}  Seed: {}",
            self.games, self.rounds_per_game, self.seed
        );
        let _ = writeln!(
            out,
            "Archers: {} male, {} female\n",
            self.archers.male, self.archers.female
        );

        let _ = writeln!(out, "── RESULTS ──────────────────────────────────────────────────────");
        let _ = writeln!(out, "  Winning gender:      {}", self.winning_gender);
        let _ = writeln!(
            out,
            "  Round wins:          {} male, {} female",
            self.round_wins.male, self.round_wins.female
        );
        let _ = writeln!(
            out,
            "  Tied rounds:         {} ({:.2}%)",
            self.tied_rounds, self.tied_round_frequency
        );
        let _ = writeln!(out, "  Unresolved rounds:   {}", self.unresolved_rounds);
        let _ = writeln!(out, "  Luckiest archer:     {}", or_none(&self.luckiest_archer));
        let _ = writeln!(
            out,
            "  Most experienced:    {}",
            or_none(&self.most_experienced_archer)
        );
        let _ = writeln!(out, "  Best team:           {}\n", or_none(&self.best_team));

        let _ = writeln!(out, "── TEAMS ────────────────────────────────────────────────────────");
        let _ = writeln!(out, "  Team        Won     Points   Specials  Repeats");
        for team in &self.team_standings {
            let _ = writeln!(
                out,
                "  {:<10} {:>4} {:>10} {:>10} {:>8}",
                team.name, team.games_won, team.points, team.special_shots, team.repeated_special_archer
            );
        }
        out.push('\n');

        if show_games > 0 {
            let _ = writeln!(out, "── GAMES ────────────────────────────────────────────────────────");
            for game in self.game_summaries.iter().take(show_games) {
                let _ = writeln!(
                    out,
                    "  Game {:>4}: team {:<10} archer {:<12} luckiest {:<12} tied {}",
                    game.game + 1,
                    game.best_team.as_ref().map_or("-", |w| w.name.as_str()),
                    game.best_archer.as_ref().map_or("-", |w| w.name.as_str()),
                    game.luckiest_archer.as_ref().map_or("-", |l| l.name.as_str()),
                    game.tied_rounds
                );
            }
            out.push('\n');
        }
        let _ = writeln!(out, "{rule}");
        out
    }

    /// Pretty JSON for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn or_none(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("none")
}
