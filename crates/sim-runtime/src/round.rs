//! One scoring cycle for every team.
//!
//! A round runs straight through: shooting, special shots, team and archer
//! resolution, score snapshots, then resistance restoration. Nothing of the
//! round survives except the value records kept here.

use crate::error::SimError;
use crate::resolve::resolve_team;
use sim_core::{
    ArcherResult, LuckRecord, RandomSource, RoundId, ScoreTable, Team, TeamResult,
    TournamentConfig,
};
use tracing::{trace, warn};

/// How the round's best archer was decided.
#[derive(Clone, Debug, PartialEq)]
pub enum ArcherResolution {
    /// A unique best archer, possibly after `shoot_offs` shoot-off iterations.
    Winner { result: ArcherResult, shoot_offs: u32 },
    /// Still tied after the configured maximum of shoot-offs.
    Unresolved {
        contenders: Vec<String>,
        shoot_offs: u32,
    },
}

/// A played round and its resolved outcome.
#[derive(Clone, Debug)]
pub struct Round {
    id: RoundId,
    best_team: Option<TeamResult>,
    tied: bool,
    archer: ArcherResolution,
    luckiest_archer: Option<LuckRecord>,
}

impl Round {
    /// Play one round over `teams`.
    pub fn play(
        id: RoundId,
        teams: &mut [Team],
        source: &mut dyn RandomSource,
        config: &TournamentConfig,
    ) -> Result<Self, SimError> {
        let luckiest_archer = shoot(teams, source, id);
        special_shots(teams, source, id);

        // Cumulative series are appended before any tie is known.
        for team in teams.iter_mut() {
            team.accumulate_round_points();
        }
        let (best_team, tied) = resolve_team(teams.iter().map(Team::result));
        let archer = resolve_archer(teams, source, id, config);

        for team in teams.iter_mut() {
            team.snapshot_round_score(id);
        }
        restore(teams, source, config)?;

        trace!(
            game = id.game,
            round = id.round,
            team = best_team.as_ref().map(|t| t.name.as_str()),
            tied,
            "round played"
        );
        Ok(Self {
            id,
            best_team,
            tied,
            archer,
            luckiest_archer,
        })
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    /// Winning team, absent when the top total was shared.
    pub fn best_team(&self) -> Option<&TeamResult> {
        self.best_team.as_ref()
    }

    pub fn is_tied(&self) -> bool {
        self.tied
    }

    pub fn archer_resolution(&self) -> &ArcherResolution {
        &self.archer
    }

    /// Winning archer, absent when the shoot-off did not converge.
    pub fn best_archer(&self) -> Option<&ArcherResult> {
        match &self.archer {
            ArcherResolution::Winner { result, .. } => Some(result),
            ArcherResolution::Unresolved { .. } => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self.archer, ArcherResolution::Unresolved { .. })
    }

    /// Luckiest archer across all teams at the start of the round.
    pub fn luckiest_archer(&self) -> Option<&LuckRecord> {
        self.luckiest_archer.as_ref()
    }
}

/// Every archer shoots until tired. Tracks the luckiest archer seen, first
/// one kept on equal luck.
fn shoot(teams: &mut [Team], source: &mut dyn RandomSource, id: RoundId) -> Option<LuckRecord> {
    let mut luckiest: Option<LuckRecord> = None;
    for team in teams.iter_mut() {
        for i in 0..team.archers().len() {
            let archer = team.archer(i);
            if luckiest.as_ref().map_or(true, |l| archer.luck() > l.luck) {
                luckiest = Some(LuckRecord {
                    name: archer.name().to_string(),
                    luck: archer.luck(),
                });
            }
            team.shoot_until_tired(i, source, id);
        }
    }
    luckiest
}

/// Each team's luckiest archer shoots for the team. Earning it twice in a row
/// also buys an additional personal shot.
fn special_shots(teams: &mut [Team], source: &mut dyn RandomSource, id: RoundId) {
    for team in teams.iter_mut() {
        let i = team.most_lucky_archer();
        let points = team.archer(i).take_special_shot(source);
        if team.register_special_shot(i) {
            team.take_additional_shot(i, source, id);
        }
        team.add_special_shot();
        team.add_points(points);
    }
}

/// Merge every team's best archers and shoot off until one leads. The whole
/// initial tie shoots every time, so a contender who falls behind can catch up.
fn resolve_archer(
    teams: &mut [Team],
    source: &mut dyn RandomSource,
    id: RoundId,
    config: &TournamentConfig,
) -> ArcherResolution {
    let mut contenders: Vec<(usize, usize)> = Vec::new();
    let mut top = 0;
    for (t, team) in teams.iter().enumerate() {
        let best = team.best_archers_by_points();
        let Some(&first) = best.first() else {
            continue;
        };
        let points = team.archer(first).total_points();
        if contenders.is_empty() || points > top {
            contenders.clear();
            top = points;
        } else if points < top {
            continue;
        }
        contenders.extend(best.into_iter().map(|a| (t, a)));
    }

    let mut shoot_offs = 0;
    let mut leading = contenders.clone();
    while leading.len() > 1 {
        if shoot_offs == config.max_shoot_offs {
            let names: Vec<String> = leading
                .iter()
                .map(|&(t, a)| teams[t].archer(a).name().to_string())
                .collect();
            warn!(
                game = id.game,
                round = id.round,
                contenders = ?names,
                shoot_offs,
                "archer tie left unresolved"
            );
            return ArcherResolution::Unresolved {
                contenders: names,
                shoot_offs,
            };
        }
        shoot_offs += 1;
        // Everyone tied at the start keeps shooting, not only the current leaders.
        for &(t, a) in &contenders {
            teams[t].take_additional_shot(a, source, id);
        }
        leading = leaders(teams, &contenders);
    }

    match leading.first() {
        Some(&(t, a)) => {
            let archer = teams[t].archer_mut(a);
            archer.grant_experience(config.experience_grant);
            ArcherResolution::Winner {
                result: archer.result(),
                shoot_offs,
            }
        }
        None => ArcherResolution::Unresolved {
            contenders: Vec::new(),
            shoot_offs,
        },
    }
}

/// Contenders sharing the highest personal score, in their current order.
fn leaders(teams: &[Team], contenders: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let points = |&(t, a): &(usize, usize)| teams[t].archer(a).total_points();
    let top = contenders.iter().map(points).max().unwrap_or(0);
    contenders
        .iter()
        .copied()
        .filter(|c| points(c) == top)
        .collect()
}

/// Give back spent resistance minus a withheld amount, draw new luck, and
/// clear round totals. Veterans lose a fixed amount instead of a random one.
fn restore(
    teams: &mut [Team],
    source: &mut dyn RandomSource,
    config: &TournamentConfig,
) -> Result<(), SimError> {
    for team in teams.iter_mut() {
        for i in 0..team.archers().len() {
            let withheld = if team.archer(i).experience_gained() >= config.veteran_threshold {
                config.veteran_penalty
            } else {
                ScoreTable::Fatigue.convert(source.live_uniform()) as i32
            };
            let luck = source.take_luck()?;
            team.archer_mut(i).end_round(luck, withheld);
        }
        team.end_round();
    }
    Ok(())
}
