//! Winner resolution shared by rounds and games.

use sim_core::{RoundsWon, TeamResult};

/// Outcome of looking for a single best entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Leader<T> {
    /// Nothing to compare.
    Empty,
    /// A unique maximum.
    Sole(T),
    /// The maximum is shared by two or more entries.
    Tied,
}

impl<T> Leader<T> {
    /// The sole leader, treating a tie like no winner at all.
    pub fn into_option(self) -> Option<T> {
        match self {
            Leader::Sole(t) => Some(t),
            Leader::Empty | Leader::Tied => None,
        }
    }
}

/// Find the unique maximum by `key`. A strictly greater entry replaces the
/// current best; an equal one marks the maximum as shared until something
/// strictly greater shows up.
pub fn sole_leader<T, K: PartialOrd>(
    items: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Leader<T> {
    let mut best: Option<(K, T)> = None;
    let mut tied = false;
    for item in items {
        let k = key(&item);
        let (replace, equal) = match &best {
            None => (true, false),
            Some((top, _)) => (k > *top, k == *top),
        };
        if replace {
            best = Some((k, item));
            tied = false;
        } else if equal {
            tied = true;
        }
    }
    match best {
        None => Leader::Empty,
        Some(_) if tied => Leader::Tied,
        Some((_, item)) => Leader::Sole(item),
    }
}

/// Round team resolution: a shared top total leaves the round without a
/// winning team and marks it tied. There is no shoot-off between teams.
pub fn resolve_team(totals: impl IntoIterator<Item = TeamResult>) -> (Option<TeamResult>, bool) {
    match sole_leader(totals, |t| t.points) {
        Leader::Sole(team) => (Some(team), false),
        Leader::Tied => (None, true),
        Leader::Empty => (None, false),
    }
}

/// Count wins per name, keeping first-appearance order.
pub fn count_wins<'a>(winners: impl IntoIterator<Item = &'a str>) -> Vec<RoundsWon> {
    let mut tally: Vec<RoundsWon> = Vec::new();
    for name in winners {
        match tally.iter_mut().find(|w| w.name == name) {
            Some(w) => w.rounds_won += 1,
            None => tally.push(RoundsWon {
                name: name.to_string(),
                rounds_won: 1,
            }),
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(points: &[u32]) -> Vec<TeamResult> {
        points
            .iter()
            .enumerate()
            .map(|(i, &points)| TeamResult {
                name: format!("Team {}", i + 1),
                points,
            })
            .collect()
    }

    #[test]
    fn equal_team_totals_tie_the_round() {
        assert_eq!(resolve_team(teams(&[10, 10])), (None, true));
    }

    #[test]
    fn higher_team_total_wins() {
        let (best, tied) = resolve_team(teams(&[12, 10]));
        assert_eq!(best.map(|t| t.name), Some("Team 1".to_string()));
        assert!(!tied);
    }

    #[test]
    fn tie_below_the_top_does_not_matter() {
        let (best, tied) = resolve_team(teams(&[10, 10, 12]));
        assert_eq!(best.map(|t| t.points), Some(12));
        assert!(!tied);
        let (best, tied) = resolve_team(teams(&[12, 10, 10]));
        assert_eq!(best.map(|t| t.points), Some(12));
        assert!(!tied);
    }

    #[test]
    fn tie_at_top_after_lower_entries() {
        assert_eq!(resolve_team(teams(&[5, 10, 10])), (None, true));
        assert_eq!(resolve_team(Vec::new()), (None, false));
    }

    #[test]
    fn sole_leader_on_floats() {
        assert_eq!(sole_leader([1.0, 3.0, 2.0], |x| *x), Leader::Sole(3.0));
        assert_eq!(sole_leader([3.0, 1.0, 3.0], |x| *x), Leader::Tied);
        assert_eq!(sole_leader(Vec::<f64>::new(), |x| *x).into_option(), None);
    }

    #[test]
    fn wins_are_counted_in_first_seen_order() {
        let tally = count_wins(["B", "A", "B", "B"]);
        assert_eq!(
            tally,
            vec![
                RoundsWon {
                    name: "B".into(),
                    rounds_won: 3
                },
                RoundsWon {
                    name: "A".into(),
                    rounds_won: 1
                },
            ]
        );
    }
}
