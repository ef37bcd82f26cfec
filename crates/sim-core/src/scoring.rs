//! Score tables: map a uniform sample in `[0, 1)` to discrete points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Archer gender, which selects the score table used for every shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Assign a gender from a uniform draw: at or below `female_threshold` is female.
    pub fn from_sample(sample: f64, female_threshold: f64) -> Self {
        if sample <= female_threshold {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    /// Score table wired to archers of this gender.
    pub fn score_table(self) -> ScoreTable {
        match self {
            Gender::Male => ScoreTable::Male,
            Gender::Female => ScoreTable::Female,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive upper bounds paired with the points they award, checked in order.
/// The last entry is the fallback for anything above the final bound.
type Thresholds = &'static [(f64, u32)];

const FEMALE: Thresholds = &[(0.25, 10), (0.65, 9), (0.95, 8), (1.0, 0)];
const MALE: Thresholds = &[(0.15, 10), (0.45, 9), (0.92, 8), (1.0, 0)];
const FATIGUE: Thresholds = &[(0.33, 1), (0.66, 2), (1.0, 3)];

/// Pure conversion strategies from a uniform sample to an integer outcome.
///
/// `Male` and `Female` produce shot points in `{0, 8, 9, 10}`. `Fatigue` is the
/// resistance withheld at round-end restoration, in `{1, 2, 3}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTable {
    Female,
    Male,
    Fatigue,
}

impl ScoreTable {
    fn thresholds(self) -> Thresholds {
        match self {
            ScoreTable::Female => FEMALE,
            ScoreTable::Male => MALE,
            ScoreTable::Fatigue => FATIGUE,
        }
    }

    /// Convert a sample in `[0, 1)` to its bucket value.
    ///
    /// Callers guarantee the sample range; anything past the last bound falls
    /// into the last bucket.
    pub fn convert(self, sample: f64) -> u32 {
        let table = self.thresholds();
        table
            .iter()
            .find(|(bound, _)| sample <= *bound)
            .or_else(|| table.last())
            .map_or(0, |&(_, points)| points)
    }

    /// Every value this table can produce, in table order.
    pub fn outcomes(self) -> impl Iterator<Item = u32> {
        self.thresholds().iter().map(|&(_, points)| points)
    }

    /// Width of each bucket over `[0, 1]`, in table order.
    pub fn bucket_widths(self) -> Vec<f64> {
        let mut lower = 0.0;
        self.thresholds()
            .iter()
            .map(|&(bound, _)| {
                let width = bound - lower;
                lower = bound;
                width
            })
            .collect()
    }
}
