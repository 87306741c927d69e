//! Score arithmetic - turns final round counts into a breakdown and a
//! leaderboard record.
//!
//! Pure functions; the engine supplies the counts, the clock, and the
//! odometer reading.

use serde::{Deserialize, Serialize};

/// Reference time limit the scoring curve is normalised against (15 minutes).
const REFERENCE_LIMIT_SECS: f64 = 900.0;

/// Final counts of a round, as fed to the scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Boxes resolved correctly.
    pub correct: u32,
    /// Total boxes the job demanded. Forced to at least 1 before any
    /// division.
    pub required: u32,
    pub misplaced: u32,
    /// Vehicle odometer for the round, metres.
    pub distance: f64,
    pub elapsed_secs: f64,
    pub time_limit_secs: f64,
}

/// Itemised score plus the multiplied total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub box_score: f64,
    pub time_score: f64,
    pub incorrect_score: f64,
    pub trip_score: f64,
    pub difficulty_modifier: f64,
    pub final_score: f64,
}

impl ScoreBreakdown {
    pub fn compute(inputs: &ScoreInputs) -> Self {
        let required = inputs.required.max(1) as f64;
        let correct = inputs.correct as f64;
        let limit = inputs.time_limit_secs.max(1.0);

        let box_score = correct * 100.0;
        let time_score = (1.0 - inputs.elapsed_secs / limit)
            * (limit / REFERENCE_LIMIT_SECS * 1000.0)
            * (correct / required);
        let incorrect_score = inputs.misplaced as f64 * -100.0;
        let trip_score = (1.0 - inputs.distance / (required * 100.0)) * 10.0;
        let difficulty_modifier =
            1.0 + required / 10.0 + (1.0 - limit / REFERENCE_LIMIT_SECS).min(0.0);
        let final_score =
            (box_score + time_score + incorrect_score + trip_score) * difficulty_modifier;

        Self {
            box_score,
            time_score,
            incorrect_score,
            trip_score,
            difficulty_modifier,
            final_score,
        }
    }

    /// Rounds the total into a leaderboard row.
    pub fn record(&self, name: impl Into<String>) -> ScoreRecord {
        ScoreRecord {
            name: name.into(),
            points: self.final_score.round() as i32,
        }
    }
}

/// One leaderboard row. The on-disk table is a flat ordered list of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub points: i32,
}
