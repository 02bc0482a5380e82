use std::fmt;

use crate::state::{Match, PlayerGoalEstimate, Prediction, Team};

pub const PROBABILITY_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    PartialScore { match_id: String },
    ProbabilitySum { sum: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::PartialScore { match_id } => {
                write!(f, "match {match_id} has only one side of the score")
            }
            ValidationError::ProbabilitySum { sum } => {
                write!(f, "H/D/A probabilities sum to {sum:.3}, expected 1.0")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Rule-based stand-in for a forecast model. Only the home side drives the
/// outcome split; the player estimates are placeholders.
pub fn generate_prediction(home: &Team, _away: &Team) -> Prediction {
    let (p_home, p_draw, p_away, scoreline) = match home.name.as_str() {
        "Brazil" | "Brasil" => (0.70, 0.15, 0.15, "3-1"),
        "Mexico" | "México" => (0.45, 0.30, 0.25, "2-1"),
        _ => (0.35, 0.30, 0.35, "1-1"),
    };

    Prediction {
        p_home,
        p_draw,
        p_away,
        scoreline: scoreline.to_string(),
        scorers: vec![
            estimate("Player A", 1.5, 0.85),
            estimate("Player B", 0.9, 0.60),
        ],
        factors: vec![
            format!("Historical form (#{})", home.ranking),
            "Tournament trend".to_string(),
            "Effective possession".to_string(),
        ],
    }
}

pub fn validate_prediction(p: &Prediction) -> Result<(), ValidationError> {
    let sum = p.p_home + p.p_draw + p.p_away;
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE || !sum.is_finite() {
        return Err(ValidationError::ProbabilitySum { sum });
    }
    Ok(())
}

/// Scores must be both present or both absent; the prediction must be normalised.
pub fn validate_match(m: &Match) -> Result<(), ValidationError> {
    if m.home_score.is_some() != m.away_score.is_some() {
        return Err(ValidationError::PartialScore {
            match_id: m.id.clone(),
        });
    }
    validate_prediction(&m.prediction)
}

fn estimate(name: &str, expected_goals: f64, goal_probability: f64) -> PlayerGoalEstimate {
    PlayerGoalEstimate {
        name: name.to_string(),
        expected_goals,
        goal_probability,
    }
}
