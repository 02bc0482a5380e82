use std::cmp::Ordering;

use crate::state::{Match, MatchStatus, PlayerGoalEstimate};

pub const TOP_SCORERS_DEFAULT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFilter {
    Today,
    Upcoming,
    Finished,
}

impl TimeFilter {
    pub const ALL: [TimeFilter; 3] = [TimeFilter::Today, TimeFilter::Upcoming, TimeFilter::Finished];

    pub fn label(self) -> &'static str {
        match self {
            TimeFilter::Today => "Today",
            TimeFilter::Upcoming => "Upcoming",
            TimeFilter::Finished => "Finished",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimeFilter::Today => TimeFilter::Upcoming,
            TimeFilter::Upcoming => TimeFilter::Finished,
            TimeFilter::Finished => TimeFilter::Today,
        }
    }

    /// `today` is compared to the match's date label for exact equality.
    pub fn accepts(self, m: &Match, today: &str) -> bool {
        match self {
            TimeFilter::Today => is_on_today(m, today),
            TimeFilter::Upcoming => m.status == MatchStatus::Upcoming && m.date != today,
            TimeFilter::Finished => m.status == MatchStatus::Finished,
        }
    }
}

/// Live, or upcoming with a date label equal to `today`.
pub fn is_on_today(m: &Match, today: &str) -> bool {
    match m.status {
        MatchStatus::Live => true,
        MatchStatus::Upcoming => m.date == today,
        MatchStatus::Finished => false,
    }
}

/// Matches in `filter`, in input order.
pub fn filter_by_category<'a>(matches: &'a [Match], filter: TimeFilter, today: &str) -> Vec<&'a Match> {
    matches.iter().filter(|m| filter.accepts(m, today)).collect()
}

/// First live match in input order. More than one live match is not expected;
/// if it happens the earliest entry wins.
pub fn find_live(matches: &[Match]) -> Option<&Match> {
    matches.iter().find(|m| m.is_live())
}

/// Highest expected-goals estimates across today's matches, at most `n` entries.
///
/// The sort is stable, so equal xG values keep their match/list order. NaN
/// estimates sort after every number.
pub fn top_scorers<'a>(matches: &'a [Match], today: &str, n: usize) -> Vec<&'a PlayerGoalEstimate> {
    let mut scorers: Vec<&PlayerGoalEstimate> = matches
        .iter()
        .filter(|m| is_on_today(m, today))
        .flat_map(|m| m.prediction.scorers.iter())
        .collect();
    scorers.sort_by(|a, b| xg_rank(b.expected_goals, a.expected_goals));
    scorers.truncate(n);
    scorers
}

// Total order for the descending sort: NaN ranks below every number,
// including negative infinity.
fn xg_rank(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.total_cmp(&b),
    }
}

/// "2 - 1" once a score exists, otherwise "VS".
pub fn score_label(m: &Match) -> String {
    match m.score() {
        Some((home, away)) => format!("{home} - {away}"),
        None => "VS".to_string(),
    }
}

/// Upset alert line for the open match whose away side is most likely to win.
pub fn value_alert(matches: &[Match]) -> Option<String> {
    let mut best: Option<&Match> = None;
    for m in matches.iter().filter(|m| m.status != MatchStatus::Finished) {
        match best {
            Some(b) if b.prediction.p_away >= m.prediction.p_away => {}
            _ => best = Some(m),
        }
    }
    let m = best?;
    Some(format!(
        "{} vs. {} - Result {} | {:.0}% {} (Upset alert!)",
        m.home.code,
        m.away.code,
        m.prediction.scoreline,
        m.prediction.p_away * 100.0,
        m.away.code
    ))
}
