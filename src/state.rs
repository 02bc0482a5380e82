use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::matches::{self, TimeFilter};
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(alias = "Próximo", alias = "upcoming")]
    Upcoming,
    #[serde(alias = "LIVE", alias = "live")]
    Live,
    #[serde(alias = "Finalizado", alias = "finished")]
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u32,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "codigoFIFA")]
    pub code: String,
    // Produced by an external rating process; lower is stronger.
    #[serde(alias = "rankingIA")]
    pub ranking: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGoalEstimate {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "golesEstimados")]
    pub expected_goals: f64,
    #[serde(alias = "probabilidadGol")]
    pub goal_probability: f64,
}

/// Forecast attached to a match. The H/D/A triple is expected to sum to 1.0 but
/// nothing upstream guarantees it; see `prediction::validate_prediction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(alias = "probabilidadLocal")]
    pub p_home: f64,
    #[serde(alias = "probabilidadEmpate")]
    pub p_draw: f64,
    #[serde(alias = "probabilidadVisitante")]
    pub p_away: f64,
    #[serde(alias = "posibleResultado")]
    pub scoreline: String,
    #[serde(default, alias = "topGoleadoresEstimados")]
    pub scorers: Vec<PlayerGoalEstimate>,
    #[serde(default, alias = "factoresClave")]
    pub factors: Vec<String>,
}

impl Prediction {
    /// No probabilities and no scoreline: the source carried no forecast.
    pub fn is_blank(&self) -> bool {
        self.p_home == 0.0
            && self.p_draw == 0.0
            && self.p_away == 0.0
            && self.scoreline.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    // Stable identity; filled in by `dataset::assign_ids` when the source omits it.
    #[serde(default)]
    pub id: String,
    #[serde(alias = "equipoLocal")]
    pub home: Team,
    #[serde(alias = "equipoVisitante")]
    pub away: Team,
    #[serde(default, alias = "marcadorLocal")]
    pub home_score: Option<u16>,
    #[serde(default, alias = "marcadorVisitante")]
    pub away_score: Option<u16>,
    // Display label ("15 Oct"), not a parsed calendar date.
    #[serde(alias = "fecha")]
    pub date: String,
    #[serde(alias = "estadio")]
    pub venue: String,
    #[serde(alias = "estado")]
    pub status: MatchStatus,
    // Missing forecasts are filled by `dataset::fill_missing_predictions`.
    #[serde(default, alias = "prediccionIA")]
    pub prediction: Prediction,
}

impl Match {
    pub fn is_live(&self) -> bool {
        self.status == MatchStatus::Live
    }

    pub fn score(&self) -> Option<(u16, u16)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[serde(alias = "subiendo")]
    Rising,
    #[serde(alias = "bajando")]
    Falling,
    #[serde(alias = "igual")]
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub rank: u32,
    pub name: String,
    pub win_probability: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stadium {
    pub name: String,
    pub city: String,
    pub country: String,
    pub capacity: u32,
    pub image: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamXg {
    pub team: String,
    pub xg: f64,
}

/// Tournament-wide analysis panel shown on the Analysis screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentAnalysis {
    pub effective_possession: u8,
    pub tournament_average: u8,
    pub key_factor: String,
    pub team_xg: Vec<TeamXg>,
    pub finding: String,
    pub justification: String,
}

impl TournamentAnalysis {
    /// Percentage points above (positive) or below the tournament average.
    pub fn possession_edge(&self) -> i16 {
        i16::from(self.effective_possession) - i16::from(self.tournament_average)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Matches,
    Detail { match_id: String },
    Rankings,
    Analysis,
    Stadiums,
    Profile,
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetMatches(Vec<Match>),
    Log(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub filter: TimeFilter,
    pub selected: usize,
    pub matches: Vec<Match>,
    pub loading: bool,
    pub today: String,
    pub scorers_today: String,
    pub top_n: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub rankings_selected: usize,
    pub stadiums_selected: usize,
    pub analysis_selected: usize,
    pub profile: Profile,
    pub profile_selected: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            screen: Screen::Matches,
            filter: TimeFilter::Today,
            selected: 0,
            matches: Vec::with_capacity(32),
            loading: true,
            today: config.today.clone(),
            scorers_today: config.scorers_today.clone(),
            top_n: config.top_n,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
            rankings_selected: 0,
            stadiums_selected: 0,
            analysis_selected: 0,
            profile: Profile::new(),
            profile_selected: 0,
        }
    }

    pub fn filtered_matches(&self) -> Vec<&Match> {
        matches::filter_by_category(&self.matches, self.filter, &self.today)
    }

    pub fn live_match(&self) -> Option<&Match> {
        matches::find_live(&self.matches)
    }

    pub fn top_scorers(&self) -> Vec<&PlayerGoalEstimate> {
        matches::top_scorers(&self.matches, &self.scorers_today, self.top_n)
    }

    pub fn value_alert(&self) -> Option<String> {
        matches::value_alert(&self.matches)
    }

    pub fn selected_match(&self) -> Option<&Match> {
        match &self.screen {
            Screen::Detail { match_id } => self.matches.iter().find(|m| &m.id == match_id),
            _ => self.filtered_matches().get(self.selected).copied(),
        }
    }

    pub fn open_selected(&mut self) {
        if self.screen != Screen::Matches {
            return;
        }
        let Some(id) = self.selected_match().map(|m| m.id.clone()) else {
            self.push_log("[INFO] No match selected");
            return;
        };
        self.screen = Screen::Detail { match_id: id };
    }

    pub fn back(&mut self) {
        if matches!(self.screen, Screen::Detail { .. }) {
            self.screen = Screen::Matches;
        }
    }

    pub fn cycle_filter(&mut self) {
        let selected_id = self.selected_match().map(|m| m.id.clone());
        self.filter = self.filter.next();
        self.selected = selected_id
            .and_then(|id| self.filtered_matches().iter().position(|m| m.id == id))
            .unwrap_or(0);
    }

    pub fn select_next(&mut self) {
        let total = self.list_len();
        let Some(cursor) = self.cursor_mut() else {
            return;
        };
        if total == 0 {
            *cursor = 0;
            return;
        }
        *cursor = (*cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.list_len();
        let Some(cursor) = self.cursor_mut() else {
            return;
        };
        if total == 0 {
            *cursor = 0;
        } else if *cursor == 0 {
            *cursor = total - 1;
        } else {
            *cursor -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.list_len();
        let Some(cursor) = self.cursor_mut() else {
            return;
        };
        if total == 0 {
            *cursor = 0;
        } else if *cursor >= total {
            *cursor = total - 1;
        }
    }

    pub fn toggle_selected_favorite(&mut self) {
        let Some(team) = self.profile.teams.get(self.profile_selected).cloned() else {
            return;
        };
        let on = self.profile.toggle_favorite(team.id);
        self.push_log(format!(
            "[INFO] {} {} favorites",
            team.name,
            if on { "added to" } else { "removed from" }
        ));
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn list_len(&self) -> usize {
        match self.screen {
            Screen::Matches => self.filtered_matches().len(),
            Screen::Rankings => crate::catalog::candidates().len(),
            Screen::Stadiums => crate::catalog::stadiums().len(),
            Screen::Profile => self.profile.teams.len(),
            Screen::Analysis => crate::catalog::analysis().team_xg.len(),
            Screen::Detail { .. } => 0,
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut usize> {
        match self.screen {
            Screen::Matches => Some(&mut self.selected),
            Screen::Rankings => Some(&mut self.rankings_selected),
            Screen::Stadiums => Some(&mut self.stadiums_selected),
            Screen::Profile => Some(&mut self.profile_selected),
            Screen::Analysis => Some(&mut self.analysis_selected),
            Screen::Detail { .. } => None,
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetMatches(matches) => {
            let selected_id = state.selected_match().map(|m| m.id.clone());
            state.matches = matches;
            state.loading = false;
            if let Screen::Detail { match_id } = &state.screen
                && !state.matches.iter().any(|m| &m.id == match_id)
            {
                state.screen = Screen::Matches;
            }
            if let Some(id) = selected_id
                && let Some(pos) = state.filtered_matches().iter().position(|m| m.id == id)
            {
                state.selected = pos;
            }
            let total = state.filtered_matches().len();
            state.selected = state.selected.min(total.saturating_sub(1));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn status_label(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Upcoming => "Upcoming",
        MatchStatus::Live => "LIVE",
        MatchStatus::Finished => "Finished",
    }
}

pub fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Rising => "rising",
        Trend::Falling => "falling",
        Trend::Flat => "flat",
    }
}
