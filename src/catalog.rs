use once_cell::sync::Lazy;

use crate::state::{Candidate, Coordinate, Stadium, TeamXg, TournamentAnalysis, Trend};

static CANDIDATES: Lazy<Vec<Candidate>> = Lazy::new(|| {
    vec![
        candidate(1, "France", 0.185, Trend::Flat),
        candidate(2, "Argentina", 0.152, Trend::Rising),
        candidate(3, "England", 0.128, Trend::Falling),
        candidate(4, "Spain", 0.11, Trend::Flat),
        candidate(5, "Brazil", 0.095, Trend::Rising),
        candidate(6, "Germany", 0.082, Trend::Flat),
        candidate(7, "Portugal", 0.065, Trend::Falling),
        candidate(8, "Colombia", 0.041, Trend::Rising),
        candidate(9, "Netherlands", 0.038, Trend::Flat),
        candidate(10, "Uruguay", 0.032, Trend::Falling),
        candidate(11, "USA", 0.028, Trend::Rising),
        candidate(12, "Croatia", 0.021, Trend::Falling),
        candidate(13, "Norway", 0.019, Trend::Rising),
        candidate(14, "Belgium", 0.018, Trend::Falling),
        candidate(15, "Japan", 0.015, Trend::Rising),
        candidate(16, "Morocco", 0.014, Trend::Flat),
        candidate(17, "Mexico", 0.012, Trend::Falling),
        candidate(18, "Egypt", 0.011, Trend::Falling),
        candidate(19, "Senegal", 0.01, Trend::Flat),
        candidate(20, "Switzerland", 0.009, Trend::Flat),
        candidate(21, "Ecuador", 0.008, Trend::Rising),
        candidate(22, "South Korea", 0.007, Trend::Flat),
        candidate(23, "Canada", 0.006, Trend::Rising),
        candidate(24, "Iran", 0.005, Trend::Falling),
        candidate(25, "Australia", 0.004, Trend::Flat),
        candidate(26, "Paraguay", 0.004, Trend::Falling),
        candidate(27, "Saudi Arabia", 0.003, Trend::Rising),
        candidate(28, "Ghana", 0.002, Trend::Falling),
        candidate(29, "Algeria", 0.002, Trend::Rising),
        candidate(30, "South Africa", 0.001, Trend::Rising),
        candidate(31, "Ivory Coast", 0.001, Trend::Flat),
        candidate(32, "Panama", 0.001, Trend::Flat),
        candidate(33, "Tunisia", 0.001, Trend::Flat),
        candidate(34, "Uzbekistan", 0.001, Trend::Flat),
        candidate(35, "Austria", 0.001, Trend::Rising),
        candidate(36, "Scotland", 0.001, Trend::Rising),
        candidate(37, "Qatar", 0.001, Trend::Flat),
        candidate(38, "New Zealand", 0.001, Trend::Flat),
        candidate(39, "Jordan", 0.0005, Trend::Rising),
        candidate(40, "Cape Verde", 0.0005, Trend::Rising),
        candidate(41, "Haiti", 0.0001, Trend::Flat),
        candidate(42, "Curaçao", 0.0001, Trend::Rising),
        candidate(43, "UEFA playoff 1", 0.0001, Trend::Flat),
        candidate(44, "UEFA playoff 2", 0.0001, Trend::Flat),
        candidate(45, "UEFA playoff 3", 0.0001, Trend::Flat),
        candidate(46, "UEFA playoff 4", 0.0001, Trend::Flat),
        candidate(47, "Intercontinental playoff 1", 0.0001, Trend::Flat),
        candidate(48, "Intercontinental playoff 2", 0.0001, Trend::Flat),
    ]
});

static STADIUMS: Lazy<Vec<Stadium>> = Lazy::new(|| {
    vec![
        stadium("Estadio Azteca", "Mexico City", "MEX", 87_523, "azteca", 19.3029, -99.1504),
        stadium("MetLife Stadium", "New Jersey", "USA", 82_500, "metlife", 40.8135, -74.0745),
        stadium("SoFi Stadium", "Los Angeles", "USA", 70_240, "sofi", 33.9535, -118.3392),
        stadium("AT&T Stadium", "Dallas", "USA", 80_000, "att", 32.7478, -97.0929),
        stadium("Mercedes-Benz Stadium", "Atlanta", "USA", 71_000, "mercedes", 33.7554, -84.4005),
        stadium("BC Place", "Vancouver", "CAN", 54_500, "bcplace", 49.2767, -123.1119),
        stadium("BMO Field", "Toronto", "CAN", 45_000, "bmo", 43.6328, -79.4185),
    ]
});

static ANALYSIS: Lazy<TournamentAnalysis> = Lazy::new(|| TournamentAnalysis {
    effective_possession: 68,
    tournament_average: 52,
    key_factor: "Progressive passes and shots on target".to_string(),
    team_xg: vec![
        TeamXg {
            team: "Mexico".to_string(),
            xg: 2.1,
        },
        TeamXg {
            team: "Argentina".to_string(),
            xg: 1.4,
        },
    ],
    finding: "Fatigue alert: Mexico shows 15% fewer sprints in the second half.".to_string(),
    justification: "Based on player GPS data from the last 3 matches.".to_string(),
});

/// Tournament-winner ranking, best first. Playoff slots sit at the bottom
/// until their qualifiers are known.
pub fn candidates() -> &'static [Candidate] {
    &CANDIDATES
}

pub fn stadiums() -> &'static [Stadium] {
    &STADIUMS
}

pub fn analysis() -> &'static TournamentAnalysis {
    &ANALYSIS
}

pub fn candidate_by_name(name: &str) -> Option<&'static Candidate> {
    CANDIDATES.iter().find(|c| c.name.eq_ignore_ascii_case(name.trim()))
}

/// Host stadium for a match venue label, matched case-insensitively.
pub fn stadium_for_venue(venue: &str) -> Option<&'static Stadium> {
    STADIUMS.iter().find(|s| s.name.eq_ignore_ascii_case(venue.trim()))
}

/// `87523` -> `"87,523"`.
pub fn format_capacity(capacity: u32) -> String {
    let digits = capacity.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn candidate(rank: u32, name: &str, win_probability: f64, trend: Trend) -> Candidate {
    Candidate {
        rank,
        name: name.to_string(),
        win_probability,
        trend,
    }
}

fn stadium(
    name: &str,
    city: &str,
    country: &str,
    capacity: u32,
    image: &str,
    latitude: f64,
    longitude: f64,
) -> Stadium {
    Stadium {
        name: name.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        capacity,
        image: image.to_string(),
        coordinate: Coordinate {
            latitude,
            longitude,
        },
    }
}
