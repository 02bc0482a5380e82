use scorevision::matches::{TimeFilter, filter_by_category, find_live, top_scorers};
use scorevision::state::{Match, MatchStatus, PlayerGoalEstimate, Prediction, Team};

fn team(id: u32, code: &str) -> Team {
    Team {
        id,
        name: code.to_string(),
        code: code.to_string(),
        ranking: id,
    }
}

fn player(name: &str, xg: f64) -> PlayerGoalEstimate {
    PlayerGoalEstimate {
        name: name.to_string(),
        expected_goals: xg,
        goal_probability: 0.5,
    }
}

fn fixture(id: &str, status: MatchStatus, date: &str, scorers: Vec<PlayerGoalEstimate>) -> Match {
    let (home_score, away_score) = match status {
        MatchStatus::Upcoming => (None, None),
        _ => (Some(1), Some(0)),
    };
    Match {
        id: id.to_string(),
        home: team(1, "HOM"),
        away: team(2, "AWY"),
        home_score,
        away_score,
        date: date.to_string(),
        venue: "Test Arena".to_string(),
        status,
        prediction: Prediction {
            p_home: 0.4,
            p_draw: 0.3,
            p_away: 0.3,
            scoreline: "1-0".to_string(),
            scorers,
            factors: Vec::new(),
        },
    }
}

fn ids(list: &[&Match]) -> Vec<String> {
    list.iter().map(|m| m.id.clone()).collect()
}

#[test]
fn live_and_todays_upcoming_feed_today_and_top_scorers() {
    let matches = vec![
        fixture(
            "x",
            MatchStatus::Live,
            "14 Oct",
            vec![player("P1", 1.5), player("P2", 0.9)],
        ),
        fixture("y", MatchStatus::Upcoming, "15 Oct", vec![player("P3", 2.0)]),
    ];

    let today = filter_by_category(&matches, TimeFilter::Today, "15 Oct");
    assert_eq!(ids(&today), vec!["x", "y"]);

    let top: Vec<(&str, f64)> = top_scorers(&matches, "15 Oct", 5)
        .into_iter()
        .map(|p| (p.name.as_str(), p.expected_goals))
        .collect();
    assert_eq!(top, vec![("P3", 2.0), ("P1", 1.5), ("P2", 0.9)]);
}

#[test]
fn without_live_match_today_is_date_only() {
    let matches = vec![
        fixture("a", MatchStatus::Upcoming, "15 Oct", Vec::new()),
        fixture("b", MatchStatus::Upcoming, "16 Oct", Vec::new()),
        fixture("c", MatchStatus::Finished, "15 Oct", Vec::new()),
    ];
    assert!(find_live(&matches).is_none());
    let today = filter_by_category(&matches, TimeFilter::Today, "15 Oct");
    assert_eq!(ids(&today), vec!["a"]);
}

#[test]
fn filters_partition_the_list_in_order() {
    let statuses = [MatchStatus::Upcoming, MatchStatus::Live, MatchStatus::Finished];
    let dates = ["15 Oct", "16 Oct", "1 Nov"];
    let mut matches = Vec::new();
    for (i, status) in statuses.iter().enumerate() {
        for (j, date) in dates.iter().enumerate() {
            matches.push(fixture(&format!("m{i}{j}"), *status, date, Vec::new()));
        }
    }

    let mut seen: Vec<String> = Vec::new();
    for filter in TimeFilter::ALL {
        let subset = filter_by_category(&matches, filter, "15 Oct");
        let positions: Vec<usize> = subset
            .iter()
            .map(|m| matches.iter().position(|x| x.id == m.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "order kept");
        seen.extend(ids(&subset));
    }
    seen.sort();
    let mut all: Vec<String> = matches.iter().map(|m| m.id.clone()).collect();
    all.sort();
    assert_eq!(seen, all, "every match lands in exactly one category");
}

#[test]
fn find_live_returns_first_live_entry() {
    let none = vec![fixture("a", MatchStatus::Finished, "1 Oct", Vec::new())];
    assert!(find_live(&none).is_none());

    let one = vec![
        fixture("a", MatchStatus::Upcoming, "1 Oct", Vec::new()),
        fixture("b", MatchStatus::Live, "1 Oct", Vec::new()),
    ];
    assert_eq!(find_live(&one).map(|m| m.id.as_str()), Some("b"));

    let two = vec![
        fixture("a", MatchStatus::Live, "1 Oct", Vec::new()),
        fixture("b", MatchStatus::Live, "1 Oct", Vec::new()),
    ];
    assert_eq!(find_live(&two).map(|m| m.id.as_str()), Some("a"));
}

#[test]
fn top_scorers_caps_at_n_and_keeps_tie_order() {
    let matches = vec![
        fixture(
            "a",
            MatchStatus::Live,
            "x",
            vec![player("A1", 1.0), player("A2", 0.5), player("A3", 1.0)],
        ),
        fixture(
            "b",
            MatchStatus::Upcoming,
            "15 Junio",
            vec![player("B1", 1.0), player("B2", 3.0), player("B3", 0.1)],
        ),
        // Not of interest: finished, or upcoming on another day.
        fixture("c", MatchStatus::Finished, "15 Junio", vec![player("C1", 9.0)]),
        fixture("d", MatchStatus::Upcoming, "16 Junio", vec![player("D1", 9.0)]),
    ];

    let first = top_scorers(&matches, "15 Junio", 5);
    let names: Vec<&str> = first.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["B2", "A1", "A3", "B1", "A2"]);

    let again = top_scorers(&matches, "15 Junio", 5);
    assert_eq!(first, again);

    assert_eq!(top_scorers(&matches, "15 Junio", 2).len(), 2);
    assert!(top_scorers(&[], "15 Junio", 5).is_empty());
}

#[test]
fn top_scorers_tolerates_nan_and_infinite_estimates() {
    let mut scorers = Vec::new();
    for i in 0..60 {
        let xg = if i % 3 == 0 { f64::NAN } else { (i % 7) as f64 * 0.25 };
        scorers.push(player(&format!("P{i}"), xg));
    }
    scorers.push(player("Neg", f64::NEG_INFINITY));
    scorers.push(player("Pos", f64::INFINITY));
    let matches = vec![fixture("a", MatchStatus::Live, "x", scorers)];

    let top = top_scorers(&matches, "x", 5);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].name, "Pos");
    assert!(top.iter().all(|p| !p.expected_goals.is_nan()));
    assert!(
        top.windows(2)
            .all(|w| w[0].expected_goals >= w[1].expected_goals)
    );
    // 1.5 is the largest finite estimate in the list.
    assert_eq!(top[1].expected_goals, 1.5);

    let all = top_scorers(&matches, "x", 100);
    assert_eq!(all.len(), 62);
    let first_nan = all
        .iter()
        .position(|p| p.expected_goals.is_nan())
        .expect("NaN estimates are kept");
    assert_eq!(all[first_nan - 1].name, "Neg");
    assert!(all[first_nan..].iter().all(|p| p.expected_goals.is_nan()));
}
