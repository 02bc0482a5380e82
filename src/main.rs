use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use scorevision::catalog::{self, format_capacity};
use scorevision::charts::{self, MOMENTUM_MIN, MomentumPoint, StatComparison};
use scorevision::config::Config;
use scorevision::feed;
use scorevision::matches::{TimeFilter, score_label};
use scorevision::state::{
    AppState, Delta, Match, MatchStatus, Screen, Trend, apply_delta, status_label,
    trend_label,
};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(config: &Config) -> Self {
        let mut state = AppState::with_config(config);
        if config.today_references_diverge() {
            state.push_log(format!(
                "[WARN] Match filters use \"{}\" as today but top scorers use \"{}\"",
                config.today, config.scorers_today
            ));
        }
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Matches,
            KeyCode::Char('2') => self.state.screen = Screen::Rankings,
            KeyCode::Char('3') => self.state.screen = Screen::Stadiums,
            KeyCode::Char('4') => self.state.screen = Screen::Profile,
            KeyCode::Char('5') => self.state.screen = Screen::Analysis,
            KeyCode::Char('d') | KeyCode::Enter => self.state.open_selected(),
            KeyCode::Char('b') | KeyCode::Esc => self.state.back(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('f') | KeyCode::Tab => {
                if self.state.screen == Screen::Matches {
                    self.state.cycle_filter();
                }
            }
            KeyCode::Char(' ') => {
                if self.state.screen == Screen::Profile {
                    self.state.toggle_selected_favorite();
                }
            }
            KeyCode::Char('n') => {
                if self.state.screen == Screen::Profile {
                    let on = self.state.profile.toggle_notifications();
                    self.state.push_log(format!(
                        "[INFO] Notifications {}",
                        if on { "on" } else { "off" }
                    ));
                }
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    let config = Config::load();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let _loader = feed::spawn_loader(config.data.clone(), config.store(), tx);

    let mut app = App::new(&config);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.state.screen {
        Screen::Matches => render_matches(frame, chunks[1], &app.state),
        Screen::Detail { .. } => render_detail(frame, chunks[1], &app.state),
        Screen::Rankings => render_rankings(frame, chunks[1], &app.state),
        Screen::Stadiums => render_stadiums(frame, chunks[1], &app.state),
        Screen::Profile => render_profile(frame, chunks[1], &app.state),
        Screen::Analysis => render_analysis(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match &state.screen {
        Screen::Matches => {
            let tabs = TimeFilter::ALL
                .iter()
                .map(|f| {
                    if *f == state.filter {
                        format!("[{}]", f.label())
                    } else {
                        f.label().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!("SCOREVISION MATCHES | {tabs} | Today: {}", state.today)
        }
        Screen::Detail { .. } => "SCOREVISION MATCH CENTER".to_string(),
        Screen::Rankings => "SCOREVISION TITLE ODDS".to_string(),
        Screen::Stadiums => "SCOREVISION HOST STADIUMS".to_string(),
        Screen::Profile => "SCOREVISION PROFILE".to_string(),
        Screen::Analysis => "SCOREVISION ANALYSIS".to_string(),
    };
    let status = if state.loading { " (loading...)" } else { "" };
    format!("  (o)  {title}{status}\n  /|\\\n  / \\")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Matches => {
            "1-5 Screens | f/Tab Filter | j/k Move | Enter Details | ? Help | q Quit".to_string()
        }
        Screen::Detail { .. } => "b/Esc Back | 1-5 Screens | ? Help | q Quit".to_string(),
        Screen::Profile => {
            "1-5 Screens | j/k Move | Space Favorite | n Notifications | q Quit".to_string()
        }
        _ => "1-5 Screens | j/k Move | ? Help | q Quit".to_string(),
    }
}

fn render_matches(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(38)])
        .split(area);

    let show_live = state.filter == TimeFilter::Today && state.live_match().is_some();
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if show_live { 4 } else { 0 }),
            Constraint::Min(1),
        ])
        .split(columns[0]);

    if show_live && let Some(live) = state.live_match() {
        let banner = Paragraph::new(format!(
            "{} {}  {}  {}\n{}",
            live.home.name,
            score_label(live),
            live.away.name,
            live.date,
            live.venue
        ))
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(Block::default().title("LIVE").borders(Borders::ALL));
        frame.render_widget(banner, left[0]);
    }

    let list = Paragraph::new(match_list_text(state))
        .block(Block::default().title(state.filter.label()).borders(Borders::ALL));
    frame.render_widget(list, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(1)])
        .split(columns[1]);

    let scorers = Paragraph::new(top_scorers_text(state))
        .block(Block::default().title("Top scorers (AI)").borders(Borders::ALL));
    frame.render_widget(scorers, right[0]);

    let alert = Paragraph::new(
        state
            .value_alert()
            .unwrap_or_else(|| "No open matches".to_string()),
    )
    .wrap(ratatui::widgets::Wrap { trim: true })
    .style(Style::default().fg(Color::Yellow))
    .block(Block::default().title("Value alert").borders(Borders::ALL));
    frame.render_widget(alert, right[1]);
}

fn match_list_text(state: &AppState) -> String {
    if state.loading {
        return "Loading matches...".to_string();
    }
    let filtered = state.filtered_matches();
    if filtered.is_empty() {
        return format!("No {} matches", state.filter.label().to_lowercase());
    }
    filtered
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            let prefix = if idx == state.selected { "> " } else { "  " };
            let middle = match m.status {
                MatchStatus::Upcoming => m.date.clone(),
                _ => score_label(m),
            };
            format!(
                "{prefix}{:<4} {:>3} {:^9} {:<3}  {}",
                status_label(m.status),
                m.home.code,
                middle,
                m.away.code,
                m.venue
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn top_scorers_text(state: &AppState) -> String {
    let scorers = state.top_scorers();
    if scorers.is_empty() {
        return format!("No scorers for {}", state.scorers_today);
    }
    scorers
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            format!(
                "{}. {:<20} {:.1} xG {:>3.0}%",
                idx + 1,
                truncate(&p.name, 20),
                p.expected_goals,
                p.goal_probability * 100.0
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(m) = state.selected_match() else {
        let empty = Paragraph::new("Match not available").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    let venue = match catalog::stadium_for_venue(&m.venue) {
        Some(s) => format!("{} - {}", s.name, s.city),
        None => m.venue.clone(),
    };
    let scoreboard = Paragraph::new(scoreboard_text(m))
        .alignment(Alignment::Center)
        .block(Block::default().title(venue.to_uppercase()).borders(Borders::ALL));
    frame.render_widget(scoreboard, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let prediction = Paragraph::new(prediction_text(m))
        .block(Block::default().title("AI Vision").borders(Borders::ALL));
    frame.render_widget(prediction, columns[0]);

    let charts_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(columns[1]);

    let momentum = charts::momentum_for(m);
    frame.render_widget(momentum_chart(&momentum), charts_area[0]);

    let stats = Paragraph::new(stats_text(&charts::stats_for(m), charts_area[1].width))
        .block(Block::default().title("Stats").borders(Borders::ALL));
    frame.render_widget(stats, charts_area[1]);
}

fn scoreboard_text(m: &Match) -> String {
    let status = match m.status {
        MatchStatus::Live => format!("LIVE - {}", m.date),
        other => status_label(other).to_uppercase(),
    };
    format!(
        "{status}\n{}  {}  {}\n{} vs {}",
        m.home.name,
        score_label(m),
        m.away.name,
        m.home.code,
        m.away.code
    )
}

fn prediction_text(m: &Match) -> String {
    let p = &m.prediction;
    let mut lines = vec![
        format!("{:<10} {:>4.0}%", m.home.code, p.p_home * 100.0),
        format!("{:<10} {:>4.0}%", "Draw", p.p_draw * 100.0),
        format!("{:<10} {:>4.0}%", m.away.code, p.p_away * 100.0),
        format!("Likely score: {}", p.scoreline),
    ];
    for team in [&m.home, &m.away] {
        if let Some(c) = catalog::candidate_by_name(&team.name) {
            lines.push(format!(
                "Title odds {}: #{} {:.1}%",
                team.code,
                c.rank,
                c.win_probability * 100.0
            ));
        }
    }
    lines.extend([
        String::new(),
        "Players to watch:".to_string(),
    ]);
    for s in &p.scorers {
        lines.push(format!(
            "  {} {:.1} xG ({:.0}%)",
            s.name,
            s.expected_goals,
            s.goal_probability * 100.0
        ));
    }
    if !p.factors.is_empty() {
        lines.push(String::new());
        lines.push("Key factors:".to_string());
        lines.extend(p.factors.iter().map(|f| format!("  - {f}")));
    }
    lines.join("\n")
}

fn momentum_chart(points: &[MomentumPoint]) -> BarChart<'static> {
    // Strength can be negative; bars are shifted so the floor of the range sits at 0.
    let bars: Vec<Bar> = points
        .iter()
        .map(|p| {
            let color = if p.strength >= 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            Bar::default()
                .value((p.strength - MOMENTUM_MIN).round().max(0.0) as u64)
                .text_value(format!("{:.0}", p.strength))
                .label(Line::from(format!("{}'", p.minute)))
                .style(Style::default().fg(color))
        })
        .collect();

    BarChart::default()
        .block(Block::default().title("Momentum").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .max((charts::MOMENTUM_MAX - MOMENTUM_MIN) as u64)
}

fn stats_text(rows: &[StatComparison], width: u16) -> String {
    let bar_width = (width.saturating_sub(30) / 2).max(4) as usize;
    rows.iter()
        .map(|row| {
            let (home, away) = row.fractions();
            let home_bar = "█".repeat((home * bar_width as f64).round() as usize);
            let away_bar = "█".repeat((away * bar_width as f64).round() as usize);
            format!(
                "{:>6} {:>w$} {:<20} {:<w$} {}",
                trim_number(row.home),
                home_bar,
                truncate(row.metric, 20),
                away_bar,
                trim_number(row.away),
                w = bar_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_rankings(frame: &mut Frame, area: Rect, state: &AppState) {
    let list = catalog::candidates();
    let visible = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_range(state.rankings_selected, list.len(), visible);
    let text = list[start..end]
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let prefix = if start + i == state.rankings_selected { "> " } else { "  " };
            let arrow = match c.trend {
                Trend::Rising => "▲",
                Trend::Falling => "▼",
                Trend::Flat => "●",
            };
            format!(
                "{prefix}{:>2}. {:<28} {:>6.2}% {arrow} {}",
                c.rank,
                truncate(&c.name, 28),
                c.win_probability * 100.0,
                trend_label(c.trend)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let paragraph = Paragraph::new(text)
        .block(Block::default().title("Tournament winner").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_stadiums(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = catalog::stadiums()
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let prefix = if idx == state.stadiums_selected { "> " } else { "  " };
            format!(
                "{prefix}{:<24} {:<14} {:<4} {:>8}  {:>8.4}, {:>9.4}",
                s.name,
                s.city,
                s.country,
                format_capacity(s.capacity),
                s.coordinate.latitude,
                s.coordinate.longitude
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let paragraph = Paragraph::new(text)
        .block(Block::default().title("Venues").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_analysis(frame: &mut Frame, area: Rect, state: &AppState) {
    let a = catalog::analysis();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(area);

    let bar_width = rows[0].width.saturating_sub(4) as usize;
    let filled = (bar_width * usize::from(a.effective_possession.min(100))) / 100;
    let possession = format!(
        "{}%  ({:+} pts vs tournament)  Key factor: {}\n{}{}\nTournament average: {}%",
        a.effective_possession,
        a.possession_edge(),
        a.key_factor,
        "█".repeat(filled),
        "░".repeat(bar_width - filled),
        a.tournament_average
    );
    let possession = Paragraph::new(possession)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title("Effective possession").borders(Borders::ALL));
    frame.render_widget(possession, rows[0]);

    let xg = a
        .team_xg
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let prefix = if idx == state.analysis_selected { "> " } else { "  " };
            format!("{prefix}{:<20} {:.1} xG", row.team, row.xg)
        })
        .collect::<Vec<_>>()
        .join("\n");
    let xg = Paragraph::new(xg)
        .block(Block::default().title("Expected goals (xG)").borders(Borders::ALL));
    frame.render_widget(xg, rows[1]);

    let finding = Paragraph::new(vec![
        Line::styled(
            a.finding.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::styled(a.justification.clone(), Style::default().fg(Color::Gray)),
    ])
    .wrap(ratatui::widgets::Wrap { trim: true })
    .block(Block::default().title("AI findings").borders(Borders::ALL));
    frame.render_widget(finding, rows[2]);
}

fn render_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let profile = &state.profile;
    let mut lines: Vec<String> = profile
        .teams
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            let prefix = if idx == state.profile_selected { "> " } else { "  " };
            let mark = if profile.is_favorite(t.id) { "[x]" } else { "[ ]" };
            format!("{prefix}{mark} {}", t.name)
        })
        .collect();
    lines.push(String::new());
    lines.push(format!("Favorites: {}", profile.favorite_names()));
    lines.push(format!(
        "Notifications: {}",
        if profile.notifications { "on" } else { "off" }
    ));
    let paragraph = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Favorite teams").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let skip = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "ScoreVision - Help",
        "",
        "Global:",
        "  1            Matches",
        "  2            Title odds",
        "  3            Stadiums",
        "  4            Profile",
        "  5            Analysis",
        "  j/k or ↑/↓   Move",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Matches:",
        "  f / Tab      Cycle Today / Upcoming / Finished",
        "  Enter / d    Match center",
        "  b / Esc      Back",
        "",
        "Profile:",
        "  Space        Toggle favorite",
        "  n            Toggle notifications",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
