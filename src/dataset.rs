use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::prediction;
use crate::state::Match;

/// Match list compiled into the binary.
pub const BUNDLED_MATCHES: &str = include_str!("../data/matches.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
}

impl DataSource {
    pub fn label(&self) -> String {
        match self {
            DataSource::Bundled => "bundled data".to_string(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

/// Load failures a caller may want to tell apart (e.g. to fall back to a cache).
/// Reach it through `anyhow::Error::downcast_ref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    NotFound(PathBuf),
    Decode(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::NotFound(path) => write!(f, "match file not found: {}", path.display()),
            DatasetError::Decode(msg) => write!(f, "match file is malformed: {msg}"),
        }
    }
}

impl std::error::Error for DatasetError {}

pub fn load_matches(source: &DataSource) -> Result<Vec<Match>> {
    match source {
        DataSource::Bundled => parse_matches_json(BUNDLED_MATCHES),
        DataSource::File(path) => {
            if !path.is_file() {
                return Err(DatasetError::NotFound(path.clone()).into());
            }
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            parse_matches_json(&raw)
        }
    }
}

/// Decodes a JSON array of matches. Blank input and `null` are an empty list.
pub fn parse_matches_json(raw: &str) -> Result<Vec<Match>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let parsed: Option<Vec<Match>> =
        serde_json::from_str(trimmed).map_err(|err| DatasetError::Decode(err.to_string()))?;
    let mut matches = parsed.unwrap_or_default();
    assign_ids(&mut matches);
    fill_missing_predictions(&mut matches);
    Ok(matches)
}

/// Gives matches that arrived without a forecast the rule-based one.
/// Returns how many were filled.
pub fn fill_missing_predictions(matches: &mut [Match]) -> usize {
    let mut filled = 0;
    for m in matches.iter_mut().filter(|m| m.prediction.is_blank()) {
        m.prediction = prediction::generate_prediction(&m.home, &m.away);
        filled += 1;
    }
    filled
}

/// Gives every match a unique, stable id. Ids already present are kept; missing
/// ones are derived from team codes and the date label, with a numeric suffix
/// on collision.
pub fn assign_ids(matches: &mut [Match]) {
    let mut seen: HashSet<String> = matches
        .iter()
        .filter(|m| !m.id.trim().is_empty())
        .map(|m| m.id.clone())
        .collect();

    for m in matches.iter_mut() {
        if !m.id.trim().is_empty() {
            continue;
        }
        let base = derive_match_id(m);
        let mut id = base.clone();
        let mut n = 2;
        while !seen.insert(id.clone()) {
            id = format!("{base}#{n}");
            n += 1;
        }
        m.id = id;
    }
}

pub fn derive_match_id(m: &Match) -> String {
    format!("{}-{}-{}", m.home.code.trim(), m.away.code.trim(), m.date.trim())
}
