use std::env;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::dataset::DataSource;
use crate::matches::TOP_SCORERS_DEFAULT;
use crate::persist::{JsonFileStore, MatchStore, NullStore};

/// Reference label the match filters treat as "today".
pub const DEFAULT_TODAY: &str = "15 Oct";
/// Reference label the top-scorer view treats as "today". Historically this
/// differs from `DEFAULT_TODAY`; both are kept separate and a mismatch is logged.
pub const DEFAULT_SCORERS_TODAY: &str = "15 Junio";

const MAX_TOP_N: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data: DataSource,
    pub today: String,
    pub scorers_today: String,
    pub top_n: usize,
    pub cache_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataSource::Bundled,
            today: DEFAULT_TODAY.to_string(),
            scorers_today: DEFAULT_SCORERS_TODAY.to_string(),
            top_n: TOP_SCORERS_DEFAULT,
            cache_enabled: true,
        }
    }
}

impl Config {
    /// Reads `.env.local` and `.env` (if present) and then the process environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let opt = |key: &str| {
            lookup(key).and_then(|val| {
                let val = val.trim().to_string();
                if val.is_empty() { None } else { Some(val) }
            })
        };
        let defaults = Self::default();

        let data = opt("SCOREVISION_DATA")
            .map(|path| DataSource::File(PathBuf::from(path)))
            .unwrap_or(defaults.data);
        let today = opt("SCOREVISION_TODAY")
            .map(resolve_today)
            .unwrap_or(defaults.today);
        let scorers_today = opt("SCOREVISION_SCORERS_TODAY")
            .map(resolve_today)
            .unwrap_or(defaults.scorers_today);
        let top_n = opt("SCOREVISION_TOP_N")
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(defaults.top_n)
            .clamp(1, MAX_TOP_N);
        let cache_enabled = opt("SCOREVISION_CACHE")
            .map(|val| !matches!(val.to_lowercase().as_str(), "0" | "false" | "off" | "no"))
            .unwrap_or(defaults.cache_enabled);

        Self {
            data,
            today,
            scorers_today,
            top_n,
            cache_enabled,
        }
    }

    pub fn today_references_diverge(&self) -> bool {
        self.today != self.scorers_today
    }

    pub fn store(&self) -> Box<dyn MatchStore> {
        if !self.cache_enabled {
            return Box::new(NullStore);
        }
        match JsonFileStore::in_cache_dir() {
            Some(store) => Box::new(store),
            None => Box::new(NullStore),
        }
    }
}

/// Date label in the same shape the match data uses, e.g. `"15 Oct"`.
pub fn today_label_for(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

fn resolve_today(raw: String) -> String {
    if raw.eq_ignore_ascii_case("auto") {
        today_label_for(Local::now().date_naive())
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_keep_both_today_references() {
        let cfg = config_from(&[]);
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.today, "15 Oct");
        assert_eq!(cfg.scorers_today, "15 Junio");
        assert!(cfg.today_references_diverge());
    }

    #[test]
    fn overrides_are_applied_and_clamped() {
        let cfg = config_from(&[
            ("SCOREVISION_DATA", "/tmp/matches.json"),
            ("SCOREVISION_TODAY", "12 Jun"),
            ("SCOREVISION_SCORERS_TODAY", " 12 Jun "),
            ("SCOREVISION_TOP_N", "500"),
            ("SCOREVISION_CACHE", "off"),
        ]);
        assert_eq!(cfg.data, DataSource::File(PathBuf::from("/tmp/matches.json")));
        assert_eq!(cfg.today, "12 Jun");
        assert!(!cfg.today_references_diverge());
        assert_eq!(cfg.top_n, 20);
        assert!(!cfg.cache_enabled);
    }

    #[test]
    fn blank_and_bad_values_fall_back() {
        let cfg = config_from(&[("SCOREVISION_TODAY", "   "), ("SCOREVISION_TOP_N", "many")]);
        assert_eq!(cfg.today, DEFAULT_TODAY);
        assert_eq!(cfg.top_n, TOP_SCORERS_DEFAULT);
    }

    #[test]
    fn date_label_format() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 11).expect("valid date");
        assert_eq!(today_label_for(date), "11 Jun");
    }
}
