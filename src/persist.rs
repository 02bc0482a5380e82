use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};

use crate::dataset;
use crate::state::Match;

const CACHE_DIR: &str = "scorevision";
const CACHE_FILE: &str = "matches.json";

/// Save/load contract for historical matches.
pub trait MatchStore: Send {
    fn save(&self, matches: &[Match]) -> Result<()>;
    fn load(&self) -> Result<Vec<Match>>;
}

/// Keeps the last saved list as a JSON file in the same schema as the bundled data.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_cache_dir() -> Option<Self> {
        cache_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MatchStore for JsonFileStore {
    fn save(&self, matches: &[Match]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(matches).context("failed encoding matches")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("failed writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed replacing {}", self.path.display()))?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Match>> {
        if !self.path.is_file() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed reading {}", self.path.display()))?;
        dataset::parse_matches_json(&raw)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    matches: Mutex<Vec<Match>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matches(matches: Vec<Match>) -> Self {
        Self {
            matches: Mutex::new(matches),
        }
    }
}

impl MatchStore for MemoryStore {
    fn save(&self, matches: &[Match]) -> Result<()> {
        let mut guard = self
            .matches
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        *guard = matches.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<Match>> {
        let guard = self
            .matches
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(guard.clone())
    }
}

/// Store used when caching is switched off: saves are dropped, loads are empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl MatchStore for NullStore {
    fn save(&self, _matches: &[Match]) -> Result<()> {
        Ok(())
    }

    fn load(&self) -> Result<Vec<Match>> {
        Ok(Vec::new())
    }
}

fn cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}
