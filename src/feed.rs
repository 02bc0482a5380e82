use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::dataset::{self, DataSource, DatasetError};
use crate::persist::MatchStore;
use crate::prediction;
use crate::state::{Delta, Match};

/// Loads the match list once on a background thread and reports through `tx`.
pub fn spawn_loader(
    source: DataSource,
    store: Box<dyn MatchStore>,
    tx: Sender<Delta>,
) -> JoinHandle<()> {
    thread::spawn(move || run_loader(&source, store.as_ref(), &tx))
}

/// Source first; on failure, whatever the store last saved (possibly nothing).
/// Always ends with exactly one `Delta::SetMatches`.
pub fn run_loader(source: &DataSource, store: &dyn MatchStore, tx: &Sender<Delta>) {
    let matches = match dataset::load_matches(source) {
        Ok(matches) => {
            let _ = tx.send(Delta::Log(format!(
                "[INFO] Loaded {} matches from {}",
                matches.len(),
                source.label()
            )));
            report_invalid(&matches, tx);
            match store.save(&matches) {
                Ok(()) => {
                    let _ = tx.send(Delta::Log("[INFO] Matches saved locally".to_string()));
                }
                Err(err) => {
                    let _ = tx.send(Delta::Log(format!("[WARN] Save failed: {err:#}")));
                }
            }
            matches
        }
        Err(err) => {
            let kind = match err.downcast_ref::<DatasetError>() {
                Some(DatasetError::NotFound(_)) => "missing",
                Some(DatasetError::Decode(_)) => "malformed",
                None => "unreadable",
            };
            let _ = tx.send(Delta::Log(format!(
                "[WARN] Match data {kind} ({err:#}); loading saved matches"
            )));
            match store.load() {
                Ok(saved) => {
                    let _ = tx.send(Delta::Log(format!(
                        "[INFO] Recovered {} saved matches",
                        saved.len()
                    )));
                    saved
                }
                Err(err) => {
                    let _ = tx.send(Delta::Log(format!("[WARN] Saved matches error: {err:#}")));
                    Vec::new()
                }
            }
        }
    };
    let _ = tx.send(Delta::SetMatches(matches));
}

// Inconsistent rows are shown anyway; this only surfaces them in the console.
fn report_invalid(matches: &[Match], tx: &Sender<Delta>) {
    for m in matches {
        if let Err(err) = prediction::validate_match(m) {
            let _ = tx.send(Delta::Log(format!("[WARN] {}: {err}", m.id)));
        }
    }
}
