//! First-round persistence
//!
//! The opening guess of a configuration is the most expensive search of a
//! game and never changes, so it can be kept between runs. Strategies accept
//! any [`FirstRoundStore`]; the crate ships a JSON file store and an
//! in-memory store.

use crate::core::{Code, CodeSpace, Feedback, GameConfig};
use crate::solver::{CacheEntry, Partition, partition};
use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A stored opening: the guess and its partition of the full code space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstRound {
    pub guess: Code,
    pub partition: Partition,
    pub depth: Option<usize>,
}

impl FirstRound {
    /// Check that this round is the guess's partition of exactly this space
    ///
    /// Every code must appear once, in the bucket of the feedback it gives.
    #[must_use]
    pub fn fits(&self, space: &CodeSpace) -> bool {
        space.config().validate_code(&self.guess).is_ok()
            && partition(space.codes(), &self.guess).is_ok_and(|sheet| sheet == self.partition)
    }
}

impl From<&CacheEntry> for FirstRound {
    fn from(entry: &CacheEntry) -> Self {
        Self {
            guess: entry.guess,
            partition: entry.partition.clone(),
            depth: entry.depth,
        }
    }
}

impl From<FirstRound> for CacheEntry {
    fn from(round: FirstRound) -> Self {
        Self {
            guess: round.guess,
            partition: round.partition,
            depth: round.depth,
        }
    }
}

/// Key under which a strategy's opening is stored
///
/// # Examples
/// ```
/// use mastermind_solver::core::GameConfig;
/// use mastermind_solver::store::store_key;
///
/// assert_eq!(store_key("knuth", GameConfig::default()), "knuth_4_6");
/// ```
#[must_use]
pub fn store_key(strategy: &str, config: GameConfig) -> String {
    format!("{strategy}_{}_{}", config.n_places(), config.n_colors())
}

/// Key-value store for first-round results
pub trait FirstRoundStore: Send {
    /// Load the opening stored under `key`, if any
    ///
    /// # Errors
    /// Returns an I/O error if the store exists but cannot be read or parsed.
    fn load(&self, key: &str) -> io::Result<Option<FirstRound>>;

    /// Store the opening under `key`, replacing any earlier value
    ///
    /// # Errors
    /// Returns an I/O error if the value cannot be written.
    fn store(&mut self, key: &str, round: &FirstRound) -> io::Result<()>;
}

/// On-disk form of a [`FirstRound`]
#[derive(Debug, Serialize, Deserialize)]
struct StoredRound {
    guess: Code,
    depth: Option<usize>,
    buckets: Vec<(Feedback, Vec<Code>)>,
}

impl From<&FirstRound> for StoredRound {
    fn from(round: &FirstRound) -> Self {
        Self {
            guess: round.guess,
            depth: round.depth,
            buckets: round
                .partition
                .iter()
                .map(|(feedback, codes)| (*feedback, codes.to_vec()))
                .collect(),
        }
    }
}

impl From<StoredRound> for FirstRound {
    fn from(stored: StoredRound) -> Self {
        Self {
            guess: stored.guess,
            partition: Partition::from_buckets(stored.buckets),
            depth: stored.depth,
        }
    }
}

/// Stores each opening as a JSON file in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for the files; it is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform cache directory for this program, if the platform has one
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("mastermind_solver"))
    }

    /// Directory holding the files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl FirstRoundStore for FileStore {
    fn load(&self, key: &str) -> io::Result<Option<FirstRound>> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let stored: StoredRound = serde_json::from_str(&content)?;
        debug!("Loaded first round from {}", path.display());
        Ok(Some(stored.into()))
    }

    fn store(&mut self, key: &str, round: &FirstRound) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let json = serde_json::to_string(&StoredRound::from(round))?;
        fs::write(&path, json)?;
        debug!("Stored first round in {}", path.display());
        Ok(())
    }
}

/// Keeps openings in memory for the lifetime of the store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    rounds: FxHashMap<String, FirstRound>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored openings
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

impl FirstRoundStore for MemoryStore {
    fn load(&self, key: &str) -> io::Result<Option<FirstRound>> {
        Ok(self.rounds.get(key).cloned())
    }

    fn store(&mut self, key: &str, round: &FirstRound) -> io::Result<()> {
        self.rounds.insert(key.to_string(), round.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn opening(n_colors: u8, n_places: usize) -> (CodeSpace, FirstRound) {
        let space = CodeSpace::new(GameConfig::new(n_colors, n_places).unwrap());
        let guess = space.codes()[1];
        let round = FirstRound {
            guess,
            partition: partition(space.codes(), &guess).unwrap(),
            depth: None,
        };
        (space, round)
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        let (space, round) = opening(3, 3);

        assert!(store.load("knuth_3_3").unwrap().is_none());
        store.store("knuth_3_3", &round).unwrap();

        let loaded = store.load("knuth_3_3").unwrap().unwrap();
        assert_eq!(loaded, round);
        assert!(loaded.fits(&space));
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("knuth_4_6.json"), "not json").unwrap();

        let store = FileStore::new(dir.path());
        assert!(store.load("knuth_4_6").is_err());
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let (_, round) = opening(2, 2);

        store.store("a", &round).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load("a").unwrap(), Some(round));
        assert_eq!(store.load("b").unwrap(), None);
    }

    #[test]
    fn round_for_other_space_does_not_fit() {
        let (_, round) = opening(3, 2);
        let (other_space, _) = opening(4, 2);
        assert!(!round.fits(&other_space));
    }

    #[test]
    fn round_must_hold_each_code_once_in_its_own_bucket() {
        let space = CodeSpace::new(GameConfig::new(2, 2).unwrap());
        let code = |symbols: &[u8]| Code::new(symbols).unwrap();
        let round = |buckets: Vec<(Feedback, Vec<Code>)>| FirstRound {
            guess: code(&[1, 1]),
            partition: Partition::from_buckets(buckets),
            depth: None,
        };

        let exact = round(vec![
            (Feedback::new(2, 0), vec![code(&[1, 1])]),
            (Feedback::new(1, 0), vec![code(&[1, 2]), code(&[2, 1])]),
            (Feedback::new(0, 0), vec![code(&[2, 2])]),
        ]);
        assert!(exact.fits(&space));

        // Right total, but 12 twice and 21 missing
        let duplicated = round(vec![
            (Feedback::new(2, 0), vec![code(&[1, 1])]),
            (Feedback::new(1, 0), vec![code(&[1, 2]), code(&[1, 2])]),
            (Feedback::new(0, 0), vec![code(&[2, 2])]),
        ]);
        assert_eq!(duplicated.partition.total(), space.len());
        assert!(!duplicated.fits(&space));

        let misfiled = round(vec![
            (Feedback::new(2, 0), vec![code(&[1, 1])]),
            (Feedback::new(1, 0), vec![code(&[1, 2]), code(&[2, 2])]),
            (Feedback::new(0, 0), vec![code(&[2, 1])]),
        ]);
        assert!(!misfiled.fits(&space));
    }

    #[test]
    fn keys_include_configuration() {
        let config = GameConfig::new(8, 5).unwrap();
        assert_eq!(store_key("deepening", config), "deepening_5_8");
    }
}
