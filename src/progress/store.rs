//! JSON persistence for progress, vocabulary, and settings
//!
//! Each concern lives in its own file under a data directory. Missing or
//! corrupt files never fail a load: every load degrades to a documented
//! default (fresh progress, no vocabulary, 0.9 threshold, focused mode).

use crate::layout::Layout;
use crate::progress::UserProgress;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

const PROGRESS_FILE: &str = "progress.json";
const VOCABULARY_FILE: &str = "vocabulary.json";
const SETTINGS_FILE: &str = "settings.json";

/// Tunable trainer settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Proficiency a key's characters must reach before the next key
    /// unlocks, as a fraction.
    #[serde(default = "default_threshold")]
    pub proficiency_threshold: f32,
    /// When set, lessons draw on every unlocked character instead of the
    /// weakest few.
    #[serde(default)]
    pub use_all_unlocked_keys: bool,
}

fn default_threshold() -> f32 {
    0.9
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            proficiency_threshold: default_threshold(),
            use_all_unlocked_keys: false,
        }
    }
}

/// File-backed store for everything that outlives a session.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Store { dir: dir.into() }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, file: &str) -> Option<T> {
        let content = fs::read_to_string(self.path(file)).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(file), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// Load progress, falling back to fresh progress when the snapshot is
    /// missing or unreadable. Characters added to the layout since the
    /// snapshot was written get zeroed entries.
    pub fn load_progress(&self, layout: &Layout) -> UserProgress {
        match self.read_json::<UserProgress>(PROGRESS_FILE) {
            Some(mut progress) => {
                progress.ensure_layout_chars(layout);
                progress
            }
            None => UserProgress::new(layout),
        }
    }

    pub fn save_progress(&self, progress: &UserProgress) -> Result<(), Box<dyn Error>> {
        self.write_json(PROGRESS_FILE, progress)
    }

    /// Delete any saved snapshot and return fresh progress.
    pub fn reset_progress(&self, layout: &Layout) -> Result<UserProgress, Box<dyn Error>> {
        let path = self.path(PROGRESS_FILE);
        if path.exists() {
            fs::remove_file(path)?;
        }
        let progress = UserProgress::new(layout);
        self.save_progress(&progress)?;
        Ok(progress)
    }

    pub fn load_vocabulary(&self) -> Option<Vec<String>> {
        self.read_json(VOCABULARY_FILE)
    }

    pub fn save_vocabulary(&self, words: &[String]) -> Result<(), Box<dyn Error>> {
        self.write_json(VOCABULARY_FILE, &words)
    }

    pub fn load_settings(&self) -> Settings {
        self.read_json(SETTINGS_FILE).unwrap_or_default()
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), Box<dyn Error>> {
        self.write_json(SETTINGS_FILE, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let layout = Layout::jatiya();

        let progress = store.load_progress(&layout);
        assert_eq!(progress, UserProgress::new(&layout));
        assert!(store.load_vocabulary().is_none());
        assert_eq!(store.load_settings(), Settings::default());
    }

    #[test]
    fn test_corrupt_files_yield_defaults() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let layout = Layout::jatiya();
        fs::write(dir.path().join(PROGRESS_FILE), "{not json").unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "[]").unwrap();

        assert_eq!(store.load_progress(&layout), UserProgress::new(&layout));
        assert_eq!(store.load_settings(), Settings::default());
    }

    #[test]
    fn test_progress_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let layout = Layout::jatiya();

        let progress = UserProgress::new(&layout).toggle_key("KeyQ");
        store.save_progress(&progress).unwrap();
        assert_eq!(store.load_progress(&layout), progress);
    }

    #[test]
    fn test_settings_round_trip_and_partial_file() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());

        let settings = Settings {
            proficiency_threshold: 0.75,
            use_all_unlocked_keys: true,
        };
        store.save_settings(&settings).unwrap();
        assert_eq!(store.load_settings(), settings);

        // A file with only one field falls back to defaults for the rest
        fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"use_all_unlocked_keys":true}"#,
        )
        .unwrap();
        let loaded = store.load_settings();
        assert_eq!(loaded.proficiency_threshold, 0.9);
        assert!(loaded.use_all_unlocked_keys);
    }

    #[test]
    fn test_vocabulary_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let words = vec!["আম".to_string(), "কলা".to_string()];
        store.save_vocabulary(&words).unwrap();
        assert_eq!(store.load_vocabulary(), Some(words));
    }

    #[test]
    fn test_reset_discards_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let layout = Layout::jatiya();

        let modified = UserProgress::new(&layout).toggle_key("KeyJ");
        store.save_progress(&modified).unwrap();

        let fresh = store.reset_progress(&layout).unwrap();
        assert_eq!(fresh, UserProgress::new(&layout));
        assert_eq!(store.load_progress(&layout), fresh);
    }
}
