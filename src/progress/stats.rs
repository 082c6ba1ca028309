//! Long-lived proficiency state for one learner
//!
//! Tracks:
//! - Which keys the learner has unlocked
//! - Per-character attempt/error counts and recent latencies
//!
//! Proficiency is always derived from the raw tallies (see
//! `engine::proficiency`); it is never written directly except when a fresh
//! zeroed entry is created.

use crate::layout::{Layout, INITIAL_UNLOCKED_KEYS, UNLOCK_ORDER};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Latency samples retained per character. Older samples are evicted so the
/// average reflects recent ability, not the whole learning history.
pub const MAX_RECENT_LATENCIES: usize = 20;

/// Cumulative statistics for one displayable character.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    /// Most recent correct-keystroke latencies, oldest first.
    pub recent_latencies: Vec<Duration>,
    pub total_errors: u32,
    pub total_attempts: u32,
    /// Derived score in [0, 1]; 0.0 until the first merge.
    pub proficiency: f32,
}

impl CharacterStats {
    /// Fraction of attempts that were errors. 0 when never attempted.
    pub fn error_rate(&self) -> f32 {
        if self.total_attempts == 0 {
            0.0
        } else {
            self.total_errors as f32 / self.total_attempts as f32
        }
    }
}

/// Complete progress state for one learner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Unlocked key identifiers, ordered by curriculum position.
    pub unlocked_keys: Vec<String>,
    /// Stats for every character reachable from the layout, unlocked or not,
    /// so mastery is measured consistently once a key does unlock.
    pub proficiency_stats: FxHashMap<char, CharacterStats>,
}

impl UserProgress {
    /// Fresh progress: the first keys of the curriculum unlocked, all
    /// reachable characters zeroed. Also serves as the reset state.
    pub fn new(layout: &Layout) -> Self {
        let unlocked_keys = UNLOCK_ORDER
            .iter()
            .take(INITIAL_UNLOCKED_KEYS)
            .map(|&k| k.to_string())
            .collect();

        let mut progress = UserProgress {
            unlocked_keys,
            proficiency_stats: FxHashMap::default(),
        };
        progress.ensure_layout_chars(layout);
        progress
    }

    /// Add zeroed entries for any reachable character that is missing.
    /// Run at initialization and after loading older snapshots.
    pub fn ensure_layout_chars(&mut self, layout: &Layout) {
        for id in layout.key_ids() {
            if let Some(def) = layout.key(id) {
                for c in def.chars() {
                    self.proficiency_stats.entry(c).or_default();
                }
            }
        }
    }

    /// Derived proficiency for a character. 0 for unknown characters.
    pub fn proficiency_of(&self, c: char) -> f32 {
        self.proficiency_stats
            .get(&c)
            .map(|s| s.proficiency)
            .unwrap_or(0.0)
    }

    pub fn is_unlocked(&self, key: &str) -> bool {
        self.unlocked_keys.iter().any(|k| k == key)
    }

    /// The most recently unlocked key, the anchor for automatic progression.
    pub fn last_unlocked_key(&self) -> Option<&str> {
        self.unlocked_keys.last().map(String::as_str)
    }

    /// Manual lock/unlock of an arbitrary key. The unlocked list is re-sorted
    /// by curriculum position (keys outside the curriculum sort first). An
    /// out-of-sequence manual unlock freezes automatic progression, which is
    /// the observed behavior of the original trainer.
    pub fn toggle_key(mut self, key: &str) -> Self {
        if let Some(idx) = self.unlocked_keys.iter().position(|k| k == key) {
            self.unlocked_keys.remove(idx);
        } else {
            self.unlocked_keys.push(key.to_string());
            self.unlocked_keys.sort_by_key(|k| {
                Layout::unlock_position(k).map(|p| p as i64).unwrap_or(-1)
            });
        }
        self
    }

    /// Per-character rows for a profile view, sorted by ascending
    /// proficiency with attempted characters first.
    pub fn character_summaries(&self) -> Vec<(char, &CharacterStats)> {
        let mut rows: Vec<(char, &CharacterStats)> = self
            .proficiency_stats
            .iter()
            .map(|(&c, s)| (c, s))
            .collect();
        rows.sort_by(|a, b| {
            (b.1.total_attempts > 0)
                .cmp(&(a.1.total_attempts > 0))
                .then(a.1.proficiency.total_cmp(&b.1.proficiency))
                .then(a.0.cmp(&b.0))
        });
        rows
    }
}
