//! Proficiency model: fold a lesson tally into long-lived skill scores
//!
//! Proficiency multiplies an accuracy term by a speed term, so a slow but
//! error-free typist and a fast but error-prone typist both score low. The
//! latency window is capped so old performance stops influencing the score.

use crate::engine::session::LessonStats;
use crate::progress::{CharacterStats, UserProgress, MAX_RECENT_LATENCIES};

/// Mean latency at or below this earns full speed credit.
pub const TARGET_LATENCY_MS: f32 = 150.0;
/// Mean latency at or above this earns no speed credit.
pub const ZERO_SCORE_LATENCY_MS: f32 = 650.0;

/// Derive the proficiency score for one character from its raw tallies.
/// The single source of the score; it is never stored independently.
pub fn derive_proficiency(stats: &CharacterStats) -> f32 {
    let speed_score = if stats.recent_latencies.is_empty() {
        // Never typed correctly: no speed credit
        0.0
    } else {
        let total_ms: f32 = stats
            .recent_latencies
            .iter()
            .map(|d| d.as_secs_f32() * 1000.0)
            .sum();
        let avg_ms = total_ms / stats.recent_latencies.len() as f32;
        (1.0 - (avg_ms - TARGET_LATENCY_MS) / (ZERO_SCORE_LATENCY_MS - TARGET_LATENCY_MS))
            .clamp(0.0, 1.0)
    };
    (1.0 - stats.error_rate()) * speed_score
}

/// Merge one lesson's tally into the learner's progress and recompute the
/// affected proficiency scores. Value in, value out; the tally is consumed.
pub fn merge_lesson(mut progress: UserProgress, stats: LessonStats) -> UserProgress {
    for (c, tally) in stats.tallies {
        let entry = progress.proficiency_stats.entry(c).or_default();
        entry.total_attempts += tally.attempts;
        entry.total_errors += tally.errors;
        entry.recent_latencies.extend(tally.latencies);

        let len = entry.recent_latencies.len();
        if len > MAX_RECENT_LATENCIES {
            entry.recent_latencies.drain(..len - MAX_RECENT_LATENCIES);
        }

        debug_assert!(entry.total_errors <= entry.total_attempts);
        entry.proficiency = derive_proficiency(entry);
    }
    progress
}
