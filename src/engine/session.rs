//! Session aggregation: one lesson's raw tally and live metrics
//!
//! Maintains:
//! - Per-character attempts, errors, and latencies for the lesson
//! - Word-boundary accuracy (a word counts only if typed cleanly)
//! - Live WPM from correct keystrokes
//!
//! The tally is keyed by the *expected* character, not the produced one, and
//! is consumed exactly once at lesson end. Dropping the session abandons the
//! lesson without touching long-lived progress.

use crate::engine::evaluator::Keystroke;
use rustc_hash::FxHashMap;
use std::time::Duration;

/// Raw per-character tally for a single lesson.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CharTally {
    pub attempts: u32,
    pub errors: u32,
    /// Latencies of correct keystrokes only.
    pub latencies: Vec<Duration>,
}

/// Un-merged, un-scored output of one lesson.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LessonStats {
    pub tallies: FxHashMap<char, CharTally>,
}

/// Rolling metrics for live display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveStats {
    pub wpm: f64,
    pub accuracy_percent: f64,
}

/// Aggregates keystroke judgments across one lesson.
#[derive(Clone, Debug)]
pub struct LessonSession {
    text: Vec<char>,
    cursor: usize,
    stats: LessonStats,
    /// Match result per typed position, for rendering.
    results: Vec<bool>,
    correct_keystrokes: u32,
    total_words: u32,
    correct_words: u32,
    current_word_correct: bool,
    finished: bool,
}

impl LessonSession {
    pub fn new(text: &str) -> Self {
        let text: Vec<char> = text.chars().collect();
        let finished = text.is_empty();
        LessonSession {
            text,
            cursor: 0,
            stats: LessonStats::default(),
            results: Vec::new(),
            correct_keystrokes: 0,
            total_words: 0,
            correct_words: 0,
            current_word_correct: true,
            finished,
        }
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The character the learner should type next.
    pub fn expected_char(&self) -> Option<char> {
        self.text.get(self.cursor).copied()
    }

    /// Match result for an already-typed position.
    pub fn result_at(&self, index: usize) -> Option<bool> {
        self.results.get(index).copied()
    }

    /// Record one accepted keystroke and advance the cursor. Returns `true`
    /// when this keystroke completed the lesson; completion is reported for
    /// exactly one keystroke.
    pub fn apply(&mut self, keystroke: &Keystroke) -> bool {
        if self.finished {
            return false;
        }
        let expected = match self.expected_char() {
            Some(c) => c,
            None => return false,
        };

        let tally = self.stats.tallies.entry(expected).or_default();
        tally.attempts += 1;
        if keystroke.is_match {
            tally.latencies.push(keystroke.latency);
            self.correct_keystrokes += 1;
        } else {
            tally.errors += 1;
            self.current_word_correct = false;
        }
        self.results.push(keystroke.is_match);

        // A word is counted exactly once, at its trailing space or at the
        // final character of the lesson.
        let is_last = self.cursor + 1 == self.text.len();
        if expected == ' ' || is_last {
            self.total_words += 1;
            if self.current_word_correct {
                self.correct_words += 1;
            }
            self.current_word_correct = true;
        }

        self.cursor += 1;
        if is_last {
            self.finished = true;
        }
        self.finished
    }

    /// Rolling WPM and word accuracy. Elapsed time since lesson start is
    /// injected by the caller; the session holds no clock.
    pub fn live_stats(&self, elapsed: Duration) -> LiveStats {
        let accuracy_percent = if self.total_words > 0 {
            self.correct_words as f64 / self.total_words as f64 * 100.0
        } else {
            100.0
        };
        let elapsed_minutes = elapsed.as_secs_f64() / 60.0;
        let wpm = if elapsed_minutes > 0.0 {
            (self.correct_keystrokes as f64 / 5.0) / elapsed_minutes
        } else {
            0.0
        };
        LiveStats {
            wpm,
            accuracy_percent,
        }
    }

    /// Consume the session, yielding the lesson tally for merging.
    pub fn into_stats(self) -> LessonStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(is_match: bool, latency_ms: u64) -> Keystroke {
        Keystroke {
            produced: "ক",
            is_match,
            latency: Duration::from_millis(latency_ms),
        }
    }

    /// Type the whole lesson, mismatching at the given positions.
    fn run(text: &str, mistakes: &[usize]) -> LessonSession {
        let mut session = LessonSession::new(text);
        for i in 0..text.chars().count() {
            let done = session.apply(&stroke(!mistakes.contains(&i), 100));
            assert_eq!(done, i + 1 == text.chars().count());
        }
        session
    }

    #[test]
    fn test_tally_keyed_by_expected_char() {
        let mut session = LessonSession::new("কক");
        session.apply(&Keystroke {
            produced: "ম",
            is_match: false,
            latency: Duration::from_millis(80),
        });
        session.apply(&stroke(true, 150));

        let stats = session.into_stats();
        let tally = &stats.tallies[&'ক'];
        assert_eq!(tally.attempts, 2);
        assert_eq!(tally.errors, 1);
        assert_eq!(tally.latencies, vec![Duration::from_millis(150)]);
        // The produced character gets no tally of its own
        assert!(!stats.tallies.contains_key(&'ম'));
    }

    #[test]
    fn test_word_accuracy_half_correct() {
        // One mistake in the second word: 1 of 2 words fully correct
        let session = run("কথা বলা", &[5]);
        let live = session.live_stats(Duration::from_secs(10));
        assert_eq!(live.accuracy_percent, 50.0);
    }

    #[test]
    fn test_word_counted_once_at_boundary() {
        let mut session = LessonSession::new("ক ত");
        session.apply(&stroke(true, 100));
        assert_eq!(session.live_stats(Duration::from_secs(1)).accuracy_percent, 100.0);
        session.apply(&stroke(true, 100)); // space closes the first word
        session.apply(&stroke(false, 100)); // final char closes the second
        let live = session.live_stats(Duration::from_secs(1));
        assert_eq!(live.accuracy_percent, 50.0);
    }

    #[test]
    fn test_wpm_from_correct_keystrokes() {
        let text: String = std::iter::repeat('ক').take(25).collect();
        let session = run(&text, &[]);
        let live = session.live_stats(Duration::from_secs(60));
        assert!((live.wpm - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_errors_do_not_block_progress() {
        let mut session = LessonSession::new("কত");
        session.apply(&stroke(false, 100));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.expected_char(), Some('ত'));
    }

    #[test]
    fn test_completion_reported_once() {
        let mut session = LessonSession::new("ক");
        assert!(session.apply(&stroke(true, 100)));
        assert!(session.is_finished());
        // Further keystrokes are inert
        assert!(!session.apply(&stroke(true, 100)));
        let stats = session.into_stats();
        assert_eq!(stats.tallies[&'ক'].attempts, 1);
    }

    #[test]
    fn test_no_words_yet_reads_full_accuracy() {
        let session = LessonSession::new("কথা");
        let live = session.live_stats(Duration::ZERO);
        assert_eq!(live.accuracy_percent, 100.0);
        assert_eq!(live.wpm, 0.0);
    }

    #[test]
    fn test_result_states_for_rendering() {
        let session = run("কথা", &[1]);
        assert_eq!(session.result_at(0), Some(true));
        assert_eq!(session.result_at(1), Some(false));
        assert_eq!(session.result_at(2), Some(true));
        assert_eq!(session.result_at(3), None);
    }
}
