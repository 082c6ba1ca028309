//! Lesson generation: practice text biased toward weak characters
//!
//! The generator narrows the lesson to the learner's weakest unlocked
//! characters, widens back to the full unlocked set when the vocabulary is
//! too thin, and falls back to a fixed instruction sentence only when no
//! usable word exists at all.

use crate::layout::Layout;
use crate::progress::UserProgress;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

/// How many of the weakest characters a focused lesson drills.
pub const PRACTICE_CHAR_COUNT: usize = 6;
/// Words per generated lesson, and the pool size below which the character
/// filter widens.
pub const LESSON_WORD_COUNT: usize = 15;

/// The designed "no content available" terminal state: asks the learner (in
/// Bengali) to upload a vocabulary file. Not an error.
pub const FALLBACK_TEXT: &str =
    "অনুশীলনের জন্য শব্দ পাওয়া যায়নি। অনুগ্রহ করে একটি নতুন শব্দভান্ডার ফাইল আপলোড করুন।";

/// Joining character for consonant conjuncts, always allowed in words so
/// clusters can appear without every piece being individually unlocked.
const HASANTA: char = '্';

/// Which characters a lesson draws on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonMode {
    /// Drill the weakest few unlocked characters.
    FocusWeakest,
    /// Use every unlocked character.
    AllUnlocked,
}

/// Every character reachable from the unlocked keys, deduplicated, in
/// unlock order.
pub fn unlocked_chars(layout: &Layout, progress: &UserProgress) -> Vec<char> {
    let mut seen = FxHashSet::default();
    let mut chars = Vec::new();
    for key in &progress.unlocked_keys {
        if let Some(def) = layout.key(key) {
            for c in def.chars() {
                if seen.insert(c) {
                    chars.push(c);
                }
            }
        }
    }
    chars
}

/// The weakest unlocked characters, ascending by proficiency. Ties keep
/// unlock order (stable sort).
pub fn practice_chars(layout: &Layout, progress: &UserProgress) -> Vec<char> {
    let mut chars = unlocked_chars(layout, progress);
    chars.sort_by(|&a, &b| {
        progress
            .proficiency_of(a)
            .total_cmp(&progress.proficiency_of(b))
    });
    chars.truncate(PRACTICE_CHAR_COUNT);
    chars
}

/// Words whose every character is in the allowed set (plus space and the
/// joining hasanta). Idempotent for a fixed allowed set.
pub fn filter_vocabulary(vocabulary: &[String], allowed: &[char]) -> Vec<String> {
    let mut allowed_set: FxHashSet<char> = allowed.iter().copied().collect();
    allowed_set.insert(' ');
    allowed_set.insert(HASANTA);
    vocabulary
        .iter()
        .filter(|word| word.chars().all(|c| allowed_set.contains(&c)))
        .cloned()
        .collect()
}

/// Produce one lesson: a whitespace-joined selection of vocabulary words.
/// The random source is injected so tests can seed it.
pub fn generate<R: Rng>(
    layout: &Layout,
    progress: &UserProgress,
    vocabulary: &[String],
    mode: LessonMode,
    rng: &mut R,
) -> String {
    let target_chars = match mode {
        LessonMode::FocusWeakest => practice_chars(layout, progress),
        LessonMode::AllUnlocked => unlocked_chars(layout, progress),
    };

    let mut pool = filter_vocabulary(vocabulary, &target_chars);

    // Too few matches for the narrow target set: widen to everything unlocked
    if pool.len() < LESSON_WORD_COUNT {
        let all_chars = unlocked_chars(layout, progress);
        pool = filter_vocabulary(vocabulary, &all_chars);
    }

    if pool.is_empty() {
        return FALLBACK_TEXT.to_string();
    }

    pool.shuffle(rng);
    pool.truncate(LESSON_WORD_COUNT);
    pool.join(" ")
}
