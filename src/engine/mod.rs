//! Proficiency Tracking & Adaptive Lesson Engine
//!
//! # Components
//! - `evaluator.rs`: judge one keystroke against the lesson text
//! - `session.rs`: per-lesson tally of attempts, errors, and latencies
//! - `proficiency.rs`: merge lesson tallies into long-lived skill scores
//! - `unlock.rs`: decide when the next curriculum key becomes available
//! - `lesson.rs`: synthesize practice text from the vocabulary corpus

pub mod evaluator;
pub mod lesson;
pub mod proficiency;
pub mod session;
pub mod unlock;

pub use evaluator::{evaluate, Keystroke};
pub use lesson::{generate, LessonMode};
pub use proficiency::{derive_proficiency, merge_lesson};
pub use session::{LessonSession, LessonStats, LiveStats};
pub use unlock::{check_unlock, UnlockedKey};
