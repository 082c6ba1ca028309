//! Keystroke evaluation: one physical key event against the lesson text
//!
//! A pure function over explicit inputs. The caller owns the clock and
//! passes the elapsed duration since the previous accepted keystroke (from
//! lesson start for the first one).

use crate::layout::{Layout, Production};
use std::time::Duration;

/// Judgment for one accepted keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keystroke {
    /// Text the keypress produced, for live highlighting.
    pub produced: Production,
    pub is_match: bool,
    /// Wall-clock gap since the prior accepted keystroke.
    pub latency: Duration,
}

/// Evaluate a physical key event at the current cursor position.
///
/// Returns `None` when the event must be ignored: the key has no layout
/// entry, the active shift side has no production, or the lesson is already
/// complete. Ignored events change no state and do not advance the cursor.
///
/// Comparison is character-exact; a conjunct production spanning two
/// characters never matches a single expected character.
pub fn evaluate(
    layout: &Layout,
    key_id: &str,
    shifted: bool,
    lesson: &[char],
    cursor: usize,
    elapsed: Duration,
) -> Option<Keystroke> {
    let expected = *lesson.get(cursor)?;
    let def = layout.key(key_id)?;
    let produced = if shifted { def.shifted? } else { def.base };

    let mut chars = produced.chars();
    let is_match = chars.next() == Some(expected) && chars.next().is_none();

    Some(Keystroke {
        produced,
        is_match,
        latency: elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_match_on_correct_key() {
        let layout = Layout::jatiya();
        let text = lesson("কথা");
        let ks = evaluate(&layout, "KeyJ", false, &text, 0, Duration::from_millis(120)).unwrap();
        assert_eq!(ks.produced, "ক");
        assert!(ks.is_match);
        assert_eq!(ks.latency, Duration::from_millis(120));
    }

    #[test]
    fn test_mismatch_still_accepted() {
        let layout = Layout::jatiya();
        let text = lesson("কথা");
        let ks = evaluate(&layout, "KeyM", false, &text, 0, Duration::from_millis(90)).unwrap();
        assert_eq!(ks.produced, "ম");
        assert!(!ks.is_match);
    }

    #[test]
    fn test_shift_selects_other_character() {
        let layout = Layout::jatiya();
        let text = lesson("খ");
        let ks = evaluate(&layout, "KeyJ", true, &text, 0, Duration::ZERO).unwrap();
        assert_eq!(ks.produced, "খ");
        assert!(ks.is_match);
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let layout = Layout::jatiya();
        let text = lesson("ক");
        assert!(evaluate(&layout, "CapsLock", false, &text, 0, Duration::ZERO).is_none());
    }

    #[test]
    fn test_shift_side_without_production_ignored() {
        let layout = Layout::jatiya();
        let text = lesson(" ");
        assert!(evaluate(&layout, "Space", true, &text, 0, Duration::ZERO).is_none());
    }

    #[test]
    fn test_cursor_past_end_ignored() {
        let layout = Layout::jatiya();
        let text = lesson("ক");
        assert!(evaluate(&layout, "KeyJ", false, &text, 1, Duration::ZERO).is_none());
    }

    #[test]
    fn test_conjunct_production_never_matches() {
        let layout = Layout::jatiya();
        // Lesson expects the hasanta alone; KeyZ emits the two-char cluster
        let text = lesson("্র");
        let ks = evaluate(&layout, "KeyZ", false, &text, 0, Duration::ZERO).unwrap();
        assert_eq!(ks.produced, "্র");
        assert!(!ks.is_match);
    }
}
