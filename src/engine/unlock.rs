//! Unlock policy: advance the curriculum frontier one key at a time
//!
//! Progression is anchored to the most recently unlocked key. Once every
//! character that key produces meets the threshold, its successor in the
//! unlock order becomes available. At most one key unlocks per evaluation;
//! earned-but-unclaimed unlocks wait for the next lesson.

use crate::layout::{Layout, UNLOCK_ORDER};
use crate::progress::UserProgress;

/// Signal for the UI celebration when a key unlocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockedKey {
    pub key: String,
    /// The key's display character.
    pub character: char,
}

/// Evaluate progression after a lesson merge. Value in, value out.
///
/// No progression occurs when the last unlocked key is absent from the
/// unlock order (a manually unlocked out-of-sequence key freezes automatic
/// progression) or when its successor is already unlocked.
pub fn check_unlock(
    layout: &Layout,
    mut progress: UserProgress,
    threshold: f32,
) -> (UserProgress, Option<UnlockedKey>) {
    let last_key = match progress.last_unlocked_key() {
        Some(k) => k,
        None => return (progress, None),
    };
    let def = match layout.key(last_key) {
        Some(d) => d,
        None => return (progress, None),
    };

    let all_mastered = def.chars().all(|c| progress.proficiency_of(c) >= threshold);
    if !all_mastered {
        return (progress, None);
    }

    let next_key = match Layout::unlock_position(last_key) {
        Some(pos) => match UNLOCK_ORDER.get(pos + 1) {
            Some(&k) => k,
            None => return (progress, None),
        },
        None => return (progress, None),
    };
    if progress.is_unlocked(next_key) {
        return (progress, None);
    }

    progress.unlocked_keys.push(next_key.to_string());
    let unlocked = layout.key(next_key).map(|d| UnlockedKey {
        key: next_key.to_string(),
        character: d.display_char(),
    });
    (progress, unlocked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mastered(progress: &mut UserProgress, chars: &[char], score: f32) {
        for &c in chars {
            progress.proficiency_stats.entry(c).or_default().proficiency = score;
        }
    }

    #[test]
    fn test_unlocks_successor_when_mastered() {
        let layout = Layout::jatiya();
        let mut progress = UserProgress::new(&layout);
        // Fresh frontier is KeyL, producing দ and ধ
        mastered(&mut progress, &['দ', 'ধ'], 0.95);

        let (progress, unlocked) = check_unlock(&layout, progress, 0.9);
        let unlocked = unlocked.unwrap();
        assert_eq!(unlocked.key, "KeyS");
        assert_eq!(unlocked.character, 'ু');
        assert_eq!(progress.last_unlocked_key(), Some("KeyS"));
    }

    #[test]
    fn test_below_threshold_no_unlock() {
        let layout = Layout::jatiya();
        let mut progress = UserProgress::new(&layout);
        mastered(&mut progress, &['দ'], 0.95);
        mastered(&mut progress, &['ধ'], 0.85); // one character short

        let before = progress.clone();
        let (progress, unlocked) = check_unlock(&layout, progress, 0.9);
        assert!(unlocked.is_none());
        assert_eq!(progress, before);
    }

    #[test]
    fn test_at_most_one_key_per_invocation() {
        let layout = Layout::jatiya();
        let mut progress = UserProgress::new(&layout);
        // Several upcoming keys already satisfied; only one may unlock
        mastered(&mut progress, &['দ', 'ধ', 'ু', 'ূ', 'ব', 'ভ'], 1.0);

        let (progress, unlocked) = check_unlock(&layout, progress, 0.9);
        assert!(unlocked.is_some());
        assert_eq!(progress.unlocked_keys.len(), 6);
    }

    #[test]
    fn test_out_of_order_frontier_freezes_progression() {
        let layout = Layout::jatiya();
        let mut progress = UserProgress::new(&layout);
        // Slash is mapped but not part of the unlock order
        progress.unlocked_keys = vec!["Slash".to_string()];
        mastered(&mut progress, &['?', '/'], 1.0);

        let (progress, unlocked) = check_unlock(&layout, progress, 0.9);
        assert!(unlocked.is_none());
        assert_eq!(progress.unlocked_keys, vec!["Slash"]);
    }

    #[test]
    fn test_already_unlocked_successor_no_signal() {
        let layout = Layout::jatiya();
        let mut progress = UserProgress::new(&layout);
        // Frontier KeyJ whose successor KeyF is already unlocked
        progress.unlocked_keys = vec!["KeyF".to_string(), "KeyJ".to_string()];
        mastered(&mut progress, &['ক', 'খ'], 1.0);

        let (progress, unlocked) = check_unlock(&layout, progress, 0.9);
        assert!(unlocked.is_none());
        assert_eq!(progress.unlocked_keys.len(), 2);
    }

    #[test]
    fn test_empty_unlocked_list_no_unlock() {
        let layout = Layout::jatiya();
        let mut progress = UserProgress::new(&layout);
        progress.unlocked_keys.clear();
        let (_, unlocked) = check_unlock(&layout, progress, 0.9);
        assert!(unlocked.is_none());
    }
}
