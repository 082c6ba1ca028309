//! Jatiya keyboard layout: key table and unlock curriculum
//!
//! # Components
//! - `KeyDef`: what a physical key produces, unshifted and shifted
//! - `Layout`: key-identifier lookup table built once at startup
//! - `UNLOCK_ORDER`: the fixed sequence in which keys become available

use rustc_hash::FxHashMap;

/// Number of keys from [`UNLOCK_ORDER`] unlocked for a fresh learner.
pub const INITIAL_UNLOCKED_KEYS: usize = 5;

/// The text a keypress emits. Almost always a single character; the Jatiya
/// layout also carries fixed conjunct productions (`্র`, `্য`, `র্`).
pub type Production = &'static str;

/// What one physical key produces in its two shift states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyDef {
    pub base: Production,
    pub shifted: Option<Production>,
}

impl KeyDef {
    /// Constituent characters of both shift sides, in layout order.
    /// Conjunct productions contribute each of their characters.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.base
            .chars()
            .chain(self.shifted.into_iter().flat_map(|s| s.chars()))
    }

    /// The character shown when celebrating this key's unlock.
    pub fn display_char(&self) -> char {
        // Productions are non-empty static data
        self.base.chars().next().unwrap_or(' ')
    }
}

/// Raw Jatiya key table. Two physical keys intentionally share the same
/// character pair (KeyY and Semicolon); kept as given.
const KEYMAP: &[(&str, KeyDef)] = &[
    ("Backquote", KeyDef { base: "`", shifted: Some("~") }),
    ("Digit1", KeyDef { base: "১", shifted: Some("!") }),
    ("Digit2", KeyDef { base: "২", shifted: Some("৥") }),
    ("Digit3", KeyDef { base: "৩", shifted: Some("#") }),
    ("Digit4", KeyDef { base: "৪", shifted: Some("৳") }),
    ("Digit5", KeyDef { base: "৫", shifted: Some("%") }),
    ("Digit6", KeyDef { base: "৬", shifted: Some("঳") }),
    ("Digit7", KeyDef { base: "৭", shifted: Some("ঁ") }),
    ("Digit8", KeyDef { base: "৮", shifted: Some("*") }),
    ("Digit9", KeyDef { base: "৯", shifted: Some("(") }),
    ("Digit0", KeyDef { base: "০", shifted: Some(")") }),
    ("Minus", KeyDef { base: "-", shifted: Some("_") }),
    ("Equal", KeyDef { base: "=", shifted: Some("+") }),
    ("KeyQ", KeyDef { base: "ঙ", shifted: Some("ং") }),
    ("KeyW", KeyDef { base: "য", shifted: Some("য়") }),
    ("KeyE", KeyDef { base: "ড", shifted: Some("ঢ") }),
    ("KeyR", KeyDef { base: "প", shifted: Some("ফ") }),
    ("KeyT", KeyDef { base: "ট", shifted: Some("ঠ") }),
    ("KeyY", KeyDef { base: "চ", shifted: Some("ছ") }),
    ("KeyU", KeyDef { base: "জ", shifted: Some("ঝ") }),
    ("KeyI", KeyDef { base: "হ", shifted: Some("ঞ") }),
    ("KeyO", KeyDef { base: "গ", shifted: Some("ঘ") }),
    ("KeyP", KeyDef { base: "ড়", shifted: Some("ঢ়") }),
    ("BracketLeft", KeyDef { base: "ৎ", shifted: Some("ঃ") }),
    ("BracketRight", KeyDef { base: "]", shifted: Some("}") }),
    ("KeyA", KeyDef { base: "ৃ", shifted: Some("র্") }),
    ("KeyS", KeyDef { base: "ু", shifted: Some("ূ") }),
    ("KeyD", KeyDef { base: "ি", shifted: Some("ী") }),
    ("KeyF", KeyDef { base: "া", shifted: Some("অ") }),
    ("KeyG", KeyDef { base: "্", shifted: Some("।") }),
    ("KeyH", KeyDef { base: "ব", shifted: Some("ভ") }),
    ("KeyJ", KeyDef { base: "ক", shifted: Some("খ") }),
    ("KeyK", KeyDef { base: "ত", shifted: Some("থ") }),
    ("KeyL", KeyDef { base: "দ", shifted: Some("ধ") }),
    ("Semicolon", KeyDef { base: "চ", shifted: Some("ছ") }),
    ("Quote", KeyDef { base: "'", shifted: Some("\"") }),
    ("KeyZ", KeyDef { base: "্র", shifted: Some("্য") }),
    ("KeyX", KeyDef { base: "ও", shifted: Some("ৗ") }),
    ("KeyC", KeyDef { base: "ে", shifted: Some("ৈ") }),
    ("KeyV", KeyDef { base: "র", shifted: Some("ল") }),
    ("KeyB", KeyDef { base: "ন", shifted: Some("ণ") }),
    ("KeyN", KeyDef { base: "স", shifted: Some("ষ") }),
    ("KeyM", KeyDef { base: "ম", shifted: Some("শ") }),
    ("Comma", KeyDef { base: ",", shifted: Some("<") }),
    ("Period", KeyDef { base: ".", shifted: Some(">") }),
    ("Slash", KeyDef { base: "?", shifted: Some("/") }),
    ("Space", KeyDef { base: " ", shifted: None }),
];

/// Curriculum progression: home row, then top, bottom, punctuation, digits.
/// KeyG appears twice in the source curriculum (its shift side `।` is
/// revisited); lookups use the first occurrence.
pub const UNLOCK_ORDER: &[&str] = &[
    "KeyJ", "KeyF", "KeyK", "KeyD", "KeyL", "KeyS", "KeyH", "KeyG", "KeyA",
    "KeyY", "KeyR", "KeyU", "KeyE", "KeyI", "KeyT", "KeyO", "KeyW", "KeyP", "KeyQ",
    "KeyB", "KeyN", "KeyV", "KeyM", "KeyC", "KeyX", "KeyZ", "Comma", "Period",
    "Digit4", "Digit7", "BracketLeft", "KeyG",
    "Digit1", "Digit2", "Digit3", "Digit5", "Digit6", "Digit8", "Digit9", "Digit0",
];

/// Key-identifier lookup table, built once at startup.
pub struct Layout {
    keys: FxHashMap<&'static str, KeyDef>,
}

impl Layout {
    /// Build the Jatiya layout table.
    pub fn jatiya() -> Self {
        let mut keys = FxHashMap::default();
        for &(id, def) in KEYMAP {
            keys.insert(id, def);
        }
        Layout { keys }
    }

    /// Look up a physical key identifier. `None` for unmapped keys.
    pub fn key(&self, id: &str) -> Option<&KeyDef> {
        self.keys.get(id)
    }

    /// Position of a key in [`UNLOCK_ORDER`] (first occurrence).
    pub fn unlock_position(id: &str) -> Option<usize> {
        UNLOCK_ORDER.iter().position(|&k| k == id)
    }

    /// All key identifiers in the table, in layout order.
    pub fn key_ids(&self) -> impl Iterator<Item = &'static str> {
        KEYMAP.iter().map(|&(id, _)| id)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::jatiya()
    }
}
