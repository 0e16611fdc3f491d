//! Key categories and the classifier that derives them from raw key events.
//!
//! A keystroke arrives as a pair of strings: the *label* (the character or
//! named key the layout produced, e.g. `"a"`, `" "`, `"Enter"`) and the
//! *code* (the physical key position, e.g. `"KeyA"`, `"ShiftLeft"`).
//! [`classify`] folds that pair into one of ten [`KeyCategory`] values, which
//! is all the synthesizer needs to pick envelope, duration and volume.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Coarse classification of a physical key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCategory {
    /// Any key not covered by a more specific category.
    #[default]
    Default,
    /// The space bar.
    Spacebar,
    /// Enter / Return.
    Enter,
    /// Backspace.
    Backspace,
    /// Either shift key.
    Shift,
    /// Caps lock.
    Capslock,
    /// Tab.
    Tab,
    /// Control, Alt and Meta.
    Modifier,
    /// Number row digits `0`-`9`.
    Digit,
    /// Function keys `F1`-`F12`.
    Fkey,
}

impl KeyCategory {
    /// Every category, `Default` first.
    pub const ALL: [KeyCategory; 10] = [
        KeyCategory::Default,
        KeyCategory::Spacebar,
        KeyCategory::Enter,
        KeyCategory::Backspace,
        KeyCategory::Shift,
        KeyCategory::Capslock,
        KeyCategory::Tab,
        KeyCategory::Modifier,
        KeyCategory::Digit,
        KeyCategory::Fkey,
    ];

    /// Lowercase identifier, stable across releases (used in file names and config).
    pub fn as_str(self) -> &'static str {
        match self {
            KeyCategory::Default => "default",
            KeyCategory::Spacebar => "spacebar",
            KeyCategory::Enter => "enter",
            KeyCategory::Backspace => "backspace",
            KeyCategory::Shift => "shift",
            KeyCategory::Capslock => "capslock",
            KeyCategory::Tab => "tab",
            KeyCategory::Modifier => "modifier",
            KeyCategory::Digit => "digit",
            KeyCategory::Fkey => "fkey",
        }
    }
}

impl fmt::Display for KeyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key category: {}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for KeyCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        KeyCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Classify a key event into a [`KeyCategory`].
///
/// Total and pure: any input that matches no rule yields
/// [`KeyCategory::Default`]. Rules apply in priority order:
///
/// 1. label `" "` → spacebar
/// 2. `"Enter"` → enter
/// 3. `"Backspace"` → backspace
/// 4. label `"Shift"` or a code containing `"Shift"` → shift
/// 5. `"Tab"` → tab
/// 6. `"CapsLock"` → capslock
/// 7. `"Control"`, `"Alt"`, `"Meta"` → modifier
/// 8. a single ASCII digit → digit
/// 9. `F1`..`F12` → fkey
///
/// ```rust
/// use mechvibe_core::{KeyCategory, classify};
///
/// assert_eq!(classify("Shift", "ShiftLeft"), KeyCategory::Shift);
/// assert_eq!(classify("F7", "F7"), KeyCategory::Fkey);
/// assert_eq!(classify("a", "KeyA"), KeyCategory::Default);
/// ```
pub fn classify(label: &str, code: &str) -> KeyCategory {
    match label {
        " " => return KeyCategory::Spacebar,
        "Enter" => return KeyCategory::Enter,
        "Backspace" => return KeyCategory::Backspace,
        _ => {}
    }

    if label == "Shift" || code.contains("Shift") {
        return KeyCategory::Shift;
    }

    match label {
        "Tab" => KeyCategory::Tab,
        "CapsLock" => KeyCategory::Capslock,
        "Control" | "Alt" | "Meta" => KeyCategory::Modifier,
        _ if is_single_digit(label) => KeyCategory::Digit,
        _ if is_function_key(label) => KeyCategory::Fkey,
        _ => KeyCategory::Default,
    }
}

fn is_single_digit(label: &str) -> bool {
    let bytes = label.as_bytes();
    bytes.len() == 1 && bytes[0].is_ascii_digit()
}

/// Matches `F1`..`F9` and `F10`..`F12` exactly.
fn is_function_key(label: &str) -> bool {
    let Some(rest) = label.strip_prefix('F') else {
        return false;
    };
    match rest.as_bytes() {
        [d] => (b'1'..=b'9').contains(d),
        [b'1', d] => (b'0'..=b'2').contains(d),
        _ => false,
    }
}

/// Pan position of the left-hand key block.
const LEFT_PAN: f32 = -0.3;
/// Pan position of the right-hand key block.
const RIGHT_PAN: f32 = 0.3;

/// Coarse stereo position of a key on a QWERTY board.
///
/// Codes containing `Left` (ShiftLeft, ControlLeft, ...) and the letters
/// `Q W E A S D Z X C` sit left; codes containing `Right` and
/// `U I O P J K L N M` sit right. Everything else is centered. Letter
/// matching ignores case.
pub fn key_position_pan(label: &str, code: &str) -> f32 {
    let letter = match label.as_bytes() {
        [b] if b.is_ascii_alphabetic() => Some(b.to_ascii_uppercase()),
        _ => None,
    };

    if code.contains("Left") || letter.is_some_and(|l| b"QWEASDZXC".contains(&l)) {
        LEFT_PAN
    } else if code.contains("Right") || letter.is_some_and(|l| b"UIOPJKLNM".contains(&l)) {
        RIGHT_PAN
    } else {
        0.0
    }
}
