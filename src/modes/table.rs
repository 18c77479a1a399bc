//! Ordered flag/character tables and the shared encoding logic.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::OnceLock;

/// Text produced for a mode record with nothing set.
pub const NO_MODES_SET: &str = "No modes set";

/// An ordered mapping between flags and their mode characters.
///
/// The forward direction is the table itself. The reverse direction
/// (character to flag) is built once, the first time it is needed.
pub struct ModeTable<F: 'static> {
    entries: &'static [(F, char)],
    inverse: OnceLock<HashMap<char, F>>,
}

impl<F> ModeTable<F> {
    pub const fn new(entries: &'static [(F, char)]) -> Self {
        Self {
            entries,
            inverse: OnceLock::new(),
        }
    }

    /// The `(flag, char)` pairs in serialization order.
    pub fn entries(&self) -> &'static [(F, char)] {
        self.entries
    }
}

impl<F: Copy + Eq + Hash> ModeTable<F> {
    /// Mode character for a flag.
    pub fn char_of(&self, flag: F) -> Option<char> {
        self.entries
            .iter()
            .find(|(f, _)| *f == flag)
            .map(|&(_, c)| c)
    }

    /// Flag for a mode character. Unknown characters yield `None`.
    pub fn flag_of(&self, c: char) -> Option<F> {
        self.inverse().get(&c).copied()
    }

    fn inverse(&self) -> &HashMap<char, F> {
        self.inverse
            .get_or_init(|| self.entries.iter().map(|&(f, c)| (c, f)).collect())
    }
}

/// A mode record whose flags are described by a [`ModeTable`].
///
/// Implemented by [`ChannelModes`](super::ChannelModes),
/// [`NickModes`](super::NickModes) and
/// [`ChannelPrivileges`](super::ChannelPrivileges).
pub trait ModeSet {
    /// The flag enumeration for this domain.
    type Flag: Copy + Eq + Hash + 'static;

    /// The ordered table for this domain.
    fn table() -> &'static ModeTable<Self::Flag>;

    /// Whether a flag is currently set. Value flags count as set when
    /// their value is non-empty / non-zero.
    fn is_set(&self, flag: Self::Flag) -> bool;

    /// Set or clear a flag. Value flags can only be cleared this way.
    fn set(&mut self, flag: Self::Flag, on: bool);

    /// Trailing arguments appended after the mode letters.
    fn arguments(&self) -> Vec<String> {
        Vec::new()
    }

    /// Set or clear the flag for a mode character.
    ///
    /// Returns `false` if the character is not part of this domain.
    fn set_char(&mut self, c: char, on: bool) -> bool {
        match Self::table().flag_of(c) {
            Some(flag) => {
                self.set(flag, on);
                true
            }
            None => false,
        }
    }

    /// True if no flag is set.
    fn is_empty(&self) -> bool {
        Self::table()
            .entries()
            .iter()
            .all(|&(flag, _)| !self.is_set(flag))
    }

    /// Encode as `+letters [args]`, or [`NO_MODES_SET`] when empty.
    fn to_mode_string(&self) -> String {
        let mut s = String::from("+");
        for &(flag, c) in Self::table().entries() {
            if self.is_set(flag) {
                s.push(c);
            }
        }
        let args = self.arguments();
        if s.len() == 1 && args.is_empty() {
            return NO_MODES_SET.to_string();
        }
        for arg in args {
            s.push(' ');
            s.push_str(&arg);
        }
        s
    }
}
