//! Index-key case mapping.
//!
//! Servers advertise how they compare nicknames and channel names
//! (`CASEMAPPING` in ISUPPORT). The tracker folds every name through the
//! configured mapping before it touches an index, so `Alice` and `alice`
//! resolve to the same record on a server that treats them as equal.

use serde::Deserialize;

/// How names are folded into index keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casemapping {
    /// Names are used verbatim.
    #[default]
    Strict,
    /// `A-Z` fold to `a-z`.
    Ascii,
    /// RFC 1459: ASCII folding plus `[` → `{`, `]` → `}`, `\` → `|`, `~` → `^`.
    Rfc1459,
}

impl Casemapping {
    /// Fold a single character.
    #[inline]
    pub const fn fold_char(self, c: char) -> char {
        match self {
            Self::Strict => c,
            Self::Ascii => c.to_ascii_lowercase(),
            Self::Rfc1459 => match c {
                '[' => '{',
                ']' => '}',
                '\\' => '|',
                '~' => '^',
                _ => c.to_ascii_lowercase(),
            },
        }
    }

    /// Fold a name into its index key.
    pub fn fold(self, name: &str) -> String {
        match self {
            Self::Strict => name.to_owned(),
            _ => name.chars().map(|c| self.fold_char(c)).collect(),
        }
    }
}
