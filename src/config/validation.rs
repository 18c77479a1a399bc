//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Characters a nickname may never contain.
const FORBIDDEN_NICK_CHARS: &[char] = &[' ', ',', '*', '?', '!', '@'];

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("identity.nick is required")]
    MissingNick,
    #[error("identity.nick contains forbidden character {0:?}")]
    ForbiddenNickChar(char),
    #[error("identity.nick must not start with {0:?}")]
    InvalidNickStart(char),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let nick = &config.identity.nick;

    match nick.chars().next() {
        None => errors.push(ValidationError::MissingNick),
        Some(first) if first == '#' || first == '&' || first.is_ascii_digit() => {
            errors.push(ValidationError::InvalidNickStart(first));
        }
        Some(_) => {}
    }

    for c in FORBIDDEN_NICK_CHARS {
        if nick.contains(*c) {
            errors.push(ValidationError::ForbiddenNickChar(*c));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
