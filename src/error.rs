//! Unified error handling for slirc-state.
//!
//! Nothing in the tracker is fatal for normal IRC churn. Every anomaly the
//! graph can run into is a variant of [`Anomaly`]: it is reported to the
//! [`AnomalySink`](crate::observer::AnomalySink) once, at the point of
//! detection, and then handed back to the caller who may ignore it.

use thiserror::Error;

// ============================================================================
// Anomalies (association and lookup operations)
// ============================================================================

/// Recoverable conditions raised by an inconsistent or replayed event stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Anomaly {
    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("nick {nick} is already on channel {channel}")]
    DuplicateAssociation { nick: String, channel: String },

    #[error("nick {nick} is not on channel {channel}")]
    RedundantRemoval { nick: String, channel: String },

    #[error("nick {nick} holds no membership on {channel}")]
    NotOnChannel { nick: String, channel: String },

    #[error("the local identity {0} cannot be removed")]
    LocalIdentityExempt(String),

    #[error("nickname {0} is already tracked")]
    NickCollision(String),

    #[error("mode '{0}' requires an argument but none provided")]
    MissingModeArgument(char),

    #[error("invalid channel limit: {0}")]
    InvalidLimit(String),
}

impl Anomaly {
    /// Get a static code string for log labeling.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::DuplicateAssociation { .. } => "duplicate_association",
            Self::RedundantRemoval { .. } => "redundant_removal",
            Self::NotOnChannel { .. } => "not_on_channel",
            Self::LocalIdentityExempt(_) => "local_identity_exempt",
            Self::NickCollision(_) => "nick_collision",
            Self::MissingModeArgument(_) => "missing_mode_argument",
            Self::InvalidLimit(_) => "invalid_limit",
        }
    }

    /// True for the "not found" family, which is routine rather than suspicious.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoSuchNick(_) | Self::NoSuchChannel(_))
    }
}

/// Result type for tracker operations.
pub type TrackResult<T = ()> = Result<T, Anomaly>;
