//! Exchange lifecycle types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The stage a single query exchange has reached.
///
/// Every call walks `Idle → Connecting → Connected → Writing → Reading → Closed`.
/// A failure in `Connecting`, `Writing` or `Reading` jumps straight to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeState {
    /// Nothing has happened yet.
    Idle,
    /// Resolving the endpoint and establishing the connection.
    Connecting,
    /// The connection is open; nothing has been sent yet.
    Connected,
    /// Sending the framed query.
    Writing,
    /// Draining the response until the peer closes.
    Reading,
    /// The connection has been released.
    Closed,
}

impl ExchangeState {
    /// Returns `true` once a connection exists that must be released.
    #[must_use]
    pub const fn holds_connection(self) -> bool {
        matches!(self, Self::Connected | Self::Writing | Self::Reading)
    }
}

impl fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Writing => write!(f, "writing"),
            Self::Reading => write!(f, "reading"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_connection() {
        assert!(!ExchangeState::Idle.holds_connection());
        assert!(!ExchangeState::Connecting.holds_connection());
        assert!(ExchangeState::Connected.holds_connection());
        assert!(ExchangeState::Writing.holds_connection());
        assert!(ExchangeState::Reading.holds_connection());
        assert!(!ExchangeState::Closed.holds_connection());
    }

    #[test]
    fn test_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ExchangeState::Reading).unwrap(),
            r#""reading""#
        );
        let state: ExchangeState = serde_json::from_str(r#""writing""#).unwrap();
        assert_eq!(state, ExchangeState::Writing);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ExchangeState::Connecting.to_string(), "connecting");
        assert_eq!(ExchangeState::Reading.to_string(), "reading");
    }
}
