//! Session and authentication state of the local client.
use serde::{Deserialize, Serialize};

use crate::world::WorldId;

/// Lifecycle of the local client session, in progression order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SessionState {
    #[default]
    Unknown,
    Starting,
    LoginScreen,
    LoginScreenAuthenticator,
    LoggingIn,
    Loading,
    LoggedIn,
    ConnectionLost,
    Hopping,
}

impl SessionState {
    pub const fn is_logged_in(self) -> bool {
        matches!(self, SessionState::LoggedIn)
    }

    /// The world list is only worth loading once the client reached the login
    /// screen.
    pub fn can_discover_worlds(self) -> bool {
        self >= SessionState::LoginScreen
    }

    /// Hops are possible in-game or directly from the login screen.
    pub const fn can_request_hop(self) -> bool {
        matches!(self, SessionState::LoggedIn | SessionState::LoginScreen)
    }
}

/// Read access to the local session.
pub trait SessionGate: Send + Sync {
    fn current_world(&self) -> WorldId;

    fn session_state(&self) -> SessionState;

    /// User configuration switch for the hop feature.
    fn is_transfer_feature_enabled(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_starts_at_login_screen() {
        assert!(!SessionState::Starting.can_discover_worlds());
        assert!(SessionState::LoginScreen.can_discover_worlds());
        assert!(SessionState::LoggedIn.can_discover_worlds());
        assert!(SessionState::Hopping.can_discover_worlds());
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!("logged_in".parse::<SessionState>(), Ok(SessionState::LoggedIn));
        assert_eq!("LOGIN_SCREEN".parse::<SessionState>(), Ok(SessionState::LoginScreen));
        assert_eq!(SessionState::ConnectionLost.to_string(), "connection_lost");
    }
}
