use serde::{Deserialize, Serialize};

/// Capture session state machine.
///
/// State transitions:
/// ```text
/// uninitialized → configuring → running ⇄ stopped
///                      ↑           │         │
///                      └───────────┴─────────┘  (parameter change)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Configuring,
    Running,
    Stopped,
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether a full build has completed at least once.
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Running | Self::Stopped)
    }
}

/// Camera access authorization as reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    Restricted,
    Denied,
    Authorized,
}

impl AuthorizationStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_built_states_count_as_configured() {
        assert!(!SessionState::Uninitialized.is_configured());
        assert!(!SessionState::Configuring.is_configured());
        assert!(SessionState::Running.is_configured());
        assert!(SessionState::Stopped.is_configured());
    }

    #[test]
    fn only_running_streams() {
        assert!(SessionState::Running.is_running());
        assert!(!SessionState::Stopped.is_running());
        assert!(!SessionState::Configuring.is_running());
    }
}
