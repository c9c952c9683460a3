//! Simulated camera permission gate.
//!
//! Mirrors a consent prompt: access starts undetermined, and a request
//! resolves asynchronously on its own thread with a preset answer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use camera_session_core::models::state::AuthorizationStatus;
use camera_session_core::traits::authorization::{AccessCallback, AuthorizationProvider};

/// Authorization provider with a scripted prompt outcome.
pub struct SimulatedAuthorization {
    status: Mutex<AuthorizationStatus>,
    grant_on_request: bool,
    prompt_delay: Duration,
    requests: AtomicUsize,
}

impl SimulatedAuthorization {
    /// Access already granted; no prompt will be shown.
    pub fn authorized() -> Self {
        Self::with_status(AuthorizationStatus::Authorized, true)
    }

    /// Access not asked for yet. The prompt answers `grant`.
    pub fn prompting(grant: bool) -> Self {
        Self::with_status(AuthorizationStatus::NotDetermined, grant)
    }

    pub fn denied() -> Self {
        Self::with_status(AuthorizationStatus::Denied, false)
    }

    pub fn restricted() -> Self {
        Self::with_status(AuthorizationStatus::Restricted, false)
    }

    fn with_status(status: AuthorizationStatus, grant_on_request: bool) -> Self {
        Self {
            status: Mutex::new(status),
            grant_on_request,
            prompt_delay: Duration::from_millis(5),
            requests: AtomicUsize::new(0),
        }
    }

    /// Number of prompts shown.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Change the status behind the session's back, as a settings app would.
    pub fn set_status(&self, status: AuthorizationStatus) {
        *self.status.lock() = status;
    }
}

impl AuthorizationProvider for SimulatedAuthorization {
    fn status(&self) -> AuthorizationStatus {
        *self.status.lock()
    }

    fn request_access(&self, callback: AccessCallback) {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let granted = {
            let mut status = self.status.lock();
            if *status == AuthorizationStatus::NotDetermined {
                *status = if self.grant_on_request {
                    AuthorizationStatus::Authorized
                } else {
                    AuthorizationStatus::Denied
                };
            }
            status.is_authorized()
        };

        let delay = self.prompt_delay;
        let spawned = thread::Builder::new()
            .name("sim-authorization".into())
            .spawn(move || {
                thread::sleep(delay);
                callback(granted);
            });
        if let Err(e) = spawned {
            log::error!("Failed to spawn authorization prompt thread: {}", e);
        }
    }
}
