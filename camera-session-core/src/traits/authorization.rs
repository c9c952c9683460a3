use crate::models::state::AuthorizationStatus;

/// Callback receiving whether access was granted.
pub type AccessCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// Host environment's camera permission gate.
pub trait AuthorizationProvider: Send + Sync {
    fn status(&self) -> AuthorizationStatus;

    /// Prompt for access. `callback` may fire on any thread.
    fn request_access(&self, callback: AccessCallback);
}
