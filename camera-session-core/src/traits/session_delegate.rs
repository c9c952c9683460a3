use uuid::Uuid;

use crate::models::camera_models::FocusChange;
use crate::models::capture_result::CorrectedImage;
use crate::models::error::SessionError;
use crate::models::state::{AuthorizationStatus, SessionState};

/// Event delegate for capture session notifications.
///
/// All methods are called on the [`MainContext`](super::main_context::MainContext)
/// the controller was built with.
pub trait SessionDelegate: Send + Sync {
    fn on_authorization_changed(&self, status: AuthorizationStatus);

    fn on_state_changed(&self, state: SessionState);

    fn on_focus_changed(&self, change: FocusChange);

    /// Fires exactly once per successfully corrected capture request.
    fn on_image_captured(&self, image: &CorrectedImage);

    /// Fires when a request's raw result could not be turned into an image.
    fn on_capture_failed(&self, request_id: Uuid, error: &SessionError);
}
