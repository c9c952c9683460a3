//! Delegate and preview surface that remember what they were told.

use parking_lot::Mutex;
use uuid::Uuid;

use camera_session_core::models::camera_models::{FocusChange, ViewSize};
use camera_session_core::models::capture_result::CorrectedImage;
use camera_session_core::models::config::VideoGravity;
use camera_session_core::models::error::SessionError;
use camera_session_core::models::orientation::CaptureOrientation;
use camera_session_core::models::state::{AuthorizationStatus, SessionState};
use camera_session_core::traits::preview_surface::PreviewSurface;
use camera_session_core::traits::session_delegate::SessionDelegate;

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Authorization(AuthorizationStatus),
    State(SessionState),
    Focus(FocusChange),
    Image(CorrectedImage),
    Failed(Uuid, SessionError),
}

/// Records every delegate callback in arrival order.
#[derive(Default)]
pub struct RecordingDelegate {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().clone()
    }

    pub fn images(&self) -> Vec<CorrectedImage> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Image(image) => Some(image.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<(Uuid, SessionError)> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Failed(id, error) => Some((*id, error.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn states(&self) -> Vec<SessionState> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SessionEvent::State(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn authorizations(&self) -> Vec<AuthorizationStatus> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Authorization(status) => Some(*status),
                _ => None,
            })
            .collect()
    }

    pub fn focus_changes(&self) -> Vec<FocusChange> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Focus(change) => Some(*change),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: SessionEvent) {
        log::debug!("Delegate event: {:?}", event);
        self.events.lock().push(event);
    }
}

impl SessionDelegate for RecordingDelegate {
    fn on_authorization_changed(&self, status: AuthorizationStatus) {
        self.push(SessionEvent::Authorization(status));
    }

    fn on_state_changed(&self, state: SessionState) {
        self.push(SessionEvent::State(state));
    }

    fn on_focus_changed(&self, change: FocusChange) {
        self.push(SessionEvent::Focus(change));
    }

    fn on_image_captured(&self, image: &CorrectedImage) {
        self.push(SessionEvent::Image(image.clone()));
    }

    fn on_capture_failed(&self, request_id: Uuid, error: &SessionError) {
        self.push(SessionEvent::Failed(request_id, error.clone()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PreviewSnapshot {
    pub gravity: Option<VideoGravity>,
    pub orientation: Option<CaptureOrientation>,
    pub bounds: Option<ViewSize>,
}

/// Preview surface that keeps its last applied properties.
#[derive(Default)]
pub struct RecordingPreview {
    snapshot: Mutex<PreviewSnapshot>,
}

impl RecordingPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PreviewSnapshot {
        *self.snapshot.lock()
    }
}

impl PreviewSurface for RecordingPreview {
    fn set_video_gravity(&self, gravity: VideoGravity) {
        self.snapshot.lock().gravity = Some(gravity);
    }

    fn set_connection_orientation(&self, orientation: CaptureOrientation) {
        self.snapshot.lock().orientation = Some(orientation);
    }

    fn set_bounds(&self, size: ViewSize) {
        self.snapshot.lock().bounds = Some(size);
    }
}
