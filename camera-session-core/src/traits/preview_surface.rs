use crate::models::camera_models::ViewSize;
use crate::models::config::VideoGravity;
use crate::models::orientation::CaptureOrientation;

/// On-screen preview attached to the session. Rendering is the host's job.
pub trait PreviewSurface: Send + Sync {
    fn set_video_gravity(&self, gravity: VideoGravity);

    fn set_connection_orientation(&self, orientation: CaptureOrientation);

    fn set_bounds(&self, size: ViewSize);
}
