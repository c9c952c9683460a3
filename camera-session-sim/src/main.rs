//! Runs one capture against the simulated platform and reports the result.
//!
//! ```text
//! RUST_LOG=debug camera-sim [config.json]
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use camera_session_core::{
    HostServices, MainQueue, SessionConfiguration, SessionController, SessionError, SessionState,
};
use camera_session_sim::{
    sensor, CaptureMode, DeviceRegistry, RecordingDelegate, RecordingPreview,
    SimulatedAuthorization, SimulatedBackend, SimulatedOrientation,
};

const WAIT: Duration = Duration::from_secs(2);

fn load_configuration() -> Result<SessionConfiguration, SessionError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            SessionConfiguration::from_json_file(path)
        }
        None => Ok(SessionConfiguration::default()),
    }
}

fn run() -> Result<(), SessionError> {
    let config = load_configuration()?;
    match serde_json::to_string(&config) {
        Ok(json) => log::info!("Effective configuration: {}", json),
        Err(e) => log::warn!("Could not render configuration: {}", e),
    }

    let main = Arc::new(MainQueue::new());
    let backend = SimulatedBackend::new(Arc::new(DeviceRegistry::standard()))
        .with_capture_mode(CaptureMode::Automatic {
            delay: Duration::from_millis(20),
        })
        .with_frame_interval(Duration::from_millis(33));
    let services = HostServices {
        authorization: Arc::new(SimulatedAuthorization::prompting(true)),
        orientation: Arc::new(SimulatedOrientation::portrait()),
        main_context: main.clone(),
    };

    let controller = SessionController::new(backend, services, config)?;
    let delegate = Arc::new(RecordingDelegate::new());
    controller.set_delegate(delegate.clone());
    controller.set_preview_surface(Arc::new(RecordingPreview::new()));

    controller.activate();
    if !main.run_until(WAIT, || controller.state() == SessionState::Running) {
        log::error!("Session did not start (state {:?})", controller.state());
        return Err(SessionError::CaptureUnavailable);
    }

    let request_id = controller.take_photo().ok_or(SessionError::CaptureUnavailable)?;
    let finished = main.run_until(WAIT, || {
        !delegate.images().is_empty() || !delegate.failures().is_empty()
    });
    if !finished {
        log::error!("Timed out waiting for capture {}", request_id);
    }

    if let Some((_, error)) = delegate.failures().into_iter().next() {
        return Err(error);
    }
    for image in delegate.images() {
        log::info!(
            "Captured {} at {}: {}x{}, rotated {} degrees, marker at {:?}",
            image.request_id,
            image.captured_at,
            image.width(),
            image.height(),
            image.applied_rotation,
            sensor::find_marker(&image.image)
        );
    }

    controller.stop();
    main.run_pending();
    log::info!("Diagnostics: {:?}", controller.diagnostics());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
