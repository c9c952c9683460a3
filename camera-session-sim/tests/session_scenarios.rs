use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;

use camera_session_core::{
    AuthorizationStatus, CaptureBackend, CaptureOrientation, DeliveryTier, DevicePosition,
    ExposureMode, FlashMode, FocusMode, FocusPoint, FrameCallback, FrameStreamEvent,
    HostServices, ImageOrientation, InterfaceOrientation, MainQueue, OutputKind,
    SessionConfiguration, SessionController, SessionError, SessionPreset, SessionState,
    VideoGravity, ViewPoint, ViewSize, WhiteBalanceMode,
};
use camera_session_sim::backend::PIXEL_FORMAT_BGRA;
use camera_session_sim::{
    sensor, CaptureFault, CaptureMode, DeviceCapabilities, DeviceRegistry, RecordingDelegate,
    RecordingPreview, SimulatedAuthorization, SimulatedBackend, SimulatedDevice,
    SimulatedOrientation,
};

const WAIT: Duration = Duration::from_secs(2);

struct Harness {
    main: Arc<MainQueue>,
    registry: Arc<DeviceRegistry>,
    auth: Arc<SimulatedAuthorization>,
    orientation: Arc<SimulatedOrientation>,
    delegate: Arc<RecordingDelegate>,
    controller: SessionController<SimulatedBackend>,
}

impl Harness {
    fn new() -> Self {
        Self::build(
            DeviceRegistry::standard(),
            SimulatedAuthorization::authorized(),
            SessionConfiguration::default(),
            |backend| backend,
        )
    }

    fn with_config(config: SessionConfiguration) -> Self {
        Self::build(
            DeviceRegistry::standard(),
            SimulatedAuthorization::authorized(),
            config,
            |backend| backend,
        )
    }

    fn with_backend(customize: impl FnOnce(SimulatedBackend) -> SimulatedBackend) -> Self {
        Self::build(
            DeviceRegistry::standard(),
            SimulatedAuthorization::authorized(),
            SessionConfiguration::default(),
            customize,
        )
    }

    fn with_authorization(auth: SimulatedAuthorization) -> Self {
        Self::build(
            DeviceRegistry::standard(),
            auth,
            SessionConfiguration::default(),
            |backend| backend,
        )
    }

    fn build(
        registry: DeviceRegistry,
        auth: SimulatedAuthorization,
        config: SessionConfiguration,
        customize: impl FnOnce(SimulatedBackend) -> SimulatedBackend,
    ) -> Self {
        let main = Arc::new(MainQueue::new());
        let registry = Arc::new(registry);
        let auth = Arc::new(auth);
        let orientation = Arc::new(SimulatedOrientation::portrait());
        let backend = customize(SimulatedBackend::new(Arc::clone(&registry)));

        let services = HostServices {
            authorization: auth.clone(),
            orientation: orientation.clone(),
            main_context: main.clone(),
        };
        let controller = SessionController::new(backend, services, config).unwrap();
        let delegate = Arc::new(RecordingDelegate::new());
        controller.set_delegate(delegate.clone());

        Self {
            main,
            registry,
            auth,
            orientation,
            delegate,
            controller,
        }
    }

    fn activated(self) -> Self {
        self.controller.activate();
        self.main.run_pending();
        assert_eq!(self.controller.state(), SessionState::Running);
        self
    }

    fn backend(&self) -> &SimulatedBackend {
        self.controller.backend()
    }

    fn device(&self, id: &str) -> Arc<SimulatedDevice> {
        self.registry.get(id).unwrap()
    }

    fn wait_for_images(&self, count: usize) -> bool {
        self.main.run_until(WAIT, || self.delegate.images().len() >= count)
    }
}

#[test]
fn configure_builds_one_input_and_both_outputs_in_one_transaction() {
    let h = Harness::new().activated();
    let backend = h.backend();

    assert_eq!(backend.input_device_ids(), vec!["sim-back-wide".to_string()]);
    assert_eq!(backend.output_kinds(), vec![OutputKind::Photo, OutputKind::FrameStream]);
    assert_eq!(backend.preset(), Some(SessionPreset::High));
    assert_eq!(backend.commit_count(), 1);
    assert_eq!(backend.unbatched_change_count(), 0);
    assert_eq!(backend.start_count(), 1);

    assert_eq!(h.controller.active_device_id().as_deref(), Some("sim-back-wide"));
    assert_eq!(h.delegate.states(), vec![SessionState::Configuring, SessionState::Running]);
    assert_eq!(h.delegate.authorizations(), vec![AuthorizationStatus::Authorized]);
}

#[test]
fn continuous_auto_modes_applied_to_capable_device() {
    let h = Harness::new().activated();
    let settings = h.device("sim-back-wide").settings();

    assert_eq!(settings.focus_mode, Some(FocusMode::ContinuousAutoFocus));
    assert_eq!(settings.exposure_mode, Some(ExposureMode::ContinuousAutoExposure));
    assert_eq!(
        settings.white_balance_mode,
        Some(WhiteBalanceMode::ContinuousAutoWhiteBalance)
    );
    assert!(settings.smooth_autofocus);
    assert!(!settings.low_light_boost);
    assert!(!h.device("sim-back-wide").is_locked());
}

#[test]
fn photo_output_and_settings_follow_configuration() {
    let h = Harness::new().activated();
    h.controller.take_photo().unwrap();

    let issued = h.backend().issued_captures();
    assert_eq!(issued.len(), 1);
    let settings = &issued[0];
    assert!(settings.high_resolution);
    assert!(settings.auto_still_image_stabilization);
    let preview = settings.preview_format.unwrap();
    assert_eq!(preview.pixel_format, PIXEL_FORMAT_BGRA);
    assert_eq!((preview.width, preview.height), (160, 160));
}

#[test]
fn start_twice_runs_once_without_duplicate_outputs() {
    let h = Harness::new().activated();

    h.controller.start();
    h.controller.start();
    h.controller.configure();

    assert_eq!(h.backend().start_count(), 1);
    assert_eq!(h.backend().output_kinds().len(), 2);
    assert_eq!(h.backend().input_device_ids().len(), 1);
}

#[test]
fn stop_then_start_resumes_streaming() {
    let h = Harness::new().activated();

    h.controller.stop();
    h.controller.stop();
    assert_eq!(h.controller.state(), SessionState::Stopped);
    assert!(!h.backend().is_running());

    h.controller.start();
    assert_eq!(h.controller.state(), SessionState::Running);
    assert_eq!(h.backend().start_count(), 2);
    assert_eq!(h.backend().stop_count(), 1);
}

#[test]
fn reconfigure_always_leaves_exactly_one_input() {
    let h = Harness::new().activated();

    h.controller.set_position(DevicePosition::Front);
    assert_eq!(h.backend().input_device_ids(), vec!["sim-front".to_string()]);

    h.controller.set_position(DevicePosition::Back);
    h.controller.reconfigure();
    h.controller.reconfigure();
    assert_eq!(h.backend().input_device_ids(), vec!["sim-back-wide".to_string()]);

    assert_eq!(h.controller.diagnostics().reconfigurations, 4);
    assert_eq!(h.backend().unbatched_change_count(), 0);
    assert_eq!(h.backend().output_kinds().len(), 2);
    assert_eq!(h.controller.state(), SessionState::Running);
}

#[test]
fn reconfigure_on_stopped_session_stays_stopped() {
    let h = Harness::new().activated();
    h.controller.stop();

    h.controller.set_position(DevicePosition::Front);

    assert_eq!(h.controller.state(), SessionState::Stopped);
    assert_eq!(h.backend().input_device_ids(), vec!["sim-front".to_string()]);
    assert_eq!(h.backend().start_count(), 1);
}

#[test]
fn unsupported_preset_falls_back_to_high() {
    let h = Harness::new().activated();

    h.controller.set_preset(SessionPreset::Hd4k3840x2160);

    assert_eq!(h.backend().preset(), Some(SessionPreset::High));
    assert_eq!(h.controller.active_preset(), Some(SessionPreset::High));
    assert_eq!(h.controller.configuration().preset, SessionPreset::Hd4k3840x2160);
}

#[test]
fn missing_device_leaves_session_without_input() {
    let registry = DeviceRegistry::empty();
    registry.add(SimulatedDevice::new(
        "front-only",
        "Front Camera",
        DevicePosition::Front,
        DeviceCapabilities::fixed_focus(),
    ));
    let h = Harness::build(
        registry,
        SimulatedAuthorization::authorized(),
        SessionConfiguration::default(),
        |backend| backend,
    )
    .activated();

    assert!(h.backend().input_device_ids().is_empty());
    assert!(h.controller.active_device_id().is_none());
    assert_eq!(h.controller.take_photo(), None);

    h.main.run_pending();
    assert!(h.backend().issued_captures().is_empty());
    assert!(h.delegate.images().is_empty());
}

#[test]
fn reconfigure_to_position_without_device_keeps_outputs() {
    let h = Harness::new().activated();
    h.registry.remove("sim-front");

    h.controller.set_position(DevicePosition::Front);

    assert!(h.backend().input_device_ids().is_empty());
    assert!(h.controller.active_device_id().is_none());
    assert_eq!(h.controller.take_photo(), None);
    assert_eq!(h.backend().output_kinds(), vec![OutputKind::Photo, OutputKind::FrameStream]);
    assert_eq!(h.controller.state(), SessionState::Running);
    assert!(!h.controller.set_focus_point(FocusPoint::new(0.5, 0.5)));

    h.controller.set_position(DevicePosition::Back);
    assert_eq!(h.backend().input_device_ids(), vec!["sim-back-wide".to_string()]);
    assert!(h.controller.take_photo().is_some());
}

#[test]
fn configure_without_outputs_does_not_rebuild() {
    let h = Harness::with_backend(|b| {
        b.with_rejected_output(OutputKind::Photo)
            .with_rejected_output(OutputKind::FrameStream)
    })
    .activated();
    assert!(h.controller.outputs().is_empty());

    h.controller.configure();
    h.controller.configure();

    assert_eq!(h.backend().start_count(), 1);
    assert_eq!(h.backend().input_device_ids(), vec!["sim-back-wide".to_string()]);
    assert_eq!(h.controller.diagnostics().reconfigurations, 2);
    assert_eq!(h.backend().unbatched_change_count(), 0);
}

#[test]
fn back_camera_capture_yields_one_upright_image() {
    let h = Harness::new().activated();

    let id = h.controller.take_photo().unwrap();
    assert_eq!(h.controller.pending_captures(), 1);
    assert!(h.backend().complete_next());
    assert!(h.wait_for_images(1));
    h.main.run_pending();

    let images = h.delegate.images();
    assert_eq!(images.len(), 1);
    let image = &images[0];
    assert_eq!(image.request_id, id);
    assert_eq!(image.source_orientation, ImageOrientation::Right);
    assert_eq!(image.capture_orientation, CaptureOrientation::Portrait);
    assert_eq!(image.applied_rotation, 0);
    assert_eq!((image.width(), image.height()), (8, 6));
    assert_eq!(sensor::find_marker(&image.image), Some((0, 0)));

    assert_eq!(h.controller.pending_captures(), 0);
    let diagnostics = h.controller.diagnostics();
    assert_eq!(diagnostics.captures_issued, 1);
    assert_eq!(diagnostics.captures_delivered, 1);
}

#[test]
fn rotation_uses_orientation_at_request_time() {
    let h = Harness::new();
    h.orientation.set_interface(InterfaceOrientation::LandscapeLeft);
    let h = h.activated();

    h.controller.take_photo().unwrap();
    h.orientation.set_interface(InterfaceOrientation::LandscapeRight);
    h.controller.interface_orientation_changed();
    assert_eq!(
        h.controller.orientation_state().capture_orientation(),
        CaptureOrientation::LandscapeRight
    );

    h.backend().complete_next();
    assert!(h.wait_for_images(1));

    let image = &h.delegate.images()[0];
    assert_eq!(image.capture_orientation, CaptureOrientation::LandscapeLeft);
    assert_eq!(image.applied_rotation, 90);
    assert_eq!((image.width(), image.height()), (6, 8));
    assert_eq!(sensor::find_marker(&image.image), Some((5, 0)));
}

#[test]
fn standard_resolution_capture_when_high_resolution_disabled() {
    let config = SessionConfiguration {
        high_resolution_capture: false,
        ..SessionConfiguration::default()
    };
    let h = Harness::with_config(config).activated();

    h.controller.take_photo().unwrap();
    h.backend().complete_next();
    assert!(h.wait_for_images(1));

    assert_eq!(h.delegate.images()[0].width(), 4);
}

#[test]
fn legacy_tier_uses_full_resolution_buffer() {
    let h = Harness::with_backend(|b| {
        b.with_delivery_tier(DeliveryTier::Legacy)
    })
    .activated();

    h.controller.take_photo().unwrap();
    h.backend().complete_next();
    assert!(h.wait_for_images(1));

    let image = &h.delegate.images()[0];
    assert_eq!((image.width(), image.height()), (8, 6));
    assert_eq!(sensor::find_marker(&image.image), Some((0, 0)));
}

#[test]
fn mismatched_delivery_shape_is_ignored() {
    let h = Harness::new().activated();
    h.backend().inject_capture_fault(CaptureFault::WrongShapeFirst);

    h.controller.take_photo().unwrap();
    h.backend().complete_next();
    assert!(h.wait_for_images(1));
    h.main.run_pending();

    assert_eq!(h.delegate.images().len(), 1);
    assert!(h.delegate.failures().is_empty());
}

#[test]
fn undecodable_photo_reports_failure() {
    let h = Harness::new().activated();
    h.backend().inject_capture_fault(CaptureFault::CorruptData);
    h.backend().inject_capture_fault(CaptureFault::MissingData);

    let first = h.controller.take_photo().unwrap();
    let second = h.controller.take_photo().unwrap();
    h.backend().complete_all();
    assert!(h.main.run_until(WAIT, || h.delegate.failures().len() >= 2));

    let failures = h.delegate.failures();
    let ids: Vec<_> = failures.iter().map(|(id, _)| *id).collect();
    assert!(ids.contains(&first));
    assert!(ids.contains(&second));
    assert!(failures
        .iter()
        .all(|(_, e)| matches!(e, SessionError::DecodeFailed(_))));
    assert!(h.delegate.images().is_empty());
    assert_eq!(h.controller.diagnostics().captures_failed, 2);
    assert_eq!(h.controller.pending_captures(), 0);
}

#[test]
fn capture_unavailable_when_photo_output_rejected() {
    let h = Harness::with_backend(|b| b.with_rejected_output(OutputKind::Photo)).activated();

    assert_eq!(h.controller.outputs(), vec![OutputKind::FrameStream]);
    assert_eq!(h.controller.take_photo(), None);
}

#[test]
fn capture_unavailable_before_configuration() {
    let h = Harness::new();
    assert_eq!(h.controller.take_photo(), None);
    assert!(h.backend().issued_captures().is_empty());
}

#[test]
fn reconfigure_waits_for_in_flight_capture() {
    let h = Harness::new().activated();

    h.controller.take_photo().unwrap();
    h.controller.set_position(DevicePosition::Front);

    assert_eq!(h.backend().input_device_ids(), vec!["sim-back-wide".to_string()]);
    assert_eq!(h.controller.diagnostics().deferred_reconfigurations, 1);

    h.backend().complete_next();
    let swapped = h.main.run_until(WAIT, || {
        h.delegate.images().len() == 1
            && h.backend().input_device_ids() == vec!["sim-front".to_string()]
    });

    assert!(swapped);
    assert_eq!(h.controller.state(), SessionState::Running);
    assert_eq!(h.controller.diagnostics().reconfigurations, 1);
}

#[test]
fn result_arriving_after_stop_is_still_delivered() {
    let h = Harness::new().activated();

    h.controller.take_photo().unwrap();
    h.controller.stop();
    h.backend().complete_next();

    assert!(h.wait_for_images(1));
    assert_eq!(h.controller.state(), SessionState::Stopped);
}

#[test]
fn results_after_teardown_are_discarded() {
    let h = Harness::with_backend(|b| {
        b.with_capture_mode(CaptureMode::Automatic {
            delay: Duration::from_millis(50),
        })
    })
    .activated();
    let Harness {
        main,
        delegate,
        controller,
        ..
    } = h;

    controller.take_photo().unwrap();
    drop(controller);

    std::thread::sleep(Duration::from_millis(100));
    main.run_pending();
    assert!(delegate.images().is_empty());
    assert!(delegate.failures().is_empty());
}

#[test]
fn abandoned_capture_is_reported_and_releases_deferred_reconfigure() {
    let h = Harness::new().activated();

    let id = h.controller.take_photo().unwrap();
    h.controller.stop();
    h.controller.set_position(DevicePosition::Front);
    assert_eq!(h.controller.diagnostics().deferred_reconfigurations, 1);
    assert_eq!(h.backend().input_device_ids(), vec!["sim-back-wide".to_string()]);

    assert_eq!(h.backend().cancel_pending(), 1);
    let swapped = h.main.run_until(WAIT, || {
        h.backend().input_device_ids() == vec!["sim-front".to_string()]
    });

    assert!(swapped);
    assert_eq!(h.controller.pending_captures(), 0);
    assert_eq!(h.controller.state(), SessionState::Stopped);
    assert_eq!(h.delegate.failures(), vec![(id, SessionError::CaptureAbandoned)]);
    assert!(h.delegate.images().is_empty());
    assert_eq!(h.controller.diagnostics().captures_dropped, 1);
}

#[test]
fn capture_answered_only_with_wrong_shape_is_abandoned() {
    let h = Harness::new().activated();
    h.backend().inject_capture_fault(CaptureFault::WrongShapeOnly);

    let id = h.controller.take_photo().unwrap();
    h.backend().complete_next();
    assert!(h.main.run_until(WAIT, || !h.delegate.failures().is_empty()));

    assert_eq!(h.delegate.failures(), vec![(id, SessionError::CaptureAbandoned)]);
    assert_eq!(h.controller.pending_captures(), 0);

    h.controller.set_position(DevicePosition::Front);
    assert_eq!(h.backend().input_device_ids(), vec!["sim-front".to_string()]);
    assert_eq!(h.controller.diagnostics().deferred_reconfigurations, 0);
}

#[test]
fn delivered_capture_is_not_reported_abandoned() {
    let h = Harness::new().activated();

    h.controller.take_photo().unwrap();
    h.backend().complete_next();
    assert!(h.wait_for_images(1));
    assert_eq!(h.backend().cancel_pending(), 0);
    h.main.run_pending();

    assert!(h.delegate.failures().is_empty());
    assert_eq!(h.controller.diagnostics().captures_dropped, 0);
}

#[test]
fn automatic_delivery_completes_without_driving() {
    let h = Harness::with_backend(|b| {
        b.with_capture_mode(CaptureMode::Automatic {
            delay: Duration::from_millis(5),
        })
    })
    .activated();

    h.controller.take_photo().unwrap();
    assert!(h.wait_for_images(1));
}

#[test]
fn tap_focus_applies_point_to_capable_device() {
    let config = SessionConfiguration {
        tap_to_focus: true,
        ..SessionConfiguration::default()
    };
    let h = Harness::with_config(config).activated();
    let location = ViewPoint { x: 50.0, y: 100.0 };

    assert!(h.controller.handle_tap(location, ViewSize { width: 200.0, height: 400.0 }));
    h.main.run_pending();

    let settings = h.device("sim-back-wide").settings();
    let point = settings.focus_point.unwrap();
    assert_relative_eq!(point.x, 0.25);
    assert_relative_eq!(point.y, 0.75);
    assert_eq!(settings.exposure_point, Some(point));
    assert_eq!(settings.focus_mode, Some(FocusMode::AutoFocus));
    assert_eq!(settings.exposure_mode, Some(ExposureMode::ContinuousAutoExposure));

    let changes = h.delegate.focus_changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].view_location, Some(location));
}

#[test]
fn taps_ignored_while_tap_to_focus_disabled() {
    let h = Harness::new().activated();
    let before = h.device("sim-back-wide").mutation_count();

    assert!(!h.controller.handle_tap(
        ViewPoint { x: 10.0, y: 10.0 },
        ViewSize { width: 100.0, height: 100.0 }
    ));
    h.main.run_pending();

    assert_eq!(h.device("sim-back-wide").mutation_count(), before);
    assert!(h.delegate.focus_changes().is_empty());
}

#[test]
fn focus_on_unsupported_device_changes_nothing() {
    let config = SessionConfiguration {
        position: DevicePosition::Front,
        tap_to_focus: true,
        ..SessionConfiguration::default()
    };
    let h = Harness::with_config(config).activated();
    let front = h.device("sim-front");
    let before = front.mutation_count();
    let locks = front.lock_count();

    assert!(!h.controller.handle_tap(
        ViewPoint { x: 10.0, y: 10.0 },
        ViewSize { width: 100.0, height: 100.0 }
    ));
    h.main.run_pending();

    assert_eq!(front.mutation_count(), before);
    assert_eq!(front.lock_count(), locks);
    assert!(h.delegate.focus_changes().is_empty());
}

#[test]
fn device_lock_failure_keeps_input_attached() {
    let h = Harness::new();
    h.device("sim-back-wide").fail_lock(true);
    let h = h.activated();

    assert_eq!(h.backend().input_device_ids(), vec!["sim-back-wide".to_string()]);
    assert_eq!(h.device("sim-back-wide").mutation_count(), 0);
    assert!(!h.controller.set_focus_point(FocusPoint::new(0.5, 0.5)));
}

#[test]
fn focus_updates_and_reconfigurations_never_overlap_device_locks() {
    let h = Harness::new().activated();
    let device = h.device("sim-back-wide");
    let locks_before = device.lock_count();
    let controller = &h.controller;

    std::thread::scope(|scope| {
        let focus = scope.spawn(|| {
            (0..50)
                .filter(|i| controller.set_focus_point(FocusPoint::new(0.01 * *i as f64, 0.5)))
                .count()
        });
        let reconfigure = scope.spawn(|| {
            for i in 0..25 {
                controller.set_low_light_boost(i % 2 == 0);
                controller.reconfigure();
            }
        });

        reconfigure.join().unwrap();
        assert_eq!(focus.join().unwrap(), 50);
    });

    assert_eq!(device.overlapping_lock_count(), 0);
    assert_eq!(device.lock_count(), locks_before + 100);
    assert!(!device.is_locked());
    assert_eq!(h.backend().input_device_ids(), vec!["sim-back-wide".to_string()]);
}

#[test]
fn low_light_boost_follows_configuration() {
    let h = Harness::new().activated();

    h.controller.set_low_light_boost(true);
    assert!(h.device("sim-back-wide").settings().low_light_boost);

    h.controller.set_low_light_boost(false);
    assert!(!h.device("sim-back-wide").settings().low_light_boost);
}

#[test]
fn flash_mode_carried_into_next_request() {
    let h = Harness::new().activated();

    h.controller.set_flash_mode(FlashMode::Auto);
    h.controller.take_photo().unwrap();

    assert_eq!(
        h.backend().issued_captures()[0].flash_mode,
        FlashMode::Auto
    );
    assert_eq!(h.controller.diagnostics().reconfigurations, 0);
}

#[test]
fn prompt_granted_configures_session() {
    let h = Harness::with_authorization(SimulatedAuthorization::prompting(true));

    h.controller.activate();
    assert!(h
        .main
        .run_until(WAIT, || h.controller.state() == SessionState::Running));
    h.main.run_pending();

    assert_eq!(h.auth.request_count(), 1);
    assert_eq!(h.controller.authorization_status(), AuthorizationStatus::Authorized);
    assert_eq!(h.delegate.authorizations(), vec![AuthorizationStatus::Authorized]);
}

#[test]
fn prompt_refused_leaves_session_unconfigured() {
    let h = Harness::with_authorization(SimulatedAuthorization::prompting(false));

    h.controller.activate();
    assert!(h
        .main
        .run_until(WAIT, || !h.delegate.authorizations().is_empty()));

    assert_eq!(h.delegate.authorizations(), vec![AuthorizationStatus::Denied]);
    assert_eq!(h.controller.state(), SessionState::Uninitialized);
    assert!(h.backend().output_kinds().is_empty());
}

#[test]
fn denied_or_restricted_access_never_configures() {
    for (auth, status) in [
        (SimulatedAuthorization::denied(), AuthorizationStatus::Denied),
        (SimulatedAuthorization::restricted(), AuthorizationStatus::Restricted),
    ] {
        let h = Harness::with_authorization(auth);

        h.controller.activate();
        h.controller.configure();
        h.main.run_pending();

        assert_eq!(h.controller.state(), SessionState::Uninitialized);
        assert_eq!(h.auth.request_count(), 0);
        assert!(h.backend().input_device_ids().is_empty());
        assert_eq!(h.delegate.authorizations(), vec![status]);
        assert_eq!(h.controller.take_photo(), None);
    }
}

#[test]
fn preview_receives_gravity_and_connection_orientation() {
    let h = Harness::new().activated();
    let preview = Arc::new(RecordingPreview::new());

    h.controller.set_preview_surface(preview.clone());
    let snapshot = preview.snapshot();
    assert_eq!(snapshot.gravity, Some(VideoGravity::ResizeAspectFill));
    assert_eq!(snapshot.orientation, Some(CaptureOrientation::Portrait));

    h.controller.set_video_gravity(VideoGravity::ResizeAspect);
    h.controller.layout_changed(ViewSize { width: 390.0, height: 844.0 });
    let snapshot = preview.snapshot();
    assert_eq!(snapshot.gravity, Some(VideoGravity::ResizeAspect));
    assert_eq!(snapshot.bounds, Some(ViewSize { width: 390.0, height: 844.0 }));
}

#[test]
fn fixed_orientation_pins_preview_but_not_capture_rotation() {
    let h = Harness::new().activated();
    let preview = Arc::new(RecordingPreview::new());
    h.controller.set_preview_surface(preview.clone());

    h.controller.set_fixed_orientation(Some(CaptureOrientation::LandscapeRight));
    assert_eq!(preview.snapshot().orientation, Some(CaptureOrientation::LandscapeRight));

    h.orientation.set_interface(InterfaceOrientation::PortraitUpsideDown);
    h.controller.interface_orientation_changed();
    assert_eq!(preview.snapshot().orientation, Some(CaptureOrientation::LandscapeRight));

    h.controller.take_photo().unwrap();
    h.backend().complete_next();
    assert!(h.wait_for_images(1));
    assert_eq!(h.delegate.images()[0].applied_rotation, 180);
}

#[test]
fn frame_stream_counts_delivered_and_dropped_frames() {
    let h = Harness::new().activated();
    let observed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&observed);
    let observer: FrameCallback = Arc::new(move |event: FrameStreamEvent<'_>| {
        if let FrameStreamEvent::Output(frame) = event {
            assert_eq!((frame.width, frame.height), (4, 3));
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    h.controller.set_frame_observer(observer);

    for _ in 0..3 {
        assert!(h.backend().push_frame());
    }
    h.backend().drop_frame();

    let diagnostics = h.controller.diagnostics();
    assert_eq!(diagnostics.frames_delivered, 3);
    assert_eq!(diagnostics.frames_dropped, 1);
    assert_eq!(observed.load(Ordering::SeqCst), 3);
}

#[test]
fn configuration_loaded_from_json_drives_session() {
    let config = SessionConfiguration::from_json_str(
        r#"{ "position": "front", "preset": "vga640x480", "flash_mode": "on" }"#,
    )
    .unwrap();
    let h = Harness::with_config(config).activated();

    assert_eq!(h.backend().input_device_ids(), vec!["sim-front".to_string()]);
    assert_eq!(h.backend().preset(), Some(SessionPreset::Vga640x480));
}
