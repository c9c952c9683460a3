use std::collections::BTreeSet;
use std::sync::{Arc, Weak};

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::models::camera_models::{
    DevicePosition, FocusChange, FocusPoint, FrameStreamEvent, OutputKind, SessionDiagnostics,
    ViewPoint, ViewSize,
};
use crate::models::capture_result::CaptureRequest;
use crate::models::config::{FlashMode, SessionConfiguration, SessionPreset, VideoGravity};
use crate::models::error::SessionError;
use crate::models::orientation::{CaptureOrientation, OrientationState};
use crate::models::photo_delivery::{PhotoDelivery, PhotoSettings, PreviewFormat};
use crate::models::state::{AuthorizationStatus, SessionState};
use crate::processing::decode_worker::DecodeCompletion;
use crate::processing::orientation_mapper;
use crate::session::capture_pipeline::{AcceptOutcome, CapturePipeline};
use crate::session::device_resolver::{DeviceOptions, DeviceResolver};
use crate::traits::authorization::AuthorizationProvider;
use crate::traits::capture_backend::{CaptureBackend, FrameCallback, OutputConfig, PhotoCallback};
use crate::traits::capture_device::CaptureDevice;
use crate::traits::main_context::MainContext;
use crate::traits::orientation_provider::OrientationProvider;
use crate::traits::preview_surface::PreviewSurface;
use crate::traits::session_delegate::SessionDelegate;

/// Host-side collaborators injected into the controller.
#[derive(Clone)]
pub struct HostServices {
    pub authorization: Arc<dyn AuthorizationProvider>,
    pub orientation: Arc<dyn OrientationProvider>,
    pub main_context: Arc<dyn MainContext>,
}

/// Delegate notifications collected under the session lock and dispatched
/// after it is released.
enum Notice {
    State(SessionState),
    Authorization(AuthorizationStatus),
    Focus(FocusChange),
}

/// Mutable session state, guarded by the configuration gate.
struct SessionInner {
    state: SessionState,
    config: SessionConfiguration,
    authorization: AuthorizationStatus,
    device: Option<Arc<dyn CaptureDevice>>,
    preset: Option<SessionPreset>,
    outputs: BTreeSet<OutputKind>,
    orientation: OrientationState,
    in_flight: usize,
    reconfigure_pending: bool,
}

impl SessionInner {
    fn set_state(&mut self, state: SessionState, notices: &mut Vec<Notice>) {
        if self.state == state {
            return;
        }
        log::info!("Session state {:?} -> {:?}", self.state, state);
        self.state = state;
        notices.push(Notice::State(state));
    }
}

/// Opens a configuration transaction on the backend and commits it on drop.
struct ConfigurationTransaction<'a, B: CaptureBackend> {
    backend: &'a B,
}

impl<'a, B: CaptureBackend> ConfigurationTransaction<'a, B> {
    fn begin(backend: &'a B) -> Self {
        backend.begin_configuration();
        Self { backend }
    }
}

impl<B: CaptureBackend> Drop for ConfigurationTransaction<'_, B> {
    fn drop(&mut self) {
        self.backend.commit_configuration();
    }
}

/// Owned by a request's photo callback.
///
/// When the backend drops the callback, a request that never received an
/// accepted delivery is cancelled and reported to the delegate.
struct CaptureTicket<B: CaptureBackend> {
    shared: Weak<Shared<B>>,
    request_id: Uuid,
}

impl<B: CaptureBackend> CaptureTicket<B> {
    fn deliver(&self, delivery: PhotoDelivery) {
        match self.shared.upgrade() {
            Some(shared) => shared.on_photo_delivery(self.request_id, delivery),
            None => log::debug!(
                "Controller gone; dropping delivery for capture {}",
                self.request_id
            ),
        }
    }
}

impl<B: CaptureBackend> Drop for CaptureTicket<B> {
    fn drop(&mut self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        if !shared.pipeline.is_pending(self.request_id) {
            return;
        }
        // The backend may drop callbacks while the session lock is held.
        let weak = Weak::clone(&self.shared);
        let request_id = self.request_id;
        shared.main.dispatch(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.abandon_capture(request_id);
            }
        }));
    }
}

struct Shared<B: CaptureBackend> {
    backend: B,
    authorization: Arc<dyn AuthorizationProvider>,
    orientation: Arc<dyn OrientationProvider>,
    main: Arc<dyn MainContext>,
    delegate: RwLock<Option<Arc<dyn SessionDelegate>>>,
    preview: RwLock<Option<Arc<dyn PreviewSurface>>>,
    frame_observer: RwLock<Option<FrameCallback>>,
    inner: Mutex<SessionInner>,
    resolver: DeviceResolver,
    pipeline: CapturePipeline,
    diagnostics: Arc<Mutex<SessionDiagnostics>>,
}

/// Capture session controller.
///
/// Owns the hardware session exclusively. Every configuration change runs
/// as one transaction behind a single gate, so reconfigurations never
/// overlap each other or the issuance of a photo request.
///
/// ```text
/// activate ─→ configure ─→ [preset → device → input → outputs] ─→ running
/// setter   ─→ reconfigure ─→ [preset → detach inputs → device → input]
/// take_photo ─→ snapshot orientation ─→ backend ─→ decode worker ─→ delegate
/// ```
pub struct SessionController<B: CaptureBackend> {
    shared: Arc<Shared<B>>,
}

impl<B: CaptureBackend> SessionController<B> {
    pub fn new(
        backend: B,
        services: HostServices,
        config: SessionConfiguration,
    ) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::InvalidConfiguration)?;

        let dynamic = orientation_mapper::to_capture_orientation(
            services.orientation.interface_orientation(),
            services.orientation.device_orientation(),
        );
        let inner = SessionInner {
            state: SessionState::Uninitialized,
            orientation: OrientationState {
                fixed: config.fixed_orientation,
                dynamic,
            },
            config,
            authorization: AuthorizationStatus::NotDetermined,
            device: None,
            preset: None,
            outputs: BTreeSet::new(),
            in_flight: 0,
            reconfigure_pending: false,
        };

        Ok(Self {
            shared: Arc::new(Shared {
                backend,
                authorization: services.authorization,
                orientation: services.orientation,
                main: services.main_context,
                delegate: RwLock::new(None),
                preview: RwLock::new(None),
                frame_observer: RwLock::new(None),
                inner: Mutex::new(inner),
                resolver: DeviceResolver::new(),
                pipeline: CapturePipeline::new(),
                diagnostics: Arc::new(Mutex::new(SessionDiagnostics::default())),
            }),
        })
    }

    pub fn set_delegate(&self, delegate: Arc<dyn SessionDelegate>) {
        *self.shared.delegate.write() = Some(delegate);
    }

    /// Attach the on-screen preview; it immediately receives gravity and
    /// connection orientation.
    pub fn set_preview_surface(&self, surface: Arc<dyn PreviewSurface>) {
        *self.shared.preview.write() = Some(surface);
        self.shared.refresh_preview(None);
    }

    /// Observe frame-stream output. Runs on the platform's frame context.
    pub fn set_frame_observer(&self, observer: FrameCallback) {
        *self.shared.frame_observer.write() = Some(observer);
    }

    // --- Observation ---

    pub fn state(&self) -> SessionState {
        self.shared.inner.lock().state
    }

    pub fn configuration(&self) -> SessionConfiguration {
        self.shared.inner.lock().config.clone()
    }

    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.shared.inner.lock().authorization
    }

    pub fn orientation_state(&self) -> OrientationState {
        self.shared.inner.lock().orientation
    }

    /// Unique id of the device attached as the session's input.
    pub fn active_device_id(&self) -> Option<String> {
        self.shared
            .inner
            .lock()
            .device
            .as_ref()
            .map(|device| device.unique_id().to_string())
    }

    pub fn active_preset(&self) -> Option<SessionPreset> {
        self.shared.inner.lock().preset
    }

    pub fn outputs(&self) -> Vec<OutputKind> {
        self.shared.inner.lock().outputs.iter().copied().collect()
    }

    /// Requests issued to the backend whose raw result has not arrived yet.
    pub fn pending_captures(&self) -> usize {
        self.shared.pipeline.pending_count()
    }

    pub fn diagnostics(&self) -> SessionDiagnostics {
        self.shared.diagnostics.lock().clone()
    }

    /// The hardware session, for inspection only.
    ///
    /// Topology and running state belong to the controller; changing them
    /// through this handle leaves the controller's view stale.
    pub fn backend(&self) -> &B {
        &self.shared.backend
    }

    // --- Lifecycle ---

    /// Check camera authorization and configure once access is granted.
    pub fn activate(&self) {
        let shared = &self.shared;
        let status = shared.authorization.status();
        shared.inner.lock().authorization = status;

        match status {
            AuthorizationStatus::Authorized => {
                shared.run_configure();
                shared.notify(vec![Notice::Authorization(status)]);
            }
            AuthorizationStatus::NotDetermined => {
                log::info!("Requesting camera access");
                let weak = Arc::downgrade(shared);
                shared.authorization.request_access(Box::new(move |granted| {
                    let Some(shared) = weak.upgrade() else {
                        return;
                    };
                    let weak = Arc::downgrade(&shared);
                    shared.main.dispatch(Box::new(move || {
                        if let Some(shared) = weak.upgrade() {
                            shared.on_access_result(granted);
                        }
                    }));
                }));
            }
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                let error = if status == AuthorizationStatus::Denied {
                    SessionError::PermissionDenied
                } else {
                    SessionError::PermissionRestricted
                };
                log::warn!("{}; session stays unconfigured", error);
                shared.notify(vec![Notice::Authorization(status)]);
            }
        }
    }

    /// Full build: preset, device, input, outputs, then start streaming.
    pub fn configure(&self) {
        self.shared.run_configure();
    }

    /// Swap the device input for the current parameters. Outputs stay.
    pub fn reconfigure(&self) {
        self.shared.run_reconfigure();
    }

    pub fn start(&self) {
        let mut notices = Vec::new();
        {
            let mut inner = self.shared.inner.lock();
            let state = inner.state;
            match state {
                SessionState::Running => log::debug!("Session already running"),
                SessionState::Stopped => {
                    if !self.shared.backend.is_running() {
                        self.shared.backend.start_running();
                    }
                    inner.set_state(SessionState::Running, &mut notices);
                }
                SessionState::Uninitialized | SessionState::Configuring => {
                    log::debug!("Ignoring start on an unconfigured session")
                }
            }
        }
        self.shared.notify(notices);
    }

    /// Stop streaming. Configuration is kept for a later `start`.
    pub fn stop(&self) {
        let mut notices = Vec::new();
        {
            let mut inner = self.shared.inner.lock();
            if inner.state.is_running() {
                self.shared.backend.stop_running();
                inner.set_state(SessionState::Stopped, &mut notices);
            } else {
                log::debug!("Ignoring stop on a session that is not running");
            }
        }
        self.shared.notify(notices);
    }

    // --- Capture ---

    /// Issue a photo request.
    ///
    /// Returns the request id, or `None` when capture is unavailable
    /// (session not running, no photo output, or no device input).
    pub fn take_photo(&self) -> Option<Uuid> {
        let shared = &self.shared;
        let (settings, request_id) = {
            let mut inner = shared.inner.lock();
            if !inner.state.is_running()
                || !inner.outputs.contains(&OutputKind::Photo)
                || inner.device.is_none()
            {
                log::debug!("{}", SessionError::CaptureUnavailable);
                return None;
            }

            let request = CaptureRequest {
                id: Uuid::new_v4(),
                flash_mode: inner.config.flash_mode,
                high_resolution: inner.config.high_resolution_capture,
                preview_width: inner.config.preview_thumbnail_width,
                preview_height: inner.config.preview_thumbnail_height,
                orientation: inner.orientation.capture_orientation(),
                issued_at: Utc::now(),
            };
            let settings = PhotoSettings {
                request_id: request.id,
                flash_mode: request.flash_mode,
                high_resolution: request.high_resolution,
                auto_still_image_stabilization: true,
                preview_format: shared
                    .backend
                    .available_preview_pixel_formats()
                    .first()
                    .map(|&pixel_format| PreviewFormat {
                        pixel_format,
                        width: request.preview_width,
                        height: request.preview_height,
                    }),
            };

            log::info!(
                "Issuing capture {} at {:?}",
                request.id,
                request.orientation
            );
            let request_id = request.id;
            inner.in_flight += 1;
            shared.pipeline.register(request);
            (settings, request_id)
        };
        shared.diagnostics.lock().captures_issued += 1;

        let ticket = CaptureTicket {
            shared: Arc::downgrade(shared),
            request_id,
        };
        let callback: PhotoCallback = Arc::new(move |delivery| ticket.deliver(delivery));
        shared.backend.capture_photo(settings, callback);
        Some(request_id)
    }

    // --- Focus ---

    /// Point focus and exposure at a normalized sensor point.
    ///
    /// Returns whether the device accepted it; `on_focus_changed` fires
    /// only in that case.
    pub fn set_focus_point(&self, point: FocusPoint) -> bool {
        self.shared.focus(point, None)
    }

    /// Tap-to-focus entry point. Ignored unless tap-to-focus is enabled.
    pub fn handle_tap(&self, location: ViewPoint, view: ViewSize) -> bool {
        if !self.shared.inner.lock().config.tap_to_focus {
            return false;
        }
        match FocusPoint::from_view_location(location, view) {
            Some(point) => self.shared.focus(point, Some(location)),
            None => false,
        }
    }

    // --- Configuration surface ---

    pub fn set_preset(&self, preset: SessionPreset) {
        self.shared.inner.lock().config.preset = preset;
        self.shared.run_reconfigure();
    }

    pub fn set_position(&self, position: DevicePosition) {
        self.shared.inner.lock().config.position = position;
        self.shared.run_reconfigure();
    }

    pub fn set_low_light_boost(&self, enabled: bool) {
        self.shared.inner.lock().config.low_light_boost = enabled;
        self.shared.run_reconfigure();
    }

    pub fn set_flash_mode(&self, mode: FlashMode) {
        self.shared.inner.lock().config.flash_mode = mode;
    }

    pub fn set_tap_to_focus(&self, enabled: bool) {
        self.shared.inner.lock().config.tap_to_focus = enabled;
    }

    pub fn set_fixed_orientation(&self, orientation: Option<CaptureOrientation>) {
        {
            let mut inner = self.shared.inner.lock();
            inner.config.fixed_orientation = orientation;
            inner.orientation.fixed = orientation;
        }
        self.shared.refresh_preview(None);
    }

    pub fn set_video_gravity(&self, gravity: VideoGravity) {
        self.shared.inner.lock().config.video_gravity = gravity;
        self.shared.refresh_preview(None);
    }

    // --- Host layout events ---

    /// Re-derive the dynamic orientation after an interface rotation.
    pub fn interface_orientation_changed(&self) {
        let dynamic = orientation_mapper::to_capture_orientation(
            self.shared.orientation.interface_orientation(),
            self.shared.orientation.device_orientation(),
        );
        self.shared.inner.lock().orientation.dynamic = dynamic;
        log::debug!("Dynamic orientation now {:?}", dynamic);
        self.shared.refresh_preview(None);
    }

    pub fn layout_changed(&self, size: ViewSize) {
        self.shared.refresh_preview(Some(size));
    }
}

impl<B: CaptureBackend> Drop for SessionController<B> {
    fn drop(&mut self) {
        let mut inner = self.shared.inner.lock();
        if inner.state.is_running() {
            self.shared.backend.stop_running();
            inner.state = SessionState::Stopped;
        }
        log::info!(
            "Session controller torn down with {} capture(s) in flight",
            inner.in_flight
        );
    }
}

impl<B: CaptureBackend> Shared<B> {
    fn notify(&self, notices: Vec<Notice>) {
        if notices.is_empty() {
            return;
        }
        let Some(delegate) = self.delegate.read().clone() else {
            return;
        };
        self.main.dispatch(Box::new(move || {
            for notice in notices {
                match notice {
                    Notice::State(state) => delegate.on_state_changed(state),
                    Notice::Authorization(status) => delegate.on_authorization_changed(status),
                    Notice::Focus(change) => delegate.on_focus_changed(change),
                }
            }
        }));
    }

    fn on_access_result(self: &Arc<Self>, granted: bool) {
        let status = self.authorization.status();
        self.inner.lock().authorization = status;
        log::info!("Camera access {} ({:?})", if granted { "granted" } else { "refused" }, status);
        if granted {
            self.run_configure();
        }
        self.notify(vec![Notice::Authorization(status)]);
    }

    fn run_configure(self: &Arc<Self>) {
        let notices = {
            let mut inner = self.inner.lock();
            self.configure_locked(&mut inner)
        };
        self.notify(notices);
        self.refresh_preview(None);
    }

    fn run_reconfigure(self: &Arc<Self>) {
        let notices = {
            let mut inner = self.inner.lock();
            self.reconfigure_locked(&mut inner)
        };
        self.notify(notices);
    }

    fn configure_locked(self: &Arc<Self>, inner: &mut SessionInner) -> Vec<Notice> {
        let mut notices = Vec::new();

        let status = self.authorization.status();
        inner.authorization = status;
        if !status.is_authorized() {
            log::warn!("Not configuring session without camera access ({:?})", status);
            return notices;
        }
        if inner.state.is_configured() {
            log::debug!("Session already built; reconfiguring instead");
            return self.reconfigure_locked(inner);
        }

        inner.set_state(SessionState::Configuring, &mut notices);
        inner.orientation.dynamic = orientation_mapper::to_capture_orientation(
            self.orientation.interface_orientation(),
            self.orientation.device_orientation(),
        );
        {
            let _transaction = ConfigurationTransaction::begin(&self.backend);
            self.apply_preset(inner);
            self.attach_device(inner);
            self.attach_outputs(inner);
        }

        self.backend.start_running();
        inner.set_state(SessionState::Running, &mut notices);
        notices
    }

    fn reconfigure_locked(self: &Arc<Self>, inner: &mut SessionInner) -> Vec<Notice> {
        let mut notices = Vec::new();

        if !inner.state.is_configured() {
            log::debug!("Session not built yet; new parameters apply on configure");
            return notices;
        }
        if inner.in_flight > 0 {
            log::info!(
                "Deferring reconfiguration until {} capture(s) complete",
                inner.in_flight
            );
            if !inner.reconfigure_pending {
                self.diagnostics.lock().deferred_reconfigurations += 1;
            }
            inner.reconfigure_pending = true;
            return notices;
        }

        let resume = inner.state.is_running();
        inner.set_state(SessionState::Configuring, &mut notices);
        {
            let _transaction = ConfigurationTransaction::begin(&self.backend);
            self.apply_preset(inner);
            self.detach_inputs(inner);
            self.attach_device(inner);
        }
        self.diagnostics.lock().reconfigurations += 1;

        if resume {
            if !self.backend.is_running() {
                self.backend.start_running();
            }
            inner.set_state(SessionState::Running, &mut notices);
        } else {
            inner.set_state(SessionState::Stopped, &mut notices);
        }
        notices
    }

    fn apply_preset(&self, inner: &mut SessionInner) {
        let requested = inner.config.preset;
        if self.backend.can_set_preset(requested) {
            self.backend.set_preset(requested);
            inner.preset = Some(requested);
            return;
        }

        log::warn!(
            "Preset {:?} unsupported, falling back to {:?}",
            requested,
            SessionPreset::FALLBACK
        );
        if self.backend.can_set_preset(SessionPreset::FALLBACK) {
            self.backend.set_preset(SessionPreset::FALLBACK);
            inner.preset = Some(SessionPreset::FALLBACK);
        } else {
            log::warn!("Fallback preset unsupported; keeping current preset");
        }
    }

    fn detach_inputs(&self, inner: &mut SessionInner) {
        for device_id in self.backend.input_device_ids() {
            self.backend.remove_input(&device_id);
        }
        inner.device = None;
    }

    fn attach_device(&self, inner: &mut SessionInner) {
        let position = inner.config.position;
        let device = match self.resolver.resolve(&self.backend, position) {
            Ok(device) => device,
            Err(e) => {
                log::warn!("{}; session continues without input", e);
                return;
            }
        };

        let options = DeviceOptions {
            low_light_boost: inner.config.low_light_boost,
        };
        if let Err(e) = self.resolver.configure(device.as_ref(), options) {
            log::warn!("{}; device keeps its current settings", e);
        }

        if !self.backend.can_add_input(device.as_ref()) {
            log::warn!(
                "{}",
                SessionError::InputRejected(device.unique_id().to_string())
            );
            return;
        }
        match self.backend.add_input(Arc::clone(&device)) {
            Ok(()) => {
                log::info!("Attached {} ({})", device.localized_name(), position);
                inner.device = Some(device);
            }
            Err(e) => log::warn!("{}", e),
        }
    }

    fn attach_outputs(self: &Arc<Self>, inner: &mut SessionInner) {
        if !inner.outputs.contains(&OutputKind::Photo) {
            let photo = OutputConfig::Photo {
                high_resolution_capture: inner.config.high_resolution_capture,
                dual_photo_delivery: self.backend.supports_dual_photo_delivery(),
            };
            self.attach_output(inner, photo);
        }

        if !inner.outputs.contains(&OutputKind::FrameStream) {
            let weak = Arc::downgrade(self);
            let callback: FrameCallback = Arc::new(move |event: FrameStreamEvent<'_>| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_frame_event(event);
                }
            });
            let frames = OutputConfig::FrameStream {
                discards_late_frames: true,
                callback,
            };
            self.attach_output(inner, frames);
        }
    }

    fn attach_output(&self, inner: &mut SessionInner, output: OutputConfig) {
        let kind = output.kind();
        if !self.backend.can_add_output(&output) {
            log::warn!("Session rejected {:?} output", kind);
            return;
        }
        self.backend.add_output(output);
        inner.outputs.insert(kind);
    }

    fn on_frame_event(&self, event: FrameStreamEvent<'_>) {
        {
            let mut diagnostics = self.diagnostics.lock();
            match event {
                FrameStreamEvent::Output(_) => diagnostics.frames_delivered += 1,
                FrameStreamEvent::Dropped { .. } => diagnostics.frames_dropped += 1,
            }
        }
        let observer = self.frame_observer.read().clone();
        if let Some(observer) = observer {
            observer(event);
        }
    }

    fn on_photo_delivery(self: &Arc<Self>, request_id: Uuid, delivery: PhotoDelivery) {
        let tier = self.backend.delivery_tier();
        let main = Arc::clone(&self.main);
        let delegate = self.delegate.read().clone();
        let diagnostics = Arc::clone(&self.diagnostics);

        let completion: DecodeCompletion = Box::new(move |result| {
            let Some(delegate) = delegate else {
                diagnostics.lock().captures_dropped += 1;
                log::debug!("No delegate; dropping result of capture {}", request_id);
                return;
            };
            match &result {
                Ok(_) => diagnostics.lock().captures_delivered += 1,
                Err(e) => {
                    diagnostics.lock().captures_failed += 1;
                    log::warn!("Capture {} failed: {}", request_id, e);
                }
            }
            main.dispatch(Box::new(move || match result {
                Ok(image) => delegate.on_image_captured(&image),
                Err(error) => delegate.on_capture_failed(request_id, &error),
            }));
        });

        if self.pipeline.accept(request_id, delivery, tier, completion) == AcceptOutcome::Accepted {
            self.finish_in_flight();
        }
    }

    /// Settle a request whose callback was dropped without an accepted
    /// delivery. Runs on the main context.
    fn abandon_capture(self: &Arc<Self>, request_id: Uuid) {
        if !self.pipeline.cancel(request_id) {
            return;
        }
        log::warn!("Capture {} ended without a result", request_id);
        self.diagnostics.lock().captures_dropped += 1;
        self.finish_in_flight();

        let delegate = self.delegate.read().clone();
        if let Some(delegate) = delegate {
            delegate.on_capture_failed(request_id, &SessionError::CaptureAbandoned);
        }
    }

    fn finish_in_flight(self: &Arc<Self>) {
        let run_deferred = {
            let mut inner = self.inner.lock();
            inner.in_flight = inner.in_flight.saturating_sub(1);
            if inner.in_flight == 0 && inner.reconfigure_pending {
                inner.reconfigure_pending = false;
                true
            } else {
                false
            }
        };

        if run_deferred {
            let weak = Arc::downgrade(self);
            self.main.dispatch(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.run_reconfigure();
                }
            }));
        }
    }

    fn focus(&self, point: FocusPoint, view_location: Option<ViewPoint>) -> bool {
        let device = self.inner.lock().device.clone();
        let Some(device) = device else {
            log::debug!("No device attached; ignoring focus point");
            return false;
        };

        match self.resolver.apply_focus_point(device.as_ref(), point) {
            Ok(true) => {
                self.notify(vec![Notice::Focus(FocusChange {
                    point_of_interest: point,
                    view_location,
                })]);
                true
            }
            Ok(false) => {
                log::debug!("{} has no point-of-interest support", device.localized_name());
                false
            }
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    fn refresh_preview(&self, size: Option<ViewSize>) {
        let Some(preview) = self.preview.read().clone() else {
            return;
        };
        let (gravity, orientation) = {
            let inner = self.inner.lock();
            (inner.config.video_gravity, inner.orientation.session_orientation())
        };
        if let Some(size) = size {
            preview.set_bounds(size);
        }
        preview.set_video_gravity(gravity);
        preview.set_connection_orientation(orientation);
    }
}
