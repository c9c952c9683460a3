//! Simulated capture hardware.
//!
//! Implements the session-facing [`CaptureBackend`] contract with enough
//! fidelity to exercise a controller end to end: presets, one device input,
//! photo and frame-stream outputs, configuration transactions, and photo
//! requests resolved by hand or from a delivery thread.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{SendError, Sender};
use parking_lot::Mutex;

use camera_session_core::models::camera_models::{
    DevicePosition, FrameStreamEvent, OutputKind, VideoFrame,
};
use camera_session_core::models::config::SessionPreset;
use camera_session_core::models::error::SessionError;
use camera_session_core::models::orientation::ImageOrientation;
use camera_session_core::models::photo_delivery::{
    DeliveryTier, PhotoBuffer, PhotoDelivery, PhotoSettings,
};
use camera_session_core::traits::capture_backend::{
    CaptureBackend, FrameCallback, OutputConfig, PhotoCallback,
};
use camera_session_core::traits::capture_device::CaptureDevice;

use crate::device_registry::DeviceRegistry;
use crate::sensor;

/// Four-character pixel format codes, as the platform reports them.
pub const PIXEL_FORMAT_BGRA: u32 = u32::from_be_bytes(*b"BGRA");
pub const PIXEL_FORMAT_420V: u32 = u32::from_be_bytes(*b"420v");

/// Scene size for high-resolution and standard captures.
const FULL_RESOLUTION: (u32, u32) = (8, 6);
const STANDARD_RESOLUTION: (u32, u32) = (4, 3);
const FRAME_SIZE: (u32, u32) = (4, 3);

/// When issued photo requests are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Requests wait until the test calls [`SimulatedBackend::complete_next`].
    Manual,
    /// Requests resolve on the `sim-photo-delivery` thread after `delay`.
    Automatic { delay: Duration },
}

/// Faults injected into the next issued photo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFault {
    /// The platform produced no image data.
    MissingData,
    /// The image data does not decode.
    CorruptData,
    /// A delivery of the other tier's shape arrives before the real one.
    WrongShapeFirst,
    /// Only a delivery of the other tier's shape ever arrives.
    WrongShapeOnly,
}

struct PendingCapture {
    settings: PhotoSettings,
    callback: PhotoCallback,
    orientation: ImageOrientation,
    fault: Option<CaptureFault>,
}

#[derive(Default)]
struct BackendState {
    preset: Option<SessionPreset>,
    inputs: Vec<Arc<dyn CaptureDevice>>,
    outputs: Vec<OutputConfig>,
    configuration_depth: usize,
    commits: usize,
    unbatched_changes: usize,
    start_count: usize,
    stop_count: usize,
    pending: VecDeque<PendingCapture>,
    issued: Vec<PhotoSettings>,
    faults: VecDeque<CaptureFault>,
}

impl BackendState {
    fn record_change(&mut self) {
        if self.configuration_depth == 0 {
            self.unbatched_changes += 1;
        }
    }
}

struct DeliveryThread {
    sender: Sender<PendingCapture>,
    handle: thread::JoinHandle<()>,
}

struct FrameThread {
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

/// The simulated hardware session.
pub struct SimulatedBackend {
    registry: Arc<DeviceRegistry>,
    tier: DeliveryTier,
    sensor_orientation: ImageOrientation,
    capture_mode: CaptureMode,
    unsupported_presets: Vec<SessionPreset>,
    rejected_outputs: Vec<OutputKind>,
    dual_photo_delivery: bool,
    preview_pixel_formats: Vec<u32>,
    frame_interval: Option<Duration>,
    running: Arc<AtomicBool>,
    state: Mutex<BackendState>,
    frame_callbacks: Arc<Mutex<Vec<FrameCallback>>>,
    next_sequence: Arc<AtomicU64>,
    delivery: Mutex<Option<DeliveryThread>>,
    frames: Mutex<Option<FrameThread>>,
}

impl SimulatedBackend {
    /// A modern-tier backend with a sideways sensor and manual capture.
    pub fn new(registry: Arc<DeviceRegistry>) -> Self {
        Self {
            registry,
            tier: DeliveryTier::Modern,
            sensor_orientation: ImageOrientation::Right,
            capture_mode: CaptureMode::Manual,
            unsupported_presets: vec![SessionPreset::Hd4k3840x2160],
            rejected_outputs: Vec::new(),
            dual_photo_delivery: true,
            preview_pixel_formats: vec![PIXEL_FORMAT_BGRA, PIXEL_FORMAT_420V],
            frame_interval: None,
            running: Arc::new(AtomicBool::new(false)),
            state: Mutex::new(BackendState::default()),
            frame_callbacks: Arc::new(Mutex::new(Vec::new())),
            next_sequence: Arc::new(AtomicU64::new(0)),
            delivery: Mutex::new(None),
            frames: Mutex::new(None),
        }
    }

    pub fn with_delivery_tier(mut self, tier: DeliveryTier) -> Self {
        self.tier = tier;
        self
    }

    /// Orientation metadata the sensor attaches to its readouts.
    pub fn with_sensor_orientation(mut self, orientation: ImageOrientation) -> Self {
        self.sensor_orientation = orientation;
        self
    }

    pub fn with_capture_mode(mut self, mode: CaptureMode) -> Self {
        self.capture_mode = mode;
        self
    }

    pub fn with_unsupported_presets(mut self, presets: &[SessionPreset]) -> Self {
        self.unsupported_presets = presets.to_vec();
        self
    }

    pub fn with_rejected_output(mut self, kind: OutputKind) -> Self {
        self.rejected_outputs.push(kind);
        self
    }

    pub fn with_dual_photo_delivery(mut self, supported: bool) -> Self {
        self.dual_photo_delivery = supported;
        self
    }

    pub fn with_preview_pixel_formats(mut self, formats: Vec<u32>) -> Self {
        self.preview_pixel_formats = formats;
        self
    }

    /// Stream frames on the `sim-frame-stream` thread while running.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    pub fn registry(&self) -> &Arc<DeviceRegistry> {
        &self.registry
    }

    // --- Inspection ---

    pub fn preset(&self) -> Option<SessionPreset> {
        self.state.lock().preset
    }

    pub fn output_kinds(&self) -> Vec<OutputKind> {
        self.state.lock().outputs.iter().map(OutputConfig::kind).collect()
    }

    pub fn outputs(&self) -> Vec<OutputConfig> {
        self.state.lock().outputs.clone()
    }

    /// Committed configuration transactions.
    pub fn commit_count(&self) -> usize {
        self.state.lock().commits
    }

    /// Topology changes made outside a configuration transaction.
    pub fn unbatched_change_count(&self) -> usize {
        self.state.lock().unbatched_changes
    }

    pub fn is_configuring(&self) -> bool {
        self.state.lock().configuration_depth > 0
    }

    pub fn start_count(&self) -> usize {
        self.state.lock().start_count
    }

    pub fn stop_count(&self) -> usize {
        self.state.lock().stop_count
    }

    /// Settings of every photo request issued so far.
    pub fn issued_captures(&self) -> Vec<PhotoSettings> {
        self.state.lock().issued.clone()
    }

    /// Manual-mode requests waiting to be resolved.
    pub fn pending_capture_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    // --- Driving ---

    /// Attach `fault` to the next photo request.
    pub fn inject_capture_fault(&self, fault: CaptureFault) {
        self.state.lock().faults.push_back(fault);
    }

    /// Resolve the oldest pending photo request. Returns `false` when none
    /// is waiting.
    pub fn complete_next(&self) -> bool {
        let next = self.state.lock().pending.pop_front();
        match next {
            Some(pending) => {
                deliver(pending, self.tier);
                true
            }
            None => false,
        }
    }

    /// Abandon every pending photo request without delivering anything,
    /// as a platform does when it cancels outstanding captures.
    pub fn cancel_pending(&self) -> usize {
        let abandoned: Vec<_> = self.state.lock().pending.drain(..).collect();
        for pending in &abandoned {
            log::debug!("Cancelling simulated capture {}", pending.settings.request_id);
        }
        abandoned.len()
    }

    /// Resolve every pending photo request, oldest first.
    pub fn complete_all(&self) -> usize {
        let mut completed = 0;
        while self.complete_next() {
            completed += 1;
        }
        completed
    }

    /// Emit one frame on every frame-stream output. Ignored while stopped.
    pub fn push_frame(&self) -> bool {
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }
        emit_frame(&self.frame_callbacks, &self.next_sequence);
        true
    }

    /// Report a late frame as discarded.
    pub fn drop_frame(&self) {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
        let callbacks = self.frame_callbacks.lock().clone();
        for callback in callbacks {
            callback(FrameStreamEvent::Dropped { sequence });
        }
    }

    fn dispatch_automatic(&self, pending: PendingCapture, delay: Duration) {
        let mut delivery = self.delivery.lock();
        if delivery.is_none() {
            let (sender, receiver) = crossbeam_channel::unbounded::<PendingCapture>();
            let tier = self.tier;
            let spawned = thread::Builder::new()
                .name("sim-photo-delivery".into())
                .spawn(move || {
                    while let Ok(pending) = receiver.recv() {
                        thread::sleep(delay);
                        deliver(pending, tier);
                    }
                    log::debug!("Photo delivery thread exiting");
                });
            match spawned {
                Ok(handle) => *delivery = Some(DeliveryThread { sender, handle }),
                Err(e) => {
                    log::error!("Failed to spawn photo delivery thread: {}", e);
                    drop(delivery);
                    deliver(pending, self.tier);
                    return;
                }
            }
        }

        let sent = match delivery.as_ref() {
            Some(worker) => worker.sender.send(pending),
            None => Err(SendError(pending)),
        };
        drop(delivery);
        if let Err(e) = sent {
            log::error!("Photo delivery thread gone; resolving inline");
            deliver(e.into_inner(), self.tier);
        }
    }

    fn start_frame_thread(&self, interval: Duration) {
        let mut frames = self.frames.lock();
        if frames.is_some() {
            return;
        }
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let callbacks = Arc::clone(&self.frame_callbacks);
        let sequence = Arc::clone(&self.next_sequence);

        let spawned = thread::Builder::new()
            .name("sim-frame-stream".into())
            .spawn(move || {
                while !flag.load(Ordering::SeqCst) {
                    emit_frame(&callbacks, &sequence);
                    thread::sleep(interval);
                }
            });
        match spawned {
            Ok(handle) => *frames = Some(FrameThread { stop, handle }),
            Err(e) => log::error!("Failed to spawn frame stream thread: {}", e),
        }
    }

    fn stop_frame_thread(&self) {
        if let Some(frames) = self.frames.lock().take() {
            frames.stop.store(true, Ordering::SeqCst);
            join_unless_current(frames.handle);
        }
    }
}

impl CaptureBackend for SimulatedBackend {
    fn discover_devices(&self, position: DevicePosition) -> Vec<Arc<dyn CaptureDevice>> {
        self.registry.discover(position)
    }

    fn delivery_tier(&self) -> DeliveryTier {
        self.tier
    }

    fn begin_configuration(&self) {
        self.state.lock().configuration_depth += 1;
    }

    fn commit_configuration(&self) {
        let mut state = self.state.lock();
        if state.configuration_depth == 0 {
            log::warn!("commit_configuration without a matching begin");
            return;
        }
        state.configuration_depth -= 1;
        if state.configuration_depth == 0 {
            state.commits += 1;
        }
    }

    fn can_set_preset(&self, preset: SessionPreset) -> bool {
        !self.unsupported_presets.contains(&preset)
    }

    fn set_preset(&self, preset: SessionPreset) {
        let mut state = self.state.lock();
        state.record_change();
        state.preset = Some(preset);
    }

    /// One camera input at a time, as on real hardware.
    fn can_add_input(&self, device: &dyn CaptureDevice) -> bool {
        self.state.lock().inputs.is_empty() && self.registry.get(device.unique_id()).is_some()
    }

    fn add_input(&self, device: Arc<dyn CaptureDevice>) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        if !state.inputs.is_empty() {
            return Err(SessionError::InputRejected(format!(
                "{} while {} is attached",
                device.unique_id(),
                state.inputs[0].unique_id()
            )));
        }
        state.record_change();
        state.inputs.push(device);
        Ok(())
    }

    fn input_device_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .inputs
            .iter()
            .map(|d| d.unique_id().to_string())
            .collect()
    }

    fn remove_input(&self, device_id: &str) {
        let mut state = self.state.lock();
        state.record_change();
        state.inputs.retain(|d| d.unique_id() != device_id);
    }

    fn can_add_output(&self, output: &OutputConfig) -> bool {
        let kind = output.kind();
        !self.rejected_outputs.contains(&kind)
            && !self.state.lock().outputs.iter().any(|o| o.kind() == kind)
    }

    fn add_output(&self, output: OutputConfig) {
        if let OutputConfig::FrameStream { callback, .. } = &output {
            self.frame_callbacks.lock().push(Arc::clone(callback));
        }
        let mut state = self.state.lock();
        state.record_change();
        state.outputs.push(output);
    }

    fn supports_dual_photo_delivery(&self) -> bool {
        self.dual_photo_delivery
    }

    fn available_preview_pixel_formats(&self) -> Vec<u32> {
        self.preview_pixel_formats.clone()
    }

    fn start_running(&self) {
        self.state.lock().start_count += 1;
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        log::info!("Simulated session running");
        if let Some(interval) = self.frame_interval {
            self.start_frame_thread(interval);
        }
    }

    fn stop_running(&self) {
        self.state.lock().stop_count += 1;
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        log::info!("Simulated session stopped");
        self.stop_frame_thread();
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn capture_photo(&self, settings: PhotoSettings, callback: PhotoCallback) {
        let pending = {
            let mut state = self.state.lock();
            state.issued.push(settings.clone());
            PendingCapture {
                settings,
                callback,
                orientation: self.sensor_orientation,
                fault: state.faults.pop_front(),
            }
        };

        match self.capture_mode {
            CaptureMode::Manual => self.state.lock().pending.push_back(pending),
            CaptureMode::Automatic { delay } => self.dispatch_automatic(pending, delay),
        }
    }
}

impl Drop for SimulatedBackend {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.stop_frame_thread();
        if let Some(delivery) = self.delivery.lock().take() {
            drop(delivery.sender);
            join_unless_current(delivery.handle);
        }
    }
}

/// The backend may be dropped from one of its own threads when that
/// thread holds the last reference to the session.
fn join_unless_current(handle: thread::JoinHandle<()>) {
    if handle.thread().id() != thread::current().id() {
        let _ = handle.join();
    }
}

fn emit_frame(callbacks: &Mutex<Vec<FrameCallback>>, sequence: &AtomicU64) {
    let (width, height) = FRAME_SIZE;
    let frame = VideoFrame {
        sequence: sequence.fetch_add(1, Ordering::SeqCst),
        width,
        height,
        pixels: sensor::render_scene(width, height).into_raw().into(),
    };
    let callbacks = callbacks.lock().clone();
    for callback in callbacks {
        callback(FrameStreamEvent::Output(&frame));
    }
}

fn readout(width: u32, height: u32, orientation: ImageOrientation) -> Option<Vec<u8>> {
    let stored = sensor::store(sensor::render_scene(width, height), orientation);
    match sensor::encode(&stored) {
        Ok(data) => Some(data),
        Err(e) => {
            log::error!("Failed to encode simulated readout: {}", e);
            None
        }
    }
}

fn build_delivery(pending: &PendingCapture, tier: DeliveryTier) -> PhotoDelivery {
    let (width, height) = if pending.settings.high_resolution {
        FULL_RESOLUTION
    } else {
        STANDARD_RESOLUTION
    };
    let data = match pending.fault {
        Some(CaptureFault::MissingData) => None,
        Some(CaptureFault::CorruptData) => Some(b"not a photo".to_vec()),
        _ => readout(width, height, pending.orientation),
    };

    match tier {
        DeliveryTier::Modern => PhotoDelivery::Processed {
            file_data: data,
            orientation: pending.orientation,
        },
        DeliveryTier::Legacy => {
            let preview = pending.settings.preview_format.and_then(|format| {
                readout(format.width, format.height, pending.orientation).map(|data| PhotoBuffer {
                    data,
                    orientation: pending.orientation,
                })
            });
            PhotoDelivery::Buffers {
                full_resolution: data.map(|data| PhotoBuffer {
                    data,
                    orientation: pending.orientation,
                }),
                preview,
            }
        }
    }
}

fn deliver(pending: PendingCapture, tier: DeliveryTier) {
    log::debug!("Resolving simulated capture {}", pending.settings.request_id);
    let other = match tier {
        DeliveryTier::Modern => DeliveryTier::Legacy,
        DeliveryTier::Legacy => DeliveryTier::Modern,
    };
    match pending.fault {
        Some(CaptureFault::WrongShapeFirst) => {
            (pending.callback)(build_delivery(&pending, other));
            (pending.callback)(build_delivery(&pending, tier));
        }
        Some(CaptureFault::WrongShapeOnly) => (pending.callback)(build_delivery(&pending, other)),
        _ => (pending.callback)(build_delivery(&pending, tier)),
    }
}
