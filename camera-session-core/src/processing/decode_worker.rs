use std::thread;

use chrono::Utc;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use crate::models::capture_result::{CaptureRequest, CorrectedImage};
use crate::models::error::SessionError;
use crate::processing::image_correction;
use crate::session::capture_pipeline::RawPhoto;

/// Receives the outcome of one decode job, on the worker thread.
pub type DecodeCompletion = Box<dyn FnOnce(Result<CorrectedImage, SessionError>) + Send + 'static>;

/// A raw capture result waiting for decode and orientation correction.
pub struct DecodeJob {
    pub request: CaptureRequest,
    pub raw: RawPhoto,
    pub completion: DecodeCompletion,
}

impl DecodeJob {
    fn run(self) {
        let DecodeJob {
            request,
            raw,
            completion,
        } = self;

        let result = image_correction::correct(&raw.data, raw.orientation, request.orientation).map(
            |(image, applied_rotation)| CorrectedImage {
                request_id: request.id,
                image,
                source_orientation: raw.orientation,
                capture_orientation: request.orientation,
                applied_rotation,
                captured_at: Utc::now(),
            },
        );
        completion(result);
    }
}

/// Background context for capture-result decoding.
///
/// Jobs run one at a time, in submission order, on a dedicated thread.
pub struct DecodeWorker {
    sender: Mutex<Option<Sender<DecodeJob>>>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl DecodeWorker {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded::<DecodeJob>();

        let handle = thread::Builder::new()
            .name("capture-decode".into())
            .spawn(move || Self::run_loop(receiver));

        match handle {
            Ok(handle) => Self {
                sender: Mutex::new(Some(sender)),
                handle: Mutex::new(Some(handle)),
            },
            Err(e) => {
                log::warn!("Failed to spawn decode thread, decoding inline: {}", e);
                Self {
                    sender: Mutex::new(None),
                    handle: Mutex::new(None),
                }
            }
        }
    }

    pub fn submit(&self, job: DecodeJob) {
        let job = match self.sender.lock().as_ref() {
            Some(sender) => match sender.send(job) {
                Ok(()) => return,
                Err(returned) => returned.into_inner(),
            },
            None => job,
        };
        job.run();
    }

    fn run_loop(receiver: Receiver<DecodeJob>) {
        for job in receiver.iter() {
            log::debug!("Decoding capture {}", job.request.id);
            job.run();
        }
    }
}

impl Default for DecodeWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DecodeWorker {
    fn drop(&mut self) {
        self.sender.lock().take();
        if let Some(handle) = self.handle.lock().take() {
            if handle.thread().id() == thread::current().id() {
                return;
            }
            let _ = handle.join();
        }
    }
}
