use std::collections::HashMap;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::models::capture_result::CaptureRequest;
use crate::models::error::SessionError;
use crate::models::orientation::ImageOrientation;
use crate::models::photo_delivery::{DeliveryTier, PhotoDelivery};
use crate::processing::decode_worker::{DecodeCompletion, DecodeJob, DecodeWorker};

/// Encoded photo data plus its orientation metadata.
///
/// Both delivery shapes are adapted into this before correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPhoto {
    pub data: Vec<u8>,
    pub orientation: ImageOrientation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adapted {
    Photo(RawPhoto),
    Failed(SessionError),
    /// Delivery shape does not match the platform tier.
    Ignored,
}

/// Convert a backend delivery into the single internal result type.
///
/// Legacy deliveries use the full-resolution buffer; the preview buffer is
/// never used to build the final image.
pub fn adapt_delivery(delivery: PhotoDelivery, tier: DeliveryTier) -> Adapted {
    if delivery.tier() != tier {
        return Adapted::Ignored;
    }
    match delivery {
        PhotoDelivery::Processed {
            file_data: Some(data),
            orientation,
        } => Adapted::Photo(RawPhoto { data, orientation }),
        PhotoDelivery::Processed { file_data: None, .. } => Adapted::Failed(
            SessionError::DecodeFailed("photo has no file data representation".into()),
        ),
        PhotoDelivery::Buffers {
            full_resolution: Some(buffer),
            ..
        } => Adapted::Photo(RawPhoto {
            data: buffer.data,
            orientation: buffer.orientation,
        }),
        PhotoDelivery::Buffers {
            full_resolution: None,
            ..
        } => Adapted::Failed(SessionError::DecodeFailed(
            "photo has no full-resolution buffer".into(),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// No pending request with that id (already resolved or never issued).
    Unknown,
    /// Wrong delivery shape for this platform; the request stays pending.
    Ignored,
    /// The request left the pending table and will complete exactly once.
    Accepted,
}

/// Tracks in-flight photo requests and runs their correction.
pub struct CapturePipeline {
    pending: Mutex<HashMap<Uuid, CaptureRequest>>,
    worker: DecodeWorker,
}

impl CapturePipeline {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            worker: DecodeWorker::new(),
        }
    }

    pub fn register(&self, request: CaptureRequest) {
        self.pending.lock().insert(request.id, request);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_pending(&self, request_id: Uuid) -> bool {
        self.pending.lock().contains_key(&request_id)
    }

    /// Drop a request whose result will never arrive. Returns `false` when
    /// it had already been resolved.
    pub fn cancel(&self, request_id: Uuid) -> bool {
        self.pending.lock().remove(&request_id).is_some()
    }

    /// Resolve a pending request with a raw delivery.
    ///
    /// Accepted photos are decoded and corrected on the decode worker; the
    /// orientation used is the one snapshotted into the request at issue
    /// time. `completion` runs exactly once for an accepted request and
    /// never otherwise.
    pub fn accept(
        &self,
        request_id: Uuid,
        delivery: PhotoDelivery,
        tier: DeliveryTier,
        completion: DecodeCompletion,
    ) -> AcceptOutcome {
        let (request, raw) = {
            let mut pending = self.pending.lock();
            if !pending.contains_key(&request_id) {
                log::debug!("Dropping delivery for unknown capture {}", request_id);
                return AcceptOutcome::Unknown;
            }
            match adapt_delivery(delivery, tier) {
                Adapted::Ignored => {
                    log::debug!("Ignoring {:?} delivery for capture {}", tier, request_id);
                    return AcceptOutcome::Ignored;
                }
                Adapted::Failed(error) => {
                    pending.remove(&request_id);
                    drop(pending);
                    completion(Err(error));
                    return AcceptOutcome::Accepted;
                }
                Adapted::Photo(raw) => match pending.remove(&request_id) {
                    Some(request) => (request, raw),
                    None => return AcceptOutcome::Unknown,
                },
            }
        };

        self.worker.submit(DecodeJob {
            request,
            raw,
            completion,
        });
        AcceptOutcome::Accepted
    }
}

impl Default for CapturePipeline {
    fn default() -> Self {
        Self::new()
    }
}
