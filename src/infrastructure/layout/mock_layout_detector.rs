use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{LayoutDetector, LayoutDetectorError, RawDetection};

/// Returns a fixed set of detections, or fails as an unreachable backend.
pub struct MockLayoutDetector {
    detections: Option<Vec<RawDetection>>,
    calls: AtomicUsize,
}

impl MockLayoutDetector {
    pub fn new(detections: Vec<RawDetection>) -> Self {
        Self {
            detections: Some(detections),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            detections: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LayoutDetector for MockLayoutDetector {
    async fn detect(&self, _image: &[u8]) -> Result<Vec<RawDetection>, LayoutDetectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.detections.clone().ok_or_else(|| {
            LayoutDetectorError::Unreachable("mock layout backend is down".to_string())
        })
    }
}
