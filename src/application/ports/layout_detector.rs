use async_trait::async_trait;

/// Detects structural regions on a full page image.
#[async_trait]
pub trait LayoutDetector: Send + Sync {
    async fn detect(&self, image: &[u8]) -> Result<Vec<RawDetection>, LayoutDetectorError>;
}

/// One detection as the layout backend reported it. Any field may be missing
/// or out of range; normalization decides what survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDetection {
    pub bbox: Option<RawBBox>,
    pub label: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawBBox {
    pub x1: Option<f64>,
    pub y1: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
}

impl RawBBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: Some(x1),
            y1: Some(y1),
            x2: Some(x2),
            y2: Some(y2),
        }
    }
}

impl RawDetection {
    pub fn new(bbox: RawBBox, label: impl Into<String>) -> Self {
        Self {
            bbox: Some(bbox),
            label: Some(label.into()),
            confidence: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutDetectorError {
    #[error("layout backend unreachable: {0}")]
    Unreachable(String),
    #[error("layout backend timed out: {0}")]
    Timeout(String),
    #[error("layout backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("layout request could not be built: {0}")]
    Request(String),
    #[error("invalid layout response: {0}")]
    InvalidResponse(String),
}
