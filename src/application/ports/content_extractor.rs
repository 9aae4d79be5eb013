use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{ExtractionFailure, FailureKind};

/// Reads content out of a single image crop.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, image: &[u8]) -> Result<Extraction, ContentExtractorError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub text: String,
    pub metadata: Map<String, Value>,
    pub confidence: Option<f32>,
}

impl Extraction {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ContentExtractorError {
    #[error("extraction timed out: {0}")]
    Timeout(String),
    #[error("extraction backend unreachable: {0}")]
    Connection(String),
    #[error("extraction backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid extraction response: {0}")]
    InvalidResponse(String),
}

impl ContentExtractorError {
    /// Timeouts and connection failures may succeed on a second attempt;
    /// anything the backend answered explicitly will not.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_))
    }
}

impl From<ContentExtractorError> for ExtractionFailure {
    fn from(error: ContentExtractorError) -> Self {
        let kind = match &error {
            ContentExtractorError::Timeout(_) => FailureKind::Timeout,
            ContentExtractorError::Connection(_) => FailureKind::Connection,
            ContentExtractorError::Status { .. } => FailureKind::UpstreamStatus,
            ContentExtractorError::InvalidResponse(_) => FailureKind::MalformedResponse,
        };
        ExtractionFailure::new(kind, error.to_string())
    }
}
