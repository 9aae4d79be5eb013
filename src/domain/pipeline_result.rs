use std::fmt;

use serde::{Deserialize, Serialize};

use super::segment::SegmentRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub segments: Vec<SegmentRecord>,
    pub total_segments: usize,
    pub elapsed_ms: f64,
    pub status: PipelineStatus,
}

impl PipelineResult {
    pub fn new(segments: Vec<SegmentRecord>, status: PipelineStatus, elapsed_ms: f64) -> Self {
        Self {
            total_segments: segments.len(),
            segments,
            elapsed_ms,
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Success,
    Partial,
    Failed,
}

impl PipelineStatus {
    /// Reduces per-band outcomes to the aggregate status.
    ///
    /// `Failed` is reserved for runs that produced no segments at all, so a
    /// reduction over band outcomes only ever yields `Success` or `Partial`.
    pub fn aggregate<'a, T: 'a, E: 'a>(
        outcomes: impl IntoIterator<Item = &'a Result<T, E>>,
    ) -> Self {
        if outcomes.into_iter().any(Result::is_err) {
            Self::Partial
        } else {
            Self::Success
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
