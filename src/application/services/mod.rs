mod extraction_client;
mod partitioner;
mod pipeline_service;
mod region_normalizer;

pub use extraction_client::{
    BandOutcome, DEFAULT_CALL_TIMEOUT, DEFAULT_RETRY_DELAY, ExtractionClient,
};
pub use partitioner::{assign_band, partition};
pub use pipeline_service::{DEFAULT_MAX_IN_FLIGHT, PipelineError, PipelineService};
pub use region_normalizer::normalize_detections;
