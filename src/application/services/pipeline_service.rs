use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::Instrument;

use crate::application::ports::{ContentExtractor, LayoutDetector, LayoutDetectorError};
use crate::domain::{
    Band, ExtractedContent, PageImage, PageImageError, PipelineResult, PipelineStatus,
    SegmentRecord,
};

use super::extraction_client::{BandOutcome, ExtractionClient};
use super::partitioner::partition;
use super::region_normalizer::normalize_detections;

pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Runs one page through layout detection, band partitioning and per-band
/// content extraction. Holds no per-request state.
pub struct PipelineService<L, E>
where
    L: LayoutDetector,
    E: ContentExtractor,
{
    layout_detector: Arc<L>,
    extraction_client: ExtractionClient<E>,
    max_in_flight: usize,
}

impl<L, E> PipelineService<L, E>
where
    L: LayoutDetector,
    E: ContentExtractor,
{
    pub fn new(
        layout_detector: Arc<L>,
        extraction_client: ExtractionClient<E>,
        max_in_flight: usize,
    ) -> Self {
        Self {
            layout_detector,
            extraction_client,
            max_in_flight: max_in_flight.max(1),
        }
    }

    #[tracing::instrument(skip(self, image_bytes), fields(bytes = image_bytes.len()))]
    pub async fn run(
        &self,
        image_bytes: &[u8],
        max_segments: usize,
        min_height: u32,
    ) -> Result<PipelineResult, PipelineError> {
        let started = Instant::now();

        if max_segments < 1 {
            return Err(PipelineError::InvalidInput(
                "max_segments must be at least 1".to_string(),
            ));
        }
        if min_height < 1 {
            return Err(PipelineError::InvalidInput(
                "min_height must be at least 1".to_string(),
            ));
        }

        let page = PageImage::decode(image_bytes).map_err(PipelineError::InvalidImage)?;
        let (page_width, page_height) = (page.width(), page.height());

        let detections = self
            .layout_detector
            .detect(image_bytes)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Layout detection failed"))?;

        let regions = normalize_detections(&detections, page_width, page_height);
        let bands = partition(page_height, page_width, &regions, max_segments, min_height);

        tracing::info!(
            page_width,
            page_height,
            detections = detections.len(),
            regions = regions.len(),
            bands = bands.len(),
            "Layout partitioned"
        );

        let crops = crop_bands(page, &bands).await?;
        let mut outcomes = self.extract_all(crops).await;
        let status = PipelineStatus::aggregate(outcomes.values());

        let segments = bands
            .iter()
            .map(|band| {
                outcomes
                    .remove(&band.index)
                    .map(|outcome| merge_band(band, outcome))
                    .ok_or_else(|| {
                        PipelineError::Internal(format!(
                            "no extraction outcome for band {}",
                            band.index
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            segments = segments.len(),
            status = %status,
            elapsed_ms,
            "Pipeline completed"
        );

        Ok(PipelineResult::new(segments, status, elapsed_ms))
    }

    /// Dispatches every crop with at most `max_in_flight` calls outstanding.
    /// Outcomes are keyed by band index, so completion order is irrelevant.
    async fn extract_all(&self, crops: Vec<(usize, Vec<u8>)>) -> BTreeMap<usize, BandOutcome> {
        stream::iter(crops)
            .map(|(band_index, png)| async move {
                let outcome = self
                    .extraction_client
                    .extract(&png)
                    .instrument(tracing::debug_span!("band_extraction", band_index))
                    .await;
                (band_index, outcome)
            })
            .buffer_unordered(self.max_in_flight)
            .collect()
            .await
    }
}

async fn crop_bands(
    page: PageImage,
    bands: &[Band],
) -> Result<Vec<(usize, Vec<u8>)>, PipelineError> {
    let boxes: Vec<_> = bands.iter().map(|band| (band.index, band.bbox)).collect();

    tokio::task::spawn_blocking(move || {
        boxes
            .into_iter()
            .map(|(index, bbox)| page.crop_png(&bbox).map(|png| (index, png)))
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .map_err(|e| PipelineError::Internal(format!("crop task join error: {e}")))?
    .map_err(|e| PipelineError::Internal(format!("band crop failed: {e}")))
}

fn merge_band(band: &Band, outcome: BandOutcome) -> SegmentRecord {
    match outcome {
        Ok(extraction) => SegmentRecord::from_band(
            band,
            ExtractedContent::new(extraction.text, extraction.metadata),
            extraction.confidence,
        ),
        Err(failure) => SegmentRecord::from_band(band, ExtractedContent::failed(failure), None),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid image: {0}")]
    InvalidImage(PageImageError),
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] LayoutDetectorError),
    #[error("internal error: {0}")]
    Internal(String),
}
