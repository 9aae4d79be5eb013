use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ContentExtractor, ContentExtractorError, Extraction};
use crate::domain::ExtractionFailure;

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Outcome of extracting one band: either content or the reason there is none.
pub type BandOutcome = Result<Extraction, ExtractionFailure>;

/// Wraps a [`ContentExtractor`] with a per-call timeout and a single delayed
/// retry for transient failures. Never returns an error to the caller: every
/// failure is captured in the band outcome.
pub struct ExtractionClient<E>
where
    E: ContentExtractor,
{
    extractor: Arc<E>,
    call_timeout: Duration,
    retry_delay: Duration,
}

impl<E> ExtractionClient<E>
where
    E: ContentExtractor,
{
    pub fn new(extractor: Arc<E>, call_timeout: Duration, retry_delay: Duration) -> Self {
        Self {
            extractor,
            call_timeout,
            retry_delay,
        }
    }

    pub async fn extract(&self, band_image: &[u8]) -> BandOutcome {
        let result = match self.attempt(band_image).await {
            Err(error) if error.is_transient() => {
                tracing::warn!(
                    error = %error,
                    retry_delay_ms = self.retry_delay.as_millis() as u64,
                    "Transient extraction failure, retrying once"
                );
                tokio::time::sleep(self.retry_delay).await;
                self.attempt(band_image).await
            }
            other => other,
        };

        result.map_err(|error| {
            tracing::warn!(error = %error, "Band extraction failed");
            ExtractionFailure::from(error)
        })
    }

    async fn attempt(&self, band_image: &[u8]) -> Result<Extraction, ContentExtractorError> {
        tokio::time::timeout(self.call_timeout, self.extractor.extract(band_image))
            .await
            .unwrap_or_else(|_| {
                Err(ContentExtractorError::Timeout(format!(
                    "no response within {}ms",
                    self.call_timeout.as_millis()
                )))
            })
    }
}
