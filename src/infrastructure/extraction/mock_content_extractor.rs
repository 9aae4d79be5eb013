use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Map, Value};

use crate::application::ports::{ContentExtractor, ContentExtractorError, Extraction};

/// Scripted reply for crops of a given height.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub delay: Duration,
    pub result: Result<Extraction, ContentExtractorError>,
}

impl MockReply {
    pub fn text(text: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(Extraction::new(text)),
        }
    }

    pub fn failure(error: ContentExtractorError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Answers by crop height, since a crop is the only thing an extractor sees.
/// Heights without a scripted reply get `"band {width}x{height}"`.
#[derive(Default)]
pub struct MockContentExtractor {
    replies: HashMap<u32, MockReply>,
    calls: AtomicUsize,
}

impl MockContentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, crop_height: u32, reply: MockReply) -> Self {
        self.replies.insert(crop_height, reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ContentExtractor for MockContentExtractor {
    async fn extract(&self, image: &[u8]) -> Result<Extraction, ContentExtractorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let crop = image::load_from_memory(image)
            .map_err(|e| ContentExtractorError::InvalidResponse(e.to_string()))?;
        let (width, height) = (crop.width(), crop.height());

        match self.replies.get(&height) {
            Some(reply) => {
                tokio::time::sleep(reply.delay).await;
                reply.result.clone()
            }
            None => {
                let mut metadata = Map::new();
                metadata.insert("crop_height".to_string(), Value::from(height));
                Ok(Extraction {
                    text: format!("band {width}x{height}"),
                    metadata,
                    confidence: None,
                })
            }
        }
    }
}
