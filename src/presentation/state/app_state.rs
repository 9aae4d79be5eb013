use std::sync::Arc;

use crate::application::ports::{ContentExtractor, LayoutDetector};
use crate::application::services::PipelineService;
use crate::presentation::config::PipelineSettings;

pub struct AppState<L, E>
where
    L: LayoutDetector,
    E: ContentExtractor,
{
    pub pipeline_service: Arc<PipelineService<L, E>>,
    pub pipeline: PipelineSettings,
}

impl<L, E> Clone for AppState<L, E>
where
    L: LayoutDetector,
    E: ContentExtractor,
{
    fn clone(&self) -> Self {
        Self {
            pipeline_service: Arc::clone(&self.pipeline_service),
            pipeline: self.pipeline.clone(),
        }
    }
}
