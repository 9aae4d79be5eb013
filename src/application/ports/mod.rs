mod content_extractor;
mod layout_detector;

pub use content_extractor::{ContentExtractor, ContentExtractorError, Extraction};
pub use layout_detector::{LayoutDetector, LayoutDetectorError, RawBBox, RawDetection};
