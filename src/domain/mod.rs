mod band;
mod bbox;
mod extracted_content;
mod page_image;
mod pipeline_result;
mod region;
mod segment;

pub use band::Band;
pub use bbox::BBox;
pub use extracted_content::{ExtractedContent, ExtractionFailure, FailureKind};
pub use page_image::{PageImage, PageImageError};
pub use pipeline_result::{PipelineResult, PipelineStatus};
pub use region::Region;
pub use segment::{BBoxInfo, HORIZONTAL_SEGMENT, SegmentRecord};
