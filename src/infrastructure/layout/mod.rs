mod mock_layout_detector;
mod pp_structure_adapter;

pub use mock_layout_detector::MockLayoutDetector;
pub use pp_structure_adapter::{AnalyzeResponse, PpStructureAdapter, parse_analyze_response};
