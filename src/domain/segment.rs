use serde::{Deserialize, Serialize};

use super::band::Band;
use super::bbox::BBox;
use super::extracted_content::ExtractedContent;

pub const HORIZONTAL_SEGMENT: &str = "horizontal_segment";

/// Externally visible result unit: one per band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub bbox: BBox,
    pub segment_type: String,
    pub content: ExtractedContent,
    pub confidence: Option<f32>,
    #[serde(default)]
    pub bbox_info: Vec<BBoxInfo>,
}

/// A member region of a segment, in segment-local coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBoxInfo {
    pub bbox: BBox,
    #[serde(rename = "type")]
    pub kind: String,
}

impl SegmentRecord {
    pub fn from_band(band: &Band, content: ExtractedContent, confidence: Option<f32>) -> Self {
        let bbox_info = band
            .members
            .iter()
            .map(|region| BBoxInfo {
                bbox: region.bbox,
                kind: region.label.clone(),
            })
            .collect();

        Self {
            bbox: band.bbox,
            segment_type: HORIZONTAL_SEGMENT.to_string(),
            content,
            confidence: confidence.map(|c| c.clamp(0.0, 1.0)),
            bbox_info,
        }
    }
}
