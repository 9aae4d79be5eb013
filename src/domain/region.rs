use super::bbox::BBox;

/// A structural element detected on the page (text block, table, figure...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub bbox: BBox,
    pub label: String,
}

impl Region {
    pub fn new(bbox: BBox, label: impl Into<String>) -> Self {
        Self {
            bbox,
            label: label.into(),
        }
    }
}
