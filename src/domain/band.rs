use super::bbox::BBox;
use super::region::Region;

/// A full-width horizontal slice of the page; the unit of content extraction.
///
/// `members` hold the regions assigned to this band with coordinates
/// translated into band-local space (row zero is the band top).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub index: usize,
    pub bbox: BBox,
    pub members: Vec<Region>,
}

impl Band {
    pub fn new(index: usize, bbox: BBox) -> Self {
        Self {
            index,
            bbox,
            members: Vec::new(),
        }
    }

    pub fn top(&self) -> u32 {
        self.bbox.y1
    }

    pub fn bottom(&self) -> u32 {
        self.bbox.y2
    }

    pub fn height(&self) -> u32 {
        self.bbox.height()
    }

    pub fn contains_y(&self, y: u32) -> bool {
        self.top() <= y && y < self.bottom()
    }

    pub(crate) fn push_member(&mut self, region: &Region) {
        let local = region.bbox.to_local(self.top(), self.bottom());
        self.members.push(Region::new(local, region.label.clone()));
    }
}
