use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use super::bbox::BBox;

/// A decoded page, kept only long enough to measure it and cut band crops.
pub struct PageImage {
    image: DynamicImage,
}

impl PageImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, PageImageError> {
        if bytes.is_empty() {
            return Err(PageImageError::Empty);
        }

        let image = image::load_from_memory(bytes)
            .map_err(|e| PageImageError::Undecodable(e.to_string()))?;

        if image.width() == 0 || image.height() == 0 {
            return Err(PageImageError::Empty);
        }

        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Cuts `bbox` out of the page and encodes it as PNG.
    pub fn crop_png(&self, bbox: &BBox) -> Result<Vec<u8>, PageImageError> {
        let x = bbox.x1.min(self.width());
        let y = bbox.y1.min(self.height());
        let width = bbox.x2.min(self.width()).saturating_sub(x);
        let height = bbox.y2.min(self.height()).saturating_sub(y);

        if width == 0 || height == 0 {
            return Err(PageImageError::EmptyCrop(*bbox));
        }

        let crop = self.image.crop_imm(x, y, width, height);
        let mut png_bytes: Vec<u8> = Vec::new();
        crop.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
            .map_err(|e| PageImageError::Encode(e.to_string()))?;

        Ok(png_bytes)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PageImageError {
    #[error("image payload is empty")]
    Empty,
    #[error("image payload is not decodable: {0}")]
    Undecodable(String),
    #[error("crop {0:?} lies outside the page")]
    EmptyCrop(BBox),
    #[error("PNG encode failed: {0}")]
    Encode(String),
}
