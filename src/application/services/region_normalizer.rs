use crate::application::ports::RawDetection;
use crate::domain::{BBox, Region};

/// Turns raw layout detections into page-bounded regions.
///
/// Entries without a label or a complete bbox, with non-finite coordinates,
/// or that collapse to nothing once clipped to the page are dropped with a
/// warning; a bad detection never fails the request.
pub fn normalize_detections(
    detections: &[RawDetection],
    page_width: u32,
    page_height: u32,
) -> Vec<Region> {
    detections
        .iter()
        .enumerate()
        .filter_map(|(index, detection)| {
            normalize_one(detection, page_width, page_height)
                .map_err(|reason| {
                    tracing::warn!(index, reason, "Dropping layout detection");
                })
                .ok()
        })
        .collect()
}

fn normalize_one(
    detection: &RawDetection,
    page_width: u32,
    page_height: u32,
) -> Result<Region, &'static str> {
    let label = detection
        .label
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .ok_or("missing label")?;

    let raw = detection.bbox.ok_or("missing bbox")?;
    let (Some(x1), Some(y1), Some(x2), Some(y2)) = (raw.x1, raw.y1, raw.x2, raw.y2) else {
        return Err("incomplete bbox");
    };

    let bbox = BBox::new(
        coerce(x1, page_width).ok_or("non-finite coordinate")?,
        coerce(y1, page_height).ok_or("non-finite coordinate")?,
        coerce(x2, page_width).ok_or("non-finite coordinate")?,
        coerce(y2, page_height).ok_or("non-finite coordinate")?,
    );

    if bbox.x1 >= bbox.x2 || bbox.y1 >= bbox.y2 {
        return Err("degenerate bbox after clipping");
    }

    Ok(Region::new(bbox, label))
}

fn coerce(value: f64, limit: u32) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc().clamp(0.0, f64::from(limit)) as u32)
}
