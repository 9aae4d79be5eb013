use crate::domain::{BBox, Band, Region};

/// Splits a page into full-width horizontal bands.
///
/// Regions are taken top to bottom (ties by `x1`) and pulled into the current
/// band, whose bottom follows the lowest edge pulled in so far. The band is
/// closed in front of the next region only when all of these hold:
///
/// * the band is at least `min_height` tall,
/// * another band still fits under `max_segments`,
/// * the next region starts at or below the band bottom.
///
/// Once the budget is spent every remaining region folds into the last band.
/// Each band starts where the previous one ended and the last one is
/// stretched to `page_height`, so the bands tile the page exactly.
///
/// `max_segments` and `min_height` below 1 are treated as 1.
pub fn partition(
    page_height: u32,
    page_width: u32,
    regions: &[Region],
    max_segments: usize,
    min_height: u32,
) -> Vec<Band> {
    let max_segments = max_segments.max(1);
    let min_height = min_height.max(1);

    let mut ordered: Vec<&Region> = regions.iter().collect();
    ordered.sort_by_key(|region| (region.bbox.y1, region.bbox.x1));

    let spans = band_spans(page_height, &ordered, max_segments, min_height);

    let mut bands: Vec<Band> = spans
        .into_iter()
        .enumerate()
        .map(|(index, (top, bottom))| Band::new(index, BBox::new(0, top, page_width, bottom)))
        .collect();

    for region in ordered {
        let index = assign_band(&bands, &region.bbox);
        bands[index].push_member(region);
    }

    tracing::debug!(
        regions = regions.len(),
        bands = bands.len(),
        max_segments,
        min_height,
        "Page partitioned"
    );

    bands
}

fn band_spans(
    page_height: u32,
    ordered: &[&Region],
    max_segments: usize,
    min_height: u32,
) -> Vec<(u32, u32)> {
    // A page never yields more bands than regions plus one.
    let mut spans = Vec::with_capacity(max_segments.min(ordered.len() + 1));
    let mut top = 0;
    let mut bottom: Option<u32> = None;

    for region in ordered {
        if region.bbox.is_empty() || region.bbox.y1 >= page_height {
            continue;
        }

        if let Some(current) = bottom {
            let tall_enough = current.saturating_sub(top) >= min_height;
            let budget_left = spans.len() + 1 < max_segments;
            let starts_below = region.bbox.y1 >= current;

            if tall_enough && budget_left && starts_below {
                spans.push((top, current));
                top = current;
                bottom = None;
            }
        }

        let edge = region.bbox.y2.min(page_height);
        bottom = Some(bottom.map_or(edge, |current| current.max(edge)));
    }

    spans.push((top, page_height));
    spans
}

/// Index of the band a region belongs to: the largest vertical overlap wins
/// (bands are full width, so this is also the largest overlap area), ties go
/// to the earlier band. A region touching no band falls back to the band
/// holding its center, then to the last band.
pub fn assign_band(bands: &[Band], bbox: &BBox) -> usize {
    let mut best: Option<(usize, u32)> = None;
    for band in bands {
        let overlap = bbox.vertical_overlap(band.top(), band.bottom());
        if overlap > 0 && best.is_none_or(|(_, best_overlap)| overlap > best_overlap) {
            best = Some((band.index, overlap));
        }
    }

    if let Some((index, _)) = best {
        return index;
    }

    let center = u32::try_from(bbox.center_y2() / 2).unwrap_or(u32::MAX);
    bands
        .iter()
        .find(|band| band.contains_y(center))
        .map(|band| band.index)
        .unwrap_or(bands.len().saturating_sub(1))
}
