use preprocessor::application::services::partition;
use preprocessor::domain::{
    BBox, Band, ExtractedContent, ExtractionFailure, FailureKind, HORIZONTAL_SEGMENT, Region,
    SegmentRecord,
};
use serde_json::Map;

fn single_band_with_members() -> Band {
    let regions = vec![
        Region::new(BBox::new(0, 10, 50, 40), "title"),
        Region::new(BBox::new(0, 60, 50, 90), "text"),
    ];
    partition(100, 50, &regions, 1, 10).remove(0)
}

#[test]
fn given_band_when_building_segment_then_copies_geometry_and_members() {
    let band = single_band_with_members();

    let segment = SegmentRecord::from_band(
        &band,
        ExtractedContent::new("hello".to_string(), Map::new()),
        None,
    );

    assert_eq!(segment.bbox, BBox::new(0, 0, 50, 100));
    assert_eq!(segment.segment_type, HORIZONTAL_SEGMENT);
    assert_eq!(segment.bbox_info.len(), 2);
    assert_eq!(segment.bbox_info[0].kind, "title");
    assert_eq!(segment.bbox_info[1].bbox, BBox::new(0, 60, 50, 90));
}

#[test]
fn given_out_of_range_confidence_when_building_segment_then_clamps() {
    let band = single_band_with_members();

    let segment = SegmentRecord::from_band(
        &band,
        ExtractedContent::new(String::new(), Map::new()),
        Some(1.7),
    );

    assert_eq!(segment.confidence, Some(1.0));
}

#[test]
fn given_successful_content_when_serialized_then_error_is_omitted() {
    let band = single_band_with_members();
    let segment = SegmentRecord::from_band(
        &band,
        ExtractedContent::new("hello".to_string(), Map::new()),
        None,
    );

    let json = serde_json::to_value(&segment).unwrap();

    assert!(json["content"].get("error").is_none());
    assert_eq!(json["bbox_info"][0]["type"], "title");
    assert!(json["confidence"].is_null());
}

#[test]
fn given_failed_content_when_serialized_then_carries_error_marker() {
    let content = ExtractedContent::failed(ExtractionFailure::new(
        FailureKind::Timeout,
        "no response within 100ms",
    ));

    let json = serde_json::to_value(&content).unwrap();

    assert!(content.is_failed());
    assert_eq!(json["text"], "");
    assert_eq!(json["metadata"], serde_json::json!({}));
    assert_eq!(json["error"]["kind"], "timeout");
}
