use preprocessor::domain::BBox;

#[test]
fn given_box_when_measuring_then_width_and_height_match_corners() {
    let bbox = BBox::new(10, 20, 110, 70);

    assert_eq!(bbox.width(), 100);
    assert_eq!(bbox.height(), 50);
    assert!(!bbox.is_empty());
}

#[test]
fn given_collapsed_box_when_checking_then_is_empty() {
    assert!(BBox::new(5, 5, 5, 10).is_empty());
    assert!(BBox::new(5, 10, 9, 10).is_empty());
}

#[test]
fn given_box_straddling_span_when_measuring_overlap_then_counts_shared_rows() {
    let bbox = BBox::new(0, 80, 10, 150);

    assert_eq!(bbox.vertical_overlap(0, 100), 20);
    assert_eq!(bbox.vertical_overlap(100, 200), 50);
    assert_eq!(bbox.vertical_overlap(200, 300), 0);
}

#[test]
fn given_box_straddling_span_when_localizing_then_clips_and_shifts() {
    let bbox = BBox::new(4, 80, 40, 150);

    assert_eq!(bbox.to_local(100, 200), BBox::new(4, 0, 40, 50));
    assert_eq!(bbox.to_local(0, 100), BBox::new(4, 80, 40, 100));
}

#[test]
fn given_box_when_serialized_then_uses_corner_names() {
    let json = serde_json::to_value(BBox::new(1, 2, 3, 4)).unwrap();

    assert_eq!(json, serde_json::json!({"x1": 1, "y1": 2, "x2": 3, "y2": 4}));
}
