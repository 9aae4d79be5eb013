use std::time::Duration;

use axum::Router;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use preprocessor::application::ports::{LayoutDetector, LayoutDetectorError, RawBBox};
use preprocessor::infrastructure::layout::{PpStructureAdapter, parse_analyze_response};
use serde_json::json;

use crate::helpers::{closed_port_url, png_page, spawn_server};

#[test]
fn given_corner_boxes_when_parsing_then_detections_are_kept_in_order() {
    let body = json!({
        "detections": [
            { "bbox": { "x1": 1.0, "y1": 2.0, "x2": 3.0, "y2": 4.0 }, "cls": "title", "confidence": 0.9 },
            { "bbox": { "x1": 5.0, "y1": 6.0, "x2": 7.0, "y2": 8.0 }, "cls": "text", "confidence": 0.8 }
        ],
        "elapsed_ms": 12.5
    });

    let detections = parse_analyze_response(body.to_string().as_bytes()).unwrap();

    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].bbox, Some(RawBBox::new(1.0, 2.0, 3.0, 4.0)));
    assert_eq!(detections[0].label.as_deref(), Some("title"));
    assert_eq!(detections[0].confidence, Some(0.9));
    assert_eq!(detections[1].label.as_deref(), Some("text"));
}

#[test]
fn given_array_box_and_label_alias_when_parsing_then_detection_is_read() {
    let body = json!({
        "detections": [
            { "block_bbox": [10.0, 20.0, 30.0, 40.0], "block_label": "table" }
        ]
    });

    let detections = parse_analyze_response(body.to_string().as_bytes()).unwrap();

    assert_eq!(detections[0].bbox, Some(RawBBox::new(10.0, 20.0, 30.0, 40.0)));
    assert_eq!(detections[0].label.as_deref(), Some("table"));
    assert_eq!(detections[0].confidence, None);
}

#[test]
fn given_incomplete_detection_when_parsing_then_missing_fields_stay_empty() {
    let body = json!({
        "detections": [
            { "bbox": { "x1": 1.0, "y1": 2.0 } },
            { "cls": "text" }
        ]
    });

    let detections = parse_analyze_response(body.to_string().as_bytes()).unwrap();

    assert_eq!(detections.len(), 2);
    let partial = detections[0].bbox.as_ref().unwrap();
    assert_eq!(partial.x2, None);
    assert_eq!(detections[0].label, None);
    assert_eq!(detections[1].bbox, None);
}

#[test]
fn given_non_object_entry_when_parsing_then_only_that_entry_is_skipped() {
    let body = json!({
        "detections": [
            "garbage",
            { "bbox": [0.0, 0.0, 10.0, 10.0], "cls": "text" }
        ]
    });

    let detections = parse_analyze_response(body.to_string().as_bytes()).unwrap();

    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].label.as_deref(), Some("text"));
}

#[test]
fn given_body_without_detections_when_parsing_then_returns_invalid_response() {
    let result = parse_analyze_response(br#"{"error": "model not loaded"}"#);

    assert!(matches!(result, Err(LayoutDetectorError::InvalidResponse(_))));
}

async fn analyze(mut multipart: Multipart) -> (StatusCode, String) {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap_or_default();
            if content_type == "image/png" && !bytes.is_empty() {
                let body = json!({
                    "detections": [
                        { "bbox": { "x1": 0.0, "y1": 0.0, "x2": 50.0, "y2": 25.0 }, "cls": "title", "confidence": 0.99 }
                    ],
                    "elapsed_ms": 3.0
                });
                return (StatusCode::OK, body.to_string());
            }
        }
    }
    (StatusCode::BAD_REQUEST, "no image".to_string())
}

#[tokio::test]
async fn given_running_service_when_detecting_then_uploads_image_field_and_parses_reply() {
    let base_url = spawn_server(Router::new().route("/analyze", post(analyze))).await;
    let adapter = PpStructureAdapter::new(&base_url, Duration::from_secs(5));

    let detections = adapter.detect(&png_page(50, 50)).await.unwrap();

    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].label.as_deref(), Some("title"));
    assert_eq!(detections[0].bbox, Some(RawBBox::new(0.0, 0.0, 50.0, 25.0)));
}

#[tokio::test]
async fn given_error_status_when_detecting_then_returns_status_error() {
    let router = Router::new().route(
        "/analyze",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn_server(router).await;
    let adapter = PpStructureAdapter::new(&base_url, Duration::from_secs(5));

    let result = adapter.detect(&png_page(10, 10)).await;

    match result {
        Err(LayoutDetectorError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_nothing_listening_when_detecting_then_returns_unreachable() {
    let adapter = PpStructureAdapter::new(&closed_port_url().await, Duration::from_secs(5));

    let result = adapter.detect(&png_page(10, 10)).await;

    assert!(matches!(result, Err(LayoutDetectorError::Unreachable(_))));
}

#[tokio::test]
async fn given_slow_service_when_detecting_then_returns_timeout() {
    let router = Router::new().route(
        "/analyze",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let base_url = spawn_server(router).await;
    let adapter = PpStructureAdapter::new(&base_url, Duration::from_millis(100));

    let result = adapter.detect(&png_page(10, 10)).await;

    assert!(matches!(result, Err(LayoutDetectorError::Timeout(_))));
}
