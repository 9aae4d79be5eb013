use axum::http::HeaderValue;
use preprocessor::infrastructure::observability::RequestId;

#[test]
fn given_caller_header_when_reading_request_id_then_it_is_kept_trimmed() {
    let header = HeaderValue::from_static("  abc-123 ");

    let request_id = RequestId::from_header(Some(&header));

    assert_eq!(request_id, RequestId("abc-123".to_string()));
}

#[test]
fn given_missing_or_blank_header_when_reading_request_id_then_a_uuid_is_minted() {
    let blank = HeaderValue::from_static("   ");

    let minted = RequestId::from_header(None);
    let replaced = RequestId::from_header(Some(&blank));

    assert_eq!(minted.0.len(), 36);
    assert_eq!(replaced.0.len(), 36);
    assert_ne!(minted, replaced);
}
