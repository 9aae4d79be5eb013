use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

use crate::application::ports::{LayoutDetector, LayoutDetectorError, RawBBox, RawDetection};

/// Layout detection over the PPStructure HTTP service (`POST /analyze`).
pub struct PpStructureAdapter {
    client: Client,
    base_url: String,
}

impl PpStructureAdapter {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LayoutDetector for PpStructureAdapter {
    #[tracing::instrument(skip(self, image), fields(bytes = image.len()))]
    async fn detect(&self, image: &[u8]) -> Result<Vec<RawDetection>, LayoutDetectorError> {
        let mime = image::guess_format(image)
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream");

        let part = Part::bytes(image.to_vec())
            .file_name("page")
            .mime_str(mime)
            .map_err(|e| LayoutDetectorError::Request(format!("multipart part: {e}")))?;
        let form = Form::new().part("image", part);

        let url = format!("{}/analyze", self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LayoutDetectorError::Status { status, body });
        }

        let raw_bytes = response.bytes().await.map_err(classify)?;
        let detections = parse_analyze_response(&raw_bytes)?;

        tracing::debug!(detections = detections.len(), "Layout analysis received");
        Ok(detections)
    }
}

fn classify(error: reqwest::Error) -> LayoutDetectorError {
    if error.is_timeout() {
        LayoutDetectorError::Timeout(error.to_string())
    } else {
        LayoutDetectorError::Unreachable(error.to_string())
    }
}

/// Parses an `/analyze` body. Individual detections that do not have the
/// expected shape are skipped rather than failing the whole response.
pub fn parse_analyze_response(raw: &[u8]) -> Result<Vec<RawDetection>, LayoutDetectorError> {
    let response: AnalyzeResponse = serde_json::from_slice(raw)
        .map_err(|e| LayoutDetectorError::InvalidResponse(e.to_string()))?;

    let detections = response
        .detections
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<WireDetection>(value) {
            Ok(detection) => Some(detection.into_raw()),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unparseable detection");
                None
            }
        })
        .collect();

    Ok(detections)
}

#[derive(Deserialize)]
pub struct AnalyzeResponse {
    pub detections: Vec<Value>,
    #[serde(default)]
    pub elapsed_ms: Option<f64>,
}

#[derive(Deserialize)]
struct WireDetection {
    #[serde(default, alias = "block_bbox")]
    bbox: Option<WireBBox>,
    #[serde(default, alias = "label", alias = "block_label")]
    cls: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireBBox {
    Corners {
        x1: Option<f64>,
        y1: Option<f64>,
        x2: Option<f64>,
        y2: Option<f64>,
    },
    Xyxy(Vec<f64>),
}

impl WireDetection {
    fn into_raw(self) -> RawDetection {
        let bbox = self.bbox.map(|bbox| match bbox {
            WireBBox::Corners { x1, y1, x2, y2 } => RawBBox { x1, y1, x2, y2 },
            WireBBox::Xyxy(coords) => RawBBox {
                x1: coords.first().copied(),
                y1: coords.get(1).copied(),
                x2: coords.get(2).copied(),
                y2: coords.get(3).copied(),
            },
        });

        RawDetection {
            bbox,
            label: self.cls,
            confidence: self.confidence,
        }
    }
}
