use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use preprocessor::application::ports::{RawBBox, RawDetection};

pub fn png_page(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn detection(x1: f64, y1: f64, x2: f64, y2: f64, label: &str) -> RawDetection {
    RawDetection::new(RawBBox::new(x1, y1, x2, y2), label)
}

/// Three text blocks on a 1000px page: two near the top, one at the bottom.
pub fn scenario_detections() -> Vec<RawDetection> {
    vec![
        detection(10.0, 0.0, 190.0, 30.0, "title"),
        detection(10.0, 40.0, 190.0, 900.0, "text"),
        detection(10.0, 920.0, 190.0, 990.0, "footer"),
    ]
}

/// Three blocks producing bands of height 200, 300 and 500 on a 1000px page.
pub fn three_band_detections() -> Vec<RawDetection> {
    vec![
        detection(0.0, 0.0, 100.0, 200.0, "title"),
        detection(0.0, 200.0, 100.0, 500.0, "text"),
        detection(0.0, 500.0, 100.0, 1000.0, "table"),
    ]
}

pub async fn spawn_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
