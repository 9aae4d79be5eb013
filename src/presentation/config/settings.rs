use std::time::Duration;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub layout: LayoutSettings,
    pub extraction: ExtractionSettings,
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub retry_delay_ms: u64,
    pub max_in_flight: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    pub default_max_segments: usize,
    pub default_min_height: u32,
    pub max_upload_size_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl LayoutSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ExtractionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            default_max_segments: 8,
            default_min_height: 50,
            max_upload_size_bytes: 20 * 1024 * 1024,
        }
    }
}

impl Settings {
    /// Built-in defaults, then `appsettings.toml`, then
    /// `appsettings.{environment}.toml`, then `APP__SECTION__KEY` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let pipeline = PipelineSettings::default();

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("layout.base_url", "http://paddleocr:8080")?
            .set_default("layout.timeout_secs", 60_i64)?
            .set_default("extraction.base_url", "http://paddleocr-vl:8080")?
            .set_default("extraction.model", "PaddleOCR-VL")?
            .set_default("extraction.api_key", "")?
            .set_default("extraction.prompt", "OCR:")?
            .set_default("extraction.max_tokens", 4096_i64)?
            .set_default("extraction.timeout_secs", 120_i64)?
            .set_default("extraction.retry_delay_ms", 500_i64)?
            .set_default("extraction.max_in_flight", 4_i64)?
            .set_default(
                "pipeline.default_max_segments",
                pipeline.default_max_segments as i64,
            )?
            .set_default(
                "pipeline.default_min_height",
                i64::from(pipeline.default_min_height),
            )?
            .set_default(
                "pipeline.max_upload_size_bytes",
                pipeline.max_upload_size_bytes as i64,
            )?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
