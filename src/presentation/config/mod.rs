mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ExtractionSettings, LayoutSettings, LoggingSettings, PipelineSettings, ServerSettings,
    Settings,
};
