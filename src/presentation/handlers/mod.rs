mod health;
mod process;

pub use health::{HealthResponse, SERVICE_NAME, health_handler};
pub use process::{ErrorResponse, IMAGE_FIELD, ProcessParams, process_handler};
