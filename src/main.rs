use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use preprocessor::application::services::{ExtractionClient, PipelineService};
use preprocessor::infrastructure::extraction::PaddleVlAdapter;
use preprocessor::infrastructure::layout::PpStructureAdapter;
use preprocessor::infrastructure::observability::{TracingConfig, init_tracing};
use preprocessor::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::from_settings(environment, &settings.logging),
        settings.server.port,
    );

    let layout_detector = Arc::new(PpStructureAdapter::new(
        &settings.layout.base_url,
        settings.layout.timeout(),
    ));

    let extraction = &settings.extraction;
    let content_extractor = Arc::new(
        PaddleVlAdapter::new(
            &extraction.base_url,
            &extraction.model,
            &extraction.api_key,
            extraction.timeout(),
        )
        .with_prompt(&extraction.prompt)
        .with_max_tokens(extraction.max_tokens),
    );

    let extraction_client = ExtractionClient::new(
        content_extractor,
        extraction.timeout(),
        extraction.retry_delay(),
    );

    let pipeline_service = Arc::new(PipelineService::new(
        layout_detector,
        extraction_client,
        extraction.max_in_flight,
    ));

    tracing::info!(
        layout_url = %settings.layout.base_url,
        extraction_url = %extraction.base_url,
        max_in_flight = extraction.max_in_flight,
        "Backends configured"
    );

    let state = AppState {
        pipeline_service,
        pipeline: settings.pipeline.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
