mod app;
mod config;
mod error;
#[cfg(test)]
mod test_support;
mod upload;
mod utils;

use anyhow::{anyhow, Context, Result};
use app::FrameExtractorApp;
use config::ClientConfig;
use eframe::CreationContext;
use tracing::info;
use upload::ExtractionClient;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("frame_extractor=info")),
        )
        .init();

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    info!("Loaded configuration: {:?}", config);

    let client = ExtractionClient::new(config).context("Failed to create HTTP client")?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([600.0, 700.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Frame Extractor",
        options,
        Box::new(move |cc: &CreationContext| Box::new(FrameExtractorApp::new(cc, client))),
    )
    .map_err(|e| anyhow!("Failed to start window: {}", e))
}
