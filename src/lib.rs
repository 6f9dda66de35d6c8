pub mod config;
pub mod models;
pub mod evidence; // Vision collaborator boundary: label + OCR fan-out
pub mod pipeline; // Identification → clarification → analysis, heuristic fallback

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries embedding the pipeline.
///
/// Library consumers that install their own subscriber should skip this.
pub fn init_telemetry() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("prodscan v{}", config::APP_VERSION);
}
