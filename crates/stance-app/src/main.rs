use anyhow::Context;
use stance_app::{FramePipeline, ReplaySource, StanceConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StanceConfig::from_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => StanceConfig::from_env().context("failed to load configuration")?,
    };
    config.validate()?;

    tracing::info!(
        replay = %config.sensor.replay_path.display(),
        mode = ?config.sensor.tracking_mode,
        "Starting stance session"
    );

    let pipeline = FramePipeline::from_config(&config)?;
    let mut source = ReplaySource::new(&config.sensor);

    pipeline
        .run(&mut source, |report| {
            tracing::debug!(
                frame = report.frame_number,
                commands = report.command_count(),
                "Overlay ready"
            );
        })
        .await?;

    Ok(())
}
