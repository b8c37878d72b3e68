//! `run` command implementation.

use std::time::Instant;

use anyhow::{Context, Result};
use contracts::CoordinatorConfig;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::pipeline::{
    resolve_algorithm, MockFrameConfig, MockFrameSource, PerceptionPipeline, PipelineStats,
};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)
            .context("Failed to start metrics endpoint")?;
    }

    let mut source = MockFrameSource::new(MockFrameConfig {
        frames: args.frames,
        interval_ms: args.interval_ms,
        lidar_points: args.lidar_points,
        ..MockFrameConfig::default()
    });

    // Resolve the algorithm against a representative frame before streaming
    let probe = source.probe_frame();
    let algorithm = resolve_algorithm(args.algorithm, &probe)
        .context("Failed to resolve fusion algorithm")?;

    let config = CoordinatorConfig {
        sync_window_ms: args.sync_window_ms,
    };
    let mut pipeline = PerceptionPipeline::new(algorithm, config, args.seed);

    info!(
        frames = args.frames,
        interval_ms = args.interval_ms,
        sync_window_ms = args.sync_window_ms,
        algorithm = pipeline.algorithm_name(),
        "Starting pipeline..."
    );

    let mut stats = PipelineStats::default();
    let start = Instant::now();
    let mut frame_id: u64 = 0;
    let mut rx = source.stream(16);

    let shutdown_signal = setup_shutdown_signal();
    tokio::pin!(shutdown_signal);

    loop {
        tokio::select! {
            frame = rx.recv() => {
                let Some(readings) = frame else { break };

                for reading in &readings {
                    observability::record_reading_received(
                        reading.sensor_id(),
                        reading.kind().as_str(),
                    );
                }

                let result = pipeline.process_frame_report(&readings);
                observability::record_frame(&result, frame_id);
                stats.frame_stats.observe(&result);

                if result.success {
                    stats.frames_ok += 1;
                    stats.objects_detected += result.object_count() as u64;
                } else {
                    stats.frames_failed += 1;
                }
                frame_id += 1;
            }
            _ = &mut shutdown_signal => {
                warn!("Received shutdown signal, stopping pipeline...");
                break;
            }
        }
    }

    stats.duration = start.elapsed();

    info!(
        frames_ok = stats.frames_ok,
        frames_failed = stats.frames_failed,
        objects = stats.objects_detected,
        duration_secs = stats.duration.as_secs_f64(),
        fps = format!("{:.2}", stats.fps()),
        "Pipeline completed"
    );

    stats.print_summary();

    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
