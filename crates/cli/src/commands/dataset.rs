//! `dataset` command implementation.

use anyhow::{Context, Result};
use contracts::CoordinatorConfig;
use dataset::DatasetLoader;
use tracing::info;

use crate::cli::DatasetArgs;
use crate::pipeline::{resolve_algorithm, PerceptionPipeline};

/// Execute the `dataset` command: load one annotation, materialize its
/// LiDAR reading, and run it through the pipeline as a single frame.
pub fn run_dataset(args: &DatasetArgs) -> Result<()> {
    if !args.annotation.exists() {
        anyhow::bail!("Annotation file not found: {}", args.annotation.display());
    }

    let annotation = DatasetLoader::load_annotation(&args.annotation)
        .with_context(|| format!("Failed to load {}", args.annotation.display()))?;

    let reading = DatasetLoader::build_lidar_reading(&annotation)
        .context("Failed to build lidar reading")?;
    let readings = vec![reading];

    let algorithm =
        resolve_algorithm(args.algorithm, &readings).context("Failed to resolve fusion algorithm")?;
    let mut pipeline =
        PerceptionPipeline::new(algorithm, CoordinatorConfig::default(), args.seed);

    let result = pipeline.process_frame_report(&readings);
    observability::record_frame(&result, 0);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.success {
        info!(
            scene = %annotation.scene_id,
            algorithm = result.outcome.algorithm,
            confidence = result.outcome.confidence,
            objects = result.object_count(),
            processing_time_ms = result.processing_time_ms,
            "Dataset frame processed"
        );
        println!("\n=== Dataset Frame Result ===\n");
        println!("Scene: {}", annotation.scene_id);
        println!("Algorithm: {}", result.outcome.algorithm);
        println!("Fused points: {}", result.outcome.total_data_points);
        println!("Confidence: {:.3}", result.outcome.confidence);
        println!("Objects ({}):", result.object_count());
        for object in &result.objects {
            println!(
                "  {} {} at ({:.1}, {:.1}, {:.1}) confidence {:.3}",
                object.object_id,
                object.class.as_str(),
                object.position.x,
                object.position.y,
                object.position.z,
                object.confidence
            );
        }
    } else {
        let message = result
            .error_message
            .unwrap_or_else(|| "unknown failure".to_string());
        anyhow::bail!("Dataset frame failed: {message}");
    }

    Ok(())
}
