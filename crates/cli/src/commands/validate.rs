//! `validate` command implementation.

use anyhow::{Context, Result};
use dataset::DatasetLoader;
use serde_json::json;
use tracing::error;

use crate::cli::ValidateArgs;

/// Execute the `validate` command: parse and screen an annotation file
/// without running the pipeline.
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    if !args.annotation.exists() {
        anyhow::bail!("Annotation file not found: {}", args.annotation.display());
    }

    match DatasetLoader::load_annotation(&args.annotation) {
        Ok(annotation) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "valid": true,
                        "scene_id": annotation.scene_id,
                        "frame_id": annotation.frame_id,
                        "timestamp": annotation.timestamp,
                        "lidar_points": annotation.lidar_points,
                        "annotations": annotation.annotation_count(),
                    }))?
                );
            } else {
                println!("\n=== Annotation Valid ===\n");
                println!("Scene: {}", annotation.scene_id);
                println!("Frame: {}", annotation.frame_id);
                println!("Timestamp: {}", annotation.timestamp);
                println!("LiDAR points: {}", annotation.lidar_points);
                println!("Annotated objects: {}", annotation.annotation_count());
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, security = e.is_security(), "Annotation rejected");
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "valid": false,
                        "error": e.to_string(),
                        "security": e.is_security(),
                    }))?
                );
                Ok(())
            } else {
                Err(e).with_context(|| {
                    format!("Annotation {} is invalid", args.annotation.display())
                })
            }
        }
    }
}
