//! Annotation file loading and reading materialization.

use std::fs;
use std::path::Path;

use contracts::{PerceptionError, PointCloudData, SensorReading};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use security::{sanitize_for_log, validate_data_size, validate_sensor_id};
use tracing::info;

use crate::SceneAnnotation;

/// Fixed seed for synthetic point-cloud generation, to keep dataset runs
/// reproducible across processes.
const CLOUD_SEED: u64 = 42;

/// Loads ONCE annotation files and builds sensor readings from them.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Parse one annotation file.
    ///
    /// The file stem is screened by the security gate before anything is
    /// parsed; declared point counts go through the payload-size gate.
    pub fn load_annotation(path: &Path) -> Result<SceneAnnotation, PerceptionError> {
        let source_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("annotation");

        info!(source = %sanitize_for_log(source_name), "loading annotation");

        let content = fs::read_to_string(path)?;
        Self::parse_annotation(&content, source_name)
    }

    /// Parse annotation JSON from an in-memory string.
    ///
    /// `source_name` is logged and screened; it is externally sourced
    /// (a filename) and goes through the sensor-id threat gate.
    pub fn parse_annotation(
        content: &str,
        source_name: &str,
    ) -> Result<SceneAnnotation, PerceptionError> {
        validate_sensor_id(source_name)?;

        let annotation: SceneAnnotation = serde_json::from_str(content).map_err(|e| {
            PerceptionError::annotation_parse(source_name, e.to_string())
        })?;
        annotation.validate()?;
        validate_data_size(annotation.lidar_points as i64)?;

        info!(
            scene = %sanitize_for_log(&annotation.scene_id),
            points = annotation.lidar_points,
            objects = annotation.annotation_count(),
            "loaded scene annotation"
        );

        Ok(annotation)
    }

    /// Materialize a LiDAR reading for the annotation.
    ///
    /// Generates a representative cloud with the declared point count (the
    /// dataset's raw .bin clouds are not shipped); geometry ranges follow
    /// the ONCE sensor setup (x ±50 m, y 0-80 m, z 0-5 m, intensity 0-255).
    pub fn build_lidar_reading(
        annotation: &SceneAnnotation,
    ) -> Result<SensorReading, PerceptionError> {
        let n = annotation.lidar_points as usize;
        info!(
            scene = %sanitize_for_log(&annotation.scene_id),
            points = n,
            "building lidar reading"
        );

        let mut rng = StdRng::seed_from_u64(CLOUD_SEED);
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut z = Vec::with_capacity(n);
        let mut intensity = Vec::with_capacity(n);
        for _ in 0..n {
            x.push(((rng.random::<f64>() - 0.5) * 100.0) as f32);
            y.push((rng.random::<f64>() * 80.0) as f32);
            z.push((rng.random::<f64>() * 5.0) as f32);
            intensity.push((rng.random::<f64>() * 255.0) as f32);
        }

        let cloud = PointCloudData::new(x, y, z, intensity)?;
        SensorReading::lidar(
            format!("ONCE-LIDAR-{}", annotation.scene_id),
            annotation.timestamp,
            cloud,
        )
    }
}
