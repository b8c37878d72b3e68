//! ONCE scene annotation model.

use contracts::PerceptionError;
use serde::{Deserialize, Serialize};

/// Parsed ONCE-format scene annotation.
///
/// `boxes_3d` entries are 7-element arrays (center x/y/z, extent l/w/h,
/// heading); `names` and `boxes_3d` are index-aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneAnnotation {
    pub scene_id: String,

    pub frame_id: String,

    /// Frame capture timestamp (milliseconds)
    pub timestamp: u64,

    /// Declared LiDAR point count for this frame
    pub lidar_points: u32,

    /// Annotated objects (may be absent in the file)
    #[serde(default)]
    pub annos: Annotations,
}

/// Per-frame object annotations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub names: Vec<String>,

    #[serde(default)]
    pub boxes_3d: Vec<[f64; 7]>,
}

impl SceneAnnotation {
    /// Structural checks the JSON schema cannot express.
    pub fn validate(&self) -> Result<(), PerceptionError> {
        if self.scene_id.is_empty() {
            return Err(PerceptionError::invalid_reading(
                "scene_id",
                "scene id must be non-empty",
            ));
        }
        if self.timestamp == 0 {
            return Err(PerceptionError::invalid_reading(
                "timestamp",
                "timestamp must be > 0",
            ));
        }
        if self.annos.names.len() != self.annos.boxes_3d.len() {
            return Err(PerceptionError::invalid_reading(
                "annos",
                format!(
                    "names and boxes_3d must have equal length: names={}, boxes={}",
                    self.annos.names.len(),
                    self.annos.boxes_3d.len()
                ),
            ));
        }
        Ok(())
    }

    pub fn annotation_count(&self) -> usize {
        self.annos.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SceneAnnotation {
        SceneAnnotation {
            scene_id: "000076".into(),
            frame_id: "1616100800400".into(),
            timestamp: 1_616_100_800_400,
            lidar_points: 60_000,
            annos: Annotations {
                names: vec!["Car".into(), "Pedestrian".into()],
                boxes_3d: vec![[0.0; 7], [1.0; 7]],
            },
        }
    }

    #[test]
    fn test_valid_annotation_passes() {
        assert!(base().validate().is_ok());
        assert_eq!(base().annotation_count(), 2);
    }

    #[test]
    fn test_mismatched_annotation_lists_rejected() {
        let mut annotation = base();
        annotation.annos.boxes_3d.pop();
        assert!(annotation.validate().is_err());
    }

    #[test]
    fn test_empty_scene_id_rejected() {
        let mut annotation = base();
        annotation.scene_id.clear();
        assert!(annotation.validate().is_err());
    }
}
