//! DetectedObject - detection stage output

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-width of the detection area on the x/y axes (meters).
pub const POSITION_XY_BOUND: f64 = 25.0;

/// Upper bound of the detection area on the z axis (meters).
pub const POSITION_Z_BOUND: f64 = 2.0;

/// Object classes relevant to autonomous driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectClass {
    Vehicle,
    Pedestrian,
    Bicycle,
    TrafficSign,
    TrafficLight,
    Obstacle,
}

impl ObjectClass {
    /// All classes, in the cyclic assignment order used by detection.
    pub const ALL: [ObjectClass; 6] = [
        ObjectClass::Vehicle,
        ObjectClass::Pedestrian,
        ObjectClass::Bicycle,
        ObjectClass::TrafficSign,
        ObjectClass::TrafficLight,
        ObjectClass::Obstacle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectClass::Vehicle => "vehicle",
            ObjectClass::Pedestrian => "pedestrian",
            ObjectClass::Bicycle => "bicycle",
            ObjectClass::TrafficSign => "traffic_sign",
            ObjectClass::TrafficLight => "traffic_light",
            ObjectClass::Obstacle => "obstacle",
        }
    }
}

/// Position in the vehicle frame (meters).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Whether this position lies inside the fixed detection bounds.
    pub fn in_bounds(&self) -> bool {
        self.x.abs() <= POSITION_XY_BOUND
            && self.y.abs() <= POSITION_XY_BOUND
            && (0.0..=POSITION_Z_BOUND).contains(&self.z)
    }
}

impl fmt::Display for Position3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// One classified object produced by a detection call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedObject {
    /// Unique within one detection call (e.g. "OBJ_3")
    pub object_id: String,

    pub class: ObjectClass,

    pub position: Position3,

    /// Always strictly above the detection threshold (0.5)
    pub confidence: f64,
}

impl fmt::Display for DetectedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DetectedObject[id={}, class={}, confidence={:.2}, pos={}]",
            self.object_id,
            self.class.as_str(),
            self.confidence,
            self.position
        )
    }
}
