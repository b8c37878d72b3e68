//! SensorReading - one sensor's data at one instant
//!
//! Immutable, construct-or-fail value type. Producers (dataset loader,
//! synthetic generators) build readings once; pipeline stages only read them.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{PerceptionError, SensorId};

/// Channels per pixel for camera frames (RGB).
pub const IMAGE_CHANNELS: usize = 3;

/// Upper bound on point-cloud size; anything above this is treated as a
/// malformed or hostile payload rather than real sensor output.
pub const MAX_POINT_COUNT: usize = 2_000_000;

/// Upper bound on image buffer size (bytes).
pub const MAX_IMAGE_BYTES: usize = 100_000_000;

/// Sensor kind used in autonomous driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Lidar,
    Camera,
    Radar,
    Gps,
    Imu,
}

impl SensorKind {
    /// Short label for logs and metric tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Lidar => "lidar",
            SensorKind::Camera => "camera",
            SensorKind::Radar => "radar",
            SensorKind::Gps => "gps",
            SensorKind::Imu => "imu",
        }
    }
}

/// One sensor's reading at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    sensor_id: SensorId,
    kind: SensorKind,
    /// Monotonic capture timestamp (milliseconds). Always > 0.
    timestamp_ms: u64,
    payload: ReadingPayload,
}

impl SensorReading {
    /// Create a reading, validating the shared invariants.
    ///
    /// Fails if the timestamp is 0, the sensor id is empty, or the payload
    /// does not match the declared kind.
    pub fn new(
        sensor_id: impl Into<SensorId>,
        kind: SensorKind,
        timestamp_ms: u64,
        payload: ReadingPayload,
    ) -> Result<Self, PerceptionError> {
        let sensor_id = sensor_id.into();
        if timestamp_ms == 0 {
            return Err(PerceptionError::invalid_reading(
                "timestamp_ms",
                "timestamp must be > 0",
            ));
        }
        if sensor_id.is_empty() {
            return Err(PerceptionError::invalid_reading(
                "sensor_id",
                "sensor id must be non-empty",
            ));
        }
        if payload.kind() != kind {
            return Err(PerceptionError::invalid_reading(
                "payload",
                format!(
                    "payload is {} but declared kind is {}",
                    payload.kind().as_str(),
                    kind.as_str()
                ),
            ));
        }
        Ok(Self {
            sensor_id,
            kind,
            timestamp_ms,
            payload,
        })
    }

    /// Shorthand for a LiDAR reading.
    pub fn lidar(
        sensor_id: impl Into<SensorId>,
        timestamp_ms: u64,
        cloud: PointCloudData,
    ) -> Result<Self, PerceptionError> {
        Self::new(
            sensor_id,
            SensorKind::Lidar,
            timestamp_ms,
            ReadingPayload::PointCloud(cloud),
        )
    }

    /// Shorthand for a camera reading.
    pub fn camera(
        sensor_id: impl Into<SensorId>,
        timestamp_ms: u64,
        image: ImageData,
    ) -> Result<Self, PerceptionError> {
        Self::new(
            sensor_id,
            SensorKind::Camera,
            timestamp_ms,
            ReadingPayload::Image(image),
        )
    }

    pub fn sensor_id(&self) -> &SensorId {
        &self.sensor_id
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    pub fn payload(&self) -> &ReadingPayload {
        &self.payload
    }

    /// Size of the carried data: point count for point clouds, byte length
    /// for images, detection count for radar, field count for GPS/IMU.
    pub fn data_size(&self) -> u64 {
        self.payload.data_size()
    }

    /// Kind-specific structural check.
    ///
    /// A reading can be constructed and still be invalid (e.g. an empty
    /// point cloud); fusion algorithms use this to weight their confidence.
    pub fn is_valid(&self) -> bool {
        self.payload.is_valid()
    }
}

/// Sensor data payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReadingPayload {
    /// LiDAR point cloud
    PointCloud(PointCloudData),

    /// Camera frame (RGB)
    Image(ImageData),

    /// Radar detections
    Radar(RadarData),

    /// GPS fix
    Gps(GpsData),

    /// IMU sample
    Imu(ImuData),
}

impl ReadingPayload {
    /// The sensor kind this payload belongs to.
    pub fn kind(&self) -> SensorKind {
        match self {
            ReadingPayload::PointCloud(_) => SensorKind::Lidar,
            ReadingPayload::Image(_) => SensorKind::Camera,
            ReadingPayload::Radar(_) => SensorKind::Radar,
            ReadingPayload::Gps(_) => SensorKind::Gps,
            ReadingPayload::Imu(_) => SensorKind::Imu,
        }
    }

    pub fn data_size(&self) -> u64 {
        match self {
            ReadingPayload::PointCloud(cloud) => cloud.point_count() as u64,
            ReadingPayload::Image(image) => image.byte_len() as u64,
            ReadingPayload::Radar(radar) => radar.detections.len() as u64,
            ReadingPayload::Gps(_) => 3,
            ReadingPayload::Imu(_) => 7,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            ReadingPayload::PointCloud(cloud) => cloud.is_valid(),
            ReadingPayload::Image(image) => image.is_valid(),
            ReadingPayload::Radar(radar) => !radar.detections.is_empty(),
            ReadingPayload::Gps(gps) => gps.latitude.is_finite() && gps.longitude.is_finite(),
            ReadingPayload::Imu(imu) => {
                imu.accelerometer.is_finite() && imu.gyroscope.is_finite()
            }
        }
    }
}

/// LiDAR point cloud stored as structure-of-arrays.
///
/// Invariant: `x`, `y`, `z` and `intensity` always have identical length.
/// Enforced at construction; the fields stay private so the invariant cannot
/// be broken afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointCloudData {
    x: Vec<f32>,
    y: Vec<f32>,
    z: Vec<f32>,
    intensity: Vec<f32>,
}

impl PointCloudData {
    /// Build a point cloud from four coordinate arrays.
    ///
    /// Fails immediately on any length mismatch, before the data can reach
    /// a pipeline stage.
    pub fn new(
        x: Vec<f32>,
        y: Vec<f32>,
        z: Vec<f32>,
        intensity: Vec<f32>,
    ) -> Result<Self, PerceptionError> {
        let len = x.len();
        if y.len() != len || z.len() != len || intensity.len() != len {
            return Err(PerceptionError::invalid_reading(
                "point_cloud",
                format!(
                    "coordinate array length mismatch: x={}, y={}, z={}, intensity={}",
                    len,
                    y.len(),
                    z.len(),
                    intensity.len()
                ),
            ));
        }
        Ok(Self { x, y, z, intensity })
    }

    pub fn point_count(&self) -> usize {
        self.x.len()
    }

    pub fn x(&self) -> &[f32] {
        &self.x
    }

    pub fn y(&self) -> &[f32] {
        &self.y
    }

    pub fn z(&self) -> &[f32] {
        &self.z
    }

    pub fn intensity(&self) -> &[f32] {
        &self.intensity
    }

    /// Largest point distance from the sensor origin.
    pub fn max_range(&self) -> f64 {
        (0..self.point_count())
            .map(|i| {
                let (x, y, z) = (self.x[i] as f64, self.y[i] as f64, self.z[i] as f64);
                (x * x + y * y + z * z).sqrt()
            })
            .fold(0.0, f64::max)
    }

    /// Mean point intensity, 0.0 for an empty cloud.
    pub fn average_intensity(&self) -> f64 {
        if self.intensity.is_empty() {
            return 0.0;
        }
        self.intensity.iter().map(|i| *i as f64).sum::<f64>() / self.intensity.len() as f64
    }

    fn is_valid(&self) -> bool {
        let n = self.point_count();
        n > 0 && n < MAX_POINT_COUNT
    }
}

/// Camera frame data.
///
/// Invariant: a non-empty buffer is exactly `width * height * 3` bytes (RGB).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    width: u32,
    height: u32,
    /// Raw pixel data (zero-copy)
    data: Bytes,
}

impl ImageData {
    /// Build an image payload, validating dimensions against the buffer.
    pub fn new(data: Bytes, width: u32, height: u32) -> Result<Self, PerceptionError> {
        if width == 0 || height == 0 {
            return Err(PerceptionError::invalid_reading(
                "image",
                format!("dimensions must be positive, got {width}x{height}"),
            ));
        }
        let expected = width as usize * height as usize * IMAGE_CHANNELS;
        if !data.is_empty() && data.len() != expected {
            return Err(PerceptionError::invalid_reading(
                "image",
                format!(
                    "buffer length {} does not match {width}x{height}x{IMAGE_CHANNELS} = {expected}",
                    data.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    fn is_valid(&self) -> bool {
        !self.data.is_empty() && self.data.len() <= MAX_IMAGE_BYTES
    }
}

/// Radar detections (range, azimuth, velocity per detection).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadarData {
    pub detections: Vec<RadarDetection>,
}

/// Single radar detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadarDetection {
    pub range_m: f64,
    pub azimuth_rad: f64,
    pub velocity_mps: f64,
}

/// GPS fix.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GpsData {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// IMU sample.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImuData {
    /// Accelerometer (m/s²)
    pub accelerometer: Vector3,
    /// Gyroscope (rad/s)
    pub gyroscope: Vector3,
    /// Compass heading (rad)
    pub compass: f64,
}

/// 3D vector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_cloud_length_mismatch_rejected() {
        let result = PointCloudData::new(
            vec![1.0, 2.0, 3.0],
            vec![0.5, 1.0],
            vec![0.0, 0.0, 0.1],
            vec![0.8, 0.9, 0.7],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_point_cloud_data_size_is_point_count() {
        let cloud = PointCloudData::new(
            vec![1.0, 2.0, 3.0],
            vec![0.5, 1.0, 1.5],
            vec![0.0, 0.0, 0.1],
            vec![0.8, 0.9, 0.7],
        )
        .unwrap();
        let reading = SensorReading::lidar("LIDAR-01", 1000, cloud).unwrap();
        assert_eq!(reading.data_size(), 3);
        assert!(reading.is_valid());
    }

    #[test]
    fn test_empty_point_cloud_is_invalid_but_constructible() {
        let cloud = PointCloudData::default();
        let reading = SensorReading::lidar("LIDAR-01", 1000, cloud).unwrap();
        assert_eq!(reading.data_size(), 0);
        assert!(!reading.is_valid());
    }

    #[test]
    fn test_zero_timestamp_rejected() {
        let cloud = PointCloudData::default();
        let result = SensorReading::lidar("LIDAR-01", 0, cloud);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_sensor_id_rejected() {
        let cloud = PointCloudData::default();
        let result = SensorReading::lidar("", 1000, cloud);
        assert!(result.is_err());
    }

    #[test]
    fn test_image_buffer_must_match_dimensions() {
        let bad = ImageData::new(Bytes::from(vec![0u8; 10]), 4, 4);
        assert!(bad.is_err());

        let good = ImageData::new(Bytes::from(vec![0u8; 4 * 4 * 3]), 4, 4).unwrap();
        assert_eq!(good.byte_len(), 48);
    }

    #[test]
    fn test_image_zero_dimensions_rejected() {
        assert!(ImageData::new(Bytes::new(), 0, 100).is_err());
        assert!(ImageData::new(Bytes::new(), 100, 0).is_err());
    }

    #[test]
    fn test_camera_data_size_is_byte_len() {
        let image = ImageData::new(Bytes::from(vec![128u8; 8 * 8 * 3]), 8, 8).unwrap();
        let reading = SensorReading::camera("CAM-01", 1000, image).unwrap();
        assert_eq!(reading.data_size(), 192);
        assert!(reading.is_valid());
    }

    #[test]
    fn test_payload_kind_mismatch_rejected() {
        let cloud = PointCloudData::default();
        let result = SensorReading::new(
            "CAM-01",
            SensorKind::Camera,
            1000,
            ReadingPayload::PointCloud(cloud),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reading_serde_round_trip() {
        let cloud =
            PointCloudData::new(vec![1.0], vec![2.0], vec![3.0], vec![0.5]).unwrap();
        let reading = SensorReading::lidar("LIDAR-01", 1234, cloud).unwrap();
        let json = serde_json::to_string(&reading).unwrap();
        let parsed: SensorReading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.timestamp_ms(), 1234);
        assert_eq!(parsed.data_size(), 1);
    }
}
