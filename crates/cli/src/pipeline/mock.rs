//! Mock sensor frame source for runs without real sensors.

use bytes::Bytes;
use contracts::{ImageData, PointCloudData, SensorReading};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tracing::debug;

/// Mock frame source configuration
#[derive(Debug, Clone)]
pub struct MockFrameConfig {
    /// Number of frames to emit
    pub frames: u64,

    /// Interval between frames (milliseconds)
    pub interval_ms: u64,

    /// LiDAR points per frame
    pub lidar_points: u32,

    /// Camera frame width
    pub image_width: u32,

    /// Camera frame height
    pub image_height: u32,

    /// Max per-sensor timestamp jitter within a frame (milliseconds)
    pub jitter_ms: u64,
}

impl Default for MockFrameConfig {
    fn default() -> Self {
        Self {
            frames: 10,
            interval_ms: 100,
            lidar_points: 5000,
            image_width: 1920,
            image_height: 1080,
            jitter_ms: 40,
        }
    }
}

/// Generates synthetic LiDAR + camera frames.
///
/// Each frame holds one LiDAR and one camera reading whose timestamps
/// differ by a random jitter inside the configured bound, so the default
/// 50 ms sync window keeps both.
pub struct MockFrameSource {
    config: MockFrameConfig,
    rng: StdRng,
    base_timestamp_ms: u64,
}

impl MockFrameSource {
    pub fn new(config: MockFrameConfig) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(0xC0FFEE),
            base_timestamp_ms: 1000,
        }
    }

    /// A representative frame, used to resolve the fusion algorithm
    /// before streaming starts.
    pub fn probe_frame(&mut self) -> Vec<SensorReading> {
        self.make_frame(0)
    }

    /// Emit `frames` frames on a channel at the configured interval.
    pub fn stream(mut self, channel_capacity: usize) -> mpsc::Receiver<Vec<SensorReading>> {
        let (tx, rx) = mpsc::channel(channel_capacity);
        let frames = self.config.frames;
        let interval_ms = self.config.interval_ms;

        tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(std::time::Duration::from_millis(interval_ms.max(1)));
            for frame_id in 0..frames {
                ticker.tick().await;
                let frame = self.make_frame(frame_id);
                debug!(frame_id, readings = frame.len(), "mock frame generated");
                if tx.send(frame).await.is_err() {
                    break;
                }
            }
        });

        rx
    }

    fn make_frame(&mut self, frame_id: u64) -> Vec<SensorReading> {
        let t_frame = self.base_timestamp_ms + frame_id * self.config.interval_ms;
        let jitter = if self.config.jitter_ms == 0 {
            0
        } else {
            self.rng.random_range(0..=self.config.jitter_ms)
        };

        let lidar = SensorReading::lidar(
            "MOCK-LIDAR-01",
            t_frame,
            self.make_point_cloud(self.config.lidar_points as usize),
        )
        .expect("mock lidar reading is always well-formed");

        let camera = SensorReading::camera(
            "MOCK-CAM-01",
            t_frame + jitter,
            self.make_image(),
        )
        .expect("mock camera reading is always well-formed");

        vec![lidar, camera]
    }

    fn make_point_cloud(&mut self, n: usize) -> PointCloudData {
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut z = Vec::with_capacity(n);
        let mut intensity = Vec::with_capacity(n);
        for _ in 0..n {
            x.push(((self.rng.random::<f64>() - 0.5) * 100.0) as f32);
            y.push(((self.rng.random::<f64>() - 0.5) * 100.0) as f32);
            z.push((self.rng.random::<f64>() * 5.0) as f32);
            intensity.push((self.rng.random::<f64>() * 255.0) as f32);
        }
        PointCloudData::new(x, y, z, intensity)
            .expect("equal-length arrays by construction")
    }

    fn make_image(&mut self) -> ImageData {
        let len = self.config.image_width as usize * self.config.image_height as usize * 3;
        // Mid-range pixel values are enough for a structurally valid frame
        let data = Bytes::from(vec![96u8; len]);
        ImageData::new(data, self.config.image_width, self.config.image_height)
            .expect("buffer sized to dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_well_formed_and_within_window() {
        let mut source = MockFrameSource::new(MockFrameConfig::default());
        let frame = source.probe_frame();
        assert_eq!(frame.len(), 2);
        assert!(frame.iter().all(|r| r.is_valid()));

        let diff = frame[0].timestamp_ms().abs_diff(frame[1].timestamp_ms());
        assert!(diff <= 40);
    }

    #[tokio::test]
    async fn test_stream_emits_requested_frames() {
        let source = MockFrameSource::new(MockFrameConfig {
            frames: 3,
            interval_ms: 1,
            lidar_points: 10,
            image_width: 4,
            image_height: 4,
            jitter_ms: 0,
        });
        let mut rx = source.stream(8);
        let mut count = 0;
        while let Some(frame) = rx.recv().await {
            assert_eq!(frame.len(), 2);
            count += 1;
        }
        assert_eq!(count, 3);
    }
}
