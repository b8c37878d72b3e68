//! Pipeline statistics and run summaries.

use std::time::Duration;

use observability::FrameStatsAggregator;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Frames that produced a successful result
    pub frames_ok: u64,

    /// Frames that ended in a failure report
    pub frames_failed: u64,

    /// Total objects detected across all frames
    pub objects_detected: u64,

    /// Total duration of the pipeline run
    pub duration: Duration,

    /// Per-frame aggregates (confidence, latency)
    pub frame_stats: FrameStatsAggregator,
}

impl PipelineStats {
    /// Calculate frames per second throughput
    pub fn fps(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.frames_ok as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate failure rate as percentage
    pub fn failure_rate(&self) -> f64 {
        let total = self.frames_ok + self.frames_failed;
        if total > 0 {
            (self.frames_failed as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Pipeline Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Frames ok: {}", self.frames_ok);
        println!("   ├─ Frames failed: {} ({:.2}%)", self.frames_failed, self.failure_rate());
        println!("   ├─ Objects detected: {}", self.objects_detected);
        println!("   └─ FPS: {:.2}", self.fps());

        let summary = self.frame_stats.summary();

        println!("\n📈 Frame Metrics");
        println!(
            "   ├─ Fusion confidence: mean {:.3} (min {:.3}, max {:.3})",
            summary.confidence.mean, summary.confidence.min, summary.confidence.max
        );
        println!(
            "   └─ Latency (ms): mean {:.2} (min {:.2}, max {:.2})",
            summary.latency_ms.mean, summary.latency_ms.min, summary.latency_ms.max
        );

        println!();
    }
}
