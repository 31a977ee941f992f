//! Demonstrates planning a reframe over a synthetic clip.
//!
//! Run with:
//! ```bash
//! RUST_LOG=debug cargo run --package reframe-media --example plan_demo
//! ```

use reframe_media::{
    FaceDetector, FrameSource, GrayFrame, Reframer, ReframeConfig, ReframeResult,
};
use reframe_models::FaceBox;

struct SyntheticSource;

impl FrameSource for SyntheticSource {
    fn width(&self) -> u32 {
        1920
    }
    fn height(&self) -> u32 {
        1080
    }
    fn duration(&self) -> f64 {
        12.0
    }
    fn luma_frame(&mut self, _time: f64) -> ReframeResult<GrayFrame> {
        Ok(GrayFrame::new(vec![0; 1920 * 1080], 1920, 1080))
    }
}

/// A speaker on the left for six seconds, then one on the right.
struct TwoSpeakerDetector {
    sample: usize,
    samples_per_sec: f64,
}

impl FaceDetector for TwoSpeakerDetector {
    fn detect(&mut self, _frame: &GrayFrame) -> Vec<FaceBox> {
        let t = self.sample as f64 / self.samples_per_sec;
        self.sample += 1;
        if t < 6.0 {
            vec![FaceBox::new(420.0, 260.0, 140.0, 140.0)]
        } else {
            vec![FaceBox::new(1340.0, 280.0, 150.0, 150.0)]
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ReframeConfig::default();
    let reframer = Reframer::new(config.clone())?;
    let mut detector = TwoSpeakerDetector {
        sample: 0,
        samples_per_sec: config.samples_per_sec,
    };

    let plan = reframer.plan_with_detector(&mut SyntheticSource, 608, &mut detector)?;

    println!("crop windows at render time (30 fps, one per second):");
    for second in 0..12 {
        let window = plan.window_at(second as f64);
        println!(
            "  t={:>2}s  x1={:<5} x2={:<5} width={}",
            second,
            window.x1,
            window.x2,
            window.width()
        );
    }

    println!("\nplan as JSON:\n{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
