//! Pipeline orchestration.
//!
//! [`Reframer`] is the only externally visible entry point: it drives
//! detection sampling, track selection, gap filling and smoothing over one
//! clip, and returns a [`CropPlan`] the encode collaborator applies per
//! output frame. The whole computation is synchronous and all-or-nothing;
//! separate clips may be planned in parallel, each with independent state.

use crate::config::ReframeConfig;
use crate::detect::{CascadeFaceDetector, FaceDetector};
use crate::error::{ReframeError, ReframeResult};
use crate::frame::FrameSource;
use crate::sampler;
use crate::selector::{DetectionSample, TrackSelector};
use crate::smoother::CropSmoother;
use image::RgbImage;
use reframe_models::{CropWindow, TrajectoryPoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A computed crop plan for one clip.
///
/// Consumed read-only by the renderer at arbitrary render times; the plan
/// itself holds no pixel data and serializes cleanly if a worker wants to
/// persist it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CropPlan {
    /// Target width is at least the source width; no crop is necessary.
    PassThrough { source_width: u32 },
    /// Single fixed window for the clip's full duration.
    Static {
        center_x: f64,
        target_width: u32,
        source_width: u32,
    },
    /// Face-tracked crop-center trajectory.
    Tracked {
        trajectory: Vec<TrajectoryPoint>,
        target_width: u32,
        source_width: u32,
    },
}

impl CropPlan {
    /// Crop window for the output frame at `time`.
    pub fn window_at(&self, time: f64) -> CropWindow {
        match self {
            CropPlan::PassThrough { source_width } => CropWindow {
                x1: 0,
                x2: *source_width,
            },
            CropPlan::Static {
                center_x,
                target_width,
                source_width,
            } => CropWindow::centered(*center_x, *target_width, *source_width),
            CropPlan::Tracked {
                trajectory,
                target_width,
                source_width,
            } => sampler::window_at(trajectory, time, *target_width, *source_width)
                // A tracked plan always carries a non-empty trajectory.
                .unwrap_or_else(|| {
                    CropWindow::centered(*source_width as f64 / 2.0, *target_width, *source_width)
                }),
        }
    }

    /// Apply the plan to one decoded frame. The per-frame transform the
    /// encode collaborator maps over the output stream.
    pub fn crop_frame(&self, time: f64, frame: &RgbImage) -> RgbImage {
        match self {
            CropPlan::PassThrough { .. } => frame.clone(),
            _ => sampler::crop_frame(frame, self.window_at(time)),
        }
    }

    /// True when no cropping will be applied.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, CropPlan::PassThrough { .. })
    }
}

/// Adaptive face-tracking reframe planner.
pub struct Reframer {
    config: ReframeConfig,
}

impl Reframer {
    /// Create a planner, validating the configuration.
    pub fn new(config: ReframeConfig) -> ReframeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Plan a reframe using the cascade detector from the configured model
    /// paths.
    ///
    /// Model load failure is absorbed: the plan degrades to a static
    /// center crop rather than erroring. Only resource-level failures from
    /// the frame source propagate.
    pub fn plan(
        &self,
        source: &mut dyn FrameSource,
        target_width: u32,
    ) -> ReframeResult<CropPlan> {
        let (source_width, _) = self.check_source(source)?;

        if target_width >= source_width {
            info!(
                target_width,
                source_width, "target not narrower than source, passing through"
            );
            return Ok(CropPlan::PassThrough { source_width });
        }

        let mut detector = match CascadeFaceDetector::load(&self.config) {
            Ok(d) => d,
            Err(e) => {
                warn!(error = %e, "cascade models unavailable, using static center crop");
                return Ok(self.static_center(target_width, source_width));
            }
        };

        self.plan_with_detector(source, target_width, &mut detector)
    }

    /// Plan a reframe with a caller-supplied detector backend.
    ///
    /// State is threaded externally: the detector may be immutable model
    /// handles, while all tracking state lives inside this call.
    pub fn plan_with_detector(
        &self,
        source: &mut dyn FrameSource,
        target_width: u32,
        detector: &mut dyn FaceDetector,
    ) -> ReframeResult<CropPlan> {
        let (source_width, duration) = self.check_source(source)?;

        if target_width >= source_width {
            return Ok(CropPlan::PassThrough { source_width });
        }

        // 1. Detect at the sampling cadence.
        let interval = 1.0 / self.config.samples_per_sec;
        let sample_count = ((duration * self.config.samples_per_sec).ceil() as usize).max(1);
        info!(
            sample_count,
            cadence = self.config.samples_per_sec,
            duration,
            "step 1/3: detecting faces"
        );

        let mut samples = Vec::with_capacity(sample_count);
        for i in 0..sample_count {
            let time = (i as f64 * interval).min(duration);
            let frame = source.luma_frame(time)?;
            let candidates = detector.detect(&frame);
            samples.push(DetectionSample::new(time, candidates));
        }
        let total: usize = samples.iter().map(|s| s.candidates.len()).sum();
        debug!(total, "face candidates collected");

        // 2. Select and gap-fill the track.
        info!("step 2/3: selecting face track");
        let annotated = match TrackSelector::run(&self.config, &samples) {
            Some(annotated) => annotated,
            None => {
                info!("no face found in any sample, using static center crop");
                return Ok(self.static_center(target_width, source_width));
            }
        };

        // 3. Smooth into a trajectory.
        info!("step 3/3: smoothing crop trajectory");
        let trajectory = CropSmoother::smooth(
            &self.config,
            &annotated,
            source_width as f64,
            target_width as f64,
        );

        let threshold = self.config.static_collapse_ratio * target_width as f64;
        if sampler::is_static_trajectory(&trajectory, threshold) {
            let center_x = median_center(&trajectory)
                .unwrap_or(source_width as f64 / 2.0);
            debug!(center_x, "trajectory collapsed to static window");
            return Ok(CropPlan::Static {
                center_x,
                target_width,
                source_width,
            });
        }

        Ok(CropPlan::Tracked {
            trajectory,
            target_width,
            source_width,
        })
    }

    fn static_center(&self, target_width: u32, source_width: u32) -> CropPlan {
        CropPlan::Static {
            center_x: source_width as f64 / 2.0,
            target_width,
            source_width,
        }
    }

    fn check_source(&self, source: &dyn FrameSource) -> ReframeResult<(u32, f64)> {
        let width = source.width();
        let height = source.height();
        if width == 0 || height == 0 {
            return Err(ReframeError::InvalidSource { width, height });
        }
        let duration = source.duration();
        if duration <= 0.0 {
            return Err(ReframeError::InvalidDuration(duration));
        }
        if height != self.config.analysis_height {
            debug!(
                height,
                analysis_height = self.config.analysis_height,
                "source height differs from configured analysis height"
            );
        }
        Ok((width, duration))
    }
}

/// Median of the trajectory's centers, robust to brief excursions.
fn median_center(trajectory: &[TrajectoryPoint]) -> Option<f64> {
    if trajectory.is_empty() {
        return None;
    }
    let mut centers: Vec<f64> = trajectory.iter().map(|p| p.center_x).collect();
    centers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = centers.len() / 2;
    Some(if centers.len() % 2 == 0 {
        (centers[mid - 1] + centers[mid]) / 2.0
    } else {
        centers[mid]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_center() {
        let traj = vec![
            TrajectoryPoint::new(0.0, 500.0),
            TrajectoryPoint::new(0.1, 900.0),
            TrajectoryPoint::new(0.2, 510.0),
        ];
        assert_eq!(median_center(&traj), Some(510.0));
        assert_eq!(median_center(&[]), None);
    }

    #[test]
    fn test_pass_through_window_spans_frame() {
        let plan = CropPlan::PassThrough { source_width: 1280 };
        let w = plan.window_at(3.0);
        assert_eq!(w.x1, 0);
        assert_eq!(w.x2, 1280);
        assert!(plan.is_pass_through());
    }

    #[test]
    fn test_static_window_is_time_invariant() {
        let plan = CropPlan::Static {
            center_x: 960.0,
            target_width: 600,
            source_width: 1920,
        };
        assert_eq!(plan.window_at(0.0), plan.window_at(42.0));
        assert_eq!(plan.window_at(0.0).width(), 600);
    }
}
