//! Crop-center trajectory smoothing.
//!
//! Converts the annotated track sequence into a continuous crop-center
//! trajectory. Two concerns are deliberately decoupled: the dead-zone test
//! decides *when* the crop starts moving, the exponential ease decides *how
//! fast* it moves. Hard cuts bypass both — the visual cut absorbs the jump.

use crate::config::ReframeConfig;
use crate::selector::AnnotatedSample;
use reframe_models::TrajectoryPoint;

/// Stateful crop-center smoother for one clip.
pub struct CropSmoother {
    alpha: f64,
    dead_zone_ratio: f64,
    half_crop: f64,
    crop_center: f64,
    target_crop_center: f64,
}

impl CropSmoother {
    /// Create a smoother with both centers at the frame's horizontal midpoint.
    pub fn new(config: &ReframeConfig, source_width: f64, target_width: f64) -> Self {
        let midpoint = source_width / 2.0;
        Self {
            alpha: config.smoothing_alpha,
            dead_zone_ratio: config.dead_zone_ratio,
            half_crop: target_width / 2.0,
            crop_center: midpoint,
            target_crop_center: midpoint,
        }
    }

    /// Advance the smoother by one sample and emit its trajectory point.
    pub fn step(&mut self, sample: &AnnotatedSample) -> TrajectoryPoint {
        let bbox = match sample.bbox {
            Some(b) => b,
            // Only reachable pre-gap-fill; hold the current center.
            None => return TrajectoryPoint::new(sample.time, self.crop_center),
        };
        let face_center_x = bbox.cx();

        if sample.is_hard_cut {
            self.target_crop_center = face_center_x;
            self.crop_center = face_center_x;
            return TrajectoryPoint::new(sample.time, self.crop_center);
        }

        let buffer = bbox.width * self.dead_zone_ratio;
        let in_safe_zone = face_center_x > self.crop_center - self.half_crop + buffer
            && face_center_x < self.crop_center + self.half_crop - buffer;
        if !in_safe_zone {
            self.target_crop_center = face_center_x;
        }

        self.crop_center =
            self.alpha * self.target_crop_center + (1.0 - self.alpha) * self.crop_center;
        TrajectoryPoint::new(sample.time, self.crop_center)
    }

    /// Smooth a whole annotated sequence into a clamped trajectory.
    pub fn smooth(
        config: &ReframeConfig,
        samples: &[AnnotatedSample],
        source_width: f64,
        target_width: f64,
    ) -> Vec<TrajectoryPoint> {
        let mut smoother = CropSmoother::new(config, source_width, target_width);
        let mut trajectory: Vec<TrajectoryPoint> =
            samples.iter().map(|s| smoother.step(s)).collect();
        clamp_trajectory(&mut trajectory, source_width, target_width);
        trajectory
    }
}

/// Clip every trajectory value so the crop window never leaves the frame.
fn clamp_trajectory(trajectory: &mut [TrajectoryPoint], source_width: f64, target_width: f64) {
    let lo = target_width / 2.0;
    let hi = source_width - target_width / 2.0;
    for point in trajectory {
        point.center_x = point.center_x.clamp(lo, hi.max(lo));
    }
}
