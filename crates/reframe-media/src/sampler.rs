//! Frame crop sampling: trajectory queries and pixel materialization.
//!
//! Render time is independent of (and typically denser than) the detection
//! cadence, so the per-frame crop is read from the trajectory by linear
//! interpolation. Everything here is side-effect free.

use image::RgbImage;
use reframe_models::{CropWindow, TrajectoryPoint};

/// Interpolate the crop center at an arbitrary query time.
///
/// Outside the sampled range the boundary value is returned. `None` only
/// for an empty trajectory.
pub fn interpolate_center(trajectory: &[TrajectoryPoint], time: f64) -> Option<f64> {
    let first = trajectory.first()?;
    if time <= first.time {
        return Some(first.center_x);
    }
    let last = trajectory.last()?;
    if time >= last.time {
        return Some(last.center_x);
    }

    // partition_point finds the first sample past the query time; the
    // bracketing pair is (idx - 1, idx).
    let idx = trajectory.partition_point(|p| p.time <= time);
    let a = &trajectory[idx - 1];
    let b = &trajectory[idx];
    let span = b.time - a.time;
    if span <= 0.0 {
        return Some(a.center_x);
    }
    let t = (time - a.time) / span;
    Some(TrajectoryPoint::lerp(a, b, t))
}

/// Materialize the crop window for one output frame.
///
/// The window always spans exactly `target_width` pixels (clamped as a
/// whole into the frame), regardless of rounding.
pub fn window_at(
    trajectory: &[TrajectoryPoint],
    time: f64,
    target_width: u32,
    source_width: u32,
) -> Option<CropWindow> {
    let center = interpolate_center(trajectory, time)?;
    Some(CropWindow::centered(center, target_width, source_width))
}

/// Whether a trajectory is close enough to motionless to collapse into a
/// single static window.
pub fn is_static_trajectory(trajectory: &[TrajectoryPoint], threshold_px: f64) -> bool {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in trajectory {
        min = min.min(point.center_x);
        max = max.max(point.center_x);
    }
    trajectory.len() <= 1 || max - min < threshold_px
}

/// Crop one RGB frame to a window. Height is passed through unchanged.
pub fn crop_frame(frame: &RgbImage, window: CropWindow) -> RgbImage {
    image::imageops::crop_imm(frame, window.x1, 0, window.width(), frame.height()).to_image()
}
