//! Crop windows and crop-center trajectories.

use serde::{Deserialize, Serialize};

/// One sample of the smoothed crop-center trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Timestamp in seconds
    pub time: f64,
    /// Smoothed crop-center x-coordinate in source pixels
    pub center_x: f64,
}

impl TrajectoryPoint {
    /// Create a new trajectory point.
    pub fn new(time: f64, center_x: f64) -> Self {
        Self { time, center_x }
    }

    /// Linear interpolation of the crop center between two points.
    pub fn lerp(a: &TrajectoryPoint, b: &TrajectoryPoint, t: f64) -> f64 {
        a.center_x + t * (b.center_x - a.center_x)
    }
}

/// Horizontal crop window in integer source-frame pixels.
///
/// Invariant: `x2 - x1` equals the target width exactly, and
/// `0 <= x1 <= x2 <= source_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropWindow {
    /// Left edge x-coordinate
    pub x1: u32,
    /// Right edge x-coordinate (exclusive)
    pub x2: u32,
}

impl CropWindow {
    /// Compute the window of exactly `target_width` pixels around a requested
    /// center, shifted as a whole so it stays within `[0, source_width]`.
    pub fn centered(center_x: f64, target_width: u32, source_width: u32) -> Self {
        let mut x1 = (center_x - target_width as f64 / 2.0).round() as i64;
        let max_x1 = source_width.saturating_sub(target_width) as i64;
        if x1 < 0 {
            x1 = 0;
        } else if x1 > max_x1 {
            x1 = max_x1;
        }
        let x1 = x1 as u32;
        Self {
            x1,
            x2: x1 + target_width.min(source_width),
        }
    }

    /// Window width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }
}
