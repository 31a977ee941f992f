//! Configuration for the reframing pipeline.

use crate::error::{ReframeError, ReframeResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the reframing pipeline.
///
/// The tuning constants are empirical; the structural properties of the
/// pipeline hold for any choice as long as the ordering
/// `dead_zone_ratio < smooth_band_ratio <= hard_cut_band_ratio` is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReframeConfig {
    // === Analysis Settings ===
    /// Detection samples per second of video (default: 15.0)
    pub samples_per_sec: f64,

    /// Height the source is resized to before analysis (default: 720)
    pub analysis_height: u32,

    // === Track Selection ===
    /// Center displacement below this fraction of face width is treated as
    /// ordinary smooth motion (default: 0.4)
    pub smooth_band_ratio: f64,

    /// Center displacement below this fraction of face width is still
    /// smooth motion; at or above it the sample is a hard cut (default: 1.0)
    pub hard_cut_band_ratio: f64,

    // === Crop Smoothing ===
    /// Exponential smoothing factor; lower values pan slower (default: 0.2)
    pub smoothing_alpha: f64,

    /// Dead-zone buffer as a fraction of face width. While the face stays
    /// this far inside the crop edges, the pan target does not move
    /// (default: 0.5)
    pub dead_zone_ratio: f64,

    // === Static Collapse ===
    /// Trajectories whose total excursion is below this fraction of the
    /// target width collapse to a single static window (default: 0.02)
    pub static_collapse_ratio: f64,

    // === Face Detection ===
    /// Path to the frontal cascade model file
    pub frontal_model_path: PathBuf,

    /// Path to the profile cascade model file
    pub profile_model_path: PathBuf,

    /// Minimum face size in pixels passed to the detector (default: 40)
    pub min_face_size: u32,

    /// Detector score threshold (default: 2.0)
    pub score_threshold: f64,

    /// Detector image pyramid scale factor (default: 0.8)
    pub pyramid_scale_factor: f32,

    /// Detector sliding window step in pixels (default: 4)
    pub slide_window_step: u32,
}

impl Default for ReframeConfig {
    fn default() -> Self {
        Self {
            // Analysis
            samples_per_sec: 15.0,
            analysis_height: 720,

            // Track Selection
            smooth_band_ratio: 0.4,
            hard_cut_band_ratio: 1.0,

            // Crop Smoothing
            smoothing_alpha: 0.2,
            dead_zone_ratio: 0.5,

            // Static Collapse
            static_collapse_ratio: 0.02,

            // Face Detection
            frontal_model_path: PathBuf::from("models/seeta_fd_frontal_v1.0.bin"),
            profile_model_path: PathBuf::from("models/seeta_fd_profile_v1.0.bin"),
            min_face_size: 40,
            score_threshold: 2.0,
            pyramid_scale_factor: 0.8,
            slide_window_step: 4,
        }
    }
}

impl ReframeConfig {
    /// Fast configuration for quick previews.
    pub fn fast() -> Self {
        Self {
            samples_per_sec: 6.0,
            analysis_height: 480,
            min_face_size: 60,
            ..Default::default()
        }
    }

    /// Quality configuration for final output.
    pub fn quality() -> Self {
        Self {
            samples_per_sec: 20.0,
            analysis_height: 1080,
            smoothing_alpha: 0.15,
            ..Default::default()
        }
    }

    /// Validate tuning constants.
    pub fn validate(&self) -> ReframeResult<()> {
        if self.samples_per_sec <= 0.0 {
            return Err(ReframeError::invalid_config(format!(
                "samples_per_sec must be positive, got {}",
                self.samples_per_sec
            )));
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ReframeError::invalid_config(format!(
                "smoothing_alpha must be in (0, 1], got {}",
                self.smoothing_alpha
            )));
        }
        if self.smooth_band_ratio <= 0.0 || self.hard_cut_band_ratio < self.smooth_band_ratio {
            return Err(ReframeError::invalid_config(format!(
                "band ratios must satisfy 0 < smooth ({}) <= hard_cut ({})",
                self.smooth_band_ratio, self.hard_cut_band_ratio
            )));
        }
        if self.dead_zone_ratio < 0.0 || self.dead_zone_ratio >= self.smooth_band_ratio + 0.5 {
            // The dead-zone buffer is measured from the crop edges, the bands
            // from the previous face center; they only interact through face
            // width, so the bound here is a sanity check, not a tight one.
            return Err(ReframeError::invalid_config(format!(
                "dead_zone_ratio {} out of range",
                self.dead_zone_ratio
            )));
        }
        if self.analysis_height == 0 {
            return Err(ReframeError::invalid_config("analysis_height must be positive"));
        }
        Ok(())
    }
}
