//! Per-frame face candidate extraction.
//!
//! The cascade backend runs three independent passes per frame — frontal,
//! profile, and profile on a horizontally mirrored frame (covering the
//! opposite profile orientation) — and unions all candidates into one
//! unordered list. Detector parameters are fixed configuration; there is
//! no per-video tuning.

use crate::config::ReframeConfig;
use crate::error::{ReframeError, ReframeResult};
use crate::frame::GrayFrame;
use reframe_models::FaceBox;
use rustface::ImageData;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Pluggable face detection backend.
///
/// One candidate list per call; candidates are unordered and carry no
/// identity. Implementations must be pure functions of the frame aside
/// from their own loaded models.
pub trait FaceDetector {
    /// Detect face candidates in a grayscale analysis frame.
    fn detect(&mut self, frame: &GrayFrame) -> Vec<FaceBox>;
}

/// Cascade-model face detector backed by the SeetaFace engine.
///
/// Holds one frontal and one profile model, both loaded once from
/// filesystem paths at construction. Load failure is a recoverable
/// condition for the pipeline (it falls back to a static center crop),
/// which is why construction returns a `Result` instead of panicking.
pub struct CascadeFaceDetector {
    frontal: rustface::Model,
    profile: rustface::Model,
    min_face_size: u32,
    score_threshold: f64,
    pyramid_scale_factor: f32,
    slide_window_step: u32,
}

impl CascadeFaceDetector {
    /// Load both cascade models from the paths in `config`.
    pub fn load(config: &ReframeConfig) -> ReframeResult<Self> {
        let frontal = read_model(&config.frontal_model_path)?;
        let profile = read_model(&config.profile_model_path)?;
        debug!(
            frontal = %config.frontal_model_path.display(),
            profile = %config.profile_model_path.display(),
            "cascade models loaded"
        );
        Ok(Self {
            frontal,
            profile,
            min_face_size: config.min_face_size,
            score_threshold: config.score_threshold,
            pyramid_scale_factor: config.pyramid_scale_factor,
            slide_window_step: config.slide_window_step,
        })
    }

    /// Run one model over one frame.
    fn run_model(&self, model: &rustface::Model, frame: &GrayFrame) -> Vec<FaceBox> {
        let mut detector = rustface::create_detector_with_model(model.clone());
        detector.set_min_face_size(self.min_face_size);
        detector.set_score_thresh(self.score_threshold);
        detector.set_pyramid_scale_factor(self.pyramid_scale_factor);
        detector.set_slide_window_step(self.slide_window_step, self.slide_window_step);

        let faces = detector.detect(&ImageData::new(
            frame.data(),
            frame.width(),
            frame.height(),
        ));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBox::new(
                    bbox.x() as f64,
                    bbox.y() as f64,
                    bbox.width() as f64,
                    bbox.height() as f64,
                )
            })
            .collect()
    }
}

impl FaceDetector for CascadeFaceDetector {
    fn detect(&mut self, frame: &GrayFrame) -> Vec<FaceBox> {
        let frame_width = frame.width() as f64;
        let frame_height = frame.height() as f64;

        let mut candidates = self.run_model(&self.frontal, frame);
        candidates.extend(self.run_model(&self.profile, frame));

        // Opposite profile orientation: detect on the mirrored frame and
        // remap x back into original-frame space.
        let flipped = frame.flipped_horizontal();
        candidates.extend(
            self.run_model(&self.profile, &flipped)
                .into_iter()
                .map(|b| b.mirrored(frame_width)),
        );

        sanitize_candidates(candidates, frame_width, frame_height)
    }
}

/// Drop malformed detector output before selection.
///
/// A zero-size or out-of-bounds box (including one remapped off-frame by
/// the mirror pass) is discarded rather than propagated downstream as a
/// geometry error.
fn sanitize_candidates(
    mut candidates: Vec<FaceBox>,
    frame_width: f64,
    frame_height: f64,
) -> Vec<FaceBox> {
    candidates.retain(|b| b.is_valid(frame_width, frame_height));
    candidates
}

fn read_model(path: &Path) -> ReframeResult<rustface::Model> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReframeError::ModelNotFound(path.to_path_buf())
        } else {
            ReframeError::Io(e)
        }
    })?;
    rustface::read_model(BufReader::new(file)).map_err(|e| ReframeError::ModelLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
