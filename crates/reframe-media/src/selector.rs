//! Track selection: which face the crop follows, sample by sample.
//!
//! The selector owns a single mutable cursor (`tracked`) for the duration
//! of one run. It associates each sample's candidates to the cursor by
//! nearest center distance, classifies the motion as smooth or a hard cut
//! by how far the center moved relative to face width, and acquires a new
//! track (largest candidate, always a hard cut) whenever the previous one
//! was lost.

use crate::config::ReframeConfig;
use reframe_models::FaceBox;
use serde::{Deserialize, Serialize};

/// One timestamp's worth of detector output.
#[derive(Debug, Clone)]
pub struct DetectionSample {
    /// Timestamp in seconds
    pub time: f64,
    /// Unordered face candidates for this instant
    pub candidates: Vec<FaceBox>,
}

impl DetectionSample {
    /// Create a new detection sample.
    pub fn new(time: f64, candidates: Vec<FaceBox>) -> Self {
        Self { time, candidates }
    }
}

/// A detection sample after track selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSample {
    /// Timestamp in seconds
    pub time: f64,
    /// Selected face, if any
    pub bbox: Option<FaceBox>,
    /// True when the tracked position jumped and the crop must not ease
    pub is_hard_cut: bool,
}

/// Stateful face-track selector.
///
/// State is fresh per instance; one selector must not be reused across
/// clips.
pub struct TrackSelector {
    smooth_band_ratio: f64,
    hard_cut_band_ratio: f64,
    tracked: Option<FaceBox>,
}

impl TrackSelector {
    /// Create a new selector in the no-track state.
    pub fn new(config: &ReframeConfig) -> Self {
        Self {
            smooth_band_ratio: config.smooth_band_ratio,
            hard_cut_band_ratio: config.hard_cut_band_ratio,
            tracked: None,
        }
    }

    /// Process one detection sample, carrying track state from the previous one.
    pub fn select(&mut self, sample: &DetectionSample) -> AnnotatedSample {
        if let (Some(prev), false) = (self.tracked, sample.candidates.is_empty()) {
            // Nearest-neighbor association against the previous tracked
            // center, independent of candidate size or detector pass.
            let nearest = sample
                .candidates
                .iter()
                .min_by(|a, b| {
                    a.center_distance(&prev)
                        .partial_cmp(&b.center_distance(&prev))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .copied()
                .unwrap();

            let dist = nearest.center_distance(&prev);
            // Two smooth bands, one hard-cut regime. The wider band absorbs
            // medium jitter without a position jump; at or beyond one face
            // width the motion reads as a scene or track break.
            let is_hard_cut = if dist < self.smooth_band_ratio * nearest.width {
                false
            } else {
                dist >= self.hard_cut_band_ratio * nearest.width
            };

            self.tracked = Some(nearest);
            return AnnotatedSample {
                time: sample.time,
                bbox: Some(nearest),
                is_hard_cut,
            };
        }

        // Track lost: no previous box, or nothing detected this sample.
        match largest_candidate(&sample.candidates) {
            Some(acquired) => {
                // New-track acquisition is always instantaneous, never
                // smoothed in from nothing.
                self.tracked = Some(acquired);
                AnnotatedSample {
                    time: sample.time,
                    bbox: Some(acquired),
                    is_hard_cut: true,
                }
            }
            None => {
                self.tracked = None;
                AnnotatedSample {
                    time: sample.time,
                    bbox: None,
                    is_hard_cut: false,
                }
            }
        }
    }

    /// Run the per-sample loop over a whole sequence, then fill gaps.
    ///
    /// Returns `None` when no sample in the entire sequence has a face,
    /// in which case the caller must take the fallback path.
    pub fn run(config: &ReframeConfig, samples: &[DetectionSample]) -> Option<Vec<AnnotatedSample>> {
        let mut selector = TrackSelector::new(config);
        let mut annotated: Vec<AnnotatedSample> =
            samples.iter().map(|s| selector.select(s)).collect();
        if fill_gaps(&mut annotated) {
            Some(annotated)
        } else {
            None
        }
    }
}

/// Fill null samples in place.
///
/// Interior and trailing nulls take the most recent prior non-null box;
/// leading nulls back-fill from the first non-null box found later. Filled
/// samples are never marked as hard cuts. Returns false when the sequence
/// has no non-null box at all.
pub fn fill_gaps(samples: &mut [AnnotatedSample]) -> bool {
    let first_valid = match samples.iter().position(|s| s.bbox.is_some()) {
        Some(idx) => idx,
        None => return false,
    };

    let first_box = samples[first_valid].bbox;
    for sample in &mut samples[..first_valid] {
        sample.bbox = first_box;
        sample.is_hard_cut = false;
    }

    let mut last_box = first_box;
    for sample in &mut samples[first_valid..] {
        match sample.bbox {
            Some(b) => last_box = Some(b),
            None => {
                sample.bbox = last_box;
                sample.is_hard_cut = false;
            }
        }
    }
    true
}

fn largest_candidate(candidates: &[FaceBox]) -> Option<FaceBox> {
    candidates
        .iter()
        .max_by(|a, b| {
            a.area()
                .partial_cmp(&b.area())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(x: f64, width: f64) -> FaceBox {
        FaceBox::new(x, 100.0, width, width)
    }

    fn config() -> ReframeConfig {
        ReframeConfig::default()
    }

    #[test]
    fn test_acquisition_picks_largest_and_hard_cuts() {
        let mut selector = TrackSelector::new(&config());
        let sample = DetectionSample::new(
            0.0,
            vec![face(100.0, 50.0), face(400.0, 120.0), face(700.0, 80.0)],
        );
        let out = selector.select(&sample);
        assert!(out.is_hard_cut);
        assert_eq!(out.bbox.unwrap().width, 120.0);
    }

    #[test]
    fn test_nearest_neighbor_association() {
        let mut selector = TrackSelector::new(&config());
        selector.select(&DetectionSample::new(0.0, vec![face(400.0, 100.0)]));

        // A bigger face far away must not steal the track.
        let out = selector.select(&DetectionSample::new(
            0.1,
            vec![face(410.0, 100.0), face(900.0, 300.0)],
        ));
        let b = out.bbox.unwrap();
        assert_eq!(b.x, 410.0);
        assert!(!out.is_hard_cut);
    }

    #[test]
    fn test_small_motion_is_smooth() {
        let mut selector = TrackSelector::new(&config());
        selector.select(&DetectionSample::new(0.0, vec![face(400.0, 100.0)]));
        // 10px displacement on a 100px face: well inside the tight band.
        let out = selector.select(&DetectionSample::new(0.1, vec![face(410.0, 100.0)]));
        assert!(!out.is_hard_cut);
    }

    #[test]
    fn test_medium_motion_is_still_smooth() {
        let mut selector = TrackSelector::new(&config());
        selector.select(&DetectionSample::new(0.0, vec![face(400.0, 100.0)]));
        // 70px displacement: beyond the tight band, inside the wide one.
        let out = selector.select(&DetectionSample::new(0.1, vec![face(470.0, 100.0)]));
        assert!(!out.is_hard_cut);
    }

    #[test]
    fn test_large_motion_is_hard_cut() {
        let mut selector = TrackSelector::new(&config());
        selector.select(&DetectionSample::new(0.0, vec![face(400.0, 100.0)]));
        // 150px displacement on a 100px face: track break.
        let out = selector.select(&DetectionSample::new(0.1, vec![face(550.0, 100.0)]));
        assert!(out.is_hard_cut);
        assert_eq!(out.bbox.unwrap().x, 550.0);
    }

    #[test]
    fn test_loss_then_reacquisition_hard_cuts() {
        let mut selector = TrackSelector::new(&config());
        selector.select(&DetectionSample::new(0.0, vec![face(400.0, 100.0)]));

        let lost = selector.select(&DetectionSample::new(0.1, vec![]));
        assert!(lost.bbox.is_none());
        assert!(!lost.is_hard_cut);

        // Reappearing nearby still counts as new-track acquisition.
        let regained = selector.select(&DetectionSample::new(0.2, vec![face(405.0, 100.0)]));
        assert!(regained.is_hard_cut);
    }

    #[test]
    fn test_gap_fill_forward() {
        let mut samples = vec![
            AnnotatedSample {
                time: 0.0,
                bbox: Some(face(400.0, 100.0)),
                is_hard_cut: true,
            },
            AnnotatedSample {
                time: 0.1,
                bbox: None,
                is_hard_cut: false,
            },
            AnnotatedSample {
                time: 0.2,
                bbox: None,
                is_hard_cut: false,
            },
            AnnotatedSample {
                time: 0.3,
                bbox: Some(face(500.0, 100.0)),
                is_hard_cut: false,
            },
        ];
        assert!(fill_gaps(&mut samples));
        // Interior gap takes the preceding box, not an interpolation.
        assert_eq!(samples[1].bbox.unwrap().x, 400.0);
        assert_eq!(samples[2].bbox.unwrap().x, 400.0);
        assert!(!samples[1].is_hard_cut);
        assert!(!samples[2].is_hard_cut);
    }

    #[test]
    fn test_gap_fill_leading_nulls_backfill() {
        let mut samples = vec![
            AnnotatedSample {
                time: 0.0,
                bbox: None,
                is_hard_cut: false,
            },
            AnnotatedSample {
                time: 0.1,
                bbox: None,
                is_hard_cut: false,
            },
            AnnotatedSample {
                time: 0.2,
                bbox: Some(face(800.0, 100.0)),
                is_hard_cut: true,
            },
        ];
        assert!(fill_gaps(&mut samples));
        assert_eq!(samples[0].bbox.unwrap().x, 800.0);
        assert_eq!(samples[1].bbox.unwrap().x, 800.0);
        assert!(!samples[0].is_hard_cut);
        assert!(!samples[1].is_hard_cut);
        // The original detection keeps its hard-cut mark.
        assert!(samples[2].is_hard_cut);
    }

    #[test]
    fn test_gap_fill_all_null_signals_fallback() {
        let mut samples = vec![
            AnnotatedSample {
                time: 0.0,
                bbox: None,
                is_hard_cut: false,
            },
            AnnotatedSample {
                time: 0.1,
                bbox: None,
                is_hard_cut: false,
            },
        ];
        assert!(!fill_gaps(&mut samples));
    }

    #[test]
    fn test_run_returns_none_when_no_face_ever() {
        let samples = vec![
            DetectionSample::new(0.0, vec![]),
            DetectionSample::new(0.1, vec![]),
        ];
        assert!(TrackSelector::run(&config(), &samples).is_none());
    }
}
