//! Adaptive face-tracking reframing for vertical clip generation.
//!
//! Given an arbitrary-aspect-ratio clip and a narrower target width, this
//! crate plans a horizontal crop window that follows the dominant face —
//! smoothly for small motion, instantaneously at hard cuts — and falls
//! back to a static center crop when no face is found or no detector
//! model loads.
//!
//! # Architecture
//!
//! ```text
//! Frame Source (decode collaborator)
//!     │  grayscale samples at the detection cadence
//!     ▼
//! ┌─────────────────┐
//! │  Face Detector  │ ← frontal + profile + mirrored-profile cascades
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Track Selector  │ ← nearest-neighbor association, hard-cut classing,
//! └────────┬────────┘   gap filling
//!          ▼
//! ┌─────────────────┐
//! │  Crop Smoother  │ ← dead-zone + exponential easing, hard-cut snap
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │  Crop Sampler   │ ← per-output-frame window via interpolation
//! └────────┬────────┘
//!          ▼
//!      Crop Plan
//! ```
//!
//! The plan phase is a synchronous batch pass over the whole clip (the
//! smoothing and gap-fill rules need look-ahead and look-behind), after
//! which [`CropPlan::window_at`] answers arbitrary render-time queries.

pub mod config;
pub mod detect;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod sampler;
pub mod selector;
pub mod smoother;

pub use config::ReframeConfig;
pub use detect::{CascadeFaceDetector, FaceDetector};
pub use error::{ReframeError, ReframeResult};
pub use frame::{resize_to_height, FrameSource, GrayFrame};
pub use pipeline::{CropPlan, Reframer};
pub use selector::{AnnotatedSample, DetectionSample, TrackSelector};
pub use smoother::CropSmoother;
