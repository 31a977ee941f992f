//! Shared data models for the reframe pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Face bounding boxes in analysis-frame coordinates
//! - Crop windows and crop-center trajectories
//!
//! All types are transient values scoped to one processing call;
//! nothing here carries identity or persistence semantics.

pub mod geometry;
pub mod window;

// Re-export common types
pub use geometry::FaceBox;
pub use window::{CropWindow, TrajectoryPoint};
