//! Face bounding box geometry.

use serde::{Deserialize, Serialize};

/// Face bounding box in pixel coordinates of the resized analysis frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    /// Left edge x-coordinate
    pub x: f64,
    /// Top edge y-coordinate
    pub y: f64,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
}

impl FaceBox {
    /// Create a new face box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center x-coordinate.
    #[inline]
    pub fn cx(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center y-coordinate.
    #[inline]
    pub fn cy(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Box area in pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Euclidean distance between this box's center and another's.
    pub fn center_distance(&self, other: &FaceBox) -> f64 {
        let dx = self.cx() - other.cx();
        let dy = self.cy() - other.cy();
        (dx * dx + dy * dy).sqrt()
    }

    /// Remap a box detected on a horizontally mirrored frame back into
    /// original-frame coordinates: `x' = frame_width - x - width`.
    pub fn mirrored(&self, frame_width: f64) -> FaceBox {
        FaceBox {
            x: frame_width - self.x - self.width,
            ..*self
        }
    }

    /// True if the box has positive size and lies within frame bounds.
    ///
    /// Detector output that fails this check must be dropped before
    /// candidate selection rather than propagated downstream.
    pub fn is_valid(&self, frame_width: f64, frame_height: f64) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= frame_width
            && self.y + self.height <= frame_height
    }
}
