//! Analysis frames and the decode-collaborator seam.
//!
//! The pipeline analyzes grayscale frames at a reduced resolution; the
//! surrounding decode/encode layer owns actual codec work and hands frames
//! in through the [`FrameSource`] trait.

use crate::error::ReframeResult;
use image::imageops::FilterType;
use image::{GrayImage, RgbImage};

/// Row-major grayscale frame buffer.
#[derive(Debug, Clone)]
pub struct GrayFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayFrame {
    /// Create a frame from a raw row-major luma buffer.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height) as usize,
            "luma buffer size does not match dimensions"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Convert an RGB frame to luma.
    pub fn from_rgb(rgb: &RgbImage) -> Self {
        let gray: GrayImage = image::imageops::grayscale(rgb);
        let (width, height) = gray.dimensions();
        Self {
            data: gray.into_raw(),
            width,
            height,
        }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw luma bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Return a horizontally mirrored copy of this frame.
    ///
    /// Used for the mirrored-profile detection pass; boxes detected on the
    /// mirrored frame must be remapped with [`reframe_models::FaceBox::mirrored`].
    pub fn flipped_horizontal(&self) -> GrayFrame {
        let w = self.width as usize;
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(w) {
            data.extend(row.iter().rev());
        }
        GrayFrame {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

/// Resize an RGB frame to the analysis height, preserving aspect ratio.
///
/// Returns the frame unchanged when it already matches the target height.
pub fn resize_to_height(frame: &RgbImage, target_height: u32) -> RgbImage {
    let (w, h) = frame.dimensions();
    if h == target_height {
        return frame.clone();
    }
    let scaled_width = ((w as f64 * target_height as f64 / h as f64).round() as u32).max(1);
    image::imageops::resize(frame, scaled_width, target_height, FilterType::Triangle)
}

/// Seekable source of analysis frames, supplied by the decode collaborator.
///
/// Dimensions are those of the frames the source yields, i.e. after any
/// resize to the analysis height. `luma_frame` may be called with arbitrary
/// timestamps in `[0, duration]`; sources are expected to clamp or snap to
/// the nearest decodable frame.
pub trait FrameSource {
    /// Frame width in pixels.
    fn width(&self) -> u32;

    /// Frame height in pixels.
    fn height(&self) -> u32;

    /// Clip duration in seconds.
    fn duration(&self) -> f64;

    /// Decode the frame at `time` as grayscale.
    fn luma_frame(&mut self, time: f64) -> ReframeResult<GrayFrame>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_horizontal() {
        let frame = GrayFrame::new(vec![1, 2, 3, 4, 5, 6], 3, 2);
        let flipped = frame.flipped_horizontal();
        assert_eq!(flipped.data(), &[3, 2, 1, 6, 5, 4]);
        assert_eq!(flipped.width(), 3);
        assert_eq!(flipped.height(), 2);
    }

    #[test]
    fn test_from_rgb_dimensions() {
        let rgb = RgbImage::from_pixel(4, 3, image::Rgb([10, 200, 30]));
        let gray = GrayFrame::from_rgb(&rgb);
        assert_eq!(gray.width(), 4);
        assert_eq!(gray.height(), 3);
        assert_eq!(gray.data().len(), 12);
    }

    #[test]
    fn test_resize_preserves_aspect() {
        let rgb = RgbImage::from_pixel(1920, 1080, image::Rgb([128, 128, 128]));
        let resized = resize_to_height(&rgb, 720);
        assert_eq!(resized.dimensions(), (1280, 720));
    }

    #[test]
    fn test_resize_noop_at_target_height() {
        let rgb = RgbImage::from_pixel(640, 480, image::Rgb([0, 0, 0]));
        let resized = resize_to_height(&rgb, 480);
        assert_eq!(resized.dimensions(), (640, 480));
    }
}
