//! Texture-aspect-preserving layout of the picture frame.
//!
//! The longer side of the source image always maps to one scene unit. The
//! bounding box adds the border strips on every side and is the only input the
//! light rig needs.

use serde::{Deserialize, Serialize};

/// Normalized size of the picture board, longer side = 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameDimensions {
    pub width: f32,
    pub height: f32,
}

impl FrameDimensions {
    /// Size including a border strip of `border_width` on each side.
    pub fn bounding_box(&self, border_width: f32) -> FrameBoundingBox {
        FrameBoundingBox {
            width: self.width + border_width * 2.0,
            height: self.height + border_width * 2.0,
        }
    }
}

/// Border-inclusive extent of the frame in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameBoundingBox {
    pub width: f32,
    pub height: f32,
}

/// Maps image pixel dimensions onto normalized frame dimensions.
///
/// Both inputs must be positive. When the sides are equal the width branch is
/// taken, which yields 1.0 x 1.0.
pub fn compute_frame_dimensions(width_px: f32, height_px: f32) -> FrameDimensions {
    debug_assert!(width_px > 0.0 && height_px > 0.0);

    if width_px >= height_px {
        FrameDimensions {
            width: 1.0,
            height: height_px / width_px,
        }
    } else {
        FrameDimensions {
            width: width_px / height_px,
            height: 1.0,
        }
    }
}

/// Full layout derived from an image: board size plus bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameLayout {
    pub dimensions: FrameDimensions,
    pub bounding_box: FrameBoundingBox,
}

impl FrameLayout {
    pub fn from_pixels(width_px: u32, height_px: u32, border_width: f32) -> Self {
        let dimensions = compute_frame_dimensions(width_px as f32, height_px as f32);
        Self {
            dimensions,
            bounding_box: dimensions.bounding_box(border_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn landscape_image_fixes_width() {
        let dims = compute_frame_dimensions(800.0, 600.0);
        assert_eq!(dims, FrameDimensions { width: 1.0, height: 0.75 });
    }

    #[test]
    fn portrait_image_fixes_height() {
        let dims = compute_frame_dimensions(600.0, 800.0);
        assert_eq!(dims, FrameDimensions { width: 0.75, height: 1.0 });
    }

    #[test]
    fn square_image_is_unit() {
        let dims = compute_frame_dimensions(500.0, 500.0);
        assert_eq!(dims, FrameDimensions { width: 1.0, height: 1.0 });
    }

    #[test]
    fn one_side_is_unit_and_other_is_ratio() {
        let sizes = [
            (1.0, 1.0),
            (1.0, 4096.0),
            (1920.0, 1080.0),
            (333.0, 777.0),
            (0.5, 0.25),
            (12345.0, 12344.0),
        ];

        for (w, h) in sizes {
            let dims = compute_frame_dimensions(w, h);
            let ratio = f32::min(w, h) / f32::max(w, h);
            let (unit, other) = if dims.width == 1.0 {
                (dims.width, dims.height)
            } else {
                (dims.height, dims.width)
            };

            assert_eq!(unit, 1.0, "{w}x{h}");
            assert_eq!(other, ratio, "{w}x{h}");
            assert!(other > 0.0 && other <= 1.0, "{w}x{h}");
        }
    }

    #[test]
    fn bounding_box_includes_both_borders() {
        let layout = FrameLayout::from_pixels(800, 600, 0.05);

        assert!(approx(layout.bounding_box.width, 1.1));
        assert!(approx(layout.bounding_box.height, 0.85));
        assert_eq!(layout.dimensions.height, 0.75);
    }
}
