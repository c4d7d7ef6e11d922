use serde::{Deserialize, Serialize};

use crate::{camera::PerspectiveCamera, render::Renderer};

/// Output surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `None` when either side is zero.
    pub fn aspect(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}

/// Keeps renderer output and camera projection in step with the viewport.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewportController;

impl ViewportController {
    /// Applies a resize. Zero-sized viewports (minimised windows) are ignored
    /// and `false` is returned.
    pub fn resize(
        camera: &mut PerspectiveCamera,
        renderer: &mut dyn Renderer,
        viewport: Viewport,
    ) -> bool {
        let Some(aspect) = viewport.aspect() else {
            tracing::warn!(
                width = viewport.width,
                height = viewport.height,
                "ignoring resize to an empty viewport"
            );
            return false;
        };

        renderer.set_size(viewport.width, viewport.height);
        camera.aspect = aspect;
        camera.update_projection();
        tracing::debug!(width = viewport.width, height = viewport.height, aspect, "viewport resized");
        true
    }
}
