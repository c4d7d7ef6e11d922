use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{FrameSceneError, Result};

/// Minification filter applied when the texture is sampled smaller than its
/// native resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFilter {
    Nearest,
    Linear,
    #[default]
    LinearMipmapLinear,
}

/// Decoded picture ready to be mapped onto a material.
///
/// Pixel data is shared, so cloning a texture into several materials is cheap.
#[derive(Debug, Clone, Serialize)]
pub struct Texture {
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    pub min_filter: TextureFilter,
    #[serde(skip)]
    rgba8: Arc<Vec<u8>>,
}

impl Texture {
    /// Builds a texture from raw RGBA8 pixels. Returns `None` when the buffer
    /// does not match the dimensions or either dimension is zero.
    pub fn from_rgba8(
        source: impl Into<PathBuf>,
        width: u32,
        height: u32,
        rgba8: Vec<u8>,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if rgba8.len() != expected {
            return None;
        }

        Some(Self {
            source: source.into(),
            width,
            height,
            min_filter: TextureFilter::default(),
            rgba8: Arc::new(rgba8),
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba8
    }
}

/// Reads and decodes the picture at `path`.
pub fn load_texture(path: impl AsRef<Path>) -> Result<Texture> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading picture");
    let bytes = fs::read(path)?;
    load_texture_from_bytes(path, &bytes)
}

/// Decodes an in-memory PNG or JPEG. `source` is only used for diagnostics.
pub fn load_texture_from_bytes(source: impl AsRef<Path>, bytes: &[u8]) -> Result<Texture> {
    let source = source.as_ref();
    let decoded = image::load_from_memory(bytes).map_err(|err| FrameSceneError::ImageDecode {
        path: source.to_path_buf(),
        source: err,
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let texture = Texture::from_rgba8(source, width, height, rgba.into_raw()).ok_or_else(|| {
        FrameSceneError::EmptyImage {
            path: source.to_path_buf(),
        }
    })?;

    tracing::info!(
        path = %source.display(),
        width,
        height,
        "picture loaded"
    );
    Ok(texture)
}
