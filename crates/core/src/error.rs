use std::path::PathBuf;

/// Result alias that carries the custom [`FrameSceneError`] type.
pub type Result<T> = std::result::Result<T, FrameSceneError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum FrameSceneError {
    /// Free-form message for failures that do not warrant their own variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The picture could not be decoded. Scene construction must not proceed.
    #[error("failed to decode image `{}`: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The picture decoded to zero width or height.
    #[error("image `{}` has no pixels", path.display())]
    EmptyImage { path: PathBuf },
    /// Malformed configuration document.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),
    /// Well-formed configuration holding values the scene cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Writing a JSON document (trace, layout, configuration dump) failed.
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FrameSceneError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub fn serialize(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Serialize { what, source }
    }
}

impl From<String> for FrameSceneError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_failures_are_not_reported_as_config_errors() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = FrameSceneError::serialize("light trace")(source);

        let text = format!("{err}");
        assert!(text.starts_with("failed to serialize light trace"));
        assert!(!text.contains("invalid configuration"));
    }
}
