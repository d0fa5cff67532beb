pub type ZoompanResult<T> = Result<T, ZoompanError>;

#[derive(thiserror::Error, Debug)]
pub enum ZoompanError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported pixel format pair: source {src:?}, destination {dst:?}")]
    UnsupportedFormats {
        src: crate::format::PixelFormat,
        dst: crate::format::PixelFormat,
    },

    #[error("frame error: {0}")]
    Frame(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ZoompanError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn frame(msg: impl Into<String>) -> Self {
        Self::Frame(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ZoompanError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ZoompanError::frame("x")
                .to_string()
                .contains("frame error:")
        );
        assert!(
            ZoompanError::UnsupportedFormats {
                src: PixelFormat::I420,
                dst: PixelFormat::Bgra,
            }
            .to_string()
            .contains("unsupported pixel format pair")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ZoompanError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
