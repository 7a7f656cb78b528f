//! Error types for the MUGI library.

use std::fmt;

/// Errors produced by the MUGI library.
///
/// The keystream generator itself is total once constructed; every variant
/// here comes from building or splitting a [`BitWord`](crate::BitWord), or
/// from the BMP payload adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MugiError {
    /// A word could not be built from the supplied source.
    Construction(String),
    /// Word width is not divisible into the requested number of parts.
    Partition {
        /// Width of the word being split.
        width: usize,
        /// Requested number of parts.
        parts: usize,
    },
    /// Image is shorter than the fixed BMP header.
    TruncatedImage {
        /// Number of bytes actually available.
        len: usize,
    },
}

impl fmt::Display for MugiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MugiError::Construction(reason) => {
                write!(f, "Cannot build word: {}", reason)
            }
            MugiError::Partition { width, parts } => {
                write!(
                    f,
                    "Cannot split a {}-bit word into {} equal parts",
                    width, parts
                )
            }
            MugiError::TruncatedImage { len } => {
                write!(
                    f,
                    "Image has {} bytes, shorter than the {}-byte BMP header",
                    len,
                    crate::image::BMP_HEADER_LEN
                )
            }
        }
    }
}

impl std::error::Error for MugiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_construction() {
        let err = MugiError::Construction("width must be at least 1".to_string());
        assert_eq!(
            format!("{}", err),
            "Cannot build word: width must be at least 1"
        );
    }

    #[test]
    fn test_display_partition() {
        let err = MugiError::Partition {
            width: 10,
            parts: 3,
        };
        assert_eq!(
            format!("{}", err),
            "Cannot split a 10-bit word into 3 equal parts"
        );
    }

    #[test]
    fn test_display_truncated_image() {
        let err = MugiError::TruncatedImage { len: 12 };
        assert_eq!(
            format!("{}", err),
            "Image has 12 bytes, shorter than the 54-byte BMP header"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            MugiError::TruncatedImage { len: 3 },
            MugiError::TruncatedImage { len: 3 }
        );
        assert_ne!(
            MugiError::TruncatedImage { len: 3 },
            MugiError::Partition { width: 3, parts: 2 }
        );
    }

    #[test]
    fn test_error_clone() {
        let err = MugiError::Partition { width: 7, parts: 2 };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
