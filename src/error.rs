//! Error types for kikiqr operations

use thiserror::Error;

/// Result type alias using kikiqr's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for kikiqr operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed (payload too long, invalid data)
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Color string could not be parsed
    #[error("Invalid color '{0}': expected #RGB, #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    /// Style options out of range
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// Written image does not decode to the expected payload
    #[error("Verification failed: expected {expected:?}, decoded {actual:?}")]
    VerificationMismatch {
        /// Payload the image was generated from
        expected: String,
        /// Payload read back from the image
        actual: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

// Implement From conversions for common error types

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => Error::Io(io),
            other => Error::Image(other.to_string()),
        }
    }
}
