//! QR code encoding, styled rendering and decoding
//!
//! Encoding is delegated to `qrcode`, rasterization to `image`, and the
//! read-back used for verification to `rqrr`.

mod color;
mod decoder;
mod encoder;
mod render;
mod style;

pub use color::Color;
pub use decoder::QrDecoder;
pub use encoder::{EncodeOptions, ErrorCorrection, QrEncoder, QrSymbol};
pub use render::render;
pub use style::{
    DEFAULT_BORDER, DEFAULT_DARK, DEFAULT_FINDER_DARK, DEFAULT_FINDER_LIGHT, DEFAULT_LIGHT,
    DEFAULT_SCALE, MAX_IMAGE_SIDE, ModuleKind, QrStyle,
};

use serde::{Deserialize, Serialize};

/// Raw data carried by a QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The raw data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Create a new QR payload from a string
    pub fn from_string(s: String) -> Self {
        Self {
            data: s.as_bytes().to_vec(),
            text: Some(s),
        }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
