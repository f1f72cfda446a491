//! Persisting rendered images and reporting what was written

use crate::error::Result;
use crate::qr::ErrorCorrection;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Write `image` to `path`, replacing any existing file.
///
/// The format follows the file extension and falls back to PNG when the
/// extension is missing or unknown to `image`.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    image.save_with_format(path, format)?;
    tracing::info!(path = %path.display(), ?format, "Wrote QR image");
    Ok(())
}

/// Outcome of reading the written image back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verification {
    /// Read-back was not requested
    Skipped,
    /// The image decodes to the original payload
    Passed,
}

/// Summary of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Where the image was written
    pub path: PathBuf,
    /// Text that was encoded
    pub payload: String,
    /// QR version of the symbol
    pub version: i16,
    /// Error correction level actually used
    pub error_correction: ErrorCorrection,
    /// Symbol side length in modules, quiet zone excluded
    pub modules: usize,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Read-back outcome
    pub verification: Verification,
}

impl GenerationReport {
    /// Human-readable lines for terminal presentation
    pub fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("✓ QR code saved to {}", self.path.display()),
            format!("  Content: {}", self.payload),
            format!(
                "  Version: {} ({}x{} modules, ECC {})",
                self.version, self.modules, self.modules, self.error_correction
            ),
            format!("  Image: {}x{} px", self.width, self.height),
        ];
        if self.verification == Verification::Passed {
            lines.push("  Verified: decodes back to the payload".to_string());
        }
        lines
    }
}
