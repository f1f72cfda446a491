//! kikiqr - styled QR code generator for Kiki's Connect
//!
//! Encodes a URL into a QR symbol, paints it with a custom palette (finder
//! patterns in their own colors) and writes the result as an image file.
//!
//! # Example
//!
//! ```no_run
//! use kikiqr::{GeneratorConfig, generate};
//!
//! fn main() -> anyhow::Result<()> {
//!     // Defaults: https://kikisconnect.vercel.app/ -> kiki_ghibli_qr.png
//!     let report = generate(&GeneratorConfig::default())?;
//!     println!("wrote {}x{} px", report.width, report.height);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod qr;

// Re-exports for convenience
pub use config::{
    DEFAULT_OUTPUT, DEFAULT_URL, GeneratorConfig, LogRotation, LoggingOptions, OutputOptions,
    PayloadOptions,
};
pub use error::{Error, Result};
pub use output::{GenerationReport, Verification, save_image};
pub use qr::{Color, EncodeOptions, ErrorCorrection, QrDecoder, QrEncoder, QrPayload, QrStyle};

use std::path::Path;

/// Encode, render and save according to `config`.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
    config.style.validate()?;

    let payload = QrPayload::from_string(config.payload.url.clone());
    let symbol = QrEncoder::with_options(config.payload.encoding).encode(&payload)?;
    let image = qr::render(&symbol, &config.style)?;

    let path = config.output.path.as_path();
    save_image(&image, path)?;

    let verification = if config.output.verify {
        verify_file(path, &config.style, &config.payload.url)?;
        Verification::Passed
    } else {
        Verification::Skipped
    };

    Ok(GenerationReport {
        path: path.to_path_buf(),
        payload: config.payload.url.clone(),
        version: symbol.version(),
        error_correction: symbol.ec_level(),
        modules: symbol.width(),
        width: image.width(),
        height: image.height(),
        verification,
    })
}

/// Decode the image at `path` and check it carries `expected`.
pub fn verify_file(path: &Path, style: &QrStyle, expected: &str) -> Result<()> {
    let image = image::open(path)?;
    let decoded = QrDecoder::new().decode_with_style(&image, style)?;
    if decoded.as_bytes() != expected.as_bytes() {
        return Err(Error::VerificationMismatch {
            expected: expected.to_string(),
            actual: String::from_utf8_lossy(decoded.as_bytes()).into_owned(),
        });
    }

    tracing::info!(path = %path.display(), "Verified QR image");
    Ok(())
}
