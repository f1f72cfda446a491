//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::{ModuleKind, QrPayload};
use qrcode::{EcLevel, QrCode, Version};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side length of a finder pattern in modules
const FINDER_SIZE: usize = 7;

/// Error correction level, mirrored from `qrcode` so it can live in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorCorrection {
    /// ~7% recovery
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl ErrorCorrection {
    /// Levels from strongest to weakest
    const STRONGEST_FIRST: [ErrorCorrection; 4] = [Self::H, Self::Q, Self::M, Self::L];

    fn to_ec_level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }

    fn from_ec_level(level: EcLevel) -> Self {
        match level {
            EcLevel::L => Self::L,
            EcLevel::M => Self::M,
            EcLevel::Q => Self::Q,
            EcLevel::H => Self::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(label)
    }
}

impl FromStr for ErrorCorrection {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(Error::Config(format!(
                "Unknown error correction level '{other}', expected L, M, Q or H"
            ))),
        }
    }
}

/// Options controlling symbol construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Minimum error correction level
    pub error_correction: ErrorCorrection,
    /// Raise the level as far as possible without growing the symbol
    pub boost_error: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::M,
            boost_error: true,
        }
    }
}

/// An encoded QR symbol ready for rendering
pub struct QrSymbol {
    code: QrCode,
}

impl QrSymbol {
    /// Width (and height) in modules, quiet zone excluded
    pub fn width(&self) -> usize {
        self.code.width()
    }

    /// Symbol version, 1 through 40
    pub fn version(&self) -> i16 {
        match self.code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        }
    }

    /// Error correction level the symbol was built with
    pub fn ec_level(&self) -> ErrorCorrection {
        ErrorCorrection::from_ec_level(self.code.error_correction_level())
    }

    /// Whether the module at column `x`, row `y` is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.code[(x, y)] == qrcode::Color::Dark
    }

    /// Classify the module at column `x`, row `y`
    pub fn module_kind(&self, x: usize, y: usize) -> ModuleKind {
        let width = self.width();
        if x >= width || y >= width {
            return ModuleKind::QuietZone;
        }

        let near_start = |v: usize| v < FINDER_SIZE;
        let near_end = |v: usize| v >= width - FINDER_SIZE;

        if (near_start(x) && near_start(y))
            || (near_end(x) && near_start(y))
            || (near_start(x) && near_end(y))
        {
            ModuleKind::Finder
        } else {
            ModuleKind::Data
        }
    }
}

/// QR code encoder
pub struct QrEncoder {
    options: EncodeOptions,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC, boosted)
    pub fn new() -> Self {
        Self {
            options: EncodeOptions::default(),
        }
    }

    /// Create a new QR encoder with explicit options
    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Encode a payload into the smallest symbol at the configured level
    pub fn encode(&self, payload: &QrPayload) -> Result<QrSymbol> {
        let requested = self.options.error_correction;
        let code = QrCode::with_error_correction_level(&payload.data, requested.to_ec_level())
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;

        let code = if self.options.boost_error {
            self.boost(&payload.data, code)
        } else {
            code
        };

        let symbol = QrSymbol { code };
        tracing::debug!(
            version = symbol.version(),
            ecc = %symbol.ec_level(),
            requested = %requested,
            bytes = payload.data.len(),
            "Encoded QR symbol",
        );
        Ok(symbol)
    }

    /// Encode a string into a QR symbol
    pub fn encode_str(&self, data: &str) -> Result<QrSymbol> {
        let payload = QrPayload::from_string(data.to_string());
        self.encode(&payload)
    }

    fn boost(&self, data: &[u8], baseline: QrCode) -> QrCode {
        let version = baseline.version();
        let requested = self.options.error_correction;

        for level in ErrorCorrection::STRONGEST_FIRST {
            if level == requested {
                break;
            }
            match QrCode::with_error_correction_level(data, level.to_ec_level()) {
                Ok(code) if code.version() == version => return code,
                _ => continue,
            }
        }

        baseline
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}
