//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::{Color, QrPayload, QrStyle};
use image::{DynamicImage, GrayImage, Luma};

/// Light padding added around styled images before detection, in pixels
const DETECTION_MARGIN: u32 = 32;

/// QR code decoder
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode a QR code from an image using plain luminance
    pub fn decode(&self, img: &DynamicImage) -> Result<QrPayload> {
        let gray = img.to_luma8();
        self.decode_gray(gray)
    }

    /// Decode an image rendered with `style`.
    ///
    /// Each pixel is snapped to the nearest style color and then painted black
    /// or white, so low-contrast finder colors still detect.
    pub fn decode_with_style(&self, img: &DynamicImage, style: &QrStyle) -> Result<QrPayload> {
        let palette = style.palette();
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();

        let mut gray = GrayImage::from_pixel(
            w + 2 * DETECTION_MARGIN,
            h + 2 * DETECTION_MARGIN,
            Luma([u8::MAX]),
        );

        for (x, y, px) in rgba.enumerate_pixels() {
            let color = Color::from(*px);
            let dark = palette
                .iter()
                .min_by_key(|(candidate, _)| candidate.distance_sq(&color))
                .map(|(_, dark)| *dark)
                .unwrap_or(false);
            if dark {
                gray.put_pixel(x + DETECTION_MARGIN, y + DETECTION_MARGIN, Luma([0]));
            }
        }

        self.decode_gray(gray)
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img);

        let grids = prepared.detect_grids();

        // Take the first detected QR code
        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );

                Ok(QrPayload::from_bytes(content.into_bytes()))
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}
