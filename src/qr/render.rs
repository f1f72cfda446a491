//! Styled rasterization of QR symbols

use crate::error::Result;
use crate::qr::{Color, QrStyle, QrSymbol};
use image::{DynamicImage, ImageBuffer, Pixel};

/// Render a symbol into an image using the given style.
///
/// The result is `(width + 2 * border) * scale` pixels square. It is RGB
/// unless some style color carries transparency.
pub fn render(symbol: &QrSymbol, style: &QrStyle) -> Result<DynamicImage> {
    style.validate()?;
    let size = style.image_size(symbol.width() as u32)?;

    let image = if style.is_opaque() {
        DynamicImage::ImageRgb8(paint(symbol, style, size, |c| c.to_rgb()))
    } else {
        DynamicImage::ImageRgba8(paint(symbol, style, size, |c| c.to_rgba()))
    };

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        modules = symbol.width(),
        "Rendered QR image",
    );
    Ok(image)
}

fn paint<P>(
    symbol: &QrSymbol,
    style: &QrStyle,
    size: u32,
    to_pixel: impl Fn(Color) -> P,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let modules = symbol.width() as u32;
    let border = style.border;
    let scale = style.scale;

    let quiet = to_pixel(style.quiet_zone_color());
    let mut img = ImageBuffer::from_pixel(size, size, quiet);

    for my in 0..modules {
        for mx in 0..modules {
            let (x, y) = (mx as usize, my as usize);
            let kind = symbol.module_kind(x, y);
            let px = to_pixel(style.color_for(kind, symbol.is_dark(x, y)));

            let ox = (mx + border) * scale;
            let oy = (my + border) * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(ox + dx, oy + dy, px);
                }
            }
        }
    }

    img
}
