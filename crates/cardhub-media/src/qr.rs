//! QR code PNG generation for public profile URLs.

use std::io::Cursor;

use bytes::Bytes;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};

use cardhub_core::error::{AppError, ErrorKind};
use cardhub_core::result::AppResult;

/// Modules of quiet zone on each side of the symbol.
const QUIET_ZONE_MODULES: u32 = 4;

/// Render `data` as a grayscale PNG QR code of roughly `size_px` pixels.
///
/// The module scale is the largest integer that keeps the symbol plus
/// quiet zone within `size_px`, with a floor of one pixel per module,
/// so the output dimension is always a whole multiple of the module
/// count.
pub fn render_qr_png(data: &str, size_px: u32) -> AppResult<Bytes> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "QR encoding failed", e))?;

    let modules = code.width() as u32;
    let total_modules = modules + 2 * QUIET_ZONE_MODULES;
    let scale = (size_px / total_modules).max(1);
    let dimension = total_modules * scale;

    let colors = code.to_colors();
    let mut image = GrayImage::from_pixel(dimension, dimension, Luma([255u8]));
    for (index, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let module_x = (index as u32 % modules + QUIET_ZONE_MODULES) * scale;
        let module_y = (index as u32 / modules + QUIET_ZONE_MODULES) * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                image.put_pixel(module_x + dx, module_y + dy, Luma([0u8]));
            }
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "QR PNG encoding failed", e))?;
    Ok(Bytes::from(buffer.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn output_is_png() {
        let png = render_qr_png("https://cards.example.com/p/jane-doe", 512).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn tiny_target_still_renders() {
        // Requested size smaller than the symbol; scale floors at 1.
        let png = render_qr_png("https://cards.example.com/p/x", 8).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn same_input_is_deterministic() {
        let a = render_qr_png("https://cards.example.com/p/jane-doe", 256).unwrap();
        let b = render_qr_png("https://cards.example.com/p/jane-doe", 256).unwrap();
        assert_eq!(a, b);
    }
}
