//! QR code rendering for ticket validation links.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::config::QR_MODULE_PIXELS;
use crate::error_handling::QrError;

/// Builds the URL a ticket's QR code points to.
pub fn validation_url(base_url: &str, ticket_id: &str) -> String {
    format!("{}/validate/{}", base_url.trim_end_matches('/'), ticket_id)
}

/// Renders `data` as a black-on-white QR code PNG.
///
/// Uses error-correction level L and the smallest version that fits, with
/// `QR_MODULE_PIXELS` pixels per module and the standard 4-module quiet zone.
pub fn generate_qr_png(data: &str) -> Result<Vec<u8>, QrError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(QR_MODULE_PIXELS, QR_MODULE_PIXELS)
        .quiet_zone(true)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .build();

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image).write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}
