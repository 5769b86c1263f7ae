use base64::Engine;
use image::ImageFormat;
use std::io::Cursor;
use thiserror::Error;

use crate::models::ImagePayload;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not read image '{name}': {reason}")]
    Decode { name: String, reason: String },
    #[error("could not re-encode image '{name}' as PNG: {reason}")]
    Encode { name: String, reason: String },
}

/// Decodes an uploaded PNG/JPEG and re-encodes it as a base64 PNG payload.
pub fn to_png_payload(name: &str, bytes: &[u8]) -> Result<ImagePayload, ImageError> {
    let img = image::load_from_memory(bytes).map_err(|e| ImageError::Decode {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ImageError::Encode {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

    Ok(ImagePayload {
        base64_png: base64::engine::general_purpose::STANDARD.encode(&png),
        width: img.width(),
        height: img.height(),
    })
}

#[cfg(test)]
pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 120]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}
