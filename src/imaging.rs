//! Decoding what the image service sends back.

use std::io::Cursor;

use image::DynamicImage;
use tracing::debug;

use crate::error::DreamError;

/// Decodes image bytes, the format is guessed from the content.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, DreamError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| {
            debug!("Failed to guess image format: {}", err);
            DreamError::Image(err.to_string())
        })?;
    debug!("Guessed image format: {:?}", reader.format());
    Ok(reader.decode()?)
}
