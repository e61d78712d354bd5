//! Writing generated images to disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::constants::IMAGE_FILENAME_PREFIX;
use crate::error::DreamError;
use crate::progress::{Stage, report};

/// `dream_free_YYYYMMDD_HHMMSS_xxxxxxxx.png`
pub fn image_filename<Tz: TimeZone>(timestamp: &DateTime<Tz>, unique_id: u32) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{IMAGE_FILENAME_PREFIX}{}_{unique_id:08x}.png",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Saves the image as a PNG under `output_dir`, creating it if needed, and
/// returns the absolute path.
pub fn save_image(image: &DynamicImage, output_dir: &Path) -> Result<PathBuf, DreamError> {
    fs::create_dir_all(output_dir).map_err(|err| {
        DreamError::Save(format!("Failed to create {}: {err}", output_dir.display()))
    })?;

    let filename = image_filename(&Local::now(), rand::random::<u32>());
    let path = output_dir.join(filename);
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|err| DreamError::Save(format!("Failed to write {}: {err}", path.display())))?;
    report(Stage::Saved, format!("Image saved to {}", path.display()));

    let absolute = path.canonicalize().map_err(|err| {
        DreamError::Save(format!("Failed to resolve {}: {err}", path.display()))
    })?;
    debug!("Absolute image path: {}", absolute.display());
    Ok(absolute)
}
