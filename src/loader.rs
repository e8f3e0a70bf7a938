use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::warn;

/// Decode an image file, rejecting anything the converter cannot sample.
pub fn load(path: &Path) -> Result<image::RgbaImage> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    load_bytes(&bytes).with_context(|| format!("Failed to load {}", path.display()))
}

/// Decode image bytes already held in memory. The format is sniffed from the
/// data, not taken from a file extension.
pub fn load_bytes(bytes: &[u8]) -> Result<image::RgbaImage> {
    let rgba = image::load_from_memory(bytes)
        .context("Failed to decode image data")?
        .to_rgba8();
    check_dimensions(&rgba)?;
    Ok(rgba)
}

/// Load `path`, or `fallback` when `path` cannot be used. Returns the image
/// with the path it actually came from.
pub fn load_or_fallback(
    path: &Path,
    fallback: Option<&Path>,
) -> Result<(image::RgbaImage, PathBuf)> {
    match (load(path), fallback) {
        (Ok(image), _) => Ok((image, path.to_path_buf())),
        (Err(e), Some(fallback)) if fallback != path => {
            warn!("{e:#}; using {} instead", fallback.display());
            let image = load(fallback)?;
            Ok((image, fallback.to_path_buf()))
        }
        (Err(e), _) => Err(e),
    }
}

fn check_dimensions(image: &image::RgbaImage) -> Result<()> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        bail!("Image is empty ({w}x{h})");
    }
    Ok(())
}
