//! Fixed crop-resize of cover art to Steam's grid dimensions.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::GridError;

pub const GRID_WIDTH: u32 = 920;
pub const GRID_HEIGHT: u32 = 430;

/// Reads a cover image and writes it cropped-and-resized as a grid image.
pub fn cover_to_grid(input: &Path, output: &Path) -> Result<(), GridError> {
    let img = image::open(input)?;
    let grid = resize_cover(&img, GRID_WIDTH, GRID_HEIGHT);
    grid.save(output)?;
    Ok(())
}

/// Scales the image until it fully covers `width` x `height`, then
/// center-crops to exactly that size.
fn resize_cover(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (iw, ih) = img.dimensions();
    let scale = f64::max(width as f64 / iw as f64, height as f64 / ih as f64);
    let sw = (iw as f64 * scale).ceil() as u32;
    let sh = (ih as f64 * scale).ceil() as u32;

    let resized = img.resize_exact(sw, sh, FilterType::Lanczos3);
    let x = (sw - width) / 2;
    let y = (sh - height) / 2;
    resized.crop_imm(x, y, width, height)
}
