use std::path::Path;

use image::RgbImage;

use crate::{path_string, Error, Result};

mod array;
mod format;
mod loader;
mod render;

pub use array::{format_shape, DisplayElement, LoadedArray};
pub use format::ArrayFormat;
pub use loader::load_array;
pub use render::{render_array, render_picture, Rendering, DEFAULT_CANVAS_SIZE};

/// Loads the array file at `path` and renders it onto a square canvas.
pub fn view_array_file(path: &Path, canvas_size: u32) -> Result<Rendering> {
    let array = load_array(path)?;
    render_array(&array, canvas_size)
}

pub fn save_rendering(canvas: &RgbImage, path: &Path) -> Result<()> {
    canvas
        .save(path)
        .map_err(|e| Error::FailedToSaveRendering(path_string(path), e))?;
    log::info!("Saved rendered image to {}", path.display());
    Ok(())
}
