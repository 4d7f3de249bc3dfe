use image::{
    imageops::{self, FilterType},
    Rgb, RgbImage,
};
use ndarray::{ArrayViewD, Ix2, Ix3};

use super::array::{format_shape, DisplayElement, LoadedArray};
use crate::{Error, Result};

pub const DEFAULT_CANVAS_SIZE: u32 = 800;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Result of dispatching a loaded array on its shape.
#[derive(Debug)]
pub enum Rendering {
    /// Square canvas with the array drawn centred, without axes.
    Image(RgbImage),
    /// Neither (height, width) nor (height, width, 3); nothing is drawn.
    UnexpectedShape(Vec<usize>),
}

/// Draws `array` at its native resolution, one pixel per element.
///
/// Rank 2 arrays are drawn in grayscale on a fixed [0, 255] intensity range,
/// clipping values outside of it. Rank 3 arrays with three channels are cast
/// to bytes without clipping. `Ok(None)` for any other shape.
pub fn render_picture(array: &LoadedArray) -> Result<Option<RgbImage>> {
    match array {
        LoadedArray::UInt8(array) => picture_from(array.view()),
        LoadedArray::Int64(array) => picture_from(array.view()),
        LoadedArray::Float32(array) => picture_from(array.view()),
        LoadedArray::Float64(array) => picture_from(array.view()),
    }
}

pub fn render_array(array: &LoadedArray, canvas_size: u32) -> Result<Rendering> {
    match render_picture(array)? {
        Some(picture) => Ok(Rendering::Image(fit_to_canvas(&picture, canvas_size))),
        None => {
            log::warn!("Unexpected data shape: {}", format_shape(array.shape()));
            Ok(Rendering::UnexpectedShape(array.shape().to_vec()))
        }
    }
}

fn picture_from<T: DisplayElement>(array: ArrayViewD<'_, T>) -> Result<Option<RgbImage>> {
    let shape = array.shape().to_vec();
    match shape.as_slice() {
        [height, width] => {
            let mut picture = blank_picture(&shape, *width, *height)?;
            let gray = array
                .into_dimensionality::<Ix2>()
                .map_err(Error::MismatchOfSizeBetweenShapeAndValues)?;
            for ((y, x), &value) in gray.indexed_iter() {
                if let Some(level) = value.gray_level() {
                    picture.put_pixel(x as u32, y as u32, Rgb([level, level, level]));
                }
            }
            Ok(Some(picture))
        }
        [height, width, 3] => {
            let mut picture = blank_picture(&shape, *width, *height)?;
            let rgb = array
                .into_dimensionality::<Ix3>()
                .map_err(Error::MismatchOfSizeBetweenShapeAndValues)?;
            for (y, row) in rgb.outer_iter().enumerate() {
                for (x, pixel) in row.outer_iter().enumerate() {
                    let color = Rgb([
                        pixel[0].cast_to_byte(),
                        pixel[1].cast_to_byte(),
                        pixel[2].cast_to_byte(),
                    ]);
                    picture.put_pixel(x as u32, y as u32, color);
                }
            }
            Ok(Some(picture))
        }
        _ => Ok(None),
    }
}

fn blank_picture(shape: &[usize], width: usize, height: usize) -> Result<RgbImage> {
    let too_large = || Error::ArrayTooLargeToRender(shape.to_vec());
    let width = u32::try_from(width).map_err(|_| too_large())?;
    let height = u32::try_from(height).map_err(|_| too_large())?;
    Ok(RgbImage::from_pixel(width, height, BACKGROUND))
}

/// Scales `picture` with nearest-neighbour sampling to fit a square canvas,
/// keeping its aspect ratio, and centres it.
fn fit_to_canvas(picture: &RgbImage, canvas_size: u32) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(canvas_size, canvas_size, BACKGROUND);
    let (width, height) = picture.dimensions();
    if width == 0 || height == 0 || canvas_size == 0 {
        return canvas;
    }
    let scale = f64::from(canvas_size) / f64::from(width.max(height));
    let scaled_width = scaled_length(width, scale, canvas_size);
    let scaled_height = scaled_length(height, scale, canvas_size);
    let scaled = imageops::resize(picture, scaled_width, scaled_height, FilterType::Nearest);
    let left = (canvas_size - scaled_width) / 2;
    let top = (canvas_size - scaled_height) / 2;
    imageops::overlay(&mut canvas, &scaled, i64::from(left), i64::from(top));
    canvas
}

fn scaled_length(length: u32, scale: f64, canvas_size: u32) -> u32 {
    ((f64::from(length) * scale).round() as u32).clamp(1, canvas_size)
}
