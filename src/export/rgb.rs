use std::path::Path;

use image::{io::Reader as ImageReader, DynamicImage, ImageError};
use ndarray::{Array2, Array3};

use crate::{path_string, Error, Result};

pub type RgbArray = Array3<u8>;
pub type NormalizedArray = Array3<f32>;
pub type GrayArray = Array2<u8>;

const MAX_CHANNEL_VALUE: f32 = 255.0;
const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

/// Decodes the image at `path` into a (height, width, 3) byte array.
///
/// The container format is taken from the file content when recognizable and
/// from the extension otherwise. Palette, grayscale, alpha and 16 bit sources
/// are all converted to 8 bit RGB; alpha is dropped.
pub fn load_rgb_image(path: &Path) -> Result<RgbArray> {
    let image = ImageReader::open(path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_string(path), e))?
        .with_guessed_format()
        .map_err(|e| Error::FailedToReadFile(path_string(path), e))?
        .decode()
        .map_err(|e| match e {
            ImageError::IoError(e) => Error::FailedToReadFile(path_string(path), e),
            e => Error::UnableToDecodeImage(path_string(path), e),
        })?;
    rgb_array_from_image(image)
}

pub fn rgb_array_from_image(image: DynamicImage) -> Result<RgbArray> {
    let rgb = image.into_rgb8();
    let (width, height) = rgb.dimensions();
    Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())
        .map_err(Error::MismatchOfSizeBetweenShapeAndValues)
}

pub fn normalize(rgb: &RgbArray) -> NormalizedArray {
    rgb.mapv(|value| f32::from(value) / MAX_CHANNEL_VALUE)
}

pub fn grayscale(rgb: &RgbArray) -> GrayArray {
    let (height, width, _) = rgb.dim();
    Array2::from_shape_fn((height, width), |(y, x)| {
        luminance(rgb[[y, x, 0]], rgb[[y, x, 1]], rgb[[y, x, 2]])
    })
}

/// ITU-R BT.601 luma, rounded half to even.
pub fn luminance(red: u8, green: u8, blue: u8) -> u8 {
    let luma = RED_WEIGHT * f64::from(red)
        + GREEN_WEIGHT * f64::from(green)
        + BLUE_WEIGHT * f64::from(blue);
    luma.round_ties_even().clamp(0.0, 255.0) as u8
}
