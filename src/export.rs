use std::path::{Path, PathBuf};

use crate::{create_output_directory, file_stem, logger::log_written_file, Result};

pub mod pixel_table;
pub mod rgb;
mod writer;

pub use writer::{RGB_FLOAT32_KEY, RGB_UINT8_KEY};

const RGB_UINT8_SUFFIX: &str = "_rgb_uint8.npy";
const RGB_FLOAT32_SUFFIX: &str = "_rgb_float32.npy";
const RGB_BOTH_SUFFIX: &str = "_rgb_both.npz";
const RGB_JSON_SUFFIX: &str = "_rgb.json.gz";
const PIXELS_CSV_SUFFIX: &str = "_pixels.csv.gz";
const GRAY_UINT8_SUFFIX: &str = "_gray_uint8.npy";
const GRAY_PIXELS_CSV_SUFFIX: &str = "_gray_pixels.csv.gz";

/// Files produced by one conversion, in the order they were written.
#[derive(Debug)]
pub struct ExportReport {
    output_directory: PathBuf,
    written_files: Vec<PathBuf>,
}

impl ExportReport {
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn written_files(&self) -> &[PathBuf] {
        &self.written_files
    }
}

struct OutputFiles {
    directory: PathBuf,
    base_name: String,
    written: Vec<PathBuf>,
}

impl OutputFiles {
    fn new(directory: &Path, image_path: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            base_name: file_stem(image_path),
            written: Vec::new(),
        }
    }

    fn path(&self, suffix: &str) -> PathBuf {
        self.directory.join(format!("{}{}", self.base_name, suffix))
    }

    fn write<F>(&mut self, suffix: &str, write_file: F) -> Result<()>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let path = self.path(suffix);
        write_file(&path)?;
        log_written_file(&path);
        self.written.push(path);
        Ok(())
    }

    fn into_report(self) -> ExportReport {
        ExportReport {
            output_directory: self.directory,
            written_files: self.written,
        }
    }
}

/// Converts the image at `image_path` into array files inside `output_directory`.
///
/// The directory and its missing parents are created first. Every output file
/// name starts with the image's file stem. A failure aborts the conversion and
/// leaves files written up to that point on disk.
pub fn convert_image_to_arrays(
    image_path: &Path,
    output_directory: &Path,
    grayscale: bool,
) -> Result<ExportReport> {
    create_output_directory(output_directory)?;
    let rgb_image = rgb::load_rgb_image(image_path)?;
    let (height, width, _) = rgb_image.dim();
    log::info!(
        "Converting {} ({}x{} pixels)",
        image_path.display(),
        width,
        height
    );
    let normalized = rgb::normalize(&rgb_image);

    let mut files = OutputFiles::new(output_directory, image_path);
    files.write(RGB_UINT8_SUFFIX, |path| writer::write_npy(path, &rgb_image))?;
    files.write(RGB_FLOAT32_SUFFIX, |path| {
        writer::write_npy(path, &normalized)
    })?;
    files.write(RGB_BOTH_SUFFIX, |path| {
        writer::write_npz(path, &rgb_image, &normalized)
    })?;
    files.write(RGB_JSON_SUFFIX, |path| {
        writer::write_gzipped_json(path, &rgb_image)
    })?;
    files.write(PIXELS_CSV_SUFFIX, |path| {
        writer::write_gzipped_csv(path, pixel_table::rgb_pixel_rows(&rgb_image))
    })?;

    if grayscale {
        let gray = rgb::grayscale(&rgb_image);
        files.write(GRAY_UINT8_SUFFIX, |path| writer::write_npy(path, &gray))?;
        files.write(GRAY_PIXELS_CSV_SUFFIX, |path| {
            writer::write_gzipped_csv(path, pixel_table::gray_pixel_rows(&gray))
        })?;
    }

    log::info!(
        "Conversion done, {} files saved in {}",
        files.written.len(),
        output_directory.display()
    );
    Ok(files.into_report())
}
