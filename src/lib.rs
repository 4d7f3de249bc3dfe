use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

pub use cli::{Action, CLIParser, ExportArguments, ViewArguments};
pub use error::Error;
pub use export::{convert_image_to_arrays, ExportReport};
pub use view::{
    format_shape, load_array, render_array, save_rendering, view_array_file, ArrayFormat,
    LoadedArray, Rendering, DEFAULT_CANVAS_SIZE,
};

mod cli;
mod error;
pub mod export;
mod logger;
pub mod view;

pub type Result<T> = std::result::Result<T, error::Error>;

const RENDERED_IMAGE_SUFFIX: &str = "_view.png";
const FALLBACK_FILE_STEM: &str = "image";

/// Outcome of rendering an array file from the command line.
#[derive(Debug, PartialEq)]
pub enum ViewOutcome {
    Rendered(PathBuf),
    UnexpectedShape(Vec<usize>),
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_STEM.to_owned())
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_string(file_path), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path_string(file_path), e))
}

fn create_output_directory(directory: &Path) -> Result<()> {
    fs::create_dir_all(directory)
        .map_err(|e| Error::UnableToCreateOutputDirectory(path_string(directory), e))
}

fn default_rendered_image_path(array_file: &Path) -> PathBuf {
    let file_name = format!("{}{}", file_stem(array_file), RENDERED_IMAGE_SUFFIX);
    array_file.with_file_name(file_name)
}

pub fn export_image(arguments: &ExportArguments) -> Result<ExportReport> {
    convert_image_to_arrays(
        &arguments.image_file,
        &arguments.output_directory,
        arguments.grayscale,
    )
}

pub fn view_array(arguments: &ViewArguments) -> Result<ViewOutcome> {
    match view_array_file(&arguments.array_file, arguments.canvas_size)? {
        Rendering::Image(canvas) => {
            let output_file = arguments
                .output_file
                .clone()
                .unwrap_or_else(|| default_rendered_image_path(&arguments.array_file));
            save_rendering(&canvas, &output_file)?;
            Ok(ViewOutcome::Rendered(output_file))
        }
        Rendering::UnexpectedShape(shape) => Ok(ViewOutcome::UnexpectedShape(shape)),
    }
}
