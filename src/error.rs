use std::fmt::Display;

use image::ImageError;
use ndarray::ShapeError;
use ndarray_npy::{ReadNpyError, WriteNpyError, WriteNpzError};

#[derive(Debug)]
pub enum Error {
    UnsupportedFileExtension(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToCreateOutputDirectory(String, std::io::Error),
    UnableToDecodeImage(String, ImageError),
    MismatchOfSizeBetweenShapeAndValues(ShapeError),
    FailedToReadFile(String, std::io::Error),
    FailedToWriteFile(String, std::io::Error),
    FailedToWriteNpy(String, WriteNpyError),
    FailedToWriteNpz(String, WriteNpzError),
    FailedToWriteJson(String, serde_json::Error),
    FailedToWriteCsv(String, csv::Error),
    FailedToReadNpy(String, ReadNpyError),
    UnsupportedNpyElementType(String),
    MalformedJson(String, serde_json::Error),
    RaggedArray(String),
    NonNumericValue(String, String),
    FailedToReadDelimitedText(String, csv::Error),
    MalformedDelimitedText(String, u64, String),
    ArrayTooLargeToRender(Vec<usize>),
    FailedToSaveRendering(String, ImageError),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFileExtension(path) => {
                write!(
                    f,
                    "Unsupported file type '{}'. Expected one of .json, .npy, .txt or .csv",
                    path
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToCreateOutputDirectory(path, error) => {
                write!(
                    f,
                    "Unable to create output directory '{}': {}",
                    path, error
                )
            }
            Self::UnableToDecodeImage(path, error) => {
                write!(f, "Unable to decode image '{}': {}", path, error)
            }
            Self::MismatchOfSizeBetweenShapeAndValues(error) => {
                write!(
                    f,
                    "Number of values does not match the array shape: {}",
                    error
                )
            }
            Self::FailedToReadFile(path, error) => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            Self::FailedToWriteFile(path, error) => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            Self::FailedToWriteNpy(path, error) => {
                write!(f, "Failed to write NumPy array '{}': {}", path, error)
            }
            Self::FailedToWriteNpz(path, error) => {
                write!(f, "Failed to write NumPy archive '{}': {}", path, error)
            }
            Self::FailedToWriteJson(path, error) => {
                write!(f, "Failed to write JSON '{}': {}", path, error)
            }
            Self::FailedToWriteCsv(path, error) => {
                write!(f, "Failed to write CSV '{}': {}", path, error)
            }
            Self::FailedToReadNpy(path, error) => {
                write!(f, "Failed to read NumPy array '{}': {}", path, error)
            }
            Self::UnsupportedNpyElementType(path) => {
                write!(
                    f,
                    "NumPy array '{}' has an element type that cannot be displayed",
                    path
                )
            }
            Self::MalformedJson(path, error) => {
                write!(f, "Malformed JSON in '{}': {}", path, error)
            }
            Self::RaggedArray(path) => {
                write!(
                    f,
                    "Nested arrays in '{}' do not have a rectangular shape",
                    path
                )
            }
            Self::NonNumericValue(path, value) => {
                write!(f, "Value '{}' in '{}' is not a number", value, path)
            }
            Self::FailedToReadDelimitedText(path, error) => {
                write!(f, "Failed to read delimited text '{}': {}", path, error)
            }
            Self::MalformedDelimitedText(path, line, reason) => {
                write!(f, "Malformed line {} in '{}': {}", line, path, reason)
            }
            Self::ArrayTooLargeToRender(shape) => {
                write!(f, "Array of shape {:?} is too large to render", shape)
            }
            Self::FailedToSaveRendering(path, error) => {
                write!(f, "Failed to save rendered image '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {}
