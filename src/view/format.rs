use std::fmt::Display;
use std::path::Path;

use crate::{path_string, Error, Result};

/// Serialized array encodings the viewer can decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayFormat {
    /// Nested JSON arrays of numbers.
    Json,
    /// NumPy single-array binary.
    Npy,
    /// Strict comma-delimited numeric matrix.
    Text,
    /// Lenient comma-delimited numeric matrix, unparseable fields become NaN.
    Csv,
}

impl ArrayFormat {
    /// Resolves the format from the file extension alone, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("npy") => Ok(Self::Npy),
            Some("txt") => Ok(Self::Text),
            Some("csv") => Ok(Self::Csv),
            _ => Err(Error::UnsupportedFileExtension(path_string(path))),
        }
    }
}

impl Display for ArrayFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Npy => write!(f, "NumPy"),
            Self::Text => write!(f, "delimited text"),
            Self::Csv => write!(f, "CSV"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::ArrayFormat;
    use crate::Error;

    #[test]
    fn resolve_known_extensions() {
        let cases = [
            ("data.json", ArrayFormat::Json),
            ("data.npy", ArrayFormat::Npy),
            ("data.txt", ArrayFormat::Text),
            ("data.csv", ArrayFormat::Csv),
            ("DATA.NPY", ArrayFormat::Npy),
        ];
        for (file_name, expected) in cases {
            let actual = ArrayFormat::from_path(Path::new(file_name)).unwrap();
            assert_eq!(actual, expected, "wrong format for {}", file_name);
        }
    }

    #[test]
    fn reject_unknown_extension() {
        for file_name in ["image.png", "pixels.csv.gz", "archive.npz", "no_extension"] {
            match ArrayFormat::from_path(Path::new(file_name)) {
                Err(Error::UnsupportedFileExtension(path)) => assert_eq!(path, file_name),
                other => panic!("{} was not rejected: {:?}", file_name, other),
            }
        }
    }
}
