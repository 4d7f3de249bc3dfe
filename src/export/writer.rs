use std::{
    io::{BufWriter, Write},
    path::Path,
};

use flate2::{write::GzEncoder, Compression};
use ndarray::{ArrayBase, ArrayView2, Data, Dimension};
use ndarray_npy::{NpzWriter, WritableElement, WriteNpyExt};
use serde::{Serialize, Serializer};

use super::rgb::{NormalizedArray, RgbArray};
use crate::{open_output_file, path_string, Error, Result};

pub const RGB_UINT8_KEY: &str = "rgb_uint8.npy";
pub const RGB_FLOAT32_KEY: &str = "rgb_float32.npy";

pub fn write_npy<S, D>(path: &Path, array: &ArrayBase<S, D>) -> Result<()>
where
    S: Data,
    S::Elem: WritableElement,
    D: Dimension,
{
    let mut writer = BufWriter::new(open_output_file(path)?);
    array
        .write_npy(&mut writer)
        .map_err(|e| Error::FailedToWriteNpy(path_string(path), e))?;
    writer
        .flush()
        .map_err(|e| Error::FailedToWriteFile(path_string(path), e))
}

pub fn write_npz(path: &Path, rgb: &RgbArray, normalized: &NormalizedArray) -> Result<()> {
    let to_error = |e| Error::FailedToWriteNpz(path_string(path), e);
    let mut npz = NpzWriter::new_compressed(open_output_file(path)?);
    npz.add_array(RGB_UINT8_KEY, rgb).map_err(to_error)?;
    npz.add_array(RGB_FLOAT32_KEY, normalized)
        .map_err(to_error)?;
    npz.finish().map_err(to_error)?;
    Ok(())
}

/// Compact JSON: rows of pixels of `[r, g, b]`.
pub fn write_gzipped_json(path: &Path, rgb: &RgbArray) -> Result<()> {
    let mut encoder = create_gzip_encoder(path)?;
    serde_json::to_writer(&mut encoder, &JsonRows(rgb))
        .map_err(|e| Error::FailedToWriteJson(path_string(path), e))?;
    finish_gzip_encoder(path, encoder)
}

pub fn write_gzipped_csv<R, I>(path: &Path, rows: I) -> Result<()>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let to_error = |e| Error::FailedToWriteCsv(path_string(path), e);
    let mut writer = csv::Writer::from_writer(create_gzip_encoder(path)?);
    for row in rows {
        writer.serialize(row).map_err(to_error)?;
    }
    let encoder = writer
        .into_inner()
        .map_err(|e| Error::FailedToWriteFile(path_string(path), e.into_error()))?;
    finish_gzip_encoder(path, encoder)
}

fn create_gzip_encoder(path: &Path) -> Result<GzEncoder<BufWriter<std::fs::File>>> {
    let file = open_output_file(path)?;
    Ok(GzEncoder::new(BufWriter::new(file), Compression::default()))
}

fn finish_gzip_encoder(path: &Path, encoder: GzEncoder<BufWriter<std::fs::File>>) -> Result<()> {
    let to_error = |e| Error::FailedToWriteFile(path_string(path), e);
    encoder.finish().map_err(to_error)?.flush().map_err(to_error)
}

struct JsonRows<'a>(&'a RgbArray);

struct JsonRow<'a>(ArrayView2<'a, u8>);

impl Serialize for JsonRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.outer_iter().map(JsonRow))
    }
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.0
                .outer_iter()
                .map(|pixel| [pixel[0], pixel[1], pixel[2]]),
        )
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::JsonRows;

    #[test]
    fn json_is_compact_nested_pixels() {
        let rgb = array![[[1_u8, 2, 3], [4, 5, 6]], [[7, 8, 9], [10, 11, 255]]];
        let json = serde_json::to_string(&JsonRows(&rgb)).unwrap();
        assert_eq!(json, "[[[1,2,3],[4,5,6]],[[7,8,9],[10,11,255]]]");
    }

    #[test]
    fn json_of_single_pixel() {
        let rgb = array![[[0_u8, 128, 255]]];
        let json = serde_json::to_string(&JsonRows(&rgb)).unwrap();
        assert_eq!(json, "[[[0,128,255]]]");
    }
}
