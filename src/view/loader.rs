use std::{
    io::{BufReader, Read},
    path::Path,
};

use ndarray::{ArrayD, IxDyn};
use ndarray_npy::{ReadNpyError, ReadNpyExt, ReadableElement};
use serde_json::Value;

use super::{array::format_shape, ArrayFormat, LoadedArray};
use crate::{logger::log_array_shape, open_input_file, path_string, Error, Result};

const COMMENT_MARKER: u8 = b'#';

/// Reads the array stored at `path`, choosing the decoder by file extension.
pub fn load_array(path: &Path) -> Result<LoadedArray> {
    let format = ArrayFormat::from_path(path)?;
    log::debug!("Reading {} as {} array", path.display(), format);
    let array = match format {
        ArrayFormat::Json => load_json(path)?,
        ArrayFormat::Npy => load_npy(path)?,
        ArrayFormat::Text => load_delimited(path, FieldParsing::Strict)?,
        ArrayFormat::Csv => load_delimited(path, FieldParsing::Lenient)?,
    };
    log_array_shape(path, array.element_type(), &format_shape(array.shape()));
    Ok(array)
}

fn read_input_file(path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    BufReader::new(open_input_file(path)?)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::FailedToReadFile(path_string(path), e))?;
    Ok(bytes)
}

fn from_shape_vec<T>(shape: Vec<usize>, values: Vec<T>) -> Result<ArrayD<T>> {
    ArrayD::from_shape_vec(IxDyn(&shape), values)
        .map_err(Error::MismatchOfSizeBetweenShapeAndValues)
}

fn load_json(path: &Path) -> Result<LoadedArray> {
    let value: Value = serde_json::from_reader(BufReader::new(open_input_file(path)?))
        .map_err(|e| Error::MalformedJson(path_string(path), e))?;
    let mut builder = NestedArrayBuilder::default();
    builder.visit(&value, 0).map_err(|failure| match failure {
        NestingFailure::Ragged => Error::RaggedArray(path_string(path)),
        NestingFailure::NonNumeric(value) => Error::NonNumericValue(path_string(path), value),
    })?;
    builder.into_array()
}

enum JsonNumber {
    Integer(i64),
    Float(f64),
}

enum NestingFailure {
    Ragged,
    NonNumeric(String),
}

/// Flattens nested JSON arrays, checking that every level is rectangular.
#[derive(Default)]
struct NestedArrayBuilder {
    shape: Vec<usize>,
    leaf_depth: Option<usize>,
    values: Vec<JsonNumber>,
}

impl NestedArrayBuilder {
    fn visit(&mut self, value: &Value, depth: usize) -> std::result::Result<(), NestingFailure> {
        match value {
            Value::Array(items) => {
                if self.leaf_depth.is_some_and(|leaf_depth| depth >= leaf_depth) {
                    return Err(NestingFailure::Ragged);
                }
                match self.shape.get(depth) {
                    Some(&length) if length != items.len() => return Err(NestingFailure::Ragged),
                    Some(_) => {}
                    None => self.shape.push(items.len()),
                }
                for item in items {
                    self.visit(item, depth + 1)?;
                }
                Ok(())
            }
            scalar => {
                match self.leaf_depth {
                    Some(leaf_depth) if leaf_depth != depth => return Err(NestingFailure::Ragged),
                    Some(_) => {}
                    None if depth != self.shape.len() => return Err(NestingFailure::Ragged),
                    None => self.leaf_depth = Some(depth),
                }
                self.values.push(Self::parse_number(scalar)?);
                Ok(())
            }
        }
    }

    fn parse_number(scalar: &Value) -> std::result::Result<JsonNumber, NestingFailure> {
        match scalar {
            Value::Bool(flag) => Ok(JsonNumber::Integer(i64::from(*flag))),
            Value::Number(number) => match (number.as_i64(), number.as_f64()) {
                (Some(integer), _) => Ok(JsonNumber::Integer(integer)),
                (None, Some(float)) => Ok(JsonNumber::Float(float)),
                (None, None) => Err(NestingFailure::NonNumeric(number.to_string())),
            },
            other => Err(NestingFailure::NonNumeric(other.to_string())),
        }
    }

    fn into_array(self) -> Result<LoadedArray> {
        let integers: Option<Vec<i64>> = self
            .values
            .iter()
            .map(|value| match value {
                JsonNumber::Integer(integer) => Some(*integer),
                JsonNumber::Float(_) => None,
            })
            .collect();
        if let Some(values) = integers {
            return Ok(LoadedArray::Int64(from_shape_vec(self.shape, values)?));
        }
        let values = self
            .values
            .into_iter()
            .map(|value| match value {
                JsonNumber::Integer(integer) => integer as f64,
                JsonNumber::Float(float) => float,
            })
            .collect();
        Ok(LoadedArray::Float64(from_shape_vec(self.shape, values)?))
    }
}

fn load_npy(path: &Path) -> Result<LoadedArray> {
    let bytes = read_input_file(path)?;
    if let Some(array) = try_read_npy::<u8>(&bytes, path)? {
        return Ok(LoadedArray::UInt8(array));
    }
    if let Some(array) = try_read_npy::<f32>(&bytes, path)? {
        return Ok(LoadedArray::Float32(array));
    }
    if let Some(array) = try_read_npy::<f64>(&bytes, path)? {
        return Ok(LoadedArray::Float64(array));
    }
    if let Some(array) = try_read_npy::<i64>(&bytes, path)? {
        return Ok(LoadedArray::Int64(array));
    }
    if let Some(array) = try_read_npy::<i32>(&bytes, path)? {
        return Ok(LoadedArray::Int64(array.mapv(i64::from)));
    }
    if let Some(array) = try_read_npy::<i16>(&bytes, path)? {
        return Ok(LoadedArray::Int64(array.mapv(i64::from)));
    }
    if let Some(array) = try_read_npy::<i8>(&bytes, path)? {
        return Ok(LoadedArray::Int64(array.mapv(i64::from)));
    }
    if let Some(array) = try_read_npy::<u16>(&bytes, path)? {
        return Ok(LoadedArray::Int64(array.mapv(i64::from)));
    }
    if let Some(array) = try_read_npy::<u32>(&bytes, path)? {
        return Ok(LoadedArray::Int64(array.mapv(i64::from)));
    }
    if let Some(array) = try_read_npy::<u64>(&bytes, path)? {
        return Ok(LoadedArray::Int64(array.mapv(|value| value as i64)));
    }
    if let Some(array) = try_read_npy::<bool>(&bytes, path)? {
        return Ok(LoadedArray::UInt8(array.mapv(u8::from)));
    }
    Err(Error::UnsupportedNpyElementType(path_string(path)))
}

/// `Ok(None)` when the file holds a different element type.
fn try_read_npy<T: ReadableElement>(bytes: &[u8], path: &Path) -> Result<Option<ArrayD<T>>> {
    match ArrayD::<T>::read_npy(bytes) {
        Ok(array) => Ok(Some(array)),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(error) => Err(Error::FailedToReadNpy(path_string(path), error)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum FieldParsing {
    /// Every field must be a number.
    Strict,
    /// Empty or unparseable fields become NaN.
    Lenient,
}

impl FieldParsing {
    fn parse(&self, field: &str) -> Option<f64> {
        match (self, field.parse::<f64>()) {
            (_, Ok(value)) => Some(value),
            (Self::Lenient, Err(_)) => Some(f64::NAN),
            (Self::Strict, Err(_)) => None,
        }
    }
}

fn load_delimited(path: &Path, parsing: FieldParsing) -> Result<LoadedArray> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(COMMENT_MARKER))
        .from_reader(BufReader::new(open_input_file(path)?));
    let mut columns: Option<usize> = None;
    let mut rows = 0;
    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::FailedToReadDelimitedText(path_string(path), e))?;
        let line = record.position().map_or(0, |position| position.line());
        if record.iter().all(str::is_empty) {
            continue;
        }
        match columns {
            Some(expected) if expected != record.len() => {
                return Err(Error::MalformedDelimitedText(
                    path_string(path),
                    line,
                    format!("expected {} columns, found {}", expected, record.len()),
                ));
            }
            Some(_) => {}
            None => columns = Some(record.len()),
        }
        for field in record.iter() {
            let value = parsing.parse(field).ok_or_else(|| {
                Error::MalformedDelimitedText(
                    path_string(path),
                    line,
                    format!("could not convert '{}' to a number", field),
                )
            })?;
            values.push(value);
        }
        rows += 1;
    }
    let shape = squeeze(&[rows, columns.unwrap_or(0)]);
    Ok(LoadedArray::Float64(from_shape_vec(shape, values)?))
}

/// Drops length-one axes; an empty table becomes a zero-length vector.
fn squeeze(shape: &[usize]) -> Vec<usize> {
    if shape.contains(&0) {
        return vec![0];
    }
    shape.iter().copied().filter(|&length| length != 1).collect()
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use ndarray::{array, ArrayD, IxDyn};
    use ndarray_npy::write_npy;

    use super::{load_array, squeeze};
    use crate::{view::LoadedArray, Error};

    fn scratch_path(name: &str) -> PathBuf {
        let directory = std::env::temp_dir().join(format!(
            "image-array-tools-loader-{}",
            std::process::id()
        ));
        fs::create_dir_all(&directory).unwrap();
        directory.join(name)
    }

    fn scratch_file(name: &str, content: &[u8]) -> PathBuf {
        let path = scratch_path(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn squeeze_matrix_shapes() {
        assert_eq!(squeeze(&[3, 4]), vec![3, 4]);
        assert_eq!(squeeze(&[1, 4]), vec![4]);
        assert_eq!(squeeze(&[4, 1]), vec![4]);
        assert_eq!(squeeze(&[1, 1]), Vec::<usize>::new());
        assert_eq!(squeeze(&[0, 0]), vec![0]);
    }

    #[test]
    fn load_integer_json() {
        let path = scratch_file("integers.json", b"[[1,2],[3,4],[5,6]]");
        let array = load_array(&path).unwrap();
        let expected = array![[1_i64, 2], [3, 4], [5, 6]].into_dyn();
        assert_eq!(array, LoadedArray::Int64(expected));
    }

    #[test]
    fn load_mixed_json_as_floats() {
        let path = scratch_file("mixed.json", b"[[1, 2.5]]");
        let array = load_array(&path).unwrap();
        let expected = array![[1.0_f64, 2.5]].into_dyn();
        assert_eq!(array, LoadedArray::Float64(expected));
    }

    #[test]
    fn single_trailing_float_makes_json_floating_point() {
        let path = scratch_file("trailing_float.json", b"[[1, 2], [3, 4.0]]");
        let array = load_array(&path).unwrap();
        let expected = array![[1.0_f64, 2.0], [3.0, 4.0]].into_dyn();
        assert_eq!(array, LoadedArray::Float64(expected));
    }

    #[test]
    fn load_json_pixels() {
        let path = scratch_file("pixels.json", b"[[[255,0,0],[0,255,0]]]");
        let array = load_array(&path).unwrap();
        assert_eq!(array.shape(), &[1, 2, 3]);
    }

    #[test]
    fn reject_ragged_json() {
        for (name, content) in [
            ("ragged_rows.json", &b"[[1,2],[3]]"[..]),
            ("ragged_depth.json", &b"[1,[2]]"[..]),
            ("ragged_leaf.json", &b"[[1],2]"[..]),
            ("ragged_empty.json", &b"[[],[1]]"[..]),
        ] {
            let path = scratch_file(name, content);
            match load_array(&path) {
                Err(Error::RaggedArray(_)) => {}
                other => panic!("{} was not rejected as ragged: {:?}", name, other),
            }
        }
    }

    #[test]
    fn reject_non_numeric_json() {
        let path = scratch_file("strings.json", b"[[\"a\", 1]]");
        if let Err(Error::NonNumericValue(_, value)) = load_array(&path) {
            assert_eq!(value, "\"a\"");
            return;
        }
        panic!("String value was not rejected");
    }

    #[test]
    fn reject_malformed_json() {
        let path = scratch_file("broken.json", b"[[1,2],");
        assert!(matches!(load_array(&path), Err(Error::MalformedJson(_, _))));
    }

    #[test]
    fn load_text_matrix() {
        let path = scratch_file("matrix.txt", b"# header comment\n0, 128, 255\n\n1,2,3\n");
        let array = load_array(&path).unwrap();
        let expected = array![[0.0_f64, 128.0, 255.0], [1.0, 2.0, 3.0]].into_dyn();
        assert_eq!(array, LoadedArray::Float64(expected));
    }

    #[test]
    fn text_rejects_non_numeric_field() {
        let path = scratch_file("header.txt", b"x,y\n1,2\n");
        match load_array(&path) {
            Err(Error::MalformedDelimitedText(_, line, _)) => assert_eq!(line, 1),
            other => panic!("Header line was not rejected: {:?}", other),
        }
    }

    #[test]
    fn text_rejects_uneven_rows() {
        let path = scratch_file("uneven.txt", b"1,2,3\n4,5\n");
        match load_array(&path) {
            Err(Error::MalformedDelimitedText(_, line, _)) => assert_eq!(line, 2),
            other => panic!("Uneven rows were not rejected: {:?}", other),
        }
    }

    #[test]
    fn single_text_row_is_squeezed() {
        let path = scratch_file("row.txt", b"1,2,3,4\n");
        assert_eq!(load_array(&path).unwrap().shape(), &[4]);
    }

    #[test]
    fn csv_turns_unparseable_fields_into_nan() {
        let path = scratch_file("lenient.csv", b"x,y\n1,\n3,4\n");
        let array = match load_array(&path).unwrap() {
            LoadedArray::Float64(array) => array,
            other => panic!("Expected float array, got {:?}", other),
        };
        assert_eq!(array.shape(), &[3, 2]);
        assert!(array[[0, 0]].is_nan());
        assert!(array[[0, 1]].is_nan());
        assert_eq!(array[[1, 0]], 1.0);
        assert!(array[[1, 1]].is_nan());
        assert_eq!(array[[2, 1]], 4.0);
    }

    #[test]
    fn load_npy_keeps_element_type() {
        let bytes_path = scratch_path("bytes.npy");
        write_npy(&bytes_path, &array![[1_u8, 2], [3, 4]]).unwrap();
        assert_eq!(
            load_array(&bytes_path).unwrap(),
            LoadedArray::UInt8(array![[1_u8, 2], [3, 4]].into_dyn())
        );

        let floats_path = scratch_path("floats.npy");
        let floats = ArrayD::<f32>::from_elem(IxDyn(&[2, 2, 3]), 0.5);
        write_npy(&floats_path, &floats).unwrap();
        assert_eq!(
            load_array(&floats_path).unwrap(),
            LoadedArray::Float32(floats)
        );
    }

    #[test]
    fn load_npy_widens_other_integers() {
        let path = scratch_path("shorts.npy");
        write_npy(&path, &array![-3_i16, 400]).unwrap();
        assert_eq!(
            load_array(&path).unwrap(),
            LoadedArray::Int64(array![-3_i64, 400].into_dyn())
        );
    }

    #[test]
    fn reject_truncated_npy() {
        let path = scratch_file("truncated.npy", b"\x93NUMPY");
        assert!(matches!(load_array(&path), Err(Error::FailedToReadNpy(_, _))));
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join("image-array-tools-does-not-exist.json");
        assert!(matches!(
            load_array(&path),
            Err(Error::UnableToOpenInputFileForReading(_, _))
        ));
    }
}
