use ndarray::ArrayD;

/// A numeric array of any rank read back from disk.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadedArray {
    UInt8(ArrayD<u8>),
    Int64(ArrayD<i64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

impl LoadedArray {
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::UInt8(array) => array.shape(),
            Self::Int64(array) => array.shape(),
            Self::Float32(array) => array.shape(),
            Self::Float64(array) => array.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn element_type(&self) -> &'static str {
        match self {
            Self::UInt8(_) => "uint8",
            Self::Int64(_) => "int64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
        }
    }
}

/// Conversions from an array element to displayable bytes.
pub trait DisplayElement: Copy {
    /// Intensity on a fixed [0, 255] scale; out of range values are clipped.
    /// `None` marks a value that has no intensity (NaN).
    fn gray_level(self) -> Option<u8>;

    /// Plain `as u8` cast: integers wrap, floats truncate and saturate.
    fn cast_to_byte(self) -> u8;
}

impl DisplayElement for u8 {
    fn gray_level(self) -> Option<u8> {
        Some(self)
    }

    fn cast_to_byte(self) -> u8 {
        self
    }
}

impl DisplayElement for i64 {
    fn gray_level(self) -> Option<u8> {
        Some(self.clamp(0, 255) as u8)
    }

    fn cast_to_byte(self) -> u8 {
        self as u8
    }
}

impl DisplayElement for f32 {
    fn gray_level(self) -> Option<u8> {
        f64::from(self).gray_level()
    }

    fn cast_to_byte(self) -> u8 {
        self as u8
    }
}

impl DisplayElement for f64 {
    fn gray_level(self) -> Option<u8> {
        if self.is_nan() {
            return None;
        }
        Some(self.clamp(0.0, 255.0).round() as u8)
    }

    fn cast_to_byte(self) -> u8 {
        self as u8
    }
}

/// Formats a shape the way NumPy prints it, e.g. `(4,)` or `(2, 2, 4)`.
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [single] => format!("({},)", single),
        _ => {
            let dimensions: Vec<String> = shape.iter().map(usize::to_string).collect();
            format!("({})", dimensions.join(", "))
        }
    }
}
