use serde::Serialize;

use super::rgb::{GrayArray, RgbArray};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RgbPixelRow {
    pub x: usize,
    pub y: usize,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GrayPixelRow {
    pub x: usize,
    pub y: usize,
    pub gray: u8,
}

/// (x, y) pairs in row-major order, every coordinate exactly once.
fn coordinates(height: usize, width: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
}

pub fn rgb_pixel_rows(rgb: &RgbArray) -> impl Iterator<Item = RgbPixelRow> + '_ {
    let (height, width, _) = rgb.dim();
    coordinates(height, width).map(move |(x, y)| RgbPixelRow {
        x,
        y,
        r: rgb[[y, x, 0]],
        g: rgb[[y, x, 1]],
        b: rgb[[y, x, 2]],
    })
}

pub fn gray_pixel_rows(gray: &GrayArray) -> impl Iterator<Item = GrayPixelRow> + '_ {
    let (height, width) = gray.dim();
    coordinates(height, width).map(move |(x, y)| GrayPixelRow {
        x,
        y,
        gray: gray[[y, x]],
    })
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array3};

    use super::{gray_pixel_rows, rgb_pixel_rows, GrayPixelRow, RgbPixelRow};

    #[test]
    fn one_row_per_pixel_in_row_major_order() {
        let rgb = Array3::<u8>::zeros((3, 4, 3));
        let coordinates: Vec<(usize, usize)> =
            rgb_pixel_rows(&rgb).map(|row| (row.x, row.y)).collect();
        assert_eq!(coordinates.len(), 12);
        let expected: Vec<(usize, usize)> = (0..3)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .collect();
        assert_eq!(coordinates, expected);
    }

    #[test]
    fn rgb_rows_carry_pixel_values() {
        let rgb = array![[[1_u8, 2, 3], [4, 5, 6]], [[7, 8, 9], [10, 11, 12]]];
        let rows: Vec<RgbPixelRow> = rgb_pixel_rows(&rgb).collect();
        assert_eq!(
            rows[1],
            RgbPixelRow {
                x: 1,
                y: 0,
                r: 4,
                g: 5,
                b: 6
            }
        );
        assert_eq!(
            rows[2],
            RgbPixelRow {
                x: 0,
                y: 1,
                r: 7,
                g: 8,
                b: 9
            }
        );
    }

    #[test]
    fn gray_rows_carry_gray_values() {
        let gray = array![[255_u8, 255], [0, 128]];
        let rows: Vec<GrayPixelRow> = gray_pixel_rows(&gray).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], GrayPixelRow { x: 1, y: 1, gray: 128 });
    }
}
