use std::path::Path;

use image::{GrayImage, ImageReader};
use imageproc::contrast::otsu_level;

use crate::config::ThresholdMethod;
use crate::error::TraceError;

/// Binary foreground/background matrix.
///
/// Row-major with row 0 at the top of the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Bitmap {
    /// An all-background bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Foreground test in image coordinates (y down). Out-of-bounds = false.
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            self.data[y as usize * self.width as usize + x as usize] = value;
        }
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }
}

/// Decode an image file into 8-bit luma.
pub fn load_gray(path: &Path) -> Result<GrayImage, TraceError> {
    let img = ImageReader::open(path)
        .map_err(|e| TraceError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| TraceError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .decode()
        .map_err(|e| TraceError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .into_luma8();
    Ok(img)
}

/// Threshold a grayscale image into a bitmap.
///
/// A pixel is foreground when its brightness is strictly below the
/// fixed threshold, so dark ink on a light background is traced. Otsu's
/// level is the upper bound of the dark class, so it is included.
pub fn threshold(gray: &GrayImage, method: ThresholdMethod, invert: bool) -> Bitmap {
    let cut: u16 = match method {
        ThresholdMethod::Fixed(t) => t as u16,
        ThresholdMethod::Otsu => {
            let t = otsu_level(gray);
            log::debug!("Threshold   Otsu = {}", t);
            t as u16 + 1
        }
    };

    let (width, height) = gray.dimensions();
    let data = gray
        .pixels()
        .map(|pixel| ((pixel.0[0] as u16) < cut) != invert)
        .collect();

    Bitmap { width, height, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient() -> GrayImage {
        GrayImage::from_fn(4, 1, |x, _| Luma([[0u8, 127, 128, 255][x as usize]]))
    }

    #[test]
    fn fixed_threshold_is_strict() {
        let bm = threshold(&gradient(), ThresholdMethod::Fixed(128), false);
        assert!(bm.get(0, 0));
        assert!(bm.get(1, 0));
        assert!(!bm.get(2, 0));
        assert!(!bm.get(3, 0));
    }

    #[test]
    fn invert_swaps_foreground() {
        let bm = threshold(&gradient(), ThresholdMethod::Fixed(128), true);
        assert_eq!(bm.count(), 2);
        assert!(bm.get(3, 0));
        assert!(!bm.get(0, 0));
    }

    #[test]
    fn otsu_separates_two_levels() {
        let img = GrayImage::from_fn(10, 10, |x, _| if x < 5 { Luma([20]) } else { Luma([230]) });
        let bm = threshold(&img, ThresholdMethod::Otsu, false);
        assert_eq!(bm.count(), 50);
        assert!(bm.get(0, 0));
        assert!(!bm.get(9, 9));
    }

    #[test]
    fn out_of_bounds_is_background() {
        let bm = Bitmap::new(2, 2);
        assert!(!bm.get(-1, 0));
        assert!(!bm.get(0, 2));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let path = std::env::temp_dir().join("img2eq-definitely-missing.png");
        assert!(matches!(load_gray(&path), Err(TraceError::ImageLoad(_))));
    }
}
