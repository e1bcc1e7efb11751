//! Binary foreground mask construction.
//!
//! frame → luminance → gaussian blur → fixed threshold → morphological
//! open (speckle removal) then close (gap filling).

use image::{imageops, GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{close, open};

use crate::SegmenterParams;

pub(crate) fn foreground_mask(image: &RgbImage, params: &SegmenterParams) -> GrayImage {
    let gray = imageops::grayscale(image);
    let blurred = gaussian_blur_f32(&gray, params.blur_sigma);

    let mut binary = blurred;
    for p in binary.pixels_mut() {
        let fg = if params.bright_foreground {
            p.0[0] > params.threshold
        } else {
            p.0[0] < params.threshold
        };
        p.0[0] = if fg { 255 } else { 0 };
    }

    let opened = open(&binary, Norm::LInf, params.morph_radius);
    close(&opened, Norm::LInf, params.morph_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn frame_with_block(w: u32, h: u32, x0: u32, y0: u32, side: u32, value: u8) -> RgbImage {
        let mut img = RgbImage::new(w, h);
        for y in y0..(y0 + side).min(h) {
            for x in x0..(x0 + side).min(w) {
                img.put_pixel(x, y, Rgb([value, value, value]));
            }
        }
        img
    }

    #[test]
    fn bright_block_survives_thresholding() {
        let img = frame_with_block(64, 64, 16, 16, 32, 255);
        let mask = foreground_mask(&img, &SegmenterParams::default());
        assert_eq!(mask.get_pixel(32, 32).0[0], 255);
        assert_eq!(mask.get_pixel(2, 2).0[0], 0);
    }

    #[test]
    fn dim_block_is_background() {
        let img = frame_with_block(64, 64, 16, 16, 32, 120);
        let mask = foreground_mask(&img, &SegmenterParams::default());
        assert_eq!(mask.get_pixel(32, 32).0[0], 0);
    }

    #[test]
    fn polarity_flip_selects_dark_marks() {
        // Dark block on a bright background with inverted polarity.
        let mut img = RgbImage::from_pixel(64, 64, Rgb([250, 250, 250]));
        for y in 16..48 {
            for x in 16..48 {
                img.put_pixel(x, y, Rgb([10, 10, 10]));
            }
        }
        let params = SegmenterParams {
            bright_foreground: false,
            threshold: 128,
            ..SegmenterParams::default()
        };
        let mask = foreground_mask(&img, &params);
        assert_eq!(mask.get_pixel(32, 32).0[0], 255);
        assert_eq!(mask.get_pixel(2, 2).0[0], 0);
    }

    #[test]
    fn opening_removes_single_pixel_speckle() {
        let mut img = RgbImage::new(64, 64);
        img.put_pixel(10, 10, Rgb([255, 255, 255]));
        let mask = foreground_mask(&img, &SegmenterParams::default());
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }
}
