//! Chroma-key background removal for photographed garments.

use image::RgbaImage;

use crate::config::ChromaKeyTuning;

/// Remove the background color sampled from the top-left pixel.
///
/// Every pixel whose Euclidean RGB distance to the reference is strictly
/// below the tolerance has its alpha forced to 0; all other pixels keep
/// their alpha. The threshold is uniform over the whole image with no
/// spatial reasoning, so a foreground pixel near the background color
/// disappears too; downstream consumers rely on that exact behavior.
/// Zero-sized images pass through unchanged.
pub fn remove_background(image: &RgbaImage, tuning: &ChromaKeyTuning) -> RgbaImage {
    let mut out = image.clone();
    if out.width() == 0 || out.height() == 0 {
        return out;
    }

    let reference = *image.get_pixel(0, 0);
    let tolerance_sq = tuning.tolerance * tuning.tolerance;

    for pixel in out.pixels_mut() {
        let dr = pixel[0] as f32 - reference[0] as f32;
        let dg = pixel[1] as f32 - reference[1] as f32;
        let db = pixel[2] as f32 - reference[2] as f32;

        // Squared on both sides, same strict threshold
        if dr * dr + dg * dg + db * db < tolerance_sq {
            pixel[3] = 0;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_far_colors_keep_alpha() {
        let tuning = ChromaKeyTuning::default();
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([10, 200, 30, 77]));
        image.put_pixel(0, 0, WHITE);

        let out = remove_background(&image, &tuning);
        for (x, y, pixel) in out.enumerate_pixels() {
            if (x, y) == (0, 0) {
                assert_eq!(pixel[3], 0);
            } else {
                assert_eq!(pixel[3], 77);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let tuning = ChromaKeyTuning::default();

        // Corner is already transparent and every other pixel sits far from
        // the corner color, so a pass changes nothing at all
        let mut image = RgbaImage::from_pixel(6, 6, Rgba([200, 10, 10, 255]));
        image.put_pixel(0, 0, Rgba([0, 0, 255, 0]));

        let once = remove_background(&image, &tuning);
        assert_eq!(once, image);

        let twice = remove_background(&once, &tuning);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_half_white_grid() {
        let tuning = ChromaKeyTuning::default();

        // Left half pure white (50 of 100 pixels, including the corner),
        // right half pure black
        let image = RgbaImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                WHITE
            } else {
                Rgba([0, 0, 0, 255])
            }
        });

        let out = remove_background(&image, &tuning);

        let transparent = out.pixels().filter(|p| p[3] == 0).count();
        assert_eq!(transparent, 50);
        for (x, _, pixel) in out.enumerate_pixels() {
            if x < 5 {
                assert_eq!(pixel[3], 0);
            } else {
                assert_eq!(pixel[3], 255);
            }
        }
    }

    #[test]
    fn test_tolerance_is_strict() {
        let tuning = ChromaKeyTuning::default();
        let mut image = RgbaImage::from_pixel(3, 1, Rgba([0, 0, 0, 255]));
        // Exactly at the tolerance distance of 30: stays opaque
        image.put_pixel(1, 0, Rgba([30, 0, 0, 255]));
        // Just inside: keyed out
        image.put_pixel(2, 0, Rgba([29, 0, 0, 255]));

        let out = remove_background(&image, &tuning);
        assert_eq!(out.get_pixel(1, 0)[3], 255);
        assert_eq!(out.get_pixel(2, 0)[3], 0);
    }

    #[test]
    fn test_degenerate_image_passes_through() {
        let tuning = ChromaKeyTuning::default();
        let image = RgbaImage::new(0, 0);
        let out = remove_background(&image, &tuning);
        assert_eq!(out.dimensions(), (0, 0));
    }

    #[test]
    fn test_rgb_left_as_is() {
        let tuning = ChromaKeyTuning::default();
        let image = RgbaImage::from_pixel(2, 2, WHITE);
        let out = remove_background(&image, &tuning);

        // Only alpha is carved, color channels survive for the alpha test
        for pixel in out.pixels() {
            assert_eq!((pixel[0], pixel[1], pixel[2]), (255, 255, 255));
            assert_eq!(pixel[3], 0);
        }
    }
}
