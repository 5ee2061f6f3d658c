
//! Color space conversion between RGB and Y'CrCb.
//!
//! Uses the ITU-R BT.601 coefficients with the chroma zero point
//! shifted to 128. Conversion saturates to [0, 255];
//! it is the only narrowing step of the codec that clamps.

use crate::image::{Pixels, CHANNEL_COUNT};


// forward coefficients
const Y_R: f32 = 0.299;
const Y_G: f32 = 0.587;
const Y_B: f32 = 0.114;
const CR_SCALE: f32 = 0.713;
const CB_SCALE: f32 = 0.564;

// inverse coefficients
const R_CR: f32 = 1.403;
const G_CR: f32 = -0.714;
const G_CB: f32 = -0.344;
const B_CB: f32 = 1.773;

/// The chroma value of a neutral gray pixel.
const CHROMA_BIAS: f32 = 128.0;


#[inline]
fn saturate(value: f32) -> u8 {
    value.round().max(0.0).min(255.0) as u8
}

/// Convert one RGB pixel to (luma, chroma-red, chroma-blue).
#[inline]
pub fn rgb_to_ycrcb(red: u8, green: u8, blue: u8) -> (u8, u8, u8) {
    let (red, green, blue) = (f32::from(red), f32::from(green), f32::from(blue));

    let luma = Y_R * red + Y_G * green + Y_B * blue;
    let chroma_red = CR_SCALE * (red - luma) + CHROMA_BIAS;
    let chroma_blue = CB_SCALE * (blue - luma) + CHROMA_BIAS;

    (saturate(luma), saturate(chroma_red), saturate(chroma_blue))
}

/// Convert one (luma, chroma-red, chroma-blue) pixel back to RGB.
#[inline]
pub fn ycrcb_to_rgb(luma: u8, chroma_red: u8, chroma_blue: u8) -> (u8, u8, u8) {
    let luma = f32::from(luma);
    let chroma_red = f32::from(chroma_red) - CHROMA_BIAS;
    let chroma_blue = f32::from(chroma_blue) - CHROMA_BIAS;

    let red = luma + R_CR * chroma_red;
    let green = luma + G_CR * chroma_red + G_CB * chroma_blue;
    let blue = luma + B_CB * chroma_blue;

    (saturate(red), saturate(green), saturate(blue))
}

/// Convert a whole RGB buffer to Y'CrCb, channel order luma, Cr, Cb.
pub fn rgb_image_to_ycrcb(pixels: &Pixels) -> Pixels {
    convert_each_pixel(pixels, |[red, green, blue]| {
        let (luma, chroma_red, chroma_blue) = rgb_to_ycrcb(red, green, blue);
        [luma, chroma_red, chroma_blue]
    })
}

/// Convert a whole Y'CrCb buffer back to RGB.
pub fn ycrcb_image_to_rgb(pixels: &Pixels) -> Pixels {
    convert_each_pixel(pixels, |[luma, chroma_red, chroma_blue]| {
        let (red, green, blue) = ycrcb_to_rgb(luma, chroma_red, chroma_blue);
        [red, green, blue]
    })
}

fn convert_each_pixel(
    pixels: &Pixels,
    convert: impl Fn([u8; CHANNEL_COUNT]) -> [u8; CHANNEL_COUNT]
) -> Pixels {
    let mut data = Vec::with_capacity(pixels.data.len());

    for pixel in pixels.data.chunks_exact(CHANNEL_COUNT) {
        data.extend_from_slice(&convert([pixel[0], pixel[1], pixel[2]]));
    }

    Pixels { resolution: pixels.resolution, data }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Vec2;

    #[test]
    fn gray_has_neutral_chroma() {
        for &gray in &[0_u8, 128, 255] {
            let (luma, chroma_red, chroma_blue) = rgb_to_ycrcb(gray, gray, gray);
            assert_eq!(luma, gray);
            assert_eq!(chroma_red, 128);
            assert_eq!(chroma_blue, 128);
        }
    }

    #[test]
    fn primaries_round_trip_closely() {
        let colors = [
            (255, 0, 0), (0, 255, 0), (0, 0, 255),
            (255, 255, 0), (0, 255, 255), (255, 0, 255),
            (12, 200, 130), (64, 64, 65),
        ];

        for &(red, green, blue) in &colors {
            let (luma, chroma_red, chroma_blue) = rgb_to_ycrcb(red, green, blue);
            let (red2, green2, blue2) = ycrcb_to_rgb(luma, chroma_red, chroma_blue);

            assert!((i32::from(red2) - i32::from(red)).abs() <= 3);
            assert!((i32::from(green2) - i32::from(green)).abs() <= 3);
            assert!((i32::from(blue2) - i32::from(blue)).abs() <= 3);
        }
    }

    #[test]
    fn saturation_clamps_out_of_gamut_values() {
        // maximally red chroma on a bright pixel overflows the red channel
        let (red, _, _) = ycrcb_to_rgb(255, 255, 128);
        assert_eq!(red, 255);

        let (red, _, _) = ycrcb_to_rgb(0, 0, 128);
        assert_eq!(red, 0);
    }

    #[test]
    fn buffer_conversion_preserves_resolution() {
        let pixels = Pixels::from_data(Vec2(2, 2), vec![10; 12]).unwrap();
        let converted = rgb_image_to_ycrcb(&pixels);

        assert_eq!(converted.resolution, Vec2(2, 2));
        assert_eq!(converted.pixel(Vec2(0, 0)), [10, 128, 128]);

        let restored = ycrcb_image_to_rgb(&converted);
        assert_eq!(restored.pixel(Vec2(1, 1)), [10, 10, 10]);
    }
}
