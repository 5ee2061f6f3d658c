
//! Level shifting and the 8x8 discrete cosine transform.
//!
//! The transform is the direct O(64) summation per output cell,
//! not a fast factorization. At this block size that is roughly
//! 4096 multiply-adds per block, which is perfectly acceptable.
//! Coefficients are rounded to the nearest integer but kept as floats.

use std::f32::consts::PI;
use std::sync::OnceLock;
use crate::image::{BLOCK_WIDTH, BLOCK_AREA};


/// The cosine basis and scale factors of the 8x8 transform,
/// computed once per process.
struct Basis {

    /// `cosine[s][f] = cos((2s + 1) * f * pi / 16)`
    /// for sample index `s` and frequency `f`.
    cosine: [[f32; BLOCK_WIDTH]; BLOCK_WIDTH],

    /// The orthonormal scale factor per frequency:
    /// `sqrt(1/8)` for the DC frequency, `sqrt(2/8)` otherwise.
    scale: [f32; BLOCK_WIDTH],
}

fn basis() -> &'static Basis {
    static BASIS: OnceLock<Basis> = OnceLock::new();

    BASIS.get_or_init(|| {
        let mut cosine = [[0.0_f32; BLOCK_WIDTH]; BLOCK_WIDTH];
        for sample in 0 .. BLOCK_WIDTH {
            for frequency in 0 .. BLOCK_WIDTH {
                cosine[sample][frequency] =
                    ((2 * sample + 1) as f32 * frequency as f32 * PI / 16.0).cos();
            }
        }

        let mut scale = [(2.0_f32 / BLOCK_WIDTH as f32).sqrt(); BLOCK_WIDTH];
        scale[0] = (1.0_f32 / BLOCK_WIDTH as f32).sqrt();

        Basis { cosine, scale }
    })
}


/// Subtract 128 from every sample, centering the
/// unsigned range [0, 255] around zero.
pub fn level_shift(block: &[u8; BLOCK_AREA]) -> [f32; BLOCK_AREA] {
    let mut shifted = [0.0_f32; BLOCK_AREA];
    for (slot, sample) in shifted.iter_mut().zip(block.iter()) {
        *slot = f32::from(*sample) - 128.0;
    }

    shifted
}

/// Add 128 back to every value and narrow to unsigned eight bits.
/// The narrowing truncates and wraps instead of saturating,
/// which mirrors the behavior this codec is committed to.
pub fn unlevel_shift(values: &[f32; BLOCK_AREA]) -> [u8; BLOCK_AREA] {
    let mut block = [0_u8; BLOCK_AREA];
    for (slot, value) in block.iter_mut().zip(values.iter()) {
        *slot = (value + 128.0) as i32 as u8;
    }

    block
}

/// The forward type-II 2-D discrete cosine transform of one block.
/// `output(i, j) = round(c(i) c(j) sum over (x, y) of
/// input(y, x) cos((2y+1) i pi/16) cos((2x+1) j pi/16))`.
pub fn forward_dct_8x8(block: &[f32; BLOCK_AREA]) -> [f32; BLOCK_AREA] {
    let basis = basis();
    let mut coefficients = [0.0_f32; BLOCK_AREA];

    for i in 0 .. BLOCK_WIDTH {
        for j in 0 .. BLOCK_WIDTH {
            let mut sum = 0.0_f32;

            for x in 0 .. BLOCK_WIDTH {
                for y in 0 .. BLOCK_WIDTH {
                    sum += block[y * BLOCK_WIDTH + x]
                        * basis.cosine[y][i]
                        * basis.cosine[x][j];
                }
            }

            coefficients[i * BLOCK_WIDTH + j] =
                (basis.scale[i] * basis.scale[j] * sum).round();
        }
    }

    coefficients
}

/// The inverse of `forward_dct_8x8`, using the same basis and scale factors.
/// The coefficient grid is indexed transposed relative to the forward pass,
/// `coefficients(j, i)`, which is required for this pair to actually invert.
pub fn inverse_dct_8x8(coefficients: &[f32; BLOCK_AREA]) -> [f32; BLOCK_AREA] {
    let basis = basis();
    let mut block = [0.0_f32; BLOCK_AREA];

    for x in 0 .. BLOCK_WIDTH {
        for y in 0 .. BLOCK_WIDTH {
            let mut sum = 0.0_f32;

            for i in 0 .. BLOCK_WIDTH {
                for j in 0 .. BLOCK_WIDTH {
                    sum += basis.scale[i] * basis.scale[j]
                        * coefficients[j * BLOCK_WIDTH + i]
                        * basis.cosine[y][i]
                        * basis.cosine[x][j];
                }
            }

            block[x * BLOCK_WIDTH + y] = sum.round();
        }
    }

    block
}
