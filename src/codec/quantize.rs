
//! Quantization of transform coefficients.

use crate::image::BLOCK_AREA;


/// The fixed quantization table: the baseline JPEG luminance matrix.
/// This single table is used for all three planes.
/// Process-wide constant data, safe for unsynchronized concurrent reads.
pub const QUANTIZATION_TABLE: [u8; BLOCK_AREA] = [
    16, 11, 10, 16,  24,  40,  51,  61,
    12, 12, 14, 19,  26,  58,  60,  55,
    14, 13, 16, 24,  40,  57,  69,  56,
    14, 17, 22, 29,  51,  87,  80,  62,
    18, 22, 37, 56,  68, 109, 103,  77,
    24, 35, 55, 64,  81, 104, 113,  92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103,  99,
];


/// Divide each coefficient by its table entry and round to nearest.
/// The result is narrowed to signed eight bits without clamping:
/// a quotient outside [-128, 127] wraps.
pub fn quantize(coefficients: &[f32; BLOCK_AREA], table: &[u8; BLOCK_AREA]) -> [i8; BLOCK_AREA] {
    let mut quantized = [0_i8; BLOCK_AREA];

    for index in 0 .. BLOCK_AREA {
        let quotient = (coefficients[index] / f32::from(table[index])).round();
        quantized[index] = quotient as i32 as i8;
    }

    quantized
}

/// Multiply each quantized value by its table entry,
/// recovering approximate transform coefficients.
pub fn dequantize(quantized: &[i8; BLOCK_AREA], table: &[u8; BLOCK_AREA]) -> [f32; BLOCK_AREA] {
    let mut coefficients = [0.0_f32; BLOCK_AREA];

    for index in 0 .. BLOCK_AREA {
        coefficients[index] = f32::from(quantized[index]) * f32::from(table[index]);
    }

    coefficients
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quantization_divides_and_rounds() {
        let mut coefficients = [0.0_f32; BLOCK_AREA];
        coefficients[0] = -415.0; // divided by 16
        coefficients[1] = -30.0;  // divided by 11
        coefficients[8] = 5.0;    // divided by 12

        let quantized = quantize(&coefficients, &QUANTIZATION_TABLE);
        assert_eq!(quantized[0], -26);
        assert_eq!(quantized[1], -3);
        assert_eq!(quantized[8], 0);

        let coefficients = dequantize(&quantized, &QUANTIZATION_TABLE);
        assert_eq!(coefficients[0], -416.0);
        assert_eq!(coefficients[1], -33.0);
        assert_eq!(coefficients[8], 0.0);
    }

    #[test]
    fn out_of_range_quotients_wrap() {
        let mut coefficients = [0.0_f32; BLOCK_AREA];
        coefficients[0] = 16.0 * 1020.0; // quotient 1020 wraps to -4

        let quantized = quantize(&coefficients, &QUANTIZATION_TABLE);
        assert_eq!(quantized[0], -4);
    }
}
