
//! The per-block compression pipeline and its stages.
//!
//! Compressing one 8x8 block chains five stages:
//! level shift, forward discrete cosine transform, quantization,
//! zigzag reordering, and run-length encoding.
//! Decompression runs the mirrored stages in reverse order.
//!
//! Blocks are independent of each other, so any number of blocks
//! can be transformed concurrently. Only the container imposes
//! an order on the resulting symbol streams.

pub mod csc;
pub mod dct;
pub mod quantize;
pub mod zigzag;
pub mod rle;
pub mod subsample;

use crate::image::BLOCK_AREA;
use self::rle::{Symbol, SymbolVec};


/// Compress a single 8x8 block of samples into a
/// sentinel-terminated run-length symbol stream.
pub fn compress_block(block: &[u8; BLOCK_AREA], table: &[u8; BLOCK_AREA]) -> SymbolVec {
    let shifted = dct::level_shift(block);
    let coefficients = dct::forward_dct_8x8(&shifted);
    let quantized = quantize::quantize(&coefficients, table);
    let sequence = zigzag::scan(&quantized);
    rle::encode(&sequence)
}

/// Reconstruct an 8x8 block of samples from its run-length symbol stream.
/// The reconstruction is approximate: quantization discarded information.
pub fn decompress_block(symbols: &[Symbol], table: &[u8; BLOCK_AREA]) -> [u8; BLOCK_AREA] {
    let sequence = rle::decode(symbols);
    let quantized = zigzag::unscan(&sequence);
    let coefficients = quantize::dequantize(&quantized, table);
    let values = dct::inverse_dct_8x8(&coefficients);
    dct::unlevel_shift(&values)
}
