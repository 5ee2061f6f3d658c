
//! Zigzag reordering of quantized blocks.
//!
//! The serpentine walk over the anti-diagonals of an 8x8 grid reduces
//! to one fixed permutation of the 64 cell positions. Scanning with the
//! permutation table and inverting with the same table is bit-for-bit
//! equivalent to walking the diagonals, and much harder to get wrong.
//! Low frequencies cluster at the front of the scanned sequence,
//! which is what makes the following run-length stage effective.

use crate::image::BLOCK_AREA;


/// The canonical zigzag scan order for 8x8 blocks:
/// `ZIGZAG[n]` is the row-major index of the n-th visited cell.
const ZIGZAG: [usize; BLOCK_AREA] = [
     0,  1,  8, 16,  9,  2,  3, 10,
    17, 24, 32, 25, 18, 11,  4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13,  6,  7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];


/// Reorder a row-major block into the zigzag sequence.
pub fn scan(block: &[i8; BLOCK_AREA]) -> [i8; BLOCK_AREA] {
    let mut sequence = [0_i8; BLOCK_AREA];
    for (slot, index_in_block) in sequence.iter_mut().zip(ZIGZAG.iter()) {
        *slot = block[*index_in_block];
    }

    sequence
}

/// Reorder a zigzag sequence back into a row-major block.
/// Exact inverse of `scan`.
pub fn unscan(sequence: &[i8; BLOCK_AREA]) -> [i8; BLOCK_AREA] {
    let mut block = [0_i8; BLOCK_AREA];
    for (value, index_in_block) in sequence.iter().zip(ZIGZAG.iter()) {
        block[*index_in_block] = *value;
    }

    block
}
