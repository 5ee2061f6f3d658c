
//! Decompress a byte stream back into a pixel buffer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::math::Vec2;
use crate::io::Read;
use crate::error::Result;
use crate::image::{Pixels, Plane, BLOCK_WIDTH, BLOCK_AREA};
use crate::codec;
use crate::codec::quantize::QUANTIZATION_TABLE;
use crate::container::{self, BlockSymbols};


/// Decompress a legacy byte stream from a file at the specified path.
/// The block-grid dimensions must equal the `block_count()`
/// of the image that was compressed into the file.
pub fn read_image_from_file(path: impl AsRef<Path>, blocks: Vec2<usize>) -> Result<Pixels> {
    let mut read = BufReader::new(File::open(path)?);
    read_image_from_buffered(&mut read, blocks)
}

/// Decompress a legacy byte stream. Assumes the reader is buffered.
///
/// The stream carries no dimensions of its own: `blocks` must equal the
/// block-grid dimensions that were used for writing. The reconstructed
/// buffer measures `8 * blocks.0` by `8 * blocks.1` pixels, which may
/// exceed the original image dimensions if the original was padded;
/// callers needing the exact original size must track it and crop.
///
/// Errs with `Error::Io` if the stream ends before all expected blocks
/// were read. Dimensions that disagree with the stream cannot be
/// detected directly, the layout has no redundancy for that; they
/// usually surface as a premature end of the stream.
pub fn read_image_from_buffered(read: &mut impl Read, blocks: Vec2<usize>) -> Result<Pixels> {
    let resolution = blocks.map(|count| count * BLOCK_WIDTH);

    let mut all_symbols = Vec::with_capacity(blocks.area());
    for _ in 0 .. blocks.area() {
        all_symbols.push(container::read_block_symbols(read)?);
    }

    let decompressed = decompress_all_blocks(all_symbols);

    let mut luma = Plane::new(resolution);
    let mut chroma_red = Plane::new(resolution);
    let mut chroma_blue = Plane::new(resolution);

    let coordinates = (0 .. blocks.0).flat_map(|x| (0 .. blocks.1).map(move |y| Vec2(x, y)));
    for (position, (luma_block, red_block, blue_block)) in coordinates.zip(decompressed.iter()) {
        luma.set_block_at(position, luma_block);
        chroma_red.set_block_at(position, red_block);
        chroma_blue.set_block_at(position, blue_block);
    }

    let ycrcb = Pixels::from_planes(&luma, &chroma_red, &chroma_blue);
    Ok(codec::csc::ycrcb_image_to_rgb(&ycrcb))
}

/// Decompress a headered byte stream, reading the
/// block-grid dimensions from the stream itself.
pub fn read_headered_image_from_buffered(read: &mut impl Read) -> Result<Pixels> {
    let blocks = container::read_header(read)?;
    read_image_from_buffered(read, blocks)
}

type DecompressedBlock = ([u8; BLOCK_AREA], [u8; BLOCK_AREA], [u8; BLOCK_AREA]);

fn decompress_block_planes(symbols: &BlockSymbols) -> DecompressedBlock {
    (
        codec::decompress_block(&symbols.luma, &QUANTIZATION_TABLE),
        codec::decompress_block(&symbols.chroma_red, &QUANTIZATION_TABLE),
        codec::decompress_block(&symbols.chroma_blue, &QUANTIZATION_TABLE),
    )
}

/// Reconstruct the blocks on multiple threads.
/// The symbol streams were already consumed in order,
/// so concurrency cannot affect the result.
#[cfg(feature = "rayon")]
fn decompress_all_blocks(all_symbols: Vec<BlockSymbols>) -> Vec<DecompressedBlock> {
    use rayon::prelude::*;
    all_symbols.par_iter().map(decompress_block_planes).collect()
}

#[cfg(not(feature = "rayon"))]
fn decompress_all_blocks(all_symbols: Vec<BlockSymbols>) -> Vec<DecompressedBlock> {
    all_symbols.iter().map(decompress_block_planes).collect()
}
