
//! Compress a pixel buffer into a byte stream.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::math::Vec2;
use crate::io::Write;
use crate::error::UnitResult;
use crate::image::{Pixels, Plane};
use crate::codec;
use crate::codec::{csc, subsample};
use crate::codec::quantize::QUANTIZATION_TABLE;
use crate::container::{self, BlockSymbols, ContainerFormat};


/// Whether chroma planes are compressed as-is or averaged first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromaMode {

    /// Compress the chroma planes at full resolution,
    /// exactly like the luma plane. The default.
    Full,

    /// Average each 2x2 chroma neighborhood before compressing.
    /// The averaged values are replicated back to full resolution,
    /// so the container layout is unchanged and any reader can
    /// decode the result without knowing this mode was used.
    Averaged2x2,
}

/// How an image is compressed and framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {

    /// How the byte stream is framed. `ContainerFormat::Legacy` by default.
    pub format: ContainerFormat,

    /// Whether chroma is averaged before compression. `ChromaMode::Full` by default.
    pub chroma: ChromaMode,

    /// Whether blocks may be compressed concurrently.
    /// The written bytes are identical either way, as the symbol
    /// streams are always written in the fixed block order.
    /// Has no effect unless the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            format: ContainerFormat::Legacy,
            chroma: ChromaMode::Full,
            parallel: true,
        }
    }
}


/// Compress the image and write the resulting byte stream to a file at the specified path.
/// The file is created, or truncated if it exists.
///
/// For the legacy container format, remember that the reader will need the
/// block-grid dimensions, `pixels.block_count()`, alongside the file.
pub fn write_image_to_file(path: impl AsRef<Path>, pixels: &Pixels, options: WriteOptions) -> UnitResult {
    let mut write = BufWriter::new(File::create(path)?);
    write_image_to_buffered(&mut write, pixels, options)
}

/// Compress the image and write the resulting byte stream to the writer.
/// Assumes the writer is buffered.
///
/// The image is converted to Y'CrCb and split into three full-resolution
/// planes. For every block of the `ceil(width / 8) x ceil(height / 8)`
/// grid, visited in column-major order, the three planes' compressed
/// symbol streams are written in luma, chroma-red, chroma-blue order.
pub fn write_image_to_buffered(write: &mut impl Write, pixels: &Pixels, options: WriteOptions) -> UnitResult {
    let converted = csc::rgb_image_to_ycrcb(pixels);

    let luma = converted.plane(0);
    let mut chroma_red = converted.plane(1);
    let mut chroma_blue = converted.plane(2);

    if options.chroma == ChromaMode::Averaged2x2 {
        chroma_red = subsample::replicate_2x2(&subsample::average_2x2(&chroma_red), converted.resolution);
        chroma_blue = subsample::replicate_2x2(&subsample::average_2x2(&chroma_blue), converted.resolution);
    }

    let blocks = pixels.block_count();

    if options.format == ContainerFormat::Headered {
        container::write_header(write, blocks)?;
    }

    write_all_blocks(write, &luma, &chroma_red, &chroma_blue, blocks, options.parallel)
}

/// All block coordinates of the grid, in the fixed container order:
/// column-major, outer loop over block columns.
fn block_coordinates(blocks: Vec2<usize>) -> impl Iterator<Item = Vec2<usize>> {
    (0 .. blocks.0).flat_map(move |x| (0 .. blocks.1).map(move |y| Vec2(x, y)))
}

/// Compress the three planes of one block.
fn compress_block_planes(
    luma: &Plane, chroma_red: &Plane, chroma_blue: &Plane,
    position: Vec2<usize>
) -> BlockSymbols {
    BlockSymbols {
        luma: codec::compress_block(&luma.block_at(position), &QUANTIZATION_TABLE),
        chroma_red: codec::compress_block(&chroma_red.block_at(position), &QUANTIZATION_TABLE),
        chroma_blue: codec::compress_block(&chroma_blue.block_at(position), &QUANTIZATION_TABLE),
    }
}

/// Compress blocks on multiple threads, then write the
/// collected symbol streams in the fixed block order.
#[cfg(feature = "rayon")]
fn write_all_blocks(
    write: &mut impl Write,
    luma: &Plane, chroma_red: &Plane, chroma_blue: &Plane,
    blocks: Vec2<usize>, parallel: bool
) -> UnitResult {
    use rayon::prelude::*;

    if !parallel {
        return write_all_blocks_sequential(write, luma, chroma_red, chroma_blue, blocks);
    }

    let coordinates: Vec<Vec2<usize>> = block_coordinates(blocks).collect();

    // transforming the blocks is embarrassingly parallel, but the byte
    // stream is strictly ordered, so collect first and write afterwards
    let compressed: Vec<BlockSymbols> = coordinates.par_iter()
        .map(|position| compress_block_planes(luma, chroma_red, chroma_blue, *position))
        .collect();

    for block in &compressed {
        container::write_block_symbols(write, block)?;
    }

    Ok(())
}

/// Compress and immediately write one block after another.
#[cfg(not(feature = "rayon"))]
fn write_all_blocks(
    write: &mut impl Write,
    luma: &Plane, chroma_red: &Plane, chroma_blue: &Plane,
    blocks: Vec2<usize>, _parallel: bool
) -> UnitResult {
    write_all_blocks_sequential(write, luma, chroma_red, chroma_blue, blocks)
}

fn write_all_blocks_sequential(
    write: &mut impl Write,
    luma: &Plane, chroma_red: &Plane, chroma_blue: &Plane,
    blocks: Vec2<usize>
) -> UnitResult {
    for position in block_coordinates(blocks) {
        let block = compress_block_planes(luma, chroma_red, chroma_blue, position);
        container::write_block_symbols(write, &block)?;
    }

    Ok(())
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coordinates_are_column_major() {
        let coordinates: Vec<Vec2<usize>> = block_coordinates(Vec2(2, 3)).collect();

        assert_eq!(coordinates, vec![
            Vec2(0, 0), Vec2(0, 1), Vec2(0, 2),
            Vec2(1, 0), Vec2(1, 1), Vec2(1, 2),
        ]);
    }

    #[test]
    #[cfg(feature = "rayon")]
    fn parallel_output_is_byte_identical() {
        let mut pixels = Pixels::new(Vec2(24, 16));
        for (index, value) in pixels.data.iter_mut().enumerate() {
            *value = (index % 251) as u8;
        }

        let mut sequential = Vec::new();
        let mut parallel = Vec::new();

        write_image_to_buffered(&mut sequential, &pixels, WriteOptions { parallel: false, .. Default::default() }).unwrap();
        write_image_to_buffered(&mut parallel, &pixels, WriteOptions { parallel: true, .. Default::default() }).unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn mid_gray_image_compresses_to_single_runs() {
        let pixels = Pixels::from_data(Vec2(8, 8), vec![128; 8 * 8 * 3]).unwrap();

        let mut bytes = Vec::new();
        write_image_to_buffered(&mut bytes, &pixels, WriteOptions::default()).unwrap();

        // one block, three planes, each a single run plus sentinel
        assert_eq!(bytes, vec![
            0, 64, 0xff, 0x00,
            0, 64, 0xff, 0x00,
            0, 64, 0xff, 0x00,
        ]);
    }
}
