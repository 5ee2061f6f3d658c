
//! Writing and reading the per-block symbol streams of the container.
//!
//! The container is a flat concatenation of symbol streams: for every
//! block of the grid, in column-major block order, the three planes'
//! sentinel-terminated streams follow each other in luma, chroma-red,
//! chroma-blue order. There are no length prefixes and no delimiters
//! beyond the sentinels.
//!
//! The legacy layout carries no header at all, so the reader must be
//! told the block-grid dimensions that were used for writing. The
//! headered layout prepends four magic bytes and the grid dimensions.

use crate::image::BLOCK_AREA;
use crate::math::Vec2;
use crate::io::{Data, Read, Write};
use crate::error::{Error, Result, UnitResult};
use crate::codec::rle::{Symbol, SymbolVec};


/// How a compressed byte stream is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {

    /// The plain headerless layout. The block-grid dimensions are not
    /// stored anywhere in the stream; whoever reads the stream must be
    /// supplied the dimensions that were used for writing.
    Legacy,

    /// Prepends a magic number and the block-grid dimensions,
    /// allowing readers to recover the grid from the stream itself.
    Headered,
}

impl Default for ContainerFormat {
    fn default() -> Self { ContainerFormat::Legacy }
}


/// The symbol streams of one block, one per plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSymbols {

    /// Symbols of the luma plane, sentinel-terminated.
    pub luma: SymbolVec,

    /// Symbols of the chroma-red plane, sentinel-terminated.
    pub chroma_red: SymbolVec,

    /// Symbols of the chroma-blue plane, sentinel-terminated.
    pub chroma_blue: SymbolVec,
}


/// Append the three symbol streams of one block to the byte stream,
/// in the fixed luma, chroma-red, chroma-blue order.
/// Each stream must already be sentinel-terminated.
pub fn write_block_symbols(write: &mut impl Write, block: &BlockSymbols) -> UnitResult {
    write_plane_symbols(write, &block.luma)?;
    write_plane_symbols(write, &block.chroma_red)?;
    write_plane_symbols(write, &block.chroma_blue)
}

fn write_plane_symbols(write: &mut impl Write, symbols: &[Symbol]) -> UnitResult {
    debug_assert!(
        symbols.last().map(|symbol| symbol.is_end_of_block()) == Some(true),
        "symbol stream must be sentinel-terminated"
    );

    for symbol in symbols {
        symbol.write(write)?;
    }

    Ok(())
}

/// Consume the three symbol streams of one block from the byte stream.
/// Errs with `Error::Io` if the stream ends before a sentinel is found,
/// and with `Error::Invalid` if a stream holds more than 64 data symbols,
/// which can only happen when the stream was written with different
/// block-grid dimensions than the reader was told, or is corrupt.
pub fn read_block_symbols(read: &mut impl Read) -> Result<BlockSymbols> {
    let luma = read_plane_symbols(read)?;
    let chroma_red = read_plane_symbols(read)?;
    let chroma_blue = read_plane_symbols(read)?;

    Ok(BlockSymbols { luma, chroma_red, chroma_blue })
}

fn read_plane_symbols(read: &mut impl Read) -> Result<SymbolVec> {
    let mut symbols = SymbolVec::new();

    loop {
        let symbol = Symbol::read(read)?;
        let is_end_of_block = symbol.is_end_of_block();
        symbols.push(symbol);

        if is_end_of_block {
            return Ok(symbols);
        }

        if symbols.len() > BLOCK_AREA {
            return Err(Error::invalid("block exceeds 64 symbols without end-of-block sentinel"));
        }
    }
}


/// The first four bytes of each headered stream.
/// Used to abort reading unrelated files.
pub mod magic_number {
    use super::*;

    /// The first four bytes of each headered stream.
    pub const BYTES: [u8; 4] = [0x62, 0x71, 0x63, 0x01]; // "bqc" + version

    /// Without validation, write this instance to the byte stream.
    pub fn write(write: &mut impl Write) -> UnitResult {
        u8::write_slice(write, &BYTES)
    }

    /// Consumes four bytes from the reader and returns
    /// whether the stream may be a headered container.
    pub fn is_headered_container(read: &mut impl Read) -> Result<bool> {
        let mut magic = [0_u8; 4];
        u8::read_slice(read, &mut magic)?;
        Ok(magic == self::BYTES)
    }

    /// Consumes four bytes and errs if they are not the magic number.
    pub fn validate(read: &mut impl Read) -> UnitResult {
        if self::is_headered_container(read)? {
            Ok(())
        }
        else {
            Err(Error::invalid("container identifier missing"))
        }
    }
}

/// Write the optional header: magic number,
/// then block-grid width and height as little-endian `u32`.
pub fn write_header(write: &mut impl Write, blocks: Vec2<usize>) -> UnitResult {
    if blocks.0 > u32::MAX as usize || blocks.1 > u32::MAX as usize {
        return Err(Error::unsupported("block grid too large for the header"));
    }

    magic_number::write(write)?;
    (blocks.0 as u32).write(write)?;
    (blocks.1 as u32).write(write)
}

/// Read and validate the optional header, returning the block-grid dimensions.
pub fn read_header(read: &mut impl Read) -> Result<Vec2<usize>> {
    magic_number::validate(read)?;

    let blocks_x = u32::read(read)?;
    let blocks_y = u32::read(read)?;

    Ok(Vec2(blocks_x as usize, blocks_y as usize))
}
