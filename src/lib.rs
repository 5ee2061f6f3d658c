
//! Compress and decompress images with a simplified JPEG-style codec:
//! 8x8 block discrete cosine transform, quantization, zigzag reordering,
//! and a run-length coded container.
//!
//! The container is a flat concatenation of per-block symbol streams.
//! In its default legacy layout it carries no header, so the block-grid
//! dimensions used for writing must be supplied again when reading.
//! Start with `write::write_image_to_buffered` and `read::read_image_from_buffered`.

#![forbid(unsafe_code)]

pub mod io;
pub mod math;
pub mod error;
pub mod image;
pub mod codec;
pub mod container;
pub mod write;
pub mod read;

#[macro_use]
extern crate smallvec;


pub mod prelude {

    //! Import this specific module with `use bqc::prelude::*;` for brevity.

    // main entry points
    pub use crate::write::{write_image_to_file, write_image_to_buffered, WriteOptions, ChromaMode};
    pub use crate::read::{read_image_from_file, read_image_from_buffered, read_headered_image_from_buffered};

    // core data types
    pub use crate::image::{Pixels, Plane};
    pub use crate::container::ContainerFormat;
    pub use crate::math::Vec2;
    pub use crate::error::{Error, Result, UnitResult};
}
