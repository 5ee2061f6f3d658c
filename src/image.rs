
//! Pixel buffers and single-channel planes,
//! including the partitioning of planes into 8x8 blocks.

use crate::math::{Vec2, RoundingMode};
use crate::error::{Error, Result};


/// Width and height of the blocks that the codec transforms.
pub const BLOCK_WIDTH: usize = 8;

/// Number of samples in one flattened block.
pub const BLOCK_AREA: usize = BLOCK_WIDTH * BLOCK_WIDTH;

/// Number of channels in a pixel buffer.
pub const CHANNEL_COUNT: usize = 3;


/// An interleaved three-channel pixel buffer with eight bits per sample.
/// Row-major, top-left to bottom-right, without padding.
/// This is what the codec consumes and produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {

    /// Width and height of the buffer, in pixels.
    pub resolution: Vec2<usize>,

    /// Interleaved channel values, `resolution.area() * 3` bytes.
    pub data: Vec<u8>,
}

/// A single-channel two-dimensional grid of eight-bit samples.
/// Planes are transient: they only exist while an image is being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {

    /// Width and height of the grid, in samples.
    pub resolution: Vec2<usize>,

    /// Row-major sample values, `resolution.area()` bytes.
    pub samples: Vec<u8>,
}


impl Pixels {

    /// Create a black pixel buffer with the specified resolution.
    pub fn new(resolution: Vec2<usize>) -> Self {
        Pixels { resolution, data: vec![0; resolution.area() * CHANNEL_COUNT] }
    }

    /// Create a pixel buffer from existing interleaved channel data.
    /// Returns an error if the data length does not match the resolution.
    pub fn from_data(resolution: Vec2<usize>, data: Vec<u8>) -> Result<Self> {
        if data.len() != resolution.area() * CHANNEL_COUNT {
            return Err(Error::invalid("pixel buffer length does not match resolution"));
        }

        Ok(Pixels { resolution, data })
    }

    /// The three channel values of the pixel at the specified position.
    #[inline]
    pub fn pixel(&self, position: Vec2<usize>) -> [u8; CHANNEL_COUNT] {
        let index = self.pixel_index(position);
        [self.data[index], self.data[index + 1], self.data[index + 2]]
    }

    /// Overwrite the three channel values of the pixel at the specified position.
    #[inline]
    pub fn set_pixel(&mut self, position: Vec2<usize>, pixel: [u8; CHANNEL_COUNT]) {
        let index = self.pixel_index(position);
        self.data[index .. index + CHANNEL_COUNT].copy_from_slice(&pixel);
    }

    #[inline]
    fn pixel_index(&self, position: Vec2<usize>) -> usize {
        debug_assert!(position.0 < self.resolution.0 && position.1 < self.resolution.1, "pixel position out of bounds");
        (position.1 * self.resolution.0 + position.0) * CHANNEL_COUNT
    }

    /// Extract one channel of this buffer as an independent plane.
    pub fn plane(&self, channel: usize) -> Plane {
        debug_assert!(channel < CHANNEL_COUNT, "channel index out of bounds");

        let samples = self.data.chunks_exact(CHANNEL_COUNT)
            .map(|pixel| pixel[channel])
            .collect();

        Plane { resolution: self.resolution, samples }
    }

    /// Interleave three equally sized planes back into a pixel buffer.
    pub fn from_planes(first: &Plane, second: &Plane, third: &Plane) -> Self {
        debug_assert!(
            first.resolution == second.resolution && second.resolution == third.resolution,
            "planes must have equal resolutions"
        );

        let mut data = Vec::with_capacity(first.samples.len() * CHANNEL_COUNT);

        for index in 0 .. first.samples.len() {
            data.push(first.samples[index]);
            data.push(second.samples[index]);
            data.push(third.samples[index]);
        }

        Pixels { resolution: first.resolution, data }
    }

    /// The block-grid dimensions of this buffer: `ceil(width / 8) x ceil(height / 8)`.
    pub fn block_count(&self) -> Vec2<usize> {
        self.resolution.map(|size| RoundingMode::Up.divide(size, BLOCK_WIDTH))
    }
}


impl Plane {

    /// Create an all-zero plane with the specified resolution.
    pub fn new(resolution: Vec2<usize>) -> Self {
        Plane { resolution, samples: vec![0; resolution.area()] }
    }

    /// The sample at the specified position, or zero if the position
    /// lies outside the plane. Blocks overlapping the right or bottom
    /// edge are padded with zeroes, not replicated.
    #[inline]
    pub fn sample_or_zero(&self, position: Vec2<usize>) -> u8 {
        if position.0 < self.resolution.0 && position.1 < self.resolution.1 {
            self.samples[position.1 * self.resolution.0 + position.0]
        }
        else { 0 }
    }

    /// Extract the 8x8 block at the specified block-grid coordinate,
    /// flattened to row-major order. Out-of-range positions read as zero.
    pub fn block_at(&self, block_position: Vec2<usize>) -> [u8; BLOCK_AREA] {
        let mut block = [0_u8; BLOCK_AREA];

        for row in 0 .. BLOCK_WIDTH {
            for column in 0 .. BLOCK_WIDTH {
                block[row * BLOCK_WIDTH + column] = self.sample_or_zero(Vec2(
                    BLOCK_WIDTH * block_position.0 + column,
                    BLOCK_WIDTH * block_position.1 + row,
                ));
            }
        }

        block
    }

    /// Insert an 8x8 block at the specified block-grid coordinate.
    /// The block must lie completely inside the plane.
    pub fn set_block_at(&mut self, block_position: Vec2<usize>, block: &[u8; BLOCK_AREA]) {
        let width = self.resolution.0;

        for row in 0 .. BLOCK_WIDTH {
            let y = BLOCK_WIDTH * block_position.1 + row;
            let x = BLOCK_WIDTH * block_position.0;
            debug_assert!(y < self.resolution.1 && x + BLOCK_WIDTH <= width, "block position out of bounds");

            self.samples[y * width + x .. y * width + x + BLOCK_WIDTH]
                .copy_from_slice(&block[row * BLOCK_WIDTH .. (row + 1) * BLOCK_WIDTH]);
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plane_extraction_and_interleaving() {
        let pixels = Pixels::from_data(Vec2(2, 1), vec![1, 2, 3, 4, 5, 6]).unwrap();

        let first = pixels.plane(0);
        let second = pixels.plane(1);
        let third = pixels.plane(2);

        assert_eq!(first.samples, vec![1, 4]);
        assert_eq!(second.samples, vec![2, 5]);
        assert_eq!(third.samples, vec![3, 6]);

        assert_eq!(Pixels::from_planes(&first, &second, &third), pixels);
    }

    #[test]
    fn mismatched_data_length_is_invalid() {
        assert!(Pixels::from_data(Vec2(2, 2), vec![0; 11]).is_err());
    }

    #[test]
    fn edge_blocks_are_padded_with_zero() {
        // 9x9 plane of all 7: block (1,1) covers only the bottom-right sample
        let plane = Plane { resolution: Vec2(9, 9), samples: vec![7; 81] };
        let block = plane.block_at(Vec2(1, 1));

        assert_eq!(block[0], 7);
        assert!(block[1 ..].iter().all(|&sample| sample == 0));
    }

    #[test]
    fn block_round_trip() {
        let mut plane = Plane::new(Vec2(16, 8));

        let mut block = [0_u8; BLOCK_AREA];
        for (index, sample) in block.iter_mut().enumerate() {
            *sample = index as u8;
        }

        plane.set_block_at(Vec2(1, 0), &block);
        assert_eq!(plane.block_at(Vec2(1, 0)), block);
        assert_eq!(plane.block_at(Vec2(0, 0)), [0; BLOCK_AREA]);

        // samples land row-major at the pixel offset of the block
        assert_eq!(plane.sample_or_zero(Vec2(8, 0)), 0);
        assert_eq!(plane.sample_or_zero(Vec2(9, 0)), 1);
        assert_eq!(plane.sample_or_zero(Vec2(8, 1)), 8);
    }

    #[test]
    fn block_counts_round_up() {
        assert_eq!(Pixels::new(Vec2(16, 8)).block_count(), Vec2(2, 1));
        assert_eq!(Pixels::new(Vec2(17, 9)).block_count(), Vec2(3, 2));
    }
}
