
//! Chroma subsampling: averaging 2x2 pixel neighborhoods.
//!
//! This capability is not part of the default pipeline. When selected,
//! the averaged chroma is replicated back to full resolution before the
//! block transform, so the container layout is unaffected and every
//! decoder can read the result without knowing the mode.

use crate::math::Vec2;
use crate::image::Plane;


/// Shrink a plane by averaging each 2x2 neighborhood,
/// rounding to nearest. Neighborhoods clipped by the right or bottom
/// edge average only the samples that exist.
pub fn average_2x2(plane: &Plane) -> Plane {
    let resolution = plane.resolution.map(|size| (size + 1) / 2);
    let mut averaged = Plane::new(resolution);

    for y in 0 .. resolution.1 {
        for x in 0 .. resolution.0 {
            let mut sum = 0_u32;
            let mut sample_count = 0_u32;

            for position in neighborhood(Vec2(x, y)).iter() {
                if position.0 < plane.resolution.0 && position.1 < plane.resolution.1 {
                    sum += u32::from(plane.samples[position.1 * plane.resolution.0 + position.0]);
                    sample_count += 1;
                }
            }

            let average = (sum as f32 / sample_count as f32).round() as u8;
            averaged.samples[y * resolution.0 + x] = average;
        }
    }

    averaged
}

/// Expand an averaged plane back to the specified resolution
/// by replicating each sample over its 2x2 neighborhood.
pub fn replicate_2x2(averaged: &Plane, resolution: Vec2<usize>) -> Plane {
    let mut expanded = Plane::new(resolution);

    for y in 0 .. averaged.resolution.1 {
        for x in 0 .. averaged.resolution.0 {
            let sample = averaged.samples[y * averaged.resolution.0 + x];

            for position in neighborhood(Vec2(x, y)).iter() {
                if position.0 < resolution.0 && position.1 < resolution.1 {
                    expanded.samples[position.1 * resolution.0 + position.0] = sample;
                }
            }
        }
    }

    expanded
}

/// The four full-resolution positions covered by one averaged sample.
fn neighborhood(position: Vec2<usize>) -> [Vec2<usize>; 4] {
    let corner = position.map(|coordinate| 2 * coordinate);
    [
        corner,
        Vec2(corner.0 + 1, corner.1),
        Vec2(corner.0, corner.1 + 1),
        Vec2(corner.0 + 1, corner.1 + 1),
    ]
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn averages_full_neighborhoods() {
        let plane = Plane { resolution: Vec2(2, 2), samples: vec![10, 20, 30, 41] };
        let averaged = average_2x2(&plane);

        assert_eq!(averaged.resolution, Vec2(1, 1));
        assert_eq!(averaged.samples, vec![25]); // 101 / 4 rounds to 25
    }

    #[test]
    fn clipped_neighborhoods_use_fewer_samples() {
        // 3x1 plane: second neighborhood has a single sample
        let plane = Plane { resolution: Vec2(3, 1), samples: vec![10, 20, 99] };
        let averaged = average_2x2(&plane);

        assert_eq!(averaged.resolution, Vec2(2, 1));
        assert_eq!(averaged.samples, vec![15, 99]);
    }

    #[test]
    fn replication_covers_the_full_resolution() {
        let averaged = Plane { resolution: Vec2(2, 1), samples: vec![5, 7] };
        let expanded = replicate_2x2(&averaged, Vec2(3, 2));

        assert_eq!(expanded.samples, vec![
            5, 5, 7,
            5, 5, 7,
        ]);
    }

    #[test]
    fn average_then_replicate_preserves_constant_planes() {
        let plane = Plane { resolution: Vec2(5, 3), samples: vec![42; 15] };
        let expanded = replicate_2x2(&average_2x2(&plane), plane.resolution);

        assert_eq!(expanded, plane);
    }
}
