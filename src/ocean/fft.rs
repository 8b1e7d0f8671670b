use num_complex::Complex32;
use rayon::prelude::*;
use serde::{ Serialize, Deserialize };
use strum_macros::{ Display, EnumString };

use crate::ocean::butterfly::{ ButterflyLookup, ButterflyTable };
use crate::ocean::error::OceanResult;
use crate::ocean::texture::{ FftTexel, PingPongTextures, Texture };

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum FftDirection {
    Forward,
    Inverse,
}

fn get_twiddle(lookup: &ButterflyLookup, direction: FftDirection) -> Complex32 {
    match direction {
        FftDirection::Forward => lookup._twiddle,
        FftDirection::Inverse => lookup._twiddle.conj(),
    }
}

/// One butterfly stage along x. Every row is independent.
pub fn horizontal_pass<T: FftTexel>(
    table: &ButterflyTable,
    pass: u32,
    direction: FftDirection,
    src: &Texture<T>,
    dst: &mut Texture<T>,
) {
    let size = src.get_size() as usize;
    let lookup_row = table.get_lookup_row(pass);
    dst.get_data_mut()
        .par_chunks_mut(size)
        .zip(src.get_data().par_chunks(size))
        .for_each(|(dst_row, src_row)| {
            for (x, texel) in dst_row.iter_mut().enumerate() {
                let lookup = &lookup_row[x];
                let twiddle = get_twiddle(lookup, direction);
                *texel = src_row[lookup._sources[0] as usize] + src_row[lookup._sources[1] as usize] * twiddle;
            }
        });
}

/// One butterfly stage along y. Each destination row gathers two whole source rows.
pub fn vertical_pass<T: FftTexel>(
    table: &ButterflyTable,
    pass: u32,
    direction: FftDirection,
    src: &Texture<T>,
    dst: &mut Texture<T>,
) {
    let size = src.get_size() as usize;
    let lookup_row = table.get_lookup_row(pass);
    let src_data = src.get_data();
    dst.get_data_mut()
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let lookup = &lookup_row[y];
            let twiddle = get_twiddle(lookup, direction);
            let row0 = lookup._sources[0] as usize * size;
            let row1 = lookup._sources[1] as usize * size;
            let src_row0 = &src_data[row0..row0 + size];
            let src_row1 = &src_data[row1..row1 + size];
            for (x, texel) in dst_row.iter_mut().enumerate() {
                *texel = src_row0[x] + src_row1[x] * twiddle;
            }
        });
}

/// Full 2D transform: log2(N) horizontal stages, then log2(N) vertical stages,
/// ping-ponging between the two buffers. Each stage's parallel sweep completes
/// before the next one starts. The result is left in the current buffer and
/// is not normalised.
pub fn fft_2d<T: FftTexel>(
    table: &ButterflyTable,
    direction: FftDirection,
    buffers: &mut PingPongTextures<T>,
) -> OceanResult<()> {
    table.check_size(buffers.get_size())?;

    for pass in 0..table.get_passes() {
        let (src, dst) = buffers.split();
        horizontal_pass(table, pass, direction, src, dst);
        buffers.swap();
    }

    for pass in 0..table.get_passes() {
        let (src, dst) = buffers.split();
        vertical_pass(table, pass, direction, src, dst);
        buffers.swap();
    }
    Ok(())
}

pub fn inverse_fft_2d<T: FftTexel>(table: &ButterflyTable, buffers: &mut PingPongTextures<T>) -> OceanResult<()> {
    fft_2d(table, FftDirection::Inverse, buffers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::error::OceanError;
    use crate::ocean::texture::ComplexPair;
    use rand::{ Rng, SeedableRng };
    use rand_chacha::ChaCha8Rng;
    use rustfft::FftPlanner;

    fn random_texture(size: u32, seed: u64) -> Texture<Complex32> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut texture = Texture::new(size);
        for texel in texture.get_data_mut().iter_mut() {
            *texel = Complex32::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        }
        texture
    }

    fn reference_inverse_2d(texture: &Texture<Complex32>) -> Vec<Complex32> {
        let size = texture.get_size() as usize;
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_inverse(size);
        let mut data: Vec<Complex32> = texture.get_data().to_vec();
        for row in data.chunks_mut(size) {
            fft.process(row);
        }
        let mut column = vec![Complex32::new(0.0, 0.0); size];
        for x in 0..size {
            for y in 0..size {
                column[y] = data[x + y * size];
            }
            fft.process(&mut column);
            for y in 0..size {
                data[x + y * size] = column[y];
            }
        }
        data
    }

    #[test]
    fn test_impulse_gives_constant() {
        let size = 16;
        let table = ButterflyTable::new(size).unwrap();
        let mut buffers: PingPongTextures<Complex32> = PingPongTextures::new(size);
        buffers.get_current_mut().set(0, 0, Complex32::new(1.0, 0.0));
        inverse_fft_2d(&table, &mut buffers).unwrap();

        assert_eq!(buffers.get_current_index(), 0);
        for texel in buffers.get_current().get_data() {
            assert!((texel.norm() - 1.0).abs() < 1e-5);
            assert!((texel.re - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_shifted_impulse_gives_plane_wave() {
        let size = 8;
        let table = ButterflyTable::new(size).unwrap();
        let mut buffers: PingPongTextures<Complex32> = PingPongTextures::new(size);
        buffers.get_current_mut().set(1, 0, Complex32::new(1.0, 0.0));
        inverse_fft_2d(&table, &mut buffers).unwrap();

        let output = buffers.get_current();
        for y in 0..size {
            for x in 0..size {
                let angle = std::f32::consts::TAU * x as f32 / size as f32;
                let expected = Complex32::new(angle.cos(), angle.sin());
                assert!((output.get(x, y) - expected).norm() < 1e-5);
            }
        }
    }

    #[test]
    fn test_matches_reference_fft() {
        let size = 32;
        let table = ButterflyTable::new(size).unwrap();
        let input = random_texture(size, 7);
        let expected = reference_inverse_2d(&input);

        let mut buffers: PingPongTextures<Complex32> = PingPongTextures::new(size);
        *buffers.get_current_mut() = input;
        inverse_fft_2d(&table, &mut buffers).unwrap();

        for (actual, expected) in buffers.get_current().get_data().iter().zip(expected.iter()) {
            assert!((*actual - *expected).norm() < 1e-3, "{} != {}", actual, expected);
        }
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let size = 16;
        let table = ButterflyTable::new(size).unwrap();
        let input = random_texture(size, 11);
        let mut buffers: PingPongTextures<Complex32> = PingPongTextures::new(size);
        *buffers.get_current_mut() = input.clone();

        fft_2d(&table, FftDirection::Forward, &mut buffers).unwrap();
        fft_2d(&table, FftDirection::Inverse, &mut buffers).unwrap();

        let scale = 1.0 / (size * size) as f32;
        for (actual, expected) in buffers.get_current().get_data().iter().zip(input.get_data().iter()) {
            assert!((*actual * scale - *expected).norm() < 1e-4);
        }
    }

    #[test]
    fn test_packed_pair_transforms_both_lanes() {
        let size = 16;
        let table = ButterflyTable::new(size).unwrap();
        let first = random_texture(size, 3);
        let second = random_texture(size, 5);

        let mut packed: PingPongTextures<ComplexPair> = PingPongTextures::new(size);
        packed.get_current_mut().fill_with(|x, y| ComplexPair::new(first.get(x, y), second.get(x, y)));
        inverse_fft_2d(&table, &mut packed).unwrap();

        let expected_first = reference_inverse_2d(&first);
        let expected_second = reference_inverse_2d(&second);
        for (i, texel) in packed.get_current().get_data().iter().enumerate() {
            assert!((texel.0 - expected_first[i]).norm() < 1e-3);
            assert!((texel.1 - expected_second[i]).norm() < 1e-3);
        }
    }

    #[test]
    fn test_rejects_stale_table() {
        let table = ButterflyTable::new(16).unwrap();
        let mut buffers: PingPongTextures<Complex32> = PingPongTextures::new(32);
        assert!(matches!(
            inverse_fft_2d(&table, &mut buffers),
            Err(OceanError::StaleButterflyTable { .. })
        ));
    }
}
