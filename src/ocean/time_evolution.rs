use num_complex::Complex32;
use rayon::prelude::*;

use crate::ocean::spectrum::WaveData;
use crate::ocean::texture::{ ComplexPair, Texture };
use crate::utilities::math::{ mul_i, phase_exponent };

/// Ht(k, t) = H0K(k) e^{i w t} + H0(k) e^{-i w t}.
pub fn get_timed_amplitude(h0k: Complex32, h0: Complex32, omega: f32, time: f32) -> Complex32 {
    let exponent = phase_exponent(omega * time);
    h0k * exponent + h0 * exponent.conj()
}

/// Packs the eight basis terms of one texel into the two transform inputs:
/// (Dx + i Dz, Dy + i Dxz) and (Dyx + i Dyz, Dxx + i Dzz).
pub fn get_timed_sample(h0k: Complex32, h0: Complex32, wave: &WaveData, time: f32) -> (ComplexPair, ComplexPair) {
    let h = get_timed_amplitude(h0k, h0, wave._omega, time);
    let ih = mul_i(h);
    let k_x = wave._k_x;
    let k_z = wave._k_z;
    let inverse_k_length = wave._inverse_k_length;

    let displacement_x = ih * (k_x * inverse_k_length);
    let displacement_y = h;
    let displacement_z = ih * (k_z * inverse_k_length);
    let displacement_x_dx = -h * (k_x * k_x * inverse_k_length);
    let displacement_z_dz = -h * (k_z * k_z * inverse_k_length);
    let displacement_z_dx = -h * (k_x * k_z * inverse_k_length);
    let displacement_y_dx = ih * k_x;
    let displacement_y_dz = ih * k_z;

    let dx_dz = displacement_x + mul_i(displacement_z);
    let dy_dxz = displacement_y + mul_i(displacement_z_dx);
    let dyx_dyz = displacement_y_dx + mul_i(displacement_y_dz);
    let dxx_dzz = displacement_x_dx + mul_i(displacement_z_dz);
    (ComplexPair::new(dx_dz, dy_dxz), ComplexPair::new(dyx_dyz, dxx_dzz))
}

/// Rewrites both packed spectra for `time`. Runs every frame.
pub fn evolve_spectrum(
    time: f32,
    h0k: &Texture<Complex32>,
    h0: &Texture<Complex32>,
    wave_data: &Texture<WaveData>,
    displacement_spectrum: &mut Texture<ComplexPair>,
    derivative_spectrum: &mut Texture<ComplexPair>,
) {
    let size = h0k.get_size() as usize;
    let h0k_data = h0k.get_data();
    let h0_data = h0.get_data();
    let wave_data = wave_data.get_data();
    displacement_spectrum.get_data_mut()
        .par_chunks_mut(size)
        .zip(derivative_spectrum.get_data_mut().par_chunks_mut(size))
        .enumerate()
        .for_each(|(y, (displacement_row, derivative_row))| {
            let offset = y * size;
            for x in 0..size {
                let index = offset + x;
                let (displacement, derivative) = get_timed_sample(h0k_data[index], h0_data[index], &wave_data[index], time);
                displacement_row[x] = displacement;
                derivative_row[x] = derivative;
            }
        });
}
