use num_complex::Complex32;
use rand::{ Rng, SeedableRng };
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;

use crate::constants;
use crate::ocean::config::{ CascadeConfig, SpectrumParameters };
use crate::ocean::texture::Texture;
use crate::utilities::math::{ centered_index, lerp, sqr, texel_seed };

/// Per-texel wave vector data, (k.x, 1/|k|, k.z, omega). 1/|k| is zero where the
/// texel carries no energy, so downstream stages never divide by |k| themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveData {
    pub _k_x: f32,
    pub _inverse_k_length: f32,
    pub _k_z: f32,
    pub _omega: f32,
}

/// Dispersion relation for gravity waves at finite depth.
pub fn get_omega(k: f32, gravity: f32, depth: f32) -> f32 {
    (gravity * k * (k * depth).min(constants::MAX_DEPTH_ARGUMENT).tanh()).sqrt()
}

pub fn get_omega_derivative(k: f32, gravity: f32, depth: f32) -> f32 {
    let omega = get_omega(k, gravity, depth);
    let kd = k * depth;
    // sech^2 vanishes past the clamp, leaving the deep water g / (2 omega)
    if constants::MAX_DEPTH_ARGUMENT <= kd {
        return gravity / omega / 2.0;
    }
    let th = kd.tanh();
    let ch = kd.cosh();
    gravity * (kd / ch / ch + th) / omega / 2.0
}

// TMA shallow water attenuation of the deep water spectrum
fn tma_correction(omega: f32, gravity: f32, depth: f32) -> f32 {
    let omega_h = omega * (depth / gravity).sqrt();
    if omega_h <= 1.0 {
        return 0.5 * omega_h * omega_h;
    }
    if omega_h < 2.0 {
        return 1.0 - 0.5 * sqr(2.0 - omega_h);
    }
    1.0
}

pub fn jonswap(omega: f32, gravity: f32, depth: f32, parameters: &SpectrumParameters) -> f32 {
    let peak_omega = parameters._peak_omega;
    let sigma = if omega <= peak_omega { 0.07 } else { 0.09 };
    let r = (-sqr(omega - peak_omega) / 2.0 / sqr(sigma) / sqr(peak_omega)).exp();
    let one_over_omega = 1.0 / omega;
    let peak_omega_over_omega = peak_omega / omega;
    parameters._scale * tma_correction(omega, gravity, depth) * parameters._alpha * gravity * gravity
        * one_over_omega.powi(5)
        * (-1.25 * peak_omega_over_omega.powi(4)).exp()
        * parameters._gamma.abs().powf(r)
}

fn normalisation_factor(s: f32) -> f32 {
    let s2 = s * s;
    let s3 = s2 * s;
    let s4 = s3 * s;
    if s < 5.0 {
        -0.000564 * s4 + 0.00776 * s3 - 0.044 * s2 + 0.192 * s + 0.163
    } else {
        -4.80e-08 * s4 + 1.07e-05 * s3 - 9.53e-04 * s2 + 5.90e-02 * s + 3.93e-01
    }
}

fn cosine_2s(theta: f32, s: f32) -> f32 {
    normalisation_factor(s) * (0.5 * theta).cos().abs().powf(2.0 * s)
}

fn spread_power(omega: f32, peak_omega: f32) -> f32 {
    if peak_omega < omega {
        9.77 * (omega / peak_omega).abs().powf(-2.5)
    } else {
        6.97 * (omega / peak_omega).abs().powf(5.0)
    }
}

/// Blend between a plain cos^2 lobe and the swell-sharpened cosine-2s lobe.
pub fn direction_spectrum(theta: f32, omega: f32, parameters: &SpectrumParameters) -> f32 {
    let peak_omega = parameters._peak_omega;
    let s = spread_power(omega, peak_omega)
        + 16.0 * (omega / peak_omega).min(20.0).tanh() * sqr(parameters._swell);
    let relative_theta = theta - parameters._angle;
    lerp(
        2.0 / std::f32::consts::PI * sqr(relative_theta.cos()),
        cosine_2s(relative_theta, s),
        parameters._spread_blend,
    )
}

pub fn short_waves_fade(k_length: f32, parameters: &SpectrumParameters) -> f32 {
    (-sqr(parameters._short_waves_fade) * sqr(k_length)).exp()
}

/// Directional energy density summed over the enabled swell components.
pub fn spectrum_density(
    k_length: f32,
    k_angle: f32,
    omega: f32,
    cascade: &CascadeConfig,
    spectrum_parameters: &[SpectrumParameters],
) -> f32 {
    let mut spectrum = 0.0;
    for parameters in spectrum_parameters.iter() {
        if parameters._scale <= 0.0 {
            continue;
        }
        spectrum += jonswap(omega, cascade._gravity, cascade._depth, parameters)
            * direction_spectrum(k_angle, omega, parameters)
            * short_waves_fade(k_length, parameters);
    }
    spectrum
}

/// Two unit-variance gaussian draws that depend only on (seed, layer, x, y).
pub fn gaussian_pair(seed: u64, layer: u32, x: u32, y: u32) -> (f32, f32) {
    let mut rng = ChaCha8Rng::seed_from_u64(texel_seed(seed, layer, x, y));
    let real: f32 = rng.sample(StandardNormal);
    let imaginary: f32 = rng.sample(StandardNormal);
    (real, imaginary)
}

fn get_spectrum_sample(
    x: u32,
    y: u32,
    fft_size: u32,
    seed: u64,
    layer: u32,
    cascade: &CascadeConfig,
    spectrum_parameters: &[SpectrumParameters],
) -> (Complex32, WaveData) {
    let delta_k = cascade.delta_k();
    let k_x = centered_index(x, fft_size) as f32 * delta_k;
    let k_z = centered_index(y, fft_size) as f32 * delta_k;
    let k_length = (k_x * k_x + k_z * k_z).sqrt();

    // the nyquist row and column have no mirrored partner with the opposite
    // wave vector, so they would leak imaginary parts into the spatial field
    let is_nyquist = 0 == x || 0 == y;
    if is_nyquist || 0.0 == k_length || false == cascade.contains_wavenumber(k_length) {
        let wave_data = WaveData { _k_x: k_x, _inverse_k_length: 0.0, _k_z: k_z, _omega: 0.0 };
        return (Complex32::new(0.0, 0.0), wave_data);
    }

    let k_angle = k_z.atan2(k_x);
    let omega = get_omega(k_length, cascade._gravity, cascade._depth);
    let omega_derivative = get_omega_derivative(k_length, cascade._gravity, cascade._depth);
    let spectrum = spectrum_density(k_length, k_angle, omega, cascade, spectrum_parameters);
    let amplitude = (2.0 * spectrum * omega_derivative.abs() / k_length * delta_k * delta_k).sqrt();
    let (real, imaginary) = gaussian_pair(seed, layer, x, y);

    let wave_data = WaveData {
        _k_x: k_x,
        _inverse_k_length: 1.0 / k_length,
        _k_z: k_z,
        _omega: omega,
    };
    (Complex32::new(real, imaginary) * amplitude, wave_data)
}

/// Writes H0K and the wave data texture for one cascade. `layer` keeps the
/// random draws of different cascades independent.
pub fn generate_initial_spectrum(
    cascade: &CascadeConfig,
    seed: u64,
    layer: u32,
    h0k: &mut Texture<Complex32>,
    wave_data: &mut Texture<WaveData>,
) {
    let fft_size = h0k.get_size();
    let spectrum_parameters = cascade.get_spectrum_parameters();
    h0k.get_data_mut()
        .par_chunks_mut(fft_size as usize)
        .zip(wave_data.get_data_mut().par_chunks_mut(fft_size as usize))
        .enumerate()
        .for_each(|(y, (h0k_row, wave_data_row))| {
            for x in 0..fft_size {
                let (h0k_texel, wave_data_texel) = get_spectrum_sample(
                    x, y as u32, fft_size, seed, layer, cascade, &spectrum_parameters,
                );
                h0k_row[x as usize] = h0k_texel;
                wave_data_row[x as usize] = wave_data_texel;
            }
        });
}
