use nalgebra::Vector4;
use num_complex::Complex32;
use serde::{ Serialize, Deserialize };

use crate::ocean::spectrum::WaveData;
use crate::ocean::texture::Texture;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct ChannelStatistics {
    pub _mean: f32,
    pub _rms: f32,
    pub _min: f32,
    pub _max: f32,
}

/// Per channel summary of an output texture, accumulated in f64.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldStatistics {
    pub _channels: [ChannelStatistics; 4],
}

impl FieldStatistics {
    pub fn from_texture(texture: &Texture<Vector4<f32>>) -> FieldStatistics {
        let mut sum = [0.0f64; 4];
        let mut sum_square = [0.0f64; 4];
        let mut min = [f32::MAX; 4];
        let mut max = [f32::MIN; 4];
        for texel in texture.get_data() {
            for channel in 0..4 {
                let value = texel[channel];
                sum[channel] += value as f64;
                sum_square[channel] += (value as f64) * (value as f64);
                min[channel] = min[channel].min(value);
                max[channel] = max[channel].max(value);
            }
        }

        let count = texture.get_data().len().max(1) as f64;
        let mut statistics = FieldStatistics::default();
        for channel in 0..4 {
            statistics._channels[channel] = ChannelStatistics {
                _mean: (sum[channel] / count) as f32,
                _rms: (sum_square[channel] / count).sqrt() as f32,
                _min: min[channel],
                _max: max[channel],
            };
        }
        statistics
    }

    pub fn get_channel(&self, channel: usize) -> &ChannelStatistics {
        &self._channels[channel]
    }
}

pub fn get_slope_variance(k_x: f32, k_z: f32, h0k: Complex32) -> f32 {
    let k_square = k_x * k_x + k_z * k_z;
    k_square * h0k.norm_sqr() * 2.0
}

/// Total slope variance carried by one cascade's initial spectrum.
pub fn spectrum_slope_variance(h0k: &Texture<Complex32>, wave_data: &Texture<WaveData>) -> f64 {
    h0k.get_data().iter().zip(wave_data.get_data().iter())
        .map(|(amplitude, wave)| get_slope_variance(wave._k_x, wave._k_z, *amplitude) as f64)
        .sum()
}
