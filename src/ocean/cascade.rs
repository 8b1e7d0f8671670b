use nalgebra::Vector4;
use num_complex::Complex32;

use crate::ocean::butterfly::ButterflyTable;
use crate::ocean::config::{ CascadeConfig, FoamMode, SpectrumConfig, SpectrumConfigSlot };
use crate::ocean::conjugate::conjugate_spectrum;
use crate::ocean::error::OceanResult;
use crate::ocean::fft::inverse_fft_2d;
use crate::ocean::lambda_buffer::LambdaBuffer;
use crate::ocean::merger::merge_fields;
use crate::ocean::permutation::permute_and_invert;
use crate::ocean::spectrum::{ generate_initial_spectrum, WaveData };
use crate::ocean::texture::{ ComplexPair, PingPongTextures, Texture };
use crate::ocean::time_evolution::evolve_spectrum;

/// One frequency band of the ocean: its spectrum, its transform buffers and its
/// two output textures. Nothing in here is shared with other cascades.
pub struct OceanCascade {
    _index: u32,
    _seed: u64,
    _config: CascadeConfig,
    _spectrum_slot: SpectrumConfigSlot,
    _h0k: Texture<Complex32>,
    _h0: Texture<Complex32>,
    _wave_data: Texture<WaveData>,
    _displacement_fft: PingPongTextures<ComplexPair>,
    _derivative_fft: PingPongTextures<ComplexPair>,
    _displacement_turbulence: Texture<Vector4<f32>>,
    _derivatives: Texture<Vector4<f32>>,
}

impl OceanCascade {
    pub fn create_ocean_cascade(index: u32, fft_size: u32, seed: u64, config: &CascadeConfig) -> OceanCascade {
        log::debug!(
            "create_ocean_cascade: {}, length_scale {}, band [{}, {})",
            index, config._length_scale, config._cutoff_low, config._cutoff_high
        );
        let mut cascade = OceanCascade {
            _index: index,
            _seed: seed,
            _config: config.clone(),
            _spectrum_slot: SpectrumConfigSlot::new(&config._spectrums),
            _h0k: Texture::new(fft_size),
            _h0: Texture::new(fft_size),
            _wave_data: Texture::new(fft_size),
            _displacement_fft: PingPongTextures::new(fft_size),
            _derivative_fft: PingPongTextures::new(fft_size),
            _displacement_turbulence: Texture::new(fft_size),
            _derivatives: Texture::new(fft_size),
        };
        cascade.regenerate_spectrum();
        cascade
    }

    pub fn get_index(&self) -> u32 {
        self._index
    }

    pub fn get_fft_size(&self) -> u32 {
        self._h0k.get_size()
    }

    pub fn get_config(&self) -> &CascadeConfig {
        &self._config
    }

    pub fn get_h0k(&self) -> &Texture<Complex32> {
        &self._h0k
    }

    pub fn get_h0(&self) -> &Texture<Complex32> {
        &self._h0
    }

    pub fn get_wave_data(&self) -> &Texture<WaveData> {
        &self._wave_data
    }

    pub fn get_displacement_turbulence(&self) -> &Texture<Vector4<f32>> {
        &self._displacement_turbulence
    }

    pub fn get_derivatives(&self) -> &Texture<Vector4<f32>> {
        &self._derivatives
    }

    pub fn get_pending_spectrums(&self) -> &[SpectrumConfig] {
        self._spectrum_slot.get_pending()
    }

    pub fn set_pending_spectrums(&mut self, spectrums: &[SpectrumConfig]) -> OceanResult<()> {
        self._spectrum_slot.set_pending(spectrums)
    }

    /// H0K, wave data and H0 from the applied spectrum configuration.
    pub fn regenerate_spectrum(&mut self) {
        log::debug!("regenerate_spectrum: cascade {}", self._index);
        self._config._spectrums = self._spectrum_slot.get_applied().to_vec();
        generate_initial_spectrum(&self._config, self._seed, self._index, &mut self._h0k, &mut self._wave_data);
        conjugate_spectrum(&self._h0k, &mut self._h0);
    }

    /// Picks up pending edits. Returns true when the spectrum was regenerated.
    pub fn apply_pending_spectrums(&mut self) -> bool {
        if self._spectrum_slot.apply_pending() {
            self.regenerate_spectrum();
            return true;
        }
        false
    }

    /// time evolution -> horizontal fft -> vertical fft -> sign correction -> merge
    pub fn simulate(&mut self, table: &ButterflyTable, lambda_buffer: &LambdaBuffer, foam_mode: FoamMode) -> OceanResult<()> {
        table.check_size(self.get_fft_size())?;

        self._displacement_fft.reset();
        self._derivative_fft.reset();
        evolve_spectrum(
            lambda_buffer._time,
            &self._h0k,
            &self._h0,
            &self._wave_data,
            self._displacement_fft.get_current_mut(),
            self._derivative_fft.get_current_mut(),
        );

        inverse_fft_2d(table, &mut self._displacement_fft)?;
        inverse_fft_2d(table, &mut self._derivative_fft)?;

        permute_and_invert(self._displacement_fft.get_current_mut());
        permute_and_invert(self._derivative_fft.get_current_mut());

        merge_fields(
            lambda_buffer,
            foam_mode,
            self._displacement_fft.get_current(),
            self._derivative_fft.get_current(),
            &mut self._displacement_turbulence,
            &mut self._derivatives,
        );
        Ok(())
    }

    /// Packed displacement field after the transform and sign correction of the last frame.
    pub fn get_displacement_field(&self) -> &Texture<ComplexPair> {
        self._displacement_fft.get_current()
    }

    pub fn get_derivative_field(&self) -> &Texture<ComplexPair> {
        self._derivative_fft.get_current()
    }
}
