use rayon::prelude::*;

use crate::ocean::butterfly::ButterflyTable;
use crate::ocean::cascade::OceanCascade;
use crate::ocean::config::{ validate_lambda, FoamMode, OceanConfig, SpectrumConfig };
use crate::ocean::error::{ OceanError, OceanResult };
use crate::ocean::lambda_buffer::LambdaBuffer;

/// Drives every cascade once per frame. Spectrum edits are only picked up at the
/// start of `update`, after which all cascades run time evolution, both
/// transforms, sign correction and merge with the same lambda buffer.
pub struct FFTOcean {
    _name: String,
    _acc_time: f32,
    _lambda: f32,
    _fft_seed: u64,
    _foam_mode: FoamMode,
    _lambda_buffer: LambdaBuffer,
    _butterfly_table: ButterflyTable,
    _cascades: Vec<OceanCascade>,
}

fn create_cascades(config: &OceanConfig) -> Vec<OceanCascade> {
    config._cascades.iter().enumerate().map(|(index, cascade_config)| {
        OceanCascade::create_ocean_cascade(index as u32, config._fft_size, config._seed, cascade_config)
    }).collect()
}

impl FFTOcean {
    pub fn create_fft_ocean(config: &OceanConfig) -> OceanResult<FFTOcean> {
        config.validate()?;
        log::info!(
            "create_fft_ocean: fft_size {}, cascades {}, foam {}",
            config._fft_size, config._cascades.len(), config._foam_mode
        );
        Ok(FFTOcean {
            _name: String::from("ocean"),
            _acc_time: 0.0,
            _lambda: config._lambda,
            _fft_seed: config._seed,
            _foam_mode: config._foam_mode,
            _lambda_buffer: LambdaBuffer::new(0.0, 0.0, config._lambda),
            _butterfly_table: ButterflyTable::new(config._fft_size)?,
            _cascades: create_cascades(config),
        })
    }

    pub fn get_name(&self) -> &str {
        &self._name
    }

    pub fn get_fft_size(&self) -> u32 {
        self._butterfly_table.get_fft_size()
    }

    pub fn get_acc_time(&self) -> f32 {
        self._acc_time
    }

    pub fn get_lambda(&self) -> f32 {
        self._lambda
    }

    pub fn set_lambda(&mut self, lambda: f32) -> OceanResult<()> {
        validate_lambda(lambda)?;
        self._lambda = lambda;
        Ok(())
    }

    pub fn get_foam_mode(&self) -> FoamMode {
        self._foam_mode
    }

    pub fn set_foam_mode(&mut self, foam_mode: FoamMode) {
        self._foam_mode = foam_mode;
    }

    pub fn get_lambda_buffer(&self) -> &LambdaBuffer {
        &self._lambda_buffer
    }

    pub fn get_butterfly_table(&self) -> &ButterflyTable {
        &self._butterfly_table
    }

    pub fn get_cascade_count(&self) -> usize {
        self._cascades.len()
    }

    pub fn get_cascades(&self) -> &[OceanCascade] {
        &self._cascades
    }

    pub fn get_cascade(&self, index: usize) -> OceanResult<&OceanCascade> {
        self._cascades.get(index).ok_or(OceanError::CascadeIndexOutOfRange(index))
    }

    pub fn reset_time(&mut self) {
        self._acc_time = 0.0;
    }

    /// Queues a spectrum edit for one cascade. It is validated now and applied
    /// at the start of the next `update`.
    pub fn set_spectrum_configs(&mut self, cascade_index: usize, spectrums: &[SpectrumConfig]) -> OceanResult<()> {
        let cascade = self._cascades.get_mut(cascade_index).ok_or(OceanError::CascadeIndexOutOfRange(cascade_index))?;
        cascade.set_pending_spectrums(spectrums)
    }

    /// Current configuration, with the applied spectrums of every cascade.
    pub fn get_config(&self) -> OceanConfig {
        OceanConfig {
            _fft_size: self.get_fft_size(),
            _lambda: self._lambda,
            _seed: self._fft_seed,
            _foam_mode: self._foam_mode,
            _cascades: self._cascades.iter().map(|cascade| cascade.get_config().clone()).collect(),
        }
    }

    /// Rebuilds the butterfly table and every cascade for a new grid size.
    /// Spectrum edits still pending carry over and apply on the next `update`.
    pub fn set_fft_size(&mut self, fft_size: u32) -> OceanResult<()> {
        let mut config = self.get_config();
        config._fft_size = fft_size;
        config.validate()?;
        log::info!("set_fft_size: {} -> {}", self.get_fft_size(), fft_size);
        let butterfly_table = ButterflyTable::new(fft_size)?;
        let mut cascades = create_cascades(&config);
        for (cascade, previous) in cascades.iter_mut().zip(self._cascades.iter()) {
            cascade.set_pending_spectrums(previous.get_pending_spectrums())?;
        }
        self._butterfly_table = butterfly_table;
        self._cascades = cascades;
        Ok(())
    }

    pub fn update(&mut self, delta_time: f32) -> OceanResult<()> {
        let delta_time = delta_time.max(0.0);
        self._acc_time += delta_time;
        self._lambda_buffer = LambdaBuffer::new(self._acc_time, delta_time, self._lambda);

        let table = &self._butterfly_table;
        let lambda_buffer = self._lambda_buffer;
        let foam_mode = self._foam_mode;
        self._cascades.par_iter_mut().try_for_each(|cascade| {
            if cascade.apply_pending_spectrums() {
                log::info!("spectrum changed: cascade {}", cascade.get_index());
            }
            cascade.simulate(table, &lambda_buffer, foam_mode)
        })
    }
}
