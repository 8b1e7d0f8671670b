use std::fs;
use std::path::Path;

use serde::{ Serialize, Deserialize };
use strum_macros::{ Display, EnumString };

use crate::constants;
use crate::ocean::error::{ OceanError, OceanResult };
use crate::utilities::math::is_power_of_two;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum FoamMode {
    /// turbulence is the Jacobian of the current frame
    Instant,
    /// turbulence decays toward the Jacobian and keeps crest foam for a while
    Accumulated,
}

impl Default for FoamMode {
    fn default() -> Self {
        FoamMode::Instant
    }
}

/// User-facing parameters of one swell component. Edited live by the UI.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct SpectrumConfig {
    pub _scale: f32,
    pub _wind_speed: f32,
    pub _wind_direction: f32,
    pub _fetch: f32,
    pub _spread_blend: f32,
    pub _swell: f32,
    pub _peak_enhancement: f32,
    pub _short_waves_fade: f32,
}

impl Default for SpectrumConfig {
    fn default() -> SpectrumConfig {
        SpectrumConfig {
            _scale: 1.0,
            _wind_speed: 0.5,
            _wind_direction: -0.5,
            _fetch: 100000.0,
            _spread_blend: 1.0,
            _swell: 0.198,
            _peak_enhancement: 3.3,
            _short_waves_fade: 0.01,
        }
    }
}

impl SpectrumConfig {
    /// The disabled second component of the default setup.
    pub fn secondary_swell() -> SpectrumConfig {
        SpectrumConfig {
            _scale: 0.0,
            _wind_speed: 1.0,
            _wind_direction: 0.0,
            _fetch: 300000.0,
            _spread_blend: 1.0,
            _swell: 1.0,
            _peak_enhancement: 3.3,
            _short_waves_fade: 0.01,
        }
    }

    pub fn is_enabled(&self) -> bool {
        0.0 < self._scale
    }

    pub fn validate(&self) -> OceanResult<()> {
        if false == self._wind_speed.is_finite() || false == self._fetch.is_finite() || self._fetch <= 0.0 {
            return Err(OceanError::DegenerateWindParameters {
                wind_speed: self._wind_speed,
                fetch: self._fetch,
            });
        }
        let parameters = [
            ("scale", self._scale),
            ("wind direction", self._wind_direction),
            ("spread blend", self._spread_blend),
            ("swell", self._swell),
            ("peak enhancement", self._peak_enhancement),
            ("short waves fade", self._short_waves_fade),
        ];
        for (name, value) in parameters {
            if false == value.is_finite() {
                return Err(OceanError::InvalidSpectrumParameter { name, value });
            }
        }
        Ok(())
    }

    pub fn clamped_wind_speed(&self) -> f32 {
        if self._wind_speed < constants::MIN_WIND_SPEED {
            log::warn!("wind speed {} clamped to {}", self._wind_speed, constants::MIN_WIND_SPEED);
            return constants::MIN_WIND_SPEED;
        }
        self._wind_speed
    }
}

pub fn jonswap_alpha(gravity: f32, fetch: f32, wind_speed: f32) -> f32 {
    0.076 * (gravity * fetch / wind_speed / wind_speed).powf(-0.22)
}

pub fn jonswap_peak_omega(gravity: f32, fetch: f32, wind_speed: f32) -> f32 {
    22.0 * (wind_speed * fetch / gravity / gravity).powf(-0.33)
}

/// Values the spectrum generator actually evaluates, derived from a `SpectrumConfig`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectrumParameters {
    pub _scale: f32,
    pub _angle: f32,
    pub _spread_blend: f32,
    pub _swell: f32,
    pub _alpha: f32,
    pub _peak_omega: f32,
    pub _gamma: f32,
    pub _short_waves_fade: f32,
}

impl SpectrumParameters {
    pub fn from_config(config: &SpectrumConfig, gravity: f32) -> SpectrumParameters {
        let wind_speed = config.clamped_wind_speed();
        SpectrumParameters {
            _scale: config._scale,
            _angle: config._wind_direction,
            _spread_blend: config._spread_blend,
            _swell: config._swell.clamp(0.01, 1.0),
            _alpha: jonswap_alpha(gravity, config._fetch, wind_speed),
            _peak_omega: jonswap_peak_omega(gravity, config._fetch, wind_speed),
            _gamma: config._peak_enhancement,
            _short_waves_fade: config._short_waves_fade,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CascadeConfig {
    pub _length_scale: f32,
    pub _cutoff_low: f32,
    pub _cutoff_high: f32,
    pub _gravity: f32,
    pub _depth: f32,
    pub _spectrums: Vec<SpectrumConfig>,
}

impl Default for CascadeConfig {
    fn default() -> CascadeConfig {
        CascadeConfig {
            _length_scale: constants::SINGLE_CASCADE_LENGTH_SCALE,
            _cutoff_low: constants::DEFAULT_CUTOFF_LOW,
            _cutoff_high: constants::DEFAULT_CUTOFF_HIGH,
            _gravity: constants::GRAVITY,
            _depth: constants::WATER_DEPTH,
            _spectrums: default_spectrums(),
        }
    }
}

pub fn default_spectrums() -> Vec<SpectrumConfig> {
    vec![SpectrumConfig::default(), SpectrumConfig::secondary_swell()]
}

pub fn validate_spectrums(spectrums: &[SpectrumConfig]) -> OceanResult<()> {
    if spectrums.is_empty() || constants::MAX_SPECTRUM_COMPONENTS < spectrums.len() {
        return Err(OceanError::InvalidSpectrumComponentCount(spectrums.len(), constants::MAX_SPECTRUM_COMPONENTS));
    }
    for spectrum in spectrums.iter() {
        spectrum.validate()?;
    }
    Ok(())
}

pub fn validate_lambda(lambda: f32) -> OceanResult<()> {
    if false == lambda.is_finite() {
        return Err(OceanError::InvalidLambda(lambda));
    }
    Ok(())
}

impl CascadeConfig {
    /// Frequency band of this cascade is the half-open range [cutoff_low, cutoff_high).
    pub fn contains_wavenumber(&self, k_length: f32) -> bool {
        self._cutoff_low <= k_length && k_length < self._cutoff_high
    }

    pub fn delta_k(&self) -> f32 {
        std::f32::consts::TAU / self._length_scale
    }

    pub fn get_spectrum_parameters(&self) -> Vec<SpectrumParameters> {
        self._spectrums.iter().map(|config| SpectrumParameters::from_config(config, self._gravity)).collect()
    }

    pub fn validate(&self, index: usize) -> OceanResult<()> {
        let invalid = |reason: &str| OceanError::InvalidCascade { index, reason: String::from(reason) };
        if false == (0.0 < self._length_scale && self._length_scale.is_finite()) {
            return Err(invalid("length scale must be positive"));
        }
        if false == (0.0 < self._gravity && self._gravity.is_finite()) {
            return Err(invalid("gravity must be positive"));
        }
        if false == (0.0 < self._depth && self._depth.is_finite()) {
            return Err(invalid("depth must be positive and finite"));
        }
        if false == (0.0 <= self._cutoff_low && self._cutoff_low < self._cutoff_high) {
            return Err(invalid("cutoff band must satisfy 0 <= low < high"));
        }
        validate_spectrums(&self._spectrums)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OceanConfig {
    pub _fft_size: u32,
    pub _lambda: f32,
    pub _seed: u64,
    pub _foam_mode: FoamMode,
    pub _cascades: Vec<CascadeConfig>,
}

impl Default for OceanConfig {
    fn default() -> OceanConfig {
        OceanConfig::four_cascades(constants::DEFAULT_FFT_SIZE)
    }
}

impl OceanConfig {
    pub fn single_cascade(fft_size: u32) -> OceanConfig {
        OceanConfig {
            _fft_size: fft_size,
            _lambda: constants::DEFAULT_LAMBDA,
            _seed: constants::DEFAULT_FFT_SEED,
            _foam_mode: FoamMode::default(),
            _cascades: vec![CascadeConfig::default()],
        }
    }

    pub fn four_cascades(fft_size: u32) -> OceanConfig {
        let length_scales = constants::CASCADE_LENGTH_SCALES;
        let mut boundaries = vec![constants::DEFAULT_CUTOFF_LOW];
        for length_scale in length_scales.iter().skip(1) {
            boundaries.push(std::f32::consts::PI / length_scale * constants::CASCADE_BOUNDARY_FACTOR);
        }
        boundaries.push(constants::DEFAULT_CUTOFF_HIGH);

        let cascades = length_scales.iter().enumerate().map(|(i, length_scale)| CascadeConfig {
            _length_scale: *length_scale,
            _cutoff_low: boundaries[i],
            _cutoff_high: boundaries[i + 1],
            ..Default::default()
        }).collect();

        OceanConfig {
            _fft_size: fft_size,
            _lambda: constants::DEFAULT_LAMBDA,
            _seed: constants::DEFAULT_FFT_SEED,
            _foam_mode: FoamMode::default(),
            _cascades: cascades,
        }
    }

    pub fn validate(&self) -> OceanResult<()> {
        if false == is_power_of_two(self._fft_size) {
            return Err(OceanError::InvalidGridSize(self._fft_size));
        }
        validate_lambda(self._lambda)?;
        if self._cascades.is_empty() || constants::MAX_CASCADE_COUNT < self._cascades.len() {
            return Err(OceanError::InvalidCascadeCount(self._cascades.len(), constants::MAX_CASCADE_COUNT));
        }
        for (index, cascade) in self._cascades.iter().enumerate() {
            cascade.validate(index)?;
        }
        Ok(())
    }

    pub fn load_from_file(file_path: &Path) -> OceanResult<OceanConfig> {
        log::info!("load ocean config: {:?}", file_path);
        let contents = fs::read_to_string(file_path)?;
        let config: OceanConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, file_path: &Path) -> OceanResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(file_path, contents)?;
        Ok(())
    }
}

/// UI edits land in `_pending`; `apply_pending` is the single compare-and-apply
/// step run once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrumConfigSlot {
    _applied: Vec<SpectrumConfig>,
    _pending: Vec<SpectrumConfig>,
}

impl SpectrumConfigSlot {
    pub fn new(spectrums: &[SpectrumConfig]) -> SpectrumConfigSlot {
        SpectrumConfigSlot {
            _applied: spectrums.to_vec(),
            _pending: spectrums.to_vec(),
        }
    }

    pub fn get_applied(&self) -> &[SpectrumConfig] {
        &self._applied
    }

    pub fn get_pending(&self) -> &[SpectrumConfig] {
        &self._pending
    }

    pub fn set_pending(&mut self, spectrums: &[SpectrumConfig]) -> OceanResult<()> {
        validate_spectrums(spectrums)?;
        self._pending = spectrums.to_vec();
        Ok(())
    }

    pub fn has_pending_change(&self) -> bool {
        self._applied != self._pending
    }

    /// Returns true when the applied configuration changed.
    pub fn apply_pending(&mut self) -> bool {
        if self.has_pending_change() {
            self._applied = self._pending.clone();
            return true;
        }
        false
    }
}
