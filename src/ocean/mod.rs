pub mod butterfly;
pub mod cascade;
pub mod config;
pub mod conjugate;
pub mod error;
pub mod fft;
pub mod fft_ocean;
pub mod lambda_buffer;
pub mod merger;
pub mod permutation;
pub mod spectrum;
pub mod statistics;
pub mod texture;
pub mod time_evolution;

pub use self::config::{ CascadeConfig, FoamMode, OceanConfig, SpectrumConfig };
pub use self::error::{ OceanError, OceanResult };
pub use self::fft_ocean::FFTOcean;
