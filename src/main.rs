use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use serde::Serialize;

use rust_ocean_fft::constants;
use rust_ocean_fft::ocean::statistics::{ spectrum_slope_variance, FieldStatistics };
use rust_ocean_fft::ocean::{ FFTOcean, OceanConfig, OceanResult };
use rust_ocean_fft::utilities::logger;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ocean_simulation")]
#[command(about = "Headless FFT ocean simulation", long_about = None)]
struct Args {
    /// Ocean config json. Built in presets are used when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value = "60")]
    frames: u32,

    /// Seconds per frame
    #[arg(long, value_name = "SECONDS", default_value = "0.016")]
    delta_time: f32,

    /// Overrides the grid size of the config
    #[arg(long)]
    fft_size: Option<u32>,

    /// Use the single cascade preset instead of four cascades
    #[arg(long)]
    single_cascade: bool,

    /// Write the final field statistics as json
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Serialize)]
struct CascadeReport {
    _index: u32,
    _length_scale: f32,
    _cutoff_low: f32,
    _cutoff_high: f32,
    _slope_variance: f64,
    _displacement_turbulence: FieldStatistics,
    _derivatives: FieldStatistics,
}

#[derive(Serialize)]
struct SimulationReport {
    _fft_size: u32,
    _frames: u32,
    _time: f32,
    _cascades: Vec<CascadeReport>,
}

fn load_config(args: &Args) -> OceanResult<OceanConfig> {
    let fft_size = args.fft_size.unwrap_or(constants::DEFAULT_FFT_SIZE);
    let mut config = match &args.config {
        Some(file_path) => OceanConfig::load_from_file(file_path)?,
        None if args.single_cascade => OceanConfig::single_cascade(fft_size),
        None => OceanConfig::four_cascades(fft_size),
    };
    if let Some(fft_size) = args.fft_size {
        config._fft_size = fft_size;
    }
    Ok(config)
}

fn create_report(ocean: &FFTOcean, frames: u32) -> SimulationReport {
    let cascades = ocean.get_cascades().iter().map(|cascade| {
        let config = cascade.get_config();
        CascadeReport {
            _index: cascade.get_index(),
            _length_scale: config._length_scale,
            _cutoff_low: config._cutoff_low,
            _cutoff_high: config._cutoff_high,
            _slope_variance: spectrum_slope_variance(cascade.get_h0k(), cascade.get_wave_data()),
            _displacement_turbulence: FieldStatistics::from_texture(cascade.get_displacement_turbulence()),
            _derivatives: FieldStatistics::from_texture(cascade.get_derivatives()),
        }
    }).collect();
    SimulationReport {
        _fft_size: ocean.get_fft_size(),
        _frames: frames,
        _time: ocean.get_acc_time(),
        _cascades: cascades,
    }
}

fn run(args: &Args) -> OceanResult<()> {
    let config = load_config(args)?;
    let mut ocean = FFTOcean::create_fft_ocean(&config)?;
    log::info!(
        "{}: fft_size {}, cascades {}, lambda {}, foam {}",
        ocean.get_name(), ocean.get_fft_size(), ocean.get_cascade_count(), ocean.get_lambda(), ocean.get_foam_mode()
    );
    for _ in 0..args.frames {
        ocean.update(args.delta_time)?;
    }

    let report = create_report(&ocean, args.frames);
    for cascade in report._cascades.iter() {
        let height = cascade._displacement_turbulence.get_channel(1);
        let turbulence = cascade._displacement_turbulence.get_channel(3);
        log::info!(
            "cascade {}: length {}, height rms {:.4} [{:.4}, {:.4}], min jacobian {:.4}, slope variance {:.6}",
            cascade._index, cascade._length_scale, height._rms, height._min, height._max, turbulence._min, cascade._slope_variance
        );
    }

    if let Some(file_path) = &args.report {
        std::fs::write(file_path, serde_json::to_string_pretty(&report)?)?;
        log::info!("write report: {:?}", file_path);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::initialize_logger(args.log_level);
    log::info!("{}: {} frames, delta time {}", constants::ENGINE_NAME, args.frames, args.delta_time);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
