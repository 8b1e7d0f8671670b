use num_complex::Complex32;

use rust_ocean_fft::constants;
use rust_ocean_fft::ocean::butterfly::ButterflyTable;
use rust_ocean_fft::ocean::config::jonswap_peak_omega;
use rust_ocean_fft::ocean::fft::inverse_fft_2d;
use rust_ocean_fft::ocean::permutation::permute_and_invert;
use rust_ocean_fft::ocean::statistics::FieldStatistics;
use rust_ocean_fft::ocean::texture::{ PingPongTextures, Texture };
use rust_ocean_fft::ocean::{ FFTOcean, FoamMode, OceanConfig, OceanError, SpectrumConfig };

fn windy_single_cascade(fft_size: u32) -> OceanConfig {
    let mut config = OceanConfig::single_cascade(fft_size);
    let cascade = &mut config._cascades[0];
    cascade._gravity = 9.81;
    cascade._depth = 500.0;
    cascade._spectrums[0]._wind_speed = 10.0;
    cascade._spectrums[0]._fetch = 100000.0;
    config
}

#[test]
fn test_windy_sea_is_zero_mean_and_evolves() {
    let mut ocean = FFTOcean::create_fft_ocean(&windy_single_cascade(256)).unwrap();
    ocean.update(0.0).unwrap();
    let start = ocean.get_cascade(0).unwrap().get_displacement_turbulence().clone();

    ocean.update(10.0).unwrap();
    let cascade = ocean.get_cascade(0).unwrap();
    let output = cascade.get_displacement_turbulence();
    assert!(output.get_data().iter().all(|texel| texel.iter().all(|value| value.is_finite())));
    assert_ne!(&start, output);

    let statistics = FieldStatistics::from_texture(output);
    for channel in [0, 2] {
        let horizontal = statistics.get_channel(channel);
        assert!(0.0 < horizontal._rms);
        assert!(horizontal._mean.abs() <= 1e-2 * horizontal._rms);
    }
    let height = statistics.get_channel(1);
    assert!(0.0 < height._rms);
    assert!(height._mean.abs() <= 1e-2 * height._rms);
}

#[test]
fn test_four_cascades_partition_the_wavenumbers() {
    let size = 32;
    let mut config = OceanConfig::four_cascades(size);
    for cascade in config._cascades.iter_mut() {
        cascade._spectrums[0]._wind_speed = 10.0;
        // keeps a cos2 lobe so no direction is starved of energy
        cascade._spectrums[0]._spread_blend = 0.5;
    }
    let peak_omega = jonswap_peak_omega(9.81, 100000.0, 10.0);
    let ocean = FFTOcean::create_fft_ocean(&config).unwrap();
    let cascades = ocean.get_cascades();
    assert_eq!(cascades.len(), 4);

    for (index, cascade) in cascades.iter().enumerate() {
        let config = cascade.get_config();
        let texels = cascade.get_h0k().get_data().iter().zip(cascade.get_wave_data().get_data());
        let mut energetic = 0;
        for (texel_index, (amplitude, wave)) in texels.enumerate() {
            let (x, y) = (texel_index as u32 % size, texel_index as u32 / size);
            let k_length = (wave._k_x * wave._k_x + wave._k_z * wave._k_z).sqrt();
            if constants::DEFAULT_CUTOFF_LOW <= k_length && k_length < constants::DEFAULT_CUTOFF_HIGH {
                let owners: Vec<usize> = cascades.iter().enumerate()
                    .filter(|(_, other)| other.get_config().contains_wavenumber(k_length))
                    .map(|(owner, _)| owner)
                    .collect();
                assert_eq!(owners.len(), 1);
            }

            let is_nyquist = 0 == x || 0 == y;
            if false == config.contains_wavenumber(k_length) || is_nyquist {
                assert_eq!(*amplitude, Complex32::new(0.0, 0.0));
                continue;
            }
            // in band texels carry energy wherever the low frequency
            // exp(-1.25 (wp / w)^4) tail has not underflowed
            assert!(0.0 < wave._omega);
            if 0.5 * peak_omega <= wave._omega {
                assert!(0.0 < amplitude.norm(), "cascade {} texel ({}, {}) has no energy", index, x, y);
                energetic += 1;
            }
        }
        assert!(0 < energetic, "cascade {} carries no energy", index);
    }
}

#[test]
fn test_rejects_non_power_of_two_grid() {
    let result = FFTOcean::create_fft_ocean(&OceanConfig::single_cascade(100));
    assert!(matches!(result, Err(OceanError::InvalidGridSize(100))));
}

#[test]
fn test_same_seed_gives_identical_frames() {
    let config = windy_single_cascade(32);
    let mut first = FFTOcean::create_fft_ocean(&config).unwrap();
    let mut second = FFTOcean::create_fft_ocean(&config).unwrap();
    for _ in 0..3 {
        first.update(0.1).unwrap();
        second.update(0.1).unwrap();
    }
    let first = first.get_cascade(0).unwrap();
    let second = second.get_cascade(0).unwrap();
    assert_eq!(first.get_h0k(), second.get_h0k());
    assert_eq!(first.get_displacement_turbulence(), second.get_displacement_turbulence());
    assert_eq!(first.get_derivatives(), second.get_derivatives());
}

#[test]
fn test_centered_impulse_transforms_to_flat_field() {
    let size = 16;
    let table = ButterflyTable::new(size).unwrap();
    let mut buffers: PingPongTextures<Complex32> = PingPongTextures::new(size);
    buffers.get_current_mut().set(size / 2, size / 2, Complex32::new(1.0, 0.0));
    inverse_fft_2d(&table, &mut buffers).unwrap();
    permute_and_invert(buffers.get_current_mut());
    for texel in buffers.get_current().get_data() {
        assert!((*texel - Complex32::new(1.0, 0.0)).norm() < 1e-5);
    }
}

#[test]
fn test_sign_correction_twice_is_identity() {
    let original = Texture::from_fn(8, |x, y| Complex32::new(x as f32, -(y as f32)));
    let mut texture = original.clone();
    permute_and_invert(&mut texture);
    permute_and_invert(&mut texture);
    assert_eq!(texture, original);
}

#[test]
fn test_live_spectrum_edit() {
    let mut ocean = FFTOcean::create_fft_ocean(&windy_single_cascade(32)).unwrap();
    ocean.update(0.1).unwrap();
    let before = ocean.get_cascade(0).unwrap().get_h0k().clone();

    let mut spectrums = ocean.get_cascade(0).unwrap().get_pending_spectrums().to_vec();
    spectrums.push(SpectrumConfig { _scale: 0.5, _wind_direction: 1.2, ..SpectrumConfig::secondary_swell() });
    ocean.set_spectrum_configs(0, &spectrums).unwrap();
    ocean.update(0.1).unwrap();
    assert_ne!(&before, ocean.get_cascade(0).unwrap().get_h0k());
    assert_eq!(ocean.get_config()._cascades[0]._spectrums.len(), 3);

    let too_many = vec![SpectrumConfig::default(); 5];
    assert!(ocean.set_spectrum_configs(0, &too_many).is_err());
}

#[test]
fn test_accumulated_foam_never_exceeds_jacobian() {
    let mut config = windy_single_cascade(32);
    config._foam_mode = FoamMode::Accumulated;
    config._lambda = 1.5;
    let mut ocean = FFTOcean::create_fft_ocean(&config).unwrap();
    for _ in 0..5 {
        ocean.update(0.1).unwrap();
        let cascade = ocean.get_cascade(0).unwrap();
        let displacement = cascade.get_displacement_turbulence().get_data();
        let derivatives = cascade.get_derivatives().get_data();
        let fields = cascade.get_displacement_field().get_data();
        for ((texel, derivative), field) in displacement.iter().zip(derivatives).zip(fields) {
            // derivatives already carry lambda on their last two channels
            let jacobian = (1.0 + derivative.z) * (1.0 + derivative.w) - 1.5 * 1.5 * field.1.im * field.1.im;
            assert!(texel.w <= jacobian + 1e-4);
        }
    }
}

#[test]
fn test_config_file_round_trip() {
    let config = windy_single_cascade(64);
    let file_path = std::env::temp_dir().join(format!("ocean_config_{}.json", std::process::id()));
    config.save_to_file(&file_path).unwrap();
    let loaded = OceanConfig::load_from_file(&file_path).unwrap();
    std::fs::remove_file(&file_path).unwrap();
    assert_eq!(loaded, config);
}
