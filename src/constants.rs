pub const ENGINE_NAME: &str = "RustOceanFFT";
pub const GRAVITY: f32 = 9.81;
pub const WATER_DEPTH: f32 = 500.0;
pub const DEFAULT_FFT_SIZE: u32 = 256;
pub const DEFAULT_FFT_SEED: u64 = 1234;
pub const DEFAULT_LAMBDA: f32 = 1.0;
pub const MAX_CASCADE_COUNT: usize = 4;
pub const MAX_SPECTRUM_COMPONENTS: usize = 4;
pub const MIN_WIND_SPEED: f32 = 0.001;
pub const DEFAULT_CUTOFF_LOW: f32 = 0.0001;
pub const DEFAULT_CUTOFF_HIGH: f32 = 9999.0;
// cascade boundaries sit at PI / length_scale * CASCADE_BOUNDARY_FACTOR
pub const CASCADE_BOUNDARY_FACTOR: f32 = 6.0;
pub const CASCADE_LENGTH_SCALES: [f32; 4] = [1279.0, 255.0, 17.0, 5.0];
pub const SINGLE_CASCADE_LENGTH_SCALE: f32 = 250.0;
// tanh(k * depth) saturates long before this, keeps cosh from overflowing
pub const MAX_DEPTH_ARGUMENT: f32 = 20.0;
pub const FOAM_DECAY_RATE: f32 = 0.5;
pub const FOAM_MIN_JACOBIAN: f32 = 0.5;
