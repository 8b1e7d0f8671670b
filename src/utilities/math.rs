use num_complex::Complex32;

pub const TWO_PI: f32 = std::f32::consts::PI * 2.0;

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

pub fn sqr(x: f32) -> f32 {
    x * x
}

pub fn is_power_of_two(n: u32) -> bool {
    1 < n && 0 == (n & (n - 1))
}

// n must be a power of two
pub fn log2_u32(n: u32) -> u32 {
    n.trailing_zeros()
}

pub fn bit_reverse(i: usize, n: usize) -> usize {
    let mut sum: usize = 0;
    let mut w: usize = 1;
    let mut m: usize = n / 2;
    while 0 != m {
        if 0 != (i & m) {
            sum += w;
        }
        w *= 2;
        m /= 2;
    }
    sum
}

/// Maps a texel index in [0, n) to the signed frequency index in [-n/2, n/2).
pub fn centered_index(i: u32, n: u32) -> i32 {
    i as i32 - (n / 2) as i32
}

/// exp(i * phase)
pub fn phase_exponent(phase: f32) -> Complex32 {
    Complex32::new(phase.cos(), phase.sin())
}

/// Multiplies by i.
pub fn mul_i(c: Complex32) -> Complex32 {
    Complex32::new(-c.im, c.re)
}

// splitmix64 finalizer, used to derive independent per-texel seeds
pub fn mix_seed(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

pub fn texel_seed(seed: u64, layer: u32, x: u32, y: u32) -> u64 {
    let position = ((layer as u64) << 48) ^ ((y as u64) << 24) ^ (x as u64);
    mix_seed(seed ^ mix_seed(position))
}
