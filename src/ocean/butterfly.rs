use num_complex::Complex32;

use crate::ocean::error::{ OceanError, OceanResult };
use crate::utilities::math::{ bit_reverse, is_power_of_two, log2_u32, TWO_PI };

/// One radix-2 butterfly: targets[0] = a + w * b, targets[1] = a - w * b,
/// where a, b are read from `_sources`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Butterfly {
    pub _twiddle: Complex32,
    pub _sources: [u32; 2],
    pub _targets: [u32; 2],
}

/// Per-texel view of a butterfly, the layout a gather kernel wants:
/// out[x] = in[sources[0]] + twiddle * in[sources[1]], with the twiddle sign
/// already folded in for the lower half.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ButterflyLookup {
    pub _twiddle: Complex32,
    pub _sources: [u32; 2],
}

/// Twiddle factors and bit-reversal indices for every stage of a size N FFT.
/// Forward twiddles are stored; inverse passes conjugate them.
#[derive(Clone, Debug)]
pub struct ButterflyTable {
    _fft_size: u32,
    _passes: u32,
    _butterflies: Vec<Butterfly>,
    _lookup: Vec<ButterflyLookup>,
}

fn compute_weight(n: u32, k: u32) -> Complex32 {
    let angle = -TWO_PI * k as f32 / n as f32;
    Complex32::new(angle.cos(), angle.sin())
}

impl ButterflyTable {
    pub fn new(fft_size: u32) -> OceanResult<ButterflyTable> {
        if false == is_power_of_two(fft_size) {
            return Err(OceanError::InvalidGridSize(fft_size));
        }

        let passes = log2_u32(fft_size);
        let half_size = (fft_size / 2) as usize;
        let mut butterflies: Vec<Butterfly> = Vec::with_capacity(passes as usize * half_size);
        let mut lookup: Vec<ButterflyLookup> = vec![ButterflyLookup::default(); passes as usize * fft_size as usize];

        for pass in 0..passes {
            let blocks: u32 = fft_size >> (pass + 1);
            let inputs: u32 = 1 << pass;
            for j in 0..blocks {
                for k in 0..inputs {
                    let i1 = j * inputs * 2 + k;
                    let i2 = i1 + inputs;
                    let (j1, j2) = if 0 == pass {
                        (bit_reverse(i1 as usize, fft_size as usize) as u32, bit_reverse(i2 as usize, fft_size as usize) as u32)
                    } else {
                        (i1, i2)
                    };
                    butterflies.push(Butterfly {
                        _twiddle: compute_weight(fft_size, k * blocks),
                        _sources: [j1, j2],
                        _targets: [i1, i2],
                    });
                }
            }

            // butterflies of a pass are pushed in index order b = j * inputs + k
            let pass_offset = pass as usize * fft_size as usize;
            for butterfly in butterflies[pass as usize * half_size..].iter() {
                lookup[pass_offset + butterfly._targets[0] as usize] = ButterflyLookup {
                    _twiddle: butterfly._twiddle,
                    _sources: butterfly._sources,
                };
                lookup[pass_offset + butterfly._targets[1] as usize] = ButterflyLookup {
                    _twiddle: -butterfly._twiddle,
                    _sources: butterfly._sources,
                };
            }
        }

        log::debug!("create butterfly table: fft_size {}, passes {}", fft_size, passes);

        Ok(ButterflyTable {
            _fft_size: fft_size,
            _passes: passes,
            _butterflies: butterflies,
            _lookup: lookup,
        })
    }

    pub fn get_fft_size(&self) -> u32 {
        self._fft_size
    }

    pub fn get_passes(&self) -> u32 {
        self._passes
    }

    pub fn get_butterflies(&self, pass: u32) -> &[Butterfly] {
        let half_size = (self._fft_size / 2) as usize;
        let offset = pass as usize * half_size;
        &self._butterflies[offset..offset + half_size]
    }

    pub fn get_butterfly(&self, pass: u32, index: u32) -> &Butterfly {
        &self.get_butterflies(pass)[index as usize]
    }

    pub fn get_lookup_row(&self, pass: u32) -> &[ButterflyLookup] {
        let offset = pass as usize * self._fft_size as usize;
        &self._lookup[offset..offset + self._fft_size as usize]
    }

    pub fn check_size(&self, texture_size: u32) -> OceanResult<()> {
        if self._fft_size != texture_size {
            return Err(OceanError::StaleButterflyTable {
                table_size: self._fft_size,
                texture_size,
            });
        }
        Ok(())
    }
}
