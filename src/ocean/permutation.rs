use rayon::prelude::*;

use crate::ocean::texture::{ FftTexel, Texture };

/// Multiplies texel (x, y) by (-1)^(x + y). The spectrum is laid out with k = 0
/// at the grid center, and this checkerboard undoes that shift after the
/// inverse transform. Applying it twice is the identity.
pub fn permute_and_invert<T: FftTexel>(texture: &mut Texture<T>) {
    let size = texture.get_size() as usize;
    texture.get_data_mut()
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, texel) in row.iter_mut().enumerate() {
                if 1 == (x + y) % 2 {
                    *texel = -*texel;
                }
            }
        });
}
