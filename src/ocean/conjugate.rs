use num_complex::Complex32;

use crate::ocean::texture::Texture;

/// H0(i, j) = conj(H0K((N - i) mod N, (N - j) mod N)), the partner of every
/// wave vector at the point-reflected texel. Pairing each amplitude with it makes
/// the time evolved spectrum Hermitian, so the inverse transform is real.
pub fn conjugate_spectrum(h0k: &Texture<Complex32>, h0: &mut Texture<Complex32>) {
    let size = h0k.get_size();
    h0.fill_with(|x, y| {
        let mirrored_x = (size - x) % size;
        let mirrored_y = (size - y) % size;
        h0k.get(mirrored_x, mirrored_y).conj()
    });
}
