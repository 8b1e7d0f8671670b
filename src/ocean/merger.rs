use nalgebra::Vector4;
use rayon::prelude::*;

use crate::constants;
use crate::ocean::config::FoamMode;
use crate::ocean::lambda_buffer::LambdaBuffer;
use crate::ocean::texture::{ ComplexPair, Texture };

/// Determinant of the horizontal displacement map. Falls below 1 where crests
/// converge and below 0 where the surface folds over itself.
pub fn get_jacobian(lambda: f32, dxx: f32, dzz: f32, dxz: f32) -> f32 {
    (1.0 + lambda * dxx) * (1.0 + lambda * dzz) - lambda * lambda * dxz * dxz
}

pub fn get_turbulence(foam_mode: FoamMode, jacobian: f32, previous: f32, delta_time: f32) -> f32 {
    match foam_mode {
        FoamMode::Instant => jacobian,
        FoamMode::Accumulated => {
            let relaxed = previous + delta_time * constants::FOAM_DECAY_RATE / jacobian.max(constants::FOAM_MIN_JACOBIAN);
            jacobian.min(relaxed)
        }
    }
}

/// Returns (displacement + turbulence, derivatives) of one texel. The inputs are
/// the sign corrected fields, whose real and imaginary parts hold
/// (Dx, Dz), (Dy, Dxz), (Dyx, Dyz), (Dxx, Dzz).
pub fn merge_texel(
    lambda_buffer: &LambdaBuffer,
    foam_mode: FoamMode,
    displacement_field: &ComplexPair,
    derivative_field: &ComplexPair,
    previous_turbulence: f32,
) -> (Vector4<f32>, Vector4<f32>) {
    let lambda = lambda_buffer._lambda;
    let dx_dz = displacement_field.0;
    let dy_dxz = displacement_field.1;
    let dyx_dyz = derivative_field.0;
    let dxx_dzz = derivative_field.1;

    let jacobian = get_jacobian(lambda, dxx_dzz.re, dxx_dzz.im, dy_dxz.im);
    let turbulence = get_turbulence(foam_mode, jacobian, previous_turbulence, lambda_buffer._delta_time);

    (
        Vector4::new(lambda * dx_dz.re, dy_dxz.re, lambda * dx_dz.im, turbulence),
        Vector4::new(dyx_dyz.re, dyx_dyz.im, lambda * dxx_dzz.re, lambda * dxx_dzz.im),
    )
}

/// Writes the final output textures. With `FoamMode::Accumulated` the previous
/// content of the turbulence channel is carried into this frame.
pub fn merge_fields(
    lambda_buffer: &LambdaBuffer,
    foam_mode: FoamMode,
    displacement_field: &Texture<ComplexPair>,
    derivative_field: &Texture<ComplexPair>,
    displacement_turbulence: &mut Texture<Vector4<f32>>,
    derivatives: &mut Texture<Vector4<f32>>,
) {
    let size = displacement_field.get_size() as usize;
    let displacement_data = displacement_field.get_data();
    let derivative_data = derivative_field.get_data();
    displacement_turbulence.get_data_mut()
        .par_chunks_mut(size)
        .zip(derivatives.get_data_mut().par_chunks_mut(size))
        .enumerate()
        .for_each(|(y, (displacement_row, derivative_row))| {
            let offset = y * size;
            for x in 0..size {
                let (displacement, derivative) = merge_texel(
                    lambda_buffer,
                    foam_mode,
                    &displacement_data[offset + x],
                    &derivative_data[offset + x],
                    displacement_row[x].w,
                );
                displacement_row[x] = displacement;
                derivative_row[x] = derivative;
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex32;

    fn pair(a: (f32, f32), b: (f32, f32)) -> ComplexPair {
        ComplexPair::new(Complex32::new(a.0, a.1), Complex32::new(b.0, b.1))
    }

    #[test]
    fn test_lambda_scales_horizontal_only() {
        let lambda_buffer = LambdaBuffer::new(0.0, 0.0, 2.0);
        let (displacement, derivatives) = merge_texel(
            &lambda_buffer,
            FoamMode::Instant,
            &pair((1.0, 3.0), (5.0, 0.0)),
            &pair((0.25, 0.5), (0.1, 0.2)),
            0.0,
        );
        assert_eq!(displacement.x, 2.0);
        assert_eq!(displacement.y, 5.0);
        assert_eq!(displacement.z, 6.0);
        assert_eq!(derivatives.x, 0.25);
        assert_eq!(derivatives.y, 0.5);
        assert!((derivatives.z - 0.2).abs() < 1e-6);
        assert!((derivatives.w - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_flat_surface_has_unit_jacobian() {
        let lambda_buffer = LambdaBuffer::new(0.0, 0.016, 1.0);
        let (displacement, _) = merge_texel(&lambda_buffer, FoamMode::Instant, &ComplexPair::default(), &ComplexPair::default(), 0.0);
        assert_eq!(displacement.w, 1.0);
    }

    #[test]
    fn test_jacobian_detects_folding() {
        assert!(get_jacobian(1.0, -1.5, 0.0, 0.0) < 0.0);
        assert!((get_jacobian(1.0, 0.0, 0.0, 0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_accumulated_foam_relaxes_toward_jacobian() {
        // starts from zero and recovers by delta_time * 0.5 / jacobian per frame
        let first = get_turbulence(FoamMode::Accumulated, 1.0, 0.0, 0.1);
        assert!((first - 0.05).abs() < 1e-6);
        let second = get_turbulence(FoamMode::Accumulated, 1.0, first, 0.1);
        assert!((second - 0.1).abs() < 1e-6);
        // never exceeds the current jacobian
        assert_eq!(get_turbulence(FoamMode::Accumulated, 0.3, 5.0, 0.1), 0.3);
        // instant mode ignores history
        assert_eq!(get_turbulence(FoamMode::Instant, 0.7, 5.0, 0.1), 0.7);
    }

    #[test]
    fn test_merge_fields_writes_every_texel() {
        let size = 4;
        let displacement_field = Texture::from_fn(size, |x, y| pair((x as f32, y as f32), (1.0, 0.0)));
        let derivative_field: Texture<ComplexPair> = Texture::new(size);
        let mut displacement_turbulence = Texture::new(size);
        let mut derivatives = Texture::new(size);
        merge_fields(
            &LambdaBuffer::new(0.0, 0.0, 1.0),
            FoamMode::Instant,
            &displacement_field,
            &derivative_field,
            &mut displacement_turbulence,
            &mut derivatives,
        );
        assert_eq!(displacement_turbulence.get(3, 2), Vector4::new(3.0, 1.0, 2.0, 1.0));
        assert_eq!(derivatives.get(1, 1), Vector4::zeros());
    }
}
