use std::ops::{ Add, Sub, Mul, Neg };

use nalgebra::Vector4;
use num_complex::Complex32;
use rayon::prelude::*;

/// Two complex numbers sharing one texel, the CPU side of an RGBA32F texture
/// holding (re0, im0, re1, im1).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComplexPair(pub Complex32, pub Complex32);

impl ComplexPair {
    pub fn new(first: Complex32, second: Complex32) -> ComplexPair {
        ComplexPair(first, second)
    }

    pub fn to_vector4(&self) -> Vector4<f32> {
        Vector4::new(self.0.re, self.0.im, self.1.re, self.1.im)
    }
}

impl Add for ComplexPair {
    type Output = ComplexPair;
    fn add(self, rhs: ComplexPair) -> ComplexPair {
        ComplexPair(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for ComplexPair {
    type Output = ComplexPair;
    fn sub(self, rhs: ComplexPair) -> ComplexPair {
        ComplexPair(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Mul<Complex32> for ComplexPair {
    type Output = ComplexPair;
    fn mul(self, rhs: Complex32) -> ComplexPair {
        ComplexPair(self.0 * rhs, self.1 * rhs)
    }
}

impl Neg for ComplexPair {
    type Output = ComplexPair;
    fn neg(self) -> ComplexPair {
        ComplexPair(-self.0, -self.1)
    }
}

/// Anything the butterfly passes can combine: a single complex value or a packed pair.
pub trait FftTexel:
    Copy + Send + Sync + Default
    + Add<Output = Self> + Sub<Output = Self> + Mul<Complex32, Output = Self> + Neg<Output = Self> {}

impl<T> FftTexel for T where
    T: Copy + Send + Sync + Default
    + Add<Output = T> + Sub<Output = T> + Mul<Complex32, Output = T> + Neg<Output = T> {}

// widened before multiplying, N * N overflows u32 from N = 65536
pub fn get_texel_count(size: u32) -> usize {
    size as usize * size as usize
}

pub fn get_texel_index(size: u32, x: u32, y: u32) -> usize {
    x as usize + y as usize * size as usize
}

/// Square N x N texture stored row major.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture<T> {
    _size: u32,
    _data: Vec<T>,
}

impl<T: Copy + Default + Send + Sync> Texture<T> {
    pub fn new(size: u32) -> Texture<T> {
        Texture {
            _size: size,
            _data: vec![T::default(); get_texel_count(size)],
        }
    }

    pub fn from_fn<F>(size: u32, f: F) -> Texture<T> where F: Fn(u32, u32) -> T + Sync {
        let mut texture = Texture::new(size);
        texture.fill_with(f);
        texture
    }

    pub fn get_size(&self) -> u32 {
        self._size
    }

    pub fn get_data(&self) -> &[T] {
        &self._data
    }

    pub fn get_data_mut(&mut self) -> &mut [T] {
        &mut self._data
    }

    pub fn index(&self, x: u32, y: u32) -> usize {
        get_texel_index(self._size, x, y)
    }

    pub fn get(&self, x: u32, y: u32) -> T {
        self._data[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: T) {
        let index = self.index(x, y);
        self._data[index] = value;
    }

    pub fn clear(&mut self) {
        self._data.iter_mut().for_each(|texel| *texel = T::default());
    }

    /// Rewrites every texel from its coordinate, one row per task.
    pub fn fill_with<F>(&mut self, f: F) where F: Fn(u32, u32) -> T + Sync {
        let size = self._size;
        self._data.par_chunks_mut(size as usize).enumerate().for_each(|(y, row)| {
            for (x, texel) in row.iter_mut().enumerate() {
                *texel = f(x as u32, y as u32);
            }
        });
    }
}

/// Two same-sized textures; stage s reads `current` and writes the other one.
#[derive(Clone, Debug)]
pub struct PingPongTextures<T> {
    _textures: [Texture<T>; 2],
    _current: usize,
}

impl<T: Copy + Default + Send + Sync> PingPongTextures<T> {
    pub fn new(size: u32) -> PingPongTextures<T> {
        PingPongTextures {
            _textures: [Texture::new(size), Texture::new(size)],
            _current: 0,
        }
    }

    pub fn get_size(&self) -> u32 {
        self._textures[0].get_size()
    }

    pub fn get_current_index(&self) -> usize {
        self._current
    }

    pub fn get_current(&self) -> &Texture<T> {
        &self._textures[self._current]
    }

    pub fn get_current_mut(&mut self) -> &mut Texture<T> {
        &mut self._textures[self._current]
    }

    /// Borrows (read, write) for one stage.
    pub fn split(&mut self) -> (&Texture<T>, &mut Texture<T>) {
        let (first, second) = self._textures.split_at_mut(1);
        if 0 == self._current {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    pub fn swap(&mut self) {
        self._current ^= 1;
    }

    pub fn reset(&mut self) {
        self._current = 0;
    }
}
