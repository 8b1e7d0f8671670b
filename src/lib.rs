extern crate nalgebra;

pub mod constants;
pub mod ocean;
pub mod utilities;
