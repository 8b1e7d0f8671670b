pub mod logger;
pub mod math;

#[allow(unused_imports)]
use self::logger::*;

#[allow(unused_imports)]
use self::math::*;
