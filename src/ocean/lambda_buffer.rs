use serde::{ Serialize, Deserialize };

/// Per-frame values shared read-only by every cascade.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct LambdaBuffer {
    pub _time: f32,
    pub _delta_time: f32,
    pub _lambda: f32,
}

impl Default for LambdaBuffer {
    fn default() -> LambdaBuffer {
        LambdaBuffer {
            _time: 0.0,
            _delta_time: 0.0,
            _lambda: 1.0,
        }
    }
}

impl LambdaBuffer {
    pub fn new(time: f32, delta_time: f32, lambda: f32) -> LambdaBuffer {
        LambdaBuffer {
            _time: time,
            _delta_time: delta_time,
            _lambda: lambda,
        }
    }
}
