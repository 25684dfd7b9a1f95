/// Signals observed on the client, measured and parsed upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    /// Screen height in CSS pixels.
    pub screen_height: u32,
    /// Device pixel ratio.
    pub pixel_ratio: u32,
    /// Canvas benchmark fingerprint. Opaque lookup key.
    pub canvas_hash: i32,
    /// Benchmark throughput in operations per second.
    pub ops: f64,
}

impl Signals {
    pub fn new(screen_height: u32, pixel_ratio: u32, canvas_hash: i32, ops: f64) -> Self {
        Self {
            screen_height,
            pixel_ratio,
            canvas_hash,
            ops,
        }
    }
}
