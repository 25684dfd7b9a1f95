//! iPhone model disambiguation.
//!
//! Several iPhone models report identical screen height and pixel ratio. This
//! crate resolves such ties with a canvas benchmark fingerprint (an opaque hash)
//! and the observed benchmark throughput, against a static reference catalog.

mod catalog;
mod db;
mod detector;
mod error;
mod types;

pub use catalog::{BenchmarkSignature, Catalog, GeometrySignature, OpsRange};
pub use detector::IphoneDetector;
pub use error::{Error, Result};
pub use types::*;
