mod detection;
mod device_type;
mod identification_method;
mod signals;

pub use detection::*;
pub use device_type::*;
pub use identification_method::*;
pub use signals::*;
