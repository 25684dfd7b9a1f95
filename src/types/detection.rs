use super::{DeviceType, IdentificationMethod};

pub(crate) const MANUFACTURER: &str = "Apple";

/// A positively identified device. Never partially populated: a failed lookup
/// is `None`, not a `Device` with empty fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub kind: DeviceType,
    pub identified: IdentificationMethod,
    pub manufacturer: &'static str,
    pub model: String,
    /// Hardware model code, e.g. `A1633`.
    pub identifier: String,
    pub generic: bool,
}

impl Device {
    pub(crate) fn apple(model: &str, identifier: &str) -> Self {
        Self {
            kind: DeviceType::Mobile,
            identified: IdentificationMethod::Pattern,
            manufacturer: MANUFACTURER,
            model: model.to_owned(),
            identifier: identifier.to_owned(),
            generic: false,
        }
    }
}

/// A device plus the way it was resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Identification<'a> {
    pub device: Device,
    pub resolution: Resolution<'a>,
}

impl<'a> Identification<'a> {
    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn into_device(self) -> Device {
        self.device
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Screen geometry matched exactly one model.
    Geometry,
    /// Screen geometry was shared by `candidates` models and the canvas
    /// benchmark picked this one.
    Benchmark {
        /// OS bucket label of the matching benchmark signature.
        os_label: &'a str,
        candidates: usize,
    },
}
