/// How a device was identified.
///
/// Everything this crate returns is pattern-matched against the reference
/// catalog; the enum exists so results line up with the wider detection
/// pipeline, which also knows other methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum IdentificationMethod {
    Pattern,
}

impl IdentificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
        }
    }
}
