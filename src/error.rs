#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    #[error("model {model:?} has no screen heights")]
    EmptyHeights { model: String },
    #[error("model {model:?} has a zero pixel ratio")]
    ZeroPixelRatio { model: String },
    #[error("model {model:?} is defined more than once")]
    DuplicateModel { model: String },
    #[error("model {model:?} lists canvas hash {canvas_hash} more than once")]
    DuplicateCanvasHash { model: String, canvas_hash: i32 },
    #[error("benchmark signatures given for unknown model {model:?}")]
    UnknownModel { model: String },
    #[error("model {model:?}, canvas hash {canvas_hash}: invalid ops range [{min}, {max}]")]
    InvalidOpsRange {
        model: String,
        canvas_hash: i32,
        min: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
