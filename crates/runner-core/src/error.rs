use thiserror::Error;

/// Errors resolving a scene specification into a scene graph.
/// Any of these stops the run from starting.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene specification: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("scene specification has no player node")]
    MissingPlayer,

    #[error("player node has no camera child")]
    MissingCamera,

    #[error("{kind} index {index} out of range ({len} available)")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, SceneError>;
