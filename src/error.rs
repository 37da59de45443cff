use thiserror::Error;

/// Errors surfaced by projection handles and the transform engine.
///
/// The set is closed: every backend failure maps onto exactly one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjError {
    /// The backend could not build a definition from the given parameters.
    #[error("projection initialization failed: {0}")]
    InitFailed(String),

    /// Coordinate arrays of a batch have different lengths.
    #[error("coordinate arrays must be the same length, got x={x}, y={y}{}", fmt_z(.z))]
    ShapeMismatch { x: usize, y: usize, z: Option<usize> },

    /// The backend reported a nonzero status; the whole batch is discarded.
    #[error("transform failed with status {0}")]
    TransformFailed(i32),
}

impl ProjError {
    /// Raw backend status for [`ProjError::TransformFailed`].
    pub fn code(&self) -> Option<i32> {
        match self {
            ProjError::TransformFailed(code) => Some(*code),
            _ => None,
        }
    }
}

fn fmt_z(z: &Option<usize>) -> String {
    z.map(|n| format!(", z={n}")).unwrap_or_default()
}

pub type Result<T, E = ProjError> = std::result::Result<T, E>;
