use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Construction-time failure: the loader handed us inconsistent cube data.
/// The viewer refuses to initialise rather than render from it.
#[derive(Debug, Error)]
pub enum CubeError {
    #[error("malformed cube: {0}")]
    Malformed(String),
}

/// Recoverable interaction failure. The triggering interaction is rejected
/// and the previous view state is retained unchanged; never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InteractionError {
    /// A coordinate or index fell outside the cube's extent.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// An aggregate spectrum was requested over zero pixels.
    #[error("empty selection")]
    EmptySelection,

    /// A non-positive or non-finite zoom factor.
    #[error("invalid transform: zoom = {0}")]
    InvalidTransform(f32),
}
