use thiserror::Error;

/// Errors the render pipeline can raise.
///
/// `MeshingFailure` and the HLR kernel returning an empty compound are the
/// only two recoverable cases (see module docs on [`crate::external`] and
/// [`crate::projector`]); every other variant aborts the current render.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("geometry is invalid: {0}")]
    InvalidGeometry(String),

    #[error("camera view direction must be nonzero")]
    InvalidCamera,

    #[error("index out of range: {0}")]
    InvalidIndex(String),

    #[error("projector is degenerate: view direction could not be turned into an orthonormal basis")]
    ProjectionDegenerate,

    #[error("meshing failed: {0}")]
    MeshingFailure(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
