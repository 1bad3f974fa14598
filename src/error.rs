use thiserror::Error;

/// Errors that can occur while tracing an image or exporting its curves.
///
/// Decode failures are reported here by the loading layer but never
/// escape [`crate::process_image`], which turns them into an empty
/// [`crate::CurveSet`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TraceError {
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to render preview: {0}")]
    Render(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
