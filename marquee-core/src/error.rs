use marquee_model::{ItemId, ModelError};
use thiserror::Error;

/// Failure reported by a fetch collaborator for a single descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Fetch failed: {0}")]
    Failed(String),

    #[error("Image not found")]
    NotFound,

    #[error("Fetch cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum ArtworkError {
    #[error("No artwork candidate available for item {0}")]
    NoCandidateAvailable(ItemId),

    #[error("Every artwork candidate failed, last error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid geometry: {width}x{height}")]
    InvalidGeometry { width: f64, height: f64 },

    #[error("Base URL cannot carry path segments: {0}")]
    InvalidBaseUrl(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Image header error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArtworkError>;
