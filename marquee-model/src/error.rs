use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidDimensions { width: u32, height: u32 },
    UnknownVariant(String),
    InvalidItemId(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions: {width}x{height}")
            }
            ModelError::UnknownVariant(name) => {
                write!(f, "unknown image variant: {name}")
            }
            ModelError::InvalidItemId(raw) => {
                write!(f, "invalid item id: {raw}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
