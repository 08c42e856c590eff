use std::num::NonZeroU32;

use crate::error::ModelError;

/// Non-zero pixel dimensions of a loaded image.
///
/// These are the *natural* dimensions reported for the bytes the server
/// returned, as opposed to the layout size an artwork slot ends up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageDimensions {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl ImageDimensions {
    pub const fn new(width: NonZeroU32, height: NonZeroU32) -> Self {
        Self { width, height }
    }

    pub const fn width_u32(self) -> u32 {
        self.width.get()
    }

    pub const fn height_u32(self) -> u32 {
        self.height.get()
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width.get())
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height.get())
    }

    /// Width over height. Always finite and positive.
    pub fn aspect_ratio(self) -> f64 {
        self.width_f64() / self.height_f64()
    }

    pub const fn as_u32_tuple(self) -> (u32, u32) {
        (self.width.get(), self.height.get())
    }
}

impl TryFrom<(u32, u32)> for ImageDimensions {
    type Error = ModelError;

    fn try_from(value: (u32, u32)) -> Result<Self, Self::Error> {
        let (width, height) = value;
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(ModelError::InvalidDimensions { width, height }),
        }
    }
}
