use url::Url;

use crate::image::{ImageDimensions, ImageVariant};

/// An image the fetch collaborator produced, with its natural dimensions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadedImage {
    pub url: Url,
    pub variant: ImageVariant,
    pub dimensions: ImageDimensions,
}

impl LoadedImage {
    pub fn new(
        url: Url,
        variant: ImageVariant,
        dimensions: ImageDimensions,
    ) -> Self {
        Self {
            url,
            variant,
            dimensions,
        }
    }
}

/// The image an artwork slot currently shows.
///
/// `Empty` is an explicit "no artwork" value, used both before anything has
/// loaded and after every candidate failed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageHandle {
    #[default]
    Empty,
    Loaded(LoadedImage),
}

impl ImageHandle {
    pub fn is_empty(&self) -> bool {
        matches!(self, ImageHandle::Empty)
    }

    pub fn loaded(&self) -> Option<&LoadedImage> {
        match self {
            ImageHandle::Loaded(image) => Some(image),
            ImageHandle::Empty => None,
        }
    }

    pub fn url(&self) -> Option<&Url> {
        self.loaded().map(|image| &image.url)
    }

    pub fn variant(&self) -> Option<ImageVariant> {
        self.loaded().map(|image| image.variant)
    }

    pub fn dimensions(&self) -> Option<ImageDimensions> {
        self.loaded().map(|image| image.dimensions)
    }
}

impl From<LoadedImage> for ImageHandle {
    fn from(image: LoadedImage) -> Self {
        ImageHandle::Loaded(image)
    }
}
