//! Fetch collaborators and the candidate walk shared by every resolution
//! path.

use std::fmt;
use std::io::Cursor;

use async_trait::async_trait;
use image::ImageReader;
use marquee_model::{FetchDescriptor, ImageDimensions, ItemId, LoadedImage};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ArtworkError, FetchError, Result};
use crate::urls::UrlBuilder;

/// Produces a loaded image, with natural dimensions, for a descriptor.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(
        &self,
        descriptor: &FetchDescriptor,
    ) -> std::result::Result<LoadedImage, FetchError>;
}

/// Transport seam: fetches the encoded bytes behind a URL.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, url: &Url) -> std::result::Result<Vec<u8>, FetchError>;
}

/// An [`ImageFetcher`] built from a URL builder and a byte loader.
///
/// Natural dimensions are read from the image header of whatever the loader
/// returns.
pub struct UrlFetcher<B, L> {
    urls: B,
    loader: L,
}

impl<B, L> fmt::Debug for UrlFetcher<B, L>
where
    B: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlFetcher")
            .field("urls", &self.urls)
            .field("loader", &std::any::type_name::<L>())
            .finish()
    }
}

impl<B, L> UrlFetcher<B, L>
where
    B: UrlBuilder,
    L: ImageLoader,
{
    pub fn new(urls: B, loader: L) -> Self {
        Self { urls, loader }
    }

    pub fn url_builder(&self) -> &B {
        &self.urls
    }
}

#[async_trait]
impl<B, L> ImageFetcher for UrlFetcher<B, L>
where
    B: UrlBuilder,
    L: ImageLoader,
{
    async fn fetch_image(
        &self,
        descriptor: &FetchDescriptor,
    ) -> std::result::Result<LoadedImage, FetchError> {
        let url = self
            .urls
            .build(descriptor)
            .map_err(|err| FetchError::Failed(err.to_string()))?;

        let bytes = self.loader.load(&url).await?;
        let dimensions = probe_dimensions(&bytes)
            .map_err(|err| FetchError::Failed(err.to_string()))?;

        debug!(
            %url,
            width = dimensions.width_u32(),
            height = dimensions.height_u32(),
            "loaded artwork"
        );

        Ok(LoadedImage::new(url, descriptor.variant, dimensions))
    }
}

/// Natural dimensions of encoded image bytes, read from the header only.
pub fn probe_dimensions(bytes: &[u8]) -> Result<ImageDimensions> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;

    Ok(ImageDimensions::try_from((width, height))?)
}

/// Try each descriptor in order and return the first image that loads.
///
/// Failures are logged and the walk moves on. When every descriptor fails the
/// last fetch error is returned; an empty walk reports
/// [`ArtworkError::NoCandidateAvailable`].
pub async fn fetch_first<I>(
    fetcher: &dyn ImageFetcher,
    descriptors: I,
    item_id: ItemId,
) -> Result<LoadedImage>
where
    I: IntoIterator<Item = FetchDescriptor>,
{
    let mut last_error = None;

    for descriptor in descriptors {
        match fetcher.fetch_image(&descriptor).await {
            Ok(image) => return Ok(image),
            Err(err) => {
                warn!(
                    item = %item_id,
                    variant = %descriptor.variant,
                    endpoint = descriptor.endpoint.name(),
                    %err,
                    "artwork candidate failed"
                );
                last_error = Some(err);
            }
        }
    }

    match last_error {
        Some(err) => Err(ArtworkError::Fetch(err)),
        None => Err(ArtworkError::NoCandidateAvailable(item_id)),
    }
}
