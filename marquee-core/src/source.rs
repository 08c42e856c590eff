//! One-shot artwork download for a known available size.

use std::fmt;
use std::sync::Arc;

use marquee_model::{
    DisplayBox, FetchDescriptor, ImageHandle, ImageVariant, LoadedImage,
    MediaItem,
};
use tracing::debug;

use crate::descriptor::base_descriptor;
use crate::error::Result;
use crate::fetch::{ImageFetcher, fetch_first};
use crate::selector::ArtworkVariantSelector;
use crate::sizing::to_pixels;

/// Stateless helper that fetches the best artwork for an item laid out in a
/// given box.
///
/// Unlike [`ArtworkResolution`](crate::ArtworkResolution) there is no
/// policy, no caching and no change notification; each call walks the
/// candidates again.
#[derive(Clone)]
pub struct ArtworkSource {
    item: Arc<MediaItem>,
    fetcher: Arc<dyn ImageFetcher>,
    selector: Arc<ArtworkVariantSelector>,
    variants: Vec<ImageVariant>,
}

impl fmt::Debug for ArtworkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtworkSource")
            .field("item", &self.item.id)
            .field("selector", &self.selector)
            .field("variants", &self.variants)
            .finish()
    }
}

impl ArtworkSource {
    pub fn new(item: Arc<MediaItem>, fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            item,
            fetcher,
            selector: Arc::new(ArtworkVariantSelector::default()),
            variants: Vec::new(),
        }
    }

    pub fn with_selector(
        mut self,
        selector: impl Into<Arc<ArtworkVariantSelector>>,
    ) -> Self {
        self.selector = selector.into();
        self
    }

    /// Fixed variant order. Empty restores the selector's heuristic.
    pub fn with_variants(mut self, variants: impl Into<Vec<ImageVariant>>) -> Self {
        self.variants = variants.into();
        self
    }

    pub fn item(&self) -> &MediaItem {
        &self.item
    }

    /// Available variants for `available`, in the order they are tried.
    pub fn candidates(&self, available: DisplayBox) -> Vec<ImageVariant> {
        self.selector
            .select_candidates(&self.item, available, &self.variants)
            .collect()
    }

    /// Descriptor for `variant` in `available`.
    ///
    /// Only the dominant finite axis is requested. Enhancers stay off.
    pub fn descriptor(
        &self,
        variant: ImageVariant,
        available: DisplayBox,
    ) -> FetchDescriptor {
        let (width, height) = dominant_axis_pixels(available);

        base_descriptor(
            &self.item,
            variant,
            None,
            self.selector.settings().inherit_parent_thumbs,
        )
        .with_pixel_size(width, height)
        .with_enhancers(false)
    }

    pub async fn try_download(
        &self,
        available: DisplayBox,
    ) -> Result<LoadedImage> {
        let descriptors: Vec<_> = self
            .candidates(available)
            .into_iter()
            .map(|variant| self.descriptor(variant, available))
            .collect();

        fetch_first(self.fetcher.as_ref(), descriptors, self.item.id).await
    }

    /// First image that loads, or `Empty`.
    pub async fn download(&self, available: DisplayBox) -> ImageHandle {
        match self.try_download(available).await {
            Ok(image) => ImageHandle::Loaded(image),
            Err(err) => {
                debug!(item = %self.item.id, %err, "no artwork for source");
                ImageHandle::Empty
            }
        }
    }
}

fn dominant_axis_pixels(available: DisplayBox) -> (Option<u32>, Option<u32>) {
    let width_finite = available.width.is_finite();
    let height_finite = available.height.is_finite();

    let width = (width_finite
        && (!height_finite || available.width > available.height))
        .then(|| to_pixels(available.width))
        .flatten();
    let height = (height_finite
        && (!width_finite || available.height > available.width))
        .then(|| to_pixels(available.height))
        .flatten();

    (width, height)
}
