use std::sync::Arc;

use marquee_model::{FetchDescriptor, ImageVariant, LoadedImage, MediaItem};

use crate::aspect::NominalAspectRatios;
use crate::descriptor::build_descriptor;
use crate::error::Result;
use crate::fetch::{ImageFetcher, fetch_first};
use crate::policy::SizingPolicy;
use crate::selector::{ArtworkVariantSelector, Candidates};
use crate::sizing::compute_size;

/// Snapshot of everything one resolution attempt needs.
///
/// Owned by the spawned task, so later mutations of the resolution never
/// leak into an attempt already in flight.
#[derive(Debug, Clone)]
pub struct ResolutionPlan {
    item: Arc<MediaItem>,
    policy: SizingPolicy,
    selector: Arc<ArtworkVariantSelector>,
    nominal: Arc<NominalAspectRatios>,
    previous: Option<LoadedImage>,
}

impl ResolutionPlan {
    pub fn new(
        item: Arc<MediaItem>,
        policy: SizingPolicy,
        selector: Arc<ArtworkVariantSelector>,
        nominal: Arc<NominalAspectRatios>,
    ) -> Self {
        Self {
            item,
            policy,
            selector,
            nominal,
            previous: None,
        }
    }

    /// Image shown before this attempt. Its natural dimensions size requests
    /// for the same variant.
    pub fn with_previous(mut self, previous: Option<LoadedImage>) -> Self {
        self.previous = previous;
        self
    }

    pub fn item(&self) -> &MediaItem {
        &self.item
    }

    pub fn candidates(&self) -> Candidates<'_> {
        self.selector.select_candidates(
            &self.item,
            self.policy.display_box(),
            &self.policy.preferred_variant_order,
        )
    }

    /// Descriptors in candidate order, built lazily.
    pub fn descriptors(&self) -> impl Iterator<Item = FetchDescriptor> + '_ {
        self.candidates()
            .map(move |variant| self.descriptor_for(variant))
    }

    pub fn descriptor_for(&self, variant: ImageVariant) -> FetchDescriptor {
        let natural = self
            .previous
            .as_ref()
            .filter(|image| image.variant == variant)
            .map(|image| image.dimensions);
        let nominal = self.nominal.lookup(variant, &self.item.item_type);
        let size = compute_size(&self.policy, natural, nominal);

        build_descriptor(
            &self.item,
            variant,
            &self.policy,
            size,
            self.selector.settings().inherit_parent_thumbs,
        )
    }

    pub async fn run(&self, fetcher: &dyn ImageFetcher) -> Result<LoadedImage> {
        fetch_first(fetcher, self.descriptors(), self.item.id).await
    }
}
