//! Variant selection: which image roles to try for an item, in which order.

use marquee_model::{DisplayBox, ImageVariant, MediaItem};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ArtworkError, Result};

/// Maximum absolute difference between the box ratio and the item's primary
/// image ratio for the two to count as matching.
pub const DEFAULT_ASPECT_TOLERANCE: f64 = 0.2;

/// Order tried when the caller has no explicit preference and the box does
/// not favour the primary image.
pub const DEFAULT_BASE_PRIORITY: [ImageVariant; 6] = [
    ImageVariant::Backdrop,
    ImageVariant::Screenshot,
    ImageVariant::Box,
    ImageVariant::Thumb,
    ImageVariant::Disc,
    ImageVariant::Primary,
];

/// Tunables for [`ArtworkVariantSelector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSettings {
    /// See [`DEFAULT_ASPECT_TOLERANCE`].
    pub aspect_tolerance: f64,
    /// Treat a parent or series thumb as the item's own thumb. Episodes
    /// rarely carry a thumb of their own.
    pub inherit_parent_thumbs: bool,
    /// See [`DEFAULT_BASE_PRIORITY`].
    pub base_priority: Vec<ImageVariant>,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            aspect_tolerance: DEFAULT_ASPECT_TOLERANCE,
            inherit_parent_thumbs: true,
            base_priority: DEFAULT_BASE_PRIORITY.to_vec(),
        }
    }
}

/// Pure decision logic turning an item and a target box into an ordered
/// candidate sequence.
#[derive(Debug, Clone, Default)]
pub struct ArtworkVariantSelector {
    settings: SelectorSettings,
}

impl ArtworkVariantSelector {
    pub fn new(settings: SelectorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SelectorSettings {
        &self.settings
    }

    /// Candidate variants for `item` in `display_box`, filtered by
    /// availability.
    ///
    /// A non-empty `preferred` order is used verbatim. Otherwise the base
    /// priority applies, with `Primary` moved to the front when the box is
    /// unbounded or matches the item's primary aspect ratio.
    pub fn select_candidates<'a>(
        &'a self,
        item: &'a MediaItem,
        display_box: DisplayBox,
        preferred: &[ImageVariant],
    ) -> Candidates<'a> {
        let order = self.priority_order(item, display_box, preferred);
        debug!(
            item = %item.id,
            width = display_box.width,
            height = display_box.height,
            ?order,
            "computed artwork priority order"
        );

        Candidates {
            selector: self,
            item,
            order,
            position: 0,
        }
    }

    /// The unfiltered order the candidate sequence walks.
    pub fn priority_order(
        &self,
        item: &MediaItem,
        display_box: DisplayBox,
        preferred: &[ImageVariant],
    ) -> Vec<ImageVariant> {
        if !preferred.is_empty() {
            return preferred.to_vec();
        }

        let mut order = Vec::with_capacity(self.settings.base_priority.len() + 1);
        if self.prefers_primary(item, display_box) {
            order.push(ImageVariant::Primary);
        }
        order.extend(self.settings.base_priority.iter().copied());
        order
    }

    /// First variant [`Self::select_candidates`] would yield, without
    /// building the order or logging it. Used on layout paths.
    pub fn first_candidate(
        &self,
        item: &MediaItem,
        display_box: DisplayBox,
        preferred: &[ImageVariant],
    ) -> Option<ImageVariant> {
        let available = |variant: &ImageVariant| {
            self.is_variant_available(item, *variant)
        };

        if !preferred.is_empty() {
            return preferred.iter().copied().find(available);
        }

        let primary_first = self.prefers_primary(item, display_box);
        primary_first
            .then_some(ImageVariant::Primary)
            .into_iter()
            .chain(self.settings.base_priority.iter().copied())
            .find(available)
    }

    /// Whether the geometry heuristic moves `Primary` to the front.
    pub fn prefers_primary(
        &self,
        item: &MediaItem,
        display_box: DisplayBox,
    ) -> bool {
        if display_box.is_unbounded() {
            return true;
        }

        let Some(primary_ratio) = item.primary_image_aspect_ratio else {
            return false;
        };

        match box_ratio(display_box) {
            Ok(ratio) => {
                (ratio - primary_ratio).abs() <= self.settings.aspect_tolerance
            }
            Err(err) => {
                debug!(item = %item.id, %err, "skipping aspect match");
                false
            }
        }
    }

    /// Whether the server can serve `variant` for `item`.
    pub fn is_variant_available(
        &self,
        item: &MediaItem,
        variant: ImageVariant,
    ) -> bool {
        match variant {
            ImageVariant::Backdrop => item.backdrop_count() > 0,
            ImageVariant::Thumb => {
                item.has_image_tag(ImageVariant::Thumb)
                    || (self.settings.inherit_parent_thumbs
                        && (item.parent_thumb_tag().is_some()
                            || item.series_thumb_tag().is_some()))
            }
            ImageVariant::Screenshot => {
                item.has_image_tag(ImageVariant::Screenshot)
                    || item.screenshot_count() > 0
            }
            ImageVariant::Primary
            | ImageVariant::Art
            | ImageVariant::Banner
            | ImageVariant::Logo
            | ImageVariant::Disc
            | ImageVariant::Box
            | ImageVariant::BoxRear
            | ImageVariant::Menu
            | ImageVariant::Chapter => item.has_image_tag(variant),
        }
    }
}

/// Width over height of a bounded box.
///
/// Only called for boxes with both axes bounded; anything non-positive or NaN
/// is reported as [`ArtworkError::InvalidGeometry`].
fn box_ratio(display_box: DisplayBox) -> Result<f64> {
    display_box
        .aspect_ratio()
        .ok_or(ArtworkError::InvalidGeometry {
            width: display_box.width,
            height: display_box.height,
        })
}

/// Lazily filtered candidate sequence.
///
/// Cloning the iterator, or calling [`Candidates::restart`], replays the
/// sequence from the beginning. Each variant is yielded at most once.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    selector: &'a ArtworkVariantSelector,
    item: &'a MediaItem,
    order: Vec<ImageVariant>,
    position: usize,
}

impl Candidates<'_> {
    pub fn restart(&mut self) {
        self.position = 0;
    }

    /// The order being walked, before availability filtering.
    pub fn order(&self) -> &[ImageVariant] {
        &self.order
    }
}

impl Iterator for Candidates<'_> {
    type Item = ImageVariant;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.order.len() {
            let index = self.position;
            self.position += 1;

            let variant = self.order[index];
            if self.order[..index].contains(&variant) {
                continue;
            }
            if self.selector.is_variant_available(self.item, variant) {
                return Some(variant);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len() - self.position))
    }
}
