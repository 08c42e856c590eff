//! Nominal aspect ratios used to size artwork before real dimensions are
//! known.

use std::collections::BTreeMap;

use marquee_model::{ImageVariant, ItemType};
use serde::{Deserialize, Serialize};

const POSTER: f64 = 2.0 / 3.0;
const WIDESCREEN: f64 = 16.0 / 9.0;
const SQUARE: f64 = 1.0;

/// A ratio that only applies to one item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalRatioOverride {
    pub variant: ImageVariant,
    pub item_type: ItemType,
    pub ratio: f64,
}

/// Lookup table of width/height ratios per variant and item type.
///
/// Resolution order: an override matching both variant and item type, then
/// the per-variant entry, then `fallback`. Entries that are not finite and
/// positive are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NominalAspectRatios {
    pub fallback: f64,
    pub variants: BTreeMap<ImageVariant, f64>,
    pub overrides: Vec<NominalRatioOverride>,
}

impl Default for NominalAspectRatios {
    fn default() -> Self {
        let variants = BTreeMap::from([
            (ImageVariant::Primary, POSTER),
            (ImageVariant::Art, WIDESCREEN),
            (ImageVariant::Backdrop, WIDESCREEN),
            (ImageVariant::Banner, 1000.0 / 185.0),
            (ImageVariant::Logo, 800.0 / 310.0),
            (ImageVariant::Thumb, WIDESCREEN),
            (ImageVariant::Disc, SQUARE),
            (ImageVariant::Box, POSTER),
            (ImageVariant::BoxRear, POSTER),
            (ImageVariant::Screenshot, WIDESCREEN),
            (ImageVariant::Menu, WIDESCREEN),
            (ImageVariant::Chapter, WIDESCREEN),
        ]);

        let overrides = [
            (ItemType::Episode, WIDESCREEN),
            (ItemType::MusicAlbum, SQUARE),
            (ItemType::Audio, SQUARE),
            (ItemType::Folder, SQUARE),
        ]
        .into_iter()
        .map(|(item_type, ratio)| NominalRatioOverride {
            variant: ImageVariant::Primary,
            item_type,
            ratio,
        })
        .collect();

        Self {
            fallback: SQUARE,
            variants,
            overrides,
        }
    }
}

impl NominalAspectRatios {
    /// An empty table answering `fallback` for everything.
    pub fn uniform(fallback: f64) -> Self {
        Self {
            fallback,
            variants: BTreeMap::new(),
            overrides: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: ImageVariant, ratio: f64) -> Self {
        self.variants.insert(variant, ratio);
        self
    }

    pub fn with_override(
        mut self,
        variant: ImageVariant,
        item_type: ItemType,
        ratio: f64,
    ) -> Self {
        self.overrides.push(NominalRatioOverride {
            variant,
            item_type,
            ratio,
        });
        self
    }

    /// Nominal ratio for `variant` on an item of `item_type`. Always finite
    /// and positive.
    pub fn lookup(&self, variant: ImageVariant, item_type: &ItemType) -> f64 {
        self.overrides
            .iter()
            .filter(|o| o.variant == variant && &o.item_type == item_type)
            .map(|o| o.ratio)
            .chain(self.variants.get(&variant).copied())
            .chain(std::iter::once(self.fallback))
            .find(|ratio| usable(*ratio))
            .unwrap_or(SQUARE)
    }
}

fn usable(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}
