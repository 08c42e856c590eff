use crate::{ItemId, image::ImageVariant};

/// Which server endpoint serves a descriptor.
///
/// Thumbs have their own route because they may be served from a parent or
/// series item rather than the item itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageEndpoint {
    Image,
    Thumb,
}

impl ImageEndpoint {
    pub const fn for_variant(variant: ImageVariant) -> Self {
        match variant {
            ImageVariant::Thumb => ImageEndpoint::Thumb,
            _ => ImageEndpoint::Image,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            ImageEndpoint::Image => "image",
            ImageEndpoint::Thumb => "thumb",
        }
    }
}

/// Everything the fetch collaborator needs to request one image variant.
///
/// `entity` is the item that owns the image on the server. It equals
/// `item_id` except for inherited thumbs, where it names the parent or series
/// that carries the thumb.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchDescriptor {
    pub item_id: ItemId,
    pub entity: ItemId,
    pub variant: ImageVariant,
    pub endpoint: ImageEndpoint,
    pub variant_index: Option<u32>,
    pub pixel_width: Option<u32>,
    pub pixel_height: Option<u32>,
    pub enable_enhancers: bool,
    pub played_indicator: bool,
    pub unplayed_count: Option<u32>,
    /// Opaque cache-busting tag of the owning image, when known.
    pub tag: Option<String>,
}

impl FetchDescriptor {
    /// Create a descriptor for `variant` of `item_id` with no sizing hints.
    pub fn new(item_id: ItemId, variant: ImageVariant) -> Self {
        Self {
            item_id,
            entity: item_id,
            variant,
            endpoint: ImageEndpoint::for_variant(variant),
            variant_index: None,
            pixel_width: None,
            pixel_height: None,
            enable_enhancers: false,
            played_indicator: false,
            unplayed_count: None,
            tag: None,
        }
    }

    pub fn with_entity(mut self, entity: ItemId) -> Self {
        self.entity = entity;
        self
    }

    pub fn with_index(mut self, index: Option<u32>) -> Self {
        self.variant_index = index;
        self
    }

    pub fn with_pixel_size(
        mut self,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        self.pixel_width = width;
        self.pixel_height = height;
        self
    }

    pub fn with_enhancers(mut self, enabled: bool) -> Self {
        self.enable_enhancers = enabled;
        self
    }

    pub fn with_watched_overlay(
        mut self,
        played: bool,
        unplayed_count: Option<u32>,
    ) -> Self {
        self.played_indicator = played;
        self.unplayed_count = unplayed_count;
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }
}
