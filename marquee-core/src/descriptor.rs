//! Translation of a chosen variant into a fetch descriptor.

use marquee_model::{FetchDescriptor, ImageVariant, ItemId, MediaItem};

use crate::policy::SizingPolicy;
use crate::sizing::{ArtworkSize, requested_pixels};

/// The item that actually carries the thumb for `item`, with its tag.
///
/// Order: the item's own thumb, the parent thumb item, the series. When
/// inheritance is disabled, or no inherited owner is complete, the item
/// itself is the owner.
pub fn thumb_owner(
    item: &MediaItem,
    inherit_parent_thumbs: bool,
) -> (ItemId, Option<String>) {
    if let Some(tag) = item.image_tag(ImageVariant::Thumb) {
        return (item.id, Some(tag.to_owned()));
    }

    if inherit_parent_thumbs {
        if let (Some(owner), Some(tag)) =
            (item.parent_thumb_item_id, item.parent_thumb_tag())
        {
            return (owner, Some(tag.to_owned()));
        }
        if let (Some(owner), Some(tag)) = (item.series_id, item.series_thumb_tag())
        {
            return (owner, Some(tag.to_owned()));
        }
    }

    (item.id, None)
}

/// Descriptor carrying only the owner, tag and index for `variant`; no sizing
/// or overlay hints.
pub fn base_descriptor(
    item: &MediaItem,
    variant: ImageVariant,
    backdrop_index: Option<u32>,
    inherit_parent_thumbs: bool,
) -> FetchDescriptor {
    let descriptor = FetchDescriptor::new(item.id, variant);

    match variant {
        ImageVariant::Thumb => {
            let (entity, tag) = thumb_owner(item, inherit_parent_thumbs);
            descriptor.with_entity(entity).with_tag(tag)
        }
        ImageVariant::Backdrop => {
            let index = backdrop_index
                .filter(|index| (*index as usize) < item.backdrop_count());
            let tag = item
                .backdrop_image_tags
                .get(index.unwrap_or(0) as usize)
                .cloned();
            descriptor.with_index(index).with_tag(tag)
        }
        ImageVariant::Screenshot => {
            let tag = item
                .image_tag(variant)
                .map(str::to_owned)
                .or_else(|| item.screenshot_image_tags.first().cloned());
            descriptor.with_tag(tag)
        }
        _ => descriptor.with_tag(item.image_tag(variant).map(str::to_owned)),
    }
}

/// Full descriptor for `variant` laid out at `size` under `policy`.
pub fn build_descriptor(
    item: &MediaItem,
    variant: ImageVariant,
    policy: &SizingPolicy,
    size: ArtworkSize,
    inherit_parent_thumbs: bool,
) -> FetchDescriptor {
    let (pixel_width, pixel_height) = requested_pixels(policy, variant, size);
    let (played, unplayed) = watched_overlay(item, policy);

    base_descriptor(item, variant, policy.backdrop_index, inherit_parent_thumbs)
        .with_pixel_size(pixel_width, pixel_height)
        .with_enhancers(policy.enable_server_enhancers)
        .with_watched_overlay(played, unplayed)
}

fn watched_overlay(
    item: &MediaItem,
    policy: &SizingPolicy,
) -> (bool, Option<u32>) {
    match (&item.user_data, policy.show_watched_overlay) {
        (Some(data), true) => (data.played, data.unplayed_item_count),
        _ => (false, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::{ImageEndpoint, ItemType, UserItemData};

    fn episode() -> MediaItem {
        MediaItem::new(ItemId::new(), ItemType::Episode)
    }

    #[test]
    fn own_thumb_wins_over_inherited() {
        let parent = ItemId::new();
        let mut item = episode().with_image_tag(ImageVariant::Thumb, "own");
        item.parent_thumb_item_id = Some(parent);
        item.parent_thumb_image_tag = Some("parent".into());

        assert_eq!(thumb_owner(&item, true), (item.id, Some("own".into())));
    }

    #[test]
    fn parent_thumb_beats_series_thumb() {
        let parent = ItemId::new();
        let series = ItemId::new();
        let mut item = episode();
        item.parent_thumb_item_id = Some(parent);
        item.parent_thumb_image_tag = Some("parent".into());
        item.series_id = Some(series);
        item.series_thumb_image_tag = Some("series".into());

        let descriptor = base_descriptor(&item, ImageVariant::Thumb, None, true);
        assert_eq!(descriptor.entity, parent);
        assert_eq!(descriptor.item_id, item.id);
        assert_eq!(descriptor.endpoint, ImageEndpoint::Thumb);
        assert_eq!(descriptor.tag.as_deref(), Some("parent"));
    }

    #[test]
    fn series_thumb_needs_series_id() {
        let mut item = episode();
        item.series_thumb_image_tag = Some("series".into());
        assert_eq!(thumb_owner(&item, true), (item.id, None));

        let series = ItemId::new();
        item.series_id = Some(series);
        assert_eq!(thumb_owner(&item, true), (series, Some("series".into())));
        assert_eq!(thumb_owner(&item, false), (item.id, None));
    }

    #[test]
    fn backdrop_index_applies_only_when_in_range() {
        let item = episode().with_backdrops(["a", "b"]);

        let second = base_descriptor(&item, ImageVariant::Backdrop, Some(1), true);
        assert_eq!(second.variant_index, Some(1));
        assert_eq!(second.tag.as_deref(), Some("b"));

        let missing =
            base_descriptor(&item, ImageVariant::Backdrop, Some(5), true);
        assert_eq!(missing.variant_index, None);
        assert_eq!(missing.tag.as_deref(), Some("a"));

        let primary = base_descriptor(&item, ImageVariant::Primary, Some(1), true);
        assert_eq!(primary.variant_index, None);
    }

    #[test]
    fn overlay_follows_policy_and_user_data() {
        let item = episode()
            .with_image_tag(ImageVariant::Primary, "p")
            .with_user_data(UserItemData {
                played: true,
                unplayed_item_count: Some(3),
            });
        let mut policy = SizingPolicy {
            enable_server_enhancers: true,
            ..SizingPolicy::default()
        };

        let hidden = build_descriptor(
            &item,
            ImageVariant::Primary,
            &policy,
            ArtworkSize::ZERO,
            true,
        );
        assert!(!hidden.played_indicator);
        assert_eq!(hidden.unplayed_count, None);
        assert!(hidden.enable_enhancers);

        policy.show_watched_overlay = true;
        let shown = build_descriptor(
            &item,
            ImageVariant::Primary,
            &policy,
            ArtworkSize::ZERO,
            true,
        );
        assert!(shown.played_indicator);
        assert_eq!(shown.unplayed_count, Some(3));
        assert_eq!(shown.tag.as_deref(), Some("p"));
    }

    #[test]
    fn exact_backdrop_descriptor_carries_desired_width() {
        let item = episode().with_backdrops(["bd"]);
        let policy = SizingPolicy {
            desired_width: Some(400.0),
            desired_height: Some(600.0),
            enforce_preferred_aspect_ratio: true,
            ..SizingPolicy::default()
        };

        let descriptor = build_descriptor(
            &item,
            ImageVariant::Backdrop,
            &policy,
            ArtworkSize::new(400.0, 600.0),
            true,
        );
        assert_eq!(descriptor.pixel_width, Some(400));
        assert_eq!(descriptor.pixel_height, Some(600));
    }
}
