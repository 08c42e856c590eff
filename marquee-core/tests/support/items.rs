use std::sync::Arc;

use marquee_model::{ImageVariant, ItemId, ItemType, MediaItem};

pub fn movie_with_primary() -> Arc<MediaItem> {
    Arc::new(
        MediaItem::new(ItemId::new(), ItemType::Movie)
            .with_name("Primary only")
            .with_image_tag(ImageVariant::Primary, "primary-tag"),
    )
}

pub fn movie_with_backdrop_and_primary() -> Arc<MediaItem> {
    Arc::new(
        MediaItem::new(ItemId::new(), ItemType::Movie)
            .with_name("Backdrop and primary")
            .with_image_tag(ImageVariant::Primary, "primary-tag")
            .with_backdrops(["backdrop-0", "backdrop-1"])
            .with_primary_aspect_ratio(2.0 / 3.0),
    )
}

pub fn bare_item() -> Arc<MediaItem> {
    Arc::new(MediaItem::new(ItemId::new(), ItemType::Movie))
}
