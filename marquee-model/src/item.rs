use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::{ItemId, image::ImageVariant};

/// Library item kinds the artwork engine distinguishes.
///
/// The item type only feeds nominal aspect-ratio lookups, so unknown server
/// types are preserved as `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ItemType {
    #[default]
    Movie,
    Series,
    Season,
    Episode,
    MusicAlbum,
    Audio,
    Person,
    Folder,
    Other(String),
}

impl ItemType {
    pub fn as_str(&self) -> &str {
        match self {
            ItemType::Movie => "Movie",
            ItemType::Series => "Series",
            ItemType::Season => "Season",
            ItemType::Episode => "Episode",
            ItemType::MusicAlbum => "MusicAlbum",
            ItemType::Audio => "Audio",
            ItemType::Person => "Person",
            ItemType::Folder => "Folder",
            ItemType::Other(value) => value.as_str(),
        }
    }

    /// Parses a server type name, keeping unknown names verbatim.
    pub fn parse(value: &str) -> Self {
        const KNOWN: [ItemType; 8] = [
            ItemType::Movie,
            ItemType::Series,
            ItemType::Season,
            ItemType::Episode,
            ItemType::MusicAlbum,
            ItemType::Audio,
            ItemType::Person,
            ItemType::Folder,
        ];
        KNOWN
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .unwrap_or_else(|| ItemType::Other(value.to_string()))
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ItemType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ItemType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(ItemType::parse(&value))
    }
}

/// Per-user playback state, used only for overlay indicators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UserItemData {
    pub played: bool,
    pub unplayed_item_count: Option<u32>,
}

/// A library item as the server describes it.
///
/// The artwork engine treats items as read-only snapshots; presence of a key
/// in `image_tags` means the server has that variant.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MediaItem {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    pub image_tags: HashMap<ImageVariant, String>,
    pub backdrop_image_tags: Vec<String>,
    pub screenshot_image_tags: Vec<String>,
    pub parent_thumb_item_id: Option<ItemId>,
    pub parent_thumb_image_tag: Option<String>,
    pub series_id: Option<ItemId>,
    pub series_thumb_image_tag: Option<String>,
    /// Width over height of the original primary image, when the server
    /// knows it.
    pub primary_image_aspect_ratio: Option<f64>,
    pub user_data: Option<UserItemData>,
}

impl MediaItem {
    pub fn new(id: ItemId, item_type: ItemType) -> Self {
        Self {
            id,
            item_type,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_image_tag(
        mut self,
        variant: ImageVariant,
        tag: impl Into<String>,
    ) -> Self {
        self.image_tags.insert(variant, tag.into());
        self
    }

    pub fn with_backdrops<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backdrop_image_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_primary_aspect_ratio(mut self, ratio: f64) -> Self {
        self.primary_image_aspect_ratio = Some(ratio);
        self
    }

    pub fn with_user_data(mut self, user_data: UserItemData) -> Self {
        self.user_data = Some(user_data);
        self
    }

    pub fn image_tag(&self, variant: ImageVariant) -> Option<&str> {
        self.image_tags.get(&variant).map(String::as_str)
    }

    pub fn has_image_tag(&self, variant: ImageVariant) -> bool {
        self.image_tags.contains_key(&variant)
    }

    pub fn backdrop_count(&self) -> usize {
        self.backdrop_image_tags.len()
    }

    pub fn screenshot_count(&self) -> usize {
        self.screenshot_image_tags.len()
    }

    /// Parent thumb tag, ignoring empty strings.
    pub fn parent_thumb_tag(&self) -> Option<&str> {
        non_empty(self.parent_thumb_image_tag.as_deref())
    }

    /// Series thumb tag, ignoring empty strings.
    pub fn series_thumb_tag(&self) -> Option<&str> {
        non_empty(self.series_thumb_image_tag.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|tag| !tag.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{ItemType, MediaItem};
    use crate::{ItemId, image::ImageVariant};

    #[test]
    fn unknown_item_types_are_preserved() {
        assert_eq!(ItemType::parse("episode"), ItemType::Episode);
        assert_eq!(
            ItemType::parse("BoxSet"),
            ItemType::Other("BoxSet".to_string())
        );
        assert_eq!(ItemType::parse("BoxSet").as_str(), "BoxSet");
    }

    #[test]
    fn empty_inherited_thumb_tags_count_as_missing() {
        let mut item = MediaItem::new(ItemId::new(), ItemType::Episode);
        item.parent_thumb_image_tag = Some(String::new());
        item.series_thumb_image_tag = Some("s1".into());

        assert_eq!(item.parent_thumb_tag(), None);
        assert_eq!(item.series_thumb_tag(), Some("s1"));
    }

    #[test]
    fn builder_populates_tags_and_counts() {
        let item = MediaItem::new(ItemId::new(), ItemType::Movie)
            .with_image_tag(ImageVariant::Primary, "p1")
            .with_backdrops(["b1", "b2"]);

        assert!(item.has_image_tag(ImageVariant::Primary));
        assert_eq!(item.image_tag(ImageVariant::Primary), Some("p1"));
        assert_eq!(item.backdrop_count(), 2);
        assert_eq!(item.screenshot_count(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_sparse_json() {
        let json = r#"{
            "id": "0191e9c2-7a3b-7c44-8a1e-3f0e5b2d9c10",
            "item_type": "Episode",
            "image_tags": { "Primary": "abc" },
            "parent_thumb_image_tag": "t1"
        }"#;
        let item: MediaItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.item_type, ItemType::Episode);
        assert_eq!(item.image_tag(ImageVariant::Primary), Some("abc"));
        assert_eq!(item.parent_thumb_tag(), Some("t1"));
        assert!(item.user_data.is_none());
    }
}
