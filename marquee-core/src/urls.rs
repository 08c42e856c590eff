//! Server URL construction for fetch descriptors.

use marquee_model::FetchDescriptor;
use url::Url;

use crate::error::{ArtworkError, Result};

/// Turns a descriptor into the URL that serves it.
pub trait UrlBuilder: Send + Sync {
    fn build(&self, descriptor: &FetchDescriptor) -> Result<Url>;
}

/// Builds `{base}/Items/{owner}/Images/{Variant}[/{index}]` URLs against a
/// media server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerUrlBuilder {
    base: Url,
}

impl ServerUrlBuilder {
    pub fn new(base: Url) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(ArtworkError::InvalidBaseUrl(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn parse(base: &str) -> Result<Self> {
        Self::new(Url::parse(base)?)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl UrlBuilder for ServerUrlBuilder {
    fn build(&self, descriptor: &FetchDescriptor) -> Result<Url> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ArtworkError::InvalidBaseUrl(self.base.to_string())
            })?;
            segments
                .pop_if_empty()
                .push("Items")
                .push(&descriptor.entity.as_path_segment())
                .push("Images")
                .push(descriptor.variant.as_str());
            if let Some(index) = descriptor.variant_index {
                segments.push(&index.to_string());
            }
        }

        {
            let mut query = url.query_pairs_mut();
            if let Some(width) = descriptor.pixel_width {
                query.append_pair("width", &width.to_string());
            }
            if let Some(height) = descriptor.pixel_height {
                query.append_pair("height", &height.to_string());
            }
            if let Some(tag) = descriptor.tag.as_deref() {
                query.append_pair("tag", tag);
            }
            query.append_pair(
                "EnableImageEnhancers",
                if descriptor.enable_enhancers {
                    "true"
                } else {
                    "false"
                },
            );
            if descriptor.played_indicator {
                query.append_pair("AddPlayedIndicator", "true");
            }
            if let Some(count) = descriptor.unplayed_count {
                query.append_pair("UnplayedCount", &count.to_string());
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::{ServerUrlBuilder, UrlBuilder};
    use crate::error::ArtworkError;
    use marquee_model::{FetchDescriptor, ImageVariant, ItemId};

    #[test]
    fn image_endpoint_shape() {
        let builder =
            ServerUrlBuilder::parse("https://media.example.com/emby/").unwrap();
        let id = ItemId::new();
        let descriptor = FetchDescriptor::new(id, ImageVariant::Backdrop)
            .with_index(Some(1))
            .with_pixel_size(None, Some(600))
            .with_tag(Some("abc".into()));

        let url = builder.build(&descriptor).unwrap();
        assert_eq!(
            url.as_str(),
            format!(
                "https://media.example.com/emby/Items/{}/Images/Backdrop/1?height=600&tag=abc&EnableImageEnhancers=false",
                id.as_path_segment()
            )
        );
    }

    #[test]
    fn thumb_endpoint_uses_owner_entity() {
        let builder = ServerUrlBuilder::parse("http://localhost:8096").unwrap();
        let item = ItemId::new();
        let series = ItemId::new();
        let descriptor = FetchDescriptor::new(item, ImageVariant::Thumb)
            .with_entity(series)
            .with_enhancers(true)
            .with_watched_overlay(true, Some(4));

        let url = builder.build(&descriptor).unwrap();
        assert_eq!(url.path(), format!("/Items/{}/Images/Thumb", series.as_path_segment()));
        assert_eq!(
            url.query(),
            Some("EnableImageEnhancers=true&AddPlayedIndicator=true&UnplayedCount=4")
        );
    }

    #[test]
    fn base_query_is_not_carried_over() {
        let builder =
            ServerUrlBuilder::parse("http://localhost:8096/?api_key=x").unwrap();
        let descriptor =
            FetchDescriptor::new(ItemId::new(), ImageVariant::Primary)
                .with_pixel_size(Some(300), None);

        let url = builder.build(&descriptor).unwrap();
        assert_eq!(url.query(), Some("width=300&EnableImageEnhancers=false"));
    }

    #[test]
    fn opaque_base_is_rejected() {
        assert!(matches!(
            ServerUrlBuilder::parse("mailto:someone@example.com"),
            Err(ArtworkError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ServerUrlBuilder::parse("not a url"),
            Err(ArtworkError::Url(_))
        ));
    }
}
