//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod image;
pub mod item;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::ItemId;
pub use image::{
    DisplayBox, FetchDescriptor, ImageDimensions, ImageEndpoint, ImageHandle,
    ImageVariant, LoadedImage,
};
pub use item::{ItemType, MediaItem, UserItemData};
