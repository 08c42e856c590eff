//! # Marquee Core
//!
//! Artwork resolution engine for Marquee media browsers: decides which image
//! variant of a library item to show in a layout slot, how large to request
//! it, and how large the slot ends up.
//!
//! ## Overview
//!
//! - **Variant selection**: [`ArtworkVariantSelector`] turns an item and a
//!   target box into an ordered, availability-filtered candidate sequence
//! - **Sizing**: pure arithmetic deriving the missing axis from natural or
//!   nominal aspect ratios ([`sizing`], [`NominalAspectRatios`])
//! - **Resolution**: [`ArtworkResolution`] owns the image for one slot,
//!   resolves lazily and guards against out-of-order completions
//! - **One-shot downloads**: [`ArtworkSource`] for callers that only need an
//!   image for a known box
//! - **Transport seams**: [`ImageFetcher`], [`UrlBuilder`] and
//!   [`ImageLoader`]
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use marquee_core::{
//!     ArtworkResolution, FetchError, ImageFetcher, PolicyPatch,
//! };
//! use marquee_model::{
//!     FetchDescriptor, ImageVariant, ItemId, ItemType, LoadedImage,
//!     MediaItem,
//! };
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl ImageFetcher for Offline {
//!     async fn fetch_image(
//!         &self,
//!         _descriptor: &FetchDescriptor,
//!     ) -> Result<LoadedImage, FetchError> {
//!         Err(FetchError::NotFound)
//!     }
//! }
//!
//! # async fn run() {
//! let item = MediaItem::new(ItemId::new(), ItemType::Movie)
//!     .with_image_tag(ImageVariant::Primary, "tag");
//! let mut artwork =
//!     ArtworkResolution::for_item(Arc::new(item), Arc::new(Offline));
//!
//! artwork.set_policy(PolicyPatch::new().desired_height(300.0));
//! let size = artwork.size();
//! println!("{}x{}", size.width, size.height);
//! artwork.resolved().await;
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Nominal aspect ratio table
pub mod aspect;

/// Variant to fetch descriptor translation
pub mod descriptor;

/// Error types and error handling utilities
pub mod error;

/// Fetch collaborators and header probing
pub mod fetch;

/// Sizing policy and partial updates
pub mod policy;

/// Lazily resolved artwork with change notifications
pub mod resolution;

/// Candidate variant selection
pub mod selector;

/// Pure sizing arithmetic
pub mod sizing;

/// One-shot artwork downloads
pub mod source;

/// Server URL construction
pub mod urls;

pub use aspect::{NominalAspectRatios, NominalRatioOverride};
pub use error::{ArtworkError, FetchError, Result};
pub use fetch::{ImageFetcher, ImageLoader, UrlFetcher, probe_dimensions};
pub use policy::{PolicyField, PolicyPatch, SizingPolicy};
pub use resolution::{
    ArtworkChange, ArtworkResolution, ResolutionOutcome, ResolutionPlan,
    ResolutionState,
};
pub use selector::{ArtworkVariantSelector, Candidates, SelectorSettings};
pub use sizing::ArtworkSize;
pub use source::ArtworkSource;
pub use urls::{ServerUrlBuilder, UrlBuilder};
