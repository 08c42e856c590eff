//! Sizing and quality policy for an artwork slot.

use marquee_model::{DisplayBox, ImageVariant};
use serde::{Deserialize, Serialize};

/// Caller-owned constraints and quality switches for one artwork slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingPolicy {
    pub desired_width: Option<f64>,
    pub desired_height: Option<f64>,
    /// Size with the nominal ratio even once natural dimensions are known,
    /// and always request exact pixel sizes.
    pub enforce_preferred_aspect_ratio: bool,
    /// Request exact pixel sizes for every variant other than `Primary`.
    pub download_images_at_exact_size: bool,
    /// Request exact pixel sizes for `Primary`.
    pub download_primary_at_exact_size: bool,
    pub enable_server_enhancers: bool,
    pub show_watched_overlay: bool,
    /// Explicit candidate order. Empty means "let the selector decide".
    pub preferred_variant_order: Vec<ImageVariant>,
    /// Which backdrop to request when the item has several.
    pub backdrop_index: Option<u32>,
}

impl SizingPolicy {
    /// Desired width, when set to a finite positive value.
    pub fn desired_width(&self) -> Option<f64> {
        self.desired_width.filter(|v| usable(*v))
    }

    /// Desired height, when set to a finite positive value.
    pub fn desired_height(&self) -> Option<f64> {
        self.desired_height.filter(|v| usable(*v))
    }

    /// Target box for variant selection; missing axes are unbounded.
    pub fn display_box(&self) -> DisplayBox {
        DisplayBox::from_desired(self.desired_width(), self.desired_height())
    }

    /// Whether requests for `variant` should carry the full desired size.
    pub fn downloads_at_exact_size(&self, variant: ImageVariant) -> bool {
        self.enforce_preferred_aspect_ratio
            || if variant.is_primary() {
                self.download_primary_at_exact_size
            } else {
                self.download_images_at_exact_size
            }
    }

    /// Apply `patch`, returning the fields whose value actually changed.
    pub fn apply(&mut self, patch: PolicyPatch) -> Vec<PolicyField> {
        let mut changed = Vec::new();

        fn set<T: PartialEq>(
            slot: &mut T,
            value: Option<T>,
            field: PolicyField,
            changed: &mut Vec<PolicyField>,
        ) {
            if let Some(value) = value
                && *slot != value
            {
                *slot = value;
                changed.push(field);
            }
        }

        set(
            &mut self.desired_width,
            patch.desired_width,
            PolicyField::DesiredWidth,
            &mut changed,
        );
        set(
            &mut self.desired_height,
            patch.desired_height,
            PolicyField::DesiredHeight,
            &mut changed,
        );
        set(
            &mut self.enforce_preferred_aspect_ratio,
            patch.enforce_preferred_aspect_ratio,
            PolicyField::EnforcePreferredAspectRatio,
            &mut changed,
        );
        set(
            &mut self.download_images_at_exact_size,
            patch.download_images_at_exact_size,
            PolicyField::DownloadImagesAtExactSize,
            &mut changed,
        );
        set(
            &mut self.download_primary_at_exact_size,
            patch.download_primary_at_exact_size,
            PolicyField::DownloadPrimaryAtExactSize,
            &mut changed,
        );
        set(
            &mut self.enable_server_enhancers,
            patch.enable_server_enhancers,
            PolicyField::EnableServerEnhancers,
            &mut changed,
        );
        set(
            &mut self.show_watched_overlay,
            patch.show_watched_overlay,
            PolicyField::ShowWatchedOverlay,
            &mut changed,
        );
        set(
            &mut self.preferred_variant_order,
            patch.preferred_variant_order,
            PolicyField::PreferredVariantOrder,
            &mut changed,
        );
        set(
            &mut self.backdrop_index,
            patch.backdrop_index,
            PolicyField::BackdropIndex,
            &mut changed,
        );

        changed
    }
}

fn usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Observable policy fields, one per [`SizingPolicy`] member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyField {
    DesiredWidth,
    DesiredHeight,
    EnforcePreferredAspectRatio,
    DownloadImagesAtExactSize,
    DownloadPrimaryAtExactSize,
    EnableServerEnhancers,
    ShowWatchedOverlay,
    PreferredVariantOrder,
    BackdropIndex,
}

/// A partial policy update. `None` leaves a field untouched; for optional
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicyPatch {
    pub desired_width: Option<Option<f64>>,
    pub desired_height: Option<Option<f64>>,
    pub enforce_preferred_aspect_ratio: Option<bool>,
    pub download_images_at_exact_size: Option<bool>,
    pub download_primary_at_exact_size: Option<bool>,
    pub enable_server_enhancers: Option<bool>,
    pub show_watched_overlay: Option<bool>,
    pub preferred_variant_order: Option<Vec<ImageVariant>>,
    pub backdrop_index: Option<Option<u32>>,
}

impl PolicyPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn desired_width(mut self, width: impl Into<Option<f64>>) -> Self {
        self.desired_width = Some(width.into());
        self
    }

    pub fn desired_height(mut self, height: impl Into<Option<f64>>) -> Self {
        self.desired_height = Some(height.into());
        self
    }

    pub fn enforce_preferred_aspect_ratio(mut self, enabled: bool) -> Self {
        self.enforce_preferred_aspect_ratio = Some(enabled);
        self
    }

    pub fn download_images_at_exact_size(mut self, enabled: bool) -> Self {
        self.download_images_at_exact_size = Some(enabled);
        self
    }

    pub fn download_primary_at_exact_size(mut self, enabled: bool) -> Self {
        self.download_primary_at_exact_size = Some(enabled);
        self
    }

    pub fn enable_server_enhancers(mut self, enabled: bool) -> Self {
        self.enable_server_enhancers = Some(enabled);
        self
    }

    pub fn show_watched_overlay(mut self, enabled: bool) -> Self {
        self.show_watched_overlay = Some(enabled);
        self
    }

    pub fn preferred_variant_order(
        mut self,
        order: impl Into<Vec<ImageVariant>>,
    ) -> Self {
        self.preferred_variant_order = Some(order.into());
        self
    }

    pub fn backdrop_index(mut self, index: impl Into<Option<u32>>) -> Self {
        self.backdrop_index = Some(index.into());
        self
    }
}
