//! Pure sizing arithmetic shared by the stateful resolution and the one-shot
//! source.

use marquee_model::{ImageDimensions, ImageVariant};

use crate::policy::SizingPolicy;

/// Laid-out size of an artwork slot in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArtworkSize {
    pub width: f64,
    pub height: f64,
}

impl ArtworkSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size padded by `margin` on every side.
    pub fn inflate(self, margin: f64) -> Self {
        Self {
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }
}

/// Ratio used to derive a missing axis.
///
/// Natural dimensions win unless the policy enforces the nominal ratio or no
/// image is loaded yet.
pub fn effective_aspect_ratio(
    policy: &SizingPolicy,
    natural: Option<ImageDimensions>,
    nominal: f64,
) -> f64 {
    match natural {
        Some(dimensions) if !policy.enforce_preferred_aspect_ratio => {
            dimensions.aspect_ratio()
        }
        _ => nominal,
    }
}

/// Actual size for `policy` given the loaded image (if any) and the nominal
/// ratio of the selected variant.
pub fn compute_size(
    policy: &SizingPolicy,
    natural: Option<ImageDimensions>,
    nominal: f64,
) -> ArtworkSize {
    let ratio = effective_aspect_ratio(policy, natural, nominal);
    let desired_width = policy.desired_width();
    let desired_height = policy.desired_height();

    let width = desired_width
        .or_else(|| desired_height.map(|h| h * ratio))
        .or_else(|| natural.map(|d| d.width_f64()))
        .unwrap_or(0.0);
    let height = desired_height
        .or_else(|| desired_width.map(|w| w / ratio))
        .or_else(|| natural.map(|d| d.height_f64()))
        .unwrap_or(0.0);

    ArtworkSize { width, height }
}

/// Pixel dimensions to request from the server for `variant`.
///
/// With exact sizing the laid-out width is sent, plus the height when one was
/// desired; a height derived from a ratio never goes out. Without exact
/// sizing only the bounding axis the caller asked for goes out, height first.
pub fn requested_pixels(
    policy: &SizingPolicy,
    variant: ImageVariant,
    size: ArtworkSize,
) -> (Option<u32>, Option<u32>) {
    let desired_width = policy.desired_width();
    let desired_height = policy.desired_height();

    if desired_width.is_none() && desired_height.is_none() {
        return (None, None);
    }

    if policy.downloads_at_exact_size(variant) {
        return (to_pixels(size.width), desired_height.and_then(to_pixels));
    }

    match desired_height {
        Some(height) => (None, to_pixels(height)),
        None => (desired_width.and_then(to_pixels), None),
    }
}

/// Round a layout value to whole pixels. Anything that does not round to a
/// positive finite value is dropped.
pub fn to_pixels(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round();
    (rounded >= 1.0 && rounded <= f64::from(u32::MAX)).then_some(rounded as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> ImageDimensions {
        ImageDimensions::try_from((width, height)).expect("valid dimensions")
    }

    #[test]
    fn desired_height_derives_width_from_natural_ratio() {
        let policy = SizingPolicy {
            desired_height: Some(300.0),
            ..SizingPolicy::default()
        };

        let size = compute_size(&policy, Some(dims(1920, 1080)), 2.0 / 3.0);
        assert_eq!(size.height, 300.0);
        assert!((size.width - 533.333).abs() < 0.01);
    }

    #[test]
    fn nominal_ratio_applies_until_an_image_loads() {
        let policy = SizingPolicy {
            desired_height: Some(500.0),
            ..SizingPolicy::default()
        };

        let size = compute_size(&policy, None, 2.0 / 3.0);
        assert!((size.width - 333.333).abs() < 0.01);
        assert_eq!(size.height, 500.0);
    }

    #[test]
    fn enforced_ratio_ignores_natural_dimensions() {
        let policy = SizingPolicy {
            desired_width: Some(400.0),
            enforce_preferred_aspect_ratio: true,
            ..SizingPolicy::default()
        };

        let size = compute_size(&policy, Some(dims(1000, 1000)), 16.0 / 9.0);
        assert_eq!(size.width, 400.0);
        assert!((size.height - 225.0).abs() < 1e-9);
    }

    #[test]
    fn both_axes_desired_are_both_authoritative() {
        let policy = SizingPolicy {
            desired_width: Some(400.0),
            desired_height: Some(600.0),
            ..SizingPolicy::default()
        };

        let size = compute_size(&policy, Some(dims(1920, 1080)), 1.0);
        assert_eq!(size, ArtworkSize::new(400.0, 600.0));
    }

    #[test]
    fn unconstrained_policy_uses_natural_or_zero() {
        let policy = SizingPolicy::default();

        assert_eq!(
            compute_size(&policy, Some(dims(640, 360)), 1.0),
            ArtworkSize::new(640.0, 360.0)
        );
        assert_eq!(compute_size(&policy, None, 1.0), ArtworkSize::ZERO);
    }

    #[test]
    fn exact_size_sends_both_axes() {
        let policy = SizingPolicy {
            desired_width: Some(400.0),
            desired_height: Some(600.0),
            enforce_preferred_aspect_ratio: true,
            ..SizingPolicy::default()
        };
        let size = compute_size(&policy, None, 16.0 / 9.0);

        assert_eq!(
            requested_pixels(&policy, ImageVariant::Backdrop, size),
            (Some(400), Some(600))
        );
    }

    #[test]
    fn exact_width_only_leaves_height_to_the_server() {
        let policy = SizingPolicy {
            desired_width: Some(400.0),
            download_images_at_exact_size: true,
            ..SizingPolicy::default()
        };
        let size = compute_size(&policy, None, 16.0 / 9.0);

        assert_eq!(
            requested_pixels(&policy, ImageVariant::Backdrop, size),
            (Some(400), None)
        );
    }

    #[test]
    fn exact_height_only_sends_derived_width() {
        let policy = SizingPolicy {
            desired_height: Some(300.0),
            download_primary_at_exact_size: true,
            ..SizingPolicy::default()
        };
        let size = compute_size(&policy, None, 2.0 / 3.0);

        assert_eq!(
            requested_pixels(&policy, ImageVariant::Primary, size),
            (Some(200), Some(300))
        );
    }

    #[test]
    fn inexact_requests_send_one_bounding_axis() {
        let both = SizingPolicy {
            desired_width: Some(400.0),
            desired_height: Some(600.0),
            ..SizingPolicy::default()
        };
        let size = compute_size(&both, None, 1.0);
        assert_eq!(
            requested_pixels(&both, ImageVariant::Primary, size),
            (None, Some(600))
        );

        let width_only = SizingPolicy {
            desired_width: Some(399.6),
            ..SizingPolicy::default()
        };
        let size = compute_size(&width_only, None, 1.0);
        assert_eq!(
            requested_pixels(&width_only, ImageVariant::Primary, size),
            (Some(400), None)
        );
    }

    #[test]
    fn nothing_desired_means_nothing_requested() {
        let policy = SizingPolicy {
            download_images_at_exact_size: true,
            ..SizingPolicy::default()
        };
        let size = compute_size(&policy, Some(dims(640, 360)), 1.0);
        assert_eq!(
            requested_pixels(&policy, ImageVariant::Backdrop, size),
            (None, None)
        );
    }

    #[test]
    fn to_pixels_drops_unusable_values() {
        assert_eq!(to_pixels(f64::INFINITY), None);
        assert_eq!(to_pixels(f64::NAN), None);
        assert_eq!(to_pixels(0.2), None);
        assert_eq!(to_pixels(-3.0), None);
        assert_eq!(to_pixels(332.5), Some(333));
    }

    #[test]
    fn inflate_pads_every_side() {
        assert_eq!(
            ArtworkSize::new(100.0, 150.0).inflate(4.0),
            ArtworkSize::new(108.0, 158.0)
        );
    }
}
