//! Dry-run planning: which variants a resolution would try for an item, and
//! what it would request for each.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Context;
use marquee_core::{PolicyPatch, ResolutionPlan, UrlBuilder};
use marquee_model::{FetchDescriptor, ImageVariant, MediaItem};
use url::Url;

use crate::models::artwork::ArtworkConfig;

/// Per-invocation overrides layered over the configured default policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanRequest {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub preferred: Vec<ImageVariant>,
    pub enforce_aspect: bool,
    pub exact: bool,
}

impl PlanRequest {
    /// Patch touching only what was asked for.
    pub fn patch(&self) -> PolicyPatch {
        let mut patch = PolicyPatch::new();
        if let Some(width) = self.width {
            patch = patch.desired_width(width);
        }
        if let Some(height) = self.height {
            patch = patch.desired_height(height);
        }
        if !self.preferred.is_empty() {
            patch = patch.preferred_variant_order(self.preferred.clone());
        }
        if self.enforce_aspect {
            patch = patch.enforce_preferred_aspect_ratio(true);
        }
        if self.exact {
            patch = patch
                .download_images_at_exact_size(true)
                .download_primary_at_exact_size(true);
        }
        patch
    }
}

/// One candidate in try order.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePlan {
    pub variant: ImageVariant,
    pub descriptor: FetchDescriptor,
    /// Present when a server URL is configured.
    pub url: Option<Url>,
}

/// Candidates for `item` under `config` and `request`, in the order a
/// resolution would try them.
pub fn plan_candidates(
    config: &ArtworkConfig,
    item: Arc<MediaItem>,
    request: &PlanRequest,
) -> anyhow::Result<Vec<CandidatePlan>> {
    let mut policy = config.default_policy.clone();
    policy.apply(request.patch());

    let urls = config.url_builder()?;
    let plan = ResolutionPlan::new(
        item,
        policy,
        Arc::new(config.variant_selector()),
        Arc::new(config.nominal_aspect_ratios.clone()),
    );

    plan.candidates()
        .map(|variant| -> anyhow::Result<CandidatePlan> {
            let descriptor = plan.descriptor_for(variant);
            let url = urls
                .as_ref()
                .map(|builder| builder.build(&descriptor))
                .transpose()
                .with_context(|| format!("failed to build URL for {variant}"))?;
            Ok(CandidatePlan {
                variant,
                descriptor,
                url,
            })
        })
        .collect()
}

/// Human-readable listing of `plans`.
pub fn render_plan(item: &MediaItem, plans: &[CandidatePlan]) -> String {
    let mut out = String::new();
    let name = if item.name.is_empty() {
        "<unnamed>"
    } else {
        item.name.as_str()
    };
    let _ = writeln!(out, "{} ({}, {})", name, item.item_type, item.id);

    if plans.is_empty() {
        out.push_str("  no artwork candidates available\n");
        return out;
    }

    for (index, plan) in plans.iter().enumerate() {
        let d = &plan.descriptor;
        let _ = writeln!(
            out,
            "  {}. {} via {} endpoint, owner {}, index {}, width {}, height {}, tag {}",
            index + 1,
            plan.variant,
            d.endpoint.name(),
            d.entity,
            display_opt(d.variant_index),
            display_opt(d.pixel_width),
            display_opt(d.pixel_height),
            d.tag.as_deref().unwrap_or("-"),
        );
        if let Some(url) = &plan.url {
            let _ = writeln!(out, "     {url}");
        }
    }
    out
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
