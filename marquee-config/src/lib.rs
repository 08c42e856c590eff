//! Shared configuration library for Marquee.
//!
//! This crate loads the artwork engine settings (selector tunables, nominal
//! aspect ratios, the default sizing policy and the media server URL) from
//! files or environment variables, and hosts the `marquee-plan` CLI that
//! prints what a resolution would request for a given item.

pub mod models;
pub mod plan;

pub use models::artwork::{
    ArtworkConfig, ArtworkConfigSource, CONFIG_JSON_VAR, CONFIG_PATH_VAR,
};
pub use plan::{CandidatePlan, PlanRequest, plan_candidates, render_plan};
