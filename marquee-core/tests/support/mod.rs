//! Shared fakes for core integration tests.

#![allow(dead_code)]

pub mod fetchers;
pub mod items;
