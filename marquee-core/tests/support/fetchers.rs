use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marquee_core::{FetchError, ImageFetcher};
use marquee_model::{
    FetchDescriptor, ImageDimensions, ImageVariant, LoadedImage,
};
use tokio::sync::Notify;
use url::Url;

/// In-memory fetcher with scripted failures, per-variant dimensions and an
/// optional gate that holds every fetch until released.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    calls: AtomicUsize,
    requests: Mutex<Vec<FetchDescriptor>>,
    failing: HashSet<ImageVariant>,
    panicking: HashSet<ImageVariant>,
    dimensions: HashMap<ImageVariant, (u32, u32)>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, variant: ImageVariant) -> Self {
        self.failing.insert(variant);
        self
    }

    pub fn panicking(mut self, variant: ImageVariant) -> Self {
        self.panicking.insert(variant);
        self
    }

    pub fn with_dimensions(
        mut self,
        variant: ImageVariant,
        width: u32,
        height: u32,
    ) -> Self {
        self.dimensions.insert(variant, (width, height));
        self
    }

    /// Hold every fetch until [`release`](Self::release) is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one gated fetch through.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<FetchDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<FetchDescriptor> {
        self.requests.lock().unwrap().last().cloned()
    }
}

pub fn fake_url(descriptor: &FetchDescriptor) -> Url {
    Url::parse(&format!(
        "http://fake/Items/{}/Images/{}",
        descriptor.entity.as_path_segment(),
        descriptor.variant
    ))
    .unwrap()
}

#[async_trait]
impl ImageFetcher for ScriptedFetcher {
    async fn fetch_image(
        &self,
        descriptor: &FetchDescriptor,
    ) -> Result<LoadedImage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(descriptor.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.panicking.contains(&descriptor.variant) {
            panic!("scripted panic for {}", descriptor.variant);
        }
        if self.failing.contains(&descriptor.variant) {
            return Err(FetchError::NotFound);
        }

        let (width, height) = self
            .dimensions
            .get(&descriptor.variant)
            .copied()
            .unwrap_or((1000, 1500));

        Ok(LoadedImage::new(
            fake_url(descriptor),
            descriptor.variant,
            ImageDimensions::try_from((width, height)).unwrap(),
        ))
    }
}
