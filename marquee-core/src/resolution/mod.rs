//! Stateful, lazily resolved artwork for one item.
//!
//! An [`ArtworkResolution`] belongs to a single view. Mutations mark it stale;
//! the next read of the image or size spawns a resolution task on the ambient
//! tokio runtime. Completions come back over a channel tagged with the
//! generation they were started under, so a superseded attempt can never
//! overwrite newer state.

mod changes;
mod plan;
mod state;

pub use changes::ArtworkChange;
pub use plan::ResolutionPlan;
pub use state::ResolutionState;

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use marquee_model::{
    ImageHandle, ImageVariant, ItemType, LoadedImage, MediaItem,
};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};

use crate::aspect::NominalAspectRatios;
use crate::error::{ArtworkError, FetchError, Result};
use crate::fetch::ImageFetcher;
use crate::policy::{PolicyField, PolicyPatch, SizingPolicy};
use crate::selector::ArtworkVariantSelector;
use crate::sizing::{ArtworkSize, compute_size};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Completion of one resolution attempt.
#[derive(Debug)]
pub struct ResolutionOutcome {
    pub generation: u64,
    pub result: Result<LoadedImage>,
}

/// Artwork for one item under a caller-controlled sizing policy.
///
/// Reads (`image`, `size`) are lazy: they start a resolution when the
/// instance is stale and otherwise return the current values. Both must be
/// called from within a tokio runtime.
pub struct ArtworkResolution {
    fetcher: Arc<dyn ImageFetcher>,
    selector: Arc<ArtworkVariantSelector>,
    nominal: Arc<NominalAspectRatios>,
    item: Option<Arc<MediaItem>>,
    policy: SizingPolicy,
    state: ResolutionState,
    image: ImageHandle,
    failure: Option<ArtworkError>,
    generation: u64,
    version: u64,
    last_size: ArtworkSize,
    in_flight: Option<JoinHandle<()>>,
    outcomes_tx: mpsc::UnboundedSender<ResolutionOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<ResolutionOutcome>,
    changes: broadcast::Sender<ArtworkChange>,
}

impl fmt::Debug for ArtworkResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtworkResolution")
            .field("item", &self.item.as_ref().map(|item| item.id))
            .field("state", &self.state)
            .field("image", &self.image)
            .field("policy", &self.policy)
            .field("generation", &self.generation)
            .field("version", &self.version)
            .field("in_flight", &self.in_flight.is_some())
            .field("subscribers", &self.changes.receiver_count())
            .finish()
    }
}

impl ArtworkResolution {
    /// An unbound resolution in the `Idle` state.
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Self {
            fetcher,
            selector: Arc::new(ArtworkVariantSelector::default()),
            nominal: Arc::new(NominalAspectRatios::default()),
            item: None,
            policy: SizingPolicy::default(),
            state: ResolutionState::Idle,
            image: ImageHandle::Empty,
            failure: None,
            generation: 0,
            version: 0,
            last_size: ArtworkSize::ZERO,
            in_flight: None,
            outcomes_tx,
            outcomes_rx,
            changes,
        }
    }

    /// A resolution bound to `item`, stale until first read.
    pub fn for_item(
        item: Arc<MediaItem>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        let mut resolution = Self::new(fetcher);
        resolution.item = Some(item);
        resolution.state = ResolutionState::Stale;
        resolution.last_size = resolution.current_size();
        resolution
    }

    pub fn with_selector(
        mut self,
        selector: impl Into<Arc<ArtworkVariantSelector>>,
    ) -> Self {
        self.selector = selector.into();
        self.last_size = self.current_size();
        self
    }

    pub fn with_nominal_ratios(
        mut self,
        nominal: impl Into<Arc<NominalAspectRatios>>,
    ) -> Self {
        self.nominal = nominal.into();
        self.last_size = self.current_size();
        self
    }

    pub fn with_policy(mut self, policy: SizingPolicy) -> Self {
        self.policy = policy;
        self.last_size = self.current_size();
        self
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Incremented once per emitted [`ArtworkChange`].
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Why the last resolution ended in `Failed`.
    pub fn failure(&self) -> Option<&ArtworkError> {
        self.failure.as_ref()
    }

    pub fn policy(&self) -> &SizingPolicy {
        &self.policy
    }

    pub fn item(&self) -> Option<&Arc<MediaItem>> {
        self.item.as_ref()
    }

    pub fn selector(&self) -> &ArtworkVariantSelector {
        &self.selector
    }

    pub fn nominal_ratios(&self) -> &NominalAspectRatios {
        &self.nominal
    }

    /// Bind a different item. Binding an equal item is a no-op.
    pub fn set_item(&mut self, item: Arc<MediaItem>) {
        if let Some(current) = &self.item
            && (Arc::ptr_eq(current, &item) || **current == *item)
        {
            return;
        }

        self.item = Some(item);
        self.emit(ArtworkChange::Item);
        self.invalidate();
    }

    /// Apply `patch` and return the fields that changed.
    ///
    /// Without a bound item the policy is stored and the instance stays
    /// `Idle`.
    pub fn set_policy(&mut self, patch: PolicyPatch) -> Vec<PolicyField> {
        let changed = self.policy.apply(patch);
        if changed.is_empty() {
            return changed;
        }

        for field in &changed {
            self.emit(ArtworkChange::Policy(*field));
        }
        self.invalidate();
        changed
    }

    /// Mark the current result out of date and drop interest in any
    /// in-flight attempt.
    pub fn invalidate(&mut self) {
        self.abort_in_flight();
        if self.item.is_some() {
            self.set_state(ResolutionState::Stale);
        }
        self.emit_size_changes();
    }

    /// Apply finished outcomes and start a resolution if stale.
    pub fn ensure_resolved(&mut self) {
        self.drain_outcomes();
        if self.state == ResolutionState::Stale {
            self.start_resolution();
        }
    }

    /// Current image, resolving first if stale. The returned handle may be
    /// `Empty` while an attempt is in flight.
    pub fn image(&mut self) -> &ImageHandle {
        self.ensure_resolved();
        &self.image
    }

    /// Laid-out size, resolving first if stale.
    pub fn size(&mut self) -> ArtworkSize {
        self.ensure_resolved();
        self.current_size()
    }

    /// Size from the current policy and image, without resolving.
    pub fn current_size(&self) -> ArtworkSize {
        compute_size(
            &self.policy,
            self.image.dimensions(),
            self.nominal_ratio(),
        )
    }

    /// Resolve if needed and wait until the in-flight attempt settles.
    pub async fn resolved(&mut self) -> &ImageHandle {
        self.ensure_resolved();
        while self.state == ResolutionState::Resolving {
            match self.outcomes_rx.recv().await {
                Some(outcome) => {
                    self.apply_outcome(outcome);
                }
                None => break,
            }
        }
        &self.image
    }

    /// Apply every completion already queued.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    /// Apply one completion. Returns `false` when it was discarded as
    /// superseded.
    pub fn apply_outcome(&mut self, outcome: ResolutionOutcome) -> bool {
        if outcome.generation != self.generation
            || self.state != ResolutionState::Resolving
        {
            debug!(
                outcome_generation = outcome.generation,
                current_generation = self.generation,
                state = %self.state,
                "discarding superseded artwork outcome"
            );
            return false;
        }

        self.in_flight = None;
        match outcome.result {
            Ok(image) => {
                self.failure = None;
                self.set_image(ImageHandle::Loaded(image));
                self.set_state(ResolutionState::Resolved);
            }
            Err(err) => {
                info!(
                    item = ?self.item.as_ref().map(|item| item.id),
                    %err,
                    "no artwork resolved"
                );
                self.failure = Some(err);
                self.set_image(ImageHandle::Empty);
                self.set_state(ResolutionState::Failed);
            }
        }
        self.emit_size_changes();
        true
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ArtworkChange> {
        self.changes.subscribe()
    }

    /// Change notifications as a stream. Lagged notifications are skipped;
    /// compare [`version`](Self::version) to detect them.
    pub fn changes(&self) -> impl Stream<Item = ArtworkChange> + Send + 'static {
        BroadcastStream::new(self.changes.subscribe())
            .filter_map(|change| change.ok())
    }

    fn start_resolution(&mut self) {
        let Some(item) = self.item.clone() else {
            return;
        };

        self.abort_in_flight();
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        let plan = ResolutionPlan::new(
            item,
            self.policy.clone(),
            Arc::clone(&self.selector),
            Arc::clone(&self.nominal),
        )
        .with_previous(self.image.loaded().cloned());

        self.failure = None;
        self.set_image(ImageHandle::Empty);
        self.set_state(ResolutionState::Resolving);

        debug!(
            item = %plan.item().id,
            generation,
            "starting artwork resolution"
        );

        let fetcher = Arc::clone(&self.fetcher);
        let outcomes = self.outcomes_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = AssertUnwindSafe(plan.run(fetcher.as_ref()))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    Err(ArtworkError::Fetch(FetchError::Failed(
                        "artwork fetch panicked".to_string(),
                    )))
                });
            let _ = outcomes.send(ResolutionOutcome { generation, result });
        }));

        self.emit_size_changes();
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Variant whose nominal ratio sizes the slot: the loaded image's, else
    /// the first candidate, else `Primary`.
    fn nominal_ratio(&self) -> f64 {
        let Some(item) = self.item.as_deref() else {
            return self
                .nominal
                .lookup(ImageVariant::Primary, &ItemType::default());
        };

        let variant = self.image.variant().unwrap_or_else(|| {
            self.selector
                .first_candidate(
                    item,
                    self.policy.display_box(),
                    &self.policy.preferred_variant_order,
                )
                .unwrap_or(ImageVariant::Primary)
        });

        self.nominal.lookup(variant, &item.item_type)
    }

    fn set_state(&mut self, state: ResolutionState) {
        if self.state != state {
            self.state = state;
            self.emit(ArtworkChange::State(state));
        }
    }

    fn set_image(&mut self, image: ImageHandle) {
        if self.image != image {
            self.image = image;
            self.emit(ArtworkChange::Image);
        }
    }

    fn emit_size_changes(&mut self) {
        let size = self.current_size();
        let width_changed = size.width != self.last_size.width;
        let height_changed = size.height != self.last_size.height;
        self.last_size = size;

        if width_changed {
            self.emit(ArtworkChange::ActualWidth);
        }
        if height_changed {
            self.emit(ArtworkChange::ActualHeight);
        }
        if width_changed || height_changed {
            self.emit(ArtworkChange::Size);
        }
    }

    fn emit(&mut self, change: ArtworkChange) {
        self.version = self.version.wrapping_add(1);
        // No subscribers is fine.
        let _ = self.changes.send(change);
    }
}

impl Drop for ArtworkResolution {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}
