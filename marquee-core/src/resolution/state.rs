use std::fmt;

/// Lifecycle of an [`ArtworkResolution`](super::ArtworkResolution).
///
/// `Failed` is a normal terminal state: the slot shows no artwork and is
/// sized from nominal ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionState {
    /// No item bound.
    #[default]
    Idle,
    /// Item or policy changed since the last resolution.
    Stale,
    Resolving,
    Resolved,
    Failed,
}

impl ResolutionState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResolutionState::Idle => "idle",
            ResolutionState::Stale => "stale",
            ResolutionState::Resolving => "resolving",
            ResolutionState::Resolved => "resolved",
            ResolutionState::Failed => "failed",
        }
    }

    /// `Resolved` or `Failed`.
    pub const fn is_settled(&self) -> bool {
        matches!(self, ResolutionState::Resolved | ResolutionState::Failed)
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
