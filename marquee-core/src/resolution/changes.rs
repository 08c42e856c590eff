use crate::policy::PolicyField;

use super::ResolutionState;

/// One externally observable field of an artwork resolution changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkChange {
    Item,
    Policy(PolicyField),
    Image,
    State(ResolutionState),
    ActualWidth,
    ActualHeight,
    /// Emitted after `ActualWidth` and/or `ActualHeight`.
    Size,
}
