//! Processing stages of a single inbound message.
//!
//! ```text
//! Received -> Formatting -> Generating -> Generated ---> Normalizing -> Responding -> Done
//!                                     \-> FallingBack -/
//! ```

use std::fmt;

/// Invalid stage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move from {from} to {to}")]
pub struct StageTransitionError {
    pub from: EngagementStage,
    pub to: EngagementStage,
}

/// Where a request currently is in the reply pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngagementStage {
    Received,
    Formatting,
    Generating,
    Generated,
    FallingBack,
    Normalizing,
    Responding,
    Done,
}

impl EngagementStage {
    /// Returns true if moving from `self` to `target` is allowed.
    pub fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// All stages reachable in one step from `self`.
    pub fn valid_transitions(&self) -> Vec<Self> {
        use EngagementStage::*;
        match self {
            Received => vec![Formatting],
            Formatting => vec![Generating],
            Generating => vec![Generated, FallingBack],
            Generated | FallingBack => vec![Normalizing],
            Normalizing => vec![Responding],
            Responding => vec![Done],
            Done => vec![],
        }
    }

    /// Performs a validated transition.
    pub fn transition_to(&self, target: Self) -> Result<Self, StageTransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(StageTransitionError { from: *self, to: target })
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

impl fmt::Display for EngagementStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngagementStage::Received => "received",
            EngagementStage::Formatting => "formatting",
            EngagementStage::Generating => "generating",
            EngagementStage::Generated => "generated",
            EngagementStage::FallingBack => "falling_back",
            EngagementStage::Normalizing => "normalizing",
            EngagementStage::Responding => "responding",
            EngagementStage::Done => "done",
        };
        f.write_str(name)
    }
}
