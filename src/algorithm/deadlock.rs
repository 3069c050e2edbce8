//! Stall detection and recovery for the memoryless fill loop
//!
//! The fill loop never backtracks. With the reference model it routinely
//! reaches states where an unassigned cell is blocked by neighbors that can
//! themselves never change (runs of variant 0 pin each other), so plain
//! retrying never finishes a large grid. The policies here decide what, if
//! anything, is discarded when cells keep coming back blocked.

use ndarray::Array2;

use crate::algorithm::resolver::ResolveResult;

/// Reaction to blocked resolutions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StallPolicy {
    /// Keep reselecting cells; blocked results are ignored
    #[default]
    Retry,
    /// Clear and reseed the whole grid after `after` blocked results without progress
    ///
    /// Progress means the number of unassigned cells went down; overwriting
    /// an already committed cell does not count.
    Reset {
        /// Blocked results since the last progress that trigger a reset
        after: usize,
    },
    /// Unassign the four neighbors of a cell once it has been blocked `after` times
    Clear {
        /// Blocked results at one cell that trigger clearing its neighbors
        after: usize,
    },
}

impl StallPolicy {
    /// Threshold of the policy, `None` for `Retry`
    pub const fn threshold(self) -> Option<usize> {
        match self {
            Self::Retry => None,
            Self::Reset { after } | Self::Clear { after } => Some(after),
        }
    }
}

/// What the fill loop should do after recording an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallAction {
    /// Keep going
    Continue,
    /// Clear every cell and reseed
    ResetGrid,
    /// Unassign the neighbors of `(x, y)`
    ClearAround {
        /// Column of the blocked cell
        x: usize,
        /// Row of the blocked cell
        y: usize,
    },
}

/// Counts blocked results and decides when to recover
#[derive(Debug, Clone)]
pub struct StallTracker {
    policy: StallPolicy,
    blocked_since_progress: usize,
    // Blocked results per cell since its neighbors were last cleared
    blocked_count: Array2<usize>,
}

impl StallTracker {
    /// Create a tracker for `policy` on a `width x height` grid
    pub fn new(policy: StallPolicy, width: usize, height: usize) -> Self {
        Self {
            policy,
            blocked_since_progress: 0,
            blocked_count: Array2::zeros((height, width)),
        }
    }

    /// Note that an unassigned cell received a commitment
    pub const fn progress(&mut self) {
        self.blocked_since_progress = 0;
    }

    /// Record the outcome of resolving `(x, y)`
    pub fn record(&mut self, x: usize, y: usize, outcome: ResolveResult) -> StallAction {
        if outcome.is_committed() {
            return StallAction::Continue;
        }

        self.blocked_since_progress = self.blocked_since_progress.saturating_add(1);
        match self.policy {
            StallPolicy::Retry => StallAction::Continue,
            StallPolicy::Reset { after } => {
                if self.blocked_since_progress >= after {
                    self.blocked_since_progress = 0;
                    self.blocked_count.fill(0);
                    StallAction::ResetGrid
                } else {
                    StallAction::Continue
                }
            }
            StallPolicy::Clear { after } => {
                let Some(count) = self.blocked_count.get_mut([y, x]) else {
                    return StallAction::Continue;
                };
                *count += 1;
                if *count >= after {
                    *count = 0;
                    StallAction::ClearAround { x, y }
                } else {
                    StallAction::Continue
                }
            }
        }
    }

    /// Blocked results recorded since the last progress or reset
    pub const fn blocked_since_progress(&self) -> usize {
        self.blocked_since_progress
    }

    /// Blocked results recorded at `(x, y)` since its last clearing
    pub fn blocked_at(&self, x: usize, y: usize) -> usize {
        self.blocked_count.get([y, x]).copied().unwrap_or(0)
    }
}
