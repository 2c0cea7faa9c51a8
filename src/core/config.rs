//! Rules configuration.
//!
//! The defaults are the standard EmUni rules. Tests and scripted setups may
//! tweak them via the `with_*` builder methods.

use serde::{Deserialize, Serialize};

/// Tunable rule parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Cards dealt to each side at game start.
    pub starting_hand_size: usize,

    /// Maximum cards a hand may hold after a play resolves.
    pub hand_limit: usize,

    /// Cards drawn when a UNIFY bonus is accepted.
    pub unify_draw_count: usize,

    /// Consecutive passes (across both sides) that end the game in a deadlock.
    pub deadlock_passes: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_hand_size: 5,
            hand_limit: 7,
            unify_draw_count: 2,
            deadlock_passes: 2,
        }
    }
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting hand size.
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the hand limit.
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    /// Set the number of UNIFY bonus draws.
    pub fn with_unify_draw_count(mut self, count: usize) -> Self {
        self.unify_draw_count = count;
        self
    }

    /// Set the consecutive-pass deadlock threshold.
    pub fn with_deadlock_passes(mut self, passes: u32) -> Self {
        assert!(passes > 0, "Deadlock threshold must be at least 1");
        self.deadlock_passes = passes;
        self
    }

    /// Cards needed to deal both starting hands.
    #[must_use]
    pub fn cards_to_deal(&self) -> usize {
        self.starting_hand_size * 2
    }
}
