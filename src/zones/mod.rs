//! Card containers: the shared chain and the per-side hands.
//!
//! ## Key Types
//!
//! - `Chain`: Ordered sequence of played cards with two open ends
//! - `Position`: One of the chain's ends
//! - `Hand`: Cards held by one side, kept in draw order
//!
//! Both are backed by `im::Vector`, so cloning a container is O(1).
//! Mutation is crate-private: only the turn controller moves cards.

pub mod chain;
pub mod hand;

pub use chain::{Chain, Position};
pub use hand::Hand;
