//! Move selection policies.
//!
//! A `MoveSelector` picks a move from what a player can see: its own hand,
//! the chain, and the locked end. It never sees the other hand or the deck.
//!
//! - `FirstLegal`: deterministic, first legal move in hand order
//! - `MediumAi`: seeded heuristic that favours Wiggle cards and the right end
//! - `AlwaysPass`: never plays

use crate::cards::CardType;
use crate::core::{GameRng, Move};
use crate::rules::legality::legal_moves;
use crate::zones::{Chain, Hand, Position};

/// Accept UNIFY while the hand holds fewer cards than this.
pub const AI_UNIFY_HAND_THRESHOLD: usize = 5;

/// Chance `MediumAi` looks for a Wiggle move first.
const WIGGLE_PREFERENCE: f64 = 0.7;

/// Chance `MediumAi` then looks for a right-end move.
const RIGHT_END_PREFERENCE: f64 = 0.5;

/// Chooses moves and UNIFY decisions for one side.
pub trait MoveSelector {
    /// Pick a move, or `None` to pass.
    fn select_move(&mut self, hand: &Hand, chain: &Chain, locked_end: Option<Position>) -> Option<Move>;

    /// Decide on a UNIFY offer. `hand` is the hand right after the play.
    fn accept_unify(&mut self, hand: &Hand) -> bool {
        hand.len() < AI_UNIFY_HAND_THRESHOLD
    }
}

/// Plays the first legal move, left end before right.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl MoveSelector for FirstLegal {
    fn select_move(&mut self, hand: &Hand, chain: &Chain, locked_end: Option<Position>) -> Option<Move> {
        legal_moves(hand, chain, locked_end).into_iter().next()
    }
}

/// Never plays.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysPass;

impl MoveSelector for AlwaysPass {
    fn select_move(&mut self, _hand: &Hand, _chain: &Chain, _locked_end: Option<Position>) -> Option<Move> {
        None
    }

    fn accept_unify(&mut self, _hand: &Hand) -> bool {
        false
    }
}

/// Randomized opponent.
///
/// Among the legal moves:
/// 1. with probability 0.7, a random Wiggle move if there is one
/// 2. otherwise with probability 0.5, a random right-end move if there is one
/// 3. otherwise any legal move, uniformly
#[derive(Clone, Debug)]
pub struct MediumAi {
    rng: GameRng,
}

impl MediumAi {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_rng(GameRng::new(seed).for_context("medium-ai"))
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl MoveSelector for MediumAi {
    fn select_move(&mut self, hand: &Hand, chain: &Chain, locked_end: Option<Position>) -> Option<Move> {
        let moves = legal_moves(hand, chain, locked_end);
        if moves.is_empty() {
            return None;
        }

        let is_wiggle = |mv: &Move| hand.get(mv.card).is_some_and(|c| c.is(CardType::Wiggle));
        let wiggles: Vec<Move> = moves.iter().copied().filter(is_wiggle).collect();
        if !wiggles.is_empty() && self.rng.gen_bool(WIGGLE_PREFERENCE) {
            return self.rng.choose(&wiggles).copied();
        }

        let right: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|mv| mv.position == Position::Right)
            .collect();
        if !right.is_empty() && self.rng.gen_bool(RIGHT_END_PREFERENCE) {
            return self.rng.choose(&right).copied();
        }

        self.rng.choose(&moves).copied()
    }
}
