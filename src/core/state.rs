//! Game state.
//!
//! ## GameState
//!
//! One immutable-per-transition value holding everything about a game:
//! - Deck (draw pile, consumed from the front)
//! - Both hands, the chain and the discard pile
//! - Side to move, turn number, consecutive passes, locked end
//! - Current phase of the turn state machine
//! - UNIFY statistics and the action history
//!
//! Collections are `im` persistent structures, so the engine clones the
//! incoming state in O(1), mutates the clone, and hands it back.
//!
//! Every card is in exactly one of deck, a hand, the chain or the discard
//! pile. The mutating operations below preserve that partition and are
//! crate-private; outside code goes through `rules::Engine`.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Action, ActionRecord, CardIds, Move};
use super::error::EngineError;
use super::player::{Side, SideMap};
use crate::cards::{Card, CardId};
use crate::rules::GameResult;
use crate::zones::{Chain, Hand, Position};

/// Turn state machine phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to play or pass.
    AwaitingHumanPlay,
    /// A UNIFY bonus was offered to `side` and awaits a decision.
    ResolvingUnify { side: Side },
    /// The human is over the hand limit and must discard `excess` cards.
    AwaitingDiscard { excess: usize },
    /// The AI is to move.
    ExecutingAiTurn,
    /// Terminal.
    GameEnded(GameResult),
}

impl Phase {
    /// The phase in which `side` starts its turn.
    #[must_use]
    pub const fn turn_of(side: Side) -> Self {
        match side {
            Side::Human => Phase::AwaitingHumanPlay,
            Side::Ai => Phase::ExecutingAiTurn,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameEnded(_))
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingHumanPlay => f.write_str("awaiting human play"),
            Phase::ResolvingUnify { side } => write!(f, "resolving {side} unify"),
            Phase::AwaitingDiscard { excess } => write!(f, "awaiting discard of {excess}"),
            Phase::ExecutingAiTurn => f.write_str("executing ai turn"),
            Phase::GameEnded(result) => write!(f, "game ended ({result})"),
        }
    }
}

/// How often a side took or declined the UNIFY bonus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifyStats {
    pub accepted: u32,
    pub declined: u32,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    deck: Vector<Card>,
    hands: SideMap<Hand>,
    chain: Chain,
    discard_pile: Vector<Card>,
    current: Side,
    turn: u32,
    consecutive_passes: u32,
    locked_end: Option<Position>,
    phase: Phase,
    unify_stats: SideMap<UnifyStats>,
    history: Vector<ActionRecord>,
}

impl GameState {
    /// Start building a state from explicit zones.
    #[must_use]
    pub fn builder() -> GameStateBuilder {
        GameStateBuilder::default()
    }

    // === Queries ===

    /// The draw pile, front first.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side]
    }

    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard_pile
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_side(&self) -> Side {
        self.current
    }

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    #[must_use]
    pub fn locked_end(&self) -> Option<Position> {
        self.locked_end
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn unify_stats(&self, side: Side) -> UnifyStats {
        self.unify_stats[side]
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// The result, once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::GameEnded(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// True iff `side` holds no cards.
    #[must_use]
    pub fn check_win(&self, side: Side) -> bool {
        self.hands[side].is_empty()
    }

    /// Cards across every zone. Constant for the lifetime of a game.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.hands[Side::Human].len()
            + self.hands[Side::Ai].len()
            + self.chain.len()
            + self.discard_pile.len()
    }

    /// Ids of every card in every zone.
    #[must_use]
    pub fn all_card_ids(&self) -> Vec<CardId> {
        self.deck
            .iter()
            .chain(self.hands[Side::Human].iter())
            .chain(self.hands[Side::Ai].iter())
            .chain(self.chain.iter())
            .chain(self.discard_pile.iter())
            .map(|c| c.id)
            .collect()
    }

    // === Zone operations ===

    /// Move the front card of the deck into `side`'s hand.
    ///
    /// Returns `None` without touching anything if the deck is empty.
    pub(crate) fn draw(&mut self, side: Side) -> Option<Card> {
        let card = self.deck.pop_front()?;
        self.hands[side].push(card);
        log::trace!("{side} draws {card}");
        self.record(side, Action::Draw(SmallVec::from_slice(&[card.id])));
        Some(card)
    }

    /// Move a card from `side`'s hand onto the chain.
    ///
    /// Legality is the caller's responsibility; this only fails when the
    /// card is not in the hand.
    pub(crate) fn play(&mut self, side: Side, mv: Move) -> Option<Card> {
        let card = self.hands[side].remove(mv.card)?;
        self.chain.attach(card, mv.position);
        self.consecutive_passes = 0;
        self.record(side, Action::Play(mv));
        Some(card)
    }

    /// Count a pass. Returns true once `threshold` consecutive passes are reached.
    pub(crate) fn pass(&mut self, side: Side, threshold: u32) -> bool {
        self.consecutive_passes += 1;
        self.record(side, Action::Pass);
        self.consecutive_passes >= threshold
    }

    /// Discard specific cards from `side`'s hand.
    ///
    /// All-or-nothing: fails without changes if any id is missing or repeated.
    pub(crate) fn discard(&mut self, side: Side, ids: &[CardId]) -> Result<(), CardId> {
        let mut seen = FxHashSet::default();
        for &id in ids {
            if !seen.insert(id) || !self.hands[side].contains(id) {
                return Err(id);
            }
        }

        for &id in ids {
            if let Some(card) = self.hands[side].remove(id) {
                self.discard_pile.push_back(card);
            }
        }
        self.record(side, Action::Discard(ids.iter().copied().collect()));
        Ok(())
    }

    /// Discard the `count` oldest cards from `side`'s hand.
    pub(crate) fn discard_oldest(&mut self, side: Side, count: usize) -> CardIds {
        let taken = self.hands[side].take_oldest(count);
        let ids: CardIds = taken.iter().map(|c| c.id).collect();
        self.discard_pile.extend(taken);
        self.record(side, Action::Discard(ids.clone()));
        ids
    }

    /// Replace the chain with a subset of itself; everything dropped goes
    /// to the discard pile.
    pub(crate) fn replace_chain(&mut self, chain: Chain) -> CardIds {
        let kept: FxHashSet<CardId> = chain.iter().map(|c| c.id).collect();
        let removed: Vec<Card> = self
            .chain
            .iter()
            .filter(|c| !kept.contains(&c.id))
            .copied()
            .collect();
        self.chain = chain;
        let ids = removed.iter().map(|c| c.id).collect();
        self.discard_pile.extend(removed);
        ids
    }

    pub(crate) fn set_locked_end(&mut self, locked_end: Option<Position>) {
        self.locked_end = locked_end;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn record_unify(&mut self, side: Side, accepted: bool) {
        let stats = &mut self.unify_stats[side];
        if accepted {
            stats.accepted += 1;
        } else {
            stats.declined += 1;
        }
        self.record(side, Action::Unify { accepted });
    }

    /// Give the turn to the other side.
    pub(crate) fn advance_turn(&mut self) {
        self.current = self.current.other();
        self.turn += 1;
        self.phase = Phase::turn_of(self.current);
    }

    pub(crate) fn record(&mut self, side: Side, action: Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(side, action, self.turn, sequence));
    }
}

/// Builder for a `GameState` with explicit zone contents.
///
/// Used by `Engine::new_game` and by scripted setups that need a specific
/// position.
///
/// ## Example
///
/// ```
/// use emuni::cards::{Card, CardId};
/// use emuni::core::{GameState, Phase, Side};
///
/// let state = GameState::builder()
///     .hand(Side::Human, [Card::gravity(CardId::new(0), 1)])
///     .hand(Side::Ai, [Card::wiggle(CardId::new(1), 1)])
///     .deck([Card::gravity(CardId::new(2), 2)])
///     .build()
///     .unwrap();
///
/// assert_eq!(state.phase(), Phase::AwaitingHumanPlay);
/// assert_eq!(state.deck_len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct GameStateBuilder {
    deck: Vec<Card>,
    hands: SideMap<Vec<Card>>,
    chain: Vec<Card>,
    current: Side,
    turn: u32,
    locked_end: Option<Position>,
}

impl Default for GameStateBuilder {
    fn default() -> Self {
        Self {
            deck: Vec::new(),
            hands: SideMap::with_default(),
            chain: Vec::new(),
            current: Side::Human,
            turn: 1,
            locked_end: None,
        }
    }
}

impl GameStateBuilder {
    /// Set the draw pile, front first.
    pub fn deck(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.deck = cards.into_iter().collect();
        self
    }

    /// Set a side's hand, oldest first.
    pub fn hand(mut self, side: Side, cards: impl IntoIterator<Item = Card>) -> Self {
        self.hands[side] = cards.into_iter().collect();
        self
    }

    /// Set the chain, left to right.
    pub fn chain(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.chain = cards.into_iter().collect();
        self
    }

    /// Set the side to move.
    pub fn current_side(mut self, side: Side) -> Self {
        self.current = side;
        self
    }

    /// Set the turn number.
    pub fn turn(mut self, turn: u32) -> Self {
        assert!(turn >= 1, "Turn numbers start at 1");
        self.turn = turn;
        self
    }

    pub fn locked_end(mut self, position: Position) -> Self {
        self.locked_end = Some(position);
        self
    }

    /// Build the state, rejecting any card id that appears twice.
    pub fn build(self) -> Result<GameState, EngineError> {
        let mut seen = FxHashSet::default();
        let all = self
            .deck
            .iter()
            .chain(self.hands[Side::Human].iter())
            .chain(self.hands[Side::Ai].iter())
            .chain(self.chain.iter());
        for card in all {
            if !seen.insert(card.id) {
                return Err(EngineError::DuplicateCard(card.id));
            }
        }

        let hands = SideMap::new(|side| Hand::from_cards(self.hands[side].iter().copied()));

        Ok(GameState {
            deck: self.deck.into_iter().collect(),
            hands,
            chain: Chain::from_cards(self.chain),
            discard_pile: Vector::new(),
            current: self.current,
            turn: self.turn,
            consecutive_passes: 0,
            locked_end: self.locked_end,
            phase: Phase::turn_of(self.current),
            unify_stats: SideMap::with_default(),
            history: Vector::new(),
        })
    }
}
