//! Turn controller.
//!
//! `Engine` drives the turn state machine:
//!
//! ```text
//! AwaitingHumanPlay --play/pass--> [ResolvingUnify] --> [AwaitingDiscard] --> ExecutingAiTurn
//! ExecutingAiTurn   --ai_turn-->   (unify and hand limit resolved inline)  --> AwaitingHumanPlay
//! any play that empties a hand, or the second consecutive pass  --> GameEnded
//! ```
//!
//! Each operation takes the current `GameState` by reference and returns a
//! new one. On `Err` nothing changed, so the caller can keep using the state
//! it passed in.
//!
//! A turn runs: draw (done at handoff, skipped on turn 1 and on an empty
//! deck), play or pass, UNIFY offer, hand limit, win check, handoff.

use serde::{Deserialize, Serialize};

use super::chaos::{ChaosResolution, ChaosResolver, UnresolvedChaos};
use super::legality;
use crate::ai::MoveSelector;
use crate::cards::{Card, CardId, ChaosType};
use crate::core::{
    Action, EngineError, GameState, IllegalReason, Move, Phase, RulesConfig, Side,
};
use crate::zones::Position;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// This side emptied its hand first.
    Winner(Side),
    /// Both sides passed in a row; nobody wins.
    Deadlock,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(side) => write!(f, "{side} wins"),
            GameResult::Deadlock => f.write_str("deadlock"),
        }
    }
}

/// What a legal play led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    /// The play resolved and the turn passed on (or a discard is pending).
    Played,
    /// The card landed beside a Wiggle; call `resolve_unify`.
    PlayedAndUnifyOffered,
    /// The hand is now empty and the game is over.
    HandEmptyWin,
}

/// Summary of an AI turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiTurn {
    Played {
        mv: Move,
        outcome: PlayOutcome,
        /// The AI's UNIFY decision, if one was offered.
        unify: Option<bool>,
    },
    Passed {
        deadlocked: bool,
    },
}

/// The rules engine.
///
/// ## Example
///
/// ```
/// use emuni::cards::build_deck;
/// use emuni::core::{Phase, Side};
/// use emuni::rules::{Engine, PlayOutcome};
/// use emuni::zones::Position;
///
/// let engine = Engine::default();
/// let state = engine.new_game(build_deck()).unwrap();
/// assert_eq!(state.deck_len(), 44);
///
/// let card = state.hand(Side::Human).ids()[0];
/// let (next, outcome) = engine.attempt_play(&state, Side::Human, card, Position::Right).unwrap();
///
/// assert_eq!(outcome, PlayOutcome::Played);
/// assert_eq!(next.phase(), Phase::ExecutingAiTurn);
/// assert_eq!(state.chain().len(), 0); // the input state is untouched
/// ```
pub struct Engine {
    config: RulesConfig,
    chaos: Box<dyn ChaosResolver>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

impl Engine {
    /// Create an engine with the given rules and no chaos effects.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self {
            config,
            chaos: Box::new(UnresolvedChaos),
        }
    }

    /// Use a custom resolver for Chaos cards.
    #[must_use]
    pub fn with_chaos_resolver(mut self, resolver: impl ChaosResolver + 'static) -> Self {
        self.chaos = Box::new(resolver);
        self
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Deal a new game from an ordered deck.
    ///
    /// The human takes the first `starting_hand_size` cards, the AI the
    /// next ones, and the rest become the draw pile in the given order.
    pub fn new_game(&self, deck: Vec<Card>) -> Result<GameState, EngineError> {
        let required = self.config.cards_to_deal();
        if deck.len() < required {
            return Err(EngineError::DeckTooSmall {
                available: deck.len(),
                required,
            });
        }

        let size = self.config.starting_hand_size;
        let mut cards = deck.into_iter();
        let human: Vec<Card> = cards.by_ref().take(size).collect();
        let ai: Vec<Card> = cards.by_ref().take(size).collect();

        let state = GameState::builder()
            .hand(Side::Human, human)
            .hand(Side::Ai, ai)
            .deck(cards)
            .build()?;

        log::debug!("new game dealt, {} cards in the draw pile", state.deck_len());
        Ok(state)
    }

    /// Legal moves for `side` right now. Empty if it is not `side`'s play.
    #[must_use]
    pub fn legal_moves(&self, state: &GameState, side: Side) -> Vec<Move> {
        if self.expect_turn(state, side, "play").is_err() {
            return Vec::new();
        }
        legality::legal_moves(state.hand(side), state.chain(), state.locked_end())
    }

    /// Play `card` from `side`'s hand at `position`.
    pub fn attempt_play(
        &self,
        state: &GameState,
        side: Side,
        card: CardId,
        position: Position,
    ) -> Result<(GameState, PlayOutcome), EngineError> {
        self.expect_turn(state, side, "play")?;

        let illegal = |reason| EngineError::IllegalMove {
            card,
            position,
            reason,
        };
        let candidate = *state
            .hand(side)
            .get(card)
            .ok_or_else(|| illegal(IllegalReason::NotInHand))?;
        if state.locked_end() == Some(position) {
            return Err(illegal(IllegalReason::EndLocked));
        }
        if !legality::can_play(&candidate, state.chain(), position) {
            return Err(illegal(IllegalReason::Incompatible));
        }

        let mut next = state.clone();
        next.play(side, Move::new(card, position))
            .ok_or_else(|| illegal(IllegalReason::NotInHand))?;
        log::debug!("{side} plays {candidate} at the {position} end");

        if let Some(chaos) = candidate.chaos_type() {
            self.resolve_chaos(&mut next, side, &candidate, chaos, position)?;
        }

        if next.check_win(side) {
            self.end_game(&mut next, GameResult::Winner(side));
            return Ok((next, PlayOutcome::HandEmptyWin));
        }

        if legality::is_adjacent_to_wiggle(next.chain(), position, &candidate) {
            log::debug!("{side} is offered unify");
            next.set_phase(Phase::ResolvingUnify { side });
            return Ok((next, PlayOutcome::PlayedAndUnifyOffered));
        }

        self.finish_turn(&mut next, side);
        Ok((next, PlayOutcome::Played))
    }

    /// Accept or decline a pending UNIFY bonus.
    pub fn resolve_unify(&self, state: &GameState, accept: bool) -> Result<GameState, EngineError> {
        if let Some(result) = state.result() {
            return Err(EngineError::GameOver(result));
        }
        let Phase::ResolvingUnify { side } = state.phase() else {
            return Err(EngineError::UnexpectedPhase {
                action: "resolve unify",
                phase: state.phase(),
            });
        };

        let mut next = state.clone();
        next.record_unify(side, accept);
        if accept {
            let drawn = (0..self.config.unify_draw_count)
                .map_while(|_| next.draw(side))
                .count();
            log::debug!("{side} accepts unify, drawing {drawn}");
        } else {
            log::debug!("{side} declines unify");
        }

        self.finish_turn(&mut next, side);
        Ok(next)
    }

    /// Discard the human's excess cards after going over the hand limit.
    pub fn discard(&self, state: &GameState, cards: &[CardId]) -> Result<GameState, EngineError> {
        if let Some(result) = state.result() {
            return Err(EngineError::GameOver(result));
        }
        let Phase::AwaitingDiscard { excess } = state.phase() else {
            return Err(EngineError::UnexpectedPhase {
                action: "discard",
                phase: state.phase(),
            });
        };
        if cards.len() != excess {
            return Err(EngineError::WrongDiscardCount {
                expected: excess,
                actual: cards.len(),
            });
        }

        let mut next = state.clone();
        next.discard(Side::Human, cards)
            .map_err(EngineError::InvalidDiscard)?;
        log::debug!("human discards {excess} to the hand limit");

        self.hand_off(&mut next);
        Ok(next)
    }

    /// Pass the turn. Returns whether this pass deadlocked the game.
    pub fn pass(&self, state: &GameState, side: Side) -> Result<(GameState, bool), EngineError> {
        self.expect_turn(state, side, "pass")?;

        let mut next = state.clone();
        let deadlocked = next.pass(side, self.config.deadlock_passes);
        log::debug!("{side} passes ({} in a row)", next.consecutive_passes());

        if deadlocked {
            self.end_game(&mut next, GameResult::Deadlock);
        } else {
            self.hand_off(&mut next);
        }
        Ok((next, deadlocked))
    }

    /// Run the AI's whole turn with the given selector.
    ///
    /// The selector only sees the AI's hand, the chain and the lock. An
    /// illegal choice is rejected like any other illegal play.
    pub fn ai_turn(
        &self,
        state: &GameState,
        ai: &mut dyn MoveSelector,
    ) -> Result<(GameState, AiTurn), EngineError> {
        self.expect_turn(state, Side::Ai, "run the ai turn")?;

        let Some(mv) = ai.select_move(state.hand(Side::Ai), state.chain(), state.locked_end()) else {
            let (next, deadlocked) = self.pass(state, Side::Ai)?;
            return Ok((next, AiTurn::Passed { deadlocked }));
        };

        let (next, outcome) = self.attempt_play(state, Side::Ai, mv.card, mv.position)?;
        if outcome != PlayOutcome::PlayedAndUnifyOffered {
            return Ok((next, AiTurn::Played { mv, outcome, unify: None }));
        }

        let accept = ai.accept_unify(next.hand(Side::Ai));
        let next = self.resolve_unify(&next, accept)?;
        Ok((next, AiTurn::Played { mv, outcome, unify: Some(accept) }))
    }

    // === Internals ===

    fn expect_turn(&self, state: &GameState, side: Side, action: &'static str) -> Result<(), EngineError> {
        if let Some(result) = state.result() {
            return Err(EngineError::GameOver(result));
        }
        if state.current_side() != side {
            return Err(EngineError::OutOfTurn { side });
        }
        if state.phase() != Phase::turn_of(side) {
            return Err(EngineError::UnexpectedPhase {
                action,
                phase: state.phase(),
            });
        }
        Ok(())
    }

    fn resolve_chaos(
        &self,
        next: &mut GameState,
        side: Side,
        card: &Card,
        chaos: ChaosType,
        position: Position,
    ) -> Result<(), EngineError> {
        match self.chaos.resolve(next.chain(), card, chaos, position, next.locked_end()) {
            ChaosResolution::Unimplemented(kind) => {
                log::debug!("{kind} has no effect; {card} stays in the chain");
            }
            ChaosResolution::Resolved { chain, locked_end } => {
                // The kept cards must appear in the current chain, in the same order
                {
                    let mut current = next.chain().iter().map(|c| c.id);
                    for kept in chain.iter() {
                        if !current.any(|id| id == kept.id) {
                            log::warn!("chaos resolver returned {kept} out of chain order");
                            return Err(EngineError::InvalidChaosResolution {
                                card: card.id,
                                detail: format!("{} is missing from the chain or out of order", kept.id),
                            });
                        }
                    }
                }

                let removed = next.replace_chain(chain);
                next.set_locked_end(locked_end);
                log::debug!("{chaos} removes {} cards", removed.len());
                next.record(
                    side,
                    Action::ChaosResolved {
                        card: card.id,
                        removed,
                    },
                );
            }
        }
        Ok(())
    }

    /// Hand limit, then handoff.
    fn finish_turn(&self, next: &mut GameState, side: Side) {
        let excess = next.hand(side).len().saturating_sub(self.config.hand_limit);
        if excess > 0 {
            match side {
                Side::Human => {
                    log::debug!("human holds {} cards, must discard {excess}", next.hand(side).len());
                    next.set_phase(Phase::AwaitingDiscard { excess });
                    return;
                }
                Side::Ai => {
                    let discarded = next.discard_oldest(Side::Ai, excess);
                    log::debug!("ai discards {} oldest cards", discarded.len());
                }
            }
        }
        self.hand_off(next);
    }

    /// Give the turn away and run the incoming side's draw.
    ///
    /// Turn 1 never gets here, so the opening hand is played without a draw.
    fn hand_off(&self, next: &mut GameState) {
        next.advance_turn();
        let side = next.current_side();
        if next.draw(side).is_none() {
            log::trace!("deck empty, {side} skips the draw");
        }
    }

    fn end_game(&self, next: &mut GameState, result: GameResult) {
        log::info!("game over after {} turns: {result}", next.turn());
        next.set_phase(Phase::GameEnded(result));
    }
}
