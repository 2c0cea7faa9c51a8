//! Self-play driver.
//!
//! Runs whole games with a `MoveSelector` on each side. The human side goes
//! through the same public engine operations a UI would call (play, UNIFY
//! decision, discard, pass); the AI side goes through `Engine::ai_turn`.

use crate::cards::shuffled_deck;
use crate::core::{EngineError, GameRng, GameState, Phase, Side};
use crate::rules::{Engine, GameResult, PlayOutcome};

use super::policy::MoveSelector;

/// Configuration for self-play.
#[derive(Clone, Debug)]
pub struct SelfPlayConfig {
    /// Stop after this many turns even if the game has not ended.
    pub max_turns: u32,

    /// Seed for the deck shuffle.
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_turns: 500,
            seed: 0,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the turn cap.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// How a self-play game went.
#[derive(Clone, Debug)]
pub struct SelfPlayReport {
    /// `None` if the turn cap was hit first.
    pub result: Option<GameResult>,
    pub turns: u32,
    pub state: GameState,
}

/// Plays games between two selectors.
pub struct SelfPlay {
    engine: Engine,
    config: SelfPlayConfig,
}

impl SelfPlay {
    pub fn new(engine: Engine, config: SelfPlayConfig) -> Self {
        Self { engine, config }
    }

    /// Shuffle a deck with the configured seed and play it out.
    pub fn play(
        &self,
        human: &mut dyn MoveSelector,
        ai: &mut dyn MoveSelector,
    ) -> Result<SelfPlayReport, EngineError> {
        let mut rng = GameRng::new(self.config.seed).for_context("shuffle");
        let state = self.engine.new_game(shuffled_deck(&mut rng))?;
        self.play_from(state, human, ai)
    }

    /// Play on from an existing position.
    pub fn play_from(
        &self,
        mut state: GameState,
        human: &mut dyn MoveSelector,
        ai: &mut dyn MoveSelector,
    ) -> Result<SelfPlayReport, EngineError> {
        while !state.is_over() && state.turn() <= self.config.max_turns {
            state = match state.phase() {
                Phase::AwaitingHumanPlay => self.human_turn(&state, human)?,
                Phase::ExecutingAiTurn => self.engine.ai_turn(&state, ai)?.0,
                // Only reachable when starting from a mid-turn position
                Phase::ResolvingUnify { side } => {
                    let selector: &mut dyn MoveSelector = match side {
                        Side::Human => &mut *human,
                        Side::Ai => &mut *ai,
                    };
                    let accept = selector.accept_unify(state.hand(side));
                    self.engine.resolve_unify(&state, accept)?
                }
                Phase::AwaitingDiscard { excess } => self.discard_oldest(&state, excess)?,
                Phase::GameEnded(_) => break,
            };
        }

        let report = SelfPlayReport {
            result: state.result(),
            turns: state.turn(),
            state,
        };
        if report.result.is_none() {
            log::info!("self-play stopped at the {} turn cap", self.config.max_turns);
        }
        Ok(report)
    }

    fn human_turn(&self, state: &GameState, human: &mut dyn MoveSelector) -> Result<GameState, EngineError> {
        let Some(mv) = human.select_move(state.hand(Side::Human), state.chain(), state.locked_end()) else {
            return Ok(self.engine.pass(state, Side::Human)?.0);
        };

        let (mut next, outcome) = self.engine.attempt_play(state, Side::Human, mv.card, mv.position)?;
        if outcome == PlayOutcome::PlayedAndUnifyOffered {
            let accept = human.accept_unify(next.hand(Side::Human));
            next = self.engine.resolve_unify(&next, accept)?;
        }
        if let Phase::AwaitingDiscard { excess } = next.phase() {
            next = self.discard_oldest(&next, excess)?;
        }
        Ok(next)
    }

    fn discard_oldest(&self, state: &GameState, excess: usize) -> Result<GameState, EngineError> {
        let ids: Vec<_> = state.hand(Side::Human).ids().into_iter().take(excess).collect();
        self.engine.discard(state, &ids)
    }
}
