//! Turn controller scenarios.

use emuni::ai::{FirstLegal, MoveSelector};
use emuni::cards::{build_deck, Card, CardId, ChaosType, ForceColor};
use emuni::core::{Action, EngineError, GameState, IllegalReason, Move, Phase, Side, UnifyStats};
use emuni::rules::{AiTurn, ChaosResolution, ChaosResolver, Engine, GameResult, PlayOutcome};
use emuni::zones::{Chain, Hand, Position};

fn ball(id: u32) -> Card {
    Card::gravity(CardId::new(id), 1)
}

fn wave(id: u32) -> Card {
    Card::wiggle(CardId::new(id), 1)
}

fn id(n: u32) -> CardId {
    CardId::new(n)
}

/// Always accepts UNIFY, otherwise plays like `FirstLegal`.
struct Greedy;

impl MoveSelector for Greedy {
    fn select_move(&mut self, hand: &Hand, chain: &Chain, locked_end: Option<Position>) -> Option<Move> {
        FirstLegal.select_move(hand, chain, locked_end)
    }

    fn accept_unify(&mut self, _hand: &Hand) -> bool {
        true
    }
}

// =============================================================================
// Legality through the engine
// =============================================================================

#[test]
fn test_gravity_rejected_beside_force_but_fits_other_end() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, [ball(10), ball(11)])
        .chain([ball(1), wave(2), Card::force(id(3), ForceColor::Red)])
        .build()
        .unwrap();

    let err = engine
        .attempt_play(&state, Side::Human, id(10), Position::Right)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::IllegalMove {
            card: id(10),
            position: Position::Right,
            reason: IllegalReason::Incompatible,
        }
    );
    assert!(err.is_recoverable());

    let (next, outcome) = engine
        .attempt_play(&state, Side::Human, id(10), Position::Left)
        .unwrap();
    assert_eq!(outcome, PlayOutcome::Played);
    assert_eq!(next.chain().ids(), vec![id(10), id(1), id(2), id(3)]);
    assert_eq!(next.phase(), Phase::ExecutingAiTurn);
}

#[test]
fn test_card_not_in_hand() {
    let engine = Engine::default();
    let state = engine.new_game(build_deck()).unwrap();
    let ai_card = state.hand(Side::Ai).ids()[0];

    let err = engine
        .attempt_play(&state, Side::Human, ai_card, Position::Left)
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalMove { reason: IllegalReason::NotInHand, .. }));
}

// =============================================================================
// Turn flow
// =============================================================================

#[test]
fn test_opening_turns() {
    let engine = Engine::default();
    let state = engine.new_game(build_deck()).unwrap();
    assert!(state.history().is_empty());

    let card = state.hand(Side::Human).ids()[0];
    let (next, _) = engine.attempt_play(&state, Side::Human, card, Position::Left).unwrap();

    // Human never drew on turn 1; the AI drew on taking over
    let actions: Vec<_> = next.history().iter().map(|r| (r.side, r.turn)).collect();
    assert_eq!(actions, vec![(Side::Human, 1), (Side::Ai, 2)]);
    assert!(matches!(next.history()[1].action, Action::Draw(_)));

    let (next, turn) = engine.ai_turn(&next, &mut FirstLegal).unwrap();
    assert!(matches!(turn, AiTurn::Played { outcome: PlayOutcome::Played, unify: None, .. }));
    assert_eq!(next.current_side(), Side::Human);
    assert_eq!(next.turn(), 3);
    assert_eq!(next.hand(Side::Human).len(), 5);
    assert_eq!(next.hand(Side::Ai).len(), 5);
    assert_eq!(next.deck_len(), 42);
    assert_eq!(next.total_cards(), 54);
}

#[test]
fn test_unify_then_hand_limit_discard() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, (10..16).map(ball))
        .hand(Side::Ai, [ball(20), ball(21)])
        .chain([ball(1), wave(2)])
        .deck([ball(30), ball(31), ball(32), ball(33)])
        .current_side(Side::Ai)
        .turn(2)
        .build()
        .unwrap();

    // AI passes; human draws to 7
    let (state, deadlocked) = engine.pass(&state, Side::Ai).unwrap();
    assert!(!deadlocked);
    assert_eq!(state.hand(Side::Human).len(), 7);
    assert_eq!(state.consecutive_passes(), 1);

    // Playing beside the Wiggle offers UNIFY
    let (state, outcome) = engine
        .attempt_play(&state, Side::Human, id(10), Position::Right)
        .unwrap();
    assert_eq!(outcome, PlayOutcome::PlayedAndUnifyOffered);
    assert_eq!(state.phase(), Phase::ResolvingUnify { side: Side::Human });
    assert_eq!(state.hand(Side::Human).len(), 6);
    assert_eq!(state.consecutive_passes(), 0);

    // Accepting draws two and goes over the limit
    let state = engine.resolve_unify(&state, true).unwrap();
    assert_eq!(state.hand(Side::Human).len(), 8);
    assert_eq!(state.phase(), Phase::AwaitingDiscard { excess: 1 });
    assert_eq!(state.current_side(), Side::Human);
    assert_eq!(state.unify_stats(Side::Human), UnifyStats { accepted: 1, declined: 0 });

    assert_eq!(
        engine.discard(&state, &[id(11), id(12)]).unwrap_err(),
        EngineError::WrongDiscardCount { expected: 1, actual: 2 }
    );
    assert_eq!(engine.discard(&state, &[id(20)]).unwrap_err(), EngineError::InvalidDiscard(id(20)));
    assert!(matches!(
        engine.pass(&state, Side::Human).unwrap_err(),
        EngineError::UnexpectedPhase { action: "pass", .. }
    ));

    let state = engine.discard(&state, &[id(11)]).unwrap();
    assert_eq!(state.hand(Side::Human).len(), 7);
    assert_eq!(state.discard_pile().len(), 1);
    assert_eq!(state.phase(), Phase::ExecutingAiTurn);
    assert_eq!(state.hand(Side::Ai).len(), 3);
    assert_eq!(state.deck_len(), 0);
    assert_eq!(state.total_cards(), 14);
}

#[test]
fn test_declined_unify_hands_off() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, [ball(10), ball(11)])
        .chain([wave(2)])
        .deck([ball(30)])
        .build()
        .unwrap();

    let (state, outcome) = engine
        .attempt_play(&state, Side::Human, id(10), Position::Left)
        .unwrap();
    assert_eq!(outcome, PlayOutcome::PlayedAndUnifyOffered);

    let state = engine.resolve_unify(&state, false).unwrap();
    assert_eq!(state.hand(Side::Human).len(), 1);
    assert_eq!(state.unify_stats(Side::Human), UnifyStats { accepted: 0, declined: 1 });
    assert_eq!(state.phase(), Phase::ExecutingAiTurn);
    assert_eq!(state.hand(Side::Ai).len(), 1);
}

#[test]
fn test_unify_with_short_deck() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, [ball(10), ball(11)])
        .chain([wave(2)])
        .deck([ball(30)])
        .build()
        .unwrap();

    let (state, _) = engine
        .attempt_play(&state, Side::Human, id(10), Position::Right)
        .unwrap();
    let state = engine.resolve_unify(&state, true).unwrap();

    // One card was available; the second draw is a no-op
    assert_eq!(state.hand(Side::Human).ids(), vec![id(11), id(30)]);
    assert_eq!(state.deck_len(), 0);
    assert_eq!(state.phase(), Phase::ExecutingAiTurn);
}

#[test]
fn test_ai_truncates_oldest_over_limit() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, [ball(10)])
        .hand(Side::Ai, (20..28).map(ball))
        .chain([wave(2)])
        .deck([ball(30), ball(31), ball(32)])
        .current_side(Side::Ai)
        .turn(2)
        .build()
        .unwrap();

    let (state, turn) = engine.ai_turn(&state, &mut Greedy).unwrap();
    assert_eq!(
        turn,
        AiTurn::Played {
            mv: Move::new(id(20), Position::Left),
            outcome: PlayOutcome::PlayedAndUnifyOffered,
            unify: Some(true),
        }
    );

    // 8 - 1 + 2 = 9 cards, the two oldest go
    let ai_hand = state.hand(Side::Ai).ids();
    assert_eq!(ai_hand.len(), 7);
    assert_eq!(ai_hand[0], id(23));
    let discarded: Vec<_> = state.discard_pile().iter().map(|c| c.id).collect();
    assert_eq!(discarded, vec![id(21), id(22)]);
    assert_eq!(state.phase(), Phase::AwaitingHumanPlay);
    assert_eq!(state.hand(Side::Human).len(), 2);
}

#[test]
fn test_default_ai_declines_unify_with_full_hand() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, [ball(10)])
        .hand(Side::Ai, (20..26).map(ball))
        .chain([wave(2)])
        .current_side(Side::Ai)
        .turn(2)
        .build()
        .unwrap();

    let (state, turn) = engine.ai_turn(&state, &mut FirstLegal).unwrap();
    assert!(matches!(turn, AiTurn::Played { unify: Some(false), .. }));
    assert_eq!(state.hand(Side::Ai).len(), 5);
    assert_eq!(state.unify_stats(Side::Ai).declined, 1);
}

// =============================================================================
// Passing and game end
// =============================================================================

#[test]
fn test_play_resets_passes_and_two_passes_deadlock() {
    let engine = Engine::default();
    let state = engine.new_game(build_deck()).unwrap();

    let (state, _) = engine.pass(&state, Side::Human).unwrap();
    assert_eq!(state.consecutive_passes(), 1);

    let ai_card = state.hand(Side::Ai).ids()[0];
    let (state, _) = engine
        .attempt_play(&state, Side::Ai, ai_card, Position::Right)
        .unwrap();
    assert_eq!(state.consecutive_passes(), 0);

    let (state, deadlocked) = engine.pass(&state, Side::Human).unwrap();
    assert!(!deadlocked);
    let (state, deadlocked) = engine.pass(&state, Side::Ai).unwrap();
    assert!(deadlocked);

    let result = state.result().unwrap();
    assert_eq!(result, GameResult::Deadlock);
    assert!(!result.is_winner(Side::Human));
    assert!(!result.is_winner(Side::Ai));
    assert_eq!(state.phase(), Phase::GameEnded(GameResult::Deadlock));

    let err = engine.pass(&state, Side::Human).unwrap_err();
    assert_eq!(err, EngineError::GameOver(GameResult::Deadlock));
    assert!(!err.is_recoverable());
}

#[test]
fn test_last_card_wins_before_unify() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, [ball(10)])
        .hand(Side::Ai, [ball(20)])
        .chain([ball(1), wave(2)])
        .build()
        .unwrap();

    let (state, outcome) = engine
        .attempt_play(&state, Side::Human, id(10), Position::Right)
        .unwrap();
    assert_eq!(outcome, PlayOutcome::HandEmptyWin);
    assert_eq!(state.result(), Some(GameResult::Winner(Side::Human)));
    assert!(state.is_over());
    assert_eq!(state.unify_stats(Side::Human), UnifyStats::default());

    assert!(matches!(engine.resolve_unify(&state, true), Err(EngineError::GameOver(_))));
    assert!(matches!(engine.ai_turn(&state, &mut FirstLegal), Err(EngineError::GameOver(_))));
    assert!(engine.legal_moves(&state, Side::Ai).is_empty());
}

#[test]
fn test_ai_can_win() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, [ball(10)])
        .hand(Side::Ai, [ball(20)])
        .current_side(Side::Ai)
        .turn(2)
        .build()
        .unwrap();

    let (state, turn) = engine.ai_turn(&state, &mut FirstLegal).unwrap();
    assert!(matches!(turn, AiTurn::Played { outcome: PlayOutcome::HandEmptyWin, .. }));
    assert!(state.result().unwrap().is_winner(Side::Ai));
}

#[test]
fn test_empty_deck_skips_draw() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, [ball(10), ball(11)])
        .hand(Side::Ai, [ball(20)])
        .build()
        .unwrap();

    let (next, _) = engine.pass(&state, Side::Human).unwrap();
    assert_eq!(next.hand(Side::Ai).len(), 1);
    assert_eq!(next.phase(), Phase::ExecutingAiTurn);
}

// =============================================================================
// Turn ownership
// =============================================================================

#[test]
fn test_out_of_turn_and_wrong_phase() {
    let engine = Engine::default();
    let state = engine.new_game(build_deck()).unwrap();
    let ai_card = state.hand(Side::Ai).ids()[0];

    assert_eq!(
        engine.attempt_play(&state, Side::Ai, ai_card, Position::Left).unwrap_err(),
        EngineError::OutOfTurn { side: Side::Ai }
    );
    assert_eq!(
        engine.ai_turn(&state, &mut FirstLegal).unwrap_err(),
        EngineError::OutOfTurn { side: Side::Ai }
    );
    assert!(matches!(engine.resolve_unify(&state, true), Err(EngineError::UnexpectedPhase { .. })));
    assert!(matches!(engine.discard(&state, &[]), Err(EngineError::UnexpectedPhase { .. })));

    let card = state.hand(Side::Human).ids()[0];
    let (state, _) = engine.attempt_play(&state, Side::Human, card, Position::Left).unwrap();
    let human_card = state.hand(Side::Human).ids()[0];
    assert_eq!(
        engine.attempt_play(&state, Side::Human, human_card, Position::Left).unwrap_err(),
        EngineError::OutOfTurn { side: Side::Human }
    );
}

#[test]
fn test_play_while_unify_pending() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, [ball(10), ball(11)])
        .chain([wave(2)])
        .build()
        .unwrap();

    let (state, _) = engine
        .attempt_play(&state, Side::Human, id(10), Position::Right)
        .unwrap();
    let err = engine
        .attempt_play(&state, Side::Human, id(11), Position::Left)
        .unwrap_err();
    assert!(matches!(err, EngineError::UnexpectedPhase { action: "play", .. }));
}

// =============================================================================
// Chaos
// =============================================================================

/// Removes the Chaos card and its neighbour, then locks the other end.
struct Squisher;

impl ChaosResolver for Squisher {
    fn resolve(
        &self,
        chain: &Chain,
        card: &Card,
        _chaos: ChaosType,
        position: Position,
        _locked_end: Option<Position>,
    ) -> ChaosResolution {
        let neighbor = chain.inward_of(position).map(|c| c.id);
        let kept = chain
            .iter()
            .filter(|c| c.id != card.id && Some(c.id) != neighbor)
            .copied();
        ChaosResolution::Resolved {
            chain: Chain::from_cards(kept),
            locked_end: Some(position.opposite()),
        }
    }
}

/// Puts a card into the chain that was never there.
struct Forger;

impl ChaosResolver for Forger {
    fn resolve(
        &self,
        _chain: &Chain,
        _card: &Card,
        _chaos: ChaosType,
        _position: Position,
        _locked_end: Option<Position>,
    ) -> ChaosResolution {
        ChaosResolution::Resolved {
            chain: Chain::from_cards([ball(99)]),
            locked_end: None,
        }
    }
}

fn chaos_setup() -> GameState {
    GameState::builder()
        .hand(Side::Human, [Card::chaos(id(40), ChaosType::Squish), ball(10)])
        .hand(Side::Ai, [ball(20), ball(21)])
        .chain([ball(1), wave(2)])
        .build()
        .unwrap()
}

#[test]
fn test_unresolved_chaos_stays_in_chain() {
    let engine = Engine::default();
    let (state, outcome) = engine
        .attempt_play(&chaos_setup(), Side::Human, id(40), Position::Right)
        .unwrap();

    // Chaos beside a Wiggle does not earn UNIFY
    assert_eq!(outcome, PlayOutcome::Played);
    assert_eq!(state.chain().ids(), vec![id(1), id(2), id(40)]);
    assert_eq!(state.locked_end(), None);
}

#[test]
fn test_resolver_removes_cards_and_locks() {
    let engine = Engine::default().with_chaos_resolver(Squisher);
    let (state, outcome) = engine
        .attempt_play(&chaos_setup(), Side::Human, id(40), Position::Right)
        .unwrap();

    assert_eq!(outcome, PlayOutcome::Played);
    assert_eq!(state.chain().ids(), vec![id(1)]);
    assert_eq!(state.locked_end(), Some(Position::Left));
    let discarded: Vec<_> = state.discard_pile().iter().map(|c| c.id).collect();
    assert_eq!(discarded, vec![id(2), id(40)]);
    assert_eq!(state.total_cards(), 6);

    let last = state.history().last().unwrap();
    assert_eq!(last.action, Action::ChaosResolved { card: id(40), removed: [id(2), id(40)].into_iter().collect() });

    // The AI can only use the open end
    assert_eq!(
        engine.legal_moves(&state, Side::Ai),
        vec![Move::new(id(20), Position::Right), Move::new(id(21), Position::Right)]
    );
    let (_, turn) = engine.ai_turn(&state, &mut FirstLegal).unwrap();
    assert!(matches!(turn, AiTurn::Played { mv: Move { position: Position::Right, .. }, .. }));
}

#[test]
fn test_forged_resolution_rejected() {
    let engine = Engine::default().with_chaos_resolver(Forger);
    let state = chaos_setup();

    let err = engine
        .attempt_play(&state, Side::Human, id(40), Position::Right)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidChaosResolution { card, .. } if card == id(40)));
    assert!(!err.is_recoverable());
    assert_eq!(state.chain().len(), 2);
}

/// Returns the chain back to front.
struct Reverser;

impl ChaosResolver for Reverser {
    fn resolve(
        &self,
        chain: &Chain,
        _card: &Card,
        _chaos: ChaosType,
        _position: Position,
        _locked_end: Option<Position>,
    ) -> ChaosResolution {
        let mut cards: Vec<Card> = chain.iter().copied().collect();
        cards.reverse();
        ChaosResolution::Resolved {
            chain: Chain::from_cards(cards),
            locked_end: None,
        }
    }
}

/// Keeps the first card twice.
struct Duplicator;

impl ChaosResolver for Duplicator {
    fn resolve(
        &self,
        chain: &Chain,
        _card: &Card,
        _chaos: ChaosType,
        _position: Position,
        _locked_end: Option<Position>,
    ) -> ChaosResolution {
        let first = chain.end(Position::Left).copied();
        ChaosResolution::Resolved {
            chain: Chain::from_cards(first.into_iter().chain(first)),
            locked_end: None,
        }
    }
}

#[test]
fn test_reordered_resolution_rejected() {
    let engine = Engine::default().with_chaos_resolver(Reverser);
    let state = GameState::builder()
        .hand(Side::Human, [Card::chaos(id(40), ChaosType::Squish), ball(10)])
        .chain([ball(1), wave(2), Card::force(id(3), ForceColor::Red)])
        .build()
        .unwrap();

    let err = engine
        .attempt_play(&state, Side::Human, id(40), Position::Right)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidChaosResolution { card, .. } if card == id(40)));
    assert_eq!(state.chain().ids(), vec![id(1), id(2), id(3)]);
}

#[test]
fn test_duplicated_resolution_rejected() {
    let engine = Engine::default().with_chaos_resolver(Duplicator);

    let err = engine
        .attempt_play(&chaos_setup(), Side::Human, id(40), Position::Right)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidChaosResolution { .. }));
}

// =============================================================================
// Hand limit and winning through plain plays
// =============================================================================

#[test]
fn test_plain_play_over_limit_discards_one() {
    let engine = Engine::default();
    let state = GameState::builder()
        .hand(Side::Human, (10..18).map(ball))
        .hand(Side::Ai, [ball(20)])
        .chain([ball(1)])
        .deck([ball(30), ball(31)])
        .current_side(Side::Ai)
        .turn(2)
        .build()
        .unwrap();

    // Draw to 9, play to 8
    let (state, _) = engine.pass(&state, Side::Ai).unwrap();
    assert_eq!(state.hand(Side::Human).len(), 9);
    let (state, outcome) = engine
        .attempt_play(&state, Side::Human, id(10), Position::Right)
        .unwrap();
    assert_eq!(outcome, PlayOutcome::Played);
    assert_eq!(state.hand(Side::Human).len(), 8);
    assert_eq!(state.phase(), Phase::AwaitingDiscard { excess: 1 });
    assert_eq!(state.unify_stats(Side::Human), UnifyStats::default());

    let state = engine.discard(&state, &[id(17)]).unwrap();
    assert_eq!(state.hand(Side::Human).len(), 7);
    assert_eq!(state.discard_pile().iter().map(|c| c.id).collect::<Vec<_>>(), vec![id(17)]);
    assert_eq!(state.phase(), Phase::ExecutingAiTurn);
}

#[test]
fn test_playing_out_the_starting_hand_wins() {
    let engine = Engine::default();
    // Exactly enough cards to deal, so nobody draws
    let state = engine.new_game(build_deck()[..10].to_vec()).unwrap();
    assert_eq!(state.deck_len(), 0);

    let mut state = state;
    for round in 1..=5 {
        let mv = engine.legal_moves(&state, Side::Human)[0];
        let (next, outcome) = engine
            .attempt_play(&state, Side::Human, mv.card, mv.position)
            .unwrap();
        state = next;

        if round < 5 {
            assert_eq!(outcome, PlayOutcome::Played);
            let (next, turn) = engine.ai_turn(&state, &mut FirstLegal).unwrap();
            assert!(matches!(turn, AiTurn::Played { outcome: PlayOutcome::Played, .. }));
            state = next;
        } else {
            assert_eq!(outcome, PlayOutcome::HandEmptyWin);
        }
    }

    assert!(state.check_win(Side::Human));
    assert_eq!(state.phase(), Phase::GameEnded(GameResult::Winner(Side::Human)));
    assert_eq!(state.hand(Side::Ai).len(), 1);
    assert_eq!(state.chain().len(), 9);
    assert_eq!(state.total_cards(), 10);
}
