//! Chaos card resolution.
//!
//! Chaos cards (Squish!, Gauge-Break!, Big Bang!) name effects that remove
//! cards from the chain or lock one of its ends. The rules for those effects
//! are not defined, so the engine only offers a hook: after a Chaos card is
//! attached, it asks a `ChaosResolver` what happens. The stock resolver
//! reports every effect as unimplemented and the chain is left alone.

use crate::cards::{Card, ChaosType};
use crate::zones::{Chain, Position};

/// What a resolver decided for one Chaos play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChaosResolution {
    /// No effect is defined; the Chaos card simply stays in the chain.
    Unimplemented(ChaosType),
    /// Replace the chain and the end lock.
    ///
    /// `chain` must only contain cards from the current chain. Cards left
    /// out are moved to the discard pile.
    Resolved {
        chain: Chain,
        locked_end: Option<Position>,
    },
}

/// Decides the effect of a Chaos card that was just attached.
pub trait ChaosResolver: Send + Sync {
    /// `chain` already contains `card` at `position`.
    fn resolve(
        &self,
        chain: &Chain,
        card: &Card,
        chaos: ChaosType,
        position: Position,
        locked_end: Option<Position>,
    ) -> ChaosResolution;
}

/// Resolver that implements no effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnresolvedChaos;

impl ChaosResolver for UnresolvedChaos {
    fn resolve(
        &self,
        _chain: &Chain,
        _card: &Card,
        chaos: ChaosType,
        _position: Position,
        _locked_end: Option<Position>,
    ) -> ChaosResolution {
        ChaosResolution::Unimplemented(chaos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    #[test]
    fn test_unresolved_reports_type() {
        let card = Card::chaos(CardId::new(1), ChaosType::BigBang);
        let chain = Chain::from_cards([card]);

        let resolution = UnresolvedChaos.resolve(&chain, &card, ChaosType::BigBang, Position::Right, None);
        assert_eq!(resolution, ChaosResolution::Unimplemented(ChaosType::BigBang));
    }
}
