//! Card definitions.
//!
//! A `Card` is immutable once created: its `CardId` stays the same no matter
//! which zone (deck, hand, chain, discard) currently holds it.
//!
//! Card categories are closed enums so an unknown type or a Force card with
//! a variant cannot be represented.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card_{}", self.0)
    }
}

/// The four card categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Gravity,
    Force,
    Wiggle,
    Chaos,
}

impl CardType {
    /// All card types, in deck-building order.
    pub const ALL: [CardType; 4] = [
        CardType::Gravity,
        CardType::Force,
        CardType::Wiggle,
        CardType::Chaos,
    ];
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Gravity => "Gravity",
            CardType::Force => "Force",
            CardType::Wiggle => "Wiggle",
            CardType::Chaos => "Chaos",
        };
        f.write_str(name)
    }
}

/// Variant number of a Gravity or Wiggle card (1 through 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Variant(u8);

impl Variant {
    /// All variants in ascending order.
    pub const ALL: [Variant; 3] = [Variant(1), Variant(2), Variant(3)];

    /// Create a variant, returning `None` outside 1..=3.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 3 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw variant number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Variant {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Variant::new(value).ok_or_else(|| format!("variant {value} is outside 1..=3"))
    }
}

impl From<Variant> for u8 {
    fn from(variant: Variant) -> Self {
        variant.0
    }
}

/// Color of a Force card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceColor {
    Red,
    Blue,
    Yellow,
    Green,
}

impl ForceColor {
    pub const ALL: [ForceColor; 4] = [
        ForceColor::Red,
        ForceColor::Blue,
        ForceColor::Yellow,
        ForceColor::Green,
    ];
}

impl std::fmt::Display for ForceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ForceColor::Red => "Red",
            ForceColor::Blue => "Blue",
            ForceColor::Yellow => "Yellow",
            ForceColor::Green => "Green",
        };
        f.write_str(name)
    }
}

/// Kind of a Chaos card. Effects are not resolved by the core rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChaosType {
    Squish,
    GaugeBreak,
    BigBang,
}

impl ChaosType {
    pub const ALL: [ChaosType; 3] = [ChaosType::Squish, ChaosType::GaugeBreak, ChaosType::BigBang];
}

impl std::fmt::Display for ChaosType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChaosType::Squish => "Squish!",
            ChaosType::GaugeBreak => "Gauge-Break!",
            ChaosType::BigBang => "Big Bang!",
        };
        f.write_str(name)
    }
}

/// Card category together with its type-specific attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Gravity(Variant),
    Force(ForceColor),
    Wiggle(Variant),
    Chaos(ChaosType),
}

impl CardKind {
    /// The category of this kind.
    #[must_use]
    pub const fn card_type(self) -> CardType {
        match self {
            CardKind::Gravity(_) => CardType::Gravity,
            CardKind::Force(_) => CardType::Force,
            CardKind::Wiggle(_) => CardType::Wiggle,
            CardKind::Chaos(_) => CardType::Chaos,
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKind::Gravity(v) => write!(f, "Ball-{}", v.get()),
            CardKind::Force(color) => write!(f, "{color} Force"),
            CardKind::Wiggle(v) => write!(f, "Wave-{}", v.get()),
            CardKind::Chaos(chaos) => write!(f, "{chaos}"),
        }
    }
}

/// A single card.
///
/// ## Example
///
/// ```
/// use emuni::cards::{Card, CardId, CardType, ForceColor};
///
/// let card = Card::force(CardId::new(18), ForceColor::Red);
/// assert_eq!(card.card_type(), CardType::Force);
/// assert_eq!(card.name(), "Red Force");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Identity, stable for the game's lifetime.
    pub id: CardId,

    /// Category and attribute.
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind) -> Self {
        Self { id, kind }
    }

    /// Create a Gravity card.
    ///
    /// Panics if `variant` is outside 1..=3.
    #[must_use]
    pub fn gravity(id: CardId, variant: u8) -> Self {
        let variant = Variant::new(variant).expect("gravity variant must be 1..=3");
        Self::new(id, CardKind::Gravity(variant))
    }

    /// Create a Force card.
    #[must_use]
    pub const fn force(id: CardId, color: ForceColor) -> Self {
        Self::new(id, CardKind::Force(color))
    }

    /// Create a Wiggle card.
    ///
    /// Panics if `variant` is outside 1..=3.
    #[must_use]
    pub fn wiggle(id: CardId, variant: u8) -> Self {
        let variant = Variant::new(variant).expect("wiggle variant must be 1..=3");
        Self::new(id, CardKind::Wiggle(variant))
    }

    /// Create a Chaos card.
    #[must_use]
    pub const fn chaos(id: CardId, chaos: ChaosType) -> Self {
        Self::new(id, CardKind::Chaos(chaos))
    }

    #[must_use]
    pub const fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    /// Whether this card is of the given type.
    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.card_type() == card_type
    }

    /// Display label, e.g. `Ball-2` or `Gauge-Break!`.
    #[must_use]
    pub fn name(&self) -> String {
        self.kind.to_string()
    }

    /// Variant of a Gravity or Wiggle card.
    #[must_use]
    pub fn variant(&self) -> Option<Variant> {
        match self.kind {
            CardKind::Gravity(v) | CardKind::Wiggle(v) => Some(v),
            _ => None,
        }
    }

    /// Color of a Force card.
    #[must_use]
    pub fn color(&self) -> Option<ForceColor> {
        match self.kind {
            CardKind::Force(color) => Some(color),
            _ => None,
        }
    }

    /// Kind of a Chaos card.
    #[must_use]
    pub fn chaos_type(&self) -> Option<ChaosType> {
        match self.kind {
            CardKind::Chaos(chaos) => Some(chaos),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind, self.id)
    }
}
