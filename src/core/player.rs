//! The two sides of a game and per-side data storage.
//!
//! ## Side
//!
//! A game is always the human player against the AI. The human moves first.
//!
//! ## SideMap
//!
//! Per-side storage with O(1) access, indexable by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Human,
    Ai,
}

impl Side {
    /// Both sides, in turn order.
    pub const BOTH: [Side; 2] = [Side::Human, Side::Ai];

    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }

    const fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Ai => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Human => f.write_str("human"),
            Side::Ai => f.write_str("ai"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use emuni::core::{Side, SideMap};
///
/// let mut passes: SideMap<u32> = SideMap::with_value(0);
/// passes[Side::Ai] += 1;
///
/// assert_eq!(passes[Side::Human], 0);
/// assert_eq!(passes[Side::Ai], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Human), factory(Side::Ai)],
        }
    }

    /// Create a SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a SideMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }
}

impl<T: Default> Default for SideMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_other() {
        assert_eq!(Side::Human.other(), Side::Ai);
        assert_eq!(Side::Ai.other(), Side::Human);
        assert_eq!(Side::Human.other().other(), Side::Human);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(format!("{}", Side::Human), "human");
        assert_eq!(format!("{}", Side::Ai), "ai");
    }

    #[test]
    fn test_side_map_new() {
        let map = SideMap::new(|side| if side == Side::Human { 5 } else { 7 });
        assert_eq!(map[Side::Human], 5);
        assert_eq!(map[Side::Ai], 7);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<Vec<u32>> = SideMap::with_default();
        map[Side::Ai].push(3);

        assert!(map[Side::Human].is_empty());
        assert_eq!(map[Side::Ai], vec![3]);
    }

    #[test]
    fn test_side_map_iter() {
        let map = SideMap::new(|side| side.other());
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Human, &Side::Ai), (Side::Ai, &Side::Human)]);
    }

    #[test]
    fn test_side_map_serialization() {
        let map = SideMap::new(|side| side == Side::Ai);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<bool> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
