//! Dice pools and dice costs.
//!
//! [`Dice`] is an ordered element-to-count multiset. The same type describes
//! a player's pool and the cost of a skill or swap; costs use the wildcards
//! `Omni` (one matching element) and `Any` (any die).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// An ordered multiset of dice.
///
/// Entries with a count of zero are never stored, so two pools holding the
/// same dice always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    counts: BTreeMap<Element, u32>,
}

impl Dice {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Builds a pool from `(element, count)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Element, u32)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(), |dice, (elem, num)| dice.with_added(elem, num))
    }

    /// Returns the number of dice of `elem`.
    #[must_use]
    pub fn get(&self, elem: Element) -> u32 {
        self.counts.get(&elem).copied().unwrap_or(0)
    }

    /// Returns the total number of dice.
    #[must_use]
    pub fn num_dice(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Returns `true` if there are no dice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates `(element, count)` pairs in element order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        self.counts.iter().map(|(elem, num)| (*elem, *num))
    }

    /// Returns the pool with `num` dice of `elem` added.
    #[must_use]
    pub fn with_added(mut self, elem: Element, num: u32) -> Self {
        if num > 0 {
            *self.counts.entry(elem).or_insert(0) += num;
        }
        self
    }

    /// Returns the pool with `num` dice of `elem` removed, or `None` if the
    /// pool does not hold that many.
    #[must_use]
    pub fn checked_remove(mut self, elem: Element, num: u32) -> Option<Self> {
        if num == 0 {
            return Some(self);
        }
        let have = self.get(elem);
        if have < num {
            return None;
        }
        if have == num {
            self.counts.remove(&elem);
        } else {
            self.counts.insert(elem, have - num);
        }
        Some(self)
    }

    /// Returns the cost reduced by `num` dice.
    ///
    /// Concrete elements are reduced first, in element order, then `Omni`,
    /// then `Any`. Reducing past zero leaves an empty cost.
    #[must_use]
    pub fn cost_less(mut self, num: u32) -> Self {
        let mut remaining = num;
        let elems: Vec<Element> = self.counts.keys().copied().collect();
        for elem in elems {
            if remaining == 0 {
                break;
            }
            let have = self.get(elem);
            let taken = have.min(remaining);
            remaining -= taken;
            self = self.checked_remove(elem, taken).unwrap_or_default();
        }
        self
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(elem, num)| format!("{elem}x{num}"))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
