//! The LIFO work list of pending effects.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

use super::Effect;

/// Pending effects; the last element executes next.
///
/// Every operation consumes the stack and returns the new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectStack {
    effects: Vec<Effect>,
}

impl EffectStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Number of pending effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// The effect that executes next.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyStack`] if nothing is pending.
    pub fn peek(&self) -> Result<&Effect> {
        self.effects.last().ok_or(EngineError::EmptyStack)
    }

    /// Removes the effect that executes next.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyStack`] if nothing is pending.
    pub fn pop(mut self) -> Result<(Self, Effect)> {
        let effect = self.effects.pop().ok_or(EngineError::EmptyStack)?;
        Ok((self, effect))
    }

    /// Pushes one effect on top.
    #[must_use]
    pub fn push_one(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Pushes effects so that they execute in the order given.
    #[must_use]
    pub fn push_many_first_to_last(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        let mut incoming: Vec<Effect> = effects.into_iter().collect();
        incoming.reverse();
        self.effects.extend(incoming);
        self
    }

    /// Pushes effects one by one, so the last one given ends up on top.
    #[must_use]
    pub fn push_many_last_to_first(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// Iterates pending effects from the next to execute down.
    pub fn iter_top_down(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::PlayerId;
    use proptest::prelude::*;

    fn marker(n: u32) -> Effect {
        Effect::RollDice {
            pid: PlayerId::P1,
            num: n,
        }
    }

    #[test]
    fn empty_stack_fails() {
        let stack = EffectStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.peek(), Err(EngineError::EmptyStack));
        assert_eq!(stack.pop().err(), Some(EngineError::EmptyStack));
    }

    #[test]
    fn first_to_last_pops_in_given_order() {
        let stack = EffectStack::new().push_many_first_to_last([marker(1), marker(2), marker(3)]);
        let (stack, a) = stack.pop().unwrap();
        let (stack, b) = stack.pop().unwrap();
        let (stack, c) = stack.pop().unwrap();
        assert_eq!((a, b, c), (marker(1), marker(2), marker(3)));
        assert!(stack.is_empty());
    }

    #[test]
    fn last_to_first_puts_last_on_top() {
        let stack = EffectStack::new().push_many_last_to_first([marker(1), marker(2), marker(3)]);
        assert_eq!(stack.peek(), Ok(&marker(3)));
        let order: Vec<&Effect> = stack.iter_top_down().collect();
        assert_eq!(order, vec![&marker(3), &marker(2), &marker(1)]);
    }

    #[test]
    fn pushes_land_above_existing() {
        let stack = EffectStack::new()
            .push_one(marker(0))
            .push_many_first_to_last([marker(1), marker(2)]);
        let top_down: Vec<&Effect> = stack.iter_top_down().collect();
        assert_eq!(top_down, vec![&marker(1), &marker(2), &marker(0)]);
    }

    proptest! {
        #[test]
        fn push_one_then_pop_roundtrips(existing in prop::collection::vec(0u32..100, 0..8), n in 0u32..100) {
            let stack = EffectStack::new().push_many_last_to_first(existing.into_iter().map(marker));
            let (back, popped) = stack.clone().push_one(marker(n)).pop().unwrap();
            prop_assert_eq!(back, stack);
            prop_assert_eq!(popped, marker(n));
        }

        #[test]
        fn first_to_last_preserves_order(ns in prop::collection::vec(0u32..100, 0..8)) {
            let mut stack = EffectStack::new().push_many_first_to_last(ns.iter().copied().map(marker));
            for n in ns {
                let (rest, popped) = stack.pop().unwrap();
                prop_assert_eq!(popped, marker(n));
                stack = rest;
            }
            prop_assert!(stack.is_empty());
        }
    }
}
