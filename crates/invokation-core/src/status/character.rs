//! Character-scoped statuses.
//!
//! Also home to the shield arithmetic shared with combat shields.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::element::Element;
use crate::event::{Preprocessable, SpecificDamageEffect};
use crate::signal::{Preprocessables, TriggeringSignal};
use crate::state::GameState;
use crate::target::{StaticTarget, Zone};

use super::{Lifetime, RuleObject};

// =============================================================================
// Shields
// =============================================================================

/// Returns the damage a shield owned by `owner` may absorb at this stage.
///
/// Character shields protect their own character; combat shields protect the
/// owning player's active character. Piercing and zero damage pass through.
pub(crate) fn shieldable_damage(
    state: &GameState,
    owner: StaticTarget,
    item: &Preprocessable,
    stage: Preprocessables,
) -> Option<SpecificDamageEffect> {
    if stage != Preprocessables::DmgAmount {
        return None;
    }
    let dmg = item.as_dmg()?;
    if dmg.is_piercing() || dmg.damage <= 0 {
        return None;
    }
    let protects = match owner.zone {
        Zone::Characters => dmg.target == owner,
        _ => state.active_target(owner.pid) == Some(dmg.target),
    };
    protects.then_some(*dmg)
}

/// Absorbs with shield points: as many usages as needed, `amount` each.
///
/// Returns `(absorbed, usages_consumed)`.
pub(crate) fn stacked_absorb(damage: i32, usages: i32, amount: i32) -> (i32, i32) {
    if amount <= 0 || usages <= 0 {
        return (0, 0);
    }
    let needed = (damage + amount - 1) / amount;
    let consumed = usages.min(needed);
    (damage.min(consumed * amount), consumed)
}

// =============================================================================
// Frozen
// =============================================================================

/// Cannot use skills. Pyro or Physical damage shatters it for +2 damage.
///
/// Removed at round end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrozenStatus {
    /// Rounds left
    pub duration: i32,
}

impl Default for FrozenStatus {
    fn default() -> Self {
        Self { duration: 1 }
    }
}

impl FrozenStatus {
    /// Damage added when shattered.
    pub const SHATTER_BOOST: i32 = 2;
}

impl RuleObject for FrozenStatus {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Duration { max: 1 }
    }

    fn counter(&self) -> i32 {
        self.duration
    }

    fn with_counter(&self, value: i32) -> Self {
        Self { duration: value }
    }

    fn reacts_to(&self, signal: TriggeringSignal) -> bool {
        signal == TriggeringSignal::RoundEnd
    }

    fn preprocess(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        match item {
            Preprocessable::Dmg(mut dmg)
                if stage == Preprocessables::DmgAmount
                    && dmg.target == owner
                    && matches!(dmg.element, Element::Pyro | Element::Physical) =>
            {
                dmg.damage += Self::SHATTER_BOOST;
                (Preprocessable::Dmg(dmg), None)
            }
            item => (item, Some(*self)),
        }
    }

    fn react_to_signal(
        &self,
        _state: &GameState,
        _owner: StaticTarget,
        _signal: TriggeringSignal,
    ) -> (Vec<Effect>, Option<Self>) {
        (Vec::new(), None)
    }
}

// =============================================================================
// Food
// =============================================================================

/// The character has eaten this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SatiatedStatus {
    /// Rounds left
    pub duration: i32,
}

impl Default for SatiatedStatus {
    fn default() -> Self {
        Self { duration: 1 }
    }
}

impl RuleObject for SatiatedStatus {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Duration { max: 1 }
    }

    fn counter(&self) -> i32 {
        self.duration
    }

    fn with_counter(&self, value: i32) -> Self {
        Self { duration: value }
    }

    fn reacts_to(&self, signal: TriggeringSignal) -> bool {
        signal == TriggeringSignal::RoundEnd
    }

    fn react_to_signal(
        &self,
        _state: &GameState,
        _owner: StaticTarget,
        _signal: TriggeringSignal,
    ) -> (Vec<Effect>, Option<Self>) {
        (Vec::new(), None)
    }
}

/// Heals its character by 1 at every end-of-round checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MushroomPizzaStatus {
    /// Checkouts left
    pub duration: i32,
}

impl Default for MushroomPizzaStatus {
    fn default() -> Self {
        Self {
            duration: Self::MAX_DURATION,
        }
    }
}

impl MushroomPizzaStatus {
    /// Starting and maximum duration.
    pub const MAX_DURATION: i32 = 2;
    /// HP healed per checkout.
    pub const RECOVERY: i32 = 1;
}

impl RuleObject for MushroomPizzaStatus {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Duration {
            max: Self::MAX_DURATION,
        }
    }

    fn counter(&self) -> i32 {
        self.duration
    }

    fn with_counter(&self, value: i32) -> Self {
        Self { duration: value }
    }

    fn reacts_to(&self, signal: TriggeringSignal) -> bool {
        signal == TriggeringSignal::EndRoundCheckOut
    }

    fn react_to_signal(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        _signal: TriggeringSignal,
    ) -> (Vec<Effect>, Option<Self>) {
        let heal = Effect::RecoverHp {
            target: owner,
            recovery: Self::RECOVERY,
        };
        (vec![heal], Some(self.with_counter(self.duration - 1)))
    }
}

// =============================================================================
// Infusion
// =============================================================================

/// Converts the character's Physical skill damage into `element`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementalInfusionStatus {
    /// The infused element
    pub element: Element,
    /// Rounds left
    pub duration: i32,
}

impl Default for ElementalInfusionStatus {
    fn default() -> Self {
        Self {
            element: Element::Pyro,
            duration: 1,
        }
    }
}

impl ElementalInfusionStatus {
    /// Maximum duration.
    pub const MAX_DURATION: i32 = 2;
}

impl RuleObject for ElementalInfusionStatus {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Duration {
            max: Self::MAX_DURATION,
        }
    }

    fn counter(&self) -> i32 {
        self.duration
    }

    fn with_counter(&self, value: i32) -> Self {
        Self {
            duration: value,
            ..*self
        }
    }

    fn reacts_to(&self, signal: TriggeringSignal) -> bool {
        signal == TriggeringSignal::RoundEnd
    }

    fn preprocess(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        match item {
            Preprocessable::Dmg(mut dmg)
                if stage == Preprocessables::DmgElement
                    && dmg.source == owner
                    && dmg.element == Element::Physical
                    && dmg.is_skill() =>
            {
                dmg.element = self.element;
                (Preprocessable::Dmg(dmg), Some(*self))
            }
            item => (item, Some(*self)),
        }
    }

    fn react_to_signal(
        &self,
        _state: &GameState,
        _owner: StaticTarget,
        _signal: TriggeringSignal,
    ) -> (Vec<Effect>, Option<Self>) {
        (Vec::new(), Some(self.with_counter(self.duration - 1)))
    }
}

// =============================================================================
// Character Shields
// =============================================================================

/// Shield points: each usage absorbs up to `shield_amount` damage and a hit
/// consumes as many usages as it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackedShieldStatus {
    /// Remaining shield points
    pub usages: i32,
    /// Maximum shield points
    pub max_usages: i32,
    /// Damage absorbed per point
    pub shield_amount: i32,
    /// Whether the shield leaves at zero points
    pub auto_destroy: bool,
}

impl Default for StackedShieldStatus {
    fn default() -> Self {
        Self {
            usages: 2,
            max_usages: 2,
            shield_amount: 1,
            auto_destroy: true,
        }
    }
}

impl RuleObject for StackedShieldStatus {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Usages {
            max: self.max_usages,
            auto_destroy: self.auto_destroy,
        }
    }

    fn counter(&self) -> i32 {
        self.usages
    }

    fn with_counter(&self, value: i32) -> Self {
        Self {
            usages: value,
            ..*self
        }
    }

    fn preprocess(
        &self,
        state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        let Some(mut dmg) = shieldable_damage(state, owner, &item, stage) else {
            return (item, Some(*self));
        };
        let (absorbed, consumed) = stacked_absorb(dmg.damage, self.usages, self.shield_amount);
        if consumed == 0 {
            return (item, Some(*self));
        }
        dmg.damage -= absorbed;
        let next = self.with_counter(self.usages - consumed);
        (Preprocessable::Dmg(dmg), (!next.is_expired()).then_some(next))
    }
}

/// Absorbs up to `shield_amount` damage per hit, one usage per hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedShieldStatus {
    /// Remaining hits
    pub usages: i32,
    /// Maximum hits
    pub max_usages: i32,
    /// Damage absorbed per hit
    pub shield_amount: i32,
}

impl Default for FixedShieldStatus {
    fn default() -> Self {
        Self {
            usages: 1,
            max_usages: 1,
            shield_amount: 2,
        }
    }
}

impl RuleObject for FixedShieldStatus {
    fn lifetime(&self) -> Lifetime {
        Lifetime::usages(self.max_usages)
    }

    fn counter(&self) -> i32 {
        self.usages
    }

    fn with_counter(&self, value: i32) -> Self {
        Self {
            usages: value,
            ..*self
        }
    }

    fn preprocess(
        &self,
        state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        let Some(mut dmg) = shieldable_damage(state, owner, &item, stage) else {
            return (item, Some(*self));
        };
        if self.usages <= 0 {
            return (item, Some(*self));
        }
        dmg.damage -= dmg.damage.min(self.shield_amount);
        let next = self.with_counter(self.usages - 1);
        (Preprocessable::Dmg(dmg), (!next.is_expired()).then_some(next))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacked_absorb_consumes_ceiling() {
        assert_eq!(stacked_absorb(3, 2, 1), (2, 2));
        assert_eq!(stacked_absorb(1, 2, 1), (1, 1));
        assert_eq!(stacked_absorb(3, 5, 2), (3, 2));
        assert_eq!(stacked_absorb(4, 0, 1), (0, 0));
    }

    #[test]
    fn infusion_only_counts_down_on_round_end() {
        let infusion = ElementalInfusionStatus::default();
        assert!(infusion.reacts_to(TriggeringSignal::RoundEnd));
        assert!(!infusion.reacts_to(TriggeringSignal::EndRoundCheckOut));
    }

    #[test]
    fn pizza_defaults_to_two_rounds() {
        assert_eq!(MushroomPizzaStatus::default().duration, 2);
    }
}
