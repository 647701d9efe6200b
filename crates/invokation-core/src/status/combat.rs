//! Combat statuses: owned by a player rather than a character.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::event::{Informable, Preprocessable};
use crate::signal::Preprocessables;
use crate::state::GameState;
use crate::target::StaticTarget;

use super::character::{shieldable_damage, stacked_absorb};
use super::{Lifetime, RuleObject};

/// Implements the counter part of [`RuleObject`] for a `usages` field.
macro_rules! usage_counter {
    ($max:expr) => {
        fn lifetime(&self) -> Lifetime {
            Lifetime::usages($max)
        }

        fn counter(&self) -> i32 {
            self.usages
        }

        fn with_counter(&self, value: i32) -> Self {
            Self { usages: value }
        }
    };
}

/// Adds `boost` to the owning player's damage of `elements`, one usage per
/// hit.
fn boost_own_damage<T: RuleObject>(
    this: &T,
    owner: StaticTarget,
    item: Preprocessable,
    stage: Preprocessables,
    elements: &[Element],
    boost: i32,
) -> (Preprocessable, Option<T>) {
    match item {
        Preprocessable::Dmg(mut dmg)
            if stage == Preprocessables::DmgAmount
                && this.counter() > 0
                && dmg.source.pid == owner.pid
                && elements.contains(&dmg.element) =>
        {
            dmg.damage += boost;
            let next = this.with_counter(this.counter() - 1);
            (Preprocessable::Dmg(dmg), next.normalized())
        }
        item => (item, Some(this.clone())),
    }
}

// =============================================================================
// Reaction Products
// =============================================================================

/// Created by Quicken: +1 to the owner's Electro and Dendro damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalyzingFieldStatus {
    /// Remaining boosts
    pub usages: i32,
}

impl Default for CatalyzingFieldStatus {
    fn default() -> Self {
        Self { usages: 2 }
    }
}

impl RuleObject for CatalyzingFieldStatus {
    usage_counter!(2);

    fn preprocess(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        boost_own_damage(self, owner, item, stage, &[Element::Electro, Element::Dendro], 1)
    }
}

/// Created by Bloom: +2 to the owner's next Pyro or Electro damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DendroCoreStatus {
    /// Remaining boosts
    pub usages: i32,
}

impl Default for DendroCoreStatus {
    fn default() -> Self {
        Self { usages: 1 }
    }
}

impl RuleObject for DendroCoreStatus {
    usage_counter!(1);

    fn preprocess(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        boost_own_damage(self, owner, item, stage, &[Element::Pyro, Element::Electro], 2)
    }
}

/// Created by Crystallize: a stacking 1-point shield on the active character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrystallizeStatus {
    /// Shield points
    pub usages: i32,
}

impl Default for CrystallizeStatus {
    fn default() -> Self {
        Self { usages: 1 }
    }
}

impl RuleObject for CrystallizeStatus {
    usage_counter!(2);

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
        let (absorbed, consumed) = stacked_absorb(dmg.damage, self.usages, 1);
        if consumed == 0 {
            return (item, Some(*self));
        }
        dmg.damage -= absorbed;
        (
            Preprocessable::Dmg(dmg),
            self.with_counter(self.usages - consumed).normalized(),
        )
    }
}

// =============================================================================
// Reaction Modifiers
// =============================================================================

/// When a skill of one of the owner's characters triggers a Pyro-related
/// reaction, that damage gets +3. One use.
///
/// The casting character is remembered through `inform`; the boost is applied
/// at `DMG_REACTION`, where the fired reaction is already known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FerventFlamesStatus {
    /// Remaining boosts
    pub usages: i32,
    /// The owner's character whose skill is being cast
    pub caster: Option<u32>,
}

impl Default for FerventFlamesStatus {
    fn default() -> Self {
        Self {
            usages: 1,
            caster: None,
        }
    }
}

impl FerventFlamesStatus {
    /// Extra reaction damage.
    pub const BOOST: i32 = 3;
}

impl RuleObject for FerventFlamesStatus {
    fn lifetime(&self) -> Lifetime {
        Lifetime::usages(1)
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

    fn inform(&self, _state: &GameState, owner: StaticTarget, info: &Informable) -> Self {
        match info {
            Informable::SkillCast { source, .. } => Self {
                caster: (source.pid == owner.pid).then_some(source.id),
                ..*self
            },
            Informable::CharacterDefeated { .. } => *self,
        }
    }

    fn preprocess(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        let casting = |source: StaticTarget| {
            self.caster
                .is_some_and(|id| source == StaticTarget::character(owner.pid, id))
        };
        match item {
            Preprocessable::Dmg(mut dmg)
                if stage == Preprocessables::DmgReaction
                    && dmg.is_skill()
                    && casting(dmg.source)
                    && dmg.reaction.is_some_and(|detail| {
                        detail.first_elem == Element::Pyro || detail.second_elem == Element::Pyro
                    }) =>
            {
                dmg.damage += Self::BOOST;
                (
                    Preprocessable::Dmg(dmg),
                    self.with_counter(self.usages - 1).normalized(),
                )
            }
            item => (item, Some(*self)),
        }
    }
}

// =============================================================================
// Swap Modifiers
// =============================================================================

/// The owner's next swap costs one die less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangingShiftsStatus {
    /// Remaining discounts
    pub usages: i32,
}

impl Default for ChangingShiftsStatus {
    fn default() -> Self {
        Self { usages: 1 }
    }
}

impl RuleObject for ChangingShiftsStatus {
    usage_counter!(1);

    fn preprocess(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        match item {
            Preprocessable::Swap(mut swap)
                if stage == Preprocessables::Swap
                    && swap.pid == owner.pid
                    && !swap.cost.is_empty() =>
            {
                swap.cost = swap.cost.cost_less(1);
                (
                    Preprocessable::Swap(swap),
                    self.with_counter(self.usages - 1).normalized(),
                )
            }
            item => (item, Some(*self)),
        }
    }
}

/// The owner's next swap is a fast action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaveItToMeStatus {
    /// Remaining uses
    pub usages: i32,
}

impl Default for LeaveItToMeStatus {
    fn default() -> Self {
        Self { usages: 1 }
    }
}

impl RuleObject for LeaveItToMeStatus {
    usage_counter!(1);

    fn preprocess(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        match item {
            Preprocessable::Swap(mut swap)
                if stage == Preprocessables::Swap && swap.pid == owner.pid && !swap.fast =>
            {
                swap.fast = true;
                (
                    Preprocessable::Swap(swap),
                    self.with_counter(self.usages - 1).normalized(),
                )
            }
            item => (item, Some(*self)),
        }
    }
}
