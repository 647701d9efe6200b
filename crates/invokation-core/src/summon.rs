//! Summons: player-owned rule-objects that usually act at round end.

use serde::{Deserialize, Serialize};

use crate::effect::{Effect, ReferredDamageEffect};
use crate::element::Element;
use crate::event::DamageKind;
use crate::signal::TriggeringSignal;
use crate::state::GameState;
use crate::status::{rule_object_enum, Lifetime, RuleObject};
use crate::target::{DynamicCharacterTarget, StaticTarget};

rule_object_enum! {
    /// Every summon.
    pub enum Summon, kind SummonKind {
        /// Created by Burning
        BurningFlame(BurningFlameSummon),
    }
}

/// Deals 1 Pyro damage to the opposing active character at every
/// end-of-round checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BurningFlameSummon {
    /// Remaining checkouts
    pub usages: i32,
}

impl Default for BurningFlameSummon {
    fn default() -> Self {
        Self { usages: 1 }
    }
}

impl BurningFlameSummon {
    /// Maximum stacked usages.
    pub const MAX_USAGES: i32 = 2;
    /// Damage per checkout.
    pub const DAMAGE: i32 = 1;
}

impl RuleObject for BurningFlameSummon {
    fn lifetime(&self) -> Lifetime {
        Lifetime::usages(Self::MAX_USAGES)
    }

    fn counter(&self) -> i32 {
        self.usages
    }

    fn with_counter(&self, value: i32) -> Self {
        Self { usages: value }
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
        let damage = Effect::ReferredDamage(ReferredDamageEffect {
            source: owner,
            target: DynamicCharacterTarget::OppoActive,
            element: Element::Pyro,
            damage: Self::DAMAGE,
            kind: DamageKind::Summon,
            target_ref: None,
        });
        (vec![damage], Some(self.with_counter(self.usages - 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Kinded;

    #[test]
    fn burning_flame_stacks_to_two() {
        let flame = Summon::from(BurningFlameSummon::default());
        assert_eq!(flame.kind(), SummonKind::BurningFlame);
        let merged = flame.update(&Summon::from(BurningFlameSummon::default())).unwrap();
        assert_eq!(merged.counter(), 2);
        let merged = merged.update(&Summon::from(BurningFlameSummon::default())).unwrap();
        assert_eq!(merged.counter(), 2);
    }
}
