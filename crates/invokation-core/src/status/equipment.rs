//! Talents and equipment.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::element::Element;
use crate::event::{Informable, Preprocessable};
use crate::signal::{Preprocessables, TriggeringSignal};
use crate::state::{GameState, SkillType};
use crate::target::StaticTarget;

use super::{Lifetime, RuleObject};

/// Adds `boost` to one skill of its character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillBoostTalentStatus {
    /// The boosted skill
    pub skill: SkillType,
    /// Extra damage
    pub boost: i32,
}

impl Default for SkillBoostTalentStatus {
    fn default() -> Self {
        Self {
            skill: SkillType::ElementalSkill,
            boost: 1,
        }
    }
}

impl RuleObject for SkillBoostTalentStatus {
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
                    && dmg.source == owner
                    && dmg.kind.skill() == Some(self.skill) =>
            {
                dmg.damage += self.boost;
                (Preprocessable::Dmg(dmg), Some(*self))
            }
            item => (item, Some(*self)),
        }
    }
}

/// Adds `boost` to every skill damage of its character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponEquipmentStatus {
    /// Extra damage
    pub boost: i32,
}

impl Default for WeaponEquipmentStatus {
    fn default() -> Self {
        Self { boost: 1 }
    }
}

impl RuleObject for WeaponEquipmentStatus {
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
                    && dmg.source == owner
                    && dmg.is_skill()
                    && !dmg.is_piercing() =>
            {
                dmg.damage += self.boost;
                (Preprocessable::Dmg(dmg), Some(*self))
            }
            item => (item, Some(*self)),
        }
    }
}

/// While its character is active, every opposing defeat grants two Omni dice
/// once the death settles.
///
/// Defeats are remembered through `inform` and paid out on `DEATH_EVENT`.
/// Stays equipped after its last payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GamblersEarringsStatus {
    /// Payouts left
    pub usages: i32,
    /// Defeats seen but not paid out yet
    pub pending: i32,
}

impl Default for GamblersEarringsStatus {
    fn default() -> Self {
        Self {
            usages: Self::MAX_USAGES,
            pending: 0,
        }
    }
}

impl GamblersEarringsStatus {
    /// Payouts per game.
    pub const MAX_USAGES: i32 = 3;
    /// Omni dice per payout.
    pub const DICE_PER_PAYOUT: u32 = 2;
}

impl RuleObject for GamblersEarringsStatus {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Usages {
            max: Self::MAX_USAGES,
            auto_destroy: false,
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

    fn reacts_to(&self, signal: TriggeringSignal) -> bool {
        signal == TriggeringSignal::DeathEvent && self.pending > 0
    }

    fn inform(&self, state: &GameState, owner: StaticTarget, info: &Informable) -> Self {
        match info {
            Informable::CharacterDefeated { target }
                if target.pid != owner.pid
                    && self.usages > self.pending
                    && state.active_target(owner.pid) == Some(owner) =>
            {
                Self {
                    pending: self.pending + 1,
                    ..*self
                }
            }
            _ => *self,
        }
    }

    fn react_to_signal(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        _signal: TriggeringSignal,
    ) -> (Vec<Effect>, Option<Self>) {
        let payouts = self.pending.min(self.usages);
        if payouts <= 0 {
            return (Vec::new(), Some(*self));
        }
        let dice = Effect::AddDice {
            pid: owner.pid,
            element: Element::Omni,
            num: Self::DICE_PER_PAYOUT * payouts.unsigned_abs(),
        };
        let next = Self {
            usages: self.usages - payouts,
            pending: 0,
        };
        (vec![dice], Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{DamageKind, SpecificDamageEffect};
    use crate::target::PlayerId;
    use crate::tests::helpers::{duel, p1, p2};

    #[test]
    fn talent_boosts_only_its_skill() {
        let talent = SkillBoostTalentStatus::default();
        let boosted = |kind| {
            let dmg = SpecificDamageEffect::new(p1(1), p2(1), Element::Pyro, 3, kind);
            let item = Preprocessable::Dmg(dmg);
            let (item, _) = talent.preprocess(&duel(), p1(1), item, Preprocessables::DmgAmount);
            item.as_dmg().map(|dmg| dmg.damage)
        };
        assert_eq!(boosted(DamageKind::ElementalSkill), Some(4));
        assert_eq!(boosted(DamageKind::NormalAttack), Some(3));
    }

    #[test]
    fn earrings_count_defeats_only_while_active() {
        let earrings = GamblersEarringsStatus::default();
        let defeat = Informable::CharacterDefeated { target: p2(1) };

        let seen = earrings.inform(&duel(), p1(1), &defeat);
        assert_eq!(seen.pending, 1);
        assert!(seen.reacts_to(TriggeringSignal::DeathEvent));

        let benched = earrings.inform(&duel(), p1(2), &defeat);
        assert_eq!(benched, earrings);

        let own_defeat = Informable::CharacterDefeated { target: p1(3) };
        let own_loss = earrings.inform(&duel(), p1(1), &own_defeat);
        assert_eq!(own_loss, earrings);
    }

    #[test]
    fn exhausted_earrings_stay_equipped() {
        let earrings = GamblersEarringsStatus { usages: 1, pending: 1 };
        let (effects, next) = earrings.react_to_signal(&duel(), p1(1), TriggeringSignal::DeathEvent);
        assert_eq!(
            effects,
            vec![Effect::AddDice {
                pid: PlayerId::P1,
                element: Element::Omni,
                num: 2,
            }]
        );
        let next = next.unwrap();
        assert_eq!(next.usages, 0);
        assert!(!next.is_expired());
        assert!(!next.reacts_to(TriggeringSignal::DeathEvent));
    }
}
