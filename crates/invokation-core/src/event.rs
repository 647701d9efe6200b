//! Pending items offered to rule-objects.
//!
//! A [`Preprocessable`] is an in-flight item that rule-objects may rewrite
//! before it takes effect: a damage during one of its three confirmation
//! stages, or the dice cost of a skill or a swap. [`Informable`] carries
//! passive notifications that never rewrite anything.

use serde::{Deserialize, Serialize};

use crate::dice::Dice;
use crate::element::{Element, ReactionDetail};
use crate::state::SkillType;
use crate::target::{PlayerId, StaticTarget};

// =============================================================================
// Damage
// =============================================================================

/// What produced a damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// A normal attack
    NormalAttack,
    /// An elemental skill
    ElementalSkill,
    /// An elemental burst
    ElementalBurst,
    /// A summon
    Summon,
    /// A status or equipment
    Status,
    /// A reaction follow-up
    Reaction,
}

impl DamageKind {
    /// The damage kind dealt by `skill`.
    #[must_use]
    pub const fn from_skill(skill: SkillType) -> Self {
        match skill {
            SkillType::NormalAttack => Self::NormalAttack,
            SkillType::ElementalSkill => Self::ElementalSkill,
            SkillType::ElementalBurst => Self::ElementalBurst,
        }
    }

    /// The skill that dealt this damage, if any.
    #[must_use]
    pub const fn skill(self) -> Option<SkillType> {
        match self {
            Self::NormalAttack => Some(SkillType::NormalAttack),
            Self::ElementalSkill => Some(SkillType::ElementalSkill),
            Self::ElementalBurst => Some(SkillType::ElementalBurst),
            Self::Summon | Self::Status | Self::Reaction => None,
        }
    }
}

/// A damage against one concrete character.
///
/// This is both the effect that runs the damage pipeline and the pending
/// item rule-objects see during that pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecificDamageEffect {
    /// Character, summon or status that dealt the damage
    pub source: StaticTarget,
    /// The damaged character
    pub target: StaticTarget,
    /// Damage element
    pub element: Element,
    /// Damage amount
    pub damage: i32,
    /// What produced the damage
    pub kind: DamageKind,
    /// Reaction confirmed during `DMG_REACTION`
    pub reaction: Option<ReactionDetail>,
}

impl SpecificDamageEffect {
    /// Creates a damage with no confirmed reaction.
    #[must_use]
    pub const fn new(
        source: StaticTarget,
        target: StaticTarget,
        element: Element,
        damage: i32,
        kind: DamageKind,
    ) -> Self {
        Self {
            source,
            target,
            element,
            damage,
            kind,
            reaction: None,
        }
    }

    /// Returns `true` if dealt by a skill of any type.
    #[must_use]
    pub const fn is_skill(&self) -> bool {
        self.kind.skill().is_some()
    }

    /// Returns `true` for piercing damage, which no rule-object may modify.
    #[must_use]
    pub fn is_piercing(&self) -> bool {
        self.element == Element::Piercing
    }
}

// =============================================================================
// Costs
// =============================================================================

/// The dice cost of a skill about to be cast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillEvent {
    /// The casting character
    pub source: StaticTarget,
    /// The skill
    pub skill: SkillType,
    /// Cost after preprocessing so far
    pub cost: Dice,
}

/// The dice cost and speed of a swap about to happen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapEvent {
    /// The swapping player
    pub pid: PlayerId,
    /// Current active character
    pub source: StaticTarget,
    /// Character to swap to
    pub target: StaticTarget,
    /// Cost after preprocessing so far
    pub cost: Dice,
    /// Whether the swap is a fast action
    pub fast: bool,
}

// =============================================================================
// Preprocessable
// =============================================================================

/// An item offered to [`RuleObject::preprocess`](crate::status::RuleObject::preprocess).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preprocessable {
    /// A damage in one of its confirmation stages
    Dmg(SpecificDamageEffect),
    /// A skill cost
    Skill(SkillEvent),
    /// A swap cost
    Swap(SwapEvent),
}

impl Preprocessable {
    /// Returns the damage, if this is one.
    #[must_use]
    pub const fn as_dmg(&self) -> Option<&SpecificDamageEffect> {
        match self {
            Self::Dmg(dmg) => Some(dmg),
            _ => None,
        }
    }
}

// =============================================================================
// Informable
// =============================================================================

/// Passive notifications delivered through `inform`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Informable {
    /// A character started casting a skill.
    SkillCast {
        /// The caster
        source: StaticTarget,
        /// The skill
        skill: SkillType,
    },
    /// A character was marked as defeated.
    CharacterDefeated {
        /// The defeated character
        target: StaticTarget,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_kind_maps_skills_both_ways() {
        for skill in [
            SkillType::NormalAttack,
            SkillType::ElementalSkill,
            SkillType::ElementalBurst,
        ] {
            assert_eq!(DamageKind::from_skill(skill).skill(), Some(skill));
        }
        assert_eq!(DamageKind::Summon.skill(), None);
    }

    #[test]
    fn new_damage_has_no_reaction() {
        let dmg = SpecificDamageEffect::new(
            StaticTarget::summons(PlayerId::P1),
            StaticTarget::character(PlayerId::P2, 1),
            Element::Piercing,
            1,
            DamageKind::Summon,
        );
        assert!(dmg.reaction.is_none());
        assert!(dmg.is_piercing());
        assert!(!dmg.is_skill());
    }

    #[test]
    fn as_dmg_only_matches_damage() {
        let item = Preprocessable::Skill(SkillEvent {
            source: StaticTarget::character(PlayerId::P1, 1),
            skill: SkillType::NormalAttack,
            cost: Dice::new(),
        });
        assert!(item.as_dmg().is_none());
    }
}
