//! Characters and the character zone.

use serde::{Deserialize, Serialize};

use crate::dice::Dice;
use crate::element::{Element, ElementalAura};
use crate::status::{CharacterSlot, Kinded, Status, StatusKind};

use super::Statuses;

// =============================================================================
// Skills
// =============================================================================

/// The three skill types every character has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillType {
    /// Normal attack
    NormalAttack,
    /// Elemental skill
    ElementalSkill,
    /// Elemental burst; needs full energy
    ElementalBurst,
}

/// Data describing one skill of a character.
///
/// Supplied by the content catalogue; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillSpec {
    /// Which skill this is
    pub skill: SkillType,
    /// Damage element
    pub element: Element,
    /// Base damage dealt to the opposing active character
    pub damage: i32,
    /// Base dice cost
    pub cost: Dice,
}

impl SkillSpec {
    /// Creates a new skill description.
    #[must_use]
    pub const fn new(skill: SkillType, element: Element, damage: i32, cost: Dice) -> Self {
        Self {
            skill,
            element,
            damage,
            cost,
        }
    }
}

// =============================================================================
// Character
// =============================================================================

/// One character card in play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    /// Slot id, unique within the owning player
    pub id: u32,
    /// Display name
    pub name: String,
    /// The character's own element
    pub element: Element,
    /// Current HP, within `[0, max_hp]`
    pub hp: i32,
    /// Maximum HP
    pub max_hp: i32,
    /// Current energy, within `[0, max_energy]`
    pub energy: i32,
    /// Energy needed for the burst
    pub max_energy: i32,
    /// Cleared once the character has been marked defeated
    pub alive: bool,
    /// Elements currently applied
    pub aura: ElementalAura,
    /// Talent cards
    pub talents: Statuses,
    /// Weapons, artifacts and other equipment
    pub equipments: Statuses,
    /// Ordinary statuses
    pub statuses: Statuses,
    /// Skill descriptions
    pub skills: Vec<SkillSpec>,
}

impl Character {
    /// Creates a character at full HP with no energy, aura or statuses.
    #[must_use]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        element: Element,
        max_hp: i32,
        max_energy: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            element,
            hp: max_hp,
            max_hp,
            energy: 0,
            max_energy,
            alive: true,
            aura: ElementalAura::empty(),
            talents: Statuses::new(),
            equipments: Statuses::new(),
            statuses: Statuses::new(),
            skills: Vec::new(),
        }
    }

    /// Returns the character with `skill` appended.
    #[must_use]
    pub fn with_skill(mut self, skill: SkillSpec) -> Self {
        self.skills.push(skill);
        self
    }

    /// Returns the character with HP set.
    #[must_use]
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }

    /// Returns the character with energy set.
    #[must_use]
    pub fn with_energy(mut self, energy: i32) -> Self {
        self.energy = energy;
        self
    }

    /// Returns the character with the aura replaced.
    #[must_use]
    pub fn with_aura(mut self, aura: ElementalAura) -> Self {
        self.aura = aura;
        self
    }

    /// Returns the character with the alive flag set.
    #[must_use]
    pub fn with_alive(mut self, alive: bool) -> Self {
        self.alive = alive;
        self
    }

    /// Returns the character with one status slot replaced.
    #[must_use]
    pub fn with_slot(mut self, slot: CharacterSlot, statuses: Statuses) -> Self {
        match slot {
            CharacterSlot::Talent => self.talents = statuses,
            CharacterSlot::Equipment => self.equipments = statuses,
            CharacterSlot::Status => self.statuses = statuses,
        }
        self
    }

    /// Returns the character with `status` added to its natural slot.
    #[must_use]
    pub fn with_status_added(self, status: Status) -> Self {
        let slot = status.character_slot();
        let statuses = self.slot(slot).clone().with_added(status);
        self.with_slot(slot, statuses)
    }

    /// The statuses of one slot.
    #[must_use]
    pub const fn slot(&self, slot: CharacterSlot) -> &Statuses {
        match slot {
            CharacterSlot::Talent => &self.talents,
            CharacterSlot::Equipment => &self.equipments,
            CharacterSlot::Status => &self.statuses,
        }
    }

    /// Finds the slot holding a status of `kind`.
    ///
    /// Slots are searched in broadcast order.
    #[must_use]
    pub fn find_status(&self, kind: StatusKind) -> Option<(CharacterSlot, &Status)> {
        [CharacterSlot::Talent, CharacterSlot::Equipment, CharacterSlot::Status]
            .into_iter()
            .find_map(|slot| self.slot(slot).get(kind).map(|status| (slot, status)))
    }

    /// Every status kind on this character, in broadcast order.
    #[must_use]
    pub fn status_kinds(&self) -> Vec<StatusKind> {
        self.talents
            .iter()
            .chain(self.equipments.iter())
            .chain(self.statuses.iter())
            .map(Kinded::kind)
            .collect()
    }

    /// Returns `true` if HP has reached zero.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Returns `true` if alive and above zero HP.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive && self.hp > 0
    }

    /// Looks up a skill description.
    #[must_use]
    pub fn skill(&self, skill: SkillType) -> Option<&SkillSpec> {
        self.skills.iter().find(|spec| spec.skill == skill)
    }

    /// Returns `true` if the character may use any skill right now.
    #[must_use]
    pub fn can_cast_skills(&self) -> bool {
        self.is_alive() && !self.statuses.contains(StatusKind::Frozen)
    }

    /// Returns `true` if the character may use `skill` right now.
    #[must_use]
    pub fn can_cast_skill(&self, skill: SkillType) -> bool {
        self.can_cast_skills()
            && self.skill(skill).is_some()
            && (skill != SkillType::ElementalBurst || self.energy >= self.max_energy)
    }

    /// Returns the character marked as defeated.
    ///
    /// Aura, energy and every status are cleared; HP stays at zero.
    #[must_use]
    pub fn defeated(self) -> Self {
        Self {
            hp: 0,
            energy: 0,
            alive: false,
            aura: ElementalAura::empty(),
            talents: Statuses::new(),
            equipments: Statuses::new(),
            statuses: Statuses::new(),
            ..self
        }
    }
}

// =============================================================================
// Characters
// =============================================================================

/// A player's characters plus the active-character pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Characters {
    active: Option<u32>,
    chars: Vec<Character>,
}

impl Characters {
    /// Creates the zone; `active` must name one of `chars` or be `None`.
    #[must_use]
    pub fn new(chars: Vec<Character>, active: Option<u32>) -> Self {
        Self { active, chars }
    }

    /// Id of the active character.
    #[must_use]
    pub const fn active_id(&self) -> Option<u32> {
        self.active
    }

    /// The active character.
    #[must_use]
    pub fn active(&self) -> Option<&Character> {
        self.active.and_then(|id| self.get(id))
    }

    /// Looks up a character by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Character> {
        self.chars.iter().find(|c| c.id == id)
    }

    /// Iterates characters in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.chars.iter()
    }

    /// Characters in activity order: the active one first, then the rest in
    /// slot order.
    #[must_use]
    pub fn activity_order(&self) -> Vec<&Character> {
        let active = self.active();
        active
            .into_iter()
            .chain(self.chars.iter().filter(|c| Some(c.id) != self.active))
            .collect()
    }

    /// Alive characters that are not active, in slot order.
    #[must_use]
    pub fn alive_off_field(&self) -> Vec<&Character> {
        self.chars
            .iter()
            .filter(|c| c.is_alive() && Some(c.id) != self.active)
            .collect()
    }

    /// Returns `true` if every character is at zero HP.
    #[must_use]
    pub fn all_defeated(&self) -> bool {
        self.chars.iter().all(Character::is_defeated)
    }

    /// The next alive character after the active one, cycling through slots.
    #[must_use]
    pub fn next_alive(&self) -> Option<u32> {
        self.cyclic_alive(false)
    }

    /// The previous alive character before the active one, cycling through
    /// slots.
    #[must_use]
    pub fn prev_alive(&self) -> Option<u32> {
        self.cyclic_alive(true)
    }

    fn cyclic_alive(&self, backward: bool) -> Option<u32> {
        let len = self.chars.len();
        if len == 0 {
            return None;
        }
        let start = self
            .active
            .and_then(|id| self.chars.iter().position(|c| c.id == id))
            .unwrap_or(len - 1);
        (1..=len)
            .map(|step| {
                if backward {
                    (start + len - step) % len
                } else {
                    (start + step) % len
                }
            })
            .map(|idx| &self.chars[idx])
            .find(|c| c.is_alive() && Some(c.id) != self.active)
            .map(|c| c.id)
    }

    /// Returns the zone with a different active character.
    #[must_use]
    pub fn with_active(mut self, id: u32) -> Self {
        self.active = Some(id);
        self
    }

    /// Returns the zone with the character of the same id replaced.
    ///
    /// No-op if no character has that id.
    #[must_use]
    pub fn with_character(mut self, character: Character) -> Self {
        if let Some(slot) = self.chars.iter_mut().find(|c| c.id == character.id) {
            *slot = character;
        }
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::FrozenStatus;

    fn three() -> Characters {
        Characters::new(
            vec![
                Character::new(1, "A", Element::Pyro, 10, 2),
                Character::new(2, "B", Element::Hydro, 10, 2),
                Character::new(3, "C", Element::Cryo, 10, 2),
            ],
            Some(2),
        )
    }

    mod character_tests {
        use super::*;

        #[test]
        fn new_character_is_fresh() {
            let c = Character::new(1, "A", Element::Pyro, 10, 3);
            assert_eq!(c.hp, 10);
            assert_eq!(c.energy, 0);
            assert!(c.alive);
            assert!(c.aura.is_empty());
        }

        #[test]
        fn frozen_blocks_skills() {
            let c = Character::new(1, "A", Element::Pyro, 10, 3)
                .with_skill(SkillSpec::new(SkillType::NormalAttack, Element::Physical, 2, Dice::new()))
                .with_status_added(Status::from(FrozenStatus::default()));
            assert!(!c.can_cast_skill(SkillType::NormalAttack));
        }

        #[test]
        fn burst_needs_full_energy() {
            let c = Character::new(1, "A", Element::Pyro, 10, 2)
                .with_skill(SkillSpec::new(SkillType::ElementalBurst, Element::Pyro, 4, Dice::new()));
            assert!(!c.can_cast_skill(SkillType::ElementalBurst));
            assert!(c.with_energy(2).can_cast_skill(SkillType::ElementalBurst));
        }

        #[test]
        fn defeated_clears_everything_but_identity() {
            let c = Character::new(1, "A", Element::Pyro, 10, 2)
                .with_energy(2)
                .with_aura(ElementalAura::empty().with_element(Element::Hydro))
                .with_status_added(Status::from(FrozenStatus::default()))
                .defeated();
            assert_eq!((c.hp, c.energy, c.alive), (0, 0, false));
            assert!(c.aura.is_empty());
            assert!(c.status_kinds().is_empty());
            assert_eq!(c.id, 1);
        }
    }

    mod characters_tests {
        use super::*;

        #[test]
        fn activity_order_puts_active_first() {
            let ids: Vec<u32> = three().activity_order().iter().map(|c| c.id).collect();
            assert_eq!(ids, vec![2, 1, 3]);
        }

        #[test]
        fn next_and_prev_cycle() {
            let chars = three();
            assert_eq!(chars.next_alive(), Some(3));
            assert_eq!(chars.prev_alive(), Some(1));

            let chars = chars.with_active(3);
            assert_eq!(chars.next_alive(), Some(1));
        }

        #[test]
        fn cyclic_lookup_skips_defeated() {
            let chars = three();
            let c3 = chars.get(3).cloned().unwrap().defeated();
            let chars = chars.with_character(c3);
            assert_eq!(chars.next_alive(), Some(1));
        }

        #[test]
        fn no_alive_candidate() {
            let chars = three();
            let c1 = chars.get(1).cloned().unwrap().defeated();
            let c3 = chars.get(3).cloned().unwrap().defeated();
            let chars = chars.with_character(c1).with_character(c3);
            assert_eq!(chars.next_alive(), None);
            assert!(!chars.all_defeated());
        }

        #[test]
        fn off_field_excludes_active_and_defeated() {
            let chars = three();
            let c1 = chars.get(1).cloned().unwrap().with_hp(0);
            let chars = chars.with_character(c1);
            let ids: Vec<u32> = chars.alive_off_field().iter().map(|c| c.id).collect();
            assert_eq!(ids, vec![3]);
        }
    }
}
