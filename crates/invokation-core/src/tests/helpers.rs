//! Factory functions for test states.

use crate::config::EngineConfig;
use crate::dice::Dice;
use crate::effect::{Effect, SpecificDamageEffect};
use crate::element::{Element, ElementalAura};
use crate::engine::Engine;
use crate::event::DamageKind;
use crate::state::{Character, Characters, GameState, PlayerState, SkillSpec, SkillType};
use crate::status::Status;
use crate::summon::Summon;
use crate::support::Support;
use crate::target::{PlayerId, StaticTarget};

// =============================================================================
// Standard Setup
// =============================================================================

/// Max HP of every character built by [`fighter`].
pub(crate) const MAX_HP: i32 = 10;

/// Max energy of every character built by [`fighter`].
pub(crate) const MAX_ENERGY: i32 = 2;

/// A character with the standard three skills:
///
/// - normal attack: 2 Physical, costs one die of its element and two of any
/// - elemental skill: 3 of its element, costs three of its element
/// - elemental burst: 4 of its element, costs three of its element
pub(crate) fn fighter(id: u32, element: Element) -> Character {
    Character::new(id, format!("{element} fighter {id}"), element, MAX_HP, MAX_ENERGY)
        .with_skill(SkillSpec::new(
            SkillType::NormalAttack,
            Element::Physical,
            2,
            Dice::from_pairs([(element, 1), (Element::Any, 2)]),
        ))
        .with_skill(SkillSpec::new(
            SkillType::ElementalSkill,
            element,
            3,
            Dice::from_pairs([(element, 3)]),
        ))
        .with_skill(SkillSpec::new(
            SkillType::ElementalBurst,
            element,
            4,
            Dice::from_pairs([(element, 3)]),
        ))
}

fn team(elements: [Element; 3]) -> PlayerState {
    let chars = elements
        .into_iter()
        .zip(1..)
        .map(|(element, id)| fighter(id, element))
        .collect();
    PlayerState::new(Characters::new(chars, Some(1)))
}

/// Two players with characters 1 to 3 each, character 1 active, P1 to act.
pub(crate) fn duel() -> GameState {
    GameState::new(
        team([Element::Pyro, Element::Hydro, Element::Electro]),
        team([Element::Cryo, Element::Dendro, Element::Geo]),
    )
}

/// Character `id` of P1.
pub(crate) const fn p1(id: u32) -> StaticTarget {
    StaticTarget::character(PlayerId::P1, id)
}

/// Character `id` of P2.
pub(crate) const fn p2(id: u32) -> StaticTarget {
    StaticTarget::character(PlayerId::P2, id)
}

// =============================================================================
// State Shortcuts
// =============================================================================

pub(crate) fn add_character_status(
    state: GameState,
    target: StaticTarget,
    status: Status,
) -> GameState {
    state.map_character(target, |c| c.with_status_added(status))
}

pub(crate) fn add_combat_status(state: GameState, pid: PlayerId, status: Status) -> GameState {
    state.map_player(pid, |p| {
        let statuses = p.combat_statuses.clone().with_added(status);
        p.with_combat_statuses(statuses)
    })
}

pub(crate) fn add_summon(state: GameState, pid: PlayerId, summon: Summon) -> GameState {
    state.map_player(pid, |p| {
        let summons = p.summons.clone().with_added(summon);
        p.with_summons(summons)
    })
}

pub(crate) fn add_support(state: GameState, pid: PlayerId, support: Support) -> GameState {
    state.map_player(pid, |p| {
        let (supports, _) = p.supports.clone().with_added(support);
        p.with_supports(supports)
    })
}

pub(crate) fn with_aura(state: GameState, target: StaticTarget, element: Element) -> GameState {
    state.map_character(target, |c| c.with_aura(ElementalAura::from_elements([element])))
}

pub(crate) fn with_hp(state: GameState, target: StaticTarget, hp: i32) -> GameState {
    state.map_character(target, |c| c.with_hp(hp))
}

/// Skill damage from `source` to `target`.
pub(crate) fn hit(
    source: StaticTarget,
    target: StaticTarget,
    element: Element,
    damage: i32,
) -> Effect {
    Effect::SpecificDamage(SpecificDamageEffect::new(
        source,
        target,
        element,
        damage,
        DamageKind::ElementalSkill,
    ))
}

pub(crate) fn cast(target: StaticTarget, skill: SkillType) -> Effect {
    Effect::CastSkill { target, skill }
}

pub(crate) fn hp(state: &GameState, target: StaticTarget) -> i32 {
    state.character(target).map_or(-1, |c| c.hp)
}

// =============================================================================
// Driving
// =============================================================================

/// Pushes `effect` and drains with a fresh seed-0 engine.
pub(crate) fn run(state: GameState, effect: Effect) -> GameState {
    Engine::new(EngineConfig::default())
        .drain(state.push_one(effect))
        .expect("cascade should settle")
}
