//! The damage pipeline.
//!
//! A [`SpecificDamageEffect`] resolves in three strictly ordered stages, each
//! broadcast to the source player's rule-objects first:
//!
//! 1. `DMG_ELEMENT`: the element may be rewritten (infusions)
//! 2. `DMG_REACTION`: the target's aura is consulted and updated in place,
//!    then the reaction-confirmed damage is broadcast
//! 3. `DMG_AMOUNT`: the amount may be raised (boosts) or lowered (shields)
//!
//! HP is then reduced, and the pipeline queues a defeat check followed by
//! the fired reaction's follow-up effects.

use serde::{Deserialize, Serialize};

use crate::element::{Element, Reaction, ReactionDetail};
use crate::error::{EngineError, Result};
use crate::event::{DamageKind, SpecificDamageEffect};
use crate::processing;
use crate::signal::Preprocessables;
use crate::state::GameState;
use crate::status::{CatalyzingFieldStatus, CrystallizeStatus, DendroCoreStatus, FrozenStatus, Status};
use crate::summon::{BurningFlameSummon, Summon};
use crate::target::{DynamicCharacterTarget, StaticTarget, Zone};

use super::{Effect, LifecycleEffect};

/// Damage against a selector resolved at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferredDamageEffect {
    /// Character, summon or status that dealt the damage
    pub source: StaticTarget,
    /// Which characters to hit, relative to the source's player
    pub target: DynamicCharacterTarget,
    /// Damage element
    pub element: Element,
    /// Damage amount per character
    pub damage: i32,
    /// What produced the damage
    pub kind: DamageKind,
    /// A character to leave out, usually the one just hit
    pub target_ref: Option<StaticTarget>,
}

// =============================================================================
// Specific Damage
// =============================================================================

pub(super) fn specific_damage(state: GameState, dmg: SpecificDamageEffect) -> Result<GameState> {
    EngineError::expect_zone(dmg.target, Zone::Characters)?;
    if !state.character(dmg.target).is_some_and(|c| c.is_alive()) {
        tracing::trace!(target = %dmg.target, "damage target gone or defeated");
        return Ok(state);
    }

    let (mut state, mut dmg) = (state, dmg);
    for stage in Preprocessables::DAMAGE_STAGES {
        (state, dmg) = resolve_stage(state, dmg, stage)?;
    }

    let damage = dmg.damage.max(0);
    let state = state.map_character(dmg.target, |c| {
        let hp = (c.hp - damage).max(0);
        if hp == c.hp {
            c
        } else {
            c.with_hp(hp)
        }
    });
    tracing::debug!(
        source = %dmg.source,
        target = %dmg.target,
        element = %dmg.element,
        damage,
        "damage dealt"
    );

    let mut queued = vec![Effect::DefeatedChecker];
    if let Some(detail) = dmg.reaction {
        queued.extend(reaction_follow_ups(&state, &dmg, detail));
    }
    Ok(state.push_many_first_to_last(queued))
}

/// Runs one damage stage.
///
/// The reaction is confirmed, and the aura updated, right before the
/// `DMG_REACTION` broadcast.
fn resolve_stage(
    state: GameState,
    dmg: SpecificDamageEffect,
    stage: Preprocessables,
) -> Result<(GameState, SpecificDamageEffect)> {
    let (state, dmg) = if stage == Preprocessables::DmgReaction {
        confirm_reaction(state, dmg)
    } else {
        (state, dmg)
    };
    processing::preprocess_damage(state, dmg, stage)
}

/// Consults the target's aura and updates it in place.
///
/// On a reaction the consumed element leaves the aura and the damage gains
/// the reaction's boost; otherwise an aurable element is applied.
fn confirm_reaction(
    state: GameState,
    mut dmg: SpecificDamageEffect,
) -> (GameState, SpecificDamageEffect) {
    if !dmg.element.is_reactive() {
        return (state, dmg);
    }
    let Some(aura) = state.character(dmg.target).map(|c| c.aura) else {
        return (state, dmg);
    };
    let new_aura = match aura.consult_reaction(dmg.element) {
        Some(detail) => {
            tracing::debug!(reaction = %detail.reaction, target = %dmg.target, "reaction fired");
            dmg.reaction = Some(detail);
            dmg.damage += detail.reaction.damage_boost();
            aura.without_element(detail.first_elem)
        }
        None => aura.with_element(dmg.element),
    };
    let state = if new_aura == aura {
        state
    } else {
        state.map_character(dmg.target, |c| c.with_aura(new_aura))
    };
    (state, dmg)
}

/// The selector for the off-field characters of the hit character's player.
fn off_field_of(dmg: &SpecificDamageEffect) -> DynamicCharacterTarget {
    if dmg.target.pid == dmg.source.pid {
        DynamicCharacterTarget::SelfOffField
    } else {
        DynamicCharacterTarget::OppoOffField
    }
}

fn splash(dmg: &SpecificDamageEffect, element: Element) -> Effect {
    Effect::ReferredDamage(ReferredDamageEffect {
        source: dmg.source,
        target: off_field_of(dmg),
        element,
        damage: 1,
        kind: DamageKind::Reaction,
        target_ref: Some(dmg.target),
    })
}

/// The effects a fired reaction queues after the hit, in execution order.
///
/// Every [`Reaction`] has an arm here; adding a reaction without a
/// follow-up does not compile.
fn reaction_follow_ups(
    state: &GameState,
    dmg: &SpecificDamageEffect,
    detail: ReactionDetail,
) -> Vec<Effect> {
    let source_pid = dmg.source.pid;
    match detail.reaction {
        Reaction::Vaporize | Reaction::Melt => Vec::new(),
        Reaction::Overloaded => {
            let characters = &state.player(dmg.target.pid).characters;
            if characters.active_id() == Some(dmg.target.id) && characters.next_alive().is_some() {
                vec![Effect::ForwardSwapCharacter {
                    target_player: dmg.target.pid,
                }]
            } else {
                Vec::new()
            }
        }
        Reaction::Superconduct | Reaction::ElectroCharged => vec![splash(dmg, Element::Piercing)],
        Reaction::Swirl => vec![splash(dmg, detail.other_element(Element::Anemo))],
        Reaction::Frozen => vec![LifecycleEffect::AddCharacterStatus {
            target: dmg.target,
            status: Status::from(FrozenStatus::default()),
        }
        .into()],
        Reaction::Quicken => vec![LifecycleEffect::AddCombatStatus {
            target_player: source_pid,
            status: Status::from(CatalyzingFieldStatus::default()),
        }
        .into()],
        Reaction::Bloom => vec![LifecycleEffect::AddCombatStatus {
            target_player: source_pid,
            status: Status::from(DendroCoreStatus::default()),
        }
        .into()],
        Reaction::Crystallize => vec![LifecycleEffect::AddCombatStatus {
            target_player: source_pid,
            status: Status::from(CrystallizeStatus::default()),
        }
        .into()],
        Reaction::Burning => vec![LifecycleEffect::AddSummon {
            target_player: source_pid,
            summon: Summon::from(BurningFlameSummon::default()),
        }
        .into()],
    }
}

// =============================================================================
// Referred Damage
// =============================================================================

pub(super) fn referred_damage(state: GameState, referred: ReferredDamageEffect) -> Result<GameState> {
    let pid = referred.target.player(referred.source.pid);
    let characters = &state.player(pid).characters;
    let targets: Vec<u32> = match referred.target {
        DynamicCharacterTarget::SelfActive | DynamicCharacterTarget::OppoActive => {
            characters.active().filter(|c| c.is_alive()).map(|c| c.id).into_iter().collect()
        }
        DynamicCharacterTarget::SelfOffField | DynamicCharacterTarget::OppoOffField => {
            characters.alive_off_field().iter().map(|c| c.id).collect()
        }
        DynamicCharacterTarget::SelfAll | DynamicCharacterTarget::OppoAll => characters
            .activity_order()
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| c.id)
            .collect(),
    };

    let damages: Vec<Effect> = targets
        .into_iter()
        .map(|id| StaticTarget::character(pid, id))
        .filter(|target| Some(*target) != referred.target_ref)
        .map(|target| {
            Effect::SpecificDamage(SpecificDamageEffect::new(
                referred.source,
                target,
                referred.element,
                referred.damage,
                referred.kind,
            ))
        })
        .collect();
    tracing::trace!(selector = ?referred.target, resolved = damages.len(), "referred damage");
    Ok(state.push_many_first_to_last(damages))
}

// =============================================================================
// Aura Application
// =============================================================================

pub(super) fn apply_elemental_aura(
    state: GameState,
    source: StaticTarget,
    target: StaticTarget,
    element: Element,
) -> Result<GameState> {
    EngineError::expect_zone(target, Zone::Characters)?;
    if !state.character(target).is_some_and(|c| c.is_alive()) {
        return Ok(state);
    }
    let probe = SpecificDamageEffect::new(source, target, element, 0, DamageKind::Reaction);
    let (state, probe) = confirm_reaction(state, probe);
    let follow_ups = match probe.reaction {
        Some(detail) => reaction_follow_ups(&state, &probe, detail),
        None => Vec::new(),
    };
    Ok(state.push_many_first_to_last(follow_ups))
}

// =============================================================================
// Tests
// =============================================================================
