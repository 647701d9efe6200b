//! HP, energy, swaps and skill casting.

use crate::error::{EngineError, Result};
use crate::event::{DamageKind, Informable};
use crate::processing;
use crate::signal::TriggeringSignal;
use crate::state::{Character, GameState, SkillType};
use crate::target::{DynamicCharacterTarget, PlayerId, StaticTarget, Zone};

use super::{Effect, ReferredDamageEffect};

// =============================================================================
// HP and Energy
// =============================================================================

/// Clamps a character field and writes it back only if it changed.
fn clamp_field(
    state: GameState,
    target: StaticTarget,
    read: impl FnOnce(&Character) -> (i32, i32),
    write: impl FnOnce(Character, i32) -> Character,
    delta: i32,
) -> Result<GameState> {
    EngineError::expect_zone(target, Zone::Characters)?;
    let Some((current, max)) = state.character(target).filter(|c| c.is_alive()).map(read) else {
        tracing::trace!(%target, "character gone or defeated");
        return Ok(state);
    };
    let next = (current + delta).clamp(0, max);
    if next == current {
        return Ok(state);
    }
    Ok(state.map_character(target, |c| write(c, next)))
}

pub(super) fn recover_hp(state: GameState, target: StaticTarget, recovery: i32) -> Result<GameState> {
    clamp_field(state, target, |c| (c.hp, c.max_hp), |c, hp| c.with_hp(hp), recovery)
}

pub(super) fn energy_recharge(
    state: GameState,
    target: StaticTarget,
    amount: i32,
) -> Result<GameState> {
    clamp_field(
        state,
        target,
        |c| (c.energy, c.max_energy),
        |c, energy| c.with_energy(energy),
        amount,
    )
}

pub(super) fn energy_drain(state: GameState, target: StaticTarget, amount: i32) -> Result<GameState> {
    clamp_field(
        state,
        target,
        |c| (c.energy, c.max_energy),
        |c, energy| c.with_energy(energy),
        -amount,
    )
}

// =============================================================================
// Swaps
// =============================================================================

pub(super) fn swap_character(state: GameState, target: StaticTarget) -> Result<GameState> {
    EngineError::expect_zone(target, Zone::Characters)?;
    if !state.character(target).is_some_and(|c| c.is_alive()) {
        tracing::trace!(%target, "swap target gone or defeated");
        return Ok(state);
    }
    tracing::debug!(%target, "active character swapped");
    Ok(state.map_player(target.pid, |p| {
        let characters = p.characters.clone().with_active(target.id);
        p.with_characters(characters)
    }))
}

pub(super) fn cyclic_swap(state: GameState, pid: PlayerId, backward: bool) -> Result<GameState> {
    let characters = &state.player(pid).characters;
    let next = if backward {
        characters.prev_alive()
    } else {
        characters.next_alive()
    };
    let active_alive = characters.active().is_some_and(Character::is_alive);
    match next {
        Some(id) => swap_character(state, StaticTarget::character(pid, id)),
        None if active_alive => Ok(state),
        None => {
            tracing::warn!(%pid, "forced swap with no alive character");
            Err(EngineError::NoAliveCharacter { pid })
        }
    }
}

// =============================================================================
// Skills
// =============================================================================

pub(super) fn cast_skill(
    state: GameState,
    target: StaticTarget,
    skill: SkillType,
) -> Result<GameState> {
    EngineError::expect_zone(target, Zone::Characters)?;
    let Some(character) = state.character(target) else {
        tracing::trace!(%target, "caster gone");
        return Ok(state);
    };
    if !character.alive {
        return Ok(state);
    }
    let spec = character
        .skill(skill)
        .cloned()
        .ok_or(EngineError::UnknownSkill { target, skill })?;
    if !character.can_cast_skill(skill) {
        tracing::warn!(%target, ?skill, "skill cast by a character that cannot cast");
        return Err(EngineError::CannotCastSkill { target, skill });
    }
    let max_energy = character.max_energy;
    let swap_check = Effect::SwapCharacterChecker {
        p1_active: state.player1.characters.active_id(),
        p2_active: state.player2.characters.active_id(),
    };

    let cast = Informable::SkillCast { source: target, skill };
    let state = processing::inform(state, target.pid, &cast)?;

    let mut queued = Vec::new();
    if skill == SkillType::ElementalBurst {
        queued.push(Effect::EnergyDrain {
            target,
            amount: max_energy,
        });
    }
    if spec.damage > 0 && !spec.element.is_cost_wildcard() {
        queued.push(Effect::ReferredDamage(ReferredDamageEffect {
            source: target,
            target: DynamicCharacterTarget::OppoActive,
            element: spec.element,
            damage: spec.damage,
            kind: DamageKind::from_skill(skill),
            target_ref: None,
        }));
    }
    if skill != SkillType::ElementalBurst {
        queued.push(Effect::EnergyRecharge { target, amount: 1 });
    }
    queued.extend([
        swap_check,
        Effect::AliveMarkChecker,
        Effect::DefeatedChecker,
        Effect::DeathCheckChecker,
        Effect::AllStatusTriggerer {
            pid: target.pid,
            signal: TriggeringSignal::PostDmg,
        },
    ]);
    tracing::debug!(%target, ?skill, "skill cast");
    Ok(state.push_many_first_to_last(queued))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{duel, p1, p2, with_hp};

    #[test]
    fn healing_clamps_to_max_hp() {
        let state = recover_hp(with_hp(duel(), p1(1), 7), p1(1), 5).unwrap();
        assert_eq!(state.character(p1(1)).unwrap().hp, 10);
    }

    #[test]
    fn energy_stays_within_bounds() {
        let state = energy_recharge(duel(), p1(1), 5).unwrap();
        assert_eq!(state.character(p1(1)).unwrap().energy, 2);
        let state = energy_drain(state, p1(1), 9).unwrap();
        assert_eq!(state.character(p1(1)).unwrap().energy, 0);
    }

    #[test]
    fn defeated_characters_are_not_healed() {
        let state = duel().map_character(p2(2), Character::defeated);
        let healed = recover_hp(state.clone(), p2(2), 3).unwrap();
        assert_eq!(healed, state);
    }

    #[test]
    fn forward_and_backward_swaps_cycle() {
        let state = cyclic_swap(duel(), PlayerId::P1, false).unwrap();
        assert_eq!(state.player1.characters.active_id(), Some(2));
        let state = cyclic_swap(state, PlayerId::P1, true).unwrap();
        let state = cyclic_swap(state, PlayerId::P1, true).unwrap();
        assert_eq!(state.player1.characters.active_id(), Some(3));
    }

    #[test]
    fn forward_swap_skips_the_defeated() {
        let state = duel().map_character(p1(2), Character::defeated);
        let state = cyclic_swap(state, PlayerId::P1, false).unwrap();
        assert_eq!(state.player1.characters.active_id(), Some(3));
    }

    #[test]
    fn forward_swap_with_nobody_alive_is_fatal() {
        let state = [1, 2, 3]
            .into_iter()
            .fold(duel(), |state, id| state.map_character(p2(id), Character::defeated));
        assert_eq!(
            cyclic_swap(state, PlayerId::P2, false),
            Err(EngineError::NoAliveCharacter { pid: PlayerId::P2 })
        );
    }

    #[test]
    fn swap_to_a_defeated_character_is_noop() {
        let state = duel().map_character(p1(3), Character::defeated);
        let swapped = swap_character(state.clone(), p1(3)).unwrap();
        assert_eq!(swapped, state);
    }

    #[test]
    fn unknown_skill_is_fatal() {
        let state = duel().map_character(p1(1), |mut c| {
            c.skills.retain(|spec| spec.skill != SkillType::ElementalSkill);
            c
        });
        assert!(matches!(
            cast_skill(state, p1(1), SkillType::ElementalSkill),
            Err(EngineError::UnknownSkill { .. })
        ));
    }

    #[test]
    fn burst_queue_order() {
        let state = duel().map_character(p1(1), |c| c.with_energy(2));
        let state = cast_skill(state, p1(1), SkillType::ElementalBurst).unwrap();
        let names: Vec<&str> = state.effect_stack.iter_top_down().map(Effect::name).collect();
        assert_eq!(
            names,
            vec![
                "EnergyDrainEffect",
                "ReferredDamageEffect",
                "SwapCharacterCheckerEffect",
                "AliveMarkCheckerEffect",
                "DefeatedCheckerEffect",
                "DeathCheckCheckerEffect",
                "AllStatusTriggererEffect",
            ]
        );
    }
}
