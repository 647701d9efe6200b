//! The rule-object broadcaster.
//!
//! Every interaction between the engine and the rule-objects goes through
//! here. The broadcaster decides *who* is asked and in which order, calls the
//! protocol method, and turns the returned next value into the right
//! lifecycle operation. Rule-objects themselves never pick a lifecycle
//! effect.
//!
//! # Canonical order
//!
//! For one player:
//!
//! 1. characters in activity order (active first, then slot order), each
//!    visiting talents, then equipment, then statuses
//! 2. combat statuses
//! 3. summons
//! 4. supports, in slot order
//!
//! Two-player broadcasts visit the source player first, then the opponent.
//! The order is snapshotted when a broadcast starts; objects removed by an
//! earlier visitor are skipped.
//!
//! # Write-back
//!
//! | entry point      | next value unchanged | changed         | `None` / expired |
//! |------------------|----------------------|-----------------|------------------|
//! | `preprocess`     | nothing              | Override, now   | Remove, now      |
//! | `inform`         | nothing              | Override, now   | Remove, now      |
//! | `react_to_signal`| nothing              | Update, queued  | Remove, queued   |
//!
//! Signal write-backs carry the *difference* between the old and new value
//! ([`RuleObject::delta`]), so they compose with anything that changed the
//! object while the write-back was waiting on the stack.

use crate::dice::Dice;
use crate::effect::{Effect, LifecycleEffect, SpecificDamageEffect};
use crate::element::Element;
use crate::error::{EngineError, Result};
use crate::event::{Informable, Preprocessable, SkillEvent, SwapEvent};
use crate::signal::{Preprocessables, TriggeringSignal};
use crate::state::{GameState, SkillType};
use crate::status::{AnyRuleObject, RuleObject, RuleObjectId, RuleObjectKey};
use crate::target::{PlayerId, StaticTarget, Zone};

// =============================================================================
// Iteration Order
// =============================================================================

/// Every rule-object of `pid`, in canonical order.
#[must_use]
pub fn rule_object_ids(state: &GameState, pid: PlayerId) -> Vec<RuleObjectId> {
    let player = state.player(pid);
    let mut ids = Vec::new();

    for character in player.characters.activity_order() {
        let owner = StaticTarget::character(pid, character.id);
        ids.extend(
            character
                .status_kinds()
                .into_iter()
                .map(|kind| RuleObjectId::new(owner, RuleObjectKey::Status(kind))),
        );
    }

    let combat = StaticTarget::combat_statuses(pid);
    ids.extend(
        player
            .combat_statuses
            .kinds()
            .into_iter()
            .map(|kind| RuleObjectId::new(combat, RuleObjectKey::Status(kind))),
    );

    let summons = StaticTarget::summons(pid);
    ids.extend(
        player
            .summons
            .kinds()
            .into_iter()
            .map(|kind| RuleObjectId::new(summons, RuleObjectKey::Summon(kind))),
    );

    ids.extend(
        player
            .supports
            .sids()
            .into_iter()
            .map(|sid| RuleObjectId::new(StaticTarget::support(pid, sid), RuleObjectKey::Support)),
    );

    ids
}

/// Every rule-object of both players, `pid` first.
#[must_use]
pub fn rule_object_ids_both(state: &GameState, pid: PlayerId) -> Vec<RuleObjectId> {
    pid.this_then_other()
        .into_iter()
        .flat_map(|p| rule_object_ids(state, p))
        .collect()
}

// =============================================================================
// Lifecycle Decision Table
// =============================================================================

fn zone_mismatch(id: &RuleObjectId) -> EngineError {
    let expected = match id.key {
        RuleObjectKey::Status(_) if !id.is_character_status() => Zone::CombatStatuses,
        RuleObjectKey::Status(_) => Zone::Characters,
        RuleObjectKey::Summon(_) => Zone::Summons,
        RuleObjectKey::Support => Zone::Supports,
    };
    tracing::warn!(%id, "rule-object addressed through the wrong zone");
    EngineError::WrongZone {
        target: id.owner,
        expected,
    }
}

/// The effect that removes the object at `id`.
///
/// # Errors
///
/// Returns [`EngineError::WrongZone`] if the key does not fit the owner zone.
pub fn remove_effect(id: &RuleObjectId) -> Result<LifecycleEffect> {
    let pid = id.owner.pid;
    match (id.owner.zone, id.key) {
        (Zone::Characters, RuleObjectKey::Status(kind)) => Ok(LifecycleEffect::RemoveCharacterStatus {
            target: id.owner,
            kind,
        }),
        (Zone::CombatStatuses, RuleObjectKey::Status(kind)) => Ok(LifecycleEffect::RemoveCombatStatus {
            target_player: pid,
            kind,
        }),
        (Zone::Summons, RuleObjectKey::Summon(kind)) => Ok(LifecycleEffect::RemoveSummon {
            target_player: pid,
            kind,
        }),
        (Zone::Supports, RuleObjectKey::Support) => Ok(LifecycleEffect::RemoveSupport {
            target_player: pid,
            sid: id.owner.id,
        }),
        _ => Err(zone_mismatch(id)),
    }
}

/// The effect that replaces the object at `id` with `object`.
///
/// # Errors
///
/// Returns [`EngineError::WrongZone`] if the object does not fit the owner
/// zone.
pub fn override_effect(id: &RuleObjectId, object: AnyRuleObject) -> Result<LifecycleEffect> {
    let pid = id.owner.pid;
    match (id.owner.zone, object) {
        (Zone::Characters, AnyRuleObject::Status(status)) => {
            Ok(LifecycleEffect::OverrideCharacterStatus {
                target: id.owner,
                status,
            })
        }
        (Zone::CombatStatuses, AnyRuleObject::Status(status)) => {
            Ok(LifecycleEffect::OverrideCombatStatus {
                target_player: pid,
                status,
            })
        }
        (Zone::Summons, AnyRuleObject::Summon(summon)) => Ok(LifecycleEffect::OverrideSummon {
            target_player: pid,
            summon,
        }),
        (Zone::Supports, AnyRuleObject::Support(support)) => Ok(LifecycleEffect::OverrideSupport {
            target_player: pid,
            sid: id.owner.id,
            support,
        }),
        _ => Err(zone_mismatch(id)),
    }
}

/// The effect that merges `incoming` into the object at `id`.
///
/// # Errors
///
/// Returns [`EngineError::WrongZone`] if the object does not fit the owner
/// zone.
pub fn update_effect(id: &RuleObjectId, incoming: AnyRuleObject) -> Result<LifecycleEffect> {
    let pid = id.owner.pid;
    match (id.owner.zone, incoming) {
        (Zone::Characters, AnyRuleObject::Status(status)) => Ok(LifecycleEffect::UpdateCharacterStatus {
            target: id.owner,
            status,
        }),
        (Zone::CombatStatuses, AnyRuleObject::Status(status)) => {
            Ok(LifecycleEffect::UpdateCombatStatus {
                target_player: pid,
                status,
            })
        }
        (Zone::Summons, AnyRuleObject::Summon(summon)) => Ok(LifecycleEffect::UpdateSummon {
            target_player: pid,
            summon,
        }),
        (Zone::Supports, AnyRuleObject::Support(support)) => Ok(LifecycleEffect::UpdateSupport {
            target_player: pid,
            sid: id.owner.id,
            support,
        }),
        _ => Err(zone_mismatch(id)),
    }
}

/// The effect that lets the object at `id` react to `signal`.
///
/// # Errors
///
/// Returns [`EngineError::WrongZone`] if the key does not fit the owner zone.
pub fn trigger_effect(id: &RuleObjectId, signal: TriggeringSignal) -> Result<Effect> {
    let pid = id.owner.pid;
    match (id.owner.zone, id.key) {
        (Zone::Characters, RuleObjectKey::Status(kind)) => Ok(Effect::TriggerStatus {
            target: id.owner,
            kind,
            signal,
        }),
        (Zone::CombatStatuses, RuleObjectKey::Status(kind)) => Ok(Effect::TriggerCombatStatus {
            target_player: pid,
            kind,
            signal,
        }),
        (Zone::Summons, RuleObjectKey::Summon(kind)) => Ok(Effect::TriggerSummon {
            target_player: pid,
            kind,
            signal,
        }),
        (Zone::Supports, RuleObjectKey::Support) => Ok(Effect::TriggerSupport {
            target_player: pid,
            sid: id.owner.id,
            signal,
        }),
        _ => Err(zone_mismatch(id)),
    }
}

/// Applies a preprocess or inform result immediately.
fn write_back_now(
    state: GameState,
    id: &RuleObjectId,
    old: &AnyRuleObject,
    next: Option<AnyRuleObject>,
) -> Result<GameState> {
    let effect = match next {
        Some(next) if next == *old => return Ok(state),
        Some(next) if !next.is_expired() => override_effect(id, next)?,
        _ => {
            tracing::debug!(%id, object = old.name(), "rule-object removed");
            remove_effect(id)?
        }
    };
    effect.execute(state)
}

/// Builds the queued write-back of a signal reaction.
fn write_back_queued(
    id: &RuleObjectId,
    old: &AnyRuleObject,
    next: Option<AnyRuleObject>,
) -> Result<Option<LifecycleEffect>> {
    match next {
        Some(next) if next == *old => Ok(None),
        Some(next) if !next.is_expired() => update_effect(id, old.delta(&next)).map(Some),
        _ => remove_effect(id).map(Some),
    }
}

// =============================================================================
// Preprocess
// =============================================================================

/// Offers `item` to every rule-object of both players, `pid` first.
///
/// Write-backs happen immediately, so later visitors see earlier ones.
///
/// # Errors
///
/// Propagates lifecycle errors from write-backs.
pub fn preprocess(
    state: GameState,
    pid: PlayerId,
    item: Preprocessable,
    stage: Preprocessables,
) -> Result<(GameState, Preprocessable)> {
    let mut state = state;
    let mut item = item;
    for id in rule_object_ids_both(&state, pid) {
        let Some(object) = state.rule_object(&id) else {
            tracing::trace!(%id, %stage, "rule-object gone, skipped");
            continue;
        };
        let (next_item, next) = object.preprocess(&state, id.owner, item, stage);
        item = next_item;
        state = write_back_now(state, &id, &object, next)?;
    }
    Ok((state, item))
}

/// Runs one damage stage, broadcasting from the damage source's player.
///
/// Piercing damage is never offered to rule-objects.
///
/// # Errors
///
/// Returns [`EngineError::PreprocessKindChanged`] if a rule-object replaced
/// the damage with a different kind of item.
pub fn preprocess_damage(
    state: GameState,
    dmg: SpecificDamageEffect,
    stage: Preprocessables,
) -> Result<(GameState, SpecificDamageEffect)> {
    if dmg.is_piercing() {
        return Ok((state, dmg));
    }
    let (state, item) = preprocess(state, dmg.source.pid, Preprocessable::Dmg(dmg), stage)?;
    match item {
        Preprocessable::Dmg(dmg) => Ok((state, dmg)),
        _ => Err(EngineError::PreprocessKindChanged { stage }),
    }
}

/// The base cost of a swap.
#[must_use]
pub fn base_swap_cost() -> Dice {
    Dice::from_pairs([(Element::Any, 1)])
}

/// Computes the cost of `source` casting `skill`.
///
/// Returns the preprocessed event and the state with any consumed
/// rule-object usages applied.
///
/// # Errors
///
/// Returns [`EngineError::UnknownCharacter`] or [`EngineError::UnknownSkill`]
/// if the caster or skill does not exist.
pub fn skill_cost_event(
    state: GameState,
    source: StaticTarget,
    skill: SkillType,
) -> Result<(GameState, SkillEvent)> {
    EngineError::expect_zone(source, Zone::Characters)?;
    let character = state
        .character(source)
        .ok_or(EngineError::UnknownCharacter { target: source })?;
    let spec = character
        .skill(skill)
        .ok_or(EngineError::UnknownSkill {
            target: source,
            skill,
        })?;
    let event = SkillEvent {
        source,
        skill,
        cost: spec.cost.clone(),
    };
    let (state, item) = preprocess(
        state,
        source.pid,
        Preprocessable::Skill(event),
        Preprocessables::Skill,
    )?;
    match item {
        Preprocessable::Skill(event) => Ok((state, event)),
        _ => Err(EngineError::PreprocessKindChanged {
            stage: Preprocessables::Skill,
        }),
    }
}

/// Computes the cost and speed of `pid` swapping to character `target_id`.
///
/// # Errors
///
/// Returns [`EngineError::UnknownCharacter`] if either character is missing.
pub fn swap_cost_event(
    state: GameState,
    pid: PlayerId,
    target_id: u32,
) -> Result<(GameState, SwapEvent)> {
    let target = StaticTarget::character(pid, target_id);
    if state.character(target).is_none() {
        return Err(EngineError::UnknownCharacter { target });
    }
    let source = state
        .active_target(pid)
        .ok_or(EngineError::UnknownCharacter { target })?;
    let event = SwapEvent {
        pid,
        source,
        target,
        cost: base_swap_cost(),
        fast: false,
    };
    let (state, item) = preprocess(state, pid, Preprocessable::Swap(event), Preprocessables::Swap)?;
    match item {
        Preprocessable::Swap(event) => Ok((state, event)),
        _ => Err(EngineError::PreprocessKindChanged {
            stage: Preprocessables::Swap,
        }),
    }
}

// =============================================================================
// Inform
// =============================================================================

/// Delivers `info` to every rule-object of both players, `pid` first.
///
/// # Errors
///
/// Propagates lifecycle errors from write-backs.
pub fn inform(state: GameState, pid: PlayerId, info: &Informable) -> Result<GameState> {
    let mut state = state;
    for id in rule_object_ids_both(&state, pid) {
        let Some(object) = state.rule_object(&id) else {
            continue;
        };
        let next = object.inform(&state, id.owner, info);
        state = write_back_now(state, &id, &object, Some(next))?;
    }
    Ok(state)
}

// =============================================================================
// Signals
// =============================================================================

fn trigger_effects_for(
    state: &GameState,
    ids: Vec<RuleObjectId>,
    signal: TriggeringSignal,
) -> Result<Vec<Effect>> {
    ids.into_iter()
        .map(|id| {
            let effect = trigger_effect(&id, signal)?;
            let reacts = state
                .rule_object(&id)
                .is_some_and(|object| object.reacts_to(signal));
            Ok(reacts.then_some(effect))
        })
        .filter_map(Result::transpose)
        .collect()
}

/// One trigger effect per rule-object of both players reacting to `signal`,
/// `pid` first, in canonical order.
///
/// # Errors
///
/// Returns [`EngineError::WrongZone`] if a rule-object is stored under a
/// zone its key does not fit.
pub fn trigger_effects(
    state: &GameState,
    pid: PlayerId,
    signal: TriggeringSignal,
) -> Result<Vec<Effect>> {
    trigger_effects_for(state, rule_object_ids_both(state, pid), signal)
}

/// Like [`trigger_effects`], for one player only.
///
/// # Errors
///
/// Same as [`trigger_effects`].
pub fn player_trigger_effects(
    state: &GameState,
    pid: PlayerId,
    signal: TriggeringSignal,
) -> Result<Vec<Effect>> {
    trigger_effects_for(state, rule_object_ids(state, pid), signal)
}

/// Lets the rule-object at `id` react to `signal`.
///
/// Queues, in execution order: the returned effects, the write-back, and,
/// if any returned effect deals damage or swaps, the swap, alive-mark and
/// death checks. No-op if the object is gone or no longer reacts.
///
/// # Errors
///
/// Propagates zone mismatches from the write-back.
pub fn trigger_rule_object(
    state: GameState,
    id: &RuleObjectId,
    signal: TriggeringSignal,
) -> Result<GameState> {
    let Some(object) = state.rule_object(id) else {
        tracing::trace!(%id, %signal, "rule-object gone, trigger skipped");
        return Ok(state);
    };
    if !object.reacts_to(signal) {
        return Ok(state);
    }
    let (effects, next) = object.react_to_signal(&state, id.owner, signal);
    tracing::debug!(%id, %signal, queued = effects.len(), "rule-object reacted");

    let needs_checks = effects.iter().any(Effect::is_damage_or_swap);
    let mut queued = effects;
    if let Some(write_back) = write_back_queued(id, &object, next)? {
        queued.push(write_back.into());
    }
    if needs_checks {
        queued.push(Effect::SwapCharacterChecker {
            p1_active: state.player1.characters.active_id(),
            p2_active: state.player2.characters.active_id(),
        });
        queued.push(Effect::AliveMarkChecker);
        queued.push(Effect::DeathCheckChecker);
    }
    Ok(state.push_many_first_to_last(queued))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{
        CatalyzingFieldStatus, ChangingShiftsStatus, CrystallizeStatus, FrozenStatus,
        LeaveItToMeStatus, MushroomPizzaStatus, Status, StatusKind, WeaponEquipmentStatus,
    };
    use crate::summon::{BurningFlameSummon, Summon, SummonKind};
    use crate::support::{PaimonSupport, Support};
    use crate::tests::helpers::{add_character_status, add_combat_status, duel, p1, p2};

    fn populated() -> GameState {
        let state = duel();
        let state = add_character_status(state, p1(2), Status::from(MushroomPizzaStatus::default()));
        let state = add_character_status(state, p1(1), Status::from(WeaponEquipmentStatus::default()));
        let state = add_character_status(state, p1(1), Status::from(FrozenStatus::default()));
        let state = add_combat_status(
            state,
            PlayerId::P1,
            Status::from(CatalyzingFieldStatus::default()),
        );
        let state = state.map_player(PlayerId::P1, |p| {
            let summons = p.summons.clone().with_added(Summon::from(BurningFlameSummon::default()));
            let (supports, _) = p.supports.clone().with_added(Support::from(PaimonSupport::default()));
            p.with_summons(summons).with_supports(supports)
        });
        add_combat_status(state, PlayerId::P2, Status::from(CrystallizeStatus::default()))
    }

    mod order_tests {
        use super::*;

        #[test]
        fn one_player_order_is_canonical() {
            let ids = rule_object_ids(&populated(), PlayerId::P1);
            let expected = vec![
                RuleObjectId::new(p1(1), RuleObjectKey::Status(StatusKind::WeaponEquipment)),
                RuleObjectId::new(p1(1), RuleObjectKey::Status(StatusKind::Frozen)),
                RuleObjectId::new(p1(2), RuleObjectKey::Status(StatusKind::MushroomPizza)),
                RuleObjectId::new(
                    StaticTarget::combat_statuses(PlayerId::P1),
                    RuleObjectKey::Status(StatusKind::CatalyzingField),
                ),
                RuleObjectId::new(
                    StaticTarget::summons(PlayerId::P1),
                    RuleObjectKey::Summon(SummonKind::BurningFlame),
                ),
                RuleObjectId::new(StaticTarget::support(PlayerId::P1, 0), RuleObjectKey::Support),
            ];
            assert_eq!(ids, expected);
        }

        #[test]
        fn active_character_goes_first() {
            let state = populated().map_player(PlayerId::P1, |p| {
                let chars = p.characters.clone().with_active(2);
                p.with_characters(chars)
            });
            let ids = rule_object_ids(&state, PlayerId::P1);
            assert_eq!(ids[0].owner, p1(2));
        }

        #[test]
        fn both_players_visit_source_first() {
            let state = populated();
            let ids = rule_object_ids_both(&state, PlayerId::P2);
            assert_eq!(ids[0].owner.pid, PlayerId::P2);
            assert_eq!(ids.last().map(|id| id.owner.pid), Some(PlayerId::P1));
        }

        #[test]
        fn identical_broadcasts_are_identical() {
            let state = populated();
            let first =
                trigger_effects(&state, PlayerId::P1, TriggeringSignal::EndRoundCheckOut).unwrap();
            let second =
                trigger_effects(&state, PlayerId::P1, TriggeringSignal::EndRoundCheckOut).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.len(), 2);
            assert!(matches!(first[0], Effect::TriggerStatus { .. }));
            assert!(matches!(first[1], Effect::TriggerSummon { .. }));
        }
    }

    mod cost_tests {
        use super::*;

        #[test]
        fn changing_shifts_discounts_one_swap() {
            let state = add_combat_status(
                duel(),
                PlayerId::P1,
                Status::from(ChangingShiftsStatus::default()),
            );
            let (state, event) = swap_cost_event(state, PlayerId::P1, 2).unwrap();
            assert!(event.cost.is_empty());
            assert!(!event.fast);
            assert!(state.player1.combat_statuses.is_empty());

            let (_, event) = swap_cost_event(state, PlayerId::P1, 2).unwrap();
            assert_eq!(event.cost, base_swap_cost());
        }

        #[test]
        fn leave_it_to_me_makes_swap_fast() {
            let state = add_combat_status(
                duel(),
                PlayerId::P1,
                Status::from(LeaveItToMeStatus::default()),
            );
            let (state, event) = swap_cost_event(state, PlayerId::P1, 3).unwrap();
            assert!(event.fast);
            assert!(!state.player1.combat_statuses.contains(StatusKind::LeaveItToMe));
        }

        #[test]
        fn opponent_discounts_do_not_apply() {
            let state = add_combat_status(
                duel(),
                PlayerId::P2,
                Status::from(ChangingShiftsStatus::default()),
            );
            let (state, event) = swap_cost_event(state, PlayerId::P1, 2).unwrap();
            assert_eq!(event.cost, base_swap_cost());
            assert!(state.player2.combat_statuses.contains(StatusKind::ChangingShifts));
        }

        #[test]
        fn skill_cost_reads_base_cost() {
            let (_, event) = skill_cost_event(duel(), p1(1), SkillType::NormalAttack).unwrap();
            assert_eq!(event.cost.num_dice(), 3);
        }

        #[test]
        fn unknown_skill_is_an_error() {
            let state = duel().map_character(p2(1), |mut c| {
                c.skills.clear();
                c
            });
            assert!(matches!(
                skill_cost_event(state, p2(1), SkillType::ElementalBurst),
                Err(EngineError::UnknownSkill { .. })
            ));
        }
    }

    mod write_back_tests {
        use super::*;

        #[test]
        fn signal_write_back_is_a_delta_update() {
            let state =
                add_character_status(duel(), p1(1), Status::from(MushroomPizzaStatus::default()));
            let id = RuleObjectId::new(p1(1), RuleObjectKey::Status(StatusKind::MushroomPizza));
            let state = trigger_rule_object(state, &id, TriggeringSignal::EndRoundCheckOut).unwrap();

            let queued: Vec<&Effect> = state.effect_stack.iter_top_down().collect();
            assert_eq!(queued.len(), 2);
            assert_eq!(queued[0].name(), "RecoverHPEffect");
            assert_eq!(
                queued[1],
                &Effect::Lifecycle(LifecycleEffect::UpdateCharacterStatus {
                    target: p1(1),
                    status: Status::from(MushroomPizzaStatus { duration: -1 }),
                })
            );
        }

        #[test]
        fn damaging_reaction_appends_checks() {
            let state = duel().map_player(PlayerId::P1, |p| {
                let summons = p.summons.clone().with_added(Summon::from(BurningFlameSummon::default()));
                p.with_summons(summons)
            });
            let id = RuleObjectId::new(
                StaticTarget::summons(PlayerId::P1),
                RuleObjectKey::Summon(SummonKind::BurningFlame),
            );
            let state = trigger_rule_object(state, &id, TriggeringSignal::EndRoundCheckOut).unwrap();
            let names: Vec<&str> = state.effect_stack.iter_top_down().map(Effect::name).collect();
            assert_eq!(
                names,
                vec![
                    "ReferredDamageEffect",
                    "RemoveSummonEffect",
                    "SwapCharacterCheckerEffect",
                    "AliveMarkCheckerEffect",
                    "DeathCheckCheckerEffect",
                ]
            );
        }

        #[test]
        fn missing_object_trigger_is_noop() {
            let id = RuleObjectId::new(p1(1), RuleObjectKey::Status(StatusKind::Frozen));
            let state = duel();
            assert_eq!(
                trigger_rule_object(state.clone(), &id, TriggeringSignal::RoundEnd),
                Ok(state)
            );
        }

        #[test]
        fn broadcast_to_a_mismatched_zone_is_fatal() {
            let misfiled = RuleObjectId::new(
                StaticTarget::summons(PlayerId::P1),
                RuleObjectKey::Status(StatusKind::Frozen),
            );
            assert!(matches!(
                trigger_effects_for(&duel(), vec![misfiled], TriggeringSignal::RoundEnd),
                Err(EngineError::WrongZone { .. })
            ));
            assert_eq!(
                trigger_effects_for(&populated(), Vec::new(), TriggeringSignal::RoundEnd),
                Ok(Vec::new())
            );
        }

        #[test]
        fn mismatched_zone_is_rejected() {
            let id = RuleObjectId::new(
                StaticTarget::summons(PlayerId::P1),
                RuleObjectKey::Status(StatusKind::Frozen),
            );
            assert!(matches!(remove_effect(&id), Err(EngineError::WrongZone { .. })));
        }
    }
}
