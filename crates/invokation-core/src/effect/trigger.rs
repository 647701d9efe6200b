//! Signal broadcasts and per-object triggers.

use crate::error::{EngineError, Result};
use crate::processing;
use crate::signal::TriggeringSignal;
use crate::state::GameState;
use crate::status::{RuleObjectId, RuleObjectKey, StatusKind};
use crate::summon::SummonKind;
use crate::target::{PlayerId, StaticTarget, Zone};

pub(super) fn all_status(
    state: GameState,
    pid: PlayerId,
    signal: TriggeringSignal,
) -> Result<GameState> {
    let effects = processing::trigger_effects(&state, pid, signal)?;
    tracing::trace!(%pid, %signal, triggered = effects.len(), "broadcast to both players");
    Ok(state.push_many_first_to_last(effects))
}

pub(super) fn player_status(
    state: GameState,
    pid: PlayerId,
    signal: TriggeringSignal,
) -> Result<GameState> {
    let effects = processing::player_trigger_effects(&state, pid, signal)?;
    tracing::trace!(%pid, %signal, triggered = effects.len(), "broadcast to one player");
    Ok(state.push_many_first_to_last(effects))
}

pub(super) fn character_status(
    state: GameState,
    target: StaticTarget,
    kind: StatusKind,
    signal: TriggeringSignal,
) -> Result<GameState> {
    EngineError::expect_zone(target, Zone::Characters)?;
    let id = RuleObjectId::new(target, RuleObjectKey::Status(kind));
    processing::trigger_rule_object(state, &id, signal)
}

pub(super) fn combat_status(
    state: GameState,
    pid: PlayerId,
    kind: StatusKind,
    signal: TriggeringSignal,
) -> Result<GameState> {
    let id = RuleObjectId::new(StaticTarget::combat_statuses(pid), RuleObjectKey::Status(kind));
    processing::trigger_rule_object(state, &id, signal)
}

pub(super) fn summon(
    state: GameState,
    pid: PlayerId,
    kind: SummonKind,
    signal: TriggeringSignal,
) -> Result<GameState> {
    let id = RuleObjectId::new(StaticTarget::summons(pid), RuleObjectKey::Summon(kind));
    processing::trigger_rule_object(state, &id, signal)
}

pub(super) fn support(
    state: GameState,
    pid: PlayerId,
    sid: u32,
    signal: TriggeringSignal,
) -> Result<GameState> {
    let id = RuleObjectId::new(StaticTarget::support(pid, sid), RuleObjectKey::Support);
    processing::trigger_rule_object(state, &id, signal)
}
