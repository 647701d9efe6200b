//! The four lifecycle operations for every rule-object zone.
//!
//! | operation | missing object | present object                  |
//! |-----------|----------------|---------------------------------|
//! | Add       | insert fresh   | merge via `update`              |
//! | Remove    | no-op          | delete                          |
//! | Update    | no-op          | merge via `update`              |
//! | Override  | insert         | replace, ignoring merge rules   |
//!
//! Supports never merge on add; each add takes a new slot.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::state::{Character, GameState};
use crate::status::{Status, StatusKind};
use crate::summon::{Summon, SummonKind};
use crate::support::Support;
use crate::target::{PlayerId, StaticTarget, Zone};

/// A lifecycle operation on one rule-object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum LifecycleEffect {
    AddCharacterStatus { target: StaticTarget, status: Status },
    RemoveCharacterStatus { target: StaticTarget, kind: StatusKind },
    UpdateCharacterStatus { target: StaticTarget, status: Status },
    OverrideCharacterStatus { target: StaticTarget, status: Status },

    AddCombatStatus { target_player: PlayerId, status: Status },
    RemoveCombatStatus { target_player: PlayerId, kind: StatusKind },
    UpdateCombatStatus { target_player: PlayerId, status: Status },
    OverrideCombatStatus { target_player: PlayerId, status: Status },

    AddSummon { target_player: PlayerId, summon: Summon },
    RemoveSummon { target_player: PlayerId, kind: SummonKind },
    UpdateSummon { target_player: PlayerId, summon: Summon },
    OverrideSummon { target_player: PlayerId, summon: Summon },

    AddSupport { target_player: PlayerId, support: Support },
    RemoveSupport { target_player: PlayerId, sid: u32 },
    UpdateSupport { target_player: PlayerId, sid: u32, support: Support },
    OverrideSupport { target_player: PlayerId, sid: u32, support: Support },
}

impl LifecycleEffect {
    /// Applies the operation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WrongZone`] if a character operation is given a
    /// target outside the character zone.
    pub fn execute(self, state: GameState) -> Result<GameState> {
        tracing::trace!(effect = self.name(), "lifecycle");
        match self {
            Self::AddCharacterStatus { target, status } => {
                EngineError::expect_zone(target, Zone::Characters)?;
                Ok(map_live_character(state, target, |c| c.with_status_added(status)))
            }
            Self::RemoveCharacterStatus { target, kind } => {
                EngineError::expect_zone(target, Zone::Characters)?;
                Ok(state.map_character(target, |c| {
                    let Some(slot) = c.find_status(kind).map(|(slot, _)| slot) else {
                        return c;
                    };
                    let statuses = c.slot(slot).clone().with_removed(kind);
                    c.with_slot(slot, statuses)
                }))
            }
            Self::UpdateCharacterStatus { target, status } => {
                EngineError::expect_zone(target, Zone::Characters)?;
                Ok(map_live_character(state, target, |c| {
                    let slot = status.character_slot();
                    let statuses = c.slot(slot).clone().with_updated(status);
                    c.with_slot(slot, statuses)
                }))
            }
            Self::OverrideCharacterStatus { target, status } => {
                EngineError::expect_zone(target, Zone::Characters)?;
                Ok(map_live_character(state, target, |c| {
                    let slot = status.character_slot();
                    let statuses = c.slot(slot).clone().with_overridden(status);
                    c.with_slot(slot, statuses)
                }))
            }

            Self::AddCombatStatus {
                target_player,
                status,
            } => Ok(state.map_player(target_player, |p| {
                let statuses = p.combat_statuses.clone().with_added(status);
                p.with_combat_statuses(statuses)
            })),
            Self::RemoveCombatStatus {
                target_player,
                kind,
            } => Ok(state.map_player(target_player, |p| {
                let statuses = p.combat_statuses.clone().with_removed(kind);
                p.with_combat_statuses(statuses)
            })),
            Self::UpdateCombatStatus {
                target_player,
                status,
            } => Ok(state.map_player(target_player, |p| {
                let statuses = p.combat_statuses.clone().with_updated(status);
                p.with_combat_statuses(statuses)
            })),
            Self::OverrideCombatStatus {
                target_player,
                status,
            } => Ok(state.map_player(target_player, |p| {
                let statuses = p.combat_statuses.clone().with_overridden(status);
                p.with_combat_statuses(statuses)
            })),

            Self::AddSummon {
                target_player,
                summon,
            } => Ok(state.map_player(target_player, |p| {
                let summons = p.summons.clone().with_added(summon);
                p.with_summons(summons)
            })),
            Self::RemoveSummon {
                target_player,
                kind,
            } => Ok(state.map_player(target_player, |p| {
                let summons = p.summons.clone().with_removed(kind);
                p.with_summons(summons)
            })),
            Self::UpdateSummon {
                target_player,
                summon,
            } => Ok(state.map_player(target_player, |p| {
                let summons = p.summons.clone().with_updated(summon);
                p.with_summons(summons)
            })),
            Self::OverrideSummon {
                target_player,
                summon,
            } => Ok(state.map_player(target_player, |p| {
                let summons = p.summons.clone().with_overridden(summon);
                p.with_summons(summons)
            })),

            Self::AddSupport {
                target_player,
                support,
            } => Ok(state.map_player(target_player, |p| {
                let (supports, sid) = p.supports.clone().with_added(support);
                tracing::debug!(pid = %target_player, sid, "support placed");
                p.with_supports(supports)
            })),
            Self::RemoveSupport { target_player, sid } => {
                Ok(state.map_player(target_player, |p| {
                    let supports = p.supports.clone().with_removed(sid);
                    p.with_supports(supports)
                }))
            }
            Self::UpdateSupport {
                target_player,
                sid,
                support,
            } => Ok(state.map_player(target_player, |p| {
                let supports = p.supports.clone().with_updated(sid, &support);
                p.with_supports(supports)
            })),
            Self::OverrideSupport {
                target_player,
                sid,
                support,
            } => Ok(state.map_player(target_player, |p| {
                let supports = p.supports.clone().with_overridden(sid, support);
                p.with_supports(supports)
            })),
        }
    }

    /// The operation's name, as used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddCharacterStatus { .. } => "AddCharacterStatusEffect",
            Self::RemoveCharacterStatus { .. } => "RemoveCharacterStatusEffect",
            Self::UpdateCharacterStatus { .. } => "UpdateCharacterStatusEffect",
            Self::OverrideCharacterStatus { .. } => "OverrideCharacterStatusEffect",
            Self::AddCombatStatus { .. } => "AddCombatStatusEffect",
            Self::RemoveCombatStatus { .. } => "RemoveCombatStatusEffect",
            Self::UpdateCombatStatus { .. } => "UpdateCombatStatusEffect",
            Self::OverrideCombatStatus { .. } => "OverrideCombatStatusEffect",
            Self::AddSummon { .. } => "AddSummonEffect",
            Self::RemoveSummon { .. } => "RemoveSummonEffect",
            Self::UpdateSummon { .. } => "UpdateSummonEffect",
            Self::OverrideSummon { .. } => "OverrideSummonEffect",
            Self::AddSupport { .. } => "AddSupportEffect",
            Self::RemoveSupport { .. } => "RemoveSupportEffect",
            Self::UpdateSupport { .. } => "UpdateSupportEffect",
            Self::OverrideSupport { .. } => "OverrideSupportEffect",
        }
    }
}

/// Like [`GameState::map_character`], but skips defeated characters.
fn map_live_character(
    state: GameState,
    target: StaticTarget,
    f: impl FnOnce(Character) -> Character,
) -> GameState {
    if state.character(target).is_some_and(|c| c.alive) {
        state.map_character(target, f)
    } else {
        tracing::trace!(%target, "character gone, lifecycle skipped");
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{CatalyzingFieldStatus, FrozenStatus, Kinded, RuleObject};
    use crate::support::PaimonSupport;
    use crate::tests::helpers::duel;

    #[test]
    fn add_to_missing_character_is_noop() {
        let state = duel();
        let effect = LifecycleEffect::AddCharacterStatus {
            target: StaticTarget::character(PlayerId::P1, 99),
            status: Status::from(FrozenStatus::default()),
        };
        assert_eq!(effect.execute(state.clone()), Ok(state));
    }

    #[test]
    fn character_op_rejects_wrong_zone() {
        let effect = LifecycleEffect::RemoveCharacterStatus {
            target: StaticTarget::summons(PlayerId::P1),
            kind: StatusKind::Frozen,
        };
        assert!(matches!(
            effect.execute(duel()),
            Err(EngineError::WrongZone { .. })
        ));
    }

    #[test]
    fn add_then_remove_character_status() {
        let target = StaticTarget::character(PlayerId::P2, 1);
        let state = LifecycleEffect::AddCharacterStatus {
            target,
            status: Status::from(FrozenStatus::default()),
        }
        .execute(duel())
        .unwrap();
        assert!(state.character(target).unwrap().find_status(StatusKind::Frozen).is_some());

        let state = LifecycleEffect::RemoveCharacterStatus {
            target,
            kind: StatusKind::Frozen,
        }
        .execute(state)
        .unwrap();
        assert!(state.character(target).unwrap().status_kinds().is_empty());
    }

    #[test]
    fn update_combat_status_applies_delta() {
        let state = LifecycleEffect::AddCombatStatus {
            target_player: PlayerId::P1,
            status: Status::from(CatalyzingFieldStatus::default()),
        }
        .execute(duel())
        .unwrap();
        let state = LifecycleEffect::UpdateCombatStatus {
            target_player: PlayerId::P1,
            status: Status::from(CatalyzingFieldStatus { usages: -1 }),
        }
        .execute(state)
        .unwrap();
        let field = state.player1.combat_statuses.get(StatusKind::CatalyzingField).unwrap();
        assert_eq!(field.counter(), 1);
        assert_eq!(field.kind(), StatusKind::CatalyzingField);
    }

    #[test]
    fn override_support_keeps_slot_id() {
        let state = LifecycleEffect::AddSupport {
            target_player: PlayerId::P2,
            support: Support::from(PaimonSupport::default()),
        }
        .execute(duel())
        .unwrap();
        let state = LifecycleEffect::OverrideSupport {
            target_player: PlayerId::P2,
            sid: 0,
            support: Support::from(PaimonSupport { usages: 1 }),
        }
        .execute(state)
        .unwrap();
        assert_eq!(state.player2.supports.sids(), vec![0]);
        assert_eq!(state.player2.supports.get(0).map(RuleObject::counter), Some(1));
    }
}
