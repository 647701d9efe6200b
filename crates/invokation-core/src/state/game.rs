//! The whole-game snapshot.

use serde::{Deserialize, Serialize};

use crate::effect::{Effect, EffectStack};
use crate::status::{AnyRuleObject, RuleObjectId, RuleObjectKey};
use crate::target::{PlayerId, StaticTarget, Zone};

use super::{Character, PlayerAct, PlayerState};

/// The overall phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Choosing starting cards
    CardSelect,
    /// Rolling and rerolling dice
    RollPhase,
    /// Players take turns acting
    Action,
    /// End-of-round settlement
    End,
    /// A player has no alive character left
    GameEnd,
}

/// An immutable game snapshot.
///
/// Every effect consumes a snapshot and returns the next one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Round number, starting at 1
    pub round: u32,
    /// Current phase
    pub phase: Phase,
    /// Player whose turn it is
    pub active_player: PlayerId,
    /// Pending effects
    pub effect_stack: EffectStack,
    /// First player
    pub player1: PlayerState,
    /// Second player
    pub player2: PlayerState,
}

impl GameState {
    /// Creates a round-one action-phase state with `P1` to act.
    #[must_use]
    pub fn new(player1: PlayerState, player2: PlayerState) -> Self {
        Self {
            round: 1,
            phase: Phase::Action,
            active_player: PlayerId::P1,
            effect_stack: EffectStack::new(),
            player1: player1.with_act(PlayerAct::ActionPhase),
            player2: player2.with_act(PlayerAct::PassiveWaitPhase),
        }
    }

    // -------------------------------------------------------------------------
    // Players
    // -------------------------------------------------------------------------

    /// The state of player `pid`.
    #[must_use]
    pub const fn player(&self, pid: PlayerId) -> &PlayerState {
        match pid {
            PlayerId::P1 => &self.player1,
            PlayerId::P2 => &self.player2,
        }
    }

    /// Returns the state with player `pid` replaced.
    #[must_use]
    pub fn with_player(mut self, pid: PlayerId, player: PlayerState) -> Self {
        match pid {
            PlayerId::P1 => self.player1 = player,
            PlayerId::P2 => self.player2 = player,
        }
        self
    }

    /// Returns the state with player `pid` transformed by `f`.
    #[must_use]
    pub fn map_player(self, pid: PlayerId, f: impl FnOnce(PlayerState) -> PlayerState) -> Self {
        let player = f(self.player(pid).clone());
        self.with_player(pid, player)
    }

    /// Returns the state with a different phase.
    #[must_use]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Returns the state with a different round number.
    #[must_use]
    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    /// Returns the state with a different acting player.
    #[must_use]
    pub fn with_active_player(mut self, pid: PlayerId) -> Self {
        self.active_player = pid;
        self
    }

    // -------------------------------------------------------------------------
    // Characters
    // -------------------------------------------------------------------------

    /// The character `target` addresses.
    ///
    /// `None` if the target is not a character or the slot is empty.
    #[must_use]
    pub fn character(&self, target: StaticTarget) -> Option<&Character> {
        if target.zone != Zone::Characters {
            return None;
        }
        self.player(target.pid).characters.get(target.id)
    }

    /// The active character of player `pid`.
    #[must_use]
    pub fn active_character(&self, pid: PlayerId) -> Option<&Character> {
        self.player(pid).characters.active()
    }

    /// Address of the active character of player `pid`.
    #[must_use]
    pub fn active_target(&self, pid: PlayerId) -> Option<StaticTarget> {
        self.player(pid)
            .characters
            .active_id()
            .map(|id| StaticTarget::character(pid, id))
    }

    /// Returns the state with the character at `target` transformed by `f`.
    ///
    /// No-op if there is no such character.
    #[must_use]
    pub fn map_character(self, target: StaticTarget, f: impl FnOnce(Character) -> Character) -> Self {
        let Some(character) = self.character(target).cloned() else {
            return self;
        };
        let updated = f(character);
        self.map_player(target.pid, |player| player.with_character(updated))
    }

    // -------------------------------------------------------------------------
    // Rule-objects
    // -------------------------------------------------------------------------

    /// A copy of the rule-object at `id`, if it still exists.
    #[must_use]
    pub fn rule_object(&self, id: &RuleObjectId) -> Option<AnyRuleObject> {
        let player = self.player(id.owner.pid);
        match (id.owner.zone, id.key) {
            (Zone::Characters, RuleObjectKey::Status(kind)) => self
                .character(id.owner)
                .and_then(|c| c.find_status(kind))
                .map(|(_, status)| AnyRuleObject::Status(status.clone())),
            (Zone::CombatStatuses, RuleObjectKey::Status(kind)) => player
                .combat_statuses
                .get(kind)
                .map(|status| AnyRuleObject::Status(status.clone())),
            (Zone::Summons, RuleObjectKey::Summon(kind)) => player
                .summons
                .get(kind)
                .map(|summon| AnyRuleObject::Summon(summon.clone())),
            (Zone::Supports, RuleObjectKey::Support) => player
                .supports
                .get(id.owner.id)
                .map(|support| AnyRuleObject::Support(support.clone())),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Effect stack
    // -------------------------------------------------------------------------

    /// Returns the state with the effect stack replaced.
    #[must_use]
    pub fn with_effect_stack(mut self, effect_stack: EffectStack) -> Self {
        self.effect_stack = effect_stack;
        self
    }

    /// Pushes one effect on top of the stack.
    #[must_use]
    pub fn push_one(mut self, effect: Effect) -> Self {
        self.effect_stack = self.effect_stack.push_one(effect);
        self
    }

    /// Pushes effects so that they execute in the given order.
    #[must_use]
    pub fn push_many_first_to_last(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effect_stack = self.effect_stack.push_many_first_to_last(effects);
        self
    }

    /// Pushes effects so that the last one given ends up on top.
    #[must_use]
    pub fn push_many_last_to_first(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effect_stack = self.effect_stack.push_many_last_to_first(effects);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{FrozenStatus, Status, StatusKind};
    use crate::tests::helpers::{add_character_status, duel, p1};

    #[test]
    fn new_state_starts_with_p1_acting() {
        let state = duel();
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, Phase::Action);
        assert_eq!(state.player1.act, PlayerAct::ActionPhase);
        assert_eq!(state.player2.act, PlayerAct::PassiveWaitPhase);
        assert!(state.effect_stack.is_empty());
    }

    #[test]
    fn character_lookup_checks_the_zone() {
        let state = duel();
        assert!(state.character(p1(2)).is_some());
        assert!(state.character(p1(7)).is_none());
        assert!(state.character(StaticTarget::summons(PlayerId::P1)).is_none());
        assert_eq!(state.active_target(PlayerId::P2), Some(StaticTarget::character(PlayerId::P2, 1)));
    }

    #[test]
    fn mapping_a_missing_character_is_noop() {
        let state = duel();
        let mapped = state.clone().map_character(p1(9), |c| c.with_hp(1));
        assert_eq!(mapped, state);
    }

    #[test]
    fn rule_object_lookup_by_id() {
        let state = add_character_status(duel(), p1(1), Status::from(FrozenStatus::default()));
        let frozen = RuleObjectId::new(p1(1), RuleObjectKey::Status(StatusKind::Frozen));
        assert!(matches!(state.rule_object(&frozen), Some(AnyRuleObject::Status(_))));

        let misplaced = RuleObjectId::new(
            StaticTarget::summons(PlayerId::P1),
            RuleObjectKey::Status(StatusKind::Frozen),
        );
        assert!(state.rule_object(&misplaced).is_none());
    }
}
