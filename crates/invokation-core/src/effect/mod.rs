//! Atomic state transitions.
//!
//! An [`Effect`] is an immutable value describing one transition. Executing
//! it consumes the current [`GameState`] and returns the next one; any
//! follow-up work is *pushed onto the returned state's stack*, never executed
//! in place. The driver loop in [`crate::engine`] is the only place effects
//! run, so the order in which they ran can always be read off the stack.
//!
//! # Architecture
//!
//! ```text
//! Effect
//! ├── damage     SpecificDamage, ReferredDamage, ApplyElementalAura
//! ├── character  RecoverHp, Energy*, *SwapCharacter, CastSkill
//! ├── lifecycle  Add / Remove / Update / Override of every rule-object zone
//! ├── checker    AliveMark, Defeated, DeathCheck, SwapCharacter checkers,
//! │              the death-swap sentinel pair
//! ├── trigger    AllStatus / PlayerStatus triggerers, per-object triggers
//! └── dice       AddDice, RemoveDice, RollDice
//! ```
//!
//! Effects address objects through [`StaticTarget`]s. An effect whose target
//! has disappeared resolves to a no-op; an effect whose target is malformed
//! fails with an [`EngineError`](crate::error::EngineError).

mod character;
mod checker;
mod damage;
mod dice;
mod lifecycle;
mod stack;
mod trigger;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::Result;
use crate::random::RandomSource;
use crate::signal::TriggeringSignal;
use crate::state::{GameState, PlayerAct, SkillType};
use crate::status::StatusKind;
use crate::summon::SummonKind;
use crate::target::{PlayerId, StaticTarget};

pub use crate::event::SpecificDamageEffect;
pub use damage::ReferredDamageEffect;
pub use lifecycle::LifecycleEffect;
pub use stack::EffectStack;

/// Every atomic state transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    // -------------------------------------------------------------------------
    // Damage
    // -------------------------------------------------------------------------
    /// Runs the damage pipeline against one character.
    SpecificDamage(SpecificDamageEffect),

    /// Resolves a dynamic selector into concrete damages.
    ReferredDamage(ReferredDamageEffect),

    /// Applies an element without damage, running reaction confirmation.
    ApplyElementalAura {
        /// Who applies the element
        source: StaticTarget,
        /// The affected character
        target: StaticTarget,
        /// The applied element
        element: Element,
    },

    // -------------------------------------------------------------------------
    // Character
    // -------------------------------------------------------------------------
    /// Heals a character, clamped to its max HP.
    RecoverHp {
        /// The healed character
        target: StaticTarget,
        /// HP to restore
        recovery: i32,
    },

    /// Adds energy, clamped to the character's max energy.
    EnergyRecharge {
        /// The recharged character
        target: StaticTarget,
        /// Energy to add
        amount: i32,
    },

    /// Removes energy, clamped at zero.
    EnergyDrain {
        /// The drained character
        target: StaticTarget,
        /// Energy to remove
        amount: i32,
    },

    /// Makes `target` its player's active character.
    SwapCharacter {
        /// The new active character
        target: StaticTarget,
    },

    /// Swaps to the next alive character in slot order, cycling.
    ForwardSwapCharacter {
        /// The swapping player
        target_player: PlayerId,
    },

    /// Swaps to the previous alive character in slot order, cycling.
    BackwardSwapCharacter {
        /// The swapping player
        target_player: PlayerId,
    },

    /// Casts a skill of a character.
    CastSkill {
        /// The caster
        target: StaticTarget,
        /// The skill
        skill: SkillType,
    },

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------
    /// Adds, removes, updates or overrides a rule-object.
    Lifecycle(LifecycleEffect),

    // -------------------------------------------------------------------------
    // Checkers
    // -------------------------------------------------------------------------
    /// Marks characters at zero HP as defeated and broadcasts `DEATH_EVENT`.
    AliveMarkChecker,

    /// Ends the game if a player has no character above zero HP.
    DefeatedChecker,

    /// Forces a death swap if exactly one active character is at zero HP.
    DeathCheckChecker,

    /// Broadcasts swap signals for every active character that changed.
    SwapCharacterChecker {
        /// `P1`'s active character before the swap window
        p1_active: Option<u32>,
        /// `P2`'s active character before the swap window
        p2_active: Option<u32>,
    },

    /// Sentinel blocking the stack until `pid` submits a death swap.
    DeathSwapPhaseStart {
        /// The player who must swap
        pid: PlayerId,
    },

    /// Restores the acts saved when the death swap was forced.
    DeathSwapPhaseEnd {
        /// The player who swapped
        pid: PlayerId,
        /// Saved act of `P1`
        p1_act: PlayerAct,
        /// Saved act of `P2`
        p2_act: PlayerAct,
        /// Saved acting player
        active_player: PlayerId,
    },

    // -------------------------------------------------------------------------
    // Triggers
    // -------------------------------------------------------------------------
    /// Broadcasts `signal` to both players, `pid` first.
    AllStatusTriggerer {
        /// The player visited first
        pid: PlayerId,
        /// The signal
        signal: TriggeringSignal,
    },

    /// Broadcasts `signal` to one player.
    PlayerStatusTriggerer {
        /// The player
        pid: PlayerId,
        /// The signal
        signal: TriggeringSignal,
    },

    /// Lets one character status react to `signal`.
    TriggerStatus {
        /// The owning character
        target: StaticTarget,
        /// The status
        kind: StatusKind,
        /// The signal
        signal: TriggeringSignal,
    },

    /// Lets one combat status react to `signal`.
    TriggerCombatStatus {
        /// The owning player
        target_player: PlayerId,
        /// The status
        kind: StatusKind,
        /// The signal
        signal: TriggeringSignal,
    },

    /// Lets one summon react to `signal`.
    TriggerSummon {
        /// The owning player
        target_player: PlayerId,
        /// The summon
        kind: SummonKind,
        /// The signal
        signal: TriggeringSignal,
    },

    /// Lets one support react to `signal`.
    TriggerSupport {
        /// The owning player
        target_player: PlayerId,
        /// The support slot
        sid: u32,
        /// The signal
        signal: TriggeringSignal,
    },

    // -------------------------------------------------------------------------
    // Dice
    // -------------------------------------------------------------------------
    /// Adds dice to a pool.
    AddDice {
        /// The receiving player
        pid: PlayerId,
        /// Die face
        element: Element,
        /// Number of dice
        num: u32,
    },

    /// Pays dice from a pool.
    RemoveDice {
        /// The paying player
        pid: PlayerId,
        /// Die face
        element: Element,
        /// Number of dice
        num: u32,
    },

    /// Rolls dice into a pool.
    RollDice {
        /// The rolling player
        pid: PlayerId,
        /// Number of dice
        num: u32,
    },
}

impl Effect {
    /// Consumes `state` and returns the state after this effect.
    ///
    /// # Errors
    ///
    /// Fails only on invariant violations: a malformed target, a skill the
    /// character cannot cast, a forced swap with no alive character, a
    /// sentinel executed directly, or a pool too small for [`Effect::RemoveDice`].
    pub fn execute(self, state: GameState, rng: &mut dyn RandomSource) -> Result<GameState> {
        match self {
            Self::SpecificDamage(dmg) => damage::specific_damage(state, dmg),
            Self::ReferredDamage(referred) => damage::referred_damage(state, referred),
            Self::ApplyElementalAura {
                source,
                target,
                element,
            } => damage::apply_elemental_aura(state, source, target, element),

            Self::RecoverHp { target, recovery } => character::recover_hp(state, target, recovery),
            Self::EnergyRecharge { target, amount } => {
                character::energy_recharge(state, target, amount)
            }
            Self::EnergyDrain { target, amount } => character::energy_drain(state, target, amount),
            Self::SwapCharacter { target } => character::swap_character(state, target),
            Self::ForwardSwapCharacter { target_player } => {
                character::cyclic_swap(state, target_player, false)
            }
            Self::BackwardSwapCharacter { target_player } => {
                character::cyclic_swap(state, target_player, true)
            }
            Self::CastSkill { target, skill } => character::cast_skill(state, target, skill),

            Self::Lifecycle(lifecycle) => lifecycle.execute(state),

            Self::AliveMarkChecker => checker::alive_mark(state),
            Self::DefeatedChecker => Ok(checker::defeated(state)),
            Self::DeathCheckChecker => Ok(checker::death_check(state)),
            Self::SwapCharacterChecker {
                p1_active,
                p2_active,
            } => Ok(checker::swap_character_check(state, p1_active, p2_active)),
            Self::DeathSwapPhaseStart { .. } => checker::death_swap_phase_start(),
            Self::DeathSwapPhaseEnd {
                pid,
                p1_act,
                p2_act,
                active_player,
            } => Ok(checker::death_swap_phase_end(
                state,
                pid,
                p1_act,
                p2_act,
                active_player,
            )),

            Self::AllStatusTriggerer { pid, signal } => trigger::all_status(state, pid, signal),
            Self::PlayerStatusTriggerer { pid, signal } => {
                trigger::player_status(state, pid, signal)
            }
            Self::TriggerStatus {
                target,
                kind,
                signal,
            } => trigger::character_status(state, target, kind, signal),
            Self::TriggerCombatStatus {
                target_player,
                kind,
                signal,
            } => trigger::combat_status(state, target_player, kind, signal),
            Self::TriggerSummon {
                target_player,
                kind,
                signal,
            } => trigger::summon(state, target_player, kind, signal),
            Self::TriggerSupport {
                target_player,
                sid,
                signal,
            } => trigger::support(state, target_player, sid, signal),

            Self::AddDice { pid, element, num } => Ok(dice::add_dice(state, pid, element, num)),
            Self::RemoveDice { pid, element, num } => dice::remove_dice(state, pid, element, num),
            Self::RollDice { pid, num } => Ok(dice::roll_dice(state, pid, num, rng)),
        }
    }

    /// The effect's name, as used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SpecificDamage(_) => "SpecificDamageEffect",
            Self::ReferredDamage(_) => "ReferredDamageEffect",
            Self::ApplyElementalAura { .. } => "ApplyElementalAuraEffect",
            Self::RecoverHp { .. } => "RecoverHPEffect",
            Self::EnergyRecharge { .. } => "EnergyRechargeEffect",
            Self::EnergyDrain { .. } => "EnergyDrainEffect",
            Self::SwapCharacter { .. } => "SwapCharacterEffect",
            Self::ForwardSwapCharacter { .. } => "ForwardSwapCharacterEffect",
            Self::BackwardSwapCharacter { .. } => "BackwardSwapCharacterEffect",
            Self::CastSkill { .. } => "CastSkillEffect",
            Self::Lifecycle(lifecycle) => lifecycle.name(),
            Self::AliveMarkChecker => "AliveMarkCheckerEffect",
            Self::DefeatedChecker => "DefeatedCheckerEffect",
            Self::DeathCheckChecker => "DeathCheckCheckerEffect",
            Self::SwapCharacterChecker { .. } => "SwapCharacterCheckerEffect",
            Self::DeathSwapPhaseStart { .. } => "DeathSwapPhaseStartEffect",
            Self::DeathSwapPhaseEnd { .. } => "DeathSwapPhaseEndEffect",
            Self::AllStatusTriggerer { .. } => "AllStatusTriggererEffect",
            Self::PlayerStatusTriggerer { .. } => "PlayerStatusTriggererEffect",
            Self::TriggerStatus { .. } => "TriggerStatusEffect",
            Self::TriggerCombatStatus { .. } => "TriggerCombatStatusEffect",
            Self::TriggerSummon { .. } => "TriggerSummonEffect",
            Self::TriggerSupport { .. } => "TriggerSupportEffect",
            Self::AddDice { .. } => "AddDiceEffect",
            Self::RemoveDice { .. } => "RemoveDiceEffect",
            Self::RollDice { .. } => "RollDiceEffect",
        }
    }

    /// Returns `true` for effects the driver must stop in front of.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::DeathSwapPhaseStart { .. })
    }

    /// Returns `true` for effects after which deaths and swaps must be
    /// checked.
    #[must_use]
    pub const fn is_damage_or_swap(&self) -> bool {
        matches!(
            self,
            Self::SpecificDamage(_)
                | Self::ReferredDamage(_)
                | Self::SwapCharacter { .. }
                | Self::ForwardSwapCharacter { .. }
                | Self::BackwardSwapCharacter { .. }
        )
    }
}

impl From<LifecycleEffect> for Effect {
    fn from(lifecycle: LifecycleEffect) -> Self {
        Self::Lifecycle(lifecycle)
    }
}

impl From<SpecificDamageEffect> for Effect {
    fn from(dmg: SpecificDamageEffect) -> Self {
        Self::SpecificDamage(dmg)
    }
}

impl From<ReferredDamageEffect> for Effect {
    fn from(referred: ReferredDamageEffect) -> Self {
        Self::ReferredDamage(referred)
    }
}
