//! The driver loop.
//!
//! [`Engine`] is the only place effects are executed. Each micro-step pops
//! the top effect and executes it against the current snapshot:
//!
//! 1. **POP**: take the top effect off the stack
//! 2. **EXECUTE**: run it, producing the next snapshot (and maybe pushing
//!    follow-up effects)
//!
//! [`Engine::drain`] repeats this until the stack is empty, the top effect is
//! the death-swap sentinel, or the game has ended.
//!
//! # Determinism
//!
//! The engine owns a [`ChaCha8Rng`] seeded from [`EngineConfig::seed`]. Given
//! the same seed, the same starting state and the same submitted actions, it
//! produces bit-identical states.
//!
//! # Example
//!
//! ```
//! use invokation_core::config::EngineConfig;
//! use invokation_core::effect::Effect;
//! use invokation_core::engine::Engine;
//! use invokation_core::state::{Character, Characters, GameState, PlayerState};
//! use invokation_core::element::Element;
//! use invokation_core::target::{PlayerId, StaticTarget};
//!
//! let team = || {
//!     PlayerState::new(Characters::new(
//!         vec![Character::new(1, "A", Element::Pyro, 10, 2).with_hp(5)],
//!         Some(1),
//!     ))
//! };
//! let state = GameState::new(team(), team()).push_one(Effect::RecoverHp {
//!     target: StaticTarget::character(PlayerId::P1, 1),
//!     recovery: 3,
//! });
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! let state = engine.drain(state).unwrap();
//! assert_eq!(state.player1.characters.get(1).unwrap().hp, 8);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::effect::Effect;
use crate::error::{EngineError, Result};
use crate::state::{GameState, Phase};
use crate::target::{PlayerId, StaticTarget};

// =============================================================================
// Engine
// =============================================================================

/// Executes effects off a state's stack.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    rng: ChaCha8Rng,
    steps: u64,
}

impl Engine {
    /// Creates an engine with its RNG seeded from `config.seed`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            steps: 0,
        }
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Total number of effects executed so far.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Pops and executes the top effect.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyStack`] if nothing is pending, or the
    /// effect's own error.
    pub fn step(&mut self, state: GameState) -> Result<GameState> {
        let (state, effect) = Self::pop(state)?;
        self.execute(state, effect)
    }

    fn pop(mut state: GameState) -> Result<(GameState, Effect)> {
        let stack = std::mem::take(&mut state.effect_stack);
        let (stack, effect) = stack.pop()?;
        Ok((state.with_effect_stack(stack), effect))
    }

    fn execute(&mut self, state: GameState, effect: Effect) -> Result<GameState> {
        tracing::debug!(
            effect = effect.name(),
            depth = state.effect_stack.len(),
            "executing effect"
        );
        self.steps += 1;
        effect.execute(state, &mut self.rng)
    }

    /// Returns `true` if [`Engine::drain`] would execute another effect.
    #[must_use]
    pub fn can_continue(state: &GameState) -> bool {
        state.phase != Phase::GameEnd
            && state
                .effect_stack
                .peek()
                .is_ok_and(|effect| !effect.is_sentinel())
    }

    /// Executes effects until the stack is empty, a sentinel is on top, or
    /// the game has ended.
    ///
    /// # Errors
    ///
    /// Returns the first effect error, or [`EngineError::StepLimitExceeded`]
    /// if the cascade runs longer than the configured limit.
    pub fn drain(&mut self, state: GameState) -> Result<GameState> {
        self.drain_with(state, |_| {})
    }

    /// Like [`Engine::drain`], also returning the names of the executed
    /// effects in execution order.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::drain`].
    pub fn drain_logged(&mut self, state: GameState) -> Result<(GameState, Vec<&'static str>)> {
        let mut log = Vec::new();
        let state = self.drain_with(state, |effect| log.push(effect.name()))?;
        Ok((state, log))
    }

    fn drain_with(
        &mut self,
        state: GameState,
        mut on_step: impl FnMut(&Effect),
    ) -> Result<GameState> {
        let limit = self.config.max_steps_per_drain;
        let mut state = state;
        let mut executed = 0;
        while Self::can_continue(&state) {
            if executed >= limit {
                tracing::warn!(limit, "effect cascade did not settle");
                return Err(EngineError::StepLimitExceeded { limit });
            }
            let (next, effect) = Self::pop(state)?;
            on_step(&effect);
            state = self.execute(next, effect)?;
            executed += 1;
        }
        Ok(state)
    }

    // -------------------------------------------------------------------------
    // Death swap
    // -------------------------------------------------------------------------

    /// The player the stack is waiting on for a death swap, if any.
    #[must_use]
    pub fn awaiting_death_swap(state: &GameState) -> Option<PlayerId> {
        match state.effect_stack.peek() {
            Ok(Effect::DeathSwapPhaseStart { pid }) => Some(*pid),
            _ => None,
        }
    }

    /// Resolves a pending death swap: `pid` makes `char_id` active.
    ///
    /// Pops the sentinel and queues the swap followed by its swap-signal
    /// check; call [`Engine::drain`] to continue.
    ///
    /// # Errors
    ///
    /// Both errors leave nothing changed:
    /// - [`EngineError::NotAwaitingDeathSwap`] if no death swap is pending for
    ///   `pid`
    /// - [`EngineError::IllegalDeathSwapTarget`] if `char_id` is missing,
    ///   defeated, or already active
    pub fn submit_death_swap(
        &mut self,
        state: GameState,
        pid: PlayerId,
        char_id: u32,
    ) -> Result<GameState> {
        if Self::awaiting_death_swap(&state) != Some(pid) {
            return Err(EngineError::NotAwaitingDeathSwap { pid });
        }
        let target = StaticTarget::character(pid, char_id);
        let characters = &state.player(pid).characters;
        let legal = characters.active_id() != Some(char_id)
            && characters.get(char_id).is_some_and(|c| c.is_alive());
        if !legal {
            return Err(EngineError::IllegalDeathSwapTarget { target });
        }

        let checker = Effect::SwapCharacterChecker {
            p1_active: state.player1.characters.active_id(),
            p2_active: state.player2.characters.active_id(),
        };
        let (state, _sentinel) = Self::pop(state)?;
        tracing::debug!(%target, "death swap submitted");
        Ok(state.push_many_first_to_last([Effect::SwapCharacter { target }, checker]))
    }

    /// The effect rolling a fresh round of dice for `pid`.
    #[must_use]
    pub const fn roll_dice_effect(&self, pid: PlayerId) -> Effect {
        Effect::RollDice {
            pid,
            num: self.config.dice_per_roll,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlayerAct;
    use crate::tests::helpers::{duel, p2};

    fn paused_for(pid: PlayerId) -> GameState {
        duel().push_many_first_to_last([
            Effect::DeathSwapPhaseStart { pid },
            Effect::DeathSwapPhaseEnd {
                pid,
                p1_act: PlayerAct::ActionPhase,
                p2_act: PlayerAct::PassiveWaitPhase,
                active_player: PlayerId::P1,
            },
        ])
    }

    #[test]
    fn sentinel_stops_the_drain() {
        let state = paused_for(PlayerId::P2);
        assert!(!Engine::can_continue(&state));

        let mut engine = Engine::new(EngineConfig::default());
        let drained = engine.drain(state.clone()).unwrap();
        assert_eq!(drained, state);
        assert_eq!(Engine::awaiting_death_swap(&drained), Some(PlayerId::P2));
    }

    #[test]
    fn game_end_stops_the_drain() {
        let state = duel()
            .with_phase(Phase::GameEnd)
            .push_one(Effect::RollDice { pid: PlayerId::P1, num: 3 });
        assert!(!Engine::can_continue(&state));
    }

    #[test]
    fn submitted_swap_runs_before_phase_end() {
        let mut engine = Engine::new(EngineConfig::default());
        let state = engine.submit_death_swap(paused_for(PlayerId::P2), PlayerId::P2, 2).unwrap();
        let names: Vec<&str> = state.effect_stack.iter_top_down().map(Effect::name).collect();
        assert_eq!(
            names,
            vec!["SwapCharacterEffect", "SwapCharacterCheckerEffect", "DeathSwapPhaseEndEffect"]
        );

        let state = engine.drain(state).unwrap();
        assert_eq!(state.active_character(PlayerId::P2).map(|c| c.id), Some(2));
        assert_eq!(state.character(p2(2)).map(|c| c.hp), Some(10));
    }

    #[test]
    fn rejected_submission_changes_nothing() {
        let mut engine = Engine::new(EngineConfig::default());
        let state = paused_for(PlayerId::P2);
        assert!(engine.submit_death_swap(state.clone(), PlayerId::P2, 1).is_err());
        assert_eq!(Engine::awaiting_death_swap(&state), Some(PlayerId::P2));
        assert_eq!(engine.steps(), 0);
    }
}
