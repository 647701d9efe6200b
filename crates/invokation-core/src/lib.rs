//! # Invokation Core
//!
//! Deterministic effect-resolution engine for a two-player elemental card
//! game.
//!
//! Every game action becomes a sequence of atomic [`Effect`]s on a LIFO
//! stack. The [`Engine`] pops and executes them one at a time against an
//! immutable [`GameState`]; each execution returns the next snapshot and may
//! push more effects. Statuses, summons and supports take part through the
//! rule-object protocol in [`status`]: they rewrite pending events
//! (preprocess), react to broadcast signals, and observe notifications
//! (inform).
//!
//! ## Architecture
//!
//! - **State**: [`state`] holds immutable snapshots of both players
//! - **Effects**: [`effect`] holds the transitions and the effect stack
//! - **Rule objects**: [`status`], [`summon`], [`support`] hold the closed
//!   catalogues of persistent objects
//! - **Broadcaster**: [`processing`] walks rule objects in canonical order and
//!   writes their updates back
//! - **Driver**: [`engine`] runs the stack until it settles
//!
//! ## Usage
//!
//! ```
//! use invokation_core::prelude::*;
//!
//! let team = || {
//!     let fighter = Character::new(1, "Fighter", Element::Pyro, 10, 2).with_skill(
//!         SkillSpec::new(SkillType::NormalAttack, Element::Physical, 2, Dice::new()),
//!     );
//!     PlayerState::new(Characters::new(vec![fighter], Some(1)))
//! };
//! let state = GameState::new(team(), team()).push_one(Effect::CastSkill {
//!     target: StaticTarget::character(PlayerId::P1, 1),
//!     skill: SkillType::NormalAttack,
//! });
//!
//! let mut engine = Engine::new(EngineConfig::default().with_seed(42));
//! let state = engine.drain(state).unwrap();
//! assert_eq!(state.player2.characters.get(1).unwrap().hp, 8);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod dice;
pub mod effect;
pub mod element;
pub mod engine;
pub mod error;
pub mod event;
pub mod processing;
pub mod random;
pub mod signal;
pub mod state;
pub mod status;
pub mod summon;
pub mod support;
pub mod target;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use effect::{Effect, EffectStack};
pub use engine::Engine;
pub use error::{EngineError, ErrorSeverity, Result};
pub use state::GameState;

/// The types most callers need.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::dice::Dice;
    pub use crate::effect::{Effect, EffectStack};
    pub use crate::element::{Element, ElementalAura, Reaction};
    pub use crate::engine::Engine;
    pub use crate::error::{EngineError, Result};
    pub use crate::signal::TriggeringSignal;
    pub use crate::state::{Character, Characters, GameState, Phase, PlayerState, SkillSpec, SkillType};
    pub use crate::target::{PlayerId, StaticTarget};
}
