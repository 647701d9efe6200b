//! Immutable game state.
//!
//! The state is a plain value tree:
//!
//! ```text
//! GameState
//! ├── effect_stack
//! ├── player1 / player2: PlayerState
//! │   ├── characters: Characters
//! │   │   └── Character (talents, equipments, statuses)
//! │   ├── combat_statuses
//! │   ├── summons
//! │   ├── supports (slot-id keyed)
//! │   └── dice
//! ```
//!
//! Nothing is mutated in place. Every update goes through a by-value
//! `with_*` / `map_*` builder that consumes the old value and returns the new
//! one, so the execution loop always owns exactly one snapshot.

mod character;
mod game;
mod player;
mod zone;

pub use character::{Character, Characters, SkillSpec, SkillType};
pub use game::{GameState, Phase};
pub use player::{PlayerAct, PlayerState};
pub use zone::{RuleObjects, Supports};

use crate::status::Status;
use crate::summon::Summon;

/// Character-scoped or combat statuses.
pub type Statuses = RuleObjects<Status>;

/// A player's summons.
pub type Summons = RuleObjects<Summon>;
