//! Per-player state.

use serde::{Deserialize, Serialize};

use crate::dice::Dice;

use super::{Character, Characters, Statuses, Summons, Supports};

/// What a player is currently doing within the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAct {
    /// The player may act
    ActionPhase,
    /// The player waits for the opponent
    PassiveWaitPhase,
    /// The player has ended their round
    EndPhase,
}

/// Everything one player owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current act
    pub act: PlayerAct,
    /// Character zone
    pub characters: Characters,
    /// Combat statuses
    pub combat_statuses: Statuses,
    /// Summons
    pub summons: Summons,
    /// Supports
    pub supports: Supports,
    /// Dice pool
    pub dice: Dice,
}

impl PlayerState {
    /// Creates a player with the given characters and nothing else.
    #[must_use]
    pub fn new(characters: Characters) -> Self {
        Self {
            act: PlayerAct::PassiveWaitPhase,
            characters,
            combat_statuses: Statuses::new(),
            summons: Summons::new(),
            supports: Supports::new(),
            dice: Dice::new(),
        }
    }

    /// Returns the player with a different act.
    #[must_use]
    pub fn with_act(mut self, act: PlayerAct) -> Self {
        self.act = act;
        self
    }

    /// Returns the player with the character zone replaced.
    #[must_use]
    pub fn with_characters(mut self, characters: Characters) -> Self {
        self.characters = characters;
        self
    }

    /// Returns the player with one character replaced by id.
    #[must_use]
    pub fn with_character(mut self, character: Character) -> Self {
        self.characters = self.characters.with_character(character);
        self
    }

    /// Returns the player with the combat statuses replaced.
    #[must_use]
    pub fn with_combat_statuses(mut self, combat_statuses: Statuses) -> Self {
        self.combat_statuses = combat_statuses;
        self
    }

    /// Returns the player with the summons replaced.
    #[must_use]
    pub fn with_summons(mut self, summons: Summons) -> Self {
        self.summons = summons;
        self
    }

    /// Returns the player with the supports replaced.
    #[must_use]
    pub fn with_supports(mut self, supports: Supports) -> Self {
        self.supports = supports;
        self
    }

    /// Returns the player with the dice pool replaced.
    #[must_use]
    pub fn with_dice(mut self, dice: Dice) -> Self {
        self.dice = dice;
        self
    }
}
