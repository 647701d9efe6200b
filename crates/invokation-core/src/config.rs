//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Settings for an [`Engine`](crate::engine::Engine).
///
/// # Example
///
/// ```
/// use invokation_core::config::EngineConfig;
///
/// let config = EngineConfig::default().with_seed(7).with_max_steps_per_drain(500);
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.dice_per_roll, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed of the engine's RNG
    pub seed: u64,
    /// Effects one `drain` may execute before giving up
    pub max_steps_per_drain: usize,
    /// Dice rolled at the start of a round
    pub dice_per_roll: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_steps_per_drain: 10_000,
            dice_per_roll: 8,
        }
    }
}

impl EngineConfig {
    /// Returns the config with a different seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the config with a different step limit.
    #[must_use]
    pub const fn with_max_steps_per_drain(mut self, max_steps_per_drain: usize) -> Self {
        self.max_steps_per_drain = max_steps_per_drain;
        self
    }

    /// Returns the config with a different roll size.
    #[must_use]
    pub const fn with_dice_per_roll(mut self, dice_per_roll: u32) -> Self {
        self.dice_per_roll = dice_per_roll;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_roundtrip() {
        let config = EngineConfig::default().with_seed(99).with_dice_per_roll(4);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
