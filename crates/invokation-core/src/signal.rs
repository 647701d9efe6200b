//! Broadcast signals and preprocessing stages.
//!
//! - [`TriggeringSignal`]: events rule-objects react to asynchronously
//! - [`Preprocessables`]: the stage a pending item is in when rule-objects
//!   intercept it synchronously

use std::fmt;

use serde::{Deserialize, Serialize};

/// Signals broadcast by the phase driver or by specific effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggeringSignal {
    /// A fast action (one that does not end the turn) was taken
    FastAction,
    /// A combat action (one that ends the turn) was taken
    CombatAction,
    /// One or more characters were defeated
    DeathEvent,
    /// The receiving player's own active character changed
    SelfSwap,
    /// The receiving player's opponent changed active character
    OppoSwap,
    /// A new round started
    RoundStart,
    /// End-of-round settlement tick
    EndRoundCheckOut,
    /// A skill finished dealing its damage
    PostDmg,
    /// Final cleanup pass of the round
    RoundEnd,
}

impl fmt::Display for TriggeringSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FastAction => "FAST_ACTION",
            Self::CombatAction => "COMBAT_ACTION",
            Self::DeathEvent => "DEATH_EVENT",
            Self::SelfSwap => "SELF_SWAP",
            Self::OppoSwap => "OPPO_SWAP",
            Self::RoundStart => "ROUND_START",
            Self::EndRoundCheckOut => "END_ROUND_CHECK_OUT",
            Self::PostDmg => "POST_DMG",
            Self::RoundEnd => "ROUND_END",
        };
        write!(f, "{name}")
    }
}

/// The stage of a pending item offered to `preprocess`.
///
/// The three damage stages always run in the order
/// `DmgElement -> DmgReaction -> DmgAmount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preprocessables {
    /// Dice cost of a skill
    Skill,
    /// Dice cost and speed of a character swap
    Swap,
    /// Element confirmation of a damage
    DmgElement,
    /// Reaction confirmation of a damage
    DmgReaction,
    /// Amount confirmation of a damage
    DmgAmount,
}

impl Preprocessables {
    /// The damage stages in resolution order.
    pub const DAMAGE_STAGES: [Self; 3] = [Self::DmgElement, Self::DmgReaction, Self::DmgAmount];
}

impl fmt::Display for Preprocessables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Skill => "SKILL",
            Self::Swap => "SWAP",
            Self::DmgElement => "DMG_ELEMENT",
            Self::DmgReaction => "DMG_REACTION",
            Self::DmgAmount => "DMG_AMOUNT",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_stages_are_ordered() {
        assert_eq!(
            Preprocessables::DAMAGE_STAGES,
            [
                Preprocessables::DmgElement,
                Preprocessables::DmgReaction,
                Preprocessables::DmgAmount
            ]
        );
    }

    #[test]
    fn signal_display_uses_wire_names() {
        assert_eq!(
            TriggeringSignal::EndRoundCheckOut.to_string(),
            "END_ROUND_CHECK_OUT"
        );
    }
}
