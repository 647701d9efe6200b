//! Supports: player-owned rule-objects occupying numbered slots.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::element::Element;
use crate::signal::TriggeringSignal;
use crate::state::GameState;
use crate::status::{rule_object_enum, Lifetime, RuleObject};
use crate::target::StaticTarget;

rule_object_enum! {
    /// Every support.
    pub enum Support, kind SupportKind {
        /// Grants Omni dice at round start
        Paimon(PaimonSupport),
    }
}

/// Grants two Omni dice at the start of each round, twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaimonSupport {
    /// Remaining rounds
    pub usages: i32,
}

impl Default for PaimonSupport {
    fn default() -> Self {
        Self {
            usages: Self::MAX_USAGES,
        }
    }
}

impl PaimonSupport {
    /// Starting usages.
    pub const MAX_USAGES: i32 = 2;
    /// Omni dice per round.
    pub const DICE: u32 = 2;
}

impl RuleObject for PaimonSupport {
    fn lifetime(&self) -> Lifetime {
        Lifetime::usages(Self::MAX_USAGES)
    }

    fn counter(&self) -> i32 {
        self.usages
    }

    fn with_counter(&self, value: i32) -> Self {
        Self { usages: value }
    }

    fn reacts_to(&self, signal: TriggeringSignal) -> bool {
        signal == TriggeringSignal::RoundStart
    }

    fn react_to_signal(
        &self,
        _state: &GameState,
        owner: StaticTarget,
        _signal: TriggeringSignal,
    ) -> (Vec<Effect>, Option<Self>) {
        let dice = Effect::AddDice {
            pid: owner.pid,
            element: Element::Omni,
            num: Self::DICE,
        };
        (vec![dice], Some(self.with_counter(self.usages - 1)))
    }
}
