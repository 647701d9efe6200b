//! Engine error types.
//!
//! Only two kinds of failure leave the engine:
//!
//! - **Fatal**: an invariant was violated by an effect, a rule-object or the
//!   engine itself. The host must treat the game as unrecoverable.
//! - **Rejected**: an action submitted at the driver boundary was not legal in
//!   the current state. Nothing was changed.
//!
//! A target that no longer exists is *not* an error; effects addressing it
//! resolve to a no-op.

use thiserror::Error;

use crate::element::Element;
use crate::signal::Preprocessables;
use crate::state::SkillType;
use crate::target::{PlayerId, StaticTarget, Zone};

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// How a host should react to an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Engine or content defect; the game cannot continue.
    Fatal,
    /// The submitted action was refused; the state is unchanged.
    Rejected,
}

/// Errors surfaced by effect execution and by the driver.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("effect stack is empty")]
    EmptyStack,

    #[error("target {target} must address zone {expected}")]
    WrongZone { target: StaticTarget, expected: Zone },

    #[error("character {target} does not exist")]
    UnknownCharacter { target: StaticTarget },

    #[error("character {target} cannot cast {skill:?}")]
    CannotCastSkill { target: StaticTarget, skill: SkillType },

    #[error("character {target} has no {skill:?} skill")]
    UnknownSkill { target: StaticTarget, skill: SkillType },

    #[error("player {pid} has no alive character to swap to")]
    NoAliveCharacter { pid: PlayerId },

    #[error("sentinel effect {name} cannot be executed")]
    SentinelExecuted { name: &'static str },

    #[error("player {pid} lacks {num} {elem} dice")]
    InsufficientDice { pid: PlayerId, elem: Element, num: u32 },

    #[error("a rule-object changed the kind of the item pending at {stage}")]
    PreprocessKindChanged { stage: Preprocessables },

    #[error("effect cascade exceeded {limit} steps")]
    StepLimitExceeded { limit: usize },

    #[error("player {pid} is not awaiting a death swap")]
    NotAwaitingDeathSwap { pid: PlayerId },

    #[error("character {target} is not a legal death-swap target")]
    IllegalDeathSwapTarget { target: StaticTarget },
}

impl EngineError {
    /// Returns how a host should treat this error.
    #[must_use]
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotAwaitingDeathSwap { .. } | Self::IllegalDeathSwapTarget { .. } => {
                ErrorSeverity::Rejected
            }
            _ => ErrorSeverity::Fatal,
        }
    }

    /// Checks that `target` addresses `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WrongZone`] on mismatch.
    pub fn expect_zone(target: StaticTarget, expected: Zone) -> Result<()> {
        if target.zone == expected {
            Ok(())
        } else {
            tracing::warn!(%target, %expected, "effect received a target in the wrong zone");
            Err(Self::WrongZone { target, expected })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_errors_are_rejections() {
        let err = EngineError::NotAwaitingDeathSwap { pid: PlayerId::P1 };
        assert_eq!(err.severity(), ErrorSeverity::Rejected);

        let err = EngineError::IllegalDeathSwapTarget {
            target: StaticTarget::character(PlayerId::P1, 1),
        };
        assert_eq!(err.severity(), ErrorSeverity::Rejected);
    }

    #[test]
    fn invariant_errors_are_fatal() {
        assert_eq!(EngineError::EmptyStack.severity(), ErrorSeverity::Fatal);
        assert_eq!(
            EngineError::NoAliveCharacter { pid: PlayerId::P2 }.severity(),
            ErrorSeverity::Fatal
        );
    }

    #[test]
    fn expect_zone_checks_the_zone() {
        let target = StaticTarget::summons(PlayerId::P1);
        assert!(EngineError::expect_zone(target, Zone::Summons).is_ok());
        assert_eq!(
            EngineError::expect_zone(target, Zone::Characters),
            Err(EngineError::WrongZone {
                target,
                expected: Zone::Characters
            })
        );
    }

    #[test]
    fn messages_are_descriptive() {
        let err = EngineError::CannotCastSkill {
            target: StaticTarget::character(PlayerId::P2, 1),
            skill: SkillType::ElementalBurst,
        };
        assert_eq!(err.to_string(), "character P2/characters/1 cannot cast ElementalBurst");
    }
}
