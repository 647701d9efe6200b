//! Stable addresses into the game state.
//!
//! Effects never hold references to live objects. Instead they carry a
//! [`StaticTarget`], a `(player, zone, id)` triple that stays valid while the
//! object it points at is replaced on every mutation.
//!
//! # Example
//!
//! ```
//! use invokation_core::target::{PlayerId, StaticTarget, Zone};
//!
//! let target = StaticTarget::character(PlayerId::P2, 3);
//! assert_eq!(target.zone, Zone::Characters);
//! assert_eq!(target.pid.other(), PlayerId::P1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Player Identification
// =============================================================================

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// The first player
    P1,
    /// The second player
    P2,
}

impl PlayerId {
    /// Returns the opponent of this player.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }

    /// Returns this player followed by the opponent.
    ///
    /// Every two-player broadcast iterates in this order.
    #[must_use]
    pub const fn this_then_other(self) -> [Self; 2] {
        [self, self.other()]
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P1 => write!(f, "P1"),
            Self::P2 => write!(f, "P2"),
        }
    }
}

// =============================================================================
// Static Target
// =============================================================================

/// Zones a [`StaticTarget`] can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// A character slot; `id` is the character id
    Characters,
    /// The player's combat statuses; `id` is unused
    CombatStatuses,
    /// The player's summons; `id` is unused
    Summons,
    /// A support slot; `id` is the support slot id
    Supports,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Characters => write!(f, "characters"),
            Self::CombatStatuses => write!(f, "combat-statuses"),
            Self::Summons => write!(f, "summons"),
            Self::Supports => write!(f, "supports"),
        }
    }
}

/// A stable `(player, zone, id)` address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaticTarget {
    /// Owning player
    pub pid: PlayerId,
    /// Zone within the player's state
    pub zone: Zone,
    /// Slot id within the zone
    pub id: u32,
}

impl StaticTarget {
    /// Creates a new target.
    #[must_use]
    pub const fn new(pid: PlayerId, zone: Zone, id: u32) -> Self {
        Self { pid, zone, id }
    }

    /// Addresses the character `id` of player `pid`.
    #[must_use]
    pub const fn character(pid: PlayerId, id: u32) -> Self {
        Self::new(pid, Zone::Characters, id)
    }

    /// Addresses the combat-status zone of player `pid`.
    #[must_use]
    pub const fn combat_statuses(pid: PlayerId) -> Self {
        Self::new(pid, Zone::CombatStatuses, 0)
    }

    /// Addresses the summon zone of player `pid`.
    #[must_use]
    pub const fn summons(pid: PlayerId) -> Self {
        Self::new(pid, Zone::Summons, 0)
    }

    /// Addresses the support slot `sid` of player `pid`.
    #[must_use]
    pub const fn support(pid: PlayerId, sid: u32) -> Self {
        Self::new(pid, Zone::Supports, sid)
    }

    /// Returns `true` if this target addresses a character.
    #[must_use]
    pub const fn is_character(&self) -> bool {
        matches!(self.zone, Zone::Characters)
    }
}

impl fmt::Display for StaticTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.pid, self.zone, self.id)
    }
}

// =============================================================================
// Dynamic Character Target
// =============================================================================

/// A character selector resolved against the state at execution time.
///
/// "Self" and "Oppo" are relative to the player of the effect's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DynamicCharacterTarget {
    /// The source player's active character
    SelfActive,
    /// The source player's alive off-field characters
    SelfOffField,
    /// All of the source player's alive characters, in activity order
    SelfAll,
    /// The opponent's active character
    OppoActive,
    /// The opponent's alive off-field characters
    OppoOffField,
    /// All of the opponent's alive characters, in activity order
    OppoAll,
}

impl DynamicCharacterTarget {
    /// Returns the player whose characters this selector picks from.
    #[must_use]
    pub const fn player(self, source: PlayerId) -> PlayerId {
        match self {
            Self::SelfActive | Self::SelfOffField | Self::SelfAll => source,
            Self::OppoActive | Self::OppoOffField | Self::OppoAll => source.other(),
        }
    }
}
