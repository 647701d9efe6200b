//! Reactive rule-objects: statuses, summons and supports.
//!
//! Every transient rule-object implements [`RuleObject`], the common
//! capability the broadcaster drives. It has three entry points:
//!
//! - [`RuleObject::preprocess`]: synchronous interception of a pending item
//!   (a damage in one of its three stages, or a dice cost)
//! - [`RuleObject::react_to_signal`]: reaction to a broadcast
//!   [`TriggeringSignal`], returning effects to queue
//! - [`RuleObject::inform`]: passive notification used to remember something
//!   for a later preprocess or signal
//!
//! All three return the object's next value instead of mutating it. Writing
//! that value back into the state is the broadcaster's job (see
//! [`crate::processing`]), so rule-objects never build lifecycle effects
//! themselves.
//!
//! # Lifetimes
//!
//! Objects with a counter follow one of two expiry policies, see
//! [`Lifetime`]. The counter is clamped to `[0, max]` on every merge and the
//! object leaves its collection exactly when the merged counter is `<= 0`,
//! unless the policy says it persists at zero.
//!
//! # Merging
//!
//! [`RuleObject::update`] is the merge rule: the incoming counter is *added*
//! to the current one. An `Add*` effect merges a fresh object, so stacking
//! statuses stack and refreshing ones saturate at their maximum. When a
//! signal reaction returns a changed object, the broadcaster sends the
//! difference ([`RuleObject::delta`]) through the same merge rule.

pub mod character;
pub mod combat;
pub mod equipment;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::event::{Informable, Preprocessable};
use crate::signal::{Preprocessables, TriggeringSignal};
use crate::state::GameState;
use crate::summon::{Summon, SummonKind};
use crate::support::Support;
use crate::target::{StaticTarget, Zone};

pub use character::{
    ElementalInfusionStatus, FixedShieldStatus, FrozenStatus, MushroomPizzaStatus,
    SatiatedStatus, StackedShieldStatus,
};
pub use combat::{
    CatalyzingFieldStatus, ChangingShiftsStatus, CrystallizeStatus, DendroCoreStatus,
    FerventFlamesStatus, LeaveItToMeStatus,
};
pub use equipment::{GamblersEarringsStatus, SkillBoostTalentStatus, WeaponEquipmentStatus};

// =============================================================================
// Lifetime
// =============================================================================

/// Expiry policy of a rule-object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// Counts discrete consumptions.
    Usages {
        /// Upper clamp of the counter
        max: i32,
        /// Whether the object is removed when the counter reaches zero
        auto_destroy: bool,
    },
    /// Counts rounds.
    Duration {
        /// Upper clamp of the counter
        max: i32,
    },
    /// No counter; only removed explicitly.
    Permanent,
}

impl Lifetime {
    /// Usage-based lifetime that is removed at zero.
    #[must_use]
    pub const fn usages(max: i32) -> Self {
        Self::Usages {
            max,
            auto_destroy: true,
        }
    }

    /// Upper clamp of the counter, if the policy has one.
    #[must_use]
    pub const fn max(self) -> Option<i32> {
        match self {
            Self::Usages { max, .. } | Self::Duration { max } => Some(max),
            Self::Permanent => None,
        }
    }
}

// =============================================================================
// Rule-Object Protocol
// =============================================================================

/// The capability shared by every status, summon and support.
///
/// Implementors only describe behaviour; all default methods leave the
/// pending item and the object untouched.
///
/// `owner` is the address of the object's owner: the character for
/// character-scoped statuses, or the player's combat-status, summon or
/// support zone.
pub trait RuleObject: Clone + PartialEq + fmt::Debug {
    /// Expiry policy of this object.
    fn lifetime(&self) -> Lifetime {
        Lifetime::Permanent
    }

    /// Current usages or duration; zero for permanent objects.
    fn counter(&self) -> i32 {
        0
    }

    /// Returns a copy with the counter replaced.
    #[must_use]
    fn with_counter(&self, _value: i32) -> Self {
        self.clone()
    }

    /// Returns `true` if this object wants to be triggered by `signal`.
    fn reacts_to(&self, _signal: TriggeringSignal) -> bool {
        false
    }

    /// Intercepts a pending item.
    ///
    /// Returns the (possibly rewritten) item and the object's next value;
    /// `None` removes the object.
    fn preprocess(
        &self,
        _state: &GameState,
        _owner: StaticTarget,
        item: Preprocessable,
        _stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        (item, Some(self.clone()))
    }

    /// Receives a passive notification and returns the object's next value.
    #[must_use]
    fn inform(&self, _state: &GameState, _owner: StaticTarget, _info: &Informable) -> Self {
        self.clone()
    }

    /// Reacts to a signal with effects to queue and the object's next value;
    /// `None` removes the object.
    fn react_to_signal(
        &self,
        _state: &GameState,
        _owner: StaticTarget,
        _signal: TriggeringSignal,
    ) -> (Vec<Effect>, Option<Self>) {
        (Vec::new(), Some(self.clone()))
    }

    /// Returns `true` if the object must leave its collection.
    fn is_expired(&self) -> bool {
        match self.lifetime() {
            Lifetime::Usages { auto_destroy, .. } => auto_destroy && self.counter() <= 0,
            Lifetime::Duration { .. } => self.counter() <= 0,
            Lifetime::Permanent => false,
        }
    }

    /// Clamps the counter into `[0, max]`; `None` if the result is expired.
    #[must_use]
    fn normalized(&self) -> Option<Self> {
        let clamped = match self.lifetime().max() {
            Some(max) => self.with_counter(self.counter().clamp(0, max)),
            None => self.clone(),
        };
        (!clamped.is_expired()).then_some(clamped)
    }

    /// Merges `incoming` into this object.
    ///
    /// Non-counter fields come from `incoming`; counters add and clamp.
    /// `None` means the merged object is expired.
    #[must_use]
    fn update(&self, incoming: &Self) -> Option<Self> {
        match self.lifetime().max() {
            Some(max) => {
                let merged = incoming.with_counter((self.counter() + incoming.counter()).clamp(0, max));
                (!merged.is_expired()).then_some(merged)
            }
            None => Some(incoming.clone()),
        }
    }

    /// Returns the value that, merged into `self`, yields `newer`.
    #[must_use]
    fn delta(&self, newer: &Self) -> Self {
        match self.lifetime() {
            Lifetime::Permanent => newer.clone(),
            _ => newer.with_counter(newer.counter() - self.counter()),
        }
    }
}

/// Objects that are stored one-per-kind and looked up by their kind.
pub trait Kinded {
    /// The discriminant type.
    type Kind: Copy + Eq + Ord + fmt::Debug;

    /// Returns the discriminant of this object.
    fn kind(&self) -> Self::Kind;
}

/// Declares a closed rule-object enum, its kind enum, and the delegating
/// [`RuleObject`] implementation.
macro_rules! rule_object_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident, kind $kind:ident {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ty) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant($ty), )+
        }

        #[doc = concat!("Discriminant of [`", stringify!($name), "`].")]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $kind {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Returns the variant name, used in logs.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )+
                }
            }
        }

        impl $crate::status::Kinded for $name {
            type Kind = $kind;

            fn kind(&self) -> $kind {
                match self {
                    $( Self::$variant(_) => $kind::$variant, )+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(inner: $ty) -> Self {
                    Self::$variant(inner)
                }
            }
        )+

        impl $crate::status::RuleObject for $name {
            fn lifetime(&self) -> $crate::status::Lifetime {
                match self {
                    $( Self::$variant(inner) => inner.lifetime(), )+
                }
            }

            fn counter(&self) -> i32 {
                match self {
                    $( Self::$variant(inner) => inner.counter(), )+
                }
            }

            fn with_counter(&self, value: i32) -> Self {
                match self {
                    $( Self::$variant(inner) => Self::$variant(inner.with_counter(value)), )+
                }
            }

            fn reacts_to(&self, signal: $crate::signal::TriggeringSignal) -> bool {
                match self {
                    $( Self::$variant(inner) => inner.reacts_to(signal), )+
                }
            }

            fn preprocess(
                &self,
                state: &$crate::state::GameState,
                owner: $crate::target::StaticTarget,
                item: $crate::event::Preprocessable,
                stage: $crate::signal::Preprocessables,
            ) -> ($crate::event::Preprocessable, Option<Self>) {
                match self {
                    $(
                        Self::$variant(inner) => {
                            let (item, next) = inner.preprocess(state, owner, item, stage);
                            (item, next.map(Self::$variant))
                        }
                    )+
                }
            }

            fn inform(
                &self,
                state: &$crate::state::GameState,
                owner: $crate::target::StaticTarget,
                info: &$crate::event::Informable,
            ) -> Self {
                match self {
                    $( Self::$variant(inner) => Self::$variant(inner.inform(state, owner, info)), )+
                }
            }

            fn react_to_signal(
                &self,
                state: &$crate::state::GameState,
                owner: $crate::target::StaticTarget,
                signal: $crate::signal::TriggeringSignal,
            ) -> (Vec<$crate::effect::Effect>, Option<Self>) {
                match self {
                    $(
                        Self::$variant(inner) => {
                            let (effects, next) = inner.react_to_signal(state, owner, signal);
                            (effects, next.map(Self::$variant))
                        }
                    )+
                }
            }
        }
    };
}

pub(crate) use rule_object_enum;

// =============================================================================
// Status
// =============================================================================

/// Where a character-scoped status lives on its character.
///
/// Slots are visited in declaration order by every broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CharacterSlot {
    /// Talent cards
    Talent,
    /// Weapons, artifacts and other equipment
    Equipment,
    /// Ordinary character statuses
    Status,
}

rule_object_enum! {
    /// Every status, character-scoped or combat.
    pub enum Status, kind StatusKind {
        /// Cannot use skills; shattered by Pyro or Physical damage
        Frozen(FrozenStatus),
        /// Has eaten this round
        Satiated(SatiatedStatus),
        /// Heals at the end of each round
        MushroomPizza(MushroomPizzaStatus),
        /// Converts Physical skill damage to an element
        ElementalInfusion(ElementalInfusionStatus),
        /// Shield points consumed as needed
        StackedShield(StackedShieldStatus),
        /// Absorbs a fixed amount per hit
        FixedShield(FixedShieldStatus),
        /// Talent boosting one skill
        SkillBoostTalent(SkillBoostTalentStatus),
        /// Weapon boosting skill damage
        WeaponEquipment(WeaponEquipmentStatus),
        /// Grants dice when an opposing character is defeated
        GamblersEarrings(GamblersEarringsStatus),
        /// Boosts own Electro and Dendro damage
        CatalyzingField(CatalyzingFieldStatus),
        /// Boosts own Pyro and Electro damage
        DendroCore(DendroCoreStatus),
        /// Shield on the active character
        Crystallize(CrystallizeStatus),
        /// Boosts the next Pyro-related reaction of a skill
        FerventFlames(FerventFlamesStatus),
        /// Next swap costs one die less
        ChangingShifts(ChangingShiftsStatus),
        /// Next swap is a fast action
        LeaveItToMe(LeaveItToMeStatus),
    }
}

impl Status {
    /// The character slot this status occupies when attached to a character.
    #[must_use]
    pub const fn character_slot(&self) -> CharacterSlot {
        match self {
            Self::SkillBoostTalent(_) => CharacterSlot::Talent,
            Self::WeaponEquipment(_) | Self::GamblersEarrings(_) => CharacterSlot::Equipment,
            _ => CharacterSlot::Status,
        }
    }
}

// =============================================================================
// Addressing
// =============================================================================

/// Identifies a rule-object inside its owner's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleObjectKey {
    /// A status, character-scoped or combat, by kind
    Status(StatusKind),
    /// A summon by kind
    Summon(SummonKind),
    /// The support occupying the owner's slot
    Support,
}

/// Address of one rule-object: its owner plus its key.
///
/// The owner zone decides which lifecycle effects the broadcaster uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleObjectId {
    /// The owning character or player zone
    pub owner: StaticTarget,
    /// The object within that owner
    pub key: RuleObjectKey,
}

impl RuleObjectId {
    /// Creates a new rule-object id.
    #[must_use]
    pub const fn new(owner: StaticTarget, key: RuleObjectKey) -> Self {
        Self { owner, key }
    }

    /// Returns `true` if this addresses a character-scoped status.
    #[must_use]
    pub const fn is_character_status(&self) -> bool {
        matches!(self.owner.zone, Zone::Characters)
    }
}

impl fmt::Display for RuleObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.key, self.owner)
    }
}

/// Any rule-object, used where the broadcaster treats them uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnyRuleObject {
    /// A status
    Status(Status),
    /// A summon
    Summon(Summon),
    /// A support
    Support(Support),
}

impl AnyRuleObject {
    /// Returns the variant name of the wrapped object.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Status(status) => status.name(),
            Self::Summon(summon) => summon.name(),
            Self::Support(support) => support.name(),
        }
    }
}

impl RuleObject for AnyRuleObject {
    fn lifetime(&self) -> Lifetime {
        match self {
            Self::Status(inner) => inner.lifetime(),
            Self::Summon(inner) => inner.lifetime(),
            Self::Support(inner) => inner.lifetime(),
        }
    }

    fn counter(&self) -> i32 {
        match self {
            Self::Status(inner) => inner.counter(),
            Self::Summon(inner) => inner.counter(),
            Self::Support(inner) => inner.counter(),
        }
    }

    fn with_counter(&self, value: i32) -> Self {
        match self {
            Self::Status(inner) => Self::Status(inner.with_counter(value)),
            Self::Summon(inner) => Self::Summon(inner.with_counter(value)),
            Self::Support(inner) => Self::Support(inner.with_counter(value)),
        }
    }

    fn reacts_to(&self, signal: TriggeringSignal) -> bool {
        match self {
            Self::Status(inner) => inner.reacts_to(signal),
            Self::Summon(inner) => inner.reacts_to(signal),
            Self::Support(inner) => inner.reacts_to(signal),
        }
    }

    fn preprocess(
        &self,
        state: &GameState,
        owner: StaticTarget,
        item: Preprocessable,
        stage: Preprocessables,
    ) -> (Preprocessable, Option<Self>) {
        match self {
            Self::Status(inner) => {
                let (item, next) = inner.preprocess(state, owner, item, stage);
                (item, next.map(Self::Status))
            }
            Self::Summon(inner) => {
                let (item, next) = inner.preprocess(state, owner, item, stage);
                (item, next.map(Self::Summon))
            }
            Self::Support(inner) => {
                let (item, next) = inner.preprocess(state, owner, item, stage);
                (item, next.map(Self::Support))
            }
        }
    }

    fn inform(&self, state: &GameState, owner: StaticTarget, info: &Informable) -> Self {
        match self {
            Self::Status(inner) => Self::Status(inner.inform(state, owner, info)),
            Self::Summon(inner) => Self::Summon(inner.inform(state, owner, info)),
            Self::Support(inner) => Self::Support(inner.inform(state, owner, info)),
        }
    }

    fn react_to_signal(
        &self,
        state: &GameState,
        owner: StaticTarget,
        signal: TriggeringSignal,
    ) -> (Vec<Effect>, Option<Self>) {
        match self {
            Self::Status(inner) => {
                let (effects, next) = inner.react_to_signal(state, owner, signal);
                (effects, next.map(Self::Status))
            }
            Self::Summon(inner) => {
                let (effects, next) = inner.react_to_signal(state, owner, signal);
                (effects, next.map(Self::Summon))
            }
            Self::Support(inner) => {
                let (effects, next) = inner.react_to_signal(state, owner, signal);
                (effects, next.map(Self::Support))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
