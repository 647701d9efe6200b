//! Elements, elemental auras and the reaction table.
//!
//! This is the leaf of the engine: nothing here knows about game state.
//!
//! - [`Element`]: the closed set of elements, including the two cost wildcards
//! - [`ElementalAura`]: the per-character set of applied (aurable) elements
//! - [`Reaction`]: the symmetric reaction table with fixed damage boosts
//! - [`ReactionDetail`]: a fired reaction together with the elements involved
//!
//! # Example
//!
//! ```
//! use invokation_core::element::{Element, ElementalAura, Reaction};
//!
//! let aura = ElementalAura::empty().with_element(Element::Hydro);
//! let detail = aura.consult_reaction(Element::Pyro).unwrap();
//!
//! assert_eq!(detail.reaction, Reaction::Vaporize);
//! assert_eq!(detail.reaction.damage_boost(), 2);
//! ```

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// =============================================================================
// Element
// =============================================================================

/// The closed set of elements.
///
/// `Omni` and `Any` only appear in dice costs; they are never applied to a
/// character and never deal damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Fire
    Pyro,
    /// Water
    Hydro,
    /// Wind, swirls an existing aura
    Anemo,
    /// Lightning
    Electro,
    /// Nature
    Dendro,
    /// Ice
    Cryo,
    /// Rock, crystallizes an existing aura
    Geo,
    /// Non-elemental damage
    Physical,
    /// Damage that ignores every modifier
    Piercing,
    /// Cost wildcard matching any single element
    Omni,
    /// Cost wildcard matching any die
    Any,
}

impl Element {
    /// The five elements that can stay on a character as an aura, in the
    /// fixed priority order used when an aura holds more than one element.
    pub const AURABLE: [Self; 5] = [Self::Pyro, Self::Hydro, Self::Electro, Self::Cryo, Self::Dendro];

    /// The seven elements a rolled die can show besides `Omni`.
    pub const PURE: [Self; 7] = [
        Self::Pyro,
        Self::Hydro,
        Self::Anemo,
        Self::Electro,
        Self::Dendro,
        Self::Cryo,
        Self::Geo,
    ];

    /// Returns `true` if this element can be applied as an aura.
    #[must_use]
    pub const fn is_aurable(self) -> bool {
        matches!(
            self,
            Self::Pyro | Self::Hydro | Self::Electro | Self::Cryo | Self::Dendro
        )
    }

    /// Returns `true` if this element can take part in a reaction.
    #[must_use]
    pub const fn is_reactive(self) -> bool {
        self.is_aurable() || matches!(self, Self::Anemo | Self::Geo)
    }

    /// Returns `true` for the cost-only wildcards.
    #[must_use]
    pub const fn is_cost_wildcard(self) -> bool {
        matches!(self, Self::Omni | Self::Any)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pyro => "Pyro",
            Self::Hydro => "Hydro",
            Self::Anemo => "Anemo",
            Self::Electro => "Electro",
            Self::Dendro => "Dendro",
            Self::Cryo => "Cryo",
            Self::Geo => "Geo",
            Self::Physical => "Physical",
            Self::Piercing => "Piercing",
            Self::Omni => "Omni",
            Self::Any => "Any",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// Reaction
// =============================================================================

/// Elemental reactions and their fixed damage boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reaction {
    /// Pyro + Hydro
    Vaporize,
    /// Pyro + Cryo
    Melt,
    /// Pyro + Electro, forces the target's player to switch forward
    Overloaded,
    /// Cryo + Electro, pierces the off-field characters
    Superconduct,
    /// Electro + Hydro, pierces the off-field characters
    ElectroCharged,
    /// Cryo + Hydro, freezes the target
    Frozen,
    /// Anemo + Pyro/Hydro/Electro/Cryo, spreads the consumed aura
    Swirl,
    /// Geo + Pyro/Hydro/Electro/Cryo, grants a shield
    Crystallize,
    /// Dendro + Pyro, creates a Burning Flame summon
    Burning,
    /// Dendro + Hydro, creates a Dendro Core
    Bloom,
    /// Dendro + Electro, creates a Catalyzing Field
    Quicken,
}

impl Reaction {
    /// Every reaction, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Vaporize,
        Self::Melt,
        Self::Overloaded,
        Self::Superconduct,
        Self::ElectroCharged,
        Self::Frozen,
        Self::Swirl,
        Self::Crystallize,
        Self::Burning,
        Self::Bloom,
        Self::Quicken,
    ];

    /// Fixed damage added to the triggering hit.
    #[must_use]
    pub const fn damage_boost(self) -> i32 {
        match self {
            Self::Vaporize | Self::Melt | Self::Overloaded => 2,
            Self::Swirl => 0,
            Self::Superconduct
            | Self::ElectroCharged
            | Self::Frozen
            | Self::Crystallize
            | Self::Burning
            | Self::Bloom
            | Self::Quicken => 1,
        }
    }

    /// Looks up the reaction between two elements.
    ///
    /// The lookup is symmetric: `consult(a, b) == consult(b, a)`.
    #[must_use]
    pub fn consult(a: Element, b: Element) -> Option<Self> {
        Self::consult_ordered(a, b).or_else(|| Self::consult_ordered(b, a))
    }

    fn consult_ordered(a: Element, b: Element) -> Option<Self> {
        use Element::{Anemo, Cryo, Dendro, Electro, Geo, Hydro, Pyro};
        match (a, b) {
            (Pyro, Hydro) => Some(Self::Vaporize),
            (Pyro, Cryo) => Some(Self::Melt),
            (Pyro, Electro) => Some(Self::Overloaded),
            (Cryo, Electro) => Some(Self::Superconduct),
            (Electro, Hydro) => Some(Self::ElectroCharged),
            (Cryo, Hydro) => Some(Self::Frozen),
            (Anemo, Pyro | Hydro | Electro | Cryo) => Some(Self::Swirl),
            (Geo, Pyro | Hydro | Electro | Cryo) => Some(Self::Crystallize),
            (Dendro, Pyro) => Some(Self::Burning),
            (Dendro, Hydro) => Some(Self::Bloom),
            (Dendro, Electro) => Some(Self::Quicken),
            _ => None,
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A reaction that fired, with the consumed aura element first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactionDetail {
    /// The reaction that fired
    pub reaction: Reaction,
    /// The aura element that was on the target and got consumed
    pub first_elem: Element,
    /// The incoming element
    pub second_elem: Element,
}

impl ReactionDetail {
    /// Creates a new reaction detail.
    #[must_use]
    pub const fn new(reaction: Reaction, first_elem: Element, second_elem: Element) -> Self {
        Self {
            reaction,
            first_elem,
            second_elem,
        }
    }

    /// Returns the element of the two that is not `elem`.
    ///
    /// Used by Swirl to find the element to spread.
    #[must_use]
    pub fn other_element(&self, elem: Element) -> Element {
        if self.first_elem == elem {
            self.second_elem
        } else {
            self.first_elem
        }
    }
}

// =============================================================================
// Elemental Aura
// =============================================================================

bitflags! {
    /// The set of aurable elements currently applied to a character.
    ///
    /// Adding an element that is already present is a no-op. The reaction
    /// rules mean only Cryo and Dendro can ever coexist.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ElementalAura: u8 {
        /// Pyro aura
        const PYRO = 1;
        /// Hydro aura
        const HYDRO = 1 << 1;
        /// Electro aura
        const ELECTRO = 1 << 2;
        /// Cryo aura
        const CRYO = 1 << 3;
        /// Dendro aura
        const DENDRO = 1 << 4;
    }
}

impl Default for ElementalAura {
    fn default() -> Self {
        Self::empty()
    }
}

impl ElementalAura {
    const fn flag_of(elem: Element) -> Option<Self> {
        match elem {
            Element::Pyro => Some(Self::PYRO),
            Element::Hydro => Some(Self::HYDRO),
            Element::Electro => Some(Self::ELECTRO),
            Element::Cryo => Some(Self::CRYO),
            Element::Dendro => Some(Self::DENDRO),
            _ => None,
        }
    }

    /// Builds an aura holding the given elements; non-aurable ones are ignored.
    #[must_use]
    pub fn from_elements(elems: impl IntoIterator<Item = Element>) -> Self {
        elems
            .into_iter()
            .fold(Self::empty(), |aura, elem| aura.with_element(elem))
    }

    /// Returns `true` if `elem` is currently applied.
    #[must_use]
    pub fn has(&self, elem: Element) -> bool {
        Self::flag_of(elem).is_some_and(|flag| self.contains(flag))
    }

    /// Returns the aura with `elem` applied.
    ///
    /// No-op if `elem` is already present or cannot be applied.
    #[must_use]
    pub fn with_element(self, elem: Element) -> Self {
        match Self::flag_of(elem) {
            Some(flag) => self | flag,
            None => self,
        }
    }

    /// Returns the aura with `elem` removed.
    #[must_use]
    pub fn without_element(self, elem: Element) -> Self {
        match Self::flag_of(elem) {
            Some(flag) => self - flag,
            None => self,
        }
    }

    /// Iterates the applied elements in priority order.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        Element::AURABLE.into_iter().filter(|elem| self.has(*elem))
    }

    /// Checks the incoming element against the applied elements in priority
    /// order and returns the first reaction that would fire.
    #[must_use]
    pub fn consult_reaction(&self, incoming: Element) -> Option<ReactionDetail> {
        self.elements().find_map(|applied| {
            Reaction::consult(applied, incoming)
                .map(|reaction| ReactionDetail::new(reaction, applied, incoming))
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
