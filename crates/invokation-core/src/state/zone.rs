//! Collections that own rule-objects.
//!
//! - [`RuleObjects`]: one object per kind, kept in insertion order. Used for
//!   character statuses, combat statuses and summons.
//! - [`Supports`]: slot-id keyed supports with monotonic ids.
//!
//! Every method takes the collection by value and returns the new one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::status::{Kinded, RuleObject};
use crate::support::Support;

// =============================================================================
// RuleObjects
// =============================================================================

/// Rule-objects stored one-per-kind in insertion order.
///
/// Insertion order is the broadcast order within the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleObjects<T> {
    items: Vec<T>,
}

impl<T> Default for RuleObjects<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: RuleObject + Kinded> RuleObjects<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection by adding each object in turn.
    #[must_use]
    pub fn from_objects(objects: impl IntoIterator<Item = T>) -> Self {
        objects
            .into_iter()
            .fold(Self::new(), |objects, object| objects.with_added(object))
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates objects in broadcast order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Returns the kinds in broadcast order.
    #[must_use]
    pub fn kinds(&self) -> Vec<T::Kind> {
        self.items.iter().map(Kinded::kind).collect()
    }

    /// Looks up the object of `kind`.
    #[must_use]
    pub fn get(&self, kind: T::Kind) -> Option<&T> {
        self.items.iter().find(|item| item.kind() == kind)
    }

    /// Returns `true` if an object of `kind` is present.
    #[must_use]
    pub fn contains(&self, kind: T::Kind) -> bool {
        self.get(kind).is_some()
    }

    fn position(&self, kind: T::Kind) -> Option<usize> {
        self.items.iter().position(|item| item.kind() == kind)
    }

    /// Inserts `incoming`, or merges it into the existing object of its kind.
    ///
    /// A fresh object is clamped first; an expired result is not stored.
    #[must_use]
    pub fn with_added(self, incoming: T) -> Self {
        if self.contains(incoming.kind()) {
            return self.with_updated(incoming);
        }
        let mut this = self;
        if let Some(fresh) = incoming.normalized() {
            this.items.push(fresh);
        }
        this
    }

    /// Merges `incoming` into the existing object of its kind.
    ///
    /// No-op if no object of that kind is present. The object is removed if
    /// the merge expires it.
    #[must_use]
    pub fn with_updated(mut self, incoming: T) -> Self {
        let Some(idx) = self.position(incoming.kind()) else {
            return self;
        };
        match self.items[idx].update(&incoming) {
            Some(merged) => self.items[idx] = merged,
            None => {
                self.items.remove(idx);
            }
        }
        self
    }

    /// Replaces the object of the same kind, or appends it.
    #[must_use]
    pub fn with_overridden(mut self, object: T) -> Self {
        match self.position(object.kind()) {
            Some(idx) => self.items[idx] = object,
            None => self.items.push(object),
        }
        self
    }

    /// Removes the object of `kind`, if present.
    #[must_use]
    pub fn with_removed(mut self, kind: T::Kind) -> Self {
        self.items.retain(|item| item.kind() != kind);
        self
    }
}

// =============================================================================
// Supports
// =============================================================================

/// Supports keyed by slot id.
///
/// Slot ids are handed out monotonically and never reused, so a
/// [`StaticTarget`](crate::target::StaticTarget) naming a support stays valid
/// across every state transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Supports {
    slots: BTreeMap<u32, Support>,
    next_sid: u32,
}

impl Supports {
    /// Creates an empty support zone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The id the next added support will receive.
    #[must_use]
    pub const fn next_sid(&self) -> u32 {
        self.next_sid
    }

    /// Looks up the support in slot `sid`.
    #[must_use]
    pub fn get(&self, sid: u32) -> Option<&Support> {
        self.slots.get(&sid)
    }

    /// Iterates `(sid, support)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Support)> {
        self.slots.iter().map(|(sid, support)| (*sid, support))
    }

    /// Occupied slot ids in slot order.
    #[must_use]
    pub fn sids(&self) -> Vec<u32> {
        self.slots.keys().copied().collect()
    }

    /// Places `support` in a new slot and returns the slot id.
    ///
    /// Supports never merge; an expired support still consumes an id but is
    /// not stored.
    #[must_use]
    pub fn with_added(mut self, support: Support) -> (Self, u32) {
        let sid = self.next_sid;
        self.next_sid += 1;
        if let Some(fresh) = support.normalized() {
            self.slots.insert(sid, fresh);
        }
        (self, sid)
    }

    /// Merges `incoming` into slot `sid`; no-op if the slot is empty.
    #[must_use]
    pub fn with_updated(mut self, sid: u32, incoming: &Support) -> Self {
        let Some(existing) = self.slots.get(&sid) else {
            return self;
        };
        match existing.update(incoming) {
            Some(merged) => {
                self.slots.insert(sid, merged);
            }
            None => {
                self.slots.remove(&sid);
            }
        }
        self
    }

    /// Replaces the support in slot `sid`; no-op if the slot is empty.
    #[must_use]
    pub fn with_overridden(mut self, sid: u32, support: Support) -> Self {
        if let Some(slot) = self.slots.get_mut(&sid) {
            *slot = support;
        }
        self
    }

    /// Empties slot `sid`.
    #[must_use]
    pub fn with_removed(mut self, sid: u32) -> Self {
        self.slots.remove(&sid);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{
        CrystallizeStatus, DendroCoreStatus, FrozenStatus, Status, StatusKind,
    };
    use crate::support::PaimonSupport;

    mod rule_objects_tests {
        use super::*;

        #[test]
        fn add_keeps_insertion_order() {
            let objects = RuleObjects::new()
                .with_added(Status::from(DendroCoreStatus::default()))
                .with_added(Status::from(CrystallizeStatus::default()));
            assert_eq!(
                objects.kinds(),
                vec![StatusKind::DendroCore, StatusKind::Crystallize]
            );
        }

        #[test]
        fn add_existing_merges_in_place() {
            let objects = RuleObjects::new()
                .with_added(Status::from(CrystallizeStatus { usages: 1 }))
                .with_added(Status::from(FrozenStatus::default()))
                .with_added(Status::from(CrystallizeStatus { usages: 1 }));
            assert_eq!(objects.len(), 2);
            assert_eq!(
                objects.get(StatusKind::Crystallize),
                Some(&Status::from(CrystallizeStatus { usages: 2 }))
            );
            assert_eq!(objects.kinds()[0], StatusKind::Crystallize);
        }

        #[test]
        fn add_expired_is_dropped() {
            let objects = RuleObjects::new().with_added(Status::from(CrystallizeStatus { usages: 0 }));
            assert!(objects.is_empty());
        }

        #[test]
        fn update_missing_is_noop() {
            let objects: RuleObjects<Status> = RuleObjects::new();
            let objects = objects.with_updated(Status::from(FrozenStatus::default()));
            assert!(objects.is_empty());
        }

        #[test]
        fn update_to_zero_removes() {
            let objects = RuleObjects::new()
                .with_added(Status::from(DendroCoreStatus { usages: 1 }))
                .with_updated(Status::from(DendroCoreStatus { usages: -1 }));
            assert!(!objects.contains(StatusKind::DendroCore));
        }

        #[test]
        fn override_ignores_merge_rule() {
            let objects = RuleObjects::new()
                .with_added(Status::from(CrystallizeStatus { usages: 2 }))
                .with_overridden(Status::from(CrystallizeStatus { usages: 1 }));
            assert_eq!(objects.get(StatusKind::Crystallize).map(RuleObject::counter), Some(1));
        }

        #[test]
        fn remove_missing_is_noop() {
            let objects = RuleObjects::new().with_added(Status::from(FrozenStatus::default()));
            let same = objects.clone().with_removed(StatusKind::Satiated);
            assert_eq!(objects, same);
        }
    }

    mod supports_tests {
        use super::*;

        #[test]
        fn slot_ids_are_monotonic_and_never_reused() {
            let supports = Supports::new();
            let (supports, first) = supports.with_added(Support::from(PaimonSupport::default()));
            let (supports, second) = supports.with_added(Support::from(PaimonSupport::default()));
            assert_eq!((first, second), (0, 1));

            let supports = supports.with_removed(first);
            let (supports, third) = supports.with_added(Support::from(PaimonSupport::default()));
            assert_eq!(third, 2);
            assert_eq!(supports.sids(), vec![1, 2]);
        }

        #[test]
        fn update_to_zero_empties_slot() {
            let paimon = Support::from(PaimonSupport { usages: 1 });
            let (supports, sid) = Supports::new().with_added(paimon);
            let supports = supports.with_updated(sid, &Support::from(PaimonSupport { usages: -1 }));
            assert!(supports.get(sid).is_none());
        }

        #[test]
        fn override_missing_slot_is_noop() {
            let supports = Supports::new().with_overridden(7, Support::from(PaimonSupport::default()));
            assert!(supports.is_empty());
        }
    }
}
