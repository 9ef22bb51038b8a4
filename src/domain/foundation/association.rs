//! Bidirectional association bookkeeping.
//!
//! A one-to-many association has an owning side (the child's back-reference,
//! which the store persists) and an inverse side (the owner's collection).
//! The collections here are the only mutators that touch both ends, so the
//! two sides stay in agreement:
//!
//! - adding a child that is already listed is a no-op
//! - adding a new child lists it and points its back-reference at the owner
//! - removing a listed child unlists it and clears its back-reference, unless
//!   the back-reference was already reassigned to another owner
//! - removing an unlisted child is a no-op
//!
//! [`LinkedSet`] holds keys of children that live in their own aggregate
//! (projects of a principal investigator). [`OwnedSet`] holds the children
//! themselves and records removed members as orphans the store must delete.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RecordKey;

/// The owning side of an association, implemented by child records.
pub trait BackReference {
    /// Object identity of the child.
    fn record_key(&self) -> RecordKey;

    /// Key of the owner this child points at, if any.
    fn back_reference(&self) -> Option<RecordKey>;

    /// Points the child at `owner`, or clears the reference.
    fn set_back_reference(&mut self, owner: Option<RecordKey>);
}

/// Disagreement between the two sides of an association.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssociationError {
    #[error("{child} is listed by {owner} but references {actual:?}")]
    BackReferenceMismatch {
        owner: RecordKey,
        child: RecordKey,
        actual: Option<RecordKey>,
    },

    #[error("{child} references {owner} which does not list it")]
    Unlisted { owner: RecordKey, child: RecordKey },
}

/// Inverse-side collection of child keys, in insertion order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkedSet {
    members: Vec<RecordKey>,
}

impl LinkedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the inverse side from keys loaded off the owning side.
    pub fn from_keys(keys: impl IntoIterator<Item = RecordKey>) -> Self {
        let mut set = Self::new();
        for key in keys {
            if !set.contains(key) {
                set.members.push(key);
            }
        }
        set
    }

    /// Lists `child` under `owner`. Returns false if it was already listed.
    pub fn link<C: BackReference>(&mut self, owner: RecordKey, child: &mut C) -> bool {
        let key = child.record_key();
        if self.contains(key) {
            return false;
        }
        self.members.push(key);
        child.set_back_reference(Some(owner));
        true
    }

    /// Unlists `child`. Returns false if it was not listed.
    pub fn unlink<C: BackReference>(&mut self, owner: RecordKey, child: &mut C) -> bool {
        let key = child.record_key();
        let Some(position) = self.members.iter().position(|k| *k == key) else {
            return false;
        };
        self.members.remove(position);
        // leave a reassigned owning side alone
        if child.back_reference() == Some(owner) {
            child.set_back_reference(None);
        }
        true
    }

    pub fn contains(&self, key: RecordKey) -> bool {
        self.members.contains(&key)
    }

    pub fn keys(&self) -> &[RecordKey] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordKey> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Checks both sides against the given children.
    ///
    /// Every listed child must point at `owner`, and every child pointing at
    /// `owner` must be listed. Children that are neither are ignored.
    pub fn verify<'a, C, I>(&self, owner: RecordKey, children: I) -> Result<(), AssociationError>
    where
        C: BackReference + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        for child in children {
            let key = child.record_key();
            let actual = child.back_reference();
            if self.contains(key) {
                if actual != Some(owner) {
                    return Err(AssociationError::BackReferenceMismatch {
                        owner,
                        child: key,
                        actual,
                    });
                }
            } else if actual == Some(owner) {
                return Err(AssociationError::Unlisted { owner, child: key });
            }
        }
        Ok(())
    }
}

/// Owning collection of children with orphan removal.
///
/// Children removed from the set are recorded in `orphaned` until the store
/// deletes them.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedSet<C> {
    members: Vec<C>,
    orphaned: Vec<RecordKey>,
}

impl<C> Default for OwnedSet<C> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            orphaned: Vec::new(),
        }
    }
}

impl<C: BackReference> OwnedSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassembles a collection loaded from the store.
    pub fn from_members(owner: RecordKey, members: impl IntoIterator<Item = C>) -> Self {
        let mut set = Self::new();
        for child in members {
            set.add(owner, child);
        }
        set
    }

    /// Adds `child` under `owner`. Returns false if a child with the same key
    /// is already a member, in which case `child` is dropped.
    pub fn add(&mut self, owner: RecordKey, mut child: C) -> bool {
        let key = child.record_key();
        if self.contains(key) {
            return false;
        }
        child.set_back_reference(Some(owner));
        self.orphaned.retain(|k| *k != key);
        self.members.push(child);
        true
    }

    /// Removes the member with `key` and marks it orphaned.
    ///
    /// Returns the detached child, or `None` if it was not a member.
    pub fn remove(&mut self, owner: RecordKey, key: RecordKey) -> Option<C> {
        let position = self.members.iter().position(|c| c.record_key() == key)?;
        let mut child = self.members.remove(position);
        if child.back_reference() == Some(owner) {
            child.set_back_reference(None);
        }
        self.orphaned.push(key);
        Some(child)
    }

    pub fn contains(&self, key: RecordKey) -> bool {
        self.members.iter().any(|c| c.record_key() == key)
    }

    pub fn get(&self, key: RecordKey) -> Option<&C> {
        self.members.iter().find(|c| c.record_key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.members.iter()
    }

    /// Mutable access for stores assigning ids. Back-references must not be
    /// changed through it.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut C> {
        self.members.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Keys removed since the last [`OwnedSet::take_orphaned`].
    pub fn orphaned(&self) -> &[RecordKey] {
        &self.orphaned
    }

    /// Hands the pending orphan deletions to the store.
    pub fn take_orphaned(&mut self) -> Vec<RecordKey> {
        std::mem::take(&mut self.orphaned)
    }

    /// Checks that every member points at `owner`.
    pub fn verify(&self, owner: RecordKey) -> Result<(), AssociationError> {
        for child in &self.members {
            let actual = child.back_reference();
            if actual != Some(owner) {
                return Err(AssociationError::BackReferenceMismatch {
                    owner,
                    child: child.record_key(),
                    actual,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Child {
        key: RecordKey,
        owner: Option<RecordKey>,
    }

    impl Child {
        fn new() -> Self {
            Self {
                key: RecordKey::new(),
                owner: None,
            }
        }
    }

    impl BackReference for Child {
        fn record_key(&self) -> RecordKey {
            self.key
        }

        fn back_reference(&self) -> Option<RecordKey> {
            self.owner
        }

        fn set_back_reference(&mut self, owner: Option<RecordKey>) {
            self.owner = owner;
        }
    }

    #[test]
    fn link_sets_both_sides() {
        let owner = RecordKey::new();
        let mut set = LinkedSet::new();
        let mut child = Child::new();

        assert!(set.link(owner, &mut child));
        assert!(set.contains(child.key));
        assert_eq!(child.owner, Some(owner));
    }

    #[test]
    fn link_twice_is_a_no_op() {
        let owner = RecordKey::new();
        let mut set = LinkedSet::new();
        let mut child = Child::new();

        set.link(owner, &mut child);
        let snapshot = (set.clone(), child.clone());
        assert!(!set.link(owner, &mut child));
        assert_eq!((set, child), snapshot);
    }

    #[test]
    fn unlink_clears_back_reference() {
        let owner = RecordKey::new();
        let mut set = LinkedSet::new();
        let mut child = Child::new();

        set.link(owner, &mut child);
        assert!(set.unlink(owner, &mut child));
        assert!(!set.contains(child.key));
        assert_eq!(child.owner, None);
    }

    #[test]
    fn unlink_unknown_child_is_a_no_op() {
        let owner = RecordKey::new();
        let other = RecordKey::new();
        let mut set = LinkedSet::new();
        let mut child = Child {
            key: RecordKey::new(),
            owner: Some(other),
        };

        assert!(!set.unlink(owner, &mut child));
        assert_eq!(child.owner, Some(other));
    }

    #[test]
    fn unlink_keeps_reassigned_back_reference() {
        let owner = RecordKey::new();
        let new_owner = RecordKey::new();
        let mut set = LinkedSet::new();
        let mut child = Child::new();

        set.link(owner, &mut child);
        child.set_back_reference(Some(new_owner));

        assert!(set.unlink(owner, &mut child));
        assert!(!set.contains(child.key));
        assert_eq!(child.owner, Some(new_owner));
    }

    #[test]
    fn verify_detects_mismatched_back_reference() {
        let owner = RecordKey::new();
        let mut set = LinkedSet::new();
        let mut child = Child::new();
        set.link(owner, &mut child);
        child.owner = None;

        assert_eq!(
            set.verify(owner, [&child]),
            Err(AssociationError::BackReferenceMismatch {
                owner,
                child: child.key,
                actual: None,
            })
        );
    }

    #[test]
    fn verify_detects_unlisted_child() {
        let owner = RecordKey::new();
        let set = LinkedSet::new();
        let child = Child {
            key: RecordKey::new(),
            owner: Some(owner),
        };

        assert_eq!(
            set.verify(owner, [&child]),
            Err(AssociationError::Unlisted {
                owner,
                child: child.key
            })
        );
    }

    #[test]
    fn from_keys_drops_duplicates() {
        let key = RecordKey::new();
        let set = LinkedSet::from_keys([key, key, RecordKey::new()]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.keys()[0], key);
    }

    #[test]
    fn owned_add_sets_back_reference_and_is_idempotent() {
        let owner = RecordKey::new();
        let mut set = OwnedSet::new();
        let child = Child::new();
        let key = child.key;

        assert!(set.add(owner, child.clone()));
        assert!(!set.add(owner, child));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(key).unwrap().owner, Some(owner));
        assert!(set.verify(owner).is_ok());
    }

    #[test]
    fn owned_remove_orphans_the_child() {
        let owner = RecordKey::new();
        let mut set = OwnedSet::new();
        let child = Child::new();
        let key = child.key;
        set.add(owner, child);

        let removed = set.remove(owner, key).unwrap();
        assert_eq!(removed.owner, None);
        assert!(set.is_empty());
        assert_eq!(set.orphaned(), &[key]);
        assert_eq!(set.take_orphaned(), vec![key]);
        assert!(set.orphaned().is_empty());
    }

    #[test]
    fn owned_remove_unknown_key_is_a_no_op() {
        let owner = RecordKey::new();
        let mut set: OwnedSet<Child> = OwnedSet::new();
        assert!(set.remove(owner, RecordKey::new()).is_none());
        assert!(set.orphaned().is_empty());
    }

    #[test]
    fn owned_readd_cancels_pending_orphan() {
        let owner = RecordKey::new();
        let mut set = OwnedSet::new();
        let child = Child::new();
        let key = child.key;
        set.add(owner, child);

        let removed = set.remove(owner, key).unwrap();
        set.add(owner, removed);
        assert!(set.orphaned().is_empty());
        assert!(set.contains(key));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Link(usize),
        Unlink(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..6).prop_map(Op::Link),
            (0usize..6).prop_map(Op::Unlink),
        ]
    }

    proptest! {
        #[test]
        fn linked_set_stays_consistent(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let owner = RecordKey::new();
            let mut set = LinkedSet::new();
            let mut children: Vec<Child> = (0..6).map(|_| Child::new()).collect();

            for op in ops {
                match op {
                    Op::Link(i) => { set.link(owner, &mut children[i]); }
                    Op::Unlink(i) => { set.unlink(owner, &mut children[i]); }
                }
                prop_assert!(set.verify(owner, children.iter()).is_ok());
                prop_assert!(set.len() <= children.len());
            }
        }

        #[test]
        fn link_then_unlink_restores_membership(pre in 0usize..5) {
            let owner = RecordKey::new();
            let mut set = LinkedSet::new();
            let mut existing: Vec<Child> = (0..pre).map(|_| Child::new()).collect();
            for child in existing.iter_mut() {
                set.link(owner, child);
            }
            let before = set.clone();

            let mut fresh = Child::new();
            set.link(owner, &mut fresh);
            set.unlink(owner, &mut fresh);

            prop_assert_eq!(set, before);
            prop_assert_eq!(fresh.owner, None);
        }
    }
}
