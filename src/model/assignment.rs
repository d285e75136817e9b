//! The user-to-role assignment: the state of the ARBAC transition system.
//!
//! Represented as a fixed-size bitset over `users x roles` rather than a
//! generic hash set of boxed pairs, per the reachability problem's
//! recommendation for the searcher's visited set. The bitset is sized
//! against the *total* interned role/user universe established once at
//! model-construction time; slicing narrows which ids are considered
//! live, but never renumbers them, so a single fixed width is safe to
//! reuse across every pruning iteration and the search that follows.

use fixedbitset::FixedBitSet;

use super::ids::{RoleId, UserId};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Assignment {
    bits: FixedBitSet,
    num_roles: usize,
}

impl Assignment {
    pub fn empty(num_users: usize, num_roles: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(num_users * num_roles),
            num_roles,
        }
    }

    #[inline]
    fn index(&self, u: UserId, r: RoleId) -> usize {
        u.0 as usize * self.num_roles + r.0 as usize
    }

    pub fn contains(&self, u: UserId, r: RoleId) -> bool {
        self.bits.contains(self.index(u, r))
    }

    /// Inserts `(u, r)`. Returns `true` if the assignment changed.
    pub fn insert(&mut self, u: UserId, r: RoleId) -> bool {
        let idx = self.index(u, r);
        if self.bits.contains(idx) {
            false
        } else {
            self.bits.insert(idx);
            true
        }
    }

    /// Removes `(u, r)`. Returns `true` if the assignment changed.
    pub fn remove(&mut self, u: UserId, r: RoleId) -> bool {
        let idx = self.index(u, r);
        if self.bits.contains(idx) {
            self.bits.set(idx, false);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every `(user, role)` pair held in this assignment.
    pub fn pairs(&self) -> impl Iterator<Item = (UserId, RoleId)> + '_ {
        let num_roles = self.num_roles;
        self.bits.ones().map(move |idx| {
            let u = (idx / num_roles) as u32;
            let r = (idx % num_roles) as u32;
            (UserId(u), RoleId(r))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains_round_trip() {
        let mut a = Assignment::empty(2, 3);
        assert!(!a.contains(UserId(0), RoleId(1)));
        assert!(a.insert(UserId(0), RoleId(1)));
        assert!(a.contains(UserId(0), RoleId(1)));
        assert!(!a.contains(UserId(1), RoleId(1)));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut a = Assignment::empty(1, 1);
        assert!(a.insert(UserId(0), RoleId(0)));
        assert!(!a.insert(UserId(0), RoleId(0)));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn remove_reports_change() {
        let mut a = Assignment::empty(1, 1);
        assert!(!a.remove(UserId(0), RoleId(0)));
        a.insert(UserId(0), RoleId(0));
        assert!(a.remove(UserId(0), RoleId(0)));
        assert!(!a.contains(UserId(0), RoleId(0)));
    }

    #[test]
    fn equality_is_structural_not_positional() {
        let mut a = Assignment::empty(2, 2);
        let mut b = Assignment::empty(2, 2);
        a.insert(UserId(0), RoleId(1));
        a.insert(UserId(1), RoleId(0));
        b.insert(UserId(1), RoleId(0));
        b.insert(UserId(0), RoleId(1));
        assert_eq!(a, b);
    }

    #[test]
    fn pairs_enumerates_all_held_roles() {
        let mut a = Assignment::empty(2, 2);
        a.insert(UserId(0), RoleId(1));
        a.insert(UserId(1), RoleId(0));
        let mut pairs: Vec<_> = a.pairs().collect();
        pairs.sort();
        assert_eq!(pairs, vec![(UserId(0), RoleId(1)), (UserId(1), RoleId(0))]);
    }
}
