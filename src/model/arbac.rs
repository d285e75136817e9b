//! The ARBAC system and the reachability problem posed over it.

use rustc_hash::FxHashSet;
use std::fmt;

use super::assignment::Assignment;
use super::ids::{RoleId, UserId};
use super::interner::Interner;
use super::policy::Policy;

/// An ARBAC instance: a fixed universe of roles and users, an initial
/// assignment, and an administrative policy.
///
/// `role_names`/`user_names` carry the *total* interned universe, fixed
/// at construction time and never renumbered, plus the original names
/// for diagnostics; `roles`/`users` are the currently-live id subsets,
/// which the pruner may shrink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arbac {
    role_names: Interner,
    user_names: Interner,
    pub roles: FxHashSet<RoleId>,
    pub users: FxHashSet<UserId>,
    pub initial: Assignment,
    pub policy: Policy,
}

impl Arbac {
    pub(crate) fn new(
        role_names: Interner,
        user_names: Interner,
        roles: FxHashSet<RoleId>,
        users: FxHashSet<UserId>,
        initial: Assignment,
        policy: Policy,
    ) -> Self {
        Self {
            role_names,
            user_names,
            roles,
            users,
            initial,
            policy,
        }
    }

    /// Total number of interned roles; fixed for the lifetime of this
    /// reachability problem and every sliced descendant of it.
    pub fn num_roles(&self) -> usize {
        self.role_names.len()
    }

    /// Total number of interned users; fixed for the lifetime of this
    /// reachability problem and every sliced descendant of it.
    pub fn num_users(&self) -> usize {
        self.user_names.len()
    }

    /// The original declared name for `id`, for diagnostics.
    pub fn role_name(&self, id: RoleId) -> &str {
        self.role_names.name(id.0)
    }

    /// The original declared name for `id`, for diagnostics.
    pub fn user_name(&self, id: UserId) -> &str {
        self.user_names.name(id.0)
    }
}

/// An ARBAC instance plus a designated goal role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reachability {
    pub arbac: Arbac,
    pub goal: RoleId,
}

impl Reachability {
    pub(crate) fn new(arbac: Arbac, goal: RoleId) -> Self {
        Self { arbac, goal }
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "roles: {} (of {} declared), users: {}, can_assign: {}, can_revoke: {}, initial: {}, goal: {}",
            self.arbac.roles.len(),
            self.arbac.num_roles(),
            self.arbac.users.len(),
            self.arbac.policy.can_assign.len(),
            self.arbac.policy.can_revoke.len(),
            self.arbac.initial.len(),
            self.arbac.role_name(self.goal),
        )
    }
}
