//! Builds a validated [`Reachability`] problem from role/user names.
//!
//! This is the boundary the core actually trusts: it mirrors the output
//! contract a policy-text parser would produce (role list, user list,
//! initial assignment, `CanRevoke` list, `CanAssign` list, goal — in
//! that delivery order) but re-validates every reference itself, since
//! the core may not assume a caller's claim of well-formedness.

use rustc_hash::FxHashSet;

use crate::error::{AnalyserError, AnalyserResult};

use super::arbac::{Arbac, Reachability};
use super::assignment::Assignment;
use super::ids::{RoleId, UserId};
use super::interner::Interner;
use super::policy::{CanAssign, CanRevoke, Policy};

#[derive(Default)]
pub struct ModelBuilder {
    roles: Interner,
    users: Interner,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a role from the role list. Errors on a repeated
    /// declaration of the same name.
    pub fn declare_role(&mut self, name: &str) -> AnalyserResult<RoleId> {
        if self.roles.get(name).is_some() {
            return Err(AnalyserError::MalformedModel(format!(
                "duplicate role declaration: {name}"
            )));
        }
        Ok(RoleId(self.roles.intern(name)))
    }

    /// Declares a user from the user list. Errors on a repeated
    /// declaration of the same name.
    pub fn declare_user(&mut self, name: &str) -> AnalyserResult<UserId> {
        if self.users.get(name).is_some() {
            return Err(AnalyserError::MalformedModel(format!(
                "duplicate user declaration: {name}"
            )));
        }
        Ok(UserId(self.users.intern(name)))
    }

    /// Resolves a reference to an already-declared role.
    pub fn role_ref(&self, name: &str) -> AnalyserResult<RoleId> {
        self.roles
            .get(name)
            .map(RoleId)
            .ok_or_else(|| AnalyserError::MalformedModel(format!("undeclared role referenced: {name}")))
    }

    /// Resolves a reference to an already-declared user.
    pub fn user_ref(&self, name: &str) -> AnalyserResult<UserId> {
        self.users
            .get(name)
            .map(UserId)
            .ok_or_else(|| AnalyserError::MalformedModel(format!("undeclared user referenced: {name}")))
    }

    /// Builds a `CanAssign` rule from already-resolved ids, enforcing
    /// that positive and negative preconditions are disjoint.
    pub fn can_assign(
        &self,
        admin: RoleId,
        positive: impl IntoIterator<Item = RoleId>,
        negative: impl IntoIterator<Item = RoleId>,
        target: RoleId,
    ) -> AnalyserResult<CanAssign> {
        let positive: FxHashSet<RoleId> = positive.into_iter().collect();
        let negative: FxHashSet<RoleId> = negative.into_iter().collect();
        if positive.intersection(&negative).next().is_some() {
            return Err(AnalyserError::MalformedModel(
                "can_assign rule's positive and negative roles overlap".to_string(),
            ));
        }
        Ok(CanAssign {
            admin,
            positive,
            negative,
            target,
        })
    }

    /// Builds a `CanRevoke` rule from already-resolved ids.
    pub fn can_revoke(&self, admin: RoleId, target: RoleId) -> CanRevoke {
        CanRevoke { admin, target }
    }

    /// Assembles the final reachability problem. `initial` is the set
    /// of `(user, role)` pairs held before any rule fires.
    pub fn build(
        self,
        initial: impl IntoIterator<Item = (UserId, RoleId)>,
        can_assign: Vec<CanAssign>,
        can_revoke: Vec<CanRevoke>,
        goal: RoleId,
    ) -> AnalyserResult<Reachability> {
        let num_roles = self.roles.len();
        let num_users = self.users.len();

        let roles: FxHashSet<RoleId> = (0..num_roles as u32).map(RoleId).collect();
        let users: FxHashSet<UserId> = (0..num_users as u32).map(UserId).collect();

        if !roles.contains(&goal) {
            return Err(AnalyserError::MalformedModel(format!(
                "goal role {:?} is not declared",
                goal
            )));
        }

        let mut assignment = Assignment::empty(num_users, num_roles);
        for (u, r) in initial {
            if !users.contains(&u) {
                return Err(AnalyserError::MalformedModel(format!(
                    "initial assignment references undeclared user {u:?}"
                )));
            }
            if !roles.contains(&r) {
                return Err(AnalyserError::MalformedModel(format!(
                    "initial assignment references undeclared role {r:?}"
                )));
            }
            assignment.insert(u, r);
        }

        for rule in &can_assign {
            for r in [rule.admin, rule.target]
                .into_iter()
                .chain(rule.positive.iter().copied())
                .chain(rule.negative.iter().copied())
            {
                if !roles.contains(&r) {
                    return Err(AnalyserError::MalformedModel(format!(
                        "can_assign rule references undeclared role {r:?}"
                    )));
                }
            }
        }
        for rule in &can_revoke {
            for r in [rule.admin, rule.target] {
                if !roles.contains(&r) {
                    return Err(AnalyserError::MalformedModel(format!(
                        "can_revoke rule references undeclared role {r:?}"
                    )));
                }
            }
        }

        let arbac = Arbac::new(
            self.roles,
            self.users,
            roles,
            users,
            assignment,
            Policy::new(can_assign, can_revoke),
        );
        Ok(Reachability::new(arbac, goal))
    }
}
