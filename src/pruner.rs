//! Forward and backward slicing: fixed-point pruning passes that shrink
//! an ARBAC reachability problem into a smaller equivalent one without
//! changing whether the goal is reachable.
//!
//! Both passes over-approximate (forward: every role the system *might*
//! ever grant; backward: every role that *might* matter for reaching
//! the goal) and then discard whatever policy rules, roles, and
//! assignment entries fall outside that approximation. Composing the
//! two to a fixed point, as [`slice`] does, is what actually collapses
//! the state space that the searcher has to explore.

use rustc_hash::FxHashSet;

use crate::error::{AnalyserError, AnalyserResult};
use crate::model::{Assignment, CanAssign, CanRevoke, Policy, Reachability, RoleId};

/// Over-approximates the roles reachable from the initial assignment
/// under the current policy, then discards rules and roles that fall
/// outside it.
pub fn forward_slice(reach: &Reachability) -> Reachability {
    let arbac = &reach.arbac;

    let mut reachable: FxHashSet<RoleId> = arbac.initial.pairs().map(|(_, r)| r).collect();

    loop {
        let mut grown = false;
        for rule in &arbac.policy.can_assign {
            let admin_and_positive_held = reachable.contains(&rule.admin)
                && rule.positive.iter().all(|r| reachable.contains(r));
            if admin_and_positive_held && reachable.insert(rule.target) {
                grown = true;
            }
        }
        if !grown {
            break;
        }
    }

    let new_can_assign: Vec<CanAssign> = arbac
        .policy
        .can_assign
        .iter()
        .filter(|rule| {
            reachable.contains(&rule.admin)
                && reachable.contains(&rule.target)
                && rule.positive.iter().all(|r| reachable.contains(r))
        })
        .map(|rule| CanAssign {
            admin: rule.admin,
            positive: rule.positive.clone(),
            negative: rule.negative.intersection(&reachable).copied().collect(),
            target: rule.target,
        })
        .collect();

    let new_can_revoke: Vec<CanRevoke> = arbac
        .policy
        .can_revoke
        .iter()
        .filter(|rule| reachable.contains(&rule.admin) && reachable.contains(&rule.target))
        .copied()
        .collect();

    let mut next = reach.clone();
    next.arbac.roles = reachable;
    next.arbac.policy = Policy::new(new_can_assign, new_can_revoke);
    next
}

/// Over-approximates the roles relevant to reaching the goal, then
/// discards rules, roles, and assignment entries that fall outside it.
pub fn backward_slice(reach: &Reachability) -> Reachability {
    let arbac = &reach.arbac;

    let mut relevant: FxHashSet<RoleId> = FxHashSet::default();
    relevant.insert(reach.goal);

    loop {
        let mut grown = false;
        let mut newly_relevant = Vec::new();
        for rule in &arbac.policy.can_assign {
            if relevant.contains(&rule.target) {
                newly_relevant.extend(rule.positive.iter().copied());
                newly_relevant.extend(rule.negative.iter().copied());
                newly_relevant.push(rule.admin);
            }
        }
        for r in newly_relevant {
            if relevant.insert(r) {
                grown = true;
            }
        }
        if !grown {
            break;
        }
    }

    let new_can_assign: Vec<CanAssign> = arbac
        .policy
        .can_assign
        .iter()
        .filter(|rule| relevant.contains(&rule.target))
        .cloned()
        .collect();

    let new_can_revoke: Vec<CanRevoke> = arbac
        .policy
        .can_revoke
        .iter()
        .filter(|rule| relevant.contains(&rule.target))
        .copied()
        .collect();

    let mut new_initial = Assignment::empty(arbac.num_users(), arbac.num_roles());
    for (u, r) in arbac.initial.pairs() {
        if relevant.contains(&r) {
            new_initial.insert(u, r);
        }
    }

    let mut next = reach.clone();
    next.arbac.roles = relevant;
    next.arbac.policy = Policy::new(new_can_assign, new_can_revoke);
    next.arbac.initial = new_initial;
    next
}

/// Alternates [`forward_slice`] and [`backward_slice`] until the
/// reachability problem stops changing.
///
/// `max_iterations`, if set, bounds the number of forward/backward
/// rounds; the pass is structurally monotone on a finite role universe
/// and always reaches a fixed point, so this only guards against an
/// unexpectedly large model.
pub fn slice(reach: Reachability, max_iterations: Option<usize>) -> AnalyserResult<Reachability> {
    let mut current = reach;
    let mut rounds = 0usize;
    loop {
        if let Some(limit) = max_iterations {
            if rounds >= limit {
                return Err(AnalyserError::IterationLimit { rounds, limit });
            }
        }
        let next = backward_slice(&forward_slice(&current));
        rounds += 1;
        if next == current {
            return Ok(next);
        }
        current = next;
    }
}
