//! Worklist search over the ARBAC transition system: BFS over reachable
//! user-to-role assignments, looking for one where the goal role is
//! held.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::error::{AnalyserError, AnalyserResult};
use crate::model::{Assignment, Reachability, RoleId, UserId};

/// Tries to apply a single `can_assign` rule to `target_user`. Returns
/// `None` if any precondition fails or the user already holds the
/// target role.
fn assign(
    reach: &Reachability,
    state: &Assignment,
    rule_idx: usize,
    target_user: UserId,
) -> Option<Assignment> {
    let rule = &reach.arbac.policy.can_assign[rule_idx];

    let admin_present = reach
        .arbac
        .users
        .iter()
        .any(|&u| state.contains(u, rule.admin));
    if !admin_present {
        return None;
    }

    let has_all_positive = rule.positive.iter().all(|&r| state.contains(target_user, r));
    if !has_all_positive {
        return None;
    }

    let has_any_negative = rule.negative.iter().any(|&r| state.contains(target_user, r));
    if has_any_negative {
        return None;
    }

    if state.contains(target_user, rule.target) {
        return None;
    }

    let mut next = state.clone();
    next.insert(target_user, rule.target);
    Some(next)
}

/// Tries to apply a single `can_revoke` rule to `target_user`. Returns
/// `None` if the admin precondition fails or the revocation has no
/// effect.
fn revoke(
    reach: &Reachability,
    state: &Assignment,
    rule_idx: usize,
    target_user: UserId,
) -> Option<Assignment> {
    let rule = &reach.arbac.policy.can_revoke[rule_idx];

    let admin_present = reach
        .arbac
        .users
        .iter()
        .any(|&u| state.contains(u, rule.admin));
    if !admin_present {
        return None;
    }

    let mut next = state.clone();
    if next.remove(target_user, rule.target) {
        Some(next)
    } else {
        None
    }
}

fn holds_goal(state: &Assignment, goal: RoleId, users: &FxHashSet<UserId>) -> bool {
    users.iter().any(|&u| state.contains(u, goal))
}

/// BFS worklist search for a user-to-role assignment, reachable from
/// the initial one via `can_assign`/`can_revoke` rule applications,
/// under which some user holds the goal role.
///
/// `node_limit`, if set, bounds the number of states dequeued and
/// marked visited before giving up with [`AnalyserError::NodeLimit`].
pub fn search(reach: &Reachability, node_limit: Option<usize>) -> AnalyserResult<bool> {
    let mut queue: VecDeque<Assignment> = VecDeque::new();
    let mut visited: FxHashSet<Assignment> = FxHashSet::default();

    queue.push_back(reach.arbac.initial.clone());

    let mut explored = 0usize;

    while let Some(state) = queue.pop_front() {
        if visited.contains(&state) {
            continue;
        }

        if let Some(limit) = node_limit {
            if explored >= limit {
                return Err(AnalyserError::NodeLimit {
                    explored,
                    limit,
                });
            }
        }
        explored += 1;
        visited.insert(state.clone());

        if holds_goal(&state, reach.goal, &reach.arbac.users) {
            debug!(explored, "goal role reached");
            return Ok(true);
        }

        for rule_idx in 0..reach.arbac.policy.can_assign.len() {
            for &user in &reach.arbac.users {
                if let Some(next) = assign(reach, &state, rule_idx, user) {
                    if next != state {
                        queue.push_back(next);
                    }
                }
            }
        }
        for rule_idx in 0..reach.arbac.policy.can_revoke.len() {
            for &user in &reach.arbac.users {
                if let Some(next) = revoke(reach, &state, rule_idx, user) {
                    if next != state {
                        queue.push_back(next);
                    }
                }
            }
        }
        trace!(queued = queue.len(), visited = visited.len(), "expanded state");
    }

    debug!(explored, "search exhausted without reaching goal");
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelBuilder;

    #[test]
    fn goal_held_initially_is_reachable_without_expansion() {
        let mut b = ModelBuilder::new();
        let goal = b.declare_role("goal").unwrap();
        let alice = b.declare_user("alice").unwrap();
        let reach = b.build([(alice, goal)], vec![], vec![], goal).unwrap();
        assert!(search(&reach, None).unwrap());
    }

    #[test]
    fn single_assignment_reaches_goal() {
        let mut b = ModelBuilder::new();
        let admin = b.declare_role("admin").unwrap();
        let goal = b.declare_role("goal").unwrap();
        let alice = b.declare_user("alice").unwrap();
        let rule = b.can_assign(admin, [], [], goal).unwrap();
        let reach = b
            .build([(alice, admin)], vec![rule], vec![], goal)
            .unwrap();
        assert!(search(&reach, None).unwrap());
    }

    #[test]
    fn negative_precondition_blocks_assignment() {
        let mut b = ModelBuilder::new();
        let admin = b.declare_role("admin").unwrap();
        let blocker = b.declare_role("blocker").unwrap();
        let goal = b.declare_role("goal").unwrap();
        let alice = b.declare_user("alice").unwrap();
        let rule = b.can_assign(admin, [], [blocker], goal).unwrap();
        let reach = b
            .build(
                [(alice, admin), (alice, blocker)],
                vec![rule],
                vec![],
                goal,
            )
            .unwrap();
        assert!(!search(&reach, None).unwrap());
    }

    #[test]
    fn revoke_then_assign_can_clear_a_negative_precondition() {
        let mut b = ModelBuilder::new();
        let admin = b.declare_role("admin").unwrap();
        let blocker = b.declare_role("blocker").unwrap();
        let goal = b.declare_role("goal").unwrap();
        let alice = b.declare_user("alice").unwrap();
        let assign_rule = b.can_assign(admin, [], [blocker], goal).unwrap();
        let revoke_rule = b.can_revoke(admin, blocker);
        let reach = b
            .build(
                [(alice, admin), (alice, blocker)],
                vec![assign_rule],
                vec![revoke_rule],
                goal,
            )
            .unwrap();
        assert!(search(&reach, None).unwrap());
    }

    #[test]
    fn node_limit_is_enforced_before_goal_is_found() {
        let mut b = ModelBuilder::new();
        let admin = b.declare_role("admin").unwrap();
        let goal = b.declare_role("goal").unwrap();
        let alice = b.declare_user("alice").unwrap();
        let bob = b.declare_user("bob").unwrap();
        let reach = b
            .build([(alice, admin), (bob, admin)], vec![], vec![], goal)
            .unwrap();
        let err = search(&reach, Some(0)).unwrap_err();
        assert!(matches!(err, AnalyserError::NodeLimit { .. }));
    }
}
