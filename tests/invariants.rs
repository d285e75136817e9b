//! Cross-cutting invariants from the reachability spec that are best
//! exercised end to end (pruning + search together) rather than against
//! either component in isolation.

use arbac_analyser::config::Limits;
use arbac_analyser::driver::{decide, Verdict};
use arbac_analyser::model::ModelBuilder;
use arbac_analyser::pruner::slice;

#[test]
fn slice_is_idempotent_on_its_own_output() {
    let mut b = ModelBuilder::new();
    let admin = b.declare_role("admin").unwrap();
    let mid = b.declare_role("mid").unwrap();
    let goal = b.declare_role("goal").unwrap();
    let alice = b.declare_user("alice").unwrap();
    let r1 = b.can_assign(admin, [], [], mid).unwrap();
    let r2 = b.can_assign(admin, [mid], [], goal).unwrap();
    let reach = b
        .build([(alice, admin)], vec![r1, r2], vec![], goal)
        .unwrap();

    let once = slice(reach, None).unwrap();
    let twice = slice(once.clone(), None).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn reordering_can_assign_and_can_revoke_does_not_change_the_verdict() {
    let mut b = ModelBuilder::new();
    let admin = b.declare_role("admin").unwrap();
    let x = b.declare_role("x").unwrap();
    let goal = b.declare_role("goal").unwrap();
    let alice = b.declare_user("alice").unwrap();
    let r_goal = b.can_assign(admin, [], [x], goal).unwrap();
    let r_other = b.can_assign(admin, [], [], x).unwrap();
    let revoke = b.can_revoke(admin, x);

    let forward = b
        .build(
            [(alice, admin), (alice, x)],
            vec![r_goal.clone(), r_other.clone()],
            vec![revoke],
            goal,
        )
        .unwrap();

    let mut b2 = ModelBuilder::new();
    let admin2 = b2.declare_role("admin").unwrap();
    let x2 = b2.declare_role("x").unwrap();
    let goal2 = b2.declare_role("goal").unwrap();
    let alice2 = b2.declare_user("alice").unwrap();
    let r_goal2 = b2.can_assign(admin2, [], [x2], goal2).unwrap();
    let r_other2 = b2.can_assign(admin2, [], [], x2).unwrap();
    let revoke2 = b2.can_revoke(admin2, x2);
    let reversed = b2
        .build(
            [(alice2, admin2), (alice2, x2)],
            vec![r_other2, r_goal2],
            vec![revoke2],
            goal2,
        )
        .unwrap();

    assert_eq!(
        decide(forward, Limits::unbounded()).unwrap(),
        decide(reversed, Limits::unbounded()).unwrap()
    );
}

#[test]
fn goal_already_held_short_circuits_without_any_rule() {
    let mut b = ModelBuilder::new();
    let goal = b.declare_role("goal").unwrap();
    let alice = b.declare_user("alice").unwrap();
    let reach = b.build([(alice, goal)], vec![], vec![], goal).unwrap();
    assert_eq!(
        decide(reach, Limits::unbounded()).unwrap(),
        Verdict::Reachable
    );
}

#[test]
fn empty_can_assign_list_means_revocations_alone_cannot_reach_the_goal() {
    let mut b = ModelBuilder::new();
    let admin = b.declare_role("admin").unwrap();
    let goal = b.declare_role("goal").unwrap();
    let alice = b.declare_user("alice").unwrap();
    let revoke = b.can_revoke(admin, goal);
    let reach = b
        .build([(alice, admin)], vec![], vec![revoke], goal)
        .unwrap();
    assert_eq!(
        decide(reach, Limits::unbounded()).unwrap(),
        Verdict::NotReachable
    );
}
