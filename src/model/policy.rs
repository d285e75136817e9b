//! Administrative rules: `CanAssign` and `CanRevoke`, and the ordered
//! policy that groups them.

use rustc_hash::FxHashSet;

use super::ids::RoleId;

/// `(admin, positive_roles, negative_roles, target)`: a user holding
/// `admin` may grant `target` to any user who holds every role in
/// `positive_roles` and none in `negative_roles`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanAssign {
    pub admin: RoleId,
    pub positive: FxHashSet<RoleId>,
    pub negative: FxHashSet<RoleId>,
    pub target: RoleId,
}

/// `(admin, target)`: a user holding `admin` may remove `target` from
/// any user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanRevoke {
    pub admin: RoleId,
    pub target: RoleId,
}

/// Order does not affect reachability semantics, only search order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Policy {
    pub can_assign: Vec<CanAssign>,
    pub can_revoke: Vec<CanRevoke>,
}

impl Policy {
    pub fn new(can_assign: Vec<CanAssign>, can_revoke: Vec<CanRevoke>) -> Self {
        Self {
            can_assign,
            can_revoke,
        }
    }
}
