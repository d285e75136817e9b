//! Top-level decision procedure: prune, then search.

use tracing::info;

use crate::config::Limits;
use crate::error::AnalyserResult;
use crate::model::Reachability;
use crate::pruner;
use crate::searcher;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Reachable,
    NotReachable,
}

impl Verdict {
    pub fn is_reachable(self) -> bool {
        matches!(self, Verdict::Reachable)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Reachable => write!(f, "Reachable"),
            Verdict::NotReachable => write!(f, "Not reachable"),
        }
    }
}

/// Decides whether `reach.goal` is reachable from the initial
/// assignment under the policy, pruning the problem to a fixed point
/// first and then running the worklist search over what remains.
pub fn decide(reach: Reachability, limits: Limits) -> AnalyserResult<Verdict> {
    info!(model = %reach, "starting analysis");

    let pruned = pruner::slice(reach, limits.max_slice_iterations)?;
    info!(model = %pruned, "pruning complete");

    let reachable = searcher::search(&pruned, limits.max_search_nodes)?;
    Ok(if reachable {
        Verdict::Reachable
    } else {
        Verdict::NotReachable
    })
}
