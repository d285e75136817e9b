//! Operational limits for the analyser core.
//!
//! These are safety valves, not decision logic: every field is unset
//! by default, and setting one changes only whether the analyser gives
//! up early with [`crate::error::AnalyserError::NodeLimit`], never what
//! verdict it would otherwise have reached.

use std::env;

/// Maximum number of fixed-point iterations `slice` is allowed before
/// it is considered non-terminating. The pruning loop in this crate is
/// structurally monotone and cannot loop forever, so this exists only
/// to bound the unexpected: a corrupt or adversarially large policy.
const MAX_SLICE_ITERATIONS_VAR: &str = "ARBAC_MAX_SLICE_ITERATIONS";

/// Maximum number of worklist states the searcher may dequeue before
/// giving up.
const MAX_SEARCH_NODES_VAR: &str = "ARBAC_MAX_SEARCH_NODES";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_slice_iterations: Option<usize>,
    pub max_search_nodes: Option<usize>,
}

impl Limits {
    /// No limits: slicing and search run to their natural fixed point.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Reads `ARBAC_MAX_SLICE_ITERATIONS` / `ARBAC_MAX_SEARCH_NODES`
    /// from the environment. A variable that is absent leaves the
    /// corresponding limit unset; one present but not a valid `usize`
    /// is ignored rather than treated as a fatal configuration error.
    pub fn from_env() -> Self {
        Self {
            max_slice_iterations: read_usize_var(MAX_SLICE_ITERATIONS_VAR),
            max_search_nodes: read_usize_var(MAX_SEARCH_NODES_VAR),
        }
    }
}

fn read_usize_var(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_has_no_limits() {
        let limits = Limits::unbounded();
        assert_eq!(limits.max_slice_iterations, None);
        assert_eq!(limits.max_search_nodes, None);
    }

    #[test]
    fn from_env_ignores_unparsable_values() {
        env::set_var(MAX_SEARCH_NODES_VAR, "not-a-number");
        let limits = Limits::from_env();
        assert_eq!(limits.max_search_nodes, None);
        env::remove_var(MAX_SEARCH_NODES_VAR);
    }

    #[test]
    fn from_env_reads_a_valid_value() {
        env::set_var(MAX_SEARCH_NODES_VAR, "42");
        let limits = Limits::from_env();
        assert_eq!(limits.max_search_nodes, Some(42));
        env::remove_var(MAX_SEARCH_NODES_VAR);
    }
}
