//! Unified error model for the analyser core.
//!
//! The core never silently truncates a malformed model and never reports
//! a "reachable but unconfirmed" state: every failure the core can
//! produce is one of the variants below.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyserError {
    /// A role or user referenced by a rule, the initial assignment, or
    /// the goal is not declared; or the initial assignment contains a
    /// duplicate `(user, role)` entry.
    #[error("malformed ARBAC model: {0}")]
    MalformedModel(String),

    /// The search explored more worklist states than a host-configured
    /// limit allows. Fatal: there is no partial answer to fall back to.
    #[error("search exceeded node limit: explored {explored} states, limit was {limit}")]
    NodeLimit { explored: usize, limit: usize },

    /// Forward/backward slicing ran more rounds than a host-configured
    /// limit allows without reaching a fixed point.
    #[error("pruning exceeded iteration limit: ran {rounds} rounds, limit was {limit}")]
    IterationLimit { rounds: usize, limit: usize },
}

pub type AnalyserResult<T> = Result<T, AnalyserError>;
