//! Error types.
//!
//! Every failure is a distinct variant so callers can choose between
//! fixing the input, retrying with a larger budget, switching strategy
//! or giving up.

use thiserror::Error;

use crate::validation::ValidationError;

/// The problem description is structurally broken.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// One or more structural checks failed.
    #[error("invalid domain: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A solver did not produce a roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The whole search space was explored without a valid roster.
    ///
    /// Definitive: no roster exists within the strategy's candidate space.
    #[error("{strategy}: no valid roster exists (explored {nodes} nodes)")]
    Infeasible { strategy: &'static str, nodes: u64 },

    /// The search stopped at a budget limit.
    ///
    /// Inconclusive: a roster may still exist.
    #[error("{strategy}: budget exhausted ({reason})")]
    BudgetExhausted {
        strategy: &'static str,
        reason: String,
    },
}

impl SolveError {
    /// Whether the failure proves infeasibility.
    pub fn is_definitive(&self) -> bool {
        matches!(self, SolveError::Infeasible { .. })
    }

    /// Name of the strategy that failed.
    pub fn strategy(&self) -> &'static str {
        match self {
            SolveError::Infeasible { strategy, .. } | SolveError::BudgetExhausted { strategy, .. } => {
                *strategy
            }
        }
    }
}

/// Malformed line in a text roster file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// What was wrong.
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Loading a text roster file failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}
