//! Analyzer error types.

use spire_ast::{Expr, Span, Stmt};
use spire_core::Symbol;
use thiserror::Error;

/// Errors that can occur during analysis. Any of them aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemError {
    /// No routine with this name is visible from the call site.
    #[error("Unable to find routine '{name}' in scope at line {line}, column {column}")]
    UnresolvedRoutine {
        name: String,
        line: usize,
        column: usize,
    },

    /// A routine definition whose name is not a plain identifier.
    #[error(
        "Routine definitions require a plain identifier, got '{found}' at line {line}, column {column}"
    )]
    InvalidRoutineName {
        found: String,
        line: usize,
        column: usize,
    },

    /// A call whose target is neither a name nor a resolved routine.
    #[error("Malformed call target '{target}' at line {line}, column {column}")]
    MalformedCall {
        target: String,
        line: usize,
        column: usize,
    },

    /// `return` outside of any routine body.
    #[error("Return used outside of a routine at line {line}, column {column}")]
    ReturnOutsideRoutine { line: usize, column: usize },

    /// `break` outside of any loop.
    #[error("Break used outside of a loop at line {line}, column {column}")]
    BreakOutsideLoop { line: usize, column: usize },

    /// Activation of a variable that is already live.
    #[error("Attempted to activate an already active variable: {var}")]
    VariableAlreadyActive { var: String },

    /// Kill of a variable that is not declared inside the current block.
    #[error("Attempted to kill a variable that isn't local to the current block: {var}")]
    VariableNotLocal { var: String },

    /// Kill of a variable that is not live.
    #[error("Attempted to kill an inactive variable: {var}")]
    VariableInactive { var: String },

    /// Kill of a variable this scope already cleaned up.
    #[error("Attempted to kill a variable that was already killed in this scope: {var}")]
    VariableAlreadyKilled { var: String },

    /// A routine symbol linked to a second definition.
    #[error("Routine '{name}' is already bound to a definition")]
    DefinitionAlreadyBound { name: String },

    /// A statement kind the analyzer does not accept as input.
    #[error("Unhandled statement type: {kind}")]
    UnhandledStatement { kind: String },

    /// The symbol id space ran out.
    #[error("Symbol ids exhausted")]
    SymbolIdsExhausted,
}

impl SemError {
    pub fn unresolved_routine(name: impl Into<String>, span: Span) -> Self {
        Self::UnresolvedRoutine {
            name: name.into(),
            line: span.line,
            column: span.column,
        }
    }

    pub fn invalid_routine_name(found: &Expr, span: Span) -> Self {
        Self::InvalidRoutineName {
            found: found.to_string(),
            line: span.line,
            column: span.column,
        }
    }

    pub fn malformed_call(target: &Expr, span: Span) -> Self {
        Self::MalformedCall {
            target: target.to_string(),
            line: span.line,
            column: span.column,
        }
    }

    pub fn return_outside_routine(span: Span) -> Self {
        Self::ReturnOutsideRoutine {
            line: span.line,
            column: span.column,
        }
    }

    pub fn break_outside_loop(span: Span) -> Self {
        Self::BreakOutsideLoop {
            line: span.line,
            column: span.column,
        }
    }

    pub fn variable_already_active(var: &Symbol) -> Self {
        Self::VariableAlreadyActive {
            var: var.to_string(),
        }
    }

    pub fn variable_not_local(var: &Symbol) -> Self {
        Self::VariableNotLocal {
            var: var.to_string(),
        }
    }

    pub fn variable_inactive(var: &Symbol) -> Self {
        Self::VariableInactive {
            var: var.to_string(),
        }
    }

    pub fn variable_already_killed(var: &Symbol) -> Self {
        Self::VariableAlreadyKilled {
            var: var.to_string(),
        }
    }

    pub fn definition_already_bound(routine: &Symbol) -> Self {
        Self::DefinitionAlreadyBound {
            name: routine.literal().to_string(),
        }
    }

    pub fn unhandled_statement(stmt: &Stmt) -> Self {
        Self::UnhandledStatement {
            kind: stmt.kind_name().to_string(),
        }
    }
}

/// Result type for analyzer operations.
pub type SemResult<T> = Result<T, SemError>;
