//! Spire Analyzer
//!
//! Semantic analysis between the parser and the execution engine.
//! Resolves routine names to symbols, tracks variable lifetime across
//! scopes, desugars counted and post-condition loops, and hoists routine
//! definitions out of the statement sequence.

mod analyzer;
mod error;
mod program;
mod scope;

pub use analyzer::Analyzer;
pub use error::{SemError, SemResult};
pub use program::Program;
pub use scope::{Scope, ScopeId};

use spire_ast::Stmt;

/// Analyze a program with a fresh analyzer.
pub fn analyze(stmts: Vec<Stmt>) -> SemResult<Program> {
    Analyzer::new().analyze_program(stmts)
}
