//! Spire Integration Test Framework
//!
//! Builds statement trees the way the parser would, analyzes them, and runs
//! the analyzed program through a small trace runner that records which
//! commands executed and which variables were killed. The runner is a test
//! oracle for the meaning of desugared trees, not an execution engine.
//!
//! # Example
//!
//! ```ignore
//! use spire_tests::prelude::*;
//!
//! let trace = run_script(vec![times(3, vec![cmd("cast")])]).unwrap();
//! assert_eq!(trace.commands, vec!["cast", "cast", "cast"]);
//! ```


pub use error::{RunError, RunResult};
pub use runner::{run_script, Runner, Trace};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::build::*;
    pub use crate::error::{RunError, RunResult};
    pub use crate::runner::{run_script, Runner, Trace};
    pub use spire_analyzer::{analyze, Analyzer, Program, SemError};
    pub use spire_ast::*;
}
