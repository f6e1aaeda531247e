//! Spire Statement Tree
//!
//! This crate provides the tree the parser hands to the analyzer and the
//! analyzer hands to the execution engine:
//! - Statement variants (routines, control flow, commands, variable lifetime)
//! - Expressions (literals, names, resolved symbols, operators, runtime queries)
//! - A text printer for dumping analyzed programs

mod ast;
mod display;

pub use ast::*;
