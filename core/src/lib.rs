//! Spire Core Types
//!
//! This crate provides the symbol table entities shared by the tree and the analyzer:
//! - Identity types (SymbolId and its monotonic generator)
//! - Symbol kinds (routine, variable, label)
//! - Symbols, shared between scopes and tree nodes through `SymbolRef`

mod id;
mod symbol;

pub use id::*;
pub use symbol::*;
