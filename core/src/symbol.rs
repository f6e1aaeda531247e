//! Symbols for named and anonymous program entities.
//!
//! A symbol is created once, when the analyzer first meets the entity it
//! names, and is never mutated afterwards. The only exception is the
//! definition handle of a routine, which is written exactly once when the
//! routine's definition is hoisted.

use crate::SymbolId;
use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Shared handle to a symbol. Scopes and tree nodes hold clones of the same `Rc`.
pub type SymbolRef = Rc<Symbol>;

/// What a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A callable routine.
    Routine,
    /// A variable introduced by the analyzer.
    Variable,
    /// A control-flow label.
    Label,
}

/// An identity record for a program entity.
///
/// Two symbols are equal exactly when their ids are equal; the literal is
/// only for display and name lookup.
#[derive(Debug, Clone)]
pub struct Symbol {
    kind: SymbolKind,
    literal: String,
    id: SymbolId,
    /// Index of the defining routine in the analyzed program's routine list.
    definition: OnceCell<usize>,
}

impl Symbol {
    pub fn new(kind: SymbolKind, literal: impl Into<String>, id: SymbolId) -> Self {
        Self {
            kind,
            literal: literal.into(),
            id,
            definition: OnceCell::new(),
        }
    }

    /// A routine symbol keeps the user-visible name.
    pub fn routine(name: impl Into<String>, id: SymbolId) -> Self {
        Self::new(SymbolKind::Routine, name, id)
    }

    /// Variable literals are wrapped in colons so they never collide with identifiers.
    pub fn variable(name: &str, id: SymbolId) -> Self {
        Self::new(SymbolKind::Variable, format!(":{}:", name), id)
    }

    /// Label literals carry a leading colon.
    pub fn label(name: &str, id: SymbolId) -> Self {
        Self::new(SymbolKind::Label, format!(":{}", name), id)
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn is_routine(&self) -> bool {
        self.kind == SymbolKind::Routine
    }

    pub fn is_variable(&self) -> bool {
        self.kind == SymbolKind::Variable
    }

    /// Index of the routine definition this symbol names, once hoisted.
    pub fn definition(&self) -> Option<usize> {
        self.definition.get().copied()
    }

    /// Link this symbol to its definition.
    /// Returns `false` if a definition was already linked.
    pub fn bind_definition(&self, index: usize) -> bool {
        self.definition.set(index).is_ok()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.literal, self.id)
    }
}
