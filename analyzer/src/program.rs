//! Analyzer output.

use spire_ast::{RoutineDef, Selector, Stmt};
use spire_core::{Symbol, SymbolId};
use std::collections::HashSet;
use std::fmt;

/// An analyzed program, ready for the execution engine.
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Top-level statements with routine definitions removed.
    pub stmts: Vec<Stmt>,
    /// Hoisted routine definitions. Each routine symbol's definition handle indexes this list.
    pub routines: Vec<RoutineDef>,
    /// Distinct command selectors used at the top level.
    pub selectors: HashSet<Selector>,
    /// First symbol id not used by this run.
    pub next_id: SymbolId,
}

impl Program {
    /// Find the definition a resolved call target refers to.
    pub fn routine(&self, sym: &Symbol) -> Option<&RoutineDef> {
        let def = self.routines.get(sym.definition()?)?;
        match def.symbol() {
            Some(defined) if **defined == *sym => Some(def),
            _ => None,
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for routine in &self.routines {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", routine)?;
            first = false;
        }
        for stmt in &self.stmts {
            let text = stmt.to_string();
            if text.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", text)?;
            first = false;
        }
        Ok(())
    }
}
