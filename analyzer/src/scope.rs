//! Lexical scope and variable lifetime management.
//!
//! Scopes form a chain of frames. A *block* frame is a hard boundary: a
//! variable declared inside it cannot be killed from outside. A *branch*
//! frame (conditional arm, loop body) starts with a copy of its parent's
//! live variables, so sibling branches can diverge without affecting each
//! other or the parent.

use crate::{SemError, SemResult};
use spire_ast::{Selector, Span};
use spire_core::{Symbol, SymbolId, SymbolRef};
use std::collections::HashSet;

/// Handle to a frame in the scope chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One lookup context.
#[derive(Debug)]
struct Frame {
    parent: Option<ScopeId>,
    /// Symbols declared directly in this frame, in declaration order.
    symbols: Vec<SymbolRef>,
    /// Distinct command selectors seen in this frame.
    selectors: HashSet<Selector>,
    /// Live variables on this lexical path, in activation order.
    active: Vec<SymbolRef>,
    /// Variables this frame has killed.
    cleaned: HashSet<SymbolId>,
    is_block: bool,
}

impl Frame {
    fn new(parent: Option<ScopeId>, is_block: bool) -> Self {
        Self {
            parent,
            symbols: Vec::new(),
            selectors: HashSet::new(),
            active: Vec::new(),
            cleaned: HashSet::new(),
            is_block,
        }
    }
}

/// The scope chain of one analysis run.
///
/// Frames are pushed and popped in strict LIFO order, so the arena doubles
/// as the stack of open scopes. The root frame is a block and is never popped.
#[derive(Debug)]
pub struct Scope {
    frames: Vec<Frame>,
}

impl Scope {
    /// Create a scope chain holding only the root block.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(None, true)],
        }
    }

    /// Handle of the innermost open frame.
    pub fn current(&self) -> ScopeId {
        ScopeId(self.frames.len() - 1)
    }

    fn top(&self) -> &Frame {
        &self.frames[self.current().0]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let idx = self.current().0;
        &mut self.frames[idx]
    }

    /// Open a block frame. It starts with no live variables.
    pub fn push_block(&mut self) -> ScopeId {
        let parent = self.current();
        self.frames.push(Frame::new(Some(parent), true));
        tracing::trace!(scope = self.current().0, "push block");
        self.current()
    }

    /// Open a branch frame sharing a snapshot of the parent's live variables.
    pub fn push_branch(&mut self) -> ScopeId {
        let parent = self.current();
        let mut frame = Frame::new(Some(parent), false);
        frame.active = self.top().active.clone();
        self.frames.push(frame);
        tracing::trace!(scope = self.current().0, "push branch");
        self.current()
    }

    /// Close the innermost frame. The root frame stays.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            tracing::trace!(scope = self.current().0, "pop");
            self.frames.pop();
        }
    }

    /// Declare a symbol in the innermost frame.
    pub fn declare(&mut self, sym: SymbolRef) -> SymbolRef {
        self.top_mut().symbols.push(sym.clone());
        sym
    }

    /// Look up a routine by name, searching from innermost to outermost frame.
    pub fn lookup_routine(&self, name: &str, span: Span) -> SemResult<SymbolRef> {
        let mut cur = Some(self.current());
        while let Some(id) = cur {
            let frame = &self.frames[id.0];
            let found = frame
                .symbols
                .iter()
                .rev()
                .find(|sym| sym.is_routine() && sym.literal() == name);
            if let Some(sym) = found {
                return Ok(sym.clone());
            }
            cur = frame.parent;
        }
        Err(SemError::unresolved_routine(name, span))
    }

    /// Check whether `sym` is declared on the path up to the nearest block boundary.
    pub fn is_local(&self, sym: &Symbol) -> bool {
        let mut cur = Some(self.current());
        while let Some(id) = cur {
            let frame = &self.frames[id.0];
            if frame.symbols.iter().any(|s| **s == *sym) {
                return true;
            }
            // checked after the frame's own symbols
            if frame.is_block {
                break;
            }
            cur = frame.parent;
        }
        false
    }

    /// Mark a variable live in the innermost frame.
    pub fn activate(&mut self, sym: &SymbolRef) -> SemResult<()> {
        if self.is_active(sym) {
            return Err(SemError::variable_already_active(sym));
        }
        tracing::trace!(var = %sym, scope = self.current().0, "activate");
        self.top_mut().active.push(sym.clone());
        Ok(())
    }

    /// Mark a live, block-local variable dead in the innermost frame.
    pub fn kill(&mut self, sym: &Symbol) -> SemResult<()> {
        if !self.is_local(sym) {
            return Err(SemError::variable_not_local(sym));
        }
        if !self.is_active(sym) {
            if self.was_cleaned(sym) {
                return Err(SemError::variable_already_killed(sym));
            }
            return Err(SemError::variable_inactive(sym));
        }
        tracing::trace!(var = %sym, scope = self.current().0, "kill");
        let frame = self.top_mut();
        frame.cleaned.insert(sym.id());
        frame.active.retain(|s| **s != *sym);
        Ok(())
    }

    /// Live variables of the innermost frame, in activation order.
    pub fn active(&self) -> &[SymbolRef] {
        &self.top().active
    }

    pub fn is_active(&self, sym: &Symbol) -> bool {
        self.top().active.iter().any(|s| **s == *sym)
    }

    /// Whether the innermost frame has already killed `sym`.
    pub fn was_cleaned(&self, sym: &Symbol) -> bool {
        self.top().cleaned.contains(&sym.id())
    }

    /// Record a command selector. Returns `true` if it was not seen before in this frame.
    pub fn record_selector(&mut self, selector: Selector) -> bool {
        self.top_mut().selectors.insert(selector)
    }

    /// Distinct selectors recorded in the innermost frame.
    pub fn selectors(&self) -> &HashSet<Selector> {
        &self.top().selectors
    }

    /// Take the selector set of the innermost frame, leaving it empty.
    pub fn take_selectors(&mut self) -> HashSet<Selector> {
        std::mem::take(&mut self.top_mut().selectors)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
