//! Symbol identity.

use std::fmt;

/// Unique identifier for a symbol within one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SymbolId(u64);

impl SymbolId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out strictly increasing symbol ids.
#[derive(Debug, Clone, Default)]
pub struct SymbolIdGen {
    next: u64,
}

impl SymbolIdGen {
    /// Create a generator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that continues numbering from `next`.
    pub fn with_start(next: u64) -> Self {
        Self { next }
    }

    /// Allocate the next id, or `None` once the id space is exhausted.
    ///
    /// `u64::MAX` is never handed out; it stays reserved as the final `peek`.
    pub fn next_id(&mut self) -> Option<SymbolId> {
        let id = SymbolId(self.next);
        self.next = self.next.checked_add(1)?;
        Some(id)
    }

    /// The id the next call to `next_id` will return.
    pub fn peek(&self) -> SymbolId {
        SymbolId(self.next)
    }
}
