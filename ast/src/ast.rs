//! Abstract Syntax Tree types for Spire.

use spire_core::SymbolRef;
use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A statement in the Spire language.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    RoutineDef(RoutineDef),
    List(StmtList),
    Call(CallStmt),
    Command(CommandStmt),
    If(IfStmt),
    Loop(LoopStmt),
    While(WhileStmt),
    Until(UntilStmt),
    Times(TimesStmt),
    UntilRegion(UntilRegion),
    Return(ReturnStmt),
    Break(BreakStmt),
    DefVar(DefVarStmt),
    WriteVar(WriteVarStmt),
    KillVar(KillVarStmt),
}

impl Stmt {
    /// Wrap statements in a list.
    pub fn list(stmts: Vec<Stmt>) -> Self {
        Stmt::List(StmtList::new(stmts))
    }

    /// Short name of the statement kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::RoutineDef(_) => "routine definition",
            Stmt::List(_) => "statement list",
            Stmt::Call(_) => "call",
            Stmt::Command(_) => "command",
            Stmt::If(_) => "if",
            Stmt::Loop(_) => "loop",
            Stmt::While(_) => "while",
            Stmt::Until(_) => "until",
            Stmt::Times(_) => "times",
            Stmt::UntilRegion(_) => "until region",
            Stmt::Return(_) => "return",
            Stmt::Break(_) => "break",
            Stmt::DefVar(_) => "defvar",
            Stmt::WriteVar(_) => "writevar",
            Stmt::KillVar(_) => "killvar",
        }
    }
}

/// An ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StmtList {
    pub stmts: Vec<Stmt>,
}

impl StmtList {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

// ==================== ROUTINES ====================

/// Routine definition: `block name { body }`.
/// The parser supplies `Expr::Ident`; the analyzer replaces it with `Expr::Sym`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineDef {
    pub name: Expr,
    pub body: StmtList,
    pub span: Span,
}

impl RoutineDef {
    /// The resolved routine symbol, if the definition has been analyzed.
    pub fn symbol(&self) -> Option<&SymbolRef> {
        match &self.name {
            Expr::Sym(sym, _) => Some(sym),
            _ => None,
        }
    }
}

/// Call of a routine by name or by resolved symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub target: Expr,
    pub span: Span,
}

// ==================== COMMANDS ====================

/// A primitive command handed through to the execution engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandStmt {
    pub command: Command,
    pub span: Span,
}

/// Command payload. Only the selector is looked at during analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: String,
    pub args: Vec<Expr>,
    pub selector: Selector,
}

/// The set of targets a command is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selector {
    pub targets: Vec<String>,
}

impl Selector {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    /// A selector with no explicit targets addresses every target.
    pub fn is_everyone(&self) -> bool {
        self.targets.is_empty()
    }
}

// ==================== CONTROL FLOW ====================

/// IF cond { then } ELSE { else }
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_branch: StmtList,
    pub else_branch: StmtList,
    pub span: Span,
}

/// Unconditional repetition, left only through break or return.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopStmt {
    pub body: StmtList,
    pub span: Span,
}

/// Pre-condition repetition.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: StmtList,
    pub span: Span,
}

/// Post-condition repetition: run until `cond` becomes true.
#[derive(Debug, Clone, PartialEq)]
pub struct UntilStmt {
    pub cond: Expr,
    pub body: StmtList,
    pub span: Span,
}

/// Counted repetition: run `body` exactly `count` times.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesStmt {
    pub count: u32,
    pub body: StmtList,
    pub span: Span,
}

/// Tagged region produced by desugaring an UNTIL loop.
/// `cond` is the original guard, `body` loops while the guard is false.
#[derive(Debug, Clone, PartialEq)]
pub struct UntilRegion {
    pub label: SymbolRef,
    pub cond: Expr,
    pub body: WhileStmt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReturnStmt {
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreakStmt {
    pub span: Span,
}

// ==================== VARIABLES ====================

#[derive(Debug, Clone, PartialEq)]
pub struct DefVarStmt {
    pub var: SymbolRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteVarStmt {
    pub var: SymbolRef,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KillVarStmt {
    pub var: SymbolRef,
}

// ==================== EXPRESSIONS ====================

/// Expression types.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal(Literal),
    /// Unresolved name
    Ident(String, Span),
    /// Resolved symbol reference
    Sym(SymbolRef, Span),
    /// Current value of an analyzer variable
    ReadVar(SymbolRef),
    /// Binary operation
    BinaryOp(BinaryOp, Box<Expr>, Box<Expr>, Span),
    /// Unary operation
    UnaryOp(UnaryOp, Box<Expr>, Span),
    /// Runtime query, evaluated by the execution engine
    FnCall(FnCall),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span,
            Expr::Ident(_, span) => *span,
            Expr::Sym(_, span) => *span,
            Expr::ReadVar(_) => Span::default(),
            Expr::BinaryOp(_, _, _, span) => *span,
            Expr::UnaryOp(_, _, span) => *span,
            Expr::FnCall(fc) => fc.span,
        }
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal {
            kind: LiteralKind::Int(value),
            span: Span::default(),
        })
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal(Literal {
            kind: LiteralKind::Bool(value),
            span: Span::default(),
        })
    }

    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Expr::Ident(name.into(), span)
    }

    pub fn not(operand: Expr) -> Self {
        let span = operand.span();
        Expr::UnaryOp(UnaryOp::Not, Box::new(operand), span)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let span = left.span();
        Expr::BinaryOp(op, Box::new(left), Box::new(right), span)
    }

    pub fn gt(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Gt, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Sub, left, right)
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Bool(b) => write!(f, "{}", b),
            LiteralKind::Int(i) => write!(f, "{}", i),
            LiteralKind::Float(fl) => write!(f, "{}", fl),
            LiteralKind::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    // Logical
    And,
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::NotEq => write!(f, "!="),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::LtEq => write!(f, "<="),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::GtEq => write!(f, ">="),
            BinaryOp::And => write!(f, "and"),
            BinaryOp::Or => write!(f, "or"),
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "not"),
            UnaryOp::Neg => write!(f, "-"),
        }
    }
}

/// Runtime query: `name(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FnCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}
