//! Main analyzer implementation.

use crate::{Program, Scope, SemError, SemResult};
use spire_ast::{
    BreakStmt, CallStmt, DefVarStmt, Expr, IfStmt, KillVarStmt, LoopStmt, ReturnStmt, RoutineDef,
    Stmt, StmtList, TimesStmt, UntilRegion, UntilStmt, WhileStmt, WriteVarStmt,
};
use spire_core::{Symbol, SymbolId, SymbolIdGen, SymbolRef};
use std::rc::Rc;

/// The Analyzer resolves routine names, tracks variable lifetime and
/// rewrites high-level loops into primitive control flow.
///
/// One analyzer handles one program; `analyze_program` consumes it.
pub struct Analyzer {
    /// Current scope chain.
    scope: Scope,
    /// Symbol id generator for this run.
    ids: SymbolIdGen,
    /// Routine definitions hoisted so far, in completion order.
    routines: Vec<RoutineDef>,
    /// Number of enclosing routine bodies.
    routine_depth: usize,
    /// Number of enclosing loops within the current routine body.
    loop_depth: usize,
    /// Loop depths saved when entering routine bodies.
    loop_depth_stack: Vec<usize>,
}

impl Analyzer {
    /// Create a new analyzer numbering symbols from zero.
    pub fn new() -> Self {
        Self::with_starting_id(0)
    }

    /// Create a new analyzer numbering symbols from `next_id`.
    pub fn with_starting_id(next_id: u64) -> Self {
        Self {
            scope: Scope::new(),
            ids: SymbolIdGen::with_start(next_id),
            routines: Vec::new(),
            routine_depth: 0,
            loop_depth: 0,
            loop_depth_stack: Vec::new(),
        }
    }

    /// Analyze a whole program.
    ///
    /// Returns the rewritten top-level statements with routine definitions
    /// hoisted into `Program::routines`.
    #[tracing::instrument(skip_all, fields(stmts = stmts.len()))]
    pub fn analyze_program(mut self, stmts: Vec<Stmt>) -> SemResult<Program> {
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            if let Some(stmt) = self.analyze_stmt(stmt)? {
                out.push(stmt);
            }
        }

        tracing::debug!(
            routines = self.routines.len(),
            stmts = out.len(),
            "analysis complete"
        );

        Ok(Program {
            stmts: out,
            routines: self.routines,
            selectors: self.scope.take_selectors(),
            next_id: self.ids.peek(),
        })
    }

    /// Analyze a statement. `None` means the statement was hoisted out.
    pub fn analyze_stmt(&mut self, stmt: Stmt) -> SemResult<Option<Stmt>> {
        match stmt {
            Stmt::RoutineDef(def) => {
                self.analyze_routine_def(def)?;
                Ok(None)
            }
            Stmt::List(list) => Ok(Some(Stmt::List(self.analyze_list(list)?))),
            Stmt::Call(call) => Ok(Some(Stmt::Call(self.analyze_call(call)?))),
            Stmt::Command(cmd) => {
                self.scope.record_selector(cmd.command.selector.clone());
                Ok(Some(Stmt::Command(cmd)))
            }
            Stmt::If(stmt) => Ok(Some(Stmt::If(self.analyze_if(stmt)?))),
            Stmt::Loop(stmt) => Ok(Some(Stmt::Loop(self.analyze_loop(stmt)?))),
            Stmt::While(stmt) => Ok(Some(Stmt::While(self.analyze_while(stmt)?))),
            Stmt::Until(stmt) => self.desugar_until(stmt).map(Some),
            Stmt::Times(stmt) => self.desugar_times(stmt).map(Some),
            Stmt::Return(ret) => self.analyze_return(ret).map(Some),
            Stmt::Break(brk) => Ok(Some(Stmt::Break(self.analyze_break(brk)?))),
            Stmt::DefVar(_) | Stmt::WriteVar(_) | Stmt::KillVar(_) => Ok(Some(stmt)),
            Stmt::UntilRegion(_) => Err(SemError::unhandled_statement(&stmt)),
        }
    }

    /// Analyze each statement in order, dropping hoisted ones.
    fn analyze_list(&mut self, list: StmtList) -> SemResult<StmtList> {
        let mut out = Vec::with_capacity(list.stmts.len());
        for stmt in list.stmts {
            if let Some(stmt) = self.analyze_stmt(stmt)? {
                out.push(stmt);
            }
        }
        Ok(StmtList::new(out))
    }

    /// Expressions pass through unchanged.
    fn analyze_expr(&mut self, expr: Expr) -> SemResult<Expr> {
        Ok(expr)
    }

    // ==================== SCOPES ====================

    fn open_block(&mut self) {
        self.scope.push_block();
        self.loop_depth_stack.push(self.loop_depth);
        self.loop_depth = 0;
        self.routine_depth += 1;
    }

    fn close_block(&mut self) {
        self.scope.pop();
        self.loop_depth = self.loop_depth_stack.pop().unwrap_or(0);
        self.routine_depth -= 1;
    }

    fn open_loop(&mut self) {
        self.scope.push_branch();
        self.loop_depth += 1;
    }

    fn close_loop(&mut self) {
        self.scope.pop();
        self.loop_depth -= 1;
    }

    // ==================== SYMBOLS ====================

    fn fresh_id(&mut self) -> SemResult<SymbolId> {
        self.ids.next_id().ok_or(SemError::SymbolIdsExhausted)
    }

    fn gen_routine_sym(&mut self, name: String) -> SemResult<SymbolRef> {
        let id = self.fresh_id()?;
        Ok(self.scope.declare(Rc::new(Symbol::routine(name, id))))
    }

    fn gen_var_sym(&mut self, name: &str) -> SemResult<SymbolRef> {
        let id = self.fresh_id()?;
        Ok(self.scope.declare(Rc::new(Symbol::variable(name, id))))
    }

    fn gen_label_sym(&mut self, name: &str) -> SemResult<SymbolRef> {
        let id = self.fresh_id()?;
        Ok(self.scope.declare(Rc::new(Symbol::label(name, id))))
    }

    /// Declare a fresh anonymous variable and make it live.
    fn define_var(&mut self) -> SemResult<SymbolRef> {
        let var = self.gen_var_sym("anonymous")?;
        self.scope.activate(&var)?;
        Ok(var)
    }

    /// Kill every live variable, most recently activated first.
    fn cleanup_active_vars(&mut self) -> SemResult<Vec<Stmt>> {
        let live: Vec<SymbolRef> = self.scope.active().iter().rev().cloned().collect();
        let mut kills = Vec::with_capacity(live.len());
        for var in live {
            self.scope.kill(&var)?;
            kills.push(Stmt::KillVar(KillVarStmt { var }));
        }
        Ok(kills)
    }

    // ==================== STATEMENTS ====================

    /// Analyze a routine definition and hoist it into the routine list.
    fn analyze_routine_def(&mut self, mut def: RoutineDef) -> SemResult<()> {
        let (name, name_span) = match &def.name {
            Expr::Ident(name, span) => (name.clone(), *span),
            other => return Err(SemError::invalid_routine_name(other, def.span)),
        };
        let sym = self.gen_routine_sym(name)?;

        // every routine gets an exit point, even if the author omitted one
        def.body.stmts.push(Stmt::Return(ReturnStmt { span: def.span }));

        self.open_block();
        let body = self.analyze_list(std::mem::take(&mut def.body));
        self.close_block();
        let body = body?;

        def.body = body;
        def.name = Expr::Sym(sym.clone(), name_span);

        let index = self.routines.len();
        if !sym.bind_definition(index) {
            return Err(SemError::definition_already_bound(&sym));
        }
        tracing::debug!(routine = %sym, index, "hoisted routine");
        self.routines.push(def);
        Ok(())
    }

    /// Resolve a call target to a routine symbol.
    fn analyze_call(&mut self, mut call: CallStmt) -> SemResult<CallStmt> {
        let resolved = match &call.target {
            Expr::Ident(name, span) => (self.scope.lookup_routine(name, call.span)?, *span),
            Expr::Sym(..) => return Ok(call),
            other => return Err(SemError::malformed_call(other, call.span)),
        };
        call.target = Expr::Sym(resolved.0, resolved.1);
        Ok(call)
    }

    /// Each arm gets its own branch scope; neither affects the parent.
    fn analyze_if(&mut self, stmt: IfStmt) -> SemResult<IfStmt> {
        let IfStmt {
            cond,
            then_branch,
            else_branch,
            span,
        } = stmt;
        let cond = self.analyze_expr(cond)?;

        self.scope.push_branch();
        let then_branch = self.analyze_list(then_branch);
        self.scope.pop();
        let then_branch = then_branch?;

        self.scope.push_branch();
        let else_branch = self.analyze_list(else_branch);
        self.scope.pop();
        let else_branch = else_branch?;

        Ok(IfStmt {
            cond,
            then_branch,
            else_branch,
            span,
        })
    }

    fn analyze_loop(&mut self, mut stmt: LoopStmt) -> SemResult<LoopStmt> {
        self.open_loop();
        let body = self.analyze_list(stmt.body);
        self.close_loop();
        stmt.body = body?;
        Ok(stmt)
    }

    fn analyze_while(&mut self, mut stmt: WhileStmt) -> SemResult<WhileStmt> {
        stmt.cond = self.analyze_expr(stmt.cond)?;
        self.open_loop();
        let body = self.analyze_list(stmt.body);
        self.close_loop();
        stmt.body = body?;
        Ok(stmt)
    }

    /// Rewrite `until g { body }` as
    /// `if g {} else { until_region(g) { while not g { body } } }`.
    fn desugar_until(&mut self, stmt: UntilStmt) -> SemResult<Stmt> {
        let UntilStmt { cond, body, span } = stmt;

        // analyzed once, placed three times
        let cond = self.analyze_expr(cond)?;
        self.open_loop();
        let body = self.analyze_list(body);
        self.close_loop();
        let body = body?;

        let label = self.gen_label_sym("until")?;
        tracing::debug!(label = %label, "desugared until loop");

        let region = UntilRegion {
            label,
            cond: cond.clone(),
            body: WhileStmt {
                cond: Expr::not(cond.clone()),
                body,
                span,
            },
        };
        Ok(Stmt::If(IfStmt {
            cond,
            then_branch: StmtList::default(),
            else_branch: StmtList::new(vec![Stmt::UntilRegion(region)]),
            span,
        }))
    }

    /// Rewrite `times n { body }` as a countdown over a fresh variable.
    fn desugar_times(&mut self, stmt: TimesStmt) -> SemResult<Stmt> {
        let TimesStmt {
            count,
            mut body,
            span,
        } = stmt;

        let var = self.define_var()?;
        body.stmts.push(Stmt::WriteVar(WriteVarStmt {
            var: var.clone(),
            value: Expr::sub(Expr::ReadVar(var.clone()), Expr::int(1)),
        }));
        let cond = Expr::gt(Expr::ReadVar(var.clone()), Expr::int(0));
        let countdown = self.analyze_while(WhileStmt { cond, body, span });
        let killed = self.scope.kill(&var);
        let countdown = countdown?;
        killed?;

        let out = Stmt::list(vec![
            Stmt::DefVar(DefVarStmt { var: var.clone() }),
            Stmt::WriteVar(WriteVarStmt {
                var: var.clone(),
                value: Expr::int(i64::from(count)),
            }),
            Stmt::While(countdown),
            Stmt::KillVar(KillVarStmt { var: var.clone() }),
        ]);

        tracing::debug!(var = %var, count, "desugared times loop");
        Ok(out)
    }

    /// A return kills every live variable before leaving the routine.
    fn analyze_return(&mut self, ret: ReturnStmt) -> SemResult<Stmt> {
        if self.routine_depth == 0 {
            return Err(SemError::return_outside_routine(ret.span));
        }
        let mut stmts = self.cleanup_active_vars()?;
        stmts.push(Stmt::Return(ret));
        Ok(Stmt::list(stmts))
    }

    fn analyze_break(&mut self, brk: BreakStmt) -> SemResult<BreakStmt> {
        if self.loop_depth == 0 {
            return Err(SemError::break_outside_loop(brk.span));
        }
        Ok(brk)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
