//! Text rendering of the statement tree.
//!
//! Statements render one per line, nested bodies indented by two spaces.

use crate::{Command, Expr, RoutineDef, Selector, Stmt, StmtList};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_list(out: &mut String, list: &StmtList, depth: usize) -> fmt::Result {
    for stmt in &list.stmts {
        write_stmt(out, stmt, depth)?;
    }
    Ok(())
}

fn write_block(
    out: &mut String,
    header: fmt::Arguments<'_>,
    body: &StmtList,
    depth: usize,
) -> fmt::Result {
    pad(out, depth);
    writeln!(out, "{} {{", header)?;
    write_list(out, body, depth + 1)?;
    pad(out, depth);
    writeln!(out, "}}")
}

fn write_line(out: &mut String, line: fmt::Arguments<'_>, depth: usize) -> fmt::Result {
    pad(out, depth);
    writeln!(out, "{}", line)
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) -> fmt::Result {
    match stmt {
        Stmt::List(list) => write_list(out, list, depth),
        Stmt::RoutineDef(def) => {
            write_block(out, format_args!("block {}", def.name), &def.body, depth)
        }
        Stmt::If(stmt) => {
            write_block(out, format_args!("if {}", stmt.cond), &stmt.then_branch, depth)?;
            write_block(out, format_args!("else"), &stmt.else_branch, depth)
        }
        Stmt::Loop(stmt) => write_block(out, format_args!("loop"), &stmt.body, depth),
        Stmt::While(stmt) => {
            write_block(out, format_args!("while {}", stmt.cond), &stmt.body, depth)
        }
        Stmt::Until(stmt) => {
            write_block(out, format_args!("until {}", stmt.cond), &stmt.body, depth)
        }
        Stmt::Times(stmt) => {
            write_block(out, format_args!("times {}", stmt.count), &stmt.body, depth)
        }
        Stmt::UntilRegion(region) => {
            write_line(
                out,
                format_args!("until_region {} {} {{", region.label, region.cond),
                depth,
            )?;
            write_block(
                out,
                format_args!("while {}", region.body.cond),
                &region.body.body,
                depth + 1,
            )?;
            write_line(out, format_args!("}}"), depth)
        }
        Stmt::Call(call) => write_line(out, format_args!("call {}", call.target), depth),
        Stmt::Command(cmd) => write_line(out, format_args!("{}", cmd.command), depth),
        Stmt::Return(_) => write_line(out, format_args!("return"), depth),
        Stmt::Break(_) => write_line(out, format_args!("break"), depth),
        Stmt::DefVar(def) => write_line(out, format_args!("defvar {}", def.var), depth),
        Stmt::WriteVar(write) => write_line(
            out,
            format_args!("writevar {} = {}", write.var, write.value),
            depth,
        ),
        Stmt::KillVar(kill) => write_line(out, format_args!("killvar {}", kill.var), depth),
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_stmt(&mut out, self, 0)?;
        f.write_str(out.trim_end_matches('\n'))
    }
}

impl fmt::Display for RoutineDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_block(&mut out, format_args!("block {}", self.name), &self.body, 0)?;
        f.write_str(out.trim_end_matches('\n'))
    }
}

impl fmt::Display for StmtList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_list(&mut out, self, 0)?;
        f.write_str(out.trim_end_matches('\n'))
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Expr]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit.kind),
            Expr::Ident(name, _) => write!(f, "{}", name),
            Expr::Sym(sym, _) => write!(f, "{}", sym),
            Expr::ReadVar(sym) => write!(f, "{}", sym),
            Expr::BinaryOp(op, left, right, _) => write!(f, "({} {} {})", left, op, right),
            Expr::UnaryOp(op, operand, _) => match op {
                crate::UnaryOp::Not => write!(f, "(not {})", operand),
                crate::UnaryOp::Neg => write!(f, "(-{})", operand),
            },
            Expr::FnCall(fc) => {
                write!(f, "{}(", fc.name)?;
                write_args(f, &fc.args)?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_args(f, &self.args)?;
        write!(f, ") @ {}", self.selector)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_everyone() {
            return write!(f, "*");
        }
        write!(f, "[{}]", self.targets.join(", "))
    }
}
