//! Indented debug rendering of bound trees.
//!
//! Presentation only: nothing here evaluates anything. The output is for
//! humans inspecting what the binder and lowerer produced (`--emit-tree`
//! style tooling in the front end).

use std::fmt::{self, Write};

use crate::bound::{BoundExpr, BoundStmt};

const INDENT: &str = "    ";

/// Render a statement tree into `out`.
pub fn write_stmt(out: &mut impl Write, stmt: &BoundStmt, indent: usize) -> fmt::Result {
    let pad = INDENT.repeat(indent);
    match stmt {
        BoundStmt::VariableDeclaration {
            variable,
            initializer,
        } => {
            write!(out, "{pad}let {variable} = ")?;
            write_expr(out, initializer)?;
            writeln!(out)
        }
        BoundStmt::ArrayDeclaration {
            variable,
            initializers,
        } => {
            write!(out, "{pad}let {variable}[{}] = ", initializers.len())?;
            write_expr_list(out, initializers)?;
            writeln!(out)
        }
        BoundStmt::ListDeclaration {
            variable,
            initializers,
        } => {
            write!(out, "{pad}let {variable}<> = ")?;
            write_expr_list(out, initializers)?;
            writeln!(out)
        }
        BoundStmt::Expression(expr) => {
            write!(out, "{pad}")?;
            write_expr(out, expr)?;
            writeln!(out)
        }
        BoundStmt::Block(block) => {
            writeln!(out, "{pad}{{")?;
            for statement in &block.statements {
                write_stmt(out, statement, indent + 1)?;
            }
            writeln!(out, "{pad}}}")
        }
        BoundStmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            write!(out, "{pad}if ")?;
            write_expr(out, condition)?;
            writeln!(out)?;
            write_stmt(out, then_branch, indent + 1)?;
            if let Some(else_branch) = else_branch {
                writeln!(out, "{pad}else")?;
                write_stmt(out, else_branch, indent + 1)?;
            }
            Ok(())
        }
        BoundStmt::While {
            condition, body, ..
        } => {
            write!(out, "{pad}while ")?;
            write_expr(out, condition)?;
            writeln!(out)?;
            write_stmt(out, body, indent + 1)
        }
        BoundStmt::For {
            variable,
            lower_bound,
            upper_bound,
            body,
            ..
        } => {
            write!(out, "{pad}for {variable} = ")?;
            write_expr(out, lower_bound)?;
            write!(out, "..")?;
            write_expr(out, upper_bound)?;
            writeln!(out)?;
            write_stmt(out, body, indent + 1)
        }
        BoundStmt::Goto { label } => writeln!(out, "{pad}goto {label}"),
        BoundStmt::ConditionalGoto {
            label,
            condition,
            jump_if_true,
        } => {
            let polarity = if *jump_if_true { "if" } else { "unless" };
            write!(out, "{pad}goto {label} {polarity} ")?;
            write_expr(out, condition)?;
            writeln!(out)
        }
        BoundStmt::Label { label } => writeln!(out, "{pad}{label}:"),
        BoundStmt::Return { expression } => {
            write!(out, "{pad}return")?;
            if let Some(expression) = expression {
                write!(out, " ")?;
                write_expr(out, expression)?;
            }
            writeln!(out)
        }
    }
}

/// Render an expression into `out`.
pub fn write_expr(out: &mut impl Write, expr: &BoundExpr) -> fmt::Result {
    match expr {
        BoundExpr::Literal { value, ty } => {
            if *ty == crate::types::TypeSymbol::String {
                write!(out, "\"{value}\"")
            } else {
                write!(out, "{value}")
            }
        }
        BoundExpr::Variable { variable } => write!(out, "{variable}"),
        BoundExpr::ArrayAccess {
            variable, index, ..
        } => {
            write!(out, "{variable}[")?;
            write_expr(out, index)?;
            write!(out, "]")
        }
        BoundExpr::ListAccess { variable, key, .. } => {
            write!(out, "{variable}<")?;
            write_expr(out, key)?;
            write!(out, ">")
        }
        BoundExpr::Assignment {
            variable,
            expression,
        } => {
            write!(out, "{variable} = ")?;
            write_expr(out, expression)
        }
        BoundExpr::Unary { op, operand } => {
            write!(out, "{:?}(", op.kind)?;
            write_expr(out, operand)?;
            write!(out, ")")
        }
        BoundExpr::Binary { left, op, right } => {
            write!(out, "{:?}(", op.kind)?;
            write_expr(out, left)?;
            write!(out, ", ")?;
            write_expr(out, right)?;
            write!(out, ")")
        }
        BoundExpr::Call {
            function,
            arguments,
        } => {
            write!(out, "{function}(")?;
            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    write!(out, ", ")?;
                }
                write_expr(out, argument)?;
            }
            write!(out, ")")
        }
        BoundExpr::Conversion { ty, expression } => {
            write!(out, "{ty}(")?;
            write_expr(out, expression)?;
            write!(out, ")")
        }
    }
}

fn write_expr_list(out: &mut impl Write, exprs: &[BoundExpr]) -> fmt::Result {
    write!(out, "[")?;
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        write_expr(out, expr)?;
    }
    write!(out, "]")
}

/// Render a statement tree to a `String`.
pub fn stmt_to_string(stmt: &BoundStmt) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_stmt(&mut out, stmt, 0);
    out
}
