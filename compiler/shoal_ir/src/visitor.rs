//! Read-only traversal of the bound tree.
//!
//! Override `visit_*` to act at specific nodes; call the matching `walk_*`
//! to continue into children. The visitor mutates only its own state — the
//! tree stays immutable, which is what debug tooling and structural checks
//! (label collection, flatness audits) need.

use crate::bound::{BoundExpr, BoundStmt};

/// Bound-tree visitor.
pub trait BoundVisitor {
    fn visit_expr(&mut self, expr: &BoundExpr) {
        walk_expr(self, expr);
    }

    fn visit_stmt(&mut self, stmt: &BoundStmt) {
        walk_stmt(self, stmt);
    }
}

/// Traverse an expression's children.
pub fn walk_expr<V: BoundVisitor + ?Sized>(visitor: &mut V, expr: &BoundExpr) {
    match expr {
        BoundExpr::Literal { .. } | BoundExpr::Variable { .. } => {}
        BoundExpr::ArrayAccess { index, .. } => visitor.visit_expr(index),
        BoundExpr::ListAccess { key, .. } => visitor.visit_expr(key),
        BoundExpr::Assignment { expression, .. } | BoundExpr::Conversion { expression, .. } => {
            visitor.visit_expr(expression);
        }
        BoundExpr::Unary { operand, .. } => visitor.visit_expr(operand),
        BoundExpr::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        BoundExpr::Call { arguments, .. } => {
            for argument in arguments {
                visitor.visit_expr(argument);
            }
        }
    }
}

/// Traverse a statement's children.
pub fn walk_stmt<V: BoundVisitor + ?Sized>(visitor: &mut V, stmt: &BoundStmt) {
    match stmt {
        BoundStmt::VariableDeclaration { initializer, .. } => visitor.visit_expr(initializer),
        BoundStmt::ArrayDeclaration { initializers, .. }
        | BoundStmt::ListDeclaration { initializers, .. } => {
            for initializer in initializers {
                visitor.visit_expr(initializer);
            }
        }
        BoundStmt::Expression(expr) => visitor.visit_expr(expr),
        BoundStmt::Block(block) => {
            for statement in &block.statements {
                visitor.visit_stmt(statement);
            }
        }
        BoundStmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_stmt(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        BoundStmt::While {
            condition, body, ..
        } => {
            visitor.visit_expr(condition);
            visitor.visit_stmt(body);
        }
        BoundStmt::For {
            lower_bound,
            upper_bound,
            body,
            ..
        } => {
            visitor.visit_expr(lower_bound);
            visitor.visit_expr(upper_bound);
            visitor.visit_stmt(body);
        }
        BoundStmt::ConditionalGoto { condition, .. } => visitor.visit_expr(condition),
        BoundStmt::Return { expression } => {
            if let Some(expression) = expression {
                visitor.visit_expr(expression);
            }
        }
        BoundStmt::Goto { .. } | BoundStmt::Label { .. } => {}
    }
}
