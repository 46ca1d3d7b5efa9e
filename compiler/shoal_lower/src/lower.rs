//! The rewrite pass: structured statements to flat label/goto sequences.

use shoal_ir::{
    BoundBinaryOp, BoundBlock, BoundExpr, BoundLabel, BoundStmt, SyntaxBinaryOp, TypeSymbol,
    VariableSymbol,
};
use shoal_stack::ensure_sufficient_stack;

/// One lowering pass over one statement tree.
///
/// The label counter lives on the instance: each top-level [`lower`] call
/// starts a fresh pass, so REPL submissions restart at `Label1` without
/// colliding — label names only need to be unique within one flattened body.
pub(crate) struct Lowerer {
    label_count: u32,
}

impl Lowerer {
    pub(crate) fn new() -> Self {
        Lowerer { label_count: 0 }
    }

    pub(crate) fn label_count(&self) -> u32 {
        self.label_count
    }

    fn generate_label(&mut self) -> BoundLabel {
        self.label_count += 1;
        BoundLabel::new(format!("Label{}", self.label_count))
    }

    /// Rewrite one statement; structured kinds are replaced by equivalent
    /// goto programs, and every rewrite re-enters here so nested control
    /// flow inside the produced block is rewritten too.
    pub(crate) fn rewrite_stmt(&mut self, stmt: BoundStmt) -> BoundStmt {
        ensure_sufficient_stack(|| match stmt {
            BoundStmt::Block(block) => {
                let statements = block
                    .statements
                    .into_iter()
                    .map(|s| self.rewrite_stmt(s))
                    .collect();
                BoundStmt::Block(BoundBlock::new(statements))
            }
            BoundStmt::If {
                condition,
                then_branch,
                else_branch,
            } => self.rewrite_if(condition, *then_branch, else_branch.map(|b| *b)),
            BoundStmt::While {
                condition,
                body,
                break_label,
                continue_label,
            } => self.rewrite_while(condition, *body, break_label, continue_label),
            BoundStmt::For {
                variable,
                lower_bound,
                upper_bound,
                body,
                break_label,
                continue_label,
            } => self.rewrite_for(
                variable,
                lower_bound,
                upper_bound,
                *body,
                break_label,
                continue_label,
            ),
            flat => flat,
        })
    }

    /// ```text
    /// if <cond> <then>            goto end unless <cond>
    ///                             <then>
    ///                             end:
    ///
    /// if <cond> <then>            goto else unless <cond>
    /// else <else>                 <then>
    ///                             goto end
    ///                             else:
    ///                             <else>
    ///                             end:
    /// ```
    fn rewrite_if(
        &mut self,
        condition: BoundExpr,
        then_branch: BoundStmt,
        else_branch: Option<BoundStmt>,
    ) -> BoundStmt {
        let result = match else_branch {
            None => {
                let end_label = self.generate_label();
                BoundStmt::Block(BoundBlock::new(vec![
                    BoundStmt::ConditionalGoto {
                        label: end_label.clone(),
                        condition,
                        jump_if_true: false,
                    },
                    then_branch,
                    BoundStmt::Label { label: end_label },
                ]))
            }
            Some(else_branch) => {
                let else_label = self.generate_label();
                let end_label = self.generate_label();
                BoundStmt::Block(BoundBlock::new(vec![
                    BoundStmt::ConditionalGoto {
                        label: else_label.clone(),
                        condition,
                        jump_if_true: false,
                    },
                    then_branch,
                    BoundStmt::Goto {
                        label: end_label.clone(),
                    },
                    BoundStmt::Label { label: else_label },
                    else_branch,
                    BoundStmt::Label { label: end_label },
                ]))
            }
        };
        self.rewrite_stmt(result)
    }

    /// ```text
    /// while <cond> <body>         goto continue
    ///                             body:
    ///                             <body>
    ///                             continue:
    ///                             goto body if <cond>
    ///                             break:
    /// ```
    ///
    /// The condition is checked before the first iteration (via the initial
    /// jump to `continue`), `continue` re-enters exactly before the
    /// re-check, and `break` is reached once the condition is false.
    fn rewrite_while(
        &mut self,
        condition: BoundExpr,
        body: BoundStmt,
        break_label: BoundLabel,
        continue_label: BoundLabel,
    ) -> BoundStmt {
        let body_label = self.generate_label();
        let result = BoundStmt::Block(BoundBlock::new(vec![
            BoundStmt::Goto {
                label: continue_label.clone(),
            },
            BoundStmt::Label {
                label: body_label.clone(),
            },
            body,
            BoundStmt::Label {
                label: continue_label,
            },
            BoundStmt::ConditionalGoto {
                label: body_label,
                condition,
                jump_if_true: true,
            },
            BoundStmt::Label { label: break_label },
        ]));
        self.rewrite_stmt(result)
    }

    /// ```text
    /// for <var> = <lo>..<hi>      let <var> = <lo>
    ///     <body>                  let upperBound = <hi>
    ///                             while <var> <= upperBound
    ///                                 <body>
    ///                                 continue:
    ///                                 <var> = <var> + 1
    /// ```
    ///
    /// Bounds are inclusive. The hidden `upperBound` local evaluates the
    /// upper bound once, before the loop. The `for`'s own continue label
    /// sits in front of the increment, so the inner while gets a fresh one.
    fn rewrite_for(
        &mut self,
        variable: VariableSymbol,
        lower_bound: BoundExpr,
        upper_bound: BoundExpr,
        body: BoundStmt,
        break_label: BoundLabel,
        continue_label: BoundLabel,
    ) -> BoundStmt {
        let upper_symbol = VariableSymbol::local("upperBound", TypeSymbol::Int, true);

        let variable_declaration = BoundStmt::VariableDeclaration {
            variable: variable.clone(),
            initializer: lower_bound,
        };
        let upper_declaration = BoundStmt::VariableDeclaration {
            variable: upper_symbol.clone(),
            initializer: upper_bound,
        };
        let condition = BoundExpr::Binary {
            left: Box::new(BoundExpr::variable(&variable)),
            op: bind_int_op(SyntaxBinaryOp::LessOrEquals),
            right: Box::new(BoundExpr::variable(&upper_symbol)),
        };
        let increment = BoundStmt::Expression(BoundExpr::Assignment {
            variable: variable.clone(),
            expression: Box::new(BoundExpr::Binary {
                left: Box::new(BoundExpr::variable(&variable)),
                op: bind_int_op(SyntaxBinaryOp::Plus),
                right: Box::new(BoundExpr::int(1)),
            }),
        });
        let while_body = BoundStmt::Block(BoundBlock::new(vec![
            body,
            BoundStmt::Label {
                label: continue_label,
            },
            increment,
        ]));
        let while_stmt = BoundStmt::While {
            condition,
            body: Box::new(while_body),
            break_label,
            continue_label: self.generate_label(),
        };
        let result = BoundStmt::Block(BoundBlock::new(vec![
            variable_declaration,
            upper_declaration,
            while_stmt,
        ]));
        self.rewrite_stmt(result)
    }

    /// Inline every nested block into one top-level sequence.
    ///
    /// Iterative with an explicit work stack: lowering output nests one
    /// block per rewritten construct, so recursion depth here would track
    /// loop/conditional nesting depth in the source. Children are pushed in
    /// reverse so they pop in original order.
    pub(crate) fn flatten(statement: BoundStmt) -> BoundBlock {
        let mut statements = Vec::new();
        let mut stack = vec![statement];

        while let Some(current) = stack.pop() {
            match current {
                BoundStmt::Block(block) => {
                    stack.extend(block.statements.into_iter().rev());
                }
                other => statements.push(other),
            }
        }

        BoundBlock::new(statements)
    }
}

/// Bind an operator over `int` operands.
///
/// The lowerer only builds `int × int` combinations, which always bind.
fn bind_int_op(op: SyntaxBinaryOp) -> BoundBinaryOp {
    match BoundBinaryOp::bind(op, TypeSymbol::Int, TypeSymbol::Int) {
        Some(bound) => bound,
        None => unreachable!("{op:?} over int operands must bind"),
    }
}
