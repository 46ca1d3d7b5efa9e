//! Evaluator test modules and shared builders.
//!
//! Tests construct bound trees directly (the binder is upstream of this
//! workspace), lower them, and execute them with buffered I/O handlers.

mod evaluator_tests;

use rustc_hash::FxHashMap;
use shoal_ir::{
    BoundBlock, BoundBinaryOp, BoundExpr, BoundLabel, BoundProgram, BoundStmt, FunctionSymbol,
    SyntaxBinaryOp, TypeSymbol, Value, VariableSymbol,
};
use shoal_lower::lower;

use crate::{evaluate_program, EvalError, InputSource, PrintHandler, VariableStores};

// Expression builders

pub(crate) fn binary(left: BoundExpr, op: SyntaxBinaryOp, right: BoundExpr) -> BoundExpr {
    let bound = BoundBinaryOp::bind(op, left.ty(), right.ty())
        .unwrap_or_else(|| panic!("{op:?} must bind for ({}, {})", left.ty(), right.ty()));
    BoundExpr::Binary {
        left: Box::new(left),
        op: bound,
        right: Box::new(right),
    }
}

pub(crate) fn assign(variable: &VariableSymbol, expression: BoundExpr) -> BoundExpr {
    BoundExpr::Assignment {
        variable: variable.clone(),
        expression: Box::new(expression),
    }
}

pub(crate) fn call(function: &FunctionSymbol, arguments: Vec<BoundExpr>) -> BoundExpr {
    BoundExpr::Call {
        function: function.clone(),
        arguments,
    }
}

pub(crate) fn call_builtin(builtin: shoal_ir::Builtin, arguments: Vec<BoundExpr>) -> BoundExpr {
    call(builtin.symbol(), arguments)
}

pub(crate) fn print_expr(argument: BoundExpr) -> BoundExpr {
    call_builtin(shoal_ir::Builtin::Print, vec![argument])
}

// Statement builders

pub(crate) fn expr_stmt(expr: BoundExpr) -> BoundStmt {
    BoundStmt::Expression(expr)
}

pub(crate) fn var_decl(variable: &VariableSymbol, initializer: BoundExpr) -> BoundStmt {
    BoundStmt::VariableDeclaration {
        variable: variable.clone(),
        initializer,
    }
}

pub(crate) fn block(statements: Vec<BoundStmt>) -> BoundStmt {
    BoundStmt::Block(BoundBlock::new(statements))
}

pub(crate) fn if_stmt(
    condition: BoundExpr,
    then_branch: BoundStmt,
    else_branch: Option<BoundStmt>,
) -> BoundStmt {
    BoundStmt::If {
        condition,
        then_branch: Box::new(then_branch),
        else_branch: else_branch.map(Box::new),
    }
}

pub(crate) fn while_stmt(condition: BoundExpr, body: BoundStmt, tag: usize) -> BoundStmt {
    BoundStmt::While {
        condition,
        body: Box::new(body),
        break_label: BoundLabel::new(format!("break{tag}")),
        continue_label: BoundLabel::new(format!("continue{tag}")),
    }
}

pub(crate) fn for_stmt(
    variable: &VariableSymbol,
    lower_bound: BoundExpr,
    upper_bound: BoundExpr,
    body: BoundStmt,
    tag: usize,
) -> BoundStmt {
    BoundStmt::For {
        variable: variable.clone(),
        lower_bound,
        upper_bound,
        body: Box::new(body),
        break_label: BoundLabel::new(format!("break{tag}")),
        continue_label: BoundLabel::new(format!("continue{tag}")),
    }
}

pub(crate) fn ret(expression: Option<BoundExpr>) -> BoundStmt {
    BoundStmt::Return { expression }
}

// Program assembly and execution

/// A script-only program whose body is lowered before execution.
pub(crate) fn script_program(body: BoundStmt) -> BoundProgram {
    program_with_functions(vec![], body)
}

/// A program with user functions (bodies lowered) plus a script body.
pub(crate) fn program_with_functions(
    user_functions: Vec<(FunctionSymbol, BoundStmt)>,
    script_body: BoundStmt,
) -> BoundProgram {
    let script = FunctionSymbol::new("$script", vec![], TypeSymbol::Any);
    let mut functions = FxHashMap::default();
    for (symbol, body) in user_functions {
        functions.insert(symbol, lower(body));
    }
    functions.insert(script.clone(), lower(script_body));
    BoundProgram {
        previous: None,
        functions,
        main_function: None,
        script_function: Some(script),
        diagnostics: vec![],
    }
}

/// The observable outcome of one run.
#[derive(Debug)]
pub(crate) struct Run {
    pub value: Option<Value>,
    pub output: String,
    pub globals: VariableStores,
}

pub(crate) fn try_run_program(
    program: &BoundProgram,
    mut globals: VariableStores,
    mut input: InputSource,
) -> Result<Run, EvalError> {
    let mut print = PrintHandler::buffer();
    let result = evaluate_program(program, &mut globals, &mut print, &mut input)?;
    Ok(Run {
        value: result.value,
        output: print.output().to_string(),
        globals,
    })
}

pub(crate) fn run_program(program: &BoundProgram) -> Run {
    try_run_program(program, VariableStores::new(), InputSource::queue([""; 0]))
        .expect("evaluation succeeds")
}

pub(crate) fn run_script(body: BoundStmt) -> Run {
    run_program(&script_program(body))
}

pub(crate) fn try_run_script(body: BoundStmt) -> Result<Run, EvalError> {
    try_run_program(
        &script_program(body),
        VariableStores::new(),
        InputSource::queue([""; 0]),
    )
}
