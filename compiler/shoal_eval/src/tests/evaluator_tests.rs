//! End-to-end evaluator behavior over lowered programs.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use shoal_diagnostic::{Diagnostic, Span};
use shoal_ir::{
    BoundBlock, BoundExpr, BoundProgram, BoundStmt, Builtin, FunctionSymbol, SyntaxBinaryOp,
    TypeSymbol, Value, VariableSymbol,
};

use super::{
    assign, binary, block, call, call_builtin, expr_stmt, for_stmt, if_stmt, print_expr,
    program_with_functions, ret, run_program, run_script, script_program, try_run_program,
    try_run_script, var_decl, while_stmt, Run,
};
use crate::{evaluate_program, EvalError, InputSource, PrintHandler, VariableStores};

fn int_local(name: &str) -> VariableSymbol {
    VariableSymbol::local(name, TypeSymbol::Int, false)
}

fn int_global(name: &str) -> VariableSymbol {
    VariableSymbol::global(name, TypeSymbol::Int, false)
}

#[test]
fn while_loop_prints_each_iteration_and_stops() {
    let x = int_global("x");
    let run = run_script(block(vec![
        var_decl(&x, BoundExpr::int(0)),
        while_stmt(
            binary(BoundExpr::variable(&x), SyntaxBinaryOp::Less, BoundExpr::int(3)),
            block(vec![
                expr_stmt(print_expr(BoundExpr::variable(&x))),
                expr_stmt(assign(
                    &x,
                    binary(BoundExpr::variable(&x), SyntaxBinaryOp::Plus, BoundExpr::int(1)),
                )),
            ]),
            0,
        ),
    ]));

    assert_eq!(run.output, "0\n1\n2\n");
    assert_eq!(run.globals.scalar(&x), Some(&Value::Int(3)));
}

#[test]
fn for_loop_bounds_are_inclusive() {
    let i = int_local("i");
    let run = run_script(for_stmt(
        &i,
        BoundExpr::int(1),
        BoundExpr::int(3),
        expr_stmt(print_expr(BoundExpr::variable(&i))),
        0,
    ));

    assert_eq!(run.output, "1\n2\n3\n");
}

#[test]
fn for_loop_with_empty_range_never_runs() {
    let i = int_local("i");
    let run = run_script(for_stmt(
        &i,
        BoundExpr::int(5),
        BoundExpr::int(4),
        expr_stmt(print_expr(BoundExpr::variable(&i))),
        0,
    ));

    assert_eq!(run.output, "");
}

#[test]
fn if_else_selects_the_else_branch() {
    let run = run_script(if_stmt(
        BoundExpr::bool(false),
        ret(Some(BoundExpr::int(1))),
        Some(ret(Some(BoundExpr::int(2)))),
    ));

    assert_eq!(run.value, Some(Value::Int(2)));
}

#[test]
fn factorial_recursion_and_frame_isolation() {
    // fact(n) = if n <= 1 { return 1 } else { return n * fact(n - 1) }
    let n = VariableSymbol::parameter("n", TypeSymbol::Int);
    let fact = FunctionSymbol::new("fact", vec![n.clone()], TypeSymbol::Int);
    let fact_body = if_stmt(
        binary(BoundExpr::variable(&n), SyntaxBinaryOp::LessOrEquals, BoundExpr::int(1)),
        ret(Some(BoundExpr::int(1))),
        Some(ret(Some(binary(
            BoundExpr::variable(&n),
            SyntaxBinaryOp::Star,
            call(
                &fact,
                vec![binary(BoundExpr::variable(&n), SyntaxBinaryOp::Minus, BoundExpr::int(1))],
            ),
        )))),
    );

    // The caller's own local `n` must be untouched by the callee's frames.
    let caller_n = int_local("n");
    let result = int_global("result");
    let run = run_program(&program_with_functions(
        vec![(fact.clone(), fact_body)],
        block(vec![
            var_decl(&caller_n, BoundExpr::int(99)),
            var_decl(&result, call(&fact, vec![BoundExpr::int(5)])),
            expr_stmt(BoundExpr::variable(&caller_n)),
        ]),
    ));

    assert_eq!(run.globals.scalar(&result), Some(&Value::Int(120)));
    assert_eq!(run.value, Some(Value::Int(99)));
}

#[test]
fn integer_and_float_addition_follow_static_types() {
    let int_run = run_script(expr_stmt(binary(
        BoundExpr::int(1),
        SyntaxBinaryOp::Plus,
        BoundExpr::int(1),
    )));
    assert_eq!(int_run.value, Some(Value::Int(2)));

    let float_run = run_script(expr_stmt(binary(
        BoundExpr::float(1.0),
        SyntaxBinaryOp::Plus,
        BoundExpr::int(1),
    )));
    assert_eq!(float_run.value, Some(Value::Float(2.0)));
}

#[test]
fn string_division_indexes_characters() {
    let run = run_script(expr_stmt(binary(
        BoundExpr::string("shoal"),
        SyntaxBinaryOp::Slash,
        BoundExpr::int(4),
    )));
    assert_eq!(run.value, Some(Value::string("l")));
}

#[test]
fn array_length_counts_elements_without_rendering() {
    let arr = VariableSymbol::local("arr", TypeSymbol::Int, false);
    let run = run_script(block(vec![
        BoundStmt::ArrayDeclaration {
            variable: arr.clone(),
            initializers: vec![
                BoundExpr::int(1),
                BoundExpr::int(2),
                BoundExpr::int(3),
                BoundExpr::int(4),
            ],
        },
        expr_stmt(call_builtin(Builtin::Length, vec![BoundExpr::variable(&arr)])),
    ]));

    assert_eq!(run.value, Some(Value::Int(4)));
}

#[test]
fn aggregates_render_bracketed_in_value_position() {
    let arr = VariableSymbol::local("arr", TypeSymbol::Int, false);
    let run = run_script(block(vec![
        BoundStmt::ArrayDeclaration {
            variable: arr.clone(),
            initializers: vec![BoundExpr::int(1), BoundExpr::int(2), BoundExpr::int(3)],
        },
        expr_stmt(print_expr(BoundExpr::variable(&arr))),
    ]));

    assert_eq!(run.output, "[1, 2, 3]\n");
}

#[test]
fn list_declaration_access_and_length() {
    let xs = VariableSymbol::local("xs", TypeSymbol::Int, false);
    let run = run_script(block(vec![
        BoundStmt::ListDeclaration {
            variable: xs.clone(),
            initializers: vec![BoundExpr::int(10), BoundExpr::int(20), BoundExpr::int(30)],
        },
        expr_stmt(print_expr(call_builtin(
            Builtin::Length,
            vec![BoundExpr::variable(&xs)],
        ))),
        expr_stmt(BoundExpr::ListAccess {
            variable: xs.clone(),
            key: Box::new(BoundExpr::int(1)),
            element_ty: TypeSymbol::Int,
        }),
    ]));

    assert_eq!(run.output, "3\n");
    assert_eq!(run.value, Some(Value::Int(20)));
}

#[test]
fn array_access_out_of_range_is_a_runtime_error() {
    let arr = VariableSymbol::local("arr", TypeSymbol::Int, false);
    let err = try_run_script(block(vec![
        BoundStmt::ArrayDeclaration {
            variable: arr.clone(),
            initializers: vec![BoundExpr::int(1)],
        },
        expr_stmt(BoundExpr::ArrayAccess {
            variable: arr,
            index: Box::new(BoundExpr::int(3)),
            element_ty: TypeSymbol::Int,
        }),
    ]))
    .unwrap_err();

    assert!(!err.is_internal());
    assert!(matches!(err, EvalError::IndexOutOfRange { index: 3, .. }));
}

#[test]
fn string_length_counts_characters() {
    let run = run_script(expr_stmt(call_builtin(
        Builtin::Length,
        vec![BoundExpr::string("día")],
    )));
    assert_eq!(run.value, Some(Value::Int(3)));
}

#[test]
fn globals_survive_the_call_but_locals_do_not() {
    // poke() { g = 42; let hidden = 7 }
    let g = int_global("g");
    let hidden = int_local("hidden");
    let poke = FunctionSymbol::new("poke", vec![], TypeSymbol::Void);
    let poke_body = block(vec![
        expr_stmt(assign(&g, BoundExpr::int(42))),
        var_decl(&hidden, BoundExpr::int(7)),
    ]);

    let run = run_program(&program_with_functions(
        vec![(poke.clone(), poke_body)],
        block(vec![
            expr_stmt(call(&poke, vec![])),
            expr_stmt(BoundExpr::variable(&g)),
        ]),
    ));

    assert_eq!(run.value, Some(Value::Int(42)));
    assert_eq!(run.globals.scalar(&g), Some(&Value::Int(42)));
    assert!(!run.globals.contains(&hidden));
}

#[test]
fn short_circuit_and_skips_the_right_operand() {
    let b = VariableSymbol::global("b", TypeSymbol::Bool, false);
    let run = run_script(block(vec![
        var_decl(&b, BoundExpr::bool(false)),
        expr_stmt(binary(
            BoundExpr::bool(false),
            SyntaxBinaryOp::AmpersandAmpersand,
            assign(&b, BoundExpr::bool(true)),
        )),
    ]));
    assert_eq!(run.globals.scalar(&b), Some(&Value::Bool(false)));

    // The eager form evaluates both sides.
    let b2 = VariableSymbol::global("b", TypeSymbol::Bool, false);
    let eager = run_script(block(vec![
        var_decl(&b2, BoundExpr::bool(false)),
        expr_stmt(binary(
            BoundExpr::bool(false),
            SyntaxBinaryOp::Ampersand,
            assign(&b2, BoundExpr::bool(true)),
        )),
    ]));
    assert_eq!(eager.globals.scalar(&b2), Some(&Value::Bool(true)));
}

#[test]
fn conversions_parse_and_render() {
    let run = run_script(expr_stmt(BoundExpr::Conversion {
        ty: TypeSymbol::Int,
        expression: Box::new(BoundExpr::string("42")),
    }));
    assert_eq!(run.value, Some(Value::Int(42)));

    let run = run_script(expr_stmt(BoundExpr::Conversion {
        ty: TypeSymbol::String,
        expression: Box::new(BoundExpr::float(2.5)),
    }));
    assert_eq!(run.value, Some(Value::string("2.5")));
}

#[test]
fn input_feeds_through_conversion() {
    let program = script_program(expr_stmt(BoundExpr::Conversion {
        ty: TypeSymbol::Int,
        expression: Box::new(call_builtin(Builtin::Input, vec![])),
    }));
    let run = try_run_program(
        &program,
        VariableStores::new(),
        InputSource::queue(["42"]),
    )
    .expect("evaluation succeeds");

    assert_eq!(run.value, Some(Value::Int(42)));
}

#[test]
fn rounding_builtins_coerce_to_int() {
    let cases = [
        (Builtin::Round, 2.6, 3),
        (Builtin::Round, 2.4, 2),
        (Builtin::Floor, 2.9, 2),
        (Builtin::Ceil, 2.1, 3),
        (Builtin::Floor, -2.1, -3),
        (Builtin::Ceil, -2.9, -2),
    ];
    for (builtin, input, expected) in cases {
        let run = run_script(expr_stmt(call_builtin(
            builtin,
            vec![BoundExpr::float(input)],
        )));
        assert_eq!(run.value, Some(Value::Int(expected)), "{builtin:?}({input})");
    }
}

#[test]
fn print_yields_no_value() {
    let run = run_script(block(vec![
        expr_stmt(BoundExpr::int(5)),
        expr_stmt(print_expr(BoundExpr::string("out"))),
    ]));
    // The last recorded value is print's null, not the 5 before it.
    assert_eq!(run.value, Some(Value::Null));
    assert_eq!(run.output, "out\n");
}

#[test]
fn script_falls_through_to_the_last_expression_value() {
    let run = run_script(block(vec![
        expr_stmt(BoundExpr::int(1)),
        expr_stmt(BoundExpr::int(2)),
    ]));
    assert_eq!(run.value, Some(Value::Int(2)));
}

#[test]
fn empty_program_yields_nothing() {
    let mut globals = VariableStores::new();
    let mut print = PrintHandler::buffer();
    let mut input = InputSource::queue([""; 0]);
    let result = evaluate_program(&BoundProgram::default(), &mut globals, &mut print, &mut input)
        .expect("evaluation succeeds");
    assert_eq!(result.value, None);
}

#[test]
fn binder_errors_skip_evaluation_entirely() {
    let mut program = script_program(expr_stmt(print_expr(BoundExpr::int(1))));
    program
        .diagnostics
        .push(Diagnostic::error(Span::new(0, 1), "unknown identifier 'x'"));

    let run = try_run_program(&program, VariableStores::new(), InputSource::queue([""; 0]))
        .expect("skipping is not an error");
    assert_eq!(run.value, None);
    assert_eq!(run.output, "");

    // Warnings alone do not block.
    let mut warned = script_program(expr_stmt(BoundExpr::int(7)));
    warned
        .diagnostics
        .push(Diagnostic::warning(Span::new(0, 1), "unused variable"));
    let run = try_run_program(&warned, VariableStores::new(), InputSource::queue([""; 0]))
        .expect("evaluation succeeds");
    assert_eq!(run.value, Some(Value::Int(7)));
}

#[test]
fn runaway_recursion_hits_the_call_depth_ceiling() {
    let rec = FunctionSymbol::new("rec", vec![], TypeSymbol::Int);
    let rec_body = ret(Some(call(&rec, vec![])));
    let program = program_with_functions(
        vec![(rec.clone(), rec_body)],
        expr_stmt(call(&rec, vec![])),
    );

    let err = try_run_program(&program, VariableStores::new(), InputSource::queue([""; 0]))
        .unwrap_err();
    assert!(matches!(err, EvalError::CallDepthExceeded { .. }));
    assert!(!err.is_internal());
}

#[test]
fn structured_statement_reaching_the_evaluator_is_an_internal_error() {
    // Bypass the lowerer on purpose.
    let script = FunctionSymbol::new("$script", vec![], TypeSymbol::Any);
    let body = BoundBlock::new(vec![while_stmt(
        BoundExpr::bool(false),
        expr_stmt(BoundExpr::int(1)),
        0,
    )]);
    let mut functions = rustc_hash::FxHashMap::default();
    functions.insert(script.clone(), body);
    let program = BoundProgram {
        script_function: Some(script),
        functions,
        ..BoundProgram::default()
    };

    let err = try_run_program(&program, VariableStores::new(), InputSource::queue([""; 0]))
        .unwrap_err();
    assert!(err.is_internal());
    assert!(err.to_string().contains("While"));
}

#[test]
fn repl_chain_inherits_functions_and_globals() {
    // Submission 1: declares twice() and assigns the global seed.
    let n = VariableSymbol::parameter("n", TypeSymbol::Int);
    let twice = FunctionSymbol::new("twice", vec![n.clone()], TypeSymbol::Int);
    let twice_body = ret(Some(binary(
        BoundExpr::variable(&n),
        SyntaxBinaryOp::Star,
        BoundExpr::int(2),
    )));
    let seed = int_global("seed");
    let first = program_with_functions(
        vec![(twice.clone(), twice_body)],
        expr_stmt(assign(&seed, BoundExpr::int(21))),
    );

    let Run { globals, .. } = run_program(&first);

    // Submission 2: calls the inherited function on the carried-over global.
    let second = script_program(expr_stmt(call(&twice, vec![BoundExpr::variable(&seed)])))
        .with_previous(Arc::new(first));
    let run = try_run_program(&second, globals, InputSource::queue([""; 0]))
        .expect("evaluation succeeds");

    assert_eq!(run.value, Some(Value::Int(42)));
}

#[test]
fn parameter_shadowing_across_frames_does_not_leak() {
    // outer(n) calls inner(n + 1); both parameters are named n.
    let inner_n = VariableSymbol::parameter("n", TypeSymbol::Int);
    let inner = FunctionSymbol::new("inner", vec![inner_n.clone()], TypeSymbol::Int);
    let inner_body = ret(Some(binary(
        BoundExpr::variable(&inner_n),
        SyntaxBinaryOp::Star,
        BoundExpr::int(10),
    )));

    let outer_n = VariableSymbol::parameter("n", TypeSymbol::Int);
    let outer = FunctionSymbol::new("outer", vec![outer_n.clone()], TypeSymbol::Int);
    let outer_body = block(vec![
        var_decl(
            &int_local("fromInner"),
            call(
                &inner,
                vec![binary(BoundExpr::variable(&outer_n), SyntaxBinaryOp::Plus, BoundExpr::int(1))],
            ),
        ),
        // The callee's n must not have clobbered ours.
        ret(Some(BoundExpr::variable(&outer_n))),
    ]);

    let run = run_program(&program_with_functions(
        vec![(inner, inner_body), (outer.clone(), outer_body)],
        expr_stmt(call(&outer, vec![BoundExpr::int(5)])),
    ));

    assert_eq!(run.value, Some(Value::Int(5)));
}
