//! The execution state machine.
//!
//! One evaluator instance executes one program run. A body executes as a
//! flat statement sequence behind an instruction pointer: labels are scanned
//! into a `label -> index` map once, jumps assign the pointer, everything
//! else advances it. Function calls re-enter the same machine with a fresh
//! local frame; built-ins dispatch on their tag instead.
//!
//! Structured statements (`Block`, `If`, `While`, `For`) must have been
//! lowered away; meeting one here aborts with an internal error.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use shoal_ir::{
    BinaryOpKind, BoundBinaryOp, BoundBlock, BoundExpr, BoundLabel, BoundProgram, BoundStmt,
    Builtin, FunctionSymbol, Value, VariableSymbol,
};
use shoal_stack::ensure_sufficient_stack;

use crate::cast::{as_bool, as_float, as_int};
use crate::conversions::convert;
use crate::environment::VariableStores;
use crate::errors::{
    call_depth_exceeded, index_out_of_range, internal, unsupported_length, EvalResult,
};
use crate::handlers::{InputSource, PrintHandler};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;

/// Ceiling on user-level call nesting.
///
/// Each language-level call adds one `run_body` activation to the host
/// stack; bounding it turns runaway recursion into a reportable runtime
/// error instead of a host stack overflow.
pub const MAX_CALL_DEPTH: usize = 1000;

/// How a variable read is consumed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum AccessMode {
    /// The value itself; aggregates render to their textual form.
    Value,
    /// Only the element/character count, skipping any rendering.
    Length,
}

/// Executes one lowered program.
pub struct Evaluator<'a> {
    program: &'a BoundProgram,
    globals: &'a mut VariableStores,
    frames: Vec<VariableStores>,
    print: &'a mut PrintHandler,
    input: &'a mut InputSource,
    last_value: Value,
    call_depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        program: &'a BoundProgram,
        globals: &'a mut VariableStores,
        print: &'a mut PrintHandler,
        input: &'a mut InputSource,
    ) -> Self {
        Evaluator {
            program,
            globals,
            frames: Vec::new(),
            print,
            input,
            last_value: Value::Null,
            call_depth: 0,
        }
    }

    /// Run the program's entry function.
    ///
    /// Returns `None` when the program declares no executable statements.
    pub fn evaluate(&mut self) -> EvalResult<Option<Value>> {
        let program = self.program;
        let Some(entry) = program.entry_function() else {
            return Ok(None);
        };
        let body = program
            .function_body(entry)
            .ok_or_else(|| internal(format!("entry function '{entry}' has no body")))?;

        self.frames.push(VariableStores::new());
        let result = self.run_body(body);
        self.frames.pop();
        result.map(Some)
    }

    /// Execute one flat body to completion.
    fn run_body(&mut self, body: &BoundBlock) -> EvalResult {
        // Labels are zero-width: jumps land on the statement after them.
        let mut label_indices: FxHashMap<&BoundLabel, usize> = FxHashMap::default();
        for (index, statement) in body.statements.iter().enumerate() {
            if let BoundStmt::Label { label } = statement {
                label_indices.insert(label, index + 1);
            }
        }

        let mut index = 0;
        while index < body.statements.len() {
            match &body.statements[index] {
                BoundStmt::VariableDeclaration {
                    variable,
                    initializer,
                } => {
                    let value = self.eval_expr(initializer)?;
                    self.stores_mut(variable)?.set_scalar(variable.clone(), value);
                    index += 1;
                }
                BoundStmt::ArrayDeclaration {
                    variable,
                    initializers,
                } => {
                    let mut elements = Vec::with_capacity(initializers.len());
                    for initializer in initializers {
                        elements.push(self.eval_expr(initializer)?);
                    }
                    self.stores_mut(variable)?.set_array(variable.clone(), elements);
                    index += 1;
                }
                BoundStmt::ListDeclaration {
                    variable,
                    initializers,
                } => {
                    let mut elements = BTreeMap::new();
                    for (key, initializer) in (0_i64..).zip(initializers) {
                        elements.insert(key, self.eval_expr(initializer)?);
                    }
                    self.stores_mut(variable)?.set_list(variable.clone(), elements);
                    index += 1;
                }
                BoundStmt::Expression(expr) => {
                    self.last_value = self.eval_expr(expr)?;
                    index += 1;
                }
                BoundStmt::Goto { label } => {
                    index = jump_target(&label_indices, label)?;
                }
                BoundStmt::ConditionalGoto {
                    label,
                    condition,
                    jump_if_true,
                } => {
                    let condition = as_bool(self.eval_expr(condition)?)?;
                    if condition == *jump_if_true {
                        index = jump_target(&label_indices, label)?;
                    } else {
                        index += 1;
                    }
                }
                BoundStmt::Label { .. } => index += 1,
                BoundStmt::Return { expression } => {
                    return match expression {
                        Some(expression) => self.eval_expr(expression),
                        None => Ok(Value::Null),
                    };
                }
                structured => {
                    return Err(internal(format!(
                        "unlowered statement '{}' reached the evaluator",
                        structured.kind_name()
                    )));
                }
            }
        }

        // Fell off the end without a return: script fallthrough semantics.
        Ok(self.last_value.clone())
    }

    fn eval_expr(&mut self, expr: &BoundExpr) -> EvalResult {
        ensure_sufficient_stack(|| match expr {
            BoundExpr::Literal { value, .. } => Ok(value.clone()),
            BoundExpr::Variable { variable } => self.read_variable(variable, AccessMode::Value),
            BoundExpr::ArrayAccess {
                variable, index, ..
            } => {
                let index = as_int(self.eval_expr(index)?)?;
                self.read_array_element(variable, index)
            }
            BoundExpr::ListAccess { variable, key, .. } => {
                let key = as_int(self.eval_expr(key)?)?;
                self.read_list_element(variable, key)
            }
            BoundExpr::Assignment {
                variable,
                expression,
            } => {
                let value = self.eval_expr(expression)?;
                self.stores_mut(variable)?
                    .set_scalar(variable.clone(), value.clone());
                Ok(value)
            }
            BoundExpr::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                evaluate_unary(op, operand)
            }
            BoundExpr::Binary { left, op, right } => self.eval_binary(left, op, right),
            BoundExpr::Call {
                function,
                arguments,
            } => self.eval_call(function, arguments),
            BoundExpr::Conversion { ty, expression } => {
                let value = self.eval_expr(expression)?;
                convert(value, *ty)
            }
        })
    }

    /// Binary dispatch; `&&`/`||` short-circuit before the right operand is
    /// ever evaluated, everything else evaluates both sides eagerly.
    fn eval_binary(
        &mut self,
        left: &BoundExpr,
        op: &BoundBinaryOp,
        right: &BoundExpr,
    ) -> EvalResult {
        match op.kind {
            BinaryOpKind::LogicalAnd => {
                if !as_bool(self.eval_expr(left)?)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(as_bool(self.eval_expr(right)?)?))
            }
            BinaryOpKind::LogicalOr => {
                if as_bool(self.eval_expr(left)?)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(as_bool(self.eval_expr(right)?)?))
            }
            _ => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(op, left, right)
            }
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(function = function.name()))]
    fn eval_call(&mut self, function: &FunctionSymbol, arguments: &[BoundExpr]) -> EvalResult {
        if let Some(builtin) = function.builtin() {
            return self.eval_builtin(builtin, arguments);
        }
        if arguments.len() != function.parameters().len() {
            return Err(internal(format!(
                "call to '{function}' passes {} arguments for {} parameters",
                arguments.len(),
                function.parameters().len()
            )));
        }

        // Arguments evaluate left-to-right in the caller's frame; the callee
        // never observes a partially built frame.
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval_expr(argument)?);
        }

        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(call_depth_exceeded(MAX_CALL_DEPTH));
        }
        let program = self.program;
        let body = program
            .function_body(function)
            .ok_or_else(|| internal(format!("function '{function}' has no body")))?;

        let mut frame = VariableStores::new();
        for (parameter, value) in function.parameters().iter().zip(values) {
            frame.set_scalar(parameter.clone(), value);
        }

        self.frames.push(frame);
        self.call_depth += 1;
        let result = self.run_body(body);
        self.call_depth -= 1;
        self.frames.pop();
        result
    }

    fn eval_builtin(&mut self, builtin: Builtin, arguments: &[BoundExpr]) -> EvalResult {
        match builtin {
            Builtin::Print => {
                let value = self.eval_expr(single_argument(builtin, arguments)?)?;
                let rendered = value.to_string();
                self.print.println(&rendered);
                Ok(Value::Null)
            }
            Builtin::Input => self.input.read_line().map(Value::string),
            Builtin::Round => self.eval_rounding(builtin, arguments, f64::round),
            Builtin::Floor => self.eval_rounding(builtin, arguments, f64::floor),
            Builtin::Ceil => self.eval_rounding(builtin, arguments, f64::ceil),
            Builtin::Length => {
                let argument = single_argument(builtin, arguments)?;
                // Aggregates answer through the want-length access path so
                // the textual form is never materialized.
                if let BoundExpr::Variable { variable } = argument {
                    return self.read_variable(variable, AccessMode::Length);
                }
                match self.eval_expr(argument)? {
                    Value::Str(s) => Ok(int_len(s.chars().count())),
                    other => Err(unsupported_length(other.type_symbol())),
                }
            }
        }
    }

    fn eval_rounding(
        &mut self,
        builtin: Builtin,
        arguments: &[BoundExpr],
        round: fn(f64) -> f64,
    ) -> EvalResult {
        let argument = single_argument(builtin, arguments)?;
        let value = as_float(self.eval_expr(argument)?)?;
        #[allow(clippy::cast_possible_truncation)]
        let rounded = round(value) as i64;
        Ok(Value::Int(rounded))
    }

    fn read_variable(&self, variable: &VariableSymbol, mode: AccessMode) -> EvalResult {
        let stores = self.stores(variable)?;
        if let Some(value) = stores.scalar(variable) {
            return match mode {
                AccessMode::Value => Ok(value.clone()),
                AccessMode::Length => match value {
                    Value::Str(s) => Ok(int_len(s.chars().count())),
                    other => Err(unsupported_length(other.type_symbol())),
                },
            };
        }
        match mode {
            AccessMode::Length => {
                if let Some(len) = stores.aggregate_len(variable) {
                    return Ok(int_len(len));
                }
            }
            AccessMode::Value => {
                if let Some(rendered) = stores.render_aggregate(variable) {
                    return Ok(Value::string(rendered));
                }
            }
        }
        Err(internal(format!("variable '{variable}' has no storage")))
    }

    fn read_array_element(&self, variable: &VariableSymbol, index: i64) -> EvalResult {
        let stores = self.stores(variable)?;
        let array = stores
            .array(variable)
            .ok_or_else(|| internal(format!("array '{variable}' has no storage")))?;
        usize::try_from(index)
            .ok()
            .and_then(|i| array.get(i))
            .cloned()
            .ok_or_else(|| index_out_of_range(format!("array '{variable}'"), index, array.len()))
    }

    fn read_list_element(&self, variable: &VariableSymbol, key: i64) -> EvalResult {
        let stores = self.stores(variable)?;
        let list = stores
            .list(variable)
            .ok_or_else(|| internal(format!("list '{variable}' has no storage")))?;
        list.get(&key)
            .cloned()
            .ok_or_else(|| index_out_of_range(format!("list '{variable}'"), key, list.len()))
    }

    /// The store a symbol resolves to: globals for `GlobalVariable` kind,
    /// the top local frame otherwise.
    fn stores(&self, variable: &VariableSymbol) -> EvalResult<&VariableStores> {
        if variable.is_global() {
            Ok(&*self.globals)
        } else {
            self.frames
                .last()
                .ok_or_else(|| internal(format!("no active frame for local '{variable}'")))
        }
    }

    fn stores_mut(&mut self, variable: &VariableSymbol) -> EvalResult<&mut VariableStores> {
        if variable.is_global() {
            Ok(&mut *self.globals)
        } else {
            self.frames
                .last_mut()
                .ok_or_else(|| internal(format!("no active frame for local '{variable}'")))
        }
    }
}

fn jump_target(label_indices: &FxHashMap<&BoundLabel, usize>, label: &BoundLabel) -> EvalResult<usize> {
    label_indices
        .get(label)
        .copied()
        .ok_or_else(|| internal(format!("jump to unknown label '{label}'")))
}

fn single_argument(builtin: Builtin, arguments: &[BoundExpr]) -> EvalResult<&BoundExpr> {
    match arguments {
        [argument] => Ok(argument),
        _ => Err(internal(format!(
            "built-in '{}' takes one argument, got {}",
            builtin.name(),
            arguments.len()
        ))),
    }
}

fn int_len(len: usize) -> Value {
    Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}
