//! Expression evaluation and name/method resolution.
//!
//! Evaluation is synchronous and recursive; every function here is a pure
//! function of its inputs plus the environment and method-table lookups it
//! performs. Runtime errors travel as ordinary [`Value::Error`]s. Early
//! `return`s out of method bodies travel as the `Err` side of [`Flow`] and
//! propagate with `?`, so the two never mix.

use std::rc::Rc;

use coral_ast::{BinOp, Block, Expr, MethodDef, Statement, UnOp};

use crate::environment::{Environment, Scope};
use crate::error::RuntimeError;
use crate::object::{ClassRef, ObjectRef};
use crate::runtime::Runtime;
use crate::value::{BooleanValue, IntegerValue, Kind, StringValue, Value};

/// Return-value carrier: a method body executed `return`, and the result
/// must be stripped with [`unwrap_return`] before it can be treated as an
/// ordinary expression value.
#[derive(Debug, Clone, PartialEq)]
pub struct EarlyReturn(pub Value);

/// Outcome of evaluating a statement, block, or expression: a plain value,
/// or one carried out by an early `return`.
pub type Flow = Result<Value, EarlyReturn>;

/// Strip the return-value carrier from a method invocation result.
pub fn unwrap_return(flow: Flow) -> Value {
    match flow {
        Ok(value) => value,
        Err(EarlyReturn(value)) => value,
    }
}

/// Evaluate a single expression in `scope`.
pub fn eval_expr(rt: &Runtime, expr: &Expr, scope: &Scope) -> Flow {
    match expr {
        Expr::Integer(value) => Ok(rt.integer(*value)),
        Expr::String(value) => Ok(rt.string(value.clone())),
        Expr::True => Ok(rt.boolean(true)),
        Expr::False => Ok(rt.boolean(false)),
        Expr::Null => Ok(rt.null()),
        Expr::Identifier(name) => Ok(eval_identifier(rt, name, scope)),
        Expr::Constant(name) => Ok(eval_constant(name, scope)),
        Expr::InstanceVariable(name) => Ok(eval_instance_variable(name, scope)),
        Expr::Unary { op, operand } => {
            let operand = eval_expr(rt, operand, scope)?;
            if operand.is_error() {
                return Ok(operand);
            }
            Ok(eval_unary(rt, *op, &operand))
        }
        Expr::Binary { op, left, right } => {
            let left = eval_expr(rt, left, scope)?;
            if left.is_error() {
                return Ok(left);
            }
            let right = eval_expr(rt, right, scope)?;
            if right.is_error() {
                return Ok(right);
            }
            Ok(eval_binary(rt, &left, *op, &right))
        }
        Expr::If {
            condition,
            then_block,
            else_block,
        } => eval_if(rt, condition, then_block, else_block.as_ref(), scope),
    }
}

/// Evaluate one statement. `return` surfaces as the `Err` side of [`Flow`].
pub fn eval_statement(rt: &Runtime, statement: &Statement, scope: &Scope) -> Flow {
    match statement {
        Statement::Expr(expr) => eval_expr(rt, expr, scope),
        Statement::Return(expr) => {
            let value = match expr {
                Some(expr) => eval_expr(rt, expr, scope)?,
                None => rt.null(),
            };
            Err(EarlyReturn(value))
        }
    }
}

/// Evaluate a block to its last statement's value. Stops at the first error
/// value; a `return` propagates outward through `?`.
pub fn eval_block(rt: &Runtime, block: &Block, scope: &Scope) -> Flow {
    let mut result = rt.null();
    for statement in &block.statements {
        result = eval_statement(rt, statement, scope)?;
        if result.is_error() {
            break;
        }
    }
    Ok(result)
}

/// Evaluate a unary operator over an already-evaluated operand.
pub fn eval_unary(rt: &Runtime, op: UnOp, operand: &Value) -> Value {
    match op {
        UnOp::Not => eval_not(rt, operand),
        UnOp::Neg => eval_neg(rt, operand),
    }
}

/// `!` truthiness: only `false` and `null` are falsy. Zero, the empty
/// string, and every class or object count as truthy.
fn eval_not(rt: &Runtime, operand: &Value) -> Value {
    match operand {
        Value::Boolean(b) if !b.value => rt.boolean(true),
        Value::Null(_) => rt.boolean(true),
        _ => rt.boolean(false),
    }
}

fn eval_neg(rt: &Runtime, operand: &Value) -> Value {
    match operand {
        Value::Integer(operand) => rt.integer(-operand.value),
        _ => RuntimeError::UnknownPrefixOperator {
            op: UnOp::Neg,
            kind: operand.kind(),
        }
        .into(),
    }
}

/// Evaluate a binary operator, dispatching on the pair of operand kinds.
/// Only the three homogeneous pairs evaluate; everything else is a type
/// mismatch — Coral never coerces between kinds.
pub fn eval_binary(rt: &Runtime, left: &Value, op: BinOp, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_binary(rt, l, op, r),
        (Value::Boolean(l), Value::Boolean(r)) => eval_boolean_binary(rt, l, op, r),
        (Value::String(l), Value::String(r)) => eval_string_binary(rt, l, op, r),
        _ => RuntimeError::TypeMismatch {
            left: left.kind(),
            op,
            right: right.kind(),
        }
        .into(),
    }
}

fn eval_integer_binary(rt: &Runtime, left: &IntegerValue, op: BinOp, right: &IntegerValue) -> Value {
    match op {
        BinOp::Add => rt.integer(left.value + right.value),
        BinOp::Sub => rt.integer(left.value - right.value),
        BinOp::Mul => rt.integer(left.value * right.value),
        BinOp::Div => {
            if right.value == 0 {
                RuntimeError::ZeroDivision.into()
            } else {
                // Host division truncates toward zero.
                rt.integer(left.value / right.value)
            }
        }
        BinOp::Gt => rt.boolean(left.value > right.value),
        BinOp::Lt => rt.boolean(left.value < right.value),
        BinOp::Eq => rt.boolean(left.value == right.value),
        BinOp::NotEq => rt.boolean(left.value != right.value),
    }
}

fn eval_boolean_binary(rt: &Runtime, left: &BooleanValue, op: BinOp, right: &BooleanValue) -> Value {
    match op {
        BinOp::Eq => rt.boolean(left.value == right.value),
        BinOp::NotEq => rt.boolean(left.value != right.value),
        _ => RuntimeError::UnknownInfixOperator {
            left: Kind::Boolean,
            op,
            right: Kind::Boolean,
        }
        .into(),
    }
}

fn eval_string_binary(rt: &Runtime, left: &StringValue, op: BinOp, right: &StringValue) -> Value {
    match op {
        BinOp::Add => rt.string(format!("{}{}", left.value, right.value)),
        BinOp::Gt => rt.boolean(left.value > right.value),
        BinOp::Lt => rt.boolean(left.value < right.value),
        BinOp::Eq => rt.boolean(left.value == right.value),
        BinOp::NotEq => rt.boolean(left.value != right.value),
        _ => RuntimeError::UnknownInfixOperator {
            left: Kind::String,
            op,
            right: Kind::String,
        }
        .into(),
    }
}

/// Evaluate an `if` expression.
///
/// Branch selection has its own truthiness rule: any integer selects the
/// consequence regardless of numeric value; otherwise only `true` does.
/// Null, strings, classes, and objects are falsy here even though `!`
/// treats them as truthy — the two rules are independent.
pub fn eval_if(
    rt: &Runtime,
    condition: &Expr,
    then_block: &Block,
    else_block: Option<&Block>,
    scope: &Scope,
) -> Flow {
    let condition = eval_expr(rt, condition, scope)?;
    if condition.is_error() {
        return Ok(condition);
    }

    let truthy = match &condition {
        Value::Integer(_) => true,
        Value::Boolean(b) => b.value,
        _ => false,
    };

    if truthy {
        eval_block(rt, then_block, scope)
    } else if let Some(else_block) = else_block {
        eval_block(rt, else_block, scope)
    } else {
        Ok(rt.null())
    }
}

/// Resolve a bare name: a variable binding always wins; otherwise the name
/// is a zero-argument method call on the current receiver.
pub fn eval_identifier(rt: &Runtime, name: &str, scope: &Scope) -> Value {
    if let Some(value) = scope.env.borrow().get(name) {
        return value;
    }

    match &scope.receiver {
        Value::Class(class) => match class.lookup_class_method(name) {
            Some(method) => unwrap_return(invoke_class_method(rt, class, &method, &[])),
            None => undefined_error(name, &scope.receiver),
        },
        Value::Object(object) => {
            let method = object.borrow().class.lookup_instance_method(name);
            match method {
                Some(method) => unwrap_return(invoke_instance_method(rt, object, &method, &[])),
                None => undefined_error(name, &scope.receiver),
            }
        }
        _ => undefined_error(name, &scope.receiver),
    }
}

fn undefined_error(name: &str, receiver: &Value) -> Value {
    RuntimeError::UndefinedVariableOrMethod {
        name: name.to_string(),
        receiver: receiver.inspect(),
    }
    .into()
}

/// Resolve a constant against the environment only; constants never fall
/// back to method dispatch.
pub fn eval_constant(name: &str, scope: &Scope) -> Value {
    match scope.env.borrow().get(name) {
        Some(value) => value,
        None => RuntimeError::ConstantNotFound {
            name: name.to_string(),
            receiver: scope.receiver.inspect(),
        }
        .into(),
    }
}

/// Resolve an instance variable on the current receiver.
///
/// A receiver without instance storage (anything but an object, e.g. a
/// class) reports the variable as not found rather than failing the host.
pub fn eval_instance_variable(name: &str, scope: &Scope) -> Value {
    let not_found = || -> Value {
        RuntimeError::InstanceVariableNotFound {
            name: name.to_string(),
            receiver: scope.receiver.inspect(),
        }
        .into()
    };

    match &scope.receiver {
        Value::Object(object) => match object.borrow().instance_variable(name) {
            Some(value) => value,
            None => not_found(),
        },
        _ => not_found(),
    }
}

/// Invoke a class-level method with the class itself as the receiver. The
/// result may still carry an early return; callers strip it with
/// [`unwrap_return`].
pub fn invoke_class_method(
    rt: &Runtime,
    class: &ClassRef,
    method: &MethodDef,
    args: &[Value],
) -> Flow {
    let scope = method_scope(Value::Class(Rc::clone(class)), method, args);
    eval_block(rt, &method.body, &scope)
}

/// Invoke an instance method with the object as the receiver.
pub fn invoke_instance_method(
    rt: &Runtime,
    object: &ObjectRef,
    method: &MethodDef,
    args: &[Value],
) -> Flow {
    let scope = method_scope(Value::Object(Rc::clone(object)), method, args);
    eval_block(rt, &method.body, &scope)
}

/// A fresh scope for a method body: parameters bound positionally, the
/// receiver installed as `self`.
fn method_scope(receiver: Value, method: &MethodDef, args: &[Value]) -> Scope {
    let env = Environment::new();
    {
        let mut env = env.borrow_mut();
        for (param, arg) in method.params.iter().zip(args) {
            env.set(param.name.clone(), arg.clone());
        }
    }
    Scope::new(env, receiver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_return_strips_the_carrier() {
        let rt = Runtime::new();
        assert_eq!(unwrap_return(Ok(rt.integer(1))), rt.integer(1));
        assert_eq!(
            unwrap_return(Err(EarlyReturn(rt.integer(2)))),
            rt.integer(2)
        );
    }

    #[test]
    fn test_bang_negation_of_singletons() {
        let rt = Runtime::new();
        assert_eq!(eval_unary(&rt, UnOp::Not, &rt.boolean(false)), rt.boolean(true));
        assert_eq!(eval_unary(&rt, UnOp::Not, &rt.null()), rt.boolean(true));
        assert_eq!(eval_unary(&rt, UnOp::Not, &rt.integer(0)), rt.boolean(false));
    }
}
