//! Runtime errors as first-class values.
//!
//! Errors are ordinary [`Value`]s, not an out-of-band mechanism: every
//! component that evaluates a sub-expression checks the sub-result with
//! [`Value::is_error`] and returns it unchanged, so errors short-circuit
//! upward through the expression tree to whatever ultimately displays them.

use std::rc::Rc;

use coral_ast::{BinOp, UnOp};
use thiserror::Error;

use crate::value::{Kind, Value};

/// Errors produced during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Unary operator applied to a kind it is not defined for.
    #[error("unknown operator: {op}{kind}")]
    UnknownPrefixOperator { op: UnOp, kind: Kind },

    /// Binary operator not defined for an otherwise-valid kind pair.
    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator { left: Kind, op: BinOp, right: Kind },

    /// Binary operator applied to incompatible kinds; Coral never coerces.
    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch { left: Kind, op: BinOp, right: Kind },

    /// Identifier is neither a bound variable nor a method on the receiver.
    #[error("undefined local variable or method `{name}' for {receiver}")]
    UndefinedVariableOrMethod { name: String, receiver: String },

    #[error("constant {name} not found in: {receiver}")]
    ConstantNotFound { name: String, receiver: String },

    #[error("instance variable {name} not found in: {receiver}")]
    InstanceVariableNotFound { name: String, receiver: String },

    /// Integer division with a zero divisor.
    #[error("divided by 0")]
    ZeroDivision,
}

impl From<RuntimeError> for Value {
    fn from(error: RuntimeError) -> Value {
        Value::Error(Rc::new(error))
    }
}
