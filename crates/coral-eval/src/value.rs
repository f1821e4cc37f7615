//! Runtime values for the Coral interpreter.

use std::fmt;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::{ClassRef, ObjectRef};

/// A runtime value in the Coral language.
///
/// Primitive payloads carry a reference to their shared class descriptor.
/// The `true`, `false`, and `null` payloads are singletons handed out by
/// [`Runtime`](crate::Runtime); cloning a `Value` clones the `Rc`, never the
/// payload, so singleton identity survives arbitrary propagation.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(Rc<IntegerValue>),
    Boolean(Rc<BooleanValue>),
    String(Rc<StringValue>),
    Null(Rc<NullValue>),
    Error(Rc<RuntimeError>),
    Class(ClassRef),
    Object(ObjectRef),
}

/// An integer payload tagged with the shared Integer class.
#[derive(Debug)]
pub struct IntegerValue {
    pub value: i64,
    pub class: ClassRef,
}

/// A boolean payload tagged with the shared Boolean class.
#[derive(Debug)]
pub struct BooleanValue {
    pub value: bool,
    pub class: ClassRef,
}

/// A string payload tagged with the shared String class.
#[derive(Debug)]
pub struct StringValue {
    pub value: String,
    pub class: ClassRef,
}

/// The null payload; only the singleton instance exists.
#[derive(Debug)]
pub struct NullValue {
    pub class: ClassRef,
}

/// The kind tag of a value, as rendered in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Integer,
    Boolean,
    String,
    Null,
    Error,
    Class,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Integer => "INTEGER",
            Kind::Boolean => "BOOLEAN",
            Kind::String => "STRING",
            Kind::Null => "NULL",
            Kind::Error => "ERROR",
            Kind::Class => "CLASS",
            Kind::Object => "OBJECT",
        })
    }
}

impl Value {
    /// The kind tag for this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Integer(_) => Kind::Integer,
            Value::Boolean(_) => Kind::Boolean,
            Value::String(_) => Kind::String,
            Value::Null(_) => Kind::Null,
            Value::Error(_) => Kind::Error,
            Value::Class(_) => Kind::Class,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Check if this value is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Human-readable rendering, as embedded in error messages.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i.value),
            Value::Boolean(b) => f.write_str(if b.value { "true" } else { "false" }),
            Value::String(s) => f.write_str(&s.value),
            Value::Null(_) => f.write_str("null"),
            Value::Error(e) => write!(f, "ERROR: {}", e),
            Value::Class(class) => f.write_str(&class.name),
            Value::Object(object) => write!(f, "#<{}>", object.borrow().class.name),
        }
    }
}

/// Structural equality for primitives and errors; reference identity for
/// classes and objects, which are shared rather than copied.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.value == b.value,
            (Value::Boolean(a), Value::Boolean(b)) => a.value == b.value,
            (Value::String(a), Value::String(b)) => a.value == b.value,
            (Value::Null(_), Value::Null(_)) => true,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Class, Instance};

    #[test]
    fn test_kind_display_is_uppercase() {
        assert_eq!(Kind::Integer.to_string(), "INTEGER");
        assert_eq!(Kind::Boolean.to_string(), "BOOLEAN");
        assert_eq!(Kind::String.to_string(), "STRING");
        assert_eq!(Kind::Null.to_string(), "NULL");
    }

    #[test]
    fn test_inspect_primitives() {
        let class = Class::new("Integer", None);
        let five = Value::Integer(Rc::new(IntegerValue {
            value: 5,
            class: Rc::clone(&class),
        }));
        assert_eq!(five.inspect(), "5");

        let null_class = Class::new("Null", None);
        let null = Value::Null(Rc::new(NullValue { class: null_class }));
        assert_eq!(null.inspect(), "null");
    }

    #[test]
    fn test_inspect_class_and_object() {
        let class = Class::new("Greeter", None);
        assert_eq!(Value::Class(Rc::clone(&class)).inspect(), "Greeter");

        let instance = Instance::new(class);
        assert_eq!(Value::Object(instance).inspect(), "#<Greeter>");
    }

    #[test]
    fn test_object_equality_is_identity() {
        let class = Class::new("Thing", None);
        let a = Instance::new(Rc::clone(&class));
        let b = Instance::new(class);

        assert_eq!(Value::Object(Rc::clone(&a)), Value::Object(Rc::clone(&a)));
        assert_ne!(Value::Object(a), Value::Object(b));
    }

    #[test]
    fn test_integer_equality_is_structural() {
        let class = Class::new("Integer", None);
        let a = Value::Integer(Rc::new(IntegerValue {
            value: 7,
            class: Rc::clone(&class),
        }));
        let b = Value::Integer(Rc::new(IntegerValue { value: 7, class }));
        assert_eq!(a, b);
    }
}
