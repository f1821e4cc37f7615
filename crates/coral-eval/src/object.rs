//! Classes and instances for the Coral object model.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use coral_ast::MethodDef;

use crate::value::Value;

/// A shared reference to a class descriptor.
pub type ClassRef = Rc<Class>;

/// A shared, mutable reference to a class instance. Instance-variable
/// mutation through one reference is visible through every other.
pub type ObjectRef = Rc<RefCell<Instance>>;

/// A class: a name, method tables, and a superclass relation.
///
/// Method tables use interior mutability so a class can be populated after
/// construction; the evaluator only ever reads them.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    superclass: Option<ClassRef>,
    instance_methods: RefCell<HashMap<String, Rc<MethodDef>>>,
    class_methods: RefCell<HashMap<String, Rc<MethodDef>>>,
}

impl Class {
    pub fn new(name: impl Into<String>, superclass: Option<ClassRef>) -> ClassRef {
        Rc::new(Class {
            name: name.into(),
            superclass,
            instance_methods: RefCell::new(HashMap::new()),
            class_methods: RefCell::new(HashMap::new()),
        })
    }

    pub fn superclass(&self) -> Option<&ClassRef> {
        self.superclass.as_ref()
    }

    pub fn define_instance_method(&self, method: MethodDef) {
        self.instance_methods
            .borrow_mut()
            .insert(method.name.clone(), Rc::new(method));
    }

    pub fn define_class_method(&self, method: MethodDef) {
        self.class_methods
            .borrow_mut()
            .insert(method.name.clone(), Rc::new(method));
    }

    /// Look up an instance method, walking the superclass chain.
    pub fn lookup_instance_method(&self, name: &str) -> Option<Rc<MethodDef>> {
        if let Some(method) = self.instance_methods.borrow().get(name) {
            return Some(Rc::clone(method));
        }
        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.lookup_instance_method(name))
    }

    /// Look up a class-level method, walking the superclass chain.
    pub fn lookup_class_method(&self, name: &str) -> Option<Rc<MethodDef>> {
        if let Some(method) = self.class_methods.borrow().get(name) {
            return Some(Rc::clone(method));
        }
        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.lookup_class_method(name))
    }
}

/// An instance of a class: a class reference plus instance variables.
#[derive(Debug)]
pub struct Instance {
    pub class: ClassRef,
    instance_variables: HashMap<String, Value>,
}

impl Instance {
    pub fn new(class: ClassRef) -> ObjectRef {
        Rc::new(RefCell::new(Instance {
            class,
            instance_variables: HashMap::new(),
        }))
    }

    /// Current value of an instance variable, if set.
    pub fn instance_variable(&self, name: &str) -> Option<Value> {
        self.instance_variables.get(name).cloned()
    }

    pub fn set_instance_variable(&mut self, name: impl Into<String>, value: Value) {
        self.instance_variables.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coral_ast::{Block, MethodDef, Param};

    fn empty_method(name: &str) -> MethodDef {
        MethodDef {
            name: name.to_string(),
            params: vec![],
            body: Block { statements: vec![] },
        }
    }

    #[test]
    fn test_instance_method_lookup_walks_superclass_chain() {
        let base = Class::new("Base", None);
        base.define_instance_method(empty_method("greet"));
        let middle = Class::new("Middle", Some(Rc::clone(&base)));
        let leaf = Class::new("Leaf", Some(middle));

        assert!(leaf.lookup_instance_method("greet").is_some());
        assert!(leaf.lookup_instance_method("missing").is_none());
    }

    #[test]
    fn test_subclass_definition_shadows_superclass() {
        let base = Class::new("Base", None);
        base.define_instance_method(MethodDef {
            name: "greet".to_string(),
            params: vec![],
            body: Block { statements: vec![] },
        });
        let sub = Class::new("Sub", Some(Rc::clone(&base)));
        sub.define_instance_method(MethodDef {
            name: "greet".to_string(),
            params: vec![Param {
                name: "marker".to_string(),
            }],
            body: Block { statements: vec![] },
        });

        let found = sub.lookup_instance_method("greet").unwrap();
        assert_eq!(found.params.len(), 1);
    }

    #[test]
    fn test_class_method_lookup_walks_superclass_chain() {
        let base = Class::new("Base", None);
        base.define_class_method(empty_method("create"));
        let sub = Class::new("Sub", Some(base));

        assert!(sub.lookup_class_method("create").is_some());
        assert!(sub.lookup_instance_method("create").is_none());
    }

    #[test]
    fn test_instance_variables_set_and_get() {
        let class = Class::new("Counter", None);
        let instance = Instance::new(Rc::clone(&class));

        assert!(instance.borrow().instance_variable("count").is_none());

        let value = Value::Class(class);
        instance
            .borrow_mut()
            .set_instance_variable("count", value.clone());
        assert_eq!(instance.borrow().instance_variable("count"), Some(value));
    }
}
