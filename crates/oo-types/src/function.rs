use std::fmt;
use std::rc::Rc;

use crate::error::OoResult;
use crate::object::Object;
use crate::value::Value;

/// Signature of a native method: receives `this` and the call arguments.
pub type NativeFn = dyn Fn(&Object, &[Value]) -> OoResult<Value>;

/// A callable value stored in an object property.
///
/// Equality is identity: two `Function`s are equal only if they are clones
/// of the same handle.
#[derive(Clone)]
pub struct Function(Rc<NativeFn>);

impl Function {
    /// Wrap a closure as a callable value.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Object, &[Value]) -> OoResult<Value> + 'static,
    {
        Self(Rc::new(f))
    }

    /// Invoke with `this` bound to `receiver`.
    pub fn call(&self, receiver: &Object, args: &[Value]) -> OoResult<Value> {
        (self.0)(receiver, args)
    }

    /// Returns `true` if both handles point at the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Procedure run by [`Constructor::construct`].
pub type ConstructFn = dyn Fn(&Constructor, &[Value]) -> OoResult<Object>;

/// A reusable constructor: a fixed prototype plus the procedure that
/// produces instances linked to it.
///
/// The prototype owns the procedure, so any instance can recover its
/// constructor through [`Object::constructor`] for as long as the instance
/// lives. Identity is the prototype's identity. The procedure receives the
/// constructor on every call and must not capture the prototype itself.
#[derive(Clone)]
pub struct Constructor {
    prototype: Object,
    procedure: Rc<ConstructFn>,
}

impl Constructor {
    /// Build a constructor around `prototype` and record the procedure as
    /// the prototype's `constructor`.
    pub fn new<F>(prototype: Object, procedure: F) -> Self
    where
        F: Fn(&Constructor, &[Value]) -> OoResult<Object> + 'static,
    {
        let procedure: Rc<ConstructFn> = Rc::new(procedure);
        prototype.set_constructor(Rc::clone(&procedure));
        Self {
            prototype,
            procedure,
        }
    }

    /// Rebuild the handle for a prototype found holding `procedure`.
    pub(crate) fn from_parts(prototype: Object, procedure: Rc<ConstructFn>) -> Self {
        Self {
            prototype,
            procedure,
        }
    }

    /// The prototype every instance delegates to.
    pub fn prototype(&self) -> &Object {
        &self.prototype
    }

    /// The object the prototype itself delegates to, if any.
    pub fn base(&self) -> Option<Object> {
        self.prototype.prototype()
    }

    /// Produce a new instance.
    pub fn construct(&self, args: &[Value]) -> OoResult<Object> {
        (self.procedure)(self, args)
    }

    /// Returns `true` if both handles build instances of the same prototype.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.prototype.ptr_eq(&other.prototype)
    }
}

impl PartialEq for Constructor {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("prototype", &self.prototype)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_binds_receiver() {
        let get_name = Function::new(|this, _| Ok(this.get("name")));
        let obj: Object = [("name", Value::from("fred"))].into_iter().collect();
        assert_eq!(get_name.call(&obj, &[]).unwrap(), Value::from("fred"));
    }

    #[test]
    fn equality_is_identity() {
        let f = Function::new(|_, _| Ok(Value::Undefined));
        let g = Function::new(|_, _| Ok(Value::Undefined));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }

    #[test]
    fn constructor_registers_itself_on_prototype() {
        let proto = Object::new();
        let ctor = Constructor::new(proto.clone(), |c, _| {
            Ok(Object::with_prototype(c.prototype()))
        });
        assert_eq!(proto.constructor(), Some(ctor.clone()));

        let instance = ctor.construct(&[]).unwrap();
        assert_eq!(instance.constructor(), Some(ctor));
    }

    #[test]
    fn instance_keeps_constructor_after_handle_drops() {
        let instance = Constructor::new(Object::new(), |c, _| {
            Ok(Object::with_prototype(c.prototype()))
        })
        .construct(&[])
        .unwrap();

        let ctor = instance.constructor().expect("constructor should survive");
        assert_eq!(Some(ctor.prototype().clone()), instance.prototype());

        // The recovered handle still builds instances.
        let sibling = ctor.construct(&[]).unwrap();
        assert_eq!(sibling.constructor(), Some(ctor));
    }

    #[test]
    fn dropping_everything_frees_the_prototype() {
        let proto = Object::new();
        let weak = Rc::downgrade(&proto.0);
        let ctor = Constructor::new(proto, |c, _| Ok(Object::with_prototype(c.prototype())));
        let instance = ctor.construct(&[]).unwrap();
        drop(ctor);
        drop(instance);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn base_is_prototype_of_prototype() {
        let base = Object::new();
        let proto = Object::with_prototype(&base);
        let ctor = Constructor::new(proto, |c, _| Ok(Object::with_prototype(c.prototype())));
        assert_eq!(ctor.base(), Some(base));
    }
}
