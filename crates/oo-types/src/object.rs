//! Prototype-linked property containers.
//!
//! An [`Object`] is a shared handle to an ordered property map plus an
//! optional fallback object (its prototype). Lookups that miss locally are
//! delegated up the chain, so later changes to a prototype are visible
//! through every object that links to it.
//!
//! # Invariants
//!
//! - An object's prototype is fixed when the object is created. Chains are
//!   therefore acyclic: an object can only link to objects that existed
//!   before it.
//! - `uber` and `constructor` are reserved slots, not properties. They are
//!   never enumerated and never copied by merges.
//! - Equality is identity, like `===`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{OoError, OoResult};
use crate::function::{ConstructFn, Constructor};
use crate::value::Value;

/// A stored property.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub value: Value,
    /// Non-enumerable properties resolve normally but are skipped by merges.
    pub enumerable: bool,
}

impl Property {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            enumerable: true,
        }
    }

    pub fn hidden(value: Value) -> Self {
        Self {
            value,
            enumerable: false,
        }
    }
}

#[derive(Default)]
pub(crate) struct ObjectData {
    properties: IndexMap<String, Property>,
    prototype: Option<Object>,
    uber: Option<Object>,
    constructor: Option<Rc<ConstructFn>>,
}

/// Shared, single-threaded handle to a property container.
#[derive(Clone, Default)]
pub struct Object(pub(crate) Rc<RefCell<ObjectData>>);

impl Object {
    /// Create an empty object with no prototype.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object whose lookups fall back to `prototype`.
    ///
    /// This does not set `uber`; see [`Object::set_uber`].
    pub fn with_prototype(prototype: &Object) -> Self {
        Self(Rc::new(RefCell::new(ObjectData {
            prototype: Some(prototype.clone()),
            ..Default::default()
        })))
    }

    /// Build a prototype-less object from a JSON map.
    pub fn from_json_map(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let obj = Self::new();
        for (key, value) in map {
            obj.set(key.clone(), Value::from_json(value));
        }
        obj
    }

    /// Returns `true` if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // ---------------------------------------------------------------
    // Own properties
    // ---------------------------------------------------------------

    /// Number of own properties.
    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().properties.is_empty()
    }

    pub fn has_own_property(&self, key: &str) -> bool {
        self.0.borrow().properties.contains_key(key)
    }

    /// Value of an own property, ignoring the prototype chain.
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.0.borrow().properties.get(key).map(|p| p.value.clone())
    }

    pub fn get_own_property(&self, key: &str) -> Option<Property> {
        self.0.borrow().properties.get(key).cloned()
    }

    /// Assign an own property. An existing property keeps its position and
    /// enumerability; a new one is appended as enumerable.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let value = value.into();
        let mut data = self.0.borrow_mut();
        match data.properties.entry(key.into()) {
            indexmap::map::Entry::Occupied(mut slot) => slot.get_mut().value = value,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(Property::new(value));
            }
        }
    }

    /// Insert or replace an own property with explicit enumerability.
    pub fn define(&self, key: impl Into<String>, property: Property) {
        self.0.borrow_mut().properties.insert(key.into(), property);
    }

    /// Remove an own property, preserving the order of the rest.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0
            .borrow_mut()
            .properties
            .shift_remove(key)
            .map(|p| p.value)
    }

    /// All own keys in insertion order, enumerable or not.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    /// Enumerable keys in `for...in` order.
    ///
    /// With `include_inherited`, keys from the prototype chain follow the own
    /// keys, nearest ancestor first. A key already seen at a nearer level
    /// (enumerable or not) shadows the same key further up.
    pub fn enumerable_keys(&self, include_inherited: bool) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut keys = Vec::new();
        let mut current = Some(self.clone());
        while let Some(obj) = current {
            let data = obj.0.borrow();
            for (key, prop) in &data.properties {
                if seen.contains(key) {
                    continue;
                }
                seen.push(key.clone());
                if prop.enumerable {
                    keys.push(key.clone());
                }
            }
            if !include_inherited {
                break;
            }
            current = data.prototype.clone();
        }
        keys
    }

    // ---------------------------------------------------------------
    // Delegated lookup
    // ---------------------------------------------------------------

    /// Look up `key` locally, then along the prototype chain.
    pub fn resolve(&self, key: &str) -> Option<Value> {
        self.resolve_with_owner(key).map(|(value, _)| value)
    }

    /// Like [`resolve`](Self::resolve), also returning the object in the
    /// chain that owns the property.
    pub fn resolve_with_owner(&self, key: &str) -> Option<(Value, Object)> {
        let mut current = Some(self.clone());
        while let Some(obj) = current {
            let data = obj.0.borrow();
            if let Some(prop) = data.properties.get(key) {
                let value = prop.value.clone();
                drop(data);
                return Some((value, obj));
            }
            current = data.prototype.clone();
        }
        None
    }

    /// Resolved value, or `Undefined` if nothing in the chain has `key`.
    pub fn get(&self, key: &str) -> Value {
        self.resolve(key).unwrap_or_default()
    }

    /// Resolve `name` and invoke it with `this` bound to `self`.
    pub fn call_method(&self, name: &str, args: &[Value]) -> OoResult<Value> {
        match self.resolve(name) {
            Some(Value::Function(f)) => f.call(self, args),
            Some(other) => Err(OoError::NotCallable {
                key: name.to_string(),
                type_name: other.type_name(),
            }),
            None => Err(OoError::MissingProperty {
                key: name.to_string(),
            }),
        }
    }

    // ---------------------------------------------------------------
    // Links
    // ---------------------------------------------------------------

    /// The object lookups fall back to.
    pub fn prototype(&self) -> Option<Object> {
        self.0.borrow().prototype.clone()
    }

    /// Explicit super reference used by overriding methods.
    pub fn uber(&self) -> Option<Object> {
        self.0.borrow().uber.clone()
    }

    pub fn set_uber(&self, uber: Option<Object>) {
        self.0.borrow_mut().uber = uber;
    }

    /// The constructor recorded nearest along the chain.
    pub fn constructor(&self) -> Option<Constructor> {
        let mut current = Some(self.clone());
        while let Some(obj) = current {
            let data = obj.0.borrow();
            if let Some(procedure) = &data.constructor {
                let procedure = Rc::clone(procedure);
                drop(data);
                return Some(Constructor::from_parts(obj, procedure));
            }
            current = data.prototype.clone();
        }
        None
    }

    pub(crate) fn set_constructor(&self, procedure: Rc<ConstructFn>) {
        self.0.borrow_mut().constructor = Some(procedure);
    }

    /// Prototype chain, nearest first, excluding `self`.
    pub fn chain(&self) -> Vec<Object> {
        let mut chain = Vec::new();
        let mut current = self.prototype();
        while let Some(obj) = current {
            current = obj.prototype();
            chain.push(obj);
        }
        chain
    }

    /// Chain of `uber` references, nearest first, excluding `self`.
    ///
    /// `uber` references are not guaranteed acyclic the way prototype links
    /// are, so the walk stops at the first repeat.
    pub fn uber_chain(&self) -> Vec<Object> {
        let mut chain: Vec<Object> = Vec::new();
        let mut current = self.uber();
        while let Some(obj) = current {
            if obj.ptr_eq(self) || chain.contains(&obj) {
                break;
            }
            current = obj.uber();
            chain.push(obj);
        }
        chain
    }

    /// Returns `true` if `other` appears in this object's prototype chain.
    pub fn inherits_from(&self, other: &Object) -> bool {
        self.chain().iter().any(|obj| obj.ptr_eq(other))
    }

    /// Render enumerable properties as JSON, optionally flattening inherited
    /// ones into the output.
    pub fn to_json(&self, include_inherited: bool) -> OoResult<serde_json::Value> {
        Value::Object(self.clone()).to_json_inner(include_inherited, &mut Vec::new())
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Object {}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let obj = Object::new();
        for (key, value) in iter {
            obj.set(key, value);
        }
        obj
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shallow on purpose: prototypes and nested objects may be shared.
        let Ok(data) = self.0.try_borrow() else {
            return write!(f, "Object({:p}, <borrowed>)", Rc::as_ptr(&self.0));
        };
        f.debug_struct("Object")
            .field("id", &Rc::as_ptr(&self.0))
            .field("keys", &data.properties.keys().collect::<Vec<_>>())
            .field("has_prototype", &data.prototype.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;

    fn named(name: &str) -> Object {
        let obj = Object::new();
        obj.set("name", name);
        obj.set("getName", Function::new(|this, _| Ok(this.get("name"))));
        obj
    }

    // -----------------------------------------------------------------------
    // Own properties
    // -----------------------------------------------------------------------

    #[test]
    fn set_overwrites_in_place() {
        let obj: Object = [("a", 1), ("b", 2)].into_iter().collect();
        obj.set("a", 3);
        assert_eq!(obj.own_keys(), vec!["a", "b"]);
        assert_eq!(obj.get_own("a"), Some(Value::from(3)));
    }

    #[test]
    fn set_keeps_enumerability() {
        let obj = Object::new();
        obj.define("secret", Property::hidden(Value::from(1)));
        obj.set("secret", 2);
        let prop = obj.get_own_property("secret").unwrap();
        assert!(!prop.enumerable);
        assert_eq!(prop.value, Value::from(2));
    }

    #[test]
    fn remove_preserves_order() {
        let obj: Object = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(obj.remove("b"), Some(Value::from(2)));
        assert_eq!(obj.own_keys(), vec!["a", "c"]);
        assert_eq!(obj.remove("b"), None);
    }

    #[test]
    fn len_and_is_empty() {
        let obj = Object::new();
        assert!(obj.is_empty());
        obj.set("a", 1);
        assert_eq!(obj.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Delegation
    // -----------------------------------------------------------------------

    #[test]
    fn resolve_falls_back_to_prototype() {
        let base = named("base");
        let child = Object::with_prototype(&base);
        assert!(!child.has_own_property("getName"));
        assert_eq!(child.resolve("getName"), base.get_own("getName"));
        assert_eq!(child.resolve("missing"), None);
        assert!(child.get("missing").is_undefined());
    }

    #[test]
    fn prototype_changes_are_visible() {
        let base = Object::new();
        let child = Object::with_prototype(&base);
        base.set("late", "added");
        assert_eq!(child.get("late"), Value::from("added"));

        child.set("late", "shadowed");
        base.set("late", "changed");
        assert_eq!(child.get("late"), Value::from("shadowed"));
    }

    #[test]
    fn resolve_with_owner_reports_defining_object() {
        let base = named("base");
        let mid = Object::with_prototype(&base);
        mid.set("name", "mid");
        let leaf = Object::with_prototype(&mid);

        let (_, owner) = leaf.resolve_with_owner("getName").unwrap();
        assert_eq!(owner, base);
        let (value, owner) = leaf.resolve_with_owner("name").unwrap();
        assert_eq!(owner, mid);
        assert_eq!(value, Value::from("mid"));
    }

    #[test]
    fn call_method_binds_this_to_receiver() {
        let base = named("base");
        let child = Object::with_prototype(&base);
        child.set("name", "child");
        assert_eq!(child.call_method("getName", &[]).unwrap(), Value::from("child"));
        assert_eq!(base.call_method("getName", &[]).unwrap(), Value::from("base"));
    }

    #[test]
    fn call_method_errors() {
        let obj = named("x");
        assert_eq!(
            obj.call_method("nope", &[]).unwrap_err(),
            OoError::MissingProperty { key: "nope".into() }
        );
        assert_eq!(
            obj.call_method("name", &[]).unwrap_err(),
            OoError::NotCallable {
                key: "name".into(),
                type_name: "string"
            }
        );
    }

    #[test]
    fn methods_may_mutate_receiver() {
        let obj = Object::new();
        obj.set(
            "setName",
            Function::new(|this, args| {
                this.set("name", args.first().cloned().unwrap_or_default());
                Ok(Value::Undefined)
            }),
        );
        obj.call_method("setName", &[Value::from("fred")]).unwrap();
        assert_eq!(obj.get("name"), Value::from("fred"));
    }

    // -----------------------------------------------------------------------
    // Enumeration
    // -----------------------------------------------------------------------

    #[test]
    fn enumerable_keys_own_only() {
        let base: Object = [("a", 1)].into_iter().collect();
        let child = Object::with_prototype(&base);
        child.set("b", 2);
        child.define("hidden", Property::hidden(Value::from(3)));
        assert_eq!(child.enumerable_keys(false), vec!["b"]);
    }

    #[test]
    fn enumerable_keys_with_inherited() {
        let base: Object = [("a", 1), ("shared", 1)].into_iter().collect();
        let child = Object::with_prototype(&base);
        child.set("b", 2);
        child.set("shared", 2);
        assert_eq!(child.enumerable_keys(true), vec!["b", "shared", "a"]);
    }

    #[test]
    fn hidden_own_key_shadows_inherited_enumerable() {
        let base: Object = [("a", 1)].into_iter().collect();
        let child = Object::with_prototype(&base);
        child.define("a", Property::hidden(Value::from(2)));
        assert!(child.enumerable_keys(true).is_empty());
    }

    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------

    #[test]
    fn chain_is_nearest_first() {
        let base = Object::new();
        let mid = Object::with_prototype(&base);
        let leaf = Object::with_prototype(&mid);
        assert_eq!(leaf.chain(), vec![mid.clone(), base.clone()]);
        assert!(leaf.inherits_from(&base));
        assert!(!base.inherits_from(&leaf));
        assert!(base.chain().is_empty());
    }

    #[test]
    fn uber_is_independent_of_prototype() {
        let base = Object::new();
        let child = Object::with_prototype(&base);
        assert!(child.uber().is_none());
        child.set_uber(Some(base.clone()));
        assert_eq!(child.uber(), Some(base));
        assert!(!child.has_own_property("uber"));
    }

    #[test]
    fn uber_chain_stops_on_repeat() {
        let a = Object::new();
        let b = Object::new();
        a.set_uber(Some(b.clone()));
        b.set_uber(Some(a.clone()));
        assert_eq!(a.uber_chain(), vec![b.clone()]);
        b.set_uber(None);
    }

    #[test]
    fn to_json_flattens_inherited_on_request() {
        let base: Object = [("a", 1)].into_iter().collect();
        let child = Object::with_prototype(&base);
        child.set("b", 2);
        assert_eq!(
            child.to_json(false).unwrap(),
            serde_json::json!({"b": 2.0})
        );
        assert_eq!(
            child.to_json(true).unwrap(),
            serde_json::json!({"b": 2.0, "a": 1.0})
        );
    }

    #[test]
    fn debug_is_shallow() {
        let obj: Object = [("a", 1)].into_iter().collect();
        let debug = format!("{obj:?}");
        assert!(debug.contains("Object"));
        assert!(debug.contains("\"a\""));
    }
}
