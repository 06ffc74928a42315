use serde_json::{Map, Number};

use crate::error::{OoError, OoResult};
use crate::function::Function;
use crate::object::Object;

/// A property value: data, a nested object, or a callable.
///
/// `Undefined` is the "absent" sentinel. It is what lookups yield for
/// missing keys and what merges may be configured to skip.
///
/// Constructors are not values. An object's constructor lives in a reserved
/// slot read with [`Object::constructor`], so `resolve("constructor")` finds
/// nothing unless a property of that name was set explicitly.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(Object),
    Function(Function),
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Returns `true` for values that can act as a prototype.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Type tag in the style of `typeof`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
        }
    }

    /// Build a value from JSON. Objects become fresh prototype-less objects.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                // Arrays are modelled as objects keyed by index.
                let obj = Object::new();
                for (i, item) in items.iter().enumerate() {
                    obj.set(i.to_string(), Value::from_json(item));
                }
                Value::Object(obj)
            }
            serde_json::Value::Object(map) => Value::Object(Object::from_json_map(map)),
        }
    }

    /// Render as JSON. `Undefined` renders as `null` at the top level and is
    /// omitted inside objects; functions and cyclic objects are rejected.
    pub fn to_json(&self) -> OoResult<serde_json::Value> {
        self.to_json_inner(false, &mut Vec::new())
    }

    pub(crate) fn to_json_inner(
        &self,
        include_inherited: bool,
        stack: &mut Vec<Object>,
    ) -> OoResult<serde_json::Value> {
        Ok(match self {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Function(_) => {
                return Err(OoError::Unserializable("function".into()));
            }
            Value::Object(obj) => {
                if stack.contains(obj) {
                    return Err(OoError::Unserializable("cyclic object".into()));
                }
                stack.push(obj.clone());
                let mut map = Map::new();
                for key in obj.enumerable_keys(include_inherited) {
                    let value = obj.get(&key);
                    if value.is_undefined() {
                        continue;
                    }
                    map.insert(key, value.to_json_inner(include_inherited, stack)?);
                }
                stack.pop();
                serde_json::Value::Object(map)
            }
        })
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Undefined)
    }
}
