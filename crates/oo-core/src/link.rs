//! Prototype-linked object creation.

use tracing::debug;

use oo_types::{Object, OoError, OoResult, Value};

use crate::config::MergeOptions;
use crate::merge::merge;

/// Create an object that delegates lookups to `prototype`.
///
/// If `properties` is given its own enumerable keys are merged onto the new
/// object. The new object's `uber` points at `prototype`, so overriding
/// methods can reach the implementation they shadow.
pub fn link(prototype: &Object, properties: Option<&Object>) -> Object {
    let instance = Object::with_prototype(prototype);
    if let Some(props) = properties {
        merge(&instance, &[props], &MergeOptions::link());
    }
    instance.set_uber(Some(prototype.clone()));
    debug!(
        depth = instance.chain().len(),
        own = instance.len(),
        "linked object"
    );
    instance
}

/// [`link`] for dynamically typed input. Fails if `prototype` is not an
/// object.
pub fn link_value(prototype: &Value, properties: Option<&Object>) -> OoResult<Object> {
    match prototype {
        Value::Object(proto) => Ok(link(proto, properties)),
        other => Err(OoError::InvalidArgument(format!(
            "prototype must be an object, got {}",
            other.type_name()
        ))),
    }
}
