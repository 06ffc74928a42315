//! Constructor factories.
//!
//! [`class_factory`] builds one intermediate prototype that delegates to the
//! base and owns the method set, then returns a [`Constructor`] whose
//! instances delegate to that prototype.
//!
//! Instances produced by a constructor get `uber` set to the factory's
//! original base, not to the intermediate prototype. The super reference is
//! therefore always one hop, however deeply factory outputs are nested.
//! Objects chained by hand with [`link`] keep the full `uber` depth instead.

use tracing::debug;

use oo_types::{Constructor, Object, Value};

use crate::link::link;

/// Name of the optional initialization hook.
pub const INITIALIZE: &str = "initialize";

/// Build a constructor whose instances delegate to `methods`, which in turn
/// delegate to `inherits_from`.
///
/// On each call the constructor links a fresh instance to the prototype,
/// sets its `uber` to `inherits_from`, runs `initialize` with the call
/// arguments if one resolves to a function, and returns the instance. An
/// `initialize` that is present but not callable is skipped.
pub fn class_factory(inherits_from: &Object, methods: &Object) -> Constructor {
    let prototype = link(inherits_from, Some(methods));
    debug!(methods = methods.len(), "built class prototype");

    Constructor::new(prototype, |ctor, args| {
        let prototype = ctor.prototype();
        let instance = link(prototype, None);
        instance.set_uber(prototype.uber());

        match instance.resolve(INITIALIZE) {
            Some(Value::Function(init)) => {
                init.call(&instance, args)?;
            }
            Some(other) => {
                debug!(
                    found = other.type_name(),
                    "initialize is not callable, skipping"
                );
            }
            None => {}
        }
        Ok(instance)
    })
}
