//! Object extension and prototype-based construction.
//!
//! A stateless set of free functions over the [`oo_types`] object model:
//!
//! - [`merge`] / [`extend`] -- shallow-copy enumerable properties from one or
//!   more sources into a target, configured by [`MergeOptions`]
//! - [`link`] / [`link_value`] -- create an object that delegates to a
//!   prototype and records it as `uber`
//! - [`class_factory`] -- build a [`Constructor`] that links instances to a
//!   fixed prototype and runs their `initialize` hook
//!
//! # Example
//!
//! ```
//! use oo_core::{link, Function, Object, Value};
//!
//! let base = Object::new();
//! base.set("name", "b");
//! base.set("getName", Function::new(|this, _| Ok(this.get("name"))));
//!
//! let sub = Object::new();
//! sub.set("name", "s");
//! sub.set(
//!     "getName",
//!     Function::new(|this, _| {
//!         let inherited = this.uber().map(|u| u.call_method("getName", &[])).transpose()?;
//!         let inherited = inherited.unwrap_or_default();
//!         let own = this.get("name");
//!         Ok(Value::from(format!(
//!             "{}:{}",
//!             inherited.as_str().unwrap_or_default(),
//!             own.as_str().unwrap_or_default()
//!         )))
//!     }),
//! );
//!
//! let instance = link(&base, Some(&sub));
//! assert_eq!(instance.call_method("getName", &[]).unwrap(), Value::from("b:s"));
//! ```

pub mod class;
pub mod config;
pub mod link;
pub mod merge;

pub use class::{class_factory, INITIALIZE};
pub use config::MergeOptions;
pub use link::{link, link_value};
pub use merge::{extend, merge};

// Re-export the object model so callers need only one dependency.
pub use oo_types::{Constructor, Function, Object, OoError, OoResult, Property, Value};
