//! Foundation types for oo.
//!
//! This crate provides the object model the `oo-core` operations work on:
//! property containers that delegate lookups to a prototype, the values they
//! hold, and native functions that run with an explicit receiver.
//!
//! # Key Types
//!
//! - [`Object`] — Shared container with an ordered property map, a prototype
//!   link, and an `uber` super reference
//! - [`Value`] — Property value, including the `Undefined` sentinel
//! - [`Function`] — Native callable invoked with `this` bound to a receiver
//! - [`Constructor`] — Fixed prototype plus the procedure that instantiates it
//! - [`OoError`] — Errors raised by lookups, calls, and serialization

pub mod error;
pub mod function;
pub mod object;
pub mod value;

pub use error::{OoError, OoResult};
pub use function::{ConstructFn, Constructor, Function, NativeFn};
pub use object::{Object, Property};
pub use value::Value;
