//! # Proto Compose
//!
//! Prototype-style type composition building blocks.
//!
//! This crate provides one facility - composing a constructible [`Type`]
//! from optional, individually configurable inputs:
//!
//! - **Base**: a single [`Type`] to extend (default: the root object type)
//! - **Mixins**: an ordered list of types whose behavior and statics blend in
//! - **Instance behavior**: members every instance resolves through the
//!   type's behavior [`Template`]
//! - **Static behavior**: members carried on the type itself
//! - **Initializers**: hooks run at instance construction and, once, at
//!   composition time
//!
//! ## Design Principles
//!
//! 1. **Identity**: types, templates, and instances are handles compared by
//!    identity; lineage (`superType`, `superTemplate`, `mixins`) is recorded
//!    at composition and never mutated afterward
//! 2. **Deterministic merge order**: base, then mixins in order, then
//!    explicit behavior - later contributors overwrite earlier ones
//! 3. **Read-only inputs**: composing never mutates a base or mixin; all
//!    accumulation happens in fresh maps
//! 4. **Tagged initializers**: an initializer is an explicit method or a
//!    named lookup, resolved per the construction contract rather than
//!    sniffed at runtime
//!
//! ## Example
//!
//! ```
//! use proto_compose::{Compose, Value};
//!
//! let named = Compose::new()
//!     .method("_init", |this, args| {
//!         let instance = this.as_instance().expect("instance target");
//!         if let [name] = args {
//!             instance.set("name", name.clone());
//!         }
//!         Ok(this.clone())
//!     })
//!     .compose_type()?;
//!
//! let labeled = Compose::extend(&named)
//!     .member("label", "default")
//!     .compose_type()?;
//!
//! let instance = labeled.create(&[Value::from("a")])?;
//! let instance = instance.as_instance().expect("instance result");
//! assert_eq!(instance.get("name"), Some(Value::from("a")));
//! assert_eq!(instance.get("label"), Some(Value::from("default")));
//! assert!(instance.is_instance_of(&named));
//! # Ok::<(), proto_compose::ComposeError>(())
//! ```

#![warn(missing_docs)]

mod compose;
mod errors;
mod initializer;
mod instance;
mod merge;
mod template;
mod type_object;
mod value;

pub use compose::Compose;
pub use errors::{ComposeError, ComposeResult};
pub use initializer::{Initializer, DEFAULT_INITIALIZER};
pub use instance::Instance;
pub use merge::merge;
pub use template::Template;
pub use type_object::Type;
pub use value::{Members, Method, Value};
