//! Foundation types for the HBNB console.
//!
//! Every record the console manages is an [`Entity`]: a typed, open bag of
//! attributes carrying an identity and two timestamps. The set of entity
//! types is closed and resolved by name through [`EntityKind`].
//!
//! # Key Types
//!
//! - [`EntityKind`]: Static registry of known entity types
//! - [`EntityId`]: Opaque identity generated at creation
//! - [`EntityKey`]: `"<TypeName>.<identity>"` store key
//! - [`AttrValue`]: Attribute value (text or timestamp)
//! - [`Entity`]: One managed record

pub mod entity;
pub mod error;
pub mod identity;
pub mod kind;
pub mod temporal;
pub mod value;

pub use entity::{Entity, Record, CLASS_FIELD};
pub use error::TypeError;
pub use identity::{EntityId, EntityKey};
pub use kind::EntityKind;
pub use value::AttrValue;
