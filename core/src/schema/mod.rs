//! schema/mod.rs
//! Typed field descriptors, field values, and schema resolution.
//!
//! Notes:
//! - `FieldType` tags are stable u8 ids; an unknown tag or name is rejected
//!   instead of being decoded as something else.
//! - A schema is identified by an integer version that the record header carries.
//! - The registry is an external collaborator; `InMemorySchemaRegistry` is the
//!   embedded implementation used by tests and local tooling.

pub mod types;
pub mod value;
pub mod registry;

pub use types::*;
pub use value::*;
pub use registry::*;
