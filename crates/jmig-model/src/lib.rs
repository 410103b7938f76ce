//! Value types shared by the temporal normalizer and the field disambiguator.

pub mod error;
pub mod escape;
pub mod field;
pub mod registry;
pub mod value;

pub use error::{RegistryError, SchemaError};
pub use escape::{ESCAPED_DELIMITER, escape, unescape};
pub use field::{FieldSpec, FieldType, Schema};
pub use registry::{FieldEntry, SchemaRegistry, SchemaTable};
pub use value::{DELIMITER, Decomposition, FieldLocation, OnUnresolved, Repair, TypedValue};

