//! Storage-side vocabulary: identifiers, the type lattice, and the schema
//! objects produced for tables, indexes and user types.

pub mod identifier;
pub mod node;
pub mod types;


pub use cqlmap_primitives::{ScalarKind, ScalarMetadata};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        identifier::{Identifier, IdentifierError},
        node::*,
        types::{DataType, Resolution, UserTypeRef},
    };
    pub use cqlmap_primitives::ScalarKind;
}
