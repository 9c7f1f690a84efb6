//! ## Crate layout
//! - `core`: entity registry, type resolution, schema builders, overrides.
//! - `schema`: identifiers, the storage type lattice, and schema nodes.
//! - `primitives`: the scalar kind table and its metadata.
//!
//! The `prelude` covers describing entities, registering them, and building
//! table, index and user type schemas.

pub use cqlmap_core as core;
pub use cqlmap_primitives as primitives;
pub use cqlmap_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{Error, ErrorClass};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::schema::prelude::*;
}
