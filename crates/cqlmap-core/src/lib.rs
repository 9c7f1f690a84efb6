//! Mapping core for cqlmap: the entity registry, storage type resolution,
//! and the schema builders for tables, indexes and user types.
//!
//! Typical flow: describe source types through an `EntityDescriber`, register
//! the roots on a `MappingContext`, apply `MappingConfig` overrides, then
//! build schemas from the now read-only context.

pub mod builder;
pub mod config;
pub mod conversion;
pub mod declared;
pub mod entity;
pub mod error;
pub mod registry;
pub mod resolve;
pub mod verify;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::{Error, ErrorClass};

///
/// Prelude
///
/// Vocabulary needed to describe entities and build schemas.
///

pub mod prelude {
    pub use crate::{
        config::MappingConfig,
        conversion::{CustomConversions, SimpleTypes},
        declared::{DeclaredType, TypeName},
        entity::{
            EntityDescriptor, EntityId, EntityRole, IndexDecl, PropertyDescriptor, PropertyRole,
            TypeHint,
            describe::{EntityDescriber, EntitySeed, PropertySeed, StaticDescriber},
        },
        registry::MappingContext,
        resolve::{ResolutionMode, StaticUserTypes, UserTypeResolver},
    };
}
