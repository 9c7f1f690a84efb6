//! Metadata discovery boundary.
//!
//! The registry never inspects source types itself; it asks an
//! `EntityDescriber` once per type and turns the returned seed into a
//! descriptor.

use crate::{
    declared::{DeclaredType, TypeName},
    entity::{EntityRole, IndexDecl, PropertyRole, TypeHint},
};
use cqlmap_schema::node::ClusteringOrder;
use std::collections::HashMap;
use thiserror::Error as ThisError;

///
/// DescribeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DescribeError {
    #[error("type '{0}' not found")]
    NotFound(TypeName),

    #[error("type '{type_name}' could not be described: {reason}")]
    Invalid { type_name: TypeName, reason: String },
}

///
/// EntityDescriber
///

pub trait EntityDescriber: Send + Sync {
    fn describe(&self, type_name: &TypeName) -> Result<EntitySeed, DescribeError>;
}

///
/// EntitySeed
///
/// Raw entity metadata before names are validated and roles classified.
///

#[derive(Clone, Debug, Default)]
pub struct EntitySeed {
    pub storage_name: Option<String>,
    pub force_quote: bool,
    pub role: EntityRole,
    pub properties: Vec<PropertySeed>,
}

impl EntitySeed {
    #[must_use]
    pub fn table() -> Self {
        Self::with_role(EntityRole::Table)
    }

    #[must_use]
    pub fn user_type() -> Self {
        Self::with_role(EntityRole::UserDefinedType)
    }

    #[must_use]
    pub fn key_class() -> Self {
        Self::with_role(EntityRole::PrimaryKeyClass)
    }

    #[must_use]
    pub fn plain() -> Self {
        Self::with_role(EntityRole::Plain)
    }

    fn with_role(role: EntityRole) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn named(mut self, storage_name: impl Into<String>) -> Self {
        self.storage_name = Some(storage_name.into());
        self
    }

    #[must_use]
    pub const fn force_quote(mut self) -> Self {
        self.force_quote = true;
        self
    }

    #[must_use]
    pub fn property(mut self, property: PropertySeed) -> Self {
        self.properties.push(property);
        self
    }
}

///
/// PropertySeed
///

#[derive(Clone, Debug)]
pub struct PropertySeed {
    pub name: String,
    pub declared_type: DeclaredType,
    pub role: PropertyRole,
    pub column_name: Option<String>,
    pub type_hint: Option<TypeHint>,
    pub indexes: Vec<IndexDecl>,
    pub force_quote: bool,
}

impl PropertySeed {
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            role: PropertyRole::Regular,
            column_name: None,
            type_hint: None,
            indexes: Vec::new(),
            force_quote: false,
        }
    }

    #[must_use]
    pub const fn partition_key(mut self) -> Self {
        self.role = PropertyRole::PartitionKey;
        self
    }

    #[must_use]
    pub const fn cluster_key(mut self, order: ClusteringOrder) -> Self {
        self.role = PropertyRole::ClusterKey(order);
        self
    }

    #[must_use]
    pub const fn composite_key(mut self) -> Self {
        self.role = PropertyRole::EmbeddedCompositeKey;
        self
    }

    #[must_use]
    pub fn column(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    #[must_use]
    pub fn hint(mut self, hint: TypeHint) -> Self {
        self.type_hint = Some(hint);
        self
    }

    #[must_use]
    pub fn index(mut self, index: IndexDecl) -> Self {
        self.indexes.push(index);
        self
    }

    #[must_use]
    pub const fn force_quote(mut self) -> Self {
        self.force_quote = true;
        self
    }
}

///
/// StaticDescriber
///
/// Describer backed by a fixed table of seeds, for hand-declared metadata.
///

#[derive(Clone, Debug, Default)]
pub struct StaticDescriber {
    seeds: HashMap<TypeName, EntitySeed>,
}

impl StaticDescriber {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, type_name: impl Into<TypeName>, seed: EntitySeed) -> Self {
        self.insert(type_name, seed);
        self
    }

    pub fn insert(&mut self, type_name: impl Into<TypeName>, seed: EntitySeed) -> &mut Self {
        self.seeds.insert(type_name.into(), seed);
        self
    }
}

impl EntityDescriber for StaticDescriber {
    fn describe(&self, type_name: &TypeName) -> Result<EntitySeed, DescribeError> {
        self.seeds
            .get(type_name)
            .cloned()
            .ok_or_else(|| DescribeError::NotFound(type_name.clone()))
    }
}
