//! Module: entity
//! Responsibility: registry-owned entity and property descriptors.
//! Does not own: discovery of metadata (see `describe`) or classification
//! caches (see `registry`).
//!
//! Invariants:
//! - Exactly one descriptor exists per registered type.
//! - Properties keep declaration order.
//! - Column and storage names are validated identifiers.

pub mod describe;

use crate::declared::{DeclaredType, TypeName};
use cqlmap_primitives::ScalarKind;
use cqlmap_schema::{
    identifier::{Identifier, IdentifierError},
    node::{ClusteringOrder, IndexKind, IndexTarget},
};
use derive_more::Display;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// EntityId
///
/// Handle to a descriptor owned by one `MappingContext`.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[display("#{_0}")]
pub struct EntityId(pub(crate) usize);

///
/// EntityRole
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum EntityRole {
    Table,
    UserDefinedType,
    PrimaryKeyClass,
    #[default]
    Plain,
}

///
/// PropertyRole
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum PropertyRole {
    #[default]
    Regular,
    PartitionKey,
    ClusterKey(ClusteringOrder),
    EmbeddedCompositeKey,
}

impl PropertyRole {
    #[must_use]
    pub const fn is_partition_key(self) -> bool {
        matches!(self, Self::PartitionKey)
    }

    #[must_use]
    pub const fn is_cluster_key(self) -> bool {
        matches!(self, Self::ClusterKey(_))
    }

    #[must_use]
    pub const fn is_composite_key(self) -> bool {
        matches!(self, Self::EmbeddedCompositeKey)
    }

    /// Any role that contributes to the primary key.
    #[must_use]
    pub const fn is_key(self) -> bool {
        !matches!(self, Self::Regular)
    }
}

///
/// TypeHint
///
/// Field-level storage type override that bypasses default inference.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum TypeHint {
    Scalar(ScalarKind),
    List(ScalarKind),
    Set(ScalarKind),
    Map(ScalarKind, ScalarKind),
    Tuple(Vec<ScalarKind>),

    /// Named user type. `literal` forces a placeholder even when the caller
    /// asks for resolved types.
    UserType {
        name: Identifier,
        literal: bool,
    },
}

impl TypeHint {
    pub fn user_type(name: &str) -> Result<Self, IdentifierError> {
        Ok(Self::UserType {
            name: Identifier::unquoted(name)?,
            literal: false,
        })
    }

    pub fn literal_user_type(name: &str) -> Result<Self, IdentifierError> {
        Ok(Self::UserType {
            name: Identifier::unquoted(name)?,
            literal: true,
        })
    }

    #[must_use]
    pub const fn user_type_name(&self) -> Option<&Identifier> {
        match self {
            Self::UserType { name, .. } => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(..))
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_) | Self::Map(..))
    }
}

///
/// IndexDecl
///
/// Index metadata declared on a property.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct IndexDecl {
    pub name: Option<Identifier>,
    pub target: IndexTarget,
    pub kind: IndexKind,
}

impl IndexDecl {
    #[must_use]
    pub fn secondary() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn custom(class: impl Into<String>, options: BTreeMap<String, String>) -> Self {
        Self {
            kind: IndexKind::Custom {
                class: class.into(),
                options,
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn named(mut self, name: Identifier) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub const fn on(mut self, target: IndexTarget) -> Self {
        self.target = target;
        self
    }
}

///
/// PropertyDescriptor
///

#[derive(Clone, Debug, Serialize)]
pub struct PropertyDescriptor {
    pub owner: TypeName,
    pub name: String,
    pub declared_type: DeclaredType,
    pub column_name: Identifier,
    pub type_hint: Option<TypeHint>,
    pub role: PropertyRole,
    pub force_quote: bool,
    pub indexes: Vec<IndexDecl>,
}

impl PropertyDescriptor {
    /// Whether the stored value is a map, going by the hint first.
    #[must_use]
    pub fn is_map_like(&self) -> bool {
        self.type_hint
            .as_ref()
            .map_or_else(|| self.declared_type.is_map(), TypeHint::is_map)
    }

    /// Whether the stored value is any collection, going by the hint first.
    #[must_use]
    pub fn is_collection_like(&self) -> bool {
        self.type_hint.as_ref().map_or_else(
            || self.declared_type.is_collection_like() || self.declared_type.is_map(),
            TypeHint::is_collection,
        )
    }
}

///
/// EntityDescriptor
///

#[derive(Clone, Debug, Serialize)]
pub struct EntityDescriptor {
    pub id: EntityId,
    pub type_name: TypeName,
    pub storage_name: Identifier,
    pub role: EntityRole,
    pub properties: Vec<PropertyDescriptor>,
}

impl EntityDescriptor {
    #[must_use]
    pub fn is_user_defined_type(&self) -> bool {
        self.role == EntityRole::UserDefinedType
    }

    #[must_use]
    pub fn is_table(&self) -> bool {
        self.role == EntityRole::Table
    }

    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub(crate) fn get_property_mut(&mut self, name: &str) -> Option<&mut PropertyDescriptor> {
        self.properties.iter_mut().find(|p| p.name == name)
    }

    /// Properties declaring any primary key role.
    pub fn key_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.role.is_key())
    }
}
