//! Module: resolve
//! Responsibility: map a property's declared type to a storage `DataType`.
//! Does not own: entity discovery, schema assembly.
//!
//! Invariants:
//! - Rules are tried in a fixed order and the first match wins: explicit
//!   hint, entity-backed user type, custom conversion, map, structural
//!   fallback.
//! - Map keys never resolve to collections.
//! - A map value never contains another map at any depth.
//! - Collections nested inside collections are frozen.

#[cfg(test)]
mod tests;

use crate::{
    declared::{DeclaredType, TypeName},
    entity::{PropertyDescriptor, TypeHint},
    error::ErrorClass,
    registry::MappingContext,
};
use cqlmap_primitives::ScalarKind;
use cqlmap_schema::{
    identifier::Identifier,
    types::{DataType, UserTypeRef},
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ResolveError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ResolveError {
    #[error("property '{owner}.{property}' uses a collection as a map key ({key})")]
    InvalidMapKey {
        owner: TypeName,
        property: String,
        key: DataType,
    },

    #[error("property '{owner}.{property}' hints a tuple element '{kind}' that cannot be nested")]
    InvalidTupleElement {
        owner: TypeName,
        property: String,
        kind: ScalarKind,
    },

    #[error("user type '{0}' does not exist in the store")]
    MissingUserType(Identifier),

    #[error("user type '{0}' must be resolved but no user type resolver is configured")]
    NoUserTypeResolver(Identifier),

    #[error("property '{owner}.{property}' has a map key of type '{declared}' with no storage mapping")]
    UnresolvableMapKey {
        owner: TypeName,
        property: String,
        declared: DeclaredType,
    },

    #[error("property '{owner}.{property}' has a map value of type '{declared}' with no storage mapping")]
    UnresolvableMapValue {
        owner: TypeName,
        property: String,
        declared: DeclaredType,
    },

    #[error("property '{owner}.{property}' of type '{declared}' has no storage mapping")]
    UnresolvableType {
        owner: TypeName,
        property: String,
        declared: DeclaredType,
    },

    #[error("property '{owner}.{property}': {reason}")]
    UnsupportedHint {
        owner: TypeName,
        property: String,
        reason: String,
    },

    #[error("property '{owner}.{property}' nests a map inside a map, which is not supported")]
    UnsupportedNestedMap { owner: TypeName, property: String },
}

impl ResolveError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingUserType(_) | Self::NoUserTypeResolver(_) => ErrorClass::MissingUserType,
            Self::UnresolvableMapKey { .. }
            | Self::UnresolvableMapValue { .. }
            | Self::UnresolvableType { .. } => ErrorClass::UnresolvableType,
            Self::InvalidMapKey { .. }
            | Self::InvalidTupleElement { .. }
            | Self::UnsupportedHint { .. }
            | Self::UnsupportedNestedMap { .. } => ErrorClass::InvalidMetadata,
        }
    }
}

///
/// ResolutionMode
///
/// `Literal` synthesizes user type placeholders from their names;
/// `Resolved` looks each one up through the context's `UserTypeResolver`.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ResolutionMode {
    Literal,
    #[default]
    Resolved,
}

impl ResolutionMode {
    pub fn user_type(
        self,
        context: &MappingContext,
        name: &Identifier,
    ) -> Result<UserTypeRef, ResolveError> {
        match self {
            Self::Literal => Ok(UserTypeRef::literal(name.clone())),
            Self::Resolved => {
                let resolver = context
                    .user_type_resolver()
                    .ok_or_else(|| ResolveError::NoUserTypeResolver(name.clone()))?;

                resolver
                    .resolve_type(name)
                    .ok_or_else(|| ResolveError::MissingUserType(name.clone()))
            }
        }
    }
}

///
/// UserTypeResolver
///
/// Lookup of user types that already exist in the store.
///

pub trait UserTypeResolver: Send + Sync {
    fn resolve_type(&self, name: &Identifier) -> Option<UserTypeRef>;
}

///
/// StaticUserTypes
///

#[derive(Clone, Debug, Default)]
pub struct StaticUserTypes {
    keyspace: Option<Identifier>,
    names: BTreeSet<Identifier>,
}

impl StaticUserTypes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn in_keyspace(keyspace: Identifier) -> Self {
        Self {
            keyspace: Some(keyspace),
            names: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: Identifier) -> Self {
        self.insert(name);
        self
    }

    pub fn insert(&mut self, name: Identifier) -> &mut Self {
        self.names.insert(name);
        self
    }
}

impl UserTypeResolver for StaticUserTypes {
    fn resolve_type(&self, name: &Identifier) -> Option<UserTypeRef> {
        if !self.names.contains(name) {
            return None;
        }

        let user_type = UserTypeRef::resolved(name.clone());

        Some(match &self.keyspace {
            Some(keyspace) => user_type.with_keyspace(keyspace.clone()),
            None => user_type,
        })
    }
}

type Fallback<'f> = &'f dyn Fn() -> Result<DataType, ResolveError>;

///
/// TypeResolver
///

pub struct TypeResolver<'a> {
    context: &'a MappingContext,
    mode: ResolutionMode,
}

impl<'a> TypeResolver<'a> {
    #[must_use]
    pub const fn new(context: &'a MappingContext, mode: ResolutionMode) -> Self {
        Self { context, mode }
    }

    #[must_use]
    pub const fn mode(&self) -> ResolutionMode {
        self.mode
    }

    /// Resolve a property, failing with `UnresolvableType` when no rule
    /// matches.
    pub fn resolve(&self, property: &PropertyDescriptor) -> Result<DataType, ResolveError> {
        self.resolve_with(property, &|| {
            Err(ResolveError::UnresolvableType {
                owner: property.owner.clone(),
                property: property.name.clone(),
                declared: property.declared_type.clone(),
            })
        })
    }

    /// Resolve a property, calling `fallback` when no rule matches.
    pub fn resolve_with(
        &self,
        property: &PropertyDescriptor,
        fallback: Fallback<'_>,
    ) -> Result<DataType, ResolveError> {
        if let Some(hint) = &property.type_hint {
            return self.resolve_hint(property, hint);
        }

        self.resolve_declared(property, &property.declared_type, fallback)
    }

    fn resolve_hint(
        &self,
        property: &PropertyDescriptor,
        hint: &TypeHint,
    ) -> Result<DataType, ResolveError> {
        match hint {
            TypeHint::Scalar(kind) => Ok(DataType::Scalar(*kind)),
            TypeHint::List(kind) => Ok(DataType::list(DataType::Scalar(*kind))),
            TypeHint::Set(kind) => Ok(DataType::set(DataType::Scalar(*kind))),
            TypeHint::Map(key, value) => Ok(DataType::map(
                DataType::Scalar(*key),
                DataType::Scalar(*value),
            )),
            TypeHint::Tuple(kinds) => {
                if let Some(kind) = kinds.iter().find(|k| !k.is_collection_element()) {
                    return Err(ResolveError::InvalidTupleElement {
                        owner: property.owner.clone(),
                        property: property.name.clone(),
                        kind: *kind,
                    });
                }

                Ok(DataType::tuple(kinds.iter().copied().map(DataType::Scalar)))
            }
            TypeHint::UserType { name, literal } => {
                let mode = if *literal {
                    ResolutionMode::Literal
                } else {
                    self.mode
                };
                let user_type = DataType::user_type(mode.user_type(self.context, name)?);

                match &property.declared_type {
                    DeclaredType::Named(_) => Ok(user_type),
                    DeclaredType::List(_) => Ok(DataType::list(user_type)),
                    DeclaredType::Set(_) => Ok(DataType::set(user_type)),
                    DeclaredType::Map(..) => Err(ResolveError::UnsupportedHint {
                        owner: property.owner.clone(),
                        property: property.name.clone(),
                        reason: format!("user type hint '{name}' cannot apply to a map"),
                    }),
                }
            }
        }
    }

    fn resolve_declared(
        &self,
        property: &PropertyDescriptor,
        declared: &DeclaredType,
        fallback: Fallback<'_>,
    ) -> Result<DataType, ResolveError> {
        // entity-backed user type
        if !declared.is_map()
            && let Some(actual) = declared.actual_type().as_named()
            && let Some(entity) = self.context.entity_for(actual)
            && entity.is_user_defined_type()
        {
            let user_type =
                DataType::user_type(self.mode.user_type(self.context, &entity.storage_name)?);

            return Ok(wrap_like(declared, user_type));
        }

        // custom conversion, exact type then element type
        if let Some(kind) = self.conversion_for(declared) {
            return Ok(DataType::Scalar(kind));
        }
        if !declared.is_map()
            && let Some(kind) = self.conversion_for(declared.actual_type())
        {
            return Ok(wrap_like(declared, DataType::Scalar(kind)));
        }

        match declared {
            DeclaredType::Map(key, value) => self.resolve_map(property, key, value),
            DeclaredType::Named(name) => match self.context.simple_types().scalar_for(name) {
                Some(kind) => Ok(DataType::Scalar(kind)),
                None => fallback(),
            },
            DeclaredType::List(element) | DeclaredType::Set(element) => {
                let element = freeze_nested(self.resolve_declared(property, element, fallback)?);

                Ok(wrap_like(declared, element))
            }
        }
    }

    fn resolve_map(
        &self,
        property: &PropertyDescriptor,
        key: &DeclaredType,
        value: &DeclaredType,
    ) -> Result<DataType, ResolveError> {
        let key_type = self.resolve_declared(property, key, &|| {
            Err(ResolveError::UnresolvableMapKey {
                owner: property.owner.clone(),
                property: property.name.clone(),
                declared: key.clone(),
            })
        })?;
        if key_type.unfrozen().is_collection() {
            return Err(ResolveError::InvalidMapKey {
                owner: property.owner.clone(),
                property: property.name.clone(),
                key: key_type,
            });
        }

        let nested_map = || ResolveError::UnsupportedNestedMap {
            owner: property.owner.clone(),
            property: property.name.clone(),
        };
        if value.is_map() {
            return Err(nested_map());
        }
        let value_type = self.resolve_declared(property, value, &|| {
            Err(ResolveError::UnresolvableMapValue {
                owner: property.owner.clone(),
                property: property.name.clone(),
                declared: value.clone(),
            })
        })?;
        // a map can still hide behind a list, set or tuple value
        if contains_map(&value_type) {
            return Err(nested_map());
        }

        Ok(DataType::map(key_type, freeze_nested(value_type)))
    }

    fn conversion_for(&self, declared: &DeclaredType) -> Option<ScalarKind> {
        declared
            .as_named()
            .and_then(|name| self.context.conversions().write_target(name))
    }
}

fn contains_map(data_type: &DataType) -> bool {
    let mut found = false;
    data_type.walk(&mut |node| found |= matches!(node, DataType::Map(..)));

    found
}

// Wrap `inner` in the collection shape of `declared`; named and map
// declarations pass it through.
fn wrap_like(declared: &DeclaredType, inner: DataType) -> DataType {
    match declared {
        DeclaredType::List(_) => DataType::list(inner),
        DeclaredType::Set(_) => DataType::set(inner),
        DeclaredType::Named(_) | DeclaredType::Map(..) => inner,
    }
}

fn freeze_nested(data_type: DataType) -> DataType {
    if data_type.is_collection() {
        data_type.frozen()
    } else {
        data_type
    }
}
