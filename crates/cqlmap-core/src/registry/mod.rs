//! Module: registry
//! Responsibility: own every entity descriptor and the lookup caches built
//! over them.
//! Does not own: metadata discovery (`EntityDescriber`), type resolution,
//! schema assembly.
//!
//! Invariants:
//! - A type is described at most once; repeated registration returns the
//!   same `EntityId`.
//! - A descriptor is cached before its reachable types are registered, so
//!   cyclic references terminate.
//! - `table_entities` and `user_type_entities` are disjoint.
//! - Every entity is indexed under its current storage name.
//! - Types with a write conversion or a simple mapping are never entities.
//! - A failed `register` leaves the caches as they were before the call.

mod overrides;

use crate::{
    conversion::{CustomConversions, SimpleTypes},
    declared::TypeName,
    entity::{
        EntityDescriptor, EntityId, EntityRole, PropertyDescriptor,
        describe::{DescribeError, EntityDescriber, EntitySeed, PropertySeed},
    },
    error::ErrorClass,
    resolve::{ResolutionMode, ResolveError, TypeResolver, UserTypeResolver},
    verify::{CompositeVerifier, VerificationError},
};
use cqlmap_schema::{
    identifier::{Identifier, IdentifierError},
    types::DataType,
};
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};
use thiserror::Error as ThisError;
use tracing::{debug, trace};

///
/// RegistryError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum RegistryError {
    #[error("entity '{type_name}' has an invalid name: {source}")]
    InvalidIdentifier {
        type_name: TypeName,
        source: IdentifierError,
    },

    #[error("entity '{type_name}' has no property '{property}'")]
    MissingProperty {
        type_name: TypeName,
        property: String,
    },

    #[error("type '{0}' maps to a scalar and cannot be registered as an entity")]
    NotAnEntity(TypeName),

    #[error("entity '{0}' is not registered")]
    NotRegistered(TypeName),

    #[error("unknown entity '{type_name}': {source}")]
    UnknownEntity {
        type_name: TypeName,
        source: DescribeError,
    },

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl RegistryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidIdentifier { .. } => ErrorClass::InvalidIdentifier,
            Self::MissingProperty { .. } => ErrorClass::MissingProperty,
            Self::NotAnEntity(_) | Self::Verification(_) => ErrorClass::InvalidMetadata,
            Self::NotRegistered(_) | Self::UnknownEntity { .. } => ErrorClass::UnknownEntity,
        }
    }
}

///
/// MappingContext
///
/// Registry of entity descriptors. Populated through `&mut self` during
/// initialization, then shared read-only for schema building.
///

pub struct MappingContext {
    entities: Vec<EntityDescriptor>,
    by_type: HashMap<TypeName, EntityId>,
    by_storage_name: HashMap<Identifier, BTreeSet<EntityId>>,
    table_entities: BTreeSet<EntityId>,
    user_type_entities: BTreeSet<EntityId>,

    describer: Box<dyn EntityDescriber>,
    conversions: CustomConversions,
    simple_types: SimpleTypes,
    verifier: CompositeVerifier,
    user_types: Option<Box<dyn UserTypeResolver>>,
}

impl fmt::Debug for MappingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingContext")
            .field("entities", &self.entities.len())
            .field("table_entities", &self.table_entities)
            .field("user_type_entities", &self.user_type_entities)
            .field("conversions", &self.conversions.len())
            .field("user_type_resolver", &self.user_types.is_some())
            .finish_non_exhaustive()
    }
}

impl MappingContext {
    #[must_use]
    pub fn new(describer: impl EntityDescriber + 'static) -> Self {
        Self {
            entities: Vec::new(),
            by_type: HashMap::new(),
            by_storage_name: HashMap::new(),
            table_entities: BTreeSet::new(),
            user_type_entities: BTreeSet::new(),
            describer: Box::new(describer),
            conversions: CustomConversions::default(),
            simple_types: SimpleTypes::default(),
            verifier: CompositeVerifier::default(),
            user_types: None,
        }
    }

    #[must_use]
    pub fn with_conversions(mut self, conversions: CustomConversions) -> Self {
        self.conversions = conversions;
        self
    }

    #[must_use]
    pub fn with_simple_types(mut self, simple_types: SimpleTypes) -> Self {
        self.simple_types = simple_types;
        self
    }

    #[must_use]
    pub fn with_verifier(mut self, verifier: CompositeVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    #[must_use]
    pub fn with_user_type_resolver(mut self, resolver: impl UserTypeResolver + 'static) -> Self {
        self.set_user_type_resolver(resolver);
        self
    }

    pub fn set_user_type_resolver(&mut self, resolver: impl UserTypeResolver + 'static) {
        self.user_types = Some(Box::new(resolver));
    }

    // ---------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------

    /// Register a type and everything reachable from its properties.
    ///
    /// Registration is all or nothing: on error every entity added by this
    /// call is removed again.
    pub fn register(&mut self, type_name: &TypeName) -> Result<EntityId, RegistryError> {
        if let Some(id) = self.by_type.get(type_name) {
            return Ok(*id);
        }
        if self.is_scalar_mapped(type_name) {
            return Err(RegistryError::NotAnEntity(type_name.clone()));
        }

        let mark = self.entities.len();
        let result = self.register_new(type_name);
        if result.is_err() {
            self.rollback(mark);
        }

        result
    }

    fn register_new(&mut self, type_name: &TypeName) -> Result<EntityId, RegistryError> {
        let seed = self
            .describer
            .describe(type_name)
            .map_err(|source| RegistryError::UnknownEntity {
                type_name: type_name.clone(),
                source,
            })?;
        let id = self.insert(type_name, seed)?;
        self.register_reachable(id)?;

        Ok(id)
    }

    // Drop every entity with an id at or above `mark`, along with its cache
    // entries.
    fn rollback(&mut self, mark: usize) {
        for entity in self.entities.drain(mark..) {
            self.by_type.remove(&entity.type_name);
            self.table_entities.remove(&entity.id);
            self.user_type_entities.remove(&entity.id);

            if let Some(ids) = self.by_storage_name.get_mut(&entity.storage_name) {
                ids.remove(&entity.id);
                if ids.is_empty() {
                    self.by_storage_name.remove(&entity.storage_name);
                }
            }

            debug!(entity = %entity.type_name, id = %entity.id, "rolled back registration");
        }
    }

    fn register_reachable(&mut self, id: EntityId) -> Result<(), RegistryError> {
        let reachable: Vec<TypeName> = self.entities[id.0]
            .properties
            .iter()
            .flat_map(|p| p.declared_type.named_types())
            .filter(|name| !self.is_scalar_mapped(name))
            .cloned()
            .collect();

        for type_name in reachable {
            if self.by_type.contains_key(&type_name) {
                continue;
            }

            match self.describer.describe(&type_name) {
                Ok(seed) => {
                    let nested = self.insert(&type_name, seed)?;
                    self.register_reachable(nested)?;
                }
                Err(DescribeError::NotFound(_)) => {
                    trace!(type_name = %type_name, from = %id, "skipping undescribed reachable type");
                }
                Err(source) => return Err(RegistryError::UnknownEntity { type_name, source }),
            }
        }

        Ok(())
    }

    fn insert(&mut self, type_name: &TypeName, seed: EntitySeed) -> Result<EntityId, RegistryError> {
        let invalid = |source| RegistryError::InvalidIdentifier {
            type_name: type_name.clone(),
            source,
        };

        let storage_name = match seed.storage_name.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(name) => Identifier::try_new(name, seed.force_quote),
            None => Identifier::from_type_name(type_name, seed.force_quote),
        }
        .map_err(invalid)?;

        let properties = seed
            .properties
            .into_iter()
            .map(|property| property_descriptor(type_name, property).map_err(invalid))
            .collect::<Result<Vec<_>, _>>()?;

        let id = EntityId(self.entities.len());
        let entity = EntityDescriptor {
            id,
            type_name: type_name.clone(),
            storage_name,
            role: seed.role,
            properties,
        };
        self.verifier.check(&entity)?;

        match entity.role {
            EntityRole::UserDefinedType => {
                self.user_type_entities.insert(id);
            }
            EntityRole::Table => {
                self.table_entities.insert(id);
            }
            EntityRole::PrimaryKeyClass | EntityRole::Plain => {}
        }
        self.by_storage_name
            .entry(entity.storage_name.clone())
            .or_default()
            .insert(id);
        self.by_type.insert(type_name.clone(), id);

        debug!(
            entity = %type_name,
            id = %id,
            storage_name = %entity.storage_name,
            role = ?entity.role,
            properties = entity.properties.len(),
            "registered entity"
        );
        self.entities.push(entity);

        Ok(id)
    }

    fn is_scalar_mapped(&self, type_name: &TypeName) -> bool {
        self.conversions.has_write_target(type_name) || self.simple_types.is_simple(type_name)
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&EntityDescriptor> {
        self.entities.get(id.0)
    }

    #[must_use]
    pub fn entity_for(&self, type_name: &TypeName) -> Option<&EntityDescriptor> {
        self.by_type.get(type_name).and_then(|id| self.entity(*id))
    }

    pub fn required_entity(&self, type_name: &TypeName) -> Result<&EntityDescriptor, RegistryError> {
        self.entity_for(type_name)
            .ok_or_else(|| RegistryError::NotRegistered(type_name.clone()))
    }

    #[must_use]
    pub fn is_registered(&self, type_name: &TypeName) -> bool {
        self.by_type.contains_key(type_name)
    }

    /// All entities in registration order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entities.iter()
    }

    pub fn table_entities(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.table_entities.iter().filter_map(|id| self.entity(*id))
    }

    pub fn user_type_entities(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.user_type_entities
            .iter()
            .filter_map(|id| self.entity(*id))
    }

    pub fn entities_for_storage_name(
        &self,
        name: &Identifier,
    ) -> impl Iterator<Item = &EntityDescriptor> {
        self.by_storage_name
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|id| self.entity(*id))
    }

    /// Whether any entity is stored under `name`.
    #[must_use]
    pub fn uses_storage_name(&self, name: &Identifier) -> bool {
        self.by_storage_name
            .get(name)
            .is_some_and(|ids| !ids.is_empty())
    }

    /// Whether a user type entity carries `name`, or any property names it
    /// in an explicit user type hint.
    #[must_use]
    pub fn uses_user_type(&self, name: &Identifier) -> bool {
        self.user_type_entities().any(|e| &e.storage_name == name)
            || self
                .entities
                .iter()
                .flat_map(|e| &e.properties)
                .filter_map(|p| p.type_hint.as_ref())
                .any(|hint| hint.user_type_name() == Some(name))
    }

    // ---------------------------------------------------------------------
    // Resolution
    // ---------------------------------------------------------------------

    #[must_use]
    pub const fn conversions(&self) -> &CustomConversions {
        &self.conversions
    }

    #[must_use]
    pub const fn simple_types(&self) -> &SimpleTypes {
        &self.simple_types
    }

    #[must_use]
    pub fn user_type_resolver(&self) -> Option<&dyn UserTypeResolver> {
        self.user_types.as_deref()
    }

    /// Storage type of a bare source type, from its write conversion or the
    /// simple type table.
    #[must_use]
    pub fn data_type_for(&self, type_name: &TypeName) -> Option<DataType> {
        self.conversions
            .write_target(type_name)
            .or_else(|| self.simple_types.scalar_for(type_name))
            .map(DataType::Scalar)
    }

    /// Storage type of a property, with user types resolved against the
    /// store.
    pub fn data_type(&self, property: &PropertyDescriptor) -> Result<DataType, ResolveError> {
        self.resolver(ResolutionMode::Resolved).resolve(property)
    }

    #[must_use]
    pub const fn resolver(&self, mode: ResolutionMode) -> TypeResolver<'_> {
        TypeResolver::new(self, mode)
    }
}

fn property_descriptor(
    owner: &TypeName,
    seed: PropertySeed,
) -> Result<PropertyDescriptor, IdentifierError> {
    let column = seed
        .column_name
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(&seed.name);
    let column_name = Identifier::try_new(column, seed.force_quote)?;

    Ok(PropertyDescriptor {
        owner: owner.clone(),
        name: seed.name,
        declared_type: seed.declared_type,
        column_name,
        type_hint: seed.type_hint,
        role: seed.role,
        force_quote: seed.force_quote,
        indexes: seed.indexes,
    })
}
