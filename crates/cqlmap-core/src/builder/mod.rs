//! Module: builder
//! Responsibility: assemble table, index and user type schemas from
//! registered entities.
//! Does not own: type resolution rules, DDL rendering, execution.
//!
//! Invariants:
//! - A table schema has at least one partition key column.
//! - Column types are frozen when they are collections or user types, except
//!   for columns flattened out of a composite key, which keep their resolved
//!   type.
//! - A user type schema has at least one field, resolved in literal mode.
//! - Index schemas are stamped with the owning table only after all nested
//!   composite keys have been traversed.


use crate::{
    declared::TypeName,
    entity::{EntityDescriptor, PropertyDescriptor, PropertyRole},
    error::ErrorClass,
    registry::{MappingContext, RegistryError},
    resolve::{ResolutionMode, ResolveError},
};
use cqlmap_primitives::ScalarKind;
use cqlmap_schema::{
    identifier::Identifier,
    node::{ClusteringOrder, IndexSchema, IndexTarget, TableSchema, UserTypeSchema},
    types::DataType,
};
use std::collections::HashSet;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// SchemaError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("table '{table}' declares column '{column}' more than once")]
    DuplicateColumn { table: Identifier, column: Identifier },

    #[error("user type '{0}' has no fields")]
    EmptyUserType(Identifier),

    #[error("composite key property '{owner}.{property}' must be declared as a named type")]
    InvalidCompositeKey { owner: TypeName, property: String },

    #[error("index on '{table}.{column}' cannot target {target:?}: {reason}")]
    InvalidIndex {
        table: Identifier,
        column: Identifier,
        target: IndexTarget,
        reason: &'static str,
    },

    #[error("key column '{table}.{column}' has type '{kind}', which cannot be part of a primary key")]
    NonKeyableColumn {
        table: Identifier,
        column: Identifier,
        kind: ScalarKind,
    },

    #[error("table '{0}' has no partition key")]
    NoPartitionKey(Identifier),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl SchemaError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateColumn { .. }
            | Self::EmptyUserType(_)
            | Self::InvalidIndex { .. }
            | Self::NoPartitionKey(_)
            | Self::NonKeyableColumn { .. } => ErrorClass::InvalidSchema,
            Self::InvalidCompositeKey { .. } => ErrorClass::InvalidMetadata,
            Self::Registry(err) => err.class(),
            Self::Resolve(err) => err.class(),
        }
    }
}

///
/// TableColumns
///
/// Accumulates columns and rejects duplicate names and non-keyable key
/// types as they arrive.
///

struct TableColumns {
    table: TableSchema,
    seen: HashSet<Identifier>,
}

impl TableColumns {
    fn new(name: Identifier) -> Self {
        Self {
            table: TableSchema::new(name),
            seen: HashSet::new(),
        }
    }

    fn claim(&mut self, column: &Identifier) -> Result<(), SchemaError> {
        if self.seen.insert(column.clone()) {
            Ok(())
        } else {
            Err(SchemaError::DuplicateColumn {
                table: self.table.name.clone(),
                column: column.clone(),
            })
        }
    }

    fn check_keyable(&self, column: &Identifier, data_type: &DataType) -> Result<(), SchemaError> {
        match data_type.as_scalar() {
            Some(kind) if !kind.is_keyable() => Err(SchemaError::NonKeyableColumn {
                table: self.table.name.clone(),
                column: column.clone(),
                kind,
            }),
            _ => Ok(()),
        }
    }

    fn partition_key(&mut self, name: &Identifier, data_type: DataType) -> Result<(), SchemaError> {
        self.claim(name)?;
        self.check_keyable(name, &data_type)?;
        self.table.partition_key_column(name.clone(), data_type);

        Ok(())
    }

    fn clustering(
        &mut self,
        name: &Identifier,
        data_type: DataType,
        order: ClusteringOrder,
    ) -> Result<(), SchemaError> {
        self.claim(name)?;
        self.check_keyable(name, &data_type)?;
        self.table.clustering_column(name.clone(), data_type, order);

        Ok(())
    }

    fn regular(&mut self, name: &Identifier, data_type: DataType) -> Result<(), SchemaError> {
        self.claim(name)?;
        self.table.column(name.clone(), data_type);

        Ok(())
    }
}

impl MappingContext {
    /// Build the table schema for a registered entity.
    pub fn build_table_schema(&self, entity: &EntityDescriptor) -> Result<TableSchema, SchemaError> {
        let mut columns = TableColumns::new(entity.storage_name.clone());

        for property in &entity.properties {
            match property.role {
                PropertyRole::EmbeddedCompositeKey => {
                    let key = self.composite_key_entity(property)?;

                    for key_property in &key.properties {
                        let data_type = self.data_type(key_property)?;

                        match key_property.role {
                            PropertyRole::PartitionKey => {
                                columns.partition_key(&key_property.column_name, data_type)?;
                            }
                            PropertyRole::ClusterKey(order) => {
                                columns.clustering(&key_property.column_name, data_type, order)?;
                            }
                            _ => columns.clustering(
                                &key_property.column_name,
                                data_type,
                                ClusteringOrder::default(),
                            )?,
                        }
                    }
                }
                PropertyRole::PartitionKey => {
                    columns.partition_key(&property.column_name, self.column_type(property)?)?;
                }
                PropertyRole::ClusterKey(order) => {
                    columns.clustering(&property.column_name, self.column_type(property)?, order)?;
                }
                PropertyRole::Regular => {
                    columns.regular(&property.column_name, self.column_type(property)?)?;
                }
            }
        }

        let table = columns.table;
        if table.partition_key_columns.is_empty() {
            return Err(SchemaError::NoPartitionKey(table.name));
        }

        debug!(
            entity = %entity.type_name,
            table = %table.name,
            partition_keys = table.partition_key_columns.len(),
            clustering = table.clustering_columns.len(),
            columns = table.columns.len(),
            "built table schema"
        );

        Ok(table)
    }

    /// Build every index declared on an entity, including those declared
    /// inside its composite key.
    pub fn build_index_schemas(
        &self,
        entity: &EntityDescriptor,
    ) -> Result<Vec<IndexSchema>, SchemaError> {
        let mut indexes = Vec::new();
        self.collect_indexes(entity, &entity.storage_name, &mut indexes)?;

        for index in &mut indexes {
            index.stamp_table(entity.storage_name.clone());
        }

        debug!(
            entity = %entity.type_name,
            table = %entity.storage_name,
            indexes = indexes.len(),
            "built index schemas"
        );

        Ok(indexes)
    }

    fn collect_indexes(
        &self,
        entity: &EntityDescriptor,
        table: &Identifier,
        indexes: &mut Vec<IndexSchema>,
    ) -> Result<(), SchemaError> {
        for property in &entity.properties {
            if property.role.is_composite_key() {
                let key = self.composite_key_entity(property)?;
                self.collect_indexes(key, table, indexes)?;
                continue;
            }

            for decl in &property.indexes {
                check_index_target(table, property, decl.target)?;

                let mut index = IndexSchema::new(property.column_name.clone())
                    .with_target(decl.target)
                    .with_kind(decl.kind.clone());
                if let Some(name) = &decl.name {
                    index = index.with_name(name.clone());
                }

                indexes.push(index);
            }
        }

        Ok(())
    }

    /// Build the user type schema for a registered user type entity.
    pub fn build_user_type_schema(
        &self,
        entity: &EntityDescriptor,
    ) -> Result<UserTypeSchema, SchemaError> {
        if entity.properties.is_empty() {
            return Err(SchemaError::EmptyUserType(entity.storage_name.clone()));
        }

        let resolver = self.resolver(ResolutionMode::Literal);
        let mut user_type = UserTypeSchema::new(entity.storage_name.clone());
        for property in &entity.properties {
            user_type.field(property.column_name.clone(), resolver.resolve(property)?);
        }

        debug!(
            entity = %entity.type_name,
            user_type = %user_type.name,
            fields = user_type.fields.len(),
            "built user type schema"
        );

        Ok(user_type)
    }

    fn composite_key_entity(
        &self,
        property: &PropertyDescriptor,
    ) -> Result<&EntityDescriptor, SchemaError> {
        let type_name = property.declared_type.as_named().ok_or_else(|| {
            SchemaError::InvalidCompositeKey {
                owner: property.owner.clone(),
                property: property.name.clone(),
            }
        })?;

        Ok(self.required_entity(type_name)?)
    }

    fn column_type(&self, property: &PropertyDescriptor) -> Result<DataType, SchemaError> {
        Ok(self.data_type(property)?.frozen())
    }
}

fn check_index_target(
    table: &Identifier,
    property: &PropertyDescriptor,
    target: IndexTarget,
) -> Result<(), SchemaError> {
    let reason = match target {
        IndexTarget::Keys | IndexTarget::Entries if !property.is_map_like() => {
            "target requires a map column"
        }
        IndexTarget::Full if !property.is_collection_like() => {
            "target requires a collection column"
        }
        _ => return Ok(()),
    };

    Err(SchemaError::InvalidIndex {
        table: table.clone(),
        column: property.column_name.clone(),
        target,
        reason,
    })
}
