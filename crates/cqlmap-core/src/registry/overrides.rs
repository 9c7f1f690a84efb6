use crate::{
    config::{EntityMapping, MappingConfig, PropertyMapping},
    declared::TypeName,
    entity::EntityId,
    registry::{MappingContext, RegistryError},
};
use cqlmap_schema::identifier::Identifier;
use tracing::info;

impl MappingContext {
    /// Register every root type, then apply the mapping overrides.
    pub fn initialize<'t>(
        &mut self,
        roots: impl IntoIterator<Item = &'t TypeName>,
        overrides: &MappingConfig,
    ) -> Result<(), RegistryError> {
        for root in roots {
            self.register(root)?;
        }

        self.apply_mapping(overrides)
    }

    /// Apply storage-name and column overrides. Types not yet registered are
    /// registered first.
    pub fn apply_mapping(&mut self, config: &MappingConfig) -> Result<(), RegistryError> {
        for mapping in &config.entities {
            let id = self.register(&mapping.type_name)?;

            self.apply_entity_mapping(id, mapping)?;
            for property in &mapping.properties {
                self.apply_property_mapping(id, &mapping.type_name, property)?;
            }
        }

        Ok(())
    }

    fn apply_entity_mapping(
        &mut self,
        id: EntityId,
        mapping: &EntityMapping,
    ) -> Result<(), RegistryError> {
        let invalid = |source| RegistryError::InvalidIdentifier {
            type_name: mapping.type_name.clone(),
            source,
        };
        let current = &self.entities[id.0].storage_name;

        let renamed = match mapping.table_name() {
            Some(table) => Identifier::try_new(table, mapping.force_quote).map_err(invalid)?,
            None if mapping.force_quote => current.with_case_sensitivity(true).map_err(invalid)?,
            None => return Ok(()),
        };
        if &renamed == current {
            return Ok(());
        }

        let previous = std::mem::replace(&mut self.entities[id.0].storage_name, renamed.clone());
        if let Some(ids) = self.by_storage_name.get_mut(&previous) {
            ids.remove(&id);
            if ids.is_empty() {
                self.by_storage_name.remove(&previous);
            }
        }
        self.by_storage_name
            .entry(renamed.clone())
            .or_default()
            .insert(id);

        info!(
            entity = %mapping.type_name,
            from = %previous,
            to = %renamed,
            "storage name overridden"
        );

        Ok(())
    }

    fn apply_property_mapping(
        &mut self,
        id: EntityId,
        type_name: &TypeName,
        mapping: &PropertyMapping,
    ) -> Result<(), RegistryError> {
        let property = self.entities[id.0]
            .get_property_mut(&mapping.name)
            .ok_or_else(|| RegistryError::MissingProperty {
                type_name: type_name.clone(),
                property: mapping.name.clone(),
            })?;

        let column_name = match mapping.column_name() {
            Some(column) => Identifier::try_new(column, mapping.force_quote),
            None => property.column_name.with_case_sensitivity(mapping.force_quote),
        }
        .map_err(|source| RegistryError::InvalidIdentifier {
            type_name: type_name.clone(),
            source,
        })?;

        info!(
            entity = %type_name,
            property = %mapping.name,
            column = %column_name,
            "column overridden"
        );
        property.force_quote = mapping.force_quote;
        property.column_name = column_name;

        Ok(())
    }
}
