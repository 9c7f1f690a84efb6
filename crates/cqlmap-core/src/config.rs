//! Mapping overrides, loaded from TOML.
//!
//! ```toml
//! [[entity]]
//! type = "app::Person"
//! table = "people"
//!
//! [[entity.property]]
//! name = "email"
//! column = "email_address"
//! ```

use crate::declared::TypeName;
use serde::Deserialize;
use std::{fs, io, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read mapping config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse mapping config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// MappingConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityMapping>,
}

impl MappingConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn with_entity(mut self, entity: EntityMapping) -> Self {
        self.entities.push(entity);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

///
/// EntityMapping
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EntityMapping {
    #[serde(rename = "type")]
    pub type_name: TypeName,

    #[serde(default)]
    pub table: Option<String>,

    #[serde(default)]
    pub force_quote: bool,

    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyMapping>,
}

impl EntityMapping {
    #[must_use]
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name: type_name.into(),
            table: None,
            force_quote: false,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>, force_quote: bool) -> Self {
        self.table = Some(table.into());
        self.force_quote = force_quote;
        self
    }

    #[must_use]
    pub fn property(mut self, property: PropertyMapping) -> Self {
        self.properties.push(property);
        self
    }

    /// The table override, ignoring blank values.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        non_blank(self.table.as_deref())
    }
}

///
/// PropertyMapping
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PropertyMapping {
    pub name: String,

    #[serde(default)]
    pub column: Option<String>,

    #[serde(default)]
    pub force_quote: bool,
}

impl PropertyMapping {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            force_quote: false,
        }
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<String>, force_quote: bool) -> Self {
        self.column = Some(column.into());
        self.force_quote = force_quote;
        self
    }

    #[must_use]
    pub const fn force_quote(mut self, force_quote: bool) -> Self {
        self.force_quote = force_quote;
        self
    }

    /// The column override, ignoring blank values.
    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        non_blank(self.column.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[entity]]
type = "app::Person"
table = "People"
force_quote = true

[[entity.property]]
name = "email"
column = "email_address"

[[entity.property]]
name = "nick"
force_quote = true

[[entity]]
type = "app::Order"
"#;

    #[test]
    fn parses_entities_and_properties() {
        let config = MappingConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.entities.len(), 2);

        let person = &config.entities[0];
        assert_eq!(person.type_name.as_str(), "app::Person");
        assert_eq!(person.table_name(), Some("People"));
        assert!(person.force_quote);
        assert_eq!(person.properties[0].column_name(), Some("email_address"));
        assert_eq!(person.properties[1].column_name(), None);
        assert!(person.properties[1].force_quote);

        let order = &config.entities[1];
        assert_eq!(order.table_name(), None);
        assert!(order.properties.is_empty());
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mapping = EntityMapping::new("app::Person").table("  ", false);

        assert_eq!(mapping.table_name(), None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = MappingConfig::from_toml_str("[[entity]]\ntype = \"x\"\nkeyspace = \"ks\"\n")
            .unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_document_is_empty_config() {
        assert!(MappingConfig::from_toml_str("").unwrap().is_empty());
    }

    #[test]
    fn reads_from_disk() {
        let path = std::env::temp_dir().join(format!("cqlmap-config-{}.toml", std::process::id()));
        fs::write(&path, SAMPLE).unwrap();

        let config = MappingConfig::from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.entities.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MappingConfig::from_path("/definitely/not/here.toml").unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
