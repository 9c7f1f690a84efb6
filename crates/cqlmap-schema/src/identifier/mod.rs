//! Module: identifier
//! Responsibility: validated table/column/type naming with CQL case rules.
//! Does not own: entity classification or schema assembly.
//!
//! Invariants:
//! - Identifiers are non-empty.
//! - Unquoted identifiers are stored lower-cased and match `[a-z][a-z0-9_]*`.
//! - Case-sensitive identifiers keep their exact spelling.
//! - Equality and hashing compare the normalized name and the case flag.

mod reserved;

use convert_case::{Case, Casing};
use serde::Serialize;
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// IdentifierError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier '{0}' is not a valid unquoted identifier")]
    Invalid(String),

    #[error("identifier '{0}' is a reserved keyword and must be quoted")]
    Reserved(String),
}

///
/// Identifier
///
/// A table, column, index or user type name.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Identifier {
    name: String,
    case_sensitive: bool,
}

impl Identifier {
    /// Validate and construct an identifier.
    pub fn try_new(name: impl AsRef<str>, case_sensitive: bool) -> Result<Self, IdentifierError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if case_sensitive {
            return Ok(Self {
                name: name.to_string(),
                case_sensitive,
            });
        }

        let normalized = name.to_ascii_lowercase();
        if !is_unquoted_identifier(&normalized) {
            return Err(IdentifierError::Invalid(name.to_string()));
        }
        if reserved::is_reserved(&normalized) {
            return Err(IdentifierError::Reserved(name.to_string()));
        }

        Ok(Self {
            name: normalized,
            case_sensitive,
        })
    }

    /// Construct a case-insensitive identifier.
    pub fn unquoted(name: impl AsRef<str>) -> Result<Self, IdentifierError> {
        Self::try_new(name, false)
    }

    /// Construct a case-sensitive identifier.
    pub fn quoted(name: impl AsRef<str>) -> Result<Self, IdentifierError> {
        Self::try_new(name, true)
    }

    /// Derive a default storage name from a type path.
    ///
    /// Only the last `::` segment is used, converted to snake case, so
    /// `app::model::PersonAddress` becomes `person_address`.
    pub fn from_type_name(type_name: &str, force_quote: bool) -> Result<Self, IdentifierError> {
        let simple = type_name.rsplit("::").next().unwrap_or(type_name);

        Self::try_new(simple.to_case(Case::Snake), force_quote)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Return a copy of this identifier with the case flag switched.
    pub fn with_case_sensitivity(&self, case_sensitive: bool) -> Result<Self, IdentifierError> {
        Self::try_new(&self.name, case_sensitive)
    }

    /// Render this identifier the way it must appear in a CQL statement.
    #[must_use]
    pub fn to_cql(&self) -> String {
        if self.case_sensitive {
            format!("\"{}\"", self.name.replace('"', "\"\""))
        } else {
            self.name.clone()
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cql())
    }
}

// [a-z][a-z0-9_]* on an already lower-cased name
fn is_unquoted_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
