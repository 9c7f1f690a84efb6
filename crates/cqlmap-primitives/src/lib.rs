#[macro_use]
mod macros;

use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
};
use thiserror::Error as ThisError;

///
/// ScalarKind
///
/// Native (non-composite) column types understood by the store.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum ScalarKind {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Inet,
    Int,
    Smallint,
    Text,
    Time,
    Timestamp,
    Timeuuid,
    Tinyint,
    Uuid,
    Varint,
}

impl ScalarKind {
    /// Return the full metadata descriptor for one scalar kind.
    #[must_use]
    pub const fn metadata(self) -> ScalarMetadata {
        scalar_kind_registry!(metadata_from_registry, self)
    }

    /// Return the CQL spelling of this scalar.
    #[must_use]
    pub const fn cql_name(self) -> &'static str {
        self.metadata().cql_name
    }

    #[must_use]
    pub const fn family(self) -> ScalarFamily {
        self.metadata().family
    }

    /// Return whether this scalar may be used in a partition or clustering key.
    #[must_use]
    pub const fn is_keyable(self) -> bool {
        self.metadata().is_keyable
    }

    /// Return whether this scalar may appear inside a collection or tuple.
    #[must_use]
    pub const fn is_collection_element(self) -> bool {
        self.metadata().is_collection_element
    }
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cql_name())
    }
}

impl FromStr for ScalarKind {
    type Err = ParseScalarKindError;

    // case-insensitive; `varchar` is an alias of `text`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("varchar") {
            return Ok(Self::Text);
        }

        ALL_SCALAR_KINDS
            .iter()
            .copied()
            .find(|kind| kind.cql_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseScalarKindError(s.to_string()))
    }
}

///
/// ParseScalarKindError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown scalar type '{0}'")]
pub struct ParseScalarKindError(pub String);

///
/// ScalarMetadata
///
/// Capability metadata shared across schema/core layers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScalarMetadata {
    pub cql_name: &'static str,
    pub family: ScalarFamily,
    pub is_keyable: bool,
    pub is_collection_element: bool,
}

///
/// ScalarFamily
///
/// Coarse grouping used for diagnostics and conversion defaults.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarFamily {
    Blob,
    Bool,
    Identifier,
    Network,
    Numeric,
    Temporal,
    Textual,
}

/// Ordered list of all scalar kinds in registry order.
pub const ALL_SCALAR_KINDS: [ScalarKind; 20] = scalar_kind_registry!(all_kinds_from_registry);
