//! Module: types
//! Responsibility: the storage type lattice produced by type resolution.
//!
//! Invariants:
//! - `Frozen` only ever wraps collections or user types; `DataType::frozen`
//!   leaves scalars, tuples and already-frozen values untouched.
//! - Literal user type placeholders are implicitly frozen.

#[cfg(test)]
mod tests;

use crate::identifier::Identifier;
use cqlmap_primitives::ScalarKind;
use serde::Serialize;
use std::fmt::{self, Display};

///
/// Resolution
///
/// Whether a user type reference was looked up in the store or synthesized
/// from its name alone.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Resolution {
    Literal,
    Resolved,
}

///
/// UserTypeRef
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct UserTypeRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyspace: Option<Identifier>,
    pub name: Identifier,
    pub resolution: Resolution,
}

impl UserTypeRef {
    /// Unresolved placeholder carrying only the type name.
    #[must_use]
    pub const fn literal(name: Identifier) -> Self {
        Self {
            keyspace: None,
            name,
            resolution: Resolution::Literal,
        }
    }

    /// Reference to a user type known to exist in the store.
    #[must_use]
    pub const fn resolved(name: Identifier) -> Self {
        Self {
            keyspace: None,
            name,
            resolution: Resolution::Resolved,
        }
    }

    #[must_use]
    pub fn with_keyspace(mut self, keyspace: Identifier) -> Self {
        self.keyspace = Some(keyspace);
        self
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.resolution == Resolution::Literal
    }
}

impl Display for UserTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.keyspace, self.resolution) {
            (_, Resolution::Literal) => write!(f, "frozen<{}>", self.name),
            (Some(keyspace), Resolution::Resolved) => write!(f, "{keyspace}.{}", self.name),
            (None, Resolution::Resolved) => write!(f, "{}", self.name),
        }
    }
}

///
/// DataType
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum DataType {
    Scalar(ScalarKind),
    List(Box<Self>),
    Set(Box<Self>),
    Map(Box<Self>, Box<Self>),
    Tuple(Vec<Self>),
    UserType(UserTypeRef),
    Frozen(Box<Self>),
}

impl DataType {
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    #[must_use]
    pub fn set(element: Self) -> Self {
        Self::Set(Box::new(element))
    }

    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    #[must_use]
    pub fn tuple(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Tuple(elements.into_iter().collect())
    }

    #[must_use]
    pub const fn user_type(user_type: UserTypeRef) -> Self {
        Self::UserType(user_type)
    }

    /// Wrap collections and user types in `Frozen`; everything else is
    /// returned unchanged.
    #[must_use]
    pub fn frozen(self) -> Self {
        if self.is_composite() && !self.is_frozen() {
            Self::Frozen(Box::new(self))
        } else {
            self
        }
    }

    /// List, set or map.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_) | Self::Map(..))
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self.unfrozen(), Self::Map(..))
    }

    /// Collection or user type, i.e. something that may be frozen.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        match self {
            Self::Frozen(inner) => inner.is_composite(),
            Self::UserType(_) => true,
            other => other.is_collection(),
        }
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        match self {
            Self::Frozen(_) => true,
            Self::UserType(user_type) => matches!(user_type.resolution, Resolution::Literal),
            _ => false,
        }
    }

    /// Strip one `Frozen` wrapper if present.
    #[must_use]
    pub fn unfrozen(&self) -> &Self {
        match self {
            Self::Frozen(inner) => &**inner,
            other => other,
        }
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_user_type(&self) -> Option<&UserTypeRef> {
        match self.unfrozen() {
            Self::UserType(user_type) => Some(user_type),
            _ => None,
        }
    }

    /// Walk this type and every nested type, depth first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        match self {
            Self::Scalar(_) | Self::UserType(_) => {}
            Self::List(inner) | Self::Set(inner) | Self::Frozen(inner) => inner.walk(f),
            Self::Map(key, value) => {
                key.walk(f);
                value.walk(f);
            }
            Self::Tuple(elements) => {
                for element in elements {
                    element.walk(f);
                }
            }
        }
    }
}

impl From<ScalarKind> for DataType {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Set(element) => write!(f, "set<{element}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");

                write!(f, "tuple<{elements}>")
            }
            Self::UserType(user_type) => write!(f, "{user_type}"),
            Self::Frozen(inner) => write!(f, "frozen<{inner}>"),
        }
    }
}
