use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// TypeName
///
/// Stable name of a source type, e.g. `app::model::Person`. Entities,
/// conversions and simple-type mappings are all keyed by it.
///

#[derive(
    Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

///
/// DeclaredType
///
/// Source-side shape of a field as reported by metadata discovery.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum DeclaredType {
    Named(TypeName),
    List(Box<Self>),
    Set(Box<Self>),
    Map(Box<Self>, Box<Self>),
}

impl DeclaredType {
    #[must_use]
    pub fn named(name: impl Into<TypeName>) -> Self {
        Self::Named(name.into())
    }

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

    /// List or set.
    #[must_use]
    pub const fn is_collection_like(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_))
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(..))
    }

    /// The element type of a collection, the value type of a map, or the
    /// type itself.
    #[must_use]
    pub fn actual_type(&self) -> &Self {
        match self {
            Self::List(element) | Self::Set(element) | Self::Map(_, element) => &**element,
            Self::Named(_) => self,
        }
    }

    #[must_use]
    pub const fn as_named(&self) -> Option<&TypeName> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Every named type mentioned anywhere in this declaration.
    #[must_use]
    pub fn named_types(&self) -> Vec<&TypeName> {
        let mut names = Vec::new();
        self.collect_named(&mut names);

        names
    }

    fn collect_named<'a>(&'a self, names: &mut Vec<&'a TypeName>) {
        match self {
            Self::Named(name) => names.push(name),
            Self::List(element) | Self::Set(element) => element.collect_named(names),
            Self::Map(key, value) => {
                key.collect_named(names);
                value.collect_named(names);
            }
        }
    }
}

impl From<TypeName> for DeclaredType {
    fn from(name: TypeName) -> Self {
        Self::Named(name)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(element) => write!(f, "List<{element}>"),
            Self::Set(element) => write!(f, "Set<{element}>"),
            Self::Map(key, value) => write!(f, "Map<{key}, {value}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actual_type_unwraps_one_level() {
        let list = DeclaredType::list(DeclaredType::named("Tag"));
        assert_eq!(list.actual_type(), &DeclaredType::named("Tag"));

        let map = DeclaredType::map(DeclaredType::named("String"), DeclaredType::named("Addr"));
        assert_eq!(map.actual_type(), &DeclaredType::named("Addr"));

        let named = DeclaredType::named("String");
        assert_eq!(named.actual_type(), &named);
    }

    #[test]
    fn named_types_are_collected_depth_first() {
        let ty = DeclaredType::map(
            DeclaredType::named("String"),
            DeclaredType::list(DeclaredType::named("Addr")),
        );
        let names: Vec<_> = ty.named_types().into_iter().map(TypeName::as_str).collect();

        assert_eq!(names, ["String", "Addr"]);
        assert_eq!(ty.to_string(), "Map<String, List<Addr>>");
    }
}
