use crate::{identifier::Identifier, types::DataType};
use serde::Serialize;
use std::fmt::{self, Display};

///
/// ClusteringOrder
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum ClusteringOrder {
    #[default]
    Asc,
    Desc,
}

impl Display for ClusteringOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

///
/// ColumnKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum ColumnKind {
    PartitionKey,
    Clustering(ClusteringOrder),
    Regular,
}

impl ColumnKind {
    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self, Self::PartitionKey | Self::Clustering(_))
    }
}

///
/// ColumnSchema
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ColumnSchema {
    pub name: Identifier,
    pub data_type: DataType,
    pub kind: ColumnKind,
}

impl ColumnSchema {
    #[must_use]
    pub const fn new(name: Identifier, data_type: DataType, kind: ColumnKind) -> Self {
        Self {
            name,
            data_type,
            kind,
        }
    }

    #[must_use]
    pub const fn ordering(&self) -> Option<ClusteringOrder> {
        match self.kind {
            ColumnKind::Clustering(order) => Some(order),
            _ => None,
        }
    }
}

impl Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)
    }
}
