use crate::identifier::Identifier;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

///
/// IndexTarget
///
/// Which part of a column an index covers. `Keys`, `Values` and `Entries`
/// address the parts of a map; `Full` indexes a frozen collection as a whole.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum IndexTarget {
    #[default]
    Column,
    Keys,
    Values,
    Entries,
    Full,
}

///
/// IndexKind
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum IndexKind {
    #[default]
    Secondary,
    Custom {
        class: String,
        options: BTreeMap<String, String>,
    },
}

///
/// IndexSchema
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IndexSchema {
    /// Index name; the store picks one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Identifier>,

    /// Owning table, stamped once the owning entity has been traversed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Identifier>,

    pub column: Identifier,
    pub target: IndexTarget,
    pub kind: IndexKind,
}

impl IndexSchema {
    #[must_use]
    pub const fn new(column: Identifier) -> Self {
        Self {
            name: None,
            table: None,
            column,
            target: IndexTarget::Column,
            kind: IndexKind::Secondary,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: Identifier) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub const fn with_target(mut self, target: IndexTarget) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: IndexKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn stamp_table(&mut self, table: Identifier) {
        self.table = Some(table);
    }
}

impl Display for IndexSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            IndexTarget::Column => self.column.to_string(),
            IndexTarget::Keys => format!("KEYS({})", self.column),
            IndexTarget::Values => format!("VALUES({})", self.column),
            IndexTarget::Entries => format!("ENTRIES({})", self.column),
            IndexTarget::Full => format!("FULL({})", self.column),
        };

        match &self.table {
            Some(table) => write!(f, "{table}({target})"),
            None => write!(f, "({target})"),
        }
    }
}
