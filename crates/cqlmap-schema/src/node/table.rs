use crate::{
    identifier::Identifier,
    node::{ClusteringOrder, ColumnKind, ColumnSchema},
    types::DataType,
};
use serde::Serialize;

///
/// TableSchema
///
/// Columns are kept in three lists; each list preserves the order columns
/// were added in, which is the order of the primary key.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableSchema {
    pub name: Identifier,
    pub partition_key_columns: Vec<ColumnSchema>,
    pub clustering_columns: Vec<ColumnSchema>,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    #[must_use]
    pub const fn new(name: Identifier) -> Self {
        Self {
            name,
            partition_key_columns: Vec::new(),
            clustering_columns: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn partition_key_column(&mut self, name: Identifier, data_type: DataType) -> &mut Self {
        self.partition_key_columns
            .push(ColumnSchema::new(name, data_type, ColumnKind::PartitionKey));
        self
    }

    pub fn clustering_column(
        &mut self,
        name: Identifier,
        data_type: DataType,
        order: ClusteringOrder,
    ) -> &mut Self {
        self.clustering_columns.push(ColumnSchema::new(
            name,
            data_type,
            ColumnKind::Clustering(order),
        ));
        self
    }

    pub fn column(&mut self, name: Identifier, data_type: DataType) -> &mut Self {
        self.columns
            .push(ColumnSchema::new(name, data_type, ColumnKind::Regular));
        self
    }

    /// Iterate every column: partition key, clustering, then regular.
    pub fn all_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.partition_key_columns
            .iter()
            .chain(&self.clustering_columns)
            .chain(&self.columns)
    }

    /// Iterate the primary key columns in key order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.partition_key_columns
            .iter()
            .chain(&self.clustering_columns)
    }

    #[must_use]
    pub fn get_column(&self, name: &Identifier) -> Option<&ColumnSchema> {
        self.all_columns().find(|column| &column.name == name)
    }
}
