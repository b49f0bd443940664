//! Table schemas used to resolve positional `INSERT` statements.
mod dataset;
mod registry;
mod table;

use alloc::string::String;

pub use dataset::Dataset;
pub use registry::SchemaRegistry;
pub use table::TableSchema;

/// Errors raised while building schemas and registries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A table was declared without columns.
    #[error("Empty column list for table '{table}'")]
    EmptyColumnList {
        /// The table name.
        table: String,
    },
    /// A column name appears twice in one table.
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn {
        /// The table name.
        table: String,
        /// The repeated column.
        column: String,
    },
    /// Two tables share a name, ignoring case.
    #[error("Table '{table}' clashes with already registered table '{existing}'")]
    DuplicateTable {
        /// The table being registered.
        table: String,
        /// The table already in the registry.
        existing: String,
    },
}
