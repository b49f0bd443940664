//! Table schema: a table name and its ordered column names.

use alloc::string::String;
use alloc::vec::Vec;

use super::SchemaError;

/// The ordered column list of one table.
///
/// Column order is authoritative: values of a positional `INSERT` (one without
/// an explicit column list) are assigned to columns by position.
///
/// # Example
///
/// ```
/// use sqldump_rows::schema::TableSchema;
///
/// let actor = TableSchema::new("actor", ["actor_id", "first_name", "last_name"]).unwrap();
/// assert_eq!(actor.name(), "actor");
/// assert_eq!(actor.column_index("last_name"), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    columns: Vec<String>,
}

impl TableSchema {
    /// Create a new table schema.
    ///
    /// # Errors
    ///
    /// * [`SchemaError::EmptyColumnList`] if `columns` is empty.
    /// * [`SchemaError::DuplicateColumn`] if a column name appears twice.
    pub fn new<I, C>(name: impl Into<String>, columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let name = name.into();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if columns.is_empty() {
            return Err(SchemaError::EmptyColumnList { table: name });
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(SchemaError::DuplicateColumn {
                    table: name,
                    column: column.clone(),
                });
            }
        }

        Ok(Self { name, columns })
    }

    /// Schema from compiled-in column lists, which are checked by tests.
    pub(super) fn builtin(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|&c| c.into()).collect(),
        }
    }

    /// The canonical table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column, by exact name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}
