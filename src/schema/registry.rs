//! Case-insensitive lookup of table schemas by name.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use super::{SchemaError, TableSchema};

/// Fixed mapping from table name to [`TableSchema`].
///
/// Lookups are case-insensitive: `Country`, `country` and `COUNTRY` all find
/// the same schema, and the schema keeps the spelling it was registered with.
/// The registry is built once and only read while parsing, so a single
/// instance can be shared by any number of parses.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Schemas keyed by lower-cased table name.
    tables: HashMap<String, TableSchema>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of schemas.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateTable`] if two schemas share a name,
    /// ignoring case.
    pub fn from_schemas(schemas: impl IntoIterator<Item = TableSchema>) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for schema in schemas {
            registry.insert(schema)?;
        }
        Ok(registry)
    }

    /// Register a schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateTable`] if a schema with the same name,
    /// ignoring case, is already registered.
    pub fn insert(&mut self, schema: TableSchema) -> Result<(), SchemaError> {
        let key = schema.name().to_lowercase();
        if let Some(existing) = self.tables.get(&key) {
            return Err(SchemaError::DuplicateTable {
                table: schema.name().into(),
                existing: existing.name().into(),
            });
        }
        self.tables.insert(key, schema);
        Ok(())
    }

    /// Register a compiled-in schema whose name is known to be unique.
    pub(super) fn insert_builtin(&mut self, schema: TableSchema) {
        self.tables.insert(schema.name().to_lowercase(), schema);
    }

    /// Look up a table, ignoring case.
    #[must_use]
    pub fn get(&self, table: &str) -> Option<&TableSchema> {
        self.tables.get(&table.to_lowercase())
    }

    /// Whether a table is registered, ignoring case.
    #[must_use]
    pub fn contains(&self, table: &str) -> bool {
        self.get(table).is_some()
    }

    /// Number of registered tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Registered schemas, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    /// Canonical table names, sorted.
    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.values().map(TableSchema::name).collect();
        names.sort_unstable();
        names
    }

    /// Read a registry from a JSON object mapping table names to column lists,
    /// such as `{"actor": ["actor_id", "first_name"]}`.
    ///
    /// # Errors
    ///
    /// * [`Error::Json`](crate::Error::Json) if the input is not such an object.
    /// * [`Error::Schema`](crate::Error::Schema) if a column list is empty or
    ///   repeats a column, or two tables differ only in case.
    #[cfg(feature = "json")]
    pub fn from_json_reader(reader: impl std::io::Read) -> Result<Self, crate::Error> {
        let tables: alloc::collections::BTreeMap<String, Vec<String>> =
            serde_json::from_reader(reader)?;
        let schemas = tables
            .into_iter()
            .map(|(name, columns)| TableSchema::new(name, columns))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_schemas(schemas)?)
    }
}
