//! Writing parsed tables to CSV and JSON files.

#[cfg(feature = "csv")]
pub mod csv;
#[cfg(feature = "json")]
pub mod json;

#[cfg(all(feature = "csv", feature = "json"))]
pub use summary::{ExportFormat, ExportSummary, export_tables};

#[cfg(all(feature = "csv", feature = "json"))]
mod summary {
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::{Path, PathBuf};

    use crate::errors::Error;
    use crate::rows::TableRowSet;
    use crate::schema::SchemaRegistry;

    /// Which files are written per table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
    pub enum ExportFormat {
        /// `<table>.csv` only.
        Csv,
        /// `<table>.json` only.
        Json,
        /// Both files.
        #[default]
        Both,
    }

    impl ExportFormat {
        /// Whether a CSV file is written.
        #[must_use]
        pub fn csv(self) -> bool {
            matches!(self, ExportFormat::Csv | ExportFormat::Both)
        }

        /// Whether a JSON file is written.
        #[must_use]
        pub fn json(self) -> bool {
            matches!(self, ExportFormat::Json | ExportFormat::Both)
        }
    }

    /// What [`export_tables`] wrote.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct ExportSummary {
        /// `(table, row count)` of every exported table, in dump order.
        pub tables: Vec<(String, usize)>,
        /// Tables skipped because the registry has no schema for them.
        pub skipped: Vec<String>,
        /// Every file written.
        pub files: Vec<PathBuf>,
    }

    /// Write each table of `rows` that has a schema in `registry` to `out_dir`.
    ///
    /// Files are named after the table's canonical name. The directory is
    /// created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the first I/O, CSV, JSON, or [`Error::UnexpectedColumn`] error.
    pub fn export_tables(
        rows: &TableRowSet,
        registry: &SchemaRegistry,
        out_dir: &Path,
        format: ExportFormat,
    ) -> Result<ExportSummary, Error> {
        std::fs::create_dir_all(out_dir)?;
        let mut summary = ExportSummary::default();

        for (table, table_rows) in rows.iter() {
            let Some(schema) = registry.get(table) else {
                tracing::warn!(table, "no schema for table, not exported");
                summary.skipped.push(table.into());
                continue;
            };

            if format.csv() {
                let path = out_dir.join(alloc::format!("{}.csv", schema.name()));
                super::csv::write_csv(BufWriter::new(File::create(&path)?), schema, table_rows)?;
                summary.files.push(path);
            }
            if format.json() {
                let path = out_dir.join(alloc::format!("{}.json", schema.name()));
                super::json::write_json(BufWriter::new(File::create(&path)?), table_rows)?;
                summary.files.push(path);
            }

            tracing::debug!(table = schema.name(), rows = table_rows.len(), "exported table");
            summary.tables.push((schema.name().into(), table_rows.len()));
        }

        Ok(summary)
    }
}
