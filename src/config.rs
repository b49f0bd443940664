//! Command line arguments and the validated run configuration of the binary.

use alloc::borrow::ToOwned;
use alloc::string::String;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;

use crate::errors::Error;
use crate::export::ExportFormat;
use crate::schema::{Dataset, SchemaRegistry};

/// Turn the INSERT statements of a MySQL dump into CSV and JSON files, one per table
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sqldump-rows",
    version,
    after_help = "EXAMPLES:\n    \
        sqldump-rows\n    \
        sqldump-rows --dataset world --format json\n    \
        sqldump-rows -i dump.sql -o out --schema tables.json"
)]
pub struct CliArgs {
    /// Sample database whose schema resolves positional inserts
    #[arg(short, long, value_enum, default_value_t = Dataset::Sakila)]
    pub dataset: Dataset,

    /// Dump to read (defaults to the dataset's data file)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory the files are written to (defaults per dataset)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Files written per table
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Both)]
    pub format: ExportFormat,

    /// JSON object of table name to column list, replacing the dataset schema
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a run needs, resolved from [`CliArgs`].
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Dump to parse.
    pub input: PathBuf,
    /// Output directory.
    pub output_dir: PathBuf,
    /// Files written per table.
    pub format: ExportFormat,
    /// Schemas of the tables to extract.
    pub registry: SchemaRegistry,
    /// Where the schemas came from, for logging.
    pub schema_source: String,
}

impl ExportConfig {
    /// Resolve defaults, load the schema and check that the dump exists.
    ///
    /// # Errors
    ///
    /// * [`Error::DumpNotFound`] if the input file does not exist.
    /// * [`Error::Io`], [`Error::Json`] or [`Error::Schema`] if the schema file
    ///   cannot be read or is invalid.
    pub fn from_args(args: CliArgs) -> Result<Self, Error> {
        let input = args
            .input
            .unwrap_or_else(|| PathBuf::from(args.dataset.default_input()));
        let output_dir = args
            .output
            .unwrap_or_else(|| PathBuf::from(args.dataset.default_output_dir()));

        let (registry, schema_source) = match args.schema {
            Some(path) => {
                let registry =
                    SchemaRegistry::from_json_reader(BufReader::new(File::open(&path)?))?;
                (registry, alloc::format!("{}", path.display()))
            }
            None => (
                args.dataset.registry(),
                alloc::format!("{:?}", args.dataset),
            ),
        };

        if !input.is_file() {
            return Err(Error::DumpNotFound { path: input });
        }

        Ok(Self {
            input,
            output_dir,
            format: args.format,
            registry,
            schema_source,
        })
    }
}
