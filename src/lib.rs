#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "cli")]
pub mod config;
pub mod dump;
pub mod errors;
#[cfg(any(feature = "csv", feature = "json"))]
pub mod export;
pub mod rows;
pub mod schema;
pub mod sql;
#[cfg(feature = "testing")]
pub mod testing;
pub mod value;

// Re-export main types
pub use dump::{DumpParser, DumpStats, StatementAssembler, parse_dump, statements};
pub use rows::{Row, TableRowSet};
pub use schema::{Dataset, SchemaError, SchemaRegistry, TableSchema};
pub use sql::ParseError;
pub use value::Value;

// Re-export errors
pub use errors::Error;
