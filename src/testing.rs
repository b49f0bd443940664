//! Property-checking helpers shared by the fuzz harnesses and regression tests.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`GeneratedDump`]: an `arbitrary`-driven dump together with the rows it
//!   must parse into
//! - [`test_generated_dump`]: render a [`GeneratedDump`], parse it, compare
//! - [`test_parse_raw`]: parse arbitrary bytes and check that the in-memory and
//!   streaming parsers agree
//! - [`run_crash_dir_regression`]: replay crash inputs saved by honggfuzz

extern crate std;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use arbitrary::{Arbitrary, Unstructured};

use crate::dump::{DumpParser, parse_dump};
use crate::rows::{Row, TableRowSet};
use crate::schema::{SchemaRegistry, TableSchema};
use crate::value::Value;

/// One table of a [`GeneratedDump`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTable {
    /// Table name.
    pub name: String,
    /// Column names, unique within the table.
    pub columns: Vec<String>,
    /// Value rows, each as long as `columns`.
    pub rows: Vec<Vec<Value>>,
    /// Whether statements spell out the column list.
    pub explicit_columns: bool,
    /// Whether identifiers are wrapped in backticks.
    pub backticks: bool,
    /// Maximum number of value groups per statement.
    pub rows_per_statement: usize,
}

/// A dump of several tables whose expected rows are known.
///
/// Text values never contain line breaks and reals are always finite: neither
/// survives the line-oriented, literal-typed reassembly of a dump.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDump {
    /// Tables in dump order.
    pub tables: Vec<GeneratedTable>,
    /// Non-`INSERT` statements emitted before every table.
    pub noise: Vec<String>,
}

fn arbitrary_value(u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    Ok(match u.int_in_range(0..=3)? {
        0 => Value::Null,
        1 => Value::Integer(u.arbitrary()?),
        2 => {
            let v: f64 = u.arbitrary()?;
            if v.is_finite() {
                Value::Real(v)
            } else {
                Value::Null
            }
        }
        _ => {
            let text: String = u.arbitrary()?;
            Value::Text(text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect())
        }
    })
}

impl<'a> Arbitrary<'a> for GeneratedTable {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let column_count = u.int_in_range(1..=6)?;
        let columns = (0..column_count).map(|i| format!("col_{i}")).collect();
        let row_count = u.int_in_range(1..=8)?;
        let mut rows = Vec::with_capacity(row_count);
        for _ in 0..row_count {
            rows.push(
                (0..column_count)
                    .map(|_| arbitrary_value(u))
                    .collect::<arbitrary::Result<Vec<_>>>()?,
            );
        }
        Ok(Self {
            name: String::new(),
            columns,
            rows,
            explicit_columns: u.arbitrary()?,
            backticks: u.arbitrary()?,
            rows_per_statement: u.int_in_range(1..=4)?,
        })
    }
}

impl<'a> Arbitrary<'a> for GeneratedDump {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let table_count = u.int_in_range(1..=4)?;
        let mut tables = Vec::with_capacity(table_count);
        for i in 0..table_count {
            let mut table: GeneratedTable = u.arbitrary()?;
            table.name = format!("table_{i}");
            tables.push(table);
        }
        let noise_count = u.int_in_range(0..=2)?;
        let mut noise = Vec::with_capacity(noise_count);
        for _ in 0..noise_count {
            noise.push(String::from(*u.choose(&[
                "SET NAMES utf8mb4;",
                "SET FOREIGN_KEY_CHECKS=0;",
                "LOCK TABLES `x` WRITE;",
                "UNLOCK TABLES;",
                "COMMIT;",
            ])?));
        }
        Ok(Self { tables, noise })
    }
}

/// Write a value as a MySQL literal.
fn render_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Integer(v) => {
            let _ = write!(out, "{v}");
        }
        Value::Real(v) => {
            let _ = write!(out, "{v:?}");
        }
        Value::Text(s) => {
            out.push('\'');
            for c in s.chars() {
                if matches!(c, '\'' | '\\') {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('\'');
        }
    }
}

impl GeneratedDump {
    /// Registry with every generated table.
    ///
    /// # Panics
    ///
    /// Panics if two tables share a name, which generation never does.
    #[must_use]
    pub fn registry(&self) -> SchemaRegistry {
        SchemaRegistry::from_schemas(
            self.tables
                .iter()
                .map(|t| TableSchema::new(t.name.as_str(), t.columns.iter().map(String::as_str)).unwrap()),
        )
        .unwrap()
    }

    /// Render the dump, one value group per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for table in &self.tables {
            for statement in &self.noise {
                out.push_str(statement);
                out.push_str("\n\n");
            }
            let quote = if table.backticks { "`" } else { "" };
            for chunk in table.rows.chunks(table.rows_per_statement.max(1)) {
                let _ = write!(out, "INSERT INTO {quote}{}{quote} ", table.name);
                if table.explicit_columns {
                    let columns: Vec<String> = table
                        .columns
                        .iter()
                        .map(|c| format!("{quote}{c}{quote}"))
                        .collect();
                    let _ = write!(out, "({}) ", columns.join(","));
                }
                out.push_str("VALUES ");
                for (i, row) in chunk.iter().enumerate() {
                    out.push('(');
                    for (j, value) in row.iter().enumerate() {
                        if j > 0 {
                            out.push(',');
                        }
                        render_value(&mut out, value);
                    }
                    out.push_str(if i + 1 == chunk.len() { ");\n" } else { "),\n" });
                }
            }
        }
        out
    }

    /// Rows the rendered dump must parse into.
    #[must_use]
    pub fn expected(&self) -> TableRowSet {
        let mut set = TableRowSet::new();
        for table in &self.tables {
            set.extend_table(
                table.name.as_str(),
                table.rows.iter().map(|values| {
                    table
                        .columns
                        .iter()
                        .map(String::as_str)
                        .zip(values.iter().cloned())
                        .collect::<Row>()
                }),
            );
        }
        set
    }
}

/// Render a generated dump, parse it, and compare with the expected rows.
///
/// # Panics
///
/// Panics if parsing fails or yields different rows.
pub fn test_generated_dump(dump: &GeneratedDump) {
    let text = dump.render();
    let registry = dump.registry();
    let parsed = match parse_dump(&text, &registry) {
        Ok(parsed) => parsed,
        Err(e) => panic!("generated dump failed to parse: {e}\n{text}"),
    };
    assert_eq!(parsed, dump.expected(), "row mismatch for dump:\n{text}");
}

/// Parse arbitrary bytes against the Sakila registry.
///
/// The parse may fail but must not panic, and the in-memory and streaming
/// parsers must agree on the outcome.
///
/// # Panics
///
/// Panics if the two parsers disagree.
pub fn test_parse_raw(data: &[u8]) {
    let text = String::from_utf8_lossy(data);
    let registry = SchemaRegistry::sakila();

    let in_memory = parse_dump(&text, &registry);
    let streamed = DumpParser::new(&registry).parse_reader(text.as_bytes());

    match (in_memory, streamed) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "parsers disagree on {text:?}"),
        (Err(a), Err(crate::Error::Parse(b))) => assert_eq!(a, b, "errors differ on {text:?}"),
        (a, b) => panic!("parsers disagree on {text:?}: {a:?} vs {b:?}"),
    }
}

/// Replay every crash input in `crash_dir` through `check`.
///
/// New `.fuzz` files found in `hfuzz_dir` are first copied into `crash_dir`, so
/// crashes found by a local fuzzing session become regression inputs. Missing
/// directories are treated as empty.
///
/// # Panics
///
/// Panics if `check` panics or an input takes longer than `time_limit`.
pub fn run_crash_dir_regression(
    crash_dir: &str,
    hfuzz_dir: &str,
    time_limit: Duration,
    check: impl Fn(&[u8]),
) {
    let crash_dir = Path::new(crash_dir);
    if let Ok(entries) = std::fs::read_dir(hfuzz_dir) {
        let _ = std::fs::create_dir_all(crash_dir);
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "fuzz") {
                if let Some(name) = path.file_name() {
                    let target = crash_dir.join(name);
                    if !target.exists() {
                        let _ = std::fs::copy(&path, target);
                    }
                }
            }
        }
    }

    let Ok(entries) = std::fs::read_dir(crash_dir) else {
        return;
    };
    let mut paths: Vec<_> = entries.flatten().map(|e| e.path()).filter(|p| p.is_file()).collect();
    paths.sort();

    for path in paths {
        let Ok(data) = std::fs::read(&path) else {
            continue;
        };
        let start = Instant::now();
        check(&data);
        let elapsed = start.elapsed();
        assert!(
            elapsed <= time_limit,
            "{} took {elapsed:?}, over the {time_limit:?} limit",
            path.display()
        );
    }
}
