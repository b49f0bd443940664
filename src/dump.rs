//! Reassembly of dump lines into statements and aggregation of their rows.
//!
//! A dump is read one physical line at a time. Lines end at `\n`, `\r\n` or a
//! bare `\r`. Blank lines are ignored and the
//! remaining lines are trimmed and joined with single spaces until a line ends
//! with `;`, which completes a statement. Each statement is handed to
//! [`parse_insert_statement`] and its rows are appended to the table they
//! belong to.
//!
//! # Example
//!
//! ```
//! use sqldump_rows::{SchemaRegistry, Value, parse_dump};
//!
//! let dump = "INSERT INTO country (Code,Name,Continent) VALUES\n\
//!             ('AFG','Afghanistan','Asia'),\n\
//!             ('NLD','Netherlands','Europe');";
//! let rows = parse_dump(dump, &SchemaRegistry::world()).unwrap();
//! let country = rows.get("country").unwrap();
//! assert_eq!(country.len(), 2);
//! assert_eq!(country[1].get("Name"), Some(&Value::Text("Netherlands".into())));
//! ```

use alloc::string::String;
#[cfg(feature = "std")]
use std::io::BufRead;
#[cfg(feature = "std")]
use std::path::Path;

use crate::rows::TableRowSet;
use crate::schema::SchemaRegistry;
use crate::sql::{ParseError, Skip, Statement, parse_insert_statement};

const LINE_BREAKS: [char; 2] = ['\n', '\r'];

/// Physical lines of `text`. A `\r\n` pair leaves an empty piece between its
/// two halves, which the assembler skips as a blank line.
fn physical_lines(text: &str) -> core::str::Split<'_, [char; 2]> {
    text.split(LINE_BREAKS)
}

/// Joins physical lines into complete `;`-terminated statements.
#[derive(Debug, Default)]
pub struct StatementAssembler {
    buffer: String,
}

impl StatementAssembler {
    /// Create an assembler with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one physical line, returning the statement it completes, if any.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(line);

        line.ends_with(';')
            .then(|| core::mem::take(&mut self.buffer))
    }

    /// Text collected since the last complete statement.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        (!self.buffer.is_empty()).then_some(self.buffer.as_str())
    }
}

/// Iterator over the complete statements of a dump; see [`statements`].
#[derive(Debug)]
pub struct Statements<'a> {
    lines: core::str::Split<'a, [char; 2]>,
    assembler: StatementAssembler,
}

impl Iterator for Statements<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for line in self.lines.by_ref() {
            if let Some(statement) = self.assembler.push_line(line) {
                return Some(statement);
            }
        }
        if let Some(pending) = self.assembler.pending() {
            tracing::debug!(
                bytes = pending.len(),
                "discarding trailing text without terminating ';'"
            );
            self.assembler = StatementAssembler::new();
        }
        None
    }
}

/// Split a dump into its complete statements, in order.
///
/// Text after the last `;`-terminated line is dropped. Iterating statement by
/// statement and feeding them to [`DumpParser::parse_statement`] lets a caller
/// stop between statements.
#[must_use]
pub fn statements(text: &str) -> Statements<'_> {
    Statements {
        lines: physical_lines(text),
        assembler: StatementAssembler::new(),
    }
}

/// Counters describing what a parse went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpStats {
    /// Complete statements seen.
    pub statements: usize,
    /// Statements that produced rows.
    pub inserts: usize,
    /// Statements that are not `INSERT` statements.
    pub not_inserts: usize,
    /// `INSERT` statements skipped because their table has no schema.
    pub unknown_tables: usize,
    /// Rows produced.
    pub rows: usize,
}

/// Incremental dump parser accumulating rows per table.
///
/// The parser is fail-fast: the first structural error aborts the parse and
/// the rows gathered so far are dropped with the parser.
#[derive(Debug)]
pub struct DumpParser<'r> {
    registry: &'r SchemaRegistry,
    assembler: StatementAssembler,
    rows: TableRowSet,
    stats: DumpStats,
}

impl<'r> DumpParser<'r> {
    /// Create a parser resolving positional inserts against `registry`.
    #[must_use]
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            assembler: StatementAssembler::new(),
            rows: TableRowSet::new(),
            stats: DumpStats::default(),
        }
    }

    /// Parse one complete statement and record its rows.
    ///
    /// Statements that are not inserts, and inserts into unknown tables
    /// without a column list, are counted and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of a malformed value group or a column count
    /// mismatch.
    pub fn parse_statement(&mut self, statement: &str) -> Result<(), ParseError> {
        self.stats.statements += 1;
        match parse_insert_statement(statement, self.registry)? {
            Statement::Rows(parsed) => {
                self.stats.inserts += 1;
                self.stats.rows += parsed.rows.len();
                self.rows.extend_table(parsed.table, parsed.rows);
            }
            Statement::Skipped(Skip::NotAnInsert) => self.stats.not_inserts += 1,
            Statement::Skipped(Skip::UnknownTable { .. }) => self.stats.unknown_tables += 1,
        }
        Ok(())
    }

    /// Feed one physical line of the dump.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of the statement this line completes.
    pub fn push_line(&mut self, line: &str) -> Result<(), ParseError> {
        match self.assembler.push_line(line) {
            Some(statement) => self.parse_statement(&statement),
            None => Ok(()),
        }
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> DumpStats {
        self.stats
    }

    /// Finish the parse and return the rows per table.
    ///
    /// An unterminated trailing statement is discarded.
    #[must_use]
    pub fn finish(self) -> TableRowSet {
        if let Some(pending) = self.assembler.pending() {
            tracing::debug!(
                bytes = pending.len(),
                "discarding trailing text without terminating ';'"
            );
        }
        tracing::debug!(
            statements = self.stats.statements,
            inserts = self.stats.inserts,
            rows = self.stats.rows,
            "dump parsed"
        );
        self.rows
    }

    /// Parse a whole dump held in memory.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] met; nothing is returned for the
    /// statements parsed before it.
    pub fn parse_str(mut self, text: &str) -> Result<TableRowSet, ParseError> {
        for line in physical_lines(text) {
            self.push_line(line)?;
        }
        Ok(self.finish())
    }

    /// Parse a dump from a buffered reader, one line at a time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if reading fails (including
    /// invalid UTF-8) and [`Error::Parse`](crate::Error::Parse) for structural
    /// errors.
    #[cfg(feature = "std")]
    pub fn parse_reader<R: BufRead>(mut self, mut reader: R) -> Result<TableRowSet, crate::Error> {
        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            for piece in physical_lines(&line) {
                self.push_line(piece)?;
            }
            line.clear();
        }
        Ok(self.finish())
    }

    /// Parse the dump stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DumpNotFound`](crate::Error::DumpNotFound) before any
    /// parsing if the file does not exist, and otherwise the errors of
    /// [`DumpParser::parse_reader`].
    #[cfg(feature = "std")]
    pub fn parse_path(self, path: impl AsRef<Path>) -> Result<TableRowSet, crate::Error> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => crate::Error::DumpNotFound {
                path: path.to_path_buf(),
            },
            _ => crate::Error::Io(e),
        })?;
        tracing::debug!(path = %path.display(), "reading dump");
        self.parse_reader(std::io::BufReader::new(file))
    }
}

/// Parse a whole dump into rows per table.
///
/// # Errors
///
/// Returns the first malformed value group or column count mismatch; the
/// parse does not continue past it.
pub fn parse_dump(text: &str, registry: &SchemaRegistry) -> Result<TableRowSet, ParseError> {
    DumpParser::new(registry).parse_str(text)
}
