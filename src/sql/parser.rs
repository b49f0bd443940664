//! Recognition of `INSERT INTO ... VALUES ...;` statements and row building.

use alloc::string::String;
use alloc::vec::Vec;

use super::lexer::{LexerError, split_value_groups, split_values_inside_group};
use super::literal::parse_literal;
use crate::rows::Row;
use crate::schema::SchemaRegistry;

/// Rows produced by one `INSERT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRows {
    /// Table name: the registry's spelling when the table is known, otherwise
    /// the name as written in the statement.
    pub table: String,
    /// Columns the values were assigned to, in order.
    pub columns: Vec<String>,
    /// One row per value group, in statement order.
    pub rows: Vec<Row>,
}

/// Why a statement produced no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// The statement is not an `INSERT INTO ... VALUES ...;` statement.
    NotAnInsert,
    /// The statement has no column list and its table is not in the registry.
    UnknownTable {
        /// The table name as written.
        table: String,
    },
}

/// Outcome of parsing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// The statement inserted rows into a table.
    Rows(TableRows),
    /// The statement was skipped.
    Skipped(Skip),
}

/// Structural errors that make a dump unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A value list could not be split into groups or tokens.
    #[error(transparent)]
    Lexer(#[from] LexerError),
    /// A value group has a different number of values than there are columns.
    #[error(
        "Column count mismatch in table '{table}': {expected} columns but {actual} values in group {group}"
    )]
    ColumnCountMismatch {
        /// The table name as written.
        table: String,
        /// Number of resolved columns.
        expected: usize,
        /// Number of values in the group.
        actual: usize,
        /// The offending group text.
        group: String,
    },
}

/// The pieces of an `INSERT` statement, borrowed from its text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InsertParts<'a> {
    table: &'a str,
    columns: Option<&'a str>,
    values: &'a str,
}

/// Parse one complete statement into rows.
///
/// Column order comes from the statement's explicit column list when it has a
/// non-blank one, otherwise from the registry (matched ignoring case).
///
/// # Errors
///
/// * [`ParseError::Lexer`] if a value group is malformed.
/// * [`ParseError::ColumnCountMismatch`] if a group's value count differs from
///   the column count. No rows are returned for the statement in that case.
///
/// # Example
///
/// ```
/// use sqldump_rows::{SchemaRegistry, Value};
/// use sqldump_rows::sql::{Statement, parse_insert_statement};
///
/// let registry = SchemaRegistry::new();
/// let parsed = parse_insert_statement("INSERT INTO t (a,b) VALUES (1,'x'),(2,'y');", &registry).unwrap();
/// let Statement::Rows(rows) = parsed else { panic!("expected rows") };
/// assert_eq!(rows.table, "t");
/// assert_eq!(rows.rows[1].get("b"), Some(&Value::Text("y".into())));
/// ```
pub fn parse_insert_statement(
    statement: &str,
    registry: &SchemaRegistry,
) -> Result<Statement, ParseError> {
    let Some(parts) = match_insert(statement.trim()) else {
        return Ok(Statement::Skipped(Skip::NotAnInsert));
    };

    let schema = registry.get(parts.table);
    let columns: Vec<String> = match (parts.columns, schema) {
        (Some(list), _) => list
            .split(',')
            .map(|c| c.trim_matches(|ch: char| ch == '`' || ch.is_whitespace()).into())
            .collect(),
        (None, Some(schema)) => schema.columns().to_vec(),
        (None, None) => {
            tracing::warn!(
                table = parts.table,
                "no schema for table, skipping its INSERT"
            );
            return Ok(Statement::Skipped(Skip::UnknownTable {
                table: parts.table.into(),
            }));
        }
    };

    let groups = split_value_groups(parts.values)?;
    let mut rows: Vec<Row> = Vec::with_capacity(groups.len());
    for group in &groups {
        let tokens = split_values_inside_group(group)?;
        if tokens.len() != columns.len() {
            return Err(ParseError::ColumnCountMismatch {
                table: parts.table.into(),
                expected: columns.len(),
                actual: tokens.len(),
                group: group.clone(),
            });
        }
        rows.push(
            columns
                .iter()
                .zip(tokens)
                .map(|(column, token)| (column.as_str(), parse_literal(token)))
                .collect(),
        );
    }

    let table: String = schema.map_or(parts.table, |s| s.name()).into();
    tracing::debug!(table = %table, rows = rows.len(), "parsed INSERT");

    Ok(Statement::Rows(TableRows {
        table,
        columns,
        rows,
    }))
}

/// Match `INSERT INTO table [(cols)] VALUES values;` on a trimmed statement.
///
/// Keywords are case-insensitive and the table name may be wrapped in
/// backticks. The table name runs until whitespace, a backtick or `(`. The
/// values text is everything up to the last `;`.
fn match_insert(statement: &str) -> Option<InsertParts<'_>> {
    // Fast reject: the statement has to open with the literal prefix.
    if !statement
        .get(..INSERT_INTO.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(INSERT_INTO))
    {
        return None;
    }

    let rest = expect_keyword(statement, "INSERT")?;
    let rest = expect_whitespace(rest)?;
    let rest = expect_keyword(rest, "INTO")?;
    let rest = expect_whitespace(rest)?;

    let rest = rest.strip_prefix('`').unwrap_or(rest);
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '`' || c == '(')
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let (table, rest) = rest.split_at(end);
    let rest = rest.strip_prefix('`').unwrap_or(rest).trim_start();

    let (columns, rest) = match rest.strip_prefix('(') {
        Some(list) => {
            let close = list.find(')')?;
            let columns = &list[..close];
            let columns = (!columns.trim().is_empty()).then_some(columns);
            (columns, list[close + 1..].trim_start())
        }
        None => (None, rest),
    };

    let rest = expect_keyword(rest, "VALUES")?.trim_start();
    let values = &rest[..rest.rfind(';')?];
    if values.trim().is_empty() {
        return None;
    }

    Some(InsertParts {
        table,
        columns,
        values,
    })
}

const INSERT_INTO: &str = "INSERT INTO";

/// Strip a case-insensitive keyword from the start of `input`.
fn expect_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let head = input.get(..keyword.len())?;
    head.eq_ignore_ascii_case(keyword)
        .then(|| &input[keyword.len()..])
}

/// Strip at least one whitespace character from the start of `input`.
fn expect_whitespace(input: &str) -> Option<&str> {
    let rest = input.trim_start();
    (rest.len() < input.len()).then_some(rest)
}
