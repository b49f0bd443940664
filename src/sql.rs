//! Decomposition of MySQL `INSERT` statements into typed rows.
//!
//! This module is intentionally limited compared to a full SQL parser: it only
//! recognizes `INSERT INTO ... VALUES (...), (...);` statements as written by
//! `mysqldump`, splits their value lists while respecting quotes and backslash
//! escapes, and converts each literal into a [`Value`](crate::Value).
//!
//! - [`split_value_groups`] splits a `VALUES` list into `(...)` groups.
//! - [`split_values_inside_group`] splits one group into raw tokens.
//! - [`parse_literal`] turns a raw token into a typed value.
//! - [`parse_insert_statement`] ties the three together for one statement.

mod lexer;
mod literal;
mod parser;

pub use lexer::{LexerError, split_value_groups, split_values_inside_group};
pub use literal::parse_literal;
pub use parser::{ParseError, Skip, Statement, TableRows, parse_insert_statement};
