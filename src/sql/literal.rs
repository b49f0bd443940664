//! Conversion of raw SQL literal tokens into typed values.

use alloc::string::String;

use crate::value::Value;

/// Convert one raw token from a value group into a [`Value`].
///
/// Rules, in order:
/// 1. `NULL` in any case becomes [`Value::Null`].
/// 2. A token wrapped in single quotes becomes [`Value::Text`] with `\'` and
///    `\\` unescaped; other backslash sequences are kept as written.
/// 3. A base-10 integer that fits in `i64` becomes [`Value::Integer`].
/// 4. Anything `f64` accepts becomes [`Value::Real`] (this includes integers
///    too large for `i64`).
/// 5. Everything else is kept verbatim as [`Value::Text`].
///
/// The conversion never fails.
///
/// # Example
///
/// ```
/// use sqldump_rows::Value;
/// use sqldump_rows::sql::parse_literal;
///
/// assert_eq!(parse_literal("null"), Value::Null);
/// assert_eq!(parse_literal("'O\\'Brien'"), Value::Text("O'Brien".into()));
/// assert_eq!(parse_literal("42"), Value::Integer(42));
/// assert_eq!(parse_literal("abc"), Value::Text("abc".into()));
/// ```
#[must_use]
pub fn parse_literal(token: &str) -> Value {
    if token.eq_ignore_ascii_case("NULL") {
        return Value::Null;
    }

    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        return Value::Text(unescape(&token[1..token.len() - 1]));
    }

    if let Ok(v) = token.parse::<i64>() {
        return Value::Integer(v);
    }

    if let Ok(v) = token.parse::<f64>() {
        return Value::Real(v);
    }

    Value::Text(token.into())
}

/// Undo MySQL escaping of quotes and backslashes in one left-to-right pass.
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.clone().next() {
            Some(next @ ('\'' | '\\')) => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}
