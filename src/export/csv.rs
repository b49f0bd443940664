//! CSV rendering of table rows.

use alloc::string::{String, ToString};
use std::io::Write;

use crate::errors::Error;
use crate::rows::Row;
use crate::schema::TableSchema;

/// Write `rows` as CSV with a header taken from `schema`.
///
/// Fields follow the schema's column order. `NULL` and columns missing from a
/// row are written as empty fields.
///
/// # Errors
///
/// * [`Error::UnexpectedColumn`] if a row has a column the schema lacks.
/// * [`Error::Csv`] or [`Error::Io`] if writing fails.
///
/// # Example
///
/// ```
/// use sqldump_rows::export::csv::write_csv;
/// use sqldump_rows::{Row, TableSchema, Value};
///
/// let schema = TableSchema::new("language", ["language_id", "name"]).unwrap();
/// let rows: Vec<Row> = vec![
///     [("language_id", Value::Integer(1)), ("name", Value::Text("English".into()))]
///         .into_iter()
///         .collect(),
/// ];
/// let mut out = Vec::new();
/// write_csv(&mut out, &schema, &rows).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "language_id,name\r\n1,English\r\n");
/// ```
pub fn write_csv<W: Write>(writer: W, schema: &TableSchema, rows: &[Row]) -> Result<(), Error> {
    let mut out = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    out.write_record(schema.columns())?;

    for row in rows {
        if let Some(column) = row.columns().find(|c| schema.column_index(c).is_none()) {
            return Err(Error::UnexpectedColumn {
                table: schema.name().into(),
                column: column.into(),
            });
        }
        out.write_record(schema.columns().iter().map(|column| {
            row.get(column)
                .map(ToString::to_string)
                .unwrap_or_default()
        }))?;
    }

    out.flush()?;
    Ok(())
}

/// Render `rows` as a CSV string; see [`write_csv`].
///
/// # Errors
///
/// Same as [`write_csv`].
pub fn to_csv_string(schema: &TableSchema, rows: &[Row]) -> Result<String, Error> {
    let mut out = alloc::vec::Vec::new();
    write_csv(&mut out, schema, rows)?;
    String::from_utf8(out).map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use alloc::vec;

    fn schema() -> TableSchema {
        TableSchema::new("address", ["address_id", "address", "address2", "postal_code"]).unwrap()
    }

    #[test]
    fn test_header_follows_schema_order() {
        let row: Row = [
            ("postal_code", Value::Text("35200".into())),
            ("address_id", Value::Integer(1)),
            ("address", Value::Text("47 MySakila Drive".into())),
            ("address2", Value::Null),
        ]
        .into_iter()
        .collect();
        let out = to_csv_string(&schema(), &[row]).unwrap();
        assert_eq!(
            out,
            "address_id,address,address2,postal_code\r\n1,47 MySakila Drive,,35200\r\n"
        );
    }

    #[test]
    fn test_quotes_fields_with_separators() {
        let row: Row = [
            ("address_id", Value::Integer(2)),
            ("address", Value::Text("Main St, \"Unit\" 4".into())),
        ]
        .into_iter()
        .collect();
        let out = to_csv_string(&schema(), &[row]).unwrap();
        assert_eq!(
            out.lines().nth(1),
            Some("2,\"Main St, \"\"Unit\"\" 4\",,")
        );
    }

    #[test]
    fn test_reals_keep_fraction() {
        let schema = TableSchema::new("payment", ["amount"]).unwrap();
        let rows = vec![[("amount", Value::Real(2.0))].into_iter().collect::<Row>()];
        assert_eq!(to_csv_string(&schema, &rows).unwrap(), "amount\r\n2.0\r\n");
    }

    #[test]
    fn test_unexpected_column() {
        let row: Row = [("ghost", Value::Integer(1))].into_iter().collect();
        let err = to_csv_string(&schema(), &[row]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedColumn { table, column } if table == "address" && column == "ghost"
        ));
    }

    #[test]
    fn test_empty_rows_write_header_only() {
        assert_eq!(
            to_csv_string(&schema(), &[]).unwrap(),
            "address_id,address,address2,postal_code\r\n"
        );
    }
}
