//! JSON rendering of table rows.

use std::io::Write;

use crate::errors::Error;
use crate::rows::Row;

/// Write `rows` as a pretty-printed JSON array of objects.
///
/// Object keys keep the row's column order, `NULL` becomes `null` and numbers
/// are written as JSON numbers. Non-finite reals are written as `null`.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization or writing fails.
pub fn write_json<W: Write>(mut writer: W, rows: &[Row]) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn render(rows: &[Row]) -> String {
        let mut out = Vec::new();
        write_json(&mut out, rows).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pretty_array_in_column_order() {
        let row: Row = [
            ("Code", Value::Text("NLD".into())),
            ("Name", Value::Text("Netherlands".into())),
            ("IndepYear", Value::Integer(1581)),
            ("GNPOld", Value::Null),
            ("LifeExpectancy", Value::Real(78.3)),
        ]
        .into_iter()
        .collect();
        let expected = r#"[
  {
    "Code": "NLD",
    "Name": "Netherlands",
    "IndepYear": 1581,
    "GNPOld": null,
    "LifeExpectancy": 78.3
  }
]
"#;
        assert_eq!(render(&[row]), expected);
    }

    #[test]
    fn test_non_finite_real_is_null() {
        let row: Row = [("x", Value::Real(f64::NAN))].into_iter().collect();
        let parsed: serde_json::Value = serde_json::from_str(&render(&[row])).unwrap();
        assert_eq!(parsed[0]["x"], serde_json::Value::Null);
    }

    #[test]
    fn test_empty() {
        assert_eq!(render(&[]), "[]\n");
    }
}
