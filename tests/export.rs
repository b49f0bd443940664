//! Integration tests for writing parsed tables to CSV and JSON files.

#![cfg(all(feature = "csv", feature = "json"))]

use sqldump_rows::export::{ExportFormat, export_tables};
use sqldump_rows::{SchemaRegistry, parse_dump};

const DUMP: &str = "\
INSERT INTO `language` VALUES (1,'English','2006-02-15 05:02:19'),(2,'Italian','2006-02-15 05:02:19');
INSERT INTO `payment` VALUES (1,1,1,76,2.99,'2005-05-25 11:30:37','2006-02-15 22:12:30'),
(2,1,1,NULL,0.99,'2005-05-28 10:35:23','2006-02-15 22:12:30');
INSERT INTO notes (id, body) VALUES (1,'not in the schema');
";

#[test]
fn test_export_both_formats() {
    let registry = SchemaRegistry::sakila();
    let rows = parse_dump(DUMP, &registry).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("output");

    let summary = export_tables(&rows, &registry, &out, ExportFormat::Both).unwrap();
    assert_eq!(
        summary.tables,
        [("language".to_string(), 2), ("payment".to_string(), 2)]
    );
    assert_eq!(summary.skipped, ["notes"]);
    assert_eq!(summary.files.len(), 4);

    let csv = std::fs::read_to_string(out.join("payment.csv")).unwrap();
    assert_eq!(
        csv,
        "payment_id,customer_id,staff_id,rental_id,amount,payment_date,last_update\r\n\
         1,1,1,76,2.99,2005-05-25 11:30:37,2006-02-15 22:12:30\r\n\
         2,1,1,,0.99,2005-05-28 10:35:23,2006-02-15 22:12:30\r\n"
    );

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("language.json")).unwrap())
            .unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"language_id": 1, "name": "English", "last_update": "2006-02-15 05:02:19"},
            {"language_id": 2, "name": "Italian", "last_update": "2006-02-15 05:02:19"},
        ])
    );
    assert!(!out.join("notes.csv").exists());
}

#[test]
fn test_export_single_format() {
    let registry = SchemaRegistry::sakila();
    let rows = parse_dump(DUMP, &registry).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let summary = export_tables(&rows, &registry, dir.path(), ExportFormat::Json).unwrap();
    assert_eq!(summary.files.len(), 2);
    assert!(dir.path().join("language.json").exists());
    assert!(!dir.path().join("language.csv").exists());
}

#[test]
fn test_export_uses_canonical_file_names() {
    let registry = SchemaRegistry::world();
    let rows = parse_dump(
        "INSERT INTO `CountryLanguage` VALUES ('AFG','Pashto','T',52.4);",
        &registry,
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();

    export_tables(&rows, &registry, dir.path(), ExportFormat::Csv).unwrap();
    let csv = std::fs::read_to_string(dir.path().join("countrylanguage.csv")).unwrap();
    assert_eq!(csv, "CountryCode,Language,IsOfficial,Percentage\r\nAFG,Pashto,T,52.4\r\n");
}
