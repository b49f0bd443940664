//! Integration tests for parsing whole dumps into rows per table.
//!
//! These tests exercise [`parse_dump`] and [`DumpParser`] against the built-in
//! Sakila and World registries and against ad-hoc registries.

use sqldump_rows::sql::{Skip, Statement, parse_insert_statement, split_value_groups, split_values_inside_group};
use sqldump_rows::{
    DumpParser, ParseError, Row, SchemaRegistry, TableRowSet, TableSchema, Value, parse_dump,
    statements,
};

fn text(s: &str) -> Value {
    Value::Text(s.into())
}

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs.iter().map(|(c, v)| (*c, v.clone())).collect()
}

// =============================================================================
// Row construction
// =============================================================================

#[test]
fn test_explicit_columns_round_trip() {
    let rows = parse_dump(
        "INSERT INTO t (a,b) VALUES (1,'x'),(2,'y');",
        &SchemaRegistry::new(),
    )
    .unwrap();
    assert_eq!(
        rows.get("t").unwrap(),
        [
            row(&[("a", Value::Integer(1)), ("b", text("x"))]),
            row(&[("a", Value::Integer(2)), ("b", text("y"))]),
        ]
    );
}

#[test]
fn test_quoted_comma_is_not_a_separator() {
    let groups = split_value_groups("(1,'a,b')").unwrap();
    assert_eq!(groups, ["(1,'a,b')"]);
    assert_eq!(split_values_inside_group(&groups[0]).unwrap(), ["1", "'a,b'"]);
}

#[test]
fn test_escaped_quote_survives() {
    let rows = parse_dump(
        r"INSERT INTO actor VALUES (1,'DAN','O\'BRIEN','2006-02-15 04:34:33');",
        &SchemaRegistry::sakila(),
    )
    .unwrap();
    assert_eq!(rows.get("actor").unwrap()[0].get("last_name"), Some(&text("O'BRIEN")));
}

#[test]
fn test_literal_typing() {
    let rows = parse_dump(
        "INSERT INTO t (a,b,c,d,e,f) VALUES (NULL,null,Null,42,3.5,abc);",
        &SchemaRegistry::new(),
    )
    .unwrap();
    let row = &rows.get("t").unwrap()[0];
    for column in ["a", "b", "c"] {
        assert_eq!(row.get(column), Some(&Value::Null));
    }
    assert_eq!(row.get("d"), Some(&Value::Integer(42)));
    assert_eq!(row.get("e"), Some(&Value::Real(3.5)));
    assert_eq!(row.get("f"), Some(&text("abc")));
}

#[test]
fn test_positional_insert_uses_registry_order() {
    let dump = "INSERT INTO `film_actor` VALUES (1,1,'2006-02-15 05:05:03'),(1,23,'2006-02-15 05:05:03');";
    let rows = parse_dump(dump, &SchemaRegistry::sakila()).unwrap();
    let film_actor = rows.get("film_actor").unwrap();
    assert_eq!(film_actor.len(), 2);
    assert_eq!(
        film_actor[1].columns().collect::<Vec<_>>(),
        ["actor_id", "film_id", "last_update"]
    );
    assert_eq!(film_actor[1].get("film_id"), Some(&Value::Integer(23)));
}

// =============================================================================
// Errors and skips
// =============================================================================

#[test]
fn test_column_count_invariant() {
    let err = parse_dump(
        "INSERT INTO category VALUES (1,'Action','2006-02-15 04:46:27'),(2,'Animation');",
        &SchemaRegistry::sakila(),
    )
    .unwrap_err();
    match err {
        ParseError::ColumnCountMismatch {
            table,
            expected,
            actual,
            group,
        } => {
            assert_eq!(table, "category");
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
            assert_eq!(group, "(2,'Animation')");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_malformed_group_reports_text() {
    let err = parse_dump(
        "INSERT INTO t (a) VALUES (1),(2,'unterminated);",
        &SchemaRegistry::new(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("(2,'unterminated)"), "{err}");
}

#[test]
fn test_unknown_table_without_columns() {
    let dump = "INSERT INTO ghost_table VALUES (1,2);\nINSERT INTO t (a) VALUES (1);";
    let rows = parse_dump(dump, &SchemaRegistry::sakila()).unwrap();
    assert!(!rows.contains_table("ghost_table"));
    assert_eq!(rows.get("t").unwrap().len(), 1);

    assert_eq!(
        parse_insert_statement("INSERT INTO ghost_table VALUES (1,2);", &SchemaRegistry::sakila()),
        Ok(Statement::Skipped(Skip::UnknownTable {
            table: "ghost_table".into()
        }))
    );
}

#[test]
fn test_mysqldump_noise_is_ignored() {
    let dump = "\
-- MySQL dump 10.13
/*!40101 SET NAMES utf8mb4 */;
SET FOREIGN_KEY_CHECKS=0;

LOCK TABLES `language` WRITE;
/*!40000 ALTER TABLE `language` DISABLE KEYS */;
INSERT INTO `language` VALUES (1,'English','2006-02-15 05:02:19'),(2,'Italian','2006-02-15 05:02:19');
/*!40000 ALTER TABLE `language` ENABLE KEYS */;
UNLOCK TABLES;
COMMIT;
";
    let rows = parse_dump(dump, &SchemaRegistry::sakila()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.get("language").unwrap()[1].get("name"), Some(&text("Italian")));
}

// =============================================================================
// Reassembly and aggregation
// =============================================================================

#[test]
fn test_order_preserved_across_statements() {
    let dump = "\
INSERT INTO t (id) VALUES (1),(2);
INSERT INTO u (id) VALUES (100);
INSERT INTO t (id) VALUES (3);
INSERT INTO t (id) VALUES (4),(5),(6);
";
    let rows = parse_dump(dump, &SchemaRegistry::new()).unwrap();
    let ids: Vec<i64> = rows
        .get("t")
        .unwrap()
        .iter()
        .filter_map(|r| r.get("id").and_then(Value::as_i64))
        .collect();
    assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
    assert_eq!(rows.tables().collect::<Vec<_>>(), ["t", "u"]);
    assert_eq!(rows.total_rows(), 7);
}

#[test]
fn test_multi_line_reassembly() {
    let single = "INSERT INTO t (a,b) VALUES (1,'x'),(2,'y'),(3,'z');";
    let multi = "INSERT INTO t (a,b) VALUES (1,'x'),\n   (2,'y'),\n\n(3,'z');";
    let registry = SchemaRegistry::new();
    assert_eq!(
        parse_dump(single, &registry).unwrap(),
        parse_dump(multi, &registry).unwrap()
    );
}

#[test]
fn test_carriage_return_line_endings() {
    let unix = "SET NAMES utf8;\nINSERT INTO `language` VALUES (1,'English',\n'2006-02-15 05:02:19');\n";
    let windows = unix.replace('\n', "\r\n");
    let classic_mac = unix.replace('\n', "\r");
    let registry = SchemaRegistry::sakila();

    let expected = parse_dump(unix, &registry).unwrap();
    let language = expected.get("language").unwrap();
    assert_eq!(language.len(), 1);
    assert_eq!(language[0].get("name"), Some(&text("English")));

    assert_eq!(parse_dump(&windows, &registry).unwrap(), expected);
    assert_eq!(parse_dump(&classic_mac, &registry).unwrap(), expected);
    #[cfg(feature = "std")]
    assert_eq!(
        DumpParser::new(&registry)
            .parse_reader(classic_mac.as_bytes())
            .unwrap(),
        expected
    );
}

#[test]
fn test_incremental_statements_match_parse_dump() {
    let dump = "INSERT INTO t (a) VALUES (1),\n(2);\nSET x=1;\nINSERT INTO t (a) VALUES (3);\nINSERT INTO t (a)";
    let registry = SchemaRegistry::new();
    let mut parser = DumpParser::new(&registry);
    for statement in statements(dump) {
        parser.parse_statement(&statement).unwrap();
    }
    let stats = parser.stats();
    assert_eq!(stats.statements, 3);
    assert_eq!(stats.not_inserts, 1);
    assert_eq!(stats.rows, 3);
    assert_eq!(parser.finish(), parse_dump(dump, &registry).unwrap());
}

#[cfg(feature = "std")]
#[test]
fn test_parse_path_streams_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.sql");
    std::fs::write(
        &path,
        "INSERT INTO `city` VALUES (1,'Kabul','AFG','Kabol',1780000),\n(5,'Amsterdam','NLD','Noord-Holland',731200);\n",
    )
    .unwrap();

    let rows = DumpParser::new(&SchemaRegistry::world()).parse_path(&path).unwrap();
    let city = rows.get("city").unwrap();
    assert_eq!(city.len(), 2);
    assert_eq!(city[1].get("Name"), Some(&text("Amsterdam")));
    assert_eq!(city[1].get("Population"), Some(&Value::Integer(731200)));
}

#[cfg(feature = "std")]
#[test]
fn test_parse_path_missing_file() {
    let err = DumpParser::new(&SchemaRegistry::sakila())
        .parse_path("does-not-exist/sakila-data.sql")
        .unwrap_err();
    assert!(matches!(err, sqldump_rows::Error::DumpNotFound { .. }));
    assert!(err.to_string().contains("sakila-data.sql"));
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn test_country_end_to_end() {
    let dump = "INSERT INTO country (Code,Name,Continent) VALUES ('AFG','Afghanistan','Asia'),('NLD','Netherlands','Europe');";
    let expected = {
        let mut set = TableRowSet::new();
        set.extend_table(
            "country",
            [
                row(&[
                    ("Code", text("AFG")),
                    ("Name", text("Afghanistan")),
                    ("Continent", text("Asia")),
                ]),
                row(&[
                    ("Code", text("NLD")),
                    ("Name", text("Netherlands")),
                    ("Continent", text("Europe")),
                ]),
            ],
        );
        set
    };

    assert_eq!(parse_dump(dump, &SchemaRegistry::new()).unwrap(), expected);
    assert_eq!(parse_dump(dump, &SchemaRegistry::world()).unwrap(), expected);
}

#[test]
fn test_world_positional_uses_canonical_name() {
    let dump = "INSERT INTO `CountryLanguage` VALUES ('NLD','Dutch','T',95.6);";
    let rows = parse_dump(dump, &SchemaRegistry::world()).unwrap();
    let languages = rows.get("countrylanguage").unwrap();
    assert_eq!(languages[0].get("IsOfficial"), Some(&text("T")));
    assert_eq!(languages[0].get("Percentage"), Some(&Value::Real(95.6)));
}

#[test]
fn test_custom_registry() {
    let registry =
        SchemaRegistry::from_schemas([TableSchema::new("widgets", ["id", "label"]).unwrap()])
            .unwrap();
    let rows = parse_dump("INSERT INTO WIDGETS VALUES (1,'bolt');", &registry).unwrap();
    assert_eq!(rows.get("widgets").unwrap()[0].get("label"), Some(&text("bolt")));
}
