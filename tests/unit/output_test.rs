use doql::error::DoqlError;
use doql::output;
use doql::runner::{Column, QueryResult, Row, SchemaEntry};
use serde_json::Value;

fn row(pairs: &[(&str, &str)]) -> Row {
    let mut row = Row::new();
    for (key, value) in pairs {
        row.insert(key.to_string(), Value::String(value.to_string()));
    }
    row
}

// --- result_json ---

#[test]
fn result_json_carries_columns_and_rows() {
    let result = QueryResult {
        columns: Some(vec![Column::untyped("name"), Column::untyped("ip")]),
        rows: vec![row(&[("name", "web01"), ("ip", "10.0.0.1")])],
    };

    let json = output::result_json(&result).unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(v["rows"][0]["name"], "web01");
    assert_eq!(v["rows"][0]["ip"], "10.0.0.1");
    assert_eq!(v["columns"][0]["name"], "name");
    assert_eq!(v["columns"][0]["friendly_name"], "name");
    assert!(v["columns"][0]["type"].is_null());
}

#[test]
fn column_serializes_with_the_wire_keys() {
    let v = serde_json::to_value(Column::untyped("uuid")).unwrap();
    let obj = v.as_object().unwrap();
    assert_eq!(obj.len(), 3);
    assert!(obj.contains_key("type"));
    assert!(obj.contains_key("friendly_name"));
    assert!(obj.contains_key("name"));
    assert!(obj["type"].is_null());
}

#[test]
fn probe_result_serializes_with_null_columns() {
    let json = output::result_json(&QueryResult::empty()).unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();
    assert!(v["columns"].is_null());
    assert!(v["rows"].as_array().unwrap().is_empty());
}

#[test]
fn row_key_order_survives_serialization() {
    let result = QueryResult {
        columns: Some(vec![Column::untyped("zeta"), Column::untyped("alpha")]),
        rows: vec![row(&[("zeta", "1"), ("alpha", "2")])],
    };

    let json = output::result_json(&result).unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();
    let keys: Vec<&str> = v["rows"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(keys, ["zeta", "alpha"]);
}

// --- schema_json ---

#[test]
fn schema_json_is_an_entry_array() {
    let entries = vec![
        SchemaEntry {
            name: "view_device_v1".to_string(),
            columns: vec!["name".to_string(), "uuid".to_string()],
        },
        SchemaEntry {
            name: "view_ipaddress_v1".to_string(),
            columns: vec!["ip_address".to_string()],
        },
    ];

    let json = output::schema_json(&entries).unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v[0]["name"], "view_device_v1");
    assert_eq!(v[0]["columns"][1], "uuid");
    assert_eq!(v[1]["columns"][0], "ip_address");
}

#[test]
fn schema_json_empty_is_an_empty_array() {
    let json = output::schema_json(&[]).unwrap();
    assert_eq!(json.trim(), "[]");
}

// --- write_file ---

#[test]
fn write_file_roundtrip() {
    let dir = std::env::temp_dir().join("doql-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("output-{}.json", std::process::id()));

    let json = output::result_json(&QueryResult::empty()).unwrap();
    output::write_file(&json, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), json);

    std::fs::remove_file(&path).ok();
}

#[test]
fn write_file_requires_existing_parent() {
    let path = std::env::temp_dir()
        .join(format!("doql-test-missing-{}", std::process::id()))
        .join("out.json");

    let err = output::write_file("{}", &path).unwrap_err();
    assert!(matches!(err, DoqlError::Io(_)), "Got: {}", err);
}

// --- print helpers ---

#[test]
fn print_helpers_do_not_panic() {
    output::print_result("{}");
    output::print_error(&DoqlError::NoResults);
}
