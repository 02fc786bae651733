//! Result normalization
//!
//! SQL services disagree on how a result set is encoded. Inside
//! `response.result[0].results` a row may be:
//!
//! - an object keyed by column name: `{"id": "a1", "empresa": "Acme", ...}`
//! - an object with a `values` array, columns listed once on the result
//!   entry: `{"values": ["a1", "Acme", ...]}` plus `meta.columns`
//! - an object with both `values` and its own `columns`
//! - a plain positional array: `["a1", "Acme", ...]`
//!
//! [`normalize_response`] detects the encoding once per batch and maps
//! every row to an [`Opportunity`]. It never fails: anything unrecognized
//! is read as a keyed object and missing fields come back as `None`.

use serde_json::{Map, Number, Value};

use crate::types::Opportunity;

/// Column order for positional rows
pub const OPPORTUNITY_COLUMNS: [&str; 7] = [
    "id",
    "empresa",
    "pessoa",
    "telefone",
    "email",
    "interesse",
    "created_at",
];

/// Keys tried, in order, for the id of a keyed row
const ID_KEYS: [&str; 4] = ["id", "ID", "Id", "rowid"];

/// Row encoding of one result batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowShape<'a> {
    /// Objects keyed by column name
    Keyed,
    /// `values` arrays with one column list shared by the whole batch
    SharedColumns(&'a [Value]),
    /// `values` arrays with a `columns` list on every row
    RowColumns,
    /// Plain arrays in [`OPPORTUNITY_COLUMNS`] order
    Positional,
}

impl<'a> RowShape<'a> {
    /// Decide the batch encoding from the result entry and its first row
    pub fn detect(entry: &'a Value, rows: &'a [Value]) -> Self {
        let Some(first) = rows.first() else {
            return RowShape::Keyed;
        };

        if first.is_array() {
            return RowShape::Positional;
        }

        let Some(row) = first.as_object() else {
            return RowShape::Keyed;
        };

        if !row.get("values").is_some_and(Value::is_array) {
            return RowShape::Keyed;
        }

        if let Some(columns) = shared_columns(entry) {
            RowShape::SharedColumns(columns)
        } else if row.get("columns").is_some_and(Value::is_array) {
            RowShape::RowColumns
        } else {
            RowShape::Keyed
        }
    }

    /// Map one row of this batch to an opportunity
    ///
    /// Arrays are always read positionally, whatever the batch shape.
    pub fn map_row(&self, row: &Value) -> Opportunity {
        match row {
            Value::Array(cells) => from_positional(cells),
            Value::Object(object) => {
                let values = object.get("values").and_then(Value::as_array);
                match (self, values) {
                    (RowShape::SharedColumns(columns), Some(values)) => {
                        from_keyed(&rekey(columns, values))
                    }
                    (RowShape::RowColumns, Some(values)) => {
                        match object.get("columns").and_then(Value::as_array) {
                            Some(columns) => from_keyed(&rekey(columns, values)),
                            None => from_keyed(object),
                        }
                    }
                    _ => from_keyed(object),
                }
            }
            _ => from_keyed(&Map::new()),
        }
    }
}

/// Normalize a raw SQL service response into opportunities
///
/// A missing `result` list, an empty one, or an entry without `results`
/// all mean "no rows". Row order is preserved.
pub fn normalize_response(response: &Value) -> Vec<Opportunity> {
    let Some(entry) = response
        .get("result")
        .and_then(Value::as_array)
        .and_then(|entries| entries.first())
    else {
        return Vec::new();
    };

    let Some(rows) = entry.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    let shape = RowShape::detect(entry, rows);
    tracing::debug!(rows = rows.len(), ?shape, "Normalizing result batch");

    rows.iter().map(|row| shape.map_row(row)).collect()
}

/// Column list declared once for the whole result entry
fn shared_columns(entry: &Value) -> Option<&[Value]> {
    entry
        .get("meta")
        .and_then(|meta| meta.get("columns"))
        .or_else(|| entry.get("columns"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Pair column names with values by position
///
/// Columns past the end of `values` are left out, so they read as missing.
fn rekey(columns: &[Value], values: &[Value]) -> Map<String, Value> {
    columns
        .iter()
        .zip(values)
        .map(|(column, value)| (column_name(column), value.clone()))
        .collect()
}

fn column_name(column: &Value) -> String {
    match column {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn from_positional(cells: &[Value]) -> Opportunity {
    let cell = |i: usize| cells.get(i);
    Opportunity {
        id: coerce_id(cell(0)),
        empresa: text(cell(1)),
        pessoa: text(cell(2)),
        telefone: text(cell(3)),
        email: text(cell(4)),
        interesse: text(cell(5)),
        created_at: text(cell(6)),
    }
}

fn from_keyed(row: &Map<String, Value>) -> Opportunity {
    let id = ID_KEYS
        .iter()
        .find_map(|key| row.get(*key).filter(|v| !v.is_null()));

    Opportunity {
        id: coerce_id(id),
        empresa: text(row.get("empresa")),
        pessoa: text(row.get("pessoa")),
        telefone: text(row.get("telefone")),
        email: text(row.get("email")),
        interesse: text(row.get("interesse")),
        created_at: text(row.get("created_at")),
    }
}

/// Stringify an id; absent ids and the literal "undefined" become ""
fn coerce_id(value: Option<&Value>) -> String {
    match text(value) {
        Some(id) if id != "undefined" => id,
        _ => String::new(),
    }
}

/// Read a scalar as text; null and missing values are `None`
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        other => Some(other.to_string()),
    }
}

/// Integral floats print without a fraction, so `1.0` and `1` agree
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Value {
        json!(OPPORTUNITY_COLUMNS)
    }

    fn acme() -> Opportunity {
        Opportunity {
            id: "1".to_string(),
            empresa: Some("Acme".to_string()),
            pessoa: Some("Jane".to_string()),
            telefone: Some("555".to_string()),
            email: Some("j@a.com".to_string()),
            interesse: Some("demo".to_string()),
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
        }
    }

    fn acme_values() -> Value {
        json!([1, "Acme", "Jane", "555", "j@a.com", "demo", "2024-01-01T00:00:00Z"])
    }

    fn wrap(entry: Value) -> Value {
        json!({ "result": [entry] })
    }

    #[test]
    fn test_keyed_rows() {
        let response = wrap(json!({
            "results": [{
                "id": 1, "empresa": "Acme", "pessoa": "Jane", "telefone": "555",
                "email": "j@a.com", "interesse": "demo", "created_at": "2024-01-01T00:00:00Z"
            }]
        }));
        assert_eq!(normalize_response(&response), vec![acme()]);
    }

    #[test]
    fn test_values_with_shared_columns() {
        let entry = json!({
            "results": [{ "values": acme_values() }],
            "meta": { "columns": columns() }
        });
        assert_eq!(
            RowShape::detect(&entry, entry["results"].as_array().unwrap()),
            RowShape::SharedColumns(columns().as_array().unwrap())
        );
        assert_eq!(normalize_response(&wrap(entry)), vec![acme()]);
    }

    #[test]
    fn test_values_with_entry_level_columns() {
        let entry = json!({
            "results": [{ "values": acme_values() }],
            "columns": columns()
        });
        assert_eq!(normalize_response(&wrap(entry)), vec![acme()]);
    }

    #[test]
    fn test_values_with_row_columns() {
        let entry = json!({
            "results": [{ "columns": columns(), "values": acme_values() }]
        });
        assert_eq!(
            RowShape::detect(&entry, entry["results"].as_array().unwrap()),
            RowShape::RowColumns
        );
        assert_eq!(normalize_response(&wrap(entry)), vec![acme()]);
    }

    #[test]
    fn test_positional_rows() {
        let entry = json!({ "results": [acme_values()] });
        assert_eq!(
            RowShape::detect(&entry, entry["results"].as_array().unwrap()),
            RowShape::Positional
        );
        assert_eq!(normalize_response(&wrap(entry)), vec![acme()]);
    }

    #[test]
    fn test_all_shapes_agree() {
        let responses = [
            wrap(json!({ "results": [
                { "id": 1, "empresa": "Acme", "pessoa": "Jane", "telefone": "555",
                  "email": "j@a.com", "interesse": "demo", "created_at": "2024-01-01T00:00:00Z" },
                { "id": "b2", "empresa": "Beta", "pessoa": null, "telefone": "1",
                  "email": "b@b.io", "interesse": "", "created_at": "2023-12-31T00:00:00Z" }
            ]})),
            wrap(json!({
                "results": [
                    { "values": acme_values() },
                    { "values": ["b2", "Beta", null, "1", "b@b.io", "", "2023-12-31T00:00:00Z"] }
                ],
                "meta": { "columns": columns() }
            })),
            wrap(json!({ "results": [
                { "columns": columns(), "values": acme_values() },
                { "columns": columns(),
                  "values": ["b2", "Beta", null, "1", "b@b.io", "", "2023-12-31T00:00:00Z"] }
            ]})),
            wrap(json!({ "results": [
                acme_values(),
                ["b2", "Beta", null, "1", "b@b.io", "", "2023-12-31T00:00:00Z"]
            ]})),
        ];

        let expected = normalize_response(&responses[0]);
        assert_eq!(expected.len(), 2);
        assert_eq!(expected[1].id, "b2");
        assert_eq!(expected[1].pessoa, None);
        assert_eq!(expected[1].interesse.as_deref(), Some(""));

        for response in &responses[1..] {
            assert_eq!(normalize_response(response), expected);
        }
    }

    #[test]
    fn test_missing_result_is_empty() {
        assert!(normalize_response(&json!({})).is_empty());
        assert!(normalize_response(&json!({ "result": [] })).is_empty());
        assert!(normalize_response(&json!({ "result": [{}] })).is_empty());
        assert!(normalize_response(&json!({ "result": [{ "results": [] }] })).is_empty());
        assert!(normalize_response(&Value::Null).is_empty());
        assert!(normalize_response(&json!({ "result": "nope" })).is_empty());
    }

    #[test]
    fn test_undefined_id_becomes_empty() {
        let response = wrap(json!({ "results": [{ "id": "undefined", "empresa": "Acme" }] }));
        let items = normalize_response(&response);
        assert_eq!(items[0].id, "");
        assert_eq!(items[0].empresa.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_missing_id_becomes_empty() {
        let response = wrap(json!({ "results": [{ "empresa": "Acme" }, [null, "Beta"]] }));
        let items = normalize_response(&response);
        assert_eq!(items[0].id, "");
        assert_eq!(items[1].id, "");
        assert_eq!(items[1].empresa.as_deref(), Some("Beta"));
        assert_eq!(items[1].created_at, None);
    }

    #[test]
    fn test_id_key_variants() {
        for key in ["id", "ID", "Id", "rowid"] {
            let mut row = Map::new();
            row.insert(key.to_string(), json!(42));
            let response = wrap(json!({ "results": [row] }));
            assert_eq!(normalize_response(&response)[0].id, "42", "key {key}");
        }
    }

    #[test]
    fn test_null_id_falls_through_to_next_variant() {
        let response = wrap(json!({ "results": [{ "id": null, "ID": "upper", "rowid": 9 }] }));
        assert_eq!(normalize_response(&response)[0].id, "upper");
    }

    #[test]
    fn test_short_values_leave_fields_missing() {
        let entry = json!({
            "results": [{ "values": ["a1", "Acme"] }],
            "meta": { "columns": columns() }
        });
        let item = &normalize_response(&wrap(entry))[0];
        assert_eq!(item.id, "a1");
        assert_eq!(item.empresa.as_deref(), Some("Acme"));
        assert_eq!(item.pessoa, None);
        assert_eq!(item.created_at, None);
    }

    #[test]
    fn test_unrecognized_rows_degrade_to_empty_records() {
        let response = wrap(json!({ "results": ["garbage", 7, { "unrelated": true }] }));
        let items = normalize_response(&response);
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| *item == Opportunity::default()));
    }

    #[test]
    fn test_shared_columns_batch_with_stray_rows() {
        let entry = json!({
            "results": [
                { "values": acme_values() },
                { "id": "k1", "empresa": "Keyed" },
                ["p1", "Positional"]
            ],
            "meta": { "columns": columns() }
        });
        let items = normalize_response(&wrap(entry));
        assert_eq!(items[0], acme());
        assert_eq!(items[1].id, "k1");
        assert_eq!(items[2].empresa.as_deref(), Some("Positional"));
    }

    #[test]
    fn test_values_without_any_columns_read_as_keyed() {
        let entry = json!({ "results": [{ "values": acme_values() }] });
        assert_eq!(
            RowShape::detect(&entry, entry["results"].as_array().unwrap()),
            RowShape::Keyed
        );
        assert_eq!(normalize_response(&wrap(entry))[0], Opportunity::default());
    }

    #[test]
    fn test_scalar_values_are_stringified() {
        let response = wrap(json!({ "results": [[1.0, 2.5, true, 3, "x", null, "t"]] }));
        let item = &normalize_response(&response)[0];
        assert_eq!(item.id, "1");
        assert_eq!(item.empresa.as_deref(), Some("2.5"));
        assert_eq!(item.pessoa.as_deref(), Some("true"));
        assert_eq!(item.telefone.as_deref(), Some("3"));
        assert_eq!(item.interesse, None);
    }

    #[test]
    fn test_order_is_preserved() {
        let response = wrap(json!({ "results": [["c"], ["a"], ["b"]] }));
        let ids: Vec<String> = normalize_response(&response).into_iter().map(|o| o.id).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }
}
