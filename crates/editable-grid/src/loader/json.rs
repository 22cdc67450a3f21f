//! JSON grid documents.
//!
//! ```json
//! {
//!   "metadata": [{ "name": "qty", "label": "Quantity", "datatype": "number", "editable": true }],
//!   "data": [["5"], ["12"]]
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;
use serde_json::value::RawValue;

use super::error::{LoadError, LoadResult};
use super::{ParsedColumn, ParsedDocument, parse_editable};

#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(alias = "metadatas")]
    metadata: Option<Vec<JsonColumn>>,
    #[serde(default)]
    data: Vec<Vec<Box<RawValue>>>,
}

#[derive(Debug, Deserialize)]
struct JsonColumn {
    name: Option<String>,
    label: Option<String>,
    datatype: Option<String>,
    editable: Option<Value>,
}

pub(crate) fn parse_json(text: &str) -> LoadResult<ParsedDocument> {
    let document: JsonDocument = serde_json::from_str(text)?;
    let metadata = document.metadata.ok_or(LoadError::MissingSection {
        section: "metadata",
    })?;

    let columns = metadata
        .into_iter()
        .enumerate()
        .map(|(index, column)| parse_column(index, column))
        .collect::<LoadResult<Vec<_>>>()?;

    let rows = document
        .data
        .into_iter()
        .map(|row| row.iter().map(|value| value_text(value)).collect::<LoadResult<Vec<_>>>())
        .collect::<LoadResult<_>>()?;

    Ok(ParsedDocument { columns, rows })
}

fn parse_column(index: usize, column: JsonColumn) -> LoadResult<ParsedColumn> {
    let missing = |field| LoadError::MissingField {
        column: index,
        field,
    };
    let editable = match column.editable {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => flag,
        Some(Value::String(text)) => parse_editable(index, &text)?,
        Some(other) => parse_editable(index, &other.to_string())?,
    };

    Ok(ParsedColumn {
        name: column.name.ok_or_else(|| missing("name"))?,
        label: column.label.ok_or_else(|| missing("label"))?,
        datatype: column.datatype.ok_or_else(|| missing("datatype"))?,
        editable,
    })
}

/// Strings are unescaped, `null` is empty, anything else keeps its source
/// text so numbers are not reformatted.
fn value_text(value: &RawValue) -> LoadResult<String> {
    let raw = value.get();
    match raw.as_bytes().first() {
        Some(b'"') => Ok(serde_json::from_str(raw)?),
        _ if raw == "null" => Ok(String::new()),
        _ => Ok(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let parsed = parse_json(
            r#"{
                "metadata": [
                    {"name": "qty", "label": "Quantity", "datatype": "number", "editable": "true"},
                    {"name": "desc", "label": "Description", "datatype": "string"}
                ],
                "data": [["5", "apple"], [12, null]]
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.columns.len(), 2);
        assert!(parsed.columns[0].editable);
        assert!(!parsed.columns[1].editable);
        assert_eq!(parsed.rows, vec![vec!["5", "apple"], vec!["12", ""]]);
    }

    #[test]
    fn test_numbers_keep_source_text() {
        let parsed = parse_json(
            r#"{
                "metadata": [{"name": "n", "label": "N", "datatype": "number"}],
                "data": [[1.50], [1e3], [-0], [true], ["a\"b"]]
            }"#,
        )
        .unwrap();
        let values: Vec<&str> = parsed.rows.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(values, vec!["1.50", "1e3", "-0", "true", "a\"b"]);
    }

    #[test]
    fn test_legacy_section_name() {
        let parsed =
            parse_json(r#"{"metadatas": [{"name": "a", "label": "A", "datatype": "string", "editable": 1}]}"#)
                .unwrap();
        assert!(parsed.columns[0].editable);
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn test_missing_pieces() {
        assert!(matches!(
            parse_json(r#"{"data": []}"#),
            Err(LoadError::MissingSection { section: "metadata" })
        ));
        assert!(matches!(
            parse_json(r#"{"metadata": [{"name": "a", "datatype": "string"}]}"#),
            Err(LoadError::MissingField { column: 0, field: "label" })
        ));
        assert!(matches!(parse_json("{"), Err(LoadError::Json(_))));
    }
}
