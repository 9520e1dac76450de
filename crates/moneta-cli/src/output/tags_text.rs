use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};
use super::list_text::stage_messages;

pub fn render_tags(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("tags output requires rows"))?;

    let mut lines = stage_messages(data);

    if rows.is_empty() {
        lines.push("No transactions to summarize.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column {
            name: "Tag",
            align: Align::Left,
        },
        Column {
            name: "Count",
            align: Align::Right,
        },
        Column {
            name: "Expense",
            align: Align::Right,
        },
        Column {
            name: "Income",
            align: Align::Right,
        },
        Column {
            name: "Volume",
            align: Align::Right,
        },
        Column {
            name: "Net",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                tag_label(row),
                row.get("count").and_then(Value::as_u64).unwrap_or(0).to_string(),
                money_field(row, "expense"),
                money_field(row, "income"),
                money_field(row, "volume"),
                money_field(row, "net"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.extend(format::render_table(&columns, &table_rows));
    Ok(lines.join("\n"))
}

fn tag_label(row: &Value) -> String {
    match row.get("tag").and_then(Value::as_str) {
        Some(tag) => tag.to_string(),
        None => "(untagged)".to_string(),
    }
}

fn money_field(row: &Value, key: &str) -> String {
    format::money(row.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_tags;

    #[test]
    fn renders_untagged_bucket_and_tag_rows() {
        let data = json!({
            "stages": [],
            "rows": [
                {
                    "tag": null,
                    "count": 1,
                    "expense": -5.0,
                    "income": 0.0,
                    "volume": 5.0,
                    "net": -5.0
                },
                {
                    "tag": "grocery",
                    "count": 2,
                    "expense": -42.0,
                    "income": 15.0,
                    "volume": 57.0,
                    "net": -27.0
                }
            ]
        });

        let rendered = render_tags(&data);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            assert!(body.contains("Tag"));
            assert!(body.contains("(untagged)"));
            assert!(body.contains("grocery"));
            assert!(body.contains("-27.00"));
            assert!(body.contains("57.00"));
        }
    }

    #[test]
    fn empty_rows_render_a_friendly_line() {
        let data = json!({ "stages": [], "rows": [] });
        let rendered = render_tags(&data);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            assert_eq!(body, "No transactions to summarize.");
        }
    }
}
