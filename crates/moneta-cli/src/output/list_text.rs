use std::io;

use serde_json::Value;

use super::format;

pub fn render_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("list output requires rows"))?;

    let mut lines = stage_messages(data);

    for row in rows {
        lines.push(transaction_line(row));
    }
    if !rows.is_empty() {
        lines.push(String::new());
    }

    let matched = data.get("matched").and_then(Value::as_u64).unwrap_or(0);
    lines.push(format!("{matched} transaction(s)."));

    if let Some(total) = data.get("total").and_then(Value::as_f64) {
        lines.push(format!("Total: {}", format::money(total)));
    }

    Ok(lines.join("\n"))
}

/// The per-stage progress lines the filter pipeline reported, shown before
/// the surviving rows.
pub fn stage_messages(data: &Value) -> Vec<String> {
    let Some(stages) = data.get("stages").and_then(Value::as_array) else {
        return Vec::new();
    };

    stages
        .iter()
        .filter_map(|stage| stage.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn transaction_line(row: &Value) -> String {
    let date = row
        .get("trans_date")
        .and_then(Value::as_str)
        .or_else(|| row.get("post_date").and_then(Value::as_str));
    let amount = row.get("amount").and_then(Value::as_f64).unwrap_or(0.0);
    let description = row
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("");

    let tags = row
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            format::tag_list(tags.iter().map(|tag| {
                (
                    tag.get("name").and_then(Value::as_str).unwrap_or(""),
                    tag.get("split_amount").and_then(Value::as_f64),
                )
            }))
        })
        .unwrap_or_default();

    format::transaction_row(date, amount, description, &tags)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_list;

    #[test]
    fn renders_stage_lines_rows_and_total() {
        let data = json!({
            "matched": 1,
            "total": -10.53,
            "stages": [
                {
                    "stage": "include_regex",
                    "removed": 2,
                    "message": "Filtered 2 transaction(s) for not matching include regex."
                }
            ],
            "rows": [
                {
                    "type": "sale",
                    "trans_date": "2018-09-14",
                    "post_date": "2018-09-15",
                    "description": "WALGREENS #123",
                    "amount": -10.53,
                    "tags": [{ "name": "pharmacy" }]
                }
            ]
        });

        let rendered = render_list(&data);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            assert!(
                body.starts_with("Filtered 2 transaction(s) for not matching include regex.")
            );
            assert!(body.contains("2018-09-14"));
            assert!(body.contains("WALGREENS #123"));
            assert!(body.contains("[pharmacy]"));
            assert!(body.contains("1 transaction(s)."));
            assert!(body.contains("Total: -10.53"));
        }
    }

    #[test]
    fn total_line_is_omitted_when_not_requested() {
        let data = json!({ "matched": 0, "stages": [], "rows": [] });
        let rendered = render_list(&data);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            assert_eq!(body, "0 transaction(s).");
        }
    }

    #[test]
    fn dateless_rows_show_the_placeholder_date() {
        let data = json!({
            "matched": 1,
            "stages": [],
            "rows": [
                {
                    "type": "sale",
                    "trans_date": null,
                    "post_date": null,
                    "description": "MYSTERY",
                    "amount": -5.0,
                    "tags": []
                }
            ]
        });

        let rendered = render_list(&data);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            assert!(body.contains("????-??-??"));
            assert!(body.contains("MYSTERY"));
        }
    }
}
