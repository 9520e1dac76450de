use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_import(data: &Value) -> io::Result<String> {
    let files = data
        .get("files")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("import output requires files"))?;

    let mut lines = vec!["Import completed successfully.".to_string(), String::new()];

    lines.push("Summary:".to_string());
    let imported = data.get("imported").and_then(Value::as_u64).unwrap_or(0);
    let store_path = data
        .get("store_path")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    lines.extend(format::key_value_rows(
        &[
            ("Files read:", files.len().to_string()),
            ("Imported:", imported.to_string()),
            ("Store path:", store_path.to_string()),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Files:".to_string());
    let columns = [
        Column {
            name: "File",
            align: Align::Left,
        },
        Column {
            name: "Read",
            align: Align::Right,
        },
        Column {
            name: "Skipped",
            align: Align::Right,
        },
        Column {
            name: "Dropped",
            align: Align::Right,
        },
        Column {
            name: "Kept",
            align: Align::Right,
        },
    ];
    let rows = files
        .iter()
        .map(|file| {
            vec![
                field_str(file, "path"),
                field_count(file, "rows_read"),
                field_count(file, "rows_skipped"),
                field_count(file, "rows_dropped"),
                field_count(file, "rows_kept"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table(&columns, &rows));

    lines.push(String::new());
    lines.push("Next step:".to_string());
    lines.push("  moneta classify --no-tags".to_string());

    Ok(lines.join("\n"))
}

fn field_str(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn field_count(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_import;

    #[test]
    fn renders_summary_and_per_file_counts() {
        let data = json!({
            "imported": 2,
            "store_path": "/home/user/.moneta/transactions.json",
            "files": [
                {
                    "path": "activity.csv",
                    "rows_read": 3,
                    "rows_skipped": 0,
                    "rows_dropped": 1,
                    "rows_kept": 2
                }
            ]
        });

        let rendered = render_import(&data);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            assert!(body.starts_with("Import completed successfully."));
            assert!(body.contains("Files read:"));
            assert!(body.contains("Imported:    2"));
            assert!(body.contains("/home/user/.moneta/transactions.json"));
            assert!(body.contains("activity.csv"));
            assert!(body.contains("Dropped"));
            assert!(body.contains("moneta classify --no-tags"));
        }
    }

    #[test]
    fn missing_files_field_is_an_error() {
        let rendered = render_import(&json!({ "imported": 0 }));
        assert!(rendered.is_err());
    }
}
