use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            match data {
                Some(Value::Object(fields)) => {
                    if let Some(obj) = response.as_object_mut() {
                        obj.extend(fields);
                    }
                }
                Some(other) => response["data"] = other,
                None => {}
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a warning that does not fail the command
pub fn output_warning(output_format: &OutputFormat, message: &str) {
    match output_format {
        // Keep stdout a single JSON document
        OutputFormat::Json => eprintln!("{}", json!({ "warning": message })),
        OutputFormat::Text => eprintln!("Warning: {}", message),
    }
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    collection_name: []
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Output a collection as `{name: [...]}` JSON or as a text table
pub fn output_collection<T, F>(
    output_format: &OutputFormat,
    collection_name: &str,
    items: &[T],
    headers: &[(&str, usize)],
    row: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&T) -> Vec<String>,
{
    if items.is_empty() {
        return output_empty_collection(
            output_format,
            collection_name,
            &format!("No {} found", collection_name.replace('_', " ")),
        );
    }

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ collection_name: items }))?
            );
        }
        OutputFormat::Text => {
            let header: Vec<String> = headers.iter().map(|(h, _)| h.to_string()).collect();
            println!("{}", format_row(&header, headers));
            println!("{}", "-".repeat(headers.iter().map(|(_, w)| w + 1).sum()));
            for item in items {
                println!("{}", format_row(&row(item), headers));
            }
        }
    }
    Ok(())
}

/// Output one record as pretty JSON in either mode
pub fn output_record<T: Serialize>(
    output_format: &OutputFormat,
    record_name: &str,
    record: &T,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ record_name: record }))?);
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
    }
    Ok(())
}

fn format_row(cells: &[String], headers: &[(&str, usize)]) -> String {
    let last = headers.len().saturating_sub(1);
    cells
        .iter()
        .zip(headers)
        .enumerate()
        .map(|(i, (cell, (_, width)))| {
            if i == last {
                cell.clone()
            } else {
                format!("{:<width$}", truncate(cell, *width), width = *width)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clip a cell to `width` characters, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

/// Read a JSON document from a file path, or from stdin when the path is `-`
pub fn read_json_input<T: DeserializeOwned>(source: &str) -> anyhow::Result<T> {
    let content = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| anyhow::anyhow!("Cannot read '{}': {}", source, e))?
    };

    serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("Invalid JSON in '{}': {}", source, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long description", 6), "a lon…");
    }

    #[test]
    fn rows_are_padded_except_last_column() {
        let headers = [("ID", 4), ("PATH", 8), ("VALUE", 5)];
        let row = format_row(
            &["1".to_string(), "mail.host".to_string(), "smtp.example.com".to_string()],
            &headers,
        );
        assert_eq!(row, "1    mail.ho… smtp.example.com");
    }

    #[test]
    fn read_json_input_reports_missing_file() {
        let err = read_json_input::<Value>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
