//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::statistics::{TextStatistics, TextValidation};
use crate::cli::args::{GrievanceArgs, OutputFormat};
use crate::error::Result;

/// Result structure for the keywords command.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordsResult {
    pub keywords: Vec<String>,
    pub urgency_score: f64,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    pub statistics: TextStatistics,
    pub validation: TextValidation,
    pub recommendations: Vec<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &GrievanceArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &GrievanceArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print!("{}", render_human(&value));
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &GrievanceArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Render a JSON value as indented `key: value` lines.
pub fn render_human(value: &serde_json::Value) -> String {
    let mut out = String::new();
    render_value(value, 0, &mut out);
    out
}

fn render_value(value: &serde_json::Value, indent: usize, out: &mut String) {
    let spaces = "  ".repeat(indent);

    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Object(_) => {
                        out.push_str(&format!("{spaces}{key}:\n"));
                        render_value(val, indent + 1, out);
                    }
                    serde_json::Value::Array(arr) if arr.iter().any(is_nested) => {
                        out.push_str(&format!("{spaces}{key}:\n"));
                        render_value(val, indent + 1, out);
                    }
                    _ => out.push_str(&format!("{spaces}{key}: {}\n", format_value(val))),
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr {
                out.push_str(&format!("{spaces}- {}\n", format_value(item)));
            }
        }
        _ => out.push_str(&format!("{spaces}{}\n", format_value(value))),
    }
}

fn is_nested(value: &serde_json::Value) -> bool {
    matches!(
        value,
        serde_json::Value::Object(_) | serde_json::Value::Array(_)
    )
}

/// Format a JSON value for display. Fractional numbers get three decimals.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
            (Some(u), _, _) => u.to_string(),
            (_, Some(i), _) => i.to_string(),
            (_, _, Some(f)) => format!("{f:.3}"),
            _ => n.to_string(),
        },
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}
