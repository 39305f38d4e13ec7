use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// JSON output style
pub enum JsonStyle {
    /// Compact one-line JSON
    Compact,
    /// Pretty printed (indented) JSON
    Pretty,
}

/// Serialize `data` in the given style.
pub fn to_json_string<T: Serialize>(data: &T, style: JsonStyle) -> Result<String> {
    let json = match style {
        JsonStyle::Compact => serde_json::to_string(data)?,
        JsonStyle::Pretty => serde_json::to_string_pretty(data)?,
    };
    Ok(json)
}

/// Save any serializable data to a JSON file, creating parent directories.
pub fn save_json_output<T: Serialize>(data: &T, out_path: &Path, style: JsonStyle) -> Result<()> {
    let json = to_json_string(data, style)?;

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let mut file = File::create(out_path)
        .with_context(|| format!("failed to create {}", out_path.display()))?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn saves_pretty_json_into_new_directory() {
        let dir = std::env::temp_dir().join(format!("ctsrecon-json-{}", std::process::id()));
        let path = dir.join("nested").join("report.json");
        let data = json!({"target": "example.com", "subdomain": ["a.example.com"]});

        save_json_output(&data, &path, JsonStyle::Pretty).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"target\""));
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), data);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn compact_is_single_line() {
        let s = to_json_string(&json!({"a": [1, 2]}), JsonStyle::Compact).unwrap();
        assert_eq!(s, r#"{"a":[1,2]}"#);
    }
}
