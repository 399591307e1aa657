use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::discord::Thread;
use crate::error::OutputError;

/// Write `threads` as an indented JSON array, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created, serialized into, or flushed.
pub fn write_json(path: &Path, threads: &[Thread]) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let json_err = |source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    threads.serialize(&mut serializer).map_err(json_err)?;

    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[test]
    fn test_writes_indented_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("threads.json");
        let threads: Vec<Thread> = serde_json::from_value(json!([
            { "id": "1", "name": "First" },
            { "id": "2", "name": "Second" }
        ]))
        .unwrap();

        write_json(&path, &threads).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n    {"));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["name"], "Second");
    }

    #[test]
    fn test_records_written_unmodified() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("threads.json");
        let raw = r#"[{"owner_id":"9","name":null,"message_count":3.0,"applied_tags":[null]}]"#;
        let threads: Vec<Thread> = serde_json::from_str(raw).unwrap();

        write_json(&path, &threads).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "[\n    {\n        \"owner_id\": \"9\",\n        \"name\": null,\n        \
             \"message_count\": 3.0,\n        \
             \"applied_tags\": [\n            null\n        ]\n    }\n]\n"
        );
        let written: Value = serde_json::from_str(&text).unwrap();
        let expected: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("threads.json");
        std::fs::write(&path, "stale content that is longer than an empty array").unwrap();

        write_json(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("threads.json");
        assert!(matches!(write_json(&path, &[]), Err(OutputError::Io { .. })));
    }
}
