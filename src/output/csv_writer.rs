use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::discord::{TagMapping, Thread};
use crate::error::OutputError;

/// One spreadsheet row describing a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Created")]
    pub created: String,
    #[serde(rename = "Messages")]
    pub messages: u64,
    #[serde(rename = "Tags")]
    pub tags: String,
}

impl CsvRow {
    #[must_use]
    pub fn from_thread(thread: &Thread, tags: &TagMapping) -> Self {
        let tag_ids = thread.tag_ids();
        let tags = if tag_ids.is_empty() {
            "None".to_string()
        } else {
            tag_ids
                .iter()
                .map(|id| tags.resolve(id))
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            name: thread.display_name().to_string(),
            created: thread.created_date().to_string(),
            messages: thread.messages(),
            tags,
        }
    }
}

/// Write one row per thread, in input order, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row cannot be written.
pub fn write_csv(path: &Path, threads: &[Thread], tags: &TagMapping) -> Result<(), OutputError> {
    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Header is written by hand so an empty export still has one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    writer
        .write_record(["Name", "Created", "Messages", "Tags"])
        .map_err(csv_err)?;
    for thread in threads {
        writer
            .serialize(CsvRow::from_thread(thread, tags))
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
