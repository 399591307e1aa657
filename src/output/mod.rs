//! JSON and CSV exports of scraped threads.

mod csv_writer;
mod json_writer;

pub use csv_writer::{write_csv, CsvRow};
pub use json_writer::write_json;
