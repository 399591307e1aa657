//! Discord forum thread scraper library.
//!
//! Pages through a forum channel's active and archived threads, resolves
//! applied tag IDs to their names, and exports the result as JSON and CSV.

pub mod config;
pub mod constants;
pub mod discord;
pub mod error;
pub mod output;
pub mod scrape;
