//! Discord REST API access: client, payload types, tag lookup and thread search.

pub mod client;
pub mod models;
pub mod tags;
pub mod threads;

pub use client::{ApiResponse, DiscordClient};
pub use models::{ArchivalState, ChannelMetadata, ForumTag, TagId, Thread, ThreadSearchPage};
pub use tags::{fetch_tag_mapping, TagMapping};
pub use threads::{fetch_threads, parse_retry_after, FetchState, Sleeper, TokioSleeper};
