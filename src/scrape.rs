//! Whole-channel scrape: tags, active threads, archived threads, then export.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::discord::{
    fetch_tag_mapping, fetch_threads, ArchivalState, DiscordClient, Sleeper, TagMapping, Thread,
    TokioSleeper,
};
use crate::error::ScrapeError;
use crate::output::{write_csv, write_json};

/// Active threads followed by archived threads, each in server order.
#[derive(Debug, Clone, Default)]
pub struct ScrapeResult {
    pub threads: Vec<Thread>,
    pub active_count: usize,
    pub archived_count: usize,
}

impl ScrapeResult {
    #[must_use]
    pub fn new(active: Vec<Thread>, archived: Vec<Thread>) -> Self {
        let active_count = active.len();
        let archived_count = archived.len();
        let mut threads = active;
        threads.extend(archived);
        Self {
            threads,
            active_count,
            archived_count,
        }
    }
}

/// Everything a scrape produces before it is written out.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    pub tags: TagMapping,
    pub result: ScrapeResult,
}

/// Counts reported after a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub tags: usize,
    pub active: usize,
    pub archived: usize,
}

/// Scrape a channel sequentially: tag mapping, then active, then archived threads.
///
/// A failed metadata request degrades to an empty mapping.
///
/// # Errors
///
/// Returns an error on transport failures or undecodable responses.
pub async fn scrape_all(
    client: &DiscordClient,
    sleeper: &dyn Sleeper,
    channel_id: &str,
    base_delay: Duration,
) -> Result<ScrapeOutcome, ScrapeError> {
    let tags = match fetch_tag_mapping(client, channel_id).await {
        Ok(tags) => tags,
        Err(ScrapeError::RemoteFetch { endpoint, status }) => {
            warn!(
                channel_id = %channel_id,
                endpoint = %endpoint,
                status = %status,
                "Failed to fetch channel metadata, tags will show as unknown"
            );
            TagMapping::default()
        }
        Err(e) => return Err(e),
    };

    info!("Starting to scrape active threads");
    let active =
        fetch_threads(client, sleeper, channel_id, ArchivalState::Active, base_delay).await?;

    info!("Starting to scrape archived threads");
    let archived =
        fetch_threads(client, sleeper, channel_id, ArchivalState::Archived, base_delay).await?;

    Ok(ScrapeOutcome {
        tags,
        result: ScrapeResult::new(active, archived),
    })
}

/// Scrape the configured channel and write both output files.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the scrape hits a fatal
/// error, or either output file cannot be written.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let client = DiscordClient::new(config).context("Failed to build Discord client")?;

    info!(channel_id = %config.channel_id, "Scraping channel");
    let outcome = scrape_all(
        &client,
        &TokioSleeper,
        &config.channel_id,
        config.fetch_base_delay,
    )
    .await
    .context("Scrape failed")?;

    let threads = &outcome.result.threads;

    write_json(&config.json_output_path, threads).context("Failed to write JSON output")?;
    info!(path = %config.json_output_path.display(), threads = threads.len(), "Threads saved");

    write_csv(&config.csv_output_path, threads, &outcome.tags)
        .context("Failed to write CSV output")?;
    info!(path = %config.csv_output_path.display(), threads = threads.len(), "Threads saved");

    let summary = RunSummary {
        tags: outcome.tags.len(),
        active: outcome.result.active_count,
        archived: outcome.result.archived_count,
    };
    info!(
        tags = summary.tags,
        active = summary.active,
        archived = summary.archived,
        "Scrape complete"
    );

    Ok(summary)
}
