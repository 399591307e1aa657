//! Paginated thread search with rate-limit backoff.
//!
//! One invocation walks the search endpoint for a single archival state,
//! advancing the offset by the number of threads each page actually returned.
//! A 429 suspends for the server's `Retry-After` and then repeats the same
//! request. Every rate-limit event also adds its wait to the inter-page delay,
//! which only grows for the rest of the invocation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::discord::client::DiscordClient;
use crate::discord::models::{ArchivalState, Thread, ThreadSearchPage};
use crate::error::ScrapeError;

/// Wait used when a 429 carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Suspension effect used between requests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real timed suspension on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Mutable state of one pagination run.
#[derive(Debug)]
pub struct FetchState {
    pub offset: usize,
    pub delay: Duration,
    pub threads: Vec<Thread>,
}

impl FetchState {
    #[must_use]
    pub fn new(base_delay: Duration) -> Self {
        Self {
            offset: 0,
            delay: base_delay,
            threads: Vec::new(),
        }
    }

    /// Record a rate-limit wait. The delay never shrinks.
    pub fn ratchet(&mut self, retry_after: Duration) {
        self.delay = self.delay.saturating_add(retry_after);
    }

    /// Append a page and advance the offset by its actual size.
    pub fn push_page(&mut self, threads: Vec<Thread>) {
        self.offset += threads.len();
        self.threads.extend(threads);
    }
}

/// Parse `Retry-After` as integer or fractional seconds.
///
/// Missing, unparseable, negative or non-finite values fall back to
/// [`DEFAULT_RETRY_AFTER`].
#[must_use]
pub fn parse_retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or(DEFAULT_RETRY_AFTER)
}

/// Fetch every thread of one archival state.
///
/// A non-2xx, non-429 response ends the run early and the threads gathered so
/// far are returned; that is logged, not raised.
///
/// # Errors
///
/// Returns an error on transport failures or an undecodable 2xx body.
pub async fn fetch_threads(
    client: &DiscordClient,
    sleeper: &dyn Sleeper,
    channel_id: &str,
    state: ArchivalState,
    base_delay: Duration,
) -> Result<Vec<Thread>, ScrapeError> {
    let path = format!("/channels/{channel_id}/threads/search");
    let mut fetch = FetchState::new(base_delay);

    loop {
        debug!(state = %state, offset = fetch.offset, "Requesting threads");

        let query = [
            ("sort_by", "last_message_time".to_string()),
            ("sort_order", "desc".to_string()),
            ("archived", state.query_value().to_string()),
            ("offset", fetch.offset.to_string()),
        ];
        let response = client.get(&path, &query).await?;

        if response.status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(&response.headers);
            warn!(
                state = %state,
                offset = fetch.offset,
                retry_after_secs = retry_after.as_secs_f64(),
                "Rate limited, retrying same page"
            );
            sleeper.sleep(retry_after).await;
            fetch.ratchet(retry_after);
            debug!(delay_secs = fetch.delay.as_secs_f64(), "Inter-page delay raised");
            continue;
        }

        if !response.status.is_success() {
            warn!(
                state = %state,
                channel_id = %channel_id,
                status = %response.status,
                fetched = fetch.threads.len(),
                "Thread search failed, keeping partial results"
            );
            break;
        }

        let page: ThreadSearchPage = response.json()?;
        if page.threads.is_empty() {
            info!(state = %state, "No more threads found");
            break;
        }

        let page_len = page.threads.len();
        fetch.push_page(page.threads);
        info!(
            state = %state,
            page = page_len,
            total = fetch.threads.len(),
            "Fetched threads"
        );

        if !page.has_more {
            debug!(state = %state, "Server reported has_more=false");
            break;
        }

        sleeper.sleep(fetch.delay).await;
    }

    Ok(fetch.threads)
}
