//! Long-polled realtime change feed.
//!
//! The authority exposes per-partnership change pages at
//! `GET /api/v1/realtime/{channel}?cursor={n}`. The feed polls in an owned
//! background task and pushes events into the subscriber's channel; when the
//! subscriber drops its receiver the task notices on the next send and exits,
//! which releases the subscription.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tokio::sync::mpsc;

use tandem_core::sync::{PartnerChangeFeed, RemoteChange};

use crate::error::{ConnectError, Result};
use crate::types::{ChangeMessage, ChangesResponse};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const ERROR_BACKOFF: Duration = Duration::from_secs(10);
const CHANNEL_CAPACITY: usize = 64;

/// Change feed implementation over long polling.
#[derive(Debug, Clone)]
pub struct RealtimeFeed {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
    poll_interval: Duration,
}

impl RealtimeFeed {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
            .map_err(|_| ConnectError::InvalidRequest("invalid access token format".to_string()))?;
        headers.insert(AUTHORIZATION, auth_value);
        Ok(headers)
    }

    async fn fetch_page(&self, channel: &str, cursor: u64) -> Result<ChangesResponse> {
        let url = format!(
            "{}/api/v1/realtime/{channel}?cursor={cursor}",
            self.base_url
        );
        let response = self.client.get(&url).headers(self.headers()?).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::api(status.as_u16(), body));
        }
        Ok(response.json().await?)
    }
}

fn to_remote_change(message: ChangeMessage) -> Option<RemoteChange> {
    match message.event_type.as_str() {
        "INSERT" => message.record.map(|record| RemoteChange::Insert { record }),
        "UPDATE" => message.record.map(|record| RemoteChange::Update { record }),
        "DELETE" => message
            .old_record
            .map(|old_record| RemoteChange::Delete { old_record }),
        other => {
            debug!("ignoring unknown change event type '{other}'");
            None
        }
    }
}

#[async_trait]
impl PartnerChangeFeed for RealtimeFeed {
    async fn subscribe(
        &self,
        channel: &str,
    ) -> tandem_core::Result<mpsc::Receiver<RemoteChange>> {
        // fetch the first page eagerly: a dead channel must fail the subscribe
        let first = self.fetch_page(channel, 0).await.map_err(tandem_core::Error::from)?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let feed = self.clone();
        let channel = channel.to_string();
        let mut cursor = first.cursor;

        tokio::spawn(async move {
            for message in first.events {
                if let Some(change) = to_remote_change(message) {
                    if tx.send(change).await.is_err() {
                        return;
                    }
                }
            }
            loop {
                tokio::time::sleep(feed.poll_interval).await;
                match feed.fetch_page(&channel, cursor).await {
                    Ok(page) => {
                        cursor = page.cursor;
                        for message in page.events {
                            if let Some(change) = to_remote_change(message) {
                                if tx.send(change).await.is_err() {
                                    debug!("subscriber for {channel} gone, stopping poll");
                                    return;
                                }
                            }
                        }
                    }
                    Err(err) => {
                        // feed is best-effort: log, back off, keep polling
                        warn!("change feed poll for {channel} failed: {err}");
                        tokio::time::sleep(ERROR_BACKOFF).await;
                    }
                }
            }
        });

        Ok(rx)
    }
}
