//! Bounded sliding-window load generation.
//!
//! The generator keeps a fixed number of requests in flight: it primes a window of
//! `2 × workers` concurrent POSTs from the head of the input file, then refills one
//! slot per completion — whichever request finishes first — until the input is
//! exhausted and the window drains. The first request failure aborts the whole run.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{Id, JoinSet};

use crate::stats::{Sample, StatsCollector};

/// Outstanding requests per worker slot.
pub const WINDOW_MULTIPLIER: usize = 2;

/// Failures that abort a load-generation run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
    #[error("malformed input record: {0}")]
    Record(#[from] serde_json::Error),
    #[error("input record has no RECORD_ID")]
    MissingRecordId,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request task failed: {0}")]
    Task(String),
}

/// Drives a fixed-size window of concurrent search requests.
pub struct LoadGenerator {
    client: Client,
    url: String,
    window: usize,
}

impl LoadGenerator {
    pub fn new(url: String, workers: usize) -> Self {
        Self {
            client: Client::new(),
            url,
            window: WINDOW_MULTIPLIER * workers,
        }
    }

    /// Outstanding-request bound for this generator.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Replays the record file to completion, feeding samples into `stats`.
    pub async fn run(&self, path: &Path, stats: &mut StatsCollector) -> Result<(), LoadError> {
        let file = File::open(path).await?;
        let mut lines = BufReader::new(file).lines();

        let mut inflight: JoinSet<Result<Sample, LoadError>> = JoinSet::new();
        // Maps each outstanding request back to the line that produced it.
        let mut window: HashMap<Id, String> = HashMap::new();

        println!("Searching with {} concurrent requests", self.window);

        // Prime the window from the head of the file.
        while window.len() < self.window {
            match lines.next_line().await? {
                Some(line) => self.submit(&mut inflight, &mut window, line),
                None => break,
            }
        }

        // First-completed refill loop: the window stays full until the input
        // runs out, then drains.
        while let Some(completed) = inflight.join_next_with_id().await {
            let (id, result) = match completed {
                Ok(done) => done,
                Err(err) => {
                    let line = window.remove(&err.id()).unwrap_or_default();
                    tracing::error!("{err} [{line}]");
                    inflight.abort_all();
                    return Err(LoadError::Task(err.to_string()));
                }
            };
            window.remove(&id);

            match result {
                Ok(sample) => {
                    if let Some(snapshot) = stats.record(sample) {
                        println!("{snapshot}");
                    }
                }
                Err(err) => {
                    inflight.abort_all();
                    return Err(err);
                }
            }

            if let Some(line) = lines.next_line().await? {
                self.submit(&mut inflight, &mut window, line);
            }
        }

        Ok(())
    }

    fn submit(
        &self,
        inflight: &mut JoinSet<Result<Sample, LoadError>>,
        window: &mut HashMap<Id, String>,
        line: String,
    ) {
        let handle = inflight.spawn(process_line(
            self.client.clone(),
            self.url.clone(),
            line.clone(),
        ));
        window.insert(handle.id(), line);
    }
}

/// Runs one request unit, logging any failure with the offending line.
async fn process_line(client: Client, url: String, line: String) -> Result<Sample, LoadError> {
    let result = search_once(&client, &url, &line).await;
    if let Err(err) = &result {
        tracing::error!("{err} [{line}]");
    }
    result
}

/// Times a single POST of the raw line; elapsed covers send through body read.
async fn search_once(client: &Client, url: &str, line: &str) -> Result<Sample, LoadError> {
    let record: Value = serde_json::from_str(line)?;
    let record_id = record_id(&record).ok_or(LoadError::MissingRecordId)?;

    let start = Instant::now();
    let response = client.post(url).body(line.to_string()).send().await?;
    response.bytes().await?;
    let elapsed = start.elapsed().as_secs_f64();

    Ok(Sample { elapsed, record_id })
}

/// `RECORD_ID` as reported in the statistics; non-string values are
/// stringified.
fn record_id(record: &Value) -> Option<String> {
    match record.get("RECORD_ID")? {
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    }
}
