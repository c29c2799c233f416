//! Latency accumulation and reporting.
//!
//! Two layers: running totals that drive a periodic throughput snapshot, and the
//! retained per-request samples that become the end-of-run order statistics. The
//! tail percentiles are approximate — integer indices into the descending sort, not
//! interpolated values.

use std::fmt;
use std::time::Instant;

use thiserror::Error;

/// Completions between progress snapshots.
pub const SNAPSHOT_INTERVAL: usize = 1000;

/// Elapsed-time threshold for the "percent under" summary line.
pub const UNDER_THRESHOLD_SECS: f64 = 1.0;

/// One completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub elapsed: f64,
    pub record_id: String,
}

/// Failures from statistics finalization.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no completed samples to report")]
    NoSamples,
}

/// Running totals plus the retained per-request samples.
pub struct StatsCollector {
    interval: usize,
    begin: Instant,
    prev_checkpoint: Instant,
    sum: f64,
    min: f64,
    max: f64,
    samples: Vec<Sample>,
}

impl StatsCollector {
    pub fn new(interval: usize) -> Self {
        let now = Instant::now();
        Self {
            interval,
            begin: now,
            prev_checkpoint: now,
            sum: 0.0,
            min: 0.0,
            max: 0.0,
            samples: Vec::new(),
        }
    }

    /// Completions recorded so far.
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// Records one completion; returns a snapshot at every interval boundary.
    pub fn record(&mut self, sample: Sample) -> Option<ProgressSnapshot> {
        self.min = if self.samples.is_empty() {
            sample.elapsed
        } else {
            self.min.min(sample.elapsed)
        };
        self.max = self.max.max(sample.elapsed);
        self.sum += sample.elapsed;
        self.samples.push(sample);

        let count = self.samples.len();
        if self.interval == 0 || count % self.interval != 0 {
            return None;
        }

        let now = Instant::now();
        let snapshot = ProgressSnapshot {
            processed: count,
            per_second: (self.interval as f64
                / now.duration_since(self.prev_checkpoint).as_secs_f64()) as u64,
            avg: self.sum / count as f64,
            tps: count as f64 / now.duration_since(self.begin).as_secs_f64(),
            min: self.min,
            max: self.max,
        };
        self.prev_checkpoint = now;
        Some(snapshot)
    }

    /// Sorts the retained samples and computes the end-of-run order
    /// statistics.
    pub fn finalize(self) -> Result<FinalReport, StatsError> {
        let count = self.samples.len();
        if count == 0 {
            return Err(StatsError::NoSamples);
        }

        let wall_clock = self.begin.elapsed().as_secs_f64();
        let mut samples = self.samples;
        samples.sort_by(|a, b| b.elapsed.total_cmp(&a.elapsed));

        // First descending index at or under the threshold marks the boundary;
        // a sample of exactly 1.0s counts as under.
        let boundary = samples
            .iter()
            .position(|sample| sample.elapsed <= UNDER_THRESHOLD_SECS)
            .unwrap_or(count);
        let percent_under_threshold = (count - boundary) as f64 / count as f64 * 100.0;

        let longest = samples[0].clone();

        let mut percentiles = Vec::new();
        for (label, fraction) in [("p99", 0.01), ("p95", 0.05), ("p90", 0.10)] {
            let index = (count as f64 * fraction) as usize;
            // Too few samples for a meaningful tail estimate.
            if index == 0 {
                continue;
            }
            percentiles.push((label, samples[index].clone()));
        }

        Ok(FinalReport {
            searches: count,
            avg: self.sum / count as f64,
            tps: count as f64 / wall_clock,
            min: self.min,
            max: self.max,
            percent_under_threshold,
            longest,
            percentiles,
        })
    }
}

/// Periodic throughput line.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub processed: usize,
    pub per_second: u64,
    pub avg: f64,
    pub tps: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} searches, {} records per second: avg[{:.3}s] tps[{:.3}/s] min[{:.3}s] max[{:.3}s]",
            self.processed, self.per_second, self.avg, self.tps, self.min, self.max
        )
    }
}

/// End-of-run summary and order statistics.
#[derive(Debug, Clone)]
pub struct FinalReport {
    pub searches: usize,
    pub avg: f64,
    pub tps: f64,
    pub min: f64,
    pub max: f64,
    pub percent_under_threshold: f64,
    pub longest: Sample,
    pub percentiles: Vec<(&'static str, Sample)>,
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed total of {} searches: avg[{:.3}s] tps[{:.3}/s] min[{:.3}s] max[{:.3}s]",
            self.searches, self.avg, self.tps, self.min, self.max
        )?;
        writeln!(
            f,
            "Percent under {}s: {:.1}%",
            UNDER_THRESHOLD_SECS, self.percent_under_threshold
        )?;
        writeln!(
            f,
            "longest: {:.3}s record[{}]",
            self.longest.elapsed, self.longest.record_id
        )?;
        for (label, sample) in &self.percentiles {
            writeln!(f, "{label}: {:.3}s record[{}]", sample.elapsed, sample.record_id)?;
        }
        Ok(())
    }
}
