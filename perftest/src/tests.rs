//! Perftest Module Tests
//!
//! ## Test Scopes
//! - **Statistics**: Running snapshot cadence and the end-of-run order statistics,
//!   including the percentile index and threshold boundary policies.
//! - **Load generation**: Window bounds and refill behavior against an instrumented
//!   local server, plus fatal-error handling.

#[cfg(test)]
mod tests {
    use crate::loadgen::{LoadError, LoadGenerator};
    use crate::stats::{Sample, StatsCollector, StatsError};
    use axum::extract::State;
    use axum::routing::post;
    use axum::Router;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn sample(elapsed: f64, record_id: &str) -> Sample {
        Sample {
            elapsed,
            record_id: record_id.to_string(),
        }
    }

    // ============================================================
    // TEST 1: Order statistics on synthetic samples
    // ============================================================

    #[test]
    fn test_percentile_indices_on_synthetic_samples() {
        // 100 samples cycling through 0.1s..1.0s, ten of each value.
        let mut collector = StatsCollector::new(1000);
        for i in 0..100 {
            let elapsed = ((i % 10) as f64 + 1.0) / 10.0;
            assert!(collector.record(sample(elapsed, &format!("rec-{i}"))).is_none());
        }

        let report = collector.finalize().unwrap();

        assert_eq!(report.searches, 100);
        assert!((report.avg - 0.55).abs() < 1e-9);
        assert!((report.min - 0.1).abs() < 1e-9);
        assert!((report.max - 1.0).abs() < 1e-9);

        // Descending sort: indices 0..=9 hold 1.0s, 10..=19 hold 0.9s.
        // p99 reads index 1, p95 index 5, p90 index 10.
        let labels: Vec<&str> = report.percentiles.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["p99", "p95", "p90"]);
        assert!((report.percentiles[0].1.elapsed - 1.0).abs() < 1e-9);
        assert!((report.percentiles[1].1.elapsed - 1.0).abs() < 1e-9);
        assert!((report.percentiles[2].1.elapsed - 0.9).abs() < 1e-9);

        // Samples of exactly 1.0s count as "under".
        assert_eq!(report.percent_under_threshold, 100.0);
    }

    #[test]
    fn test_threshold_boundary_excludes_only_strictly_slower_samples() {
        let mut collector = StatsCollector::new(1000);
        for (i, elapsed) in [0.5, 1.0, 1.5, 2.0].into_iter().enumerate() {
            let _ = collector.record(sample(elapsed, &format!("rec-{i}")));
        }

        let report = collector.finalize().unwrap();

        // 1.5s and 2.0s sit above the boundary; 1.0s does not.
        assert_eq!(report.percent_under_threshold, 50.0);
        assert!((report.longest.elapsed - 2.0).abs() < 1e-9);
        assert_eq!(report.longest.record_id, "rec-3");
    }

    #[test]
    fn test_small_sample_counts_skip_tail_percentiles() {
        let mut collector = StatsCollector::new(1000);
        for i in 0..5 {
            let _ = collector.record(sample(0.2, &format!("rec-{i}")));
        }
        let report = collector.finalize().unwrap();
        assert!(report.percentiles.is_empty());

        let mut collector = StatsCollector::new(1000);
        for i in 0..50 {
            let _ = collector.record(sample(0.2, &format!("rec-{i}")));
        }
        let report = collector.finalize().unwrap();

        // floor(50 × 0.01) = 0 drops p99; p95 and p90 survive.
        let labels: Vec<&str> = report.percentiles.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["p95", "p90"]);
    }

    #[test]
    fn test_finalize_without_samples_is_an_error() {
        let collector = StatsCollector::new(1000);
        assert_eq!(collector.finalize().err(), Some(StatsError::NoSamples));
    }

    // ============================================================
    // TEST 2: Snapshot cadence
    // ============================================================

    #[test]
    fn test_snapshot_cadence_matches_the_interval() {
        let mut collector = StatsCollector::new(1000);

        let snapshots: Vec<_> = (0..2500)
            .filter_map(|i| collector.record(sample(0.5, &format!("rec-{i}"))))
            .collect();

        // 2500 completions at interval 1000: snapshots after 1000 and 2000.
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].processed, 1000);
        assert_eq!(snapshots[1].processed, 2000);
        assert!((snapshots[0].avg - 0.5).abs() < 1e-9);
    }

    // ============================================================
    // TEST 3: Load generation against an instrumented server
    // ============================================================

    #[derive(Clone)]
    struct TargetState {
        running: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        hits: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl TargetState {
        fn new(delay: Duration) -> Self {
            Self {
                running: Arc::new(AtomicUsize::new(0)),
                peak: Arc::new(AtomicUsize::new(0)),
                hits: Arc::new(AtomicUsize::new(0)),
                delay,
            }
        }
    }

    async fn target_handler(State(state): State<TargetState>) -> &'static str {
        state.hits.fetch_add(1, Ordering::SeqCst);
        let now = state.running.fetch_add(1, Ordering::SeqCst) + 1;
        state.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(state.delay).await;
        state.running.fetch_sub(1, Ordering::SeqCst);
        r#"{"RESOLVED_ENTITIES":[]}"#
    }

    async fn spawn_target(state: TargetState) -> String {
        let app = Router::new()
            .route("/search", post(target_handler))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/search")
    }

    fn record_file(count: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for i in 0..count {
            writeln!(
                file,
                r#"{{"RECORD_ID": "rec-{i}", "NAME_FULL": "Person {i}"}}"#
            )
            .unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_end_to_end_small_input_completes_without_snapshots() {
        // 3 records against a window of 4: everything primes immediately.
        let state = TargetState::new(Duration::from_millis(10));
        let url = spawn_target(state.clone()).await;
        let file = record_file(3);

        let generator = LoadGenerator::new(url, 2);
        assert_eq!(generator.window(), 4);

        let mut collector = StatsCollector::new(1000);
        generator.run(file.path(), &mut collector).await.unwrap();

        assert_eq!(state.hits.load(Ordering::SeqCst), 3);
        assert_eq!(collector.count(), 3);

        let report = collector.finalize().unwrap();
        assert_eq!(report.searches, 3);
        assert!(report.percentiles.is_empty());
    }

    #[tokio::test]
    async fn test_window_is_kept_full_and_never_exceeded() {
        let state = TargetState::new(Duration::from_millis(100));
        let url = spawn_target(state.clone()).await;
        let file = record_file(12);

        let generator = LoadGenerator::new(url, 2);
        let mut collector = StatsCollector::new(1000);
        generator.run(file.path(), &mut collector).await.unwrap();

        assert_eq!(collector.count(), 12);
        // Steady state holds the window at exactly 2 × workers outstanding.
        assert_eq!(state.peak.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_malformed_record_aborts_the_run() {
        let state = TargetState::new(Duration::from_millis(1));
        let url = spawn_target(state).await;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"RECORD_ID": "rec-0"}}"#).unwrap();
        writeln!(file, "not a json record").unwrap();
        file.flush().unwrap();

        let generator = LoadGenerator::new(url, 1);
        let mut collector = StatsCollector::new(1000);
        let err = generator.run(file.path(), &mut collector).await.unwrap_err();

        assert!(matches!(err, LoadError::Record(_)));
    }

    #[tokio::test]
    async fn test_record_without_id_aborts_the_run() {
        let state = TargetState::new(Duration::from_millis(1));
        let url = spawn_target(state).await;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"NAME_FULL": "No Id"}}"#).unwrap();
        file.flush().unwrap();

        let generator = LoadGenerator::new(url, 1);
        let mut collector = StatsCollector::new(1000);
        let err = generator.run(file.path(), &mut collector).await.unwrap_err();

        assert!(matches!(err, LoadError::MissingRecordId));
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_the_run() {
        // Bind and immediately release a port so the request gets refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let file = record_file(2);
        let generator = LoadGenerator::new(format!("http://{addr}/search"), 1);
        let mut collector = StatsCollector::new(1000);
        let err = generator.run(file.path(), &mut collector).await.unwrap_err();

        assert!(matches!(err, LoadError::Transport(_)));
    }
}
