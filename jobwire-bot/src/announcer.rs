//! Announcement control flow
//!
//! Three entry points share one routine: the scheduled cycle and the
//! no-argument command both fetch the default feed and announce whatever
//! the dedup store has not seen; the location command fetches with
//! location criteria and delivers everything it gets back, with no dedup
//! check and no marking. That asymmetry is deliberate: a location query is
//! meant to show the full current listing, not just what is new.
//!
//! All three run over trait objects (source, store, sink) so the flow can
//! be exercised in tests without a network, a database, or a gateway.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jobwire_client::{JobSource, SearchCriteria};
use tracing::debug;

use crate::store::DedupStore;

/// Notice sent when the no-argument command finds nothing new
pub const NO_NEW_LISTINGS: &str = "There are no new job listings at this time.";

/// Anywhere a rendered announcement can be delivered
///
/// The production implementation posts to a Discord channel; tests collect
/// messages into a vector.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, content: &str) -> Result<()>;
}

/// Fetch the default feed and announce every listing not yet posted.
///
/// Each surviving listing is delivered first and marked afterwards, so a
/// failure between the two favors a duplicate over a silent drop. Returns
/// how many listings were announced.
///
/// Used by both the scheduled cycle and the no-argument command; errors
/// propagate to the caller's default handling.
pub async fn announce_new_jobs(
    source: &dyn JobSource,
    store: &dyn DedupStore,
    sink: &dyn MessageSink,
) -> Result<usize> {
    let jobs = source
        .search(&SearchCriteria::default_feed())
        .await
        .context("failed to fetch job postings")?;

    debug!("Fetched {} listing(s) for the default feed", jobs.len());

    let mut posted = 0;
    for job in jobs {
        if store.has_been_posted(&job.id).await? {
            continue;
        }

        sink.send(&job.render()).await?;
        store.mark_as_posted(&job.id).await?;
        posted += 1;
    }

    Ok(posted)
}

/// Handle the no-argument command: announce new listings into the invoking
/// channel, or say so when there are none.
pub async fn run_jobs_command(
    source: &dyn JobSource,
    store: &dyn DedupStore,
    sink: &dyn MessageSink,
) -> Result<()> {
    let posted = announce_new_jobs(source, store, sink).await?;

    if posted == 0 {
        sink.send(NO_NEW_LISTINGS).await?;
    }

    Ok(())
}

/// Handle the location command: deliver every listing for the given
/// location, bypassing the dedup store entirely.
///
/// A fetch failure is reported conversationally instead of propagating;
/// this is the only path that catches one.
pub async fn run_location_command(
    source: &dyn JobSource,
    sink: &dyn MessageSink,
    location: &str,
) -> Result<()> {
    sink.send(&format!("Looking for jobs in {}...", location))
        .await?;

    let jobs = match source.search(&SearchCriteria::for_location(location)).await {
        Ok(jobs) => jobs,
        Err(e) => {
            sink.send(&format!("Error fetching jobs: {}", e)).await?;
            return Ok(());
        }
    };

    if jobs.is_empty() {
        sink.send(&format!("No jobs found for {}.", location)).await?;
        return Ok(());
    }

    for job in &jobs {
        sink.send(&job.render()).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobwire_client::FetchError;
    use jobwire_core::domain::job::JobRecord;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSource {
        jobs: Vec<JobRecord>,
        fail_status: Option<u16>,
    }

    impl FakeSource {
        fn with_jobs(jobs: Vec<JobRecord>) -> Self {
            Self {
                jobs,
                fail_status: None,
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                jobs: Vec::new(),
                fail_status: Some(status),
            }
        }
    }

    #[async_trait]
    impl JobSource for FakeSource {
        async fn search(
            &self,
            _criteria: &SearchCriteria,
        ) -> jobwire_client::Result<Vec<JobRecord>> {
            match self.fail_status {
                Some(status) => Err(FetchError::status(status, "boom")),
                None => Ok(self.jobs.clone()),
            }
        }
    }

    #[derive(Default)]
    struct FakeStore {
        posted: Mutex<HashSet<String>>,
        mark_calls: AtomicUsize,
    }

    impl FakeStore {
        fn preloaded(ids: &[&str]) -> Self {
            let store = Self::default();
            store
                .posted
                .lock()
                .unwrap()
                .extend(ids.iter().map(|id| id.to_string()));
            store
        }
    }

    #[async_trait]
    impl DedupStore for FakeStore {
        async fn has_been_posted(&self, job_id: &str) -> Result<bool, crate::store::StoreError> {
            Ok(self.posted.lock().unwrap().contains(job_id))
        }

        async fn mark_as_posted(&self, job_id: &str) -> Result<(), crate::store::StoreError> {
            self.mark_calls.fetch_add(1, Ordering::SeqCst);
            self.posted.lock().unwrap().insert(job_id.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn sent(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageSink for RecordingSink {
        async fn send(&self, content: &str) -> Result<()> {
            self.messages.lock().unwrap().push(content.to_string());
            Ok(())
        }
    }

    fn job(id: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: format!("Job {}", id),
            company: "Acme Corp".to_string(),
            location: "Pittsburgh".to_string(),
            description: "Build things.".to_string(),
            url: format!("https://example.com/job/{}", id),
        }
    }

    #[tokio::test]
    async fn test_second_cycle_announces_nothing() {
        let source = FakeSource::with_jobs(vec![job("a"), job("b")]);
        let store = FakeStore::default();

        let sink = RecordingSink::default();
        let posted = announce_new_jobs(&source, &store, &sink).await.unwrap();
        assert_eq!(posted, 2);
        assert_eq!(sink.sent().len(), 2);

        // Same listings again: everything is filtered, nothing re-marked.
        let sink = RecordingSink::default();
        let posted = announce_new_jobs(&source, &store, &sink).await.unwrap();
        assert_eq!(posted, 0);
        assert!(sink.sent().is_empty());
        assert_eq!(store.mark_calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.posted.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_fetch_does_nothing() {
        let source = FakeSource::with_jobs(Vec::new());
        let store = FakeStore::default();
        let sink = RecordingSink::default();

        let posted = announce_new_jobs(&source, &store, &sink).await.unwrap();

        assert_eq!(posted, 0);
        assert!(sink.sent().is_empty());
        assert_eq!(store.mark_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_from_announce() {
        let source = FakeSource::failing(500);
        let store = FakeStore::default();
        let sink = RecordingSink::default();

        let result = announce_new_jobs(&source, &store, &sink).await;

        assert!(result.is_err());
        assert!(sink.sent().is_empty());
        assert_eq!(store.mark_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_command_with_all_posted_sends_single_notice() {
        let source = FakeSource::with_jobs(vec![job("a"), job("b")]);
        let store = FakeStore::preloaded(&["a", "b"]);
        let sink = RecordingSink::default();

        run_jobs_command(&source, &store, &sink).await.unwrap();

        assert_eq!(sink.sent(), vec![NO_NEW_LISTINGS.to_string()]);
        assert_eq!(store.mark_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_command_with_new_jobs_skips_notice() {
        let source = FakeSource::with_jobs(vec![job("a")]);
        let store = FakeStore::default();
        let sink = RecordingSink::default();

        run_jobs_command(&source, &store, &sink).await.unwrap();

        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Job a"));
    }

    #[tokio::test]
    async fn test_location_command_bypasses_dedup() {
        // Both ids already announced; the location path must not care.
        let source = FakeSource::with_jobs(vec![job("a"), job("b")]);
        let sink = RecordingSink::default();

        run_location_command(&source, &sink, "Pittsburgh")
            .await
            .unwrap();

        let sent = sink.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0], "Looking for jobs in Pittsburgh...");
        assert!(sent[1].contains("Job a"));
        assert!(sent[2].contains("Job b"));
    }

    #[tokio::test]
    async fn test_location_command_reports_fetch_failure() {
        let source = FakeSource::failing(503);
        let sink = RecordingSink::default();

        run_location_command(&source, &sink, "Pittsburgh")
            .await
            .unwrap();

        let sent = sink.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].starts_with("Error fetching jobs:"));
    }

    #[tokio::test]
    async fn test_location_command_with_no_results() {
        let source = FakeSource::with_jobs(Vec::new());
        let sink = RecordingSink::default();

        run_location_command(&source, &sink, "Nowhere").await.unwrap();

        let sent = sink.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1], "No jobs found for Nowhere.");
    }
}
