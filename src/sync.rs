use log::info;

use crate::changeset::{ChangeDescriptor, build_changes};
use crate::error::{Error, Result};
use crate::fetcher::ZoneFetcher;
use crate::provider::Provider;
use crate::record::{RecordTypeFilter, aggregate};

/// Most the hosting API accepts in one change-batch request.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 98;

/// Side-channel run reporting. Callbacks fire at fixed checkpoints and
/// must never influence control flow or the submitted data.
pub trait Progress {
    fn transfer_started(&self, _server: &str, _domain: &str) {}
    fn transfer_finished(&self, _owner_count: usize) {}
    fn aggregated(&self, _record_sets: usize) {}
    fn batch_submitted(&self, _batch: usize, _size: usize) {}
}

/// The default reporter: silence.
pub struct NoProgress;

impl Progress for NoProgress {}

#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    pub max_batch_size: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// One zone to synchronize: where to transfer it from, which record
/// types to carry over, and which hosted zone receives the upserts.
#[derive(Debug, Clone)]
pub struct SyncJob {
    pub domain: String,
    pub dnsserver: String,
    pub record_types: RecordTypeFilter,
    pub hosted_zone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub record_sets: usize,
    pub batches: usize,
}

/// The whole pipeline: transfer, aggregate, build the change sequence,
/// submit it in bounded batches. Strictly sequential; a failing step
/// aborts the run.
///
/// Batches already accepted by the remote API stay applied when a later
/// batch fails. Upserts are individually safe to re-apply, so the next
/// run converges; two instances racing on the same hosted zone are not
/// safe and are the caller's responsibility to avoid.
pub struct Syncer<'a> {
    fetcher: &'a dyn ZoneFetcher,
    provider: &'a dyn Provider,
    opts: SyncOptions,
}

impl<'a> Syncer<'a> {
    pub fn new(fetcher: &'a dyn ZoneFetcher, provider: &'a dyn Provider, opts: SyncOptions) -> Self {
        Self {
            fetcher,
            provider,
            opts,
        }
    }

    pub async fn run(&self, job: &SyncJob, progress: &dyn Progress) -> Result<SyncReport> {
        progress.transfer_started(&job.dnsserver, &job.domain);
        let snapshot = self.fetcher.fetch(&job.dnsserver, &job.domain).await?;
        progress.transfer_finished(snapshot.owner_count());

        let aggregated = aggregate(&snapshot, &job.domain, &job.record_types)?;
        let changes = build_changes(aggregated);
        progress.aggregated(changes.len());

        let batches = self.submit_batches(&job.hosted_zone, &changes, progress).await?;
        info!(
            "zone {}: {} record set(s) submitted in {} batch(es)",
            job.domain,
            changes.len(),
            batches
        );
        Ok(SyncReport {
            record_sets: changes.len(),
            batches,
        })
    }

    /// Contiguous chunks of at most `max_batch_size`, one request each,
    /// in sequence. The first rejection aborts; later batches are never
    /// attempted, so the failure report pins down exactly how far the
    /// run got.
    async fn submit_batches(
        &self,
        hosted_zone: &str,
        changes: &[ChangeDescriptor],
        progress: &dyn Progress,
    ) -> Result<usize> {
        let mut submitted = 0;
        for (idx, batch) in changes.chunks(self.opts.max_batch_size).enumerate() {
            let batch_no = idx + 1;
            self.provider
                .submit(hosted_zone, batch)
                .await
                .map_err(|e| Error::Submission {
                    batch: batch_no,
                    source: Box::new(e),
                })?;
            progress.batch_submitted(batch_no, batch.len());
            submitted = batch_no;
        }
        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::record::{RecordKind, ZoneSnapshot};

    struct MockFetcher {
        snapshot: ZoneSnapshot,
    }

    #[async_trait]
    impl ZoneFetcher for MockFetcher {
        async fn fetch(&self, _server: &str, _domain: &str) -> Result<ZoneSnapshot> {
            Ok(self.snapshot.clone())
        }
    }

    #[derive(Default)]
    struct MockProvider {
        attempts: Mutex<usize>,
        batches: Mutex<Vec<Vec<ChangeDescriptor>>>,
        fail_on: Option<usize>,
    }

    impl MockProvider {
        fn failing_on(batch: usize) -> Self {
            Self {
                fail_on: Some(batch),
                ..Default::default()
            }
        }

        fn attempts(&self) -> usize {
            *self.attempts.lock().unwrap()
        }

        fn batch_sizes(&self) -> Vec<usize> {
            self.batches.lock().unwrap().iter().map(Vec::len).collect()
        }

        fn submitted(&self) -> Vec<ChangeDescriptor> {
            self.batches.lock().unwrap().concat()
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        async fn submit(&self, _hosted_zone: &str, changes: &[ChangeDescriptor]) -> Result<()> {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            if self.fail_on == Some(*attempts) {
                return Err(Error::Api("rejected by test provider".to_string()));
            }
            self.batches.lock().unwrap().push(changes.to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingProgress {
        batches: Mutex<Vec<(usize, usize)>>,
    }

    impl Progress for CountingProgress {
        fn batch_submitted(&self, batch: usize, size: usize) {
            self.batches.lock().unwrap().push((batch, size));
        }
    }

    fn job(types: &[&str]) -> SyncJob {
        SyncJob {
            domain: "example.com".to_string(),
            dnsserver: "192.0.2.53".to_string(),
            record_types: RecordTypeFilter::parse(types.iter().copied()).unwrap(),
            hosted_zone: "example.com.".to_string(),
        }
    }

    fn wide_snapshot(owners: usize) -> ZoneSnapshot {
        let mut snapshot = ZoneSnapshot::default();
        for i in 0..owners {
            snapshot.push(
                &format!("host{:03}", i),
                RecordKind::A,
                300,
                format!("192.0.2.{}", i % 250),
            );
        }
        snapshot
    }

    #[tokio::test]
    async fn test_end_to_end_single_batch() {
        let mut snapshot = ZoneSnapshot::default();
        snapshot.push("www", RecordKind::A, 300, "1.2.3.4".to_string());
        snapshot.push("www", RecordKind::A, 300, "1.2.3.5".to_string());
        snapshot.push("@", RecordKind::A, 300, "203.0.113.1".to_string());

        let fetcher = MockFetcher { snapshot };
        let provider = MockProvider::default();
        let syncer = Syncer::new(&fetcher, &provider, SyncOptions::default());

        let report = syncer.run(&job(&["A"]), &NoProgress).await.unwrap();
        assert_eq!(
            report,
            SyncReport {
                record_sets: 1,
                batches: 1
            }
        );

        let submitted = provider.submitted();
        assert_eq!(
            submitted,
            vec![ChangeDescriptor {
                name: "www.example.com.".to_string(),
                kind: RecordKind::A,
                ttl: 300,
                values: vec!["1.2.3.4".to_string(), "1.2.3.5".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn test_batch_partitioning() {
        let fetcher = MockFetcher {
            snapshot: wide_snapshot(200),
        };
        let provider = MockProvider::default();
        let syncer = Syncer::new(&fetcher, &provider, SyncOptions::default());
        let progress = CountingProgress::default();

        let report = syncer.run(&job(&["A"]), &progress).await.unwrap();
        assert_eq!(report.record_sets, 200);
        assert_eq!(report.batches, 3);
        assert_eq!(provider.batch_sizes(), vec![98, 98, 4]);
        assert_eq!(
            *progress.batches.lock().unwrap(),
            vec![(1, 98), (2, 98), (3, 4)]
        );

        // Concatenating the batches reproduces the change sequence.
        let names: Vec<String> = provider.submitted().into_iter().map(|c| c.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 200);
        assert_eq!(names[0], "host000.example.com.");
        assert_eq!(names[199], "host199.example.com.");
    }

    #[tokio::test]
    async fn test_failed_batch_stops_the_run() {
        let fetcher = MockFetcher {
            snapshot: wide_snapshot(200),
        };
        let provider = MockProvider::failing_on(2);
        let syncer = Syncer::new(&fetcher, &provider, SyncOptions::default());

        let err = syncer.run(&job(&["A"]), &NoProgress).await.unwrap_err();
        match err {
            Error::Submission { batch, source } => {
                assert_eq!(batch, 2);
                assert!(matches!(*source, Error::Api(_)));
            }
            other => panic!("expected Submission, got {:?}", other),
        }
        // The second batch was rejected and the third never attempted.
        assert_eq!(provider.attempts(), 2);
        assert_eq!(provider.batch_sizes(), vec![98]);
    }

    #[tokio::test]
    async fn test_small_batch_size_override() {
        let fetcher = MockFetcher {
            snapshot: wide_snapshot(10),
        };
        let provider = MockProvider::default();
        let opts = SyncOptions { max_batch_size: 3 };
        let syncer = Syncer::new(&fetcher, &provider, opts);

        let report = syncer.run(&job(&["A"]), &NoProgress).await.unwrap();
        assert_eq!(report.batches, 4);
        assert_eq!(provider.batch_sizes(), vec![3, 3, 3, 1]);
    }

    #[tokio::test]
    async fn test_empty_zone_submits_nothing() {
        let fetcher = MockFetcher {
            snapshot: ZoneSnapshot::default(),
        };
        let provider = MockProvider::default();
        let syncer = Syncer::new(&fetcher, &provider, SyncOptions::default());

        let err = syncer.run(&job(&["A"]), &NoProgress).await.unwrap_err();
        assert!(matches!(err, Error::EmptyZone(_)));
        assert_eq!(provider.attempts(), 0);
    }

    #[tokio::test]
    async fn test_no_matching_records_submits_nothing() {
        let mut snapshot = ZoneSnapshot::default();
        snapshot.push("@", RecordKind::NS, 3600, "ns1.example.com.".to_string());
        snapshot.push("sub", RecordKind::NS, 3600, "ns2.example.com.".to_string());

        let fetcher = MockFetcher { snapshot };
        let provider = MockProvider::default();
        let syncer = Syncer::new(&fetcher, &provider, SyncOptions::default());

        let err = syncer.run(&job(&["A"]), &NoProgress).await.unwrap_err();
        assert!(matches!(err, Error::NoMatchingRecords(_)));
        assert_eq!(provider.attempts(), 0);
    }
}
