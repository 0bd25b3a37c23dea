//! The monitor loop.
//!
//! One cycle runs acquire → parse → detect → diff → format → dispatch →
//! persist. Cycles never overlap: the loop sleeps a fixed interval
//! between them and honors the stop signal at the sleep boundary.
//! `run_cycle` is a single tick, testable without real time.

use std::time::Instant;

use tokio::sync::watch;
use tokio::time::{interval, Duration};
use uuid::Uuid;

use vigil_core::types::Snapshot;
use vigil_core::{detect, diff, parse};

use crate::acquire::NeighborSource;
use crate::config::MonitorConfig;
use crate::error::{MonitorError, Result};
use crate::notify::Notifier;
use crate::persist::SnapshotStore;
use crate::report;

/// Counts from one completed scan cycle.
#[derive(Debug, Default)]
pub struct CycleSummary {
    pub entry_count: usize,
    pub new_count: usize,
    pub suspicious_count: usize,
}

/// The monitor: configuration plus its three collaborators.
pub struct Monitor<S, N, P> {
    config: MonitorConfig,
    source: S,
    notifier: N,
    store: P,
}

impl<S, N, P> Monitor<S, N, P>
where
    S: NeighborSource,
    N: Notifier,
    P: SnapshotStore,
{
    pub fn new(config: MonitorConfig, source: S, notifier: N, store: P) -> Self {
        Self {
            config,
            source,
            notifier,
            store,
        }
    }

    /// Run cycles at the configured interval until `shutdown` flips to
    /// true (or its sender is dropped). The first cycle runs immediately.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let mut ticker = interval(Duration::from_secs(self.config.interval_secs));

        tracing::info!(
            subnet = %self.config.subnet_prefix,
            interval_secs = self.config.interval_secs,
            "Monitor started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_cycle().await {
                        tracing::error!(error = %e, "Scan cycle failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Shutdown requested, stopping monitor");
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Execute one full cycle.
    ///
    /// An acquisition failure (error or empty output) reports a retrieval
    /// failure and skips everything after it, leaving the persisted
    /// snapshot untouched. Stale-but-valid history beats no history.
    pub async fn run_cycle(&self) -> Result<CycleSummary> {
        let cycle_id = Uuid::new_v4();
        let start = Instant::now();
        tracing::info!(
            cycle_id = %cycle_id,
            subnet = %self.config.subnet_prefix,
            "Scan cycle started"
        );

        let raw = match self.source.neighbor_table().await {
            Ok(raw) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                let e = MonitorError::Acquisition("empty neighbor table output".to_string());
                self.dispatch(&report::retrieval_failure_message(
                    &self.config.subnet_prefix,
                    "empty neighbor table output",
                ))
                .await;
                return Err(e);
            }
            Err(e) => {
                self.dispatch(&report::retrieval_failure_message(
                    &self.config.subnet_prefix,
                    &e.to_string(),
                ))
                .await;
                return Err(e);
            }
        };

        let entries = parse::parse_table(&raw, &self.config.subnet_prefix);
        let suspicious = detect::find_suspicious(&entries);
        let previous = self.store.load();
        let new = diff::new_entries(&entries, &previous.entries);

        let mut messages: Vec<String> = Vec::new();
        for entry in &new {
            messages.push(report::new_device_message(entry));
        }
        for group in &suspicious {
            messages.push(report::suspicious_group_message(group));
        }
        if messages.is_empty() && self.config.heartbeat {
            messages.push(report::status_normal_message(
                &self.config.subnet_prefix,
                &entries,
            ));
        }

        for message in &messages {
            self.dispatch(message).await;
        }

        let summary = CycleSummary {
            entry_count: entries.len(),
            new_count: new.len(),
            suspicious_count: suspicious.len(),
        };

        // Persist unconditionally once the cycle gets this far, even on a
        // quiet cycle: the next diff needs the full current view.
        self.store.save(&Snapshot::new(entries))?;

        tracing::info!(
            cycle_id = %cycle_id,
            entries = summary.entry_count,
            new = summary.new_count,
            suspicious = summary.suspicious_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Scan cycle complete"
        );

        Ok(summary)
    }

    /// Best-effort delivery: failures are logged, never retried within
    /// the cycle, and never block persistence.
    async fn dispatch(&self, message: &str) {
        if let Err(e) = self.notifier.deliver(message).await {
            tracing::warn!(error = %e, "Notification delivery failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use vigil_core::types::{Entry, EntryKind};

    enum FakeSource {
        Text(String),
        Failure(String),
    }

    impl NeighborSource for FakeSource {
        async fn neighbor_table(&self) -> Result<String> {
            match self {
                Self::Text(raw) => Ok(raw.clone()),
                Self::Failure(e) => Err(MonitorError::Acquisition(e.clone())),
            }
        }
    }

    #[derive(Clone)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn messages(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        async fn deliver(&self, message: &str) -> Result<()> {
            self.sent.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    #[derive(Clone)]
    struct MemoryStore {
        previous: Vec<Entry>,
        saved: Arc<Mutex<Option<Snapshot>>>,
    }

    impl MemoryStore {
        fn new(previous: Vec<Entry>) -> Self {
            Self {
                previous,
                saved: Arc::new(Mutex::new(None)),
            }
        }

        fn saved(&self) -> Option<Snapshot> {
            self.saved.lock().unwrap().clone()
        }
    }

    impl SnapshotStore for MemoryStore {
        fn load(&self) -> Snapshot {
            Snapshot::new(self.previous.clone())
        }

        fn save(&self, snapshot: &Snapshot) -> Result<()> {
            *self.saved.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }
    }

    fn config() -> MonitorConfig {
        MonitorConfig {
            subnet_prefix: "10.0.0.".to_string(),
            ..MonitorConfig::default()
        }
    }

    fn monitor(
        source: FakeSource,
        previous: Vec<Entry>,
        cfg: MonitorConfig,
    ) -> (Monitor<FakeSource, RecordingNotifier, MemoryStore>, RecordingNotifier, MemoryStore)
    {
        let notifier = RecordingNotifier::new();
        let store = MemoryStore::new(previous);
        (
            Monitor::new(cfg, source, notifier.clone(), store.clone()),
            notifier,
            store,
        )
    }

    #[tokio::test]
    async fn test_quiet_cycle_sends_heartbeat_and_persists() {
        let raw = "10.0.0.5 aa:bb:cc:dd:ee:ff dynamic\n";
        let previous = vec![Entry::new("10.0.0.5", "aa:bb:cc:dd:ee:ff", EntryKind::Dynamic)];
        let (monitor, notifier, store) =
            monitor(FakeSource::Text(raw.to_string()), previous, config());

        let summary = monitor.run_cycle().await.unwrap();
        assert_eq!(summary.entry_count, 1);
        assert_eq!(summary.new_count, 0);
        assert_eq!(summary.suspicious_count, 0);

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Status normal"));

        assert_eq!(store.saved().unwrap().entries.len(), 1);
    }

    #[tokio::test]
    async fn test_heartbeat_can_be_disabled() {
        let raw = "10.0.0.5 aa:bb:cc:dd:ee:ff dynamic\n";
        let previous = vec![Entry::new("10.0.0.5", "aa:bb:cc:dd:ee:ff", EntryKind::Dynamic)];
        let mut cfg = config();
        cfg.heartbeat = false;
        let (monitor, notifier, store) =
            monitor(FakeSource::Text(raw.to_string()), previous, cfg);

        monitor.run_cycle().await.unwrap();
        assert!(notifier.messages().is_empty());
        // Quiet cycles still persist.
        assert!(store.saved().is_some());
    }

    #[tokio::test]
    async fn test_new_device_and_spoof_alerts() {
        let raw = "\
10.0.0.1 aa:aa:aa:aa:aa:aa dynamic
10.0.0.50 aa:aa:aa:aa:aa:aa dynamic
10.0.0.9 11:22:33:44:55:66 dynamic
";
        let previous = vec![Entry::new("10.0.0.1", "aa:aa:aa:aa:aa:aa", EntryKind::Dynamic)];
        let (monitor, notifier, _store) =
            monitor(FakeSource::Text(raw.to_string()), previous, config());

        let summary = monitor.run_cycle().await.unwrap();
        assert_eq!(summary.new_count, 1);
        assert_eq!(summary.suspicious_count, 1);

        let messages = notifier.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("New device"));
        assert!(messages[0].contains("10.0.0.9"));
        assert!(messages[1].contains("gateway `10.0.0.1`"));
    }

    #[tokio::test]
    async fn test_acquisition_failure_skips_cycle_and_keeps_snapshot() {
        let (monitor, notifier, store) = monitor(
            FakeSource::Failure("arp: not found".to_string()),
            vec![Entry::new("10.0.0.5", "aa:bb:cc:dd:ee:ff", EntryKind::Dynamic)],
            config(),
        );

        let err = monitor.run_cycle().await.unwrap_err();
        assert!(matches!(err, MonitorError::Acquisition(_)));

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Could not retrieve"));

        // Persisted snapshot untouched on a failed cycle.
        assert!(store.saved().is_none());
    }

    #[tokio::test]
    async fn test_empty_output_is_a_retrieval_failure() {
        let (monitor, notifier, store) =
            monitor(FakeSource::Text("   \n".to_string()), Vec::new(), config());

        let err = monitor.run_cycle().await.unwrap_err();
        assert!(matches!(err, MonitorError::Acquisition(_)));
        assert!(notifier.messages()[0].contains("empty neighbor table output"));
        assert!(store.saved().is_none());
    }

    #[tokio::test]
    async fn test_noise_only_output_reports_no_entries_and_persists_empty() {
        // Non-empty acquisition output that parses to zero entries is a
        // valid state, distinct from an acquisition failure.
        let raw = "Internet Address      Physical Address      Type\n\n";
        let (monitor, notifier, store) =
            monitor(FakeSource::Text(raw.to_string()), Vec::new(), config());

        let summary = monitor.run_cycle().await.unwrap();
        assert_eq!(summary.entry_count, 0);

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], "No entries found for subnet 10.0.0.");

        assert!(store.saved().unwrap().entries.is_empty());
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_signal() {
        let raw = "10.0.0.5 aa:bb:cc:dd:ee:ff dynamic\n";
        let (monitor, _notifier, _store) =
            monitor(FakeSource::Text(raw.to_string()), Vec::new(), config());

        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        // Resolves immediately instead of sleeping out the interval.
        monitor.run(rx).await.unwrap();
    }
}
