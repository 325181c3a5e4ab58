//! Broadcaster monitor.
//!
//! The [`Monitor`] owns the lifecycle of the discovery client, the polling
//! loop and everything shown on screen. It is cheap to clone; all clones share
//! one state.
//!
//! # Lifecycle
//!
//! `Stopped → Starting → Running → Stopping → Stopped`. A failed start goes
//! back to `Stopped` through [`Monitor::stop`].
//!
//! # Failure handling
//!
//! Discovery client failures never escape the monitor. They become error lines
//! in the log pane, and for start failures a transition to `Stopped`. The
//! broadcaster table keeps showing the last successful scan.
//!
//! # Concurrency
//!
//! The status callback can fire at any time from the discovery client, so the
//! state sits behind a mutex that is never held across an await. Each start
//! and stop bumps a run epoch; a poll remembers the epoch it started in and
//! drops its result if the epoch changed while it was waiting on the client.

use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::{AppConfig, Chain};
use crate::discovery::{
    BroadcasterDebugger, BroadcasterDiscovery, BroadcasterOptions, BroadcasterRecord,
    StatusCallback,
};
use crate::history::{LogLevel, LogLine, LogRing};
use crate::session_log::SessionLog;
use crate::ui::{self, FrameSink};

/// Connection status shown before the discovery client reports one.
pub const INITIAL_STATUS: &str = "Initializing";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// Everything the monitor renders.
#[derive(Debug, Clone)]
pub struct MonitorState {
    pub phase: Phase,
    pub connection_status: String,
    pub mesh_peer_count: u64,
    pub last_scan_time: Option<DateTime<Local>>,
    pub logs: LogRing,
    /// Result of the last successful poll, replaced wholesale.
    pub broadcasters: Vec<BroadcasterRecord>,
    epoch: u64,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self {
            phase: Phase::Stopped,
            connection_status: INITIAL_STATUS.to_string(),
            mesh_peer_count: 0,
            last_scan_time: None,
            logs: LogRing::default(),
            broadcasters: Vec::new(),
            epoch: 0,
        }
    }
}

impl MonitorState {
    /// True between `start()` and `stop()`.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Starting | Phase::Running)
    }
}

struct Inner<D> {
    config: AppConfig,
    discovery: Arc<D>,
    state: Mutex<MonitorState>,
    sink: Mutex<Box<dyn FrameSink>>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
    session_log: Option<SessionLog>,
}

/// Polls a discovery client and keeps the terminal view current.
pub struct Monitor<D> {
    inner: Arc<Inner<D>>,
}

impl<D> Clone for Monitor<D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<D: BroadcasterDiscovery> Monitor<D> {
    pub fn new(
        config: AppConfig,
        discovery: Arc<D>,
        sink: Box<dyn FrameSink>,
        session_log: Option<SessionLog>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                discovery,
                state: Mutex::new(MonitorState::default()),
                sink: Mutex::new(sink),
                poll_task: Mutex::new(None),
                session_log,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MonitorState> {
        lock(&self.inner.state)
    }

    #[cfg(test)]
    fn snapshot(&self) -> MonitorState {
        self.state().clone()
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.state().is_running()
    }

    #[cfg(test)]
    fn has_poll_task(&self) -> bool {
        lock(&self.inner.poll_task)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn is_current(&self, epoch: u64) -> bool {
        let state = self.state();
        state.epoch == epoch && state.is_running()
    }

    /// Starts the discovery client, polls once and schedules polling.
    ///
    /// Does nothing if the monitor is already running. Never fails: a client
    /// that cannot start is reported in the log pane and the monitor stops.
    pub async fn start(&self) {
        let epoch = {
            let mut state = self.state();
            if state.is_running() {
                log::debug!("Monitor already running, ignoring start");
                return;
            }
            state.phase = Phase::Starting;
            state.epoch += 1;
            state.epoch
        };

        let config = &self.inner.config;
        let chain = config.chain;

        if let Some(session_log) = &self.inner.session_log {
            session_log.begin_session();
        }

        log::info!(
            "Starting monitor chain_id={} refresh_ms={}",
            chain.id,
            config.refresh_interval_ms
        );
        self.add_log(
            &format!(
                "Initializing broadcaster discovery client for Chain ID {}...",
                chain.id
            ),
            LogLevel::Info,
        );

        if config.trusted_fee_signer.is_none() {
            self.add_log(
                "Trusted fee signer disabled: broadcaster fees are not checked against a baseline",
                LogLevel::Warn,
            );
        }

        let options = BroadcasterOptions {
            trusted_fee_signer: config.trusted_fee_signer.clone(),
            use_dns_discovery: true,
            pub_sub_topic: config.pubsub_topic().to_string(),
        };
        match serde_json::to_string(&options) {
            Ok(json) => self.add_log(&format!("Discovery options: {json}"), LogLevel::Info),
            Err(e) => log::warn!("Failed to serialize discovery options: {}", e),
        }

        self.render();

        let result = self
            .inner
            .discovery
            .start(chain, options, self.status_callback(), self.debugger())
            .await;

        match result {
            Ok(()) => {
                let superseded = {
                    let mut state = self.state();
                    if state.epoch != epoch || state.phase != Phase::Starting {
                        true
                    } else {
                        state.phase = Phase::Running;
                        false
                    }
                };

                if superseded {
                    // stop() already ran against a client that was still starting.
                    log::info!("Monitor stopped while the discovery client was starting");
                    if let Err(e) = self.inner.discovery.stop().await {
                        log::warn!("Discovery client failed to stop: {}", e);
                        self.add_log(
                            &format!("Failed to stop discovery client: {e}"),
                            LogLevel::Warn,
                        );
                    }
                    return;
                }

                self.add_log("Discovery client started successfully.", LogLevel::Success);
                self.render();

                self.poll().await;
                self.schedule_polling(epoch);
            }
            Err(e) => {
                log::error!("Discovery client failed to start chain_id={}: {}", chain.id, e);
                if !self.is_current(epoch) {
                    return;
                }
                self.add_log(
                    &format!("Failed to start discovery client: {e}"),
                    LogLevel::Error,
                );
                self.render();
                self.stop().await;
            }
        }
    }

    /// Stops polling and the discovery client. Does nothing when stopped.
    pub async fn stop(&self) {
        {
            let mut state = self.state();
            if matches!(state.phase, Phase::Stopped | Phase::Stopping) {
                return;
            }
            state.phase = Phase::Stopping;
            state.epoch += 1;
        }

        if let Some(handle) = lock(&self.inner.poll_task).take() {
            handle.abort();
        }

        if let Err(e) = self.inner.discovery.stop().await {
            log::warn!("Discovery client failed to stop: {}", e);
            self.add_log(
                &format!("Failed to stop discovery client: {e}"),
                LogLevel::Warn,
            );
        }

        self.state().phase = Phase::Stopped;
        log::info!("Monitor stopped chain_id={}", self.inner.config.chain.id);
        self.add_log("Monitor stopped.", LogLevel::Info);
        self.render();
    }

    /// Spawns the repeating poll task for run `epoch`, unless that run has
    /// already ended.
    fn schedule_polling(&self, epoch: u64) {
        let mut poll_task = lock(&self.inner.poll_task);
        if !self.is_current(epoch) {
            return;
        }
        if let Some(previous) = poll_task.take() {
            previous.abort();
        }

        let period = Duration::from_millis(self.inner.config.refresh_interval_ms);
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let monitor = self.clone();
        *poll_task = Some(tokio::spawn(async move {
            loop {
                ticker.tick().await;
                monitor.poll().await;
            }
        }));
    }

    /// Queries the discovery client once and re-renders.
    pub(crate) async fn poll(&self) {
        let epoch = {
            let state = self.state();
            if !state.is_running() {
                return;
            }
            state.epoch
        };

        let chain = self.inner.config.chain;
        let result = self
            .inner
            .discovery
            .find_all_broadcasters_for_chain(chain, false)
            .await;

        match result {
            Ok(broadcasters) => {
                let mesh_peer_count = self.inner.discovery.get_mesh_peer_count();
                let count = broadcasters.len();
                {
                    let mut state = self.state();
                    if state.epoch != epoch || !state.is_running() {
                        log::debug!("Discarding poll result from a stopped run chain_id={}", chain.id);
                        return;
                    }
                    let now = Local::now();
                    state.last_scan_time = Some(state.last_scan_time.map_or(now, |last| last.max(now)));
                    state.broadcasters = broadcasters;
                    state.mesh_peer_count = mesh_peer_count.unwrap_or_else(|e| {
                        log::debug!("Mesh peer count unavailable: {}", e);
                        0
                    });
                }
                log::info!("Poll complete chain_id={} broadcasters={}", chain.id, count);
            }
            Err(e) => {
                log::error!("Poll failed chain_id={}: {}", chain.id, e);
                if !self.is_current(epoch) {
                    return;
                }
                self.add_log(&format!("Scan failed: {e}"), LogLevel::Error);
            }
        }

        self.render();
    }

    /// Records a connection status reported by the discovery client.
    pub fn on_status_update(&self, status: &str) {
        log::info!("Connection status changed status={}", status);
        self.state().connection_status = status.to_string();
        self.add_log(&format!("Connection status update: {status}"), LogLevel::Info);
        self.render();
    }

    /// Appends a line to the log pane, evicting the oldest line when full.
    pub fn add_log(&self, message: &str, level: LogLevel) {
        let text = ui::format_log_line(message, level, &Local::now());
        self.state().logs.push(LogLine { level, text });

        if let Some(session_log) = &self.inner.session_log {
            session_log.append(level, message);
        }
    }

    /// Draws the current state.
    pub fn render(&self) {
        let frame = ui::render_frame(&self.state(), &self.inner.config);
        lock(&self.inner.sink).draw(&frame);
    }

    fn status_callback(&self) -> StatusCallback {
        let inner = Arc::downgrade(&self.inner);
        Arc::new(move |_chain: Chain, status: String| {
            if let Some(inner) = inner.upgrade() {
                Monitor { inner }.on_status_update(&status);
            }
        })
    }

    fn debugger(&self) -> Option<Arc<dyn BroadcasterDebugger>> {
        if !self.inner.config.debug {
            return None;
        }
        Some(Arc::new(LogPaneDebugger {
            inner: Arc::downgrade(&self.inner),
        }))
    }
}

/// Routes discovery client diagnostics into the log pane.
struct LogPaneDebugger<D> {
    inner: Weak<Inner<D>>,
}

impl<D: BroadcasterDiscovery> BroadcasterDebugger for LogPaneDebugger<D> {
    fn log(&self, message: &str) {
        if let Some(inner) = self.inner.upgrade() {
            Monitor { inner }.add_log(&format!("[Discovery] {message}"), LogLevel::Info);
        }
    }

    fn error(&self, message: &str) {
        if let Some(inner) = self.inner.upgrade() {
            Monitor { inner }.add_log(&format!("[Discovery Error] {message}"), LogLevel::Error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{DiscoveryError, TokenFee};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::{Notify, Semaphore};

    fn record(id: u8) -> BroadcasterRecord {
        BroadcasterRecord {
            railgun_address: format!("0zk1qybroadcaster{id:0>46}"),
            token_address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            token_fee: TokenFee {
                fee_per_unit_gas: "150000".to_string(),
                expiration: 1_700_000_000_000,
                reliability: 0.9,
                available_wallets: 2,
                relay_adapt: "0x4025ee6512dbbda97049bcf5aa5d38c54af6be8a".to_string(),
            },
        }
    }

    #[derive(Default)]
    struct FakeDiscovery {
        records: Mutex<Vec<BroadcasterRecord>>,
        fail_start: bool,
        fail_stop: bool,
        fail_find: AtomicBool,
        fail_peer_count: bool,
        /// When set, each query waits for a permit before answering.
        gate: Option<Semaphore>,
        entered: Notify,
        /// When set, start waits for a permit before completing.
        start_gate: Option<Semaphore>,
        start_entered: Notify,
        events: Mutex<Vec<&'static str>>,
        callback: Mutex<Option<StatusCallback>>,
        start_calls: AtomicUsize,
        stop_calls: AtomicUsize,
        find_calls: AtomicUsize,
    }

    impl FakeDiscovery {
        fn with_records(records: Vec<BroadcasterRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Self::default()
            }
        }

        fn find_calls(&self) -> usize {
            self.find_calls.load(Ordering::SeqCst)
        }

        fn fire_status(&self, status: &str) {
            let callback = lock(&self.callback).clone();
            if let Some(callback) = callback {
                callback(Chain { chain_type: 0, id: 1 }, status.to_string());
            }
        }
    }

    #[async_trait]
    impl BroadcasterDiscovery for FakeDiscovery {
        async fn start(
            &self,
            chain: Chain,
            _options: BroadcasterOptions,
            on_status_change: StatusCallback,
            debugger: Option<Arc<dyn BroadcasterDebugger>>,
        ) -> Result<(), DiscoveryError> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            self.start_entered.notify_one();
            if let Some(gate) = &self.start_gate {
                gate.acquire().await.map_err(|e| e.to_string())?.forget();
            }
            if let Some(debugger) = debugger {
                debugger.log("dialing peers");
            }
            if self.fail_start {
                return Err("no peers reachable".to_string());
            }
            lock(&self.events).push("start-completed");
            *lock(&self.callback) = Some(on_status_change.clone());
            on_status_change(chain, "Connected".to_string());
            Ok(())
        }

        async fn stop(&self) -> Result<(), DiscoveryError> {
            self.stop_calls.fetch_add(1, Ordering::SeqCst);
            lock(&self.events).push("stop");
            if self.fail_stop {
                return Err("socket already closed".to_string());
            }
            Ok(())
        }

        async fn find_all_broadcasters_for_chain(
            &self,
            _chain: Chain,
            use_relay_adapt: bool,
        ) -> Result<Vec<BroadcasterRecord>, DiscoveryError> {
            assert!(!use_relay_adapt);
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            if let Some(gate) = &self.gate {
                gate.acquire().await.map_err(|e| e.to_string())?.forget();
            }
            if self.fail_find.load(Ordering::SeqCst) {
                return Err("query timed out".to_string());
            }
            Ok(lock(&self.records).clone())
        }

        fn get_mesh_peer_count(&self) -> Result<u64, DiscoveryError> {
            if self.fail_peer_count {
                return Err("mesh not ready".to_string());
            }
            Ok(7)
        }
    }

    #[derive(Clone, Default)]
    struct CaptureSink {
        frames: Arc<Mutex<Vec<String>>>,
    }

    impl CaptureSink {
        fn last(&self) -> String {
            lock(&self.frames).last().cloned().unwrap_or_default()
        }
    }

    impl FrameSink for CaptureSink {
        fn draw(&mut self, frame: &str) {
            lock(&self.frames).push(frame.to_string());
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            refresh_interval_ms: 1000,
            trusted_fee_signer: Some("0xsignerkey".to_string()),
            ..AppConfig::default()
        }
    }

    fn monitor_with(
        fake: Arc<FakeDiscovery>,
        config: AppConfig,
    ) -> (Monitor<FakeDiscovery>, CaptureSink) {
        let sink = CaptureSink::default();
        let monitor = Monitor::new(config, fake, Box::new(sink.clone()), None);
        (monitor, sink)
    }

    fn log_texts(state: &MonitorState) -> Vec<String> {
        state.logs.iter().map(|line| line.text.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_renders_broadcasters_and_interrupt_stops() {
        let fake = Arc::new(FakeDiscovery::with_records(vec![record(1), record(2)]));
        let (monitor, sink) = monitor_with(fake.clone(), config());

        monitor.start().await;

        let state = monitor.snapshot();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.connection_status, "Connected");
        assert_eq!(state.broadcasters.len(), 2);
        assert_eq!(state.mesh_peer_count, 7);
        assert!(state.last_scan_time.is_some());
        assert!(monitor.has_poll_task());

        let frame = sink.last();
        let rows = frame.lines().filter(|line| line.contains("0zk1qybroa")).count();
        assert_eq!(rows, 2);
        assert!(frame.contains("Status:"));
        assert!(frame.contains("Connected"));
        assert!(frame.contains("0.15 USDC"));

        monitor.stop().await;

        assert!(!monitor.is_running());
        assert!(!monitor.has_poll_task());
        assert_eq!(fake.stop_calls.load(Ordering::SeqCst), 1);
        assert!(sink.last().contains("Monitor stopped."));

        let calls = fake.find_calls();
        time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(fake.find_calls(), calls);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_schedules_one_poll_loop() {
        let fake = Arc::new(FakeDiscovery::with_records(vec![record(1)]));
        let (monitor, _sink) = monitor_with(fake.clone(), config());

        monitor.start().await;
        monitor.start().await;
        assert_eq!(fake.start_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fake.find_calls(), 1);

        time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(fake.find_calls(), 3);

        monitor.stop().await;
    }

    #[tokio::test]
    async fn test_stop_when_not_running_is_noop() {
        let fake = Arc::new(FakeDiscovery::default());
        let (monitor, sink) = monitor_with(fake.clone(), config());

        monitor.stop().await;
        monitor.stop().await;

        assert_eq!(fake.stop_calls.load(Ordering::SeqCst), 0);
        assert!(monitor.snapshot().logs.is_empty());
        assert!(lock(&sink.frames).is_empty());
    }

    #[tokio::test]
    async fn test_start_failure_is_reported_and_stops() {
        let fake = Arc::new(FakeDiscovery {
            fail_start: true,
            ..FakeDiscovery::default()
        });
        let (monitor, sink) = monitor_with(fake.clone(), config());

        monitor.start().await;

        let state = monitor.snapshot();
        assert_eq!(state.phase, Phase::Stopped);
        assert!(!monitor.has_poll_task());
        assert_eq!(fake.find_calls(), 0);
        assert_eq!(fake.stop_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.connection_status, INITIAL_STATUS);

        let logs = log_texts(&state);
        assert!(logs.iter().any(|l| l.contains("Failed to start discovery client: no peers reachable")));
        assert!(logs.last().is_some_and(|l| l.contains("Monitor stopped.")));
        assert!(sink.last().contains("No broadcasters found yet."));
    }

    #[tokio::test]
    async fn test_stop_failure_is_logged() {
        let fake = Arc::new(FakeDiscovery {
            fail_stop: true,
            ..FakeDiscovery::default()
        });
        let (monitor, _sink) = monitor_with(fake.clone(), config());

        monitor.start().await;
        monitor.stop().await;

        let state = monitor.snapshot();
        assert_eq!(state.phase, Phase::Stopped);
        let logs = log_texts(&state);
        assert!(logs.iter().any(|l| l.contains("Failed to stop discovery client")));
    }

    #[tokio::test]
    async fn test_failed_poll_keeps_previous_results() {
        let fake = Arc::new(FakeDiscovery::with_records(vec![record(1), record(2)]));
        let (monitor, sink) = monitor_with(fake.clone(), config());

        monitor.start().await;
        let before = monitor.snapshot();

        fake.fail_find.store(true, Ordering::SeqCst);
        monitor.poll().await;

        let after = monitor.snapshot();
        assert_eq!(after.broadcasters, before.broadcasters);
        assert_eq!(after.last_scan_time, before.last_scan_time);

        let last = after.logs.last().unwrap();
        assert_eq!(last.level, LogLevel::Error);
        assert!(last.text.contains("Scan failed: query timed out"));
        assert!(sink.last().contains("0.15 USDC"));

        monitor.stop().await;
    }

    #[tokio::test]
    async fn test_peer_count_failure_reports_zero() {
        let fake = Arc::new(FakeDiscovery {
            records: Mutex::new(vec![record(1)]),
            fail_peer_count: true,
            ..FakeDiscovery::default()
        });
        let (monitor, _sink) = monitor_with(fake.clone(), config());

        monitor.start().await;

        let state = monitor.snapshot();
        assert_eq!(state.mesh_peer_count, 0);
        assert_eq!(state.broadcasters.len(), 1);
        monitor.stop().await;
    }

    #[tokio::test]
    async fn test_poll_in_flight_across_stop_is_discarded() {
        let fake = Arc::new(FakeDiscovery {
            records: Mutex::new(vec![record(1)]),
            gate: Some(Semaphore::new(0)),
            ..FakeDiscovery::default()
        });
        let (monitor, _sink) = monitor_with(fake.clone(), config());

        let runner = monitor.clone();
        let task = tokio::spawn(async move { runner.start().await });

        fake.entered.notified().await;
        monitor.stop().await;
        if let Some(gate) = &fake.gate {
            gate.add_permits(1);
        }
        task.await.unwrap();

        let state = monitor.snapshot();
        assert_eq!(state.phase, Phase::Stopped);
        assert!(state.broadcasters.is_empty());
        assert!(state.last_scan_time.is_none());
        assert!(!monitor.has_poll_task());
    }

    #[tokio::test]
    async fn test_client_started_after_stop_is_released() {
        let fake = Arc::new(FakeDiscovery {
            records: Mutex::new(vec![record(1)]),
            start_gate: Some(Semaphore::new(0)),
            ..FakeDiscovery::default()
        });
        let (monitor, _sink) = monitor_with(fake.clone(), config());

        let runner = monitor.clone();
        let task = tokio::spawn(async move { runner.start().await });

        fake.start_entered.notified().await;
        monitor.stop().await;
        if let Some(gate) = &fake.start_gate {
            gate.add_permits(1);
        }
        task.await.unwrap();

        assert_eq!(*lock(&fake.events), vec!["stop", "start-completed", "stop"]);
        assert_eq!(fake.find_calls(), 0);
        assert!(!monitor.is_running());
        assert!(!monitor.has_poll_task());
        assert_eq!(monitor.snapshot().phase, Phase::Stopped);
    }

    #[tokio::test]
    async fn test_poll_is_noop_when_stopped() {
        let fake = Arc::new(FakeDiscovery::with_records(vec![record(1)]));
        let (monitor, sink) = monitor_with(fake.clone(), config());

        monitor.poll().await;

        assert_eq!(fake.find_calls(), 0);
        assert!(lock(&sink.frames).is_empty());
    }

    #[tokio::test]
    async fn test_status_update_after_stop_is_benign() {
        let fake = Arc::new(FakeDiscovery::with_records(vec![record(1)]));
        let (monitor, sink) = monitor_with(fake.clone(), config());

        monitor.start().await;
        monitor.stop().await;
        fake.fire_status("Disconnected");

        let state = monitor.snapshot();
        assert_eq!(state.connection_status, "Disconnected");
        assert_eq!(state.phase, Phase::Stopped);
        assert!(sink.last().contains("Connection status update: Disconnected"));
    }

    #[tokio::test]
    async fn test_log_pane_is_bounded() {
        let fake = Arc::new(FakeDiscovery::default());
        let (monitor, _sink) = monitor_with(fake, config());

        for n in 0..20 {
            monitor.add_log(&format!("message {n}"), LogLevel::Info);
        }

        let logs = log_texts(&monitor.snapshot());
        assert_eq!(logs.len(), 8);
        assert!(logs[0].ends_with("message 12"));
        assert!(logs[7].ends_with("message 19"));
    }

    #[tokio::test]
    async fn test_debug_lines_reach_log_pane() {
        let fake = Arc::new(FakeDiscovery::default());
        let config = AppConfig {
            debug: true,
            ..config()
        };
        let (monitor, _sink) = monitor_with(fake, config);

        monitor.start().await;

        let logs = log_texts(&monitor.snapshot());
        assert!(logs.iter().any(|l| l.ends_with("[Discovery] dialing peers")));
        monitor.stop().await;
    }

    #[tokio::test]
    async fn test_disabled_signer_is_flagged() {
        let fake = Arc::new(FakeDiscovery::default());
        let config = AppConfig {
            trusted_fee_signer: None,
            ..config()
        };
        let (monitor, sink) = monitor_with(fake, config);

        monitor.start().await;

        let state = monitor.snapshot();
        assert!(state
            .logs
            .iter()
            .any(|l| l.level == LogLevel::Warn && l.text.contains("Trusted fee signer disabled")));
        assert!(sink.last().contains("Disabled (No fee protection)"));
        monitor.stop().await;
    }
}
