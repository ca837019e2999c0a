// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use std::sync::{Arc,
                atomic::{AtomicBool, AtomicU64, Ordering}};

use tokio::sync::Notify;
use uatrack_protocol_schema::{InlineText, Parameter};

use crate::{AnalyticsError, AnalyticsErrorType, AnalyticsResult, DEBUG_ANALYTICS_MOD,
            EventHit, ExceptionHit, ItemHit, PageViewHit, RefundHit, ScreenViewHit,
            SocialHit, StatsSnapshot, TimingHit, TrackerConfig, TrackerStats,
            TransactionHit,
            hit::request::{HitRequest, encode_pairs},
            http_client, validator};

/// The facade applications interact with: creates hits, owns the pooled HTTP
/// client, keeps the counters, and gates everything behind the config's
/// enabled flag.
///
/// Cheap to clone (all state behind one [`Arc`]); safe to share across tasks.
/// Each hit builder handed out is an independent value with no shared state,
/// so concurrent building cannot interfere across hits.
#[derive(Debug, Clone)]
pub struct Tracker {
    inner: Arc<TrackerInner>,
}

#[derive(Debug)]
struct TrackerInner {
    config: TrackerConfig,
    http_client: reqwest::Client,
    stats: TrackerStats,
    in_flight: AtomicU64,
    drained: Notify,
    closed: AtomicBool,
}

impl Tracker {
    /// Validates `config` and builds the pooled HTTP client. A bad tracking id
    /// or endpoint is fatal to the instance.
    ///
    /// # Errors
    ///
    /// [`AnalyticsErrorType::InvalidTrackingId`],
    /// [`AnalyticsErrorType::InvalidEndpointUrl`], or a transport setup
    /// failure.
    pub fn new(config: TrackerConfig) -> AnalyticsResult<Tracker> {
        config.validate()?;
        let result_client = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build();
        let http_client = match result_client {
            Ok(client) => client,
            Err(error) => {
                return AnalyticsError::new_error_result(
                    AnalyticsErrorType::TransportFailed,
                    &format!("could not build HTTP client: {error}"),
                );
            }
        };
        Ok(Tracker {
            inner: Arc::new(TrackerInner {
                config,
                http_client,
                stats: TrackerStats::default(),
                in_flight: AtomicU64::new(0),
                drained: Notify::new(),
                closed: AtomicBool::new(false),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig { &self.inner.config }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot { self.inner.stats.snapshot() }

    pub fn reset_stats(&self) { self.inner.stats.reset(); }

    /// Runs `action` only when this facade is enabled (and not closed).
    /// Callers can wire up analytics unconditionally and let a disabled
    /// facade turn the whole thing into a no-op.
    pub fn if_enabled<F: FnOnce(&Tracker)>(&self, action: F) {
        if self.inner.config.enabled && !self.inner.closed.load(Ordering::Acquire) {
            action(self);
        }
    }

    // One factory per hit type, plus the pre-populated conveniences the
    // per-type builders expose as constructors.

    #[must_use]
    pub fn event(&self) -> EventHit { EventHit::default() }

    #[must_use]
    pub fn event_with(
        &self,
        category: impl AsRef<str>,
        action: impl AsRef<str>,
    ) -> EventHit {
        EventHit::new(category, action)
    }

    #[must_use]
    pub fn page_view(&self) -> PageViewHit { PageViewHit::default() }

    #[must_use]
    pub fn page_view_with(
        &self,
        url: impl AsRef<str>,
        title: impl AsRef<str>,
    ) -> PageViewHit {
        PageViewHit::new(url, title)
    }

    #[must_use]
    pub fn screen_view(&self) -> ScreenViewHit { ScreenViewHit::default() }

    #[must_use]
    pub fn screen_view_with(
        &self,
        app_name: impl AsRef<str>,
        screen_name: impl AsRef<str>,
    ) -> ScreenViewHit {
        ScreenViewHit::new(app_name, screen_name)
    }

    #[must_use]
    pub fn social(&self) -> SocialHit { SocialHit::default() }

    #[must_use]
    pub fn social_with(
        &self,
        network: impl AsRef<str>,
        action: impl AsRef<str>,
        target: impl AsRef<str>,
    ) -> SocialHit {
        SocialHit::new(network, action, target)
    }

    #[must_use]
    pub fn timing(&self) -> TimingHit { TimingHit::default() }

    #[must_use]
    pub fn transaction(&self) -> TransactionHit { TransactionHit::default() }

    #[must_use]
    pub fn item(&self) -> ItemHit { ItemHit::default() }

    #[must_use]
    pub fn exception(&self) -> ExceptionHit { ExceptionHit::default() }

    #[must_use]
    pub fn refund_event(&self) -> RefundHit { RefundHit::default() }

    /// Send one hit and wait for the transport result. A disabled facade
    /// returns `Ok` without doing anything (no validation, no counters).
    ///
    /// # Errors
    ///
    /// Validation failure under strict policy, [`AnalyticsErrorType::TrackerClosed`],
    /// or [`AnalyticsErrorType::TransportFailed`] (also recorded in the failed
    /// counter).
    pub async fn send(&self, hit: impl Into<HitRequest>) -> AnalyticsResult<()> {
        let request = hit.into();
        if self.inner.closed.load(Ordering::Acquire) {
            return AnalyticsError::new_error_result_with_only_type(
                AnalyticsErrorType::TrackerClosed,
            );
        }
        if !self.inner.config.enabled {
            DEBUG_ANALYTICS_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "Tracker disabled; dropping hit.",
                    hit_type = %request.hit_type()
                );
            });
            return Ok(());
        }
        self.send_now(request).await
    }

    /// Fire-and-forget: spawns the send on the runtime and returns
    /// immediately. Transport failures are swallowed here and only reflected
    /// in [`Tracker::stats`]; best-effort telemetry must never break the
    /// caller's main flow. [`Tracker::flush`] waits for these.
    pub fn send_detached(&self, hit: impl Into<HitRequest>) {
        let request = hit.into();
        if self.inner.closed.load(Ordering::Acquire) || !self.inner.config.enabled {
            return;
        }
        self.inner.in_flight.fetch_add(1, Ordering::AcqRel);
        let tracker = self.clone();
        tokio::spawn(async move {
            if let Err(error) = tracker.send_now(request).await {
                // % is Display, ? is Debug.
                tracing::error!(message = "Detached send failed.", error = ?error);
            }
            if tracker.inner.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
                tracker.inner.drained.notify_waiters();
            }
        });
    }

    /// Wait for outstanding detached sends, bounded by the configured flush
    /// timeout. Returns regardless once the bound elapses; this is a
    /// best-effort drain, not a barrier.
    pub async fn flush(&self) {
        let drain = async {
            loop {
                // Register interest before checking, so a send finishing
                // in between cannot be missed.
                let notified = self.inner.drained.notified();
                if self.inner.in_flight.load(Ordering::Acquire) == 0 {
                    break;
                }
                notified.await;
            }
        };
        if tokio::time::timeout(self.inner.config.flush_timeout, drain)
            .await
            .is_err()
        {
            // % is Display, ? is Debug.
            tracing::warn!(
                message = "Flush timed out with sends still outstanding.",
                outstanding = %self.inner.in_flight.load(Ordering::Acquire)
            );
        }
    }

    /// Flush and stop accepting hits. Idempotent; later sends get
    /// [`AnalyticsErrorType::TrackerClosed`]. The connection pool itself is
    /// released when the last clone of this facade drops.
    pub async fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::AcqRel) {
            self.flush().await;
        }
    }

    async fn send_now(&self, request: HitRequest) -> AnalyticsResult<()> {
        validator::validate(&request, self.inner.config.validation_policy)?;
        self.inner.stats.record_attempt(request.hit_type());
        let body = self.payload_for(&request);
        let result = http_client::make_collect_request(
            &self.inner.http_client,
            &self.inner.config.endpoint_url,
            body,
        )
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                self.inner.stats.record_failure();
                AnalyticsError::new_error_result(
                    AnalyticsErrorType::TransportFailed,
                    &error.to_string(),
                )
            }
        }
    }

    /// Full wire payload: the protocol prelude (`v`, `tid`, `cid`), then
    /// config defaults the hit does not override, then the hit itself
    /// (`t` + its parameters in insertion order).
    fn payload_for(&self, request: &HitRequest) -> String {
        let config = &self.inner.config;
        let mut pairs: Vec<(InlineText, String)> = Vec::with_capacity(request.len() + 8);
        pairs.push((InlineText::from("v"), "1".to_string()));
        pairs.push((InlineText::from("tid"), config.tracking_id.clone()));
        if !request.contains(Parameter::ClientId) {
            pairs.push((InlineText::from("cid"), config.default_client_id.clone()));
        }
        if let Some(user_id) = &config.default_user_id
            && !request.contains(Parameter::UserId)
        {
            pairs.push((InlineText::from("uid"), user_id.clone()));
        }
        if let Some(name) = &config.default_application_name
            && !request.contains(Parameter::ApplicationName)
        {
            pairs.push((InlineText::from("an"), name.clone()));
        }
        if let Some(version) = &config.default_application_version
            && !request.contains(Parameter::ApplicationVersion)
        {
            pairs.push((InlineText::from("av"), version.clone()));
        }
        if let Some(data_source) = &config.default_data_source
            && !request.contains(Parameter::DataSource)
        {
            pairs.push((InlineText::from("ds"), data_source.clone()));
        }
        if config.anonymize_ip && !request.contains(Parameter::AnonymizeIp) {
            pairs.push((InlineText::from("aip"), "1".to_string()));
        }
        pairs.push((
            InlineText::from("t"),
            request.hit_type().wire_value().to_string(),
        ));
        pairs.extend(
            request
                .entries()
                .map(|(key, value)| (key.code(), value.to_string())),
        );
        encode_pairs(&pairs)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::{io::{AsyncReadExt, AsyncWriteExt},
                net::{TcpListener, TcpStream},
                sync::mpsc};

    use super::*;
    use crate::ValidationPolicy;

    const TEST_TRACKING_ID: &str = "UA-12345-1";
    const TEST_CLIENT_ID: &str = "35009a79-1a05-49d7-b876-2b884d0f825b";

    /// Minimal loopback collect endpoint: accepts connections, hands each
    /// request body to the channel, answers with `status_line`.
    async fn spawn_collect_server(
        status_line: &'static str,
    ) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let tx = tx.clone();
                tokio::spawn(async move {
                    let body = read_request_body(&mut stream).await;
                    let _ = tx.send(body);
                    let response = format!(
                        "HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });
        (format!("http://{addr}/collect"), rx)
    }

    async fn read_request_body(stream: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                return String::new();
            }
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buffer[..pos]).to_string();
                let content_length = headers
                    .lines()
                    .find_map(|line| {
                        line.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                let body_start = pos + 4;
                while buffer.len() < body_start + content_length {
                    let n = stream.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    buffer.extend_from_slice(&chunk[..n]);
                }
                return String::from_utf8_lossy(
                    &buffer[body_start..body_start + content_length],
                )
                .to_string();
            }
        }
    }

    fn test_config(endpoint_url: &str) -> TrackerConfig {
        TrackerConfig::new(TEST_TRACKING_ID)
            .with_endpoint_url(endpoint_url)
            .with_client_id(TEST_CLIENT_ID)
            .with_flush_timeout(Duration::from_secs(2))
    }

    async fn next_body(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for the collect server")
            .expect("collect server channel closed")
    }

    #[tokio::test]
    async fn event_convenience_payload_is_exact() {
        let (url, mut rx) = spawn_collect_server("200 OK").await;
        let tracker = Tracker::new(test_config(&url)).unwrap();

        tracker.send(tracker.event_with("category", "action")).await.unwrap();

        let body = next_body(&mut rx).await;
        assert_eq!(
            body,
            format!(
                "v=1&tid={TEST_TRACKING_ID}&cid={TEST_CLIENT_ID}&t=event&ec=category&ea=action"
            )
        );
        assert_eq!(tracker.stats().event_hits, 1);
        assert_eq!(tracker.stats().failed_hits, 0);
    }

    #[tokio::test]
    async fn config_defaults_merge_and_explicit_values_win() {
        let (url, mut rx) = spawn_collect_server("200 OK").await;
        let config = test_config(&url)
            .with_application("demo-app", "2.0.1")
            .with_anonymize_ip(true);
        let tracker = Tracker::new(config).unwrap();

        // Hit overrides the client id; the config default must not appear.
        let hit = tracker.event_with("a", "b").client_id("override-cid");
        tracker.send(hit).await.unwrap();

        let body = next_body(&mut rx).await;
        assert!(body.contains("an=demo-app"));
        assert!(body.contains("av=2.0.1"));
        assert!(body.contains("aip=1"));
        assert!(body.contains("cid=override-cid"));
        assert!(!body.contains(TEST_CLIENT_ID));
    }

    #[tokio::test]
    async fn disabled_tracker_is_a_no_op() {
        let (url, mut rx) = spawn_collect_server("200 OK").await;
        let tracker = Tracker::new(test_config(&url).with_enabled(false)).unwrap();

        let mut invoked = false;
        tracker.if_enabled(|_| invoked = true);
        assert!(!invoked);

        tracker.send(tracker.event_with("a", "b")).await.unwrap();
        tracker.send_detached(tracker.event_with("c", "d"));
        tracker.flush().await;

        assert_eq!(tracker.stats().total_hits, 0);
        assert!(
            tokio::time::timeout(Duration::from_millis(200), rx.recv()).await.is_err()
        );
    }

    #[tokio::test]
    async fn strict_validation_fails_before_any_network_call() {
        let (url, mut rx) = spawn_collect_server("200 OK").await;
        let config = test_config(&url).with_validation_policy(ValidationPolicy::Strict);
        let tracker = Tracker::new(config).unwrap();

        let result = tracker.send(tracker.transaction()).await;
        assert!(result.is_err());
        assert_eq!(tracker.stats().total_hits, 0);
        assert!(
            tokio::time::timeout(Duration::from_millis(200), rx.recv()).await.is_err()
        );
    }

    #[tokio::test]
    async fn permissive_forwards_negative_event_value() {
        let (url, mut rx) = spawn_collect_server("200 OK").await;
        let tracker = Tracker::new(test_config(&url)).unwrap();

        tracker.send(tracker.event_with("a", "b").event_value(-5)).await.unwrap();

        let body = next_body(&mut rx).await;
        assert!(body.contains("ev=-5"));
    }

    #[tokio::test]
    async fn transport_failure_is_surfaced_and_counted() {
        let (url, mut rx) = spawn_collect_server("500 Internal Server Error").await;
        let tracker = Tracker::new(test_config(&url)).unwrap();

        let result = tracker.send(tracker.event_with("a", "b")).await;
        assert!(result.is_err());
        let _ = next_body(&mut rx).await;

        let stats = tracker.stats();
        assert_eq!(stats.total_hits, 1);
        assert_eq!(stats.failed_hits, 1);
    }

    #[tokio::test]
    async fn detached_sends_drain_on_flush() {
        let (url, mut rx) = spawn_collect_server("200 OK").await;
        let tracker = Tracker::new(test_config(&url)).unwrap();

        tracker.send_detached(tracker.event_with("a", "1"));
        tracker.send_detached(tracker.page_view_with("https://example.com/", "Home"));
        tracker.send_detached(tracker.event_with("c", "3"));
        tracker.flush().await;

        let stats = tracker.stats();
        assert_eq!(stats.total_hits, 3);
        assert_eq!(stats.event_hits, 2);
        assert_eq!(stats.page_view_hits, 1);
        for _ in 0..3 {
            let _ = next_body(&mut rx).await;
        }
    }

    #[tokio::test]
    async fn detached_transport_failures_are_swallowed_but_counted() {
        let (url, mut rx) = spawn_collect_server("500 Internal Server Error").await;
        let tracker = Tracker::new(test_config(&url)).unwrap();

        tracker.send_detached(tracker.event_with("a", "b"));
        tracker.flush().await;
        let _ = next_body(&mut rx).await;

        assert_eq!(tracker.stats().failed_hits, 1);
    }

    #[tokio::test]
    async fn close_is_idempotent_and_rejects_later_sends() {
        let (url, _rx) = spawn_collect_server("200 OK").await;
        let tracker = Tracker::new(test_config(&url)).unwrap();

        tracker.close().await;
        tracker.close().await;

        let result = tracker.send(tracker.event_with("a", "b")).await;
        assert!(result.is_err());
        assert_eq!(tracker.stats().total_hits, 0);
    }

    #[tokio::test]
    async fn concurrent_builders_stay_isolated() {
        let (url, mut rx) = spawn_collect_server("200 OK").await;
        let tracker = Tracker::new(test_config(&url)).unwrap();

        let mut join_set = tokio::task::JoinSet::new();
        for i in 0..8i64 {
            let tracker = tracker.clone();
            join_set.spawn(async move {
                let hit = tracker
                    .event_with(&format!("category-{i}"), "action")
                    .event_label(&format!("label-{i}"))
                    .event_value(i);
                tracker.send(hit).await
            });
        }
        while let Some(result) = join_set.join_next().await {
            result.unwrap().unwrap();
        }

        let mut bodies = Vec::new();
        for _ in 0..8 {
            bodies.push(next_body(&mut rx).await);
        }
        for i in 0..8 {
            let matching: Vec<_> = bodies
                .iter()
                .filter(|b| b.contains(&format!("ec=category-{i}&")))
                .collect();
            assert_eq!(matching.len(), 1);
            assert!(matching[0].contains(&format!("el=label-{i}&ev={i}")));
        }

        assert_eq!(tracker.stats().event_hits, 8);
    }

    #[tokio::test]
    async fn reset_stats_zeroes_counters() {
        let (url, mut rx) = spawn_collect_server("200 OK").await;
        let tracker = Tracker::new(test_config(&url)).unwrap();

        tracker.send(tracker.event_with("a", "b")).await.unwrap();
        let _ = next_body(&mut rx).await;
        assert_eq!(tracker.stats().total_hits, 1);

        tracker.reset_stats();
        assert_eq!(tracker.stats(), StatsSnapshot::default());
    }

    #[test]
    fn construction_rejects_bad_tracking_id() {
        let result = Tracker::new(TrackerConfig::new("garbage"));
        assert!(result.is_err());
    }
}
