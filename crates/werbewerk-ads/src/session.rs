// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session manager — the public facade over the ad network bridge.
//
// Owns the session registry and the SDK lifecycle gate. Host calls arrive
// through a framework dispatcher as already-parsed requests; every call
// resolves with exactly one success or one error, and reporting calls only
// ever reach the SDK for a live, registry-held ad.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, instrument};

use werbewerk_bridge::{AdHandle, AdPlatform};
use werbewerk_core::config::AdConfig;
use werbewerk_core::error::{Result, WerbewerkError};
use werbewerk_core::types::{AdSessionId, AdViewFrame, AdViewStyle, InitState, NativeAdData};

use crate::extract::extract_ad_data;
use crate::registry::AdRegistry;

/// Scroll-tracking state for natively-rendered overlays.
struct ScrollTracking {
    enabled: bool,
    throttle: Duration,
    last_sync: Option<Instant>,
}

/// The session lifecycle manager.
///
/// Constructed once at plugin startup with the platform bridge injected —
/// single-instance-per-process semantics without ambient global state.
/// `initialize` and `load_ad` suspend on the SDK; everything else is
/// synchronous from this system's point of view.
pub struct AdSessionManager {
    platform: Arc<dyn AdPlatform>,
    registry: AdRegistry,
    state: Mutex<InitState>,
    scroll: Mutex<ScrollTracking>,
    config: AdConfig,
}

impl AdSessionManager {
    pub fn new(platform: Arc<dyn AdPlatform>) -> Self {
        Self::with_config(platform, AdConfig::default())
    }

    pub fn with_config(platform: Arc<dyn AdPlatform>, config: AdConfig) -> Self {
        Self {
            platform,
            registry: AdRegistry::new(),
            state: Mutex::new(InitState::Uninitialized),
            scroll: Mutex::new(ScrollTracking {
                enabled: false,
                throttle: Duration::from_millis(config.scroll_throttle_ms),
                last_sync: None,
            }),
            config,
        }
    }

    /// Current SDK lifecycle state.
    pub fn state(&self) -> InitState {
        *self.state.lock().expect("state lock poisoned")
    }

    /// Number of live ad sessions.
    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    /// Start the vendor SDK.
    ///
    /// Idempotent once ready: a second call resolves successfully without
    /// touching the SDK again, so hosts can retry initialization freely.
    /// A failed attempt returns the manager to `Uninitialized`.
    #[instrument(skip_all)]
    pub async fn initialize(&self, app_id: &str) -> Result<()> {
        if app_id.is_empty() {
            return Err(WerbewerkError::MissingAppId);
        }
        if !self.platform.is_available() {
            return Err(WerbewerkError::NoHostContext);
        }

        {
            let mut state = self.state.lock().expect("state lock poisoned");
            if *state == InitState::Ready {
                debug!("ad network already initialized");
                return Ok(());
            }
            *state = InitState::Initializing;
        }

        // Guard released above: the SDK completion may arrive on a
        // different execution context than this call.
        match self.platform.initialize(app_id).await {
            Ok(()) => {
                *self.state.lock().expect("state lock poisoned") = InitState::Ready;
                info!(platform = self.platform.platform_name(), "ad network initialized");
                Ok(())
            }
            Err(e) => {
                *self.state.lock().expect("state lock poisoned") = InitState::Uninitialized;
                error!(error = %e, "ad network initialization failed");
                Err(e)
            }
        }
    }

    /// Request one native ad and register a session for it.
    ///
    /// Concurrent calls for the same unit are independent requests and
    /// produce distinct sessions; there is no coalescing layer.
    #[instrument(skip(self))]
    pub async fn load_ad(&self, ad_unit_id: &str) -> Result<NativeAdData> {
        if self.state() != InitState::Ready {
            return Err(WerbewerkError::NotInitialized);
        }
        if ad_unit_id.is_empty() {
            return Err(WerbewerkError::MissingAdUnitId);
        }
        if !self.platform.is_available() {
            return Err(WerbewerkError::NoHostContext);
        }

        let ad = self.platform.load_native_ad(ad_unit_id).await?;
        let id = self.registry.put(ad_unit_id, ad.clone());

        // Attribute getters cross into native code; a panic there must
        // reject this one call, not take down the host dispatcher.
        let data = panic::catch_unwind(AssertUnwindSafe(|| extract_ad_data(ad.as_ref(), id)))
            .map_err(|_| {
                WerbewerkError::Extraction("panic while reading native ad attributes".into())
            })?;

        info!(ad_id = %id, "native ad loaded");
        Ok(data)
    }

    /// Report a click on a live ad session to the network.
    #[instrument(skip(self))]
    pub fn report_click(&self, ad_id: &str) -> Result<()> {
        let ad = self.resolve(ad_id)?;
        self.platform.record_click(ad.as_ref());
        debug!(ad_id, "click reported");
        Ok(())
    }

    /// Report an impression of a live ad session to the network.
    #[instrument(skip(self))]
    pub fn report_impression(&self, ad_id: &str) -> Result<()> {
        let ad = self.resolve(ad_id)?;
        self.platform.record_impression(ad.as_ref());
        debug!(ad_id, "impression reported");
        Ok(())
    }

    /// Place (and show) the native overlay view for a live ad session.
    pub fn position_ad(&self, ad_id: &str, frame: AdViewFrame) -> Result<()> {
        let ad = self.resolve(ad_id)?;
        self.platform.position(ad.as_ref(), frame)
    }

    /// Hide or remove the native overlay view for a live ad session.
    pub fn hide_ad(&self, ad_id: &str) -> Result<()> {
        let ad = self.resolve(ad_id)?;
        self.platform.hide(ad.as_ref())
    }

    /// Apply styling to the native overlay view for a live ad session.
    pub fn style_ad(&self, ad_id: &str, style: &AdViewStyle) -> Result<()> {
        let ad = self.resolve(ad_id)?;
        self.platform.apply_style(ad.as_ref(), style)
    }

    /// Enable or disable scroll-driven overlay re-anchoring.
    ///
    /// Resets the throttle window; `throttle_ms` of `None` keeps the
    /// configured interval.
    pub fn set_scroll_tracking(&self, enabled: bool, throttle_ms: Option<u64>) {
        let mut scroll = self.scroll.lock().expect("scroll lock poisoned");
        scroll.enabled = enabled;
        if let Some(ms) = throttle_ms {
            scroll.throttle = Duration::from_millis(ms);
        }
        scroll.last_sync = None;
        debug!(enabled, "scroll tracking updated");
    }

    /// Re-anchor the overlay for a live ad session after a host scroll.
    ///
    /// Events inside the throttle window, and all events while tracking is
    /// disabled, are accepted but not forwarded.
    pub fn handle_scroll(&self, ad_id: &str) -> Result<()> {
        let ad = self.resolve(ad_id)?;

        {
            let mut scroll = self.scroll.lock().expect("scroll lock poisoned");
            if !scroll.enabled {
                return Ok(());
            }
            if let Some(last) = scroll.last_sync
                && last.elapsed() < scroll.throttle
            {
                return Ok(());
            }
            scroll.last_sync = Some(Instant::now());
        }

        self.platform.sync_scroll(ad.as_ref())
    }

    /// Release every live session.
    ///
    /// Invoked by the host environment when the plugin instance is being
    /// disposed. Best-effort and infallible; a load completing after this
    /// lands in the cleared registry harmlessly and is released at the
    /// next teardown.
    pub fn teardown(&self) {
        let handles = self.registry.clear();
        let count = handles.len();
        if self.config.dispose_on_teardown {
            for ad in handles {
                self.platform.dispose(ad);
            }
        }
        info!(count, "ad sessions cleared");
    }

    /// Resolve a host-supplied ad id to a live handle.
    ///
    /// Only emptiness is a validation failure; a malformed id cannot name
    /// a live session and reports as not found, like any unknown id.
    fn resolve(&self, ad_id: &str) -> Result<AdHandle> {
        if ad_id.is_empty() {
            return Err(WerbewerkError::MissingAdId);
        }
        let id: AdSessionId = ad_id
            .parse()
            .map_err(|_| WerbewerkError::SessionNotFound(ad_id.to_string()))?;
        self.registry
            .get(&id)
            .ok_or_else(|| WerbewerkError::SessionNotFound(ad_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use werbewerk_bridge::{AdChoicesInfo, AdNetwork, HostContext, NativeAd, NativeAdView};

    /// Instrumented bridge double. Knobs are atomics so tests can flip
    /// them mid-scenario through the shared Arc.
    #[derive(Default)]
    struct MockPlatform {
        init_calls: AtomicUsize,
        clicks: AtomicUsize,
        impressions: AtomicUsize,
        disposed: AtomicUsize,
        positions: AtomicUsize,
        hides: AtomicUsize,
        styles: AtomicUsize,
        scroll_syncs: AtomicUsize,
        fail_init: AtomicBool,
        fail_load: AtomicBool,
        host_gone: AtomicBool,
        serve_panicky_ad: AtomicBool,
    }

    impl AdPlatform for MockPlatform {
        fn platform_name(&self) -> &str {
            "mock"
        }
    }

    #[async_trait]
    impl AdNetwork for MockPlatform {
        async fn initialize(&self, _app_id: &str) -> Result<()> {
            self.init_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_init.load(Ordering::SeqCst) {
                return Err(WerbewerkError::Init("SDK refused to start".into()));
            }
            Ok(())
        }

        async fn load_native_ad(&self, _ad_unit_id: &str) -> Result<AdHandle> {
            if self.fail_load.load(Ordering::SeqCst) {
                return Err(WerbewerkError::AdLoad("no fill".into()));
            }
            if self.serve_panicky_ad.load(Ordering::SeqCst) {
                return Ok(Arc::new(PanickyAd));
            }
            Ok(Arc::new(ContentAd))
        }

        fn record_click(&self, _ad: &dyn NativeAd) {
            self.clicks.fetch_add(1, Ordering::SeqCst);
        }

        fn record_impression(&self, _ad: &dyn NativeAd) {
            self.impressions.fetch_add(1, Ordering::SeqCst);
        }

        fn dispose(&self, _ad: AdHandle) {
            self.disposed.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl HostContext for MockPlatform {
        fn is_available(&self) -> bool {
            !self.host_gone.load(Ordering::SeqCst)
        }
    }

    impl NativeAdView for MockPlatform {
        fn position(&self, _ad: &dyn NativeAd, _frame: AdViewFrame) -> Result<()> {
            self.positions.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn hide(&self, _ad: &dyn NativeAd) -> Result<()> {
            self.hides.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn apply_style(&self, _ad: &dyn NativeAd, _style: &AdViewStyle) -> Result<()> {
            self.styles.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn sync_scroll(&self, _ad: &dyn NativeAd) -> Result<()> {
            self.scroll_syncs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Content ad: headline and body present, no store.
    struct ContentAd;

    impl NativeAd for ContentAd {
        fn headline(&self) -> Option<String> {
            Some("H".into())
        }
        fn body(&self) -> Option<String> {
            Some("B".into())
        }
        fn call_to_action(&self) -> Option<String> {
            None
        }
        fn advertiser(&self) -> Option<String> {
            None
        }
        fn store(&self) -> Option<String> {
            None
        }
        fn price(&self) -> Option<String> {
            None
        }
        fn star_rating(&self) -> Option<f64> {
            None
        }
        fn media_content_url(&self) -> Option<String> {
            None
        }
        fn icon_url(&self) -> Option<String> {
            None
        }
        fn ad_choices(&self) -> Option<AdChoicesInfo> {
            None
        }
    }

    /// Handle whose attribute surface faults, like a misbehaving native
    /// binding.
    struct PanickyAd;

    impl NativeAd for PanickyAd {
        fn headline(&self) -> Option<String> {
            panic!("native binding fault")
        }
        fn body(&self) -> Option<String> {
            None
        }
        fn call_to_action(&self) -> Option<String> {
            None
        }
        fn advertiser(&self) -> Option<String> {
            None
        }
        fn store(&self) -> Option<String> {
            None
        }
        fn price(&self) -> Option<String> {
            None
        }
        fn star_rating(&self) -> Option<f64> {
            None
        }
        fn media_content_url(&self) -> Option<String> {
            None
        }
        fn icon_url(&self) -> Option<String> {
            None
        }
        fn ad_choices(&self) -> Option<AdChoicesInfo> {
            None
        }
    }

    fn manager() -> (Arc<MockPlatform>, AdSessionManager) {
        let platform = Arc::new(MockPlatform::default());
        let manager = AdSessionManager::new(platform.clone() as Arc<dyn AdPlatform>);
        (platform, manager)
    }

    async fn ready_manager() -> (Arc<MockPlatform>, AdSessionManager) {
        let (platform, manager) = manager();
        manager.initialize("app-1").await.expect("initialize");
        (platform, manager)
    }

    #[tokio::test]
    async fn initialize_requires_app_id() {
        let (_, manager) = manager();
        let err = manager.initialize("").await.expect_err("empty app id");
        assert!(matches!(err, WerbewerkError::MissingAppId));
        assert_eq!(manager.state(), InitState::Uninitialized);
    }

    #[tokio::test]
    async fn initialize_requires_host_context() {
        let (platform, manager) = manager();
        platform.host_gone.store(true, Ordering::SeqCst);

        let err = manager.initialize("app-1").await.expect_err("no host");
        assert!(matches!(err, WerbewerkError::NoHostContext));
    }

    #[tokio::test]
    async fn second_initialize_skips_the_sdk() {
        let (platform, manager) = manager();

        manager.initialize("app-1").await.expect("first");
        manager.initialize("app-1").await.expect("second");

        assert_eq!(platform.init_calls.load(Ordering::SeqCst), 1);
        assert_eq!(manager.state(), InitState::Ready);
    }

    #[tokio::test]
    async fn failed_initialize_is_retryable() {
        let (platform, manager) = manager();
        platform.fail_init.store(true, Ordering::SeqCst);

        let err = manager.initialize("app-1").await.expect_err("SDK failure");
        assert!(matches!(err, WerbewerkError::Init(_)));
        assert_eq!(manager.state(), InitState::Uninitialized);

        platform.fail_init.store(false, Ordering::SeqCst);
        manager.initialize("app-1").await.expect("retry succeeds");
        assert_eq!(manager.state(), InitState::Ready);
    }

    #[tokio::test]
    async fn load_before_initialize_fails_without_registering() {
        let (_, manager) = manager();

        let err = manager.load_ad("unit-1").await.expect_err("not ready");
        assert!(matches!(err, WerbewerkError::NotInitialized));
        assert_eq!(manager.session_count(), 0);
    }

    #[tokio::test]
    async fn load_requires_ad_unit_id() {
        let (_, manager) = ready_manager().await;

        let err = manager.load_ad("").await.expect_err("empty unit id");
        assert!(matches!(err, WerbewerkError::MissingAdUnitId));
    }

    #[tokio::test]
    async fn load_requires_host_context() {
        let (platform, manager) = ready_manager().await;
        platform.host_gone.store(true, Ordering::SeqCst);

        let err = manager.load_ad("unit-1").await.expect_err("no host");
        assert!(matches!(err, WerbewerkError::NoHostContext));
        assert_eq!(manager.session_count(), 0);
    }

    #[tokio::test]
    async fn load_registers_a_session_and_extracts_attributes() {
        let (_, manager) = ready_manager().await;

        let data = manager.load_ad("unit-1").await.expect("load");

        assert_eq!(data.headline.as_deref(), Some("H"));
        assert_eq!(data.body.as_deref(), Some("B"));
        assert!(!data.is_app_install_ad);
        assert!(data.is_content_ad);
        assert_eq!(manager.session_count(), 1);
    }

    #[tokio::test]
    async fn concurrent_loads_yield_distinct_sessions() {
        let (_, manager) = ready_manager().await;

        let (a, b, c) = tokio::join!(
            manager.load_ad("unit-1"),
            manager.load_ad("unit-1"),
            manager.load_ad("unit-1"),
        );
        let (a, b, c) = (a.expect("a"), b.expect("b"), c.expect("c"));

        assert_ne!(a.ad_id, b.ad_id);
        assert_ne!(b.ad_id, c.ad_id);
        assert_ne!(a.ad_id, c.ad_id);
        assert_eq!(manager.session_count(), 3);
    }

    #[tokio::test]
    async fn load_failure_passes_the_sdk_message_through() {
        let (platform, manager) = ready_manager().await;
        platform.fail_load.store(true, Ordering::SeqCst);

        let err = manager.load_ad("unit-1").await.expect_err("no fill");
        assert!(matches!(err, WerbewerkError::AdLoad(_)));
        assert!(err.to_string().contains("no fill"));
        assert_eq!(manager.session_count(), 0);
    }

    #[tokio::test]
    async fn extraction_panic_is_converted_to_an_error() {
        let (platform, manager) = ready_manager().await;
        platform.serve_panicky_ad.store(true, Ordering::SeqCst);

        let err = manager.load_ad("unit-1").await.expect_err("fault");
        assert!(matches!(err, WerbewerkError::Extraction(_)));
        // The handle is valid; only this response failed. The session
        // stays registered and is released at teardown.
        assert_eq!(manager.session_count(), 1);
    }

    #[tokio::test]
    async fn reports_reach_the_network_for_live_sessions() {
        let (platform, manager) = ready_manager().await;
        let data = manager.load_ad("unit-1").await.expect("load");
        let ad_id = data.ad_id.to_string();

        manager.report_click(&ad_id).expect("click");
        manager.report_impression(&ad_id).expect("impression");

        assert_eq!(platform.clicks.load(Ordering::SeqCst), 1);
        assert_eq!(platform.impressions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn report_requires_ad_id() {
        let (_, manager) = ready_manager().await;

        let err = manager.report_click("").expect_err("empty ad id");
        assert!(matches!(err, WerbewerkError::MissingAdId));
    }

    #[tokio::test]
    async fn report_with_unknown_id_fails() {
        let (platform, manager) = ready_manager().await;

        let unknown = AdSessionId::new().to_string();
        let err = manager.report_impression(&unknown).expect_err("unknown");
        assert!(matches!(err, WerbewerkError::SessionNotFound(_)));

        let err = manager.report_click("not-a-uuid").expect_err("malformed");
        assert!(matches!(err, WerbewerkError::SessionNotFound(_)));

        assert_eq!(platform.clicks.load(Ordering::SeqCst), 0);
        assert_eq!(platform.impressions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn teardown_releases_every_session() {
        let (platform, manager) = ready_manager().await;
        manager.load_ad("unit-1").await.expect("load 1");
        manager.load_ad("unit-2").await.expect("load 2");

        manager.teardown();

        assert_eq!(manager.session_count(), 0);
        assert_eq!(platform.disposed.load(Ordering::SeqCst), 2);

        // Idempotent: nothing further to release.
        manager.teardown();
        assert_eq!(platform.disposed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn teardown_can_leave_disposal_to_the_host() {
        let platform = Arc::new(MockPlatform::default());
        let manager = AdSessionManager::with_config(
            platform.clone() as Arc<dyn AdPlatform>,
            AdConfig {
                dispose_on_teardown: false,
                ..AdConfig::default()
            },
        );
        manager.initialize("app-1").await.expect("initialize");
        manager.load_ad("unit-1").await.expect("load");

        manager.teardown();

        assert_eq!(manager.session_count(), 0);
        assert_eq!(platform.disposed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lifecycle_scenario_end_to_end() {
        let (_, manager) = ready_manager().await;

        let data = manager.load_ad("unit-1").await.expect("load");
        assert!(data.is_content_ad);

        let ad_id = data.ad_id.to_string();
        manager.report_impression(&ad_id).expect("before teardown");

        manager.teardown();

        let err = manager.report_impression(&ad_id).expect_err("after teardown");
        assert!(matches!(err, WerbewerkError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn view_operations_delegate_for_live_sessions() {
        let (platform, manager) = ready_manager().await;
        let ad_id = manager.load_ad("unit-1").await.expect("load").ad_id.to_string();

        let frame = AdViewFrame {
            x: 0.0,
            y: 120.0,
            width: 320.0,
            height: 250.0,
        };
        manager.position_ad(&ad_id, frame).expect("position");
        manager.style_ad(&ad_id, &AdViewStyle::default()).expect("style");
        manager.hide_ad(&ad_id).expect("hide");

        assert_eq!(platform.positions.load(Ordering::SeqCst), 1);
        assert_eq!(platform.styles.load(Ordering::SeqCst), 1);
        assert_eq!(platform.hides.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn view_operations_require_a_live_session() {
        let (_, manager) = ready_manager().await;

        let unknown = AdSessionId::new().to_string();
        let frame = AdViewFrame {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
        };
        assert!(matches!(
            manager.position_ad(&unknown, frame).expect_err("unknown"),
            WerbewerkError::SessionNotFound(_)
        ));
        assert!(matches!(
            manager.hide_ad("").expect_err("empty"),
            WerbewerkError::MissingAdId
        ));
    }

    #[tokio::test]
    async fn scroll_events_are_throttled() {
        let (platform, manager) = ready_manager().await;
        let ad_id = manager.load_ad("unit-1").await.expect("load").ad_id.to_string();

        manager.set_scroll_tracking(true, Some(60_000));
        manager.handle_scroll(&ad_id).expect("first event");
        manager.handle_scroll(&ad_id).expect("second event");

        // Second event fell inside the throttle window.
        assert_eq!(platform.scroll_syncs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disabled_scroll_tracking_forwards_nothing() {
        let (platform, manager) = ready_manager().await;
        let ad_id = manager.load_ad("unit-1").await.expect("load").ad_id.to_string();

        manager.handle_scroll(&ad_id).expect("accepted no-op");
        assert_eq!(platform.scroll_syncs.load(Ordering::SeqCst), 0);

        // Unknown sessions still fail even while tracking is off.
        let unknown = AdSessionId::new().to_string();
        assert!(matches!(
            manager.handle_scroll(&unknown).expect_err("unknown"),
            WerbewerkError::SessionNotFound(_)
        ));
    }

    #[tokio::test]
    async fn zero_throttle_forwards_every_event() {
        let (platform, manager) = ready_manager().await;
        let ad_id = manager.load_ad("unit-1").await.expect("load").ad_id.to_string();

        manager.set_scroll_tracking(true, Some(0));
        manager.handle_scroll(&ad_id).expect("first");
        manager.handle_scroll(&ad_id).expect("second");

        assert_eq!(platform.scroll_syncs.load(Ordering::SeqCst), 2);
    }
}
