// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where no vendor ad SDK is linked.
//
// The network surface succeeds with canned sample inventory so host code
// and the session layer stay exercisable off-device; overlay view control
// returns `PlatformUnavailable` — real implementations live in the
// platform adapters linked by mobile builds.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use werbewerk_core::error::{Result, WerbewerkError};
use werbewerk_core::types::{AdViewFrame, AdViewStyle};

use crate::traits::*;

/// Sample-inventory bridge returned on non-mobile platforms.
pub struct StubPlatform;

impl StubPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StubPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl AdPlatform for StubPlatform {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

#[async_trait]
impl AdNetwork for StubPlatform {
    async fn initialize(&self, _app_id: &str) -> Result<()> {
        warn!("native ads are not supported on this platform; serving sample inventory");
        Ok(())
    }

    async fn load_native_ad(&self, ad_unit_id: &str) -> Result<AdHandle> {
        debug!(ad_unit_id, "serving sample native ad");
        Ok(Arc::new(SampleAd))
    }

    fn record_click(&self, _ad: &dyn NativeAd) {
        info!("ad click reported (stub)");
    }

    fn record_impression(&self, _ad: &dyn NativeAd) {
        info!("ad impression reported (stub)");
    }

    fn dispose(&self, _ad: AdHandle) {
        debug!("sample ad released");
    }
}

impl HostContext for StubPlatform {
    fn is_available(&self) -> bool {
        true
    }
}

impl NativeAdView for StubPlatform {
    fn position(&self, _ad: &dyn NativeAd, _frame: AdViewFrame) -> Result<()> {
        warn!("NativeAdView::position called on stub bridge");
        Err(WerbewerkError::PlatformUnavailable)
    }

    fn hide(&self, _ad: &dyn NativeAd) -> Result<()> {
        warn!("NativeAdView::hide called on stub bridge");
        Err(WerbewerkError::PlatformUnavailable)
    }

    fn apply_style(&self, _ad: &dyn NativeAd, _style: &AdViewStyle) -> Result<()> {
        warn!("NativeAdView::apply_style called on stub bridge");
        Err(WerbewerkError::PlatformUnavailable)
    }

    fn sync_scroll(&self, _ad: &dyn NativeAd) -> Result<()> {
        Err(WerbewerkError::PlatformUnavailable)
    }
}

/// Canned content ad served by the stub network.
///
/// A content ad on purpose: no store, price, or rating, so downstream
/// consumers see the sparse shape they will get from real inventory.
pub struct SampleAd;

impl NativeAd for SampleAd {
    fn headline(&self) -> Option<String> {
        Some("Sample Native Ad".into())
    }

    fn body(&self) -> Option<String> {
        Some("This is a sample native ad. Real inventory is only served on mobile platforms.".into())
    }

    fn call_to_action(&self) -> Option<String> {
        Some("Learn More".into())
    }

    fn advertiser(&self) -> Option<String> {
        Some("Sample Advertiser".into())
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
        Some("https://via.placeholder.com/300x200".into())
    }

    fn icon_url(&self) -> Option<String> {
        Some("https://via.placeholder.com/50x50".into())
    }

    fn ad_choices(&self) -> Option<AdChoicesInfo> {
        Some(AdChoicesInfo {
            icon_url: Some("https://via.placeholder.com/20x20".into()),
        })
    }
}
