// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the vendor ad network SDK.
//
// The session layer only ever sees these traits. Platform adapters own the
// real SDK objects; anything they hand out crosses this boundary as an
// opaque `AdHandle` whose attributes are readable but whose internals are
// not.

use std::sync::Arc;

use async_trait::async_trait;

use werbewerk_core::error::Result;
use werbewerk_core::types::{AdViewFrame, AdViewStyle};

/// Shared reference to one opaque native ad object.
///
/// The owning session keeps the handle alive; collaborators receive
/// short-lived clones for reading or reporting, never ownership.
pub type AdHandle = Arc<dyn NativeAd>;

/// Unified bridge that groups all native ad capabilities.
///
/// Platforms that lack a capability (e.g. no overlay views off-device)
/// return `WerbewerkError::PlatformUnavailable` from the stub
/// implementation.
pub trait AdPlatform: AdNetwork + HostContext + NativeAdView {
    /// Human-readable platform name (e.g. "iOS 17", "Android 14").
    fn platform_name(&self) -> &str;
}

/// Attribute surface of one loaded native ad.
///
/// Every attribute is optional at the source; implementations report
/// exactly what the vendor SDK exposes and nothing else. Store, price,
/// and star rating are only populated on app install ads.
pub trait NativeAd: Send + Sync {
    fn headline(&self) -> Option<String>;

    fn body(&self) -> Option<String>;

    fn call_to_action(&self) -> Option<String>;

    fn advertiser(&self) -> Option<String>;

    fn store(&self) -> Option<String>;

    fn price(&self) -> Option<String>;

    fn star_rating(&self) -> Option<f64>;

    /// URL of the main media asset, as a string.
    fn media_content_url(&self) -> Option<String>;

    /// URL of the ad icon, as a string.
    fn icon_url(&self) -> Option<String>;

    /// AdChoices disclosure, if the network attached one.
    fn ad_choices(&self) -> Option<AdChoicesInfo>;
}

/// Load/report contract over the vendor ad network SDK.
#[async_trait]
pub trait AdNetwork: Send + Sync {
    /// Start the vendor SDK. Resolves once the SDK's own initialization
    /// callback has fired.
    async fn initialize(&self, app_id: &str) -> Result<()>;

    /// Request one native ad for the given ad unit. Each call is an
    /// independent request — concurrent loads for the same unit produce
    /// distinct ads.
    async fn load_native_ad(&self, ad_unit_id: &str) -> Result<AdHandle>;

    /// Report a click on the given ad. Fire-and-forget: the network may
    /// drop the signal, but that is opaque to this system.
    fn record_click(&self, ad: &dyn NativeAd);

    /// Report an impression of the given ad. Fire-and-forget.
    fn record_impression(&self, ad: &dyn NativeAd);

    /// Release a handle back to the SDK. Called once per handle at
    /// teardown.
    fn dispose(&self, ad: AdHandle);
}

/// Host application context required by the vendor SDK.
pub trait HostContext: Send + Sync {
    /// Whether a host activity/window is currently attached. The SDK
    /// cannot initialize or load without one.
    fn is_available(&self) -> bool;
}

/// Control surface for natively-rendered ad overlay views.
///
/// Rendering itself happens on the platform side; this trait only carries
/// placement, styling, and scroll synchronization for an already-loaded ad.
pub trait NativeAdView: Send + Sync {
    /// Place (and show) the overlay view for the given ad.
    fn position(&self, ad: &dyn NativeAd, frame: AdViewFrame) -> Result<()>;

    /// Hide or remove the overlay view for the given ad.
    fn hide(&self, ad: &dyn NativeAd) -> Result<()>;

    /// Apply styling to the overlay view for the given ad.
    fn apply_style(&self, ad: &dyn NativeAd, style: &AdViewStyle) -> Result<()>;

    /// Re-anchor the overlay view after a host scroll event.
    fn sync_scroll(&self, ad: &dyn NativeAd) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Info structs
// ---------------------------------------------------------------------------

/// AdChoices disclosure attached to a native ad.
#[derive(Debug, Clone)]
pub struct AdChoicesInfo {
    /// URL of the disclosure logo, if the network supplied one.
    pub icon_url: Option<String>,
}
