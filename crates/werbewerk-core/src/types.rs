// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Werbewerk ad session broker.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one loaded ad session.
///
/// Generated at load-success time, never reused. Random (uuid v4) rather
/// than sequential so ids leak nothing about load order or count across
/// the bridge boundary and are safe to mint from concurrent loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdSessionId(pub Uuid);

impl AdSessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AdSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AdSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AdSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lifecycle states of the ad network SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitState {
    /// SDK has not been started.
    Uninitialized,
    /// First initialize call issued, waiting for the SDK callback.
    Initializing,
    /// SDK is ready — ad loading is allowed.
    Ready,
}

/// Transport-safe attribute record for one loaded native ad.
///
/// This is the exact shape handed back to the host application. Field
/// names are the wire contract; absent native attributes are omitted
/// entirely rather than serialized as null, so the host can feature-test
/// with plain key presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAdData {
    /// Session identifier correlating this record with report calls.
    pub ad_id: AdSessionId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertiser: Option<String>,

    /// App store name — present only on app install ads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_content_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_choices_icon_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_choices_text: Option<String>,

    /// True iff the `store` attribute is present.
    pub is_app_install_ad: bool,
    /// Exact logical negation of `is_app_install_ad`.
    pub is_content_ad: bool,
}

/// Screen placement for a natively-rendered ad overlay, in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdViewFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Styling for a natively-rendered ad overlay.
///
/// Colors are hex strings (e.g. `#FFFFFF`), sizes are in points, radii
/// and widths in pixels. Every field is optional; the native side keeps
/// its platform default for anything unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdViewStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertiser_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline_font_size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_font_size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertiser_font_size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_font_size: Option<f64>,
}
