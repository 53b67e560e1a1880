// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Attribute extraction: native ad handle -> transport record.

use werbewerk_bridge::NativeAd;
use werbewerk_core::types::{AdSessionId, NativeAdData};

/// Disclosure label emitted whenever the ad carries AdChoices info.
const AD_CHOICES_LABEL: &str = "AdChoices";

/// Map a native ad's attributes into the transport-safe record.
///
/// Pure read of the handle. Absent attributes stay absent — the record
/// never carries null placeholders, so the host can feature-test with key
/// presence. The ad-type booleans are both derived from one evaluation of
/// `store`, which keeps them mutually exclusive by construction.
pub fn extract_ad_data(ad: &dyn NativeAd, id: AdSessionId) -> NativeAdData {
    let ad_choices = ad.ad_choices();
    let store = ad.store();
    let is_app_install_ad = store.is_some();

    NativeAdData {
        ad_id: id,
        headline: ad.headline(),
        body: ad.body(),
        call_to_action: ad.call_to_action(),
        advertiser: ad.advertiser(),
        store,
        price: ad.price(),
        star_rating: ad.star_rating(),
        media_content_url: ad.media_content_url(),
        icon_url: ad.icon_url(),
        ad_choices_icon_url: ad_choices.as_ref().and_then(|info| info.icon_url.clone()),
        ad_choices_text: ad_choices.map(|_| AD_CHOICES_LABEL.to_string()),
        is_app_install_ad,
        is_content_ad: !is_app_install_ad,
    }
}
