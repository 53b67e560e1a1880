// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Werbewerk — Native ad SDK bridge abstractions.
//
// This crate defines the capability traits through which the session layer
// talks to the vendor ad network SDK (initialization, ad loading,
// click/impression reporting, and overlay view control) without ever
// interpreting platform ad objects itself.

use std::sync::Arc;

pub mod stub;
pub mod traits;

pub use traits::{AdChoicesInfo, AdHandle, AdNetwork, AdPlatform, HostContext, NativeAd, NativeAdView};

/// Retrieves the bridge implementation for the current build.
///
/// Mobile application builds link an adapter over the vendor SDK at
/// integration time; desktop and CI builds fall back to the stub, which
/// serves sample inventory so the rest of the stack stays exercisable.
pub fn platform_bridge() -> Arc<dyn AdPlatform> {
    Arc::new(stub::StubPlatform::new())
}
