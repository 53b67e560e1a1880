// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Werbewerk Ads — session registry, attribute extraction, and the session
// manager facade.  This crate bridges between the transport types defined
// in `werbewerk-core` and the vendor SDK capabilities behind
// `werbewerk-bridge`.

pub mod extract;
pub mod registry;
pub mod session;

pub use extract::extract_ad_data;
pub use registry::{AdRegistry, AdSession};
pub use session::AdSessionManager;
