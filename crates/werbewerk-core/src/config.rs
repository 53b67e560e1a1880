// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session manager configuration.

use serde::{Deserialize, Serialize};

/// Operational settings for the ad session manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdConfig {
    /// Minimum interval between forwarded scroll-sync events, in
    /// milliseconds. The default tracks a 60 fps refresh.
    pub scroll_throttle_ms: u64,
    /// Whether handles cleared at teardown are handed back to the SDK
    /// adapter for disposal. Disable only when the host keeps native ad
    /// views attached past plugin teardown.
    pub dispose_on_teardown: bool,
}

impl Default for AdConfig {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: 16,
            dispose_on_teardown: true,
        }
    }
}
