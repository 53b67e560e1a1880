// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory registry of live ad sessions.
//
// The registry owns every native ad handle the SDK has handed over and is
// the only mapping from host-visible session ids back to those handles.
// Entries are insert-only: never mutated in place, never removed
// individually — release happens in bulk at teardown via `clear`.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use werbewerk_bridge::AdHandle;
use werbewerk_core::types::AdSessionId;

/// One successfully loaded native ad, held until teardown.
#[derive(Clone)]
pub struct AdSession {
    pub id: AdSessionId,
    /// Opaque native handle. Only the SDK adapter and the attribute
    /// extractor interpret it.
    pub ad: AdHandle,
    /// Ad unit that produced this session.
    pub ad_unit_id: String,
    pub loaded_at: DateTime<Utc>,
}

/// Registry mapping session ids to live native ad handles.
///
/// Safe under concurrent `put` from multiple in-flight load completions.
/// Growth is unbounded by design: ads loaded but never torn down
/// accumulate until the next `clear` — the load/report contract has no
/// per-ad release operation.
pub struct AdRegistry {
    sessions: Mutex<HashMap<AdSessionId, AdSession>>,
}

impl AdRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Register a freshly loaded ad and return its new session id.
    ///
    /// Id generation and insertion happen under one guard, so concurrent
    /// load completions cannot interleave between minting an id and
    /// storing the handle.
    #[instrument(skip(self, ad))]
    pub fn put(&self, ad_unit_id: &str, ad: AdHandle) -> AdSessionId {
        let mut sessions = self.sessions.lock().expect("registry lock poisoned");
        let id = AdSessionId::new();
        sessions.insert(
            id,
            AdSession {
                id,
                ad,
                ad_unit_id: ad_unit_id.to_string(),
                loaded_at: Utc::now(),
            },
        );
        debug!(ad_id = %id, "ad session registered");
        id
    }

    /// Look up the handle for a session id. Does not remove the entry.
    pub fn get(&self, id: &AdSessionId) -> Option<AdHandle> {
        let sessions = self.sessions.lock().expect("registry lock poisoned");
        sessions.get(id).map(|session| session.ad.clone())
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return every stored handle, for teardown disposal.
    ///
    /// Idempotent: clearing an empty registry returns an empty vec.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Vec<AdHandle> {
        let mut sessions = self.sessions.lock().expect("registry lock poisoned");
        let handles: Vec<AdHandle> = sessions.drain().map(|(_, session)| session.ad).collect();
        debug!(count = handles.len(), "registry cleared");
        handles
    }
}

impl Default for AdRegistry {
    fn default() -> Self {
        Self::new()
    }
}
