// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Werbewerk.

use thiserror::Error;

/// Top-level error type for all Werbewerk operations.
///
/// Every host-facing call resolves to exactly one `Ok` or one of these;
/// none is fatal and none is retried internally — retry is the host's
/// decision, made by re-issuing the call.
#[derive(Debug, Error)]
pub enum WerbewerkError {
    // -- Argument validation --
    #[error("app ID is required")]
    MissingAppId,

    #[error("ad unit ID is required")]
    MissingAdUnitId,

    #[error("ad ID is required")]
    MissingAdId,

    // -- Preconditions --
    #[error("ad network must be initialized before loading ads")]
    NotInitialized,

    #[error("no host context available")]
    NoHostContext,

    // -- Session lookup --
    #[error("ad not found with ID: {0}")]
    SessionNotFound(String),

    // -- SDK adapter --
    #[error("failed to initialize ad network: {0}")]
    Init(String),

    #[error("ad failed to load: {0}")]
    AdLoad(String),

    #[error("ad attribute extraction failed: {0}")]
    Extraction(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Transport --
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WerbewerkError>;
