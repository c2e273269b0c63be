//! Scan session controller: decode events in, settled outcomes out.
//!
//! One lookup is in flight at most. On a fresh decode the controller stops
//! the engine *before* issuing the lookup, so a late decode callback can
//! never interleave with a settling result; a failure at either step is
//! captured into the same [`LookupResult::Failed`] shape.

use bscan_core::{ErrorKind, LookupFailure, LookupResult, ProductLookup};

use crate::engine::ScanEngine;
use crate::session::{ScanSession, SessionState};

/// Decode-failure messages the engine emits continuously while no code is
/// in frame. These are noise, not faults.
const EXPECTED_FAILURES: [&str; 2] = ["No MultiFormat Readers", "No barcode or QR code detected"];

/// Owns the scan lifecycle: the session state machine, the engine handle,
/// and the lookup seam.
pub struct ScanController<E, L> {
    engine: E,
    lookup: L,
    session: ScanSession,
    last_result: Option<LookupResult>,
}

impl<E: ScanEngine, L: ProductLookup> ScanController<E, L> {
    pub fn new(engine: E, lookup: L) -> Self {
        Self {
            engine,
            lookup,
            session: ScanSession::new(),
            last_result: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// The most recently settled outcome, until the next restart.
    #[must_use]
    pub fn last_result(&self) -> Option<&LookupResult> {
        self.last_result.as_ref()
    }

    /// Begins accepting decode events. A no-op unless the session is idle.
    pub fn start(&mut self) {
        match self.session.state() {
            SessionState::Idle => {
                self.session.begin_scanning();
                tracing::info!("scan session started");
            }
            state => {
                tracing::debug!(?state, "start ignored; session already active");
            }
        }
    }

    /// The "scan another" action: back to idle, dedup memory and previous
    /// outcome cleared.
    pub fn restart(&mut self) {
        self.session.reset();
        self.last_result = None;
    }

    /// Handles a successful decode callback from the engine.
    ///
    /// Returns the settled [`LookupResult`] for a fresh decode, or `None`
    /// when the event is ignored: a repeat of the immediately-previous
    /// decoded text (continuous-frame rescans of the same code), or any
    /// decode arriving while the session is not scanning.
    pub async fn on_decode_success(&mut self, text: &str) -> Option<LookupResult> {
        if self.session.state() != SessionState::Scanning {
            tracing::debug!(text, state = ?self.session.state(), "decode ignored outside scanning state");
            return None;
        }
        if self.session.last_barcode() == Some(text) {
            tracing::debug!(text, "duplicate consecutive decode ignored");
            return None;
        }

        tracing::info!(text, "decoded a new code");
        self.session.begin_resolving(text);

        // Engine stop must complete before the lookup begins.
        let result = match self.engine.stop().await {
            Ok(()) => self.lookup.lookup(text).await,
            Err(err) => {
                tracing::warn!(error = %err, "scan engine failed to stop");
                LookupResult::Failed(LookupFailure::new(
                    ErrorKind::InternalError,
                    err.to_string(),
                ))
            }
        };

        self.session.settle(&result);
        self.last_result = Some(result.clone());
        Some(result)
    }

    /// Handles a decode-failure callback. Never a state transition: the
    /// engine fires these continuously while no code is in frame.
    pub fn on_decode_failure(&self, message: &str) {
        if EXPECTED_FAILURES
            .iter()
            .any(|expected| message.contains(expected))
        {
            tracing::debug!(message, "no code in frame");
        } else {
            tracing::warn!(message, "unexpected scan failure");
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
