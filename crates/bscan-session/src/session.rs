//! Scan lifecycle state.

use bscan_core::LookupResult;

/// Lifecycle of one scan-and-lookup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scanning,
    Resolving,
    Resolved,
    Error,
}

/// Mutable session state, owned exclusively by its controller.
///
/// One instance per controller; `reset` is the "scan another" action and
/// clears the consecutive-decode memory so the same code can be scanned
/// again in the next pass.
#[derive(Debug)]
pub struct ScanSession {
    state: SessionState,
    last_barcode: Option<String>,
}

impl ScanSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            last_barcode: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn last_barcode(&self) -> Option<&str> {
        self.last_barcode.as_deref()
    }

    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.last_barcode = None;
    }

    pub(crate) fn begin_scanning(&mut self) {
        self.state = SessionState::Scanning;
    }

    pub(crate) fn begin_resolving(&mut self, barcode: &str) {
        self.state = SessionState::Resolving;
        self.last_barcode = Some(barcode.to_owned());
    }

    /// `Found` and `NotFound` both resolve the session — a miss is an
    /// informational outcome, not a fault. Only `Failed` is an error.
    pub(crate) fn settle(&mut self, result: &LookupResult) {
        self.state = match result {
            LookupResult::Failed(_) => SessionState::Error,
            LookupResult::Found { .. } | LookupResult::NotFound { .. } => SessionState::Resolved,
        };
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}
