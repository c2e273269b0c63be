//! Contract with the external barcode-decoding engine.
//!
//! The engine owns the camera and invokes decode callbacks continuously;
//! the controller's only demand on it is to stop. The decode callbacks
//! themselves arrive through [`crate::ScanController::on_decode_success`]
//! and [`crate::ScanController::on_decode_failure`].

use std::future::Future;

use thiserror::Error;

/// Failure reported by the engine while releasing the camera.
#[derive(Debug, Error)]
#[error("scan engine error: {0}")]
pub struct EngineError(pub String);

/// The external decoding engine, as the controller sees it.
pub trait ScanEngine {
    /// Stops decoding; resolves once the camera is released.
    fn stop(&mut self) -> impl Future<Output = Result<(), EngineError>> + Send;
}
