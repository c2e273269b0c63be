pub mod controller;
pub mod engine;
pub mod session;

pub use controller::ScanController;
pub use engine::{EngineError, ScanEngine};
pub use session::{ScanSession, SessionState};
