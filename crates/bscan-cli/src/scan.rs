//! Stdin-driven scan session.
//!
//! Each line stands in for a decode-success callback from a camera engine;
//! the controller applies the same dedup and stop-then-lookup sequencing a
//! camera-backed deployment gets.

use std::future::Future;

use tokio::io::{AsyncBufReadExt, BufReader};

use bscan_providers::LookupGateway;
use bscan_session::{EngineError, ScanController, ScanEngine};

use crate::render;

/// Engine stand-in for terminal input: there is no camera to release, so
/// stopping always completes immediately.
struct ConsoleEngine;

impl ScanEngine for ConsoleEngine {
    fn stop(&mut self) -> impl Future<Output = Result<(), EngineError>> + Send {
        tracing::debug!("console scan input paused");
        std::future::ready(Ok(()))
    }
}

pub async fn run(gateway: LookupGateway) -> anyhow::Result<()> {
    let mut controller = ScanController::new(ConsoleEngine, gateway);
    controller.start();
    println!("Enter decoded barcodes, one per line (blank line or EOF quits):");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim().to_owned();
        if text.is_empty() {
            break;
        }
        if let Some(result) = controller.on_decode_success(&text).await {
            render::render_lookup(&result);
            // Scan-another: reset the session and accept the next line.
            controller.restart();
            controller.start();
            println!();
        }
    }

    println!("scan session closed");
    Ok(())
}
