//! Background writer for the analytics file.
//!
//! Drains the access event channel and appends one JSON line per event.

use std::path::PathBuf;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::domain::access_event::AccessEvent;

/// Appends access events to the analytics file until the channel closes.
///
/// The sender decides which events are worth recording. Write failures are
/// logged and the event is lost; the worker keeps running.
pub async fn run_access_worker(mut rx: mpsc::Receiver<AccessEvent>, path: PathBuf) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        && let Err(e) = fs::create_dir_all(parent).await
    {
        error!("Failed to create analytics directory {}: {}", parent.display(), e);
    }

    let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to open analytics file {}: {}", path.display(), e);
            // Keep draining so senders never see a closed channel.
            while rx.recv().await.is_some() {}
            return;
        }
    };
    info!("Access worker writing to {}", path.display());

    while let Some(event) = rx.recv().await {
        let mut line = match event.to_line() {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize access event: {}", e);
                continue;
            }
        };
        line.push('\n');

        if let Err(e) = file.write_all(line.as_bytes()).await {
            error!("Failed to append access event: {}", e);
            continue;
        }
        if let Err(e) = file.flush().await {
            error!("Failed to flush analytics file: {}", e);
        }
        debug!("Recorded access to {}", event.url);
    }

    info!("Access worker stopped");
}
