//! Host input reader.
//!
//! Reads inbound lines on a dedicated thread and forwards them over a
//! channel. The thread exits at end of stream, on a read error, or once the
//! receiving side (the channel listener) has been dropped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, warn};

/// Forward every line of `input` to `line_tx` until either side closes.
pub fn reader_loop(input: impl BufRead, line_tx: Sender<String>) {
    for line in input.lines() {
        match line {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => {
                if line_tx.send(line).is_err() {
                    debug!("host listener removed, reader exiting");
                    return;
                }
            }
            Err(e) => {
                warn!(error = %e, "host input read failed");
                return;
            }
        }
    }
    debug!("host input closed");
}

/// Spawn a reader over an already open stream.
pub fn spawn_reader<R>(input: R) -> std::io::Result<Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (line_tx, line_rx) = mpsc::channel();
    thread::Builder::new()
        .name("tuneframe-host-in".to_string())
        .spawn(move || reader_loop(input, line_tx))?;
    Ok(line_rx)
}

/// Spawn a reader that opens `path` itself.
///
/// Opening a FIFO blocks until the host connects, so the open happens on
/// the reader thread rather than on the event loop.
pub fn spawn_path_reader(path: PathBuf) -> std::io::Result<Receiver<String>> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::Builder::new()
        .name("tuneframe-host-in".to_string())
        .spawn(move || match File::open(&path) {
            Ok(file) => reader_loop(BufReader::new(file), line_tx),
            Err(e) => warn!(path = %path.display(), error = %e, "cannot open host input"),
        })?;
    Ok(line_rx)
}
