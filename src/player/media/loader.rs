//! Background worker for source loading
//!
//! Fetching and probing a source can block on the network, so it runs on a
//! dedicated thread. Requests and outcomes travel over channels and carry
//! the load ticket, letting the media clock drop outcomes of superseded loads.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::MediaError;
use super::source::probe_source;
use super::LoadTicket;

/// A source to resolve and probe.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub source: String,
}

/// Result of a background load operation.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The ticket of the load that was requested
    pub ticket: LoadTicket,
    /// The probed duration, or why probing failed
    pub result: Result<f64, MediaError>,
}

/// Background worker loop that processes load requests.
///
/// Receives requests from `request_rx`, calls `probe` for each one and sends
/// the outcome back via `result_tx`. Requests queued behind a newer one are
/// skipped since the newer source replaces them. Exits when the request
/// channel is closed (all senders dropped).
pub fn worker_loop(
    request_rx: Receiver<LoadRequest>,
    result_tx: Sender<LoadOutcome>,
    probe: impl Fn(&str) -> Result<f64, MediaError>,
) {
    while let Ok(mut request) = request_rx.recv() {
        while let Ok(newer) = request_rx.try_recv() {
            debug!(skipped = %request.source, "load superseded before start");
            request = newer;
        }
        let result = probe(&request.source);
        // Ignore send errors (the widget may have been torn down)
        let _ = result_tx.send(LoadOutcome {
            ticket: request.ticket,
            result,
        });
    }
}

/// Handle on the loader thread.
///
/// Dropping the handle closes the request channel; the worker exits once
/// its current probe returns.
pub struct Loader {
    request_tx: Sender<LoadRequest>,
    result_rx: Receiver<LoadOutcome>,
}

impl Loader {
    /// Spawn a loader that fetches and probes real sources.
    pub fn spawn() -> std::io::Result<Self> {
        Self::with_probe(probe_source)
    }

    /// Spawn a loader with a custom probe function.
    pub fn with_probe<F>(probe: F) -> std::io::Result<Self>
    where
        F: Fn(&str) -> Result<f64, MediaError> + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        thread::Builder::new()
            .name("tuneframe-loader".to_string())
            .spawn(move || worker_loop(request_rx, result_tx, probe))?;
        Ok(Self {
            request_tx,
            result_rx,
        })
    }

    /// Queue a source for loading.
    pub fn request(&self, ticket: LoadTicket, source: &str) {
        let request = LoadRequest {
            ticket,
            source: source.to_string(),
        };
        if self.request_tx.send(request).is_err() {
            warn!(source, "loader thread is gone, load dropped");
        }
    }

    /// Next finished load, if any, without blocking.
    pub fn try_next(&self) -> Option<LoadOutcome> {
        match self.result_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next finished load.
    pub fn next_timeout(&self, timeout: Duration) -> Option<LoadOutcome> {
        match self.result_rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}
