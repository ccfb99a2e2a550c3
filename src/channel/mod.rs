//! Configuration channel between the widget and its host.
//!
//! On mount the channel registers an inbound listener and, after a short
//! delay that gives the host time to attach its own listener, sends a single
//! ready signal. Inbound messages carrying an `audioSrc` replace the source.
//!
//! - `message`: inbound/outbound message shapes
//! - `origin`: origin trust policy
//! - `reader`: host input reader thread

mod message;
mod origin;
mod reader;

pub use message::{InboundMessage, ReadyMessage, AUDIO_SOURCE_FIELD};
pub use origin::OriginPolicy;
pub use reader::{reader_loop, spawn_path_reader, spawn_reader};

use std::io::Write;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

/// Default delay between mount and the ready signal.
pub const DEFAULT_READY_DELAY: Duration = Duration::from_millis(500);

/// Streams connecting the widget to its host.
#[derive(Default)]
pub struct HostLink {
    /// Inbound lines, fed by a reader thread
    pub inbound: Option<Receiver<String>>,
    /// Where the ready signal is written
    pub outbound: Option<Box<dyn Write + Send>>,
}

impl HostLink {
    pub fn new(inbound: Option<Receiver<String>>, outbound: Option<Box<dyn Write + Send>>) -> Self {
        Self { inbound, outbound }
    }
}

/// A request from the host to replace the audio source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUpdate {
    pub source: String,
    pub origin: Option<String>,
}

/// Readiness handshake and inbound source listener.
pub struct ConfigChannel {
    policy: OriginPolicy,
    ready_delay: Duration,
    ready_due: Option<Instant>,
    ready_sent: bool,
    link: HostLink,
    mounted: bool,
}

impl ConfigChannel {
    pub fn new(policy: OriginPolicy, ready_delay: Duration) -> Self {
        Self {
            policy,
            ready_delay,
            ready_due: None,
            ready_sent: false,
            link: HostLink::default(),
            mounted: false,
        }
    }

    pub fn policy(&self) -> &OriginPolicy {
        &self.policy
    }

    /// Attach the host link and schedule the ready signal.
    pub fn mount(&mut self, now: Instant, link: HostLink) {
        self.link = link;
        self.mounted = true;
        self.ready_sent = false;
        self.ready_due = Some(now + self.ready_delay);
        debug!(delay_ms = self.ready_delay.as_millis() as u64, "host channel mounted");
    }

    /// Remove the inbound listener and drop the host streams.
    pub fn unmount(&mut self) {
        self.link = HostLink::default();
        self.ready_due = None;
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the ready signal has gone out.
    pub fn is_ready(&self) -> bool {
        self.ready_sent
    }

    /// Time left until the ready signal is due.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        self.ready_due.map(|due| due.saturating_duration_since(now))
    }

    /// Send the ready signal if it is due. Returns true when it was sent by
    /// this call; it is sent at most once per mount.
    pub fn poll_ready(&mut self, now: Instant) -> bool {
        match self.ready_due {
            Some(due) if due <= now => {}
            _ => return false,
        }
        self.ready_due = None;
        self.ready_sent = true;

        let Some(outbound) = self.link.outbound.as_mut() else {
            info!(target_origin = self.policy.target(), "ready (no host output attached)");
            return true;
        };
        match write_ready(outbound) {
            Ok(()) => info!(target_origin = self.policy.target(), "ready signal sent"),
            Err(e) => warn!(error = %e, "failed to send ready signal"),
        }
        true
    }

    /// Drain pending inbound lines into source updates.
    pub fn drain(&mut self) -> Vec<SourceUpdate> {
        let mut lines = Vec::new();
        let mut disconnected = false;
        if let Some(inbound) = self.link.inbound.as_ref() {
            loop {
                match inbound.try_recv() {
                    Ok(line) => lines.push(line),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }
        if disconnected {
            debug!("host input disconnected");
            self.link.inbound = None;
        }
        lines.iter().filter_map(|line| self.handle_line(line)).collect()
    }

    /// Interpret one inbound line.
    pub fn handle_line(&self, line: &str) -> Option<SourceUpdate> {
        let Some(message) = InboundMessage::parse(line) else {
            debug!(line, "ignoring non-JSON host message");
            return None;
        };
        if !self.policy.allows(message.origin.as_deref()) {
            debug!(origin = ?message.origin, "ignoring message from disallowed origin");
            return None;
        }
        let Some(source) = message.audio_source() else {
            debug!("ignoring host message without audio source");
            return None;
        };
        info!(source, origin = ?message.origin, "host replaced audio source");
        Some(SourceUpdate {
            source: source.to_string(),
            origin: message.origin.clone(),
        })
    }
}

fn write_ready(out: &mut dyn Write) -> std::io::Result<()> {
    let json = serde_json::to_string(&ReadyMessage::default())?;
    writeln!(out, "{json}")?;
    out.flush()
}
