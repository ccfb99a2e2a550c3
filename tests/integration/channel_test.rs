//! Host link tests through the public library API

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tuneframe::channel::{spawn_path_reader, ConfigChannel, HostLink, OriginPolicy, SourceUpdate};

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Drain until `count` updates arrived or five seconds passed.
fn collect_updates(channel: &mut ConfigChannel, count: usize) -> Vec<SourceUpdate> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut updates = Vec::new();
    while updates.len() < count && Instant::now() < deadline {
        updates.extend(channel.drain());
        std::thread::sleep(Duration::from_millis(10));
    }
    updates
}

#[test]
fn host_file_drives_source_updates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("host-in.jsonl");
    std::fs::write(
        &path,
        concat!(
            "{\"audioSrc\":\"https://cdn.example/one.mp3\"}\n",
            "not json at all\n",
            "{\"audioSrc\":42}\n",
            "{\"origin\":\"https://blog.example\",\"data\":{\"audioSrc\":\"/music/two.flac\"}}\n",
        ),
    )
    .unwrap();

    let mut channel = ConfigChannel::new(OriginPolicy::Any, Duration::from_millis(500));
    let inbound = spawn_path_reader(path).unwrap();
    channel.mount(Instant::now(), HostLink::new(Some(inbound), None));

    let updates = collect_updates(&mut channel, 2);
    let sources: Vec<&str> = updates.iter().map(|u| u.source.as_str()).collect();
    assert_eq!(sources, ["https://cdn.example/one.mp3", "/music/two.flac"]);
    assert_eq!(updates[1].origin.as_deref(), Some("https://blog.example"));
}

#[test]
fn exact_origin_policy_filters_messages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("host-in.jsonl");
    std::fs::write(
        &path,
        concat!(
            "{\"origin\":\"https://evil.example\",\"data\":{\"audioSrc\":\"bad.mp3\"}}\n",
            "{\"origin\":\"https://blog.example\",\"data\":{\"audioSrc\":\"good.mp3\"}}\n",
        ),
    )
    .unwrap();

    let policy = OriginPolicy::Exact("https://blog.example".to_string());
    let mut channel = ConfigChannel::new(policy, Duration::from_millis(500));
    channel.mount(
        Instant::now(),
        HostLink::new(Some(spawn_path_reader(path).unwrap()), None),
    );

    let updates = collect_updates(&mut channel, 1);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].source, "good.mp3");
}

#[test]
fn ready_signal_is_written_once_after_delay() {
    let sink = SharedSink::default();
    let mut channel = ConfigChannel::new(OriginPolicy::Any, Duration::from_millis(500));
    let start = Instant::now();
    channel.mount(start, HostLink::new(None, Some(Box::new(sink.clone()))));

    assert!(!channel.poll_ready(start + Duration::from_millis(499)));
    assert!(channel.poll_ready(start + Duration::from_millis(500)));
    assert!(!channel.poll_ready(start + Duration::from_secs(10)));

    let written = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
    assert_eq!(written.lines().count(), 1);
    insta::assert_snapshot!(written.trim_end(), @r#"{"status":"ready","type":"audioPlayer"}"#);
}
