//! Source resolution and duration probing.
//!
//! A source string is either an `http(s)://` URL (fetched with reqwest), a
//! `file://` URL, or a bare filesystem path. The bytes are probed with
//! symphonia to find the track duration, which is all the media clock needs
//! to become loaded.

use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;
use url::Url;

use super::error::MediaError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where an audio source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Remote(Url),
    Local(PathBuf),
}

impl SourceLocation {
    /// Resolve a source string.
    pub fn parse(source: &str) -> Result<Self, MediaError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(MediaError::InvalidSource {
                source_url: source.to_string(),
                message: "empty source".to_string(),
            });
        }

        match Url::parse(trimmed) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(Self::Local)
                    .map_err(|_| MediaError::InvalidSource {
                        source_url: trimmed.to_string(),
                        message: "not a local file path".to_string(),
                    }),
                // Windows drive letters parse as a one-letter scheme.
                scheme if scheme.len() == 1 => Ok(Self::Local(PathBuf::from(trimmed))),
                scheme => Err(MediaError::UnsupportedScheme(scheme.to_string())),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Self::Local(PathBuf::from(trimmed))),
            Err(e) => Err(MediaError::InvalidSource {
                source_url: trimmed.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// File extension used as a format hint for the prober.
    pub fn extension(&self) -> Option<String> {
        let path = match self {
            Self::Remote(url) => Path::new(url.path()).to_path_buf(),
            Self::Local(path) => path.clone(),
        };
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    fn open(&self) -> Result<Box<dyn MediaSource>, MediaError> {
        match self {
            Self::Local(path) => {
                let file = File::open(path).map_err(|source| MediaError::OpenFailed {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(file))
            }
            Self::Remote(url) => {
                let fetch_failed = |e: reqwest::Error| MediaError::FetchFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                };
                let client = reqwest::blocking::Client::builder()
                    .timeout(FETCH_TIMEOUT)
                    .build()
                    .map_err(fetch_failed)?;
                let bytes = client
                    .get(url.as_str())
                    .send()
                    .and_then(|response| response.error_for_status())
                    .and_then(|response| response.bytes())
                    .map_err(fetch_failed)?;
                debug!(url = %url, bytes = bytes.len(), "fetched source");
                Ok(Box::new(Cursor::new(bytes)))
            }
        }
    }
}

/// Resolve, fetch and probe a source, returning its duration in seconds.
pub fn probe_source(source: &str) -> Result<f64, MediaError> {
    let location = SourceLocation::parse(source)?;
    let extension = location.extension();
    let stream = location.open()?;
    probe_duration(stream, extension.as_deref())
}

/// Probe an opened media stream for the duration of its first audio track.
pub fn probe_duration(source: Box<dyn MediaSource>, extension: Option<&str>) -> Result<f64, MediaError> {
    let mss = MediaSourceStream::new(source, Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| MediaError::UnrecognizedFormat(e.to_string()))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(MediaError::NoAudioTrack)?;

    let params = &track.codec_params;
    let frames = params.n_frames.ok_or(MediaError::UnknownDuration)?;
    match (params.time_base, params.sample_rate) {
        (Some(time_base), _) => {
            let time = time_base.calc_time(frames);
            Ok(time.seconds as f64 + time.frac)
        }
        (None, Some(rate)) if rate > 0 => Ok(frames as f64 / rate as f64),
        _ => Err(MediaError::UnknownDuration),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// Build a mono 16-bit PCM WAV file of silence.
    pub(crate) fn wav_bytes(sample_rate: u32, seconds: u32) -> Vec<u8> {
        let samples = sample_rate * seconds;
        let data_len = samples * 2;
        let mut bytes = Vec::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(44 + data_len as usize, 0);
        bytes
    }

    #[test]
    fn parses_remote_urls() {
        let location = SourceLocation::parse("https://example.com/a/track.MP3").unwrap();
        assert!(matches!(location, SourceLocation::Remote(_)));
        assert_eq!(location.extension().as_deref(), Some("mp3"));
    }

    #[test]
    fn parses_bare_paths_and_file_urls() {
        assert_eq!(
            SourceLocation::parse("music/loop.wav").unwrap(),
            SourceLocation::Local(PathBuf::from("music/loop.wav"))
        );
        assert_eq!(
            SourceLocation::parse("file:///tmp/loop.ogg").unwrap(),
            SourceLocation::Local(PathBuf::from("/tmp/loop.ogg"))
        );
    }

    #[test]
    fn rejects_empty_and_unknown_schemes() {
        assert!(matches!(
            SourceLocation::parse("   "),
            Err(MediaError::InvalidSource { .. })
        ));
        assert!(matches!(
            SourceLocation::parse("ftp://example.com/a.mp3"),
            Err(MediaError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn probes_wav_duration_from_memory() {
        let bytes = wav_bytes(8000, 2);
        let duration = probe_duration(Box::new(Cursor::new(bytes)), Some("wav")).unwrap();
        assert!((duration - 2.0).abs() < 1e-6);
    }

    #[test]
    fn probes_wav_duration_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(&wav_bytes(8000, 3)).unwrap();

        let duration = probe_source(file.path().to_str().unwrap()).unwrap();
        assert!((duration - 3.0).abs() < 1e-6);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = probe_source("/definitely/not/here.wav").unwrap_err();
        assert!(matches!(err, MediaError::OpenFailed { .. }));
    }

    #[test]
    fn garbage_is_unrecognized() {
        let bytes = b"this is not audio at all".to_vec();
        let err = probe_duration(Box::new(Cursor::new(bytes)), None).unwrap_err();
        assert!(matches!(err, MediaError::UnrecognizedFormat(_)));
    }
}
