//! Rodio-backed media elements.
//!
//! The backend owns the output stream and builds one paused `Sink` per
//! track, skipped to the requested start position. Elapsed time is tracked
//! with an `Instant` plus the accumulated pre-pause duration, since the sink
//! itself does not report a position for skipped sources.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::media::{MediaBackend, MediaElement, MediaError, MediaSignal};

pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    /// Open the default output device. The stream must live on the thread
    /// that owns playback.
    pub fn open_default() -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| MediaError::Start(format!("no audio output device: {e}")))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl MediaBackend for RodioBackend {
    type Element = RodioElement;

    fn open_at(&self, source: &str, start: Duration) -> Result<RodioElement, MediaError> {
        let file = File::open(source).map_err(|e| MediaError::Open {
            path: source.to_string(),
            cause: e,
        })?;

        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| MediaError::Decode {
            path: source.to_string(),
            cause: e.to_string(),
        })?;
        let duration = decoder.total_duration();

        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(decoder.skip_duration(start));
        sink.pause();

        let mut pending = VecDeque::new();
        pending.push_back(MediaSignal::MetadataLoaded { duration });

        Ok(RodioElement {
            sink,
            duration,
            base: start,
            started_at: None,
            pending,
            ended: false,
        })
    }
}

pub struct RodioElement {
    sink: Sink,
    duration: Option<Duration>,
    /// Position accumulated up to the last pause or the open offset.
    base: Duration,
    /// Set while the sink is rolling, `None` while paused.
    started_at: Option<Instant>,
    pending: VecDeque<MediaSignal>,
    ended: bool,
}

impl MediaElement for RodioElement {
    fn request_play(&mut self) -> Result<(), MediaError> {
        self.sink.play();
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        // Local decode has no readiness gap: a started sink can play through.
        self.pending.push_back(MediaSignal::Ready);
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
        if let Some(st) = self.started_at.take() {
            self.base += st.elapsed();
        }
    }

    fn position(&self) -> Duration {
        self.base + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn take_signal(&mut self) -> Option<MediaSignal> {
        if let Some(sig) = self.pending.pop_front() {
            return Some(sig);
        }
        // An exhausted sink that was rolling means natural end of media.
        if !self.ended && self.started_at.is_some() && self.sink.empty() {
            self.ended = true;
            return Some(MediaSignal::Ended);
        }
        None
    }
}
