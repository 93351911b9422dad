//! Seekable playback of one decoded file.
//!
//! `Transport` is the seam between the playback engine and the audio
//! backend. `RodioTransport` drives a rodio `Sink` attached to the shared
//! output mixer; the sink's controls are read by the audio thread without
//! any locking on our side.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, Sink, Source};

use super::DeckError;
use super::output::AudioOutput;

pub trait Transport {
    /// Replace the current source with `path`, paused at its start.
    /// On error the previous source stays in place.
    fn load(&mut self, path: &Path) -> Result<(), DeckError>;
    fn is_loaded(&self) -> bool;
    fn play(&mut self);
    /// Halt playback without moving the position.
    fn pause(&mut self);
    /// Whether audio is running. False once the source has played out.
    fn is_playing(&self) -> bool;
    /// Current position in seconds of source time.
    fn position(&self) -> f64;
    fn set_position(&mut self, seconds: f64);
    /// Length of the loaded source in seconds, 0 when nothing is loaded.
    fn length(&self) -> f64;
    fn set_gain(&mut self, gain: f32);
    fn gain(&self) -> f32;
    fn set_speed(&mut self, ratio: f64);
    fn speed(&self) -> f64;
}

// rodio derives the output sample rate from the speed factor, so a factor
// of zero would stall the resampler.
const MIN_SINK_SPEED: f32 = 0.01;

struct LoadedSource {
    path: PathBuf,
    length: Duration,
}

pub struct RodioTransport {
    sink: Sink,
    source: Option<LoadedSource>,
    /// Source time already skipped when the sink was rebuilt mid-track.
    /// `Sink::get_pos` counts from the rebuilt source's first sample.
    offset: Duration,
    playing: bool,
    speed: f64,
}

pub(super) fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, DeckError> {
    let file = File::open(path).map_err(|source| DeckError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Decoder::new(BufReader::new(file)).map_err(|source| DeckError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Fall back to container metadata when the decoder cannot tell the length.
fn tagged_length(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}

impl RodioTransport {
    pub fn new(output: &AudioOutput) -> Self {
        Self::with_sink(Sink::connect_new(output.mixer()))
    }

    fn with_sink(sink: Sink) -> Self {
        sink.pause();
        Self {
            sink,
            source: None,
            offset: Duration::ZERO,
            playing: false,
            speed: 1.0,
        }
    }

    /// rodio drops a source once it has played out. The transport then
    /// rests at the end until `play` restarts it; seeking must not resume it.
    fn settle_if_played_out(&mut self) {
        if self.playing && self.sink.empty() {
            self.playing = false;
            self.sink.pause();
        }
    }

    /// Reopen the current file and skip to `at`. Used when the decoder
    /// cannot seek, and to restart a source that already played out.
    fn rebuild_at(&mut self, at: Duration) -> Result<(), DeckError> {
        let Some(current) = &self.source else {
            return Ok(());
        };
        let decoder = open_decoder(&current.path)?;

        self.sink.clear();
        self.sink.append(decoder.skip_duration(at));
        self.offset = at;
        if self.playing {
            self.sink.play();
        }
        Ok(())
    }
}

impl Transport for RodioTransport {
    fn load(&mut self, path: &Path) -> Result<(), DeckError> {
        let decoder = open_decoder(path)?;
        let length = decoder
            .total_duration()
            .or_else(|| tagged_length(path))
            .unwrap_or(Duration::ZERO);

        // `clear` also pauses the sink.
        self.sink.clear();
        self.sink.append(decoder);
        self.source = Some(LoadedSource {
            path: path.to_path_buf(),
            length,
        });
        self.offset = Duration::ZERO;
        self.playing = false;

        log::info!("Loaded {} ({:.1}s)", path.display(), length.as_secs_f64());
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    fn play(&mut self) {
        if self.source.is_none() {
            return;
        }
        self.playing = true;
        if self.sink.empty() {
            if let Err(e) = self.rebuild_at(Duration::ZERO) {
                log::error!("Cannot restart playback: {e}");
                self.playing = false;
                return;
            }
        }
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing && !self.sink.empty()
    }

    fn position(&self) -> f64 {
        match &self.source {
            None => 0.0,
            // Played out: the transport rests at the end.
            Some(current) if self.sink.empty() => current.length.as_secs_f64(),
            Some(_) => (self.offset + self.sink.get_pos()).as_secs_f64(),
        }
    }

    fn set_position(&mut self, seconds: f64) {
        if self.source.is_none() {
            return;
        }
        if !seconds.is_finite() {
            log::warn!("Ignoring seek to non-finite position {seconds}");
            return;
        }
        // Durations cannot be negative; earlier positions start from 0.
        let at = Duration::from_secs_f64(seconds.max(0.0));
        self.settle_if_played_out();

        if !self.sink.empty() {
            match self.sink.try_seek(at) {
                Ok(()) => {
                    self.offset = Duration::ZERO;
                    return;
                }
                Err(e) => log::debug!("Decoder seek failed ({e}), reopening source"),
            }
        }
        if let Err(e) = self.rebuild_at(at) {
            log::error!("Seek to {seconds:.2}s failed: {e}");
        }
    }

    fn length(&self) -> f64 {
        self.source
            .as_ref()
            .map(|s| s.length.as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_gain(&mut self, gain: f32) {
        self.sink.set_volume(gain);
    }

    fn gain(&self) -> f32 {
        self.sink.volume()
    }

    fn set_speed(&mut self, ratio: f64) {
        self.speed = ratio;
        self.sink.set_speed((ratio as f32).max(MIN_SINK_SPEED));
    }

    fn speed(&self) -> f64 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use rodio::buffer::SamplesBuffer;
    use rodio::queue::SourcesQueueOutput;

    use super::*;

    /// A transport on a detached sink, holding 0.1 s of audio in place of a
    /// decoded file. The file itself does not exist.
    fn buffered_transport() -> (RodioTransport, SourcesQueueOutput) {
        let (sink, output) = Sink::new();
        let mut transport = RodioTransport::with_sink(sink);
        transport
            .sink
            .append(SamplesBuffer::new(1, 1_000, vec![0.25f32; 100]));
        transport.source = Some(LoadedSource {
            path: PathBuf::from("/nonexistent/duodeck-test.wav"),
            length: Duration::from_millis(100),
        });
        (transport, output)
    }

    /// Pull samples the way the output device would until the sink drops the source.
    fn play_out(transport: &RodioTransport, output: &mut SourcesQueueOutput) {
        for _ in 0..10_000 {
            if transport.sink.empty() {
                return;
            }
            output.next();
        }
        panic!("source never finished");
    }

    #[test]
    fn pause_holds_the_sink() {
        let (mut transport, _output) = buffered_transport();

        transport.play();
        assert!(transport.is_playing());
        assert!(!transport.sink.is_paused());

        transport.pause();
        assert!(!transport.is_playing());
        assert!(transport.sink.is_paused());
    }

    #[test]
    fn played_out_source_rests_at_its_end() {
        let (mut transport, mut output) = buffered_transport();
        transport.play();

        play_out(&transport, &mut output);

        assert!(!transport.is_playing());
        assert_eq!(transport.position(), 0.1);
    }

    #[test]
    fn seek_after_the_end_does_not_resume_playback() {
        let (mut transport, mut output) = buffered_transport();
        transport.play();
        play_out(&transport, &mut output);

        transport.set_position(0.05);

        assert!(transport.sink.is_paused());
        assert!(!transport.is_playing());
    }

    #[test]
    fn play_after_the_end_reopens_the_file() {
        let (mut transport, mut output) = buffered_transport();
        transport.play();
        play_out(&transport, &mut output);

        // Reopening fails here, so the transport stays halted.
        transport.play();

        assert!(!transport.is_playing());
    }
}
