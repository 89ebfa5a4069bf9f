//! Rodio-based media element
//!
//! Plays a local audio file through the default output device. rodio has
//! no callbacks, so position updates and end of media are produced by
//! polling the sink from [`MediaElement::tick`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::application::ports::{
    MediaElement, MediaEvent, MediaListeners, MediaSubscription, PlaybackError,
};

/// Media element backed by a rodio sink
pub struct RodioMediaElement {
    // The stream must outlive the sink or output stops.
    output: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    ended: bool,
    last_position: Option<f64>,
    listeners: MediaListeners,
}

impl RodioMediaElement {
    pub fn new() -> Self {
        Self {
            output: None,
            sink: None,
            path: None,
            ended: false,
            last_position: None,
            listeners: MediaListeners::new(),
        }
    }

    fn handle(&mut self) -> Result<OutputStreamHandle, PlaybackError> {
        if self.output.is_none() {
            let output = OutputStream::try_default()
                .map_err(|e| PlaybackError::OutputUnavailable(e.to_string()))?;
            self.output = Some(output);
        }
        self.output
            .as_ref()
            .map(|(_, handle)| handle.clone())
            .ok_or_else(|| PlaybackError::OutputUnavailable("no output stream".to_string()))
    }

    fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, PlaybackError> {
        let file = File::open(path)
            .map_err(|e| PlaybackError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Decoder::new(BufReader::new(file))
            .map_err(|e| PlaybackError::LoadFailed(format!("{}: {}", path.display(), e)))
    }

    /// Queue the file again once the sink has drained it.
    fn refill(&mut self) -> Result<(), PlaybackError> {
        let (Some(sink), Some(path)) = (self.sink.as_ref(), self.path.as_ref()) else {
            return Err(PlaybackError::Element("nothing loaded".to_string()));
        };
        if sink.empty() {
            sink.append(Self::decode(path)?);
            self.ended = false;
        }
        Ok(())
    }
}

impl Default for RodioMediaElement {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaElement for RodioMediaElement {
    fn load(&mut self, source: &str) -> Result<(), PlaybackError> {
        self.unload();

        let path = PathBuf::from(source);
        let decoder = Self::decode(&path)?;
        let duration = decoder
            .total_duration()
            .map(|d| d.as_secs_f64())
            .unwrap_or(f64::NAN);

        let handle = self.handle()?;
        let sink = Sink::try_new(&handle).map_err(|e| PlaybackError::Element(e.to_string()))?;
        sink.pause();
        sink.append(decoder);

        self.sink = Some(sink);
        self.path = Some(path);
        tracing::debug!(source, duration, "rodio source loaded");

        self.listeners
            .emit(MediaEvent::MetadataLoaded { duration });
        Ok(())
    }

    fn unload(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.path = None;
        self.ended = false;
        self.last_position = None;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.refill()?;
        if let Some(ref sink) = self.sink {
            sink.play();
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(ref sink) = self.sink {
            sink.pause();
        }
    }

    fn seek(&mut self, seconds: f64) {
        if let Err(e) = self.refill() {
            tracing::warn!(error = %e, "seek ignored");
            return;
        }
        let Some(ref sink) = self.sink else {
            return;
        };

        let target = Duration::from_secs_f64(seconds.max(0.0));
        match sink.try_seek(target) {
            Ok(()) => self.listeners.emit(MediaEvent::TimeUpdate {
                position: target.as_secs_f64(),
            }),
            Err(e) => tracing::warn!(error = %e, seconds, "seek failed"),
        }
    }

    fn subscribe(&mut self) -> MediaSubscription {
        self.listeners.subscribe()
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn tick(&mut self) {
        let Some(ref sink) = self.sink else {
            return;
        };

        let position = sink.get_pos().as_secs_f64();
        if self.last_position != Some(position) {
            self.last_position = Some(position);
            self.listeners.emit(MediaEvent::TimeUpdate { position });
        }

        if !self.ended && sink.empty() {
            self.ended = true;
            self.listeners.emit(MediaEvent::Ended);
        }
    }
}
