//! Audio backend selection
//!
//! With the `audio` feature the TUI plays sound through `rodio`. Without it,
//! or when audio is disabled or no output device opens, it falls back to
//! [`SilentAudio`].

use lottery_core::{AudioBackend, AudioConfig, SilentAudio};

/// Pick the backend for this run
pub fn backend(config: &AudioConfig) -> Box<dyn AudioBackend> {
    if !config.enabled {
        tracing::info!("Audio disabled by configuration");
        return Box::new(SilentAudio::new());
    }

    #[cfg(feature = "audio")]
    {
        match rodio_backend::RodioAudio::try_new() {
            Ok(audio) => return Box::new(audio),
            Err(e) => tracing::warn!(error = %e, "No audio device, continuing without sound"),
        }
    }

    #[cfg(not(feature = "audio"))]
    tracing::info!("Built without the audio feature, continuing without sound");

    Box::new(SilentAudio::new())
}

#[cfg(feature = "audio")]
pub use rodio_backend::RodioAudio;

#[cfg(feature = "audio")]
mod rodio_backend {
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};

    use lottery_core::{AudioBackend, AudioError, AudioEvent, PlaybackId, PlaybackState, Volume};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    struct Playback {
        path: PathBuf,
        sink: Sink,
        volume: Volume,
        /// One-shot playback whose end should be reported
        watch_end: bool,
    }

    /// Plays sounds on the default output device, one `Sink` per handle
    pub struct RodioAudio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        next_id: u64,
        playbacks: HashMap<PlaybackId, Playback>,
        events: Vec<AudioEvent>,
    }

    impl RodioAudio {
        /// Open the default output device
        ///
        /// # Errors
        ///
        /// Returns [`AudioError::Backend`] if no device is available.
        pub fn try_new() -> Result<Self, AudioError> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| AudioError::Backend(e.to_string()))?;
            Ok(Self {
                _stream: stream,
                handle,
                next_id: 0,
                playbacks: HashMap::new(),
                events: Vec::new(),
            })
        }

        fn decoder(path: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
            let load_error = |message: String| AudioError::Load {
                path: path.to_path_buf(),
                message,
            };
            let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
            Decoder::new(BufReader::new(file)).map_err(|e| load_error(e.to_string()))
        }

        fn playback(&mut self, id: PlaybackId) -> Result<&mut Playback, AudioError> {
            self.playbacks.get_mut(&id).ok_or(AudioError::UnknownHandle)
        }
    }

    impl AudioBackend for RodioAudio {
        fn load(&mut self, path: &Path) -> Result<PlaybackId, AudioError> {
            // Probe the file so a bad asset fails here rather than mid-draw
            Self::decoder(path)?;
            let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Backend(e.to_string()))?;
            sink.pause();

            let id = PlaybackId(self.next_id);
            self.next_id += 1;
            self.playbacks.insert(
                id,
                Playback {
                    path: path.to_path_buf(),
                    sink,
                    volume: Volume::MAX,
                    watch_end: false,
                },
            );
            self.events.push(AudioEvent::Loaded { id });
            Ok(id)
        }

        fn play_looped(&mut self, id: PlaybackId) -> Result<(), AudioError> {
            let path = self.playback(id)?.path.clone();
            let source = Self::decoder(&path)?.repeat_infinite();
            let playback = self.playback(id)?;
            playback.sink.append(source);
            playback.sink.play();
            self.events.push(AudioEvent::StateChanged {
                id,
                state: PlaybackState::Playing,
            });
            Ok(())
        }

        fn play_once(&mut self, id: PlaybackId) -> Result<(), AudioError> {
            let path = self.playback(id)?.path.clone();
            let source = Self::decoder(&path)?;
            let playback = self.playback(id)?;
            playback.sink.append(source);
            playback.sink.play();
            playback.watch_end = true;
            self.events.push(AudioEvent::StateChanged {
                id,
                state: PlaybackState::Playing,
            });
            Ok(())
        }

        fn set_volume(&mut self, id: PlaybackId, volume: Volume) -> Result<(), AudioError> {
            let playback = self.playback(id)?;
            playback.sink.set_volume(volume.gain());
            playback.volume = volume;
            Ok(())
        }

        fn volume(&self, id: PlaybackId) -> Option<Volume> {
            self.playbacks.get(&id).map(|p| p.volume)
        }

        fn stop(&mut self, id: PlaybackId) -> Result<(), AudioError> {
            let playback = self.playbacks.remove(&id).ok_or(AudioError::UnknownHandle)?;
            playback.sink.stop();
            Ok(())
        }

        fn drain_events(&mut self) -> Vec<AudioEvent> {
            for (id, playback) in &mut self.playbacks {
                if playback.watch_end && playback.sink.empty() {
                    playback.watch_end = false;
                    self.events.push(AudioEvent::StateChanged {
                        id: *id,
                        state: PlaybackState::Stopped,
                    });
                }
            }
            std::mem::take(&mut self.events)
        }
    }
}
