//! Bell playback for phase-boundary cues

use std::{
    io::Cursor,
    path::Path,
    sync::{mpsc, Arc},
    thread,
};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, info, warn};

use crate::error::AudioError;

/// Sound-emission collaborator
///
/// Implementations must return without waiting for playback to finish.
pub trait CuePlayer: Send + Sync {
    fn play_cue(&self, volume: f32) -> Result<(), AudioError>;
}

/// Plays a bell sound through the default audio output
///
/// The output stream is not `Send`, so it lives on a dedicated audio thread
/// that receives volumes over a channel.
#[derive(Debug)]
pub struct RodioCuePlayer {
    tx: mpsc::Sender<f32>,
}

impl RodioCuePlayer {
    /// Load the bell sound and open the default output device
    pub fn new(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref().to_path_buf();
        let sound = load_sound(&path)?;

        let (tx, rx) = mpsc::channel::<f32>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), AudioError>>(1);

        thread::Builder::new()
            .name("pomodoro-audio".to_string())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(output) => {
                        let _ = ready_tx.send(Ok(()));
                        output
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(AudioError::Output(e.to_string())));
                        return;
                    }
                };

                for volume in rx {
                    if let Err(e) = play_sound(&handle, &sound, volume) {
                        warn!("Failed to play bell sound: {}", e);
                    }
                }
                debug!("Audio thread exiting");
            })
            .map_err(AudioError::Thread)?;

        ready_rx.recv().map_err(|_| AudioError::Disconnected)??;

        info!("Audio output ready, bell sound: {}", path.display());
        Ok(Self { tx })
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play_cue(&self, volume: f32) -> Result<(), AudioError> {
        self.tx.send(volume).map_err(|_| AudioError::Disconnected)
    }
}

/// Cue player for running without audio output
#[derive(Debug, Default)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play_cue(&self, volume: f32) -> Result<(), AudioError> {
        debug!(volume, "Muted cue");
        Ok(())
    }
}

/// Read the whole asset and check that it decodes
fn load_sound(path: &Path) -> Result<Arc<[u8]>, AudioError> {
    let bytes: Arc<[u8]> = std::fs::read(path)
        .map_err(|source| AudioError::Asset {
            path: path.to_path_buf(),
            source,
        })?
        .into();

    Decoder::new(Cursor::new(Arc::clone(&bytes))).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(bytes)
}

fn play_sound(handle: &OutputStreamHandle, sound: &Arc<[u8]>, volume: f32) -> Result<(), String> {
    let source = Decoder::new(Cursor::new(Arc::clone(sound))).map_err(|e| e.to_string())?;
    let sink = Sink::try_new(handle).map_err(|e| e.to_string())?;
    sink.set_volume(volume);
    sink.append(source);
    // Detached sinks keep playing while the stream lives
    sink.detach();
    Ok(())
}
