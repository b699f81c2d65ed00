pub mod chirp;

pub use chirp::AlertChirp;

use anyhow::{anyhow, Context, Result};
use rodio::{OutputStream, Sink};
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use log::warn;

enum SoundCommand {
    Chirp,
    SetVolume(f32),
    Stop,
}

/// Handle to the alert sound player.
///
/// Playback runs on a dedicated thread holding the non-Send rodio objects;
/// the handle only pushes commands onto a channel, so `play_chirp` returns
/// immediately and never stalls the sampling tick.
#[derive(Clone)]
pub struct AlertSoundHandle {
    tx: Arc<Mutex<Option<Sender<SoundCommand>>>>,
}

impl AlertSoundHandle {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<SoundCommand>> {
        let mut guard = self
            .tx
            .lock()
            .map_err(|_| anyhow!("alert sound handle poisoned"))?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<SoundCommand>();

        thread::Builder::new()
            .name("alert-sound".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;
                let mut volume: f32 = 1.0;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<()> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .context("failed to create audio output stream")?;
                        let new_sink =
                            Sink::try_new(&handle).context("failed to create audio sink")?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        SoundCommand::Chirp => {
                            if let Err(err) = ensure_sink(&mut _stream, &mut sink) {
                                warn!("alert sound unavailable: {err:#}");
                                continue;
                            }
                            if let Some(ref s) = sink {
                                s.set_volume(volume);
                                s.append(AlertChirp::new());
                            }
                        }
                        SoundCommand::SetVolume(v) => {
                            volume = v.clamp(0.0, 1.0);
                            if let Some(ref s) = sink {
                                s.set_volume(volume);
                            }
                        }
                        SoundCommand::Stop => {
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            _stream = None;
                        }
                    }
                }
            })
            .context("failed to spawn alert sound thread")?;

        let tx_clone = tx.clone();
        *guard = Some(tx);
        Ok(tx_clone)
    }

    /// Queues one chirp. Fire-and-forget.
    pub fn play_chirp(&self) -> Result<()> {
        let tx = self.ensure_thread()?;
        tx.send(SoundCommand::Chirp)
            .map_err(|_| anyhow!("alert sound thread exited"))
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        let tx = self.ensure_thread()?;
        tx.send(SoundCommand::SetVolume(volume))
            .map_err(|_| anyhow!("alert sound thread exited"))
    }

    pub fn stop(&self) -> Result<()> {
        if let Ok(guard) = self.tx.lock() {
            if let Some(tx) = guard.as_ref() {
                let _ = tx.send(SoundCommand::Stop);
            }
        }
        Ok(())
    }
}

impl Default for AlertSoundHandle {
    fn default() -> Self {
        Self::new()
    }
}
