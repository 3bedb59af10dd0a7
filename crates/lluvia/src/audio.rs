//! Ambient music playback through an external player process.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use lluvia_config::AudioConfig;
use log::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio track not found: {}", .0.display())]
    MissingTrack(PathBuf),
    #[error("failed to start audio player `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to stop audio player: {0}")]
    Stop(#[source] std::io::Error),
}

/// Something that can play and pause the ambient loop.
pub trait AudioOutput {
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self) -> Result<(), AudioError>;
    fn is_playing(&self) -> bool;
}

/// Build the player described by the configuration.
pub fn from_config(config: &AudioConfig) -> Box<dyn AudioOutput> {
    match CommandPlayer::new(&config.command, &config.track) {
        Some(player) => Box::new(player),
        None => {
            debug!("no audio command configured, audio is silent");
            Box::new(SilentPlayer::default())
        }
    }
}

/// Runs `program args... track` while playing and kills it on pause.
#[derive(Debug)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
    track: PathBuf,
    child: Option<Child>,
}

impl CommandPlayer {
    /// `None` when `command` is empty.
    pub fn new(command: &[String], track: &Path) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            track: track.to_path_buf(),
            child: None,
        })
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        // The player may already have exited on its own.
        if child.try_wait().map_err(AudioError::Stop)?.is_none() {
            child.kill().map_err(AudioError::Stop)?;
        }
        child.wait().map_err(AudioError::Stop)?;
        debug!("stopped {}", self.program);
        Ok(())
    }
}

impl AudioOutput for CommandPlayer {
    fn play(&mut self) -> Result<(), AudioError> {
        if self.is_playing() {
            return Ok(());
        }
        if !self.track.exists() {
            return Err(AudioError::MissingTrack(self.track.clone()));
        }
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.track)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        debug!("started {} (pid {})", self.program, child.id());
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        self.stop()
    }

    fn is_playing(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("{e}");
        }
    }
}

/// Keeps track of the playing state without making a sound.
#[derive(Debug, Default)]
pub struct SilentPlayer {
    playing: bool,
}

impl AudioOutput for SilentPlayer {
    fn play(&mut self) -> Result<(), AudioError> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        self.playing = false;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
