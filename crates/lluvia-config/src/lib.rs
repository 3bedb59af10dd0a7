//! Configuration file support for lluvia.
//!
//! Settings live in `config.toml` inside the platform config directory. A
//! missing file is not an error; every field falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use lluvia_core::{
    AnimationSpeed, DEFAULT_TRANSITION_DELAY_MS, Message, SceneOptions, default_messages,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_TRACK: &str = "ambient-music.mp3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Ambient music settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Player program followed by its arguments. The track path is appended.
    /// An empty list disables audio.
    pub command: Vec<String>,
    /// Audio file to loop. Relative paths resolve against the config directory.
    pub track: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            command: ["mpv", "--no-video", "--loop=inf", "--really-quiet"]
                .into_iter()
                .map(String::from)
                .collect(),
            track: PathBuf::from(DEFAULT_TRACK),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub animation_speed: AnimationSpeed,
    /// Fixed seed for the particle generator; random when absent.
    pub seed: Option<u64>,
    pub start_raining: bool,
    pub start_night: bool,
    pub typewriter: bool,
    pub transition_delay_ms: u64,
    pub audio: AudioConfig,
    /// Replaces the built-in letter when present.
    pub messages: Option<Vec<Message>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation_speed: AnimationSpeed::default(),
            seed: None,
            start_raining: false,
            start_night: false,
            typewriter: true,
            transition_delay_ms: DEFAULT_TRANSITION_DELAY_MS,
            audio: AudioConfig::default(),
            messages: None,
        }
    }
}

impl Config {
    /// Platform config directory for lluvia, if one can be determined.
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "lluvia").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Full path of the config file.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Load from the platform location, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
                log::debug!("loaded config from {}", path.display());
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path.display());
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if let Some(dir) = path.parent() {
            config.audio.track = config.resolve_track(dir);
        }
        Ok(config)
    }

    /// Parse TOML text.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn resolve_track(&self, base: &Path) -> PathBuf {
        if self.audio.track.is_absolute() {
            self.audio.track.clone()
        } else {
            base.join(&self.audio.track)
        }
    }

    /// The letter to show: configured messages, or the built-in ones when
    /// none (or an empty list) are configured.
    pub fn messages(&self) -> Vec<Message> {
        match &self.messages {
            Some(messages) if !messages.is_empty() => messages.clone(),
            Some(_) => {
                log::warn!("configured message list is empty, using the built-in letter");
                default_messages()
            }
            None => default_messages(),
        }
    }

    pub fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            start_raining: self.start_raining,
            start_night: self.start_night,
            typewriter: self.typewriter,
            transition_delay_ms: self.transition_delay_ms,
            speed: self.animation_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lluvia_core::{Entrance, Mood};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.animation_speed, AnimationSpeed::Medium);
        assert_eq!(config.transition_delay_ms, 300);
        assert!(config.typewriter);
        assert!(config.seed.is_none());
        assert_eq!(config.messages().len(), 6);
        assert_eq!(config.audio.command[0], "mpv");
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_overrides() {
        let config = Config::parse(
            r#"
            animation_speed = "fast"
            seed = 7
            start_night = true
            typewriter = false
            transition_delay_ms = 500

            [audio]
            command = ["afplay"]

            [[messages]]
            text = "Hola"
            mood = "rain"
            entrance = "fade-in-left"

            [[messages]]
            text = "Adiós"
            mood = "sunset"
            "#,
        )
        .unwrap();

        assert_eq!(config.animation_speed, AnimationSpeed::Fast);
        assert_eq!(config.seed, Some(7));
        assert!(config.start_night);
        assert!(!config.start_raining);
        assert_eq!(config.audio.command, vec!["afplay".to_string()]);
        assert_eq!(config.audio.track, PathBuf::from(DEFAULT_TRACK));

        let messages = config.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].mood, Mood::Rain);
        assert_eq!(messages[0].entrance, Entrance::FadeInLeft);
        assert_eq!(messages[1].entrance, Entrance::FadeIn);

        let options = config.scene_options();
        assert_eq!(options.transition_delay_ms, 500);
        assert!(!options.typewriter);
        assert_eq!(options.speed, AnimationSpeed::Fast);
    }

    #[test]
    fn test_unknown_mood_rejected() {
        let result = Config::parse(
            r#"
            [[messages]]
            text = "x"
            mood = "thunder"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_message_list_falls_back() {
        let config = Config::parse("messages = []").unwrap();
        assert_eq!(config.messages(), default_messages());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = std::env::temp_dir();
        let path = dir.join("lluvia-config-test-does-not-exist.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.audio.track, dir.join(DEFAULT_TRACK));
        assert_eq!(
            Config {
                audio: AudioConfig::default(),
                ..config
            },
            Config::default()
        );
    }

    #[test]
    fn test_load_resolves_relative_track() {
        let dir = std::env::temp_dir().join(format!("lluvia-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, "[audio]\ntrack = \"rain.ogg\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.audio.track, dir.join("rain.ogg"));

        fs::write(&path, "seed = \"not a number\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));

        fs::remove_dir_all(&dir).unwrap();
    }
}
