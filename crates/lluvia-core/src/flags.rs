//! Boolean scene modes.

/// The three user-facing switches of the scene.
///
/// Each toggle returns a new value so callers can treat the flags as plain
/// data and decide themselves what a change implies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneFlags {
    pub raining: bool,
    pub night: bool,
    pub audio_playing: bool,
}

impl SceneFlags {
    #[must_use]
    pub fn toggle_rain(self) -> Self {
        Self {
            raining: !self.raining,
            ..self
        }
    }

    #[must_use]
    pub fn toggle_time(self) -> Self {
        Self {
            night: !self.night,
            ..self
        }
    }

    #[must_use]
    pub fn toggle_audio(self) -> Self {
        Self {
            audio_playing: !self.audio_playing,
            ..self
        }
    }
}
