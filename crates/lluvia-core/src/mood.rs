//! Message moods and entrance animations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ambient tag attached to every message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Rain,
    Ocean,
    Sunset,
    #[default]
    Gentle,
    Mixed,
}

impl Mood {
    /// All moods in declaration order.
    pub const ALL: [Mood; 5] = [
        Mood::Rain,
        Mood::Ocean,
        Mood::Sunset,
        Mood::Gentle,
        Mood::Mixed,
    ];

    /// Lowercase name used in config files and the status line.
    pub fn name(self) -> &'static str {
        match self {
            Mood::Rain => "rain",
            Mood::Ocean => "ocean",
            Mood::Sunset => "sunset",
            Mood::Gentle => "gentle",
            Mood::Mixed => "mixed",
        }
    }

    /// Ocean messages bob up and down while visible.
    pub fn floats(self) -> bool {
        self == Mood::Ocean
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction a message slides in from when it becomes visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entrance {
    #[default]
    FadeIn,
    FadeInUp,
    FadeInDown,
    FadeInLeft,
    FadeInRight,
}

impl Entrance {
    /// Starting offset in cells `(dx, dy)` before the message settles.
    pub fn offset(self) -> (i16, i16) {
        match self {
            Entrance::FadeIn => (0, 0),
            Entrance::FadeInUp => (0, 2),
            Entrance::FadeInDown => (0, -2),
            Entrance::FadeInLeft => (-6, 0),
            Entrance::FadeInRight => (6, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ocean_floats() {
        let floating: Vec<Mood> = Mood::ALL.into_iter().filter(|m| m.floats()).collect();
        assert_eq!(floating, vec![Mood::Ocean]);
    }

    #[test]
    fn test_mood_display() {
        assert_eq!(Mood::Sunset.to_string(), "sunset");
        assert_eq!(Mood::default(), Mood::Gentle);
    }

    #[test]
    fn test_entrance_offsets_point_towards_origin() {
        assert_eq!(Entrance::FadeIn.offset(), (0, 0));
        assert!(Entrance::FadeInUp.offset().1 > 0);
        assert!(Entrance::FadeInDown.offset().1 < 0);
        assert!(Entrance::FadeInLeft.offset().0 < 0);
        assert!(Entrance::FadeInRight.offset().0 > 0);
    }
}
