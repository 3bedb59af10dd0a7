//! Canned messages and the circular cycler that walks through them.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::flags::SceneFlags;
use crate::mood::{Entrance, Mood};

/// A single line of the letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub mood: Mood,
    #[serde(default)]
    pub entrance: Entrance,
}

impl Message {
    pub fn new(text: impl Into<String>, mood: Mood) -> Self {
        Self {
            text: text.into(),
            mood,
            entrance: Entrance::default(),
        }
    }

    pub fn with_entrance(mut self, entrance: Entrance) -> Self {
        self.entrance = entrance;
        self
    }
}

/// The built-in letter.
pub fn default_messages() -> Vec<Message> {
    vec![
        Message::new(
            "Como la lluvia que cae suavemente, así llegan los mensajes que compartimos...",
            Mood::Rain,
        )
        .with_entrance(Entrance::FadeInDown),
        Message::new(
            "El mar nos recuerda que aunque estemos lejos, el mismo horizonte nos une.",
            Mood::Ocean,
        )
        .with_entrance(Entrance::FadeInUp),
        Message::new(
            "A veces las palabras más bonitas son como atardeceres, pintan de colores nuestros pensamientos.",
            Mood::Sunset,
        )
        .with_entrance(Entrance::FadeIn),
        Message::new(
            "Hay personas que son como poemas: te hacen ver la belleza en los detalles más pequeños.",
            Mood::Gentle,
        )
        .with_entrance(Entrance::FadeInRight),
        Message::new(
            "Las mejores historias empiezan despacio, como olas suaves llegando a la orilla.",
            Mood::Ocean,
        )
        .with_entrance(Entrance::FadeInLeft),
        Message::new(
            "Entre la lluvia y el mar, entre versos y atardeceres, es bonito ir conociéndonos.",
            Mood::Mixed,
        )
        .with_entrance(Entrance::FadeInUp),
    ]
}

/// Toggles a mood asks the scene to perform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodToggles {
    pub rain: bool,
    pub time: bool,
}

/// Couple a mood to the scene flags.
///
/// Moods only ever switch effects on: a rain message starts the rain if it is
/// dry and a sunset message brings the night if it is day.
pub fn mood_toggles(mood: Mood, flags: SceneFlags) -> MoodToggles {
    MoodToggles {
        rain: mood == Mood::Rain && !flags.raining,
        time: mood == Mood::Sunset && !flags.night,
    }
}

/// Fixed, non-empty list of messages with a wrapping cursor.
#[derive(Debug, Clone)]
pub struct MessageCycler {
    messages: Vec<Message>,
    index: usize,
}

impl MessageCycler {
    /// Build a cycler positioned on the first message.
    pub fn new(messages: Vec<Message>) -> Result<Self, SceneError> {
        if messages.is_empty() {
            return Err(SceneError::EmptyMessageList);
        }
        Ok(Self { messages, index: 0 })
    }

    /// Move to the next message, wrapping after the last one.
    pub fn advance(&mut self) -> &Message {
        self.index = (self.index + 1) % self.messages.len();
        &self.messages[self.index]
    }

    pub fn current(&self) -> &Message {
        &self.messages[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl Default for MessageCycler {
    fn default() -> Self {
        Self {
            messages: default_messages(),
            index: 0,
        }
    }
}
