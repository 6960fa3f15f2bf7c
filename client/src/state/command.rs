//! Slash-command parsing and per-command captions.
//!
//! DESIGN
//! ======
//! Recognized commands are a closed enum so every caption lookup is an
//! exhaustive `match`; adding a reaction without its captions fails to
//! compile. Matching is case-insensitive. `/imagegen` and `/tts` need a
//! non-empty argument, otherwise the text falls through to plain chat.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use crate::net::types::{CommandKind, CommandRequest};

use super::message::ImageKind;

const IMAGEGEN_PREFIX: &str = "/imagegen ";
const TTS_PREFIX: &str = "/tts ";

/// Reaction images fetched from the curated gallery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reaction {
    Neko,
    Waifu,
    Hug,
    Pat,
    Kiss,
    Wave,
    Smile,
    Blush,
    Poke,
    Dance,
}

impl Reaction {
    pub const ALL: [Reaction; 10] = [
        Reaction::Neko,
        Reaction::Waifu,
        Reaction::Hug,
        Reaction::Pat,
        Reaction::Kiss,
        Reaction::Wave,
        Reaction::Smile,
        Reaction::Blush,
        Reaction::Poke,
        Reaction::Dance,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Reaction::Neko => "neko",
            Reaction::Waifu => "waifu",
            Reaction::Hug => "hug",
            Reaction::Pat => "pat",
            Reaction::Kiss => "kiss",
            Reaction::Wave => "wave",
            Reaction::Smile => "smile",
            Reaction::Blush => "blush",
            Reaction::Poke => "poke",
            Reaction::Dance => "dance",
        }
    }

    #[must_use]
    pub fn loading_text(self) -> &'static str {
        match self {
            Reaction::Neko => "Finding a cute neko... 🐱",
            Reaction::Waifu => "Finding a waifu... ✨",
            Reaction::Hug => "Getting a warm hug... 🤗",
            Reaction::Pat => "Finding a headpat... 🫳",
            Reaction::Kiss => "Finding a kiss... 💋",
            Reaction::Wave => "Getting a wave... 👋",
            Reaction::Smile => "Finding a smile... 😊",
            Reaction::Blush => "Finding a blush... 😳",
            Reaction::Poke => "Getting a poke... 👆",
            Reaction::Dance => "Finding a dance... 💃",
        }
    }

    #[must_use]
    pub fn success_text(self) -> &'static str {
        match self {
            Reaction::Neko => "Here's a cute neko for you! 🐱💖",
            Reaction::Waifu => "Here's a beautiful waifu! ✨💕",
            Reaction::Hug => "Here's a warm hug for you! 🤗💕",
            Reaction::Pat => "Here's a gentle headpat! 🫳✨",
            Reaction::Kiss => "Here's a sweet kiss! 💋💖",
            Reaction::Wave => "Here's a friendly wave! 👋✨",
            Reaction::Smile => "Here's a happy smile! 😊💕",
            Reaction::Blush => "Here's a cute blush! 😳💖",
            Reaction::Poke => "Poke poke! 👆✨",
            Reaction::Dance => "Let's dance! 💃🎵",
        }
    }

    #[must_use]
    pub fn command_kind(self) -> CommandKind {
        match self {
            Reaction::Neko => CommandKind::Neko,
            Reaction::Waifu => CommandKind::Waifu,
            Reaction::Hug => CommandKind::Hug,
            Reaction::Pat => CommandKind::Pat,
            Reaction::Kiss => CommandKind::Kiss,
            Reaction::Wave => CommandKind::Wave,
            Reaction::Smile => CommandKind::Smile,
            Reaction::Blush => CommandKind::Blush,
            Reaction::Poke => CommandKind::Poke,
            Reaction::Dance => CommandKind::Dance,
        }
    }

    #[must_use]
    pub fn image_kind(self) -> ImageKind {
        match self {
            Reaction::Neko => ImageKind::Neko,
            Reaction::Waifu => ImageKind::Waifu,
            Reaction::Hug => ImageKind::Hug,
            Reaction::Pat => ImageKind::Pat,
            Reaction::Kiss => ImageKind::Kiss,
            Reaction::Wave => ImageKind::Wave,
            Reaction::Smile => ImageKind::Smile,
            Reaction::Blush => ImageKind::Blush,
            Reaction::Poke => ImageKind::Poke,
            Reaction::Dance => ImageKind::Dance,
        }
    }
}

/// A media command parsed from user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaCommand {
    ImageGen { prompt: String },
    Tts { text: String },
    Reaction(Reaction),
}

/// Which placeholder flag a media command sets while pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaSlot {
    Image,
    Audio,
}

impl MediaCommand {
    /// Parse `text` as a media command. Returns `None` for plain chat.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(prompt) = strip_prefix_ignore_case(text, IMAGEGEN_PREFIX) {
            let prompt = prompt.trim();
            if !prompt.is_empty() {
                return Some(Self::ImageGen { prompt: prompt.to_owned() });
            }
        }

        if let Some(speech) = strip_prefix_ignore_case(text, TTS_PREFIX) {
            let speech = speech.trim();
            if !speech.is_empty() {
                return Some(Self::Tts { text: speech.to_owned() });
            }
        }

        let lower = text.to_lowercase();
        let name = lower.strip_prefix('/')?;
        Reaction::ALL
            .into_iter()
            .find(|r| r.name() == name)
            .map(Self::Reaction)
    }

    /// The text shown in the synthetic user bubble, and resent on retry.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::ImageGen { prompt } => format!("/ImageGen {prompt}"),
            Self::Tts { text } => format!("/tts {text}"),
            Self::Reaction(r) => format!("/{}", r.name()),
        }
    }

    #[must_use]
    pub fn loading_text(&self) -> &'static str {
        match self {
            Self::ImageGen { .. } => "Generating your image... ✨",
            Self::Tts { .. } => "Converting to speech... 🎵",
            Self::Reaction(r) => r.loading_text(),
        }
    }

    #[must_use]
    pub fn success_text(&self) -> &'static str {
        match self {
            Self::ImageGen { .. } => "Here's your generated image! 🎨",
            Self::Tts { .. } => "Here's your audio! 🔊",
            Self::Reaction(r) => r.success_text(),
        }
    }

    #[must_use]
    pub fn failure_text(&self) -> String {
        match self {
            Self::ImageGen { .. } => "Oops! Failed to generate image. Please try again! 🌸".to_owned(),
            Self::Tts { .. } => "Oops! Failed to generate audio. Please try again! 🌸".to_owned(),
            Self::Reaction(r) => format!("Oops! Failed to get {} image. Please try again! 🌸", r.name()),
        }
    }

    #[must_use]
    pub fn slot(&self) -> MediaSlot {
        match self {
            Self::Tts { .. } => MediaSlot::Audio,
            Self::ImageGen { .. } | Self::Reaction(_) => MediaSlot::Image,
        }
    }

    /// Request body for the media endpoint.
    #[must_use]
    pub fn request(&self) -> CommandRequest {
        match self {
            Self::ImageGen { prompt } => {
                CommandRequest { command: CommandKind::ImageGen, prompt: Some(prompt.clone()), text: None }
            }
            Self::Tts { text } => CommandRequest { command: CommandKind::Tts, prompt: None, text: Some(text.clone()) },
            Self::Reaction(r) => CommandRequest { command: r.command_kind(), prompt: None, text: None },
        }
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}
