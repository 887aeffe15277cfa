//! Input methods and recognition
//!
//! Text is typed directly. Voice and handwriting go through a [`Recognizer`],
//! which turns a captured signal into source text. Two recognizers exist:
//!
//! - [`PlaceholderRecognizer`] ignores the signal and substitutes a fixed
//!   description such as `"[Voice input in Indonesian]"`
//! - [`NativeRecognizer`] is the slot for a real speech/handwriting backend;
//!   none is bundled, so it always reports [`RecognitionError::Unavailable`]

use crate::language::LanguageCode;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMethod {
    #[default]
    Text,
    Voice,
    Handwriting,
}

impl InputMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMethod::Text => "text",
            InputMethod::Voice => "voice",
            InputMethod::Handwriting => "handwriting",
        }
    }
}

impl fmt::Display for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(InputMethod::Text),
            "voice" => Ok(InputMethod::Voice),
            "handwriting" => Ok(InputMethod::Handwriting),
            other => Err(format!("Unknown input method '{}'", other)),
        }
    }
}

/// A single pen stroke as a list of (x, y) points
pub type Stroke = Vec<(f32, f32)>;

/// A captured input signal
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedInput {
    /// Typed text, used as-is
    Text(String),
    /// Mono PCM samples from a microphone
    Voice { samples: Vec<i16>, sample_rate: u32 },
    /// Pen strokes from a drawing surface
    Handwriting(Vec<Stroke>),
}

impl CapturedInput {
    pub fn method(&self) -> InputMethod {
        match self {
            CapturedInput::Text(_) => InputMethod::Text,
            CapturedInput::Voice { .. } => InputMethod::Voice,
            CapturedInput::Handwriting(_) => InputMethod::Handwriting,
        }
    }
}

/// Error types for recognition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// No backend is available for this input method
    Unavailable(InputMethod),
}

impl fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionError::Unavailable(method) => {
                write!(f, "No {} recognition backend available", method)
            }
        }
    }
}

impl std::error::Error for RecognitionError {}

/// Result type for recognition
pub type RecognitionResult<T> = Result<T, RecognitionError>;

/// Turns captured input into source text
pub trait Recognizer: Send + Sync {
    /// Recognize `input` spoken or written in `language`
    fn recognize(&self, input: &CapturedInput, language: LanguageCode) -> RecognitionResult<String>;

    fn name(&self) -> &str;
}

/// Recognizer that substitutes a fixed description for voice and handwriting
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRecognizer;

impl Recognizer for PlaceholderRecognizer {
    fn recognize(&self, input: &CapturedInput, language: LanguageCode) -> RecognitionResult<String> {
        Ok(match input {
            CapturedInput::Text(text) => text.clone(),
            CapturedInput::Voice { .. } => format!("[Voice input in {}]", language.family_name()),
            CapturedInput::Handwriting(_) => {
                format!("[Handwritten text in {}]", language.family_name())
            }
        })
    }

    fn name(&self) -> &str {
        "Placeholder Recognizer"
    }
}

/// Slot for a real recognition backend
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRecognizer;

impl Recognizer for NativeRecognizer {
    fn recognize(&self, input: &CapturedInput, _language: LanguageCode) -> RecognitionResult<String> {
        match input {
            CapturedInput::Text(text) => Ok(text.clone()),
            other => Err(RecognitionError::Unavailable(other.method())),
        }
    }

    fn name(&self) -> &str {
        "Native Recognizer"
    }
}
