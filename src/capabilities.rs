//! Capabilities the engine consumes but does not implement: user-facing
//! notices and speech input/output.

use async_trait::async_trait;
use parking_lot::Mutex;

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A non-blocking message for the user ("Saved!", "Could not save").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Presents notices to the user. Must not block the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Sends notices to the log. Used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
    }
}

/// Keeps every notice in memory for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn errors(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .cloned()
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

/// Text-to-speech and speech-to-text.
#[async_trait]
pub trait Speech: Send + Sync {
    async fn speak(&self, text: &str);

    /// Returns the recognised utterance, or `None` when nothing was heard
    /// or recognition is unsupported.
    async fn listen(&self) -> Option<String>;
}

/// Speech for environments without audio: speaking is logged, listening
/// hears nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeech;

#[async_trait]
impl Speech for SilentSpeech {
    async fn speak(&self, text: &str) {
        tracing::debug!(%text, "speak requested without an audio device");
    }

    async fn listen(&self) -> Option<String> {
        None
    }
}

/// Replays scripted utterances and records what was spoken.
#[derive(Debug, Default)]
pub struct ScriptedSpeech {
    utterances: Mutex<Vec<String>>,
    spoken: Mutex<Vec<String>>,
}

impl ScriptedSpeech {
    pub fn new<I, S>(utterances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut utterances: Vec<String> = utterances.into_iter().map(Into::into).collect();
        utterances.reverse();
        Self {
            utterances: Mutex::new(utterances),
            spoken: Mutex::new(Vec::new()),
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }
}

#[async_trait]
impl Speech for ScriptedSpeech {
    async fn speak(&self, text: &str) {
        self.spoken.lock().push(text.to_string());
    }

    async fn listen(&self) -> Option<String> {
        self.utterances.lock().pop()
    }
}
