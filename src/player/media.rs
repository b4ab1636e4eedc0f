use serde_json::{json, Value};
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no audio source loaded")]
    NoSource,
    #[error("failed to start player `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("video surface is not attached")]
    Detached,
    #[error("malformed surface message: {0}")]
    Message(String),
}

/// Events reported by a raw audio element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    TimeUpdate(f64),
    Loaded { duration: f64 },
    Ended,
}

/// Raw audio backend: a black-box element with transport controls
pub trait MediaElement {
    /// Point the element at a new source and rewind
    fn load(&mut self, source: &str);
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn seek(&mut self, seconds: f64);
    /// Next pending event, if any
    fn poll_event(&mut self) -> Option<MediaEvent>;
}

/// Embedded video backend reached through string messages
pub trait VideoSurface {
    /// Attach the surface to a video
    fn load(&mut self, video_id: &str);
    /// Post one command message; no acknowledgement is read
    fn post(&mut self, message: &str) -> Result<(), MediaError>;
}

/// Commands understood by the embedded video surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCommand {
    Play,
    Pause,
    /// Volume level 0..=100
    SetVolume(u8),
}

impl VideoCommand {
    pub fn func(&self) -> &'static str {
        match self {
            VideoCommand::Play => "playVideo",
            VideoCommand::Pause => "pauseVideo",
            VideoCommand::SetVolume(_) => "setVolume",
        }
    }

    /// Wire form: `{"event":"command","func":...,"args":...}`
    pub fn to_message(&self) -> String {
        let args = match self {
            VideoCommand::SetVolume(level) => json!([level]),
            _ => json!(""),
        };
        json!({ "event": "command", "func": self.func(), "args": args }).to_string()
    }

    /// Parse a wire message back into a command
    pub fn from_message(message: &str) -> Result<Self, MediaError> {
        let value: Value =
            serde_json::from_str(message).map_err(|e| MediaError::Message(e.to_string()))?;
        let func = value
            .get("func")
            .and_then(Value::as_str)
            .ok_or_else(|| MediaError::Message("missing func".to_string()))?;

        match func {
            "playVideo" => Ok(VideoCommand::Play),
            "pauseVideo" => Ok(VideoCommand::Pause),
            "setVolume" => {
                let level = value
                    .get("args")
                    .and_then(|a| a.get(0))
                    .and_then(Value::as_u64)
                    .ok_or_else(|| MediaError::Message("setVolume without level".to_string()))?;
                Ok(VideoCommand::SetVolume(level.min(100) as u8))
            }
            other => Err(MediaError::Message(format!("unknown func {other}"))),
        }
    }
}

/// Outbound command queue for the video surface
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<VideoCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: VideoCommand) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deliver everything queued. Delivery is fire-and-forget: failures are
    /// logged and the command is dropped.
    pub fn flush(&mut self, surface: &mut dyn VideoSurface) -> usize {
        let mut delivered = 0;
        while let Some(command) = self.pending.pop_front() {
            match surface.post(&command.to_message()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(func = command.func(), error = %e, "video surface command failed"),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSurface {
        messages: Vec<String>,
        fail: bool,
    }

    impl VideoSurface for RecordingSurface {
        fn load(&mut self, _video_id: &str) {}

        fn post(&mut self, message: &str) -> Result<(), MediaError> {
            if self.fail {
                return Err(MediaError::Detached);
            }
            self.messages.push(message.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_play_message_format() {
        let value: Value = serde_json::from_str(&VideoCommand::Play.to_message()).unwrap();
        assert_eq!(value, json!({"event": "command", "func": "playVideo", "args": ""}));
    }

    #[test]
    fn test_messages_parse_back() {
        for command in [VideoCommand::Play, VideoCommand::Pause, VideoCommand::SetVolume(70)] {
            assert_eq!(VideoCommand::from_message(&command.to_message()).unwrap(), command);
        }
    }

    #[test]
    fn test_set_volume_args_are_an_array() {
        let value: Value = serde_json::from_str(&VideoCommand::SetVolume(35).to_message()).unwrap();
        assert_eq!(value["func"], "setVolume");
        assert_eq!(value["args"], json!([35]));
    }

    #[test]
    fn test_from_message_rejects_garbage() {
        assert!(VideoCommand::from_message("not json").is_err());
        assert!(VideoCommand::from_message(r#"{"func":"seekTo","args":[1]}"#).is_err());
    }

    #[test]
    fn test_flush_delivers_in_order() {
        let mut queue = CommandQueue::new();
        queue.push(VideoCommand::SetVolume(50));
        queue.push(VideoCommand::Play);
        let mut surface = RecordingSurface { messages: Vec::new(), fail: false };

        assert_eq!(queue.flush(&mut surface), 2);
        assert!(queue.is_empty());
        assert!(surface.messages[0].contains("setVolume"));
        assert!(surface.messages[1].contains("playVideo"));
    }

    #[test]
    fn test_flush_drops_failed_commands() {
        let mut queue = CommandQueue::new();
        queue.push(VideoCommand::Pause);
        let mut surface = RecordingSurface { messages: Vec::new(), fail: true };

        assert_eq!(queue.flush(&mut surface), 0);
        assert!(queue.is_empty());
    }
}
