//! Media elements backed by an external player process.
//!
//! The player is started per playback run and killed on pause; resuming
//! starts it again at the last reported position. Status lines of the form
//! `<time-pos> <duration>` on the player's stderr become media events.

use super::media::{MediaElement, MediaError, MediaEvent, VideoCommand, VideoSurface};
use std::io::{BufReader, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

const VIDEO_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Program plus argument template. `{url}`, `{start}` and `{volume}` are
/// substituted on launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTemplate {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchTemplate {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Arguments with placeholders filled in
    pub fn render_args(&self, url: &str, start: f64, volume: f32) -> Vec<String> {
        let start = format!("{:.1}", start.max(0.0));
        let volume = format!("{}", (volume.clamp(0.0, 1.0) * 100.0).round() as u32);
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{url}", url)
                    .replace("{start}", &start)
                    .replace("{volume}", &volume)
            })
            .collect()
    }

    fn spawn(&self, url: &str, start: f64, volume: f32) -> Result<Child, MediaError> {
        Command::new(&self.program)
            .args(self.render_args(url, start, volume))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| MediaError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

/// Parse a `<time-pos> <duration>` status line
fn parse_status(line: &str) -> Option<(f64, Option<f64>)> {
    let mut parts = line.split_whitespace();
    let position = parts.next()?.parse::<f64>().ok()?;
    let duration = parts.next().and_then(|d| d.parse::<f64>().ok());
    Some((position, duration))
}

/// Read status lines until the process closes stderr.
/// The player redraws its status with `\r`, so both separators split lines.
fn spawn_status_reader(child: &mut Child, generation: u64, events: Sender<(u64, MediaEvent)>) {
    let Some(stderr) = child.stderr.take() else {
        return;
    };
    thread::spawn(move || {
        let mut reader = BufReader::new(stderr);
        let mut buf = [0u8; 256];
        let mut line = Vec::new();
        let mut duration_sent = false;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            for &byte in &buf[..n] {
                if byte != b'\r' && byte != b'\n' {
                    line.push(byte);
                    continue;
                }
                if let Some((position, duration)) = parse_status(&String::from_utf8_lossy(&line)) {
                    if let (Some(duration), false) = (duration, duration_sent) {
                        duration_sent = true;
                        if events.send((generation, MediaEvent::Loaded { duration })).is_err() {
                            return;
                        }
                    }
                    if events.send((generation, MediaEvent::TimeUpdate(position))).is_err() {
                        return;
                    }
                }
                line.clear();
            }
        }
    });
}

fn stop_child(child: &mut Option<Child>) {
    if let Some(mut running) = child.take() {
        let _ = running.kill();
        let _ = running.wait();
    }
}

/// Raw audio element driving an external player
pub struct ProcessAudio {
    template: LaunchTemplate,
    source: Option<String>,
    child: Option<Child>,
    position: f64,
    volume: f32,
    /// Bumped on every launch so events from killed processes are ignored
    generation: u64,
    events_tx: Sender<(u64, MediaEvent)>,
    events_rx: Receiver<(u64, MediaEvent)>,
}

impl ProcessAudio {
    pub fn new(template: LaunchTemplate) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            template,
            source: None,
            child: None,
            position: 0.0,
            volume: 1.0,
            generation: 0,
            events_tx,
            events_rx,
        }
    }

    fn restart_if_running(&mut self) {
        if self.child.is_some() {
            stop_child(&mut self.child);
            if let Err(e) = self.play() {
                tracing::warn!(error = %e, "restarting audio player failed");
            }
        }
    }
}

impl MediaElement for ProcessAudio {
    fn load(&mut self, source: &str) {
        stop_child(&mut self.child);
        self.generation += 1;
        self.source = Some(source.to_string()).filter(|s| !s.is_empty());
        self.position = 0.0;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if self.child.is_some() {
            return Ok(());
        }
        let source = self.source.clone().ok_or(MediaError::NoSource)?;
        self.generation += 1;
        let mut child = self.template.spawn(&source, self.position, self.volume)?;
        spawn_status_reader(&mut child, self.generation, self.events_tx.clone());
        tracing::debug!(source = %source, start = self.position, "audio player started");
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) {
        stop_child(&mut self.child);
    }

    fn set_volume(&mut self, volume: f32) {
        // Takes effect on the next launch
        self.volume = volume;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.max(0.0);
        self.restart_if_running();
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        while let Ok((generation, event)) = self.events_rx.try_recv() {
            if generation != self.generation {
                continue;
            }
            if let MediaEvent::TimeUpdate(position) = event {
                self.position = position;
            }
            return Some(event);
        }

        let child = self.child.as_mut()?;
        match child.try_wait() {
            Ok(Some(status)) => {
                self.child = None;
                if status.success() {
                    self.position = 0.0;
                    Some(MediaEvent::Ended)
                } else {
                    tracing::warn!(?status, "audio player exited abnormally");
                    None
                }
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "polling audio player failed");
                None
            }
        }
    }
}

impl Drop for ProcessAudio {
    fn drop(&mut self) {
        stop_child(&mut self.child);
    }
}

/// Video surface that reads command messages and drives an external player
pub struct ProcessVideoSurface {
    template: LaunchTemplate,
    video_id: Option<String>,
    child: Option<Child>,
    volume: f32,
}

impl ProcessVideoSurface {
    pub fn new(template: LaunchTemplate) -> Self {
        Self {
            template,
            video_id: None,
            child: None,
            volume: 1.0,
        }
    }
}

impl VideoSurface for ProcessVideoSurface {
    fn load(&mut self, video_id: &str) {
        if self.video_id.as_deref() != Some(video_id) {
            stop_child(&mut self.child);
            self.video_id = Some(video_id.to_string());
        }
    }

    fn post(&mut self, message: &str) -> Result<(), MediaError> {
        let video_id = self.video_id.clone().ok_or(MediaError::Detached)?;
        match VideoCommand::from_message(message)? {
            VideoCommand::Play => {
                if let Some(child) = self.child.as_mut() {
                    if matches!(child.try_wait(), Ok(None)) {
                        return Ok(());
                    }
                }
                let url = format!("{VIDEO_URL_PREFIX}{video_id}");
                self.child = Some(self.template.spawn(&url, 0.0, self.volume)?);
            }
            VideoCommand::Pause => stop_child(&mut self.child),
            VideoCommand::SetVolume(level) => self.volume = level as f32 / 100.0,
        }
        Ok(())
    }
}

impl Drop for ProcessVideoSurface {
    fn drop(&mut self) {
        stop_child(&mut self.child);
    }
}

/// Silent element used with `--mute`
#[derive(Debug, Default)]
pub struct NullAudio;

impl MediaElement for NullAudio {
    fn load(&mut self, _source: &str) {}

    fn play(&mut self) -> Result<(), MediaError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_volume(&mut self, _volume: f32) {}

    fn seek(&mut self, _seconds: f64) {}

    fn poll_event(&mut self) -> Option<MediaEvent> {
        None
    }
}

/// Surface that accepts and discards every message
#[derive(Debug, Default)]
pub struct NullSurface;

impl VideoSurface for NullSurface {
    fn load(&mut self, _video_id: &str) {}

    fn post(&mut self, message: &str) -> Result<(), MediaError> {
        tracing::trace!(message, "video command discarded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> LaunchTemplate {
        LaunchTemplate::new(
            "mpv",
            vec![
                "--start={start}".to_string(),
                "--volume={volume}".to_string(),
                "{url}".to_string(),
            ],
        )
    }

    #[test]
    fn test_render_args_substitutes_placeholders() {
        let args = template().render_args("https://example.com/a.mp3", 12.34, 0.7);
        assert_eq!(args, vec!["--start=12.3", "--volume=70", "https://example.com/a.mp3"]);
    }

    #[test]
    fn test_render_args_clamps() {
        let args = template().render_args("u", -5.0, 3.0);
        assert_eq!(args[0], "--start=0.0");
        assert_eq!(args[1], "--volume=100");
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("12.5 180.0"), Some((12.5, Some(180.0))));
        assert_eq!(parse_status("3.0"), Some((3.0, None)));
        assert_eq!(parse_status("(Paused) AV: 00:01"), None);
        assert_eq!(parse_status(""), None);
    }

    #[test]
    fn test_play_without_source_fails() {
        let mut audio = ProcessAudio::new(template());
        audio.load("");
        assert!(matches!(audio.play(), Err(MediaError::NoSource)));
    }

    #[test]
    fn test_missing_program_reports_spawn_error() {
        let mut audio = ProcessAudio::new(LaunchTemplate::new(
            "nook-test-no-such-player",
            vec!["{url}".to_string()],
        ));
        audio.load("https://example.com/a.mp3");
        assert!(matches!(audio.play(), Err(MediaError::Spawn { .. })));
        assert_eq!(audio.poll_event(), None);
    }

    #[test]
    fn test_surface_without_video_is_detached() {
        let mut surface = ProcessVideoSurface::new(template());
        let result = surface.post(&VideoCommand::Play.to_message());
        assert!(matches!(result, Err(MediaError::Detached)));
    }

    #[test]
    fn test_surface_volume_message() {
        let mut surface = ProcessVideoSurface::new(template());
        surface.load("abc");
        surface.post(&VideoCommand::SetVolume(40).to_message()).unwrap();
        assert!((surface.volume - 0.4).abs() < f32::EPSILON);
    }
}
