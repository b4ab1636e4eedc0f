use crate::domain::Scene;
use crate::player::LaunchTemplate;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scene: Scene,
    pub raining: bool,
    pub fireplace: bool,
    /// Player volume in [0, 1]
    pub volume: f32,
    /// Bell and desktop notification when a pomodoro phase ends
    pub sound_cue: bool,
    /// Scene animation speed in percent of the normal rate
    pub animation_speed: u16,
    /// Program and arguments for raw audio tracks
    pub audio_command: Vec<String>,
    /// Program and arguments for externally hosted video tracks
    pub video_command: Vec<String>,
    /// Synced todo list; local-only when absent
    pub remote: Option<RemoteSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSettings {
    pub url: String,
    pub api_key: String,
    pub user_id: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

pub const MIN_ANIMATION_SPEED: u16 = 50;
pub const MAX_ANIMATION_SPEED: u16 = 150;

const STATUS_ARG: &str = "--term-status-msg=${=time-pos} ${=duration}";

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: Scene::default(),
            raining: false,
            fireplace: false,
            volume: 0.7,
            sound_cue: true,
            animation_speed: 100,
            audio_command: vec![
                "mpv".to_string(),
                "--no-video".to_string(),
                "--start={start}".to_string(),
                "--volume={volume}".to_string(),
                STATUS_ARG.to_string(),
                "{url}".to_string(),
            ],
            video_command: vec![
                "mpv".to_string(),
                "--no-video".to_string(),
                "--ytdl-format=bestaudio".to_string(),
                "--volume={volume}".to_string(),
                STATUS_ARG.to_string(),
                "{url}".to_string(),
            ],
            remote: None,
        }
    }
}

impl Settings {
    pub fn audio_template(&self) -> Option<LaunchTemplate> {
        template_from(&self.audio_command)
    }

    pub fn video_template(&self) -> Option<LaunchTemplate> {
        template_from(&self.video_command)
    }
}

fn template_from(command: &[String]) -> Option<LaunchTemplate> {
    let (program, args) = command.split_first()?;
    Some(LaunchTemplate::new(program.clone(), args.to_vec()))
}

/// Load settings from settings.json, defaults when missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    let content = crate::persistence::read_file(path)?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let mut settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
    settings.volume = settings.volume.clamp(0.0, 1.0);
    settings.animation_speed = settings
        .animation_speed
        .clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.volume, 0.7);
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            scene: Scene::Sky,
            raining: true,
            remote: Some(RemoteSettings {
                url: "https://db.example.com".to_string(),
                api_key: "anon".to_string(),
                user_id: "u1".to_string(),
                access_token: None,
            }),
            ..Settings::default()
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"scene": "meadow", "volume": 3.0}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.scene, Scene::Meadow);
        assert_eq!(settings.volume, 1.0);
        assert!(settings.sound_cue);
        assert_eq!(settings.animation_speed, 100);
        assert_eq!(settings.audio_command, Settings::default().audio_command);
    }

    #[test]
    fn test_animation_speed_is_clamped_on_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        std::fs::write(&path, r#"{"animation_speed": 10, "sound_cue": false}"#).unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.animation_speed, MIN_ANIMATION_SPEED);
        assert!(!settings.sound_cue);

        std::fs::write(&path, r#"{"animation_speed": 400}"#).unwrap();
        assert_eq!(load_settings(&path).unwrap().animation_speed, MAX_ANIMATION_SPEED);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn test_templates_from_commands() {
        let mut settings = Settings::default();
        let audio = settings.audio_template().unwrap();
        assert_eq!(audio.program, "mpv");
        assert!(audio.args.contains(&"{url}".to_string()));

        settings.video_command.clear();
        assert_eq!(settings.video_template(), None);
    }
}
