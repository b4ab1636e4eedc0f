pub mod media;
pub mod process;
pub mod visualizer;

use crate::domain::{Track, TrackCategory, TrackSelector};
pub use media::{CommandQueue, MediaElement, MediaEvent, VideoCommand, VideoSurface};
pub use process::{LaunchTemplate, NullAudio, NullSurface, ProcessAudio, ProcessVideoSurface};
pub use visualizer::Visualizer;

/// Track selection plus playback state, routed to whichever backend the
/// current track needs. Sole owner of the audio element and video surface.
pub struct Player {
    selector: TrackSelector,
    pub is_playing: bool,
    pub volume: f32,
    pub position_secs: f64,
    pub duration_secs: f64,
    using_external_video: bool,
    commands: CommandQueue,
    audio: Box<dyn MediaElement>,
    surface: Box<dyn VideoSurface>,
}

impl Player {
    pub fn new(audio: Box<dyn MediaElement>, surface: Box<dyn VideoSurface>, volume: f32) -> Self {
        let mut player = Self {
            selector: TrackSelector::new(),
            is_playing: false,
            volume: volume.clamp(0.0, 1.0),
            position_secs: 0.0,
            duration_secs: 0.0,
            using_external_video: false,
            commands: CommandQueue::new(),
            audio,
            surface,
        };
        player.audio.set_volume(player.volume);
        player.load_current();
        player
    }

    pub fn current_track(&self) -> &'static Track {
        self.selector.current()
    }

    pub fn category(&self) -> TrackCategory {
        self.selector.category()
    }

    pub fn current_index(&self) -> usize {
        self.selector.current_id().index
    }

    /// Tracks of the active list
    pub fn tracks(&self) -> &'static [Track] {
        self.selector.tracks()
    }

    pub fn using_external_video(&self) -> bool {
        self.using_external_video
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
        self.sync_playback();
    }

    pub fn next(&mut self) {
        self.selector.next();
        self.load_current();
    }

    pub fn prev(&mut self) {
        self.selector.prev();
        self.load_current();
    }

    /// Switch between the music and ambient lists
    pub fn toggle_category(&mut self) {
        self.selector.toggle_category();
        self.load_current();
    }

    pub fn select(&mut self, index: usize) {
        if self.selector.select(index).is_some() {
            self.load_current();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.audio.set_volume(self.volume);
        if self.using_external_video {
            self.commands
                .push(VideoCommand::SetVolume((self.volume * 100.0).floor() as u8));
            self.flush_commands();
        }
    }

    /// Seek to a fraction of the track. Only the raw audio backend can seek;
    /// returns false when the current track is on the video surface.
    pub fn seek_fraction(&mut self, fraction: f64) -> bool {
        if self.using_external_video {
            return false;
        }
        let target = fraction.clamp(0.0, 1.0) * self.duration_secs;
        self.audio.seek(target);
        self.position_secs = target;
        true
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(position) => self.position_secs = position,
            MediaEvent::Loaded { duration } => self.duration_secs = duration,
            MediaEvent::Ended => {
                tracing::debug!(title = self.current_track().title, "track ended");
                self.next();
            }
        }
    }

    /// Drain pending events from the audio element
    pub fn pump_media(&mut self) {
        while let Some(event) = self.audio.poll_event() {
            self.handle_event(event);
        }
    }

    /// Re-send the current play intent so backgrounding does not silently stop playback
    pub fn reassert_playback(&mut self) {
        if self.is_playing {
            self.sync_playback();
        }
    }

    pub fn flush_commands(&mut self) {
        self.commands.flush(self.surface.as_mut());
    }

    /// Played fraction of the current track (0.0 to 1.0)
    pub fn progress_ratio(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.position_secs / self.duration_secs).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn position_label(&self) -> String {
        format_time(self.position_secs)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.duration_secs)
    }

    /// Push the current play/pause intent to the active backend
    fn sync_playback(&mut self) {
        if self.using_external_video {
            let command = if self.is_playing {
                VideoCommand::Play
            } else {
                VideoCommand::Pause
            };
            self.commands.push(command);
            self.flush_commands();
        } else if self.is_playing {
            if let Err(e) = self.audio.play() {
                tracing::error!(title = self.current_track().title, error = %e, "playback failed");
            }
        } else {
            self.audio.pause();
        }
    }

    /// Point the backends at the selected track and continue the play intent
    fn load_current(&mut self) {
        let track = self.selector.current();
        let was_video = self.using_external_video;
        self.using_external_video = track.uses_external_video();
        self.position_secs = 0.0;
        self.duration_secs = 0.0;

        if was_video && !self.using_external_video {
            self.commands.push(VideoCommand::Pause);
            self.flush_commands();
        }

        match track.external_video_id {
            Some(video_id) => {
                self.audio.pause();
                self.audio.load("");
                self.surface.load(video_id);
                self.commands
                    .push(VideoCommand::SetVolume((self.volume * 100.0).floor() as u8));
            }
            None => self.audio.load(track.source_url),
        }

        if self.is_playing {
            self.sync_playback();
        } else {
            self.flush_commands();
        }
    }
}

/// Format seconds as "m:ss"
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) as u64 } else { 0 };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tracks::{AMBIENT_TRACKS, MUSIC_TRACKS};
    use crate::player::media::MediaError;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum AudioCall {
        Load(String),
        Play,
        Pause,
        Volume(f32),
        Seek(f64),
    }

    #[derive(Default)]
    struct AudioLog {
        calls: Vec<AudioCall>,
        events: VecDeque<MediaEvent>,
        fail_play: bool,
    }

    #[derive(Clone, Default)]
    struct FakeAudio(Rc<RefCell<AudioLog>>);

    impl MediaElement for FakeAudio {
        fn load(&mut self, source: &str) {
            self.0.borrow_mut().calls.push(AudioCall::Load(source.to_string()));
        }

        fn play(&mut self) -> Result<(), MediaError> {
            let mut log = self.0.borrow_mut();
            log.calls.push(AudioCall::Play);
            if log.fail_play {
                Err(MediaError::NoSource)
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.0.borrow_mut().calls.push(AudioCall::Pause);
        }

        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().calls.push(AudioCall::Volume(volume));
        }

        fn seek(&mut self, seconds: f64) {
            self.0.borrow_mut().calls.push(AudioCall::Seek(seconds));
        }

        fn poll_event(&mut self) -> Option<MediaEvent> {
            self.0.borrow_mut().events.pop_front()
        }
    }

    #[derive(Clone, Default)]
    struct FakeSurface(Rc<RefCell<Vec<VideoCommand>>>);

    impl VideoSurface for FakeSurface {
        fn load(&mut self, _video_id: &str) {}

        fn post(&mut self, message: &str) -> Result<(), MediaError> {
            self.0.borrow_mut().push(VideoCommand::from_message(message)?);
            Ok(())
        }
    }

    fn player() -> (Player, FakeAudio, FakeSurface) {
        let audio = FakeAudio::default();
        let surface = FakeSurface::default();
        let player = Player::new(Box::new(audio.clone()), Box::new(surface.clone()), 0.7);
        audio.0.borrow_mut().calls.clear();
        surface.0.borrow_mut().clear();
        (player, audio, surface)
    }

    /// Move to the first raw-audio music track
    fn to_raw_track(player: &mut Player) {
        player.select(3);
        assert!(!player.using_external_video());
    }

    #[test]
    fn test_first_track_uses_video_surface() {
        let (player, _, _) = player();
        assert!(player.using_external_video());
        assert_eq!(player.current_track().title, MUSIC_TRACKS[0].title);
    }

    #[test]
    fn test_external_video_flag_follows_track() {
        let (mut player, _, _) = player();
        for _ in 0..MUSIC_TRACKS.len() {
            player.next();
            assert_eq!(
                player.using_external_video(),
                player.current_track().external_video_id.is_some()
            );
        }
    }

    #[test]
    fn test_next_is_circular_in_both_lists() {
        let (mut player, _, _) = player();
        let start = player.current_track().title;
        for _ in 0..MUSIC_TRACKS.len() {
            player.next();
        }
        assert_eq!(player.current_track().title, start);

        player.toggle_category();
        let start = player.current_track().title;
        for _ in 0..AMBIENT_TRACKS.len() {
            player.next();
        }
        assert_eq!(player.current_track().title, start);
    }

    #[test]
    fn test_toggle_play_on_video_posts_commands() {
        let (mut player, audio, surface) = player();
        player.toggle_play();
        player.toggle_play();
        assert_eq!(*surface.0.borrow(), vec![VideoCommand::Play, VideoCommand::Pause]);
        assert!(!audio.0.borrow().calls.contains(&AudioCall::Play));
    }

    #[test]
    fn test_toggle_play_on_raw_audio_drives_element() {
        let (mut player, audio, surface) = player();
        to_raw_track(&mut player);
        audio.0.borrow_mut().calls.clear();
        surface.0.borrow_mut().clear();

        player.toggle_play();
        player.toggle_play();
        assert_eq!(audio.0.borrow().calls, vec![AudioCall::Play, AudioCall::Pause]);
        assert!(surface.0.borrow().is_empty());
    }

    #[test]
    fn test_play_failure_keeps_intent() {
        let (mut player, audio, _) = player();
        to_raw_track(&mut player);
        audio.0.borrow_mut().fail_play = true;
        player.toggle_play();
        assert!(player.is_playing);
    }

    #[test]
    fn test_volume_goes_to_active_backend() {
        let (mut player, audio, surface) = player();
        player.set_volume(0.5);
        assert_eq!(*surface.0.borrow(), vec![VideoCommand::SetVolume(50)]);
        assert!(audio.0.borrow().calls.contains(&AudioCall::Volume(0.5)));

        to_raw_track(&mut player);
        surface.0.borrow_mut().clear();
        player.set_volume(2.0);
        assert_eq!(player.volume, 1.0);
        assert!(surface.0.borrow().is_empty());
    }

    #[test]
    fn test_seek_only_on_raw_audio() {
        let (mut player, audio, _) = player();
        player.duration_secs = 200.0;
        assert!(!player.seek_fraction(0.5));

        to_raw_track(&mut player);
        player.handle_event(MediaEvent::Loaded { duration: 200.0 });
        assert!(player.seek_fraction(0.25));
        assert_eq!(player.position_secs, 50.0);
        assert!(audio.0.borrow().calls.contains(&AudioCall::Seek(50.0)));
    }

    #[test]
    fn test_ended_advances_track() {
        let (mut player, audio, _) = player();
        to_raw_track(&mut player);
        audio.0.borrow_mut().events.push_back(MediaEvent::TimeUpdate(42.0));
        audio.0.borrow_mut().events.push_back(MediaEvent::Ended);

        player.pump_media();

        assert_eq!(player.current_index(), 4);
        assert_eq!(player.position_secs, 0.0);
    }

    #[test]
    fn test_leaving_video_track_pauses_surface() {
        let (mut player, _, surface) = player();
        player.toggle_play();
        surface.0.borrow_mut().clear();

        player.toggle_category();

        assert!(!player.using_external_video());
        assert_eq!(surface.0.borrow().first(), Some(&VideoCommand::Pause));
    }

    #[test]
    fn test_playing_continues_on_new_raw_track() {
        let (mut player, audio, _) = player();
        to_raw_track(&mut player);
        player.toggle_play();
        audio.0.borrow_mut().calls.clear();

        player.next();

        let calls = audio.0.borrow().calls.clone();
        assert_eq!(
            calls,
            vec![AudioCall::Load(MUSIC_TRACKS[4].source_url.to_string()), AudioCall::Play]
        );
    }

    #[test]
    fn test_reassert_only_when_playing() {
        let (mut player, _, surface) = player();
        player.reassert_playback();
        assert!(surface.0.borrow().is_empty());

        player.toggle_play();
        player.reassert_playback();
        assert_eq!(*surface.0.borrow(), vec![VideoCommand::Play, VideoCommand::Play]);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn test_progress_ratio() {
        let (mut player, _, _) = player();
        assert_eq!(player.progress_ratio(), 0.0);
        player.handle_event(MediaEvent::Loaded { duration: 100.0 });
        player.handle_event(MediaEvent::TimeUpdate(25.0));
        assert_eq!(player.progress_ratio(), 0.25);
    }
}
