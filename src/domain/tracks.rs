use super::enums::TrackCategory;

/// Stable identity of a track: its list and position in that list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId {
    pub category: TrackCategory,
    pub index: usize,
}

/// A playable item from one of the static lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: &'static str,
    pub artist: &'static str,
    /// Raw audio URL, empty for video-only tracks
    pub source_url: &'static str,
    pub category: TrackCategory,
    pub external_video_id: Option<&'static str>,
    pub artwork_url: Option<&'static str>,
}

impl Track {
    pub fn uses_external_video(&self) -> bool {
        self.external_video_id.is_some()
    }
}

pub static MUSIC_TRACKS: [Track; 5] = [
    Track {
        title: "Studio Ghibli Playlist",
        artist: "Joe Hisaishi",
        source_url: "",
        category: TrackCategory::Music,
        external_video_id: Some("TK1Ij_-mank"),
        artwork_url: Some("https://i.pinimg.com/736x/34/a9/19/34a919d3743bacea70c6e1bc97855216.jpg"),
    },
    Track {
        title: "Ghibli Jazz Cafe",
        artist: "Studio Ghibli Jazz",
        source_url: "",
        category: TrackCategory::Music,
        external_video_id: Some("Sh_lcL-_qtg"),
        artwork_url: Some("https://i.pinimg.com/736x/3b/52/5b/3b525b51ce6d6b91a555a80fcf41597d.jpg"),
    },
    Track {
        title: "Ghibli Piano Collection",
        artist: "Studio Ghibli Piano",
        source_url: "",
        category: TrackCategory::Music,
        external_video_id: Some("zhDwjnYZiCo"),
        artwork_url: Some("https://i.pinimg.com/736x/23/21/e4/2321e4e92a8ed0eff10dc176cbb2ec49.jpg"),
    },
    Track {
        title: "Peaceful Melody",
        artist: "Joe Hisaishi Style",
        source_url: "https://soundbible.com/mp3/meadowlark_daniel-simion.mp3",
        category: TrackCategory::Music,
        external_video_id: None,
        artwork_url: Some("https://i.pinimg.com/736x/3b/52/5b/3b525b51ce6d6b91a555a80fcf41597d.jpg"),
    },
    Track {
        title: "Spirited Journey",
        artist: "Joe Hisaishi Style",
        source_url: "https://soundbible.com/mp3/robin_song-Mike_Koenig-1093738462.mp3",
        category: TrackCategory::Music,
        external_video_id: None,
        artwork_url: Some("https://i.pinimg.com/736x/23/21/e4/2321e4e92a8ed0eff10dc176cbb2ec49.jpg"),
    },
];

pub static AMBIENT_TRACKS: [Track; 2] = [
    Track {
        title: "Gentle Rain",
        artist: "Nature Sounds",
        source_url: "https://soundbible.com/mp3/light-rain-ambient-114430.mp3",
        category: TrackCategory::Ambient,
        external_video_id: None,
        artwork_url: Some("https://i.pinimg.com/736x/c5/21/81/c52181f5212108d03720d77bdc81955a.jpg"),
    },
    Track {
        title: "Forest Breeze",
        artist: "Nature Sounds",
        source_url: "https://soundbible.com/mp3/meadowlark_daniel-simion.mp3",
        category: TrackCategory::Ambient,
        external_video_id: None,
        artwork_url: Some("https://i.pinimg.com/736x/3b/52/5b/3b525b51ce6d6b91a555a80fcf41597d.jpg"),
    },
];

/// The static list for a category
pub fn tracks_for(category: TrackCategory) -> &'static [Track] {
    match category {
        TrackCategory::Music => &MUSIC_TRACKS,
        TrackCategory::Ambient => &AMBIENT_TRACKS,
    }
}

/// Current-track pointer over one of the static lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSelector {
    current: TrackId,
}

impl TrackSelector {
    pub fn new() -> Self {
        Self {
            current: TrackId {
                category: TrackCategory::Music,
                index: 0,
            },
        }
    }

    pub fn current_id(&self) -> TrackId {
        self.current
    }

    pub fn category(&self) -> TrackCategory {
        self.current.category
    }

    pub fn current(&self) -> &'static Track {
        &tracks_for(self.current.category)[self.current.index]
    }

    /// The active list
    pub fn tracks(&self) -> &'static [Track] {
        tracks_for(self.current.category)
    }

    pub fn next(&mut self) -> &'static Track {
        let len = self.tracks().len();
        self.current.index = (self.current.index + 1) % len;
        self.current()
    }

    pub fn prev(&mut self) -> &'static Track {
        let len = self.tracks().len();
        self.current.index = (self.current.index + len - 1) % len;
        self.current()
    }

    /// Switch lists and land on the first track of the other list
    pub fn toggle_category(&mut self) -> &'static Track {
        self.current = TrackId {
            category: self.current.category.other(),
            index: 0,
        };
        self.current()
    }

    /// Jump to a position in the active list. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> Option<&'static Track> {
        if index >= self.tracks().len() {
            return None;
        }
        self.current.index = index;
        Some(self.current())
    }
}

impl Default for TrackSelector {
    fn default() -> Self {
        Self::new()
    }
}
