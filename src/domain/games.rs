use rand::Rng;

/// Number of soot sprites per round
pub const SPRITE_COUNT: usize = 8;
/// Number of plushies (and slots) per round
pub const PLUSHIE_COUNT: usize = 5;

/// Which mini-game is open in the games panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    SootSprites,
    Plushies,
}

impl GameKind {
    pub fn name(&self) -> &'static str {
        match self {
            GameKind::SootSprites => "Clean the Soot Sprites",
            GameKind::Plushies => "Arrange Totoro Plushies",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: usize,
    /// Horizontal position as a percentage of the play field
    pub x: f32,
    /// Vertical position as a percentage of the play field
    pub y: f32,
    pub cleaned: bool,
}

/// Soot Sprites: sweep every sprite away
#[derive(Debug, Clone, Default)]
pub struct SootSprites {
    pub sprites: Vec<Sprite>,
    pub score: u32,
    pub active: bool,
    /// Index into the uncleaned sprites
    pub cursor: usize,
}

impl SootSprites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scatter a fresh set of sprites and reset the score
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.sprites = (0..SPRITE_COUNT)
            .map(|id| Sprite {
                id,
                x: rng.gen_range(10.0..90.0),
                y: rng.gen_range(10.0..90.0),
                cleaned: false,
            })
            .collect();
        self.score = 0;
        self.cursor = 0;
        self.active = true;
    }

    pub fn remaining(&self) -> Vec<&Sprite> {
        self.sprites.iter().filter(|s| !s.cleaned).collect()
    }

    /// Clean a sprite. Returns true when that was the last one.
    pub fn clean(&mut self, id: usize) -> bool {
        if !self.active {
            return false;
        }
        let Some(sprite) = self.sprites.iter_mut().find(|s| s.id == id && !s.cleaned) else {
            return false;
        };
        sprite.cleaned = true;
        self.score += 1;

        let remaining = self.remaining().len();
        if remaining == 0 {
            self.active = false;
            return true;
        }
        self.cursor = self.cursor.min(remaining - 1);
        false
    }

    /// Clean whichever sprite the cursor is on
    pub fn clean_at_cursor(&mut self) -> bool {
        let id = self.remaining().get(self.cursor).map(|s| s.id);
        match id {
            Some(id) => self.clean(id),
            None => false,
        }
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.remaining().len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plushie {
    pub id: usize,
    /// Tilt in degrees, cleared once the plushie has been placed
    pub rotation: f32,
    /// Slot it currently sits in; several can share a slot after shuffling
    pub position: usize,
}

/// Plushie Arrangement: put every plushie in its own slot
#[derive(Debug, Clone, Default)]
pub struct Plushies {
    pub plushies: Vec<Plushie>,
    pub selected: Option<usize>,
    pub active: bool,
    pub complete: bool,
    /// Slot the player is pointing at
    pub slot_cursor: usize,
}

impl Plushies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.plushies = (0..PLUSHIE_COUNT)
            .map(|id| Plushie {
                id,
                rotation: rng.gen_range(0.0..360.0),
                position: rng.gen_range(0..PLUSHIE_COUNT),
            })
            .collect();
        self.selected = None;
        self.complete = false;
        self.slot_cursor = 0;
        self.active = true;
    }

    pub fn select(&mut self, id: usize) {
        if self.active && id < self.plushies.len() {
            self.selected = Some(id);
        }
    }

    /// Cycle the selection through plushie ids
    pub fn select_next(&mut self) {
        if self.plushies.is_empty() {
            return;
        }
        let next = match self.selected {
            Some(id) => (id + 1) % self.plushies.len(),
            None => 0,
        };
        self.select(next);
    }

    pub fn move_slot_cursor(&mut self, forward: bool) {
        self.slot_cursor = if forward {
            (self.slot_cursor + 1) % PLUSHIE_COUNT
        } else {
            (self.slot_cursor + PLUSHIE_COUNT - 1) % PLUSHIE_COUNT
        };
    }

    /// Move the selected plushie into `position`, swapping with an occupant.
    /// Returns true when the arrangement becomes complete.
    pub fn move_selected(&mut self, position: usize) -> bool {
        let Some(selected) = self.selected else {
            return false;
        };
        if !self.active || position >= PLUSHIE_COUNT {
            return false;
        }

        let from = self.plushies[selected].position;
        if let Some(occupant) = self
            .plushies
            .iter_mut()
            .find(|p| p.position == position && p.id != selected)
        {
            occupant.position = from;
        }

        let plushie = &mut self.plushies[selected];
        plushie.position = position;
        plushie.rotation = 0.0;
        self.selected = None;

        if self.plushies.iter().all(|p| p.position == p.id) {
            self.complete = true;
            self.active = false;
            return true;
        }
        false
    }

    /// Plushies sitting in a slot
    pub fn in_slot(&self, slot: usize) -> Vec<&Plushie> {
        self.plushies.iter().filter(|p| p.position == slot).collect()
    }
}
