// Explicit view state (year, layer, playback) passed into the core's queries

use crate::config::ExtrapolationConfig;
use crate::layer::Layer;

/// Everything a frame query depends on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewContext {
    pub year: i32,
    pub layer: Layer,
    pub variable_id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackSpeed {
    #[default]
    X1,
    X2,
    X4,
}

impl PlaybackSpeed {
    pub const ALL: [PlaybackSpeed; 3] = [PlaybackSpeed::X1, PlaybackSpeed::X2, PlaybackSpeed::X4];

    pub fn multiplier(self) -> u32 {
        match self {
            PlaybackSpeed::X1 => 1,
            PlaybackSpeed::X2 => 2,
            PlaybackSpeed::X4 => 4,
        }
    }

    /// Seconds between automatic year steps
    pub fn interval_secs(self) -> f32 {
        1.0 / self.multiplier() as f32
    }
}

/// Year selection with clamping, wrap-around stepping and timed playback
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    year: i32,
    min_year: i32,
    max_year: i32,
    pub layer: Layer,
    pub variable_id: String,
    pub playing: bool,
    pub speed: PlaybackSpeed,
    elapsed: f32,
}

impl Timeline {
    /// `min_year <= max_year` is guaranteed by config validation
    pub fn new(config: &ExtrapolationConfig) -> Self {
        Self {
            year: config.default_year.clamp(config.min_year, config.max_year),
            min_year: config.min_year,
            max_year: config.max_year,
            layer: Layer::default(),
            variable_id: config.variable_id.clone(),
            playing: false,
            speed: PlaybackSpeed::default(),
            elapsed: 0.0,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn year_range(&self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year.clamp(self.min_year, self.max_year);
    }

    /// Move one year forward or back. Stepping forward past the last year
    /// wraps to the first; stepping back from the first year stays put.
    pub fn step(&mut self, forward: bool) {
        if forward {
            if self.year >= self.max_year {
                self.year = self.min_year;
            } else {
                self.year += 1;
            }
        } else if self.year > self.min_year {
            self.year -= 1;
        }
    }

    pub fn toggle_playback(&mut self) {
        self.playing = !self.playing;
        self.elapsed = 0.0;
    }

    /// Advance playback by `delta_secs`. Returns true when the year changed.
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        if !self.playing {
            return false;
        }
        self.elapsed += delta_secs;
        let interval = self.speed.interval_secs();
        let mut changed = false;
        while self.elapsed >= interval {
            self.elapsed -= interval;
            self.step(true);
            changed = true;
        }
        changed
    }

    pub fn context(&self) -> ViewContext {
        ViewContext {
            year: self.year,
            layer: self.layer,
            variable_id: self.variable_id.clone(),
        }
    }
}
