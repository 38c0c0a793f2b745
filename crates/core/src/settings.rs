//! User preferences
//!
//! Stored as one JSON document. Missing fields take their defaults, so
//! documents written by older builds still load.

use serde::{Deserialize, Serialize};

use crate::types::{BoardSize, DEFAULT_BOARD_SIZE};

pub const DEFAULT_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub audio_enabled: bool,
    volume: f32,
    /// Stored wide so an out-of-range side only resets this field.
    board_size: u32,
    /// Highlight merged tiles after a move.
    pub show_particles: bool,
    /// Draw dots on empty cells.
    pub show_grid: bool,
}

impl Settings {
    /// Volume in `[0, 1]`.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Clamped to `[0, 1]`; NaN becomes the default.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_nan() {
            DEFAULT_VOLUME
        } else {
            volume.clamp(0.0, 1.0)
        };
    }

    pub fn board_size(&self) -> BoardSize {
        u8::try_from(self.board_size)
            .ok()
            .and_then(BoardSize::new)
            .unwrap_or_default()
    }

    pub fn set_board_size(&mut self, size: BoardSize) {
        self.board_size = u32::from(size.get());
    }

    pub fn toggle_audio(&mut self) -> bool {
        self.audio_enabled = !self.audio_enabled;
        self.audio_enabled
    }

    pub fn toggle_particles(&mut self) -> bool {
        self.show_particles = !self.show_particles;
        self.show_particles
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }

    /// Bring values read from storage back into range.
    pub fn normalized(mut self) -> Self {
        self.set_volume(self.volume);
        self.board_size = u32::from(self.board_size().get());
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            volume: DEFAULT_VOLUME,
            board_size: u32::from(DEFAULT_BOARD_SIZE),
            show_particles: true,
            show_grid: true,
        }
    }
}
