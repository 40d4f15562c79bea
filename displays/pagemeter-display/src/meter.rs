//! Peak-holding level meter
//!
//! A ready-made [`LevelSource`]: callers push raw channel levels and a status
//! line, call [`LevelMeter::tick`] once per frame, and hand the meter to
//! `Ssd1306::update`.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::font::cell_byte;
use crate::levels::{LevelSource, CHANNEL_COUNT};
use crate::TEXT_COLS;

/// Maximum status line length
pub const STATUS_LEN: usize = TEXT_COLS as usize;

/// Peak behaviour
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeterConfig {
    /// Ticks a new peak stays put before it starts falling
    pub hold_ticks: u8,
    /// Amount the peak falls per tick once the hold expires
    pub decay_step: f32,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            hold_ticks: 20,
            decay_step: 0.02,
        }
    }
}

/// Channel levels, held peaks and a status line
#[derive(Debug, Clone)]
pub struct LevelMeter {
    config: MeterConfig,
    levels: [f32; CHANNEL_COUNT],
    peaks: [f32; CHANNEL_COUNT],
    /// Ticks left before each peak may fall
    hold: [u8; CHANNEL_COUNT],
    /// One byte per character cell
    status: Vec<u8, STATUS_LEN>,
}

impl Default for LevelMeter {
    fn default() -> Self {
        Self::new(MeterConfig::default())
    }
}

impl LevelMeter {
    /// Create a silent meter
    pub fn new(config: MeterConfig) -> Self {
        Self {
            config,
            levels: [0.0; CHANNEL_COUNT],
            peaks: [0.0; CHANNEL_COUNT],
            hold: [0; CHANNEL_COUNT],
            status: Vec::new(),
        }
    }

    /// Set the current level of one channel
    ///
    /// The value is clamped to `[0, 1]`; unknown channels are ignored.
    pub fn set_level(&mut self, channel: usize, level: f32) {
        if let Some(slot) = self.levels.get_mut(channel) {
            *slot = clamp_level(level);
        }
    }

    /// Set every channel at once
    pub fn set_levels(&mut self, levels: &[f32; CHANNEL_COUNT]) {
        for (slot, &level) in self.levels.iter_mut().zip(levels) {
            *slot = clamp_level(level);
        }
    }

    /// Replace the status line, truncated to the display width
    ///
    /// Each char takes one cell; non-ASCII chars show as the placeholder.
    pub fn set_status(&mut self, text: &str) {
        self.status.clear();
        for ch in text.chars() {
            if self.status.push(cell_byte(ch)).is_err() {
                break;
            }
        }
    }

    /// Current status line as cell bytes
    pub fn status(&self) -> &[u8] {
        &self.status
    }

    /// Advance peak tracking by one frame
    pub fn tick(&mut self) {
        for ((peak, hold), &level) in self
            .peaks
            .iter_mut()
            .zip(self.hold.iter_mut())
            .zip(self.levels.iter())
        {
            if level >= *peak {
                *peak = level;
                *hold = self.config.hold_ticks;
            } else if *hold > 0 {
                *hold -= 1;
            } else {
                *peak = (*peak - self.config.decay_step).max(level);
            }
        }
    }

    /// Drop all levels and peaks to zero
    pub fn reset(&mut self) {
        self.levels = [0.0; CHANNEL_COUNT];
        self.peaks = [0.0; CHANNEL_COUNT];
        self.hold = [0; CHANNEL_COUNT];
    }
}

impl LevelSource for LevelMeter {
    fn part_levels(&self) -> [f32; CHANNEL_COUNT] {
        self.levels
    }

    fn peak_levels(&self) -> [f32; CHANNEL_COUNT] {
        self.peaks
    }

    fn status_text(&self) -> &[u8] {
        &self.status
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
