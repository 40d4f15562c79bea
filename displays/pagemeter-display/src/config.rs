//! Display configuration
//!
//! Fixed at construction time and only validated when the controller is
//! brought up, so a bad height surfaces from `initialize` rather than `new`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default SSD1306 I2C address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Panel mounting orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Column 0 on the left, page 0 at the top
    #[default]
    Normal,
    /// Rotated 180 degrees
    Inverted,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Only 32 and 64 pixel tall panels are supported
    UnsupportedHeight(u8),
}

/// Construction-time display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Panel height in pixels (32 or 64)
    pub height: u8,
    /// Mounting orientation
    pub rotation: Rotation,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS, 32, Rotation::Normal)
    }
}

impl DisplayConfig {
    /// Create a new config
    pub const fn new(address: u8, height: u8, rotation: Rotation) -> Self {
        Self {
            address,
            height,
            rotation,
        }
    }

    /// Same config with a different height
    pub const fn with_height(mut self, height: u8) -> Self {
        self.height = height;
        self
    }

    /// Same config with a different rotation
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Check that the panel geometry is supported
    pub const fn validate(&self) -> Result<(), ConfigError> {
        match self.height {
            32 | 64 => Ok(()),
            other => Err(ConfigError::UnsupportedHeight(other)),
        }
    }

    /// Last page index for the page address range command
    pub const fn page_range_end(&self) -> u8 {
        if self.height == 32 {
            0x03
        } else {
            0x07
        }
    }

    /// Segment remap command for the orientation
    pub const fn segment_remap(&self) -> u8 {
        match self.rotation {
            Rotation::Normal => 0xA1,
            Rotation::Inverted => 0xA0,
        }
    }

    /// COM output scan direction command for the orientation
    pub const fn com_scan_direction(&self) -> u8 {
        match self.rotation {
            Rotation::Normal => 0xC8,
            Rotation::Inverted => 0xC0,
        }
    }

    /// Multiplex ratio (height - 1)
    pub const fn multiplex_ratio(&self) -> u8 {
        self.height.wrapping_sub(1)
    }

    /// COM pins hardware configuration
    pub const fn com_pins(&self) -> u8 {
        if self.height == 32 {
            0x02
        } else {
            0x12
        }
    }

    /// Text rows available (each row is two pages tall)
    pub const fn text_rows(&self) -> u8 {
        self.height / 16
    }

    /// Text row used for the status line under the meter
    pub const fn status_row(&self) -> u8 {
        if self.height == 32 {
            1
        } else {
            3
        }
    }
}
