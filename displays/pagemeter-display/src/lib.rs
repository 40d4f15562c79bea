//! Level meter renderer for SSD1306 page-addressed OLEDs
//!
//! This crate provides:
//! - Column-major font tables generated at compile time from a row-major 6x8 font
//! - A packed page-ordered `FrameBuffer` with the I2C data prefix baked in
//! - A glyph blitter for double-height text (normal/double width, inverted)
//! - A nine-channel bar graph rasterizer with peak markers
//! - The `Ssd1306` driver that ties them together and talks to the bus
//!
//! # Architecture
//!
//! ```text
//!  LevelSource ──► Ssd1306::update
//!                     │
//!        ┌────────────┼─────────────┐
//!        ▼            ▼             ▼
//!   levels::draw   glyph::draw   write_framebuffer
//!        │            │             │
//!        └─────► FrameBuffer ◄──────┘
//!                     │
//!                     ▼
//!           pagemeter_hal::I2cBus
//! ```
//!
//! ## Supported Geometry
//!
//! 128x32 and 128x64 panels. The framebuffer is always sized for 128x64 so
//! pixel writes can wrap freely; only the active height is flushed.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod config;
pub mod font;
pub mod framebuffer;
pub mod glyph;
pub mod levels;
pub mod meter;
pub mod ssd1306;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use config::{ConfigError, DisplayConfig, Rotation};
pub use framebuffer::FrameBuffer;
pub use glyph::GlyphStyle;
pub use levels::{LevelSource, CHANNEL_COUNT};
pub use meter::{LevelMeter, MeterConfig};
pub use ssd1306::{Error, Ssd1306};

/// Character columns on every supported panel
pub const TEXT_COLS: u8 = 20;
