//! pagemeter Hardware Abstraction Layer
//!
//! This crate defines the bus transport the display renderer talks through.
//! The renderer only ever pushes bytes at a device address, so a single
//! write method is all an implementation has to provide.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pagemeter-display (SSD1306 renderer)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pagemeter-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  any embedded-hal 1.0 I2C master        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Blocking I2C writes

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key traits at crate root for convenience
pub use i2c::{BlockingI2c, I2cBus};
