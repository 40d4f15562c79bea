//! SSD1306 OLED Display Driver
//!
//! Driver for 128x32 and 128x64 SSD1306-based OLED displays via I2C.
//! The controller runs in horizontal addressing mode, so a whole frame is
//! one bus write of the framebuffer (control byte included).

use pagemeter_hal::I2cBus;

use crate::backend::{DisplayBackend, DisplayError};
use crate::config::{ConfigError, DisplayConfig};
use crate::font;
use crate::framebuffer::FrameBuffer;
use crate::glyph::{self, GlyphStyle};
use crate::levels::{self, LevelSource, CHANNEL_COUNT};
use crate::TEXT_COLS;

/// Control byte for a single command (Co = 1, D/C# = 0)
const COMMAND_PREFIX: u8 = 0x80;

/// Length of the power-up command sequence
pub const INIT_SEQUENCE_LEN: usize = 30;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const RESUME_TO_RAM: u8 = 0xA4;
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Panel height is not 32 or 64
    UnsupportedHeight(u8),
    /// Bus write failed
    Bus(E),
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::UnsupportedHeight(h) => Error::UnsupportedHeight(h),
        }
    }
}

impl<E> From<Error<E>> for DisplayError {
    fn from(e: Error<E>) -> Self {
        match e {
            Error::UnsupportedHeight(_) => DisplayError::UnsupportedGeometry,
            Error::Bus(_) => DisplayError::Communication,
        }
    }
}

/// Power-up command sequence for a configuration
///
/// Each byte goes out in its own `[COMMAND_PREFIX, byte]` frame.
pub const fn init_sequence(config: &DisplayConfig) -> [u8; INIT_SEQUENCE_LEN] {
    [
        cmd::DISPLAY_OFF,
        cmd::SET_CONTRAST,
        0x7F, // Half brightness
        cmd::SET_NORMAL,
        cmd::SET_MEMORY_MODE,
        0x00, // Horizontal addressing
        cmd::SET_COLUMN_ADDR,
        0x00,
        0x7F,
        cmd::SET_PAGE_ADDR,
        0x00,
        config.page_range_end(),
        config.segment_remap(),
        cmd::SET_MUX_RATIO,
        config.multiplex_ratio(),
        config.com_scan_direction(),
        cmd::SET_DISPLAY_OFFSET,
        0x00,
        cmd::SET_COM_PINS,
        config.com_pins(),
        cmd::SET_CLOCK_DIV,
        0x80, // Default clock
        cmd::SET_PRECHARGE,
        0x22,
        cmd::SET_VCOM_DETECT,
        0x20,
        cmd::SET_CHARGE_PUMP,
        0x14, // Internal DC/DC
        cmd::RESUME_TO_RAM,
        cmd::DISPLAY_ON,
    ]
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    config: DisplayConfig,
    framebuffer: FrameBuffer,
    initialized: bool,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: I2cBus,
{
    /// Create a new SSD1306 driver
    ///
    /// Nothing is sent until [`initialize`](Self::initialize).
    pub fn new(i2c: I2C, config: DisplayConfig) -> Self {
        Self {
            i2c,
            config,
            framebuffer: FrameBuffer::new(config.height),
            initialized: false,
        }
    }

    /// Active configuration
    pub fn config(&self) -> DisplayConfig {
        self.config
    }

    /// Local framebuffer
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Whether `initialize` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Initialize the display
    ///
    /// Fails without touching the bus if the height is unsupported. A bus
    /// error aborts the sequence and is returned as-is; there is no retry.
    pub fn initialize(&mut self) -> Result<(), Error<I2C::Error>> {
        if let Err(e) = self.config.validate() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SSD1306: unsupported height {=u8}", self.config.height);
            return Err(e.into());
        }

        for c in init_sequence(&self.config) {
            self.command(c)?;
        }

        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "SSD1306 at {=u8:#x} ready, {=u8}px",
            self.config.address,
            self.config.height
        );

        Ok(())
    }

    /// Send a command to the display
    fn command(&mut self, c: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.config.address, &[COMMAND_PREFIX, c])
            .map_err(Error::Bus)
    }

    /// Send the whole framebuffer in one write (`height * 16 + 1` bytes)
    pub fn write_framebuffer(&mut self) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.config.address, self.framebuffer.as_bytes())
            .map_err(Error::Bus)
    }

    /// Turn a pixel on (coordinates wrap)
    pub fn set_pixel(&mut self, x: u8, y: u8) {
        self.framebuffer.set_pixel(x, y);
    }

    /// Turn a pixel off (coordinates wrap)
    pub fn clear_pixel(&mut self, x: u8, y: u8) {
        self.framebuffer.clear_pixel(x, y);
    }

    /// Read a pixel back
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        self.framebuffer.pixel(x, y)
    }

    /// Clear the frame buffer, optionally flushing straight away
    pub fn clear(&mut self, immediate: bool) -> Result<(), Error<I2C::Error>> {
        self.framebuffer.clear();
        if immediate {
            self.write_framebuffer()?;
        }
        Ok(())
    }

    /// Draw one character cell
    pub fn draw_char(&mut self, ch: u8, cursor_x: u8, cursor_y: u8, style: GlyphStyle) {
        glyph::draw_char(&mut self.framebuffer, ch, cursor_x, cursor_y, style);
    }

    /// Draw cells left to right, stopping at a NUL or the right edge
    fn draw_cells<T>(&mut self, cells: T, mut cursor_x: u8, cursor_y: u8, clear_line: bool)
    where
        T: IntoIterator<Item = u8>,
    {
        for ch in cells {
            if ch == 0 || cursor_x >= TEXT_COLS {
                break;
            }
            self.draw_char(ch, cursor_x, cursor_y, GlyphStyle::NORMAL);
            cursor_x += 1;
        }

        if clear_line {
            while cursor_x < TEXT_COLS {
                self.draw_char(b' ', cursor_x, cursor_y, GlyphStyle::NORMAL);
                cursor_x += 1;
            }
        }
    }

    /// Print text starting at a character cell
    ///
    /// Drawing stops at the end of `text`, a NUL byte or column 20. With
    /// `clear_line` the rest of the row is blanked; with `immediate` the
    /// frame is flushed.
    pub fn print(
        &mut self,
        text: &[u8],
        cursor_x: u8,
        cursor_y: u8,
        clear_line: bool,
        immediate: bool,
    ) -> Result<(), Error<I2C::Error>> {
        self.draw_cells(text.iter().copied(), cursor_x, cursor_y, clear_line);
        if immediate {
            self.write_framebuffer()?;
        }
        Ok(())
    }

    /// Rasterize the channel bars starting at page row `first_row`
    pub fn draw_levels(
        &mut self,
        first_row: u8,
        levels: &[f32; CHANNEL_COUNT],
        peaks: Option<&[f32; CHANNEL_COUNT]>,
    ) {
        levels::draw_levels(&mut self.framebuffer, first_row, levels, peaks);
    }

    /// Render one frame: bars with peaks, the status line, then flush
    pub fn update<S>(&mut self, source: &S) -> Result<(), Error<I2C::Error>>
    where
        S: LevelSource + ?Sized,
    {
        let levels = source.part_levels();
        let peaks = source.peak_levels();
        self.draw_levels(0, &levels, Some(&peaks));

        let status_row = self.config.status_row();
        self.print(source.status_text(), 0, status_row, true, false)?;

        self.write_framebuffer()
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<I2C::Error>> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error<I2C::Error>> {
        if on {
            self.command(cmd::DISPLAY_ON)
        } else {
            self.command(cmd::DISPLAY_OFF)
        }
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<I2C::Error>> {
        if inverted {
            self.command(cmd::SET_INVERSE)
        } else {
            self.command(cmd::SET_NORMAL)
        }
    }
}

impl<I2C> DisplayBackend for Ssd1306<I2C>
where
    I2C: I2cBus,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.framebuffer.clear();
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= self.config.text_rows() {
            return Ok(());
        }

        self.draw_cells(text.chars().map(font::cell_byte), col, row, false);
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        if row >= self.config.text_rows() {
            return Ok(());
        }

        for col in start_col..end_col.min(TEXT_COLS) {
            glyph::invert_cell(&mut self.framebuffer, col, row);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.write_framebuffer().map_err(DisplayError::from)
    }

    fn dimensions(&self) -> (u8, u8) {
        (TEXT_COLS, self.config.text_rows())
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}
