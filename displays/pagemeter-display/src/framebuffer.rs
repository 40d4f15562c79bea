//! Packed page-ordered framebuffer
//!
//! Byte 0 is the I2C control byte that tells the SSD1306 the rest of the
//! transfer is display RAM. Keeping it glued to the pixel data lets a whole
//! frame go out as a single bus write.
//!
//! Pixel `(x, y)` lives in bit `y % 8` of byte `1 + (y / 8) * WIDTH + x`.

/// Panel width in pixels
pub const WIDTH: usize = 128;

/// Tallest supported panel in pixels
pub const MAX_HEIGHT: usize = 64;

/// Pixel rows per page
pub const PAGE_HEIGHT: usize = 8;

/// Data-stream prefix (Co = 0, D/C# = 1)
pub const CONTROL_BYTE: u8 = 0x40;

/// Total buffer size: control byte plus the largest page area
pub const BUFFER_SIZE: usize = 1 + WIDTH * MAX_HEIGHT / PAGE_HEIGHT;

/// 1bpp framebuffer for a 128-column SSD1306
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
    height: u8,
}

impl FrameBuffer {
    /// Create a blank framebuffer for a panel of the given height
    pub const fn new(height: u8) -> Self {
        let mut bytes = [0u8; BUFFER_SIZE];
        bytes[0] = CONTROL_BYTE;
        Self { bytes, height }
    }

    /// Active panel height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Number of pixel bytes covered by the active height
    pub fn data_len(&self) -> usize {
        (WIDTH * self.height as usize / PAGE_HEIGHT).min(BUFFER_SIZE - 1)
    }

    /// Bytes to send for one flush: control byte plus `height * 16` data bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..1 + self.data_len()]
    }

    /// Pixel bytes of the whole backing store, without the control byte
    pub fn data(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Map a (wrapped) coordinate to its byte index and bit mask
    #[inline]
    fn locate(x: u8, y: u8) -> (usize, u8) {
        let x = x & 0x7F;
        let y = y & 0x3F;
        let index = (((y & 0xF8) as usize) << 4) + x as usize + 1;
        (index, 1 << (y & 7))
    }

    /// Turn a pixel on
    ///
    /// `x` wraps at 128 and `y` at 64, so out-of-range coordinates alias
    /// onto the panel instead of being rejected.
    pub fn set_pixel(&mut self, x: u8, y: u8) {
        let (index, mask) = Self::locate(x, y);
        self.bytes[index] |= mask;
    }

    /// Turn a pixel off (same wrapping as [`set_pixel`](Self::set_pixel))
    pub fn clear_pixel(&mut self, x: u8, y: u8) {
        let (index, mask) = Self::locate(x, y);
        self.bytes[index] &= !mask;
    }

    /// Read a pixel back
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        let (index, mask) = Self::locate(x, y);
        self.bytes[index] & mask != 0
    }

    /// Blank every pixel byte; the control byte is kept
    ///
    /// Rows below a short panel are cleared too, since wrapped writes can
    /// land there and `pixel` reads them back.
    pub fn clear(&mut self) {
        self.bytes[1..].fill(0);
    }

    /// Read a raw buffer byte (index 0 is the control byte)
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Store a raw buffer byte
    ///
    /// Writes to the control byte or past the end are dropped.
    pub(crate) fn put(&mut self, index: usize, value: u8) {
        if index == 0 {
            return;
        }
        if let Some(byte) = self.bytes.get_mut(index) {
            *byte = value;
        }
    }

    /// XOR a raw buffer byte, with the same clipping as `put`
    pub(crate) fn toggle(&mut self, index: usize, mask: u8) {
        if index == 0 {
            return;
        }
        if let Some(byte) = self.bytes.get_mut(index) {
            *byte ^= mask;
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(MAX_HEIGHT as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_buffer_has_control_byte() {
        let fb = FrameBuffer::new(64);
        assert_eq!(fb.byte(0), Some(CONTROL_BYTE));
        assert!(fb.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_flush_length_follows_height() {
        assert_eq!(FrameBuffer::new(32).as_bytes().len(), 32 * 16 + 1);
        assert_eq!(FrameBuffer::new(64).as_bytes().len(), 64 * 16 + 1);
        assert_eq!(FrameBuffer::new(64).as_bytes().len(), BUFFER_SIZE);
    }

    #[test]
    fn test_pixel_byte_layout() {
        let mut fb = FrameBuffer::new(64);

        fb.set_pixel(0, 0);
        assert_eq!(fb.byte(1), Some(0b0000_0001));

        fb.set_pixel(0, 7);
        assert_eq!(fb.byte(1), Some(0b1000_0001));

        // Second page, column 5
        fb.set_pixel(5, 9);
        assert_eq!(fb.byte(1 + WIDTH + 5), Some(0b0000_0010));

        // Last pixel on the panel
        fb.set_pixel(127, 63);
        assert_eq!(fb.byte(BUFFER_SIZE - 1), Some(0b1000_0000));
    }

    #[test]
    fn test_pixel_wraps() {
        let mut fb = FrameBuffer::new(64);
        fb.set_pixel(255, 64);
        assert!(fb.pixel(127, 0));
        assert!(fb.pixel(255, 128));

        fb.clear_pixel(127, 0);
        assert!(!fb.pixel(255, 64));
    }

    #[test]
    fn test_clear_keeps_control_byte() {
        let mut fb = FrameBuffer::new(64);
        for x in 0..128 {
            fb.set_pixel(x, x / 2);
        }
        fb.clear();

        assert_eq!(fb.byte(0), Some(CONTROL_BYTE));
        for x in 0..128u8 {
            for y in 0..64u8 {
                assert!(!fb.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_clear_short_panel_covers_hidden_rows() {
        let mut fb = FrameBuffer::new(32);
        fb.set_pixel(0, 40);
        fb.set_pixel(127, 63);
        fb.clear();

        assert!(!fb.pixel(0, 40));
        assert!(!fb.pixel(127, 63));
        assert!(fb.data().iter().all(|&b| b == 0));
        assert_eq!(fb.byte(0), Some(CONTROL_BYTE));
    }

    #[test]
    fn test_put_protects_control_byte() {
        let mut fb = FrameBuffer::new(32);
        fb.put(0, 0xFF);
        fb.put(BUFFER_SIZE, 0xFF);
        fb.toggle(0, 0xFF);
        assert_eq!(fb.byte(0), Some(CONTROL_BYTE));

        fb.put(10, 0xAA);
        fb.toggle(10, 0x0F);
        assert_eq!(fb.byte(10), Some(0xA5));
    }

    proptest! {
        #[test]
        fn prop_set_then_clear_restores_byte(x: u8, y: u8, seed: u8) {
            let mut fb = FrameBuffer::new(64);
            // Scatter some existing ink so the restore is not trivially zero
            for i in 0..64u8 {
                fb.set_pixel(seed.wrapping_mul(i), i);
            }
            let before = fb.clone();
            let was_set = fb.pixel(x, y);

            fb.set_pixel(x, y);
            prop_assert!(fb.pixel(x, y));
            fb.clear_pixel(x, y);
            if was_set {
                fb.set_pixel(x, y);
            }

            prop_assert_eq!(fb.as_bytes(), before.as_bytes());
        }

        #[test]
        fn prop_wrapped_coordinates_alias(x: u8, y: u8) {
            let mut a = FrameBuffer::new(64);
            let mut b = FrameBuffer::new(64);
            a.set_pixel(x, y);
            b.set_pixel(x & 0x7F, y & 0x3F);
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        #[test]
        fn prop_cleared_buffer_reads_unset(x: u8, y: u8, tall: bool) {
            let mut fb = FrameBuffer::new(if tall { 64 } else { 32 });
            fb.set_pixel(x, y);
            fb.clear();
            prop_assert!(!fb.pixel(x, y));
        }
    }
}
