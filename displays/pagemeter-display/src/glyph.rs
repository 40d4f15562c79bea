//! Glyph blitter
//!
//! Text is drawn from the double-height font table, so each character cell
//! spans two pages. Every column is shifted down two pixels to sit the 7-row
//! glyph in the middle of its 16-pixel cell.

use crate::font::{glyph_index, FONT_DOUBLE, GLYPH_COLUMNS};
use crate::framebuffer::{FrameBuffer, WIDTH};

/// Pixel pitch of a normal-width character cell
pub const CELL_WIDTH: usize = GLYPH_COLUMNS;

/// Buffer index of the first glyph column in cell 0 (control byte included)
const COLUMN_LEAD: usize = 5;

/// Vertical shift applied to every glyph column
const ROW_SHIFT: u32 = 2;

/// Bits flipped for inverted text; the top two rows fall off after the shift
const INVERT_MASK: u16 = 0x3FFF;

/// How a character is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphStyle {
    /// Draw light-on-dark
    pub inverted: bool,
    /// Draw every column twice
    pub double_width: bool,
}

impl GlyphStyle {
    /// Plain single-width text
    pub const NORMAL: Self = Self {
        inverted: false,
        double_width: false,
    };

    /// Single-width inverted text
    pub const INVERTED: Self = Self {
        inverted: true,
        double_width: false,
    };

    /// Double-width text
    pub const WIDE: Self = Self {
        inverted: false,
        double_width: true,
    };

    /// Horizontal pitch of a cell in pixels
    pub const fn cell_width(&self) -> usize {
        if self.double_width {
            CELL_WIDTH * 2
        } else {
            CELL_WIDTH
        }
    }
}

/// Buffer index of the top byte of glyph column 0 for a cell
pub fn cell_offset(cursor_x: u8, cursor_y: u8, style: GlyphStyle) -> usize {
    let row_offset = cursor_y as usize * WIDTH * 2;
    let column_offset = cursor_x as usize * style.cell_width() + COLUMN_LEAD;
    row_offset + column_offset
}

/// Rendered 16-bit column for one glyph column, before it is split into pages
pub fn render_column(ch: u8, column: usize, inverted: bool) -> u16 {
    let mut bits = FONT_DOUBLE[glyph_index(ch)][column];

    // The leading gap column stays dark so inverted cells keep a border
    if inverted && column > 0 {
        bits ^= INVERT_MASK;
    }

    bits << ROW_SHIFT
}

/// Draw one character at a character-cell position
///
/// Writes both pages of the cell; nothing is flushed. Columns that would
/// land past the end of the buffer are dropped.
pub fn draw_char(fb: &mut FrameBuffer, ch: u8, cursor_x: u8, cursor_y: u8, style: GlyphStyle) {
    let base = cell_offset(cursor_x, cursor_y, style);

    for i in 0..GLYPH_COLUMNS {
        let column = render_column(ch, i, style.inverted);
        let [top, bottom] = column.to_le_bytes();

        let offset = base + if style.double_width { i * 2 } else { i };

        fb.put(offset, top);
        fb.put(offset + WIDTH, bottom);
        if style.double_width {
            fb.put(offset + 1, top);
            fb.put(offset + WIDTH + 1, bottom);
        }
    }
}

/// Flip the visible glyph rows of one cell, as if it had been drawn inverted
///
/// Applying it twice restores the cell.
pub fn invert_cell(fb: &mut FrameBuffer, cursor_x: u8, cursor_y: u8) {
    let [top, bottom] = (INVERT_MASK << ROW_SHIFT).to_le_bytes();
    let base = cell_offset(cursor_x, cursor_y, GlyphStyle::NORMAL);

    for i in 1..GLYPH_COLUMNS {
        fb.toggle(base + i, top);
        fb.toggle(base + i + WIDTH, bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FONT_SINGLE;

    #[test]
    fn test_cell_offsets() {
        assert_eq!(cell_offset(0, 0, GlyphStyle::NORMAL), 5);
        assert_eq!(cell_offset(1, 0, GlyphStyle::NORMAL), 11);
        assert_eq!(cell_offset(1, 0, GlyphStyle::WIDE), 17);
        assert_eq!(cell_offset(0, 1, GlyphStyle::NORMAL), 2 * WIDTH + 5);
        assert_eq!(cell_offset(19, 3, GlyphStyle::NORMAL), 3 * 256 + 19 * 6 + 5);
    }

    #[test]
    fn test_space_renders_blank() {
        for i in 0..GLYPH_COLUMNS {
            assert_eq!(render_column(b' ', i, false), 0);
        }
    }

    #[test]
    fn test_inverted_space_keeps_gap_and_edges() {
        assert_eq!(render_column(b' ', 0, true), 0);
        for i in 1..GLYPH_COLUMNS {
            // 14 lit rows, shifted down by two
            assert_eq!(render_column(b' ', i, true), 0xFFFC);
        }
    }

    #[test]
    fn test_draw_char_splits_pages() {
        let mut fb = FrameBuffer::new(64);
        draw_char(&mut fb, b'|', 0, 0, GlyphStyle::NORMAL);

        // Column 3 of '|' is rows 0..=6 → 14 doubled rows → shifted by 2
        let expected = (0x3FFFu16 << 2).to_le_bytes();
        assert_eq!(fb.byte(5 + 3), Some(expected[0]));
        assert_eq!(fb.byte(5 + 3 + WIDTH), Some(expected[1]));
        assert_eq!(fb.byte(5 + 2), Some(0));

        // In pixel terms: x = 7, y = 2..=15
        for y in 0..16u8 {
            assert_eq!(fb.pixel(7, y), (2..16).contains(&y), "y = {}", y);
        }
    }

    #[test]
    fn test_draw_char_matches_font_table() {
        let mut fb = FrameBuffer::new(64);
        draw_char(&mut fb, b'A', 2, 1, GlyphStyle::NORMAL);

        let base = cell_offset(2, 1, GlyphStyle::NORMAL);
        for i in 0..GLYPH_COLUMNS {
            let column = FONT_DOUBLE[glyph_index(b'A')][i] << 2;
            assert_eq!(fb.byte(base + i), Some(column as u8));
            assert_eq!(fb.byte(base + i + WIDTH), Some((column >> 8) as u8));
        }
        assert_ne!(FONT_SINGLE[glyph_index(b'A')][1], 0);
    }

    #[test]
    fn test_double_width_duplicates_columns() {
        let mut fb = FrameBuffer::new(64);
        draw_char(&mut fb, b'H', 0, 0, GlyphStyle::WIDE);

        let base = cell_offset(0, 0, GlyphStyle::WIDE);
        for i in 0..GLYPH_COLUMNS {
            let left = base + i * 2;
            assert_eq!(fb.byte(left), fb.byte(left + 1));
            assert_eq!(fb.byte(left + WIDTH), fb.byte(left + WIDTH + 1));
        }
        // 'H' has both verticals lit
        assert_ne!(fb.byte(base + 2), Some(0));
    }

    #[test]
    fn test_invert_cell_matches_inverted_draw() {
        let mut plain = FrameBuffer::new(64);
        let mut inverted = FrameBuffer::new(64);
        draw_char(&mut plain, b'Q', 4, 2, GlyphStyle::NORMAL);
        draw_char(&mut inverted, b'Q', 4, 2, GlyphStyle::INVERTED);

        invert_cell(&mut plain, 4, 2);
        assert_eq!(plain.as_bytes(), inverted.as_bytes());

        invert_cell(&mut plain, 4, 2);
        invert_cell(&mut inverted, 4, 2);
        let mut reference = FrameBuffer::new(64);
        draw_char(&mut reference, b'Q', 4, 2, GlyphStyle::NORMAL);
        assert_eq!(plain.as_bytes(), reference.as_bytes());
        assert_eq!(inverted.as_bytes(), reference.as_bytes());
    }

    #[test]
    fn test_draw_past_end_is_clipped() {
        let mut fb = FrameBuffer::new(64);
        draw_char(&mut fb, 0x80, 19, 7, GlyphStyle::WIDE);
        assert_eq!(fb.byte(0), Some(crate::framebuffer::CONTROL_BYTE));
    }
}
