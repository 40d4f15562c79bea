//! 6x8 font and its column-major tables
//!
//! The source font is stored row-major: one byte per pixel row, bits 5..0
//! are the six pixel columns (bit 5 leftmost). Column 0 is the gap between
//! characters and row 7 is left blank. The SSD1306 wants vertical bytes, so
//! the single- and double-height column tables are derived from it in
//! `const` context and never touched at runtime.

/// One row-major glyph (8 rows, 6 significant bits each)
pub type Glyph = [u8; 8];

/// Columns per glyph
pub const GLYPH_COLUMNS: usize = 6;

/// First code point in the font
pub const FIRST_CHAR: u8 = b' ';

/// Code point of the placeholder glyph (solid block)
pub const PLACEHOLDER: u8 = 0x80;

/// Number of glyphs, `FIRST_CHAR..=PLACEHOLDER`
pub const GLYPH_COUNT: usize = (PLACEHOLDER - FIRST_CHAR) as usize + 1;

/// Single-height column data: one byte per column, bit `i` = row `i`
pub type SingleColumns = [u8; GLYPH_COLUMNS];

/// Double-height column data: each source row covers two bits
pub type DoubleColumns = [u16; GLYPH_COLUMNS];

#[rustfmt::skip]
const FONT_6X8: [Glyph; GLYPH_COUNT] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x00, 0x00, 0x04, 0x00], // '!'
    [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A, 0x00], // '#'
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04, 0x00], // '$'
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03, 0x00], // '%'
    [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D, 0x00], // '&'
    [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00], // '\''
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02, 0x00], // '('
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08, 0x00], // ')'
    [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00, 0x00], // '*'
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08, 0x00], // ','
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00], // '.'
    [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00, 0x00], // '/'
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E, 0x00], // '0'
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E, 0x00], // '1'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F, 0x00], // '2'
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E, 0x00], // '3'
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02, 0x00], // '4'
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E, 0x00], // '5'
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E, 0x00], // '6'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08, 0x00], // '7'
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E, 0x00], // '8'
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C, 0x00], // '9'
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00, 0x00], // ':'
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08, 0x00], // ';'
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02, 0x00], // '<'
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00, 0x00], // '='
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08, 0x00], // '>'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04, 0x00], // '?'
    [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E, 0x00], // '@'
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x00], // 'A'
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E, 0x00], // 'B'
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E, 0x00], // 'C'
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C, 0x00], // 'D'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F, 0x00], // 'E'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10, 0x00], // 'F'
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F, 0x00], // 'G'
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11, 0x00], // 'H'
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E, 0x00], // 'I'
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C, 0x00], // 'J'
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11, 0x00], // 'K'
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F, 0x00], // 'L'
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11, 0x00], // 'M'
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x00], // 'N'
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E, 0x00], // 'O'
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10, 0x00], // 'P'
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D, 0x00], // 'Q'
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11, 0x00], // 'R'
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E, 0x00], // 'S'
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x00], // 'T'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E, 0x00], // 'U'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04, 0x00], // 'V'
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A, 0x00], // 'W'
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11, 0x00], // 'X'
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x00], // 'Y'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F, 0x00], // 'Z'
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E, 0x00], // '['
    [0x00, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00, 0x00], // '\\'
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E, 0x00], // ']'
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x00], // '_'
    [0x08, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00], // '`'
    [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F, 0x00], // 'a'
    [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E, 0x00], // 'b'
    [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E, 0x00], // 'c'
    [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F, 0x00], // 'd'
    [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E, 0x00], // 'e'
    [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08, 0x00], // 'f'
    [0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x0E, 0x00], // 'g'
    [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11, 0x00], // 'h'
    [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E, 0x00], // 'i'
    [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C, 0x00], // 'j'
    [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12, 0x00], // 'k'
    [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E, 0x00], // 'l'
    [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11, 0x00], // 'm'
    [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11, 0x00], // 'n'
    [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E, 0x00], // 'o'
    [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10, 0x00], // 'p'
    [0x00, 0x00, 0x0D, 0x13, 0x0F, 0x01, 0x01, 0x00], // 'q'
    [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10, 0x00], // 'r'
    [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E, 0x00], // 's'
    [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06, 0x00], // 't'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D, 0x00], // 'u'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04, 0x00], // 'v'
    [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A, 0x00], // 'w'
    [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x00], // 'x'
    [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E, 0x00], // 'y'
    [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F, 0x00], // 'z'
    [0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02, 0x00], // '{'
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x00], // '|'
    [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08, 0x00], // '}'
    [0x00, 0x00, 0x08, 0x15, 0x02, 0x00, 0x00, 0x00], // '~'
    [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F, 0x00], // DEL
    [0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x00], // 0x80, placeholder block
];

/// Single-height column table, indexed by [`glyph_index`]
pub static FONT_SINGLE: [SingleColumns; GLYPH_COUNT] = build_single(&FONT_6X8);

/// Double-height column table, indexed by [`glyph_index`]
pub static FONT_DOUBLE: [DoubleColumns; GLYPH_COUNT] = build_double(&FONT_6X8);

/// Collect the bits of one glyph column into a vertical byte
///
/// Bit `i` of the result is pixel row `i`, read from bit `5 - column` of the
/// row byte.
pub const fn single_column(glyph: &Glyph, column: usize) -> u8 {
    let bit = 5 - column;
    let mut out = 0u8;
    let mut row = 0;
    while row < 8 {
        out |= ((glyph[row] >> bit) & 1) << row;
        row += 1;
    }
    out
}

/// Stretch a vertical byte to 16 bits, one source bit per two output bits
pub const fn stretch_column(single: u8) -> u16 {
    let mut out = 0u16;
    let mut i = 0;
    while i < 8 {
        let bit = ((single >> i) & 1) as u16;
        out |= (bit << (i * 2)) | (bit << (i * 2 + 1));
        i += 1;
    }
    out
}

/// Double-height version of [`single_column`]
pub const fn double_column(glyph: &Glyph, column: usize) -> u16 {
    stretch_column(single_column(glyph, column))
}

const fn build_single(font: &[Glyph; GLYPH_COUNT]) -> [SingleColumns; GLYPH_COUNT] {
    let mut out = [[0u8; GLYPH_COLUMNS]; GLYPH_COUNT];
    let mut g = 0;
    while g < GLYPH_COUNT {
        let mut c = 0;
        while c < GLYPH_COLUMNS {
            out[g][c] = single_column(&font[g], c);
            c += 1;
        }
        g += 1;
    }
    out
}

const fn build_double(font: &[Glyph; GLYPH_COUNT]) -> [DoubleColumns; GLYPH_COUNT] {
    let mut out = [[0u16; GLYPH_COLUMNS]; GLYPH_COUNT];
    let mut g = 0;
    while g < GLYPH_COUNT {
        let mut c = 0;
        while c < GLYPH_COLUMNS {
            out[g][c] = double_column(&font[g], c);
            c += 1;
        }
        g += 1;
    }
    out
}

/// Map a character byte to its row in the font tables
///
/// `0xFF` is drawn with the placeholder block since the upper half of the
/// code page has no glyphs yet. Anything else outside the font renders as a
/// blank cell.
pub const fn glyph_index(ch: u8) -> usize {
    match ch {
        FIRST_CHAR..=PLACEHOLDER => (ch - FIRST_CHAR) as usize,
        0xFF => (PLACEHOLDER - FIRST_CHAR) as usize,
        _ => 0,
    }
}

/// Cell byte for a `char`: ASCII passes through, anything else becomes
/// the placeholder block
pub const fn cell_byte(ch: char) -> u8 {
    if ch.is_ascii() {
        ch as u8
    } else {
        PLACEHOLDER
    }
}

/// Row-major source glyph for a character byte
pub fn glyph(ch: u8) -> &'static Glyph {
    &FONT_6X8[glyph_index(ch)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cell_byte() {
        assert_eq!(cell_byte('A'), b'A');
        assert_eq!(cell_byte('\0'), 0);
        assert_eq!(cell_byte('°'), PLACEHOLDER);
        assert_eq!(cell_byte('€'), PLACEHOLDER);
    }

    #[test]
    fn test_glyph_count() {
        assert_eq!(GLYPH_COUNT, 97);
        assert_eq!(FONT_SINGLE.len(), GLYPH_COUNT);
        assert_eq!(FONT_DOUBLE.len(), GLYPH_COUNT);
    }

    #[test]
    fn test_single_column_reads_msb_first() {
        // '|' is a centred vertical stroke in bit 2 of rows 0..=6
        let columns = &FONT_SINGLE[glyph_index(b'|')];
        assert_eq!(columns[3], 0x7F);
        for (i, &col) in columns.iter().enumerate() {
            if i != 3 {
                assert_eq!(col, 0, "column {}", i);
            }
        }
    }

    #[test]
    fn test_single_column_bit_order() {
        let glyph: Glyph = [0b10_0000, 0, 0, 0, 0, 0, 0, 0b00_0001];
        assert_eq!(single_column(&glyph, 0), 0b0000_0001);
        assert_eq!(single_column(&glyph, 5), 0b1000_0000);
        assert_eq!(single_column(&glyph, 2), 0);
    }

    #[test]
    fn test_stretch_column() {
        assert_eq!(stretch_column(0x00), 0x0000);
        assert_eq!(stretch_column(0xFF), 0xFFFF);
        assert_eq!(stretch_column(0b0000_0001), 0b0000_0000_0000_0011);
        assert_eq!(stretch_column(0b1000_0000), 0b1100_0000_0000_0000);
        assert_eq!(stretch_column(0b0101_0101), 0b0011_0011_0011_0011);
    }

    #[test]
    fn test_gap_column_and_last_row_are_blank() {
        for (g, columns) in FONT_SINGLE.iter().enumerate() {
            assert_eq!(columns[0], 0, "glyph {} has ink in the gap column", g);
            for &col in columns.iter() {
                assert_eq!(col & 0x80, 0, "glyph {} has ink in row 7", g);
            }
        }
    }

    #[test]
    fn test_glyph_index_mapping() {
        assert_eq!(glyph_index(b' '), 0);
        assert_eq!(glyph_index(b'A'), 33);
        assert_eq!(glyph_index(0x80), GLYPH_COUNT - 1);
        assert_eq!(glyph_index(0xFF), GLYPH_COUNT - 1);
        assert_eq!(glyph_index(0x00), 0);
        assert_eq!(glyph_index(b'\n'), 0);
        assert_eq!(glyph_index(0xC3), 0);
    }

    #[test]
    fn test_placeholder_is_solid() {
        let columns = &FONT_SINGLE[glyph_index(0xFF)];
        assert_eq!(columns[0], 0);
        for &col in &columns[1..] {
            assert_eq!(col, 0x7F);
        }
        assert_eq!(glyph(0xFF), glyph(PLACEHOLDER));
    }

    proptest! {
        #[test]
        fn prop_double_is_stretched_single(g in 0..GLYPH_COUNT, c in 0..GLYPH_COLUMNS) {
            let single = FONT_SINGLE[g][c];
            let double = FONT_DOUBLE[g][c];
            for i in 0..8 {
                let bit = (single >> i) & 1 == 1;
                prop_assert_eq!((double >> (2 * i)) & 1 == 1, bit);
                prop_assert_eq!((double >> (2 * i + 1)) & 1 == 1, bit);
            }
        }

        #[test]
        fn prop_single_matches_source_rows(g in 0..GLYPH_COUNT, c in 0..GLYPH_COLUMNS) {
            let rows = &FONT_6X8[g];
            for (row, &bits) in rows.iter().enumerate() {
                let source = (bits >> (5 - c)) & 1;
                prop_assert_eq!((FONT_SINGLE[g][c] >> row) & 1, source);
            }
        }
    }
}
