//! Level meter rasterizer
//!
//! Nine vertical bars, one per channel. Each bar is built as a stack of page
//! bytes (bottom page first) and then stamped into the framebuffer column by
//! column. Within a page, bit 0 is the top pixel row, so a partial fill sets
//! the high bits.

use crate::framebuffer::{FrameBuffer, PAGE_HEIGHT, WIDTH};

/// Number of meter channels
pub const CHANNEL_COUNT: usize = 9;

/// Bar width in pixels
pub const BAR_WIDTH: usize = 12;

/// Gap between bars in pixels
pub const BAR_SPACING: usize = 2;

/// Left margin before the first bar in pixels
pub const BAR_OFFSET: usize = 2;

/// Most pages a bar can span (64px panel minus two text pages)
pub const MAX_BAR_PAGES: usize = 6;

/// Pages kept free of bars for the status line
const RESERVED_PAGES: u8 = 2;

/// Supplies the data rendered on every update
///
/// Levels and peaks are fractions in `[0, 1]`; the source owns any peak
/// decay, the renderer only draws what it is given.
pub trait LevelSource {
    /// Current level per channel
    fn part_levels(&self) -> [f32; CHANNEL_COUNT];

    /// Peak level per channel
    fn peak_levels(&self) -> [f32; CHANNEL_COUNT];

    /// Status line text, one byte per character cell
    fn status_text(&self) -> &[u8];
}

/// Vertical extent of the bars for a given panel height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BarGeometry {
    /// Pages per bar
    pub total_pages: u8,
    /// Bar height in pixels
    pub bar_height: u8,
}

impl BarGeometry {
    /// Geometry for a panel of `height` pixels
    pub const fn for_height(height: u8) -> Self {
        let mut total_pages = (height / PAGE_HEIGHT as u8).saturating_sub(RESERVED_PAGES);
        if total_pages as usize > MAX_BAR_PAGES {
            total_pages = MAX_BAR_PAGES as u8;
        }
        Self {
            total_pages,
            bar_height: total_pages * PAGE_HEIGHT as u8,
        }
    }

    /// Scale a level to whole pixels (truncating)
    pub fn pixels(&self, level: f32) -> u8 {
        // NaN saturates to 0 in the cast
        (level.clamp(0.0, 1.0) * self.bar_height as f32) as u8
    }
}

/// Page bytes for one bar, index 0 is the bottom page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageColumn {
    pages: [u8; MAX_BAR_PAGES],
    len: u8,
}

impl PageColumn {
    /// Page bytes, bottom page first
    pub fn as_slice(&self) -> &[u8] {
        &self.pages[..self.len as usize]
    }
}

/// Build the page bytes for one channel
///
/// `peak` is `None` when peak markers are not drawn.
pub fn page_values(level: f32, peak: Option<f32>, geometry: BarGeometry) -> PageColumn {
    let total_pages = geometry.total_pages as usize;
    let mut pages = [0u8; MAX_BAR_PAGES];

    let level_px = geometry.pixels(level);
    let full_pages = (level_px / 8) as usize;
    let remainder = level_px % 8;

    pages[..full_pages].fill(0xFF);
    if remainder > 0 {
        pages[full_pages] = 0xFF << (8 - remainder);
    }

    if let Some(peak) = peak {
        let peak_px = geometry.pixels(peak);
        if peak_px > 0 {
            let peak_page = (peak_px / 8) as usize;
            let peak_remainder = peak_px % 8;

            if peak_remainder > 0 {
                pages[peak_page] |= 1 << (8 - peak_remainder);
            } else if let Some(below) = peak_page.checked_sub(1) {
                // Exactly on a page boundary: top row of the page underneath
                pages[below] |= 1;
            }
        }
    }

    PageColumn {
        pages,
        len: total_pages as u8,
    }
}

/// Buffer index of page `page` (0 = bottom) of column `column` of bar `bar`
///
/// `None` when the bar has no such page.
pub fn bar_offset(
    first_row: u8,
    geometry: BarGeometry,
    bar: usize,
    column: usize,
    page: usize,
) -> Option<usize> {
    let from_top = (geometry.total_pages as usize)
        .checked_sub(1)?
        .checked_sub(page)?;
    Some(
        first_row as usize * WIDTH
            + BAR_OFFSET
            + from_top * WIDTH
            + bar * (BAR_WIDTH + BAR_SPACING)
            + column
            + 1,
    )
}

/// Rasterize all channel bars starting at page row `first_row`
///
/// Every page of every bar is rewritten, so stale bar pixels never linger.
pub fn draw_levels(
    fb: &mut FrameBuffer,
    first_row: u8,
    levels: &[f32; CHANNEL_COUNT],
    peaks: Option<&[f32; CHANNEL_COUNT]>,
) {
    let geometry = BarGeometry::for_height(fb.height());

    for (bar, &level) in levels.iter().enumerate() {
        let peak = peaks.map(|p| p[bar]);
        let column = page_values(level, peak, geometry);

        for j in 0..BAR_WIDTH {
            for (k, &value) in column.as_slice().iter().enumerate() {
                if let Some(index) = bar_offset(first_row, geometry, bar, j, k) {
                    fb.put(index, value);
                }
            }
        }
    }
}
