use std::io;

use crate::config::{
    Palette, GLYPH_BOTTOM_LEFT, GLYPH_BOTTOM_RIGHT, GLYPH_FILL, GLYPH_HORIZONTAL, GLYPH_TOP_LEFT,
    GLYPH_TOP_RIGHT, GLYPH_VERTICAL,
};
use crate::display::Display;

/// Grid position in terminal cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with exclusive right and bottom edges.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn left(self) -> i32 {
        self.x
    }

    /// First column past the rectangle.
    #[must_use]
    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[must_use]
    pub const fn top(self) -> i32 {
        self.y
    }

    /// First row past the rectangle.
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns the rectangle shrunk by `margin` cells on every side.
    #[must_use]
    pub const fn inset(self, margin: i32) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + margin,
            width: self.width - 2 * margin,
            height: self.height - 2 * margin,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Bordered drawing area; gameplay happens in the inner region.
#[derive(Debug, Clone)]
pub struct GridSurface {
    outer: Rect,
    palette: Palette,
}

impl GridSurface {
    #[must_use]
    pub fn new(outer: Rect, palette: Palette) -> Self {
        Self { outer, palette }
    }

    /// Playable region: the outer rectangle without its one-cell border.
    #[must_use]
    pub fn inner(&self) -> Rect {
        self.outer.inset(1)
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Prepares the display and paints the border plus an empty interior.
    pub fn draw<D: Display + ?Sized>(&self, display: &mut D) -> io::Result<()> {
        let outer = self.outer;
        let width = u16::try_from(outer.right()).unwrap_or(0);
        let height = u16::try_from(outer.bottom()).unwrap_or(0);
        display.set_window_size(width, height);
        display.set_cursor_visible(false)?;
        display.clear()?;

        let span = usize::try_from(outer.width - 2).unwrap_or(0);
        let horizontal = GLYPH_HORIZONTAL.repeat(span);
        let fill = GLYPH_FILL.repeat(span);
        let border = self.palette.border;

        display.write_text(
            &format!("{GLYPH_TOP_LEFT}{horizontal}{GLYPH_TOP_RIGHT}"),
            Point::new(outer.left(), outer.top()),
            border,
        )?;

        for y in outer.top() + 1..outer.bottom() - 1 {
            display.write_text(GLYPH_VERTICAL, Point::new(outer.left(), y), border)?;
            display.write_text(&fill, Point::new(outer.left() + 1, y), self.palette.canvas)?;
            display.write_text(GLYPH_VERTICAL, Point::new(outer.right() - 1, y), border)?;
        }

        display.write_text(
            &format!("{GLYPH_BOTTOM_LEFT}{horizontal}{GLYPH_BOTTOM_RIGHT}"),
            Point::new(outer.left(), outer.bottom() - 1),
            border,
        )
    }

    /// Restores what [`draw`](Self::draw) painted at `point`.
    ///
    /// Usually that is the canvas fill, but a left wrap parks the head on the
    /// right border column, so border cells get their border glyph back.
    pub fn erase<D: Display + ?Sized>(&self, display: &mut D, point: Point) -> io::Result<()> {
        match self.border_glyph(point) {
            Some(glyph) => display.write_text(glyph, point, self.palette.border),
            None => display.write_text(GLYPH_FILL, point, self.palette.canvas),
        }
    }

    fn border_glyph(&self, point: Point) -> Option<&'static str> {
        let outer = self.outer;
        if !outer.contains(point) || self.inner().contains(point) {
            return None;
        }

        let first_row = point.y == outer.top();
        let last_row = point.y == outer.bottom() - 1;
        let first_column = point.x == outer.left();
        let last_column = point.x == outer.right() - 1;

        let glyph = match (first_row, last_row, first_column, last_column) {
            (true, _, true, _) => GLYPH_TOP_LEFT,
            (true, _, _, true) => GLYPH_TOP_RIGHT,
            (_, true, true, _) => GLYPH_BOTTOM_LEFT,
            (_, true, _, true) => GLYPH_BOTTOM_RIGHT,
            (true, _, _, _) | (_, true, _, _) => GLYPH_HORIZONTAL,
            _ => GLYPH_VERTICAL,
        };
        Some(glyph)
    }
}
