use std::io;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellArea;
use ratatui::style::Style;

use crate::grid::Point;

/// Text surface the game draws on.
///
/// Everything the game knows about the terminal goes through this trait so
/// the session can run against an in-memory canvas in tests.
pub trait Display {
    /// Writes `text` starting at `point`. Cells outside the surface are clipped.
    fn write_text(&mut self, text: &str, point: Point, style: Style) -> io::Result<()>;

    /// Blanks the whole surface.
    fn clear(&mut self) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Best-effort resize; silently ignored where unsupported.
    fn set_window_size(&mut self, width: u16, height: u16);

    fn set_title(&mut self, title: &str) -> io::Result<()>;

    /// Makes pending writes visible.
    fn present(&mut self) -> io::Result<()>;
}

/// In-memory display backed by a ratatui buffer.
#[derive(Debug, Clone)]
pub struct BufferDisplay {
    buffer: Buffer,
    title: String,
    cursor_visible: bool,
    window_size: Option<(u16, u16)>,
    presented_frames: u64,
}

impl BufferDisplay {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::empty(CellArea::new(0, 0, width, height)),
            title: String::new(),
            cursor_visible: true,
            window_size: None,
            presented_frames: 0,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[must_use]
    pub fn symbol_at(&self, point: Point) -> Option<&str> {
        let (x, y) = self.cell_position(point)?;
        self.buffer.cell((x, y)).map(|cell| cell.symbol())
    }

    #[must_use]
    pub fn style_at(&self, point: Point) -> Option<Style> {
        let (x, y) = self.cell_position(point)?;
        self.buffer.cell((x, y)).map(|cell| cell.style())
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    #[must_use]
    pub fn window_size(&self) -> Option<(u16, u16)> {
        self.window_size
    }

    #[must_use]
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    /// Returns row `y` as plain text.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let area = self.buffer.area;
        (area.left()..area.right())
            .filter_map(|x| self.buffer.cell((x, y)))
            .map(|cell| cell.symbol())
            .collect()
    }

    fn cell_position(&self, point: Point) -> Option<(u16, u16)> {
        let x = u16::try_from(point.x).ok()?;
        let y = u16::try_from(point.y).ok()?;
        let area = self.buffer.area;
        if x < area.left() || x >= area.right() || y < area.top() || y >= area.bottom() {
            return None;
        }

        Some((x, y))
    }
}

impl Display for BufferDisplay {
    fn write_text(&mut self, text: &str, point: Point, style: Style) -> io::Result<()> {
        // Text starting left of the surface loses its leading cells.
        let skipped = usize::try_from(point.x.saturating_neg()).unwrap_or(0);
        let Some((x, y)) = self.cell_position(Point::new(point.x.max(0), point.y)) else {
            return Ok(());
        };

        let visible: String = text.chars().skip(skipped).collect();
        self.buffer.set_string(x, y, visible, style);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.buffer.reset();
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn set_window_size(&mut self, width: u16, height: u16) {
        self.window_size = Some((width, height));
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        title.clone_into(&mut self.title);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented_frames += 1;
        Ok(())
    }
}
