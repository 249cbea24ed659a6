use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetSize, SetTitle, disable_raw_mode,
    enable_raw_mode, size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;

use crate::display::{BufferDisplay, Display};
use crate::grid::Point;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session
/// and acts as the game's display.
///
/// Drawing goes to a persistent canvas that is copied into each ratatui frame
/// on [`Display::present`]. On drop, this type restores terminal state
/// best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
    canvas: BufferDisplay,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui
    /// terminal with a canvas at least `min_width` × `min_height` cells.
    pub fn enter(min_width: u16, min_height: u16) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                return Err(error);
            }
        };

        let (columns, rows) = terminal_size().unwrap_or((min_width, min_height));
        Ok(Self {
            terminal,
            canvas: BufferDisplay::new(columns.max(min_width), rows.max(min_height)),
        })
    }

}

impl Display for TerminalSession {
    fn write_text(&mut self, text: &str, point: Point, style: Style) -> io::Result<()> {
        self.canvas.write_text(text, point, style)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.canvas.clear()?;
        self.terminal.clear()
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            self.terminal.show_cursor()
        } else {
            self.terminal.hide_cursor()
        }
    }

    fn set_window_size(&mut self, width: u16, height: u16) {
        // Only the Windows console honors resize requests reliably.
        if cfg!(windows) {
            let _ = execute!(self.terminal.backend_mut(), SetSize(width, height));
        }
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.terminal.backend_mut(), SetTitle(title))
    }

    fn present(&mut self) -> io::Result<()> {
        let canvas = self.canvas.buffer();
        self.terminal.draw(|frame| {
            let area = frame.area().intersection(canvas.area);
            let buffer = frame.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let (Some(source), Some(target)) =
                        (canvas.cell((x, y)), buffer.cell_mut((x, y)))
                    {
                        *target = source.clone();
                    }
                }
            }
        })?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Leaves raw mode and the alternate screen, ignoring what already failed.
pub fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
