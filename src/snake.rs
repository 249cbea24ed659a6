use std::collections::VecDeque;
use std::io;

use rand::Rng;

use crate::config::{
    GLYPH_HEAD_DOWN, GLYPH_HEAD_LEFT, GLYPH_HEAD_RIGHT, GLYPH_HEAD_STOPPED, GLYPH_HEAD_UP,
    GLYPH_TAIL,
};
use crate::display::Display;
use crate::fruit::random_free_point;
use crate::grid::{GridSurface, Point, Rect};
use crate::input::{direction_change_is_valid, Direction};

/// Returns `point` shifted one cell in `direction`.
#[must_use]
pub fn shifted(point: Point, direction: Direction) -> Point {
    match direction {
        Direction::Up => Point::new(point.x, point.y - 1),
        Direction::Down => Point::new(point.x, point.y + 1),
        Direction::Left => Point::new(point.x - 1, point.y),
        Direction::Right => Point::new(point.x + 1, point.y),
        Direction::None => point,
    }
}

/// Wraps a freshly shifted point back into `inner` when it left through the
/// edge it was travelling towards.
///
/// The horizontal offsets are asymmetric: leaving on the left lands on
/// `inner.right()` and leaving past `inner.right()` lands on `left + 1`.
/// With a one-cell border, `inner.right()` is the right border column;
/// [`GridSurface::erase`] repaints the border there once the head moves on.
#[must_use]
pub fn wrapped(point: Point, direction: Direction, inner: Rect) -> Point {
    match direction {
        Direction::Up if point.y < inner.top() => Point::new(point.x, inner.bottom() - 1),
        Direction::Down if point.y >= inner.bottom() => Point::new(point.x, inner.top()),
        Direction::Left if point.x < inner.left() => Point::new(inner.right(), point.y),
        Direction::Right if point.x > inner.right() => Point::new(inner.left() + 1, point.y),
        _ => point,
    }
}

/// Snake head, ordered tail and travel direction.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Point,
    // Front is the most recently added segment.
    tail: VecDeque<Point>,
    direction: Direction,
}

impl Snake {
    /// Creates a stationary snake with an empty tail at `head`.
    #[must_use]
    pub fn new(head: Point) -> Self {
        Self {
            head,
            tail: VecDeque::new(),
            direction: Direction::None,
        }
    }

    /// Creates a snake from explicit parts (tail front is next to the head).
    #[must_use]
    pub fn from_parts(head: Point, tail: Vec<Point>, direction: Direction) -> Self {
        Self {
            head,
            tail: VecDeque::from(tail),
            direction,
        }
    }

    /// Resets to a stationary head at a random cell with no tail and draws it.
    pub fn initialize<R, D>(
        &mut self,
        surface: &GridSurface,
        display: &mut D,
        rng: &mut R,
    ) -> io::Result<()>
    where
        R: Rng + ?Sized,
        D: Display + ?Sized,
    {
        self.tail.clear();
        self.direction = Direction::None;
        self.head = random_free_point(rng, surface.inner(), &[]);
        self.draw_head(surface, display)
    }

    /// Adopts `requested` unless it would reverse the snake onto itself.
    pub fn set_direction(&mut self, requested: Direction) {
        if direction_change_is_valid(self.direction, requested) {
            self.direction = requested;
        }
    }

    /// Moves one cell, growing by one segment when `grow` is set.
    pub fn advance<D: Display + ?Sized>(
        &mut self,
        surface: &GridSurface,
        display: &mut D,
        grow: bool,
    ) -> io::Result<()> {
        if self.direction == Direction::None {
            return Ok(());
        }

        let previous = self.head;
        self.head = wrapped(shifted(previous, self.direction), self.direction, surface.inner());
        self.draw_head(surface, display)?;

        if !grow && self.tail.is_empty() {
            return surface.erase(display, previous);
        }

        display.write_text(GLYPH_TAIL, previous, surface.palette().snake_tail)?;
        if !grow {
            if let Some(&last) = self.tail.back() {
                surface.erase(display, last)?;
            }
            let _ = self.tail.pop_back();
        }
        self.tail.push_front(previous);
        Ok(())
    }

    #[must_use]
    pub fn head(&self) -> Point {
        self.head
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Tail segments from newest to oldest.
    pub fn tail(&self) -> impl Iterator<Item = &Point> {
        self.tail.iter()
    }

    #[must_use]
    pub fn tail_len(&self) -> usize {
        self.tail.len()
    }

    /// Head followed by every tail segment.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(self.head)
            .chain(self.tail.iter().copied())
            .collect()
    }

    /// True when the head sits on a tail segment.
    #[must_use]
    pub fn head_in_tail(&self) -> bool {
        self.tail.contains(&self.head)
    }

    fn draw_head<D: Display + ?Sized>(
        &self,
        surface: &GridSurface,
        display: &mut D,
    ) -> io::Result<()> {
        display.write_text(
            head_glyph(self.direction),
            self.head,
            surface.palette().snake_head,
        )
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_HEAD_UP,
        Direction::Down => GLYPH_HEAD_DOWN,
        Direction::Left => GLYPH_HEAD_LEFT,
        Direction::Right => GLYPH_HEAD_RIGHT,
        Direction::None => GLYPH_HEAD_STOPPED,
    }
}
