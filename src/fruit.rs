use std::io;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::display::Display;
use crate::grid::{GridSurface, Point, Rect};

/// Point values a fruit can carry. Single digits keep a fruit to one cell.
pub const FRUIT_VALUES: RangeInclusive<u8> = 1..=9;

/// The one fruit on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Fruit {
    pub location: Point,
    pub value: u8,
}

impl Fruit {
    #[must_use]
    pub fn new(location: Point, value: u8) -> Self {
        debug_assert!(FRUIT_VALUES.contains(&value));
        Self { location, value }
    }

    /// Places a fruit with a random value on a random cell not in `occupied`
    /// and draws its digit.
    ///
    /// Never returns when every inner cell is occupied.
    pub fn spawn<R, D>(
        rng: &mut R,
        surface: &GridSurface,
        display: &mut D,
        occupied: &[Point],
    ) -> io::Result<Self>
    where
        R: Rng + ?Sized,
        D: Display + ?Sized,
    {
        let location = random_free_point(rng, surface.inner(), occupied);
        let value = rng.gen_range(FRUIT_VALUES);
        let fruit = Self::new(location, value);
        fruit.draw(surface, display)?;
        Ok(fruit)
    }

    pub fn draw<D: Display + ?Sized>(
        &self,
        surface: &GridSurface,
        display: &mut D,
    ) -> io::Result<()> {
        display.write_text(
            &self.value.to_string(),
            self.location,
            surface.palette().fruit,
        )
    }

    #[must_use]
    pub fn points(self) -> u32 {
        u32::from(self.value)
    }
}

/// Samples uniformly random cells of `area` until one is not in `avoid`.
#[must_use]
pub fn random_free_point<R: Rng + ?Sized>(rng: &mut R, area: Rect, avoid: &[Point]) -> Point {
    debug_assert!(!area.is_empty(), "cannot sample an empty area: {area:?}");

    loop {
        let point = Point::new(
            rng.gen_range(area.left()..area.right()),
            rng.gen_range(area.top()..area.bottom()),
        );
        if !avoid.contains(&point) {
            return point;
        }
    }
}
