/// Points collected in the current game.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Score {
    current: u32,
}

impl Score {
    /// Starts a new game at zero.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Adds the value of an eaten fruit.
    pub fn add(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
    }

    #[must_use]
    pub fn current(self) -> u32 {
        self.current
    }
}
