use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
///
/// `None` is the resting state before the first arrow key: the snake stays put.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Returns the opposite direction. `None` has no opposite.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Yes,
    No,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next == Direction::None || next != current.opposite()
}

/// Maps a key press onto a game input; unmapped keys yield `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(GameInput::Quit)
        }
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(GameInput::Yes),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameInput::No),
        _ => None,
    }
}

/// Source of key presses for the game loop.
pub trait InputSource {
    /// Returns true when a key press can be read without blocking.
    fn key_available(&mut self) -> io::Result<bool>;

    /// Blocks until the next key press.
    fn read_key(&mut self) -> io::Result<KeyEvent>;
}

/// Keyboard input read from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermInput {
    pending: Option<KeyEvent>,
}

impl InputSource for CrosstermInput {
    fn key_available(&mut self) -> io::Result<bool> {
        while self.pending.is_none() && event::poll(Duration::ZERO)? {
            // Resize, mouse and key release events are dropped here.
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.pending = Some(key);
                }
            }
        }

        Ok(self.pending.is_some())
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        if let Some(key) = self.pending.take() {
            return Ok(key);
        }

        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

/// Replays a fixed sequence of key presses.
///
/// Idle steps make one `key_available` poll report nothing, which lets a
/// script leave ticks without input. A blocking read skips idle steps and
/// fails with `UnexpectedEof` on an exhausted script instead of hanging.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: VecDeque<Option<KeyEvent>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new<K: IntoIterator<Item = KeyCode>>(keys: K) -> Self {
        Self {
            steps: keys.into_iter().map(|code| Some(KeyEvent::from(code))).collect(),
        }
    }

    pub fn push(&mut self, key: KeyCode) {
        self.steps.push_back(Some(KeyEvent::from(key)));
    }

    pub fn push_event(&mut self, key: KeyEvent) {
        self.steps.push_back(Some(key));
    }

    /// Queues one poll that finds no key.
    pub fn push_idle(&mut self) {
        self.steps.push_back(None);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl InputSource for ScriptedInput {
    fn key_available(&mut self) -> io::Result<bool> {
        match self.steps.front() {
            Some(Some(_)) => Ok(true),
            Some(None) => {
                let _ = self.steps.pop_front();
                Ok(false)
            }
            None => Ok(false),
        }
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        while let Some(step) = self.steps.pop_front() {
            if let Some(key) = step {
                return Ok(key);
            }
        }

        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input script exhausted",
        ))
    }
}
