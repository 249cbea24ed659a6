use std::io;
use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{GameConfig, RESTART_PROMPT};
use crate::display::Display;
use crate::fruit::Fruit;
use crate::grid::{GridSurface, Point};
use crate::input::{map_key, GameInput, InputSource};
use crate::player::{Player, PlayerStore};
use crate::score::Score;
use crate::snake::Snake;

/// Current high-level session state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOverPrompt,
    Terminated,
}

struct ScoreSink {
    store: Box<dyn PlayerStore>,
    player: Player,
}

/// One game session: board state plus the collaborators it talks to.
pub struct Game<D, I, R> {
    pub surface: GridSurface,
    pub snake: Snake,
    pub fruit: Fruit,
    pub score: Score,
    pub status: GameStatus,
    heartbeat: Duration,
    display: D,
    input: I,
    rng: R,
    score_sink: Option<ScoreSink>,
}

impl<D, I, R> Game<D, I, R>
where
    D: Display,
    I: InputSource,
    R: Rng,
{
    /// Builds a session and runs the first-game setup.
    pub fn new(config: GameConfig, display: D, input: I, rng: R) -> io::Result<Self> {
        let surface = GridSurface::new(config.outer, config.palette);
        let inner = surface.inner();
        let origin = Point::new(inner.left(), inner.top());

        let mut game = Self {
            surface,
            snake: Snake::new(origin),
            fruit: Fruit::new(origin, 1),
            score: Score::default(),
            status: GameStatus::Running,
            heartbeat: config.heartbeat,
            display,
            input,
            rng,
            score_sink: None,
        };
        game.initialize()?;
        Ok(game)
    }

    /// Offers each finished game's score to `store` on behalf of `player`.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn PlayerStore>, player: Player) -> Self {
        self.score_sink = Some(ScoreSink { store, player });
        self
    }

    /// Redraws the board and starts a fresh game.
    pub fn initialize(&mut self) -> io::Result<()> {
        self.surface.draw(&mut self.display)?;
        self.snake
            .initialize(&self.surface, &mut self.display, &mut self.rng)?;
        self.fruit = Fruit::spawn(
            &mut self.rng,
            &self.surface,
            &mut self.display,
            &self.snake.points(),
        )?;
        self.score.reset();
        self.status = GameStatus::Running;

        debug!(head = ?self.snake.head(), fruit = ?self.fruit, "new game");
        self.display.set_title(&self.title())?;
        self.display.present()
    }

    /// Plays until the player declines a restart or quits.
    pub fn run(&mut self) -> io::Result<()> {
        info!("session started");

        loop {
            match self.status {
                GameStatus::Running => {
                    self.tick()?;
                    if self.status == GameStatus::Running {
                        thread::sleep(self.heartbeat);
                    }
                }
                GameStatus::GameOverPrompt => self.prompt_restart()?,
                GameStatus::Terminated => break,
            }
        }

        info!(score = self.score.current(), "session ended");
        Ok(())
    }

    /// Advances the session by one heartbeat.
    pub fn tick(&mut self) -> io::Result<()> {
        if self.status != GameStatus::Running {
            return Ok(());
        }

        if self.input.key_available()? {
            match map_key(self.input.read_key()?) {
                Some(GameInput::Direction(direction)) => self.snake.set_direction(direction),
                Some(GameInput::Quit) => {
                    info!("quit requested");
                    self.status = GameStatus::Terminated;
                    return Ok(());
                }
                _ => {}
            }
        }

        if self.snake.head_in_tail() {
            self.status = GameStatus::GameOverPrompt;
            self.record_score();
            return Ok(());
        }

        if self.snake.head() == self.fruit.location {
            self.snake.advance(&self.surface, &mut self.display, true)?;
            self.score.add(self.fruit.points());
            debug!(
                value = self.fruit.value,
                score = self.score.current(),
                "fruit eaten"
            );

            self.fruit = Fruit::spawn(
                &mut self.rng,
                &self.surface,
                &mut self.display,
                &self.snake.points(),
            )?;
            self.display.set_title(&self.title())?;
        } else {
            self.snake.advance(&self.surface, &mut self.display, false)?;
        }

        self.display.present()
    }

    /// Asks whether to play again and blocks until the player answers.
    pub fn prompt_restart(&mut self) -> io::Result<()> {
        self.display.write_text(
            RESTART_PROMPT,
            Point::new(0, 0),
            self.surface.palette().prompt,
        )?;
        self.display.present()?;

        match self.wait_for(&[GameInput::Yes, GameInput::No, GameInput::Quit])? {
            GameInput::Yes => {
                info!("restarting");
                self.initialize()
            }
            _ => {
                self.status = GameStatus::Terminated;
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "Score: {}. Tail: {}",
            self.score.current(),
            self.snake.tail_len()
        )
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    fn wait_for(&mut self, allowed: &[GameInput]) -> io::Result<GameInput> {
        loop {
            let key = self.input.read_key()?;
            if let Some(input) = map_key(key).filter(|input| allowed.contains(input)) {
                return Ok(input);
            }
        }
    }

    fn record_score(&mut self) {
        let score = self.score.current();
        info!(score, tail = self.snake.tail_len(), "game over");

        let Some(sink) = self.score_sink.as_mut() else {
            return;
        };
        if let Err(error) = sink.store.save(score, &sink.player) {
            warn!(%error, "failed to save score");
        }
    }
}
