use std::time::Duration;

use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use terminal_snake::config::GameConfig;
use terminal_snake::display::BufferDisplay;
use terminal_snake::fruit::Fruit;
use terminal_snake::game::{Game, GameStatus};
use terminal_snake::grid::{Point, Rect};
use terminal_snake::input::{Direction, ScriptedInput};
use terminal_snake::snake::Snake;

type TestGame = Game<BufferDisplay, ScriptedInput, StdRng>;

/// Session whose inner region is the 10×10 square at the origin.
fn session(input: ScriptedInput, seed: u64) -> TestGame {
    let mut config = GameConfig::with_outer(Rect::new(-1, -1, 12, 12));
    config.heartbeat = Duration::ZERO;
    let (width, height) = config.required_extent();

    Game::new(
        config,
        BufferDisplay::new(width, height),
        input,
        StdRng::seed_from_u64(seed),
    )
    .expect("buffer-backed game should start")
}

#[test]
fn three_right_presses_move_the_head_three_cells() {
    let mut game = session(
        ScriptedInput::new([KeyCode::Right, KeyCode::Right, KeyCode::Right]),
        42,
    );
    assert_eq!(game.surface.inner(), Rect::new(0, 0, 10, 10));
    let start = game.snake.head();
    // Keep the fruit out of the way of the row being travelled.
    game.fruit = Fruit::new(Point::new(start.x, (start.y + 5) % 10), 3);

    for _ in 0..3 {
        game.tick().expect("tick should succeed");
    }

    let expected_x = if start.x + 3 > 10 {
        start.x + 3 - 10
    } else {
        start.x + 3
    };
    assert_eq!(game.snake.head(), Point::new(expected_x, start.y));
    assert_eq!(game.snake.tail_len(), 0);
    assert_eq!(game.status, GameStatus::Running);
}

#[test]
fn eating_a_seven_adds_seven_and_one_segment() {
    let mut game = session(ScriptedInput::default(), 7);
    game.snake = Snake::from_parts(Point::new(2, 2), vec![Point::new(1, 2)], Direction::Right);
    game.fruit = Fruit::new(Point::new(2, 2), 7);
    game.score.add(10);

    game.tick().expect("tick should succeed");

    assert_eq!(game.score.current(), 17);
    assert_eq!(game.snake.tail_len(), 2);
    assert!(!game.snake.points().contains(&game.fruit.location));
    assert!(game.surface.inner().contains(game.fruit.location));
}

#[test]
fn score_sums_fruit_values_and_resets_on_restart() {
    let mut game = session(ScriptedInput::default(), 3);
    game.snake = Snake::from_parts(Point::new(1, 5), Vec::new(), Direction::Right);

    let mut expected = 0;
    for (x, value) in [(1, 4), (2, 9), (3, 1), (4, 5)] {
        game.fruit = Fruit::new(Point::new(x, 5), value);
        expected += u32::from(value);
        game.tick().expect("tick should succeed");
    }
    assert_eq!(game.score.current(), expected);
    assert_eq!(game.score.current(), 19);
    assert_eq!(game.snake.tail_len(), 4);

    // Turn back into the body: Down, Left, then Up lands on a tail segment.
    game.fruit = Fruit::new(Point::new(9, 9), 1);
    for key in [KeyCode::Down, KeyCode::Left, KeyCode::Up] {
        game.input_mut().push(key);
        game.tick().expect("tick should succeed");
    }
    game.tick().expect("tick should succeed");
    assert_eq!(game.status, GameStatus::GameOverPrompt);

    game.input_mut().push(KeyCode::Char('y'));
    game.prompt_restart().expect("prompt should read an answer");

    assert_eq!(game.status, GameStatus::Running);
    assert_eq!(game.score.current(), 0);
    assert_eq!(game.snake.tail_len(), 0);
}

#[test]
fn running_into_the_tail_prompts_and_no_ends_the_session() {
    let mut input = ScriptedInput::new([KeyCode::Right]);
    input.push_idle();
    input.push(KeyCode::Char('N'));
    let mut game = session(input, 9);
    // Four tail segments: the move right lands on tail[2].
    game.snake = Snake::from_parts(
        Point::new(5, 5),
        vec![
            Point::new(5, 6),
            Point::new(6, 6),
            Point::new(6, 5),
            Point::new(6, 4),
        ],
        Direction::Up,
    );
    game.fruit = Fruit::new(Point::new(1, 1), 2);

    game.run().expect("declining the restart ends the session cleanly");

    assert_eq!(game.status, GameStatus::Terminated);
    assert_eq!(game.snake.head(), Point::new(6, 5));
    assert!(game.snake.head_in_tail());
    assert!(game
        .display()
        .row_text(0)
        .starts_with("Game Over! Do you want to restart? (Y/N)"));
}

#[test]
fn respawned_fruit_never_lands_on_the_snake() {
    let mut game = session(ScriptedInput::default(), 21);
    game.snake = Snake::from_parts(Point::new(0, 0), Vec::new(), Direction::Right);

    for _ in 0..20 {
        // Feed the snake by dropping the fruit under its head.
        let head = game.snake.head();
        game.fruit = Fruit::new(head, 1);
        game.tick().expect("tick should succeed");
        if game.status != GameStatus::Running {
            break;
        }

        assert!(!game.snake.points().contains(&game.fruit.location));
    }
}
