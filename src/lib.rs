//! Fixed-tick terminal Snake: a wrap-around grid, numbered fruit and a
//! restart prompt, with the terminal and the keyboard behind traits so a
//! whole session can be driven from tests.

pub mod config;
pub mod display;
pub mod error;
pub mod fruit;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod player;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
