//! Digital prison escape: a maze that rewires itself while the player runs for the exit.

pub mod app;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod logging;
pub mod mutate;
pub mod render;
pub mod search;
pub mod session;
pub mod terminal;
