//! Tick-driven grid Snake.
//!
//! The simulation core (`grid`, `snake`, `food`, `input`, `engine`,
//! `session`, `timer`) has no terminal dependencies; `presenter`,
//! `renderer`, `controls`, and `ui` host it in a ratatui terminal.

pub mod config;
pub mod controls;
pub mod engine;
pub mod food;
pub mod grid;
pub mod input;
pub mod presenter;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod timer;
pub mod ui;
