use rand::Rng;

use crate::food::spawn_position;
use crate::grid::{GridSize, Position};
use crate::input::{Direction, InputController};
use crate::snake::Snake;

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    /// The snake filled every cell, leaving nowhere to place food.
    BoardFull,
}

/// Outcome of one simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickResult {
    Continue,
    Ate,
    GameOver(DeathReason),
}

/// Mutable simulation state for one session.
#[derive(Debug, Clone)]
pub struct Board {
    pub snake: Snake,
    pub food: Position,
    pub score: u32,
    pub controls: InputController,
    pub tick_count: u64,
    bounds: GridSize,
}

impl Board {
    /// Creates the opening board: one segment at the grid center heading
    /// right, food on a random free cell.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Self {
        let snake = Snake::new(bounds.center());
        // GridSize guarantees at least two cells, so one is free.
        let food = spawn_position(rng, bounds, &snake).unwrap_or(bounds.center());

        Self {
            snake,
            food,
            score: 0,
            controls: InputController::new(Direction::Right),
            tick_count: 0,
            bounds,
        }
    }

    /// Builds a board from explicit parts, for scripted scenarios.
    #[must_use]
    pub fn from_parts(bounds: GridSize, snake: Snake, food: Position, heading: Direction) -> Self {
        Self {
            snake,
            food,
            score: 0,
            controls: InputController::new(heading),
            tick_count: 0,
            bounds,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}

/// Advances `board` by one step.
///
/// Collisions are checked against the computed head before anything moves,
/// wall first, so a lost board still shows the final position.
pub fn tick<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> TickResult {
    let direction = board.controls.commit();
    board.tick_count += 1;

    let next_head = board.snake.head().step(direction);

    if !board.bounds.contains(next_head) {
        return TickResult::GameOver(DeathReason::WallCollision);
    }

    if board.snake.occupies(next_head) {
        return TickResult::GameOver(DeathReason::SelfCollision);
    }

    board.snake.push_head(next_head);

    if next_head != board.food {
        board.snake.drop_tail();
        return TickResult::Continue;
    }

    board.score += 1;
    match spawn_position(rng, board.bounds, &board.snake) {
        Some(food) => {
            board.food = food;
            TickResult::Ate
        }
        None => TickResult::GameOver(DeathReason::BoardFull),
    }
}
